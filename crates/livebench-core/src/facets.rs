//! Facets derived from a row snapshot: the organization list and the score
//! ceiling that bound the filter controls.
//!
//! Facets depend on the rows alone, never on the filter criteria.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::model::BenchmarkRow;

/// Ceiling reported before any data exists, so the threshold control keeps a
/// usable range.
pub const EMPTY_SNAPSHOT_CEILING: u32 = 100;

/// Values derived from the current snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedFacets {
    /// Distinct organizations, ascending.
    pub organizations: Vec<String>,
    /// Ceiling of the highest global average.
    pub max_global_average: u32,
}

impl DerivedFacets {
    pub fn from_rows(rows: &[BenchmarkRow]) -> Self {
        Self {
            organizations: distinct_organizations(rows),
            max_global_average: global_average_ceiling(rows),
        }
    }
}

/// Distinct organization names in ascending order.
pub fn distinct_organizations(rows: &[BenchmarkRow]) -> Vec<String> {
    rows.iter()
        .map(|r| r.organization.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Highest global average rounded up, or [`EMPTY_SNAPSHOT_CEILING`] for an
/// empty snapshot.
pub fn global_average_ceiling(rows: &[BenchmarkRow]) -> u32 {
    if rows.is_empty() {
        return EMPTY_SNAPSHOT_CEILING;
    }
    let max = rows
        .iter()
        .fold(0.0_f64, |acc, r| acc.max(r.global_average));
    // Saturating float-to-int cast.
    max.ceil() as u32
}
