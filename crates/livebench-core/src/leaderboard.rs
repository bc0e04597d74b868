//! The leaderboard state container.
//!
//! [`Leaderboard`] owns the loading flag, the current row snapshot and the
//! committed filter criteria, and exposes explicit transitions for each of
//! them. Derived values are memoized against their exact dependencies:
//! facets against the snapshot, visible rows against the snapshot plus every
//! criterion. Reading them after an unrelated change is free.

use std::ops::RangeInclusive;
use std::sync::Arc;

use crate::criteria::{sanitize_threshold, FilterCriteria, OrganizationFilter};
use crate::error::DataUnavailable;
use crate::facets::DerivedFacets;
use crate::filter::compute_visible_rows;
use crate::memo::Memo;
use crate::model::BenchmarkRow;
use crate::traits::degrade;

/// Dependencies of the visible-row computation.
#[derive(Debug, Clone, PartialEq)]
struct VisibleKey {
    snapshot: u64,
    search_term: String,
    organization_filter: OrganizationFilter,
    min_global_average: f64,
}

/// Owned leaderboard state with memoized derived values.
#[derive(Debug)]
pub struct Leaderboard {
    loading: bool,
    rows: Arc<[BenchmarkRow]>,
    // Identity of the current snapshot; bumped on every replacement.
    snapshot: u64,
    criteria: FilterCriteria,
    facets: Memo<u64, DerivedFacets>,
    visible: Memo<VisibleKey, Vec<BenchmarkRow>>,
}

/// Read-only view handed to renderers.
#[derive(Debug, Clone, Copy)]
pub struct LeaderboardView<'a> {
    pub loading: bool,
    pub criteria: &'a FilterCriteria,
    pub organizations: &'a [String],
    pub max_global_average: u32,
    pub visible_rows: &'a [BenchmarkRow],
    pub total_rows: usize,
}

impl Default for Leaderboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Leaderboard {
    /// An empty leaderboard waiting for its first snapshot.
    pub fn new() -> Self {
        Self {
            loading: true,
            rows: Arc::from(Vec::new()),
            snapshot: 0,
            criteria: FilterCriteria::default(),
            facets: Memo::new(),
            visible: Memo::new(),
        }
    }

    /// Replace the snapshot wholesale.
    ///
    /// A non-empty snapshot resets the score threshold to zero; the search
    /// term and organization filter are kept.
    pub fn replace_rows(&mut self, rows: Vec<BenchmarkRow>) {
        self.snapshot += 1;
        self.loading = false;
        if !rows.is_empty() {
            if self.criteria.min_global_average != 0.0 {
                tracing::debug!(
                    previous = self.criteria.min_global_average,
                    "new snapshot, resetting score threshold"
                );
            }
            self.criteria.min_global_average = 0.0;
        }
        self.rows = Arc::from(rows);
    }

    /// Apply the outcome of a fetch. Failures load an empty snapshot.
    pub fn apply_fetch(&mut self, source: &str, result: Result<Vec<BenchmarkRow>, DataUnavailable>) {
        self.replace_rows(degrade(source, result));
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.criteria.search_term = term.into();
    }

    pub fn set_organization_filter(&mut self, filter: impl Into<OrganizationFilter>) {
        self.criteria.organization_filter = filter.into();
    }

    /// Set the score floor. Negative and NaN values are treated as zero.
    pub fn set_min_global_average(&mut self, value: f64) {
        self.criteria.min_global_average = sanitize_threshold(value);
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn rows(&self) -> &[BenchmarkRow] {
        &self.rows
    }

    pub fn facets(&mut self) -> &DerivedFacets {
        refresh_facets(&mut self.facets, self.snapshot, &self.rows)
    }

    pub fn organizations(&mut self) -> &[String] {
        &self.facets().organizations
    }

    pub fn max_global_average(&mut self) -> u32 {
        self.facets().max_global_average
    }

    /// Range of the threshold control, in whole points.
    pub fn threshold_range(&mut self) -> RangeInclusive<u32> {
        0..=self.max_global_average()
    }

    pub fn visible_rows(&mut self) -> &[BenchmarkRow] {
        let key = self.visible_key();
        refresh_visible(&mut self.visible, key, &self.rows, &self.criteria)
    }

    /// Refresh every derived value and borrow them together.
    pub fn view(&mut self) -> LeaderboardView<'_> {
        let key = self.visible_key();
        let Self {
            loading,
            rows,
            snapshot,
            criteria,
            facets,
            visible,
        } = self;
        let (rows, criteria) = (&*rows, &*criteria);
        let facets = refresh_facets(facets, *snapshot, rows);
        let visible = refresh_visible(visible, key, rows, criteria);
        LeaderboardView {
            loading: *loading,
            criteria,
            organizations: &facets.organizations,
            max_global_average: facets.max_global_average,
            visible_rows: visible,
            total_rows: rows.len(),
        }
    }

    /// How many times facets have been derived.
    pub fn facet_recomputations(&self) -> u64 {
        self.facets.recomputations()
    }

    /// How many times the visible rows have been filtered.
    pub fn visible_recomputations(&self) -> u64 {
        self.visible.recomputations()
    }

    fn visible_key(&self) -> VisibleKey {
        VisibleKey {
            snapshot: self.snapshot,
            search_term: self.criteria.search_term.clone(),
            organization_filter: self.criteria.organization_filter.clone(),
            min_global_average: self.criteria.min_global_average,
        }
    }
}

fn refresh_facets<'a>(
    memo: &'a mut Memo<u64, DerivedFacets>,
    snapshot: u64,
    rows: &[BenchmarkRow],
) -> &'a DerivedFacets {
    memo.get_or_compute(snapshot, || {
        let facets = DerivedFacets::from_rows(rows);
        tracing::debug!(
            snapshot,
            organizations = facets.organizations.len(),
            "facets recomputed"
        );
        facets
    })
}

fn refresh_visible<'a>(
    memo: &'a mut Memo<VisibleKey, Vec<BenchmarkRow>>,
    key: VisibleKey,
    rows: &[BenchmarkRow],
    criteria: &FilterCriteria,
) -> &'a [BenchmarkRow] {
    memo.get_or_compute(key, || {
        let visible = compute_visible_rows(rows, criteria);
        tracing::debug!(visible = visible.len(), total = rows.len(), "visible rows recomputed");
        visible
    })
}
