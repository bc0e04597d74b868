//! User-controlled filter state.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which organizations are visible.
///
/// Serialized as the plain organization name, or `"all"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrganizationFilter {
    #[default]
    All,
    /// Exact, case-sensitive organization name.
    Only(String),
}

impl OrganizationFilter {
    pub fn allows(&self, organization: &str) -> bool {
        match self {
            OrganizationFilter::All => true,
            OrganizationFilter::Only(name) => name == organization,
        }
    }
}

impl From<String> for OrganizationFilter {
    fn from(value: String) -> Self {
        if value == "all" {
            OrganizationFilter::All
        } else {
            OrganizationFilter::Only(value)
        }
    }
}

impl From<&str> for OrganizationFilter {
    fn from(value: &str) -> Self {
        OrganizationFilter::from(value.to_string())
    }
}

impl From<OrganizationFilter> for String {
    fn from(value: OrganizationFilter) -> Self {
        value.to_string()
    }
}

impl fmt::Display for OrganizationFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrganizationFilter::All => write!(f, "all"),
            OrganizationFilter::Only(name) => write!(f, "{name}"),
        }
    }
}

impl FromStr for OrganizationFilter {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(OrganizationFilter::from(s))
    }
}

/// The committed filter criteria a snapshot is evaluated against.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Case-insensitive substring matched against model and organization.
    #[serde(default)]
    pub search_term: String,
    #[serde(default)]
    pub organization_filter: OrganizationFilter,
    /// Inclusive lower bound on the global average. Never negative.
    #[serde(default)]
    pub min_global_average: f64,
}

impl FilterCriteria {
    /// The search term as matched: trimmed and lower-cased.
    pub fn normalized_search(&self) -> String {
        self.search_term.trim().to_lowercase()
    }
}

/// Clamp a threshold into the valid domain (`>= 0`, not NaN).
pub fn sanitize_threshold(value: f64) -> f64 {
    if value.is_nan() || value < 0.0 {
        0.0
    } else {
        value
    }
}
