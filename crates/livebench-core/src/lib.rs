//! livebench-core — filtering engine and reactive state for the leaderboard.
//!
//! This crate defines the benchmark data model, the filter criteria, the
//! facet extractor and filter predicate engine, and the memoized state
//! container and session loop that recompute derived values only when their
//! dependencies change.

pub mod criteria;
pub mod debounce;
pub mod error;
pub mod facets;
pub mod filter;
pub mod leaderboard;
pub mod memo;
pub mod model;
pub mod session;
pub mod traits;

pub use criteria::{FilterCriteria, OrganizationFilter};
pub use error::DataUnavailable;
pub use leaderboard::{Leaderboard, LeaderboardView};
pub use model::BenchmarkRow;
pub use traits::RowSource;
