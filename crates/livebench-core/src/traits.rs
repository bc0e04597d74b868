//! Core trait definitions for leaderboard data sources.
//!
//! Implemented by the `livebench-source` crate.

use async_trait::async_trait;

use crate::error::DataUnavailable;
use crate::model::BenchmarkRow;

/// Trait for backends that supply a full row snapshot.
#[async_trait]
pub trait RowSource: Send + Sync {
    /// Human-readable source name (e.g. "http").
    fn name(&self) -> &str;

    /// Fetch the complete leaderboard.
    async fn fetch_rows(&self) -> Result<Vec<BenchmarkRow>, DataUnavailable>;
}

/// Fetch a snapshot, degrading any failure into an empty one.
pub async fn load_snapshot(source: &dyn RowSource) -> Vec<BenchmarkRow> {
    degrade(source.name(), source.fetch_rows().await)
}

/// Collapse a fetch outcome into a snapshot. Failures are logged and yield no
/// rows.
pub fn degrade(
    source: &str,
    result: Result<Vec<BenchmarkRow>, DataUnavailable>,
) -> Vec<BenchmarkRow> {
    match result {
        Ok(rows) => {
            tracing::info!(source, rows = rows.len(), "leaderboard snapshot loaded");
            rows
        }
        Err(e) => {
            tracing::warn!(source, error = %e, "leaderboard data unavailable, showing empty snapshot");
            Vec::new()
        }
    }
}
