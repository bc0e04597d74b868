//! Local JSON snapshot file.

use std::path::PathBuf;

use async_trait::async_trait;

use livebench_core::model::parse_rows;
use livebench_core::{BenchmarkRow, DataUnavailable, RowSource};

/// Reads the leaderboard from a file holding the endpoint's JSON payload.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl RowSource for FileSource {
    fn name(&self) -> &str {
        "file"
    }

    async fn fetch_rows(&self) -> Result<Vec<BenchmarkRow>, DataUnavailable> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|e| DataUnavailable::Io {
                path: self.path.display().to_string(),
                message: e.to_string(),
            })?;
        parse_rows(&bytes)
    }
}
