pub mod interactive;
pub mod orgs;
pub mod show;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Args;

use livebench_core::RowSource;
use livebench_source::config::load_config_from;
use livebench_source::{create_source, LivebenchConfig, SourceSpec};

/// Where to read the leaderboard from.
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Leaderboard endpoint URL (overrides the configured endpoint)
    #[arg(long)]
    pub source: Option<String>,

    /// Read rows from a JSON file instead of the endpoint
    #[arg(long, conflicts_with = "source")]
    pub file: Option<PathBuf>,

    /// Config file path
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl SourceArgs {
    /// Load the config and build the selected row source.
    pub fn open(self) -> Result<(LivebenchConfig, Arc<dyn RowSource>)> {
        let config = load_config_from(self.config.as_deref())?;
        let spec = SourceSpec::resolve(self.source, self.file, &config);
        tracing::debug!(?spec, "using row source");
        let source = create_source(&spec, &config)?;
        Ok((config, source))
    }
}

/// Validate a score threshold from user input.
pub fn check_threshold(value: f64) -> Result<f64> {
    anyhow::ensure!(
        value.is_finite() && value >= 0.0,
        "minimum global average must be a non-negative number, got {value}"
    );
    Ok(value)
}
