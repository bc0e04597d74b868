//! Configuration and source factory.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use livebench_core::RowSource;

use crate::file::FileSource;
use crate::http::{HttpSource, DEFAULT_ENDPOINT};

/// Top-level livebench configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LivebenchConfig {
    /// Leaderboard endpoint returning the JSON row array.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// Retries on transient fetch failures.
    #[serde(default)]
    pub max_retries: u32,
    /// Initial delay between retries in milliseconds.
    #[serde(default = "default_retry_delay")]
    pub retry_delay_ms: u64,
    /// Quiet period before a search keystroke is committed.
    #[serde(default = "default_debounce")]
    pub debounce_ms: u64,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}
fn default_timeout() -> u64 {
    10
}
fn default_retry_delay() -> u64 {
    500
}
fn default_debounce() -> u64 {
    200
}

impl Default for LivebenchConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_secs: default_timeout(),
            max_retries: 0,
            retry_delay_ms: default_retry_delay(),
            debounce_ms: default_debounce(),
        }
    }
}

impl LivebenchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    pub fn quiet_period(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

/// Where rows come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceSpec {
    Endpoint(String),
    File(PathBuf),
}

impl SourceSpec {
    /// Pick a source from command-line overrides, falling back to the
    /// configured endpoint. A file wins over a URL.
    pub fn resolve(url: Option<String>, file: Option<PathBuf>, config: &LivebenchConfig) -> Self {
        match (file, url) {
            (Some(path), _) => SourceSpec::File(path),
            (None, Some(url)) => SourceSpec::Endpoint(url),
            (None, None) => SourceSpec::Endpoint(config.endpoint.clone()),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are copied verbatim and never expanded again.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(len) = rest[start..].find('}') else {
            break;
        };
        result.push_str(&rest[..start]);
        let var_name = &rest[start + 2..start + len];
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + len + 1..];
    }
    result.push_str(rest);
    result
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order without a path:
/// 1. `livebench.toml` in the current directory
/// 2. `~/.config/livebench/config.toml`
///
/// `LIVEBENCH_ENDPOINT` overrides the endpoint.
pub fn load_config_from(path: Option<&Path>) -> Result<LivebenchConfig> {
    let config_path = match path {
        Some(p) if p.exists() => Some(p.to_path_buf()),
        Some(p) => anyhow::bail!("config file not found: {}", p.display()),
        None => {
            let local = PathBuf::from("livebench.toml");
            if local.exists() {
                Some(local)
            } else {
                config_dir()
                    .map(|dir| dir.join("config.toml"))
                    .filter(|global| global.exists())
            }
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = toml::from_str::<LivebenchConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!(path = %path.display(), "loaded config");
            config
        }
        None => LivebenchConfig::default(),
    };

    if let Ok(endpoint) = std::env::var("LIVEBENCH_ENDPOINT") {
        config.endpoint = endpoint;
    }
    config.endpoint = resolve_env_vars(&config.endpoint);

    Ok(config)
}

fn config_dir() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("livebench"))
}

/// Create a row source.
pub fn create_source(spec: &SourceSpec, config: &LivebenchConfig) -> Result<Arc<dyn RowSource>> {
    match spec {
        SourceSpec::Endpoint(url) => {
            let source = HttpSource::new(url, config.timeout())
                .context("failed to build HTTP client")?
                .with_retries(config.max_retries, config.retry_delay());
            Ok(Arc::new(source))
        }
        SourceSpec::File(path) => Ok(Arc::new(FileSource::new(path))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_LIVEBENCH_TEST_HOST", "bench.local");
        assert_eq!(
            resolve_env_vars("http://${_LIVEBENCH_TEST_HOST}:8000/leaderboard"),
            "http://bench.local:8000/leaderboard"
        );
        assert_eq!(resolve_env_vars("no vars"), "no vars");
        assert_eq!(resolve_env_vars("${unterminated"), "${unterminated");
        std::env::remove_var("_LIVEBENCH_TEST_HOST");
    }

    #[test]
    fn resolve_env_vars_does_not_expand_values() {
        std::env::set_var("_LIVEBENCH_TEST_SELF", "x${_LIVEBENCH_TEST_SELF}");
        assert_eq!(
            resolve_env_vars("http://${_LIVEBENCH_TEST_SELF}/leaderboard"),
            "http://x${_LIVEBENCH_TEST_SELF}/leaderboard"
        );
        std::env::remove_var("_LIVEBENCH_TEST_SELF");

        assert_eq!(resolve_env_vars("${_LIVEBENCH_TEST_UNSET}/a"), "/a");
    }

    #[test]
    fn default_config() {
        let config = LivebenchConfig::default();
        assert_eq!(config.endpoint, "http://localhost:8000/leaderboard");
        assert_eq!(config.debounce_ms, 200);
        assert_eq!(config.quiet_period(), Duration::from_millis(200));
        assert_eq!(config.max_retries, 0);
    }

    #[test]
    fn parse_partial_config() {
        let config: LivebenchConfig = toml::from_str(
            r#"
endpoint = "http://bench:8000/leaderboard"
max_retries = 5
"#,
        )
        .unwrap();
        assert_eq!(config.endpoint, "http://bench:8000/leaderboard");
        assert_eq!(config.max_retries, 5);
        assert_eq!(config.timeout_secs, 10);
    }

    #[test]
    fn explicit_path_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("livebench.toml");
        std::fs::write(&path, "debounce_ms = 50\ntimeout_secs = 3\n").unwrap();
        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.debounce_ms, 50);
        assert_eq!(config.timeout(), Duration::from_secs(3));
    }

    #[test]
    fn missing_explicit_path_is_an_error() {
        let err = load_config_from(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn invalid_toml_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "debounce_ms = \"soon\"").unwrap();
        let err = load_config_from(Some(&path)).unwrap_err();
        assert!(format!("{err:#}").contains("failed to parse config"));
    }

    #[test]
    fn source_resolution_prefers_file() {
        let config = LivebenchConfig::default();
        assert_eq!(
            SourceSpec::resolve(Some("http://x".into()), Some("rows.json".into()), &config),
            SourceSpec::File("rows.json".into())
        );
        assert_eq!(
            SourceSpec::resolve(Some("http://x".into()), None, &config),
            SourceSpec::Endpoint("http://x".into())
        );
        assert_eq!(
            SourceSpec::resolve(None, None, &config),
            SourceSpec::Endpoint(config.endpoint.clone())
        );
    }

    #[test]
    fn create_source_by_kind() {
        let config = LivebenchConfig::default();
        let http = create_source(&SourceSpec::Endpoint(config.endpoint.clone()), &config).unwrap();
        assert_eq!(http.name(), "http");
        let file = create_source(&SourceSpec::File("rows.json".into()), &config).unwrap();
        assert_eq!(file.name(), "file");
    }
}
