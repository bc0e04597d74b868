//! livebench-source — leaderboard row sources.
//!
//! Implements the `RowSource` trait for the HTTP leaderboard endpoint and for
//! local JSON snapshot files, and loads the livebench configuration.

pub mod config;
pub mod file;
pub mod http;
pub mod mock;

pub use config::{create_source, load_config_from, LivebenchConfig, SourceSpec};
pub use file::FileSource;
pub use http::HttpSource;
