//! Row source error types.
//!
//! The only failure the leaderboard knows about is that its data could not be
//! obtained. Consumers never see it as an exception: [`crate::traits::load_snapshot`]
//! degrades it into an empty snapshot.

use thiserror::Error;

/// The leaderboard data could not be fetched or understood.
#[derive(Debug, Error)]
pub enum DataUnavailable {
    /// The request did not complete in time.
    #[error("request timed out after {0}ms")]
    Timeout(u64),

    /// The endpoint could not be reached.
    #[error("network error: {0}")]
    Network(String),

    /// The endpoint answered with a non-success status.
    #[error("endpoint returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// The payload was not a JSON array of row objects.
    #[error("malformed leaderboard payload: {0}")]
    Malformed(String),

    /// A local snapshot file could not be read.
    #[error("failed to read {path}: {message}")]
    Io { path: String, message: String },
}

impl DataUnavailable {
    /// Returns `true` if retrying the same request could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            DataUnavailable::Timeout(_) | DataUnavailable::Network(_) => true,
            DataUnavailable::Status { status, .. } => *status == 429 || *status >= 500,
            DataUnavailable::Malformed(_) | DataUnavailable::Io { .. } => false,
        }
    }
}
