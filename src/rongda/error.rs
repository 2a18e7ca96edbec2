//! Error taxonomy for the Rongda retrieval pipeline.

use thiserror::Error;

/// Failures that can occur while talking to the Rongda service.
///
/// Only `Authentication` crosses the orchestrator boundary as a hard failure;
/// `SearchFailure` and `Transport` are degraded to empty results there, after
/// being logged with enough detail to diagnose the remote side.
#[derive(Debug, Error)]
pub enum RongdaError {
    /// Credentials rejected or the login endpoint unreachable. Fatal for the
    /// whole retrieval.
    #[error("authentication failed: {reason}")]
    Authentication { reason: String },

    /// The comprehensive-search endpoint answered with a non-200 status.
    /// Carries the status and body so callers can tell a broken search
    /// subsystem apart from a legitimate empty result set.
    #[error("search request failed with status {status}: {body}")]
    SearchFailure { status: u16, body: String },

    /// Connection-level failure outside the login handshake.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl RongdaError {
    pub fn authentication(reason: impl Into<String>) -> Self {
        Self::Authentication {
            reason: reason.into(),
        }
    }
}
