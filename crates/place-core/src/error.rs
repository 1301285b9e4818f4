use thiserror::Error;

use crate::session::XrMode;

/// Everything that can go wrong around placement. None of these are fatal:
/// callers turn them into a status line or a fallback and keep running.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PlacementError {
    #[error("{0} is not supported on this device")]
    Unsupported(XrMode),
    #[error("session request rejected: {0}")]
    SessionRejected(String),
    #[error("could not acquire {what}: {reason}")]
    ResourceAcquisition { what: &'static str, reason: String },
    #[error("mesh load failed: {0}")]
    MeshLoad(String),
    #[error("invalid placement config: {0}")]
    InvalidConfig(String),
}
