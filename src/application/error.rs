// Error taxonomy for fetching and loading dashboards
use thiserror::Error;

/// Failures reported by backend collaborators
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    /// The caller abandoned the request (e.g. navigated elsewhere)
    #[error("request cancelled")]
    Cancelled,
    #[error("not found: {0}")]
    NotFound(String),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Outcome of a failed load, as seen by callers of the load service
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LoadError {
    #[error("Dashboard not found")]
    NotFound,
    #[error("Dashboard load cancelled")]
    Cancelled,
    #[error("{0}")]
    Transport(String),
}

impl From<FetchError> for LoadError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::Cancelled => LoadError::Cancelled,
            FetchError::NotFound(_) => LoadError::NotFound,
            other => LoadError::Transport(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PanelEditError {
    #[error("no dashboard is loaded")]
    NoDashboard,
    #[error("panel {0} not found in current dashboard")]
    PanelNotFound(i64),
}
