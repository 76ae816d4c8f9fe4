//! Structured error types for gridview.
//!
//! Draw and fetch failures surface to the caller of the triggering draw;
//! everything else degrades locally and never throws.

/// All errors that can occur while driving a grid view.
///
/// `Clone` because a single coalesced draw pass may have many awaiting
/// callers, each of which receives the pass result.
#[derive(Debug, Clone, thiserror::Error)]
pub enum GridError {
    /// A draw was requested before a data listener was configured.
    #[error("no data listener configured")]
    MissingListener,

    /// The data listener rejected a viewport request.
    #[error("data fetch: {0}")]
    Fetch(String),

    /// Catch-all for listener-supplied errors.
    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GridError>;

impl From<String> for GridError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for GridError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}
