use thiserror::Error;

/// Failure of a single data source. Caught at the resolver boundary and
/// converted into a fallback response; never surfaced to callers.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("upstream unavailable: {0}")]
    UpstreamUnavailable(String),
    #[error("content store unavailable: {0}")]
    StoreUnavailable(String),
}

/// No document with the requested id exists in the store or the fallback
/// set. The only error single-document resolution can return.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("{kind} {id} not found")]
pub struct NotFound {
    pub kind: &'static str,
    pub id: String,
}

impl NotFound {
    pub fn new(kind: &'static str, id: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
        }
    }
}
