use thiserror::Error;

/// Errors raised at the session boundary.
///
/// Disallowed-state calls are not errors; they come back as `Ignored` results.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("unknown category `{0}`")]
    InvalidCategory(String),
    #[error("item catalog is empty")]
    EmptyCatalog,
}
