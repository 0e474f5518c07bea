//! Error types shared across the tagteam pipeline

use thiserror::Error;

/// Errors raised by pipeline components.
///
/// Input errors (`EmptyInput`, `ArcOutOfRange`, `NoRoot`, `LengthMismatch`)
/// are the caller's fault and fail fast. `UnresolvedReference` and
/// `MissingNode` indicate a malformed intermediate; components log these and
/// skip the offending item rather than propagate. `ValidationFailed` is only
/// produced by the strict pipeline mode.
#[derive(Error, Debug)]
pub enum GraphError {
    #[error("input text is empty")]
    EmptyInput,

    #[error("dependency arc references token {id} outside [1, {len}]")]
    ArcOutOfRange { id: usize, len: usize },

    #[error("dependency arc list has no root")]
    NoRoot,

    #[error("tokens and tags have different lengths ({tokens} vs {tags})")]
    LengthMismatch { tokens: usize, tags: usize },

    #[error("unresolved reference to '{iri}'")]
    UnresolvedReference { iri: String },

    #[error("graph node '{id}' not found")]
    MissingNode { id: String },

    #[error("graph has {violations} validation violation(s)")]
    ValidationFailed { violations: usize },
}

/// Result type for tagteam operations
pub type GraphResult<T> = Result<T, GraphError>;
