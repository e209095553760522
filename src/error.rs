// src/error.rs
// Error kinds surfaced across the library boundary. Per-record input
// errors (a malformed STS line, a degenerate primer) are recovered from
// locally and only logged -- they never become an `EngineError`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// An option was out of range, or word size W exceeds the shortest
    /// primer in the loaded STS library. Fatal; surfaced before any
    /// scanning begins.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The STS library (or a required input) could not be parsed into any
    /// usable records.
    #[error("input format error: {0}")]
    InputFormat(String),

    /// Propagated I/O failure, most commonly from the output sink.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An invariant the engine relies on did not hold. Indicates a bug.
    #[error("internal invariant violation: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
