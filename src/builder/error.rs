//! Build errors for engine and handler builders.

use thiserror::Error;

/// Errors that can occur when building engines and handlers.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("max_history must be greater than zero")]
    InvalidMaxHistory,

    #[error("Handler change not specified. Call .change(name)")]
    MissingChange,

    #[error("Handler callback not specified. Call .callback(cb) or .action(f)")]
    MissingCallback,
}
