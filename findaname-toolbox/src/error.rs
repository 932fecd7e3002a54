//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

/// Toolbox error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum ToolboxError {
    /// Validation error
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Network error
    #[error("Network error: {0}")]
    NetworkError(String),
}

/// Toolbox Result type alias
pub type ToolboxResult<T> = std::result::Result<T, ToolboxError>;
