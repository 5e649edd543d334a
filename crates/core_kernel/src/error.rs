//! Core error types used across the system

use thiserror::Error;

/// Core error type for the kernel
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Parse error: {0}")]
    Parse(String),
}

impl CoreError {
    pub fn parse(message: impl Into<String>) -> Self {
        CoreError::Parse(message.into())
    }
}
