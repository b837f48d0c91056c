//! Error types for the wayfinder library
//!
//! The flow parser is deliberately permissive and never fails (unrecognized
//! lines are dropped), so there is no parse-error variant here. Errors only
//! arise at the edges: loading a detail catalog and bootstrapping logging.

use thiserror::Error;

/// Library error type
#[derive(Error, Debug)]
pub enum WayfinderError {
    #[error("catalog error: {source}")]
    Catalog {
        #[from]
        source: serde_json::Error,
    },

    #[error("logging error: {message}")]
    Logging { message: String },
}

impl WayfinderError {
    /// Create a new logging-bootstrap error
    pub fn logging(message: impl Into<String>) -> Self {
        Self::Logging {
            message: message.into(),
        }
    }
}
