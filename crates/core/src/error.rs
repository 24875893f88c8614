//! Error types for the inkline board analysis library.

use thiserror::Error;

/// Primary error type for board analysis operations.
#[derive(Error, Debug)]
pub enum InklineError {
    #[error("invalid coordinate mapping: image size {width}x{height} must be positive and normal")]
    InvalidMapping { width: f64, height: f64 },

    #[error("invalid bounding box ({x0}, {top}, {x1}, {bottom}): min corner exceeds max corner")]
    InvalidBox {
        x0: f64,
        top: f64,
        x1: f64,
        bottom: f64,
    },

    #[error("invalid layout parameter {name}: {value}")]
    InvalidParam { name: &'static str, value: f64 },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result type alias for InklineError.
pub type Result<T> = std::result::Result<T, InklineError>;
