//! inkline - Spatial reconstruction of handwritten math whiteboards.
//!
//! Turns per-token OCR output into reading-ordered lines, classified
//! equations, canvas-space boxes and phrase highlights.

pub mod api;
pub mod classify;
pub mod error;
pub mod geometry;
pub mod highlight;
pub mod layout;
pub mod mapping;
pub mod ocr;

pub use api::high_level;

pub use error::{InklineError, Result};
