//! High-level API module for whiteboard analysis.
//!
//! # Example
//!
//! ```ignore
//! use inkline_core::api::{AnalyzeOptions, analyze_json};
//!
//! let json = std::fs::read_to_string("detections.json")?;
//! let analysis = analyze_json(&json, &AnalyzeOptions::default())?;
//! println!("{:?}", analysis.most_recent_step());
//! ```

pub mod builder;
pub mod high_level;

pub use builder::BoardAnalyzer;
pub use high_level::{
    AnalyzeOptions, BoardAnalysis, BoardEquation, OcrInput, analyze_detections, analyze_json,
    analyze_tokens,
};
