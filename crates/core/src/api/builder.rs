//! Builder pattern for board analysis.
//!
//! # Example
//! ```ignore
//! use inkline_core::api::BoardAnalyzer;
//!
//! let analysis = BoardAnalyzer::new()
//!     .equation_tolerance(18.0)
//!     .canvas(1200.0, 800.0, Bounds::new(0.0, 0.0, 600.0, 400.0))
//!     .highlight("x = 4")
//!     .analyze_detections(&detections)?;
//! ```

use crate::error::Result;
use crate::geometry::Bounds;
use crate::layout::{LayoutParams, Token};
use crate::mapping::CoordinateMapping;
use crate::ocr::Detection;

use super::high_level::{AnalyzeOptions, BoardAnalysis, analyze_detections, analyze_json, analyze_tokens};

/// A fluent wrapper around [`AnalyzeOptions`].
#[derive(Debug, Clone, Default)]
pub struct BoardAnalyzer {
    options: AnalyzeOptions,
}

impl BoardAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces all layout parameters at once.
    pub fn params(mut self, params: LayoutParams) -> Self {
        self.options.params = params;
        self
    }

    pub fn equation_tolerance(mut self, tolerance: f64) -> Self {
        self.options.params.equation_tolerance = tolerance;
        self
    }

    pub fn line_tolerance(mut self, tolerance: f64) -> Self {
        self.options.params.line_tolerance = tolerance;
        self
    }

    pub fn padding(mut self, padding: f64) -> Self {
        self.options.params.highlight_padding = padding;
        self
    }

    /// Whether the first detection is the full-transcript entry.
    pub fn skip_transcript(mut self, skip: bool) -> Self {
        self.options.params.skip_transcript = skip;
        self
    }

    pub fn mapping(mut self, mapping: CoordinateMapping) -> Self {
        self.options.mapping = Some(mapping);
        self
    }

    /// Shorthand for a mapping from an image of the given size into `target`.
    pub fn canvas(self, image_width: f64, image_height: f64, target: Bounds) -> Self {
        self.mapping(CoordinateMapping::new(image_width, image_height, target))
    }

    pub fn highlight(mut self, query: &str) -> Self {
        self.options.highlight_query = Some(query.to_string());
        self
    }

    pub fn options(&self) -> &AnalyzeOptions {
        &self.options
    }

    pub fn analyze_tokens(&self, tokens: &[Token]) -> Result<BoardAnalysis> {
        analyze_tokens(tokens, &self.options)
    }

    pub fn analyze_detections(&self, detections: &[Detection]) -> Result<BoardAnalysis> {
        analyze_detections(detections, &self.options)
    }

    pub fn analyze_json(&self, json: &str) -> Result<BoardAnalysis> {
        analyze_json(json, &self.options)
    }
}
