//! High-level board analysis API.
//!
//! Provides the main entry points of the pipeline:
//! - `analyze_tokens()` - analyze already normalized tokens
//! - `analyze_detections()` - normalize provider detections, then analyze
//! - `analyze_json()` - parse a provider payload, then analyze
//!
//! Every call is a pure function of its inputs.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::classify::{ClassifiedLine, classify_line};
use crate::error::Result;
use crate::geometry::BBox;
use crate::highlight::{BoardHighlight, locate_on_board};
use crate::layout::{LayoutParams, Line, Token, group_equations, group_reading_lines, lines_in_order};
use crate::mapping::{CanvasTransform, CoordinateMapping, transform_for};
use crate::ocr::{Detection, normalize_detections};

/// Options for board analysis.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalyzeOptions {
    /// Clustering tolerances and highlight padding.
    pub params: LayoutParams,

    /// Image to canvas mapping. None leaves pixel coordinates unchanged.
    pub mapping: Option<CoordinateMapping>,

    /// Phrase to locate on the board.
    pub highlight_query: Option<String>,
}

/// Provider payloads accepted by [`analyze_json`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum OcrInput {
    /// A bare detection array.
    Detections(Vec<Detection>),
    /// A Vision style response object.
    Annotated {
        #[serde(rename = "textAnnotations", default)]
        text_annotations: Vec<Detection>,
    },
}

impl OcrInput {
    pub fn into_detections(self) -> Vec<Detection> {
        match self {
            OcrInput::Detections(d) => d,
            OcrInput::Annotated { text_annotations } => text_annotations,
        }
    }
}

/// A classified equation in both coordinate spaces.
///
/// Only the canvas view is serialized, so output never carries pixel
/// coordinates when a mapping was supplied. Without a mapping both views
/// are identical.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BoardEquation {
    /// Pixel space; what the highlight locator searches.
    #[serde(skip)]
    pub classified: ClassifiedLine,
    #[serde(flatten)]
    pub canvas: ClassifiedLine,
}

impl BoardEquation {
    pub fn new(classified: ClassifiedLine, transform: &CanvasTransform) -> Self {
        Self {
            canvas: classified.mapped(transform),
            classified,
        }
    }

    /// Union box of the equation in canvas space.
    pub fn canvas_bounding_box(&self) -> &BBox {
        &self.canvas.bounding_box
    }
}

impl AsRef<Line> for BoardEquation {
    fn as_ref(&self) -> &Line {
        &self.classified.line
    }
}

/// Result of analyzing one board snapshot.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardAnalysis {
    pub lines_in_order: Vec<String>,
    pub equations: Vec<BoardEquation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight_region: Option<BoardHighlight>,
    #[serde(skip)]
    transform: CanvasTransform,
    #[serde(skip)]
    padding: f64,
}

impl BoardAnalysis {
    /// The newest written step: the last reading line.
    pub fn most_recent_step(&self) -> Option<&str> {
        self.lines_in_order.last().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.equations.is_empty()
    }

    /// Locate another phrase on the same board.
    pub fn highlight(&self, query: &str) -> Option<BoardHighlight> {
        locate_on_board(self.equations.as_slice(), query, &self.transform, self.padding)
    }

    /// Serialize to JSON, optionally pretty-printed.
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let out = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(out)
    }
}

/// Analyze normalized tokens.
///
/// An empty token list is not an error: the analysis is empty and carries no
/// highlight. An invalid mapping is reported before any work is done.
pub fn analyze_tokens(tokens: &[Token], options: &AnalyzeOptions) -> Result<BoardAnalysis> {
    options.params.validate()?;
    let transform = transform_for(options.mapping.as_ref())?;
    let params = &options.params;

    let reading = group_reading_lines(tokens, params.line_tolerance);
    let classified: Vec<ClassifiedLine> = group_equations(tokens, params.equation_tolerance)
        .into_iter()
        .map(classify_line)
        .collect();
    debug!(
        tokens = tokens.len(),
        lines = reading.len(),
        equations = classified.len(),
        "board analyzed"
    );

    let highlight_region = options
        .highlight_query
        .as_deref()
        .and_then(|q| locate_on_board(classified.as_slice(), q, &transform, params.highlight_padding));
    if options.highlight_query.is_some() && highlight_region.is_none() {
        debug!("highlight query matched no tokens");
    }

    let equations = classified
        .into_iter()
        .map(|classified| BoardEquation::new(classified, &transform))
        .collect();

    Ok(BoardAnalysis {
        lines_in_order: lines_in_order(&reading),
        equations,
        highlight_region,
        transform,
        padding: params.highlight_padding,
    })
}

/// Normalize provider detections and analyze them.
pub fn analyze_detections(detections: &[Detection], options: &AnalyzeOptions) -> Result<BoardAnalysis> {
    let tokens = normalize_detections(detections, options.params.skip_transcript);
    analyze_tokens(&tokens, options)
}

/// Parse a provider JSON payload and analyze it.
pub fn analyze_json(json: &str, options: &AnalyzeOptions) -> Result<BoardAnalysis> {
    let input: OcrInput = serde_json::from_str(json)?;
    analyze_detections(&input.into_detections(), options)
}
