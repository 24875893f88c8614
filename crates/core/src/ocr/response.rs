//! The envelope handed to downstream consumers alongside the raw detections.
//!
//! It carries the flat transcript, per-word annotations with a confidence,
//! and a tagged element list the advisor prompt is built from.

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use super::detection::{BoundingPoly, Detection};
use crate::classify::{TokenKind, classify_token};
use crate::geometry::Bounds;
use crate::layout::Token;

/// Confidence reported when the provider gives none.
pub const DEFAULT_CONFIDENCE: f64 = 0.9;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordAnnotation {
    pub text: String,
    pub bounding_box: BoundingPoly,
    pub confidence: f64,
}

impl WordAnnotation {
    pub fn to_detection(&self) -> Detection {
        Detection {
            text: self.text.clone(),
            bounding_polygon: self.bounding_box.clone(),
            confidence: Some(self.confidence),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpatialElement {
    pub text: String,
    #[serde(rename = "type")]
    pub kind: TokenKind,
    pub position: Bounds,
    pub confidence: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpatialAnalysis {
    pub elements: Vec<SpatialElement>,
    pub layout: String,
    pub structure: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OcrResponse {
    pub full_text: String,
    pub word_annotations: Vec<WordAnnotation>,
    pub spatial_analysis: SpatialAnalysis,
}

impl OcrResponse {
    /// Builds the envelope from provider detections.
    ///
    /// With `has_transcript` the first detection is the full transcript and
    /// the rest are words. Otherwise every detection is a word and the
    /// transcript is their texts joined by spaces.
    pub fn from_detections(detections: &[Detection], has_transcript: bool) -> Self {
        if detections.is_empty() {
            return Self::empty();
        }
        let (full_text, words) = match detections.split_first() {
            Some((transcript, words)) if has_transcript => (transcript.text.clone(), words),
            _ => (detections.iter().map(|d| d.text.as_str()).join(" "), detections),
        };

        let word_annotations = words
            .iter()
            .map(|d| WordAnnotation {
                text: d.text.clone(),
                bounding_box: d.bounding_polygon.clone(),
                confidence: d.confidence.unwrap_or(DEFAULT_CONFIDENCE),
            })
            .collect();

        let elements = words
            .iter()
            .map(|d| SpatialElement {
                text: d.text.clone(),
                kind: classify_token(&d.text),
                position: Bounds::from(d.bbox()),
                confidence: d.confidence.unwrap_or(DEFAULT_CONFIDENCE),
            })
            .collect();

        Self {
            full_text,
            word_annotations,
            spatial_analysis: SpatialAnalysis {
                elements,
                layout: "detected".to_string(),
                structure: "mathematical".to_string(),
            },
        }
    }

    pub fn empty() -> Self {
        Self {
            full_text: String::new(),
            word_annotations: Vec::new(),
            spatial_analysis: SpatialAnalysis {
                elements: Vec::new(),
                layout: "empty".to_string(),
                structure: "none".to_string(),
            },
        }
    }

    pub fn is_empty(&self) -> bool {
        self.word_annotations.is_empty()
    }

    /// Tokens for the word annotations.
    pub fn tokens(&self) -> Vec<Token> {
        self.word_annotations
            .iter()
            .map(|w| w.to_detection().to_token())
            .collect()
    }
}
