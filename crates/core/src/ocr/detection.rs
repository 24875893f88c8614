//! Raw OCR detections and their conversion into tokens.
//!
//! The wire shape follows the Vision `textAnnotations` payload: a text
//! fragment plus a bounding polygon of (usually four) vertices whose
//! coordinates may be missing for degenerate detections.

use serde::{Deserialize, Serialize};

use crate::geometry::BBox;
use crate::layout::Token;

/// A polygon vertex. Missing coordinates are treated as 0.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
}

impl Vertex {
    pub const fn new(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundingPoly {
    #[serde(default)]
    pub vertices: Vec<Vertex>,
}

/// One OCR detection as delivered by the provider.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Detection {
    #[serde(alias = "description")]
    pub text: String,
    #[serde(alias = "boundingPoly", default)]
    pub bounding_polygon: BoundingPoly,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl Detection {
    pub fn new(text: impl Into<String>, vertices: Vec<Vertex>) -> Self {
        Self {
            text: text.into(),
            bounding_polygon: BoundingPoly { vertices },
            confidence: None,
        }
    }

    /// Axis-aligned box around the polygon.
    ///
    /// A polygon without vertices yields the zero box at the origin.
    pub fn bbox(&self) -> BBox {
        let vertices = &self.bounding_polygon.vertices;
        if vertices.is_empty() {
            return BBox::default();
        }
        let mut x0 = f64::INFINITY;
        let mut top = f64::INFINITY;
        let mut x1 = f64::NEG_INFINITY;
        let mut bottom = f64::NEG_INFINITY;
        for v in vertices {
            let x = v.x.unwrap_or(0.0);
            let y = v.y.unwrap_or(0.0);
            x0 = x0.min(x);
            top = top.min(y);
            x1 = x1.max(x);
            bottom = bottom.max(y);
        }
        BBox {
            x0,
            top,
            x1,
            bottom,
        }
    }

    pub fn to_token(&self) -> Token {
        Token::new(self.text.clone(), self.bbox())
    }
}

/// Convert detections into tokens, one per spatial detection.
///
/// When `skip_transcript` is set the first detection is the provider's
/// full-transcript entry and carries no spatial meaning, so it is dropped.
pub fn normalize_detections(detections: &[Detection], skip_transcript: bool) -> Vec<Token> {
    let spatial = if skip_transcript {
        detections.get(1..).unwrap_or(&[])
    } else {
        detections
    };
    spatial.iter().map(Detection::to_token).collect()
}
