//! The positioned text fragment every later stage works on.

use serde::Serialize;

use crate::error::Result;
use crate::geometry::{BBox, Point};
use crate::mapping::CanvasTransform;

/// One OCR-detected text fragment with its pixel-space box.
///
/// Immutable once built; `center` is always the midpoint of `bbox`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Token {
    text: String,
    #[serde(rename = "box")]
    bbox: BBox,
    center: Point,
}

impl Token {
    /// Builds a token around an already validated box.
    pub fn new(text: impl Into<String>, bbox: BBox) -> Self {
        Self {
            text: text.into(),
            center: bbox.center(),
            bbox,
        }
    }

    /// Builds a token from raw corners, rejecting inverted boxes.
    pub fn from_rect(text: impl Into<String>, x0: f64, top: f64, x1: f64, bottom: f64) -> Result<Self> {
        Ok(Self::new(text, BBox::new(x0, top, x1, bottom)?))
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn bbox(&self) -> &BBox {
        &self.bbox
    }

    pub fn center(&self) -> Point {
        self.center
    }

    /// The same token with its box moved through `transform`.
    pub fn mapped(&self, transform: &CanvasTransform) -> Token {
        Token::new(self.text.clone(), transform.map_box(&self.bbox))
    }

    /// Lowercased, trimmed text used for query matching.
    pub(crate) fn match_key(&self) -> String {
        self.text.trim().to_lowercase()
    }
}
