//! OCR provider data: raw detections and the analysis envelope.

pub mod detection;
pub mod response;

pub use detection::{BoundingPoly, Detection, Vertex, normalize_detections};
pub use response::{OcrResponse, SpatialAnalysis, SpatialElement, WordAnnotation};
