//! Image-pixel to canvas-space coordinate mapping.
//!
//! The transform is a per-axis scale plus translation; rotation and skew are
//! not supported.

use serde::{Deserialize, Serialize};

use crate::error::{InklineError, Result};
use crate::geometry::{BBox, Bounds, Point};

/// Describes how a rasterized board image sits inside the canvas.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoordinateMapping {
    pub image_width: f64,
    pub image_height: f64,
    pub target_bounds: Bounds,
    /// Scale used when rasterizing. Already reflected in the image size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_scale: Option<f64>,
}

impl CoordinateMapping {
    pub fn new(image_width: f64, image_height: f64, target_bounds: Bounds) -> Self {
        Self {
            image_width,
            image_height,
            target_bounds,
            export_scale: None,
        }
    }

    /// Validates the mapping into an infallible transform.
    pub fn transform(&self) -> Result<CanvasTransform> {
        let (w, h) = (self.image_width, self.image_height);
        let t = &self.target_bounds;
        let finite_target = [t.x, t.y, t.width, t.height].iter().all(|v| v.is_finite());
        // `is_normal` also rules out zero, infinity, NaN and subnormal sizes.
        if !(w.is_normal() && h.is_normal() && w > 0.0 && h > 0.0) || !finite_target {
            return Err(InklineError::InvalidMapping {
                width: w,
                height: h,
            });
        }
        Ok(CanvasTransform {
            image_width: w,
            image_height: h,
            target: *t,
        })
    }

    pub fn map_point(&self, p: Point) -> Result<Point> {
        Ok(self.transform()?.map_point(p))
    }

    pub fn map_box(&self, b: &BBox) -> Result<BBox> {
        Ok(self.transform()?.map_box(b))
    }
}

/// A validated mapping: image size positive and normal, target finite.
///
/// Applying it cannot fail. Results stay finite as long as the scaled
/// coordinates fit in `f64`, which holds for any pixel-sized input.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CanvasTransform {
    image_width: f64,
    image_height: f64,
    target: Bounds,
}

impl CanvasTransform {
    /// Leaves pixel coordinates unchanged.
    pub const IDENTITY: CanvasTransform = CanvasTransform {
        image_width: 1.0,
        image_height: 1.0,
        target: Bounds::new(0.0, 0.0, 1.0, 1.0),
    };

    pub fn map_point(&self, p: Point) -> Point {
        let nx = p.x / self.image_width;
        let ny = p.y / self.image_height;
        Point::new(
            self.target.x + nx * self.target.width,
            self.target.y + ny * self.target.height,
        )
    }

    /// Maps the min and max corners independently.
    ///
    /// A negative target size flips an axis; the corners are reordered so the
    /// result is still a well-formed box.
    pub fn map_box(&self, b: &BBox) -> BBox {
        let p0 = self.map_point(b.min_corner());
        let p1 = self.map_point(b.max_corner());
        BBox {
            x0: p0.x.min(p1.x),
            top: p0.y.min(p1.y),
            x1: p0.x.max(p1.x),
            bottom: p0.y.max(p1.y),
        }
    }
}

impl Default for CanvasTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Transform for an optional mapping; no mapping means pixel passthrough.
pub fn transform_for(mapping: Option<&CoordinateMapping>) -> Result<CanvasTransform> {
    mapping.map_or(Ok(CanvasTransform::IDENTITY), CoordinateMapping::transform)
}
