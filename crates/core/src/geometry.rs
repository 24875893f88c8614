//! Geometric primitives shared by the pipeline.
//!
//! All boxes use a top-left origin (image convention): `top` is the smaller
//! y value and `bottom` the larger one.

use serde::{Deserialize, Serialize};

use crate::error::{InklineError, Result};

/// A 2D point.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned bounding box with `x0 <= x1` and `top <= bottom`.
///
/// Fields are only writable inside the crate; outside callers go through
/// [`BBox::new`] or deserialization, both of which reject inverted corners.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBBox")]
pub struct BBox {
    #[serde(rename = "xMin")]
    pub(crate) x0: f64,
    #[serde(rename = "yMin")]
    pub(crate) top: f64,
    #[serde(rename = "xMax")]
    pub(crate) x1: f64,
    #[serde(rename = "yMax")]
    pub(crate) bottom: f64,
}

/// Unchecked wire form of [`BBox`].
#[derive(Deserialize)]
struct RawBBox {
    #[serde(rename = "xMin")]
    x0: f64,
    #[serde(rename = "yMin")]
    top: f64,
    #[serde(rename = "xMax")]
    x1: f64,
    #[serde(rename = "yMax")]
    bottom: f64,
}

impl TryFrom<RawBBox> for BBox {
    type Error = InklineError;

    fn try_from(raw: RawBBox) -> Result<Self> {
        BBox::new(raw.x0, raw.top, raw.x1, raw.bottom)
    }
}

impl BBox {
    /// Creates a box, rejecting inverted corners.
    pub fn new(x0: f64, top: f64, x1: f64, bottom: f64) -> Result<Self> {
        // NaN fails both comparisons, so it is rejected here as well.
        if !(x0 <= x1 && top <= bottom) {
            return Err(InklineError::InvalidBox {
                x0,
                top,
                x1,
                bottom,
            });
        }
        Ok(Self {
            x0,
            top,
            x1,
            bottom,
        })
    }

    pub fn x0(&self) -> f64 {
        self.x0
    }

    pub fn top(&self) -> f64 {
        self.top
    }

    pub fn x1(&self) -> f64 {
        self.x1
    }

    pub fn bottom(&self) -> f64 {
        self.bottom
    }

    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    pub fn center(&self) -> Point {
        Point::new((self.x0 + self.x1) / 2.0, (self.top + self.bottom) / 2.0)
    }

    pub fn min_corner(&self) -> Point {
        Point::new(self.x0, self.top)
    }

    pub fn max_corner(&self) -> Point {
        Point::new(self.x1, self.bottom)
    }

    /// Smallest box containing both boxes.
    pub fn union(&self, other: &BBox) -> BBox {
        BBox {
            x0: self.x0.min(other.x0),
            top: self.top.min(other.top),
            x1: self.x1.max(other.x1),
            bottom: self.bottom.max(other.bottom),
        }
    }

    /// Grows the box by `amount` on every side.
    ///
    /// A negative amount shrinks it; an axis shrunk past its center collapses
    /// onto the center.
    pub fn expand(&self, amount: f64) -> BBox {
        let c = self.center();
        let (x0, x1) = (self.x0 - amount, self.x1 + amount);
        let (top, bottom) = (self.top - amount, self.bottom + amount);
        let (x0, x1) = if x0 <= x1 { (x0, x1) } else { (c.x, c.x) };
        let (top, bottom) = if top <= bottom { (top, bottom) } else { (c.y, c.y) };
        BBox {
            x0,
            top,
            x1,
            bottom,
        }
    }
}

/// Compute the union bounding box of a sequence of boxes.
///
/// Returns `None` for an empty sequence.
pub fn union_all<'a, I>(boxes: I) -> Option<BBox>
where
    I: IntoIterator<Item = &'a BBox>,
{
    let mut iter = boxes.into_iter();
    let first = *iter.next()?;
    Some(iter.fold(first, |acc, b| acc.union(b)))
}

/// A rectangle expressed as origin plus size, as canvas editors report bounds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

impl From<BBox> for Bounds {
    fn from(b: BBox) -> Self {
        Bounds::new(b.x0, b.top, b.width(), b.height())
    }
}
