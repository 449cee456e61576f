//! Line-art output of the turtle and its bounding box.

use crate::error::{Error, Result};
use glam::DVec2;
use serde::{Deserialize, Serialize};

/// An ordered run of points drawn as one continuous stroke.
pub type Polyline = Vec<DVec2>;

/// The line art produced by interpreting an L-System.
///
/// Every polyline holds at least two points. Ordering follows the order in which the
/// turtle drew them.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Drawing {
    polylines: Vec<Polyline>,
}

impl Drawing {
    /// Keeps the polylines with at least two points, in order.
    pub fn new(polylines: Vec<Polyline>) -> Self {
        Self {
            polylines: polylines
                .into_iter()
                .filter(|polyline| polyline.len() >= 2)
                .collect(),
        }
    }

    pub fn polylines(&self) -> &[Polyline] {
        &self.polylines
    }

    pub fn into_polylines(self) -> Vec<Polyline> {
        self.polylines
    }

    /// Number of polylines.
    pub fn len(&self) -> usize {
        self.polylines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polylines.is_empty()
    }

    /// Total number of vertices over all polylines.
    pub fn point_count(&self) -> usize {
        self.polylines.iter().map(Vec::len).sum()
    }

    pub fn bounds(&self) -> Result<Bounds> {
        Bounds::of(&self.polylines)
    }
}

/// Axis-aligned bounding box of a drawing.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: DVec2,
    pub max: DVec2,
}

impl Bounds {
    /// Computes the box enclosing every point of `polylines`.
    ///
    /// Fails with [`Error::Geometry`] when there is nothing to enclose.
    pub fn of(polylines: &[Polyline]) -> Result<Self> {
        let mut points = polylines.iter().flatten();
        let first = points
            .next()
            .ok_or_else(|| Error::Geometry("No drawable geometry produced.".into()))?;

        Ok(points.fold(
            Self {
                min: *first,
                max: *first,
            },
            |b, p| Self {
                min: b.min.min(*p),
                max: b.max.max(*p),
            },
        ))
    }

    /// Grows the box by `margin` on every side.
    pub fn expand(self, margin: f64) -> Self {
        Self {
            min: self.min - DVec2::splat(margin),
            max: self.max + DVec2::splat(margin),
        }
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn size(&self) -> DVec2 {
        self.max - self.min
    }
}
