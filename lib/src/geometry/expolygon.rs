//! Polygon with holes.

use super::{BoundingBox, Point, Polygon, Polygons};
use crate::{CoordF, Error, Result};
use serde::{Deserialize, Serialize};

/// A polygon with holes: a counter-clockwise contour plus clockwise holes.
///
/// Holes are expected to lie inside the contour and not to overlap each other.
/// Nothing enforces this; [`ExPolygon::validate`] checks it on demand.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExPolygon {
    pub contour: Polygon,
    pub holes: Polygons,
}

impl ExPolygon {
    /// Create an ExPolygon without holes.
    #[inline]
    pub fn new(contour: Polygon) -> Self {
        Self {
            contour,
            holes: Vec::new(),
        }
    }

    #[inline]
    pub fn with_holes(contour: Polygon, holes: Polygons) -> Self {
        Self { contour, holes }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.contour.is_empty()
    }

    /// Number of paths (contour plus holes).
    #[inline]
    pub fn num_paths(&self) -> usize {
        1 + self.holes.len()
    }

    /// Net area: contour area minus the hole areas.
    pub fn area(&self) -> CoordF {
        self.contour.area().abs() - self.holes.iter().map(|h| h.area().abs()).sum::<CoordF>()
    }

    /// Check if a point lies inside the contour and outside every hole.
    pub fn contains_point(&self, p: &Point) -> bool {
        self.contour.contains_point(p) && !self.holes.iter().any(|h| h.contains_point(p))
    }

    pub fn bounding_box(&self) -> BoundingBox {
        self.contour.bounding_box()
    }

    pub fn translate(&mut self, v: Point) {
        self.contour.translate(v);
        for hole in &mut self.holes {
            hole.translate(v);
        }
    }

    /// Check orientation and nesting of the holes.
    ///
    /// Verifies that the contour is counter-clockwise, every hole is
    /// clockwise and lies within the contour, and no hole vertex sits strictly
    /// inside another hole.
    pub fn validate(&self) -> Result<()> {
        if !self.contour.is_valid() {
            return Err(Error::Geometry("contour has fewer than 3 points".into()));
        }
        if !self.contour.is_counter_clockwise() {
            return Err(Error::Geometry("contour is not counter-clockwise".into()));
        }
        let bbox = self.contour.bounding_box();
        for (i, hole) in self.holes.iter().enumerate() {
            if !hole.is_valid() {
                return Err(Error::Geometry(format!("hole {} has fewer than 3 points", i)));
            }
            if !hole.is_clockwise() {
                return Err(Error::Geometry(format!("hole {} is not clockwise", i)));
            }
            let outside = hole.points().iter().any(|p| {
                !bbox.contains_point(p)
                    || (!self.contour.on_boundary(p, 0) && !self.contour.contains_point(p))
            });
            if outside {
                return Err(Error::Geometry(format!("hole {} leaves the contour", i)));
            }
            for (j, other) in self.holes.iter().enumerate() {
                if i == j {
                    continue;
                }
                let overlap = hole
                    .points()
                    .iter()
                    .any(|p| !other.on_boundary(p, 0) && other.contains_point(p));
                if overlap {
                    return Err(Error::Geometry(format!("hole {} overlaps hole {}", i, j)));
                }
            }
        }
        Ok(())
    }
}

impl From<Polygon> for ExPolygon {
    fn from(contour: Polygon) -> Self {
        Self::new(contour)
    }
}

/// Type alias for a collection of ExPolygons.
pub type ExPolygons = Vec<ExPolygon>;
