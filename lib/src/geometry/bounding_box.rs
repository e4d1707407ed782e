//! Axis-aligned bounding box.

use super::Point;
use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box in scaled coordinates.
///
/// A box built from no points is undefined and contains nothing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: Point,
    pub max: Point,
    pub defined: bool,
}

impl BoundingBox {
    /// Create an empty (undefined) bounding box.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a bounding box from two corners.
    #[inline]
    pub fn from_corners(min: Point, max: Point) -> Self {
        Self {
            min,
            max,
            defined: true,
        }
    }

    /// Create a bounding box enclosing all points.
    pub fn from_points(points: &[Point]) -> Self {
        let mut bb = Self::new();
        for p in points {
            bb.merge_point(*p);
        }
        bb
    }

    /// Grow the box to include a point.
    #[inline]
    pub fn merge_point(&mut self, p: Point) {
        if self.defined {
            self.min.x = self.min.x.min(p.x);
            self.min.y = self.min.y.min(p.y);
            self.max.x = self.max.x.max(p.x);
            self.max.y = self.max.y.max(p.y);
        } else {
            self.min = p;
            self.max = p;
            self.defined = true;
        }
    }

    /// Grow the box to include another box.
    pub fn merge(&mut self, other: &BoundingBox) {
        if other.defined {
            self.merge_point(other.min);
            self.merge_point(other.max);
        }
    }

    /// Check if a point is inside the box (boundary included).
    #[inline]
    pub fn contains_point(&self, p: &Point) -> bool {
        self.defined
            && p.x >= self.min.x
            && p.x <= self.max.x
            && p.y >= self.min.y
            && p.y <= self.max.y
    }

    /// Check if this box fully contains another box.
    pub fn contains(&self, other: &BoundingBox) -> bool {
        other.defined && self.contains_point(&other.min) && self.contains_point(&other.max)
    }

    /// Check if two boxes overlap (touching counts).
    pub fn overlaps(&self, other: &BoundingBox) -> bool {
        self.defined
            && other.defined
            && self.min.x <= other.max.x
            && other.min.x <= self.max.x
            && self.min.y <= other.max.y
            && other.min.y <= self.max.y
    }

    /// Center of the box.
    pub fn center(&self) -> Point {
        Point::new(
            self.min.x + (self.max.x - self.min.x) / 2,
            self.min.y + (self.max.y - self.min.y) / 2,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_points() {
        let bb = BoundingBox::from_points(&[
            Point::new(5, -3),
            Point::new(-2, 8),
            Point::new(1, 1),
        ]);
        assert!(bb.defined);
        assert_eq!(bb.min, Point::new(-2, -3));
        assert_eq!(bb.max, Point::new(5, 8));
        assert_eq!(bb.center(), Point::new(1, 2));
    }

    #[test]
    fn test_empty_box_contains_nothing() {
        let bb = BoundingBox::from_points(&[]);
        assert!(!bb.defined);
        assert!(!bb.contains_point(&Point::zero()));
    }

    #[test]
    fn test_contains_and_overlaps() {
        let outer = BoundingBox::from_corners(Point::new(0, 0), Point::new(100, 100));
        let inner = BoundingBox::from_corners(Point::new(10, 10), Point::new(20, 20));
        let apart = BoundingBox::from_corners(Point::new(200, 200), Point::new(300, 300));
        assert!(outer.contains(&inner));
        assert!(!inner.contains(&outer));
        assert!(outer.overlaps(&inner));
        assert!(!outer.overlaps(&apart));
    }
}
