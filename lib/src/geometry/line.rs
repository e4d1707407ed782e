//! Line segment type.

use super::{Point, PointF};
use crate::{Coord, CoordF};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A line segment defined by two endpoints.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Line {
    pub a: Point,
    pub b: Point,
}

impl Line {
    /// Create a new line segment from two points.
    #[inline]
    pub const fn new(a: Point, b: Point) -> Self {
        Self { a, b }
    }

    /// Direction vector (b - a).
    #[inline]
    pub fn direction(&self) -> Point {
        self.b - self.a
    }

    /// Direction vector as floating-point.
    #[inline]
    pub fn direction_f(&self) -> PointF {
        self.direction().to_f64()
    }

    #[inline]
    pub fn length_squared(&self) -> i128 {
        self.a.distance_squared(&self.b)
    }

    #[inline]
    pub fn length(&self) -> CoordF {
        self.a.distance(&self.b)
    }

    /// Check whether the segment has zero length.
    #[inline]
    pub fn is_point(&self) -> bool {
        self.a == self.b
    }

    /// Project a point onto this segment, clamping to the endpoints.
    pub fn project_point(&self, p: &Point) -> Point {
        let ab = self.direction();
        let len_sq = ab.dot(&ab);
        if len_sq == 0 {
            return self.a;
        }
        let t = (*p - self.a).dot(&ab) as CoordF / len_sq as CoordF;
        if t <= 0.0 {
            self.a
        } else if t >= 1.0 {
            self.b
        } else {
            Point::new(
                (self.a.x as CoordF + t * ab.x as CoordF).round() as Coord,
                (self.a.y as CoordF + t * ab.y as CoordF).round() as Coord,
            )
        }
    }

    /// Distance from a point to this segment.
    pub fn distance_to_point(&self, p: &Point) -> CoordF {
        p.distance(&self.project_point(p))
    }

    /// Check if a point lies on this segment (within tolerance).
    pub fn contains_point(&self, p: &Point, tolerance: Coord) -> bool {
        self.distance_to_point(p) <= tolerance as CoordF
    }
}

impl fmt::Debug for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Line({:?} -> {:?})", self.a, self.b)
    }
}

impl From<(Point, Point)> for Line {
    fn from((a, b): (Point, Point)) -> Self {
        Self::new(a, b)
    }
}

/// Type alias for a list of lines.
pub type Lines = Vec<Line>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_length() {
        let line = Line::new(Point::new(0, 0), Point::new(3, 4));
        assert_eq!(line.length_squared(), 25);
        assert!((line.length() - 5.0).abs() < 1e-12);
        assert!(!line.is_point());
    }

    #[test]
    fn test_project_point_clamps() {
        let line = Line::new(Point::new(0, 0), Point::new(100, 0));
        assert_eq!(line.project_point(&Point::new(50, 30)), Point::new(50, 0));
        assert_eq!(line.project_point(&Point::new(-20, 5)), Point::new(0, 0));
        assert_eq!(line.project_point(&Point::new(150, 5)), Point::new(100, 0));
    }

    #[test]
    fn test_contains_point() {
        let line = Line::new(Point::new(0, 0), Point::new(100, 100));
        assert!(line.contains_point(&Point::new(50, 50), 0));
        assert!(line.contains_point(&Point::new(50, 51), 2));
        assert!(!line.contains_point(&Point::new(50, 60), 2));
    }
}
