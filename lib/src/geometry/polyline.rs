//! Polyline type for open paths.
//!
//! Clipping splits polylines into fragments; see
//! [`recombine_polylines`](crate::clipper::recombine_polylines) for stitching
//! them back together.

use super::{BoundingBox, Line, Point, Polygon};
use crate::CoordF;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Deref, DerefMut, Index, IndexMut};

/// An open polyline defined by a sequence of points.
///
/// Unlike a Polygon, a Polyline is not implicitly closed - it's a path from
/// the first point to the last point.
#[derive(Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<Point>,
}

impl Polyline {
    /// Create a new empty polyline.
    #[inline]
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    /// Create a polyline from a vector of points.
    #[inline]
    pub fn from_points(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Open a polygon at its first point. The first point is repeated at the
    /// end so the polyline traces the whole boundary.
    #[inline]
    pub fn from_polygon(polygon: &Polygon) -> Self {
        let mut points = polygon.points().to_vec();
        if let Some(&first) = points.first() {
            points.push(first);
        }
        Self { points }
    }

    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    #[inline]
    pub fn points_mut(&mut self) -> &mut Vec<Point> {
        &mut self.points
    }

    #[inline]
    pub fn into_points(self) -> Vec<Point> {
        self.points
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// A polyline needs at least two points to describe a segment.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.points.len() >= 2
    }

    #[inline]
    pub fn push(&mut self, point: Point) {
        self.points.push(point);
    }

    #[inline]
    pub fn first(&self) -> Option<&Point> {
        self.points.first()
    }

    #[inline]
    pub fn last(&self) -> Option<&Point> {
        self.points.last()
    }

    /// Get the line segment from point[i] to point[i+1].
    #[inline]
    pub fn edge(&self, index: usize) -> Line {
        Line::new(self.points[index], self.points[index + 1])
    }

    /// Iterate over all segments of the polyline.
    pub fn edges(&self) -> impl Iterator<Item = Line> + '_ {
        self.points.windows(2).map(|w| Line::new(w[0], w[1]))
    }

    /// Total length of the polyline.
    pub fn length(&self) -> CoordF {
        self.edges().map(|e| e.length()).sum()
    }

    /// Check if this polyline is closed (first point equals last point).
    #[inline]
    pub fn is_closed(&self) -> bool {
        self.points.len() >= 2 && self.points.first() == self.points.last()
    }

    pub fn reverse(&mut self) {
        self.points.reverse();
    }

    /// Append points, skipping the first one when it repeats our last point.
    pub fn append(&mut self, other: &[Point]) {
        match (self.points.last(), other.first()) {
            (Some(a), Some(b)) if a == b => self.points.extend_from_slice(&other[1..]),
            _ => self.points.extend_from_slice(other),
        }
    }

    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_points(&self.points)
    }
}

impl fmt::Debug for Polyline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Polyline({:?})", self.points)
    }
}

impl Deref for Polyline {
    type Target = [Point];

    fn deref(&self) -> &Self::Target {
        &self.points
    }
}

impl DerefMut for Polyline {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.points
    }
}

impl Index<usize> for Polyline {
    type Output = Point;

    fn index(&self, index: usize) -> &Self::Output {
        &self.points[index]
    }
}

impl IndexMut<usize> for Polyline {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.points[index]
    }
}

impl From<Vec<Point>> for Polyline {
    fn from(points: Vec<Point>) -> Self {
        Self::from_points(points)
    }
}

impl IntoIterator for Polyline {
    type Item = Point;
    type IntoIter = std::vec::IntoIter<Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.into_iter()
    }
}

impl<'a> IntoIterator for &'a Polyline {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

/// Type alias for a collection of polylines.
pub type Polylines = Vec<Polyline>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polyline_length() {
        let pl = Polyline::from_points(vec![
            Point::new(0, 0),
            Point::new(3, 4),
            Point::new(3, 10),
        ]);
        assert!((pl.length() - 11.0).abs() < 1e-9);
        assert_eq!(pl.edges().count(), 2);
        assert!(!pl.is_closed());
    }

    #[test]
    fn test_from_polygon_repeats_first_point() {
        let poly = Polygon::rectangle(Point::new(0, 0), Point::new(10, 10));
        let pl = Polyline::from_polygon(&poly);
        assert_eq!(pl.len(), 5);
        assert!(pl.is_closed());
    }

    #[test]
    fn test_append_skips_shared_point() {
        let mut a = Polyline::from_points(vec![Point::new(0, 0), Point::new(10, 0)]);
        a.append(&[Point::new(10, 0), Point::new(20, 0)]);
        assert_eq!(a.len(), 3);
        a.append(&[Point::new(30, 0)]);
        assert_eq!(a.len(), 4);
    }

    #[test]
    fn test_validity() {
        assert!(!Polyline::from_points(vec![Point::new(1, 1)]).is_valid());
        assert!(Polyline::from_points(vec![Point::new(1, 1), Point::new(2, 2)]).is_valid());
    }
}
