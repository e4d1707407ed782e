//! Polygon type for closed contours.
//!
//! A polygon stores its vertices without repeating the first point. The sign of
//! the area carries the orientation: positive is counter-clockwise (a contour),
//! negative is clockwise (a hole).

use super::{BoundingBox, Line, Point};
use crate::{Coord, CoordF};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Deref, DerefMut, Index};

/// A closed polygon defined by a sequence of points.
#[derive(Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Polygon {
    points: Vec<Point>,
}

impl Polygon {
    /// Create a new empty polygon.
    #[inline]
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    /// Create a polygon from a vector of points.
    #[inline]
    pub fn from_points(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Counter-clockwise axis-aligned rectangle from two corners.
    pub fn rectangle(min: Point, max: Point) -> Self {
        Self::from_points(vec![
            min,
            Point::new(max.x, min.y),
            max,
            Point::new(min.x, max.y),
        ])
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

    /// A polygon with fewer than three points is degenerate.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.points.len() >= 3
    }

    /// First point, if any.
    #[inline]
    pub fn first_point(&self) -> Option<Point> {
        self.points.first().copied()
    }

    /// Twice the signed area, exact.
    #[inline]
    pub fn area2(&self) -> i128 {
        signed_area2(&self.points)
    }

    /// Signed area in scaled units squared. Positive for counter-clockwise.
    #[inline]
    pub fn area(&self) -> CoordF {
        self.area2() as CoordF * 0.5
    }

    #[inline]
    pub fn is_counter_clockwise(&self) -> bool {
        self.area2() > 0
    }

    #[inline]
    pub fn is_clockwise(&self) -> bool {
        self.area2() < 0
    }

    pub fn reverse(&mut self) {
        self.points.reverse();
    }

    /// Orient counter-clockwise. Returns true if the polygon was reversed.
    pub fn make_counter_clockwise(&mut self) -> bool {
        if self.is_clockwise() {
            self.reverse();
            true
        } else {
            false
        }
    }

    /// Orient clockwise. Returns true if the polygon was reversed.
    pub fn make_clockwise(&mut self) -> bool {
        if self.is_counter_clockwise() {
            self.reverse();
            true
        } else {
            false
        }
    }

    /// Iterate over all edges including the closing one.
    pub fn edges(&self) -> impl Iterator<Item = Line> + '_ {
        let n = self.points.len();
        (0..n).map(move |i| Line::new(self.points[i], self.points[(i + 1) % n]))
    }

    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_points(&self.points)
    }

    /// Check whether a point lies on the polygon boundary.
    #[inline]
    pub fn on_boundary(&self, p: &Point, tolerance: Coord) -> bool {
        point_on_path(&self.points, p, tolerance)
    }

    /// Even-odd point-in-polygon test. Points exactly on the boundary give an
    /// unspecified answer; use [`Polygon::on_boundary`] to rule them out.
    #[inline]
    pub fn contains_point(&self, p: &Point) -> bool {
        point_in_path(&self.points, p)
    }

    pub fn translate(&mut self, v: Point) {
        for p in &mut self.points {
            *p += v;
        }
    }
}

impl fmt::Debug for Polygon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Polygon({:?})", self.points)
    }
}

impl Deref for Polygon {
    type Target = [Point];

    fn deref(&self) -> &Self::Target {
        &self.points
    }
}

impl DerefMut for Polygon {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.points
    }
}

impl Index<usize> for Polygon {
    type Output = Point;

    fn index(&self, index: usize) -> &Self::Output {
        &self.points[index]
    }
}

impl From<Vec<Point>> for Polygon {
    fn from(points: Vec<Point>) -> Self {
        Self::from_points(points)
    }
}

impl<'a> IntoIterator for &'a Polygon {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

/// Type alias for a collection of polygons.
pub type Polygons = Vec<Polygon>;

/// Sum of signed areas.
pub fn total_area(polygons: &[Polygon]) -> CoordF {
    polygons.iter().map(|p| p.area()).sum()
}

/// Twice the signed area of a closed path, exact.
pub fn signed_area2(points: &[Point]) -> i128 {
    let n = points.len();
    if n < 3 {
        return 0;
    }
    let mut sum: i128 = 0;
    let mut prev = points[n - 1];
    for &p in points {
        sum += prev.cross(&p);
        prev = p;
    }
    sum
}

/// Even-odd point-in-path test for a closed path.
pub fn point_in_path(points: &[Point], p: &Point) -> bool {
    let n = points.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let a = points[i];
        let b = points[j];
        if (a.y > p.y) != (b.y > p.y) {
            // x coordinate of the edge at height p.y, compared without division.
            let lhs = (p.x - a.x) as i128 * (b.y - a.y) as i128;
            let rhs = (b.x - a.x) as i128 * (p.y - a.y) as i128;
            if (b.y > a.y && lhs < rhs) || (b.y < a.y && lhs > rhs) {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Check whether a point lies on any edge of a closed path.
pub fn point_on_path(points: &[Point], p: &Point, tolerance: Coord) -> bool {
    let n = points.len();
    (0..n).any(|i| Line::new(points[i], points[(i + 1) % n]).contains_point(p, tolerance))
}
