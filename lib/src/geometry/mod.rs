//! Geometry primitives for the clipping layer.
//!
//! - [`Point`] / [`PointF`] - scaled integer point and its floating-point companion
//! - [`Line`] - segment between two points
//! - [`Polygon`] - closed path, orientation carried by the sign of its area
//! - [`Polyline`] - open path
//! - [`ExPolygon`] - counter-clockwise contour plus clockwise holes
//! - [`Surface`] - ExPolygon tagged with a [`SurfaceType`]
//! - [`BoundingBox`] - axis-aligned box
//!
//! ## Coordinate System
//!
//! Coordinates are integers scaled by `SCALING_FACTOR` (1,000,000), so 1 unit
//! = 1 nanometer. Use `scale()` / `unscale()` to convert from and to mm.

mod bounding_box;
mod expolygon;
mod line;
mod point;
mod polygon;
mod polyline;
pub mod shortest_path;
mod surface;

pub use bounding_box::BoundingBox;
pub use expolygon::{ExPolygon, ExPolygons};
pub use line::{Line, Lines};
pub use point::{Point, PointF, Points};
pub use polygon::{point_in_path, point_on_path, signed_area2, total_area, Polygon, Polygons};
pub use polyline::{Polyline, Polylines};
pub use surface::{surfaces_from_expolygons, to_expolygons, Surface, SurfaceType, Surfaces};

/// Total net area of a set of ExPolygons.
pub fn expolygons_area(expolygons: &[ExPolygon]) -> crate::CoordF {
    expolygons.iter().map(|e| e.area()).sum()
}

/// Number of holes across a set of ExPolygons.
pub fn count_holes(expolygons: &[ExPolygon]) -> usize {
    expolygons.iter().map(|e| e.holes.len()).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expolygons_area_and_holes() {
        let mut hole = Polygon::rectangle(Point::new(2, 2), Point::new(4, 4));
        hole.reverse();
        let a = ExPolygon::with_holes(
            Polygon::rectangle(Point::new(0, 0), Point::new(10, 10)),
            vec![hole],
        );
        let b = ExPolygon::new(Polygon::rectangle(Point::new(20, 0), Point::new(30, 10)));
        assert_eq!(expolygons_area(&[a.clone(), b.clone()]), 196.0);
        assert_eq!(count_holes(&[a, b]), 1);
    }
}
