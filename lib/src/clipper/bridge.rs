//! Conversions between the slicer geometry types and engine paths.
//!
//! All conversions keep point order and count. The only points ever dropped
//! are the duplicated closing points geo rings carry, and whole paths that are
//! degenerate once converted back to polygons or polylines.

use crate::geometry::{ExPolygon, Point, Polygon, Polygons, Polyline, Polylines};
use geo::{Coord as GeoCoord, LineString, MultiPolygon, Polygon as GeoPolygon};

/// A sequence of points as handed to the engine.
pub type Path = Vec<Point>;

/// A list of engine paths.
pub type Paths = Vec<Path>;

#[inline]
fn to_geo_coord(p: &Point) -> GeoCoord<i64> {
    GeoCoord { x: p.x, y: p.y }
}

#[inline]
fn from_geo_coord(c: &GeoCoord<i64>) -> Point {
    Point::new(c.x, c.y)
}

/// Polygon points as engine paths.
pub fn polygons_to_paths(polygons: &[Polygon]) -> Paths {
    polygons.iter().map(|p| p.points().to_vec()).collect()
}

/// Contour first, then the holes in order.
pub fn expolygon_to_paths(expolygon: &ExPolygon) -> Paths {
    let mut out = Vec::with_capacity(expolygon.num_paths());
    out.push(expolygon.contour.points().to_vec());
    out.extend(expolygon.holes.iter().map(|h| h.points().to_vec()));
    out
}

/// Polyline points as engine paths.
pub fn polylines_to_paths(polylines: &[Polyline]) -> Paths {
    polylines.iter().map(|p| p.points().to_vec()).collect()
}

/// Convert paths to polygons, dropping paths with fewer than 3 points.
pub fn paths_to_polygons(paths: Paths) -> Polygons {
    paths
        .into_iter()
        .filter(|p| p.len() >= 3)
        .map(Polygon::from_points)
        .collect()
}

/// Convert paths to polylines, dropping paths with fewer than 2 points.
pub fn paths_to_polylines(paths: Paths) -> Polylines {
    paths
        .into_iter()
        .filter(|p| p.len() >= 2)
        .map(Polyline::from_points)
        .collect()
}

/// A closed path as a geo polygon without holes. geo closes the ring.
pub fn path_to_geo_polygon(path: &[Point]) -> GeoPolygon<i64> {
    GeoPolygon::new(LineString::new(path.iter().map(to_geo_coord).collect()), vec![])
}

/// A geo ring as a path, without the closing point.
pub fn geo_ring_to_path(ring: &LineString<i64>) -> Path {
    let mut points: Path = ring.0.iter().map(from_geo_coord).collect();
    if points.len() > 1 && points.first() == points.last() {
        points.pop();
    }
    points
}

/// Flatten a geo multi polygon: each exterior followed by its interiors.
/// Ring orientation is kept as the engine produced it.
pub fn geo_multi_to_paths(multi: &MultiPolygon<i64>) -> Paths {
    let mut out = Vec::new();
    for polygon in multi.0.iter() {
        out.push(geo_ring_to_path(polygon.exterior()));
        out.extend(polygon.interiors().iter().map(geo_ring_to_path));
    }
    out.retain(|p| !p.is_empty());
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Polygon {
        Polygon::rectangle(Point::new(0, 0), Point::new(10, 10))
    }

    #[test]
    fn test_expolygon_to_paths_order() {
        let mut hole = Polygon::rectangle(Point::new(2, 2), Point::new(4, 4));
        hole.reverse();
        let ex = ExPolygon::with_holes(square(), vec![hole.clone()]);
        let paths = expolygon_to_paths(&ex);
        assert_eq!(paths.len(), 2);
        assert_eq!(paths[0], square().points().to_vec());
        assert_eq!(paths[1], hole.points().to_vec());
    }

    #[test]
    fn test_degenerate_paths_dropped() {
        let paths = vec![
            vec![Point::new(0, 0), Point::new(1, 0)],
            square().into_points(),
            vec![Point::new(5, 5)],
        ];
        assert_eq!(paths_to_polygons(paths.clone()).len(), 1);
        assert_eq!(paths_to_polylines(paths).len(), 2);
    }

    #[test]
    fn test_geo_round_trip_keeps_points() {
        let sq = square();
        let geo_poly = path_to_geo_polygon(sq.points());
        // geo closes the ring.
        assert_eq!(geo_poly.exterior().0.len(), 5);
        let back = geo_multi_to_paths(&MultiPolygon::new(vec![geo_poly]));
        assert_eq!(back, vec![sq.into_points()]);
    }
}
