//! Offsets with a different distance at every vertex.
//!
//! The path builder does its own corner geometry instead of going through the
//! engine's offsetter, then the engine cleans up self-intersections.

use super::boolean::{clip, clip_tree};
use super::bridge::{paths_to_polygons, Path, Paths};
use super::polytree::polytree_to_expolygons;
use super::provider::{EmptyPathsProvider, SinglePathProvider};
use super::{ApplySafetyOffset, ClipType, FillRule, VARIABLE_OFFSET_EDGE_RATIO};
use crate::geometry::{ExPolygon, ExPolygons, Point, PointF, Polygons};
use crate::Coord;

/// Sin of the corner angle, times delta, below which edges count as parallel.
const SIN_MIN_PARALLEL: f64 = 1.0;

/// Allowed error of a bevel face's distance from its vertex, in scaled units.
const BEVEL_TOLERANCE: f64 = 100.0;

/// Rotate 90 degrees clockwise. For a counter-clockwise contour this points
/// out of the enclosed area.
#[inline]
fn perp_cw(v: PointF) -> PointF {
    PointF::new(v.y, -v.x)
}

#[inline]
fn round_half_away(v: f64) -> Coord {
    (v + if v < 0.0 { -0.5 } else { 0.5 }) as Coord
}

#[inline]
fn to_point(p: PointF) -> Point {
    Point::new(round_half_away(p.x), round_half_away(p.y))
}

/// Offset a closed contour by a per-vertex distance with mitered corners.
///
/// `deltas[i]` applies at `points[i]`; positive moves to the right of the
/// direction of travel, which is outwards for a counter-clockwise contour.
/// All deltas should have the same sign. Returns an empty path for fewer than
/// three vertices.
///
/// Edges shorter than a small fraction of the largest delta are skipped. Each
/// retained corner emits:
/// - three points when concave (notch through the vertex itself)
/// - one point when the edges are nearly parallel
/// - one miter point when convex within the miter limit
/// - two bevel points when convex beyond it
///
/// The result may self-intersect.
pub fn mittered_offset_path_scaled(points: &[Point], deltas: &[f64], miter_limit: f64) -> Path {
    debug_assert_eq!(points.len(), deltas.len());
    debug_assert!(
        deltas.iter().all(|&d| d >= 0.0) || deltas.iter().all(|&d| d <= 0.0),
        "variable offset deltas must share one sign"
    );
    let mut out = Vec::new();
    if deltas.len() <= 2 || points.len() != deltas.len() {
        return out;
    }
    out.reserve(points.len() * 2);

    // Large limits would let near-reversing corners spike out.
    let miter_limit = if miter_limit > 2.0 {
        2.0 / (miter_limit * miter_limit)
    } else {
        0.5
    };
    let lmin = deltas.iter().fold(0.0_f64, |m, d| m.max(d.abs())) * VARIABLE_OFFSET_EDGE_RATIO;
    let l2min = lmin * lmin;
    let far_enough = |a: PointF, b: PointF| (a - b).length_squared() > l2min;

    let mut pt = points[0].to_f64();
    let ilast = match (1..points.len())
        .rev()
        .find(|&k| far_enough(points[k].to_f64(), pt))
    {
        Some(k) => k,
        None => return out,
    };
    let mut nprev = perp_cw(pt - points[ilast].to_f64()).normalize();

    let mut i = 0;
    loop {
        let (j, ptnext) = match (i + 1..=ilast).find(|&k| far_enough(points[k].to_f64(), pt)) {
            Some(j) => (j, points[j].to_f64()),
            None => {
                // Closing edge; a trailing short edge is folded into it.
                i = ilast;
                (ilast + 1, points[0].to_f64())
            }
        };
        let nnext = perp_cw(ptnext - pt).normalize();

        let delta = deltas[i];
        let sin_a = nprev.cross(&nnext).clamp(-1.0, 1.0);
        let convex = sin_a * delta;
        if convex <= -SIN_MIN_PARALLEL {
            out.push(to_point(pt + nprev * delta));
            out.push(to_point(pt));
            out.push(to_point(pt + nnext * delta));
        } else {
            let dot = nprev.dot(&nnext);
            if convex < SIN_MIN_PARALLEL && dot > 0.0 {
                out.push(to_point(pt + nprev * delta));
            } else {
                let r = 1.0 + dot;
                if r >= miter_limit {
                    out.push(to_point(pt + (nprev + nnext) * (delta / r)));
                } else {
                    let dx = (sin_a.atan2(dot) / 4.0).tan();
                    let p1 = pt + (nprev - perp_cw(nprev) * dx) * delta;
                    let p2 = pt + (nnext + perp_cw(nnext) * dx) * delta;
                    debug_assert!(
                        (((p1 + p2) * 0.5 - pt).length() - delta.abs()).abs() < BEVEL_TOLERANCE
                    );
                    out.push(to_point(p1));
                    out.push(to_point(p2));
                }
            }
        }

        if i == ilast {
            break;
        }
        nprev = nnext;
        pt = ptnext;
        i = j;
    }
    out
}

/// Offset the contour and every hole of `expolygon`, fix each up with the
/// engine and subtract the holes from the contour.
///
/// `deltas[0]` belongs to the contour, `deltas[1 + k]` to hole `k`.
fn variable_offset_paths(expolygon: &ExPolygon, deltas: &[Vec<f64>], miter_limit: f64) -> (Paths, Paths) {
    debug_assert_eq!(expolygon.holes.len() + 1, deltas.len());
    let contour_deltas = deltas.first().map(Vec::as_slice).unwrap_or(&[]);
    let contour_path = mittered_offset_path_scaled(expolygon.contour.points(), contour_deltas, miter_limit);
    let contours = clip(
        ClipType::Union,
        &SinglePathProvider(&contour_path),
        &EmptyPathsProvider,
        FillRule::Positive,
        ApplySafetyOffset::No,
    );

    let mut holes = Vec::new();
    for (hole, hole_deltas) in expolygon.holes.iter().zip(deltas.iter().skip(1)) {
        let hole_path = mittered_offset_path_scaled(hole.points(), hole_deltas, miter_limit);
        holes.extend(clip(
            ClipType::Union,
            &SinglePathProvider(&hole_path),
            &EmptyPathsProvider,
            FillRule::Negative,
            ApplySafetyOffset::No,
        ));
    }
    (contours, holes)
}

fn check_signs(deltas: &[Vec<f64>], inner: bool) -> bool {
    deltas
        .iter()
        .flatten()
        .all(|&d| if inner { d <= 0.0 } else { d >= 0.0 })
}

/// Shrink an ExPolygon by per-vertex distances. All deltas must be `<= 0`.
pub fn variable_offset_inner(expolygon: &ExPolygon, deltas: &[Vec<f64>], miter_limit: f64) -> Polygons {
    debug_assert!(check_signs(deltas, true), "inner offset needs non-positive deltas");
    let (contours, holes) = variable_offset_paths(expolygon, deltas, miter_limit);
    paths_to_polygons(subtract_holes(contours, holes))
}

/// [`variable_offset_inner`] with hole nesting.
pub fn variable_offset_inner_ex(
    expolygon: &ExPolygon,
    deltas: &[Vec<f64>],
    miter_limit: f64,
) -> ExPolygons {
    debug_assert!(check_signs(deltas, true), "inner offset needs non-positive deltas");
    let (contours, holes) = variable_offset_paths(expolygon, deltas, miter_limit);
    subtract_holes_ex(&contours, &holes)
}

/// Grow an ExPolygon by per-vertex distances. All deltas must be `>= 0`.
pub fn variable_offset_outer(expolygon: &ExPolygon, deltas: &[Vec<f64>], miter_limit: f64) -> Polygons {
    debug_assert!(check_signs(deltas, false), "outer offset needs non-negative deltas");
    let (contours, holes) = variable_offset_paths(expolygon, deltas, miter_limit);
    paths_to_polygons(subtract_holes(contours, holes))
}

/// [`variable_offset_outer`] with hole nesting.
pub fn variable_offset_outer_ex(
    expolygon: &ExPolygon,
    deltas: &[Vec<f64>],
    miter_limit: f64,
) -> ExPolygons {
    debug_assert!(check_signs(deltas, false), "outer offset needs non-negative deltas");
    let (contours, holes) = variable_offset_paths(expolygon, deltas, miter_limit);
    subtract_holes_ex(&contours, &holes)
}

fn subtract_holes(contours: Paths, holes: Paths) -> Paths {
    if holes.is_empty() {
        return contours;
    }
    clip(
        ClipType::Difference,
        &contours,
        &holes,
        FillRule::NonZero,
        ApplySafetyOffset::No,
    )
}

fn subtract_holes_ex(contours: &Paths, holes: &Paths) -> ExPolygons {
    polytree_to_expolygons(clip_tree(
        ClipType::Difference,
        contours,
        holes,
        FillRule::NonZero,
        ApplySafetyOffset::No,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{total_area, Polygon};

    fn square(x0: i64, y0: i64, size: i64) -> Polygon {
        Polygon::rectangle(Point::new(x0, y0), Point::new(x0 + size, y0 + size))
    }

    fn pts(coords: &[(i64, i64)]) -> Vec<Point> {
        coords.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    #[test]
    fn test_square_corners_are_mitered() {
        let sq = square(0, 0, 100);
        let out = mittered_offset_path_scaled(sq.points(), &[10.0; 4], 3.0);
        assert_eq!(
            out,
            pts(&[(-10, -10), (110, -10), (110, 110), (-10, 110)])
        );
    }

    #[test]
    fn test_too_few_deltas() {
        let line = pts(&[(0, 0), (100, 0)]);
        assert!(mittered_offset_path_scaled(&line, &[1.0, 1.0], 3.0).is_empty());
        assert!(mittered_offset_path_scaled(&[], &[], 3.0).is_empty());
    }

    #[test]
    fn test_concave_corner_notches() {
        let l_shape = pts(&[(0, 0), (100, 0), (100, 50), (50, 50), (50, 100), (0, 100)]);
        let out = mittered_offset_path_scaled(&l_shape, &[10.0; 6], 3.0);
        assert_eq!(out.len(), 8);
        assert!(out.contains(&Point::new(50, 50)));
        assert!(out.contains(&Point::new(50, 60)));
        assert!(out.contains(&Point::new(60, 50)));
    }

    #[test]
    fn test_sharp_corner_is_bevelled() {
        let sliver = pts(&[(0, 0), (1000, 0), (0, 100)]);
        let out = mittered_offset_path_scaled(&sliver, &[10.0; 3], 2.0);
        assert_eq!(out.len(), 4);
    }

    #[test]
    fn test_collinear_vertex_emits_one_point() {
        let sq = pts(&[(0, 0), (50, 0), (100, 0), (100, 100), (0, 100)]);
        let out = mittered_offset_path_scaled(&sq, &[10.0; 5], 3.0);
        assert_eq!(out.len(), 5);
        assert_eq!(out[1], Point::new(50, -10));
    }

    #[test]
    fn test_short_edges_are_skipped() {
        let sq = pts(&[(0, 0), (100, 0), (100, 2), (100, 100), (0, 100)]);
        let out = mittered_offset_path_scaled(&sq, &[1000.0; 5], 3.0);
        assert_eq!(out.len(), 4);
    }

    #[test]
    fn test_variable_delta_along_edge() {
        let sq = square(0, 0, 100);
        let out = mittered_offset_path_scaled(sq.points(), &[10.0, 10.0, 20.0, 20.0], 3.0);
        assert_eq!(out.len(), 4);
        assert_eq!(out[0], Point::new(-10, -10));
        assert_eq!(out[2], Point::new(120, 120));
    }

    fn with_hole() -> ExPolygon {
        let mut hole = square(30, 30, 40);
        hole.reverse();
        ExPolygon::with_holes(square(0, 0, 100), vec![hole])
    }

    #[test]
    fn test_variable_offset_outer() {
        let ex = with_hole();
        let deltas = vec![vec![10.0; 4], vec![10.0; 4]];
        let out = variable_offset_outer_ex(&ex, &deltas, 3.0);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].holes.len(), 1);
        assert_eq!(out[0].area(), 14400.0 - 400.0);

        let flat = variable_offset_outer(&ex, &deltas, 3.0);
        assert_eq!(flat.len(), 2);
        assert_eq!(total_area(&flat), 14000.0);
    }

    #[test]
    fn test_variable_offset_inner() {
        let ex = with_hole();
        let deltas = vec![vec![-10.0; 4], vec![-10.0; 4]];
        let out = variable_offset_inner_ex(&ex, &deltas, 3.0);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].area(), 6400.0 - 3600.0);
        assert_eq!(total_area(&variable_offset_inner(&ex, &deltas, 3.0)), 2800.0);
    }

    #[test]
    fn test_variable_offset_inner_closes_hole_gap() {
        // Hole grown past the contour cuts the shape apart.
        let mut hole = square(10, 10, 80);
        hole.reverse();
        let ex = ExPolygon::with_holes(square(0, 0, 100), vec![hole]);
        let deltas = vec![vec![-6.0; 4], vec![-6.0; 4]];
        assert!(variable_offset_inner_ex(&ex, &deltas, 3.0).is_empty());
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "share one sign")]
    fn test_mixed_sign_deltas_rejected() {
        let square = [
            Point::new(0, 0),
            Point::new(100, 0),
            Point::new(100, 100),
            Point::new(0, 100),
        ];
        mittered_offset_path_scaled(&square, &[10.0, -10.0, 10.0, 10.0], 3.0);
    }
}
