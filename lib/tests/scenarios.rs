//! End-to-end behaviour of the clipping layer through the public API.

use slicer_clipper::clipper::{
    mittered_offset_path_scaled, offset_expolygon_inner, raw_offset, union_pt, DEFAULT_JOIN_TYPE,
    DEFAULT_MITER_LIMIT,
};
use slicer_clipper::geometry::{count_holes, expolygons_area, total_area};
use slicer_clipper::{
    closing, closing_ex, expand, intersection_pl, offset_ex, opening, shrink, union, union_ex,
    ApplySafetyOffset, ExPolygon, ExPolygons, JoinType, Point, Polygon, Polygons, Polyline,
};

fn square(x0: i64, y0: i64, size: i64) -> Polygon {
    Polygon::rectangle(Point::new(x0, y0), Point::new(x0 + size, y0 + size))
}

fn hole(x0: i64, y0: i64, size: i64) -> Polygon {
    let mut h = square(x0, y0, size);
    h.reverse();
    h
}

/// Every vertex of `inner` lies inside or on some polygon of `outer`.
fn covered_by(inner: &[Polygon], outer: &[Polygon]) -> bool {
    inner.iter().flat_map(|p| p.points()).all(|pt| {
        outer
            .iter()
            .any(|o| o.contains_point(pt) || o.on_boundary(pt, 1))
    })
}

// ----------------------------------------------------------------------------
// Scenarios
// ----------------------------------------------------------------------------

#[test]
fn expand_square_by_ten() {
    let out = expand(&square(0, 0, 100), 10.0, DEFAULT_JOIN_TYPE, DEFAULT_MITER_LIMIT);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].area(), 14400.0);
}

#[test]
fn shrink_square_past_half_width() {
    let out = shrink(&square(0, 0, 100), 60.0, DEFAULT_JOIN_TYPE, DEFAULT_MITER_LIMIT);
    assert!(out.is_empty());
}

#[test]
fn offset_ex_negative_grows_hole() {
    let ex = ExPolygon::with_holes(square(0, 0, 100), vec![hole(40, 40, 20)]);
    let out = offset_ex(&ex, -5.0, DEFAULT_JOIN_TYPE, DEFAULT_MITER_LIMIT);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].contour.area(), 8100.0);
    assert_eq!(out[0].holes.len(), 1);
    assert_eq!(out[0].holes[0].area(), -900.0);
}

#[test]
fn union_keeps_disjoint_squares_apart() {
    let polys = vec![square(0, 0, 100), square(10_000, 10_000, 100)];
    assert_eq!(union(&polys).len(), 2);
}

#[test]
fn union_merges_half_overlap() {
    let polys = vec![square(0, 0, 100), square(50, 0, 100)];
    let out = union(&polys);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].area(), 15000.0);
}

#[test]
fn intersection_pl_returns_contained_polyline_unchanged() {
    let pl = Polyline::from_points(vec![
        Point::new(10, 10),
        Point::new(80, 10),
        Point::new(80, 80),
    ]);
    let out = intersection_pl(&vec![pl.clone()], &square(0, 0, 100), ApplySafetyOffset::No);
    assert_eq!(out, vec![pl]);
}

#[test]
fn mitered_offset_right_angle_gives_one_point() {
    let sq = square(0, 0, 100);
    let out = mittered_offset_path_scaled(sq.points(), &[10.0, 10.0, 10.0, 10.0], 10.0);
    // One point per corner; the (100, 0) corner is a single miter point.
    assert_eq!(out.len(), 4);
    assert_eq!(out[1], Point::new(110, -10));
}

// ----------------------------------------------------------------------------
// Properties
// ----------------------------------------------------------------------------

#[test]
fn positive_offset_keeps_orientation() {
    let ccw = square(0, 0, 100);
    let cw = hole(0, 0, 100);
    for delta in [1.0, 10.0, 50.0] {
        for join in [JoinType::Miter, JoinType::Round, JoinType::Square] {
            let limit = if join == JoinType::Round { 0.25 } else { DEFAULT_MITER_LIMIT };
            let grown = raw_offset(&ccw, delta, join, limit);
            assert!(grown.iter().all(|p| Polygon::from_points(p.clone()).area() > 0.0));
            let grown = raw_offset(&cw, delta, join, limit);
            assert!(grown.iter().all(|p| Polygon::from_points(p.clone()).area() < 0.0));
            let merged = expand(&ccw, delta, join, limit);
            assert!(merged.iter().all(|p| p.is_counter_clockwise()));
        }
    }
}

#[test]
fn union_is_idempotent() {
    let polys = vec![
        square(0, 0, 100),
        square(50, 50, 100),
        square(300, 0, 50),
        hole(20, 20, 20),
    ];
    let once = union(&polys);
    let twice = union(&once);
    assert_eq!(once.len(), twice.len());
    assert_eq!(total_area(&once), total_area(&twice));

    let once_ex = union_ex(&polys);
    let twice_ex = union_ex(&once_ex);
    assert_eq!(count_holes(&once_ex), count_holes(&twice_ex));
    assert_eq!(expolygons_area(&once_ex), expolygons_area(&twice_ex));
}

fn notched() -> Polygons {
    // A square with a 10 wide slot cut into its top.
    vec![Polygon::from_points(vec![
        Point::new(0, 0),
        Point::new(200, 0),
        Point::new(200, 200),
        Point::new(105, 200),
        Point::new(105, 100),
        Point::new(95, 100),
        Point::new(95, 200),
        Point::new(0, 200),
    ])]
}

#[test]
fn closing_never_removes_area() {
    let x = notched();
    let closed = closing(&x, 10.0, 10.0, DEFAULT_JOIN_TYPE, DEFAULT_MITER_LIMIT);
    assert!(total_area(&closed) >= total_area(&x));
    assert!(covered_by(&x, &closed));
    // The slot is filled.
    assert_eq!(total_area(&closed), 200.0 * 200.0);
}

#[test]
fn opening_never_adds_area() {
    let mut x = notched();
    // A thin spike on the right side.
    x.push(Polygon::rectangle(Point::new(200, 90), Point::new(300, 96)));
    let x = union(&x);
    let opened = opening(&x, 10.0, 10.0, DEFAULT_JOIN_TYPE, DEFAULT_MITER_LIMIT);
    assert!(total_area(&opened) <= total_area(&x));
    assert!(covered_by(&opened, &x));
}

#[test]
fn closing_does_not_add_holes() {
    let holes = vec![hole(20, 20, 5), hole(60, 60, 5), hole(140, 140, 40)];
    let ex = ExPolygon::with_holes(square(0, 0, 200), holes);
    let before = ex.holes.len();
    let out: ExPolygons = closing_ex(&[ex], 10.0, 10.0, DEFAULT_JOIN_TYPE, DEFAULT_MITER_LIMIT);
    assert_eq!(out.len(), 1);
    assert!(count_holes(&out) <= before);
    assert_eq!(count_holes(&out), 1);
}

#[test]
fn empty_input_gives_empty_output() {
    let empty: Polygons = Vec::new();
    let empty_ex: ExPolygons = Vec::new();
    for delta in [-10.0, 10.0] {
        assert!(offset_ex(&empty, delta, DEFAULT_JOIN_TYPE, DEFAULT_MITER_LIMIT).is_empty());
        assert!(offset_ex(&empty_ex, delta, DEFAULT_JOIN_TYPE, DEFAULT_MITER_LIMIT).is_empty());
    }
    assert!(union_pt(&empty).is_empty());
}

#[test]
fn triangle_shrunk_past_inradius_vanishes() {
    // 3-4-5 right triangle scaled by 100 has inradius 100.
    let triangle = ExPolygon::new(Polygon::from_points(vec![
        Point::new(0, 0),
        Point::new(400, 0),
        Point::new(0, 300),
    ]));
    let mut out = Vec::new();
    let n = offset_expolygon_inner(&triangle, -101.0, DEFAULT_JOIN_TYPE, DEFAULT_MITER_LIMIT, &mut out);
    assert_eq!(n, 0);
    assert!(out.is_empty());

    let n = offset_expolygon_inner(&triangle, -90.0, DEFAULT_JOIN_TYPE, DEFAULT_MITER_LIMIT, &mut out);
    assert_eq!(n, 1);
}
