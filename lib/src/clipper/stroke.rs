//! Stroke outlines of open paths.
//!
//! A stroke is assembled from simple pieces: a rectangle per segment, a wedge
//! or disk at every corner and a cap at each free end. The engine unions the
//! pieces into the outline, so overlaps between them never show.

use super::bridge::{Path, Paths};
use super::engine::{execute_flat, offset_closed_path};
use super::{ClipType, EndType, FillRule, JoinType};
use crate::geometry::{signed_area2, Point, PointF};
use std::f64::consts::PI;

/// Arc tolerance for round joins and caps when the caller passes none.
const DEFAULT_ARC_TOLERANCE: f64 = 0.25;

/// Outline of one path stroked `delta` to each side.
///
/// Open ends ignore the sign of `delta`. [`EndType::ClosedPolygon`] offsets
/// the enclosed area instead. Consecutive duplicate points are dropped, and a
/// path left with fewer than two points strokes to nothing.
pub(super) fn stroke_path(
    path: &[Point],
    delta: f64,
    join: JoinType,
    miter_limit: f64,
    end: EndType,
) -> Paths {
    if end == EndType::ClosedPolygon {
        return offset_closed_path(path, delta, join, miter_limit);
    }
    let width = delta.abs();
    let mut points: Vec<PointF> = Vec::with_capacity(path.len());
    for p in path.iter().map(Point::to_f64) {
        if points.last() != Some(&p) {
            points.push(p);
        }
    }
    if end == EndType::ClosedLine && points.len() > 2 && points.first() == points.last() {
        points.pop();
    }
    if points.len() < 2 || width <= 0.0 {
        return Vec::new();
    }

    let mut stroke = Stroke {
        width,
        join,
        miter_limit,
        pieces: Vec::new(),
    };
    stroke.build(&points, end);
    log::trace!(
        "stroke_path: {} points, {} pieces, {:?}",
        points.len(),
        stroke.pieces.len(),
        end
    );
    execute_flat(
        ClipType::Union,
        stroke.pieces.iter().map(|p| p.as_slice()),
        true,
        std::iter::empty(),
        FillRule::NonZero,
    )
}

/// Vertices of a full circle of `radius`, following the engine's step rule.
fn arc_steps(radius: f64, arc_tolerance: f64) -> usize {
    let tolerance = if arc_tolerance <= 0.0 {
        DEFAULT_ARC_TOLERANCE
    } else {
        arc_tolerance.min(radius * DEFAULT_ARC_TOLERANCE)
    };
    let steps = (PI / (1.0 - tolerance / radius).acos()).min(radius * PI);
    (steps.round() as usize).max(4)
}

/// Smallest `1 + cos` of a turn that still gets a miter point.
fn miter_bound(miter_limit: f64) -> f64 {
    if miter_limit > 2.0 {
        2.0 / (miter_limit * miter_limit)
    } else {
        0.5
    }
}

struct Stroke {
    width: f64,
    join: JoinType,
    miter_limit: f64,
    pieces: Paths,
}

impl Stroke {
    fn build(&mut self, points: &[PointF], end: EndType) {
        let n = points.len();
        if end == EndType::ClosedLine {
            for i in 0..n {
                let next = points[(i + 1) % n];
                self.segment(points[i], next);
                self.corner(points[(i + n - 1) % n], points[i], next);
            }
            return;
        }
        for w in points.windows(2) {
            self.segment(w[0], w[1]);
        }
        for w in points.windows(3) {
            self.corner(w[0], w[1], w[2]);
        }
        match end {
            EndType::OpenSquare => {
                self.square_cap(points[1], points[0]);
                self.square_cap(points[n - 2], points[n - 1]);
            }
            EndType::OpenRound => {
                self.disk(points[0]);
                self.disk(points[n - 1]);
            }
            _ => {}
        }
    }

    /// Add a piece, counter-clockwise.
    fn push(&mut self, points: impl IntoIterator<Item = PointF>) {
        let mut piece: Path = points.into_iter().map(Point::from_f64_rounded).collect();
        match signed_area2(&piece) {
            0 => return,
            a if a < 0 => piece.reverse(),
            _ => {}
        }
        self.pieces.push(piece);
    }

    fn segment(&mut self, a: PointF, b: PointF) {
        let n = (b - a).normalize().perp() * self.width;
        self.push([a - n, b - n, b + n, a + n]);
    }

    /// Square cap beyond `end`, for a segment arriving from `from`.
    fn square_cap(&mut self, from: PointF, end: PointF) {
        let d = (end - from).normalize() * self.width;
        let n = d.perp();
        self.push([end - n, end - n + d, end + n + d, end + n]);
    }

    fn disk(&mut self, center: PointF) {
        let steps = arc_steps(self.width, self.miter_limit);
        let step = 2.0 * PI / steps as f64;
        let r = self.width;
        self.push((0..steps).map(|k| {
            let a = k as f64 * step;
            center + PointF::new(a.cos(), a.sin()) * r
        }));
    }

    /// Fill the outside of the turn at `v`. The inside is covered by the two
    /// segment rectangles already.
    fn corner(&mut self, prev: PointF, v: PointF, next: PointF) {
        let d1 = (v - prev).normalize();
        let d2 = (next - v).normalize();
        let sin = d1.cross(&d2);
        let cos = d1.dot(&d2);
        if sin.abs() < f64::EPSILON && cos > 0.0 {
            return;
        }
        if self.join == JoinType::Round {
            self.disk(v);
            return;
        }
        let side = if sin > 0.0 { -1.0 } else { 1.0 };
        let o1 = d1.perp() * side;
        let o2 = d2.perp() * side;
        let w = self.width;
        let p1 = v + o1 * w;
        let p2 = v + o2 * w;
        if self.join == JoinType::Miter && 1.0 + cos >= miter_bound(self.miter_limit) {
            let m = v + (o1 + o2) * (w / (1.0 + cos));
            self.push([v, p1, m, p2]);
        } else {
            let t = w * (sin.abs().atan2(cos) / 4.0).tan();
            self.push([v, p1, p1 + d1 * t, p2 - d2 * t, p2]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area(paths: &[Path]) -> f64 {
        paths.iter().map(|p| signed_area2(p) as f64 * 0.5).sum()
    }

    fn line() -> Path {
        vec![Point::new(0, 0), Point::new(100, 0)]
    }

    fn elbow() -> Path {
        vec![Point::new(0, 0), Point::new(100, 0), Point::new(100, 100)]
    }

    #[test]
    fn test_butt_ends() {
        let out = stroke_path(&line(), 10.0, JoinType::Square, 0.0, EndType::OpenButt);
        assert_eq!(out.len(), 1);
        assert_eq!(area(&out), 2000.0);
    }

    #[test]
    fn test_square_ends() {
        let out = stroke_path(&line(), 10.0, JoinType::Miter, 3.0, EndType::OpenSquare);
        assert_eq!(out.len(), 1);
        assert_eq!(area(&out), 2800.0);
    }

    #[test]
    fn test_round_ends() {
        let out = stroke_path(&line(), 10.0, JoinType::Round, 0.25, EndType::OpenRound);
        assert_eq!(out.len(), 1);
        // Rectangle plus one disk of radius 10, approximated from inside.
        let a = area(&out);
        assert!(a > 2280.0 && a < 2000.0 + 100.0 * PI, "area {}", a);
    }

    #[test]
    fn test_closed_line_is_a_ring() {
        let square = vec![
            Point::new(0, 0),
            Point::new(100, 0),
            Point::new(100, 100),
            Point::new(0, 100),
        ];
        let out = stroke_path(&square, 10.0, JoinType::Miter, 3.0, EndType::ClosedLine);
        assert_eq!(out.len(), 2);
        assert_eq!(area(&out), 14400.0 - 6400.0);
        assert!(out.iter().any(|p| signed_area2(p) < 0));
    }

    #[test]
    fn test_closed_polygon_fills() {
        let square = vec![
            Point::new(0, 0),
            Point::new(100, 0),
            Point::new(100, 100),
            Point::new(0, 100),
        ];
        let out = stroke_path(&square, 10.0, JoinType::Miter, 3.0, EndType::ClosedPolygon);
        assert_eq!(area(&out), 14400.0);
    }

    #[test]
    fn test_miter_corner() {
        let out = stroke_path(&elbow(), 10.0, JoinType::Miter, 3.0, EndType::OpenButt);
        assert_eq!(out.len(), 1);
        // Two 20 wide arms, their overlap counted once, plus the miter square.
        assert_eq!(area(&out), 2000.0 + 2000.0 - 100.0 + 100.0);
    }

    #[test]
    fn test_square_corner_is_chamfered() {
        let miter = area(&stroke_path(&elbow(), 10.0, JoinType::Miter, 3.0, EndType::OpenButt));
        let square = area(&stroke_path(&elbow(), 10.0, JoinType::Square, 0.0, EndType::OpenButt));
        assert!(square < miter);
        assert!(square > miter - 100.0);
    }

    #[test]
    fn test_negative_delta_strokes_the_same() {
        let out = stroke_path(&line(), -10.0, JoinType::Square, 0.0, EndType::OpenButt);
        assert_eq!(area(&out), 2000.0);
    }

    #[test]
    fn test_degenerate_paths() {
        let point = vec![Point::new(5, 5), Point::new(5, 5)];
        assert!(stroke_path(&point, 10.0, JoinType::Square, 0.0, EndType::OpenRound).is_empty());
        assert!(stroke_path(&line(), 0.0, JoinType::Square, 0.0, EndType::OpenButt).is_empty());
    }

    #[test]
    fn test_arc_steps() {
        assert_eq!(arc_steps(10.0, 0.25), 14);
        assert_eq!(arc_steps(1.0, 0.0), 4);
    }
}
