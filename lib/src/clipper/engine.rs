//! Thin safe layer over the Clipper engine.
//!
//! Booleans are executed through `clipper-sys` directly so the fill rule can
//! be chosen per call. Closed offsets use `geo-clipper`'s integer traits; the
//! native offsetter drops open input, so strokes are built in [`super::stroke`].
//!
//! The engine answers a boolean with groups of closed paths: the first path of
//! a group is an outer contour and the rest are its holes. Islands inside holes
//! come back as groups of their own.

use super::bridge::{geo_multi_to_paths, path_to_geo_polygon, Path, Paths};
use super::{ClipType, FillRule, JoinType};
use crate::geometry::Point;
use clipper_sys::{
    execute, free_polygons, ClipType as RawClipType, ClipType_ctDifference,
    ClipType_ctIntersection, ClipType_ctUnion, ClipType_ctXor, Path as RawPath,
    PolyFillType as RawFillType, PolyFillType_pftEvenOdd, PolyFillType_pftNegative,
    PolyFillType_pftNonZero, PolyFillType_pftPositive, PolyType, PolyType_ptClip,
    PolyType_ptSubject, Polygon as RawPolygon, Polygons as RawPolygons, Vertice,
};
use geo_clipper::ClipperInt;

impl From<ClipType> for RawClipType {
    fn from(ct: ClipType) -> Self {
        match ct {
            ClipType::Union => ClipType_ctUnion,
            ClipType::Difference => ClipType_ctDifference,
            ClipType::Intersection => ClipType_ctIntersection,
            ClipType::Xor => ClipType_ctXor,
        }
    }
}

impl From<FillRule> for RawFillType {
    fn from(fill: FillRule) -> Self {
        match fill {
            FillRule::EvenOdd => PolyFillType_pftEvenOdd,
            FillRule::NonZero => PolyFillType_pftNonZero,
            FillRule::Positive => PolyFillType_pftPositive,
            FillRule::Negative => PolyFillType_pftNegative,
        }
    }
}

/// Join type with its parameter, as geo-clipper wants it.
fn geo_join(join: JoinType, miter_limit: f64) -> geo_clipper::JoinType {
    match join {
        JoinType::Square => geo_clipper::JoinType::Square,
        JoinType::Round => geo_clipper::JoinType::Round(miter_limit),
        JoinType::Miter => geo_clipper::JoinType::Miter(miter_limit),
    }
}

/// One operand marshalled into the engine's C layout.
///
/// The raw path headers point into `vertices`, which is never resized after
/// construction, so the pointers stay valid for the lifetime of the operand.
struct Operand {
    vertices: Vec<Vec<Vertice>>,
    headers: Vec<RawPath>,
    poly_type: PolyType,
}

impl Operand {
    fn new<'a>(paths: impl Iterator<Item = &'a [Point]>, poly_type: PolyType, closed: bool) -> Self {
        let mut vertices: Vec<Vec<Vertice>> = paths
            .filter(|p| !p.is_empty())
            .map(|p| p.iter().map(|pt| [pt.x, pt.y]).collect())
            .collect();
        let headers = vertices
            .iter_mut()
            .map(|v| RawPath {
                vertices: v.as_mut_ptr(),
                vertices_count: v.len() as _,
                closed: closed as _,
            })
            .collect();
        Self {
            vertices,
            headers,
            poly_type,
        }
    }

    fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    fn raw(&mut self) -> RawPolygon {
        RawPolygon {
            paths: self.headers.as_mut_ptr(),
            paths_count: self.headers.len() as _,
            type_: self.poly_type,
        }
    }
}

fn read_vertices(path: &RawPath) -> Path {
    path.vertices().iter().map(|v| Point::new(v[0], v[1])).collect()
}

/// Run a boolean operation and return the engine's output groups.
///
/// `subject_closed` is false when the subject paths are open polylines; the
/// groups then hold open paths only.
pub(super) fn execute_groups<'a, 'b>(
    clip_type: ClipType,
    subject: impl Iterator<Item = &'a [Point]>,
    subject_closed: bool,
    clip: impl Iterator<Item = &'b [Point]>,
    fill: FillRule,
) -> Vec<Paths> {
    let mut subject = Operand::new(subject, PolyType_ptSubject, subject_closed);
    let mut clip = Operand::new(clip, PolyType_ptClip, true);
    let nothing_to_do = match clip_type {
        ClipType::Union | ClipType::Xor => subject.is_empty() && clip.is_empty(),
        ClipType::Difference | ClipType::Intersection => subject.is_empty(),
    };
    if nothing_to_do {
        return Vec::new();
    }

    let mut operands: Vec<RawPolygon> = Vec::with_capacity(2);
    if !subject.is_empty() {
        operands.push(subject.raw());
    }
    if !clip.is_empty() {
        operands.push(clip.raw());
    }
    let input = RawPolygons {
        polygons: operands.as_mut_ptr(),
        polygons_count: operands.len() as _,
    };

    // The engine copies the input before returning; `subject`, `clip` and
    // `operands` outlive the call.
    let solution = unsafe { execute(clip_type.into(), input, fill.into(), fill.into()) };

    let groups = solution
        .polygons()
        .iter()
        .map(|group| {
            group
                .paths()
                .iter()
                .map(read_vertices)
                .filter(|p| !p.is_empty())
                .collect::<Paths>()
        })
        .filter(|g| !g.is_empty())
        .collect();

    unsafe {
        free_polygons(solution);
    }
    groups
}

/// Run a boolean operation and return all output paths in a flat list.
pub(super) fn execute_flat<'a, 'b>(
    clip_type: ClipType,
    subject: impl Iterator<Item = &'a [Point]>,
    subject_closed: bool,
    clip: impl Iterator<Item = &'b [Point]>,
    fill: FillRule,
) -> Paths {
    execute_groups(clip_type, subject, subject_closed, clip, fill)
        .into_iter()
        .flatten()
        .collect()
}

/// Offset one closed path. The engine orients the path itself, so a positive
/// delta always grows the area the path encloses. Output contours are
/// counter-clockwise, holes clockwise.
pub(super) fn offset_closed_path(
    path: &[Point],
    delta: f64,
    join: JoinType,
    miter_limit: f64,
) -> Paths {
    if path.len() < 3 {
        return Vec::new();
    }
    let geo_poly = path_to_geo_polygon(path);
    let result = ClipperInt::offset(
        &geo_poly,
        delta,
        geo_join(join, miter_limit),
        geo_clipper::EndType::ClosedPolygon,
    );
    geo_multi_to_paths(&result)
}
