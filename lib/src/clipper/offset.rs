//! Offsetting: raw per-path offsets, morphological operators and the
//! per-ExPolygon safe offset.
//!
//! Deltas are in scaled units. Positive grows the region a path encloses.

use super::alarm::TimeLimitAlarm;
use super::bridge::{paths_to_polygons, Paths};
use super::engine::{execute_flat, execute_groups, offset_closed_path};
use super::polytree::{polytree_to_expolygons, PolyTree};
use super::provider::PathsProvider;
use super::stroke::stroke_path;
use super::{
    ClipType, EndType, FillRule, JoinType, DEFAULT_LINE_JOIN_TYPE, DEFAULT_LINE_MITER_LIMIT,
};
use crate::config::ClipperConfig;
use crate::geometry::{signed_area2, ExPolygon, ExPolygons, Polygons, Polyline};

// ============================================================================
// Raw offsets
// ============================================================================

fn raw_offset_timed<P: PathsProvider + ?Sized>(
    paths: &P,
    delta: f64,
    join: JoinType,
    miter_limit: f64,
    _alarm: TimeLimitAlarm,
) -> Paths {
    let mut out = Vec::with_capacity(paths.size());
    for path in paths.paths() {
        if path.len() < 3 {
            continue;
        }
        // The engine orients each path counter-clockwise before offsetting,
        // so a clockwise path is offset with the opposite sign and its
        // results turned back.
        if signed_area2(path) >= 0 {
            out.extend(offset_closed_path(path, delta, join, miter_limit));
        } else {
            out.extend(
                offset_closed_path(path, -delta, join, miter_limit)
                    .into_iter()
                    .map(|mut p| {
                        p.reverse();
                        p
                    }),
            );
        }
    }
    out
}

/// Offset every closed path on its own, without merging the results.
///
/// Counter-clockwise paths are offset by `delta`, clockwise paths by `-delta`,
/// so a positive delta grows contours and shrinks holes alike. Outputs keep the
/// winding of their source path and may overlap each other.
pub fn raw_offset<P: PathsProvider + ?Sized>(
    paths: &P,
    delta: f64,
    join: JoinType,
    miter_limit: f64,
) -> Paths {
    raw_offset_timed(
        paths,
        delta,
        join,
        miter_limit,
        TimeLimitAlarm::with_default_limit("raw_offset"),
    )
}

/// [`raw_offset`] with the soft time limit taken from `config`.
pub fn raw_offset_with<P: PathsProvider + ?Sized>(
    config: &ClipperConfig,
    paths: &P,
    delta: f64,
    join: JoinType,
    miter_limit: f64,
) -> Paths {
    raw_offset_timed(
        paths,
        delta,
        join,
        miter_limit,
        TimeLimitAlarm::from_config("raw_offset", config),
    )
}

/// Stroke open paths one at a time, `delta` to each side. Outlines of
/// different paths are not merged.
pub fn raw_offset_polyline<P: PathsProvider + ?Sized>(
    paths: &P,
    delta: f64,
    join: JoinType,
    miter_limit: f64,
    end: EndType,
) -> Paths {
    let _alarm = TimeLimitAlarm::with_default_limit("raw_offset_polyline");
    let mut out = Vec::new();
    for path in paths.paths() {
        out.extend(stroke_path(path, delta, join, miter_limit, end));
    }
    out
}

fn union_paths(paths: &Paths, fill: FillRule) -> Paths {
    execute_flat(
        ClipType::Union,
        paths.iter().map(|p| p.as_slice()),
        true,
        std::iter::empty(),
        fill,
    )
}

fn union_paths_ex(paths: &Paths, fill: FillRule) -> ExPolygons {
    let groups = execute_groups(
        ClipType::Union,
        paths.iter().map(|p| p.as_slice()),
        true,
        std::iter::empty(),
        fill,
    );
    polytree_to_expolygons(PolyTree::from_groups(groups))
}

// ============================================================================
// Morphological operators
// ============================================================================

/// Grow by `delta > 0` and merge.
pub fn expand<P: PathsProvider + ?Sized>(
    paths: &P,
    delta: f64,
    join: JoinType,
    miter_limit: f64,
) -> Polygons {
    debug_assert!(delta > 0.0, "expand requires a positive delta, got {}", delta);
    paths_to_polygons(union_paths(
        &raw_offset(paths, delta, join, miter_limit),
        FillRule::NonZero,
    ))
}

/// [`expand`] with hole nesting.
pub fn expand_ex<P: PathsProvider + ?Sized>(
    paths: &P,
    delta: f64,
    join: JoinType,
    miter_limit: f64,
) -> ExPolygons {
    debug_assert!(delta > 0.0, "expand requires a positive delta, got {}", delta);
    union_paths_ex(&raw_offset(paths, delta, join, miter_limit), FillRule::NonZero)
}

/// Shrink by `delta > 0` and merge.
///
/// Holes grow under a shrink and may reach past their shrunk contour. Only
/// positive winding is kept, so those parts never leak into the result.
pub fn shrink<P: PathsProvider + ?Sized>(
    paths: &P,
    delta: f64,
    join: JoinType,
    miter_limit: f64,
) -> Polygons {
    debug_assert!(delta > 0.0, "shrink requires a positive delta, got {}", delta);
    paths_to_polygons(union_paths(
        &raw_offset(paths, -delta, join, miter_limit),
        FillRule::Positive,
    ))
}

/// [`shrink`] with hole nesting.
pub fn shrink_ex<P: PathsProvider + ?Sized>(
    paths: &P,
    delta: f64,
    join: JoinType,
    miter_limit: f64,
) -> ExPolygons {
    debug_assert!(delta > 0.0, "shrink requires a positive delta, got {}", delta);
    union_paths_ex(&raw_offset(paths, -delta, join, miter_limit), FillRule::Positive)
}

/// Expand or shrink depending on the sign of `delta`.
///
/// A zero delta is a caller bug; release builds return the plain union.
pub fn offset<P: PathsProvider + ?Sized>(
    paths: &P,
    delta: f64,
    join: JoinType,
    miter_limit: f64,
) -> Polygons {
    debug_assert!(delta != 0.0, "offset by zero");
    if delta > 0.0 {
        expand(paths, delta, join, miter_limit)
    } else if delta < 0.0 {
        shrink(paths, -delta, join, miter_limit)
    } else {
        paths_to_polygons(execute_flat(
            ClipType::Union,
            paths.paths(),
            true,
            std::iter::empty(),
            FillRule::NonZero,
        ))
    }
}

/// [`offset`] with hole nesting.
pub fn offset_ex<P: PathsProvider + ?Sized>(
    paths: &P,
    delta: f64,
    join: JoinType,
    miter_limit: f64,
) -> ExPolygons {
    debug_assert!(delta != 0.0, "offset by zero");
    if delta > 0.0 {
        expand_ex(paths, delta, join, miter_limit)
    } else if delta < 0.0 {
        shrink_ex(paths, -delta, join, miter_limit)
    } else {
        let groups = execute_groups(
            ClipType::Union,
            paths.paths(),
            true,
            std::iter::empty(),
            FillRule::NonZero,
        );
        polytree_to_expolygons(PolyTree::from_groups(groups))
    }
}

/// Morphological closing: expand by `delta1`, then shrink by `delta2`.
/// Fills gaps and notches narrower than about twice the distance.
pub fn closing<P: PathsProvider + ?Sized>(
    paths: &P,
    delta1: f64,
    delta2: f64,
    join: JoinType,
    miter_limit: f64,
) -> Polygons {
    debug_assert!(delta1 > 0.0 && delta2 > 0.0);
    let grown = expand(paths, delta1, join, miter_limit);
    shrink(&grown, delta2, join, miter_limit)
}

/// Morphological opening: shrink by `delta1`, then expand by `delta2`.
/// Removes protrusions thinner than about twice the distance.
pub fn opening<P: PathsProvider + ?Sized>(
    paths: &P,
    delta1: f64,
    delta2: f64,
    join: JoinType,
    miter_limit: f64,
) -> Polygons {
    debug_assert!(delta1 > 0.0 && delta2 > 0.0);
    let shrunk = shrink(paths, delta1, join, miter_limit);
    expand(&shrunk, delta2, join, miter_limit)
}

/// Two successive offsets with independent signs.
pub fn offset2<P: PathsProvider + ?Sized>(
    paths: &P,
    delta1: f64,
    delta2: f64,
    join: JoinType,
    miter_limit: f64,
) -> Polygons {
    let first = offset(paths, delta1, join, miter_limit);
    offset(&first, delta2, join, miter_limit)
}

/// Closing on ExPolygons. Hole nesting is rebuilt between the two passes.
pub fn closing_ex(
    expolygons: &[ExPolygon],
    delta1: f64,
    delta2: f64,
    join: JoinType,
    miter_limit: f64,
) -> ExPolygons {
    debug_assert!(delta1 > 0.0 && delta2 > 0.0);
    offset2_ex(expolygons, delta1, -delta2, join, miter_limit)
}

/// Opening on ExPolygons. Hole nesting is rebuilt between the two passes.
pub fn opening_ex(
    expolygons: &[ExPolygon],
    delta1: f64,
    delta2: f64,
    join: JoinType,
    miter_limit: f64,
) -> ExPolygons {
    debug_assert!(delta1 > 0.0 && delta2 > 0.0);
    offset2_ex(expolygons, -delta1, delta2, join, miter_limit)
}

/// Two successive safe offsets on ExPolygons.
///
/// The intermediate result is turned back into ExPolygons so the second pass
/// still knows which paths are holes.
pub fn offset2_ex(
    expolygons: &[ExPolygon],
    delta1: f64,
    delta2: f64,
    join: JoinType,
    miter_limit: f64,
) -> ExPolygons {
    let first = offset_expolygons_ex(expolygons, delta1, join, miter_limit);
    offset_expolygons_ex(&first, delta2, join, miter_limit)
}

// ============================================================================
// Per-ExPolygon safe offset
// ============================================================================

/// Offset one ExPolygon, appending contour results then hole results to `out`.
///
/// The contour is offset by `delta`, each hole by `-delta` with its results
/// reversed, so holes stay clockwise for both signs. No difference is taken;
/// nesting is left to a later union. Returns the number of paths appended,
/// zero when the contour vanished.
///
/// Holes must not overlap each other or the contour.
pub fn offset_expolygon_inner(
    expolygon: &ExPolygon,
    delta: f64,
    join: JoinType,
    miter_limit: f64,
    out: &mut Paths,
) -> usize {
    let contours = offset_closed_path(expolygon.contour.points(), delta, join, miter_limit);
    if contours.is_empty() {
        return 0;
    }
    let start = out.len();
    out.extend(contours);
    for hole in &expolygon.holes {
        for mut path in offset_closed_path(hole.points(), -delta, join, miter_limit) {
            path.reverse();
            out.push(path);
        }
    }
    out.len() - start
}

/// Safe offset of a set of ExPolygons, as flat paths.
///
/// Results are merged only when growing and more than one ExPolygon
/// contributed; shrinking a non-overlapping set cannot make them touch.
pub fn expolygons_offset(
    expolygons: &[ExPolygon],
    delta: f64,
    join: JoinType,
    miter_limit: f64,
) -> Paths {
    let mut out = Vec::new();
    let mut contributors = 0;
    for expolygon in expolygons {
        if offset_expolygon_inner(expolygon, delta, join, miter_limit, &mut out) > 0 {
            contributors += 1;
        }
    }
    if contributors < expolygons.len() {
        log::debug!(
            "expolygons_offset: {} of {} expolygons vanished at delta {}",
            expolygons.len() - contributors,
            expolygons.len(),
            delta
        );
    }
    if contributors > 1 && delta > 0.0 {
        union_paths(&out, FillRule::Positive)
    } else {
        out
    }
}

/// Safe offset of a set of ExPolygons, flat.
pub fn offset_expolygons(
    expolygons: &[ExPolygon],
    delta: f64,
    join: JoinType,
    miter_limit: f64,
) -> Polygons {
    paths_to_polygons(expolygons_offset(expolygons, delta, join, miter_limit))
}

/// Safe offset of a set of ExPolygons with hole nesting rebuilt.
pub fn offset_expolygons_ex(
    expolygons: &[ExPolygon],
    delta: f64,
    join: JoinType,
    miter_limit: f64,
) -> ExPolygons {
    let paths = expolygons_offset(expolygons, delta, join, miter_limit);
    union_paths_ex(&paths, FillRule::Positive)
}

/// Offset contours and holes by the same literal delta.
///
/// Unlike [`offset_expolygons_ex`], holes move with the contour rather than
/// against it: under a negative delta both the contour and its holes shrink.
pub fn offset_ex_contour_only(
    expolygons: &[ExPolygon],
    delta: f64,
    join: JoinType,
    miter_limit: f64,
) -> ExPolygons {
    let mut paths = Vec::new();
    for expolygon in expolygons {
        let contours = offset_closed_path(expolygon.contour.points(), delta, join, miter_limit);
        if contours.is_empty() {
            continue;
        }
        paths.extend(contours);
        for hole in &expolygon.holes {
            for mut path in offset_closed_path(hole.points(), delta, join, miter_limit) {
                path.reverse();
                paths.push(path);
            }
        }
    }
    union_paths_ex(&paths, FillRule::Positive)
}

// ============================================================================
// Polyline offsets
// ============================================================================

/// Outline of a single polyline stroke.
pub fn offset_polyline(
    polyline: &Polyline,
    delta: f64,
    join: JoinType,
    miter_limit: f64,
    end: EndType,
) -> Polygons {
    offset_polylines(std::slice::from_ref(polyline), delta, join, miter_limit, end)
}

/// Merged outline of a set of polyline strokes.
pub fn offset_polylines(
    polylines: &[Polyline],
    delta: f64,
    join: JoinType,
    miter_limit: f64,
    end: EndType,
) -> Polygons {
    debug_assert!(delta > 0.0, "polyline offset requires a positive delta");
    let raw = raw_offset_polyline(polylines, delta, join, miter_limit, end);
    paths_to_polygons(union_paths(&raw, FillRule::NonZero))
}

/// Stroke polylines with the default line join and butt ends.
pub fn expand_polylines(polylines: &[Polyline], delta: f64) -> Polygons {
    offset_polylines(
        polylines,
        delta,
        DEFAULT_LINE_JOIN_TYPE,
        DEFAULT_LINE_MITER_LIMIT,
        EndType::OpenButt,
    )
}
