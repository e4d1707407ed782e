//! Boolean set operations over any [`PathsProvider`].
//!
//! Closed results come back flat (contours counter-clockwise, holes
//! clockwise) or as ExPolygons. Hierarchy is always extracted in two passes:
//! the requested operation produces a flat result, then a union of that result
//! recovers the nesting.

use super::bridge::{paths_to_polygons, paths_to_polylines, Paths};
use super::engine::{execute_flat, execute_groups};
use super::fragments::orient_fragments;
use super::offset::{expand, expand_ex, raw_offset};
use super::polytree::{polytree_to_expolygons, traverse_pt_outside_in, PolyTree};
use super::provider::{EmptyPathsProvider, PathsProvider};
use super::recombine::recombine_polylines;
use super::{
    ApplySafetyOffset, ClipType, FillRule, JoinType, CLIPPER_SAFETY_OFFSET, DEFAULT_JOIN_TYPE,
    DEFAULT_MITER_LIMIT,
};
use crate::config::ClipperConfig;
use crate::geometry::{ExPolygons, Point, Polygon, Polygons, Polyline, Polylines};
use crate::Coord;
use rayon::prelude::*;

// ============================================================================
// Core combinators
// ============================================================================

/// Grow the clip operand by `margin` and merge. Only difference and
/// intersection take a grown clip operand.
fn safety_offset<C: PathsProvider + ?Sized>(clip_type: ClipType, clip: &C, margin: Coord) -> Paths {
    debug_assert!(
        matches!(clip_type, ClipType::Difference | ClipType::Intersection),
        "safety offset with {:?}",
        clip_type
    );
    let grown = raw_offset(clip, margin as f64, JoinType::Miter, DEFAULT_MITER_LIMIT);
    execute_flat(
        ClipType::Union,
        grown.iter().map(|p| p.as_slice()),
        true,
        std::iter::empty(),
        FillRule::Positive,
    )
}

fn clip_with_margin<S, C>(
    clip_type: ClipType,
    subject: &S,
    clip: &C,
    fill: FillRule,
    margin: Option<Coord>,
) -> Paths
where
    S: PathsProvider + ?Sized,
    C: PathsProvider + ?Sized,
{
    log::trace!(
        "{:?}: {} subject paths, {} clip paths, fill {:?}, margin {:?}",
        clip_type,
        subject.size(),
        clip.size(),
        fill,
        margin
    );
    match margin {
        None => execute_flat(clip_type, subject.paths(), true, clip.paths(), fill),
        Some(margin) => {
            let grown = safety_offset(clip_type, clip, margin);
            execute_flat(
                clip_type,
                subject.paths(),
                true,
                grown.iter().map(|p| p.as_slice()),
                fill,
            )
        }
    }
}

fn margin_for(safety: ApplySafetyOffset) -> Option<Coord> {
    match safety {
        ApplySafetyOffset::No => None,
        ApplySafetyOffset::Yes => Some(CLIPPER_SAFETY_OFFSET),
    }
}

/// Run a boolean on closed paths and return the flat result.
pub fn clip<S, C>(
    clip_type: ClipType,
    subject: &S,
    clip: &C,
    fill: FillRule,
    safety: ApplySafetyOffset,
) -> Paths
where
    S: PathsProvider + ?Sized,
    C: PathsProvider + ?Sized,
{
    clip_with_margin(clip_type, subject, clip, fill, margin_for(safety))
}

/// Run a boolean on closed paths and return the contour tree.
///
/// The second pass always uses the non-zero rule: the flat result is already
/// free of overlaps, so its orientations are the only thing left to honour.
pub fn clip_tree<S, C>(
    clip_type: ClipType,
    subject: &S,
    clip: &C,
    fill: FillRule,
    safety: ApplySafetyOffset,
) -> PolyTree
where
    S: PathsProvider + ?Sized,
    C: PathsProvider + ?Sized,
{
    let flat = self::clip(clip_type, subject, clip, fill, safety);
    tree_from_flat(&flat)
}

fn tree_from_flat(flat: &Paths) -> PolyTree {
    let groups = execute_groups(
        ClipType::Union,
        flat.iter().map(|p| p.as_slice()),
        true,
        std::iter::empty(),
        FillRule::NonZero,
    );
    PolyTree::from_groups(groups)
}

/// Clip open paths against closed ones.
///
/// The engine may hand fragments back reversed; each fragment is turned to
/// run the same way as the subject path it was cut from.
pub fn clip_open<S, C>(clip_type: ClipType, subject: &S, clip: &C, safety: ApplySafetyOffset) -> Polylines
where
    S: PathsProvider + ?Sized,
    C: PathsProvider + ?Sized,
{
    let grown = margin_for(safety).map(|margin| safety_offset(clip_type, clip, margin));
    let sources: Vec<&[Point]> = subject.paths().collect();
    log::trace!(
        "{:?} (open): {} subject paths, {} clip paths, safety {:?}",
        clip_type,
        sources.len(),
        clip.size(),
        safety
    );
    let run = |subject: &[&[Point]]| match &grown {
        None => execute_flat(clip_type, subject.iter().copied(), false, clip.paths(), FillRule::NonZero),
        Some(grown) => execute_flat(
            clip_type,
            subject.iter().copied(),
            false,
            grown.iter().map(|p| p.as_slice()),
            FillRule::NonZero,
        ),
    };
    let fragments = run(&sources);
    let out = orient_fragments(&sources, fragments, |s| run(std::slice::from_ref(&sources[s])));
    paths_to_polylines(out)
}

// ============================================================================
// Union
// ============================================================================

/// Merge paths with the non-zero rule.
pub fn union<S: PathsProvider + ?Sized>(subject: &S) -> Polygons {
    union_fill(subject, FillRule::NonZero)
}

/// Merge paths with the given fill rule.
pub fn union_fill<S: PathsProvider + ?Sized>(subject: &S, fill: FillRule) -> Polygons {
    paths_to_polygons(clip(
        ClipType::Union,
        subject,
        &EmptyPathsProvider,
        fill,
        ApplySafetyOffset::No,
    ))
}

/// [`union`] as ExPolygons.
pub fn union_ex<S: PathsProvider + ?Sized>(subject: &S) -> ExPolygons {
    union_ex_fill(subject, FillRule::NonZero)
}

/// [`union_fill`] as ExPolygons.
pub fn union_ex_fill<S: PathsProvider + ?Sized>(subject: &S, fill: FillRule) -> ExPolygons {
    polytree_to_expolygons(union_pt_fill(subject, fill))
}

fn union_pt_fill<S: PathsProvider + ?Sized>(subject: &S, fill: FillRule) -> PolyTree {
    clip_tree(
        ClipType::Union,
        subject,
        &EmptyPathsProvider,
        fill,
        ApplySafetyOffset::No,
    )
}

/// Merge paths and keep the nesting.
pub fn union_pt<S: PathsProvider + ?Sized>(subject: &S) -> PolyTree {
    union_pt_fill(subject, FillRule::NonZero)
}

/// Merge paths and emit every contour counter-clockwise, ordered outside-in
/// for short travel between them.
pub fn union_pt_chained_outside_in<S: PathsProvider + ?Sized>(subject: &S) -> Polygons {
    traverse_pt_outside_in(union_pt(subject).into_children())
}

/// Grow by the safety offset and merge. Closes hairline gaps between
/// touching polygons.
pub fn union_safety_offset<S: PathsProvider + ?Sized>(subject: &S) -> Polygons {
    expand(
        subject,
        CLIPPER_SAFETY_OFFSET as f64,
        DEFAULT_JOIN_TYPE,
        DEFAULT_MITER_LIMIT,
    )
}

/// [`union_safety_offset`] as ExPolygons.
pub fn union_safety_offset_ex<S: PathsProvider + ?Sized>(subject: &S) -> ExPolygons {
    expand_ex(
        subject,
        CLIPPER_SAFETY_OFFSET as f64,
        DEFAULT_JOIN_TYPE,
        DEFAULT_MITER_LIMIT,
    )
}

/// [`union_safety_offset`] with the margin taken from `config`.
pub fn union_safety_offset_with<S: PathsProvider + ?Sized>(
    config: &ClipperConfig,
    subject: &S,
) -> Polygons {
    expand(
        subject,
        config.safety_offset as f64,
        DEFAULT_JOIN_TYPE,
        DEFAULT_MITER_LIMIT,
    )
}

/// Union a large set of polygons on the rayon pool.
pub fn union_parallel_reduce(polygons: &[Polygon]) -> Polygons {
    union_parallel_reduce_with(&ClipperConfig::default(), polygons)
}

/// Union a large set of polygons by merging contiguous chunks in parallel and
/// then merging the partial results pairwise.
///
/// Small inputs are merged on the calling thread.
pub fn union_parallel_reduce_with(config: &ClipperConfig, polygons: &[Polygon]) -> Polygons {
    if polygons.len() < config.parallel_union_min_polygons {
        return union(polygons);
    }
    let chunk_size = config.parallel_union_chunk_size.max(2);
    log::debug!(
        "union_parallel_reduce: {} polygons in chunks of {}",
        polygons.len(),
        chunk_size
    );
    polygons
        .par_chunks(chunk_size)
        .map(|chunk| union(chunk))
        .reduce(Vec::new, |a, b| {
            if a.is_empty() {
                b
            } else if b.is_empty() {
                a
            } else {
                let mut merged = a;
                merged.extend(b);
                union(&merged)
            }
        })
}

// ============================================================================
// Difference, intersection, xor
// ============================================================================

/// Subject minus clip.
pub fn diff<S, C>(subject: &S, clip: &C, safety: ApplySafetyOffset) -> Polygons
where
    S: PathsProvider + ?Sized,
    C: PathsProvider + ?Sized,
{
    paths_to_polygons(self::clip(
        ClipType::Difference,
        subject,
        clip,
        FillRule::NonZero,
        safety,
    ))
}

/// Subject minus clip, with holes.
pub fn diff_ex<S, C>(subject: &S, clip: &C, safety: ApplySafetyOffset) -> ExPolygons
where
    S: PathsProvider + ?Sized,
    C: PathsProvider + ?Sized,
{
    polytree_to_expolygons(clip_tree(
        ClipType::Difference,
        subject,
        clip,
        FillRule::NonZero,
        safety,
    ))
}

/// Parts of open paths outside the clip region.
pub fn diff_pl<S, C>(subject: &S, clip: &C, safety: ApplySafetyOffset) -> Polylines
where
    S: PathsProvider + ?Sized,
    C: PathsProvider + ?Sized,
{
    clip_open(ClipType::Difference, subject, clip, safety)
}

/// Parts of polygon outlines outside the clip region.
///
/// Each polygon is opened at its first point; fragments split at that point
/// are joined back together.
pub fn diff_pl_closed<C: PathsProvider + ?Sized>(
    subject: &[Polygon],
    clip: &C,
    safety: ApplySafetyOffset,
) -> Polylines {
    let opened: Polylines = subject.iter().map(Polyline::from_polygon).collect();
    let mut out = clip_open(ClipType::Difference, &opened, clip, safety);
    recombine_polylines(&mut out);
    out
}

/// Area common to subject and clip.
pub fn intersection<S, C>(subject: &S, clip: &C, safety: ApplySafetyOffset) -> Polygons
where
    S: PathsProvider + ?Sized,
    C: PathsProvider + ?Sized,
{
    paths_to_polygons(self::clip(
        ClipType::Intersection,
        subject,
        clip,
        FillRule::NonZero,
        safety,
    ))
}

/// Area common to subject and clip, with holes.
pub fn intersection_ex<S, C>(subject: &S, clip: &C, safety: ApplySafetyOffset) -> ExPolygons
where
    S: PathsProvider + ?Sized,
    C: PathsProvider + ?Sized,
{
    polytree_to_expolygons(clip_tree(
        ClipType::Intersection,
        subject,
        clip,
        FillRule::NonZero,
        safety,
    ))
}

/// Parts of open paths inside the clip region.
pub fn intersection_pl<S, C>(subject: &S, clip: &C, safety: ApplySafetyOffset) -> Polylines
where
    S: PathsProvider + ?Sized,
    C: PathsProvider + ?Sized,
{
    clip_open(ClipType::Intersection, subject, clip, safety)
}

/// Parts of polygon outlines inside the clip region.
pub fn intersection_pl_closed<C: PathsProvider + ?Sized>(
    subject: &[Polygon],
    clip: &C,
    safety: ApplySafetyOffset,
) -> Polylines {
    let opened: Polylines = subject.iter().map(Polyline::from_polygon).collect();
    let mut out = clip_open(ClipType::Intersection, &opened, clip, safety);
    recombine_polylines(&mut out);
    out
}

/// Area covered by exactly one of subject and clip. Takes no safety offset.
pub fn xor<S, C>(subject: &S, clip: &C) -> Polygons
where
    S: PathsProvider + ?Sized,
    C: PathsProvider + ?Sized,
{
    paths_to_polygons(self::clip(
        ClipType::Xor,
        subject,
        clip,
        FillRule::NonZero,
        ApplySafetyOffset::No,
    ))
}

/// [`xor`] as ExPolygons.
pub fn xor_ex<S, C>(subject: &S, clip: &C) -> ExPolygons
where
    S: PathsProvider + ?Sized,
    C: PathsProvider + ?Sized,
{
    polytree_to_expolygons(clip_tree(
        ClipType::Xor,
        subject,
        clip,
        FillRule::NonZero,
        ApplySafetyOffset::No,
    ))
}
