//! Clipper polygon boolean and offset operations.
//!
//! This module wraps the Clipper exact-integer polygon engine and builds the
//! operations the slicing pipeline relies on:
//! - Boolean set operations with a selectable fill rule ([`boolean`])
//! - Raw and morphological offsets, per-ExPolygon safe offsets ([`offset`])
//! - Contour tree reconstruction and traversal ([`polytree`])
//! - Variable-distance mitered offsets ([`variable_offset`])
//! - Recombination of clipped polylines ([`recombine`])
//!
//! Booleans go straight to `clipper-sys` because the fill rule has to be
//! chosen per call. Closed offsets go through `geo-clipper`; polyline strokes
//! are assembled from pieces and unioned by the engine.

pub mod alarm;
pub mod boolean;
pub mod bridge;
mod engine;
mod fragments;
pub mod offset;
pub mod polytree;
pub mod provider;
pub mod recombine;
mod stroke;
pub mod variable_offset;

pub use alarm::TimeLimitAlarm;
pub use boolean::{
    clip, clip_open, clip_tree, diff, diff_ex, diff_pl, diff_pl_closed, intersection,
    intersection_ex, intersection_pl, intersection_pl_closed, union, union_ex, union_ex_fill,
    union_fill, union_parallel_reduce, union_parallel_reduce_with, union_pt,
    union_pt_chained_outside_in, union_safety_offset, union_safety_offset_ex,
    union_safety_offset_with, xor, xor_ex,
};
pub use bridge::{Path, Paths};
pub use offset::{
    closing, closing_ex, expand, expand_ex, expand_polylines, expolygons_offset, offset, offset2,
    offset2_ex, offset_ex, offset_ex_contour_only, offset_expolygon_inner, offset_expolygons,
    offset_expolygons_ex, offset_polyline, offset_polylines, opening, opening_ex, raw_offset,
    raw_offset_polyline, raw_offset_with, shrink, shrink_ex,
};
pub use polytree::{
    count_expolygons, polytree_to_expolygons, polytree_to_polylines, traverse_pt, traverse_pt_ex,
    traverse_pt_outside_in, PolyNode, PolyTree, TraversalOrder,
};
pub use provider::{EmptyPathsProvider, PathsOwned, PathsProvider, SinglePathProvider};
pub use recombine::recombine_polylines;
pub use variable_offset::{
    mittered_offset_path_scaled, variable_offset_inner, variable_offset_inner_ex,
    variable_offset_outer, variable_offset_outer_ex,
};

use crate::Coord;

/// Margin the clip operand is grown by when a safety offset is requested.
pub const CLIPPER_SAFETY_OFFSET: Coord = 10;

/// Join type used by polygon offsets unless the caller says otherwise.
pub const DEFAULT_JOIN_TYPE: JoinType = JoinType::Miter;

/// Miter limit used with [`DEFAULT_JOIN_TYPE`].
pub const DEFAULT_MITER_LIMIT: f64 = 3.0;

/// Join type used when offsetting open polylines.
pub const DEFAULT_LINE_JOIN_TYPE: JoinType = JoinType::Square;

/// Miter limit used with [`DEFAULT_LINE_JOIN_TYPE`].
pub const DEFAULT_LINE_MITER_LIMIT: f64 = 0.0;

/// Edges shorter than this fraction of the largest delta are skipped by the
/// variable offset.
pub const VARIABLE_OFFSET_EDGE_RATIO: f64 = 0.005;

/// Boolean operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClipType {
    Union,
    Difference,
    Intersection,
    Xor,
}

/// Rule deciding which regions of a set of paths count as filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FillRule {
    /// Odd winding numbers are filled.
    EvenOdd,
    /// Non-zero winding numbers are filled.
    #[default]
    NonZero,
    /// Positive winding numbers are filled.
    Positive,
    /// Negative winding numbers are filled.
    Negative,
}

/// Corner treatment for offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JoinType {
    /// Squared-off corners.
    Square,
    /// Rounded corners. The miter limit argument is the arc tolerance.
    Round,
    /// Sharp corners, bevelled beyond the miter limit.
    Miter,
}

/// End treatment for offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EndType {
    /// Closed polygon, filled.
    #[default]
    ClosedPolygon,
    /// Closed path offset as a stroke.
    ClosedLine,
    /// Open path, ends cut flush.
    OpenButt,
    /// Open path, ends extended by the offset.
    OpenSquare,
    /// Open path, rounded ends.
    OpenRound,
}

impl EndType {
    #[inline]
    pub fn is_closed_polygon(&self) -> bool {
        matches!(self, EndType::ClosedPolygon)
    }
}

/// Whether to grow the clip operand by [`CLIPPER_SAFETY_OFFSET`] first.
///
/// Only meaningful for difference and intersection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ApplySafetyOffset {
    #[default]
    No,
    Yes,
}
