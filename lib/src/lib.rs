//! # Slicer Clipper
//!
//! Polygon clipping and offsetting layer of the slicer.
//!
//! This library wraps an exact-integer polygon clipping engine (Clipper) and
//! builds the geometry operations the slicing pipeline relies on:
//! - Boolean set operations (union, difference, intersection, xor) over
//!   polygons, polygons with holes and surfaces
//! - Morphological expand / shrink / opening / closing / offset2
//! - Per-ExPolygon safe offsetting that keeps hole nesting intact
//! - Contour tree (PolyTree) reconstruction and traversal
//! - Variable-distance mitered offsets
//! - Recombination of polylines split by clipping
//!
//! ## Example
//!
//! ```rust,ignore
//! use slicer_clipper::clipper::{expand, DEFAULT_JOIN_TYPE, DEFAULT_MITER_LIMIT};
//! use slicer_clipper::{Point, Polygon};
//!
//! let square = Polygon::rectangle(Point::new(0, 0), Point::new(100, 100));
//! let grown = expand(&square, 10.0, DEFAULT_JOIN_TYPE, DEFAULT_MITER_LIMIT);
//! ```

pub mod clipper;
pub mod config;
pub mod geometry;

pub use config::ClipperConfig;
pub use geometry::{
    BoundingBox, ExPolygon, ExPolygons, Line, Point, PointF, Points, Polygon, Polygons, Polyline,
    Polylines, Surface, SurfaceType, Surfaces,
};

// Re-export clipper operations
pub use clipper::{
    closing, closing_ex, diff, diff_ex, diff_pl, expand, expand_ex, intersection,
    intersection_ex, intersection_pl, offset, offset2, offset2_ex, offset_ex, opening,
    opening_ex, shrink, shrink_ex, union, union_ex, xor, xor_ex, ApplySafetyOffset, ClipType,
    EndType, FillRule, JoinType, PathsProvider, PolyNode, PolyTree,
};

/// Coordinate type used throughout the slicer.
/// Using i64 for integer coordinates (scaled by SCALING_FACTOR) to avoid floating-point issues.
pub type Coord = i64;

/// Floating-point coordinate type for unscaled values.
pub type CoordF = f64;

/// Scaling factor: coordinates are stored as integers scaled by this factor.
/// 1 unit = 1 nanometer, so 1mm = 1_000_000 units.
pub const SCALING_FACTOR: f64 = 1_000_000.0;

/// Scale a floating-point coordinate to integer.
#[inline]
pub fn scale(v: CoordF) -> Coord {
    (v * SCALING_FACTOR).round() as Coord
}

/// Unscale an integer coordinate to floating-point.
#[inline]
pub fn unscale(v: Coord) -> CoordF {
    v as CoordF / SCALING_FACTOR
}

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the clipping layer.
///
/// The geometry operations themselves never fail; contract violations are
/// debug assertions. Errors only come from explicit validation.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid geometry: {0}")]
    Geometry(String),
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
