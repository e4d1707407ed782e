//! Read-only path sources for the boolean and offset operations.
//!
//! Every operation in this module tree is written once against
//! [`PathsProvider`] and accepts any of the container shapes the slicer uses.
//! Borrowed sources are iterated in place; only [`PathsOwned`] holds its own
//! storage, for results moved in from a previous step.

use super::bridge::{Path, Paths};
use crate::geometry::{ExPolygon, Point, Polygon, Polyline, Surface};

/// A forward-only sequence of paths.
pub trait PathsProvider {
    /// Iterate over the paths in order.
    fn paths(&self) -> impl Iterator<Item = &[Point]> + '_;

    /// Number of paths the iterator yields.
    fn size(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.size() == 0
    }
}

/// A provider with no paths, for operations without a clip operand.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyPathsProvider;

impl PathsProvider for EmptyPathsProvider {
    fn paths(&self) -> impl Iterator<Item = &[Point]> + '_ {
        std::iter::empty()
    }

    fn size(&self) -> usize {
        0
    }
}

/// A single borrowed path.
#[derive(Debug, Clone, Copy)]
pub struct SinglePathProvider<'a>(pub &'a [Point]);

impl PathsProvider for SinglePathProvider<'_> {
    fn paths(&self) -> impl Iterator<Item = &[Point]> + '_ {
        std::iter::once(self.0)
    }

    fn size(&self) -> usize {
        1
    }
}

/// Paths moved in from an intermediate result.
#[derive(Debug, Clone, Default)]
pub struct PathsOwned(pub Paths);

impl PathsOwned {
    pub fn into_inner(self) -> Paths {
        self.0
    }
}

impl From<Paths> for PathsOwned {
    fn from(paths: Paths) -> Self {
        Self(paths)
    }
}

impl From<Vec<Polygon>> for PathsOwned {
    fn from(polygons: Vec<Polygon>) -> Self {
        Self(polygons.into_iter().map(Polygon::into_points).collect())
    }
}

impl PathsProvider for PathsOwned {
    fn paths(&self) -> impl Iterator<Item = &[Point]> + '_ {
        self.0.iter().map(|p| p.as_slice())
    }

    fn size(&self) -> usize {
        self.0.len()
    }
}

impl PathsProvider for [Path] {
    fn paths(&self) -> impl Iterator<Item = &[Point]> + '_ {
        self.iter().map(|p| p.as_slice())
    }

    fn size(&self) -> usize {
        self.len()
    }
}

impl PathsProvider for Vec<Path> {
    fn paths(&self) -> impl Iterator<Item = &[Point]> + '_ {
        self.as_slice().paths()
    }

    fn size(&self) -> usize {
        self.len()
    }
}

impl PathsProvider for Polygon {
    fn paths(&self) -> impl Iterator<Item = &[Point]> + '_ {
        std::iter::once(self.points())
    }

    fn size(&self) -> usize {
        1
    }
}

impl PathsProvider for [Polygon] {
    fn paths(&self) -> impl Iterator<Item = &[Point]> + '_ {
        self.iter().map(|p| p.points())
    }

    fn size(&self) -> usize {
        self.len()
    }
}

impl PathsProvider for Vec<Polygon> {
    fn paths(&self) -> impl Iterator<Item = &[Point]> + '_ {
        self.as_slice().paths()
    }

    fn size(&self) -> usize {
        self.len()
    }
}

impl PathsProvider for ExPolygon {
    fn paths(&self) -> impl Iterator<Item = &[Point]> + '_ {
        std::iter::once(self.contour.points()).chain(self.holes.iter().map(|h| h.points()))
    }

    fn size(&self) -> usize {
        self.num_paths()
    }
}

impl PathsProvider for [ExPolygon] {
    fn paths(&self) -> impl Iterator<Item = &[Point]> + '_ {
        self.iter().flat_map(|ex| ex.paths())
    }

    fn size(&self) -> usize {
        self.iter().map(|ex| ex.num_paths()).sum()
    }
}

impl PathsProvider for Vec<ExPolygon> {
    fn paths(&self) -> impl Iterator<Item = &[Point]> + '_ {
        self.as_slice().paths()
    }

    fn size(&self) -> usize {
        self.as_slice().size()
    }
}

impl PathsProvider for [Surface] {
    fn paths(&self) -> impl Iterator<Item = &[Point]> + '_ {
        self.iter().flat_map(|s| s.expolygon.paths())
    }

    fn size(&self) -> usize {
        self.iter().map(|s| s.expolygon.num_paths()).sum()
    }
}

impl PathsProvider for Vec<Surface> {
    fn paths(&self) -> impl Iterator<Item = &[Point]> + '_ {
        self.as_slice().paths()
    }

    fn size(&self) -> usize {
        self.as_slice().size()
    }
}

impl PathsProvider for [Polyline] {
    fn paths(&self) -> impl Iterator<Item = &[Point]> + '_ {
        self.iter().map(|p| p.points())
    }

    fn size(&self) -> usize {
        self.len()
    }
}

impl PathsProvider for Vec<Polyline> {
    fn paths(&self) -> impl Iterator<Item = &[Point]> + '_ {
        self.as_slice().paths()
    }

    fn size(&self) -> usize {
        self.len()
    }
}
