//! Matching clipped open fragments back to the polylines they came from.
//!
//! The engine does not keep the direction of open paths, and it does not say
//! which subject a fragment belongs to. A fragment is matched through the
//! source edges covering its first segment, found in a grid hash over all
//! source edges. When fragments of several sources cannot be told apart
//! (collinear sources running opposite ways), those sources are clipped
//! again one at a time.

use super::bridge::{Path, Paths};
use crate::geometry::{Line, Point};
use crate::Coord;
use rustc_hash::FxHashMap;

/// Distance within which a fragment counts as lying on a source edge.
pub(super) const SOURCE_TOLERANCE: Coord = 2;

/// Grid hash of the edges of a set of open paths.
struct EdgeIndex<'a> {
    sources: &'a [&'a [Point]],
    cell_size: f64,
    grid: FxHashMap<(i64, i64), Vec<(usize, usize)>>,
}

impl<'a> EdgeIndex<'a> {
    fn new(sources: &'a [&'a [Point]]) -> Self {
        let cell_size = Self::pick_cell_size(sources);
        let mut index = Self {
            sources,
            cell_size,
            grid: FxHashMap::default(),
        };
        for (s, source) in sources.iter().enumerate() {
            for e in 0..source.len().saturating_sub(1) {
                index.insert(s, e);
            }
        }
        index
    }

    /// Cells small enough to separate dense parallel edges, large enough that
    /// the total number of cell entries stays linear in the edge count.
    fn pick_cell_size(sources: &[&[Point]]) -> f64 {
        let mut edges = 0usize;
        let mut length = 0.0;
        let (mut min, mut max) = (Point::new(Coord::MAX, Coord::MAX), Point::new(Coord::MIN, Coord::MIN));
        for source in sources {
            for w in source.windows(2) {
                edges += 1;
                length += w[0].distance(&w[1]);
            }
            for p in source.iter() {
                min = Point::new(min.x.min(p.x), min.y.min(p.y));
                max = Point::new(max.x.max(p.x), max.y.max(p.y));
            }
        }
        let floor = 16.0 * SOURCE_TOLERANCE as f64;
        if edges == 0 {
            return floor;
        }
        let area = (max.x - min.x) as f64 * (max.y - min.y) as f64;
        (area / edges as f64)
            .sqrt()
            .max(length / (4.0 * edges as f64))
            .max(floor)
    }

    fn cell_of(&self, x: f64, y: f64) -> (i64, i64) {
        (
            (x / self.cell_size).floor() as i64,
            (y / self.cell_size).floor() as i64,
        )
    }

    /// Register edge `e` of source `s` in every cell it passes, sampled at
    /// half a cell.
    fn insert(&mut self, s: usize, e: usize) {
        let a = self.sources[s][e].to_f64();
        let b = self.sources[s][e + 1].to_f64();
        let steps = ((b - a).length() / (0.5 * self.cell_size)).ceil().max(1.0) as usize;
        let mut last = None;
        for k in 0..=steps {
            let p = a + (b - a) * (k as f64 / steps as f64);
            let cell = self.cell_of(p.x, p.y);
            if last != Some(cell) {
                self.grid.entry(cell).or_default().push((s, e));
                last = Some(cell);
            }
        }
    }

    /// Sources with an edge covering segment `a`-`b`, with whether that edge
    /// runs against it. One entry per source.
    fn covering(&self, a: Point, b: Point) -> Vec<(usize, bool)> {
        let mid = (a.to_f64() + b.to_f64()) * 0.5;
        let (cx, cy) = self.cell_of(mid.x, mid.y);
        let dir = b - a;
        let mut out: Vec<(usize, bool)> = Vec::new();
        for dx in -1..=1 {
            for dy in -1..=1 {
                let Some(entries) = self.grid.get(&(cx + dx, cy + dy)) else {
                    continue;
                };
                for &(s, e) in entries {
                    if out.iter().any(|&(seen, _)| seen == s) {
                        continue;
                    }
                    let edge = Line::new(self.sources[s][e], self.sources[s][e + 1]);
                    if edge.contains_point(&a, SOURCE_TOLERANCE)
                        && edge.contains_point(&b, SOURCE_TOLERANCE)
                    {
                        out.push((s, edge.direction().dot(&dir) < 0));
                    }
                }
            }
        }
        out
    }
}

/// True when `fragment` runs against the edge of `source` under its first
/// segment.
fn reversed_against(source: &[Point], fragment: &[Point]) -> bool {
    let [a, b, ..] = fragment else {
        return false;
    };
    let dir = *b - *a;
    source
        .windows(2)
        .map(|w| Line::new(w[0], w[1]))
        .find(|edge| {
            edge.contains_point(a, SOURCE_TOLERANCE) && edge.contains_point(b, SOURCE_TOLERANCE)
        })
        .is_some_and(|edge| edge.direction().dot(&dir) < 0)
}

fn find(parent: &mut [usize], mut i: usize) -> usize {
    while parent[i] != i {
        parent[i] = parent[parent[i]];
        i = parent[i];
    }
    i
}

/// Turn every fragment to run the way its source does.
///
/// `reclip(s)` must clip source `s` alone with the same operation that
/// produced `fragments`. It is only called for sources whose fragments are
/// ambiguous.
pub(super) fn orient_fragments(
    sources: &[&[Point]],
    fragments: Paths,
    mut reclip: impl FnMut(usize) -> Paths,
) -> Paths {
    if fragments.is_empty() {
        return fragments;
    }
    let index = EdgeIndex::new(sources);
    let matches: Vec<Vec<(usize, bool)>> = fragments
        .iter()
        .map(|f| match f.as_slice() {
            [a, b, ..] => index.covering(*a, *b),
            _ => Vec::new(),
        })
        .collect();

    // Sources sharing a fragment end up in one set; a set is ambiguous when
    // its members disagree on some fragment's direction.
    let mut parent: Vec<usize> = (0..sources.len()).collect();
    let mut disputed = Vec::new();
    for m in &matches {
        if let Some(&(first, dir)) = m.first() {
            for &(s, _) in &m[1..] {
                let (ra, rb) = (find(&mut parent, first), find(&mut parent, s));
                parent[rb] = ra;
            }
            if m.iter().any(|&(_, d)| d != dir) {
                disputed.push(first);
            }
        }
    }
    let mut ambiguous = vec![false; sources.len()];
    for s in disputed {
        let root = find(&mut parent, s);
        ambiguous[root] = true;
    }
    let mut in_ambiguous_set = |s: usize| {
        let root = find(&mut parent, s);
        ambiguous[root]
    };

    let mut out = Vec::with_capacity(fragments.len());
    for (mut fragment, m) in fragments.into_iter().zip(matches) {
        match m.first() {
            None => out.push(fragment),
            Some(&(s, reversed)) => {
                if in_ambiguous_set(s) {
                    continue;
                }
                if reversed {
                    fragment.reverse();
                }
                out.push(fragment);
            }
        }
    }

    let redo: Vec<usize> = (0..sources.len()).filter(|&s| in_ambiguous_set(s)).collect();
    if !redo.is_empty() {
        log::debug!(
            "orient_fragments: {} of {} sources clipped again one at a time",
            redo.len(),
            sources.len()
        );
    }
    for s in redo {
        for mut fragment in reclip(s) {
            if reversed_against(sources[s], &fragment) {
                fragment.reverse();
            }
            out.push(fragment);
        }
    }
    out
}
