//! Greedy nearest-neighbour ordering of anchor points.
//!
//! Used to order sibling contours so that consecutive ones are close to each
//! other, which keeps travel moves short.

use super::Point;

/// Order `anchors` by greedy nearest-neighbour chaining.
///
/// Starts from the anchor closest to `start`, or from the first anchor when no
/// start point is given. Returns a permutation of `0..anchors.len()`.
/// Ties are broken by the lower original index, so the result is deterministic.
pub fn chain_points(anchors: &[Point], start: Option<Point>) -> Vec<usize> {
    let n = anchors.len();
    let mut order = Vec::with_capacity(n);
    if n == 0 {
        return order;
    }

    let mut visited = vec![false; n];
    let mut current = match start {
        Some(p) => p,
        None => anchors[0],
    };

    for _ in 0..n {
        let mut best: Option<(usize, i128)> = None;
        for (i, anchor) in anchors.iter().enumerate() {
            if visited[i] {
                continue;
            }
            let dist = current.distance_squared(anchor);
            // Strict comparison keeps the lowest index on ties.
            if best.map_or(true, |(_, d)| dist < d) {
                best = Some((i, dist));
            }
        }
        // The loop runs exactly n times, so an unvisited anchor always exists.
        if let Some((idx, _)) = best {
            visited[idx] = true;
            order.push(idx);
            current = anchors[idx];
        }
    }
    order
}
