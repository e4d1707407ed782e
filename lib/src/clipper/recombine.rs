//! Stitching of polylines split by clipping.

use crate::geometry::{Polyline, Polylines};
use std::mem;

/// Join polylines that share endpoints, in place.
///
/// Passes over all pairs repeat until one makes no merge, so chains of any
/// length collapse regardless of input order. The shorter polyline of a pair
/// is spliced into the longer one, reversed if needed, and left empty; empties
/// are removed once at the end. Endpoints must be exactly equal to match.
pub fn recombine_polylines(polylines: &mut Polylines) {
    let mut passes = 0usize;
    loop {
        passes += 1;
        let mut merged = false;
        for i in 0..polylines.len() {
            for j in (i + 1)..polylines.len() {
                if polylines[i].is_empty() || polylines[j].is_empty() {
                    continue;
                }
                if merge_pair(polylines, i, j) {
                    merged = true;
                }
            }
        }
        if !merged {
            break;
        }
    }
    let before = polylines.len();
    polylines.retain(|p| !p.is_empty());
    log::trace!(
        "recombine_polylines: {} -> {} polylines in {} passes",
        before,
        polylines.len(),
        passes
    );
}

/// Try to join `polylines[i]` and `polylines[j]`. The result stays in the
/// slot of the longer one.
fn merge_pair(polylines: &mut [Polyline], i: usize, j: usize) -> bool {
    let (long, short) = if polylines[j].len() > polylines[i].len() {
        (j, i)
    } else {
        (i, j)
    };
    let (l_first, l_last) = match (polylines[long].first(), polylines[long].last()) {
        (Some(f), Some(l)) => (*f, *l),
        _ => return false,
    };
    let (s_first, s_last) = match (polylines[short].first(), polylines[short].last()) {
        (Some(f), Some(l)) => (*f, *l),
        _ => return false,
    };

    if l_last == s_first {
        let s = mem::take(&mut polylines[short]);
        polylines[long].append(s.points());
    } else if l_first == s_last {
        let mut s = mem::take(&mut polylines[short]);
        s.append(polylines[long].points());
        polylines[long] = s;
    } else if l_last == s_last {
        let mut s = mem::take(&mut polylines[short]);
        s.reverse();
        polylines[long].append(s.points());
    } else if l_first == s_first {
        let mut s = mem::take(&mut polylines[short]);
        s.reverse();
        s.append(polylines[long].points());
        polylines[long] = s;
    } else {
        return false;
    }
    true
}
