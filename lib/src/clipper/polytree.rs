//! Contour trees.
//!
//! A [`PolyTree`] is the nested form of a boolean result: outer contours own
//! their holes, holes own the islands inside them. The hole flag on each node
//! is authoritative. Nothing in this module re-derives it from signed area,
//! because after an offset the two can disagree.
//!
//! Trees own their nodes and are not `Clone`. Functions that consume a tree
//! take it by value.

use super::bridge::{Path, Paths};
use crate::geometry::shortest_path::chain_points;
use crate::geometry::{
    point_in_path, point_on_path, signed_area2, BoundingBox, ExPolygon, ExPolygons, Point,
    Polygon, Polygons, Polyline, Polylines,
};

/// A node of a contour tree.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct PolyNode {
    pub contour: Path,
    pub is_hole: bool,
    pub is_open: bool,
    pub children: Vec<PolyNode>,
}

impl PolyNode {
    pub fn new(contour: Path, is_hole: bool) -> Self {
        Self {
            contour,
            is_hole,
            is_open: false,
            children: Vec::new(),
        }
    }

    /// Number of nodes in this subtree, this one included.
    pub fn total(&self) -> usize {
        1 + self.children.iter().map(PolyNode::total).sum::<usize>()
    }

    fn anchor(&self) -> Point {
        self.contour.first().copied().unwrap_or_default()
    }
}

/// Root of a contour tree.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct PolyTree {
    children: Vec<PolyNode>,
}

impl PolyTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_nodes(children: Vec<PolyNode>) -> Self {
        Self { children }
    }

    /// Build a tree from engine output groups.
    ///
    /// Each group is an outer contour followed by its holes. A group whose
    /// outer contour lies inside a hole of another group becomes a child of
    /// the smallest such hole.
    pub fn from_groups(groups: Vec<Paths>) -> Self {
        let groups: Vec<Paths> = groups.into_iter().filter(|g| !g.is_empty()).collect();
        if groups.is_empty() {
            return Self::new();
        }

        struct HoleRef {
            group: usize,
            hole: usize,
            bbox: BoundingBox,
            area: i128,
        }

        let holes: Vec<HoleRef> = groups
            .iter()
            .enumerate()
            .flat_map(|(gi, g)| {
                g.iter().enumerate().skip(1).map(move |(hi, h)| HoleRef {
                    group: gi,
                    hole: hi,
                    bbox: BoundingBox::from_points(h),
                    area: signed_area2(h).abs(),
                })
            })
            .collect();

        // Smallest hole (of another group) containing each group's outer contour.
        let mut attached: Vec<Vec<Vec<usize>>> =
            groups.iter().map(|g| vec![Vec::new(); g.len()]).collect();
        let mut top_level = Vec::new();
        for (gi, group) in groups.iter().enumerate() {
            let outer = &group[0];
            let outer_bbox = BoundingBox::from_points(outer);
            let mut best: Option<&HoleRef> = None;
            for hole in holes.iter() {
                if hole.group == gi || !hole.bbox.contains(&outer_bbox) {
                    continue;
                }
                if best.map_or(false, |b| b.area <= hole.area) {
                    continue;
                }
                let hole_path = &groups[hole.group][hole.hole];
                let inside = outer
                    .iter()
                    .find(|p| !point_on_path(hole_path, p, 0))
                    .map_or(false, |p| point_in_path(hole_path, p));
                if inside {
                    best = Some(hole);
                }
            }
            match best {
                Some(h) => attached[h.group][h.hole].push(gi),
                None => top_level.push(gi),
            }
        }

        let mut slots: Vec<Option<Paths>> = groups.into_iter().map(Some).collect();
        let children = top_level
            .into_iter()
            .filter_map(|gi| build_node(gi, &mut slots, &attached))
            .collect();
        Self { children }
    }

    /// A flat tree of open paths.
    pub fn from_open_paths(paths: Paths) -> Self {
        let children = paths
            .into_iter()
            .filter(|p| !p.is_empty())
            .map(|contour| PolyNode {
                contour,
                is_hole: false,
                is_open: true,
                children: Vec::new(),
            })
            .collect();
        Self { children }
    }

    pub fn children(&self) -> &[PolyNode] {
        &self.children
    }

    pub fn into_children(self) -> Vec<PolyNode> {
        self.children
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Total number of nodes in the tree.
    pub fn total(&self) -> usize {
        self.children.iter().map(PolyNode::total).sum()
    }
}

fn build_node(
    group: usize,
    slots: &mut [Option<Paths>],
    attached: &[Vec<Vec<usize>>],
) -> Option<PolyNode> {
    let paths = slots[group].take()?;
    let mut paths = paths.into_iter();
    let mut node = PolyNode::new(paths.next()?, false);
    for (hi, hole_path) in paths.enumerate() {
        let mut hole = PolyNode::new(hole_path, true);
        hole.children = attached[group][hi + 1]
            .iter()
            .filter_map(|&child| build_node(child, slots, attached))
            .collect();
        node.children.push(hole);
    }
    Some(node)
}

// ============================================================================
// Tree to ExPolygons / Polylines
// ============================================================================

fn count_in(nodes: &[PolyNode]) -> usize {
    nodes
        .iter()
        .map(|node| {
            if node.is_hole {
                count_in(&node.children)
            } else {
                1 + node
                    .children
                    .iter()
                    .map(|child| {
                        if child.is_hole {
                            count_in(&child.children)
                        } else {
                            count_in(std::slice::from_ref(child))
                        }
                    })
                    .sum::<usize>()
            }
        })
        .sum()
}

/// Number of ExPolygons [`polytree_to_expolygons`] will produce.
pub fn count_expolygons(tree: &PolyTree) -> usize {
    count_in(&tree.children)
}

fn collect_expolygons(nodes: Vec<PolyNode>, out: &mut ExPolygons) {
    for node in nodes {
        if node.is_hole {
            collect_expolygons(node.children, out);
            continue;
        }
        let mut holes = Vec::with_capacity(node.children.len());
        let mut nested = Vec::new();
        for child in node.children {
            if child.is_hole {
                holes.push(Polygon::from_points(child.contour));
                nested.push(child.children);
            } else {
                nested.push(vec![child]);
            }
        }
        out.push(ExPolygon::with_holes(Polygon::from_points(node.contour), holes));
        for group in nested {
            collect_expolygons(group, out);
        }
    }
}

/// Convert a contour tree into ExPolygons, consuming it.
///
/// Islands inside holes become ExPolygons of their own. Orientation is taken
/// from the tree as is.
pub fn polytree_to_expolygons(tree: PolyTree) -> ExPolygons {
    let mut out = Vec::with_capacity(count_expolygons(&tree));
    collect_expolygons(tree.children, &mut out);
    out
}

fn collect_polylines(nodes: Vec<PolyNode>, out: &mut Polylines) {
    for node in nodes {
        if !node.contour.is_empty() {
            out.push(Polyline::from_points(node.contour));
        }
        collect_polylines(node.children, out);
    }
}

/// Flatten every node's path into polylines, in pre-order.
pub fn polytree_to_polylines(tree: PolyTree) -> Polylines {
    let mut out = Vec::with_capacity(tree.total());
    collect_polylines(tree.children, &mut out);
    out
}

// ============================================================================
// Traversal
// ============================================================================

/// Visiting order for sibling nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TraversalOrder {
    /// Keep the tree's order.
    #[default]
    Unordered,
    /// Chain siblings by nearest first point.
    Chained,
}

/// Sibling visiting order. Chaining starts from `from`, the anchor of the
/// contour emitted last, or from the first sibling when nothing was emitted.
fn sibling_order(nodes: &[PolyNode], order: TraversalOrder, from: Option<Point>) -> Vec<usize> {
    match order {
        TraversalOrder::Unordered => (0..nodes.len()).collect(),
        TraversalOrder::Chained => {
            let anchors: Vec<Point> = nodes.iter().map(PolyNode::anchor).collect();
            chain_points(&anchors, from)
        }
    }
}

fn traverse_into(nodes: &[PolyNode], order: TraversalOrder, last: &mut Option<Point>, out: &mut Polygons) {
    for idx in sibling_order(nodes, order, *last) {
        let node = &nodes[idx];
        out.push(Polygon::from_points(node.contour.clone()));
        *last = Some(node.anchor());
        traverse_into(&node.children, order, last, out);
    }
}

/// Emit every node's contour as a polygon, depth first.
pub fn traverse_pt(nodes: &[PolyNode], order: TraversalOrder) -> Polygons {
    let mut out = Vec::new();
    traverse_into(nodes, order, &mut None, &mut out);
    out
}

fn traverse_ex_into(nodes: &[PolyNode], last: &mut Option<Point>, out: &mut ExPolygons) {
    for idx in sibling_order(nodes, TraversalOrder::Chained, *last) {
        let node = &nodes[idx];
        if node.is_hole {
            traverse_ex_into(&node.children, last, out);
            continue;
        }
        let holes = node
            .children
            .iter()
            .filter(|c| c.is_hole)
            .map(|c| Polygon::from_points(c.contour.clone()))
            .collect();
        out.push(ExPolygon::with_holes(
            Polygon::from_points(node.contour.clone()),
            holes,
        ));
        *last = Some(node.anchor());
        for child in &node.children {
            if child.is_hole {
                traverse_ex_into(&child.children, last, out);
            } else {
                traverse_ex_into(std::slice::from_ref(child), last, out);
            }
        }
    }
}

/// Emit ExPolygons with siblings chained by nearest first point.
pub fn traverse_pt_ex(nodes: &[PolyNode]) -> ExPolygons {
    let mut out = Vec::new();
    traverse_ex_into(nodes, &mut None, &mut out);
    out
}

fn outside_in_into(nodes: Vec<PolyNode>, last: &mut Option<Point>, out: &mut Polygons) {
    let order = sibling_order(&nodes, TraversalOrder::Chained, *last);
    let mut slots: Vec<Option<PolyNode>> = nodes.into_iter().map(Some).collect();
    for idx in order {
        let Some(node) = slots[idx].take() else {
            continue;
        };
        *last = Some(node.anchor());
        let mut polygon = Polygon::from_points(node.contour);
        if node.is_hole {
            polygon.reverse();
        }
        out.push(polygon);
        outside_in_into(node.children, last, out);
    }
}

/// Emit all contours outside-in, holes turned counter-clockwise.
///
/// Siblings at every level are chained by nearest first point, starting from
/// the contour emitted just before them. Use this when the tree only serves
/// to order the contours.
pub fn traverse_pt_outside_in(nodes: Vec<PolyNode>) -> Polygons {
    let mut out = Vec::new();
    outside_in_into(nodes, &mut None, &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x0: i64, y0: i64, size: i64) -> Path {
        vec![
            Point::new(x0, y0),
            Point::new(x0 + size, y0),
            Point::new(x0 + size, y0 + size),
            Point::new(x0, y0 + size),
        ]
    }

    fn hole(x0: i64, y0: i64, size: i64) -> Path {
        let mut h = square(x0, y0, size);
        h.reverse();
        h
    }

    /// Outer 100 with a 60 hole, island 20 inside the hole, plus a separate square.
    fn nested_groups() -> Vec<Paths> {
        vec![
            vec![square(0, 0, 100), hole(20, 20, 60)],
            vec![square(40, 40, 20)],
            vec![square(200, 0, 10)],
        ]
    }

    #[test]
    fn test_from_groups_nests_islands() {
        let tree = PolyTree::from_groups(nested_groups());
        assert_eq!(tree.children().len(), 2);
        assert_eq!(tree.total(), 4);

        let outer = &tree.children()[0];
        assert!(!outer.is_hole);
        assert_eq!(outer.children.len(), 1);
        let h = &outer.children[0];
        assert!(h.is_hole);
        assert_eq!(h.children.len(), 1);
        assert_eq!(h.children[0].contour, square(40, 40, 20));
    }

    #[test]
    fn test_smallest_hole_wins() {
        let groups = vec![
            vec![square(0, 0, 1000), hole(100, 100, 800)],
            vec![square(200, 200, 600), hole(300, 300, 400)],
            vec![square(400, 400, 100)],
        ];
        let tree = PolyTree::from_groups(groups);
        assert_eq!(tree.children().len(), 1);
        let inner = &tree.children()[0].children[0].children[0];
        assert_eq!(inner.contour, square(200, 200, 600));
        assert_eq!(inner.children[0].children[0].contour, square(400, 400, 100));
    }

    #[test]
    fn test_to_expolygons() {
        let tree = PolyTree::from_groups(nested_groups());
        assert_eq!(count_expolygons(&tree), 3);
        let expolys = polytree_to_expolygons(tree);
        assert_eq!(expolys.len(), 3);
        assert_eq!(expolys[0].holes.len(), 1);
        assert!(expolys[0].holes[0].is_clockwise());
        // Island follows its parent.
        assert_eq!(expolys[1].contour.points(), square(40, 40, 20).as_slice());
    }

    #[test]
    fn test_hole_flag_is_authoritative() {
        // A hole node wound counter-clockwise stays a hole and keeps its winding.
        let mut outer = PolyNode::new(square(0, 0, 100), false);
        outer.children.push(PolyNode::new(square(10, 10, 10), true));
        let expolys = polytree_to_expolygons(PolyTree::from_nodes(vec![outer]));
        assert_eq!(expolys.len(), 1);
        assert_eq!(expolys[0].holes.len(), 1);
        assert!(expolys[0].holes[0].is_counter_clockwise());
    }

    #[test]
    fn test_empty_tree() {
        let tree = PolyTree::new();
        assert_eq!(count_expolygons(&tree), 0);
        assert!(polytree_to_expolygons(tree).is_empty());
        assert!(polytree_to_polylines(PolyTree::new()).is_empty());
        assert!(PolyTree::from_groups(Vec::new()).is_empty());
    }

    #[test]
    fn test_to_polylines_preorder() {
        let tree = PolyTree::from_groups(nested_groups());
        let polylines = polytree_to_polylines(tree);
        assert_eq!(polylines.len(), 4);
        assert_eq!(polylines[0].points(), square(0, 0, 100).as_slice());
        assert_eq!(polylines[1].points(), hole(20, 20, 60).as_slice());
        assert_eq!(polylines[2].points(), square(40, 40, 20).as_slice());
    }

    #[test]
    fn test_open_tree() {
        let tree = PolyTree::from_open_paths(vec![
            vec![Point::new(0, 0), Point::new(1, 0)],
            Vec::new(),
        ]);
        assert_eq!(tree.total(), 1);
        assert!(tree.children()[0].is_open);
    }

    #[test]
    fn test_traverse_pt() {
        let tree = PolyTree::from_groups(nested_groups());
        let flat = traverse_pt(tree.children(), TraversalOrder::Unordered);
        assert_eq!(flat.len(), 4);
        assert!(flat[1].is_clockwise());
        let chained = traverse_pt(tree.children(), TraversalOrder::Chained);
        assert_eq!(chained.len(), 4);
    }

    #[test]
    fn test_traverse_pt_ex() {
        let tree = PolyTree::from_groups(nested_groups());
        let expolys = traverse_pt_ex(tree.children());
        assert_eq!(expolys.len(), 3);
        assert_eq!(expolys.iter().map(|e| e.holes.len()).sum::<usize>(), 1);
    }

    #[test]
    fn test_outside_in_reverses_holes() {
        let tree = PolyTree::from_groups(nested_groups());
        let polys = traverse_pt_outside_in(tree.into_children());
        assert_eq!(polys.len(), 4);
        assert!(polys.iter().all(|p| p.is_counter_clockwise()));
        // Outer square comes before its hole, the hole before its island.
        assert_eq!(polys[0].points(), square(0, 0, 100).as_slice());
        assert_eq!(polys[2].points(), square(40, 40, 20).as_slice());
    }

    #[test]
    fn test_chaining_starts_from_last_emitted_contour() {
        let groups = vec![
            vec![square(0, 0, 1000), hole(100, 100, 800)],
            vec![square(700, 700, 50)],
            vec![square(150, 150, 50)],
            vec![square(400, 400, 50)],
        ];
        let tree = PolyTree::from_groups(groups);
        let polys = traverse_pt_outside_in(tree.into_children());
        assert_eq!(polys.len(), 5);
        // The hole is emitted from (100, 900); islands follow nearest first.
        let firsts: Vec<Point> = polys[2..].iter().map(|p| p.points()[0]).collect();
        assert_eq!(
            firsts,
            vec![Point::new(400, 400), Point::new(150, 150), Point::new(700, 700)]
        );
    }
}
