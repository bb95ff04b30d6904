//! Two-phase filtering of a polygon through the subtrees on either side of
//! a node.
//!
//! Phase one walks the polygon down the node's back subtree. Every fragment
//! that bottoms out there remembers the leaf it landed in and is then walked
//! down the node's front subtree; each fragment reaching the bottom of that
//! second walk is handed to the sink together with both leaves.

use crate::cuttable::{Cuttable, Split};
use crate::model::{BspNode, Side};
use crate::Polygon;

/// Where a subtree walk begins: the leaf slot on that side of the starting
/// node and the child to descend into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SubtreeEntry {
    pub leaf: Option<usize>,
    pub node: Option<usize>,
}

impl SubtreeEntry {
    pub fn of(node: &BspNode, side: Side) -> Self {
        Self {
            leaf: node.leaf_on(side),
            node: node.child(side),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) enum Phase {
    /// Walking the back subtree; on reaching the bottom, continue into `then`.
    Back { then: SubtreeEntry },
    /// Walking the front subtree, carrying the leaf found behind.
    Front { back_leaf: Option<usize> },
}

/// Filters polygons around one generating node.
///
/// `emit` receives `(fragment, front_leaf, back_leaf)`. Either leaf is
/// `None` when the fragment ended up in solid space.
pub(crate) struct SubtreeFilter<'a, F> {
    nodes: &'a [BspNode],
    base: usize,
    epsilon: f32,
    emit: F,
}

impl<'a, F> SubtreeFilter<'a, F>
where
    F: FnMut(Polygon, Option<usize>, Option<usize>),
{
    pub fn new(nodes: &'a [BspNode], base: usize, epsilon: f32, emit: F) -> Self {
        Self {
            nodes,
            base,
            epsilon,
            emit,
        }
    }

    /// Filters `polygon` through the back then front subtrees of the base node.
    pub fn run(&mut self, polygon: Polygon) {
        let base = &self.nodes[self.base];
        let back = SubtreeEntry::of(base, Side::Back);
        let then = SubtreeEntry::of(base, Side::Front);
        self.filter(Phase::Back { then }, back.leaf, back.node, polygon);
    }

    fn filter(
        &mut self,
        phase: Phase,
        mut parent_leaf: Option<usize>,
        mut node: Option<usize>,
        mut polygon: Polygon,
    ) {
        let nodes = self.nodes;
        while let Some(index) = node {
            if polygon.needs_bisect() {
                let half = polygon.split_in_half();
                self.filter(phase, parent_leaf, node, half);
            }

            let current = &nodes[index];
            match polygon.split(&current.plane, self.epsilon) {
                Split::Coplanar => return,
                Split::Front => {
                    self.filter(phase, current.leaf_on(Side::Front), current.front, polygon);
                    return;
                }
                Split::Back => {}
                Split::Spanning { front, back } => {
                    self.filter(phase, current.leaf_on(Side::Front), current.front, front);
                    polygon = back;
                }
            }
            parent_leaf = current.leaf_on(Side::Back);
            node = current.back;
        }

        match phase {
            Phase::Back { then } => {
                self.filter(
                    Phase::Front { back_leaf: parent_leaf },
                    then.leaf,
                    then.node,
                    polygon,
                );
            }
            Phase::Front { back_leaf } => (self.emit)(polygon, parent_leaf, back_leaf),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::visibility::leaves::assign_leaves;
    use nalgebra::{Point3, Vector3};

    #[test]
    fn splitter_polygon_reaches_both_rooms() {
        let mut model = fixtures::split_room(false);
        assign_leaves(&mut model, 0, false);
        let splitter = fixtures::SPLITTER;
        let polygon = model.node_polygon(splitter).unwrap();

        let mut hits = Vec::new();
        SubtreeFilter::new(&model.nodes, splitter, 0.01, |poly, front, back| {
            hits.push((poly, front, back))
        })
        .run(polygon.clone());

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].1, Some(1));
        assert_eq!(hits[0].2, Some(0));
        assert!((hits[0].0.area() - polygon.area()).abs() < 1e-3);
    }

    #[test]
    fn many_sided_polygon_is_halved_without_losing_area() {
        let mut model = fixtures::split_room(false);
        assign_leaves(&mut model, 0, false);
        let polygon = fixtures::regular_polygon(Point3::origin(), Vector3::y(), Vector3::z(), 1.5, 15);

        let mut hits = Vec::new();
        SubtreeFilter::new(&model.nodes, fixtures::SPLITTER, 0.01, |poly, front, back| {
            hits.push((poly, front, back))
        })
        .run(polygon);

        assert!(hits.len() >= 2);
        assert!(hits.iter().all(|(poly, _, _)| !poly.needs_bisect()));
        assert!(hits.iter().all(|&(_, front, back)| front == Some(1) && back == Some(0)));
        let total: f32 = hits.iter().map(|(poly, _, _)| poly.area()).sum();
        assert!((total - fixtures::regular_polygon_area(1.5, 15)).abs() < 1e-3);
    }

    #[test]
    fn floor_is_cut_by_the_splitter() {
        let mut model = fixtures::split_room(false);
        assign_leaves(&mut model, 0, false);
        let floor = model.node_polygon(0).unwrap();

        let mut hits = Vec::new();
        SubtreeFilter::new(&model.nodes, 0, 0.01, |poly, front, back| {
            hits.push((poly.area(), front, back))
        })
        .run(floor);

        // Solid below the floor, one room on each side of the splitter above it.
        let mut fronts: Vec<_> = hits.iter().map(|h| h.1).collect();
        fronts.sort();
        assert_eq!(fronts, vec![Some(0), Some(1)]);
        assert!(hits.iter().all(|h| h.2.is_none()));
        assert!(hits.iter().all(|h| (h.0 - 8.0).abs() < 1e-3));
    }
}
