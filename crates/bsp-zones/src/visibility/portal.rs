//! Portals between outside leaves.

use crate::Polygon;

/// A convex opening between two leaves.
#[derive(Debug, Clone, PartialEq)]
pub struct Portal {
    pub polygon: Polygon,
    /// Leaf on the front side of the generating node's plane.
    pub front_leaf: usize,
    /// Leaf on the back side of the generating node's plane.
    pub back_leaf: usize,
    /// Node whose splitting plane the portal lies in.
    pub node: usize,
    /// Surface of the zone portal that seals this opening, if any.
    pub blocking_surf: Option<usize>,
}

impl Portal {
    #[inline]
    pub fn is_blocked(&self) -> bool {
        self.blocking_surf.is_some()
    }

    /// The leaf on the other side of the portal from `leaf`.
    pub fn neighbor_of(&self, leaf: usize) -> Option<usize> {
        if leaf == self.front_leaf {
            Some(self.back_leaf)
        } else if leaf == self.back_leaf {
            Some(self.front_leaf)
        } else {
            None
        }
    }

    #[inline]
    pub fn connects(&self, a: usize, b: usize) -> bool {
        (self.front_leaf == a && self.back_leaf == b) || (self.front_leaf == b && self.back_leaf == a)
    }

    #[inline]
    pub fn area(&self) -> f32 {
        self.polygon.area()
    }

    /// The portal polygon wound to face away from `leaf`.
    ///
    /// The stored polygon faces along the generating plane, out of the back
    /// leaf and into the front leaf.
    pub fn facing_out_of(&self, leaf: usize) -> Option<Polygon> {
        if leaf == self.back_leaf {
            Some(self.polygon.clone())
        } else if leaf == self.front_leaf {
            Some(self.polygon.reversed())
        } else {
            None
        }
    }

    /// The portal polygon wound to face into `leaf`.
    pub fn facing_into(&self, leaf: usize) -> Option<Polygon> {
        self.facing_out_of(leaf).map(|polygon| polygon.reversed())
    }
}

/// Every portal found in one visibility pass, indexed by leaf and by
/// generating node.
#[derive(Debug, Clone, Default)]
pub struct PortalSet {
    portals: Vec<Portal>,
    by_leaf: Vec<Vec<usize>>,
    by_node: Vec<Vec<usize>>,
}

impl PortalSet {
    pub fn new(leaves: usize, nodes: usize) -> Self {
        Self {
            portals: Vec::new(),
            by_leaf: vec![Vec::new(); leaves],
            by_node: vec![Vec::new(); nodes],
        }
    }

    /// Records a portal and returns its id.
    pub fn add(&mut self, polygon: Polygon, front_leaf: usize, back_leaf: usize, node: usize) -> usize {
        debug_assert_ne!(front_leaf, back_leaf, "portal must join two different leaves");
        let id = self.portals.len();
        self.portals.push(Portal {
            polygon,
            front_leaf,
            back_leaf,
            node,
            blocking_surf: None,
        });
        self.by_leaf[front_leaf].push(id);
        self.by_leaf[back_leaf].push(id);
        self.by_node[node].push(id);
        id
    }

    /// Marks every portal between leaves `a` and `b` as sealed by `surf`.
    /// Returns how many of them were still open.
    pub fn block_between(&mut self, a: usize, b: usize, surf: usize) -> usize {
        let Some(ids) = self.by_leaf.get(a) else {
            return 0;
        };
        let mut blocked = 0;
        for &id in ids {
            let portal = &mut self.portals[id];
            if portal.connects(a, b) {
                if !portal.is_blocked() {
                    blocked += 1;
                }
                portal.blocking_surf = Some(surf);
            }
        }
        blocked
    }

    #[inline]
    pub fn get(&self, id: usize) -> Option<&Portal> {
        self.portals.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Portal> + '_ {
        self.portals.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.portals.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.portals.is_empty()
    }

    /// Ids of the portals touching `leaf`.
    pub fn portals_of_leaf(&self, leaf: usize) -> &[usize] {
        self.by_leaf.get(leaf).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Ids of the portals lying in `node`'s plane.
    pub fn portals_of_node(&self, node: usize) -> &[usize] {
        self.by_node.get(node).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Portals touching `leaf`, paired with the leaf on the far side.
    pub fn neighbors(&self, leaf: usize) -> impl Iterator<Item = (&Portal, usize)> + '_ {
        self.portals_of_leaf(leaf).iter().filter_map(move |&id| {
            let portal = &self.portals[id];
            portal.neighbor_of(leaf).map(|other| (portal, other))
        })
    }

    pub fn blocked_count(&self) -> usize {
        self.portals.iter().filter(|p| p.is_blocked()).count()
    }
}
