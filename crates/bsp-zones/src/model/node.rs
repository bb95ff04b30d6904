//! BSP node stored in the model's flat node array.

use crate::Plane3D;

use super::flags::NodeFlags;
use super::zone_set::ZoneSet;

/// One side of a node's splitting plane.
///
/// Per-side slots on [`BspNode`] are indexed by `Side as usize`, back first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Back = 0,
    Front = 1,
}

impl Side {
    /// Both sides in visiting order.
    pub const BOTH: [Side; 2] = [Side::Back, Side::Front];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// A node in the BSP.
///
/// The node's plane partitions space; its polygon (if any) is stored as
/// indices into the model's point table. Polygons merged from several
/// coplanar sources hang off the `coplanar` chain, whose members never have
/// front or back children of their own.
#[derive(Debug, Clone)]
pub struct BspNode {
    /// Splitting plane. The front child lies in the direction of the normal.
    pub plane: Plane3D,

    /// Surface this node's polygon belongs to.
    pub surf: usize,

    /// Subtree in front of the plane.
    pub front: Option<usize>,

    /// Subtree behind the plane.
    pub back: Option<usize>,

    /// Next node in the coplanar chain.
    pub coplanar: Option<usize>,

    /// Polygon vertices as point indices. Empty means the node only splits.
    pub vertices: Vec<usize>,

    pub flags: NodeFlags,

    /// Leaf ids of the outside volumes bordering this node, `[back, front]`.
    /// Only set where the side has no child.
    pub leaf: [Option<usize>; 2],

    /// Zone of each side of the polygon, `[back, front]`; 0 if unresolved.
    pub zone: [u8; 2],

    /// Every zone referenced at or below this node.
    pub zone_mask: ZoneSet,

    /// Offset into the leaf hull buffer for a solid leaf bordering this node.
    pub collision_bound: Option<usize>,
}

impl BspNode {
    /// Creates a node with the given plane and surface, no children and no polygon.
    pub fn new(plane: Plane3D, surf: usize) -> Self {
        Self {
            plane,
            surf,
            front: None,
            back: None,
            coplanar: None,
            vertices: Vec::new(),
            flags: NodeFlags::empty(),
            leaf: [None; 2],
            zone: [0; 2],
            zone_mask: ZoneSet::no_zones(),
            collision_bound: None,
        }
    }

    /// Returns the child on the given side.
    #[inline]
    pub fn child(&self, side: Side) -> Option<usize> {
        match side {
            Side::Front => self.front,
            Side::Back => self.back,
        }
    }

    /// Returns the leaf id on the given side.
    #[inline]
    pub fn leaf_on(&self, side: Side) -> Option<usize> {
        self.leaf[side.index()]
    }

    /// Whether the node carries a polygon.
    #[inline]
    pub fn has_polygon(&self) -> bool {
        !self.vertices.is_empty()
    }

    /// Whether this node is a solid CSG splitter, ignoring nodes flagged
    /// with any of `extra`.
    #[inline]
    pub fn is_csg(&self, extra: NodeFlags) -> bool {
        self.has_polygon() && !self.flags.intersects(NodeFlags::IS_NEW | NodeFlags::NOT_CSG | extra)
    }

    /// Outside classification of a child region given the parent's.
    ///
    /// The front of a solid splitter is always outside; its back is outside
    /// only if the parent region is and the node does not close it off.
    #[inline]
    pub fn child_outside(&self, side: Side, outside: bool, extra: NodeFlags) -> bool {
        match side {
            Side::Front => outside || self.is_csg(extra),
            Side::Back => outside && !self.is_csg(extra),
        }
    }

    /// Clears every field a rebuild pass derives.
    pub fn reset_derived(&mut self) {
        self.leaf = [None; 2];
        self.zone = [0; 2];
    }
}
