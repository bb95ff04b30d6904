//! The spatial model: a prebuilt BSP plus the zone, leaf and hull state
//! derived from it.
//!
//! Nodes, surfaces, points and vectors are produced by CSG elsewhere and
//! are only read by the rebuild passes, apart from the fragment nodes zone
//! assignment appends. Everything else on the model is derived and gets
//! replaced wholesale on every rebuild.

mod flags;
mod leaf_hulls;
mod node;
mod surf;
mod zone_set;

pub use flags::{NodeFlags, PolyFlags};
pub use leaf_hulls::{HullPlaneRef, LeafHull, LeafHulls};
pub use node::{BspNode, Side};
pub use surf::BspSurf;
pub use zone_set::{ZoneSet, MAX_ZONES};

use nalgebra::{Point3, Vector3};

use crate::error::ModelError;
use crate::{Aabb, Plane3D, Polygon};

/// A convex outside volume. Its id is its index in [`SpatialModel::leaves`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Leaf {
    pub zone: usize,
}

/// Per-zone properties.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Zone {
    /// Designer marker placed inside this zone.
    pub marker: Option<usize>,
    /// Zones directly adjacent to this one through a zone portal.
    pub connectivity: ZoneSet,
}

#[derive(Debug, Clone)]
pub struct SpatialModel {
    pub nodes: Vec<BspNode>,
    pub surfs: Vec<BspSurf>,
    pub points: Vec<Point3<f32>>,
    pub vectors: Vec<Vector3<f32>>,

    /// Whether the space around the root is open rather than solid.
    pub root_outside: bool,

    pub leaves: Vec<Leaf>,
    pub zones: Vec<Zone>,
    /// Zone ids in use are `1..num_zones`; zone 0 is reserved.
    pub num_zones: usize,
    /// Nodes whose surface is a zone portal, in discovery order.
    pub portal_nodes: Vec<usize>,
    pub leaf_hulls: LeafHulls,
    /// Box enclosing the outside space under each node.
    pub node_bounds: Vec<Aabb>,
}

impl Default for SpatialModel {
    fn default() -> Self {
        Self::new()
    }
}

impl SpatialModel {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            surfs: Vec::new(),
            points: Vec::new(),
            vectors: Vec::new(),
            root_outside: true,
            leaves: Vec::new(),
            zones: vec![Zone::default(); MAX_ZONES],
            num_zones: 1,
            portal_nodes: Vec::new(),
            leaf_hulls: LeafHulls::new(),
            node_bounds: Vec::new(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn add_point(&mut self, point: Point3<f32>) -> usize {
        self.points.push(point);
        self.points.len() - 1
    }

    pub fn add_vector(&mut self, vector: Vector3<f32>) -> usize {
        self.vectors.push(vector);
        self.vectors.len() - 1
    }

    /// Adds a surface lying in `plane`, filling in base point, normal and a
    /// texture basis from the plane.
    pub fn add_surf(&mut self, plane: &Plane3D, flags: PolyFlags) -> usize {
        let (axis1, axis2) = plane.best_axis_vectors();
        let surf = BspSurf {
            base: self.add_point(plane.base()),
            normal: self.add_vector(plane.normal()),
            texture_u: self.add_vector(axis1),
            texture_v: self.add_vector(axis2),
            flags,
            brush: None,
        };
        self.surfs.push(surf);
        self.surfs.len() - 1
    }

    /// The plane a surface lies in, from its base point and normal.
    pub fn surf_plane(&self, surf: usize) -> Plane3D {
        let surf = &self.surfs[surf];
        Plane3D::from_point_and_normal(self.points[surf.base], self.vectors[surf.normal])
    }

    /// Appends a node on `surf`, splitting along the surface's plane and
    /// carrying `polygon` as its outline. Returns the node index.
    pub fn add_node(&mut self, surf: usize, polygon: Option<&Polygon>, flags: NodeFlags) -> usize {
        let mut node = BspNode::new(self.surf_plane(surf), surf);
        node.flags = flags;
        if let Some(polygon) = polygon {
            node.vertices = polygon.vertices().iter().map(|p| self.add_point(*p)).collect();
        }
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    /// The node's polygon, or `None` if it has fewer than three vertices or
    /// was replaced by zone fragments.
    pub fn node_polygon(&self, node: usize) -> Option<Polygon> {
        let node = &self.nodes[node];
        if node.vertices.len() < 3 || node.flags.contains(NodeFlags::FRAGMENTED) {
            return None;
        }
        Some(Polygon::new(node.vertices.iter().map(|&i| self.points[i]).collect()))
    }

    /// Inserts a new node right after `parent` in its coplanar chain, sharing
    /// its plane and surface. Returns the new node's index.
    pub fn add_coplanar_node(&mut self, parent: usize, polygon: &Polygon, flags: NodeFlags) -> usize {
        let vertices = polygon.vertices().iter().map(|p| self.add_point(*p)).collect();
        let source = &self.nodes[parent];
        let mut node = BspNode::new(source.plane, source.surf);
        node.flags = flags;
        node.vertices = vertices;
        node.coplanar = source.coplanar;

        let index = self.nodes.len();
        self.nodes.push(node);
        self.nodes[parent].coplanar = Some(index);
        index
    }

    /// Nodes in the coplanar chain starting at `node`, `node` included.
    pub fn coplanar_chain(&self, node: usize) -> Vec<usize> {
        let mut chain = Vec::new();
        let mut current = Some(node);
        while let Some(index) = current {
            chain.push(index);
            current = self.nodes[index].coplanar;
        }
        chain
    }

    /// The outside leaf containing `point`, if the point is in open space.
    /// Points on a plane count as being in front of it.
    pub fn point_leaf(&self, point: Point3<f32>) -> Option<usize> {
        if self.nodes.is_empty() {
            return None;
        }
        let mut index = 0;
        loop {
            let node = &self.nodes[index];
            let side = if node.plane.signed_distance(point) >= 0.0 {
                Side::Front
            } else {
                Side::Back
            };
            match node.child(side) {
                Some(child) => index = child,
                None => return node.leaf_on(side),
            }
        }
    }

    /// Zone containing `point`, or 0 if the point is not in open space.
    pub fn point_zone(&self, point: Point3<f32>) -> u8 {
        self.point_leaf(point)
            .map_or(0, |leaf| self.leaves[leaf].zone as u8)
    }

    /// Checks every index in the model and that the tree rooted at node 0
    /// (children and coplanar links alike) reaches each node at most once.
    pub fn validate(&self) -> Result<(), ModelError> {
        let nodes = self.nodes.len();
        let points = self.points.len();
        let vectors = self.vectors.len();

        for (index, surf) in self.surfs.iter().enumerate() {
            if surf.base >= points {
                return Err(ModelError::SurfPointOutOfRange { surf: index, point: surf.base, len: points });
            }
            for vector in [surf.normal, surf.texture_u, surf.texture_v] {
                if vector >= vectors {
                    return Err(ModelError::SurfVectorOutOfRange { surf: index, vector, len: vectors });
                }
            }
        }

        for (index, node) in self.nodes.iter().enumerate() {
            if node.surf >= self.surfs.len() {
                return Err(ModelError::SurfOutOfRange { node: index, surf: node.surf, len: self.surfs.len() });
            }
            for child in [node.front, node.back, node.coplanar].into_iter().flatten() {
                if child >= nodes {
                    return Err(ModelError::ChildOutOfRange { node: index, child, len: nodes });
                }
            }
            if let Some(&point) = node.vertices.iter().find(|&&p| p >= points) {
                return Err(ModelError::VertexOutOfRange { node: index, point, len: points });
            }
        }

        if nodes > 0 {
            let mut seen = vec![false; nodes];
            let mut stack = vec![0];
            while let Some(index) = stack.pop() {
                if std::mem::replace(&mut seen[index], true) {
                    return Err(ModelError::SharedNode { node: index });
                }
                let node = &self.nodes[index];
                stack.extend([node.coplanar, node.back, node.front].into_iter().flatten());
            }
        }
        Ok(())
    }
}
