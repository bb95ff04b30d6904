//! Bounding hulls for solid leaves and bounding boxes for nodes.
//!
//! A large cube is pushed down the tree and cut by every node's plane.
//! Whenever both sides of a node get part of the volume, the node's own
//! partition plane is clipped to the volume and added as a face on each
//! side. The faces reaching a solid leaf form its hull; faces reaching an
//! open leaf only grow the enclosing node boxes.

use log::{debug, info, warn};

use crate::config::RebuildConfig;
use crate::cuttable::{Cuttable, Split};
use crate::error::ModelError;
use crate::model::{HullPlaneRef, NodeFlags, Side, SpatialModel};
use crate::progress::{NoStatus, StatusReporter};
use crate::visibility::build_zone_masks;
use crate::{Aabb, Plane3D, Polygon, Rectangle};

/// Summary of one bounds rebuild.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BoundsReport {
    /// Leaf hulls written.
    pub hulls: usize,
}

/// One face of the volume being pushed down the tree.
#[derive(Debug, Clone)]
struct HullFace {
    polygon: Polygon,
    /// Plane the face lies in, pointing out of the volume.
    plane: Plane3D,
    /// Partition the face came from; `None` for faces of the starting cube.
    tag: Option<HullPlaneRef>,
}

impl HullFace {
    fn with_polygon(&self, polygon: Polygon) -> Self {
        Self {
            polygon,
            plane: self.plane,
            tag: self.tag,
        }
    }
}

/// Rebuilds leaf hulls and node boxes with the default configuration.
pub fn rebuild_bounds(model: &mut SpatialModel) -> Result<BoundsReport, ModelError> {
    rebuild_bounds_with(model, &RebuildConfig::default(), &mut NoStatus)
}

/// Rebuilds leaf hulls, per-node collision bounds and node boxes.
///
/// Uses the root outside flag stored on the model. Zone masks are rebuilt
/// first. A model without nodes is left as is.
pub fn rebuild_bounds_with<R: StatusReporter>(
    model: &mut SpatialModel,
    config: &RebuildConfig,
    status: &mut R,
) -> Result<BoundsReport, ModelError> {
    model.validate()?;
    if model.is_empty() {
        return Ok(BoundsReport::default());
    }

    status.status("Bounding");
    let mut work = model.clone();
    build_zone_masks(&mut work);
    work.leaf_hulls.clear();
    work.node_bounds = vec![Aabb::new_invalid(); work.nodes.len()];
    for node in &mut work.nodes {
        node.collision_bound = None;
    }

    let faces = cube_faces(config.bounds_extent);
    let outside = work.root_outside;
    let mut builder = BoundsBuilder {
        model: &mut work,
        config,
        hulls: 0,
    };
    builder.filter_bound(0, faces, outside);
    let report = BoundsReport { hulls: builder.hulls };

    info!("Bounds: {} leaf hulls ({} words)", report.hulls, work.leaf_hulls.as_slice().len());
    *model = work;
    Ok(report)
}

struct BoundsBuilder<'a> {
    model: &'a mut SpatialModel,
    config: &'a RebuildConfig,
    hulls: usize,
}

impl BoundsBuilder<'_> {
    /// Cuts `faces` by the node's plane and recurses. Returns the box of the
    /// open space reached under this node.
    fn filter_bound(&mut self, index: usize, faces: Vec<HullFace>, outside: bool) -> Aabb {
        let node = &self.model.nodes[index];
        let plane = node.plane;
        let front_child = node.front;
        let back_child = node.back;
        let front_outside = node.child_outside(Side::Front, outside, NodeFlags::empty());
        let back_outside = node.child_outside(Side::Back, outside, NodeFlags::empty());

        let mut front = Vec::with_capacity(faces.len() + 1);
        let mut back = Vec::with_capacity(faces.len() + 1);
        for face in &faces {
            match face.polygon.split(&plane, self.config.coarse_epsilon) {
                Split::Coplanar => {
                    debug!("hull face coplanar with node {index}");
                    front.push(face.clone());
                    back.push(face.clone());
                }
                Split::Front => front.push(face.clone()),
                Split::Back => back.push(face.clone()),
                Split::Spanning { front: f, back: b } => {
                    push_bisected(&mut front, face.with_polygon(f));
                    push_bisected(&mut back, face.with_polygon(b));
                }
            }
        }

        if !front.is_empty() && !back.is_empty() {
            let partition: Polygon = Rectangle::infinite(&plane, self.config.world_max).into();
            self.split_partitioner(index, &plane, &faces, 0, partition, &mut front, &mut back);
        } else if front.is_empty() {
            debug!("empty front hull at node {index}");
        } else {
            debug!("empty back hull at node {index}");
        }

        let mut bound = Aabb::new_invalid();
        for (side, set, child, child_outside) in [
            (Side::Front, front, front_child, front_outside),
            (Side::Back, back, back_child, back_outside),
        ] {
            if set.is_empty() {
                continue;
            }
            match child {
                Some(child) => {
                    let child_bound = self.filter_bound(child, set, child_outside);
                    bound.merge(&child_bound);
                }
                None if child_outside => {
                    for face in &set {
                        bound.take_polygon(&face.polygon);
                    }
                }
                None => {
                    debug!("leaf hull on the {side:?} of node {index}");
                    self.emit_hull(index, &set);
                }
            }
        }

        self.model.node_bounds[index] = bound;
        bound
    }

    /// Clips the node's partition polygon to the volume bounded by
    /// `faces[start..]` and adds it to both sides.
    #[allow(clippy::too_many_arguments)]
    fn split_partitioner(
        &self,
        index: usize,
        plane: &Plane3D,
        faces: &[HullFace],
        start: usize,
        mut partition: Polygon,
        front: &mut Vec<HullFace>,
        back: &mut Vec<HullFace>,
    ) {
        for (n, face) in faces.iter().enumerate().skip(start) {
            if partition.needs_bisect() {
                let half = partition.split_in_half();
                self.split_partitioner(index, plane, faces, n, half, front, back);
            }
            match partition.split(&face.plane, self.config.coarse_epsilon) {
                Split::Coplanar => debug!("partition of node {index} coplanar with a hull face"),
                Split::Front => {
                    warn!("partition of node {index} lies outside its hull");
                    return;
                }
                Split::Back => {}
                Split::Spanning { back, .. } => partition = back,
            }
        }

        front.push(HullFace {
            polygon: partition.reversed(),
            plane: plane.flipped(),
            tag: Some(HullPlaneRef { node: index, flipped: true }),
        });
        back.push(HullFace {
            polygon: partition,
            plane: *plane,
            tag: Some(HullPlaneRef { node: index, flipped: false }),
        });
    }

    fn emit_hull(&mut self, index: usize, faces: &[HullFace]) {
        let mut planes: Vec<HullPlaneRef> = Vec::new();
        for tag in faces.iter().filter_map(|f| f.tag) {
            if !planes.contains(&tag) {
                planes.push(tag);
            }
        }
        let mut bounds = Aabb::new_invalid();
        for face in faces {
            bounds.take_polygon(&face.polygon);
        }

        let offset = self.model.leaf_hulls.push(&planes, &bounds);
        self.model.nodes[index].collision_bound = Some(offset);
        self.hulls += 1;
    }
}

/// The outward faces of the starting cube, untagged.
fn cube_faces(extent: f32) -> Vec<HullFace> {
    Rectangle::cube_faces(extent)
        .into_iter()
        .map(|rect| HullFace {
            plane: rect.plane(),
            polygon: rect.into(),
            tag: None,
        })
        .collect()
}

/// Adds `face`, halving it first if it has too many vertices. The extra
/// half goes in ahead of the rest.
fn push_bisected(list: &mut Vec<HullFace>, mut face: HullFace) {
    if face.polygon.needs_bisect() {
        let half = face.polygon.split_in_half();
        list.push(face.with_polygon(half));
    }
    list.push(face);
}
