//! Portal generation.
//!
//! Every node's splitting plane is turned into a huge quad, clipped down to
//! the convex cell the node sits in, and filtered through the subtrees on
//! both sides. Whatever reaches an outside leaf on both sides is a portal.
//! Zone portal surfaces are filtered the same way afterwards and seal the
//! portals they cover.

use log::trace;

use crate::config::RebuildConfig;
use crate::cuttable::{Cuttable, Split};
use crate::model::{Side, SpatialModel};
use crate::{Polygon, Rectangle};

use super::filter::SubtreeFilter;
use super::portal::PortalSet;

/// One ancestor on the path from the root: the node and which of its sides
/// the current subtree lies on.
#[derive(Debug, Clone, Copy)]
struct Clip {
    node: usize,
    side: Side,
}

/// Output of portal generation.
#[derive(Debug, Default)]
pub(crate) struct Portals {
    pub set: PortalSet,
    /// Nodes whose surface is a zone portal, in discovery order.
    pub portal_nodes: Vec<usize>,
    /// Zone portal polygons filtered.
    pub zone_portals: usize,
    /// Portals sealed by those polygons.
    pub sealed_portals: usize,
}

pub(crate) struct PortalGenerator<'a> {
    model: &'a SpatialModel,
    config: &'a RebuildConfig,
    clips: Vec<Clip>,
    out: Portals,
}

impl<'a> PortalGenerator<'a> {
    /// The model must already have its leaves assigned.
    pub fn new(model: &'a SpatialModel, config: &'a RebuildConfig) -> Self {
        Self {
            model,
            config,
            clips: Vec::new(),
            out: Portals {
                set: PortalSet::new(model.leaves.len(), model.nodes.len()),
                ..Portals::default()
            },
        }
    }

    pub fn generate(mut self) -> Portals {
        if !self.model.is_empty() {
            self.make_portals(0);
        }
        self.out
    }

    fn make_portals(&mut self, index: usize) {
        let model = self.model;
        let node = &model.nodes[index];

        let partition: Polygon = Rectangle::infinite(&node.plane, self.config.world_max).into();
        self.clip_and_filter(index, partition, self.clips.len());

        for (side, child) in [(Side::Front, node.front), (Side::Back, node.back)] {
            if let Some(child) = child {
                self.clips.push(Clip { node: index, side });
                self.make_portals(child);
                self.clips.pop();
            }
        }

        for member in model.coplanar_chain(index) {
            if !model.surfs[model.nodes[member].surf].is_portal() {
                continue;
            }
            let Some(polygon) = model.node_polygon(member) else {
                continue;
            };
            self.out.portal_nodes.push(member);
            self.out.zone_portals += 1;
            self.block_with(index, member, polygon);
        }
    }

    /// Clips `polygon` to the first `depth` ancestors, innermost first, then
    /// filters the survivor through the node's subtrees.
    fn clip_and_filter(&mut self, index: usize, mut polygon: Polygon, mut depth: usize) {
        while depth > 0 {
            depth -= 1;
            if polygon.needs_bisect() {
                let half = polygon.split_in_half();
                self.clip_and_filter(index, half, depth + 1);
            }

            let clip = self.clips[depth];
            let plane = self.model.nodes[clip.node].plane;
            polygon = match (polygon.split(&plane, self.config.precise_epsilon), clip.side) {
                (Split::Coplanar, _) | (Split::Front, Side::Back) | (Split::Back, Side::Front) => return,
                (Split::Spanning { front, .. }, Side::Front) => front,
                (Split::Spanning { back, .. }, Side::Back) => back,
                (Split::Front, Side::Front) | (Split::Back, Side::Back) => polygon,
            };
        }

        let model = self.model;
        let set = &mut self.out.set;
        SubtreeFilter::new(&model.nodes, index, self.config.precise_epsilon, |poly, front, back| {
            if let (Some(front), Some(back)) = (front, back) {
                set.add(poly, front, back, index);
            }
        })
        .run(polygon);
    }

    /// Seals every portal covered by the zone portal polygon of `member`.
    fn block_with(&mut self, base: usize, member: usize, polygon: Polygon) {
        let model = self.model;
        let surf = model.nodes[member].surf;
        let Portals {
            set, sealed_portals, ..
        } = &mut self.out;
        SubtreeFilter::new(&model.nodes, base, self.config.precise_epsilon, |_, front, back| {
            if let (Some(front), Some(back)) = (front, back) {
                let blocked = set.block_between(front, back, surf);
                trace!("zone portal {member} sealed {blocked} portals between leaves {front} and {back}");
                *sealed_portals += blocked;
            }
        })
        .run(polygon);
    }
}
