//! Stamping node polygons with the zones on either side of them.
//!
//! A polygon that straddles a zone boundary is split along it so that each
//! piece sees exactly one zone per side.

use log::debug;

use crate::model::{NodeFlags, Side, SpatialModel};
use crate::Polygon;

use super::filter::SubtreeFilter;

/// A piece of a node polygon with the zones it borders, `[back, front]`
/// relative to the node it belongs to.
struct Fragment {
    polygon: Polygon,
    zone: [u8; 2],
}

/// Counters from one assignment pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct AssignStats {
    /// Polygons that had to be split along zone boundaries.
    pub fragmented: usize,
    /// Fragment nodes added to the model.
    pub fragments: usize,
}

pub(crate) struct ZoneAssigner<'a> {
    model: &'a mut SpatialModel,
    epsilon: f32,
    /// Nodes at or past this index were added by this pass.
    first_new: usize,
    stats: AssignStats,
}

impl<'a> ZoneAssigner<'a> {
    /// The model must have its leaves grouped into zones.
    pub fn new(model: &'a mut SpatialModel, epsilon: f32) -> Self {
        let first_new = model.nodes.len();
        Self {
            model,
            epsilon,
            first_new,
            stats: AssignStats::default(),
        }
    }

    pub fn assign(mut self) -> AssignStats {
        if !self.model.is_empty() {
            self.assign_subtree(0);
        }
        self.stats
    }

    fn assign_subtree(&mut self, index: usize) {
        let node = &self.model.nodes[index];
        let (front, back) = (node.front, node.back);
        if let Some(front) = front {
            self.assign_subtree(front);
        }
        if let Some(back) = back {
            self.assign_subtree(back);
        }

        let mut member = Some(index);
        while let Some(current) = member {
            if current < self.first_new {
                self.assign_node(index, current);
            }
            member = self.model.nodes[current].coplanar;
        }
    }

    /// Resolves the zones of `member`'s polygon, `base` being the head of
    /// its coplanar chain.
    fn assign_node(&mut self, base: usize, member: usize) {
        let Some(polygon) = self.model.node_polygon(member) else {
            return;
        };
        let model = &*self.model;
        let backward = !model.nodes[member].plane.faces_same_direction(&model.nodes[base].plane);
        let zone_of = |leaf: Option<usize>| leaf.map_or(0, |leaf| model.leaves[leaf].zone as u8);

        let mut fragments = Vec::new();
        SubtreeFilter::new(&model.nodes, base, self.epsilon, |polygon, front, back| {
            let mut zone = [0; 2];
            zone[Side::Back.index() ^ backward as usize] = zone_of(back);
            zone[Side::Front.index() ^ backward as usize] = zone_of(front);
            fragments.push(Fragment { polygon, zone });
        })
        .run(polygon);

        if fragments.is_empty() {
            return;
        }

        match agreed_zones(&fragments) {
            Some(zone) => self.model.nodes[member].zone = zone,
            None => {
                debug!("node {member} straddles zones, splitting into {} pieces", fragments.len());
                let flags = self.model.nodes[member].flags | NodeFlags::IS_NEW;
                self.model.nodes[member].flags |= NodeFlags::FRAGMENTED;
                self.stats.fragmented += 1;

                for fragment in fragments.into_iter().filter(|f| f.zone != [0, 0]) {
                    let node = self.model.add_coplanar_node(member, &fragment.polygon, flags);
                    self.model.nodes[node].zone = fragment.zone;
                    self.stats.fragments += 1;
                }
            }
        }
    }
}

/// The zone pair every fragment agrees on, if there is one.
///
/// Zone 0 means "unknown" and agrees with anything; the agreed zone on a
/// side is the last known zone seen there.
fn agreed_zones(fragments: &[Fragment]) -> Option<[u8; 2]> {
    let mut agreed = [0u8; 2];
    for side in Side::BOTH {
        let i = side.index();
        agreed[i] = fragments.iter().rev().map(|f| f.zone[i]).find(|&z| z != 0).unwrap_or(0);
        if fragments.iter().any(|f| f.zone[i] != 0 && f.zone[i] != agreed[i]) {
            return None;
        }
    }
    Some(agreed)
}
