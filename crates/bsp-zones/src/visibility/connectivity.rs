//! Zone reachability masks and the zone adjacency matrix.

use crate::model::{SpatialModel, ZoneSet, MAX_ZONES};

/// Recomputes every node's zone mask: the zones referenced by the node
/// itself, its coplanar chain, and everything below it.
pub fn build_zone_masks(model: &mut SpatialModel) {
    if !model.is_empty() {
        mask_subtree(model, 0);
    }
}

fn mask_subtree(model: &mut SpatialModel, index: usize) -> ZoneSet {
    let node = &model.nodes[index];
    let (front, back, coplanar) = (node.front, node.back, node.coplanar);

    let mut mask = ZoneSet::no_zones();
    for zone in node.zone {
        if zone != 0 {
            mask.add_zone(zone);
        }
    }
    for child in [front, back, coplanar].into_iter().flatten() {
        mask |= mask_subtree(model, child);
    }
    model.nodes[index].zone_mask = mask;
    mask
}

/// Rebuilds each zone's set of directly adjacent zones from the zone portal
/// nodes. Every zone is connected to itself.
pub(crate) fn build_connectivity(model: &mut SpatialModel) {
    for (index, zone) in model.zones.iter_mut().enumerate().take(MAX_ZONES) {
        zone.connectivity = ZoneSet::individual(index as u8);
    }
    for node in &model.nodes {
        if !model.surfs[node.surf].is_portal() {
            continue;
        }
        let [back, front] = node.zone;
        model.zones[back as usize].connectivity.add_zone(front);
        model.zones[front as usize].connectivity.add_zone(back);
    }
}
