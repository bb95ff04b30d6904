//! Numbering of the outside leaves.

use crate::model::{Leaf, NodeFlags, Side, SpatialModel};

/// Gives every empty outside child slot under `index` a fresh leaf id.
///
/// Slots are visited back before front, depth first, so ids follow tree
/// order. Each new leaf starts out as its own zone.
pub(crate) fn assign_leaves(model: &mut SpatialModel, index: usize, outside: bool) {
    for side in Side::BOTH {
        let node = &model.nodes[index];
        let child_outside = node.child_outside(side, outside, NodeFlags::NOT_VIS_BLOCKING);
        match node.child(side) {
            Some(child) => assign_leaves(model, child, child_outside),
            None if child_outside => {
                let id = model.leaves.len();
                model.leaves.push(Leaf { zone: id });
                model.nodes[index].leaf[side.index()] = Some(id);
            }
            None => {}
        }
    }
}
