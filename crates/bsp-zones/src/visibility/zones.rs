//! Grouping leaves into zones.

use log::info;
use union_find::{QuickUnionUf, UnionBySize, UnionFind};

use crate::model::{Leaf, MAX_ZONES};

use super::portal::PortalSet;

/// Merges leaves joined by unsealed portals into zones and numbers them.
///
/// Zones are numbered in order of their first leaf. On return every leaf's
/// zone is in `1..MAX_ZONES`; zone 0 stays reserved for "unknown". Returns
/// how many distinct zones were found before ids past the limit were folded
/// back into range.
pub(crate) fn form_zones(leaves: &mut [Leaf], portals: &PortalSet) -> usize {
    let mut sets = QuickUnionUf::<UnionBySize>::new(leaves.len());
    for portal in portals.iter().filter(|p| !p.is_blocked()) {
        sets.union(portal.front_leaf, portal.back_leaf);
    }

    let mut remap: Vec<Option<usize>> = vec![None; leaves.len()];
    let mut found = 0;
    for (index, leaf) in leaves.iter_mut().enumerate() {
        let root = sets.find(index);
        let zone = *remap[root].get_or_insert_with(|| {
            found += 1;
            found - 1
        });
        leaf.zone = zone % (MAX_ZONES - 1) + 1;
    }

    info!("Found {found} zones");
    found
}

/// Number of zone ids in use, zone 0 included.
#[inline]
pub(crate) fn zone_count(found: usize) -> usize {
    (found + 1).clamp(1, MAX_ZONES)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Polygon;
    use nalgebra::Point3;

    fn leaves(n: usize) -> Vec<Leaf> {
        (0..n).map(|zone| Leaf { zone }).collect()
    }

    fn square() -> Polygon {
        Polygon::new(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ])
    }

    #[test]
    fn connected_leaves_share_a_zone() {
        let mut leaves = leaves(4);
        let mut portals = PortalSet::new(4, 1);
        portals.add(square(), 0, 2, 0);
        portals.add(square(), 3, 2, 0);

        let found = form_zones(&mut leaves, &portals);
        let zones: Vec<_> = leaves.iter().map(|l| l.zone).collect();
        assert_eq!(found, 2);
        assert_eq!(zones, vec![1, 2, 1, 1]);
        assert_eq!(zone_count(found), 3);
    }

    #[test]
    fn zones_are_numbered_by_first_leaf() {
        let mut leaves = leaves(6);
        let mut portals = PortalSet::new(6, 1);
        portals.add(square(), 5, 4, 0);
        portals.add(square(), 4, 1, 0);
        portals.add(square(), 2, 3, 0);

        assert_eq!(form_zones(&mut leaves, &portals), 3);
        let zones: Vec<_> = leaves.iter().map(|l| l.zone).collect();
        assert_eq!(zones, vec![1, 2, 3, 3, 2, 2]);
    }

    #[test]
    fn sealed_portals_separate_zones() {
        let mut leaves = leaves(2);
        let mut portals = PortalSet::new(2, 1);
        portals.add(square(), 1, 0, 0);
        portals.block_between(0, 1, 0);

        assert_eq!(form_zones(&mut leaves, &portals), 2);
        assert_eq!(leaves, vec![Leaf { zone: 1 }, Leaf { zone: 2 }]);
    }

    #[test]
    fn overflowing_zones_fold_into_range() {
        let mut leaves = leaves(70);
        let found = form_zones(&mut leaves, &PortalSet::new(70, 1));

        assert_eq!(found, 70);
        assert_eq!(zone_count(found), MAX_ZONES);
        assert!(leaves.iter().all(|l| (1..MAX_ZONES).contains(&l.zone)));
        assert_eq!(leaves[63].zone, 1);
        assert_eq!(leaves[62].zone, 63);
    }

    #[test]
    fn no_leaves_still_counts_zone_zero() {
        let mut leaves = Vec::new();
        assert_eq!(form_zones(&mut leaves, &PortalSet::default()), 0);
        assert_eq!(zone_count(0), 1);
    }
}
