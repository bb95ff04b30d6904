//! 64-bit zone membership masks.

use std::ops::{BitOr, BitOrAssign};

/// Maximum number of zones a model can hold, zone 0 included.
pub const MAX_ZONES: usize = 64;

/// A set of zones, one bit per zone id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ZoneSet(u64);

impl ZoneSet {
    #[inline]
    pub const fn no_zones() -> Self {
        Self(0)
    }

    #[inline]
    pub const fn individual(zone: u8) -> Self {
        Self(1 << (zone as u64 & 63))
    }

    #[inline]
    pub fn add_zone(&mut self, zone: u8) {
        *self |= Self::individual(zone);
    }

    #[inline]
    pub fn contains_zone(&self, zone: u8) -> bool {
        self.0 & Self::individual(zone).0 != 0
    }

    /// Whether every zone of `other` is also in `self`.
    #[inline]
    pub fn contains(&self, other: ZoneSet) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Zone ids in ascending order.
    pub fn zones(&self) -> impl Iterator<Item = u8> + '_ {
        (0..MAX_ZONES as u8).filter(move |&z| self.contains_zone(z))
    }
}

impl BitOr for ZoneSet {
    type Output = ZoneSet;

    fn bitor(self, rhs: ZoneSet) -> ZoneSet {
        ZoneSet(self.0 | rhs.0)
    }
}

impl BitOrAssign for ZoneSet {
    fn bitor_assign(&mut self, rhs: ZoneSet) {
        self.0 |= rhs.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn individual_zones() {
        let mut set = ZoneSet::no_zones();
        assert!(set.is_empty());
        set.add_zone(3);
        set.add_zone(63);
        assert!(set.contains_zone(3));
        assert!(set.contains_zone(63));
        assert!(!set.contains_zone(0));
        assert_eq!(set.len(), 2);
        assert_eq!(set.zones().collect::<Vec<_>>(), vec![3, 63]);
    }

    #[test]
    fn superset_check() {
        let a = ZoneSet::individual(1) | ZoneSet::individual(2);
        assert!(a.contains(ZoneSet::individual(2)));
        assert!(!a.contains(ZoneSet::individual(5)));
        assert!((a | ZoneSet::individual(7)).contains(a));
        assert!(a.contains(ZoneSet::no_zones()));
    }
}
