//! Flat buffer of convex hulls for solid leaves.
//!
//! Each hull is stored as the ids of the partition planes bounding it,
//! a `-1` terminator, and six floats (box min xyz, max xyz) kept by bit
//! pattern. Nodes reference a hull by its offset into the buffer.

use nalgebra::Point3;

use crate::Aabb;

const END_OF_PLANES: i32 = -1;
const FLIPPED_BIT: i32 = 0x4000_0000;

/// Reference to the partition plane a hull face came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HullPlaneRef {
    pub node: usize,
    /// The face points against the node's plane normal.
    pub flipped: bool,
}

impl HullPlaneRef {
    fn encode(self) -> i32 {
        let id = self.node as i32;
        debug_assert!(id & FLIPPED_BIT == 0, "node index {} out of range", self.node);
        if self.flipped { id | FLIPPED_BIT } else { id }
    }

    fn decode(raw: i32) -> Self {
        Self {
            node: (raw & !FLIPPED_BIT) as usize,
            flipped: raw & FLIPPED_BIT != 0,
        }
    }
}

/// One decoded hull.
#[derive(Debug, Clone, PartialEq)]
pub struct LeafHull {
    pub planes: Vec<HullPlaneRef>,
    pub bounds: Aabb,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LeafHulls {
    data: Vec<i32>,
}

impl LeafHulls {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw buffer contents.
    #[inline]
    pub fn as_slice(&self) -> &[i32] {
        &self.data
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Appends a hull and returns its offset. Planes must already be deduplicated.
    pub fn push(&mut self, planes: &[HullPlaneRef], bounds: &Aabb) -> usize {
        let offset = self.data.len();
        self.data.extend(planes.iter().map(|p| p.encode()));
        self.data.push(END_OF_PLANES);
        for value in [
            bounds.mins.x,
            bounds.mins.y,
            bounds.mins.z,
            bounds.maxs.x,
            bounds.maxs.y,
            bounds.maxs.z,
        ] {
            self.data.push(value.to_bits() as i32);
        }
        offset
    }

    /// Decodes the hull starting at `offset`, returning it with the offset of the next hull.
    fn decode_at(&self, offset: usize) -> Option<(LeafHull, usize)> {
        let rest = self.data.get(offset..)?;
        let end = rest.iter().position(|&v| v == END_OF_PLANES)?;
        let floats = rest.get(end + 1..end + 7)?;
        let f = |i: usize| f32::from_bits(floats[i] as u32);

        let hull = LeafHull {
            planes: rest[..end].iter().map(|&raw| HullPlaneRef::decode(raw)).collect(),
            bounds: Aabb::new(Point3::new(f(0), f(1), f(2)), Point3::new(f(3), f(4), f(5))),
        };
        Some((hull, offset + end + 7))
    }

    /// The hull stored at `offset`, if the offset starts a complete hull record.
    pub fn hull_at(&self, offset: usize) -> Option<LeafHull> {
        self.decode_at(offset).map(|(hull, _)| hull)
    }

    /// All hulls with their offsets, in buffer order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, LeafHull)> + '_ {
        let mut offset = 0;
        std::iter::from_fn(move || {
            let (hull, next) = self.decode_at(offset)?;
            let at = offset;
            offset = next;
            Some((at, hull))
        })
    }

    /// Number of hulls in the buffer.
    pub fn len(&self) -> usize {
        self.iter().count()
    }
}
