//! Axis-aligned bounding boxes.

use nalgebra::Point3;

use crate::Polygon;

/// An axis-aligned box. A freshly created box is *invalid* (inverted) and
/// becomes valid once a point is added.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub mins: Point3<f32>,
    pub maxs: Point3<f32>,
}

impl Default for Aabb {
    fn default() -> Self {
        Self::new_invalid()
    }
}

impl Aabb {
    #[inline]
    pub fn new(mins: Point3<f32>, maxs: Point3<f32>) -> Self {
        Self { mins, maxs }
    }

    /// An inverted box that any added point turns valid.
    #[inline]
    pub fn new_invalid() -> Self {
        Self::new(
            Point3::new(f32::MAX, f32::MAX, f32::MAX),
            Point3::new(-f32::MAX, -f32::MAX, -f32::MAX),
        )
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.mins.x <= self.maxs.x && self.mins.y <= self.maxs.y && self.mins.z <= self.maxs.z
    }

    /// Grows the box to enclose `point`.
    pub fn take_point(&mut self, point: Point3<f32>) {
        self.mins = self.mins.inf(&point);
        self.maxs = self.maxs.sup(&point);
    }

    pub fn take_polygon(&mut self, polygon: &Polygon) {
        for vertex in polygon.vertices() {
            self.take_point(*vertex);
        }
    }

    /// Grows the box to enclose `other`. Invalid boxes contribute nothing.
    pub fn merge(&mut self, other: &Aabb) {
        if other.is_valid() {
            self.mins = self.mins.inf(&other.mins);
            self.maxs = self.maxs.sup(&other.maxs);
        }
    }

    /// Whether `other` lies inside this box. An invalid box is contained by anything.
    pub fn contains(&self, other: &Aabb) -> bool {
        if !other.is_valid() {
            return true;
        }
        self.mins.x <= other.mins.x
            && self.mins.y <= other.mins.y
            && self.mins.z <= other.mins.z
            && self.maxs.x >= other.maxs.x
            && self.maxs.y >= other.maxs.y
            && self.maxs.z >= other.maxs.z
    }
}
