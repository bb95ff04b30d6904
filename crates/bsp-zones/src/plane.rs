//! Plane representation and operations for BSP nodes.

use nalgebra::{Point3, Vector3};

/// Which side of a plane a point lies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaneSide {
    /// Point is in front of the plane (positive side of normal)
    Front,
    /// Point is behind the plane (negative side of normal)
    Back,
    /// Point lies on the plane (within epsilon tolerance)
    OnPlane,
}

/// A plane in 3D space, represented as `normal · point = offset`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane3D {
    normal: Vector3<f32>,
    offset: f32,
}

impl Plane3D {
    /// Creates a new plane from a normal vector and offset.
    /// The normal will be normalized automatically.
    ///
    /// # Panics
    /// Panics if the normal vector has zero length.
    pub fn new(normal: Vector3<f32>, offset: f32) -> Self {
        let norm = normal.norm();
        assert!(norm > f32::EPSILON, "Plane normal cannot be zero");
        Self {
            normal: normal / norm,
            offset: offset / norm,
        }
    }

    /// Creates a plane from a point on the plane and a normal vector.
    /// The normal will be normalized automatically.
    ///
    /// # Panics
    /// Panics if the normal vector has zero length.
    pub fn from_point_and_normal(point: Point3<f32>, normal: Vector3<f32>) -> Self {
        let norm = normal.norm();
        assert!(norm > f32::EPSILON, "Plane normal cannot be zero");
        let unit_normal = normal / norm;
        let offset = unit_normal.dot(&point.coords);
        Self {
            normal: unit_normal,
            offset,
        }
    }

    /// Returns the unit normal vector of the plane.
    #[inline]
    pub fn normal(&self) -> Vector3<f32> {
        self.normal
    }

    /// Returns the signed distance from the origin to the plane along the normal.
    #[inline]
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// The point of the plane closest to the origin.
    #[inline]
    pub fn base(&self) -> Point3<f32> {
        Point3::from(self.normal * self.offset)
    }

    /// Computes the signed distance from a point to the plane.
    /// - Positive: point is in front (same side as normal)
    /// - Negative: point is behind (opposite side from normal)
    /// - Zero: point is on the plane
    #[inline]
    pub fn signed_distance(&self, point: Point3<f32>) -> f32 {
        self.normal.dot(&point.coords) - self.offset
    }

    /// Classifies which side of the plane a point lies on, with a custom epsilon.
    pub fn classify_point_with_epsilon(&self, point: Point3<f32>, epsilon: f32) -> PlaneSide {
        let dist = self.signed_distance(point);
        if dist > epsilon {
            PlaneSide::Front
        } else if dist < -epsilon {
            PlaneSide::Back
        } else {
            PlaneSide::OnPlane
        }
    }

    /// Returns a new plane with the normal flipped (facing the opposite direction).
    #[inline]
    pub fn flipped(&self) -> Self {
        Self {
            normal: -self.normal,
            offset: -self.offset,
        }
    }

    /// Returns true when both planes face the same way.
    #[inline]
    pub fn faces_same_direction(&self, other: &Plane3D) -> bool {
        self.normal.dot(&other.normal) >= 0.0
    }

    /// Two unit axes spanning the plane, with `axis1 × axis2 == normal`.
    ///
    /// The first axis starts from X, or from Z when the normal is closest to
    /// the Z axis, and is orthogonalized against the normal.
    pub fn best_axis_vectors(&self) -> (Vector3<f32>, Vector3<f32>) {
        let n = self.normal;
        let (nx, ny, nz) = (n.x.abs(), n.y.abs(), n.z.abs());
        let seed = if nz > nx && nz > ny {
            Vector3::x()
        } else {
            Vector3::z()
        };
        let axis1 = (seed - n * seed.dot(&n)).normalize();
        let axis2 = n.cross(&axis1);
        (axis1, axis2)
    }

    /// Computes the intersection of a line segment with the plane.
    ///
    /// Returns `Some((t, point))` where:
    /// - `t` is the interpolation parameter (0.0 = start, 1.0 = end)
    /// - `point` is the intersection point
    ///
    /// Returns `None` if the segment is parallel to the plane or doesn't intersect.
    pub fn intersect_segment(
        &self,
        start: Point3<f32>,
        end: Point3<f32>,
    ) -> Option<(f32, Point3<f32>)> {
        let direction = end - start;
        let denom = self.normal.dot(&direction);

        // Segment is parallel to plane
        if denom.abs() < f32::EPSILON {
            return None;
        }

        let t = (self.offset - self.normal.dot(&start.coords)) / denom;

        // Intersection is outside the segment
        if !(0.0..=1.0).contains(&t) {
            return None;
        }

        let point = start + direction * t;
        Some((t, point))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn new_normalizes() {
        let plane = Plane3D::new(Vector3::new(0.0, 0.0, 2.0), 4.0);
        assert_approx_eq!(plane.normal().norm(), 1.0);
        assert_approx_eq!(plane.offset(), 2.0);
        assert_approx_eq!(plane.base().z, 2.0);
    }

    #[test]
    fn classify_respects_epsilon() {
        let plane = Plane3D::new(Vector3::new(1.0, 0.0, 0.0), 1.0);
        assert_eq!(
            plane.classify_point_with_epsilon(Point3::new(1.005, 0.0, 0.0), 0.01),
            PlaneSide::OnPlane
        );
        assert_eq!(
            plane.classify_point_with_epsilon(Point3::new(1.5, 0.0, 0.0), 0.01),
            PlaneSide::Front
        );
        assert_eq!(
            plane.classify_point_with_epsilon(Point3::new(0.0, 3.0, 0.0), 0.01),
            PlaneSide::Back
        );
    }

    #[test]
    fn best_axes_are_orthonormal_and_right_handed() {
        for normal in [
            Vector3::new(0.0, 0.0, 1.0),
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.0, -1.0, 0.0),
            Vector3::new(1.0, 2.0, 3.0),
        ] {
            let plane = Plane3D::new(normal, 0.0);
            let (a1, a2) = plane.best_axis_vectors();
            assert_approx_eq!(a1.norm(), 1.0);
            assert_approx_eq!(a2.norm(), 1.0);
            assert_approx_eq!(a1.dot(&plane.normal()), 0.0);
            assert_approx_eq!(a2.dot(&plane.normal()), 0.0);
            assert_approx_eq!(a1.cross(&a2).dot(&plane.normal()), 1.0, 1e-5);
        }
    }

    #[test]
    fn intersect_segment_midpoint() {
        let plane = Plane3D::new(Vector3::new(0.0, 1.0, 0.0), 0.0);
        let (t, p) = plane
            .intersect_segment(Point3::new(0.0, -1.0, 0.0), Point3::new(0.0, 3.0, 0.0))
            .unwrap();
        assert_approx_eq!(t, 0.25);
        assert_approx_eq!(p.y, 0.0);
    }

    #[test]
    fn flipped_negates_distance() {
        let plane = Plane3D::new(Vector3::new(0.0, 0.0, 1.0), 2.0);
        let p = Point3::new(0.0, 0.0, 5.0);
        assert_approx_eq!(plane.flipped().signed_distance(p), -plane.signed_distance(p));
        assert!(!plane.faces_same_direction(&plane.flipped()));
    }
}
