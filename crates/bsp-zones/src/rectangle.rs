//! Rectangles (quads): partition planes made "infinite" and the faces of the
//! starting bounds cube.

use nalgebra::{Point3, Vector3};

use crate::{Plane3D, Polygon};

/// A rectangle (quad) in 3D space, defined by a corner and two edge vectors.
///
/// The four vertices are:
/// - `origin`
/// - `origin + u`
/// - `origin + u + v`
/// - `origin + v`
#[derive(Debug, Clone, PartialEq)]
pub struct Rectangle {
    origin: Point3<f32>,
    u: Vector3<f32>,
    v: Vector3<f32>,
}

impl Rectangle {
    /// Creates a new rectangle from an origin corner and two edge vectors.
    ///
    /// The vertices will be: origin, origin+u, origin+u+v, origin+v (counter-clockwise).
    pub fn new(origin: Point3<f32>, u: Vector3<f32>, v: Vector3<f32>) -> Self {
        Self { origin, u, v }
    }

    /// A square lying in `plane`, centered on the plane's base point and
    /// reaching `extent` along both in-plane axes. Wound to face along the
    /// plane normal.
    pub fn infinite(plane: &Plane3D, extent: f32) -> Self {
        let (axis1, axis2) = plane.best_axis_vectors();
        let origin = plane.base() - axis1 * extent - axis2 * extent;
        Self::new(origin, axis1 * (2.0 * extent), axis2 * (2.0 * extent))
    }

    /// The six outward-facing faces of the axis-aligned cube `[-extent, extent]³`.
    pub fn cube_faces(extent: f32) -> [Rectangle; 6] {
        let e = extent;
        let span = 2.0 * e;
        let (x, y, z) = (Vector3::x() * span, Vector3::y() * span, Vector3::z() * span);
        [
            // +Z, -Z
            Self::new(Point3::new(-e, -e, e), x, y),
            Self::new(Point3::new(-e, -e, -e), y, x),
            // +Y, -Y
            Self::new(Point3::new(-e, e, -e), z, x),
            Self::new(Point3::new(-e, -e, -e), x, z),
            // +X, -X
            Self::new(Point3::new(e, -e, -e), y, z),
            Self::new(Point3::new(-e, -e, -e), z, y),
        ]
    }

    /// Returns the four vertices of the rectangle.
    ///
    /// Order: origin, origin+u, origin+u+v, origin+v (counter-clockwise).
    pub fn vertices(&self) -> [Point3<f32>; 4] {
        [
            self.origin,
            self.origin + self.u,
            self.origin + self.u + self.v,
            self.origin + self.v,
        ]
    }

    /// Computes the (unnormalized) normal vector of the rectangle.
    ///
    /// The direction follows the right-hand rule: u × v.
    pub fn normal(&self) -> Vector3<f32> {
        self.u.cross(&self.v)
    }

    /// Returns the plane that this rectangle lies on.
    ///
    /// # Panics
    /// Panics if the rectangle is degenerate (u and v are parallel).
    pub fn plane(&self) -> Plane3D {
        Plane3D::from_point_and_normal(self.origin, self.normal())
    }
}

impl From<Rectangle> for Polygon {
    fn from(rectangle: Rectangle) -> Self {
        Polygon::new(rectangle.vertices().to_vec())
    }
}

impl From<&Rectangle> for Polygon {
    fn from(rectangle: &Rectangle) -> Self {
        Polygon::new(rectangle.vertices().to_vec())
    }
}
