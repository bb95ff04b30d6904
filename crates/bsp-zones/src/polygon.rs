//! Convex polygon representation used for portals, fragments and hull faces.

use nalgebra::{Point3, Vector3};

/// Maximum number of vertices a polygon is expected to carry.
pub const MAX_VERTICES: usize = 16;

/// Polygons reaching this many vertices are bisected before being split again.
pub const VERTEX_THRESHOLD: usize = MAX_VERTICES - 2;

/// A convex polygon in 3D space, defined by an ordered list of vertices.
///
/// Vertices should be coplanar and in counter-clockwise winding order
/// when viewed from the front (the direction the normal points).
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    vertices: Vec<Point3<f32>>,
}

impl Polygon {
    /// Creates a new polygon from a list of vertices.
    ///
    /// # Panics (debug builds only)
    /// Panics if fewer than 3 vertices are provided.
    pub fn new(vertices: Vec<Point3<f32>>) -> Self {
        debug_assert!(
            vertices.len() >= 3,
            "Polygon must have at least 3 vertices"
        );
        Self { vertices }
    }

    /// Returns the vertices of the polygon.
    #[inline]
    pub fn vertices(&self) -> &[Point3<f32>] {
        &self.vertices
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Returns true if the polygon has no vertices (always false for valid polygons).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Whether the polygon should be bisected before it is split any further.
    #[inline]
    pub fn needs_bisect(&self) -> bool {
        self.vertices.len() >= VERTEX_THRESHOLD
    }

    /// Computes the (unnormalized) normal vector of the polygon.
    ///
    /// Uses the first three vertices to compute the normal via cross product.
    /// The direction follows the right-hand rule based on vertex winding.
    pub fn normal(&self) -> Vector3<f32> {
        let a = &self.vertices[0];
        let b = &self.vertices[1];
        let c = &self.vertices[2];
        let ab = b - a;
        let ac = c - a;
        ab.cross(&ac)
    }

    /// Computes the unit normal vector of the polygon.
    ///
    /// Returns `None` if the first three vertices are collinear.
    pub fn unit_normal(&self) -> Option<Vector3<f32>> {
        let n = self.normal();
        let len = n.norm();
        if len > f32::EPSILON {
            Some(n / len)
        } else {
            None
        }
    }

    /// Area of the polygon, by fanning triangles out of the first vertex.
    pub fn area(&self) -> f32 {
        let origin = self.vertices[0];
        let mut cross = Vector3::zeros();
        for pair in self.vertices[1..].windows(2) {
            cross += (pair[0] - origin).cross(&(pair[1] - origin));
        }
        cross.norm() * 0.5
    }

    /// Reverses the winding order in place, flipping the facing direction.
    pub fn reverse(&mut self) {
        self.vertices.reverse();
    }

    /// Returns a copy with the opposite winding.
    pub fn reversed(&self) -> Self {
        let mut poly = self.clone();
        poly.reverse();
        poly
    }

    /// Splits the polygon in two along the diagonal from vertex 0 to vertex `n / 2`.
    ///
    /// `self` keeps vertices `0..=n/2`; the returned half holds the rest,
    /// closed back to vertex 0. Both halves share the diagonal.
    ///
    /// # Panics
    /// Panics if the polygon has fewer than 4 vertices.
    pub fn split_in_half(&mut self) -> Polygon {
        let n = self.vertices.len();
        assert!(n >= 4, "Cannot bisect a polygon with {n} vertices");
        let m = n / 2;
        let mut other: Vec<Point3<f32>> = self.vertices[m..].to_vec();
        other.push(self.vertices[0]);
        self.vertices.truncate(m + 1);
        Polygon::new(other)
    }
}
