//! Polygon splitting against planes.

use crate::{Plane3D, PlaneSide, Polygon};

/// Result of splitting geometry with a plane.
#[derive(Debug, Clone, PartialEq)]
pub enum Split {
    /// All vertices lie on the plane (within epsilon)
    Coplanar,
    /// No vertex lies behind the plane
    Front,
    /// No vertex lies in front of the plane
    Back,
    /// Vertices on both sides; the polygon was cut in two
    Spanning { front: Polygon, back: Polygon },
}

/// Trait for geometry that can be split by a plane.
pub trait Cuttable {
    /// Splits the geometry by a plane, treating vertices within `epsilon`
    /// of the plane as lying on it.
    ///
    /// # Return values
    ///
    /// - **Coplanar**: every vertex is within `epsilon`
    /// - **Front** / **Back**: the geometry lies on one side (touching allowed)
    /// - **Spanning**: both parts, with on-plane vertices shared by each
    fn split(&self, plane: &Plane3D, epsilon: f32) -> Split;
}

impl Cuttable for Polygon {
    fn split(&self, plane: &Plane3D, epsilon: f32) -> Split {
        let mut max_dist = f32::NEG_INFINITY;
        let mut min_dist = f32::INFINITY;
        for vertex in self.vertices() {
            let dist = plane.signed_distance(*vertex);
            max_dist = max_dist.max(dist);
            min_dist = min_dist.min(dist);
        }

        if max_dist < epsilon && min_dist > -epsilon {
            Split::Coplanar
        } else if max_dist < epsilon {
            Split::Back
        } else if min_dist > -epsilon {
            Split::Front
        } else {
            split_polygon(self, plane, epsilon)
        }
    }
}

/// Splits a spanning polygon into front and back parts.
///
/// Uses a variant of the Sutherland-Hodgman algorithm:
/// walks the polygon edges and builds two vertex lists,
/// adding intersection points when edges cross the plane.
fn split_polygon(polygon: &Polygon, plane: &Plane3D, epsilon: f32) -> Split {
    let vertices = polygon.vertices();
    let n = vertices.len();

    let mut front_verts = Vec::with_capacity(n + 1);
    let mut back_verts = Vec::with_capacity(n + 1);

    // Classify all vertices upfront
    let sides: Vec<PlaneSide> = vertices
        .iter()
        .map(|v| plane.classify_point_with_epsilon(*v, epsilon))
        .collect();

    for i in 0..n {
        let current = vertices[i];
        let current_side = sides[i];
        let next_idx = (i + 1) % n;
        let next = vertices[next_idx];
        let next_side = sides[next_idx];

        match current_side {
            PlaneSide::Front => front_verts.push(current),
            PlaneSide::Back => back_verts.push(current),
            PlaneSide::OnPlane => {
                // On-plane vertices go to both sides
                front_verts.push(current);
                back_verts.push(current);
            }
        }

        let crosses = matches!(
            (current_side, next_side),
            (PlaneSide::Front, PlaneSide::Back) | (PlaneSide::Back, PlaneSide::Front)
        );

        if crosses {
            if let Some((_, intersection)) = plane.intersect_segment(current, next) {
                front_verts.push(intersection);
                back_verts.push(intersection);
            }
        }
    }

    // Distances sitting exactly on the threshold can leave one side degenerate.
    if front_verts.len() < 3 {
        return Split::Back;
    }
    if back_verts.len() < 3 {
        return Split::Front;
    }

    Split::Spanning {
        front: Polygon::new(front_verts),
        back: Polygon::new(back_verts),
    }
}
