//! Small hand-built models shared by the unit tests.

use nalgebra::{Point3, Vector3};

use crate::config::RebuildConfig;
use crate::model::{NodeFlags, PolyFlags, SpatialModel};
use crate::{Plane3D, Polygon, Rectangle};

/// Index of the dividing wall in [`split_room`].
pub(crate) const SPLITTER: usize = 1;

/// A world small enough that f32 clipping stays exact to well under 1e-3.
pub(crate) fn test_config() -> RebuildConfig {
    RebuildConfig {
        world_max: 1024.0,
        bounds_extent: 64.0,
        ..RebuildConfig::default()
    }
}

pub(crate) fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[derive(Debug, Clone, Copy)]
pub(crate) enum Wall {
    XMin,
    XMax,
    YMin,
    YMax,
    ZMin,
    ZMax,
}

impl Wall {
    pub const ALL: [Wall; 6] = [Wall::XMin, Wall::XMax, Wall::YMin, Wall::YMax, Wall::ZMin, Wall::ZMax];

    /// The wall of the box `[min, max]` facing into the box.
    fn plane(self, min: Point3<f32>, max: Point3<f32>) -> Plane3D {
        match self {
            Wall::XMin => Plane3D::new(Vector3::x(), min.x),
            Wall::XMax => Plane3D::new(-Vector3::x(), -max.x),
            Wall::YMin => Plane3D::new(Vector3::y(), min.y),
            Wall::YMax => Plane3D::new(-Vector3::y(), -max.y),
            Wall::ZMin => Plane3D::new(Vector3::z(), min.z),
            Wall::ZMax => Plane3D::new(-Vector3::z(), -max.z),
        }
    }

    fn polygon(self, min: Point3<f32>, max: Point3<f32>) -> Polygon {
        let size = max - min;
        let rect = match self {
            Wall::XMin => Rectangle::new(min, Vector3::new(0.0, size.y, 0.0), Vector3::new(0.0, 0.0, size.z)),
            Wall::XMax => Rectangle::new(
                Point3::new(max.x, min.y, min.z),
                Vector3::new(0.0, 0.0, size.z),
                Vector3::new(0.0, size.y, 0.0),
            ),
            Wall::YMin => Rectangle::new(min, Vector3::new(0.0, 0.0, size.z), Vector3::new(size.x, 0.0, 0.0)),
            Wall::YMax => Rectangle::new(
                Point3::new(min.x, max.y, min.z),
                Vector3::new(size.x, 0.0, 0.0),
                Vector3::new(0.0, 0.0, size.z),
            ),
            Wall::ZMin => Rectangle::new(min, Vector3::new(size.x, 0.0, 0.0), Vector3::new(0.0, size.y, 0.0)),
            Wall::ZMax => Rectangle::new(
                Point3::new(min.x, min.y, max.z),
                Vector3::new(0.0, size.y, 0.0),
                Vector3::new(size.x, 0.0, 0.0),
            ),
        };
        rect.into()
    }
}

/// Adds a node with its own surface. Returns the node index.
pub(crate) fn add_plane_node(
    model: &mut SpatialModel,
    plane: &Plane3D,
    polygon: Option<&Polygon>,
    node_flags: NodeFlags,
    poly_flags: PolyFlags,
) -> usize {
    let surf = model.add_surf(plane, poly_flags);
    model.add_node(surf, polygon, node_flags)
}

/// Adds inward-facing solid walls of the box `[min, max]`, each the front
/// child of the one before. Returns the first node.
pub(crate) fn add_wall_chain(
    model: &mut SpatialModel,
    min: Point3<f32>,
    max: Point3<f32>,
    walls: &[Wall],
) -> Option<usize> {
    let mut first = None;
    let mut previous: Option<usize> = None;
    for wall in walls {
        let polygon = wall.polygon(min, max);
        let node = add_plane_node(model, &wall.plane(min, max), Some(&polygon), NodeFlags::empty(), PolyFlags::empty());
        match previous {
            Some(previous) => model.nodes[previous].front = Some(node),
            None => first = Some(node),
        }
        previous = Some(node);
    }
    first
}

/// The room `[-2, 2]^3` carved out of solid, divided at `x = 0` by a
/// non-solid sheet. With `portal` the sheet is a zone portal.
///
/// The floor is the root; the back half (leaf 0) and front half (leaf 1)
/// each close off with four more walls. Rebuild with `root_outside = false`.
pub(crate) fn split_room(portal: bool) -> SpatialModel {
    let min = Point3::new(-2.0, -2.0, -2.0);
    let max = Point3::new(2.0, 2.0, 2.0);
    let mut model = SpatialModel::new();
    model.root_outside = false;

    let floor = Wall::ZMin.polygon(min, max);
    let root = add_plane_node(&mut model, &Wall::ZMin.plane(min, max), Some(&floor), NodeFlags::empty(), PolyFlags::empty());

    let sheet = Polygon::new(vec![
        Point3::new(0.0, -2.0, -2.0),
        Point3::new(0.0, 2.0, -2.0),
        Point3::new(0.0, 2.0, 2.0),
        Point3::new(0.0, -2.0, 2.0),
    ]);
    let flags = if portal { PolyFlags::PORTAL } else { PolyFlags::empty() };
    let splitter = add_plane_node(&mut model, &Plane3D::new(Vector3::x(), 0.0), Some(&sheet), NodeFlags::NOT_CSG, flags);
    model.nodes[root].front = Some(splitter);

    let rest = [Wall::YMin, Wall::YMax, Wall::ZMax];
    let mut back_walls = vec![Wall::XMin];
    back_walls.extend(rest);
    let mut front_walls = vec![Wall::XMax];
    front_walls.extend(rest);

    let back = add_wall_chain(&mut model, min, Point3::new(0.0, max.y, max.z), &back_walls);
    let front = add_wall_chain(&mut model, Point3::new(0.0, min.y, min.z), max, &front_walls);
    model.nodes[splitter].back = back;
    model.nodes[splitter].front = front;
    model
}

/// A closed room `[-2, 2]^3` with nothing inside. Rebuild with
/// `root_outside = false`.
pub(crate) fn sealed_room() -> SpatialModel {
    let mut model = SpatialModel::new();
    model.root_outside = false;
    add_wall_chain(&mut model, Point3::new(-2.0, -2.0, -2.0), Point3::new(2.0, 2.0, 2.0), &Wall::ALL);
    model
}

/// One see-through sheet at `z = 0` in open space.
pub(crate) fn open_sheet() -> SpatialModel {
    let mut model = SpatialModel::new();
    let sheet: Polygon = Rectangle::new(Point3::new(-1.0, -1.0, 0.0), Vector3::x() * 2.0, Vector3::y() * 2.0).into();
    add_plane_node(&mut model, &Plane3D::new(Vector3::z(), 0.0), Some(&sheet), NodeFlags::NOT_VIS_BLOCKING, PolyFlags::empty());
    model
}

/// A convex solid bounded by the given outward planes, each the back child
/// of the previous, floating in open space.
pub(crate) fn convex_solid(planes: &[Plane3D]) -> SpatialModel {
    let mut model = SpatialModel::new();
    let mut previous: Option<usize> = None;
    for plane in planes {
        let outline: Polygon = Rectangle::infinite(plane, 1.0).into();
        let node = add_plane_node(&mut model, plane, Some(&outline), NodeFlags::empty(), PolyFlags::empty());
        if let Some(previous) = previous {
            model.nodes[previous].back = Some(node);
        }
        previous = Some(node);
    }
    model
}

/// A regular `sides`-gon around `center` in the plane spanned by `u` and `v`.
pub(crate) fn regular_polygon(center: Point3<f32>, u: Vector3<f32>, v: Vector3<f32>, radius: f32, sides: usize) -> Polygon {
    Polygon::new(
        (0..sides)
            .map(|i| {
                let angle = std::f32::consts::TAU * i as f32 / sides as f32;
                center + (u * angle.cos() + v * angle.sin()) * radius
            })
            .collect(),
    )
}

/// Area of [`regular_polygon`] with the same radius and side count.
pub(crate) fn regular_polygon_area(radius: f32, sides: usize) -> f32 {
    0.5 * sides as f32 * radius * radius * (std::f32::consts::TAU / sides as f32).sin()
}

/// Outward planes of a prism: `sides` faces around the Z axis at distance
/// `radius`, then the caps at `z = ±half_height`.
pub(crate) fn prism_planes(sides: usize, radius: f32, half_height: f32) -> Vec<Plane3D> {
    let mut planes: Vec<Plane3D> = (0..sides)
        .map(|i| {
            let angle = std::f32::consts::TAU * i as f32 / sides as f32;
            Plane3D::new(Vector3::new(angle.cos(), angle.sin(), 0.0), radius)
        })
        .collect();
    planes.push(Plane3D::new(Vector3::z(), half_height));
    planes.push(Plane3D::new(-Vector3::z(), half_height));
    planes
}

/// Outward planes of the cube `[-half, half]^3`.
pub(crate) fn cube_planes(half: f32) -> Vec<Plane3D> {
    [Vector3::x(), -Vector3::x(), Vector3::y(), -Vector3::y(), Vector3::z(), -Vector3::z()]
        .into_iter()
        .map(|normal| Plane3D::new(normal, half))
        .collect()
}
