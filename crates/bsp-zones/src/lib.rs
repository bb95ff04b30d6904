//! Visibility zoning and bounding hulls for prebuilt BSP models.
//!
//! Given a [`SpatialModel`] whose tree has already been built by CSG, this
//! crate derives:
//!
//! - outside leaves, portals between them, and zones of leaves separated by
//!   zone portal surfaces ([`rebuild_visibility`]),
//! - per-node zone stamps, zone masks and zone connectivity,
//! - convex hulls around solid leaves and per-node boxes ([`rebuild_bounds`]),
//! - zone marker association ([`assign_zone_markers`]).

mod aabb;
mod bounds;
mod config;
mod cuttable;
mod error;
mod markers;
pub mod model;
mod plane;
mod polygon;
mod progress;
mod rectangle;
pub mod visibility;

#[cfg(test)]
pub(crate) mod fixtures;

pub use aabb::Aabb;
pub use bounds::{rebuild_bounds, rebuild_bounds_with, BoundsReport};
pub use config::{RebuildConfig, HALF_WORLD_MAX, WORLD_MAX};
pub use cuttable::{Cuttable, Split};
pub use error::{ConfigError, ModelError};
pub use markers::{assign_zone_markers, MarkerReport};
pub use model::SpatialModel;
pub use plane::{Plane3D, PlaneSide};
pub use polygon::{Polygon, MAX_VERTICES, VERTEX_THRESHOLD};
pub use progress::{FnStatus, NoStatus, StatusReporter};
pub use rectangle::Rectangle;
pub use visibility::{
    rebuild_visibility, rebuild_visibility_with, rebuild_visibility_with_portals, VisibilityReport,
};
