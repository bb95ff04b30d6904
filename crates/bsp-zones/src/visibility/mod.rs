//! Visibility zoning.
//!
//! Rebuilds a model's leaves, zones, per-node zone stamps, zone masks and
//! zone connectivity from its BSP and its zone portal surfaces.
//!
//! The pass runs in order:
//! 1. number the outside leaves,
//! 2. generate portals between leaves and seal those covered by zone portals,
//! 3. merge leaves joined by open portals into zones,
//! 4. stamp node polygons with their zones, splitting them along zone borders,
//! 5. rebuild zone masks and zone connectivity.
//!
//! The pass works on a copy of the model and only replaces the caller's
//! model once every step has finished.

mod assign;
mod connectivity;
mod filter;
mod generate;
mod leaves;
mod portal;
mod zones;

pub use connectivity::build_zone_masks;
pub use portal::{Portal, PortalSet};

use log::info;

use crate::config::RebuildConfig;
use crate::error::ModelError;
use crate::model::{SpatialModel, Zone, MAX_ZONES};
use crate::progress::{NoStatus, StatusReporter};

use assign::ZoneAssigner;
use connectivity::build_connectivity;
use generate::PortalGenerator;
use leaves::assign_leaves;
use zones::{form_zones, zone_count};

/// Summary of one visibility rebuild.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct VisibilityReport {
    pub leaves: usize,
    pub portals: usize,
    /// Zone portal polygons found.
    pub zone_portals: usize,
    /// Portals sealed by those zone portal polygons.
    pub sealed_portals: usize,
    /// Distinct zones before folding into the zone limit.
    pub zones_found: usize,
    pub num_zones: usize,
    /// Node count after fragmenting polygons along zone borders.
    pub nodes: usize,
}

/// Rebuilds visibility zoning with the default configuration.
///
/// `root_outside` says whether the space around the root is open; it is
/// stored on the model for later passes.
pub fn rebuild_visibility(model: &mut SpatialModel, root_outside: bool) -> Result<VisibilityReport, ModelError> {
    rebuild_visibility_with(model, root_outside, &RebuildConfig::default(), &mut NoStatus)
}

pub fn rebuild_visibility_with<R: StatusReporter>(
    model: &mut SpatialModel,
    root_outside: bool,
    config: &RebuildConfig,
    status: &mut R,
) -> Result<VisibilityReport, ModelError> {
    rebuild_visibility_with_portals(model, root_outside, config, status).map(|(report, _)| report)
}

/// Like [`rebuild_visibility_with`], also handing back the portals found.
/// The model itself never keeps portals.
pub fn rebuild_visibility_with_portals<R: StatusReporter>(
    model: &mut SpatialModel,
    root_outside: bool,
    config: &RebuildConfig,
    status: &mut R,
) -> Result<(VisibilityReport, PortalSet), ModelError> {
    model.validate()?;

    let mut work = model.clone();
    work.root_outside = root_outside;
    work.leaves.clear();
    work.portal_nodes.clear();
    work.zones = vec![Zone::default(); MAX_ZONES];
    work.num_zones = 1;
    for node in &mut work.nodes {
        node.reset_derived();
    }

    if work.is_empty() {
        build_connectivity(&mut work);
        *model = work;
        return Ok((VisibilityReport { num_zones: 1, ..Default::default() }, PortalSet::default()));
    }

    status.status("Zoning");
    assign_leaves(&mut work, 0, root_outside);

    status.status("Generating portals");
    let portals = PortalGenerator::new(&work, config).generate();
    work.portal_nodes = portals.portal_nodes;

    status.status("Computing zones");
    let zones_found = form_zones(&mut work.leaves, &portals.set);
    work.num_zones = zone_count(zones_found);

    status.status("Assigning zones");
    let stats = ZoneAssigner::new(&mut work, config.precise_epsilon).assign();

    status.status("Building zone connectivity");
    build_zone_masks(&mut work);
    build_connectivity(&mut work);

    let report = VisibilityReport {
        leaves: work.leaves.len(),
        portals: portals.set.len(),
        zone_portals: portals.zone_portals,
        sealed_portals: portals.sealed_portals,
        zones_found,
        num_zones: work.num_zones,
        nodes: work.nodes.len(),
    };
    info!(
        "Zoning: {} leaves, {} portals ({} sealed), {} zones, {} polygons split into {} pieces",
        report.leaves,
        report.portals,
        portals.set.blocked_count(),
        report.num_zones,
        stats.fragmented,
        stats.fragments
    );

    *model = work;
    Ok((report, portals.set))
}
