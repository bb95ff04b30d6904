//! Associating designer zone markers with zones.

use log::{info, warn};
use nalgebra::Point3;

use crate::model::SpatialModel;

/// Outcome of [`assign_zone_markers`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MarkerReport {
    pub assigned: usize,
    /// Markers in a zone that already had one.
    pub duplicates: usize,
    /// Markers outside every zone.
    pub zoneless: usize,
}

/// Clears every zone's marker and gives each zone the first marker found
/// inside it. Markers are `(id, location)` pairs.
pub fn assign_zone_markers(model: &mut SpatialModel, markers: &[(usize, Point3<f32>)]) -> MarkerReport {
    for zone in &mut model.zones {
        zone.marker = None;
    }

    let mut report = MarkerReport::default();
    for &(id, location) in markers {
        let zone = model.point_zone(location) as usize;
        if zone == 0 {
            warn!("zone marker {id} is not inside any zone");
            report.zoneless += 1;
            continue;
        }
        match &mut model.zones[zone].marker {
            Some(existing) => {
                warn!("zone marker {id} shares zone {zone} with marker {existing}");
                report.duplicates += 1;
            }
            slot => {
                *slot = Some(id);
                report.assigned += 1;
            }
        }
    }

    info!(
        "Zone markers: {} assigned, {} duplicates, {} outside any zone",
        report.assigned, report.duplicates, report.zoneless
    );
    report
}
