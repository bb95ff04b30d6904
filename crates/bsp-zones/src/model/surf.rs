//! BSP surfaces: the properties shared by all nodes lying in one polygon's plane.

use super::flags::PolyFlags;

/// One BSP surface.
///
/// Geometry is referenced by index into the model's point and vector
/// tables; the polygon outline itself lives on the nodes that use the surface.
#[derive(Debug, Clone, PartialEq)]
pub struct BspSurf {
    /// Base point (where texture U,V == 0,0).
    pub base: usize,
    /// Polygon normal.
    pub normal: usize,
    pub texture_u: usize,
    pub texture_v: usize,
    pub flags: PolyFlags,
    /// Brush this surface was carved from, if any.
    pub brush: Option<usize>,
}

impl BspSurf {
    #[inline]
    pub fn is_portal(&self) -> bool {
        self.flags.contains(PolyFlags::PORTAL)
    }
}
