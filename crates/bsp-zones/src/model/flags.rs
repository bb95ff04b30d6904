//! Node and polygon flag sets.

bitflags::bitflags! {
    /// Flags associated with a BSP node.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u8 {
        /// Node is not a CSG splitter, i.e. a transparent polygon.
        const NOT_CSG          = 0x01;
        /// Node does not block visibility, e.g. an invisible collision hull.
        const NOT_VIS_BLOCKING = 0x04;
        /// Polygon has been replaced by zone fragments further down the
        /// coplanar chain. The vertices stay so the node keeps its CSG role.
        const FRAGMENTED       = 0x10;
        /// Node was generated by a rebuild pass rather than by CSG.
        const IS_NEW           = 0x20;
    }
}

bitflags::bitflags! {
    /// Flags describing a BSP surface.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct PolyFlags: u32 {
        const INVISIBLE = 0x0000_0001;
        const NOT_SOLID = 0x0000_0008;
        const SEMISOLID = 0x0000_0020;
        const TWO_SIDED = 0x0000_0100;
        /// Designer-placed separator between zones.
        const PORTAL    = 0x0400_0000;
    }
}
