use listwindow::{Layout, RtlOffsetType, ScrollTarget, ScrollWrite, WritingDirection};

/// The host's native scroll container.
pub trait NativeSurface {
    /// Sets the native scroll position along `layout`'s axis, in the surface's own convention.
    fn write_native_offset(&mut self, layout: Layout, native: i64);
}

/// Converts a native scroll position into the engine's canonical raw offset.
///
/// Only right-to-left horizontal surfaces have a convention to translate; everywhere else the
/// native offset is the raw offset (negative elastic overscroll reads as `0`).
pub fn canonical_offset(
    rtl_offset_type: RtlOffsetType,
    layout: Layout,
    direction: WritingDirection,
    native: i64,
    viewport_extent: u32,
    content_extent: u64,
) -> u64 {
    if layout.is_horizontal() && direction == WritingDirection::Rtl {
        rtl_offset_type.to_canonical(native, viewport_extent, content_extent)
    } else {
        u64::try_from(native).unwrap_or(0)
    }
}

/// The native scroll position for an engine write.
pub fn native_offset(rtl_offset_type: RtlOffsetType, write: &ScrollWrite) -> i64 {
    if write.layout.is_horizontal() && write.direction == WritingDirection::Rtl {
        rtl_offset_type.to_native(write.offset, write.viewport_extent, write.content_extent)
    } else {
        i64::try_from(write.offset).unwrap_or(i64::MAX)
    }
}

/// A [`ScrollTarget`] that forwards engine writes to a [`NativeSurface`] in its native
/// right-to-left convention.
#[derive(Clone, Debug)]
pub struct SurfaceTarget<S> {
    surface: S,
    rtl_offset_type: RtlOffsetType,
}

impl<S: NativeSurface> SurfaceTarget<S> {
    pub fn new(surface: S, rtl_offset_type: RtlOffsetType) -> Self {
        Self {
            surface,
            rtl_offset_type,
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    pub fn rtl_offset_type(&self) -> RtlOffsetType {
        self.rtl_offset_type
    }
}

impl<S: NativeSurface> ScrollTarget for SurfaceTarget<S> {
    fn write_scroll_offset(&mut self, write: ScrollWrite) {
        let native = native_offset(self.rtl_offset_type, &write);
        vtrace!(
            canonical = write.offset,
            native,
            convention = ?self.rtl_offset_type,
            "write_native_offset"
        );
        self.surface.write_native_offset(write.layout, native);
    }
}
