use crate::WritingDirection;

/// Converts a raw (canonical) scroll offset into a direction-agnostic one.
///
/// The canonical raw convention for right-to-left surfaces is
/// [`RtlOffsetType::PositiveDescending`]: the raw offset is the distance from the physical left
/// edge, so the logical start sits at `content_extent - viewport_extent`. Results are clamped to
/// `>= 0`.
pub fn normalize(
    direction: WritingDirection,
    raw_offset: u64,
    viewport_extent: u32,
    content_extent: u64,
) -> u64 {
    match direction {
        WritingDirection::Ltr => raw_offset,
        WritingDirection::Rtl => content_extent
            .saturating_sub(viewport_extent as u64)
            .saturating_sub(raw_offset),
    }
}

/// Inverse of [`normalize`] for offsets within `[0, content_extent - viewport_extent]`.
///
/// Normalized offsets past the scrollable range map to a raw offset of `0`.
pub fn denormalize(
    direction: WritingDirection,
    normalized_offset: u64,
    viewport_extent: u32,
    content_extent: u64,
) -> u64 {
    // The rtl mapping is its own inverse.
    normalize(direction, normalized_offset, viewport_extent, content_extent)
}

/// Native right-to-left scroll offset conventions found on host surfaces.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RtlOffsetType {
    /// Offset runs from `0` at the logical start down to `-(content - viewport)`.
    #[default]
    Negative,
    /// Offset runs from `content - viewport` at the logical start down to `0`. This is the
    /// engine's canonical raw convention.
    PositiveDescending,
    /// Offset runs from `0` at the logical start up to `content - viewport`.
    PositiveAscending,
}

impl RtlOffsetType {
    /// Converts a native right-to-left offset into the canonical raw offset.
    pub fn to_canonical(self, native: i64, viewport_extent: u32, content_extent: u64) -> u64 {
        let max = content_extent.saturating_sub(viewport_extent as u64);
        match self {
            Self::Negative => max.saturating_sub(native.min(0).unsigned_abs()),
            Self::PositiveDescending => native.max(0).unsigned_abs().min(max),
            Self::PositiveAscending => max.saturating_sub(native.max(0).unsigned_abs()),
        }
    }

    /// Converts a canonical raw offset into this native convention.
    pub fn to_native(self, canonical: u64, viewport_extent: u32, content_extent: u64) -> i64 {
        let max = content_extent.saturating_sub(viewport_extent as u64);
        let canonical = canonical.min(max);
        let logical = max - canonical;
        match self {
            Self::Negative => -saturating_i64(logical),
            Self::PositiveDescending => saturating_i64(canonical),
            Self::PositiveAscending => saturating_i64(logical),
        }
    }
}

fn saturating_i64(v: u64) -> i64 {
    i64::try_from(v).unwrap_or(i64::MAX)
}
