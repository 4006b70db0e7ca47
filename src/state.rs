use crate::{Layout, ScrollDirection, WritingDirection};

/// A snapshot of the engine's scroll state.
///
/// The engine owns the live copy and only changes it through its transition entry points
/// (`observe_scroll`, `scroll_to`, `scroll_to_item`) and the debounce timer.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollState {
    /// Raw offset in the canonical convention (see `RtlOffsetType::PositiveDescending`).
    pub offset: u64,
    /// Direction-agnostic offset from the logical start of the list.
    pub normalized_offset: u64,
    pub direction: ScrollDirection,
    pub is_scrolling: bool,
    /// Whether the current offset came from a programmatic scroll rather than the host surface.
    pub update_was_requested: bool,
}

impl ScrollState {
    pub(crate) fn update(&self) -> ScrollUpdate {
        ScrollUpdate {
            direction: self.direction,
            offset: self.normalized_offset,
            was_requested: self.update_was_requested,
        }
    }
}

/// Payload of `on_scroll_state_changed`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollUpdate {
    pub direction: ScrollDirection,
    /// Normalized offset.
    pub offset: u64,
    pub was_requested: bool,
}

/// A scroll position reported by the host surface, already converted to the canonical raw
/// convention.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollObservation {
    pub offset: u64,
    pub viewport_extent: u32,
    pub content_extent: u64,
}

/// A raw offset the engine wants reflected on the host surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollWrite {
    pub layout: Layout,
    pub direction: WritingDirection,
    /// Raw offset in the canonical convention.
    pub offset: u64,
    pub viewport_extent: u32,
    pub content_extent: u64,
}
