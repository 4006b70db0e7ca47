/// The scrollable (primary) axis of a list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Layout {
    #[default]
    Vertical,
    Horizontal,
}

impl Layout {
    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::Horizontal)
    }
}

/// The writing direction of the surface hosting the list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WritingDirection {
    #[default]
    Ltr,
    Rtl,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollDirection {
    #[default]
    Forward,
    Backward,
}

/// How `scroll_to_item` picks a target offset for an index.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Align {
    /// Keep the current offset if the item is fully visible, otherwise scroll the minimum amount.
    #[default]
    Auto,
    /// Like `Auto` when the item is within one viewport of being visible, otherwise `Center`.
    Smart,
    Center,
    Start,
    End,
}

/// The index window to realize. Stops are inclusive.
///
/// `overscan_start <= visible_start <= visible_stop <= overscan_stop < count` holds for any
/// non-empty list; an empty list yields [`RenderWindow::EMPTY`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RenderWindow {
    pub overscan_start: usize,
    pub overscan_stop: usize,
    pub visible_start: usize,
    pub visible_stop: usize,
}

impl RenderWindow {
    pub const EMPTY: Self = Self {
        overscan_start: 0,
        overscan_stop: 0,
        visible_start: 0,
        visible_stop: 0,
    };

    /// Indexes to realize (overscan included).
    pub fn overscan_indexes(&self) -> core::ops::RangeInclusive<usize> {
        self.overscan_start..=self.overscan_stop
    }

    pub fn visible_indexes(&self) -> core::ops::RangeInclusive<usize> {
        self.visible_start..=self.visible_stop
    }
}

/// The side an item's primary-axis offset is measured from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Edge {
    Top,
    Left,
    Right,
}

/// Placement of a realized item. The cross axis always spans the full extent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Geometry {
    pub edge: Edge,
    /// Distance from `edge` to the item's leading edge along the primary axis.
    pub offset: u64,
    /// Extent along the primary axis.
    pub size: u32,
}

impl Geometry {
    pub fn end(&self) -> u64 {
        self.offset.saturating_add(self.size as u64)
    }
}

/// A realized index with its placement, as handed to a host's realize step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VirtualItem {
    pub index: usize,
    pub geometry: Geometry,
    /// Only set when the list was configured with `use_is_scrolling`.
    pub is_scrolling: bool,
}
