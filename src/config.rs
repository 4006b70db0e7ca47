use alloc::string::ToString;
use alloc::sync::Arc;
use core::str::FromStr;

use crate::{ConfigError, Layout, WritingDirection};

/// Per-item extent along the primary axis.
#[derive(Clone)]
pub enum ItemSize {
    /// Every item has the same size.
    Fixed(u32),
    /// Size of item `i`. Called lazily, at most once per index between resets.
    PerIndex(Arc<dyn Fn(usize) -> u32 + Send + Sync>),
}

impl ItemSize {
    pub fn per_index(f: impl Fn(usize) -> u32 + Send + Sync + 'static) -> Self {
        Self::PerIndex(Arc::new(f))
    }

    /// Identity comparison: closures compare by allocation, not by behavior.
    pub fn same_as(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Fixed(a), Self::Fixed(b)) => a == b,
            (Self::PerIndex(a), Self::PerIndex(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// The shared size of a fixed-size list.
    pub fn fixed(&self) -> Option<u32> {
        match self {
            Self::Fixed(size) => Some(*size),
            Self::PerIndex(_) => None,
        }
    }

    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Self::Fixed(_) => "fixed",
            Self::PerIndex(_) => "per-index",
        }
    }
}

impl core::fmt::Debug for ItemSize {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Fixed(v) => f.debug_tuple("Fixed").field(v).finish(),
            Self::PerIndex(_) => f.write_str("PerIndex(..)"),
        }
    }
}

/// Initial scroll offset configuration.
///
/// The value is a logical (normalized) offset: for right-to-left horizontal lists it is measured
/// from the logical start, not from the native scroll origin.
#[derive(Clone)]
pub enum InitialOffset {
    /// A fixed initial offset.
    Value(u64),
    /// A lazily evaluated initial offset provider (called by `ListWindow::new`).
    Provider(Arc<dyn Fn() -> u64 + Send + Sync>),
}

impl InitialOffset {
    pub(crate) fn resolve(&self) -> u64 {
        match self {
            Self::Value(v) => *v,
            Self::Provider(f) => f(),
        }
    }
}

impl core::fmt::Debug for InitialOffset {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Value(v) => f.debug_tuple("Value").field(v).finish(),
            Self::Provider(_) => f.write_str("Provider(..)"),
        }
    }
}

/// Configuration for [`crate::ListWindow`].
///
/// A configuration is replaced wholesale via `ListWindow::set_config`; it is either accepted as a
/// whole or rejected before the engine changes any state. Cloning is cheap: closures live in
/// `Arc`s, so hosts can tweak a field and hand the copy back.
#[derive(Clone)]
pub struct ListConfig {
    pub item_count: usize,
    pub item_size: ItemSize,
    pub layout: Layout,
    pub direction: WritingDirection,
    pub overscan_count: usize,

    /// Viewport extent along the primary axis (height for vertical lists, width for horizontal
    /// ones). `None` stands for a non-numeric host extent and is rejected.
    pub viewport_extent: Option<u32>,

    /// Size assumed for items that were not measured yet (variable sizing only).
    pub estimated_item_size: u32,

    pub initial_offset: Option<InitialOffset>,

    /// Quiet period after the last scroll before the list leaves the in-motion state.
    pub is_scrolling_reset_delay_ms: u64,

    /// Whether realized items receive the in-motion flag. When `false` they always see `false`.
    pub use_is_scrolling: bool,
}

impl ListConfig {
    /// Creates a vertical, left-to-right configuration.
    ///
    /// The viewport extent must still be set (`with_viewport_extent`) before the configuration is
    /// accepted by an engine.
    pub fn new(item_count: usize, item_size: ItemSize) -> Self {
        Self {
            item_count,
            item_size,
            layout: Layout::Vertical,
            direction: WritingDirection::Ltr,
            overscan_count: 2,
            viewport_extent: None,
            estimated_item_size: 50,
            initial_offset: None,
            is_scrolling_reset_delay_ms: 150,
            use_is_scrolling: false,
        }
    }

    pub fn fixed(item_count: usize, item_size: u32) -> Self {
        Self::new(item_count, ItemSize::Fixed(item_size))
    }

    pub fn variable(
        item_count: usize,
        item_size: impl Fn(usize) -> u32 + Send + Sync + 'static,
    ) -> Self {
        Self::new(item_count, ItemSize::per_index(item_size))
    }

    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_direction(mut self, direction: WritingDirection) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_overscan_count(mut self, overscan_count: usize) -> Self {
        self.overscan_count = overscan_count;
        self
    }

    pub fn with_viewport_extent(mut self, viewport_extent: u32) -> Self {
        self.viewport_extent = Some(viewport_extent);
        self
    }

    pub fn with_estimated_item_size(mut self, estimated_item_size: u32) -> Self {
        self.estimated_item_size = estimated_item_size;
        self
    }

    pub fn with_initial_offset(mut self, initial_offset: u64) -> Self {
        self.initial_offset = Some(InitialOffset::Value(initial_offset));
        self
    }

    pub fn with_initial_offset_provider(
        mut self,
        initial_offset: impl Fn() -> u64 + Send + Sync + 'static,
    ) -> Self {
        self.initial_offset = Some(InitialOffset::Provider(Arc::new(initial_offset)));
        self
    }

    pub fn with_is_scrolling_reset_delay_ms(mut self, delay_ms: u64) -> Self {
        self.is_scrolling_reset_delay_ms = delay_ms;
        self
    }

    pub fn with_use_is_scrolling(mut self, use_is_scrolling: bool) -> Self {
        self.use_is_scrolling = use_is_scrolling;
        self
    }

    /// Applies a legacy `direction` spelling (see [`resolve_orientation`]).
    pub fn with_orientation(mut self, direction: &str) -> Result<Self, ConfigError> {
        let (layout, direction) = resolve_orientation(direction, Some(self.layout))?;
        self.layout = layout;
        self.direction = direction;
        Ok(self)
    }

    /// The primary-axis viewport extent, once validated.
    pub fn viewport(&self) -> u32 {
        self.viewport_extent.unwrap_or(0)
    }

    pub fn is_rtl_horizontal(&self) -> bool {
        self.layout.is_horizontal() && self.direction == WritingDirection::Rtl
    }

    /// Strategy-independent validation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.viewport_extent.is_none() {
            return Err(ConfigError::MissingViewportExtent {
                layout: self.layout,
            });
        }
        if let ItemSize::Fixed(0) = self.item_size {
            return Err(ConfigError::ZeroItemSize);
        }
        if self.estimated_item_size == 0 {
            return Err(ConfigError::ZeroEstimatedItemSize);
        }
        Ok(())
    }

    /// Whether switching from `self` to `next` can change any item's placement.
    pub(crate) fn same_geometry_inputs(&self, next: &Self) -> bool {
        self.item_size.same_as(&next.item_size)
            && self.layout == next.layout
            && self.direction == next.direction
    }
}

impl core::fmt::Debug for ListConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ListConfig")
            .field("item_count", &self.item_count)
            .field("item_size", &self.item_size)
            .field("layout", &self.layout)
            .field("direction", &self.direction)
            .field("overscan_count", &self.overscan_count)
            .field("viewport_extent", &self.viewport_extent)
            .field("estimated_item_size", &self.estimated_item_size)
            .field("initial_offset", &self.initial_offset)
            .field(
                "is_scrolling_reset_delay_ms",
                &self.is_scrolling_reset_delay_ms,
            )
            .field("use_is_scrolling", &self.use_is_scrolling)
            .finish()
    }
}

impl FromStr for Layout {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "vertical" => Ok(Self::Vertical),
            "horizontal" => Ok(Self::Horizontal),
            other => Err(ConfigError::UnknownOrientation(other.to_string())),
        }
    }
}

impl FromStr for WritingDirection {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ltr" => Ok(Self::Ltr),
            "rtl" => Ok(Self::Rtl),
            other => Err(ConfigError::UnknownOrientation(other.to_string())),
        }
    }
}

/// Translates the historical single `direction` spelling into a `(Layout, WritingDirection)`
/// pair.
///
/// `direction` may be a writing direction (`"ltr"`, `"rtl"`) or, in the legacy form, an axis
/// (`"vertical"`, `"horizontal"`). Either side saying horizontal makes the list horizontal, so
/// the only rejected pair is the legacy `"vertical"` with an explicit horizontal `layout`.
pub fn resolve_orientation(
    direction: &str,
    layout: Option<Layout>,
) -> Result<(Layout, WritingDirection), ConfigError> {
    if let Ok(writing) = direction.parse::<WritingDirection>() {
        return Ok((layout.unwrap_or_default(), writing));
    }

    match (direction.parse::<Layout>()?, layout) {
        (Layout::Vertical, Some(Layout::Horizontal)) => Err(ConfigError::ConflictingLayout {
            direction: direction.to_string(),
            layout: Layout::Horizontal,
        }),
        (legacy, _) => Ok((legacy, WritingDirection::Ltr)),
    }
}
