use alloc::boxed::Box;
use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::cache::GeometryCache;
use crate::debounce::Debouncer;
use crate::range::overscan_amounts;
use crate::{
    Align, ConfigError, Edge, Error, FixedSize, Geometry, InitialOffset, Layout, ListConfig,
    ManualTimer, MeasureError, Metrics, RenderWindow, ScrollDirection, ScrollObservation,
    ScrollState, ScrollUpdate, ScrollWrite, Timer, VariableSize, VirtualItem, WritingDirection,
    denormalize, normalize, offset_for_index, resolve_range,
};

/// Fired with the new window whenever it differs from the last delivered one.
pub type OnWindowChanged = Arc<dyn Fn(RenderWindow) + Send + Sync>;

/// Fired with the new scroll update whenever it differs from the last delivered one.
pub type OnScrollStateChanged = Arc<dyn Fn(ScrollUpdate) + Send + Sync>;

/// The host's native scroll position, written to after programmatic scrolls.
pub trait ScrollTarget {
    fn write_scroll_offset(&mut self, write: ScrollWrite);
}

impl<F: FnMut(ScrollWrite)> ScrollTarget for F {
    fn write_scroll_offset(&mut self, write: ScrollWrite) {
        self(write)
    }
}

/// A headless windowing engine.
///
/// This type is UI-agnostic:
/// - It does not hold any UI objects.
/// - The host drives it with scroll observations, programmatic scroll requests, and timer fires.
/// - Rendering is exposed as a window of indexes plus per-index [`Geometry`].
///
/// All transitions run synchronously in the call that triggered them. A transition that would
/// leave the offset unchanged is a no-op: it neither re-arms the debounce timer nor notifies.
pub struct ListWindow<M: Metrics = FixedSize, T: Timer = ManualTimer> {
    config: ListConfig,
    metrics: M,
    metrics_state: M::State,
    scroll: ScrollState,
    content_extent: u64,

    debounce: Debouncer<T>,
    cache: GeometryCache,
    target: Option<Box<dyn ScrollTarget>>,

    on_window_changed: Option<OnWindowChanged>,
    on_scroll_state_changed: Option<OnScrollStateChanged>,
    last_window: Option<RenderWindow>,
    last_scroll: Option<ScrollUpdate>,

    notify_depth: usize,
    notify_pending: bool,
}

impl ListWindow<FixedSize, ManualTimer> {
    /// A fixed-size list debounced by a [`ManualTimer`].
    pub fn fixed(config: ListConfig) -> Result<Self, Error> {
        Self::new(config, FixedSize, ManualTimer::new())
    }
}

impl ListWindow<VariableSize, ManualTimer> {
    /// A variable-size list debounced by a [`ManualTimer`].
    pub fn variable(config: ListConfig) -> Result<Self, Error> {
        Self::new(config, VariableSize, ManualTimer::new())
    }
}

impl<M: Metrics, T: Timer> ListWindow<M, T> {
    /// Creates an engine for `config`, sized by `metrics` and debounced by `timer`.
    ///
    /// When `config.initial_offset` is set, the state starts as a requested update at that
    /// (normalized) offset, clamped to the estimated scrollable range, and the raw offset is
    /// written to the scroll target as soon as one is attached.
    pub fn new(config: ListConfig, metrics: M, timer: T) -> Result<Self, Error> {
        validate(&metrics, &config)?;
        vdebug!(
            count = config.item_count,
            strategy = M::NAME,
            layout = ?config.layout,
            direction = ?config.direction,
            overscan = config.overscan_count,
            "ListWindow::new"
        );

        let metrics_state = metrics.new_state(&config);
        let content_extent = metrics.estimated_total_extent(&config, &metrics_state);
        let debounce = Debouncer::new(timer, config.is_scrolling_reset_delay_ms);
        let mut v = Self {
            config,
            metrics,
            metrics_state,
            scroll: ScrollState::default(),
            content_extent,
            debounce,
            cache: GeometryCache::default(),
            target: None,
            on_window_changed: None,
            on_scroll_state_changed: None,
            last_window: None,
            last_scroll: None,
            notify_depth: 0,
            notify_pending: false,
        };

        let normalized = v
            .config
            .initial_offset
            .as_ref()
            .map_or(0, InitialOffset::resolve);
        let normalized = normalized.min(v.max_scroll_offset());
        v.scroll.normalized_offset = normalized;
        v.scroll.offset = v.raw_for(normalized);
        v.scroll.update_was_requested = v.config.initial_offset.is_some();
        Ok(v)
    }

    pub fn config(&self) -> &ListConfig {
        &self.config
    }

    pub fn metrics(&self) -> &M {
        &self.metrics
    }

    /// The strategy's opaque per-instance state.
    pub fn metrics_state(&self) -> &M::State {
        &self.metrics_state
    }

    pub fn timer(&self) -> &T {
        self.debounce.timer()
    }

    /// Gives the host access to its timer (e.g. to advance a [`ManualTimer`]).
    pub fn timer_mut(&mut self) -> &mut T {
        self.debounce.timer_mut()
    }

    /// Replaces the configuration wholesale.
    ///
    /// The new configuration is validated first; on error nothing changes. A change of item size
    /// source, layout or writing direction discards the geometry cache; a new item size source also
    /// discards everything the strategy measured.
    pub fn set_config(&mut self, config: ListConfig) -> Result<(), Error> {
        validate(&self.metrics, &config)?;

        let same_geometry = self.config.same_geometry_inputs(&config);
        let same_sizes = self.config.item_size.same_as(&config.item_size);
        vdebug!(
            count = config.item_count,
            same_geometry,
            same_sizes,
            "ListWindow::set_config"
        );

        self.debounce
            .set_delay_ms(config.is_scrolling_reset_delay_ms);
        self.config = config;
        if !same_sizes {
            self.metrics_state = self.metrics.new_state(&self.config);
        }
        if !same_geometry {
            self.cache.invalidate();
        }

        self.content_extent = self.estimated_content_extent();
        self.rederive_raw_offset();
        self.notify()
    }

    /// Clones the current configuration, applies `f`, then delegates to `set_config`.
    pub fn update_config(&mut self, f: impl FnOnce(&mut ListConfig)) -> Result<(), Error> {
        let mut next = self.config.clone();
        f(&mut next);
        self.set_config(next)
    }

    /// Registers the window-changed callback and delivers the current window to it.
    ///
    /// Nothing is delivered for an empty list.
    pub fn on_window_changed(
        &mut self,
        f: impl Fn(RenderWindow) + Send + Sync + 'static,
    ) -> Result<(), Error> {
        self.on_window_changed = Some(Arc::new(f));
        self.last_window = None;
        self.notify()
    }

    /// Registers the scroll-state callback and delivers the current update to it.
    pub fn on_scroll_state_changed(
        &mut self,
        f: impl Fn(ScrollUpdate) + Send + Sync + 'static,
    ) -> Result<(), Error> {
        self.on_scroll_state_changed = Some(Arc::new(f));
        self.last_scroll = None;
        self.notify()
    }

    pub fn clear_callbacks(&mut self) {
        self.on_window_changed = None;
        self.on_scroll_state_changed = None;
    }

    /// Attaches the host's native scroll position.
    ///
    /// If the current offset was requested (initial offset, programmatic scroll) rather than
    /// observed, it is written to the target right away.
    pub fn attach_scroll_target(&mut self, target: impl ScrollTarget + 'static) {
        self.target = Some(Box::new(target));
        if self.scroll.update_was_requested {
            self.write_target();
        }
    }

    pub fn detach_scroll_target(&mut self) -> Option<Box<dyn ScrollTarget>> {
        self.target.take()
    }

    fn notify_now(&mut self) -> Result<(), Error> {
        if self.on_window_changed.is_none() && self.on_scroll_state_changed.is_none() {
            return Ok(());
        }

        if self.config.item_count > 0 {
            let window = self.render_window()?;
            if let Some(cb) = &self.on_window_changed {
                if self.last_window != Some(window) {
                    self.last_window = Some(window);
                    cb(window);
                }
            }
        }

        let update = self.scroll.update();
        if let Some(cb) = &self.on_scroll_state_changed {
            if self.last_scroll != Some(update) {
                self.last_scroll = Some(update);
                cb(update);
            }
        }
        Ok(())
    }

    fn notify(&mut self) -> Result<(), Error> {
        if self.notify_depth > 0 {
            self.notify_pending = true;
            return Ok(());
        }
        self.notify_now()
    }

    /// Batches several calls into a single notification pass.
    ///
    /// Useful when a host applies a reconfiguration and a scroll in the same frame. Batches nest;
    /// callbacks run once the outermost batch ends, even if `f` failed part way.
    pub fn batch_update(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<(), Error>,
    ) -> Result<(), Error> {
        self.notify_depth = self.notify_depth.saturating_add(1);

        let result = f(self);

        debug_assert!(self.notify_depth > 0, "notify_depth underflow");
        self.notify_depth = self.notify_depth.saturating_sub(1);

        if self.notify_depth == 0 && core::mem::take(&mut self.notify_pending) {
            self.notify_now()?;
        }
        result
    }

    pub fn item_count(&self) -> usize {
        self.config.item_count
    }

    pub fn viewport_extent(&self) -> u32 {
        self.config.viewport()
    }

    pub fn scroll_state(&self) -> ScrollState {
        self.scroll
    }

    pub fn is_scrolling(&self) -> bool {
        self.scroll.is_scrolling
    }

    pub fn scroll_direction(&self) -> ScrollDirection {
        self.scroll.direction
    }

    /// Raw offset in the canonical convention.
    pub fn scroll_offset(&self) -> u64 {
        self.scroll.offset
    }

    pub fn normalized_offset(&self) -> u64 {
        self.scroll.normalized_offset
    }

    /// Whether a debounce timer is outstanding.
    pub fn is_debounce_pending(&self) -> bool {
        self.debounce.is_pending()
    }

    /// Best current estimate of the content extent along the primary axis.
    pub fn content_extent(&self) -> u64 {
        self.estimated_content_extent()
    }

    pub fn max_scroll_offset(&self) -> u64 {
        self.estimated_content_extent()
            .saturating_sub(self.config.viewport() as u64)
    }

    pub fn geometry_cache_len(&self) -> usize {
        self.cache.len()
    }

    /// Bumped every time the geometry cache is discarded.
    pub fn geometry_generation(&self) -> u64 {
        self.cache.generation()
    }

    /// Applies a scroll position reported by the host surface.
    ///
    /// The offset is first clamped to `[0, content_extent - viewport_extent]`. An offset equal to
    /// the current raw offset is ignored (it is the echo of a programmatic write). Otherwise the
    /// list enters the in-motion state and the debounce timer is re-armed.
    pub fn observe_scroll(&mut self, observation: ScrollObservation) -> Result<(), Error> {
        vtrace!(
            offset = observation.offset,
            viewport = observation.viewport_extent,
            content = observation.content_extent,
            "observe_scroll"
        );
        let max = observation
            .content_extent
            .saturating_sub(observation.viewport_extent as u64);
        let raw = observation.offset.min(max);
        if raw == self.scroll.offset {
            return Ok(());
        }

        let horizontal = self.config.layout.is_horizontal();
        let direction = if horizontal {
            self.config.direction
        } else {
            WritingDirection::Ltr
        };
        let normalized = normalize(
            direction,
            raw,
            observation.viewport_extent,
            observation.content_extent,
        );

        let (prev, next) = if horizontal {
            (self.scroll.normalized_offset, normalized)
        } else {
            (self.scroll.offset, raw)
        };

        self.scroll = ScrollState {
            offset: raw,
            normalized_offset: normalized,
            direction: direction_of_travel(prev, next),
            is_scrolling: true,
            update_was_requested: false,
        };
        self.debounce.arm();
        self.notify()
    }

    /// Programmatically scrolls to a normalized `offset`.
    ///
    /// Right-to-left horizontal lists clamp `offset` to the scrollable range before converting it
    /// to a raw offset. Other lists take it as given; offsets past the end resolve to the last
    /// item.
    ///
    /// Does not enter the in-motion state, but re-arms the debounce timer so the geometry cache
    /// is refreshed once things settle.
    pub fn scroll_to(&mut self, offset: u64) -> Result<(), Error> {
        vtrace!(offset, "scroll_to");
        self.sync_content_extent();
        let normalized = self.requested_offset(offset);
        self.request(normalized)
    }

    /// Programmatically scrolls `index` into view according to `align`.
    ///
    /// `index` is clamped to the list. For horizontal lists, the items that become visible at
    /// the target (plus forward overscan) are measured before the target is converted to a raw
    /// offset, so the conversion uses the grown content extent.
    pub fn scroll_to_item(&mut self, index: usize, align: Align) -> Result<(), Error> {
        vtrace!(index, align = ?align, "scroll_to_item");
        let count = self.config.item_count;
        if count == 0 {
            return Ok(());
        }
        let index = index.min(count - 1);
        let current = self.driving_offset();

        let target = offset_for_index(
            &self.config,
            &self.metrics,
            &mut self.metrics_state,
            index,
            align,
            current,
        )?;

        if self.config.layout.is_horizontal() {
            let start = self
                .metrics
                .start_index_for_offset(&self.config, &mut self.metrics_state, target)?;
            let stop = self.metrics.stop_index_for_start_index(
                &self.config,
                &mut self.metrics_state,
                start,
                target,
            )?;
            let (_, forward) = overscan_amounts(
                self.config.overscan_count,
                self.scroll.is_scrolling,
                direction_of_travel(current, target),
            );
            let probe = stop.saturating_add(forward).min(count - 1);
            self.metrics
                .item_offset(&self.config, &mut self.metrics_state, probe)?;
        }

        self.sync_content_extent();
        let target = target.min(self.max_scroll_offset());
        self.request(target)
    }

    /// Debounce timer callback. Leaves the in-motion state, then discards the geometry cache.
    ///
    /// Handles that are not the outstanding one are ignored.
    pub fn on_timer(&mut self, handle: T::Handle) -> Result<(), Error> {
        if !self.debounce.fire(handle) {
            vwarn!(handle = ?handle, "on_timer: stale timer handle");
            return Ok(());
        }
        vtrace!(handle = ?handle, "on_timer: scrolling settled");
        self.scroll.is_scrolling = false;
        self.cache.invalidate();
        self.notify()
    }

    /// Forgets measurements for `index` and every later item (e.g. after their content changed).
    pub fn reset_after_index(&mut self, index: usize) -> Result<(), Error> {
        vtrace!(index, "reset_after_index");
        self.metrics
            .reset_after_index(&mut self.metrics_state, index);
        self.cache.invalidate();
        self.sync_content_extent();
        self.notify()
    }

    /// The window to realize at the current scroll state.
    pub fn render_window(&mut self) -> Result<RenderWindow, Error> {
        let window = resolve_range(
            &self.config,
            &self.scroll,
            &self.metrics,
            &mut self.metrics_state,
        )?;
        self.sync_content_extent();
        Ok(window)
    }

    /// Placement of `index`, memoized until the cache is next discarded.
    pub fn geometry(&mut self, index: usize) -> Result<Geometry, Error> {
        let count = self.config.item_count;
        if index >= count {
            return Err(Error::IndexOutOfRange { index, count });
        }

        let edge = match (self.config.layout, self.config.direction) {
            (Layout::Vertical, _) => Edge::Top,
            (Layout::Horizontal, WritingDirection::Ltr) => Edge::Left,
            (Layout::Horizontal, WritingDirection::Rtl) => Edge::Right,
        };
        let config = &self.config;
        let metrics = &self.metrics;
        let state = &mut self.metrics_state;
        let geometry = self.cache.get_or_try_insert(index, || {
            let offset = metrics.item_offset(config, state, index)?;
            let size = metrics.item_size(config, state, index)?;
            Ok::<_, MeasureError>(Geometry { edge, offset, size })
        })?;

        self.sync_content_extent();
        Ok(geometry)
    }

    /// Calls `f` for every index in the overscanned window, in ascending order.
    pub fn for_each_item(&mut self, mut f: impl FnMut(VirtualItem)) -> Result<(), Error> {
        if self.config.item_count == 0 {
            return Ok(());
        }
        let window = self.render_window()?;
        let is_scrolling = self.config.use_is_scrolling && self.scroll.is_scrolling;
        for index in window.overscan_indexes() {
            let geometry = self.geometry(index)?;
            f(VirtualItem {
                index,
                geometry,
                is_scrolling,
            });
        }
        Ok(())
    }

    /// Collects the overscanned window into `out` (clears `out` first).
    pub fn collect_items(&mut self, out: &mut Vec<VirtualItem>) -> Result<(), Error> {
        out.clear();
        self.for_each_item(|item| out.push(item))
    }

    fn estimated_content_extent(&self) -> u64 {
        self.metrics
            .estimated_total_extent(&self.config, &self.metrics_state)
    }

    /// The offset the range resolver drives from.
    fn driving_offset(&self) -> u64 {
        if self.config.layout.is_horizontal() {
            self.scroll.normalized_offset
        } else {
            self.scroll.offset
        }
    }

    /// Only right-to-left horizontal offsets depend on the extent, so only they are clamped.
    fn requested_offset(&self, normalized: u64) -> u64 {
        if self.config.is_rtl_horizontal() {
            normalized.min(self.max_scroll_offset())
        } else {
            normalized
        }
    }

    fn raw_for(&self, normalized: u64) -> u64 {
        if self.config.layout.is_horizontal() {
            denormalize(
                self.config.direction,
                normalized,
                self.config.viewport(),
                self.content_extent,
            )
        } else {
            normalized
        }
    }

    /// Commits a programmatic scroll to `normalized`.
    fn request(&mut self, normalized: u64) -> Result<(), Error> {
        let raw = self.raw_for(normalized);
        if raw == self.scroll.offset && normalized == self.scroll.normalized_offset {
            return Ok(());
        }

        let prev = self.driving_offset();
        let next = if self.config.layout.is_horizontal() {
            normalized
        } else {
            raw
        };
        self.scroll.direction = direction_of_travel(prev, next);
        self.scroll.offset = raw;
        self.scroll.normalized_offset = normalized;
        self.scroll.update_was_requested = true;

        self.debounce.arm();
        self.write_target();
        self.notify()
    }

    /// Picks up content extent changes caused by lazy measurement.
    ///
    /// For right-to-left horizontal lists the raw offset depends on the extent, so it is
    /// re-derived from the (authoritative) normalized offset.
    fn sync_content_extent(&mut self) {
        let total = self.estimated_content_extent();
        if total == self.content_extent {
            return;
        }
        vtrace!(from = self.content_extent, to = total, "content extent changed");
        self.content_extent = total;
        if self.config.is_rtl_horizontal() {
            self.rederive_raw_offset();
        }
    }

    fn rederive_raw_offset(&mut self) {
        let raw = self.raw_for(self.scroll.normalized_offset);
        if raw != self.scroll.offset {
            self.scroll.offset = raw;
            self.write_target();
        }
    }

    fn write_target(&mut self) {
        let write = ScrollWrite {
            layout: self.config.layout,
            direction: self.config.direction,
            offset: self.scroll.offset,
            viewport_extent: self.config.viewport(),
            content_extent: self.content_extent,
        };
        if let Some(target) = self.target.as_mut() {
            vtrace!(offset = write.offset, "write_scroll_offset");
            target.write_scroll_offset(write);
        }
    }
}

impl<M: Metrics, T: Timer> core::fmt::Debug for ListWindow<M, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ListWindow")
            .field("strategy", &M::NAME)
            .field("config", &self.config)
            .field("scroll", &self.scroll)
            .field("content_extent", &self.content_extent)
            .field("geometry_cache_len", &self.cache.len())
            .field("debounce_pending", &self.debounce.is_pending())
            .finish_non_exhaustive()
    }
}

fn direction_of_travel(prev: u64, next: u64) -> ScrollDirection {
    if next > prev {
        ScrollDirection::Forward
    } else {
        ScrollDirection::Backward
    }
}

fn validate<M: Metrics>(metrics: &M, config: &ListConfig) -> Result<(), ConfigError> {
    config
        .validate()
        .and_then(|()| metrics.validate(config))
        .inspect_err(|_err| {
            vwarn!(error = %_err, strategy = M::NAME, "rejected configuration");
        })
}
