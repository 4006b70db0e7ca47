use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;

use listwindow::{
    Align, Error, ListConfig, ListWindow, ManualTimer, Metrics, RtlOffsetType, ScrollObservation,
    ScrollTarget, ScrollWrite,
};

use crate::{NativeSurface, Realize, RenderPass, Renderer, SurfaceTarget, canonical_offset};

/// A framework-neutral controller that wires a `listwindow::ListWindow` to a host surface.
///
/// This type does not hold any UI objects. Adapters drive it by calling:
/// - `on_viewport_extent` / `on_scroll` when UI events occur
/// - `tick(now_ms)` each frame/timer tick (fires the in-motion debounce)
/// - `render()` when they are about to paint
///
/// Programmatic scrolls are written back to the surface in its native right-to-left convention.
pub struct Controller<M: Metrics, R: Realize, S: NativeSurface> {
    list: ListWindow<M, ManualTimer>,
    renderer: Renderer<R>,
    surface: SurfaceTarget<S>,
    outbox: Rc<RefCell<Vec<ScrollWrite>>>,
}

impl<M: Metrics, R: Realize, S: NativeSurface> Controller<M, R, S> {
    pub fn new(
        config: ListConfig,
        metrics: M,
        realize: R,
        surface: S,
        rtl_offset_type: RtlOffsetType,
    ) -> Result<Self, Error> {
        vdebug!(
            count = config.item_count,
            convention = ?rtl_offset_type,
            "Controller::new"
        );
        let mut list = ListWindow::new(config, metrics, ManualTimer::new())?;
        let outbox = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&outbox);
        list.attach_scroll_target(move |write: ScrollWrite| sink.borrow_mut().push(write));

        let mut c = Self {
            list,
            renderer: Renderer::new(realize),
            surface: SurfaceTarget::new(surface, rtl_offset_type),
            outbox,
        };
        c.flush_writes();
        Ok(c)
    }

    pub fn list(&self) -> &ListWindow<M, ManualTimer> {
        &self.list
    }

    pub fn renderer(&self) -> &Renderer<R> {
        &self.renderer
    }

    pub fn surface(&self) -> &S {
        self.surface.surface()
    }

    pub fn surface_mut(&mut self) -> &mut S {
        self.surface.surface_mut()
    }

    /// Reconfigures the list (see `ListWindow::update_config`).
    pub fn update_config(&mut self, f: impl FnOnce(&mut ListConfig)) -> Result<(), Error> {
        let result = self.list.update_config(f);
        self.flush_writes();
        result
    }

    /// Call this when the surface's extent along the scroll axis changes.
    pub fn on_viewport_extent(&mut self, viewport_extent: u32) -> Result<(), Error> {
        if self.list.config().viewport_extent == Some(viewport_extent) {
            return Ok(());
        }
        self.update_config(|c| c.viewport_extent = Some(viewport_extent))
    }

    /// Call this when the surface reports a scroll position (e.g. user wheel/drag).
    ///
    /// `native_offset` is in the surface's own convention. Timers that came due before `now_ms`
    /// fire first.
    pub fn on_scroll(
        &mut self,
        native_offset: i64,
        viewport_extent: u32,
        content_extent: u64,
        now_ms: u64,
    ) -> Result<(), Error> {
        self.fire_due(now_ms)?;
        let config = self.list.config();
        let offset = canonical_offset(
            self.surface.rtl_offset_type(),
            config.layout,
            config.direction,
            native_offset,
            viewport_extent,
            content_extent,
        );
        vtrace!(native_offset, offset, now_ms, "on_scroll");
        let result = self.list.observe_scroll(ScrollObservation {
            offset,
            viewport_extent,
            content_extent,
        });
        self.flush_writes();
        result
    }

    /// Advances the clock and fires the in-motion debounce if it came due.
    ///
    /// Returns whether a timer fired.
    pub fn tick(&mut self, now_ms: u64) -> Result<bool, Error> {
        let fired = self.fire_due(now_ms)?;
        self.flush_writes();
        Ok(fired > 0)
    }

    /// Scrolls to a normalized offset immediately.
    ///
    /// Returns the applied normalized offset (clamped only for right-to-left horizontal lists).
    pub fn scroll_to(&mut self, offset: u64, now_ms: u64) -> Result<u64, Error> {
        self.fire_due(now_ms)?;
        let result = self.list.scroll_to(offset);
        self.flush_writes();
        result.map(|()| self.list.normalized_offset())
    }

    /// Scrolls `index` into view immediately.
    ///
    /// Returns the applied (clamped) normalized offset.
    pub fn scroll_to_item(
        &mut self,
        index: usize,
        align: Align,
        now_ms: u64,
    ) -> Result<u64, Error> {
        self.fire_due(now_ms)?;
        let result = self.list.scroll_to_item(index, align);
        self.flush_writes();
        result.map(|()| self.list.normalized_offset())
    }

    /// Realizes the current window, reusing the previous nodes when nothing visible changed.
    pub fn render(&mut self) -> Result<RenderPass, Error> {
        let result = self.renderer.render(&mut self.list);
        self.flush_writes();
        result
    }

    pub fn nodes(&self) -> &[(usize, R::Node)] {
        self.renderer.nodes()
    }

    fn fire_due(&mut self, now_ms: u64) -> Result<usize, Error> {
        let due = self.list.timer_mut().advance_to(now_ms);
        let fired = due.len();
        for id in due {
            self.list.on_timer(id)?;
        }
        Ok(fired)
    }

    fn flush_writes(&mut self) {
        let writes = core::mem::take(&mut *self.outbox.borrow_mut());
        for write in writes {
            self.surface.write_scroll_offset(write);
        }
    }
}

impl<M: Metrics, R: Realize, S: NativeSurface> core::fmt::Debug for Controller<M, R, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Controller")
            .field("list", &self.list)
            .field("realized_window", &self.renderer.realized_window())
            .field("rtl_offset_type", &self.surface.rtl_offset_type())
            .finish_non_exhaustive()
    }
}
