use core::cmp;

use crate::{ListConfig, MeasureError, Metrics, RenderWindow, ScrollDirection, ScrollState};

/// Overscan on the `(backward, forward)` sides of the visible range.
///
/// Both sides keep at least one item so focus traversal never wraps visually. While the list is in
/// motion, the side trailing the direction of travel shrinks to a single item.
pub fn overscan_amounts(
    overscan_count: usize,
    is_scrolling: bool,
    direction: ScrollDirection,
) -> (usize, usize) {
    let full = cmp::max(1, overscan_count);
    match (is_scrolling, direction) {
        (true, ScrollDirection::Forward) => (1, full),
        (true, ScrollDirection::Backward) => (full, 1),
        (false, _) => (full, full),
    }
}

/// Computes the window to realize for `scroll`.
///
/// Horizontal lists drive from the normalized offset, vertical ones from the raw offset.
pub fn resolve_range<M: Metrics>(
    config: &ListConfig,
    scroll: &ScrollState,
    metrics: &M,
    state: &mut M::State,
) -> Result<RenderWindow, MeasureError> {
    let count = config.item_count;
    if count == 0 {
        return Ok(RenderWindow::EMPTY);
    }

    let offset = if config.layout.is_horizontal() {
        scroll.normalized_offset
    } else {
        scroll.offset
    };

    let visible_start = metrics.start_index_for_offset(config, state, offset)?;
    let visible_stop = metrics.stop_index_for_start_index(config, state, visible_start, offset)?;

    let (backward, forward) =
        overscan_amounts(config.overscan_count, scroll.is_scrolling, scroll.direction);

    Ok(RenderWindow {
        overscan_start: visible_start.saturating_sub(backward),
        overscan_stop: cmp::min(count - 1, visible_stop.saturating_add(forward)),
        visible_start,
        visible_stop,
    })
}
