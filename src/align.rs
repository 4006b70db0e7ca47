use crate::{Align, ListConfig, MeasureError, Metrics};

/// Returns the normalized offset that brings `index` into view according to `align`.
///
/// `current_offset` is the current normalized offset. The result is clamped to
/// `[0, estimated_total_extent - viewport_extent]`; the extent is read after `index` has been
/// measured, so it already accounts for that measurement.
pub fn offset_for_index<M: Metrics>(
    config: &ListConfig,
    metrics: &M,
    state: &mut M::State,
    index: usize,
    align: Align,
    current_offset: u64,
) -> Result<u64, MeasureError> {
    let count = config.item_count;
    if count == 0 {
        return Ok(0);
    }
    let index = index.min(count - 1);

    let leading = metrics.item_offset(config, state, index)? as i128;
    let size = metrics.item_size(config, state, index)? as i128;
    let view = config.viewport() as i128;
    let total = metrics.estimated_total_extent(config, state);
    let max_offset = total.saturating_sub(config.viewport() as u64) as i128;
    let clamp = |v: i128| v.clamp(0, max_offset) as u64;

    // Offsets that put the item flush against the start / end of the viewport.
    let at_start = clamp(leading);
    let at_end = clamp(leading - view + size);
    let centered = clamp(leading - (view - size) / 2);

    let auto = || {
        if current_offset >= at_end && current_offset <= at_start {
            current_offset
        } else if current_offset < at_end {
            at_end
        } else {
            at_start
        }
    };

    let target = match align {
        Align::Start => at_start,
        Align::End => at_end,
        Align::Center => centered,
        Align::Auto => auto(),
        Align::Smart => {
            let cur = current_offset as i128;
            if cur >= at_end as i128 - view && cur <= at_start as i128 + view {
                auto()
            } else {
                centered
            }
        }
    };
    Ok(target)
}
