// Example: a fixed-size list driven by observed scrolls and a manual clock.
use listwindow::{Align, ListConfig, ListWindow, ScrollObservation};

fn main() -> Result<(), listwindow::Error> {
    let mut list =
        ListWindow::fixed(ListConfig::fixed(1_000_000, 20).with_viewport_extent(600))?;
    list.on_window_changed(|w| println!("window: {w:?}"))?;

    println!("content_extent={}", list.content_extent());

    // The host reports a few wheel events, 16ms apart.
    for (step, offset) in [120u64, 480, 1_200].into_iter().enumerate() {
        let now_ms = step as u64 * 16;
        list.timer_mut().set_now(now_ms);
        let observation = ScrollObservation {
            offset,
            viewport_extent: list.viewport_extent(),
            content_extent: list.content_extent(),
        };
        list.observe_scroll(observation)?;
    }
    println!("is_scrolling={}", list.is_scrolling());

    // Quiet period elapses.
    for id in list.timer_mut().advance_to(1_000) {
        list.on_timer(id)?;
    }
    println!("is_scrolling={}", list.is_scrolling());

    let mut items = Vec::new();
    list.collect_items(&mut items)?;
    println!("first={:?}", items.first());
    println!("last={:?}", items.last());

    list.scroll_to_item(999_999, Align::End)?;
    println!("after scroll_to_item: offset={}", list.normalized_offset());
    Ok(())
}
