// Example: variable sizes in a right-to-left horizontal list.
//
// The engine keeps offsets in one canonical raw convention; the scroll target converts them into
// whatever the host surface uses (here: negative offsets, as in current browsers).
use listwindow::{
    Align, Layout, ListConfig, ListWindow, RtlOffsetType, ScrollWrite, WritingDirection,
};

fn main() -> Result<(), listwindow::Error> {
    let config = ListConfig::variable(10_000, |i| 40 + (i % 7) as u32 * 15)
        .with_layout(Layout::Horizontal)
        .with_direction(WritingDirection::Rtl)
        .with_viewport_extent(800)
        .with_estimated_item_size(80);
    let mut list = ListWindow::variable(config)?;

    let convention = RtlOffsetType::Negative;
    list.attach_scroll_target(move |w: ScrollWrite| {
        let native = convention.to_native(w.offset, w.viewport_extent, w.content_extent);
        println!("write native scrollLeft={native} (content_extent={})", w.content_extent);
    });

    println!("estimated content_extent={}", list.content_extent());
    list.scroll_to_item(500, Align::Center)?;
    println!(
        "normalized={} raw={} measured_through={:?}",
        list.normalized_offset(),
        list.scroll_offset(),
        list.metrics_state().last_measured_index()
    );

    list.for_each_item(|item| {
        println!(
            "item {} at {:?}+{} size {}",
            item.index, item.geometry.edge, item.geometry.offset, item.geometry.size
        );
    })?;
    Ok(())
}
