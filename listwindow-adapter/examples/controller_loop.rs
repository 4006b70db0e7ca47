use listwindow::{Align, FixedSize, Geometry, Layout, ListConfig, RtlOffsetType};
use listwindow_adapter::{Controller, NativeSurface};

/// Stands in for a real scroll container.
#[derive(Debug, Default)]
struct PrintSurface;

impl NativeSurface for PrintSurface {
    fn write_native_offset(&mut self, layout: Layout, native: i64) {
        println!("surface <- {layout:?} {native}");
    }
}

fn main() -> Result<(), listwindow::Error> {
    // Example: a host event loop driving the controller without holding any UI objects.
    //
    // An adapter would:
    // - forward scroll events (in the surface's native convention) to on_scroll
    // - call tick(now_ms) in a frame loop / timer
    // - call render() before painting and mount the returned nodes
    let mut c = Controller::new(
        ListConfig::fixed(10_000, 24)
            .with_viewport_extent(480)
            .with_use_is_scrolling(true),
        FixedSize,
        |index: usize, geometry: Geometry, is_scrolling: bool| {
            format!("row {index} @{} {}", geometry.offset, if is_scrolling { "~" } else { "" })
        },
        PrintSurface,
        RtlOffsetType::default(),
    )?;

    let mut now_ms = 0u64;
    for offset in (0..2_000i64).step_by(240) {
        now_ms += 16;
        c.on_scroll(offset, 480, 240_000, now_ms)?;
        let pass = c.render()?;
        println!("t={now_ms} window={:?} realized={}", pass.window, pass.realized);
    }

    while !c.tick(now_ms)? {
        now_ms += 16;
    }
    let pass = c.render()?;
    println!("settled at t={now_ms}: realized={}", pass.realized);

    c.scroll_to_item(5_000, Align::Center, now_ms)?;
    c.render()?;
    println!("first node: {:?}", c.nodes().first());
    Ok(())
}
