use crate::*;

use alloc::vec::Vec;

use listwindow::{
    Align, FixedSize, Geometry, ItemSize, Layout, ListConfig, ListWindow, RenderWindow,
    RtlOffsetType, ScrollObservation, ScrollWrite, VariableSize, WritingDirection,
};

#[derive(Debug, Default)]
struct RecordingSurface {
    writes: Vec<(Layout, i64)>,
}

impl NativeSurface for RecordingSurface {
    fn write_native_offset(&mut self, layout: Layout, native: i64) {
        self.writes.push((layout, native));
    }
}

fn rtl_fixed() -> ListConfig {
    ListConfig::fixed(100, 50)
        .with_layout(Layout::Horizontal)
        .with_direction(WritingDirection::Rtl)
        .with_viewport_extent(300)
}

#[test]
fn controller_realizes_only_when_the_window_changes() {
    let mut c = Controller::new(
        ListConfig::fixed(1000, 50).with_viewport_extent(300),
        FixedSize,
        |_: usize, geometry: Geometry, _: bool| geometry.offset,
        RecordingSurface::default(),
        RtlOffsetType::default(),
    )
    .unwrap();

    let pass = c.render().unwrap();
    assert_eq!(
        pass.window,
        RenderWindow {
            overscan_start: 0,
            overscan_stop: 7,
            visible_start: 0,
            visible_stop: 5,
        }
    );
    assert_eq!(pass.realized, 8);
    assert!(c.render().unwrap().reused());

    c.on_scroll(100, 300, 50_000, 0).unwrap();
    let pass = c.render().unwrap();
    assert_eq!(pass.realized, 9);
    assert_eq!(c.nodes()[0], (1, 50));
    assert!(c.render().unwrap().reused());

    assert!(!c.tick(149).unwrap());
    assert!(c.tick(150).unwrap());
    let pass = c.render().unwrap();
    assert_eq!(pass.realized, 10);
    assert_eq!(pass.window.overscan_indexes(), 0..=9);

    // Observed scrolls are never written back to the surface.
    assert!(c.surface().writes.is_empty());
}

#[test]
fn controller_writes_negative_rtl_offsets() {
    let mut c = Controller::new(
        rtl_fixed(),
        FixedSize,
        |index: usize, _: Geometry, _: bool| index,
        RecordingSurface::default(),
        RtlOffsetType::Negative,
    )
    .unwrap();
    assert!(c.surface().writes.is_empty());

    assert_eq!(c.scroll_to(1_000, 0).unwrap(), 1_000);
    assert_eq!(c.surface().writes, [(Layout::Horizontal, -1_000)]);

    // The surface echoing the write is not a user scroll.
    c.on_scroll(-1_000, 300, 5_000, 5).unwrap();
    assert!(!c.list().is_scrolling());

    c.on_scroll(-1_100, 300, 5_000, 10).unwrap();
    assert_eq!(c.list().normalized_offset(), 1_100);
    assert!(c.list().is_scrolling());

    let pass = c.render().unwrap();
    assert_eq!(pass.window.visible_start, 22);
    assert_eq!(pass.window.overscan_indexes(), 21..=29);
}

#[test]
fn controller_writes_positive_rtl_offsets() {
    let mut ascending = Controller::new(
        rtl_fixed(),
        FixedSize,
        |index: usize, _: Geometry, _: bool| index,
        RecordingSurface::default(),
        RtlOffsetType::PositiveAscending,
    )
    .unwrap();
    assert_eq!(ascending.scroll_to_item(10, Align::Start, 0).unwrap(), 500);
    assert_eq!(ascending.surface().writes, [(Layout::Horizontal, 500)]);

    let mut descending = Controller::new(
        rtl_fixed(),
        FixedSize,
        |index: usize, _: Geometry, _: bool| index,
        RecordingSurface::default(),
        RtlOffsetType::PositiveDescending,
    )
    .unwrap();
    descending.scroll_to(1_000, 0).unwrap();
    assert_eq!(descending.surface().writes, [(Layout::Horizontal, 3_700)]);
}

#[test]
fn controller_writes_the_initial_offset_on_construction() {
    let c = Controller::new(
        ListConfig::fixed(100, 50)
            .with_viewport_extent(300)
            .with_initial_offset(1_000),
        FixedSize,
        |index: usize, _: Geometry, _: bool| index,
        RecordingSurface::default(),
        RtlOffsetType::default(),
    )
    .unwrap();
    assert_eq!(c.surface().writes, [(Layout::Vertical, 1_000)]);
}

#[test]
fn controller_keeps_the_logical_start_when_measurement_grows_content() {
    let mut c = Controller::new(
        ListConfig::variable(100, |_| 100)
            .with_layout(Layout::Horizontal)
            .with_direction(WritingDirection::Rtl)
            .with_viewport_extent(300),
        VariableSize,
        |_: usize, geometry: Geometry, _: bool| geometry.offset,
        RecordingSurface::default(),
        RtlOffsetType::Negative,
    )
    .unwrap();

    assert_eq!(c.scroll_to_item(10, Align::Start, 0).unwrap(), 1_000);
    assert_eq!(
        c.surface().writes,
        [(Layout::Horizontal, 0), (Layout::Horizontal, -1_000)]
    );

    c.render().unwrap();
    assert_eq!(c.nodes().first().copied(), Some((8, 800)));
    assert_eq!(c.nodes().last().copied(), Some((14, 1_400)));
}

#[test]
fn viewport_changes_reconfigure_the_list() {
    let mut c = Controller::new(
        ListConfig::fixed(100, 50).with_viewport_extent(300),
        FixedSize,
        |index: usize, _: Geometry, _: bool| index,
        RecordingSurface::default(),
        RtlOffsetType::default(),
    )
    .unwrap();
    c.render().unwrap();

    c.on_viewport_extent(300).unwrap();
    assert!(c.render().unwrap().reused());

    c.on_viewport_extent(500).unwrap();
    assert_eq!(c.list().viewport_extent(), 500);
    let pass = c.render().unwrap();
    assert_eq!(pass.window.visible_stop, 9);
    assert_eq!(pass.realized, 12);
}

#[test]
fn native_offsets_convert_at_the_boundary() {
    assert_eq!(
        canonical_offset(
            RtlOffsetType::Negative,
            Layout::Vertical,
            WritingDirection::Ltr,
            -5,
            300,
            5_000,
        ),
        0
    );
    assert_eq!(
        canonical_offset(
            RtlOffsetType::Negative,
            Layout::Horizontal,
            WritingDirection::Rtl,
            -1_000,
            300,
            5_000,
        ),
        3_700
    );

    let write = ScrollWrite {
        layout: Layout::Horizontal,
        direction: WritingDirection::Rtl,
        offset: 3_700,
        viewport_extent: 300,
        content_extent: 5_000,
    };
    assert_eq!(native_offset(RtlOffsetType::PositiveAscending, &write), 1_000);
    assert_eq!(native_offset(RtlOffsetType::Negative, &write), -1_000);

    let ltr = ScrollWrite {
        direction: WritingDirection::Ltr,
        ..write
    };
    assert_eq!(native_offset(RtlOffsetType::Negative, &ltr), 3_700);
}

#[test]
fn renderer_follows_geometry_generation() {
    let mut list =
        ListWindow::fixed(ListConfig::fixed(100, 50).with_viewport_extent(300)).unwrap();
    let mut r = Renderer::new(|index: usize, geometry: Geometry, _: bool| (index, geometry.size));

    assert_eq!(r.render(&mut list).unwrap().realized, 8);
    assert_eq!(r.node(3), Some(&(3, 50)));
    assert_eq!(r.node(99), None);

    list.update_config(|c| c.item_size = ItemSize::Fixed(25))
        .unwrap();
    let pass = r.render(&mut list).unwrap();
    assert_eq!(pass.realized, 14);
    assert_eq!(r.node(3), Some(&(3, 25)));

    assert!(r.render(&mut list).unwrap().reused());
    r.invalidate();
    assert_eq!(r.render(&mut list).unwrap().realized, 14);
}

#[test]
fn renderer_follows_the_motion_flag_only_when_items_see_it() {
    let observation = ScrollObservation {
        offset: 10,
        viewport_extent: 275,
        content_extent: 5_000,
    };

    let mut plain =
        ListWindow::fixed(ListConfig::fixed(100, 50).with_viewport_extent(275)).unwrap();
    let mut r =
        Renderer::new(|index: usize, _: Geometry, is_scrolling: bool| (index, is_scrolling));
    r.render(&mut plain).unwrap();
    plain.observe_scroll(observation).unwrap();
    assert!(r.render(&mut plain).unwrap().reused());

    let mut flagged = ListWindow::fixed(
        ListConfig::fixed(100, 50)
            .with_viewport_extent(275)
            .with_use_is_scrolling(true),
    )
    .unwrap();
    let mut r =
        Renderer::new(|index: usize, _: Geometry, is_scrolling: bool| (index, is_scrolling));
    r.render(&mut flagged).unwrap();
    flagged.observe_scroll(observation).unwrap();
    let pass = r.render(&mut flagged).unwrap();
    assert_eq!(pass.realized, 8);
    assert!(r.nodes().iter().all(|(_, node)| node.1));
}
