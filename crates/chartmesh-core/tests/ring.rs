// File: crates/chartmesh-core/tests/ring.rs
// Purpose: Concentric ring layout, sector hit-testing (edges and wrap), labels and invalid item maxima.

use chartmesh_core::error::Degenerate;
use chartmesh_core::geometry::{angle_from_up, polar_point};
use chartmesh_core::render::ring::{hit_test, item_angles};
use chartmesh_core::{
    Chart, ChartSettings, Component, DrawList, FixedAdvanceText, Label, Layer, Point2, PointContext, Series,
    SeriesFrame, Size, Skip,
};

/// Two-item ring with pixel radii 60..80 on a 200 x 200 chart.
fn two_items() -> Series {
    let mut s = Series::ring("ring", [("a", 25.0, 100.0), ("b", 50.0, 100.0)]);
    if let Some(o) = s.ring_options_mut() {
        o.radius = (60.0, 80.0);
    }
    s
}

fn ring_chart(series: Series) -> Chart {
    let mut c = Chart::new(Size::new(200.0, 200.0));
    c.set_settings(ChartSettings { growth_duration: 0.0, update_duration: 0.0, ..ChartSettings::default() });
    c.add_series(series);
    c
}

#[test]
fn items_nest_inward_with_gap() {
    let mut c = ring_chart(two_items());
    c.update(0.016, None);

    let sf = c.frame().series_frame(0).expect("ring laid out");
    assert_eq!(sf.center, Point2::new(100.0, 100.0));
    assert_eq!(sf.radius, 80.0);
    let (a, b) = (&sf.points[0], &sf.points[1]);
    assert_eq!((a.inside_radius, a.outside_radius), (60.0, 80.0));
    assert_eq!((b.inside_radius, b.outside_radius), (30.0, 50.0));
    assert_eq!((a.start_angle, a.to_angle), (0.0, 90.0));
    assert_eq!((b.start_angle, b.to_angle), (0.0, 180.0));
}

#[test]
fn hit_test_uses_half_open_bounds() {
    let mut c = ring_chart(two_items());
    c.update(0.016, None);
    let sf = c.frame().series_frame(0).expect("ring laid out");

    assert_eq!(hit_test(sf, Point2::new(100.0, 160.0)), Some(0));
    // Radius 50 is the outer edge of item b, excluded.
    assert_eq!(hit_test(sf, Point2::new(100.0, 150.0)), None);
    assert_eq!(hit_test(sf, Point2::new(100.0, 130.0)), Some(1));
    // Left of center is 270 degrees, outside both arcs.
    assert_eq!(hit_test(sf, Point2::new(30.0, 100.0)), None);
    assert_eq!(hit_test(sf, Point2::new(100.0, 100.0)), None);
}

#[test]
fn pointer_over_sector_highlights_item() {
    let mut c = ring_chart(two_items());
    c.update(0.016, Some(Point2::new(100.0, 130.0)));
    assert_eq!(c.states()[0].pointer_item, Some(1));
    assert!(c.states()[0].is_highlighted(1));
    assert!(!c.states()[0].is_highlighted(0));
}

#[test]
fn counter_clockwise_arcs_end_at_start() {
    assert_eq!(item_angles(0.0, 90.0, false), (270.0, 360.0));

    let mut s = Series::ring("ring", [("a", 25.0, 100.0)]);
    if let Some(o) = s.ring_options_mut() {
        o.clockwise = false;
    }
    let mut c = ring_chart(s);
    c.update(0.016, None);
    let sf = c.frame().series_frame(0).expect("ring laid out");
    // Up and to the left, roughly 296 degrees clockwise from up.
    assert_eq!(hit_test(sf, Point2::new(40.0, 130.0)), Some(0));
    assert_eq!(hit_test(sf, Point2::new(160.0, 130.0)), None);
}

#[test]
fn draws_one_doughnut_per_item_and_labels() {
    let s = two_items().with_label(Label { formatter: Some("{b} {c}".to_string()), ..Label::default() });
    let mut c = ring_chart(s);
    c.update(0.016, None);

    let mut sink = DrawList::new();
    let mut text = FixedAdvanceText::default();
    let outcomes = c.draw_layer(Layer::Content, &mut sink, &mut text);
    assert!(outcomes[0].1.is_drawn());
    assert_eq!(sink.doughnuts().count(), 2);
    let labels: Vec<&str> = text.texts().collect();
    assert_eq!(labels, vec!["a 25", "b 50"]);
}

#[test]
fn non_positive_max_skips_ring() {
    let mut c = ring_chart(Series::ring("ring", [("a", 25.0, 0.0)]));
    c.update(0.016, None);
    assert_eq!(c.frame().series_frame(0).err(), Some(Skip::Degenerate(Degenerate::NonPositiveMax)));
}

#[test]
fn hidden_items_are_not_drawn() {
    let mut c = ring_chart(two_items());
    c.update(0.016, None);
    assert!(c.toggle_legend(0));
    c.update(0.016, None);
    let sf = c.frame().series_frame(0).expect("ring laid out");
    assert_eq!(sf.draw_indices, vec![1]);
}

/// Two sectors of one annulus sharing the edge at `boundary` degrees.
fn adjacent_sectors(boundary: f32) -> SeriesFrame {
    let sector = |start_angle, to_angle| PointContext {
        drawn: true,
        start_angle,
        to_angle,
        inside_radius: 60.0,
        outside_radius: 80.0,
        ..PointContext::default()
    };
    SeriesFrame {
        points: vec![sector(0.0, boundary), sector(boundary, 180.0)],
        draw_indices: vec![0, 1],
        center: Point2::new(100.0, 100.0),
        radius: 80.0,
        ..SeriesFrame::default()
    }
}

#[test]
fn shared_angle_belongs_to_the_later_sector() {
    let pointer = Point2::new(170.0, 100.0);
    let boundary = angle_from_up(pointer - Point2::new(100.0, 100.0));
    let sf = adjacent_sectors(boundary);
    assert_eq!(hit_test(&sf, pointer), Some(1));

    // Just before the edge stays with the first sector.
    let before = polar_point(Point2::new(100.0, 100.0), 70.0, boundary - 1.0);
    assert_eq!(hit_test(&sf, before), Some(0));
}

#[test]
fn start_edge_is_owned_and_end_edge_is_not() {
    let sf = adjacent_sectors(90.0);
    // Straight up is exactly 0 degrees, the first sector's start.
    assert_eq!(hit_test(&sf, Point2::new(100.0, 170.0)), Some(0));
    // Straight down is the second sector's end, excluded.
    assert_eq!(hit_test(&sf, Point2::new(100.0, 30.0)), None);
}

#[test]
fn counter_clockwise_arc_below_zero_wraps() {
    let mut s = Series::ring("ring", [("a", 25.0, 100.0)]);
    if let Some(o) = s.ring_options_mut() {
        o.radius = (60.0, 80.0);
        o.start_angle = 300.0;
        o.clockwise = false;
    }
    let mut c = ring_chart(s);
    c.update(0.016, None);
    let sf = c.frame().series_frame(0).expect("ring laid out");
    assert_eq!((sf.points[0].start_angle, sf.points[0].to_angle), (-30.0, 60.0));

    let center = Point2::new(100.0, 100.0);
    assert_eq!(hit_test(sf, polar_point(center, 70.0, 30.0)), Some(0));
    assert_eq!(hit_test(sf, polar_point(center, 70.0, 350.0)), Some(0));
    assert_eq!(hit_test(sf, polar_point(center, 70.0, 90.0)), None);
    assert_eq!(hit_test(sf, polar_point(center, 70.0, 320.0)), None);
}

#[test]
fn rings_are_not_reported_on_the_top_layer() {
    let mut c = ring_chart(two_items());
    c.update(0.016, None);
    let mut sink = DrawList::new();
    let mut text = FixedAdvanceText::default();
    let outcomes = c.draw_layer(Layer::Top, &mut sink, &mut text);
    assert!(outcomes.iter().all(|(component, _)| !matches!(component, Component::Series(_))), "{outcomes:?}");
    assert_eq!(sink.doughnuts().count(), 0);
}
