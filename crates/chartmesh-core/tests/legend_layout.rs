// File: crates/chartmesh-core/tests/legend_layout.rs
// Purpose: Legend naming, flow wrapping, anchoring, hover highlight and click-to-toggle.

use chartmesh_core::error::{Invalid, Skip};
use chartmesh_core::legend::{self, flow_rows, legend_names};
use chartmesh_core::{
    Axis, Chart, ChartSettings, FixedAdvanceText, GridCoord, Insets, Legend, Location, Orient, Point2, Series, Size,
    Theme,
};

fn chart() -> Chart {
    let mut c = Chart::new(Size::new(200.0, 100.0));
    c.set_settings(ChartSettings { growth_duration: 0.0, update_duration: 0.0, ..ChartSettings::default() });
    c.add_grid(GridCoord::default().with_insets(Insets::new(0.0, 0.0, 0.0, 0.0)));
    c.add_x_axis(Axis::category("X"));
    c.add_y_axis(Axis::new("Y", 0.0, 10.0));
    c
}

#[test]
fn names_are_deduplicated_in_series_order() {
    let series = vec![
        Series::line("A", [1.0]),
        Series::ring("R", [("x", 1.0, 2.0), ("A", 1.0, 2.0)]),
        Series::line("", [1.0]),
        Series::line("B", [1.0]),
    ];
    assert_eq!(legend_names(&series), vec!["A", "x", "B"]);
}

#[test]
fn rows_wrap_when_width_is_exceeded() {
    assert_eq!(flow_rows(&[30.0, 40.0, 50.0, 20.0], 70.0, 0.0), vec![0..2, 2..4]);
    assert_eq!(flow_rows(&[30.0, 30.0], 70.0, 10.0), vec![0..2]);
    assert_eq!(flow_rows(&[30.0, 30.0, 30.0], 70.0, 10.0), vec![0..2, 2..3]);
}

#[test]
fn top_legend_is_centered_below_top_edge() {
    let series = vec![Series::line("A", [1.0]), Series::line("B", [1.0])];
    let names = legend_names(&series);
    let text = FixedAdvanceText::default();
    let layout = legend::layout(&Legend::default(), &names, &series, None, Size::new(200.0, 100.0), &Theme::dark(), &text);

    assert_eq!(layout.rows, vec![0..2]);
    // Each item: 25 icon + 5 gap + 7 text = 37 wide, 16 tall; block 37 + 10 + 37 = 84.
    assert_eq!(layout.items[0].position, Point2::new(58.0, 74.0));
    assert_eq!(layout.items[1].position, Point2::new(105.0, 74.0));
    assert_eq!(layout.bounds.width, 84.0);
    assert_eq!(layout.hit(Point2::new(120.0, 80.0)), Some(1));
    assert_eq!(layout.hit(Point2::new(100.0, 80.0)), None);
}

#[test]
fn vertical_bottom_right_legend_stacks_items() {
    let series = vec![Series::line("A", [1.0]), Series::line("B", [1.0])];
    let names = legend_names(&series);
    let text = FixedAdvanceText::default();
    let legend = Legend::default().with_orient(Orient::Vertical).with_location(Location::BottomRight);
    let layout = legend::layout(&legend, &names, &series, None, Size::new(200.0, 100.0), &Theme::dark(), &text);

    assert_eq!(layout.rows, vec![0..2]);
    // Block 37 x 42, 10 px from the right and bottom edges.
    assert_eq!(layout.items[0].position, Point2::new(153.0, 36.0));
    assert_eq!(layout.items[1].position, Point2::new(153.0, 10.0));
}

#[test]
fn hover_highlights_whole_series() {
    let mut c = chart();
    c.add_series(Series::line("A", [1.0, 2.0]));
    c.add_series(Series::line("B", [3.0, 4.0]));
    c.update(0.016, Some(Point2::new(120.0, 80.0)));

    assert!(!c.states()[0].legend_highlight);
    assert!(c.states()[1].legend_highlight);
    let layout = c.frame().legend.as_ref().expect("legend laid out");
    assert!(layout.items[1].highlighted);

    c.update(0.016, None);
    assert!(!c.states()[1].legend_highlight);
}

#[test]
fn click_toggles_series_visibility() {
    let mut c = chart();
    c.add_series(Series::line("A", [1.0, 2.0]));
    c.add_series(Series::line("B", [3.0, 4.0]));
    c.update(0.016, None);

    assert!(c.click(Point2::new(70.0, 80.0)));
    c.update(0.016, None);
    assert!(!c.series()[0].show);
    assert_eq!(c.frame().series_frame(0).err(), Some(Skip::InvalidConfig(Invalid::Hidden)));
    let layout = c.frame().legend.as_ref().expect("legend laid out");
    assert!(!layout.items[0].active);
    assert!(layout.items[1].active);

    assert!(!c.click(Point2::new(5.0, 5.0)));
    assert!(c.toggle_legend(0));
    assert!(c.series()[0].show);
}

#[test]
fn ring_items_toggle_by_data_name() {
    let mut c = Chart::new(Size::new(200.0, 200.0));
    c.add_series(Series::ring("ring", [("a", 25.0, 100.0), ("b", 50.0, 100.0)]));
    c.update(0.016, None);
    assert_eq!(c.legend_names(), ["a", "b"]);

    assert!(c.toggle_legend(1));
    assert!(!c.series()[0].data[1].show);
    assert!(c.series()[0].data[0].show);
    assert!(!c.toggle_legend(5));
}
