// File: crates/chartmesh-core/tests/stacking.rs
// Purpose: Stacked series accumulate in registration order; auto ranges cover stack tops.

use chartmesh_core::{
    Axis, Chart, ChartSettings, DrawList, FixedAdvanceText, GridCoord, Insets, Layer, Point2, Series, Size,
};

fn chart(y: Axis) -> Chart {
    let mut c = Chart::new(Size::new(200.0, 100.0));
    c.set_settings(ChartSettings { growth_duration: 0.0, update_duration: 0.0, ..ChartSettings::default() });
    c.add_grid(GridCoord::default().with_insets(Insets::new(0.0, 0.0, 0.0, 0.0)));
    c.add_x_axis(Axis::category("X").with_boundary_gap(false));
    c.add_y_axis(y);
    c
}

fn close(a: Point2, b: Point2) -> bool {
    (a.x - b.x).abs() < 1e-3 && (a.y - b.y).abs() < 1e-3
}

#[test]
fn second_member_sits_on_first() {
    let mut c = chart(Axis::new("Y", 0.0, 20.0));
    c.add_series(Series::line("a", [1.0, 2.0, 3.0]).with_stack("total"));
    c.add_series(Series::line("b", [4.0, 5.0, 6.0]).with_stack("total"));
    c.update(0.016, None);

    let frame = c.frame();
    let a = frame.series_frame(0).expect("a laid out");
    let b = frame.series_frame(1).expect("b laid out");
    assert!(close(a.points[0].position, Point2::new(0.0, 5.0)), "{:?}", a.points[0].position);
    assert!(close(b.points[0].position, Point2::new(0.0, 25.0)), "{:?}", b.points[0].position);
    assert!(close(b.points[2].position, Point2::new(200.0, 45.0)), "{:?}", b.points[2].position);
    assert!((b.points[0].stack_offset - 5.0).abs() < 1e-3);
    assert!((b.points[0].stack_height - 20.0).abs() < 1e-3);
    assert_eq!(frame.stack.cumulative(1, 2), 9.0);
    assert_eq!(frame.stack.offset(1, 1), 2.0);
}

#[test]
fn unstacked_series_is_independent() {
    let mut c = chart(Axis::new("Y", 0.0, 20.0));
    c.add_series(Series::line("a", [1.0, 2.0, 3.0]).with_stack("total"));
    c.add_series(Series::line("free", [4.0, 4.0, 4.0]));
    c.add_series(Series::line("b", [4.0, 5.0, 6.0]).with_stack("total"));
    c.update(0.016, None);

    let free = c.frame().series_frame(1).expect("free laid out");
    assert!((free.points[0].position.y - 20.0).abs() < 1e-3);
    let b = c.frame().series_frame(2).expect("b laid out");
    assert!((b.points[0].position.y - 25.0).abs() < 1e-3);
}

#[test]
fn auto_range_covers_stack_tops() {
    let mut c = chart(Axis::value("Y"));
    c.add_series(Series::line("a", [1.0, 2.0, 3.0]).with_stack("total"));
    c.add_series(Series::line("b", [4.0, 5.0, 6.0]).with_stack("total"));
    c.update(0.016, None);

    let y = c.frame().y_axis(0).expect("y axis");
    assert_eq!(y.min, 0.0);
    assert_eq!(y.max, 10.0);
}

#[test]
fn ignored_point_contributes_nothing_to_stack() {
    let mut c = chart(Axis::new("Y", 0.0, 20.0));
    c.add_series(Series::line("a", [1.0, -1.0, 3.0]).with_ignore(-1.0, false).with_stack("total"));
    c.add_series(Series::line("b", [4.0, 5.0, 6.0]).with_stack("total"));
    c.update(0.016, None);

    let a = c.frame().series_frame(0).expect("a laid out");
    assert!(a.points[1].ignored);
    assert!(!a.draw_indices.contains(&1));
    assert_eq!(c.frame().stack.offset(1, 1), 0.0);
}

#[test]
fn stacked_symbols_draw_on_top_layer() {
    let mut c = chart(Axis::new("Y", 0.0, 20.0));
    c.add_series(Series::line("a", [1.0, 2.0, 3.0]).with_stack("total"));
    c.add_series(Series::line("b", [4.0, 5.0, 6.0]).with_stack("total"));
    c.update(0.016, None);

    let mut text = FixedAdvanceText::default();
    let mut content = DrawList::new();
    c.draw_layer(Layer::Content, &mut content, &mut text);
    assert_eq!(content.symbols().count(), 0);
    assert_eq!(content.polylines().count(), 2);

    let mut top = DrawList::new();
    c.draw_layer(Layer::Top, &mut top, &mut text);
    assert_eq!(top.symbols().count(), 6);
}
