// File: crates/chartmesh-core/tests/axis_layout.rs
// Purpose: Category/value axis mapping through a full update pass, skip reasons and idempotent draws.

use chartmesh_core::error::{Degenerate, Invalid, Missing};
use chartmesh_core::series::{Arrow, ArrowPosition, LineArrow};
use chartmesh_core::{
    Axis, Chart, ChartSettings, Component, CoordRef, DrawList, DrawOutcome, FixedAdvanceText, GridCoord, Insets, Layer,
    Point2, Series, Size, Skip,
};

fn instant() -> ChartSettings {
    ChartSettings { growth_duration: 0.0, update_duration: 0.0, ..ChartSettings::default() }
}

fn chart(x: Axis, y: Axis) -> Chart {
    let mut c = Chart::new(Size::new(200.0, 100.0));
    c.set_settings(instant());
    c.add_grid(GridCoord::default().with_insets(Insets::new(0.0, 0.0, 0.0, 0.0)));
    c.add_x_axis(x);
    c.add_y_axis(y);
    c
}

fn approx(a: Point2, b: Point2) -> bool {
    (a.x - b.x).abs() < 1e-3 && (a.y - b.y).abs() < 1e-3
}

fn positions(c: &Chart, si: usize) -> Vec<Point2> {
    let sf = c.frame().series_frame(si).expect("series laid out");
    sf.drawn_points().map(|(_, p)| p.position).collect()
}

#[test]
fn category_ends_touch_grid_edges_without_boundary_gap() {
    let mut c = chart(Axis::category("X").with_boundary_gap(false), Axis::new("Y", 0.0, 10.0));
    c.add_series(Series::line("s", [1.0, 5.0, 3.0, 9.0, 2.0]));
    c.update(0.016, None);

    let pts = positions(&c, 0);
    assert_eq!(pts.len(), 5);
    assert!(approx(pts[0], Point2::new(0.0, 10.0)), "{:?}", pts[0]);
    assert!(approx(pts[4], Point2::new(200.0, 20.0)), "{:?}", pts[4]);
}

#[test]
fn boundary_gap_centers_items_in_bands() {
    let mut c = chart(Axis::category("X"), Axis::new("Y", 0.0, 10.0));
    c.add_series(Series::line("s", [1.0, 5.0, 3.0, 9.0, 2.0]));
    c.update(0.016, None);

    let pts = positions(&c, 0);
    assert!((pts[0].x - 20.0).abs() < 1e-3);
    assert!((pts[4].x - 180.0).abs() < 1e-3);
}

#[test]
fn category_on_y_makes_horizontal_chart() {
    let mut c = chart(Axis::new("X", 0.0, 10.0), Axis::category("Y").with_boundary_gap(false));
    c.add_series(Series::line("s", [1.0, 5.0, 3.0, 9.0, 2.0]));
    c.update(0.016, None);

    let sf = c.frame().series_frame(0).expect("series laid out");
    assert!(sf.horizontal);
    let pts = positions(&c, 0);
    assert!(approx(pts[0], Point2::new(20.0, 0.0)), "{:?}", pts[0]);
    assert!(approx(pts[4], Point2::new(40.0, 100.0)), "{:?}", pts[4]);
}

#[test]
fn inverse_axis_mirrors_positions() {
    let mut c = chart(Axis::category("X").with_boundary_gap(false).with_inverse(true), Axis::new("Y", 0.0, 10.0));
    c.add_series(Series::line("s", [1.0, 5.0, 3.0, 9.0, 2.0]));
    c.update(0.016, None);

    let pts = positions(&c, 0);
    assert!((pts[0].x - 200.0).abs() < 1e-3);
    assert!((pts[4].x - 0.0).abs() < 1e-3);
}

#[test]
fn missing_axis_is_reported_not_panicked() {
    let mut c = chart(Axis::category("X"), Axis::new("Y", 0.0, 10.0));
    c.add_series(Series::line("s", [1.0, 2.0]).with_coord(CoordRef::Grid { x_axis: 3, y_axis: 0 }));
    c.update(0.016, None);

    assert_eq!(c.frame().series_frame(0).err(), Some(Skip::MissingDependency(Missing::XAxis(3))));

    let mut sink = DrawList::new();
    let mut text = FixedAdvanceText::default();
    let outcomes = c.draw_layer(Layer::Content, &mut sink, &mut text);
    assert_eq!(
        outcomes,
        vec![(Component::Series(0), DrawOutcome::Skipped(Skip::MissingDependency(Missing::XAxis(3))))]
    );
}

#[test]
fn zero_span_value_axis_skips_series() {
    let mut c = chart(Axis::category("X"), Axis::new("Y", 5.0, 5.0));
    c.add_series(Series::line("s", [5.0, 5.0, 5.0]));
    c.update(0.016, None);

    assert_eq!(c.frame().series_frame(0).err(), Some(Skip::Degenerate(Degenerate::ZeroAxisSpan)));
}

#[test]
fn hidden_series_is_skipped_with_reason() {
    let mut c = chart(Axis::category("X"), Axis::new("Y", 0.0, 10.0));
    let mut s = Series::line("s", [1.0, 2.0]);
    s.show = false;
    c.add_series(s);
    c.update(0.016, None);

    let mut sink = DrawList::new();
    let mut text = FixedAdvanceText::default();
    let outcomes = c.draw_layer(Layer::Content, &mut sink, &mut text);
    assert_eq!(outcomes[0].1.skip(), Some(Skip::InvalidConfig(Invalid::Hidden)));
    assert!(sink.polylines().next().is_none());
}

#[test]
fn update_and_draw_are_idempotent() {
    let mut c = chart(Axis::category("X"), Axis::value("Y"));
    c.add_series(Series::line("a", [1.0, 5.0, 3.0, 9.0, 2.0]));
    c.add_series(Series::line("b", [2.0, 3.0, 4.0, 1.0, 6.0]));
    c.update(0.016, None);
    let first = c.frame().clone();
    c.update(0.016, None);
    assert_eq!(&first, c.frame());

    let (mut s1, mut t1) = (DrawList::new(), FixedAdvanceText::default());
    let (mut s2, mut t2) = (DrawList::new(), FixedAdvanceText::default());
    let o1 = c.draw(&mut s1, &mut t1);
    let o2 = c.draw(&mut s2, &mut t2);
    assert_eq!(o1, o2);
    assert_eq!(s1, s2);
    assert_eq!(t1, t2);
    assert!(o1.iter().all(|(_, o)| o.is_drawn()), "{o1:?}");
}

#[test]
fn full_draw_emits_lines_symbols_and_legend_text() {
    let mut c = chart(Axis::category("X"), Axis::value("Y"));
    c.add_series(Series::line("Sales", [1.0, 5.0, 3.0, 9.0, 2.0]));
    c.update(0.016, None);

    let mut content = DrawList::new();
    let mut text = FixedAdvanceText::default();
    c.draw_layer(Layer::Content, &mut content, &mut text);
    assert_eq!(content.polylines().count(), 1);
    assert_eq!(content.symbols().count(), 5);

    let mut all = DrawList::new();
    c.draw(&mut all, &mut text);
    assert!(all.len() > content.len());
    assert!(text.texts().any(|t| t == "Sales"));
}

#[test]
fn clean_layers_stay_clean_without_changes() {
    let mut c = chart(Axis::category("X"), Axis::new("Y", 0.0, 10.0));
    c.add_series(Series::line("s", [1.0, 2.0, 3.0]));
    c.update(0.016, None);
    for layer in Layer::ALL {
        c.mark_clean(layer);
    }
    c.update(0.016, None);
    for layer in Layer::ALL {
        assert!(!c.is_dirty(layer), "{layer:?} dirty after no-op update");
    }

    c.set_data(0, 1, vec![7.0]).expect("index in range");
    assert!(c.is_dirty(Layer::Content));
}

fn flat_line_with_arrow(position: ArrowPosition) -> Chart {
    let mut c = chart(Axis::category("X").with_boundary_gap(false), Axis::new("Y", 0.0, 10.0));
    let mut s = Series::line("s", [5.0, 5.0, 5.0, 5.0, 5.0]);
    if let Some(o) = s.line_options_mut() {
        o.arrow = Some(LineArrow { position, arrow: Arrow::default() });
    }
    c.add_series(s);
    c.update(0.016, None);
    c
}

#[test]
fn end_arrow_tip_sits_on_last_point() {
    let c = flat_line_with_arrow(ArrowPosition::End);
    let mut sink = DrawList::new();
    let mut text = FixedAdvanceText::default();
    c.draw_layer(Layer::Content, &mut sink, &mut text);

    let heads: Vec<_> = sink.arrows().collect();
    assert_eq!(heads.len(), 1);
    assert!(approx(heads[0].tip, Point2::new(200.0, 50.0)), "{:?}", heads[0].tip);
    assert!(approx(heads[0].from, Point2::new(150.0, 50.0)), "{:?}", heads[0].from);
    // The arrow replaces the symbol at the end.
    assert_eq!(sink.symbols().count(), 4);
    assert!(sink.symbols().all(|(p, _)| p.x < 200.0));
}

#[test]
fn start_arrow_points_back_at_first_point() {
    let c = flat_line_with_arrow(ArrowPosition::Start);
    let mut sink = DrawList::new();
    let mut text = FixedAdvanceText::default();
    c.draw_layer(Layer::Content, &mut sink, &mut text);

    let heads: Vec<_> = sink.arrows().collect();
    assert_eq!(heads.len(), 1);
    assert!(approx(heads[0].tip, Point2::new(0.0, 50.0)), "{:?}", heads[0].tip);
    assert!(approx(heads[0].from, Point2::new(50.0, 50.0)), "{:?}", heads[0].from);
}
