// File: crates/chartmesh-core/tests/interaction.rs
// Purpose: Pointer highlight latching, one-shot clearing and layer dirtiness from interaction.

use chartmesh_core::interaction::{apply_hits, clear_all, SeriesHit};
use chartmesh_core::{Axis, Chart, ChartSettings, GridCoord, Insets, Layer, Point2, Series, SeriesState, Size};

fn chart() -> Chart {
    let mut c = Chart::new(Size::new(200.0, 100.0));
    c.set_settings(ChartSettings { growth_duration: 0.0, update_duration: 0.0, ..ChartSettings::default() });
    c.add_grid(GridCoord::default().with_insets(Insets::new(0.0, 0.0, 0.0, 0.0)));
    c.add_x_axis(Axis::category("X").with_boundary_gap(false));
    c.add_y_axis(Axis::new("Y", 0.0, 10.0));
    c.add_series(Series::line("s", [1.0, 5.0, 3.0, 9.0, 2.0]));
    c
}

fn clean_all(c: &mut Chart) {
    for layer in Layer::ALL {
        c.mark_clean(layer);
    }
}

#[test]
fn pointer_on_point_highlights_it() {
    let mut c = chart();
    c.update(0.016, Some(Point2::new(151.0, 89.0)));
    let st = &c.states()[0];
    assert_eq!(st.pointer_item, Some(3));
    assert!(st.pointer_enter);
    assert!(st.is_highlighted(3));
    assert!(!st.is_highlighted(2));
}

#[test]
fn highlighted_point_uses_selected_size() {
    let mut c = chart();
    c.update(0.016, Some(Point2::new(150.0, 90.0)));
    assert_eq!(c.states()[0].pointer_item, Some(3));
    // Outside the normal radius (4) but inside the selected one (8).
    c.update(0.016, Some(Point2::new(150.0, 84.0)));
    assert_eq!(c.states()[0].pointer_item, Some(3));
}

#[test]
fn leaving_the_chart_clears_once() {
    let mut c = chart();
    c.update(0.016, Some(Point2::new(150.0, 90.0)));
    clean_all(&mut c);

    c.update(0.016, Some(Point2::new(-10.0, 50.0)));
    assert_eq!(c.states()[0].pointer_item, None);
    assert!(!c.states()[0].is_highlighted(3));
    assert!(c.is_dirty(Layer::Content));

    clean_all(&mut c);
    c.update(0.016, Some(Point2::new(-10.0, 50.0)));
    assert!(!c.is_dirty(Layer::Content));
    assert!(!c.is_dirty(Layer::Top));
}

#[test]
fn moving_between_empty_spots_keeps_layers_clean() {
    let mut c = chart();
    c.update(0.016, Some(Point2::new(10.0, 70.0)));
    clean_all(&mut c);
    c.update(0.016, Some(Point2::new(20.0, 70.0)));
    assert_eq!(c.states()[0].pointer_item, None);
    assert!(!c.is_dirty(Layer::Content));
}

#[test]
fn latching_reports_changes_only() {
    let mut states = vec![SeriesState::default(), SeriesState::default()];
    let hits = [SeriesHit { item: Some(1), legend: false }, SeriesHit { item: None, legend: true }];
    assert!(apply_hits(&mut states, &hits, &[3, 2]));
    assert!(states[0].is_highlighted(1));
    assert!(states[1].is_highlighted(0));
    assert!(!apply_hits(&mut states, &hits, &[3, 2]));

    assert!(clear_all(&mut states));
    assert!(!clear_all(&mut states));
    assert!(!states[1].legend_highlight);
}
