// File: crates/chartmesh-core/tests/sampling.rs
// Purpose: Dense-series sampling rate, bucket reduction, show windows and data-zoom windows.

use chartmesh_core::downsample::{sample_rate, sample_value, sampled_indices};
use chartmesh_core::error::ConfigError;
use chartmesh_core::series::Sampling;
use chartmesh_core::{Axis, Chart, ChartSettings, DataZoom, GridCoord, Insets, SampleType, Series, Size};

fn chart(y: Axis) -> Chart {
    let mut c = Chart::new(Size::new(200.0, 100.0));
    c.set_settings(ChartSettings { growth_duration: 0.0, update_duration: 0.0, ..ChartSettings::default() });
    c.add_grid(GridCoord::default().with_insets(Insets::new(0.0, 0.0, 0.0, 0.0)));
    c.add_x_axis(Axis::category("X").with_boundary_gap(false));
    c.add_y_axis(y);
    c
}

#[test]
fn rate_is_ceiling_of_visible_over_max() {
    assert_eq!(sample_rate(1000, 100), 10);
    assert_eq!(sample_rate(1001, 100), 11);
    assert_eq!(sample_rate(50, 100), 1);
    assert_eq!(sample_rate(10, 0), 1);
}

#[test]
fn bucket_reductions() {
    let v = [1.0, 8.0, 3.0, 2.0, 9.0, 4.0];
    assert_eq!(sample_value(&v, SampleType::Max, 3, 0, 6, 0.0, 0), 8.0);
    assert_eq!(sample_value(&v, SampleType::Min, 3, 0, 6, 0.0, 3), 2.0);
    assert_eq!(sample_value(&v, SampleType::Sum, 3, 0, 6, 0.0, 0), 12.0);
    assert_eq!(sample_value(&v, SampleType::None, 3, 0, 6, 0.0, 3), 2.0);
    // Peak picks the max above the series average and the min below it.
    assert_eq!(sample_value(&v, SampleType::Peak, 3, 0, 6, 4.5, 3), 9.0);
    assert_eq!(sample_value(&v, SampleType::Peak, 3, 0, 6, 4.5, 0), 1.0);
    let drawn: Vec<usize> = sampled_indices(2, 9, 3).collect();
    assert_eq!(drawn, vec![2, 5, 8]);
}

#[test]
fn bucket_stops_at_show_window() {
    let v = [1.0, 2.0, 100.0, 4.0];
    // Index 2 lies outside `max_show`, so the bucket holds only index 1.
    assert_eq!(sample_value(&v, SampleType::Max, 2, 0, 2, 0.0, 1), 2.0);
}

#[test]
fn dense_series_draws_averaged_buckets() {
    let mut c = chart(Axis::new("Y", 0.0, 100.0));
    let values: Vec<f64> = (0..100).map(f64::from).collect();
    let sampling = Sampling { kind: SampleType::Average, max_display: Some(10), ..Sampling::default() };
    c.add_series(Series::line("dense", values).with_sampling(sampling));
    c.update(0.016, None);

    let sf = c.frame().series_frame(0).expect("laid out");
    assert_eq!(sf.sample_rate, 10);
    assert_eq!(sf.draw_indices.len(), 10);
    assert_eq!(sf.draw_indices[1], 10);
    assert_eq!(sf.points[0].value, 4.5);
    assert_eq!(sf.points[90].value, 94.5);
}

#[test]
fn sample_distance_limits_drawn_points() {
    let mut c = chart(Axis::new("Y", 0.0, 100.0));
    let values: Vec<f64> = (0..100).map(f64::from).collect();
    let sampling = Sampling { sample_dist: 20.0, ..Sampling::default() };
    c.add_series(Series::line("dense", values).with_sampling(sampling));
    c.update(0.016, None);

    // 200 px / 20 px allows 10 points.
    let sf = c.frame().series_frame(0).expect("laid out");
    assert_eq!(sf.sample_rate, 10);
}

#[test]
fn show_window_limits_drawn_indices() {
    let mut c = chart(Axis::new("Y", 0.0, 10.0));
    let s = Series::line("s", [1.0, 2.0, 3.0, 4.0, 5.0]).with_show_window(1, Some(4)).expect("valid window");
    c.add_series(s);
    c.update(0.016, None);

    let sf = c.frame().series_frame(0).expect("laid out");
    assert_eq!(sf.draw_indices, vec![1, 2, 3]);
}

#[test]
fn zoom_window_restricts_category_range() {
    let mut c = chart(Axis::new("Y", 0.0, 10.0));
    c.add_series(Series::line("s", (0..10).map(f64::from)));
    c.add_data_zoom(DataZoom::new(50.0, 100.0).expect("valid window").with_x_axes([0]));
    c.update(0.016, None);

    let x = c.frame().x_axis(0).expect("x axis");
    assert_eq!(x.zoom_start, 5);
    assert_eq!(x.visible_count, 5);
    let sf = c.frame().series_frame(0).expect("laid out");
    assert_eq!(sf.draw_indices.first(), Some(&5));
    assert!((sf.points[5].position.x - 0.0).abs() < 1e-3);
}

#[test]
fn invalid_configuration_is_rejected() {
    assert_eq!(
        Series::line("s", [1.0]).with_show_window(5, Some(2)).err(),
        Some(ConfigError::ShowWindow { min: 5, max: 2 })
    );
    assert_eq!(DataZoom::new(80.0, 20.0).err(), Some(ConfigError::ZoomWindow { start: 80.0, end: 20.0 }));
    assert_eq!(SampleType::moving_average(0).err(), Some(ConfigError::ZeroPeriod));

    let mut c = chart(Axis::new("Y", 0.0, 10.0));
    c.add_series(Series::line("s", [1.0]));
    assert_eq!(c.set_data(9, 0, vec![1.0]), Err(ConfigError::SeriesIndex(9)));
    assert_eq!(c.set_data(0, 4, vec![1.0]), Err(ConfigError::DataIndex { series: 0, index: 4 }));
}
