// File: crates/chartmesh-core/tests/polar.rs
// Purpose: Line series on a polar coordinate: radius/angle resolution, closing and missing polar.

use chartmesh_core::error::Missing;
use chartmesh_core::{
    Axis, Chart, ChartSettings, CoordRef, DrawList, FixedAdvanceText, Layer, Point2, PolarCoord, Series, Size, Skip,
};

fn near(a: Point2, b: Point2) -> bool {
    (a.x - b.x).abs() < 1e-3 && (a.y - b.y).abs() < 1e-3
}

fn polar_chart(polar: usize) -> Chart {
    let mut c = Chart::new(Size::new(200.0, 200.0));
    c.set_settings(ChartSettings { growth_duration: 0.0, update_duration: 0.0, ..ChartSettings::default() });
    c.add_polar(PolarCoord { radius: 80.0, ..PolarCoord::default() });
    c.add_radius_axis(Axis::new("r", 0.0, 10.0));
    c.add_angle_axis(Axis::category("a"));
    c.add_series(Series::line("p", [10.0, 5.0, 10.0, 5.0]).with_coord(CoordRef::Polar { polar }));
    c
}

#[test]
fn points_go_clockwise_from_up() {
    let mut c = polar_chart(0);
    c.update(0.016, None);

    let sf = c.frame().series_frame(0).expect("polar line laid out");
    assert!(near(sf.points[0].position, Point2::new(100.0, 180.0)), "{:?}", sf.points[0].position);
    assert!(near(sf.points[1].position, Point2::new(140.0, 100.0)), "{:?}", sf.points[1].position);
    assert!(near(sf.points[2].position, Point2::new(100.0, 20.0)), "{:?}", sf.points[2].position);
    assert!(near(sf.points[3].position, Point2::new(60.0, 100.0)), "{:?}", sf.points[3].position);
}

#[test]
fn full_line_closes_on_first_point() {
    let mut c = polar_chart(0);
    c.update(0.016, None);

    let sf = c.frame().series_frame(0).expect("polar line laid out");
    assert_eq!(sf.segments.len(), 1);
    assert_eq!(sf.segments[0].len(), 5);
    assert_eq!(sf.segments[0][0], sf.segments[0][4]);

    let mut sink = DrawList::new();
    let mut text = FixedAdvanceText::default();
    let outcomes = c.draw_layer(Layer::Content, &mut sink, &mut text);
    assert!(outcomes.iter().all(|(_, o)| o.is_drawn()), "{outcomes:?}");
    assert!(sink.polylines().any(|p| p.len() == 5));
}

#[test]
fn missing_polar_skips_series() {
    let mut c = polar_chart(2);
    c.update(0.016, None);
    assert_eq!(c.frame().series_frame(0).err(), Some(Skip::MissingDependency(Missing::Polar(2))));
}
