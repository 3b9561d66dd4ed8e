// File: crates/chartmesh-core/src/scale.rs
// Summary: Axis resolver: category and value mappings from data to screen positions.

use crate::axis::{Axis, AxisFrame, AxisKind};
use crate::error::{Degenerate, Skip};
use crate::geometry::{polar_point, Point2};
use crate::grid::PolarFrame;

/// Screen mapping operations for one axis dimension.
pub trait ScaleTransform {
    /// Position of `value` (data value, or category index) along the axis.
    fn to_px(&self, value: f64) -> f32;
    /// Inverse of `to_px`; for category axes the (fractional) index.
    fn from_px(&self, px: f32) -> f64;
    /// `to_px` measured from the region start instead of the screen origin.
    fn length_of(&self, value: f64) -> f32 {
        self.to_px(value) - self.start()
    }
    fn start(&self) -> f32;
}

/// Width of one category band or data step along an axis of `axis_length` pixels.
///
/// Category axes divide by the visible count when items sit inside their band
/// (`boundary_gap`), otherwise by `count - 1` so the ends touch the region edges.
pub fn scale_width(axis: &Axis, axis_length: f32, count: usize) -> f32 {
    let n = count.max(1) as f32;
    match axis.kind {
        AxisKind::Category if axis.boundary_gap => axis_length / n,
        _ => axis_length / (n - 1.0).max(1.0),
    }
}

/// Resolved mapping for one axis over one region.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisScale {
    pub start: f32,
    pub length: f32,
    pub kind: AxisKind,
    pub inverse: bool,
    pub boundary_gap: bool,
    pub min: f64,
    pub max: f64,
    pub zoom_start: usize,
    pub scale_width: f32,
}

impl AxisScale {
    pub fn new(axis: &Axis, frame: &AxisFrame, start: f32, length: f32) -> Result<Self, Skip> {
        if length.is_nan() || length <= 0.0 || !start.is_finite() {
            return Err(Degenerate::EmptyRegion.into());
        }
        if axis.kind == AxisKind::Value {
            let span = frame.span();
            if !span.is_finite() {
                return Err(Degenerate::NonFinite.into());
            }
            if span.abs() < f64::EPSILON {
                return Err(Degenerate::ZeroAxisSpan.into());
            }
        }
        Ok(Self {
            start,
            length,
            kind: axis.kind,
            inverse: axis.inverse,
            boundary_gap: axis.is_category() && axis.boundary_gap,
            min: frame.min,
            max: frame.max,
            zoom_start: frame.zoom_start,
            scale_width: frame.scale_width,
        })
    }

    fn offset_of(&self, value: f64) -> f32 {
        match self.kind {
            AxisKind::Category => {
                let band = if self.boundary_gap { self.scale_width * 0.5 } else { 0.0 };
                (value - self.zoom_start as f64) as f32 * self.scale_width + band
            }
            AxisKind::Value => ((value - self.min) / (self.max - self.min)) as f32 * self.length,
        }
    }

    /// Nearest visible category index under `px` (category axes).
    pub fn nearest_index(&self, px: f32, count: usize) -> Option<usize> {
        if count == 0 || self.kind != AxisKind::Category {
            return None;
        }
        let idx = self.from_px(px).round();
        if idx < self.zoom_start as f64 {
            return Some(self.zoom_start);
        }
        Some((idx as usize).min(self.zoom_start + count - 1))
    }
}

impl ScaleTransform for AxisScale {
    fn to_px(&self, value: f64) -> f32 {
        let off = self.offset_of(value);
        if self.inverse { self.start + self.length - off } else { self.start + off }
    }

    fn from_px(&self, px: f32) -> f64 {
        let off = if self.inverse { self.start + self.length - px } else { px - self.start };
        match self.kind {
            AxisKind::Category => {
                let band = if self.boundary_gap { self.scale_width * 0.5 } else { 0.0 };
                if self.scale_width <= 0.0 {
                    return self.zoom_start as f64;
                }
                self.zoom_start as f64 + ((off - band) / self.scale_width) as f64
            }
            AxisKind::Value => self.min + (off / self.length) as f64 * (self.max - self.min),
        }
    }

    fn start(&self) -> f32 {
        self.start
    }
}

/// Screen position of `value` along an axis occupying `region_start..region_start + region_length`.
pub fn axis_position(
    region_start: f32,
    region_length: f32,
    axis: &Axis,
    frame: &AxisFrame,
    value: f64,
) -> Result<f32, Skip> {
    Ok(AxisScale::new(axis, frame, region_start, region_length)?.to_px(value))
}

/// Pixel length of `value` measured from the region origin.
pub fn value_length(region_length: f32, axis: &Axis, frame: &AxisFrame, value: f64) -> Result<f32, Skip> {
    Ok(AxisScale::new(axis, frame, 0.0, region_length)?.length_of(value))
}

/// Polar position of a (radius value, angle index) pair.
pub fn polar_position(
    polar: &PolarFrame,
    radius_scale: &AxisScale,
    radius_value: f64,
    start_angle: f32,
    clockwise: bool,
    index: usize,
    count: usize,
) -> Point2 {
    let r = radius_scale.length_of(radius_value).clamp(0.0, polar.radius);
    polar_point(polar.center, r, polar_angle(start_angle, clockwise, index, count))
}

/// Angle (clockwise from up) of category `index` out of `count` around a polar coordinate.
pub fn polar_angle(start_angle: f32, clockwise: bool, index: usize, count: usize) -> f32 {
    let step = 360.0 / count.max(1) as f32;
    let a = if clockwise { start_angle + index as f32 * step } else { start_angle - index as f32 * step };
    a.rem_euclid(360.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_axis_maps_linearly() {
        let axis = Axis::new("v", 0.0, 100.0);
        let frame = AxisFrame { min: 0.0, max: 100.0, ..AxisFrame::default() };
        assert_eq!(axis_position(10.0, 200.0, &axis, &frame, 50.0).unwrap(), 110.0);
        let inv = axis.clone().with_inverse(true);
        assert_eq!(axis_position(10.0, 200.0, &inv, &frame, 25.0).unwrap(), 160.0);
    }

    #[test]
    fn zero_span_is_degenerate() {
        let axis = Axis::new("v", 5.0, 5.0);
        let frame = AxisFrame { min: 5.0, max: 5.0, ..AxisFrame::default() };
        assert_eq!(
            axis_position(0.0, 100.0, &axis, &frame, 5.0),
            Err(Skip::Degenerate(Degenerate::ZeroAxisSpan))
        );
    }

    #[test]
    fn boundary_gap_centers_items() {
        let axis = Axis::category("c");
        let sw = scale_width(&axis, 100.0, 4);
        assert_eq!(sw, 25.0);
        let frame = AxisFrame { scale_width: sw, visible_count: 4, ..AxisFrame::default() };
        let s = AxisScale::new(&axis, &frame, 0.0, 100.0).unwrap();
        assert_eq!(s.to_px(0.0), 12.5);
        assert_eq!(s.to_px(3.0), 87.5);
        assert_eq!(s.nearest_index(60.0, 4), Some(2));
    }
}
