// File: crates/chartmesh-core/src/grid.rs
// Summary: Coordinate regions (rectangular grid, polar) and tick layout helpers.

use crate::geometry::{Point2, Rect, Size};
use crate::theme::Color;
use crate::types::{resolve_length, Insets};

pub fn linspace(start: f64, end: f64, steps: usize) -> Vec<f64> {
    if steps < 2 { return vec![start, end]; }
    let step = (end - start) / (steps as f64 - 1.0);
    (0..steps).map(|i| start + step * i as f64).collect()
}

/// Rectangular coordinate region defined by insets from the chart edges.
#[derive(Clone, Debug, PartialEq)]
pub struct GridCoord {
    pub insets: Insets,
    pub show: bool,
    pub background: Option<Color>,
    pub show_border: bool,
    pub show_split_lines: bool,
}

impl GridCoord {
    pub fn with_insets(mut self, insets: Insets) -> Self {
        self.insets = insets;
        self
    }

    pub fn with_background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    /// Resolved region in chart space (y-up, origin bottom-left).
    pub fn frame(&self, chart: Size) -> Rect {
        let left = self.insets.left_px(chart.width);
        let right = self.insets.right_px(chart.width);
        let top = self.insets.top_px(chart.height);
        let bottom = self.insets.bottom_px(chart.height);
        Rect::new(left, bottom, chart.width - left - right, chart.height - top - bottom)
    }
}

impl Default for GridCoord {
    fn default() -> Self {
        Self { insets: Insets::default(), show: true, background: None, show_border: false, show_split_lines: true }
    }
}

/// Circular coordinate region with a radius (value) axis and an angle (category) axis.
#[derive(Clone, Debug, PartialEq)]
pub struct PolarCoord {
    /// Components in `0.0..=1.0` are fractions of the chart size.
    pub center: Point2,
    /// In `0.0..=1.0` a fraction of the smaller chart side, otherwise pixels.
    pub radius: f32,
    /// Degrees clockwise from up.
    pub start_angle: f32,
    pub clockwise: bool,
    pub radius_axis: usize,
    pub angle_axis: usize,
    pub show: bool,
    pub background: Option<Color>,
}

impl PolarCoord {
    pub fn frame(&self, chart: Size) -> PolarFrame {
        PolarFrame {
            center: Point2::new(resolve_length(self.center.x, chart.width), resolve_length(self.center.y, chart.height)),
            radius: resolve_length(self.radius, chart.width.min(chart.height)),
        }
    }
}

impl Default for PolarCoord {
    fn default() -> Self {
        Self {
            center: Point2::new(0.5, 0.5),
            radius: 0.35,
            start_angle: 0.0,
            clockwise: true,
            radius_axis: 0,
            angle_axis: 0,
            show: true,
            background: None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PolarFrame {
    pub center: Point2,
    pub radius: f32,
}

impl PolarFrame {
    pub fn contains(&self, p: Point2) -> bool {
        p.distance(self.center) <= self.radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_frame_from_fraction_and_pixel_insets() {
        let g = GridCoord::default().with_insets(Insets::new(0.1, 20.0, 0.25, 10.0));
        let r = g.frame(Size::new(200.0, 100.0));
        assert_eq!(r, Rect::new(20.0, 10.0, 160.0, 65.0));
    }

    #[test]
    fn linspace_endpoints() {
        assert_eq!(linspace(0.0, 10.0, 3), vec![0.0, 5.0, 10.0]);
        assert_eq!(linspace(1.0, 2.0, 1), vec![1.0, 2.0]);
    }
}
