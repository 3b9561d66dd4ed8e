// File: crates/chartmesh-core/src/context.rs
// Summary: Per-frame lookup context and the computed frame (positions, angles, layouts).
// Notes:
// - `ChartContext` borrows configuration read-only for one layout/draw pass.
// - `ChartFrame` is rebuilt from scratch every update; nothing in it survives
//   to the next frame except through `SeriesState`.

use crate::animation::SeriesAnimation;
use crate::axis::{Axis, AxisFrame};
use crate::datazoom::DataZoom;
use crate::error::{Missing, Skip};
use crate::geometry::{Point2, Rect, Size};
use crate::grid::{GridCoord, PolarCoord, PolarFrame};
use crate::legend::LegendLayout;
use crate::mark::{MarkArea, MarkLine};
use crate::series::{Series, SeriesKind};
use crate::stack::StackTable;
use crate::theme::{Color, Theme};
use crate::tooltip::TooltipFrame;
use crate::types::ChartSettings;

/// Read-only view of the chart configuration used by every component pass.
#[derive(Clone, Copy)]
pub struct ChartContext<'a> {
    pub size: Size,
    pub theme: &'a Theme,
    pub settings: &'a ChartSettings,
    pub series: &'a [Series],
    pub states: &'a [SeriesState],
    pub grids: &'a [GridCoord],
    pub polars: &'a [PolarCoord],
    pub x_axes: &'a [Axis],
    pub y_axes: &'a [Axis],
    pub radius_axes: &'a [Axis],
    pub angle_axes: &'a [Axis],
    pub data_zooms: &'a [DataZoom],
    pub mark_lines: &'a [MarkLine],
    pub mark_areas: &'a [MarkArea],
    pub mark_line_states: &'a [SeriesAnimation],
    /// Deduplicated legend names in series order; the position is the palette index.
    pub legend_names: &'a [String],
}

impl<'a> ChartContext<'a> {
    pub fn chart_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.size.width, self.size.height)
    }

    pub fn series(&self, index: usize) -> Result<&'a Series, Skip> {
        self.series.get(index).ok_or(Skip::from(Missing::Series(index)))
    }

    pub fn state(&self, index: usize) -> Option<&'a SeriesState> {
        self.states.get(index)
    }

    pub fn x_axis(&self, index: usize) -> Result<&'a Axis, Skip> {
        self.x_axes.get(index).ok_or(Skip::from(Missing::XAxis(index)))
    }

    pub fn y_axis(&self, index: usize) -> Result<&'a Axis, Skip> {
        self.y_axes.get(index).ok_or(Skip::from(Missing::YAxis(index)))
    }

    pub fn grid(&self, index: usize) -> Result<&'a GridCoord, Skip> {
        self.grids.get(index).ok_or(Skip::from(Missing::Grid(index)))
    }

    pub fn polar(&self, index: usize) -> Result<&'a PolarCoord, Skip> {
        self.polars.get(index).ok_or(Skip::from(Missing::Polar(index)))
    }

    /// Radius axis of a polar coordinate (missing maps to the polar itself).
    pub fn radius_axis(&self, polar: usize) -> Result<&'a Axis, Skip> {
        let p = self.polar(polar)?;
        self.radius_axes.get(p.radius_axis).ok_or(Skip::from(Missing::Polar(polar)))
    }

    pub fn angle_axis(&self, polar: usize) -> Result<&'a Axis, Skip> {
        let p = self.polar(polar)?;
        self.angle_axes.get(p.angle_axis).ok_or(Skip::from(Missing::Polar(polar)))
    }

    /// First data zoom filtering x axis `index`.
    pub fn data_zoom_of_x_axis(&self, index: usize) -> Option<&'a DataZoom> {
        self.data_zooms.iter().find(|z| z.covers_x(index))
    }

    pub fn data_zoom_of_y_axis(&self, index: usize) -> Option<&'a DataZoom> {
        self.data_zooms.iter().find(|z| z.covers_y(index))
    }

    pub fn legend_index(&self, name: &str) -> Option<usize> {
        self.legend_names.iter().position(|n| n == name)
    }

    /// Palette color of a legend name; unknown names use palette slot 0.
    pub fn name_color(&self, name: &str) -> Color {
        self.theme.color(self.legend_index(name).unwrap_or(0))
    }

    /// Main color of a series (line color; ring uses per-item colors).
    pub fn series_color(&self, index: usize) -> Color {
        match self.series.get(index) {
            Some(s) => s.color.unwrap_or_else(|| self.name_color(&s.name)),
            None => self.theme.color(index),
        }
    }

    /// Color of one data item, honoring item and series overrides.
    pub fn item_color(&self, series: usize, data: usize) -> Color {
        let Some(s) = self.series.get(series) else { return self.theme.color(series) };
        let item = s.data.get(data);
        if let Some(c) = item.and_then(|d| d.color) {
            return c;
        }
        match s.kind {
            SeriesKind::Ring(_) => match item {
                Some(d) => self.legend_index(&d.name).map(|i| self.theme.color(i)).unwrap_or(self.theme.color(data)),
                None => self.theme.color(data),
            },
            SeriesKind::Line(_) => self.series_color(series),
        }
    }

    pub fn is_highlighted(&self, series: usize, data: usize) -> bool {
        self.states.get(series).is_some_and(|s| s.is_highlighted(data))
    }
}

/// Computed per-point geometry for the current frame, indexed by data index.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointContext {
    pub position: Point2,
    /// Pixel length of this point's own value along the value dimension.
    pub stack_height: f32,
    /// Pixel offset contributed by earlier stack members.
    pub stack_offset: f32,
    /// The value actually drawn (sampled and animated).
    pub value: f64,
    pub ignored: bool,
    /// Drawn this frame (in the visible, sampled index set).
    pub drawn: bool,
    pub label_position: Point2,
    pub start_angle: f32,
    pub to_angle: f32,
    pub inside_radius: f32,
    pub outside_radius: f32,
}

/// Frame output of one series.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SeriesFrame {
    pub points: Vec<PointContext>,
    /// Drawn, non-ignored data indices in draw order.
    pub draw_indices: Vec<usize>,
    /// Line runs after ignore breaks and smoothing.
    pub segments: Vec<Vec<Point2>>,
    /// Area polygons under the line runs.
    pub areas: Vec<Vec<Point2>>,
    /// Region the series is drawn in (grid rect, or polar/ring bounds).
    pub region: Rect,
    /// Ring/polar center and outer radius.
    pub center: Point2,
    pub radius: f32,
    /// Horizontal chart (category axis is y).
    pub horizontal: bool,
    /// Symbols are emitted on the top layer.
    pub symbols_on_top: bool,
    pub sample_rate: usize,
}

impl SeriesFrame {
    pub fn point(&self, index: usize) -> Option<&PointContext> {
        self.points.get(index)
    }

    pub fn drawn_points(&self) -> impl Iterator<Item = (usize, &PointContext)> {
        self.draw_indices.iter().filter_map(|i| self.points.get(*i).map(|p| (*i, p)))
    }
}

/// Persistent interaction state of one series (latched between updates).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SeriesState {
    pub highlighted: Vec<bool>,
    /// Data index under the pointer, if any.
    pub pointer_item: Option<usize>,
    pub pointer_enter: bool,
    /// Whole-series highlight forced by legend hover.
    pub legend_highlight: bool,
    pub animation: SeriesAnimation,
    /// Plotted values seen on the previous update, for change detection.
    pub last_values: Vec<f64>,
}

impl SeriesState {
    pub fn is_highlighted(&self, data: usize) -> bool {
        self.legend_highlight || self.highlighted.get(data).copied().unwrap_or(false)
    }

    /// Clear pointer-driven state. Returns true when anything changed.
    pub fn clear_pointer(&mut self) -> bool {
        let changed = self.pointer_item.is_some() || self.pointer_enter || self.highlighted.iter().any(|h| *h);
        self.pointer_item = None;
        self.pointer_enter = false;
        self.highlighted.iter_mut().for_each(|h| *h = false);
        changed
    }

    /// Latch `item` as the only pointer-highlighted data. Returns true when anything changed.
    pub fn set_pointer_item(&mut self, item: Option<usize>, len: usize) -> bool {
        if self.highlighted.len() != len {
            self.highlighted.resize(len, false);
        }
        let before = (self.pointer_item, self.pointer_enter);
        let mut changed = false;
        for (i, h) in self.highlighted.iter_mut().enumerate() {
            let want = item == Some(i);
            if *h != want {
                *h = want;
                changed = true;
            }
        }
        self.pointer_item = item;
        self.pointer_enter = item.is_some();
        changed || before != (self.pointer_item, self.pointer_enter)
    }
}

/// Everything computed by one layout pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChartFrame {
    pub chart_rect: Rect,
    pub grids: Vec<Rect>,
    pub polars: Vec<PolarFrame>,
    pub x_axes: Vec<AxisFrame>,
    pub y_axes: Vec<AxisFrame>,
    pub radius_axes: Vec<AxisFrame>,
    pub angle_axes: Vec<AxisFrame>,
    pub stack: StackTable,
    pub series: Vec<Result<SeriesFrame, Skip>>,
    pub mark_lines: Vec<Result<crate::mark::MarkLineFrame, Skip>>,
    pub mark_areas: Vec<Result<crate::mark::MarkAreaFrame, Skip>>,
    pub legend: Option<LegendLayout>,
    pub tooltip: Option<TooltipFrame>,
}

impl ChartFrame {
    pub fn series_frame(&self, index: usize) -> Result<&SeriesFrame, Skip> {
        match self.series.get(index) {
            Some(Ok(f)) => Ok(f),
            Some(Err(s)) => Err(*s),
            None => Err(Missing::Series(index).into()),
        }
    }

    pub fn grid(&self, index: usize) -> Result<Rect, Skip> {
        self.grids.get(index).copied().ok_or(Missing::Grid(index).into())
    }

    pub fn x_axis(&self, index: usize) -> Result<&AxisFrame, Skip> {
        self.x_axes.get(index).ok_or(Missing::XAxis(index).into())
    }

    pub fn y_axis(&self, index: usize) -> Result<&AxisFrame, Skip> {
        self.y_axes.get(index).ok_or(Missing::YAxis(index).into())
    }
}
