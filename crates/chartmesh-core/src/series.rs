// File: crates/chartmesh-core/src/series.rs
// Summary: Series model: kinds (line, ring), data items, styles and coordinate references.
// Notes:
// - Data items hold configuration only. Positions, stack heights and angles
//   computed while drawing live in `context::SeriesFrame`.

use crate::downsample::SampleType;
use crate::error::ConfigError;
use crate::geometry::Point2;
use crate::theme::Color;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SymbolType {
    None,
    Circle,
    EmptyCircle,
    Rect,
    Triangle,
    Diamond,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Symbol {
    pub kind: SymbolType,
    pub show: bool,
    /// Radius in pixels; theme default when `None`.
    pub size: Option<f32>,
    /// Radius when highlighted; theme default when `None`.
    pub selected_size: Option<f32>,
    /// Draw every n-th symbol (0 or 1 = all).
    pub interval: usize,
}

impl Symbol {
    pub fn size_or(&self, default: f32) -> f32 { self.size.unwrap_or(default) }
    pub fn selected_size_or(&self, default: f32) -> f32 { self.selected_size.unwrap_or(default) }

    pub fn shows_index(&self, index: usize, count: usize) -> bool {
        if !self.show || self.kind == SymbolType::None {
            return false;
        }
        if self.interval <= 1 {
            return true;
        }
        index % self.interval == 0 || index + 1 == count
    }
}

impl Default for Symbol {
    fn default() -> Self {
        Self { kind: SymbolType::EmptyCircle, show: true, size: None, selected_size: None, interval: 0 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineType {
    Solid,
    Dashed,
    Dotted,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineStyle {
    pub kind: LineType,
    pub width: Option<f32>,
    pub color: Option<Color>,
    pub to_color: Option<Color>,
}

impl LineStyle {
    pub fn dashed() -> Self {
        Self { kind: LineType::Dashed, ..Self::default() }
    }

    /// (dash, gap) lengths for patterned strokes, scaled by width.
    pub fn pattern(&self, width: f32) -> Option<(f32, f32)> {
        match self.kind {
            LineType::Solid => None,
            LineType::Dashed => Some((4.0 * width.max(1.0), 2.0 * width.max(1.0))),
            LineType::Dotted => Some((width.max(1.0), 1.5 * width.max(1.0))),
        }
    }
}

impl Default for LineStyle {
    fn default() -> Self {
        Self { kind: LineType::Solid, width: None, color: None, to_color: None }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AreaStyle {
    pub color: Option<Color>,
    pub to_color: Option<Color>,
    /// Applied to the series color when no explicit area color is set.
    pub opacity: f32,
}

impl Default for AreaStyle {
    fn default() -> Self {
        Self { color: None, to_color: None, opacity: 0.4 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArrowPosition {
    Start,
    End,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Arrow {
    pub width: f32,
    pub height: f32,
    /// Distance the tip is pushed past the anchor point along the direction.
    pub offset: f32,
    /// Depth of the notch in the arrow's base.
    pub dent: f32,
    pub color: Option<Color>,
}

impl Default for Arrow {
    fn default() -> Self {
        Self { width: 10.0, height: 15.0, offset: 0.0, dent: 3.0, color: None }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineArrow {
    pub position: ArrowPosition,
    pub arrow: Arrow,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LabelPosition {
    Center,
    Top,
    Bottom,
    Left,
    Right,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Label {
    pub show: bool,
    pub position: LabelPosition,
    /// Template such as `"{b}: {c}"`; plain formatted value when `None`.
    pub formatter: Option<String>,
    pub numeric_formatter: Option<String>,
    pub offset: Point2,
    /// Angular (ring) or pixel distance applied by some positions.
    pub distance: f32,
    pub font_size: Option<f32>,
    pub color: Option<Color>,
}

impl Default for Label {
    fn default() -> Self {
        Self {
            show: true,
            position: LabelPosition::Center,
            formatter: None,
            numeric_formatter: None,
            offset: Point2::ZERO,
            distance: 0.0,
            font_size: None,
            color: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LineOptions {
    pub smooth: bool,
    pub line_style: LineStyle,
    pub area_style: Option<AreaStyle>,
    pub arrow: Option<LineArrow>,
    pub symbol: Symbol,
}

impl Default for LineOptions {
    fn default() -> Self {
        Self { smooth: false, line_style: LineStyle::default(), area_style: None, arrow: None, symbol: Symbol::default() }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RingOptions {
    /// Center; components in `0.0..=1.0` are fractions of the chart size.
    pub center: Point2,
    /// (inner, outer) radius; values in `0.0..=1.0` are fractions of the smaller chart side.
    pub radius: (f32, f32),
    /// Degrees clockwise from up.
    pub start_angle: f32,
    pub clockwise: bool,
    pub gap: f32,
    pub round_cap: bool,
    pub background: Option<Color>,
    pub center_color: Option<Color>,
    pub center_gap: f32,
}

impl Default for RingOptions {
    fn default() -> Self {
        Self {
            center: Point2::new(0.5, 0.5),
            radius: (0.3, 0.4),
            start_angle: 0.0,
            clockwise: true,
            gap: 10.0,
            round_cap: false,
            background: None,
            center_color: None,
            center_gap: 0.0,
        }
    }
}

/// Closed set of supported series kinds; renderers dispatch on this.
#[derive(Clone, Debug, PartialEq)]
pub enum SeriesKind {
    Line(LineOptions),
    Ring(RingOptions),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CoordRef {
    Grid { x_axis: usize, y_axis: usize },
    Polar { polar: usize },
    /// Self-positioned (ring).
    None,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sampling {
    pub kind: SampleType,
    /// Maximum drawn points; derived from `sample_dist` when `None`.
    pub max_display: Option<usize>,
    /// Minimum pixel distance between drawn points (0 disables).
    pub sample_dist: f32,
    /// Reference average for peak sampling; computed when `None`.
    pub average: Option<f64>,
}

impl Default for Sampling {
    fn default() -> Self {
        Self { kind: SampleType::None, max_display: None, sample_dist: 0.0, average: None }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SerieData {
    pub values: Vec<f64>,
    pub name: String,
    pub show: bool,
    pub color: Option<Color>,
    pub symbol_size: Option<f32>,
    pub item_formatter: Option<String>,
    pub numeric_formatter: Option<String>,
}

impl SerieData {
    pub fn new(values: Vec<f64>) -> Self {
        Self {
            values,
            name: String::new(),
            show: true,
            color: None,
            symbol_size: None,
            item_formatter: None,
            numeric_formatter: None,
        }
    }

    pub fn named(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self { name: name.into(), ..Self::new(values) }
    }

    pub fn with_item_formatter(mut self, f: impl Into<String>) -> Self {
        self.item_formatter = Some(f.into());
        self
    }

    pub fn with_numeric_formatter(mut self, f: impl Into<String>) -> Self {
        self.numeric_formatter = Some(f.into());
        self
    }

    /// Value of `dim`, or NaN when the dimension is absent.
    pub fn value(&self, dim: usize) -> f64 {
        self.values.get(dim).copied().unwrap_or(f64::NAN)
    }

    pub fn first(&self) -> f64 { self.value(0) }

    pub fn last(&self) -> f64 {
        self.values.last().copied().unwrap_or(f64::NAN)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Series {
    pub name: String,
    pub kind: SeriesKind,
    pub data: Vec<SerieData>,
    pub show: bool,
    /// Series sharing a stack name accumulate along the value axis.
    pub stack: Option<String>,
    pub coord: CoordRef,
    pub sampling: Sampling,
    pub min_show: usize,
    /// Upper bound (exclusive) on drawn indices; all data when `None`.
    pub max_show: Option<usize>,
    /// Sentinel marking a missing value.
    pub ignore_value: Option<f64>,
    /// Break the line at ignored values instead of joining across them.
    pub ignore_line_break: bool,
    pub color: Option<Color>,
    /// Dimension used for tooltip/label values.
    pub dimension: usize,
    pub item_formatter: Option<String>,
    pub numeric_formatter: Option<String>,
    pub label: Option<Label>,
}

impl Series {
    pub fn new(name: impl Into<String>, kind: SeriesKind) -> Self {
        let coord = match kind {
            SeriesKind::Line(_) => CoordRef::Grid { x_axis: 0, y_axis: 0 },
            SeriesKind::Ring(_) => CoordRef::None,
        };
        Self {
            name: name.into(),
            kind,
            data: Vec::new(),
            show: true,
            stack: None,
            coord,
            sampling: Sampling::default(),
            min_show: 0,
            max_show: None,
            ignore_value: None,
            ignore_line_break: false,
            color: None,
            dimension: 0,
            item_formatter: None,
            numeric_formatter: None,
            label: None,
        }
    }

    /// Line series over a category axis: one value per category.
    pub fn line(name: impl Into<String>, values: impl IntoIterator<Item = f64>) -> Self {
        let mut s = Self::new(name, SeriesKind::Line(LineOptions::default()));
        s.data = values.into_iter().map(|v| SerieData::new(vec![v])).collect();
        s
    }

    /// Line series with explicit (x, y) pairs for value/value grids.
    pub fn with_data(name: impl Into<String>, data: Vec<(f64, f64)>) -> Self {
        let mut s = Self::new(name, SeriesKind::Line(LineOptions::default()));
        s.data = data.into_iter().map(|(x, y)| SerieData::new(vec![x, y])).collect();
        s
    }

    /// Ring series: each item is (name, value, max).
    pub fn ring<S: Into<String>>(name: impl Into<String>, items: impl IntoIterator<Item = (S, f64, f64)>) -> Self {
        let mut s = Self::new(name, SeriesKind::Ring(RingOptions::default()));
        s.data = items.into_iter().map(|(n, v, max)| SerieData::named(n, vec![v, max])).collect();
        s
    }

    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }

    pub fn with_coord(mut self, coord: CoordRef) -> Self {
        self.coord = coord;
        self
    }

    pub fn with_sampling(mut self, sampling: Sampling) -> Self {
        self.sampling = sampling;
        self
    }

    pub fn with_ignore(mut self, sentinel: f64, line_break: bool) -> Self {
        self.ignore_value = Some(sentinel);
        self.ignore_line_break = line_break;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_item_formatter(mut self, f: impl Into<String>) -> Self {
        self.item_formatter = Some(f.into());
        self
    }

    pub fn with_numeric_formatter(mut self, f: impl Into<String>) -> Self {
        self.numeric_formatter = Some(f.into());
        self
    }

    pub fn with_label(mut self, label: Label) -> Self {
        self.label = Some(label);
        self
    }

    /// Restrict drawn indices to `min..max`.
    pub fn with_show_window(mut self, min: usize, max: Option<usize>) -> Result<Self, ConfigError> {
        if let Some(max) = max {
            if min > max {
                return Err(ConfigError::ShowWindow { min, max });
            }
        }
        self.min_show = min;
        self.max_show = max;
        Ok(self)
    }

    pub fn line_options(&self) -> Option<&LineOptions> {
        match &self.kind {
            SeriesKind::Line(o) => Some(o),
            _ => None,
        }
    }

    pub fn line_options_mut(&mut self) -> Option<&mut LineOptions> {
        match &mut self.kind {
            SeriesKind::Line(o) => Some(o),
            _ => None,
        }
    }

    pub fn ring_options(&self) -> Option<&RingOptions> {
        match &self.kind {
            SeriesKind::Ring(o) => Some(o),
            _ => None,
        }
    }

    pub fn ring_options_mut(&mut self) -> Option<&mut RingOptions> {
        match &mut self.kind {
            SeriesKind::Ring(o) => Some(o),
            _ => None,
        }
    }

    pub fn is_stacked(&self) -> bool {
        self.stack.is_some()
    }

    /// The value shown along the value axis: `y` for (x, y) data, otherwise the first value.
    pub fn plotted_value(&self, d: &SerieData) -> f64 {
        if d.values.len() >= 2 { d.value(1) } else { d.first() }
    }

    pub fn is_ignored(&self, d: &SerieData) -> bool {
        let v = self.plotted_value(d);
        if v.is_nan() {
            return true;
        }
        match self.ignore_value {
            Some(sentinel) => v == sentinel,
            None => false,
        }
    }

    /// Names this series contributes to the legend.
    pub fn legend_names(&self) -> Vec<&str> {
        match self.kind {
            SeriesKind::Line(_) => vec![self.name.as_str()],
            SeriesKind::Ring(_) => self.data.iter().map(|d| d.name.as_str()).collect(),
        }
    }
}
