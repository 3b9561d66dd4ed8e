// File: crates/chartmesh-core/src/chart.rs
// Summary: Chart container: owns configuration and interaction state, runs the update pass, draws layers.
// Notes:
// - `update` is the only place time advances and state is mutated.
// - `draw_layer` only reads the last computed frame; drawing twice yields identical output.

use crate::animation::SeriesAnimation;
use crate::axis::Axis;
use crate::context::{ChartContext, ChartFrame, SeriesState};
use crate::datazoom::DataZoom;
use crate::draw::{DrawSink, Fill};
use crate::error::{ConfigError, DrawOutcome, Skip};
use crate::geometry::{Point2, Size};
use crate::grid::{GridCoord, PolarCoord};
use crate::interaction;
use crate::layout;
use crate::legend::{self, Legend};
use crate::mark::{MarkArea, MarkLine};
use crate::render;
use crate::series::{SerieData, Series, SeriesKind};
use crate::text::{FixedAdvanceText, TextHost};
use crate::theme::Theme;
use crate::tooltip::{self, Tooltip, TooltipState};
use crate::types::{ChartSettings, Layer, HEIGHT, WIDTH};

/// Drawable component reported by `draw_layer`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Component {
    Grid(usize),
    Polar(usize),
    Series(usize),
    MarkLine(usize),
    MarkArea(usize),
    Legend,
    Tooltip,
}

pub struct Chart {
    size: Size,
    theme: Theme,
    settings: ChartSettings,
    series: Vec<Series>,
    grids: Vec<GridCoord>,
    polars: Vec<PolarCoord>,
    x_axes: Vec<Axis>,
    y_axes: Vec<Axis>,
    radius_axes: Vec<Axis>,
    angle_axes: Vec<Axis>,
    data_zooms: Vec<DataZoom>,
    mark_lines: Vec<MarkLine>,
    mark_areas: Vec<MarkArea>,
    legend: Legend,
    tooltip: Tooltip,

    states: Vec<SeriesState>,
    mark_line_states: Vec<SeriesAnimation>,
    legend_names: Vec<String>,
    tooltip_state: TooltipState,
    hovered_legend: Option<usize>,
    highlights_cleared: bool,
    frame: ChartFrame,
    dirty: u8,
    text: Box<dyn TextHost>,
}

impl Default for Chart {
    fn default() -> Self {
        Self::new(Size::new(WIDTH, HEIGHT))
    }
}

impl Chart {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            theme: Theme::dark(),
            settings: ChartSettings::default(),
            series: Vec::new(),
            grids: Vec::new(),
            polars: Vec::new(),
            x_axes: Vec::new(),
            y_axes: Vec::new(),
            radius_axes: Vec::new(),
            angle_axes: Vec::new(),
            data_zooms: Vec::new(),
            mark_lines: Vec::new(),
            mark_areas: Vec::new(),
            legend: Legend::default(),
            tooltip: Tooltip::default(),
            states: Vec::new(),
            mark_line_states: Vec::new(),
            legend_names: Vec::new(),
            tooltip_state: TooltipState::default(),
            hovered_legend: None,
            highlights_cleared: true,
            frame: ChartFrame::default(),
            dirty: 0b111,
            text: Box::new(FixedAdvanceText::default()),
        }
    }

    /// A chart with one grid and one x/y axis pair, the common line-chart setup.
    pub fn with_grid(size: Size, x_axis: Axis, y_axis: Axis) -> Self {
        let mut chart = Self::new(size);
        chart.add_grid(GridCoord::default());
        chart.add_x_axis(x_axis);
        chart.add_y_axis(y_axis);
        chart
    }

    // ---- configuration -------------------------------------------------------

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        self.mark_all_dirty();
    }

    pub fn set_settings(&mut self, settings: ChartSettings) {
        self.settings = settings;
        self.mark_all_dirty();
    }

    pub fn set_size(&mut self, size: Size) {
        self.size = size;
        self.mark_all_dirty();
    }

    /// Text measurer used by legend and tooltip layout during `update`.
    pub fn set_text_host(&mut self, text: Box<dyn TextHost>) {
        self.text = text;
        self.mark_all_dirty();
    }

    pub fn add_grid(&mut self, grid: GridCoord) -> usize {
        self.grids.push(grid);
        self.mark_all_dirty();
        self.grids.len() - 1
    }

    pub fn add_polar(&mut self, polar: PolarCoord) -> usize {
        self.polars.push(polar);
        self.mark_all_dirty();
        self.polars.len() - 1
    }

    pub fn add_x_axis(&mut self, axis: Axis) -> usize {
        self.x_axes.push(axis);
        self.mark_all_dirty();
        self.x_axes.len() - 1
    }

    pub fn add_y_axis(&mut self, axis: Axis) -> usize {
        self.y_axes.push(axis);
        self.mark_all_dirty();
        self.y_axes.len() - 1
    }

    pub fn add_radius_axis(&mut self, axis: Axis) -> usize {
        self.radius_axes.push(axis);
        self.mark_all_dirty();
        self.radius_axes.len() - 1
    }

    pub fn add_angle_axis(&mut self, axis: Axis) -> usize {
        self.angle_axes.push(axis);
        self.mark_all_dirty();
        self.angle_axes.len() - 1
    }

    pub fn add_series(&mut self, series: Series) -> usize {
        self.series.push(series);
        self.mark_all_dirty();
        self.series.len() - 1
    }

    pub fn add_data_zoom(&mut self, zoom: DataZoom) -> usize {
        self.data_zooms.push(zoom);
        self.mark_all_dirty();
        self.data_zooms.len() - 1
    }

    pub fn add_mark_line(&mut self, mark_line: MarkLine) -> usize {
        self.mark_lines.push(mark_line);
        self.mark_dirty(Layer::Top);
        self.mark_lines.len() - 1
    }

    pub fn add_mark_area(&mut self, mark_area: MarkArea) -> usize {
        self.mark_areas.push(mark_area);
        self.mark_dirty(Layer::Base);
        self.mark_areas.len() - 1
    }

    pub fn set_legend(&mut self, legend: Legend) {
        self.legend = legend;
        self.mark_dirty(Layer::Top);
    }

    pub fn set_tooltip(&mut self, tooltip: Tooltip) {
        self.tooltip = tooltip;
        self.mark_dirty(Layer::Top);
    }

    /// Mutable access to a series; marks every layer dirty.
    pub fn series_mut(&mut self, index: usize) -> Option<&mut Series> {
        self.mark_all_dirty();
        self.series.get_mut(index)
    }

    pub fn data_zoom_mut(&mut self, index: usize) -> Option<&mut DataZoom> {
        self.mark_all_dirty();
        self.data_zooms.get_mut(index)
    }

    /// Replace the values of one data item.
    pub fn set_data(&mut self, series: usize, index: usize, values: Vec<f64>) -> Result<(), ConfigError> {
        let s = self.series.get_mut(series).ok_or(ConfigError::SeriesIndex(series))?;
        let d = s.data.get_mut(index).ok_or(ConfigError::DataIndex { series, index })?;
        d.values = values;
        self.mark_all_dirty();
        Ok(())
    }

    pub fn push_data(&mut self, series: usize, data: SerieData) -> Result<(), ConfigError> {
        let s = self.series.get_mut(series).ok_or(ConfigError::SeriesIndex(series))?;
        s.data.push(data);
        self.mark_all_dirty();
        Ok(())
    }

    // ---- queries -------------------------------------------------------------

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn series(&self) -> &[Series] {
        &self.series
    }

    pub fn states(&self) -> &[SeriesState] {
        &self.states
    }

    pub fn frame(&self) -> &ChartFrame {
        &self.frame
    }

    pub fn legend_names(&self) -> &[String] {
        &self.legend_names
    }

    pub fn is_dirty(&self, layer: Layer) -> bool {
        self.dirty & layer.bit() != 0
    }

    pub fn mark_clean(&mut self, layer: Layer) {
        self.dirty &= !layer.bit();
    }

    fn mark_dirty(&mut self, layer: Layer) {
        self.dirty |= layer.bit();
    }

    fn mark_all_dirty(&mut self) {
        Layer::ALL.iter().for_each(|l| self.dirty |= l.bit());
    }

    /// Read-only lookup view over the current configuration.
    pub fn context(&self) -> ChartContext<'_> {
        ChartContext {
            size: self.size,
            theme: &self.theme,
            settings: &self.settings,
            series: &self.series,
            states: &self.states,
            grids: &self.grids,
            polars: &self.polars,
            x_axes: &self.x_axes,
            y_axes: &self.y_axes,
            radius_axes: &self.radius_axes,
            angle_axes: &self.angle_axes,
            data_zooms: &self.data_zooms,
            mark_lines: &self.mark_lines,
            mark_areas: &self.mark_areas,
            mark_line_states: &self.mark_line_states,
            legend_names: &self.legend_names,
        }
    }

    // ---- legend --------------------------------------------------------------

    /// Toggle visibility of everything named by legend item `index`. Returns true when anything changed.
    pub fn toggle_legend(&mut self, index: usize) -> bool {
        let Some(name) = self.legend_names.get(index).cloned() else { return false };
        let mut changed = false;
        for s in &mut self.series {
            match s.kind {
                SeriesKind::Line(_) if s.name == name => {
                    s.show = !s.show;
                    changed = true;
                }
                SeriesKind::Ring(_) => {
                    for d in s.data.iter_mut().filter(|d| d.name == name) {
                        d.show = !d.show;
                        changed = true;
                    }
                }
                _ => {}
            }
        }
        if changed {
            log::debug!("legend '{name}' toggled");
            self.mark_all_dirty();
        }
        changed
    }

    /// Handle a click: toggles the legend item under `pointer`. Returns true when handled.
    pub fn click(&mut self, pointer: Point2) -> bool {
        let hit = self.frame.legend.as_ref().and_then(|l| l.hit(pointer));
        match hit {
            Some(i) => self.toggle_legend(i),
            None => false,
        }
    }

    // ---- update / draw -------------------------------------------------------

    /// Advance animations by `dt` seconds, recompute the frame and re-evaluate
    /// pointer interaction. `pointer` is in chart space; `None` when outside the host.
    pub fn update(&mut self, dt: f32, pointer: Option<Point2>) {
        self.sync_states();
        self.legend_names = legend::legend_names(&self.series);

        for (s, st) in self.series.iter().zip(self.states.iter_mut()) {
            st.animation.start_growth(self.settings.growth_duration);
            let values = plotted_values(s);
            if !st.last_values.is_empty() && !same_values(&st.last_values, &values) {
                let previous = std::mem::take(&mut st.last_values);
                st.animation.start_update(previous, self.settings.update_duration);
            }
            st.last_values = values;
        }
        let mut animating = false;
        for st in &mut self.states {
            animating |= st.animation.advance(dt);
        }
        let ml_duration = |ml: &MarkLine| if self.settings.growth_duration > 0.0 { ml.animation_duration } else { 0.0 };
        let mut ml_animating = false;
        for (ml, anim) in self.mark_lines.iter().zip(self.mark_line_states.iter_mut()) {
            anim.start_growth(ml_duration(ml));
            ml_animating |= anim.advance(dt);
        }
        if animating {
            self.mark_dirty(Layer::Content);
            self.mark_dirty(Layer::Top);
        }
        if ml_animating {
            self.mark_dirty(Layer::Top);
        }

        let mut frame = layout::compute_frame(&self.context());

        // legend, with hover read from the pointer against this frame's placement
        if self.legend.show {
            let place = |hovered| {
                legend::layout(&self.legend, &self.legend_names, &self.series, hovered, self.size, &self.theme, self.text.as_ref())
            };
            let mut layout = place(self.hovered_legend);
            let hovered = pointer.and_then(|p| layout.hit(p));
            if hovered != self.hovered_legend {
                layout.items.iter_mut().enumerate().for_each(|(i, it)| it.highlighted = hovered == Some(i));
                self.hovered_legend = hovered;
            }
            frame.legend = Some(layout);
        } else {
            self.hovered_legend = None;
        }

        // pointer / legend highlights
        let hovered_name = self.hovered_legend.and_then(|i| self.legend_names.get(i)).cloned();
        let highlight_changed = if interaction::should_test(&frame, pointer, hovered_name.is_some()) {
            self.highlights_cleared = false;
            let hits = interaction::hit_all(&self.context(), &frame, pointer, hovered_name.as_deref());
            let lens: Vec<usize> = self.series.iter().map(|s| s.data.len()).collect();
            interaction::apply_hits(&mut self.states, &hits, &lens)
        } else if !self.highlights_cleared {
            self.highlights_cleared = true;
            interaction::clear_all(&mut self.states)
        } else {
            false
        };
        if highlight_changed {
            self.mark_dirty(Layer::Content);
            self.mark_dirty(Layer::Top);
        }

        let mut tooltip_state = self.tooltip_state;
        frame.tooltip = tooltip::update(&self.context(), &frame, &self.tooltip, &mut tooltip_state, pointer, dt, self.text.as_ref());
        if frame.tooltip.is_none() {
            tooltip_state.hide();
        }
        self.tooltip_state = tooltip_state;

        self.mark_frame_changes(&frame);
        self.frame = frame;
    }

    fn sync_states(&mut self) {
        let disabled = self.settings.growth_duration <= 0.0 && self.settings.update_duration <= 0.0;
        let fresh = || SeriesState {
            animation: if disabled { SeriesAnimation::disabled() } else { SeriesAnimation::default() },
            ..SeriesState::default()
        };
        self.states.resize_with(self.series.len(), fresh);
        self.mark_line_states.resize_with(self.mark_lines.len(), SeriesAnimation::default);
    }

    fn mark_frame_changes(&mut self, next: &ChartFrame) {
        let prev = &self.frame;
        let base = prev.grids != next.grids
            || prev.polars != next.polars
            || prev.x_axes != next.x_axes
            || prev.y_axes != next.y_axes
            || prev.mark_areas != next.mark_areas;
        let content = prev.series != next.series;
        let top = content || prev.mark_lines != next.mark_lines || prev.legend != next.legend || prev.tooltip != next.tooltip;
        if base {
            self.mark_dirty(Layer::Base);
        }
        if content {
            self.mark_dirty(Layer::Content);
        }
        if top {
            self.mark_dirty(Layer::Top);
        }
    }

    /// Emit every primitive of `layer` from the last computed frame.
    pub fn draw_layer(&self, layer: Layer, sink: &mut dyn DrawSink, text: &mut dyn TextHost) -> Vec<(Component, DrawOutcome)> {
        let ctx = self.context();
        let frame = &self.frame;
        let mut out = Vec::new();
        let mut record = |component: Component, r: Result<(), Skip>| {
            if let Err(skip) = &r {
                log::debug!("{component:?} skipped: {skip}");
            }
            out.push((component, DrawOutcome::from(r)));
        };
        match layer {
            Layer::Base => {
                sink.rect(frame.chart_rect, Fill::solid(self.theme.background), None);
                for gi in 0..self.grids.len() {
                    record(Component::Grid(gi), render::grid::draw_grid(&ctx, frame, gi, layer, sink, text));
                }
                for pi in 0..self.polars.len() {
                    record(Component::Polar(pi), render::grid::draw_polar(&ctx, frame, pi, layer, sink));
                }
                for ai in 0..self.mark_areas.len() {
                    record(Component::MarkArea(ai), render::mark_area::draw(frame, ai, layer, sink, text));
                }
            }
            Layer::Content => {
                for si in 0..self.series.len() {
                    record(Component::Series(si), render::draw_series(&ctx, frame, si, layer, sink, text));
                }
            }
            Layer::Top => {
                for si in (0..self.series.len()).filter(|&si| render::draws_on_top(&ctx, frame, si)) {
                    record(Component::Series(si), render::draw_series(&ctx, frame, si, layer, sink, text));
                }
                for mi in 0..self.mark_lines.len() {
                    record(Component::MarkLine(mi), render::mark_line::draw(&ctx, frame, mi, layer, sink, text));
                }
                if let Some(l) = &frame.legend {
                    legend::draw(&self.legend, l, &self.theme, sink, text);
                    record(Component::Legend, Ok(()));
                }
                if let Some(tf) = &frame.tooltip {
                    tooltip::draw(&self.tooltip, tf, &self.theme, sink, text);
                    record(Component::Tooltip, Ok(()));
                }
            }
        }
        out
    }

    /// Draw all layers in order.
    pub fn draw(&self, sink: &mut dyn DrawSink, text: &mut dyn TextHost) -> Vec<(Component, DrawOutcome)> {
        let mut out = Vec::new();
        for layer in Layer::ALL {
            out.extend(self.draw_layer(layer, sink, text));
        }
        out
    }
}

/// Plotted value per data index; NaN for ignored points.
fn plotted_values(s: &Series) -> Vec<f64> {
    s.data
        .iter()
        .map(|d| match s.kind {
            SeriesKind::Ring(_) => d.first(),
            SeriesKind::Line(_) if s.is_ignored(d) => f64::NAN,
            SeriesKind::Line(_) => s.plotted_value(d),
        })
        .collect()
}

fn same_values(a: &[f64], b: &[f64]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x == y || (x.is_nan() && y.is_nan()))
}
