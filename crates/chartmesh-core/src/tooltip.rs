// File: crates/chartmesh-core/src/tooltip.rs
// Summary: Tooltip content (indicated params, templated columns), auto-sizing, pointer-following placement.
// Notes:
// - Content and size are recomputed every update; only the smoothed position persists.
// - Formatter precedence: data item, then series, then tooltip.

use crate::context::{ChartContext, ChartFrame};
use crate::draw::{DrawSink, Fill, Stroke};
use crate::format::{format_number, format_template, split_columns, TemplateParam};
use crate::geometry::{Point2, Rect, Size};
use crate::scale::AxisScale;
use crate::series::{CoordRef, SeriesKind};
use crate::text::{TextAlign, TextHost, TextStyle};
use crate::theme::{Color, Theme};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TooltipTrigger {
    /// Items under the pointer.
    Item,
    /// All grid series at the category nearest the pointer.
    Axis,
    None,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Tooltip {
    pub show: bool,
    pub trigger: TooltipTrigger,
    pub title_formatter: Option<String>,
    pub item_formatter: Option<String>,
    pub numeric_formatter: Option<String>,
    pub marker: String,
    /// Width/height used as-is when positive.
    pub fixed_width: f32,
    pub fixed_height: f32,
    pub min_width: f32,
    pub min_height: f32,
    pub padding_lr: f32,
    pub padding_tb: f32,
    pub title_height: f32,
    pub item_height: f32,
    pub column_gap: f32,
    /// Box top-left relative to the pointer.
    pub offset: Point2,
    pub fixed_x: Option<f32>,
    pub fixed_y: Option<f32>,
    /// Seconds for the smoothed position to catch up with the pointer.
    pub smooth_time: f32,
    pub border_width: f32,
    pub font_size: Option<f32>,
}

impl Default for Tooltip {
    fn default() -> Self {
        Self {
            show: true,
            trigger: TooltipTrigger::Item,
            title_formatter: None,
            item_formatter: None,
            numeric_formatter: None,
            marker: "●".to_string(),
            fixed_width: 0.0,
            fixed_height: 0.0,
            min_width: 0.0,
            min_height: 0.0,
            padding_lr: 10.0,
            padding_tb: 10.0,
            title_height: 25.0,
            item_height: 25.0,
            column_gap: 8.0,
            offset: Point2::new(18.0, -25.0),
            fixed_x: None,
            fixed_y: None,
            smooth_time: 0.08,
            border_width: 2.0,
            font_size: None,
        }
    }
}

impl Tooltip {
    pub fn with_trigger(mut self, trigger: TooltipTrigger) -> Self {
        self.trigger = trigger;
        self
    }

    pub fn with_item_formatter(mut self, f: impl Into<String>) -> Self {
        self.item_formatter = Some(f.into());
        self
    }

    pub fn with_title_formatter(mut self, f: impl Into<String>) -> Self {
        self.title_formatter = Some(f.into());
        self
    }
}

/// One indicated (series, data) pair.
#[derive(Clone, Debug, PartialEq)]
pub struct TooltipParam {
    pub series_index: usize,
    pub data_index: usize,
    pub series_name: String,
    /// Data name, or the category name on category axes.
    pub data_name: String,
    pub value: f64,
    pub total: f64,
    pub color: Color,
    pub item_formatter: Option<String>,
    pub numeric_formatter: Option<String>,
}

impl TooltipParam {
    pub fn template(&self, marker: &str) -> TemplateParam {
        TemplateParam {
            series_name: self.series_name.clone(),
            data_name: self.data_name.clone(),
            value: self.value,
            total: self.total,
            marker: marker.to_string(),
            numeric_formatter: self.numeric_formatter.clone(),
        }
    }
}

/// Text content before placement.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TooltipContent {
    pub title: Option<String>,
    pub rows: Vec<Vec<String>>,
    /// Marker color per row.
    pub colors: Vec<Color>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TooltipFrame {
    pub rect: Rect,
    pub content: TooltipContent,
    pub column_widths: Vec<f32>,
    pub params: Vec<TooltipParam>,
}

/// Smoothed placement carried between updates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TooltipState {
    /// Current top-left corner; `None` while hidden.
    pub current: Option<Point2>,
    pub velocity: Point2,
}

impl TooltipState {
    pub fn hide(&mut self) {
        self.current = None;
        self.velocity = Point2::ZERO;
    }
}

/// Critically damped approach of `current` to `target` (returns the new value and updates `velocity`).
pub fn smooth_damp(current: f32, target: f32, velocity: &mut f32, smooth_time: f32, dt: f32) -> f32 {
    if dt <= 0.0 {
        return current;
    }
    let smooth_time = smooth_time.max(1e-4);
    let omega = 2.0 / smooth_time;
    let x = omega * dt;
    let exp = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);
    let change = current - target;
    let temp = (*velocity + omega * change) * dt;
    *velocity = (*velocity - omega * temp) * exp;
    let mut out = target + (change + temp) * exp;
    // no overshoot
    if (target - current > 0.0) == (out > target) {
        out = target;
        *velocity = 0.0;
    }
    out
}

/// Indicated params for the pointer this frame.
pub fn params(ctx: &ChartContext, frame: &ChartFrame, tooltip: &Tooltip, pointer: Point2) -> Vec<TooltipParam> {
    match tooltip.trigger {
        TooltipTrigger::None => Vec::new(),
        TooltipTrigger::Item => (0..ctx.series.len())
            .filter_map(|si| {
                let j = ctx.state(si)?.pointer_item?;
                frame.series_frame(si).ok()?;
                param(ctx, si, j)
            })
            .collect(),
        TooltipTrigger::Axis => axis_params(ctx, frame, pointer),
    }
}

fn param(ctx: &ChartContext, si: usize, j: usize) -> Option<TooltipParam> {
    let s = ctx.series.get(si)?;
    let d = s.data.get(j)?;
    let (value, total, color) = match s.kind {
        SeriesKind::Ring(_) => (d.first(), d.last(), ctx.item_color(si, j)),
        SeriesKind::Line(_) => {
            let total = s.data.iter().filter(|d| !s.is_ignored(d)).map(|d| s.plotted_value(d)).sum();
            (s.plotted_value(d), total, ctx.series_color(si))
        }
    };
    let data_name = if !d.name.is_empty() {
        d.name.clone()
    } else {
        match s.coord {
            CoordRef::Grid { x_axis, y_axis } => ctx
                .x_axes
                .get(x_axis)
                .filter(|a| a.is_category())
                .or_else(|| ctx.y_axes.get(y_axis).filter(|a| a.is_category()))
                .and_then(|a| a.category_name(j))
                .unwrap_or_default()
                .to_string(),
            _ => String::new(),
        }
    };
    Some(TooltipParam {
        series_index: si,
        data_index: j,
        series_name: s.name.clone(),
        data_name,
        value,
        total,
        color,
        item_formatter: d.item_formatter.clone().or_else(|| s.item_formatter.clone()),
        numeric_formatter: d.numeric_formatter.clone().or_else(|| s.numeric_formatter.clone()),
    })
}

/// Every visible grid line series at the category index nearest the pointer.
fn axis_params(ctx: &ChartContext, frame: &ChartFrame, pointer: Point2) -> Vec<TooltipParam> {
    let mut out = Vec::new();
    for (si, s) in ctx.series.iter().enumerate() {
        if !s.show || s.line_options().is_none() || frame.series_frame(si).is_err() {
            continue;
        }
        let CoordRef::Grid { x_axis, y_axis } = s.coord else { continue };
        let (Ok(xa), Ok(ya)) = (ctx.x_axis(x_axis), ctx.y_axis(y_axis)) else { continue };
        let Ok(grid) = frame.grid(xa.coord_index) else { continue };
        if !grid.contains(pointer) {
            continue;
        }
        let horizontal = !xa.is_category() && ya.is_category();
        let index = if horizontal {
            frame.y_axis(y_axis).ok().and_then(|af| {
                let scale = AxisScale::new(ya, af, grid.y, grid.height).ok()?;
                scale.nearest_index(pointer.y, af.visible_count)
            })
        } else if xa.is_category() {
            frame.x_axis(x_axis).ok().and_then(|af| {
                let scale = AxisScale::new(xa, af, grid.x, grid.width).ok()?;
                scale.nearest_index(pointer.x, af.visible_count)
            })
        } else {
            None
        };
        if let Some(p) = index.and_then(|j| param(ctx, si, j)) {
            out.push(p);
        }
    }
    out
}

/// Title and columns for `params`.
pub fn content(tooltip: &Tooltip, params: &[TooltipParam], ctx_axis_title: Option<&str>) -> TooltipContent {
    let templates: Vec<TemplateParam> = params.iter().map(|p| p.template(&tooltip.marker)).collect();
    let title = match tooltip.title_formatter.as_deref() {
        Some(t) => Some(format_template(t, &templates, 0)),
        None => match tooltip.trigger {
            TooltipTrigger::Axis => ctx_axis_title.map(str::to_string),
            _ => params.first().map(|p| p.series_name.clone()),
        },
    }
    .filter(|t| !t.is_empty());

    let mut rows = Vec::with_capacity(params.len());
    let mut colors = Vec::with_capacity(params.len());
    for (i, p) in params.iter().enumerate() {
        let formatter = p.item_formatter.as_deref().or(tooltip.item_formatter.as_deref());
        let row = match formatter {
            Some(f) => split_columns(&format_template(f, &templates, i)),
            None => {
                let numeric = p.numeric_formatter.as_deref().or(tooltip.numeric_formatter.as_deref());
                let name = if p.data_name.is_empty() || tooltip.trigger == TooltipTrigger::Axis {
                    p.series_name.clone()
                } else {
                    p.data_name.clone()
                };
                vec![tooltip.marker.clone(), name, format_number(p.value, numeric)]
            }
        };
        rows.push(row);
        colors.push(p.color);
    }
    TooltipContent { title, rows, colors }
}

/// Box size and per-column widths.
pub fn measure(tooltip: &Tooltip, content: &TooltipContent, style: &TextStyle, text: &dyn TextHost) -> (Size, Vec<f32>) {
    let cols = content.rows.iter().map(Vec::len).max().unwrap_or(0);
    let mut widths = vec![0.0f32; cols];
    for row in &content.rows {
        for (c, cell) in row.iter().enumerate() {
            widths[c] = widths[c].max(text.measure(cell, style).width);
        }
    }
    let title_w = content.title.as_deref().map(|t| text.measure(t, style).width).unwrap_or(0.0);
    let width = if tooltip.fixed_width > 0.0 {
        tooltip.fixed_width
    } else {
        let body = widths.iter().sum::<f32>() + tooltip.column_gap * cols.saturating_sub(1) as f32;
        body.max(title_w) + 2.0 * tooltip.padding_lr
    };
    let height = if tooltip.fixed_height > 0.0 {
        tooltip.fixed_height
    } else {
        let title_h = if content.title.is_some() { tooltip.title_height } else { 0.0 };
        title_h + content.rows.len() as f32 * tooltip.item_height + 2.0 * tooltip.padding_tb
    };
    (Size::new(width.max(tooltip.min_width), height.max(tooltip.min_height)), widths)
}

/// Unsmoothed top-left corner for `pointer`, kept inside `chart`.
pub fn target_position(tooltip: &Tooltip, pointer: Point2, size: Size, chart: Rect) -> Point2 {
    let mut x = tooltip.fixed_x.unwrap_or(pointer.x + tooltip.offset.x);
    let mut top = tooltip.fixed_y.unwrap_or(pointer.y + tooltip.offset.y);
    if x + size.width > chart.right() {
        x = chart.right() - size.width;
    }
    x = x.max(chart.x);
    if top > chart.top() {
        top = chart.top();
    }
    if top - size.height < chart.y {
        top = chart.y + size.height;
    }
    Point2::new(x, top)
}

/// Full tooltip pass. Hides (and resets smoothing) when nothing is indicated.
#[allow(clippy::too_many_arguments)]
pub fn update(
    ctx: &ChartContext,
    frame: &ChartFrame,
    tooltip: &Tooltip,
    state: &mut TooltipState,
    pointer: Option<Point2>,
    dt: f32,
    text: &dyn TextHost,
) -> Option<TooltipFrame> {
    let pointer = pointer.filter(|_| tooltip.show)?;
    let params = params(ctx, frame, tooltip, pointer);
    if params.is_empty() {
        state.hide();
        return None;
    }
    let axis_title = params.first().and_then(|p| {
        if p.data_name.is_empty() { None } else { Some(p.data_name.clone()) }
    });
    let content = content(tooltip, &params, axis_title.as_deref());
    let style = text_style(tooltip, ctx.theme);
    let (size, column_widths) = measure(tooltip, &content, &style, text);
    let target = target_position(tooltip, pointer, size, frame.chart_rect);
    let pos = match state.current {
        None => target,
        Some(cur) => {
            let mut vx = state.velocity.x;
            let mut vy = state.velocity.y;
            let x = smooth_damp(cur.x, target.x, &mut vx, tooltip.smooth_time, dt);
            let y = smooth_damp(cur.y, target.y, &mut vy, tooltip.smooth_time, dt);
            state.velocity = Point2::new(vx, vy);
            Point2::new(x, y)
        }
    };
    state.current = Some(pos);
    Some(TooltipFrame {
        rect: Rect::new(pos.x, pos.y - size.height, size.width, size.height),
        content,
        column_widths,
        params,
    })
}

fn text_style(tooltip: &Tooltip, theme: &Theme) -> TextStyle {
    TextStyle::new(tooltip.font_size.unwrap_or(theme.font_size), theme.tooltip_text)
}

pub fn draw(tooltip: &Tooltip, tf: &TooltipFrame, theme: &Theme, sink: &mut dyn DrawSink, text: &mut dyn TextHost) {
    let r = tf.rect;
    sink.rect(r, Fill::solid(theme.tooltip_background), Some(Stroke::solid(theme.tooltip_border, tooltip.border_width)));
    let style = text_style(tooltip, theme);
    let mut y = r.top() - tooltip.padding_tb;
    if let Some(title) = &tf.content.title {
        text.draw_text(Point2::new(r.x + tooltip.padding_lr, y - tooltip.title_height * 0.5), title, &style);
        y -= tooltip.title_height;
    }
    for (ri, row) in tf.content.rows.iter().enumerate() {
        let cy = y - tooltip.item_height * (ri as f32 + 0.5);
        let mut x = r.x + tooltip.padding_lr;
        let last = row.len().saturating_sub(1);
        for (c, cell) in row.iter().enumerate() {
            let mut cell_style = style;
            if *cell == tooltip.marker {
                cell_style.color = tf.content.colors.get(ri).copied().unwrap_or(style.color);
            }
            if c == last && c > 0 {
                cell_style.align = TextAlign::Right;
                text.draw_text(Point2::new(r.right() - tooltip.padding_lr, cy), cell, &cell_style);
            } else {
                text.draw_text(Point2::new(x, cy), cell, &cell_style);
            }
            x += tf.column_widths.get(c).copied().unwrap_or(0.0) + tooltip.column_gap;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smooth_damp_converges_without_overshoot() {
        let mut v = 0.0;
        let mut x = 0.0;
        for _ in 0..200 {
            x = smooth_damp(x, 100.0, &mut v, 0.08, 1.0 / 60.0);
            assert!(x <= 100.0);
        }
        assert!((x - 100.0).abs() < 0.01);
    }

    #[test]
    fn target_clamps_into_chart() {
        let tt = Tooltip::default();
        let chart = Rect::new(0.0, 0.0, 200.0, 100.0);
        let p = target_position(&tt, Point2::new(190.0, 10.0), Size::new(50.0, 40.0), chart);
        assert_eq!(p, Point2::new(150.0, 40.0));
    }
}
