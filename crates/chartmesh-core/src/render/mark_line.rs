// File: crates/chartmesh-core/src/render/mark_line.rs
// Summary: Mark-line anchors (statistics, pixel offsets, axis values), grouped segments and drawing.

use crate::context::{ChartContext, ChartFrame};
use crate::datazoom::visible_range;
use crate::draw::{DrawSink, Stroke};
use crate::error::{Invalid, Missing, Skip};
use crate::format::{format_number, format_template, TemplateParam};
use crate::geometry::{Point2, Rect};
use crate::mark::{statistic, MarkLabel, MarkLineData, MarkLineFrame, MarkLineSegment, MarkType};
use crate::scale::{AxisScale, ScaleTransform};
use crate::series::{CoordRef, Label, Series};
use crate::text::{TextAlign, TextHost, TextStyle};
use crate::theme::Color;
use crate::types::Layer;

/// The grid a host series is drawn on, resolved for annotation anchors.
pub(crate) struct HostGrid<'a> {
    pub series: &'a Series,
    pub grid: Rect,
    pub xs: AxisScale,
    pub ys: AxisScale,
    /// Category axis is y.
    pub horizontal: bool,
    /// Zoom-filtered index window.
    pub window: std::ops::Range<usize>,
    pub color: Color,
}

impl<'a> HostGrid<'a> {
    pub fn resolve(ctx: &ChartContext<'a>, frame: &ChartFrame, si: usize) -> Result<Self, Skip> {
        let series = ctx.series(si)?;
        if !series.show {
            return Err(Invalid::Hidden.into());
        }
        let CoordRef::Grid { x_axis, y_axis } = series.coord else {
            return Err(Missing::Coordinate(si).into());
        };
        let xa = ctx.x_axis(x_axis)?;
        let ya = ctx.y_axis(y_axis)?;
        let grid = frame.grid(xa.coord_index)?;
        let xs = AxisScale::new(xa, frame.x_axis(x_axis)?, grid.x, grid.width)?;
        let ys = AxisScale::new(ya, frame.y_axis(y_axis)?, grid.y, grid.height)?;
        let horizontal = !xa.is_category() && ya.is_category();
        let zoom = if horizontal { ctx.data_zoom_of_y_axis(y_axis) } else { ctx.data_zoom_of_x_axis(x_axis) };
        Ok(Self {
            series,
            grid,
            xs,
            ys,
            horizontal,
            window: visible_range(zoom, series.data.len()),
            color: ctx.series_color(si),
        })
    }

    /// Values of `dimension` (plotted value when `None`) over the zoom window.
    pub fn values(&self, dimension: Option<usize>) -> Vec<f64> {
        self.series.data[self.window.clone()]
            .iter()
            .map(|d| {
                if self.series.is_ignored(d) {
                    f64::NAN
                } else {
                    dimension.map(|dim| d.value(dim)).unwrap_or_else(|| self.series.plotted_value(d))
                }
            })
            .collect()
    }

    /// Scale of the value dimension.
    pub fn value_scale(&self) -> &AxisScale {
        if self.horizontal { &self.xs } else { &self.ys }
    }

    /// Statistic of `kind`, its absolute data index (min/max), resolved on the value dimension.
    pub fn statistic(&self, kind: MarkType, dimension: Option<usize>) -> Option<(f64, Option<usize>)> {
        statistic(&self.values(dimension), kind).map(|(v, i)| (v, i.map(|i| i + self.window.start)))
    }

    /// Full-width (or full-height on horizontal charts) line at value `v`.
    pub fn value_line(&self, v: f64) -> (Point2, Point2) {
        let g = self.grid;
        if self.horizontal {
            let x = self.xs.to_px(v);
            (Point2::new(x, g.y), Point2::new(x, g.top()))
        } else {
            let y = self.ys.to_px(v);
            (Point2::new(g.x, y), Point2::new(g.right(), y))
        }
    }
}

/// Compute all segments of mark line `mi`.
pub fn layout(ctx: &ChartContext, frame: &ChartFrame, mi: usize) -> Result<MarkLineFrame, Skip> {
    let ml = ctx.mark_lines.get(mi).ok_or(Skip::from(Missing::Series(mi)))?;
    if !ml.show {
        return Err(Invalid::Hidden.into());
    }
    let host = HostGrid::resolve(ctx, frame, ml.series_index)?;
    let progress = ctx.mark_line_states.get(mi).map(|a| a.growth_progress()).unwrap_or(1.0);
    let chart = frame.chart_rect;
    let mut out = MarkLineFrame::default();

    // Groups in first-seen order.
    let mut groups: Vec<(u32, Vec<&MarkLineData>)> = Vec::new();
    for d in ml.data.iter().filter(|d| d.group != 0) {
        match groups.iter_mut().find(|(g, _)| *g == d.group) {
            Some((_, members)) => members.push(d),
            None => groups.push((d.group, vec![d])),
        }
    }
    for (group, members) in &groups {
        if members.len() != 2 {
            let skip = Skip::from(Invalid::MarkLineGroup { group: *group, members: members.len() });
            log::debug!("mark line {mi}: {skip}");
            out.skipped.push(skip);
            continue;
        }
        let (sp, value) = match group_point(&host, members[0]) {
            Ok(p) => p,
            Err(skip) => {
                out.skipped.push(skip);
                continue;
            }
        };
        let (ep, _) = match group_point(&host, members[1]) {
            Ok(p) => p,
            Err(skip) => {
                out.skipped.push(skip);
                continue;
            }
        };
        out.segments.push(segment(ctx, ml, &host, members[0], sp, ep, value, progress, chart));
    }

    for d in ml.data.iter().filter(|d| d.group == 0) {
        match single_line(&host, d) {
            Some((sp, ep, value)) => out.segments.push(segment(ctx, ml, &host, d, sp, ep, value, progress, chart)),
            None => out.skipped.push(Skip::from(crate::error::Degenerate::NoData)),
        }
    }
    Ok(out)
}

/// Start/end of an ungrouped entry spanning the grid.
fn single_line(host: &HostGrid, d: &MarkLineData) -> Option<(Point2, Point2, f64)> {
    let g = host.grid;
    if d.kind != MarkType::None {
        let (v, _) = host.statistic(d.kind, d.dimension)?;
        let (sp, ep) = host.value_line(v);
        return Some((sp, ep, v));
    }
    if let Some(px) = d.x_position {
        let x = g.x + px;
        return Some((Point2::new(x, g.y), Point2::new(x, g.top()), px as f64));
    }
    if let Some(py) = d.y_position {
        let y = g.y + py;
        return Some((Point2::new(g.x, y), Point2::new(g.right(), y), py as f64));
    }
    if let Some(v) = d.y_value {
        let y = host.ys.to_px(v);
        return Some((Point2::new(g.x, y), Point2::new(g.right(), y), v));
    }
    let v = d.x_value.unwrap_or(0.0);
    let x = host.xs.to_px(v);
    Some((Point2::new(x, g.y), Point2::new(x, g.top()), v))
}

/// One end of a grouped segment.
fn group_point(host: &HostGrid, d: &MarkLineData) -> Result<(Point2, f64), Skip> {
    let g = host.grid;
    let vs = host.value_scale();
    match d.kind {
        MarkType::Min | MarkType::Max | MarkType::Average | MarkType::Median => {
            let (v, index) = host.statistic(d.kind, d.dimension).ok_or(Skip::from(crate::error::Degenerate::NoData))?;
            let cat = if host.horizontal { &host.ys } else { &host.xs };
            // Average and median have no index; they sit on the category start edge.
            let c = index.map(|i| cat.to_px(i as f64)).unwrap_or(if host.horizontal { g.y } else { g.x });
            let p = vs.to_px(v);
            Ok((if host.horizontal { Point2::new(p, c) } else { Point2::new(c, p) }, v))
        }
        MarkType::None if d.zero_position => Ok((g.origin(), 0.0)),
        MarkType::None => {
            let x = match d.x_position {
                Some(px) => g.x + px,
                None => host.xs.to_px(d.x_value.unwrap_or(0.0)),
            };
            let y = match d.y_position {
                Some(py) => g.y + py,
                None => host.ys.to_px(d.y_value.unwrap_or(0.0)),
            };
            Ok((Point2::new(x, y), d.y_value.unwrap_or(0.0)))
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn segment(
    ctx: &ChartContext,
    ml: &crate::mark::MarkLine,
    host: &HostGrid,
    d: &MarkLineData,
    sp: Point2,
    ep: Point2,
    value: f64,
    progress: f32,
    chart: Rect,
) -> MarkLineSegment {
    let style = d.line_style.unwrap_or(ml.line_style);
    let color = style.color.unwrap_or(host.color);
    let width = style.width.unwrap_or(ctx.theme.axis_line_width);
    let start = chart.clamp_point(sp);
    let current_end = chart.clamp_point(sp.lerp(ep, progress.clamp(0.0, 1.0)));
    let label_cfg = d.label.as_ref().unwrap_or(&ml.label);
    let label = label_cfg.show.then(|| mark_label(ctx, host, d, label_cfg, value, start, current_end));
    MarkLineSegment {
        start,
        end: ep,
        current_end,
        value,
        color,
        width,
        pattern: style.pattern(width),
        start_symbol: d.start_symbol,
        end_symbol: d.end_symbol,
        label,
    }
}

fn mark_label(
    ctx: &ChartContext,
    host: &HostGrid,
    d: &MarkLineData,
    label: &Label,
    value: f64,
    start: Point2,
    end: Point2,
) -> MarkLabel {
    let text = match label.formatter.as_deref() {
        Some(template) => {
            let param = TemplateParam {
                series_name: host.series.name.clone(),
                data_name: d.name.clone(),
                value,
                total: value,
                marker: String::new(),
                numeric_formatter: label.numeric_formatter.clone(),
            };
            format_template(template, &[param], 0)
        }
        None => format_number(value, label.numeric_formatter.as_deref()),
    };
    // Labels sit past the end point, along the line's direction.
    let horizontal_line = (end.y - start.y).abs() <= (end.x - start.x).abs();
    let (nudge, align) = if horizontal_line {
        (Point2::new(4.0, 0.0), TextAlign::Left)
    } else {
        (Point2::new(0.0, 10.0), TextAlign::Center)
    };
    MarkLabel {
        text,
        position: end + nudge + label.offset,
        align,
        color: label.color.unwrap_or(ctx.theme.mark_label),
        font_size: label.font_size.unwrap_or(ctx.theme.font_size),
    }
}

pub fn draw(
    ctx: &ChartContext,
    frame: &ChartFrame,
    mi: usize,
    layer: Layer,
    sink: &mut dyn DrawSink,
    text: &mut dyn TextHost,
) -> Result<(), Skip> {
    let mf = match frame.mark_lines.get(mi) {
        Some(Ok(f)) => f,
        Some(Err(s)) => return Err(*s),
        None => return Err(Missing::Series(mi).into()),
    };
    if layer != Layer::Top {
        return Ok(());
    }
    for seg in &mf.segments {
        let stroke = Stroke::solid(seg.color, seg.width);
        match seg.pattern {
            Some((dash, gap)) => sink.dashed_line(seg.start, seg.current_end, stroke, dash, gap),
            None => sink.polyline(&[seg.start, seg.current_end], stroke),
        }
        for (symbol, at) in [(seg.start_symbol, seg.start), (seg.end_symbol, seg.current_end)] {
            if let Some(sym) = symbol.filter(|s| s.show) {
                sink.symbol(sym.kind, at, sym.size_or(ctx.theme.symbol_size), seg.color, None);
            }
        }
        if let Some(label) = &seg.label {
            let style = TextStyle { font_size: label.font_size, color: label.color, align: label.align, mono_numeric: true };
            text.draw_text(label.position, &label.text, &style);
        }
    }
    Ok(())
}
