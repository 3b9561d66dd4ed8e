// File: crates/chartmesh-core/src/render/line.rs
// Summary: Line/area series on grid and polar coordinates: point resolution, smoothing, symbols, arrows.

use crate::context::{ChartContext, ChartFrame, PointContext, SeriesFrame};
use crate::datazoom::visible_range;
use crate::downsample::{data_average, max_display_for, sample_rate, sample_value, sampled_indices, SampleType};
use crate::draw::{ArrowHead, DrawSink, Fill, Stroke};
use crate::error::{Degenerate, Missing, Skip};
use crate::geometry::{clamp, Point2, Rect};
use crate::scale::{polar_position, AxisScale, ScaleTransform};
use crate::series::{ArrowPosition, LineOptions, Series, SymbolType};
use crate::stack::StackTable;
use crate::types::{ChartSettings, Layer};

/// Resolve a line series on a rectangular grid.
pub fn layout_grid(
    ctx: &ChartContext,
    frame: &ChartFrame,
    si: usize,
    opts: &LineOptions,
    x_axis: usize,
    y_axis: usize,
    stack: &mut StackTable,
) -> Result<SeriesFrame, Skip> {
    let series = ctx.series(si)?;
    let xa = ctx.x_axis(x_axis)?;
    let ya = ctx.y_axis(y_axis)?;
    let grid = frame.grid(xa.coord_index)?;
    if !grid.is_valid() {
        return Err(Degenerate::EmptyRegion.into());
    }
    let xs = AxisScale::new(xa, frame.x_axis(x_axis)?, grid.x, grid.width)?;
    let ys = AxisScale::new(ya, frame.y_axis(y_axis)?, grid.y, grid.height)?;

    // Category on y makes a horizontal chart; the value dimension is then x.
    let horizontal = !xa.is_category() && ya.is_category();
    let (cat, val) = if horizontal { (&ys, &xs) } else { (&xs, &ys) };
    let value_only = !xa.is_category() && !ya.is_category();
    let zoom = if horizontal { ctx.data_zoom_of_y_axis(y_axis) } else { ctx.data_zoom_of_x_axis(x_axis) };

    let visible = visible_range(zoom, series.data.len());
    let (start, end) = show_window(series, visible.start, visible.end);
    if start >= end {
        return Err(Degenerate::NoData.into());
    }

    let values: Vec<f64> =
        series.data.iter().map(|d| if series.is_ignored(d) { f64::NAN } else { series.plotted_value(d) }).collect();
    let axis_length = if horizontal { grid.height } else { grid.width };
    let rate = sampling_rate(series, end - start, axis_length);
    let total_average = match (series.sampling.kind, series.sampling.average) {
        (SampleType::Peak, Some(avg)) => avg,
        (SampleType::Peak, None) => data_average(&values, start..end),
        _ => 0.0,
    };

    let state = ctx.state(si);
    let progress = state.map(|s| s.animation.growth_progress()).unwrap_or(1.0);
    let limit = if horizontal { grid.y + progress * grid.height } else { grid.x + progress * grid.width };
    let stacked = stack.is_member(si);
    let zero = clamp(0.0, val.min.min(val.max), val.max.max(val.min));

    let mut points = vec![PointContext::default(); series.data.len()];
    let mut draw_indices = Vec::new();
    let mut runs: Vec<(Vec<Point2>, Vec<Point2>)> = vec![(Vec::new(), Vec::new())];
    for i in sampled_indices(start, end, rate) {
        let d = &series.data[i];
        if series.is_ignored(d) {
            points[i].ignored = true;
            points[i].drawn = true;
            stack.set_height(si, i, 0.0);
            if series.ignore_line_break && runs.last().is_some_and(|(top, _)| !top.is_empty()) {
                runs.push((Vec::new(), Vec::new()));
            }
            continue;
        }
        let sampled = sample_value(&values, series.sampling.kind, rate, start, end, total_average, i);
        let v = state.map(|s| s.animation.value_at(i, sampled)).unwrap_or(sampled);
        if !v.is_finite() {
            return Err(Degenerate::NonFinite.into());
        }
        let offset = if stacked { stack.offset(si, i) } else { 0.0 };
        if stacked {
            stack.set_height(si, i, v);
        }
        let cat_px = if value_only { cat.to_px(d.first()) } else { cat.to_px(i as f64) };
        let top_px = val.to_px(offset + v);
        let base_px = if stacked { val.to_px(offset) } else { val.to_px(zero) };
        let (position, base) = if horizontal {
            (Point2::new(top_px, cat_px), Point2::new(base_px, cat_px))
        } else {
            (Point2::new(cat_px, top_px), Point2::new(cat_px, base_px))
        };
        points[i] = PointContext {
            position,
            stack_height: top_px - val.to_px(offset),
            stack_offset: val.to_px(offset) - val.to_px(zero),
            value: v,
            ignored: false,
            drawn: true,
            label_position: position,
            ..PointContext::default()
        };
        let along = if horizontal { position.y } else { position.x };
        if along <= limit + f32::EPSILON {
            draw_indices.push(i);
        }
        if let Some((top, bottom)) = runs.last_mut() {
            top.push(position);
            bottom.push(base);
        }
    }

    let mut segments = Vec::new();
    let mut areas = Vec::new();
    for (top, bottom) in runs.into_iter().filter(|(t, _)| !t.is_empty()) {
        let (top, bottom) = if opts.smooth {
            (smooth(&top, ctx.settings), smooth(&bottom, ctx.settings))
        } else {
            (top, bottom)
        };
        let top = clip_run(&top, limit, horizontal);
        if top.is_empty() {
            continue;
        }
        if opts.area_style.is_some() {
            let bottom = clip_run(&bottom, limit, horizontal);
            let mut polygon = top.clone();
            polygon.extend(bottom.iter().rev());
            if polygon.len() >= 3 {
                areas.push(polygon);
            }
        }
        segments.push(top);
    }

    Ok(SeriesFrame {
        points,
        draw_indices,
        segments,
        areas,
        region: grid,
        center: grid.center(),
        radius: 0.0,
        horizontal,
        symbols_on_top: !stack.is_empty(),
        sample_rate: rate,
    })
}

/// Resolve a line series on a polar coordinate (closed when it has more than two points).
pub fn layout_polar(ctx: &ChartContext, frame: &ChartFrame, si: usize, polar: usize) -> Result<SeriesFrame, Skip> {
    let series = ctx.series(si)?;
    let pc = ctx.polar(polar)?;
    let pf = *frame.polars.get(polar).ok_or(Skip::from(Missing::Polar(polar)))?;
    if pf.radius <= 0.0 {
        return Err(Degenerate::EmptyRegion.into());
    }
    let ra = ctx.radius_axis(polar)?;
    let rf = frame.radius_axes.get(pc.radius_axis).ok_or(Skip::from(Missing::Polar(polar)))?;
    let scale = AxisScale::new(ra, rf, 0.0, pf.radius)?;
    let count = frame
        .angle_axes
        .get(pc.angle_axis)
        .map(|a| a.visible_count)
        .unwrap_or(0)
        .max(series.data.len());
    if count == 0 {
        return Err(Degenerate::NoData.into());
    }

    let state = ctx.state(si);
    let progress = state.map(|s| s.animation.growth_progress()).unwrap_or(1.0);
    let shown = ((series.data.len() as f32) * progress).ceil() as usize;

    let mut points = vec![PointContext::default(); series.data.len()];
    let mut draw_indices = Vec::new();
    let mut line = Vec::new();
    for (i, d) in series.data.iter().enumerate().take(shown) {
        if series.is_ignored(d) {
            points[i].ignored = true;
            continue;
        }
        let v = state.map(|s| s.animation.value_at(i, series.plotted_value(d))).unwrap_or(series.plotted_value(d));
        let position = polar_position(&pf, &scale, v, pc.start_angle, pc.clockwise, i, count);
        points[i] = PointContext {
            position,
            value: v,
            drawn: true,
            label_position: position,
            outside_radius: position.distance(pf.center),
            ..PointContext::default()
        };
        draw_indices.push(i);
        line.push(position);
    }
    if line.is_empty() {
        return Err(Degenerate::NoData.into());
    }
    if line.len() > 2 && shown >= series.data.len() {
        line.push(line[0]);
    }
    Ok(SeriesFrame {
        points,
        draw_indices,
        segments: vec![line],
        areas: Vec::new(),
        region: Rect::new(pf.center.x - pf.radius, pf.center.y - pf.radius, pf.radius * 2.0, pf.radius * 2.0),
        center: pf.center,
        radius: pf.radius,
        horizontal: false,
        symbols_on_top: false,
        sample_rate: 1,
    })
}

/// Relative `min_show..max_show` window applied inside the zoom window.
fn show_window(series: &Series, start: usize, end: usize) -> (usize, usize) {
    let len = end - start;
    let lo = start + series.min_show.min(len);
    let hi = start + series.max_show.map(|m| m.min(len)).unwrap_or(len);
    (lo, hi.max(lo))
}

fn sampling_rate(series: &Series, visible: usize, axis_length: f32) -> usize {
    let max_display = series
        .sampling
        .max_display
        .or_else(|| max_display_for(axis_length, series.sampling.sample_dist))
        .unwrap_or(visible);
    sample_rate(visible, max_display)
}

/// Cubic bezier smoothing through every point of `points`.
pub fn smooth(points: &[Point2], settings: &ChartSettings) -> Vec<Point2> {
    let n = points.len();
    if n < 3 {
        return points.to_vec();
    }
    let k = settings.line_smoothness;
    let seg = settings.line_segment_distance.max(0.5);
    let mut out = Vec::with_capacity(n * 4);
    out.push(points[0]);
    for i in 0..n - 1 {
        let p0 = points[i.saturating_sub(1)];
        let p1 = points[i];
        let p2 = points[i + 1];
        let p3 = points[(i + 2).min(n - 1)];
        let d = p1.distance(p2);
        let c1 = p1 + (p2 - p0).normalized() * (d * k);
        let c2 = p2 - (p3 - p1).normalized() * (d * k);
        let steps = ((d / seg).ceil() as usize).max(1);
        for s in 1..=steps {
            let t = s as f32 / steps as f32;
            let u = 1.0 - t;
            out.push(p1 * (u * u * u) + c1 * (3.0 * u * u * t) + c2 * (3.0 * u * t * t) + p2 * (t * t * t));
        }
    }
    out
}

/// Keep the part of a run whose progress coordinate is at most `limit`.
pub fn clip_run(points: &[Point2], limit: f32, horizontal: bool) -> Vec<Point2> {
    let along = |p: &Point2| if horizontal { p.y } else { p.x };
    let mut out = Vec::with_capacity(points.len());
    for (i, p) in points.iter().enumerate() {
        if along(p) <= limit + f32::EPSILON {
            out.push(*p);
            continue;
        }
        if i > 0 {
            let prev = points[i - 1];
            let a = along(&prev);
            if a < limit {
                let t = (limit - a) / (along(p) - a);
                out.push(prev.lerp(*p, t));
            }
        }
        break;
    }
    out
}

pub fn draw(
    ctx: &ChartContext,
    si: usize,
    opts: &LineOptions,
    sf: &SeriesFrame,
    layer: Layer,
    sink: &mut dyn DrawSink,
) -> Result<(), Skip> {
    let symbol_layer = if sf.symbols_on_top { Layer::Top } else { Layer::Content };
    if layer == Layer::Content {
        draw_lines(ctx, si, opts, sf, sink);
    }
    if layer == symbol_layer {
        draw_symbols(ctx, si, opts, sf, sink);
        draw_arrow(ctx, si, opts, sf, sink);
    }
    Ok(())
}

fn draw_lines(ctx: &ChartContext, si: usize, opts: &LineOptions, sf: &SeriesFrame, sink: &mut dyn DrawSink) {
    let color = ctx.series_color(si);
    if let Some(area) = &opts.area_style {
        let fill = Fill {
            color: area.color.unwrap_or_else(|| color.with_alpha((area.opacity.clamp(0.0, 1.0) * 255.0) as u8)),
            to_color: area.to_color,
        };
        for polygon in &sf.areas {
            sink.polygon(polygon, fill);
        }
    }
    let mut width = opts.line_style.width.unwrap_or(ctx.theme.line_width);
    if ctx.state(si).is_some_and(|s| s.legend_highlight) {
        width += 1.0;
    }
    let stroke = Stroke { color: opts.line_style.color.unwrap_or(color), to_color: opts.line_style.to_color, width };
    for run in sf.segments.iter().filter(|r| r.len() >= 2) {
        match opts.line_style.pattern(width) {
            None => sink.polyline(run, stroke),
            Some((dash, gap)) => {
                for w in run.windows(2) {
                    sink.dashed_line(w[0], w[1], stroke, dash, gap);
                }
            }
        }
    }
}

fn draw_symbols(ctx: &ChartContext, si: usize, opts: &LineOptions, sf: &SeriesFrame, sink: &mut dyn DrawSink) {
    let Ok(series) = ctx.series(si) else { return };
    let color = ctx.series_color(si);
    let count = sf.draw_indices.len();
    let border_width = ctx.theme.symbol_border_width;
    for (n, (i, p)) in sf.drawn_points().enumerate() {
        if !opts.symbol.shows_index(n, count) {
            continue;
        }
        if let Some(arrow) = &opts.arrow {
            let skip_start = arrow.position == ArrowPosition::Start && n == 0;
            let skip_end = arrow.position == ArrowPosition::End && n + 1 == count;
            if skip_start || skip_end {
                continue;
            }
        }
        let size = symbol_size(ctx, series, opts, si, i);
        let fill = if opts.symbol.kind == SymbolType::EmptyCircle { ctx.theme.background } else { ctx.item_color(si, i) };
        sink.symbol(opts.symbol.kind, p.position, size, fill, Some(Stroke::solid(color, border_width)));
    }
}

/// Symbol radius of data `i`, using the selected size while highlighted.
pub fn symbol_size(ctx: &ChartContext, series: &Series, opts: &LineOptions, si: usize, i: usize) -> f32 {
    let base = series.data.get(i).and_then(|d| d.symbol_size);
    if ctx.is_highlighted(si, i) {
        opts.symbol.selected_size_or(base.map(|b| b * 2.0).unwrap_or(ctx.theme.symbol_selected_size))
    } else {
        base.unwrap_or(opts.symbol.size_or(ctx.theme.symbol_size))
    }
}

fn draw_arrow(ctx: &ChartContext, si: usize, opts: &LineOptions, sf: &SeriesFrame, sink: &mut dyn DrawSink) {
    let Some(arrow) = &opts.arrow else { return };
    // Direction comes from the emitted (clipped, smoothed) polyline ends.
    let (from, tip) = match arrow.position {
        ArrowPosition::End => match sf.segments.iter().rev().find(|r| r.len() >= 2) {
            Some(run) => (run[run.len() - 2], run[run.len() - 1]),
            None => return,
        },
        ArrowPosition::Start => match sf.segments.iter().find(|r| r.len() >= 2) {
            Some(run) => (run[1], run[0]),
            None => return,
        },
    };
    let a = arrow.arrow;
    let head = ArrowHead { from, tip, width: a.width, height: a.height, offset: a.offset, dent: a.dent };
    sink.arrow(head, a.color.unwrap_or_else(|| ctx.series_color(si)));
}
