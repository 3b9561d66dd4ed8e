// File: crates/chartmesh-core/src/layout.rs
// Summary: Frame layout pass: coordinate regions, axis ranges, series geometry and annotations.

use std::collections::HashMap;

use crate::axis::{Axis, AxisFrame};
use crate::context::{ChartContext, ChartFrame};
use crate::datazoom::visible_range;
use crate::render;
use crate::scale::scale_width;
use crate::series::{CoordRef, Series};
use crate::stack::StackTable;

/// Compute everything the draw pass needs for the current configuration.
/// Pure: the same context always yields the same frame.
pub fn compute_frame(ctx: &ChartContext) -> ChartFrame {
    let mut frame = layout_coordinates(ctx);
    let mut stack = StackTable::build(ctx.series);
    frame.series = (0..ctx.series.len())
        .map(|si| {
            let r = render::layout_series(ctx, &frame, si, &mut stack);
            if let Err(skip) = &r {
                log::debug!("series {si} skipped: {skip}");
            }
            r
        })
        .collect();
    frame.stack = stack;
    frame.mark_lines = (0..ctx.mark_lines.len()).map(|mi| render::mark_line::layout(ctx, &frame, mi)).collect();
    frame.mark_areas = (0..ctx.mark_areas.len()).map(|ai| render::mark_area::layout(ctx, &frame, ai)).collect();
    frame
}

/// Regions and axis frames.
pub fn layout_coordinates(ctx: &ChartContext) -> ChartFrame {
    let grids: Vec<_> = ctx.grids.iter().map(|g| g.frame(ctx.size)).collect();
    let polars: Vec<_> = ctx.polars.iter().map(|p| p.frame(ctx.size)).collect();
    let tops = stacked_tops(ctx.series);

    let x_axes = ctx
        .x_axes
        .iter()
        .enumerate()
        .map(|(xi, axis)| {
            let length = grids.get(axis.coord_index).map(|g| g.width).unwrap_or(0.0);
            grid_axis_frame(ctx, &tops, axis, xi, true, length)
        })
        .collect();
    let y_axes = ctx
        .y_axes
        .iter()
        .enumerate()
        .map(|(yi, axis)| {
            let length = grids.get(axis.coord_index).map(|g| g.height).unwrap_or(0.0);
            grid_axis_frame(ctx, &tops, axis, yi, false, length)
        })
        .collect();

    let radius_axes = ctx
        .radius_axes
        .iter()
        .enumerate()
        .map(|(ri, axis)| {
            let polar_ids: Vec<usize> =
                ctx.polars.iter().enumerate().filter(|(_, p)| p.radius_axis == ri).map(|(i, _)| i).collect();
            let length = polar_ids.first().and_then(|i| polars.get(*i)).map(|p| p.radius).unwrap_or(0.0);
            let (mut lo, mut hi, mut count) = (f64::INFINITY, f64::NEG_INFINITY, 0usize);
            for s in ctx.series.iter().filter(|s| s.show) {
                let CoordRef::Polar { polar } = s.coord else { continue };
                if !polar_ids.contains(&polar) {
                    continue;
                }
                count = count.max(s.data.len());
                for d in s.data.iter().filter(|d| !s.is_ignored(d)) {
                    let v = s.plotted_value(d);
                    lo = lo.min(v);
                    hi = hi.max(v);
                }
            }
            value_frame(axis, lo, hi, length, count)
        })
        .collect();
    let angle_axes = ctx
        .angle_axes
        .iter()
        .enumerate()
        .map(|(ai, axis)| {
            let mut count = axis.categories.len();
            if count == 0 {
                for s in ctx.series.iter().filter(|s| s.show) {
                    let CoordRef::Polar { polar } = s.coord else { continue };
                    if ctx.polars.get(polar).is_some_and(|p| p.angle_axis == ai) {
                        count = count.max(s.data.len());
                    }
                }
            }
            AxisFrame { min: 0.0, max: count.saturating_sub(1) as f64, scale_width: 0.0, zoom_start: 0, visible_count: count }
        })
        .collect();

    ChartFrame {
        chart_rect: ctx.chart_rect(),
        grids,
        polars,
        x_axes,
        y_axes,
        radius_axes,
        angle_axes,
        ..ChartFrame::default()
    }
}

/// Cumulative stack tops per series (in data units), registration order.
fn stacked_tops(series: &[Series]) -> Vec<Option<Vec<f64>>> {
    let mut running: HashMap<&str, Vec<f64>> = HashMap::new();
    series
        .iter()
        .map(|s| {
            let name = s.stack.as_deref()?;
            if !s.show {
                return None;
            }
            let acc = running.entry(name).or_default();
            if acc.len() < s.data.len() {
                acc.resize(s.data.len(), 0.0);
            }
            for (i, d) in s.data.iter().enumerate() {
                if !s.is_ignored(d) {
                    acc[i] += s.plotted_value(d);
                }
            }
            Some(acc.clone())
        })
        .collect()
}

fn grid_axis_frame(
    ctx: &ChartContext,
    tops: &[Option<Vec<f64>>],
    axis: &Axis,
    index: usize,
    is_x: bool,
    length: f32,
) -> AxisFrame {
    let members: Vec<(usize, &Series, usize, usize)> = ctx
        .series
        .iter()
        .enumerate()
        .filter(|(_, s)| s.show && s.line_options().is_some())
        .filter_map(|(si, s)| match s.coord {
            CoordRef::Grid { x_axis, y_axis } if (is_x && x_axis == index) || (!is_x && y_axis == index) => {
                Some((si, s, x_axis, y_axis))
            }
            _ => None,
        })
        .collect();
    let data_count = members.iter().map(|(_, s, _, _)| s.data.len()).max().unwrap_or(0);

    if axis.is_category() {
        let count = if axis.categories.is_empty() { data_count } else { axis.categories.len() };
        let zoom = if is_x { ctx.data_zoom_of_x_axis(index) } else { ctx.data_zoom_of_y_axis(index) };
        let visible = visible_range(zoom, count);
        return AxisFrame {
            min: 0.0,
            max: count.saturating_sub(1) as f64,
            scale_width: scale_width(axis, length, visible.len()),
            zoom_start: visible.start,
            visible_count: visible.len(),
        };
    }

    let (mut lo, mut hi) = (f64::INFINITY, f64::NEG_INFINITY);
    for (si, s, x_axis, y_axis) in &members {
        let other_is_category = if is_x {
            ctx.y_axes.get(*y_axis).is_some_and(Axis::is_category)
        } else {
            ctx.x_axes.get(*x_axis).is_some_and(Axis::is_category)
        };
        let zoom = if is_x && other_is_category {
            ctx.data_zoom_of_y_axis(*y_axis)
        } else {
            ctx.data_zoom_of_x_axis(*x_axis)
        };
        // On a value/value grid the x axis reads the first dimension.
        let first_dim = is_x && !other_is_category;
        for i in visible_range(zoom, s.data.len()) {
            let d = &s.data[i];
            if s.is_ignored(d) {
                continue;
            }
            let own = if first_dim { d.first() } else { s.plotted_value(d) };
            let (bottom, top) = match tops.get(*si).and_then(Option::as_ref) {
                Some(t) if !first_dim => (t[i] - own, t[i]),
                _ => (own, own),
            };
            lo = lo.min(bottom.min(top));
            hi = hi.max(bottom.max(top));
        }
    }
    value_frame(axis, lo, hi, length, data_count)
}

fn value_frame(axis: &Axis, lo: f64, hi: f64, length: f32, count: usize) -> AxisFrame {
    let (min, max) = axis.resolve_range(lo, hi);
    AxisFrame { min, max, scale_width: scale_width(axis, length, count), zoom_start: 0, visible_count: count }
}
