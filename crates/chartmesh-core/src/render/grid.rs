// File: crates/chartmesh-core/src/render/grid.rs
// Summary: Coordinate backgrounds: grid fill/border, split lines, axis lines and tick labels; polar outline.

use crate::axis::Axis;
use crate::context::{ChartContext, ChartFrame};
use crate::draw::{DrawSink, Fill, Stroke};
use crate::error::{Degenerate, Invalid, Missing, Skip};
use crate::format::format_number;
use crate::geometry::Point2;
use crate::grid::linspace;
use crate::scale::{AxisScale, ScaleTransform};
use crate::text::{TextAlign, TextHost, TextStyle};
use crate::theme::Color;
use crate::types::Layer;

/// Tick positions (pixels) and label text of one axis.
pub fn ticks(axis: &Axis, scale: &AxisScale, visible_count: usize, split_number: usize) -> Vec<(f32, String)> {
    if axis.is_category() {
        let end = scale.zoom_start + visible_count;
        (scale.zoom_start..end)
            .map(|i| {
                let name = axis.category_name(i).map(str::to_string).unwrap_or_else(|| i.to_string());
                (scale.to_px(i as f64), name)
            })
            .collect()
    } else {
        linspace(scale.min, scale.max, split_number + 1)
            .into_iter()
            .map(|v| (scale.to_px(v), format_number(v, None)))
            .collect()
    }
}

pub fn draw_grid(
    ctx: &ChartContext,
    frame: &ChartFrame,
    gi: usize,
    layer: Layer,
    sink: &mut dyn DrawSink,
    text: &mut dyn TextHost,
) -> Result<(), Skip> {
    let grid = ctx.grid(gi)?;
    if !grid.show {
        return Err(Invalid::Hidden.into());
    }
    let r = frame.grid(gi)?;
    if layer != Layer::Base {
        return Ok(());
    }
    if let Some(bg) = grid.background {
        sink.rect(r, Fill::solid(bg), None);
    }
    if grid.show_border {
        sink.rect(r, Fill::solid(Color::CLEAR), Some(Stroke::solid(ctx.theme.grid_border, 1.0)));
    }
    let split = Stroke::solid(ctx.theme.split_line, 1.0);
    let axis_stroke = Stroke::solid(ctx.theme.axis_line, ctx.theme.axis_line_width);
    let label_style = TextStyle::new(ctx.theme.font_size * 0.85, ctx.theme.axis_label);

    // verticals from x axes, horizontals from y axes
    for (xi, axis) in ctx.x_axes.iter().enumerate().filter(|(_, a)| a.coord_index == gi && a.show) {
        let Ok(af) = frame.x_axis(xi) else { continue };
        let Ok(scale) = AxisScale::new(axis, af, r.x, r.width) else { continue };
        let ticks = ticks(axis, &scale, af.visible_count, axis.split_number);
        if grid.show_split_lines && !axis.is_category() {
            for (x, _) in &ticks {
                sink.polyline(&[Point2::new(*x, r.y), Point2::new(*x, r.top())], split);
            }
        }
        sink.polyline(&[r.origin(), Point2::new(r.right(), r.y)], axis_stroke);
        let style = label_style.with_align(TextAlign::Center);
        for (x, label) in &ticks {
            text.draw_text(Point2::new(*x, r.y - 12.0), label, &style);
        }
        if !axis.label.is_empty() {
            text.draw_text(Point2::new(r.right(), r.y - 28.0), &axis.label, &style.with_align(TextAlign::Right));
        }
    }
    for (yi, axis) in ctx.y_axes.iter().enumerate().filter(|(_, a)| a.coord_index == gi && a.show) {
        let Ok(af) = frame.y_axis(yi) else { continue };
        let Ok(scale) = AxisScale::new(axis, af, r.y, r.height) else { continue };
        let ticks = ticks(axis, &scale, af.visible_count, axis.split_number);
        if grid.show_split_lines && !axis.is_category() {
            for (y, _) in &ticks {
                sink.polyline(&[Point2::new(r.x, *y), Point2::new(r.right(), *y)], split);
            }
        }
        sink.polyline(&[r.origin(), Point2::new(r.x, r.top())], axis_stroke);
        let style = label_style.with_align(TextAlign::Right);
        for (y, label) in &ticks {
            text.draw_text(Point2::new(r.x - 6.0, *y), label, &style);
        }
        if !axis.label.is_empty() {
            text.draw_text(Point2::new(r.x, r.top() + 12.0), &axis.label, &style.with_align(TextAlign::Left));
        }
    }
    Ok(())
}

pub fn draw_polar(ctx: &ChartContext, frame: &ChartFrame, pi: usize, layer: Layer, sink: &mut dyn DrawSink) -> Result<(), Skip> {
    let polar = ctx.polar(pi)?;
    if !polar.show {
        return Err(Invalid::Hidden.into());
    }
    let pf = frame.polars.get(pi).copied().ok_or(Skip::from(Missing::Polar(pi)))?;
    if pf.radius <= 0.0 {
        return Err(Degenerate::EmptyRegion.into());
    }
    if layer != Layer::Base {
        return Ok(());
    }
    let fill = polar.background.unwrap_or(Color::CLEAR);
    sink.circle(pf.center, pf.radius, fill, Some(Stroke::solid(ctx.theme.axis_line, ctx.theme.axis_line_width)));
    for r in linspace(0.0, pf.radius as f64, 5).into_iter().skip(1).take(3) {
        sink.circle(pf.center, r as f32, Color::CLEAR, Some(Stroke::solid(ctx.theme.split_line, 1.0)));
    }
    Ok(())
}
