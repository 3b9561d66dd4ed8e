// File: crates/chartmesh-core/src/render/ring.rs
// Summary: Ring (multi-annulus progress) series: item angles and radii, labels and hit-testing.

use crate::context::{ChartContext, PointContext, SeriesFrame};
use crate::draw::{Arc, DrawSink, Fill};
use crate::error::{Degenerate, Skip};
use crate::format::{format_number, format_template, TemplateParam};
use crate::geometry::{angle_from_up, polar_point, Point2, Rect};
use crate::series::{LabelPosition, RingOptions};
use crate::text::{TextAlign, TextHost, TextStyle};
use crate::types::{resolve_length, Layer};

/// Arc span of an item filling `degree` degrees, as (start, to) with `start <= to`.
///
/// Clockwise rings run from `start_angle`; counter-clockwise rings are mirrored
/// so the arc ends at `360 - start_angle`.
pub fn item_angles(start_angle: f32, degree: f32, clockwise: bool) -> (f32, f32) {
    if clockwise {
        (start_angle, start_angle + degree)
    } else {
        (360.0 - start_angle - degree, 360.0 - start_angle)
    }
}

pub fn layout(ctx: &ChartContext, si: usize, opts: &RingOptions) -> Result<SeriesFrame, Skip> {
    let series = ctx.series(si)?;
    let size = ctx.size;
    let min_side = size.width.min(size.height);
    let center = Point2::new(resolve_length(opts.center.x, size.width), resolve_length(opts.center.y, size.height));
    let outer = resolve_length(opts.radius.1, min_side);
    let inner = resolve_length(opts.radius.0, min_side);
    let ring_width = outer - inner;
    if outer <= 0.0 || ring_width <= 0.0 || !center.is_finite() {
        return Err(Degenerate::EmptyRegion.into());
    }

    let state = ctx.state(si);
    let progress = state.map(|s| s.animation.growth_progress()).unwrap_or(1.0);
    let limit = opts.start_angle + 360.0 * progress;
    let label = series.label.as_ref();

    let mut points = vec![PointContext::default(); series.data.len()];
    let mut draw_indices = Vec::new();
    let mut bad_max = false;
    for (j, d) in series.data.iter().enumerate() {
        if !d.show {
            continue;
        }
        let max = d.last();
        if max.is_nan() || max <= 0.0 || d.values.len() < 2 {
            bad_max = true;
            continue;
        }
        let value = state.map(|s| s.animation.value_at(j, d.first())).unwrap_or(d.first());
        if !value.is_finite() {
            continue;
        }
        let degree = (360.0 * value / max).clamp(0.0, 360.0) as f32;
        let (mut start, mut to) = item_angles(opts.start_angle, degree, opts.clockwise);
        if progress < 1.0 {
            if opts.clockwise {
                to = to.min(limit);
            } else {
                start = start.max(360.0 - limit);
            }
        }
        let outside = outer - j as f32 * (ring_width + opts.gap);
        let inside = outside - ring_width;
        if outside <= 0.0 {
            continue;
        }
        let mid = (inside.max(0.0) + outside) * 0.5;
        let label_position = match label.map(|l| (l.position, l.distance, l.offset)) {
            Some((LabelPosition::Bottom, distance, offset)) => {
                let dx = if opts.clockwise { -distance } else { distance };
                polar_point(center, mid, opts.start_angle) + Point2::new(dx, 0.0) + offset
            }
            Some((LabelPosition::Top, distance, offset)) => {
                let end = if opts.clockwise { to + distance } else { start - distance };
                polar_point(center, mid, end) + offset
            }
            Some((_, _, offset)) => center + offset,
            None => center,
        };
        points[j] = PointContext {
            position: polar_point(center, mid, (start + to) * 0.5),
            value,
            drawn: true,
            label_position,
            start_angle: start,
            to_angle: to,
            inside_radius: inside.max(0.0),
            outside_radius: outside,
            ..PointContext::default()
        };
        draw_indices.push(j);
    }
    if draw_indices.is_empty() {
        return Err(if bad_max { Degenerate::NonPositiveMax } else { Degenerate::NoData }.into());
    }
    Ok(SeriesFrame {
        points,
        draw_indices,
        region: Rect::new(center.x - outer, center.y - outer, outer * 2.0, outer * 2.0),
        center,
        radius: outer,
        sample_rate: 1,
        ..SeriesFrame::default()
    })
}

/// Item under `pointer`: half-open `[inside, outside)` radius and `[start, to)` angle.
pub fn hit_test(sf: &SeriesFrame, pointer: Point2) -> Option<usize> {
    let dist = pointer.distance(sf.center);
    if dist >= sf.radius {
        return None;
    }
    let angle = angle_from_up(pointer - sf.center);
    sf.drawn_points()
        .find(|(_, p)| {
            let in_radius = dist >= p.inside_radius && dist < p.outside_radius;
            // Unwrap into [start, start + 360) so arcs starting below 0 still match.
            let a = p.start_angle + (angle - p.start_angle).rem_euclid(360.0);
            in_radius && a < p.to_angle
        })
        .map(|(j, _)| j)
}

pub fn draw(
    ctx: &ChartContext,
    si: usize,
    opts: &RingOptions,
    sf: &SeriesFrame,
    layer: Layer,
    sink: &mut dyn DrawSink,
    text: &mut dyn TextHost,
) -> Result<(), Skip> {
    if layer != Layer::Content {
        return Ok(());
    }
    let series = ctx.series(si)?;
    let smoothness = ctx.settings.circle_smoothness;
    let last = sf.draw_indices.last().copied();
    for (j, p) in sf.drawn_points() {
        let arc = |start_angle, to_angle, round_cap| Arc {
            center: sf.center,
            inner_radius: p.inside_radius,
            outer_radius: p.outside_radius,
            start_angle,
            to_angle,
            round_cap,
            smoothness,
        };
        if let Some(bg) = opts.background {
            sink.doughnut(arc(0.0, 360.0, false), Fill::solid(bg));
        }
        let mut color = ctx.item_color(si, j);
        if ctx.is_highlighted(si, j) {
            color = color.lighten(0.2);
        }
        if p.to_angle > p.start_angle {
            let round_cap = opts.round_cap && p.inside_radius > 0.0;
            sink.doughnut(arc(p.start_angle, p.to_angle, round_cap), Fill::solid(color));
        }
        if Some(j) == last {
            if let Some(center_color) = opts.center_color {
                let r = p.inside_radius - opts.center_gap;
                if r > 0.0 {
                    sink.circle(sf.center, r, center_color, None);
                }
            }
        }
    }

    let Some(label) = series.label.as_ref().filter(|l| l.show) else { return Ok(()) };
    for (j, p) in sf.drawn_points() {
        let Some(d) = series.data.get(j) else { continue };
        let numeric = d.numeric_formatter.as_deref().or(label.numeric_formatter.as_deref());
        let content = match label.formatter.as_deref() {
            Some(template) => {
                let param = TemplateParam {
                    series_name: series.name.clone(),
                    data_name: d.name.clone(),
                    value: p.value,
                    total: d.last(),
                    marker: String::new(),
                    numeric_formatter: numeric.map(str::to_string),
                };
                format_template(template, &[param], 0)
            }
            None => format_number(p.value, numeric),
        };
        let style = TextStyle {
            font_size: label.font_size.unwrap_or(ctx.theme.font_size),
            color: label.color.unwrap_or_else(|| ctx.item_color(si, j)),
            align: match label.position {
                LabelPosition::Bottom if opts.clockwise => TextAlign::Right,
                LabelPosition::Bottom => TextAlign::Left,
                _ => TextAlign::Center,
            },
            mono_numeric: true,
        };
        text.draw_text(p.label_position, &content, &style);
    }
    Ok(())
}
