// File: crates/chartmesh-core/src/render/mark_area.rs
// Summary: Shaded rectangle between two anchors on a series' grid, with an optional label.

use crate::context::{ChartContext, ChartFrame};
use crate::draw::{DrawSink, Fill};
use crate::error::{Invalid, Missing, Skip};
use crate::format::{format_template, TemplateParam};
use crate::geometry::{Point2, Rect};
use crate::mark::{MarkAreaData, MarkAreaFrame, MarkLabel, MarkType};
use crate::render::mark_line::HostGrid;
use crate::scale::ScaleTransform;
use crate::series::LabelPosition;
use crate::text::{TextAlign, TextHost, TextStyle};
use crate::types::Layer;

/// Pixel coordinates fixed by one anchor; `None` leaves that dimension to the grid edge.
fn anchor(host: &HostGrid, d: &MarkAreaData) -> (Option<f32>, Option<f32>) {
    let g = host.grid;
    if d.kind != MarkType::None {
        let Some((v, _)) = host.statistic(d.kind, d.dimension) else { return (None, None) };
        return if host.horizontal { (Some(host.xs.to_px(v)), None) } else { (None, Some(host.ys.to_px(v))) };
    }
    let x = d.x_position.map(|px| g.x + px).or_else(|| d.x_value.map(|v| host.xs.to_px(v)));
    let y = d.y_position.map(|py| g.y + py).or_else(|| d.y_value.map(|v| host.ys.to_px(v)));
    (x, y)
}

pub fn layout(ctx: &ChartContext, frame: &ChartFrame, ai: usize) -> Result<MarkAreaFrame, Skip> {
    let area = ctx.mark_areas.get(ai).ok_or(Skip::from(Missing::Series(ai)))?;
    if !area.show {
        return Err(Invalid::Hidden.into());
    }
    let host = HostGrid::resolve(ctx, frame, area.series_index)?;
    let g = host.grid;
    let (sx, sy) = anchor(&host, &area.start);
    let (ex, ey) = anchor(&host, &area.end);
    let rect = Rect::from_corners(
        Point2::new(sx.unwrap_or(g.x), sy.unwrap_or(g.top())),
        Point2::new(ex.unwrap_or(g.right()), ey.unwrap_or(g.y)),
    );
    let color = area
        .color
        .unwrap_or_else(|| host.color.with_alpha((area.opacity.clamp(0.0, 1.0) * 255.0) as u8));

    let label = area.label.as_ref().filter(|l| l.show).map(|l| {
        let text = match l.formatter.as_deref() {
            Some(template) => {
                let param = TemplateParam {
                    series_name: host.series.name.clone(),
                    data_name: area.name.clone(),
                    value: f64::NAN,
                    total: f64::NAN,
                    marker: String::new(),
                    numeric_formatter: l.numeric_formatter.clone(),
                };
                format_template(template, &[param], 0)
            }
            None => area.name.clone(),
        };
        let c = rect.center();
        let (position, align) = match l.position {
            LabelPosition::Center => (c, TextAlign::Center),
            LabelPosition::Left => (Point2::new(rect.x, c.y), TextAlign::Left),
            LabelPosition::Right => (Point2::new(rect.right(), c.y), TextAlign::Right),
            LabelPosition::Top => (Point2::new(c.x, rect.top()), TextAlign::Center),
            LabelPosition::Bottom => (Point2::new(c.x, rect.y), TextAlign::Center),
        };
        MarkLabel {
            text,
            position: position + l.offset,
            align,
            color: l.color.unwrap_or(ctx.theme.mark_label),
            font_size: l.font_size.unwrap_or(ctx.theme.font_size),
        }
    });
    Ok(MarkAreaFrame { rect, color, label })
}

pub fn draw(frame: &ChartFrame, ai: usize, layer: Layer, sink: &mut dyn DrawSink, text: &mut dyn TextHost) -> Result<(), Skip> {
    let af = match frame.mark_areas.get(ai) {
        Some(Ok(f)) => f,
        Some(Err(s)) => return Err(*s),
        None => return Err(Missing::Series(ai).into()),
    };
    if layer != Layer::Base {
        return Ok(());
    }
    sink.rect(af.rect, Fill::solid(af.color), None);
    if let Some(label) = &af.label {
        let style = TextStyle { font_size: label.font_size, color: label.color, align: label.align, mono_numeric: false };
        text.draw_text(label.position, &label.text, &style);
    }
    Ok(())
}
