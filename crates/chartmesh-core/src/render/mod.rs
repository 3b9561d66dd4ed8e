// File: crates/chartmesh-core/src/render/mod.rs
// Summary: Series/component renderers and the single dispatch over series kinds.

pub mod grid;
pub mod line;
pub mod mark_area;
pub mod mark_line;
pub mod ring;

use crate::context::{ChartContext, ChartFrame, SeriesFrame};
use crate::draw::DrawSink;
use crate::error::{Invalid, Missing, Skip};
use crate::series::{CoordRef, SeriesKind};
use crate::stack::StackTable;
use crate::text::TextHost;
use crate::types::Layer;

/// Compute the frame geometry of series `si`.
pub fn layout_series(ctx: &ChartContext, frame: &ChartFrame, si: usize, stack: &mut StackTable) -> Result<SeriesFrame, Skip> {
    let series = ctx.series(si)?;
    if !series.show {
        return Err(Invalid::Hidden.into());
    }
    match (&series.kind, series.coord) {
        (SeriesKind::Line(opts), CoordRef::Grid { x_axis, y_axis }) => {
            line::layout_grid(ctx, frame, si, opts, x_axis, y_axis, stack)
        }
        (SeriesKind::Line(_), CoordRef::Polar { polar }) => line::layout_polar(ctx, frame, si, polar),
        (SeriesKind::Line(_), CoordRef::None) => Err(Missing::Coordinate(si).into()),
        (SeriesKind::Ring(opts), _) => ring::layout(ctx, si, opts),
    }
}

/// Series owning primitives on the top layer: laid-out lines whose symbols sit above stacks.
pub fn draws_on_top(ctx: &ChartContext, frame: &ChartFrame, si: usize) -> bool {
    let is_line = ctx.series(si).is_ok_and(|s| matches!(s.kind, SeriesKind::Line(_)));
    is_line && frame.series_frame(si).is_ok_and(|sf| sf.symbols_on_top)
}

/// Emit the primitives of series `si` that belong to `layer`.
pub fn draw_series(
    ctx: &ChartContext,
    frame: &ChartFrame,
    si: usize,
    layer: Layer,
    sink: &mut dyn DrawSink,
    text: &mut dyn TextHost,
) -> Result<(), Skip> {
    let series = ctx.series(si)?;
    let sf = frame.series_frame(si)?;
    match &series.kind {
        SeriesKind::Line(opts) => line::draw(ctx, si, opts, sf, layer, sink),
        SeriesKind::Ring(opts) => ring::draw(ctx, si, opts, sf, layer, sink, text),
    }
}
