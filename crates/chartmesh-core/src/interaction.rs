// File: crates/chartmesh-core/src/interaction.rs
// Summary: Pointer hit-testing against symbols and ring sectors; latched highlight updates.

use crate::context::{ChartContext, ChartFrame, SeriesState};
use crate::geometry::Point2;
use crate::render::{line, ring};
use crate::series::SeriesKind;

/// Data index of series `si` under `pointer`, if any.
///
/// Line points are hit within their symbol size (the selected size while
/// highlighted); the first match in draw order wins.
pub fn hit_series(ctx: &ChartContext, frame: &ChartFrame, si: usize, pointer: Point2) -> Option<usize> {
    let series = ctx.series.get(si)?;
    let sf = frame.series_frame(si).ok()?;
    match &series.kind {
        SeriesKind::Line(opts) => sf
            .drawn_points()
            .find(|(i, p)| p.position.distance(pointer) <= line::symbol_size(ctx, series, opts, si, *i))
            .map(|(i, _)| i),
        SeriesKind::Ring(_) => ring::hit_test(sf, pointer),
    }
}

/// Desired highlight of one series after a hit pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SeriesHit {
    pub item: Option<usize>,
    /// Whole series forced by legend hover.
    pub legend: bool,
}

/// Hit-test every series. `hovered_legend` is the legend name under the
/// pointer; it takes over from pointer hits while set.
pub fn hit_all(ctx: &ChartContext, frame: &ChartFrame, pointer: Option<Point2>, hovered_legend: Option<&str>) -> Vec<SeriesHit> {
    let inside = pointer.filter(|p| frame.chart_rect.contains(*p));
    ctx.series
        .iter()
        .enumerate()
        .map(|(si, series)| {
            let item = match hovered_legend {
                Some(name) => match series.kind {
                    SeriesKind::Ring(_) => series.data.iter().position(|d| d.name == name),
                    SeriesKind::Line(_) => None,
                },
                None => inside.and_then(|p| hit_series(ctx, frame, si, p)),
            };
            let legend = matches!(series.kind, SeriesKind::Line(_)) && hovered_legend == Some(series.name.as_str());
            SeriesHit { item, legend }
        })
        .collect()
}

/// Latches `hits` into `states`. Returns true when any highlight changed.
pub fn apply_hits(states: &mut [SeriesState], hits: &[SeriesHit], lens: &[usize]) -> bool {
    let mut changed = false;
    for ((state, hit), len) in states.iter_mut().zip(hits).zip(lens) {
        if state.legend_highlight != hit.legend {
            state.legend_highlight = hit.legend;
            changed = true;
        }
        changed |= state.set_pointer_item(hit.item, *len);
    }
    changed
}

/// Clears pointer and legend highlights. Returns true when anything changed.
pub fn clear_all(states: &mut [SeriesState]) -> bool {
    let mut changed = false;
    for s in states.iter_mut() {
        changed |= s.clear_pointer();
        if s.legend_highlight {
            s.legend_highlight = false;
            changed = true;
        }
    }
    changed
}

/// Whether a hit pass should run: pointer inside the chart or a legend item hovered.
pub fn should_test(frame: &ChartFrame, pointer: Option<Point2>, legend_hovered: bool) -> bool {
    legend_hovered || pointer.is_some_and(|p| frame.chart_rect.contains(p))
}
