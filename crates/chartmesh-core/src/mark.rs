// File: crates/chartmesh-core/src/mark.rs
// Summary: Mark-line and mark-area annotations: configuration, statistics and per-frame results.

use crate::error::Skip;
use crate::geometry::{Point2, Rect};
use crate::series::{Label, LineStyle, Symbol};
use crate::text::TextAlign;
use crate::theme::Color;

/// Statistic (or none) an annotation anchor is derived from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarkType {
    None,
    Min,
    Max,
    Average,
    Median,
}

/// Statistic over `values` (non-finite values skipped).
/// Returns the value and, for min/max, the index of its first occurrence.
pub fn statistic(values: &[f64], kind: MarkType) -> Option<(f64, Option<usize>)> {
    let finite = values.iter().copied().enumerate().filter(|(_, v)| v.is_finite());
    match kind {
        MarkType::None => None,
        MarkType::Max => finite
            .fold(None, |best: Option<(usize, f64)>, (i, v)| match best {
                Some((_, bv)) if bv >= v => best,
                _ => Some((i, v)),
            })
            .map(|(i, v)| (v, Some(i))),
        MarkType::Min => finite
            .fold(None, |best: Option<(usize, f64)>, (i, v)| match best {
                Some((_, bv)) if bv <= v => best,
                _ => Some((i, v)),
            })
            .map(|(i, v)| (v, Some(i))),
        MarkType::Average => {
            let (sum, n) = finite.fold((0.0, 0usize), |(s, n), (_, v)| (s + v, n + 1));
            if n == 0 { None } else { Some((sum / n as f64, None)) }
        }
        MarkType::Median => {
            let mut sorted: Vec<f64> = finite.map(|(_, v)| v).collect();
            if sorted.is_empty() {
                return None;
            }
            sorted.sort_by(f64::total_cmp);
            let mid = sorted.len() / 2;
            let m = if sorted.len() % 2 == 0 { (sorted[mid - 1] + sorted[mid]) * 0.5 } else { sorted[mid] };
            Some((m, None))
        }
    }
}

/// One mark-line entry. Non-statistic entries use, in order of precedence,
/// `x_position`, `y_position`, `y_value`, `x_value`.
#[derive(Clone, Debug, PartialEq)]
pub struct MarkLineData {
    pub name: String,
    pub kind: MarkType,
    /// Data dimension for statistics; the plotted dimension when `None`.
    pub dimension: Option<usize>,
    /// Pixel offset from the grid's left edge.
    pub x_position: Option<f32>,
    /// Pixel offset from the grid's bottom edge.
    pub y_position: Option<f32>,
    pub x_value: Option<f64>,
    pub y_value: Option<f64>,
    /// Grouped anchor at the grid origin.
    pub zero_position: bool,
    /// Entries sharing a non-zero group are joined into one segment.
    pub group: u32,
    pub line_style: Option<LineStyle>,
    pub start_symbol: Option<Symbol>,
    pub end_symbol: Option<Symbol>,
    pub label: Option<Label>,
}

impl MarkLineData {
    fn blank(kind: MarkType) -> Self {
        Self {
            name: String::new(),
            kind,
            dimension: None,
            x_position: None,
            y_position: None,
            x_value: None,
            y_value: None,
            zero_position: false,
            group: 0,
            line_style: None,
            start_symbol: None,
            end_symbol: None,
            label: None,
        }
    }

    pub fn stat(kind: MarkType) -> Self { Self::blank(kind) }

    pub fn x_value(v: f64) -> Self { Self { x_value: Some(v), ..Self::blank(MarkType::None) } }

    pub fn y_value(v: f64) -> Self { Self { y_value: Some(v), ..Self::blank(MarkType::None) } }

    pub fn x_position(px: f32) -> Self { Self { x_position: Some(px), ..Self::blank(MarkType::None) } }

    pub fn y_position(px: f32) -> Self { Self { y_position: Some(px), ..Self::blank(MarkType::None) } }

    /// Explicit point for grouped segments.
    pub fn point(x: f64, y: f64) -> Self { Self { x_value: Some(x), y_value: Some(y), ..Self::blank(MarkType::None) } }

    pub fn zero() -> Self { Self { zero_position: true, ..Self::blank(MarkType::None) } }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn in_group(mut self, group: u32) -> Self {
        self.group = group;
        self
    }

    pub fn with_dimension(mut self, dim: usize) -> Self {
        self.dimension = Some(dim);
        self
    }

    pub fn with_symbols(mut self, start: Option<Symbol>, end: Option<Symbol>) -> Self {
        self.start_symbol = start;
        self.end_symbol = end;
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MarkLine {
    pub series_index: usize,
    pub show: bool,
    pub data: Vec<MarkLineData>,
    /// Default style for entries without their own (dashed).
    pub line_style: LineStyle,
    pub label: Label,
    /// Seconds for the end point to travel from start to end.
    pub animation_duration: f32,
}

impl MarkLine {
    pub fn new(series_index: usize, data: Vec<MarkLineData>) -> Self {
        Self {
            series_index,
            show: true,
            data,
            line_style: LineStyle::dashed(),
            label: Label::default(),
            animation_duration: 1.0,
        }
    }
}

/// One anchor of a mark area.
#[derive(Clone, Debug, PartialEq)]
pub struct MarkAreaData {
    pub name: String,
    pub kind: MarkType,
    pub dimension: Option<usize>,
    pub x_position: Option<f32>,
    pub y_position: Option<f32>,
    pub x_value: Option<f64>,
    pub y_value: Option<f64>,
}

impl MarkAreaData {
    pub fn stat(kind: MarkType) -> Self {
        Self { name: String::new(), kind, dimension: None, x_position: None, y_position: None, x_value: None, y_value: None }
    }

    pub fn x_value(v: f64) -> Self { Self { x_value: Some(v), ..Self::stat(MarkType::None) } }

    pub fn y_value(v: f64) -> Self { Self { y_value: Some(v), ..Self::stat(MarkType::None) } }

    pub fn position(x: Option<f32>, y: Option<f32>) -> Self {
        Self { x_position: x, y_position: y, ..Self::stat(MarkType::None) }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MarkArea {
    pub series_index: usize,
    pub show: bool,
    pub name: String,
    pub start: MarkAreaData,
    pub end: MarkAreaData,
    pub color: Option<Color>,
    /// Alpha applied to the series color when `color` is unset.
    pub opacity: f32,
    pub label: Option<Label>,
}

impl MarkArea {
    pub fn new(series_index: usize, start: MarkAreaData, end: MarkAreaData) -> Self {
        Self { series_index, show: true, name: String::new(), start, end, color: None, opacity: 0.2, label: None }
    }

    pub fn with_label(mut self, label: Label) -> Self {
        self.label = Some(label);
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MarkLabel {
    pub text: String,
    pub position: Point2,
    pub align: TextAlign,
    pub color: Color,
    pub font_size: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MarkLineSegment {
    pub start: Point2,
    pub end: Point2,
    /// End point after animation and clamping; drawn instead of `end`.
    pub current_end: Point2,
    pub value: f64,
    pub color: Color,
    pub width: f32,
    pub pattern: Option<(f32, f32)>,
    pub start_symbol: Option<Symbol>,
    pub end_symbol: Option<Symbol>,
    pub label: Option<MarkLabel>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MarkLineFrame {
    pub segments: Vec<MarkLineSegment>,
    /// Entries or groups dropped this frame, with the reason.
    pub skipped: Vec<Skip>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MarkAreaFrame {
    pub rect: Rect,
    pub color: Color,
    pub label: Option<MarkLabel>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_over_values() {
        let v = [1.0, 5.0, 3.0, 9.0, 2.0];
        assert_eq!(statistic(&v, MarkType::Max), Some((9.0, Some(3))));
        assert_eq!(statistic(&v, MarkType::Min), Some((1.0, Some(0))));
        assert_eq!(statistic(&v, MarkType::Average), Some((4.0, None)));
        assert_eq!(statistic(&v, MarkType::Median), Some((3.0, None)));
        assert_eq!(statistic(&[], MarkType::Max), None);
        assert_eq!(statistic(&[2.0, f64::NAN, 4.0, 1.0], MarkType::Median), Some((2.0, None)));
    }
}
