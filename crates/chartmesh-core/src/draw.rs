// File: crates/chartmesh-core/src/draw.rs
// Summary: Drawing sink boundary and a recording implementation.
// Notes:
// - Coordinates are chart space (y-up). Angles are degrees clockwise from up.

use crate::geometry::{Point2, Rect};
use crate::series::SymbolType;
use crate::theme::Color;

/// Stroke color (optionally a gradient toward `to_color`) and width.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub to_color: Option<Color>,
    pub width: f32,
}

impl Stroke {
    pub fn solid(color: Color, width: f32) -> Self {
        Self { color, to_color: None, width }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fill {
    pub color: Color,
    pub to_color: Option<Color>,
}

impl Fill {
    pub fn solid(color: Color) -> Self {
        Self { color, to_color: None }
    }
}

/// Annular sector.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Arc {
    pub center: Point2,
    pub inner_radius: f32,
    pub outer_radius: f32,
    pub start_angle: f32,
    pub to_angle: f32,
    pub round_cap: bool,
    /// Tessellation hint in pixels per segment.
    pub smoothness: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArrowHead {
    /// Point the arrow points away from; only its direction is used.
    pub from: Point2,
    pub tip: Point2,
    pub width: f32,
    pub height: f32,
    pub offset: f32,
    pub dent: f32,
}

/// Receiver for primitives produced by the engine.
pub trait DrawSink {
    fn polyline(&mut self, points: &[Point2], stroke: Stroke);
    /// Filled simple polygon (points in order, implicitly closed).
    fn polygon(&mut self, points: &[Point2], fill: Fill);
    fn doughnut(&mut self, arc: Arc, fill: Fill);
    fn dashed_line(&mut self, from: Point2, to: Point2, stroke: Stroke, dash: f32, gap: f32);
    fn arrow(&mut self, head: ArrowHead, color: Color);
    fn symbol(&mut self, kind: SymbolType, center: Point2, size: f32, fill: Color, border: Option<Stroke>);
    fn rect(&mut self, rect: Rect, fill: Fill, border: Option<Stroke>);
    fn circle(&mut self, center: Point2, radius: f32, fill: Color, border: Option<Stroke>);
}

/// One recorded primitive.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Polyline { points: Vec<Point2>, stroke: Stroke },
    Polygon { points: Vec<Point2>, fill: Fill },
    Doughnut { arc: Arc, fill: Fill },
    DashedLine { from: Point2, to: Point2, stroke: Stroke, dash: f32, gap: f32 },
    Arrow { head: ArrowHead, color: Color },
    Symbol { kind: SymbolType, center: Point2, size: f32, fill: Color, border: Option<Stroke> },
    Rect { rect: Rect, fill: Fill, border: Option<Stroke> },
    Circle { center: Point2, radius: f32, fill: Color, border: Option<Stroke> },
}

/// Recording sink; collects commands in emission order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self { Self::default() }

    pub fn clear(&mut self) { self.commands.clear(); }

    pub fn len(&self) -> usize { self.commands.len() }

    pub fn is_empty(&self) -> bool { self.commands.is_empty() }

    pub fn polylines(&self) -> impl Iterator<Item = &[Point2]> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Polyline { points, .. } => Some(points.as_slice()),
            _ => None,
        })
    }

    pub fn doughnuts(&self) -> impl Iterator<Item = &Arc> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Doughnut { arc, .. } => Some(arc),
            _ => None,
        })
    }

    pub fn symbols(&self) -> impl Iterator<Item = (Point2, f32)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Symbol { center, size, .. } => Some((*center, *size)),
            _ => None,
        })
    }

    pub fn dashed_lines(&self) -> impl Iterator<Item = (Point2, Point2)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::DashedLine { from, to, .. } => Some((*from, *to)),
            _ => None,
        })
    }

    pub fn arrows(&self) -> impl Iterator<Item = &ArrowHead> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Arrow { head, .. } => Some(head),
            _ => None,
        })
    }
}

impl DrawSink for DrawList {
    fn polyline(&mut self, points: &[Point2], stroke: Stroke) {
        self.commands.push(DrawCommand::Polyline { points: points.to_vec(), stroke });
    }

    fn polygon(&mut self, points: &[Point2], fill: Fill) {
        self.commands.push(DrawCommand::Polygon { points: points.to_vec(), fill });
    }

    fn doughnut(&mut self, arc: Arc, fill: Fill) {
        self.commands.push(DrawCommand::Doughnut { arc, fill });
    }

    fn dashed_line(&mut self, from: Point2, to: Point2, stroke: Stroke, dash: f32, gap: f32) {
        self.commands.push(DrawCommand::DashedLine { from, to, stroke, dash, gap });
    }

    fn arrow(&mut self, head: ArrowHead, color: Color) {
        self.commands.push(DrawCommand::Arrow { head, color });
    }

    fn symbol(&mut self, kind: SymbolType, center: Point2, size: f32, fill: Color, border: Option<Stroke>) {
        self.commands.push(DrawCommand::Symbol { kind, center, size, fill, border });
    }

    fn rect(&mut self, rect: Rect, fill: Fill, border: Option<Stroke>) {
        self.commands.push(DrawCommand::Rect { rect, fill, border });
    }

    fn circle(&mut self, center: Point2, radius: f32, fill: Color, border: Option<Stroke>) {
        self.commands.push(DrawCommand::Circle { center, radius, fill, border });
    }
}
