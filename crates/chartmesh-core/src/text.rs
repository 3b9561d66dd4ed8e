// File: crates/chartmesh-core/src/text.rs
// Summary: Text host boundary (measure + draw) and a deterministic fixed-advance implementation.

use crate::geometry::{Point2, Size};
use crate::theme::Color;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    pub font_size: f32,
    pub color: Color,
    pub align: TextAlign,
    /// Prefer tabular digits for numeric columns.
    pub mono_numeric: bool,
}

impl TextStyle {
    pub fn new(font_size: f32, color: Color) -> Self {
        Self { font_size, color, align: TextAlign::Left, mono_numeric: false }
    }

    pub fn with_align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }
}

/// Measures and places single-line labels.
///
/// `pos` is the anchor on the vertical middle of the line; `align` selects
/// whether it is the left edge, center or right edge.
pub trait TextHost {
    fn measure(&self, text: &str, style: &TextStyle) -> Size;
    fn draw_text(&mut self, pos: Point2, text: &str, style: &TextStyle) -> Size;
}

#[derive(Clone, Debug, PartialEq)]
pub struct PlacedText {
    pub pos: Point2,
    pub text: String,
    pub style: TextStyle,
}

/// Text host measuring `chars × advance` pixels wide and `line_height` tall; records drawn labels.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedAdvanceText {
    pub advance: f32,
    pub line_height: f32,
    pub drawn: Vec<PlacedText>,
}

impl FixedAdvanceText {
    pub fn new(advance: f32, line_height: f32) -> Self {
        Self { advance, line_height, drawn: Vec::new() }
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.drawn.iter().map(|t| t.text.as_str())
    }
}

impl Default for FixedAdvanceText {
    fn default() -> Self {
        Self::new(7.0, 16.0)
    }
}

impl TextHost for FixedAdvanceText {
    fn measure(&self, text: &str, _style: &TextStyle) -> Size {
        Size::new(text.chars().count() as f32 * self.advance, self.line_height)
    }

    fn draw_text(&mut self, pos: Point2, text: &str, style: &TextStyle) -> Size {
        self.drawn.push(PlacedText { pos, text: text.to_string(), style: *style });
        self.measure(text, style)
    }
}
