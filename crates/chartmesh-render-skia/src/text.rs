// File: crates/chartmesh-render-skia/src/text.rs
// Summary: Text shaping with Skia textlayout; a measure-only host and a canvas-drawing host.

use chartmesh_core::text::{TextAlign, TextHost, TextStyle};
use chartmesh_core::{Point2, Size};
use skia::textlayout::{FontCollection, Paragraph, ParagraphBuilder, ParagraphStyle};
use skia_safe as skia;

use crate::sink::to_skia;

pub struct TextShaper {
    fonts: FontCollection,
}

impl Default for TextShaper {
    fn default() -> Self {
        Self::new()
    }
}

impl TextShaper {
    pub fn new() -> Self {
        let mut fc = FontCollection::new();
        // Use system manager fallback
        fc.set_default_font_manager(skia::FontMgr::default(), None);
        Self { fonts: fc }
    }

    fn make_style(style: &TextStyle) -> skia::textlayout::TextStyle {
        let mut ts = skia::textlayout::TextStyle::new();
        ts.set_font_size(style.font_size.max(1.0));
        ts.set_color(to_skia(style.color));
        if style.mono_numeric {
            // Prefer monospaced/tabular-number families for numeric alignment
            ts.set_font_families(&["Roboto Mono", "Consolas", "Menlo", "DejaVu Sans Mono", "monospace"]);
        } else {
            ts.set_font_families(&["Segoe UI", "Arial", "Helvetica", "Roboto", "DejaVu Sans", "sans-serif"]);
        }
        ts
    }

    pub fn layout(&self, text: &str, style: &TextStyle) -> Paragraph {
        let mut pstyle = ParagraphStyle::new();
        pstyle.set_text_align(skia::textlayout::TextAlign::Left);
        let mut builder = ParagraphBuilder::new(&pstyle, &self.fonts);
        builder.push_style(&Self::make_style(style));
        builder.add_text(text);
        let mut paragraph = builder.build();
        paragraph.layout(10_000.0);
        paragraph
    }

    pub fn measure(&self, text: &str, style: &TextStyle) -> Size {
        let p = self.layout(text, style);
        // width of the longest line
        Size::new(p.longest_line(), p.height())
    }

    /// Paint `text` with its vertical middle at canvas-space `y`.
    pub fn draw(&self, canvas: &skia::Canvas, text: &str, x: f32, y: f32, style: &TextStyle) -> Size {
        let p = self.layout(text, style);
        let size = Size::new(p.longest_line(), p.height());
        let left = match style.align {
            TextAlign::Left => x,
            TextAlign::Center => x - size.width * 0.5,
            TextAlign::Right => x - size.width,
        };
        p.paint(canvas, (left, y - size.height * 0.5));
        size
    }
}

/// Measure-only host for `Chart::set_text_host`; layout needs sizes, not pixels.
impl TextHost for TextShaper {
    fn measure(&self, text: &str, style: &TextStyle) -> Size {
        TextShaper::measure(self, text, style)
    }

    fn draw_text(&mut self, _pos: Point2, text: &str, style: &TextStyle) -> Size {
        TextShaper::measure(self, text, style)
    }
}

/// Text host drawing onto a canvas, flipping chart space like `SkiaSink`.
pub struct SkiaText<'a> {
    shaper: &'a TextShaper,
    canvas: &'a skia::Canvas,
    height: f32,
}

impl<'a> SkiaText<'a> {
    pub fn new(shaper: &'a TextShaper, canvas: &'a skia::Canvas, height: f32) -> Self {
        Self { shaper, canvas, height }
    }
}

impl TextHost for SkiaText<'_> {
    fn measure(&self, text: &str, style: &TextStyle) -> Size {
        self.shaper.measure(text, style)
    }

    fn draw_text(&mut self, pos: Point2, text: &str, style: &TextStyle) -> Size {
        self.shaper.draw(self.canvas, text, pos.x, self.height - pos.y, style)
    }
}
