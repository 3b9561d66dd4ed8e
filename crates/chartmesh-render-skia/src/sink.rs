// File: crates/chartmesh-render-skia/src/sink.rs
// Summary: DrawSink over a Skia canvas; flips chart space (y-up) into canvas space (y-down).

use chartmesh_core::draw::{Arc, ArrowHead, DrawSink, Fill, Stroke};
use chartmesh_core::series::SymbolType;
use chartmesh_core::{Color, Point2, Rect};
use skia_safe as skia;

pub(crate) fn to_skia(c: Color) -> skia::Color {
    skia::Color::from_argb(c.a, c.r, c.g, c.b)
}

/// Linear gradient from `color` at `from` to `to` at `to_pt`, if a second color is set.
fn gradient(color: Color, to: Option<Color>, from: skia::Point, to_pt: skia::Point) -> Option<skia::Shader> {
    let to = to?;
    let colors = [to_skia(color), to_skia(to)];
    skia::Shader::linear_gradient((from, to_pt), &colors[..], None, skia::TileMode::Clamp, None, None)
}

pub struct SkiaSink<'a> {
    canvas: &'a skia::Canvas,
    height: f32,
}

impl<'a> SkiaSink<'a> {
    /// `height` is the chart height in pixels, used for the y flip.
    pub fn new(canvas: &'a skia::Canvas, height: f32) -> Self {
        Self { canvas, height }
    }

    fn pt(&self, p: Point2) -> skia::Point {
        skia::Point::new(p.x, self.height - p.y)
    }

    fn to_rect(&self, r: Rect) -> skia::Rect {
        skia::Rect::from_ltrb(r.x, self.height - r.top(), r.right(), self.height - r.y)
    }

    fn stroke_paint(&self, stroke: Stroke, from: skia::Point, to: skia::Point) -> skia::Paint {
        let mut paint = skia::Paint::default();
        paint.set_anti_alias(true);
        paint.set_style(skia::paint::Style::Stroke);
        paint.set_stroke_width(stroke.width.max(0.0));
        paint.set_color(to_skia(stroke.color));
        if let Some(shader) = gradient(stroke.color, stroke.to_color, from, to) {
            paint.set_shader(shader);
        }
        paint
    }

    /// Fill paint; gradients run top to bottom across `bounds`.
    fn fill_paint(&self, fill: Fill, bounds: skia::Rect) -> skia::Paint {
        let mut paint = skia::Paint::default();
        paint.set_anti_alias(true);
        paint.set_style(skia::paint::Style::Fill);
        paint.set_color(to_skia(fill.color));
        let top = skia::Point::new(bounds.left, bounds.top);
        let bottom = skia::Point::new(bounds.left, bounds.bottom);
        if let Some(shader) = gradient(fill.color, fill.to_color, top, bottom) {
            paint.set_shader(shader);
        }
        paint
    }

    fn path(&self, points: &[Point2]) -> skia::Path {
        let mut path = skia::Path::new();
        if let Some((first, rest)) = points.split_first() {
            path.move_to(self.pt(*first));
            for p in rest {
                path.line_to(self.pt(*p));
            }
        }
        path
    }

    fn oval(&self, center: Point2, radius: f32) -> skia::Rect {
        let c = self.pt(center);
        skia::Rect::from_ltrb(c.x - radius, c.y - radius, c.x + radius, c.y + radius)
    }
}

/// Degrees clockwise from up (y-up) to Skia's degrees clockwise from +x (y-down).
fn skia_angle(degrees: f32) -> f32 {
    degrees - 90.0
}

impl DrawSink for SkiaSink<'_> {
    fn polyline(&mut self, points: &[Point2], stroke: Stroke) {
        if points.len() < 2 {
            return;
        }
        let path = self.path(points);
        let from = self.pt(points[0]);
        let to = self.pt(points[points.len() - 1]);
        let mut paint = self.stroke_paint(stroke, from, to);
        paint.set_stroke_join(skia::paint::Join::Round);
        self.canvas.draw_path(&path, &paint);
    }

    fn polygon(&mut self, points: &[Point2], fill: Fill) {
        if points.len() < 3 {
            return;
        }
        let mut path = self.path(points);
        path.close();
        let paint = self.fill_paint(fill, *path.bounds());
        self.canvas.draw_path(&path, &paint);
    }

    fn doughnut(&mut self, arc: Arc, fill: Fill) {
        let sweep = arc.to_angle - arc.start_angle;
        if sweep <= 0.0 || arc.outer_radius <= 0.0 {
            return;
        }
        let mut path = skia::Path::new();
        let outer = self.oval(arc.center, arc.outer_radius);
        if sweep >= 360.0 {
            path.add_circle(self.pt(arc.center), arc.outer_radius, None);
            if arc.inner_radius > 0.0 {
                path.add_circle(self.pt(arc.center), arc.inner_radius, None);
                path.set_fill_type(skia::PathFillType::EvenOdd);
            }
        } else {
            let start = skia_angle(arc.start_angle);
            path.arc_to(outer, start, sweep, true);
            if arc.inner_radius > 0.0 {
                let inner = self.oval(arc.center, arc.inner_radius);
                path.arc_to(inner, start + sweep, -sweep, false);
            } else {
                path.line_to(self.pt(arc.center));
            }
            path.close();
            if arc.round_cap && arc.inner_radius > 0.0 {
                let mid = (arc.inner_radius + arc.outer_radius) * 0.5;
                let cap = (arc.outer_radius - arc.inner_radius) * 0.5;
                for deg in [arc.start_angle, arc.to_angle] {
                    let p = chartmesh_core::geometry::polar_point(arc.center, mid, deg);
                    path.add_circle(self.pt(p), cap, None);
                }
            }
        }
        let paint = self.fill_paint(fill, outer);
        self.canvas.draw_path(&path, &paint);
    }

    fn dashed_line(&mut self, from: Point2, to: Point2, stroke: Stroke, dash: f32, gap: f32) {
        let (a, b) = (self.pt(from), self.pt(to));
        let mut paint = self.stroke_paint(stroke, a, b);
        if let Some(effect) = skia::PathEffect::dash(&[dash.max(0.5), gap.max(0.5)], 0.0) {
            paint.set_path_effect(effect);
        }
        self.canvas.draw_line(a, b, &paint);
    }

    fn arrow(&mut self, head: ArrowHead, color: Color) {
        let dir = (head.tip - head.from).normalized();
        if dir.length() <= f32::EPSILON {
            return;
        }
        let normal = Point2::new(-dir.y, dir.x);
        let tip = head.tip + dir * head.offset;
        let base = tip - dir * head.height;
        let half = head.width * 0.5;
        let dent = tip - dir * (head.height - head.dent);
        let points = [tip, base + normal * half, dent, base - normal * half];
        self.polygon(&points, Fill::solid(color));
    }

    fn symbol(&mut self, kind: SymbolType, center: Point2, size: f32, fill: Color, border: Option<Stroke>) {
        let c = center;
        let s = size;
        let outline: Option<Vec<Point2>> = match kind {
            SymbolType::None => return,
            SymbolType::Circle | SymbolType::EmptyCircle => None,
            SymbolType::Rect => Some(vec![
                Point2::new(c.x - s, c.y - s),
                Point2::new(c.x + s, c.y - s),
                Point2::new(c.x + s, c.y + s),
                Point2::new(c.x - s, c.y + s),
            ]),
            SymbolType::Triangle => {
                Some(vec![Point2::new(c.x, c.y + s), Point2::new(c.x + s, c.y - s), Point2::new(c.x - s, c.y - s)])
            }
            SymbolType::Diamond => Some(vec![
                Point2::new(c.x, c.y + s),
                Point2::new(c.x + s, c.y),
                Point2::new(c.x, c.y - s),
                Point2::new(c.x - s, c.y),
            ]),
        };
        match outline {
            None => self.circle(center, size, fill, border),
            Some(points) => {
                self.polygon(&points, Fill::solid(fill));
                if let Some(stroke) = border {
                    let mut closed = points.clone();
                    closed.push(points[0]);
                    self.polyline(&closed, stroke);
                }
            }
        }
    }

    fn rect(&mut self, rect: Rect, fill: Fill, border: Option<Stroke>) {
        let r = self.to_rect(rect);
        if !fill.color.is_clear() || fill.to_color.is_some() {
            let paint = self.fill_paint(fill, r);
            self.canvas.draw_rect(r, &paint);
        }
        if let Some(stroke) = border.filter(|s| s.width > 0.0) {
            let paint = self.stroke_paint(stroke, skia::Point::new(r.left, r.top), skia::Point::new(r.left, r.bottom));
            self.canvas.draw_rect(r, &paint);
        }
    }

    fn circle(&mut self, center: Point2, radius: f32, fill: Color, border: Option<Stroke>) {
        let c = self.pt(center);
        if !fill.is_clear() {
            let paint = self.fill_paint(Fill::solid(fill), self.oval(center, radius));
            self.canvas.draw_circle(c, radius, &paint);
        }
        if let Some(stroke) = border.filter(|s| s.width > 0.0) {
            let paint = self.stroke_paint(stroke, c, c);
            self.canvas.draw_circle(c, radius, &paint);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn angles_rotate_to_x_axis() {
        assert_eq!(skia_angle(0.0), -90.0);
        assert_eq!(skia_angle(90.0), 0.0);
    }

    #[test]
    fn colors_keep_channels() {
        let c = to_skia(Color::from_argb(10, 20, 30, 40));
        assert_eq!((c.a(), c.r(), c.g(), c.b()), (10, 20, 30, 40));
    }
}
