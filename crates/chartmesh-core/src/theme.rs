// File: crates/chartmesh-core/src/theme.rs
// Summary: Light/Dark themes: series palette, component colors and default sizes.

/// 8-bit RGBA color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const CLEAR: Self = Self::from_argb(0, 0, 0, 0);
    pub const WHITE: Self = Self::from_argb(255, 255, 255, 255);
    pub const BLACK: Self = Self::from_argb(255, 0, 0, 0);

    pub const fn from_argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub fn is_clear(&self) -> bool {
        self.a == 0
    }

    pub fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Lighten toward white by `t` in `0.0..=1.0` (used for highlight colors).
    pub fn lighten(self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |c: u8| (c as f32 + (255.0 - c as f32) * t).round() as u8;
        Self { r: mix(self.r), g: mix(self.g), b: mix(self.b), a: self.a }
    }
}

#[derive(Clone, Debug)]
pub struct Theme {
    pub name: &'static str,
    pub background: Color,
    pub palette: Vec<Color>,
    pub grid_border: Color,
    pub axis_line: Color,
    pub split_line: Color,
    pub axis_label: Color,
    pub legend_text: Color,
    pub legend_unable: Color,
    pub tooltip_background: Color,
    pub tooltip_border: Color,
    pub tooltip_text: Color,
    pub mark_label: Color,
    pub font_size: f32,
    pub line_width: f32,
    pub axis_line_width: f32,
    pub symbol_size: f32,
    pub symbol_selected_size: f32,
    pub symbol_border_width: f32,
}

impl Theme {
    /// Palette color for a legend/data index, wrapping around.
    pub fn color(&self, index: usize) -> Color {
        if self.palette.is_empty() {
            return Color::BLACK;
        }
        self.palette[index % self.palette.len()]
    }

    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: Color::from_argb(255, 18, 18, 20),
            palette: vec![
                Color::from_argb(255, 64, 160, 255),
                Color::from_argb(255, 40, 200, 120),
                Color::from_argb(255, 255, 200, 60),
                Color::from_argb(255, 220, 80, 80),
                Color::from_argb(255, 150, 110, 230),
                Color::from_argb(255, 60, 200, 210),
                Color::from_argb(255, 240, 130, 50),
            ],
            grid_border: Color::from_argb(255, 40, 40, 45),
            axis_line: Color::from_argb(255, 180, 180, 190),
            split_line: Color::from_argb(255, 40, 40, 45),
            axis_label: Color::from_argb(255, 235, 235, 245),
            legend_text: Color::from_argb(255, 210, 210, 220),
            legend_unable: Color::from_argb(255, 90, 90, 95),
            tooltip_background: Color::from_argb(230, 30, 30, 34),
            tooltip_border: Color::from_argb(255, 70, 70, 78),
            tooltip_text: Color::from_argb(255, 235, 235, 245),
            mark_label: Color::from_argb(255, 210, 210, 220),
            font_size: 14.0,
            line_width: 2.0,
            axis_line_width: 1.0,
            symbol_size: 4.0,
            symbol_selected_size: 8.0,
            symbol_border_width: 1.0,
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light",
            background: Color::from_argb(255, 250, 250, 252),
            palette: vec![
                Color::from_argb(255, 32, 120, 200),
                Color::from_argb(255, 20, 160, 90),
                Color::from_argb(255, 230, 160, 20),
                Color::from_argb(255, 200, 60, 60),
                Color::from_argb(255, 120, 80, 200),
                Color::from_argb(255, 30, 160, 170),
                Color::from_argb(255, 220, 110, 30),
            ],
            grid_border: Color::from_argb(255, 230, 230, 235),
            axis_line: Color::from_argb(255, 60, 60, 70),
            split_line: Color::from_argb(255, 230, 230, 235),
            axis_label: Color::from_argb(255, 20, 20, 30),
            legend_text: Color::from_argb(255, 40, 40, 50),
            legend_unable: Color::from_argb(255, 190, 190, 195),
            tooltip_background: Color::from_argb(240, 255, 255, 255),
            tooltip_border: Color::from_argb(255, 230, 230, 230),
            tooltip_text: Color::from_argb(255, 20, 20, 30),
            mark_label: Color::from_argb(255, 60, 60, 70),
            font_size: 14.0,
            line_width: 2.0,
            axis_line_width: 1.0,
            symbol_size: 4.0,
            symbol_selected_size: 8.0,
            symbol_border_width: 1.0,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::dark()
    }
}

/// Return a list of built-in theme presets.
pub fn presets() -> Vec<Theme> {
    vec![Theme::dark(), Theme::light()]
}

/// Find a theme by its `name`, falling back to dark.
pub fn find(name: &str) -> Theme {
    for t in presets() { if t.name.eq_ignore_ascii_case(name) { return t; } }
    Theme::dark()
}
