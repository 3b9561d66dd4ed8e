// File: crates/chartmesh-core/src/types.rs
// Summary: Shared types and constants (sizes, insets, layers, engine settings).

/// Default chart width in pixels.
pub const WIDTH: f32 = 1024.0;
/// Default chart height in pixels.
pub const HEIGHT: f32 = 640.0;

/// Margins of a region inside the chart.
/// Values in `0.0..=1.0` are fractions of the chart size, larger values are pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Insets {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Insets {
    pub const fn new(left: f32, right: f32, top: f32, bottom: f32) -> Self {
        Self { left, right, top, bottom }
    }

    pub fn left_px(&self, chart_width: f32) -> f32 { resolve_length(self.left, chart_width) }
    pub fn right_px(&self, chart_width: f32) -> f32 { resolve_length(self.right, chart_width) }
    pub fn top_px(&self, chart_height: f32) -> f32 { resolve_length(self.top, chart_height) }
    pub fn bottom_px(&self, chart_height: f32) -> f32 { resolve_length(self.bottom, chart_height) }
}

impl Default for Insets {
    fn default() -> Self {
        Self::new(72.0, 24.0, 48.0, 56.0)
    }
}

/// Fraction-or-pixel length resolution shared by insets, centers and radii.
pub fn resolve_length(value: f32, total: f32) -> f32 {
    if value > 0.0 && value <= 1.0 { value * total } else { value }
}

/// Drawing layers with independent dirty flags.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Layer {
    /// Grid background and mark areas.
    Base,
    /// Series geometry.
    Content,
    /// Symbols over stacks, mark lines, legend and tooltip.
    Top,
}

impl Layer {
    pub const ALL: [Layer; 3] = [Layer::Base, Layer::Content, Layer::Top];

    pub(crate) fn bit(self) -> u8 {
        match self {
            Layer::Base => 0b001,
            Layer::Content => 0b010,
            Layer::Top => 0b100,
        }
    }
}

/// Engine tunables.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChartSettings {
    /// Bezier control distance factor for smoothed lines.
    pub line_smoothness: f32,
    /// Target pixel length of one subdivided bezier step.
    pub line_segment_distance: f32,
    /// Arc tessellation hint forwarded to doughnut/circle primitives.
    pub circle_smoothness: f32,
    /// Grow-in animation duration in seconds.
    pub growth_duration: f32,
    /// Data-change transition duration in seconds.
    pub update_duration: f32,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            line_smoothness: 0.4,
            line_segment_distance: 3.0,
            circle_smoothness: 2.0,
            growth_duration: 1.0,
            update_duration: 0.5,
        }
    }
}
