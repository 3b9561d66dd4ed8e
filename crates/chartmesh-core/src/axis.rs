// File: crates/chartmesh-core/src/axis.rs
// Summary: Axis model (category or value), range policy and per-frame computed range.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AxisKind {
    Category,
    Value,
}

/// How a value axis picks its min/max each frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AxisRange {
    /// Nice-rounded bounds around the visible data, including zero for non-negative data.
    Auto,
    /// Exact visible extremes.
    DataMinMax,
    Fixed { min: f64, max: f64 },
}

#[derive(Clone, Debug)]
pub struct Axis {
    pub label: String,
    pub kind: AxisKind,
    pub range: AxisRange,
    /// Category labels; when empty the series data count is used.
    pub categories: Vec<String>,
    pub inverse: bool,
    /// Category axes only: items sit in the middle of their band.
    pub boundary_gap: bool,
    /// Index of the grid (x/y axes) or polar coordinate (radius/angle axes) this axis belongs to.
    pub coord_index: usize,
    pub show: bool,
    pub split_number: usize,
}

impl Axis {
    pub fn category(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            kind: AxisKind::Category,
            range: AxisRange::Auto,
            categories: Vec::new(),
            inverse: false,
            boundary_gap: true,
            coord_index: 0,
            show: true,
            split_number: 5,
        }
    }

    pub fn value(label: impl Into<String>) -> Self {
        Self { kind: AxisKind::Value, boundary_gap: false, ..Self::category(label) }
    }

    /// Value axis with a fixed range.
    pub fn new(label: impl Into<String>, min: f64, max: f64) -> Self {
        Self::value(label).with_range(AxisRange::Fixed { min, max })
    }

    pub fn with_categories<S: Into<String>>(mut self, categories: impl IntoIterator<Item = S>) -> Self {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_range(mut self, range: AxisRange) -> Self {
        self.range = range;
        self
    }

    pub fn with_inverse(mut self, inverse: bool) -> Self {
        self.inverse = inverse;
        self
    }

    pub fn with_boundary_gap(mut self, gap: bool) -> Self {
        self.boundary_gap = gap;
        self
    }

    pub fn with_coord_index(mut self, index: usize) -> Self {
        self.coord_index = index;
        self
    }

    pub fn is_category(&self) -> bool {
        self.kind == AxisKind::Category
    }

    /// Category label at `index`, if the axis carries labels.
    pub fn category_name(&self, index: usize) -> Option<&str> {
        self.categories.get(index).map(String::as_str)
    }

    /// Resolve the frame range for a value axis from visible data extremes.
    pub fn resolve_range(&self, data_min: f64, data_max: f64) -> (f64, f64) {
        match self.range {
            AxisRange::Fixed { min, max } => (min, max),
            AxisRange::DataMinMax => {
                if data_min.is_finite() && data_max.is_finite() { (data_min, data_max) } else { (0.0, 1.0) }
            }
            AxisRange::Auto => {
                if !data_min.is_finite() || !data_max.is_finite() {
                    return (0.0, 1.0);
                }
                let min = if data_min >= 0.0 { 0.0 } else { -nice_ceil(-data_min) };
                let max = if data_max <= 0.0 { 0.0 } else { nice_ceil(data_max) };
                if (max - min).abs() < 1e-12 { (min, min + 1.0) } else { (min, max) }
            }
        }
    }
}

impl Default for Axis {
    fn default() -> Self {
        Axis::value("")
    }
}

/// Smallest 1/2/5 × 10^k value that is >= `v` (for positive `v`).
pub fn nice_ceil(v: f64) -> f64 {
    if v <= 0.0 || !v.is_finite() {
        return 0.0;
    }
    let magnitude = 10f64.powf(v.log10().floor());
    for step in [1.0, 2.0, 2.5, 5.0, 10.0] {
        let candidate = step * magnitude;
        if candidate >= v - 1e-12 {
            return candidate;
        }
    }
    10.0 * magnitude
}

/// Per-frame computed state of an axis.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AxisFrame {
    pub min: f64,
    pub max: f64,
    /// Pixel width of one category band (or one data step on a value axis).
    pub scale_width: f32,
    /// First visible data index under the data-zoom window.
    pub zoom_start: usize,
    /// Number of visible data items under the data-zoom window.
    pub visible_count: usize,
}

impl AxisFrame {
    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}
