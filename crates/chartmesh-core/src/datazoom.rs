// File: crates/chartmesh-core/src/datazoom.rs
// Summary: Data-zoom window: the visible sub-range of a series, shared by the axes it filters.

use std::ops::Range;

use crate::error::ConfigError;

#[derive(Clone, Debug, PartialEq)]
pub struct DataZoom {
    /// Window start in percent of the data length (0..=100).
    pub start: f64,
    /// Window end in percent of the data length (0..=100).
    pub end: f64,
    pub x_axis_indices: Vec<usize>,
    pub y_axis_indices: Vec<usize>,
    /// Minimum number of items kept visible regardless of the window.
    pub min_show_num: usize,
}

impl DataZoom {
    pub fn new(start: f64, end: f64) -> Result<Self, ConfigError> {
        let mut z = Self { start: 0.0, end: 100.0, x_axis_indices: vec![0], y_axis_indices: Vec::new(), min_show_num: 1 };
        z.set_window(start, end)?;
        Ok(z)
    }

    pub fn with_x_axes(mut self, indices: impl IntoIterator<Item = usize>) -> Self {
        self.x_axis_indices = indices.into_iter().collect();
        self
    }

    pub fn with_y_axes(mut self, indices: impl IntoIterator<Item = usize>) -> Self {
        self.y_axis_indices = indices.into_iter().collect();
        self
    }

    pub fn set_window(&mut self, start: f64, end: f64) -> Result<(), ConfigError> {
        if !(0.0..=100.0).contains(&start) || !(0.0..=100.0).contains(&end) || start > end {
            return Err(ConfigError::ZoomWindow { start, end });
        }
        self.start = start;
        self.end = end;
        Ok(())
    }

    pub fn covers_x(&self, axis: usize) -> bool {
        self.x_axis_indices.contains(&axis)
    }

    pub fn covers_y(&self, axis: usize) -> bool {
        self.y_axis_indices.contains(&axis)
    }

    /// Visible index window for a list of `len` items. Never empty when `len > 0`.
    pub fn visible_range(&self, len: usize) -> Range<usize> {
        if len == 0 {
            return 0..0;
        }
        let n = len as f64;
        let mut start = ((n * self.start / 100.0).floor() as usize).min(len - 1);
        let mut end = ((n * self.end / 100.0).ceil() as usize).clamp(start + 1, len);
        let min_show = self.min_show_num.max(1).min(len);
        if end - start < min_show {
            end = (start + min_show).min(len);
            start = end - min_show;
        }
        start..end
    }
}

impl Default for DataZoom {
    fn default() -> Self {
        Self { start: 0.0, end: 100.0, x_axis_indices: vec![0], y_axis_indices: Vec::new(), min_show_num: 1 }
    }
}

/// Visible window for `len` items under an optional zoom.
pub fn visible_range(zoom: Option<&DataZoom>, len: usize) -> Range<usize> {
    match zoom {
        Some(z) => z.visible_range(len),
        None => 0..len,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_window() {
        let z = DataZoom::default();
        assert_eq!(z.visible_range(10), 0..10);
        assert_eq!(z.visible_range(0), 0..0);
    }

    #[test]
    fn partial_window() {
        let z = DataZoom::new(20.0, 50.0).unwrap();
        assert_eq!(z.visible_range(10), 2..5);
    }

    #[test]
    fn min_show_expands() {
        let mut z = DataZoom::new(90.0, 90.0).unwrap();
        z.min_show_num = 3;
        assert_eq!(z.visible_range(10), 7..10);
    }

    #[test]
    fn rejects_reversed() {
        assert!(DataZoom::new(60.0, 10.0).is_err());
    }
}
