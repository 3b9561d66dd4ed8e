// File: crates/chartmesh-core/src/legend.rs
// Summary: Legend items, flow-wrap layout into rows/columns, nine-way anchoring and drawing.
// Notes:
// - Layout runs in two passes: measure row (or column) extents, then place items.
// - Item positions are bottom-left corners in chart space (y-up).

use std::ops::Range;

use crate::draw::{DrawSink, Fill};
use crate::geometry::{Point2, Rect, Size};
use crate::series::{Series, SeriesKind};
use crate::text::{TextAlign, TextHost, TextStyle};
use crate::theme::Theme;
use crate::types::Insets;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orient {
    Horizontal,
    Vertical,
}

/// Anchor of the legend block inside the chart.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Location {
    TopLeft,
    Top,
    TopRight,
    Left,
    Center,
    Right,
    BottomLeft,
    Bottom,
    BottomRight,
}

impl Location {
    /// Horizontal fraction of the free space left of the block (0 left, 0.5 center, 1 right).
    fn column(self) -> f32 {
        match self {
            Location::TopLeft | Location::Left | Location::BottomLeft => 0.0,
            Location::Top | Location::Center | Location::Bottom => 0.5,
            Location::TopRight | Location::Right | Location::BottomRight => 1.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Legend {
    pub show: bool,
    pub orient: Orient,
    pub location: Location,
    pub insets: Insets,
    pub item_gap: f32,
    pub icon: Size,
    pub icon_text_gap: f32,
    pub font_size: Option<f32>,
}

impl Default for Legend {
    fn default() -> Self {
        Self {
            show: true,
            orient: Orient::Horizontal,
            location: Location::Top,
            insets: Insets::new(10.0, 10.0, 10.0, 10.0),
            item_gap: 10.0,
            icon: Size::new(25.0, 12.0),
            icon_text_gap: 5.0,
            font_size: None,
        }
    }
}

impl Legend {
    pub fn with_location(mut self, location: Location) -> Self {
        self.location = location;
        self
    }

    pub fn with_orient(mut self, orient: Orient) -> Self {
        self.orient = orient;
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LegendItem {
    pub name: String,
    /// Palette index; equals the position in the legend name list.
    pub color_index: usize,
    pub active: bool,
    pub highlighted: bool,
    pub size: Size,
    pub position: Point2,
}

impl LegendItem {
    pub fn rect(&self) -> Rect {
        Rect::new(self.position.x, self.position.y, self.size.width, self.size.height)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct LegendLayout {
    pub items: Vec<LegendItem>,
    /// Item ranges per row (horizontal) or column (vertical).
    pub rows: Vec<Range<usize>>,
    pub bounds: Rect,
}

impl LegendLayout {
    /// Index of the item under `pointer`.
    pub fn hit(&self, pointer: Point2) -> Option<usize> {
        self.items.iter().position(|it| it.rect().contains(pointer))
    }
}

/// Deduplicated legend names in series order: series names for lines, data names for rings.
pub fn legend_names(series: &[Series]) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for s in series {
        for name in s.legend_names() {
            if !name.is_empty() && !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
        }
    }
    names
}

/// Whether anything carrying legend `name` is currently shown.
pub fn is_active(series: &[Series], name: &str) -> bool {
    series.iter().any(|s| match s.kind {
        SeriesKind::Ring(_) => s.data.iter().any(|d| d.name == name && d.show),
        SeriesKind::Line(_) => s.name == name && s.show,
    })
}

/// Split `extents` into runs whose summed extent (plus gaps) stays within `max`.
/// A run always holds at least one item.
pub fn flow_rows(extents: &[f32], max: f32, gap: f32) -> Vec<Range<usize>> {
    let mut rows = Vec::new();
    let mut start = 0;
    let mut running = 0.0f32;
    for (i, w) in extents.iter().copied().enumerate() {
        if running > 0.0 && running + w > max {
            rows.push(start..i);
            start = i;
            running = 0.0;
        }
        running += w + gap;
    }
    if start < extents.len() {
        rows.push(start..extents.len());
    }
    rows
}

pub fn layout(
    legend: &Legend,
    names: &[String],
    series: &[Series],
    hovered: Option<usize>,
    chart: Size,
    theme: &Theme,
    text: &dyn TextHost,
) -> LegendLayout {
    let style = TextStyle::new(legend.font_size.unwrap_or(theme.font_size), theme.legend_text);
    let mut items: Vec<LegendItem> = names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let t = text.measure(name, &style);
            LegendItem {
                name: name.clone(),
                color_index: i,
                active: is_active(series, name),
                highlighted: hovered == Some(i),
                size: Size::new(legend.icon.width + legend.icon_text_gap + t.width, legend.icon.height.max(t.height)),
                position: Point2::ZERO,
            }
        })
        .collect();
    if items.is_empty() {
        return LegendLayout::default();
    }

    let left = legend.insets.left_px(chart.width);
    let right = legend.insets.right_px(chart.width);
    let top = legend.insets.top_px(chart.height);
    let bottom = legend.insets.bottom_px(chart.height);
    let gap = legend.item_gap;
    let horizontal = legend.orient == Orient::Horizontal;

    // pass 1: runs and their extents
    let (extents, max): (Vec<f32>, f32) = if horizontal {
        (items.iter().map(|it| it.size.width).collect(), chart.width - left - right)
    } else {
        (items.iter().map(|it| it.size.height).collect(), chart.height - top - bottom)
    };
    let rows = flow_rows(&extents, max, gap);
    let run_len = |r: &Range<usize>| extents[r.clone()].iter().sum::<f32>() + gap * (r.len().saturating_sub(1)) as f32;
    let run_thickness = |r: &Range<usize>| {
        items[r.clone()]
            .iter()
            .map(|it| if horizontal { it.size.height } else { it.size.width })
            .fold(0.0f32, f32::max)
    };
    let lens: Vec<f32> = rows.iter().map(run_len).collect();
    let thicknesses: Vec<f32> = rows.iter().map(run_thickness).collect();
    let along = lens.iter().copied().fold(0.0f32, f32::max);
    let across = thicknesses.iter().sum::<f32>() + gap * rows.len().saturating_sub(1) as f32;
    let block = if horizontal { Size::new(along, across) } else { Size::new(across, along) };

    let x0 = match legend.location.column() {
        c if c == 0.0 => left,
        c if c == 1.0 => chart.width - right - block.width,
        _ => (chart.width - block.width) * 0.5,
    };
    let block_top = match legend.location {
        Location::TopLeft | Location::Top | Location::TopRight => chart.height - top,
        Location::Left | Location::Center | Location::Right => chart.height * 0.5 + block.height * 0.5,
        Location::BottomLeft | Location::Bottom | Location::BottomRight => block.height + bottom,
    };

    // pass 2: place
    let mut cross = 0.0f32;
    for (ri, r) in rows.iter().enumerate() {
        let mut run = 0.0f32;
        if horizontal {
            let shift = (block.width - lens[ri]) * legend.location.column();
            for it in &mut items[r.clone()] {
                let row_top = block_top - cross;
                it.position = Point2::new(x0 + shift + run, row_top - it.size.height);
                run += it.size.width + gap;
            }
        } else {
            for it in &mut items[r.clone()] {
                it.position = Point2::new(x0 + cross, block_top - run - it.size.height);
                run += it.size.height + gap;
            }
        }
        cross += thicknesses[ri] + gap;
    }

    LegendLayout { items, rows, bounds: Rect::new(x0, block_top - block.height, block.width, block.height) }
}

pub fn draw(legend: &Legend, layout: &LegendLayout, theme: &Theme, sink: &mut dyn DrawSink, text: &mut dyn TextHost) {
    let font_size = legend.font_size.unwrap_or(theme.font_size);
    for it in &layout.items {
        let mut color = if it.active { theme.color(it.color_index) } else { theme.legend_unable };
        if it.highlighted && it.active {
            color = color.lighten(0.2);
        }
        let icon_y = it.position.y + (it.size.height - legend.icon.height) * 0.5;
        sink.rect(Rect::new(it.position.x, icon_y, legend.icon.width, legend.icon.height), Fill::solid(color), None);
        let text_color = if it.active { theme.legend_text } else { theme.legend_unable };
        let style = TextStyle::new(font_size, text_color).with_align(TextAlign::Left);
        let at = Point2::new(it.position.x + legend.icon.width + legend.icon_text_gap, it.position.y + it.size.height * 0.5);
        text.draw_text(at, &it.name, &style);
    }
}
