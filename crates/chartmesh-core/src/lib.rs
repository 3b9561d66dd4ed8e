// File: crates/chartmesh-core/src/lib.rs
// Summary: Core library entry point; exports the chart container, configuration types and draw/text traits.

pub mod animation;
pub mod axis;
pub mod chart;
pub mod context;
pub mod datazoom;
pub mod downsample;
pub mod draw;
pub mod error;
pub mod format;
pub mod geometry;
pub mod grid;
pub mod interaction;
pub mod layout;
pub mod legend;
pub mod mark;
pub mod render;
pub mod scale;
pub mod series;
pub mod stack;
pub mod text;
pub mod theme;
pub mod tooltip;
pub mod types;

pub use axis::{Axis, AxisKind, AxisRange};
pub use chart::{Chart, Component};
pub use context::{ChartContext, ChartFrame, PointContext, SeriesFrame, SeriesState};
pub use datazoom::DataZoom;
pub use downsample::SampleType;
pub use draw::{DrawCommand, DrawList, DrawSink, Fill, Stroke};
pub use error::{ConfigError, DrawOutcome, Skip};
pub use geometry::{Point2, Rect, Size};
pub use grid::{GridCoord, PolarCoord};
pub use legend::{Legend, Location, Orient};
pub use mark::{MarkArea, MarkAreaData, MarkLine, MarkLineData, MarkType};
pub use series::{CoordRef, Label, LabelPosition, LineOptions, RingOptions, SerieData, Series, SeriesKind};
pub use text::{FixedAdvanceText, TextAlign, TextHost, TextStyle};
pub use theme::{Color, Theme};
pub use tooltip::{Tooltip, TooltipTrigger};
pub use types::{ChartSettings, Insets, Layer};
