// File: crates/chartmesh-core/src/error.rs
// Summary: Frame outcomes (drawn vs. skipped with a reason) and configuration errors.

use thiserror::Error;

/// A referenced component that did not resolve this frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum Missing {
    #[error("x axis {0} not found")]
    XAxis(usize),
    #[error("y axis {0} not found")]
    YAxis(usize),
    #[error("grid {0} not found")]
    Grid(usize),
    #[error("polar coordinate {0} not found")]
    Polar(usize),
    #[error("series {0} not found")]
    Series(usize),
    #[error("series {0} is not drawn on the required coordinate system")]
    Coordinate(usize),
}

/// Geometry that cannot produce a meaningful primitive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum Degenerate {
    #[error("region has no area")]
    EmptyRegion,
    #[error("axis range has zero span")]
    ZeroAxisSpan,
    #[error("no visible data")]
    NoData,
    #[error("non-finite value")]
    NonFinite,
    #[error("ring item maximum is not positive")]
    NonPositiveMax,
}

/// Invalid but tolerated configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum Invalid {
    #[error("mark line group {group} has {members} members, expected 2")]
    MarkLineGroup { group: u32, members: usize },
    #[error("component is hidden")]
    Hidden,
}

/// Why an operation produced nothing this frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum Skip {
    #[error("missing dependency: {0}")]
    MissingDependency(#[from] Missing),
    #[error("degenerate geometry: {0}")]
    Degenerate(#[from] Degenerate),
    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] Invalid),
}

/// Result of a single draw/layout operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawOutcome {
    Drawn,
    Skipped(Skip),
}

impl DrawOutcome {
    pub fn is_drawn(&self) -> bool {
        matches!(self, DrawOutcome::Drawn)
    }

    pub fn skip(&self) -> Option<Skip> {
        match self {
            DrawOutcome::Drawn => None,
            DrawOutcome::Skipped(s) => Some(*s),
        }
    }
}

impl From<Result<(), Skip>> for DrawOutcome {
    fn from(r: Result<(), Skip>) -> Self {
        match r {
            Ok(()) => DrawOutcome::Drawn,
            Err(s) => DrawOutcome::Skipped(s),
        }
    }
}

/// Errors raised by setters and builders given impossible arguments.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("min_show ({min}) must not exceed max_show ({max})")]
    ShowWindow { min: usize, max: usize },
    #[error("max display count must be at least 1")]
    ZeroMaxDisplay,
    #[error("moving average period must be at least 1")]
    ZeroPeriod,
    #[error("data zoom window {start}..{end} is outside 0..=100 or reversed")]
    ZoomWindow { start: f64, end: f64 },
    #[error("series index {0} out of bounds")]
    SeriesIndex(usize),
    #[error("data index {index} out of bounds for series {series}")]
    DataIndex { series: usize, index: usize },
}
