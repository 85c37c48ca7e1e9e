//! Dashboard layout descriptors.
//!
//! A [`Layout`] is the single artifact handed to a renderer: a grid of
//! panels, each holding labelled references to already computed series. It
//! is built with [`PanelAssembler`], which validates every placement, and is
//! immutable afterwards.

mod assembler;

pub use assembler::{assemble, LayoutError, PanelAssembler, Placement};

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::data::Series;

/// A grid position, 1-based in both directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Explicit y-axis bounds for a panel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

impl AxisRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min < self.max
    }
}

/// How a trace is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceStyle {
    /// One point per tick, x is the 1-based tick number.
    #[default]
    Line,
    /// One bar per window, x is the 0-based window index.
    Bar,
}

/// A labelled series inside a panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trace {
    pub label: String,
    pub style: TraceStyle,
    pub values: Series,
}

impl Trace {
    /// The x coordinate of element `index`.
    pub fn x(&self, index: usize) -> f64 {
        match self.style {
            TraceStyle::Line => (index + 1) as f64,
            TraceStyle::Bar => index as f64,
        }
    }

    /// `(x, y)` pairs ready for plotting.
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.values.iter().enumerate().map(|(i, &y)| (self.x(i), y)).collect()
    }
}

/// One dashboard cell, possibly spanning several columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Panel {
    pub cell: Cell,
    pub col_span: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_range: Option<AxisRange>,
    pub traces: Vec<Trace>,
}

impl Panel {
    fn new(cell: Cell, col_span: usize) -> Self {
        Self {
            cell,
            col_span,
            title: None,
            y_range: None,
            traces: Vec::new(),
        }
    }

    /// Range of x values covered by any trace, or `None` if all are empty.
    pub fn x_bounds(&self) -> Option<(f64, f64)> {
        self.traces
            .iter()
            .filter(|t| !t.values.is_empty())
            .map(|t| (t.x(0), t.x(t.values.len() - 1)))
            .reduce(|(lo, hi), (a, b)| (lo.min(a), hi.max(b)))
    }

    /// Range of y values across all traces, or `None` if all are empty.
    pub fn y_bounds(&self) -> Option<(f64, f64)> {
        self.traces
            .iter()
            .filter_map(|t| t.values.bounds())
            .reduce(|(lo, hi), (a, b)| (lo.min(a), hi.max(b)))
    }
}

/// A complete, validated dashboard layout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    rows: usize,
    cols: usize,
    panels: Vec<Panel>,
}

impl Layout {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Panels in row-major order.
    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    pub fn panel(&self, cell: Cell) -> Option<&Panel> {
        self.panels.iter().find(|p| p.cell == cell)
    }

    /// Total number of traces across all panels.
    pub fn trace_count(&self) -> usize {
        self.panels.iter().map(|p| p.traces.len()).sum()
    }
}
