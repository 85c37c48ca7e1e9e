//! Placement of series onto the panel grid.

use std::collections::{BTreeMap, HashMap};

use thiserror::Error;
use tracing::debug;

use super::{AxisRange, Cell, Layout, Panel, Trace, TraceStyle};
use crate::data::Series;

/// Invalid grid shape or panel placement.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("grid must have at least one row and one column, got {rows}x{cols}")]
    EmptyGrid { rows: usize, cols: usize },

    #[error("cell {cell} is outside the {rows}x{cols} grid")]
    OutOfGrid { cell: Cell, rows: usize, cols: usize },

    #[error("cell {cell}: column span must be at least 1")]
    ZeroSpan { cell: Cell },

    #[error("cell {cell}: span of {span} runs past column {cols}")]
    SpanOutOfBounds { cell: Cell, span: usize, cols: usize },

    #[error("cell {cell} is covered by the panel at {owner}")]
    SpannedCell { cell: Cell, owner: Cell },

    #[error("cell {cell}: span of {span} would cover occupied cell {occupied}")]
    Overlap { cell: Cell, span: usize, occupied: Cell },

    #[error("cell {cell}: span {requested} conflicts with existing span {existing}")]
    ConflictingSpan { cell: Cell, existing: usize, requested: usize },

    #[error("cell {cell}: y range {requested:?} conflicts with existing {existing:?}")]
    ConflictingRange { cell: Cell, existing: AxisRange, requested: AxisRange },

    #[error("cell {cell}: invalid y range [{min}, {max}]")]
    InvalidRange { cell: Cell, min: f64, max: f64 },
}

/// A request to draw one series in one panel.
///
/// `col_span` and `y_range` describe the panel rather than the trace; every
/// placement into the same cell must agree on them (or leave them unset).
#[derive(Debug, Clone)]
pub struct Placement {
    pub label: String,
    pub series: Series,
    pub style: TraceStyle,
    pub cell: Cell,
    pub col_span: Option<usize>,
    pub y_range: Option<AxisRange>,
}

impl Placement {
    pub fn new(label: impl Into<String>, series: Series, cell: Cell) -> Self {
        Self {
            label: label.into(),
            series,
            style: TraceStyle::Line,
            cell,
            col_span: None,
            y_range: None,
        }
    }

    pub fn style(mut self, style: TraceStyle) -> Self {
        self.style = style;
        self
    }

    pub fn span(mut self, cols: usize) -> Self {
        self.col_span = Some(cols);
        self
    }

    pub fn y_range(mut self, min: f64, max: f64) -> Self {
        self.y_range = Some(AxisRange::new(min, max));
        self
    }
}

/// Builds a [`Layout`] one placement at a time.
///
/// Every method validates against what has been placed so far and leaves
/// the builder unchanged on error. Callers propagate the first error, so a
/// misconfigured dashboard never reaches [`build`](Self::build).
#[derive(Debug)]
pub struct PanelAssembler {
    rows: usize,
    cols: usize,
    panels: BTreeMap<Cell, Panel>,
    /// Cells covered by a span, mapped to the cell owning the span.
    reserved: HashMap<Cell, Cell>,
}

impl PanelAssembler {
    pub fn new(rows: usize, cols: usize) -> Result<Self, LayoutError> {
        if rows == 0 || cols == 0 {
            return Err(LayoutError::EmptyGrid { rows, cols });
        }
        Ok(Self {
            rows,
            cols,
            panels: BTreeMap::new(),
            reserved: HashMap::new(),
        })
    }

    /// Add a trace to a panel, creating the panel on first use.
    pub fn place(&mut self, placement: Placement) -> Result<(), LayoutError> {
        let cell = placement.cell;
        if let Some(range) = placement.y_range {
            if !range.is_valid() {
                return Err(LayoutError::InvalidRange {
                    cell,
                    min: range.min,
                    max: range.max,
                });
            }
        }
        if let (Some(requested), Some(existing)) = (
            placement.y_range,
            self.panels.get(&cell).and_then(|p| p.y_range),
        ) {
            if requested != existing {
                return Err(LayoutError::ConflictingRange {
                    cell,
                    existing,
                    requested,
                });
            }
        }

        let panel = self.panel_mut(cell, placement.col_span)?;
        if placement.y_range.is_some() {
            panel.y_range = placement.y_range;
        }
        debug!(%cell, label = %placement.label, points = placement.series.len(), "placed trace");
        panel.traces.push(Trace {
            label: placement.label,
            style: placement.style,
            values: placement.series,
        });
        Ok(())
    }

    /// Create an empty panel at `cell`, reserving the cells its span covers.
    ///
    /// Declaring an existing panel again only checks the span agrees.
    pub fn declare(&mut self, cell: Cell, col_span: Option<usize>) -> Result<(), LayoutError> {
        self.panel_mut(cell, col_span).map(|_| ())
    }

    /// Set the title of a panel, declaring it if needed.
    pub fn title(
        &mut self,
        cell: Cell,
        col_span: Option<usize>,
        title: impl Into<String>,
    ) -> Result<(), LayoutError> {
        self.panel_mut(cell, col_span)?.title = Some(title.into());
        Ok(())
    }

    /// Finish assembly.
    pub fn build(self) -> Layout {
        Layout {
            rows: self.rows,
            cols: self.cols,
            panels: self.panels.into_values().collect(),
        }
    }

    fn panel_mut(&mut self, cell: Cell, col_span: Option<usize>) -> Result<&mut Panel, LayoutError> {
        self.check_in_grid(cell)?;
        if let Some(&owner) = self.reserved.get(&cell) {
            return Err(LayoutError::SpannedCell { cell, owner });
        }

        let span = match self.panels.get(&cell).map(|p| p.col_span) {
            Some(existing) => match col_span {
                Some(requested) if requested != existing => {
                    return Err(LayoutError::ConflictingSpan {
                        cell,
                        existing,
                        requested,
                    });
                }
                _ => existing,
            },
            None => {
                let span = col_span.unwrap_or(1);
                self.reserve(cell, span)?;
                span
            }
        };

        Ok(self.panels.entry(cell).or_insert_with(|| Panel::new(cell, span)))
    }

    fn reserve(&mut self, cell: Cell, span: usize) -> Result<(), LayoutError> {
        if span == 0 {
            return Err(LayoutError::ZeroSpan { cell });
        }
        // `cell` is already known to be inside the grid
        if span > self.cols + 1 - cell.col {
            return Err(LayoutError::SpanOutOfBounds {
                cell,
                span,
                cols: self.cols,
            });
        }

        let covered: Vec<Cell> = (cell.col + 1..cell.col + span)
            .map(|col| Cell::new(cell.row, col))
            .collect();
        for &occupied in &covered {
            if self.panels.contains_key(&occupied) || self.reserved.contains_key(&occupied) {
                return Err(LayoutError::Overlap {
                    cell,
                    span,
                    occupied,
                });
            }
        }

        for covered_cell in covered {
            self.reserved.insert(covered_cell, cell);
        }
        Ok(())
    }

    fn check_in_grid(&self, cell: Cell) -> Result<(), LayoutError> {
        if cell.row == 0 || cell.col == 0 || cell.row > self.rows || cell.col > self.cols {
            return Err(LayoutError::OutOfGrid {
                cell,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(())
    }
}

/// Assemble a layout from a batch of placements, failing on the first
/// invalid one.
pub fn assemble(
    rows: usize,
    cols: usize,
    placements: impl IntoIterator<Item = Placement>,
) -> Result<Layout, LayoutError> {
    let mut assembler = PanelAssembler::new(rows, cols)?;
    for placement in placements {
        assembler.place(placement)?;
    }
    Ok(assembler.build())
}
