//! Dashboard grid view.
//!
//! Splits the content area evenly into the layout's rows and columns and
//! draws each panel over the cells it spans.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    Frame,
};

use crate::app::App;
use crate::layout::Cell;
use crate::ui::chart;

/// Render the grid, or only the selected panel when zoomed.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    if app.zoomed {
        if let Some(panel) = app.selected() {
            chart::render_panel(frame, panel, true, &app.theme, area);
            return;
        }
    }

    let grid = cell_areas(app.layout.rows(), app.layout.cols(), area);
    for (i, panel) in app.layout.panels().iter().enumerate() {
        if let Some(panel_area) = span_area(&grid, panel.cell, panel.col_span) {
            chart::render_panel(frame, panel, i == app.selected_panel, &app.theme, panel_area);
        }
    }
}

/// Screen areas of every grid cell, indexed `[row - 1][col - 1]`.
pub fn cell_areas(rows: usize, cols: usize, area: Rect) -> Vec<Vec<Rect>> {
    let row_areas = Layout::vertical(vec![Constraint::Ratio(1, rows as u32); rows]).split(area);
    row_areas
        .iter()
        .map(|row| {
            Layout::horizontal(vec![Constraint::Ratio(1, cols as u32); cols])
                .split(*row)
                .to_vec()
        })
        .collect()
}

/// The area covered by a panel at `cell` spanning `span` columns.
pub fn span_area(grid: &[Vec<Rect>], cell: Cell, span: usize) -> Option<Rect> {
    let row = grid.get(cell.row.checked_sub(1)?)?;
    let first = row.get(cell.col.checked_sub(1)?)?;
    let last = row.get(cell.col.checked_add(span)?.checked_sub(2)?)?;
    Some(first.union(*last))
}
