//! Panel rendering: one ratatui [`Chart`] per layout panel.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    symbols,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

use crate::layout::{Panel, TraceStyle};
use crate::ui::Theme;

/// Render `panel` into `area`.
pub fn render_panel(frame: &mut Frame, panel: &Panel, selected: bool, theme: &Theme, area: Rect) {
    let title = match &panel.title {
        Some(title) => format!(" {} ", title),
        None => format!(" {} ", panel.cell),
    };
    let block = Block::default()
        .title(Span::styled(title, theme.header))
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(theme.panel_border(selected));

    if panel.traces.iter().all(|t| t.values.is_empty()) {
        let paragraph = Paragraph::new("no data")
            .alignment(Alignment::Center)
            .style(Style::default().add_modifier(Modifier::DIM))
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    // Datasets borrow their points, so these must outlive the chart.
    let points: Vec<Vec<(f64, f64)>> = panel.traces.iter().map(|t| t.points()).collect();
    let datasets: Vec<Dataset> = panel
        .traces
        .iter()
        .zip(&points)
        .enumerate()
        .map(|(i, (trace, data))| {
            let graph_type = match trace.style {
                TraceStyle::Line => GraphType::Line,
                TraceStyle::Bar => GraphType::Bar,
            };
            Dataset::default()
                .name(trace.label.clone())
                .marker(symbols::Marker::Braille)
                .graph_type(graph_type)
                .style(theme.trace_style(i))
                .data(data)
        })
        .collect();

    let (x, y) = axis_bounds(panel);
    let axis_style = Style::default().fg(theme.axis);
    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .style(axis_style)
                .bounds(x)
                .labels(axis_labels(x)),
        )
        .y_axis(
            Axis::default()
                .style(axis_style)
                .bounds(y)
                .labels(axis_labels(y)),
        );

    frame.render_widget(chart, area);
}

/// Axis bounds for a panel as `(x, y)`.
///
/// A configured y range wins. Otherwise the data range is padded by 5% so
/// extreme points do not sit on the frame; flat or empty data gets a unit
/// range around it. Bar panels get half a slot on either side.
pub fn axis_bounds(panel: &Panel) -> ([f64; 2], [f64; 2]) {
    let bars = panel.traces.iter().any(|t| t.style == TraceStyle::Bar);
    let x = match panel.x_bounds() {
        Some((lo, hi)) if bars => [lo - 0.5, hi + 0.5],
        Some((lo, hi)) if lo < hi => [lo, hi],
        Some((lo, _)) => [lo - 0.5, lo + 0.5],
        None => [0.0, 1.0],
    };

    let y = match (panel.y_range, panel.y_bounds()) {
        (Some(range), _) => [range.min, range.max],
        (None, Some((lo, hi))) if lo < hi => {
            let pad = (hi - lo) * 0.05;
            [lo - pad, hi + pad]
        }
        (None, Some((lo, _))) => [lo - 1.0, lo + 1.0],
        (None, None) => [0.0, 1.0],
    };

    (x, y)
}

fn axis_labels(bounds: [f64; 2]) -> Vec<String> {
    let mid = (bounds[0] + bounds[1]) / 2.0;
    [bounds[0], mid, bounds[1]].iter().map(|v| format_value(*v)).collect()
}

/// Format an axis value compactly (e.g., 1234 -> "1.2K", 0.25 -> "0.25").
fn format_value(v: f64) -> String {
    let abs = v.abs();
    if abs >= 1_000_000.0 {
        format!("{:.1}M", v / 1_000_000.0)
    } else if abs >= 1_000.0 {
        format!("{:.1}K", v / 1_000.0)
    } else if abs >= 10.0 || v == v.trunc() {
        format!("{:.0}", v)
    } else {
        format!("{:.2}", v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Series;
    use crate::layout::{assemble, Cell, Placement};

    fn single_panel(placement: Placement) -> Panel {
        let layout = assemble(1, 1, vec![placement]).unwrap();
        layout.panels()[0].clone()
    }

    #[test]
    fn test_axis_bounds_padded_line() {
        let panel = single_panel(Placement::new(
            "adds",
            Series::from(vec![0.0, 100.0, 50.0]),
            Cell::new(1, 1),
        ));
        let (x, y) = axis_bounds(&panel);
        assert_eq!(x, [1.0, 3.0]);
        assert!((y[0] + 5.0).abs() < 1e-9);
        assert!((y[1] - 105.0).abs() < 1e-9);
    }

    #[test]
    fn test_axis_bounds_explicit_range() {
        let panel = single_panel(
            Placement::new("rate", Series::from(vec![10.0, 20.0]), Cell::new(1, 1))
                .y_range(0.0, 3000.0),
        );
        assert_eq!(axis_bounds(&panel).1, [0.0, 3000.0]);
    }

    #[test]
    fn test_axis_bounds_bars_and_flat_data() {
        let panel = single_panel(
            Placement::new("growth", Series::from(vec![2.0, 2.0]), Cell::new(1, 1))
                .style(TraceStyle::Bar),
        );
        let (x, y) = axis_bounds(&panel);
        assert_eq!(x, [-0.5, 1.5]);
        assert_eq!(y, [1.0, 3.0]);
    }

    #[test]
    fn test_axis_bounds_single_point() {
        let panel = single_panel(Placement::new(
            "one",
            Series::from(vec![7.0]),
            Cell::new(1, 1),
        ));
        assert_eq!(axis_bounds(&panel), ([0.5, 1.5], [6.0, 8.0]));
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(0.0), "0");
        assert_eq!(format_value(2.5), "2.50");
        assert_eq!(format_value(-5.0), "-5");
        assert_eq!(format_value(1500.0), "1.5K");
        assert_eq!(format_value(2_500_000.0), "2.5M");
    }
}
