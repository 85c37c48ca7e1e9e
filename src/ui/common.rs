//! Common UI components shared across views.
//!
//! This module contains the header bar, status bar, and help overlay.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::App;

/// Render the header bar.
///
/// Displays: dashboard title, data source, tick count, panel and trace totals.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let layout = &app.layout;
    let line = Line::from(vec![
        Span::styled(format!(" {} ", app.title), app.theme.header),
        Span::raw("│ "),
        Span::raw(app.source_description().to_string()),
        Span::raw(" │ "),
        Span::styled(
            format!("{}", app.ticks),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(" ticks │ "),
        Span::styled(
            format!("{}", layout.panels().len()),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(
            " panels {}x{} │ {} traces",
            layout.rows(),
            layout.cols(),
            layout.trace_count()
        )),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

/// Render the status bar at the bottom.
///
/// Shows: breadcrumb trail and available controls, or a temporary status
/// message if one is set.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    let controls = if app.zoomed {
        "Esc:back Tab:next e:export ?:help q:quit"
    } else {
        "Tab:next Enter:zoom e:export ?:help q:quit"
    };
    let status = format!(" {} | {}", app.breadcrumb(), controls);

    let paragraph = Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));
    frame.render_widget(paragraph, area);
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the current view.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Navigation",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  Tab/→/↓     Next panel"),
        Line::from("  S-Tab/←/↑   Previous panel"),
        Line::from("  Enter       Zoom selected panel"),
        Line::from("  Esc         Back to grid"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " General",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  e           Export layout to JSON"),
        Line::from("  q           Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(help_text).block(block);

    // Center the help overlay - responsive to terminal size
    let help_width = 42u16.min(area.width.saturating_sub(4));
    let help_height = 16u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    // Clear the area behind the help
    frame.render_widget(Clear, help_area);
    frame.render_widget(paragraph, help_area);
}
