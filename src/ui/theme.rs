//! Theme configuration for the TUI.
//!
//! Supports light and dark themes with automatic terminal detection.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::block::BorderType;

/// Color and style theme for the TUI.
///
/// Use [`Theme::auto_detect()`] for automatic theme selection based on
/// terminal background, or [`Theme::dark()`]/[`Theme::light()`] explicitly.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Accent color for the selected panel and overlays.
    pub highlight: Color,
    /// Color for unselected panel borders.
    pub border: Color,
    /// Color for axis lines and labels.
    pub axis: Color,
    /// Style for panel titles and the header.
    pub header: Style,
    /// Colors cycled through for the traces of one panel.
    pub palette: Vec<Color>,
    /// Border style (rounded, plain, etc.).
    pub border_type: BorderType,
}

impl Theme {
    /// Create a dark theme suitable for dark terminal backgrounds.
    pub fn dark() -> Self {
        Self {
            highlight: Color::Cyan,
            border: Color::Gray,
            axis: Color::DarkGray,
            header: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            palette: vec![
                Color::Cyan,
                Color::Yellow,
                Color::Magenta,
                Color::Green,
                Color::LightRed,
                Color::LightBlue,
                Color::White,
                Color::LightYellow,
                Color::LightGreen,
                Color::LightMagenta,
            ],
            border_type: BorderType::Rounded,
        }
    }

    /// Create a light theme suitable for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            highlight: Color::Blue,
            border: Color::DarkGray,
            axis: Color::Gray,
            header: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            palette: vec![
                Color::Blue,
                Color::Red,
                Color::Magenta,
                Color::Green,
                Color::Black,
                Color::Cyan,
                Color::DarkGray,
                Color::LightRed,
                Color::LightBlue,
                Color::Yellow,
            ],
            border_type: BorderType::Rounded,
        }
    }

    /// Auto-detect based on terminal background
    pub fn auto_detect() -> Self {
        // Use terminal-light crate to detect background luminance
        match terminal_light::luma() {
            Ok(luma) if luma > 0.5 => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Style for the `index`-th trace of a panel.
    pub fn trace_style(&self, index: usize) -> Style {
        match self.palette.get(index % self.palette.len().max(1)) {
            Some(&color) => Style::default().fg(color),
            None => Style::default(),
        }
    }

    /// Border style for a panel, depending on selection.
    pub fn panel_border(&self, selected: bool) -> Style {
        if selected {
            Style::default().fg(self.highlight).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.border)
        }
    }
}
