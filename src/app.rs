//! Application state and navigation logic.

use std::io::Write;
use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::layout::{Layout, Panel};
use crate::ui::Theme;

/// How long a status message stays visible.
const STATUS_TIMEOUT: Duration = Duration::from_secs(3);

/// Main application state.
///
/// The layout is computed once before the TUI starts; the viewer only
/// changes which panel is selected and whether it fills the screen.
pub struct App {
    pub running: bool,
    pub show_help: bool,
    /// Whether the selected panel fills the content area.
    pub zoomed: bool,

    pub layout: Layout,
    /// Dashboard title shown in the header.
    pub title: String,
    source: String,
    /// Number of snapshots the layout was derived from.
    pub ticks: usize,

    // Index into `layout.panels()`
    pub selected_panel: usize,

    pub theme: Theme,

    pub status_message: Option<(String, Instant)>,
}

impl App {
    pub fn new(
        layout: Layout,
        title: impl Into<String>,
        source: impl Into<String>,
        ticks: usize,
        theme: Theme,
    ) -> Self {
        Self {
            running: true,
            show_help: false,
            zoomed: false,
            layout,
            title: title.into(),
            source: source.into(),
            ticks,
            selected_panel: 0,
            theme,
            status_message: None,
        }
    }

    /// Returns a description of where the snapshots came from.
    pub fn source_description(&self) -> &str {
        &self.source
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired.
    pub fn get_status_message(&self) -> Option<&str> {
        match &self.status_message {
            Some((msg, time)) if time.elapsed() < STATUS_TIMEOUT => Some(msg),
            _ => None,
        }
    }

    /// The currently selected panel, if the layout has any.
    pub fn selected(&self) -> Option<&Panel> {
        self.layout.panels().get(self.selected_panel)
    }

    /// Move selection to the next panel, wrapping around.
    pub fn select_next(&mut self) {
        let count = self.layout.panels().len();
        if count > 0 {
            self.selected_panel = (self.selected_panel + 1) % count;
        }
    }

    /// Move selection to the previous panel, wrapping around.
    pub fn select_prev(&mut self) {
        let count = self.layout.panels().len();
        if count > 0 {
            self.selected_panel = (self.selected_panel + count - 1) % count;
        }
    }

    pub fn toggle_zoom(&mut self) {
        if self.selected().is_some() {
            self.zoomed = !self.zoomed;
        }
    }

    /// Leave zoom. Returns false if there was nothing to go back from.
    pub fn unzoom(&mut self) -> bool {
        std::mem::replace(&mut self.zoomed, false)
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Get breadcrumb trail for current navigation.
    pub fn breadcrumb(&self) -> String {
        match self.selected() {
            Some(panel) => {
                let name = panel.title.clone().unwrap_or_else(|| panel.cell.to_string());
                if self.zoomed {
                    format!("{} > {}", self.title, name)
                } else {
                    format!("{} [{}]", self.title, name)
                }
            }
            None => self.title.clone(),
        }
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Export the displayed layout to a JSON file.
    pub fn export_state(&self, path: &Path) -> Result<()> {
        export_layout(&self.layout, &self.title, &self.source, self.ticks, path)
    }
}

#[derive(Serialize)]
struct Export<'a> {
    dashboard: &'a str,
    source: &'a str,
    ticks: usize,
    layout: &'a Layout,
}

/// Write `layout` and where it came from as pretty JSON.
pub fn export_layout(
    layout: &Layout,
    dashboard: &str,
    source: &str,
    ticks: usize,
    path: &Path,
) -> Result<()> {
    let export = Export {
        dashboard,
        source,
        ticks,
        layout,
    };
    let json = serde_json::to_string_pretty(&export)?;
    let mut file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    file.write_all(json.as_bytes())?;
    Ok(())
}
