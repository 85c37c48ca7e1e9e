//! Dashboard definitions.
//!
//! A definition says which series to derive and where to draw them. It is
//! plain data, loaded with the `config` crate from TOML (or any format
//! `config` understands), so the choice of metrics, delta modes and axis
//! ranges stays a per-deployment decision rather than code.
//!
//! ```toml
//! title = "Rates"
//! rows = 2
//! cols = 1
//!
//! [[panels]]
//! row = 1
//! col = 1
//! title = "Rates"
//! y_range = [0, 8000]
//!
//! [[panels.traces]]
//! label = "1m Rate"
//! series = { op = "metric", path = "hyper.test_add", stat = "1m.rate" }
//! ```

pub mod builtin;
mod expr;

pub use builtin::BuiltinDashboard;
pub use expr::{SeriesExpr, Term};

use std::collections::HashSet;
use std::path::Path;

use config::{Config, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::data::{SeriesSpec, SeriesStore};
use crate::error::Result;
use crate::layout::{AxisRange, Cell, Layout, PanelAssembler, Placement, TraceStyle};
use crate::source::Snapshot;

/// A complete dashboard: grid shape plus panel contents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardDef {
    pub title: String,
    pub rows: usize,
    pub cols: usize,
    #[serde(default)]
    pub panels: Vec<PanelDef>,
}

/// One grid cell of a dashboard definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelDef {
    pub row: usize,
    pub col: usize,
    #[serde(default)]
    pub span: Option<usize>,
    #[serde(default)]
    pub title: Option<String>,
    /// `[min, max]` for the y axis.
    #[serde(default)]
    pub y_range: Option<(f64, f64)>,
    #[serde(default)]
    pub traces: Vec<TraceDef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceDef {
    pub label: String,
    #[serde(default)]
    pub style: TraceStyle,
    pub series: SeriesExpr,
}

impl DashboardDef {
    /// Load a definition file; the format follows the file extension.
    pub fn from_file(path: &Path) -> Result<Self> {
        let def = Config::builder()
            .add_source(File::from(path))
            .build()?
            .try_deserialize()?;
        Ok(def)
    }

    /// Parse a definition from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        let def = Config::builder()
            .add_source(File::from_str(content, FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        Ok(def)
    }

    /// Distinct metric series this dashboard reads, in first-use order.
    pub fn series_specs(&self) -> Vec<SeriesSpec> {
        let mut specs = Vec::new();
        for trace in self.panels.iter().flat_map(|p| &p.traces) {
            trace.series.collect_specs(&mut specs);
        }
        let mut seen = HashSet::new();
        specs.retain(|spec| seen.insert(spec.clone()));
        specs
    }

    /// Derive every series and lay them out.
    ///
    /// All-or-nothing: the first failing extraction, transform or placement
    /// aborts and no layout is returned.
    pub fn assemble(&self, store: &mut SeriesStore<'_>) -> Result<Layout> {
        let mut assembler = PanelAssembler::new(self.rows, self.cols)?;

        for panel in &self.panels {
            let cell = Cell::new(panel.row, panel.col);
            assembler.declare(cell, panel.span)?;
            if let Some(title) = &panel.title {
                assembler.title(cell, panel.span, title.as_str())?;
            }

            for trace in &panel.traces {
                let series = trace.series.evaluate(store)?;
                debug!(%cell, label = %trace.label, "derived trace");

                let mut placement = Placement::new(trace.label.as_str(), series, cell).style(trace.style);
                placement.col_span = panel.span;
                placement.y_range = panel.y_range.map(|(min, max)| AxisRange::new(min, max));
                assembler.place(placement)?;
            }
        }

        let layout = assembler.build();
        info!(
            dashboard = %self.title,
            panels = layout.panels().len(),
            traces = layout.trace_count(),
            ticks = store.ticks(),
            series = store.extracted(),
            "assembled layout"
        );
        Ok(layout)
    }

    /// Convenience wrapper over [`assemble`](Self::assemble) with a fresh store.
    pub fn build(&self, snapshots: &[Snapshot]) -> Result<Layout> {
        self.assemble(&mut SeriesStore::new(snapshots))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DeltaMode;
    use crate::error::PipelineError;
    use crate::layout::LayoutError;
    use crate::source::parse_records;
    use std::io::Write;

    const DEFINITION: &str = r#"
title = "Test"
rows = 2
cols = 2

[[panels]]
row = 1
col = 1
span = 2
title = "Latency"
y_range = [0, 3000]

[[panels.traces]]
label = "Add 95%"
series = { op = "metric", path = "hyper.add", stat = "95%" }

[[panels.traces]]
label = "Remainder"
[panels.traces.series]
op = "combine"
terms = [
    { coef = 1.0, of = { op = "metric", path = "hyper.visiting", stat = "95%" } },
    { coef = -1.0, of = { op = "metric", path = "hyper.add", stat = "95%" } },
]

[[panels]]
row = 2
col = 1
title = "Puts"

[[panels.traces]]
label = "Puts"
series = { op = "delta", mode = "clamped", of = { op = "metric", path = "store.puts_total", stat = "value" } }

[[panels]]
row = 2
col = 2

[[panels.traces]]
label = "Growth"
style = "bar"
series = { op = "growth", chunk = 2, of = { op = "metric", path = "hyper.add", stat = "95%" } }
"#;

    fn snapshots() -> Vec<Snapshot> {
        parse_records(
            "{\"hyper.add\":{\"95%\":100},\"hyper.visiting\":{\"95%\":150},\"store.puts_total\":{\"value\":5}}\n\
             {\"hyper.add\":{\"95%\":110},\"hyper.visiting\":{\"95%\":150},\"store.puts_total\":{\"value\":9}}\n\
             {\"hyper.add\":{\"95%\":121},\"hyper.visiting\":{\"95%\":130},\"store.puts_total\":{\"value\":2}}\n",
        )
        .unwrap()
    }

    #[test]
    fn test_from_toml() {
        let def = DashboardDef::from_toml(DEFINITION).unwrap();
        assert_eq!(def.title, "Test");
        assert_eq!((def.rows, def.cols), (2, 2));
        assert_eq!(def.panels.len(), 3);

        let first = &def.panels[0];
        assert_eq!(first.span, Some(2));
        assert_eq!(first.y_range, Some((0.0, 3000.0)));
        assert_eq!(first.traces.len(), 2);
        assert!(matches!(first.traces[1].series, SeriesExpr::Combine { ref terms } if terms.len() == 2));

        let puts = &def.panels[1].traces[0];
        assert!(matches!(
            puts.series,
            SeriesExpr::Delta {
                mode: DeltaMode::Clamped,
                ..
            }
        ));
        assert_eq!(def.panels[2].traces[0].style, TraceStyle::Bar);
        assert_eq!(def.panels[2].title, None);
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(DEFINITION.as_bytes()).unwrap();
        let def = DashboardDef::from_file(file.path()).unwrap();
        assert_eq!(def, DashboardDef::from_toml(DEFINITION).unwrap());
    }

    #[test]
    fn test_from_file_missing() {
        assert!(matches!(
            DashboardDef::from_file(Path::new("/nonexistent/dashboard.toml")),
            Err(PipelineError::Dashboard(_))
        ));
    }

    #[test]
    fn test_build_layout() {
        let def = DashboardDef::from_toml(DEFINITION).unwrap();
        let layout = def.build(&snapshots()).unwrap();

        assert_eq!(layout.panels().len(), 3);
        assert_eq!(layout.trace_count(), 4);

        let top = layout.panel(Cell::new(1, 1)).unwrap();
        assert_eq!(top.col_span, 2);
        assert_eq!(top.title.as_deref(), Some("Latency"));
        assert_eq!(top.y_range, Some(AxisRange::new(0.0, 3000.0)));
        assert_eq!(top.traces[0].values.values(), &[100.0, 110.0, 121.0]);
        assert_eq!(top.traces[1].values.values(), &[50.0, 40.0, 9.0]);

        let puts = layout.panel(Cell::new(2, 1)).unwrap();
        assert_eq!(puts.traces[0].values.values(), &[5.0, 4.0, 0.0]);

        let growth = layout.panel(Cell::new(2, 2)).unwrap();
        assert_eq!(growth.traces[0].style, TraceStyle::Bar);
        assert_eq!(growth.traces[0].values.len(), 1);
        assert!((growth.traces[0].values[0] - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_bare_spanned_panel_reserves_cells() {
        let def = DashboardDef::from_toml(
            r#"
title = "Bare"
rows = 1
cols = 2

[[panels]]
row = 1
col = 1
span = 2

[[panels]]
row = 1
col = 2

[[panels.traces]]
label = "Adds"
series = { op = "metric", path = "hyper.add", stat = "95%" }
"#,
        )
        .unwrap();
        assert!(matches!(
            def.build(&snapshots()),
            Err(PipelineError::Layout(LayoutError::SpannedCell { .. }))
        ));
    }

    #[test]
    fn test_bare_panel_is_kept_empty() {
        let mut def = DashboardDef::from_toml(DEFINITION).unwrap();
        def.panels[2].traces.clear();
        let layout = def.build(&snapshots()).unwrap();
        let bare = layout.panel(Cell::new(2, 2)).unwrap();
        assert!(bare.traces.is_empty());
        assert_eq!(bare.title, None);
    }

    #[test]
    fn test_series_specs_are_distinct() {
        let def = DashboardDef::from_toml(DEFINITION).unwrap();
        assert_eq!(
            def.series_specs(),
            vec![
                SeriesSpec::new("hyper.add", "95%"),
                SeriesSpec::new("hyper.visiting", "95%"),
                SeriesSpec::new("store.puts_total", "value"),
            ]
        );
    }

    #[test]
    fn test_build_fails_on_missing_metric() {
        let def = DashboardDef::from_toml(DEFINITION).unwrap();
        let snapshots = parse_records("{\"hyper.add\":{\"95%\":100}}\n").unwrap();
        assert!(matches!(
            def.build(&snapshots),
            Err(PipelineError::Lookup { tick: 1, .. })
        ));
    }

    #[test]
    fn test_build_fails_on_spanned_cell() {
        let mut def = DashboardDef::from_toml(DEFINITION).unwrap();
        def.panels[1].row = 1;
        def.panels[1].col = 2;
        assert!(matches!(
            def.build(&snapshots()),
            Err(PipelineError::Layout(LayoutError::SpannedCell { .. }))
        ));
    }
}
