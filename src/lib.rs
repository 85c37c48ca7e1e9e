//! # metric-dashboard
//!
//! Derives time series from a log of metric snapshots and lays them out as a
//! grid of chart panels.
//!
//! Each line of the input is one JSON snapshot mapping metric paths to
//! statistic values. A dashboard definition names the series to extract,
//! how to transform them, and where to draw them. The result is an
//! immutable [`Layout`] that the terminal viewer renders or that can be
//! exported as JSON.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐    ┌──────────┐    ┌───────────┐    ┌──────────┐    ┌─────────┐
//! │  source  │───▶│   data   │───▶│ dashboard │───▶│  layout  │───▶│   ui    │
//! │(snapshots)   │ (series) │    │(definition)    │ (panels) │    │(ratatui)│
//! └──────────┘    └──────────┘    └───────────┘    └──────────┘    └─────────┘
//! ```
//!
//! - **[`source`]**: reads newline-delimited JSON snapshots ([`SnapshotSource`])
//! - **[`data`]**: series extraction and the delta, growth, ratio, linear
//!   combination and scale transforms
//! - **[`dashboard`]**: dashboard definitions loaded with `config`, plus the
//!   built-in ones
//! - **[`layout`]**: the panel grid and its validating [`PanelAssembler`]
//! - **[`ui`]**, **[`app`]**, **[`events`]**: the terminal viewer
//!
//! ## Usage
//!
//! ```bash
//! # Show the default dashboard for a metrics log
//! metric-dashboard metrics.log
//!
//! # Pick a built-in dashboard, or load a custom definition
//! metric-dashboard metrics.log --dashboard growth
//! metric-dashboard metrics.log --config my-dashboard.toml
//!
//! # Write the layout as JSON instead of opening the viewer
//! metric-dashboard metrics.log --export layout.json
//! ```
//!
//! ### As a library
//!
//! ```
//! use metric_dashboard::{parse_records, BuiltinDashboard};
//!
//! let log = "{\"hyper.test_add\":{\"1m.rate\":10,\"5m.rate\":8,\"15m.rate\":7,\"count\":100}}\n";
//! let snapshots = parse_records(log).unwrap();
//! let layout = BuiltinDashboard::Rates
//!     .definition()
//!     .unwrap()
//!     .build(&snapshots)
//!     .unwrap();
//! assert_eq!(layout.panels().len(), 2);
//! ```

pub mod app;
pub mod dashboard;
pub mod data;
pub mod error;
pub mod events;
pub mod layout;
pub mod source;
pub mod ui;

// Re-export main types for convenience
pub use app::App;
pub use dashboard::{BuiltinDashboard, DashboardDef, SeriesExpr};
pub use data::{DeltaMode, Series, SeriesSpec, SeriesStore};
pub use error::{LookupError, PipelineError, Result};
pub use layout::{Cell, Layout, LayoutError, Panel, PanelAssembler, Placement, Trace, TraceStyle};
pub use source::{parse_records, FileSource, ReaderSource, Snapshot, SnapshotSource};
