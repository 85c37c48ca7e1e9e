//! Dashboards shipped with the binary.

use std::fmt;

use clap::ValueEnum;

use super::DashboardDef;
use crate::error::Result;

const OVERVIEW: &str = include_str!("../../dashboards/overview.toml");
const GROWTH: &str = include_str!("../../dashboards/growth.toml");
const MEMORY: &str = include_str!("../../dashboards/memory.toml");
const RATES: &str = include_str!("../../dashboards/rates.toml");

/// Built-in dashboard definitions for tree/storage benchmark logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum BuiltinDashboard {
    /// Operation latencies, insertion rates, cache and storage activity.
    #[default]
    Overview,
    /// Average growth of 99th percentile latencies over 10-tick windows.
    Growth,
    /// Go runtime memory, GC activity and cache usage per insertion.
    Memory,
    /// Insertion meter rates and event count.
    Rates,
}

impl BuiltinDashboard {
    pub const ALL: [BuiltinDashboard; 4] = [
        BuiltinDashboard::Overview,
        BuiltinDashboard::Growth,
        BuiltinDashboard::Memory,
        BuiltinDashboard::Rates,
    ];

    /// The TOML source of this definition.
    pub fn source(self) -> &'static str {
        match self {
            BuiltinDashboard::Overview => OVERVIEW,
            BuiltinDashboard::Growth => GROWTH,
            BuiltinDashboard::Memory => MEMORY,
            BuiltinDashboard::Rates => RATES,
        }
    }

    pub fn definition(self) -> Result<DashboardDef> {
        DashboardDef::from_toml(self.source())
    }

    pub fn name(self) -> &'static str {
        match self {
            BuiltinDashboard::Overview => "overview",
            BuiltinDashboard::Growth => "growth",
            BuiltinDashboard::Memory => "memory",
            BuiltinDashboard::Rates => "rates",
        }
    }
}

impl fmt::Display for BuiltinDashboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
