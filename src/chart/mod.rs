//! Chart Adapter
//!
//! Translates distributions into Chart.js configuration and manages chart
//! instance replacement per canvas.

mod config;
mod slot;

pub use config::{
    Axis, ChartConfig, ChartData, ChartKind, ChartOptions, Colors, Dataset, Legend, Plugins,
    Scales, Ticks, SEVERITY_COLORS,
};
pub use slot::{CanvasId, ChartInstance, ChartSlot, ChartSlots, ChartSurface};
