//! Chart Instance Ownership
//!
//! A `ChartSlot` owns the single live chart instance of one canvas. Redrawing
//! destroys the previous instance before creating the next one, so a canvas
//! never has more than one live chart no matter how often it is refreshed.

use serde::Serialize;
use std::fmt;

use super::ChartConfig;

/// Canvases in the host document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum CanvasId {
    #[serde(rename = "severityChart")]
    Severity,
    #[serde(rename = "categoryChart")]
    Category,
    #[serde(rename = "trendChart")]
    Trend,
}

impl CanvasId {
    /// Element id of the canvas
    pub fn as_str(&self) -> &'static str {
        match self {
            CanvasId::Severity => "severityChart",
            CanvasId::Category => "categoryChart",
            CanvasId::Trend => "trendChart",
        }
    }
}

impl fmt::Display for CanvasId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Handle to a live chart created by a surface.
///
/// Not `Clone`: whoever holds the handle is the only one able to destroy it.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct ChartInstance {
    id: u64,
    canvas: CanvasId,
}

impl ChartInstance {
    pub fn new(id: u64, canvas: CanvasId) -> Self {
        Self { id, canvas }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn canvas(&self) -> CanvasId {
        self.canvas
    }
}

/// Something that can host chart instances (the external charting library)
pub trait ChartSurface {
    /// Create a chart on `canvas` and return its handle
    fn create_chart(&mut self, canvas: CanvasId, config: ChartConfig) -> ChartInstance;

    /// Dispose a chart previously returned by `create_chart`
    fn destroy_chart(&mut self, instance: ChartInstance);
}

/// Ownership handle for the chart on one canvas
#[derive(Debug)]
pub struct ChartSlot {
    canvas: CanvasId,
    live: Option<ChartInstance>,
}

impl ChartSlot {
    pub fn new(canvas: CanvasId) -> Self {
        Self { canvas, live: None }
    }

    pub fn canvas(&self) -> CanvasId {
        self.canvas
    }

    pub fn is_live(&self) -> bool {
        self.live.is_some()
    }

    /// Id of the live instance, if any
    pub fn instance_id(&self) -> Option<u64> {
        self.live.as_ref().map(ChartInstance::id)
    }

    /// Replace the live chart with one built from `config`
    pub fn redraw<S: ChartSurface + ?Sized>(&mut self, surface: &mut S, config: ChartConfig) {
        if let Some(previous) = self.live.take() {
            surface.destroy_chart(previous);
        }
        self.live = Some(surface.create_chart(self.canvas, config));
    }

    /// Destroy the live chart, leaving the canvas empty
    pub fn clear<S: ChartSurface + ?Sized>(&mut self, surface: &mut S) {
        if let Some(previous) = self.live.take() {
            surface.destroy_chart(previous);
        }
    }
}

/// One slot per dashboard canvas
#[derive(Debug)]
pub struct ChartSlots {
    pub severity: ChartSlot,
    pub category: ChartSlot,
    pub trend: ChartSlot,
}

impl Default for ChartSlots {
    fn default() -> Self {
        Self {
            severity: ChartSlot::new(CanvasId::Severity),
            category: ChartSlot::new(CanvasId::Category),
            trend: ChartSlot::new(CanvasId::Trend),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SeverityCounts;
    use std::collections::HashMap;

    /// Counts live instances the way a charting library would
    #[derive(Default)]
    struct CountingSurface {
        next_id: u64,
        live: HashMap<u64, CanvasId>,
        destroyed: Vec<u64>,
    }

    impl ChartSurface for CountingSurface {
        fn create_chart(&mut self, canvas: CanvasId, _config: ChartConfig) -> ChartInstance {
            self.next_id += 1;
            self.live.insert(self.next_id, canvas);
            ChartInstance::new(self.next_id, canvas)
        }

        fn destroy_chart(&mut self, instance: ChartInstance) {
            self.live.remove(&instance.id());
            self.destroyed.push(instance.id());
        }
    }

    #[test]
    fn test_redraw_keeps_one_live_instance() {
        let mut surface = CountingSurface::default();
        let mut slot = ChartSlot::new(CanvasId::Severity);

        for _ in 0..5 {
            slot.redraw(&mut surface, ChartConfig::severity(&SeverityCounts::new(1, 2, 3)));
        }

        assert_eq!(surface.live.len(), 1);
        assert_eq!(surface.destroyed, vec![1, 2, 3, 4]);
        assert_eq!(slot.instance_id(), Some(5));
    }

    #[test]
    fn test_clear_destroys_instance() {
        let mut surface = CountingSurface::default();
        let mut slot = ChartSlot::new(CanvasId::Category);

        slot.clear(&mut surface);
        assert!(surface.destroyed.is_empty());

        slot.redraw(&mut surface, ChartConfig::severity(&SeverityCounts::default()));
        slot.clear(&mut surface);

        assert!(!slot.is_live());
        assert!(surface.live.is_empty());
    }

    #[test]
    fn test_canvas_ids() {
        assert_eq!(CanvasId::Severity.as_str(), "severityChart");
        assert_eq!(CanvasId::Category.to_string(), "categoryChart");
        assert_eq!(serde_json::to_string(&CanvasId::Trend).unwrap(), r#""trendChart""#);
    }
}
