//! In-Memory Host Document
//!
//! `Page` holds the current content of every shared element and the live
//! chart instances. Renderers write into it through `PageSurface`; the
//! server reads it back out as HTML or JSON.
//!
//! The detail modal is not part of the page. Each viewer carries its own
//! `ModalState`, which is combined with the shared page only when a document
//! is rendered.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::chart::{CanvasId, ChartConfig, ChartInstance, ChartSurface};
use crate::format::Locale;

use super::ElementId;

/// Write access to the host document
pub trait PageSurface: ChartSurface {
    /// Replace an element's content with plain text (escaped on output)
    fn set_text(&mut self, element: ElementId, text: String);

    /// Replace an element's content with trusted markup
    fn set_html(&mut self, element: ElementId, html: String);
}

/// Content of one element
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Content {
    Text(String),
    Html(String),
}

/// A chart instance currently attached to a canvas
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LiveChart {
    pub id: u64,
    pub canvas: CanvasId,
    pub config: ChartConfig,
}

/// One viewer's detail modal
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ModalState {
    pub visible: bool,
    /// Review whose detail was requested last
    pub review_id: Option<u64>,
    /// Markup for `reviewDetailContent`
    pub content: String,
}

/// The shared dashboard document
#[derive(Debug)]
pub struct Page {
    locale: Locale,
    contents: BTreeMap<ElementId, Content>,
    charts: BTreeMap<u64, LiveChart>,
    next_chart_id: u64,
}

/// Serializable view of the page state
#[derive(Debug, Clone, Serialize)]
pub struct PageSnapshot {
    pub locale: Locale,
    pub elements: BTreeMap<&'static str, Content>,
    pub charts: Vec<LiveChart>,
}

impl Page {
    /// Create the document with its initial placeholders
    pub fn new(locale: Locale) -> Self {
        let messages = locale.messages();
        let contents = ElementId::ALL
            .iter()
            .filter(|element| !element.is_per_viewer())
            .map(|&element| {
                let content = match element {
                    ElementId::StatsStatus => Content::Text(String::new()),
                    ElementId::ReviewList | ElementId::RepositoryStats => Content::Html(format!(
                        r#"<div class="loading">{}</div>"#,
                        messages.loading
                    )),
                    _ => Content::Text("-".to_string()),
                };
                (element, content)
            })
            .collect();

        Self {
            locale,
            contents,
            charts: BTreeMap::new(),
            next_chart_id: 0,
        }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn content(&self, element: ElementId) -> Option<&Content> {
        self.contents.get(&element)
    }

    /// Text content, if the element currently holds text
    pub fn text(&self, element: ElementId) -> Option<&str> {
        match self.contents.get(&element) {
            Some(Content::Text(text)) => Some(text),
            _ => None,
        }
    }

    /// Markup content, if the element currently holds markup
    pub fn html(&self, element: ElementId) -> Option<&str> {
        match self.contents.get(&element) {
            Some(Content::Html(html)) => Some(html),
            _ => None,
        }
    }

    pub fn live_charts(&self) -> impl Iterator<Item = &LiveChart> {
        self.charts.values()
    }

    /// Number of live instances attached to `canvas`
    pub fn live_chart_count(&self, canvas: CanvasId) -> usize {
        self.charts.values().filter(|c| c.canvas == canvas).count()
    }

    /// Configuration of the newest live chart on `canvas`
    pub fn chart(&self, canvas: CanvasId) -> Option<&ChartConfig> {
        self.charts
            .values()
            .rev()
            .find(|c| c.canvas == canvas)
            .map(|c| &c.config)
    }

    pub fn snapshot(&self) -> PageSnapshot {
        PageSnapshot {
            locale: self.locale,
            elements: self
                .contents
                .iter()
                .map(|(element, content)| (element.as_str(), content.clone()))
                .collect(),
            charts: self.charts.values().cloned().collect(),
        }
    }
}

impl ChartSurface for Page {
    fn create_chart(&mut self, canvas: CanvasId, config: ChartConfig) -> ChartInstance {
        self.next_chart_id += 1;
        let id = self.next_chart_id;
        self.charts.insert(id, LiveChart { id, canvas, config });
        ChartInstance::new(id, canvas)
    }

    fn destroy_chart(&mut self, instance: ChartInstance) {
        if self.charts.remove(&instance.id()).is_none() {
            tracing::warn!(chart_id = instance.id(), canvas = %instance.canvas(), "Destroying unknown chart instance");
        }
    }
}

impl Page {
    fn write(&mut self, element: ElementId, content: Content) {
        if element.is_per_viewer() {
            tracing::warn!(%element, "Ignoring write of per-viewer element into the shared page");
            return;
        }
        self.contents.insert(element, content);
    }
}

impl PageSurface for Page {
    fn set_text(&mut self, element: ElementId, text: String) {
        self.write(element, Content::Text(text));
    }

    fn set_html(&mut self, element: ElementId, html: String) {
        self.write(element, Content::Html(html));
    }
}
