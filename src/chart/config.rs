//! Chart.js Configuration
//!
//! Serializable mirror of the subset of Chart.js configuration the dashboard
//! uses. The JSON produced here is handed verbatim to `new Chart(ctx, config)`.

use serde::Serialize;

use crate::model::{CategoryDistribution, Severity, SeverityCounts, TrendData};

/// Severity palette in chart order (Info, Warning, Error)
pub const SEVERITY_COLORS: [&str; 3] = ["#5bc0de", "#f0ad4e", "#d9534f"];

const CATEGORY_FILL: &str = "#667eea";
const CATEGORY_BORDER: &str = "#5568d3";

/// Line colors for the trend chart datasets
const TREND_COLORS: [&str; 3] = ["#667eea", "#5bc0de", "#d9534f"];

/// Top-level chart configuration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub data: ChartData,
    pub options: ChartOptions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Doughnut,
    Bar,
    Line,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub data: Vec<u64>,
    pub background_color: Colors,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    pub border_width: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<bool>,
}

/// One color for the whole dataset, or one per data point
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Colors {
    Single(String),
    PerPoint(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub responsive: bool,
    pub maintain_aspect_ratio: bool,
    pub plugins: Plugins,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scales: Option<Scales>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Plugins {
    pub legend: Legend,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scales {
    pub y: Axis,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Axis {
    pub begin_at_zero: bool,
    pub ticks: Ticks,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticks {
    pub step_size: u32,
}

impl ChartOptions {
    fn with_legend(legend: Legend) -> Self {
        Self {
            responsive: true,
            maintain_aspect_ratio: true,
            plugins: Plugins { legend },
            scales: None,
        }
    }

    /// Integer y axis starting at zero
    fn with_count_axis(mut self) -> Self {
        self.scales = Some(Scales {
            y: Axis {
                begin_at_zero: true,
                ticks: Ticks { step_size: 1 },
            },
        });
        self
    }
}

impl ChartConfig {
    /// Doughnut of Info/Warning/Error counts, always in that order
    pub fn severity(counts: &SeverityCounts) -> Self {
        Self {
            kind: ChartKind::Doughnut,
            data: ChartData {
                labels: Severity::CHART_ORDER
                    .iter()
                    .map(|s| s.label().to_string())
                    .collect(),
                datasets: vec![Dataset {
                    label: None,
                    data: Severity::CHART_ORDER.iter().map(|s| counts.get(*s)).collect(),
                    background_color: Colors::PerPoint(
                        SEVERITY_COLORS.iter().map(|c| c.to_string()).collect(),
                    ),
                    border_color: None,
                    border_width: 0,
                    fill: None,
                }],
            },
            options: ChartOptions::with_legend(Legend {
                position: Some("bottom".to_string()),
                display: None,
            }),
        }
    }

    /// One bar per category, in source order
    pub fn categories(distribution: &CategoryDistribution, dataset_label: &str) -> Self {
        Self {
            kind: ChartKind::Bar,
            data: ChartData {
                labels: distribution.labels(),
                datasets: vec![Dataset {
                    label: Some(dataset_label.to_string()),
                    data: distribution.counts(),
                    background_color: Colors::Single(CATEGORY_FILL.to_string()),
                    border_color: Some(CATEGORY_BORDER.to_string()),
                    border_width: 1,
                    fill: None,
                }],
            },
            options: ChartOptions::with_legend(Legend {
                position: None,
                display: Some(false),
            })
            .with_count_axis(),
        }
    }

    /// Daily reviews, comments and issues as three lines.
    ///
    /// Labels come from the review series; the other series are aligned by
    /// position.
    pub fn trends(trends: &TrendData, series_labels: [&str; 3]) -> Self {
        let series = [&trends.daily_reviews, &trends.daily_comments, &trends.daily_issues];
        let datasets = series
            .iter()
            .zip(series_labels)
            .zip(TREND_COLORS)
            .map(|((points, label), color)| Dataset {
                label: Some(label.to_string()),
                data: points.iter().map(|p| p.count).collect(),
                background_color: Colors::Single(color.to_string()),
                border_color: Some(color.to_string()),
                border_width: 2,
                fill: Some(false),
            })
            .collect();

        Self {
            kind: ChartKind::Line,
            data: ChartData {
                labels: trends.daily_reviews.iter().map(|p| p.date.clone()).collect(),
                datasets,
            },
            options: ChartOptions::with_legend(Legend {
                position: Some("bottom".to_string()),
                display: None,
            })
            .with_count_axis(),
        }
    }

    /// Values of the first dataset
    pub fn values(&self) -> &[u64] {
        self.data
            .datasets
            .first()
            .map(|d| d.data.as_slice())
            .unwrap_or(&[])
    }
}
