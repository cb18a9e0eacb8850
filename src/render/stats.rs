//! Statistics & Charts
//!
//! Projects `DashboardStatistics` onto the fixed statistic elements and the
//! severity/category charts.

use chrono::{DateTime, FixedOffset};

use crate::chart::{ChartConfig, ChartSlots};
use crate::format::{format_duration, format_relative, Locale};
use crate::model::{DashboardStatistics, TrendData};
use crate::page::{ElementId, PageSurface};

/// Display-ready statistics
#[derive(Debug, Clone, PartialEq)]
pub struct StatisticsView {
    /// Text for each statistic element, in write order
    pub fields: Vec<(ElementId, String)>,
    /// Present only when the payload had a severity distribution
    pub severity_chart: Option<ChartConfig>,
    /// Present only when the payload had a category distribution
    pub category_chart: Option<ChartConfig>,
}

impl StatisticsView {
    pub fn build(stats: &DashboardStatistics, now: DateTime<FixedOffset>, locale: Locale) -> Self {
        let overall = &stats.overall_stats;
        let mut fields = vec![
            (ElementId::TotalRepositories, overall.total_repositories.to_string()),
            (ElementId::TotalReviews, overall.total_reviews.to_string()),
            (ElementId::TotalComments, overall.total_comments.to_string()),
            (
                ElementId::AvgProcessingTime,
                format_duration(Some(overall.average_processing_time_ms), locale),
            ),
            (ElementId::TotalPullRequests, overall.total_pull_requests.to_string()),
            (
                ElementId::AvgCommentsPerReview,
                format!("{:.1}", overall.average_comments_per_review),
            ),
            (ElementId::TotalTokensUsed, overall.total_tokens_used.to_string()),
        ];

        // Activity elements keep their previous values when the section is absent
        if let Some(activity) = &stats.recent_activity {
            let last_review = match activity.last_review_time.as_deref() {
                Some(raw) if !raw.trim().is_empty() => format_relative(Some(raw), now, locale),
                _ => "-".to_string(),
            };
            fields.extend([
                (ElementId::ReviewsToday, activity.reviews_today.to_string()),
                (ElementId::ReviewsThisWeek, activity.reviews_this_week.to_string()),
                (ElementId::ReviewsThisMonth, activity.reviews_this_month.to_string()),
                (ElementId::LastReviewTime, last_review),
            ]);
        }

        Self {
            fields,
            severity_chart: stats.severity_distribution.as_ref().map(ChartConfig::severity),
            category_chart: stats
                .category_distribution
                .as_ref()
                .map(|dist| ChartConfig::categories(dist, locale.messages().category_dataset_label)),
        }
    }

    /// Text rendered for `element`, if this view writes it
    pub fn field(&self, element: ElementId) -> Option<&str> {
        self.fields
            .iter()
            .find(|(e, _)| *e == element)
            .map(|(_, text)| text.as_str())
    }
}

/// Write a statistics view into the page and redraw the charts it carries.
///
/// Charts whose distribution was absent keep their current instance.
pub fn apply_statistics<S: PageSurface + ?Sized>(
    surface: &mut S,
    charts: &mut ChartSlots,
    view: StatisticsView,
) {
    for (element, text) in view.fields {
        surface.set_text(element, text);
    }
    surface.set_text(ElementId::StatsStatus, String::new());

    if let Some(config) = view.severity_chart {
        charts.severity.redraw(&mut *surface, config);
    }
    if let Some(config) = view.category_chart {
        charts.category.redraw(&mut *surface, config);
    }
}

/// Degraded state after a failed statistics fetch
pub fn apply_statistics_failure<S: PageSurface + ?Sized>(surface: &mut S, locale: Locale) {
    surface.set_text(
        ElementId::StatsStatus,
        locale.messages().stats_load_failed.to_string(),
    );
}

/// Redraw the daily trend chart
pub fn apply_trends<S: PageSurface + ?Sized>(
    surface: &mut S,
    charts: &mut ChartSlots,
    trends: &TrendData,
    locale: Locale,
) {
    let m = locale.messages();
    let config = ChartConfig::trends(
        trends,
        [m.daily_reviews_label, m.daily_comments_label, m.daily_issues_label],
    );
    charts.trend.redraw(&mut *surface, config);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::CanvasId;
    use crate::model::{CategoryDistribution, RecentActivity, SeverityCounts};
    use crate::page::Page;
    use chrono::TimeZone;

    fn now() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(9 * 3600)
            .unwrap()
            .with_ymd_and_hms(2024, 3, 10, 12, 0, 0)
            .unwrap()
    }

    fn example_statistics() -> DashboardStatistics {
        serde_json::from_str(
            r#"{
                "overallStats": {
                    "totalRepositories": 5,
                    "totalReviews": 120,
                    "totalComments": 340,
                    "averageProcessingTimeMs": 2500
                },
                "severityDistribution": {"info": 10, "warning": 3, "error": 1}
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_example_payload() {
        let view = StatisticsView::build(&example_statistics(), now(), Locale::Ko);

        assert_eq!(view.field(ElementId::TotalRepositories), Some("5"));
        assert_eq!(view.field(ElementId::TotalReviews), Some("120"));
        assert_eq!(view.field(ElementId::TotalComments), Some("340"));
        assert_eq!(view.field(ElementId::AvgProcessingTime), Some("2.5초"));
        assert_eq!(view.severity_chart.as_ref().unwrap().values(), &[10, 3, 1]);
        assert_eq!(
            view.severity_chart.as_ref().unwrap().data.labels,
            vec!["Info", "Warning", "Error"]
        );
        assert!(view.category_chart.is_none());
        assert!(view.field(ElementId::ReviewsToday).is_none());
    }

    #[test]
    fn test_missing_numbers_render_as_zero() {
        let stats = DashboardStatistics::default();
        let view = StatisticsView::build(&stats, now(), Locale::Ko);

        assert_eq!(view.field(ElementId::TotalRepositories), Some("0"));
        assert_eq!(view.field(ElementId::AvgProcessingTime), Some("0초"));
        assert_eq!(view.field(ElementId::AvgCommentsPerReview), Some("0.0"));
    }

    #[test]
    fn test_recent_activity_fields() {
        let stats = DashboardStatistics {
            recent_activity: Some(RecentActivity {
                reviews_today: 2,
                reviews_this_week: 9,
                reviews_this_month: 31,
                last_review_time: Some("2024-03-10T11:45:00".to_string()),
            }),
            ..Default::default()
        };
        let view = StatisticsView::build(&stats, now(), Locale::Ko);

        assert_eq!(view.field(ElementId::ReviewsToday), Some("2"));
        assert_eq!(view.field(ElementId::ReviewsThisWeek), Some("9"));
        assert_eq!(view.field(ElementId::ReviewsThisMonth), Some("31"));
        assert_eq!(view.field(ElementId::LastReviewTime), Some("15분 전"));
    }

    #[test]
    fn test_repeated_refresh_keeps_one_chart_per_canvas() {
        let mut page = Page::new(Locale::Ko);
        let mut charts = ChartSlots::default();
        let mut stats = example_statistics();
        stats.category_distribution =
            Some(CategoryDistribution::from_pairs([("bug", 3), ("style", 1)]));

        for _ in 0..10 {
            let view = StatisticsView::build(&stats, now(), Locale::Ko);
            apply_statistics(&mut page, &mut charts, view);
        }

        assert_eq!(page.live_chart_count(CanvasId::Severity), 1);
        assert_eq!(page.live_chart_count(CanvasId::Category), 1);
        assert_eq!(page.live_charts().count(), 2);
        assert_eq!(page.text(ElementId::AvgProcessingTime), Some("2.5초"));
    }

    #[test]
    fn test_absent_distribution_keeps_previous_chart() {
        let mut page = Page::new(Locale::Ko);
        let mut charts = ChartSlots::default();
        let mut stats = example_statistics();

        apply_statistics(&mut page, &mut charts, StatisticsView::build(&stats, now(), Locale::Ko));
        let first = charts.severity.instance_id();

        stats.severity_distribution = None;
        apply_statistics(&mut page, &mut charts, StatisticsView::build(&stats, now(), Locale::Ko));

        assert_eq!(charts.severity.instance_id(), first);
        assert_eq!(page.live_chart_count(CanvasId::Severity), 1);
    }

    #[test]
    fn test_failure_then_success_clears_status() {
        let mut page = Page::new(Locale::Ko);
        let mut charts = ChartSlots::default();

        apply_statistics_failure(&mut page, Locale::Ko);
        assert_eq!(
            page.text(ElementId::StatsStatus),
            Some("통계 데이터를 불러오는데 실패했습니다.")
        );
        // Values from before the failure stay in place
        assert_eq!(page.text(ElementId::TotalReviews), Some("-"));

        let view = StatisticsView::build(&example_statistics(), now(), Locale::Ko);
        apply_statistics(&mut page, &mut charts, view);
        assert_eq!(page.text(ElementId::StatsStatus), Some(""));
    }

    #[test]
    fn test_apply_trends_replaces_instance() {
        let mut page = Page::new(Locale::En);
        let mut charts = ChartSlots::default();
        let trends = TrendData::default();

        apply_trends(&mut page, &mut charts, &trends, Locale::En);
        apply_trends(&mut page, &mut charts, &trends, Locale::En);

        assert_eq!(page.live_chart_count(CanvasId::Trend), 1);
        let config = page.chart(CanvasId::Trend).unwrap();
        assert_eq!(config.data.datasets[0].label.as_deref(), Some("Reviews"));
    }

    #[test]
    fn test_severity_counts_flow_into_chart() {
        let stats = DashboardStatistics {
            severity_distribution: Some(SeverityCounts::new(0, 0, 7)),
            ..Default::default()
        };
        let view = StatisticsView::build(&stats, now(), Locale::Ko);
        assert_eq!(view.severity_chart.unwrap().values(), &[0, 0, 7]);
    }
}
