//! Full HTML document for the current page state

use super::{Content, ElementId, ModalState, Page};
use crate::chart::CanvasId;
use crate::format::escape_html;

const CHART_JS_URL: &str = "https://cdn.jsdelivr.net/npm/chart.js";

/// Options for rendering the page as a standalone document
#[derive(Debug, Clone)]
pub struct DocumentOptions {
    /// Browser reload interval in seconds (0 disables reloading)
    pub refresh_secs: u64,
    /// Include the trend chart canvas
    pub show_trends: bool,
    /// Include the per-repository table
    pub show_repositories: bool,
}

impl Default for DocumentOptions {
    fn default() -> Self {
        Self {
            refresh_secs: 30,
            show_trends: false,
            show_repositories: false,
        }
    }
}

impl Page {
    /// Render the shared page plus one viewer's modal as a complete HTML
    /// document
    pub fn render_document(&self, options: &DocumentOptions, modal: &ModalState) -> String {
        let m = self.locale().messages();

        let refresh = if options.refresh_secs > 0 {
            format!(
                r#"<meta http-equiv="refresh" content="{}">"#,
                options.refresh_secs
            )
        } else {
            String::new()
        };

        let trend_section = if options.show_trends {
            format!(
                r#"<div class="chart-card wide"><h2>{}</h2><canvas id="{}"></canvas></div>"#,
                m.trend_chart_title,
                CanvasId::Trend
            )
        } else {
            String::new()
        };

        let repository_section = if options.show_repositories {
            format!(
                r#"<section>
            <h2>{}</h2>
            <div id="{}" class="repository-stats">{}</div>
        </section>"#,
                m.repositories_title,
                ElementId::RepositoryStats,
                self.element_markup(ElementId::RepositoryStats)
            )
        } else {
            String::new()
        };

        format!(
            r#"<!DOCTYPE html>
<html lang="{lang}">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    {refresh}
    <title>{title}</title>
    <style>{css}</style>
</head>
<body>
    <div class="container">
        <h1>{title}</h1>
        <div class="status" id="{stats_status_id}">{stats_status}</div>
        <section class="stat-grid">
            {overall_cards}
        </section>
        <section class="stat-grid activity">
            {activity_cards}
        </section>
        <section class="charts">
            <div class="chart-card"><h2>{severity_title}</h2><canvas id="{severity_canvas}"></canvas></div>
            <div class="chart-card"><h2>{category_title}</h2><canvas id="{category_canvas}"></canvas></div>
            {trend_section}
        </section>
        <section>
            <h2>{recent_title}</h2>
            <div id="{review_list_id}" class="review-list">{review_list}</div>
        </section>
        {repository_section}
    </div>
    {modal}
    {chart_configs}
    <script src="{chart_js}"></script>
    <script>{js}</script>
</body>
</html>"#,
            lang = m.html_lang,
            refresh = refresh,
            title = m.page_title,
            css = inline_css(),
            stats_status_id = ElementId::StatsStatus,
            stats_status = self.element_markup(ElementId::StatsStatus),
            overall_cards = [
                (ElementId::TotalRepositories, m.total_repositories_label),
                (ElementId::TotalPullRequests, m.total_pull_requests_label),
                (ElementId::TotalReviews, m.total_reviews_label),
                (ElementId::TotalComments, m.total_comments_label),
                (ElementId::AvgCommentsPerReview, m.avg_comments_label),
                (ElementId::AvgProcessingTime, m.avg_processing_time_label),
                (ElementId::TotalTokensUsed, m.total_tokens_label),
            ]
            .iter()
            .map(|(element, label)| self.stat_card(*element, label))
            .collect::<String>(),
            activity_cards = [
                (ElementId::ReviewsToday, m.reviews_today_label),
                (ElementId::ReviewsThisWeek, m.reviews_this_week_label),
                (ElementId::ReviewsThisMonth, m.reviews_this_month_label),
                (ElementId::LastReviewTime, m.last_review_label),
            ]
            .iter()
            .map(|(element, label)| self.stat_card(*element, label))
            .collect::<String>(),
            severity_title = m.severity_chart_title,
            severity_canvas = CanvasId::Severity,
            category_title = m.category_chart_title,
            category_canvas = CanvasId::Category,
            trend_section = trend_section,
            recent_title = m.recent_reviews_title,
            review_list_id = ElementId::ReviewList,
            review_list = self.element_markup(ElementId::ReviewList),
            repository_section = repository_section,
            modal = render_modal(modal),
            chart_configs = self.render_chart_configs(),
            chart_js = CHART_JS_URL,
            js = inline_javascript(),
        )
    }

    /// Element content as markup: text is escaped, markup is inserted as-is
    fn element_markup(&self, element: ElementId) -> String {
        match self.content(element) {
            Some(Content::Text(text)) => escape_html(text),
            Some(Content::Html(html)) => html.clone(),
            None => String::new(),
        }
    }

    fn stat_card(&self, element: ElementId, label: &str) -> String {
        format!(
            r#"<div class="stat-card"><div class="stat-label">{}</div><div class="stat-value" id="{}">{}</div></div>"#,
            label,
            element,
            self.element_markup(element)
        )
    }

    /// One JSON script block per live chart, read by the bootstrap script
    fn render_chart_configs(&self) -> String {
        self.live_charts()
            .filter_map(|chart| match serde_json::to_string(&chart.config) {
                Ok(json) => Some(format!(
                    r#"<script type="application/json" data-chart-canvas="{}">{}</script>"#,
                    chart.canvas,
                    escape_script_json(&json)
                )),
                Err(e) => {
                    tracing::warn!(canvas = %chart.canvas, error = %e, "Failed to serialize chart config");
                    None
                }
            })
            .collect::<Vec<_>>()
            .join("\n    ")
    }
}

fn render_modal(modal: &ModalState) -> String {
    format!(
        r#"<div id="reviewModal" class="modal" style="display: {display};">
        <a class="modal-backdrop" href="/modal/click?target=backdrop" aria-label="close"></a>
        <div class="modal-content">
            <a class="modal-close" href="/modal/close">&times;</a>
            <div id="{content_id}">{content}</div>
        </div>
    </div>"#,
        display = if modal.visible { "block" } else { "none" },
        content_id = ElementId::ReviewDetailContent,
        content = modal.content,
    )
}

/// JSON placed inside a `<script>` element. Markup-significant characters
/// only occur inside JSON strings, where the `\u` escapes decode back to the
/// same text.
fn escape_script_json(json: &str) -> String {
    json.replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026")
}

fn inline_css() -> &'static str {
    r#"
body { font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", sans-serif; margin: 0; background: #f5f6fa; color: #333; }
.container { max-width: 1200px; margin: 0 auto; padding: 24px; }
h1 { margin: 0 0 16px; }
h2 { font-size: 1.1rem; margin: 0 0 12px; }
.status { color: #d9534f; min-height: 1.2em; margin-bottom: 8px; }
.stat-grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(160px, 1fr)); gap: 12px; margin-bottom: 16px; }
.stat-card { background: #fff; border-radius: 8px; padding: 16px; box-shadow: 0 1px 3px rgba(0,0,0,.08); }
.stat-label { font-size: .85rem; color: #777; }
.stat-value { font-size: 1.6rem; font-weight: 600; margin-top: 4px; }
.charts { display: grid; grid-template-columns: repeat(auto-fit, minmax(320px, 1fr)); gap: 16px; margin-bottom: 24px; }
.chart-card { background: #fff; border-radius: 8px; padding: 16px; }
.chart-card.wide { grid-column: 1 / -1; }
.review-item { display: block; background: #fff; border-radius: 8px; padding: 12px 16px; margin-bottom: 8px; color: inherit; text-decoration: none; }
a.review-item:hover { box-shadow: 0 2px 6px rgba(0,0,0,.12); }
.review-header, .review-meta { display: flex; gap: 12px; justify-content: space-between; font-size: .9rem; }
.review-repo { font-weight: 600; }
.review-time { color: #888; }
.review-title { margin: 6px 0; }
.view-detail { color: #667eea; font-size: .85rem; }
.badge { display: inline-block; padding: 2px 8px; border-radius: 10px; font-size: .75rem; background: #eee; }
.badge-error { background: #d9534f; color: #fff; }
.badge-warning { background: #f0ad4e; color: #fff; }
.badge-info { background: #5bc0de; color: #fff; }
.loading, .error { padding: 24px; text-align: center; color: #888; }
.error { color: #d9534f; }
.modal { position: fixed; inset: 0; z-index: 10; }
.modal-backdrop { position: absolute; inset: 0; background: rgba(0,0,0,.45); }
.modal-content { position: relative; background: #fff; max-width: 900px; max-height: 85vh; overflow: auto; margin: 5vh auto; padding: 24px; border-radius: 8px; }
.modal-close { position: absolute; top: 12px; right: 16px; font-size: 1.5rem; text-decoration: none; color: #666; }
.review-detail-section { margin-top: 16px; }
.repository-stats table { width: 100%; border-collapse: collapse; background: #fff; border-radius: 8px; }
.repository-stats th, .repository-stats td { padding: 8px 12px; text-align: right; border-bottom: 1px solid #eee; }
.repository-stats th:first-child, .repository-stats td:first-child { text-align: left; }
.comment-item { border-left: 4px solid #ccc; padding: 8px 12px; margin-bottom: 8px; background: #fafafa; }
.comment-item.severity-error { border-color: #d9534f; }
.comment-item.severity-warning { border-color: #f0ad4e; }
.comment-item.severity-info { border-color: #5bc0de; }
.comment-file { font-family: monospace; font-size: .85rem; }
.comment-suggestion { margin-top: 6px; color: #2d7a2d; }
.code-example { background: #272822; color: #f8f8f2; padding: 8px; overflow-x: auto; }
.error-section { border: 1px solid #d9534f; padding: 8px 12px; border-radius: 4px; }
"#
}

fn inline_javascript() -> &'static str {
    r#"
document.querySelectorAll('script[data-chart-canvas]').forEach(function (node) {
    var canvas = document.getElementById(node.dataset.chartCanvas);
    if (canvas && window.Chart) {
        new Chart(canvas.getContext('2d'), JSON.parse(node.textContent));
    }
});
"#
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{ChartConfig, ChartSlot};
    use crate::format::Locale;
    use crate::model::CategoryDistribution;
    use crate::page::PageSurface;

    #[test]
    fn test_document_contains_named_elements() {
        let page = Page::new(Locale::Ko);
        let html = page.render_document(
            &DocumentOptions {
                show_repositories: true,
                ..Default::default()
            },
            &ModalState::default(),
        );

        for element in ElementId::ALL {
            assert!(html.contains(&format!(r#"id="{}""#, element)), "missing {}", element);
        }
        assert!(html.contains(r#"id="severityChart""#));
        assert!(html.contains(r#"id="categoryChart""#));
        assert!(!html.contains(r#"id="trendChart""#));
        assert!(html.contains(r#"<meta http-equiv="refresh" content="30">"#));
        assert!(html.contains(r#"style="display: none;""#));
    }

    #[test]
    fn test_repository_section_is_optional() {
        let page = Page::new(Locale::En);
        let html = page.render_document(&DocumentOptions::default(), &ModalState::default());

        assert!(!html.contains(r#"id="repositoryStats""#));
        assert!(!html.contains("Repository Statistics"));
    }

    #[test]
    fn test_text_content_is_escaped_in_document() {
        let mut page = Page::new(Locale::En);
        page.set_text(ElementId::StatsStatus, "<b>down</b>".to_string());
        let html = page.render_document(&DocumentOptions::default(), &ModalState::default());

        assert!(html.contains("&lt;b&gt;down&lt;/b&gt;"));
        assert!(!html.contains("<b>down</b>"));
    }

    #[test]
    fn test_chart_config_script_cannot_break_out() {
        let mut page = Page::new(Locale::Ko);
        let mut slot = ChartSlot::new(CanvasId::Category);
        let dist = CategoryDistribution::from_pairs([
            ("</script><script>alert(1)", 1),
            ("<!--<script>", 2),
            ("a&b", 3),
        ]);
        slot.redraw(&mut page, ChartConfig::categories(&dist, "이슈 수"));

        let html = page.render_document(
            &DocumentOptions {
                refresh_secs: 0,
                show_trends: true,
                show_repositories: false,
            },
            &ModalState::default(),
        );

        let marker = r#"<script type="application/json" data-chart-canvas="categoryChart">"#;
        let start = html.find(marker).unwrap() + marker.len();
        let end = start + html[start..].find("</script>").unwrap();
        let json = &html[start..end];

        assert!(!json.contains('<'));
        assert!(!json.contains('>'));
        assert!(!json.contains('&'));
        assert!(json.contains(r"\u003c!--\u003cscript\u003e"));

        let config: serde_json::Value = serde_json::from_str(json).unwrap();
        assert_eq!(config["data"]["labels"][1], "<!--<script>");
        assert_eq!(config["data"]["labels"][2], "a&b");

        assert!(html.contains(r#"id="trendChart""#));
        assert!(!html.contains("http-equiv"));
    }

    #[test]
    fn test_visible_modal() {
        let page = Page::new(Locale::Ko);
        let modal = ModalState {
            visible: true,
            review_id: Some(4),
            content: "<p>detail</p>".to_string(),
        };
        let html = page.render_document(&DocumentOptions::default(), &modal);

        assert!(html.contains(r#"style="display: block;""#));
        assert!(html.contains(r#"<div id="reviewDetailContent"><p>detail</p></div>"#));
        assert!(html.contains(r#"href="/modal/click?target=backdrop""#));
        assert!(html.contains(r#"href="/modal/close""#));
    }
}
