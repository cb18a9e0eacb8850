//! Recent Review List

use chrono::{DateTime, FixedOffset};

use crate::format::{escape_html, format_duration, format_relative, severity_badges, Locale};
use crate::model::ReviewSummary;
use crate::page::{ElementId, PageSurface};

/// One rendered review row
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewRowView {
    pub id: u64,
    pub repository: String,
    pub relative_time: String,
    pub pr_number: u64,
    pub pr_title: String,
    pub total_comments: u64,
    /// Badge markup, empty when every count is zero
    pub severity_badges: String,
    pub processing_time: String,
}

/// The review list region
#[derive(Debug, Clone, PartialEq)]
pub enum ReviewListView {
    Empty,
    Rows(Vec<ReviewRowView>),
}

impl ReviewListView {
    pub fn build(reviews: &[ReviewSummary], now: DateTime<FixedOffset>, locale: Locale) -> Self {
        if reviews.is_empty() {
            return ReviewListView::Empty;
        }

        ReviewListView::Rows(
            reviews
                .iter()
                .map(|review| ReviewRowView {
                    id: review.id,
                    repository: review.repository(),
                    relative_time: format_relative(review.created_at.as_deref(), now, locale),
                    pr_number: review.pr_number,
                    pr_title: review.pr_title.clone(),
                    total_comments: review.total_comments,
                    severity_badges: severity_badges(&review.severity_counts),
                    processing_time: format_duration(review.processing_time_ms, locale),
                })
                .collect(),
        )
    }

    pub fn row_count(&self) -> usize {
        match self {
            ReviewListView::Empty => 0,
            ReviewListView::Rows(rows) => rows.len(),
        }
    }

    /// Markup for the list container.
    ///
    /// With `link_rows` each row links to its detail view; otherwise rows are
    /// inert.
    pub fn to_html(&self, locale: Locale, link_rows: bool) -> String {
        let m = locale.messages();
        let rows = match self {
            ReviewListView::Empty => {
                return format!(r#"<div class="loading">{}</div>"#, m.no_reviews);
            }
            ReviewListView::Rows(rows) => rows,
        };

        rows.iter()
            .map(|row| {
                let (open, close, action) = if link_rows {
                    (
                        format!(
                            r#"<a class="review-item" href="/reviews/{id}" data-review-id="{id}">"#,
                            id = row.id
                        ),
                        "</a>",
                        format!(
                            r#"<div class="review-action"><span class="view-detail">{}</span></div>"#,
                            m.view_detail
                        ),
                    )
                } else {
                    (
                        format!(r#"<div class="review-item" data-review-id="{}">"#, row.id),
                        "</div>",
                        String::new(),
                    )
                };

                format!(
                    r#"{open}
    <div class="review-header">
        <span class="review-repo">{repo}</span>
        <span class="review-time">{time}</span>
    </div>
    <div class="review-title">PR #{number}: {title}</div>
    <div class="review-meta">
        <span>{comments_label}: {comments}</span>
        {badges}
        <span>{processing_label}: {processing}</span>
    </div>
    {action}
{close}"#,
                    open = open,
                    repo = escape_html(&row.repository),
                    time = escape_html(&row.relative_time),
                    number = row.pr_number,
                    title = escape_html(&row.pr_title),
                    comments_label = m.comments_label,
                    comments = row.total_comments,
                    badges = row.severity_badges,
                    processing_label = m.processing_time_label,
                    processing = row.processing_time,
                    action = action,
                    close = close,
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Placeholder shown when the list could not be fetched
pub fn review_list_error_html(locale: Locale) -> String {
    format!(
        r#"<div class="error">{}</div>"#,
        locale.messages().reviews_load_failed
    )
}

/// Replace the review list region
pub fn apply_review_list<S: PageSurface + ?Sized>(
    surface: &mut S,
    view: &ReviewListView,
    locale: Locale,
    link_rows: bool,
) {
    surface.set_html(ElementId::ReviewList, view.to_html(locale, link_rows));
}

/// Degraded state after a failed list fetch
pub fn apply_review_list_failure<S: PageSurface + ?Sized>(surface: &mut S, locale: Locale) {
    surface.set_html(ElementId::ReviewList, review_list_error_html(locale));
}
