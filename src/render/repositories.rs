//! Per-Repository Statistics Table

use crate::format::{escape_html, format_duration, Locale};
use crate::model::RepositoryStatistics;
use crate::page::{ElementId, PageSurface};

/// One table row, already formatted
#[derive(Debug, Clone, PartialEq)]
pub struct RepositoryRowView {
    pub repository: String,
    pub total_pull_requests: u64,
    pub total_reviews: u64,
    pub total_comments: u64,
    pub avg_comments: String,
    pub avg_processing_time: String,
    pub total_tokens: u64,
}

/// The repository table region
#[derive(Debug, Clone, PartialEq)]
pub enum RepositoryTableView {
    Empty,
    Rows(Vec<RepositoryRowView>),
}

impl RepositoryTableView {
    pub fn build(repositories: &RepositoryStatistics, locale: Locale) -> Self {
        if repositories.is_empty() {
            return RepositoryTableView::Empty;
        }

        RepositoryTableView::Rows(
            repositories
                .iter()
                .map(|(name, stats)| RepositoryRowView {
                    repository: name.to_string(),
                    total_pull_requests: stats.total_pull_requests,
                    total_reviews: stats.total_reviews,
                    total_comments: stats.total_comments,
                    avg_comments: format!("{:.1}", stats.average_comments_per_review),
                    avg_processing_time: format_duration(
                        Some(stats.average_processing_time_ms),
                        locale,
                    ),
                    total_tokens: stats.total_tokens_used,
                })
                .collect(),
        )
    }

    pub fn to_html(&self, locale: Locale) -> String {
        let m = locale.messages();
        let rows = match self {
            RepositoryTableView::Empty => {
                return format!(r#"<div class="loading">{}</div>"#, m.no_repositories);
            }
            RepositoryTableView::Rows(rows) => rows,
        };

        let body = rows
            .iter()
            .map(|row| {
                format!(
                    "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                    escape_html(&row.repository),
                    row.total_pull_requests,
                    row.total_reviews,
                    row.total_comments,
                    row.avg_comments,
                    row.avg_processing_time,
                    row.total_tokens
                )
            })
            .collect::<String>();

        format!(
            "<table><thead><tr><th>{}</th><th>{}</th><th>{}</th><th>{}</th><th>{}</th><th>{}</th><th>{}</th></tr></thead><tbody>{}</tbody></table>",
            m.repository_label,
            m.total_pull_requests_label,
            m.total_reviews_label,
            m.total_comments_label,
            m.avg_comments_label,
            m.avg_processing_time_label,
            m.total_tokens_label,
            body
        )
    }
}

pub fn repository_table_error_html(locale: Locale) -> String {
    format!(
        r#"<div class="error">{}</div>"#,
        locale.messages().repositories_load_failed
    )
}

pub fn apply_repository_table<S: PageSurface + ?Sized>(
    surface: &mut S,
    view: &RepositoryTableView,
    locale: Locale,
) {
    surface.set_html(ElementId::RepositoryStats, view.to_html(locale));
}

pub fn apply_repository_table_failure<S: PageSurface + ?Sized>(surface: &mut S, locale: Locale) {
    surface.set_html(ElementId::RepositoryStats, repository_table_error_html(locale));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::OverallStats;
    use crate::page::Page;

    fn repositories() -> RepositoryStatistics {
        RepositoryStatistics::from_pairs([
            (
                "acme/web<beta>",
                OverallStats {
                    total_reviews: 4,
                    total_comments: 10,
                    average_comments_per_review: 2.5,
                    average_processing_time_ms: 850,
                    ..Default::default()
                },
            ),
            (
                "acme/api",
                OverallStats {
                    total_pull_requests: 7,
                    total_reviews: 9,
                    average_processing_time_ms: 2500,
                    total_tokens_used: 4000,
                    ..Default::default()
                },
            ),
        ])
    }

    #[test]
    fn test_rows_sorted_and_formatted() {
        let view = RepositoryTableView::build(&repositories(), Locale::Ko);
        let RepositoryTableView::Rows(rows) = &view else {
            panic!("expected rows");
        };

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].repository, "acme/api");
        assert_eq!(rows[0].avg_processing_time, "2.5초");
        assert_eq!(rows[0].total_tokens, 4000);
        assert_eq!(rows[1].avg_comments, "2.5");
        assert_eq!(rows[1].avg_processing_time, "850ms");
    }

    #[test]
    fn test_table_markup_escapes_names() {
        let html = RepositoryTableView::build(&repositories(), Locale::En).to_html(Locale::En);

        assert!(html.starts_with("<table><thead><tr><th>Repository</th>"));
        assert_eq!(html.matches("<tr><td>").count(), 2);
        assert!(html.contains("<td>acme/web&lt;beta&gt;</td>"));
        assert!(!html.contains("<beta>"));
    }

    #[test]
    fn test_empty_and_failure_placeholders() {
        let mut page = Page::new(Locale::Ko);

        apply_repository_table(
            &mut page,
            &RepositoryTableView::build(&RepositoryStatistics::default(), Locale::Ko),
            Locale::Ko,
        );
        assert_eq!(
            page.html(ElementId::RepositoryStats),
            Some(r#"<div class="loading">저장소가 없습니다.</div>"#)
        );

        apply_repository_table_failure(&mut page, Locale::Ko);
        assert_eq!(
            page.html(ElementId::RepositoryStats),
            Some(r#"<div class="error">저장소 통계를 불러오는데 실패했습니다.</div>"#)
        );
    }
}
