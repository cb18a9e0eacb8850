//! Renderers
//!
//! Each renderer is split into a pure view builder and an `apply_*` step that
//! writes the result into a `PageSurface`.

mod detail;
mod repositories;
mod reviews;
mod stats;

pub use detail::{detail_error_html, detail_loading_html, render_review_detail};
pub use repositories::{
    apply_repository_table, apply_repository_table_failure, repository_table_error_html,
    RepositoryRowView, RepositoryTableView,
};
pub use reviews::{
    apply_review_list, apply_review_list_failure, review_list_error_html, ReviewListView,
    ReviewRowView,
};
pub use stats::{apply_statistics, apply_statistics_failure, apply_trends, StatisticsView};
