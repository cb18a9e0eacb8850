//! Page Routes
//!
//! - GET / - The dashboard as a full HTML document
//! - GET /?review=:id - The same document with the detail modal open
//! - GET /api/page - JSON snapshot of the page state
//! - GET /reviews/:id - Open the detail modal for a review

use axum::{
    extract::{Path, Query, State},
    response::{Html, Redirect},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::controller::{DashboardController, ReviewModal};
use crate::page::{ModalState, PageSnapshot};
use crate::server::error::ServerResult;
use crate::server::state::AppState;

/// Which review, if any, this viewer has open
#[derive(Debug, Default, Deserialize)]
pub struct ViewQuery {
    pub review: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct PageResponse {
    #[serde(flatten)]
    pub page: PageSnapshot,
    pub modal: ModalState,
}

/// The modal exists only for this request; nothing is stored between
/// requests.
async fn viewer_modal(
    controller: &DashboardController,
    query: &ViewQuery,
) -> ServerResult<ModalState> {
    let modal = ReviewModal::new();
    if let Some(id) = query.review {
        let outcome = controller.select_review(&modal, id).await?;
        tracing::debug!(review_id = id, ?outcome, "Review detail loaded");
    }
    Ok(modal.state().await)
}

/// GET /
pub async fn index(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ViewQuery>,
) -> ServerResult<Html<String>> {
    let modal = viewer_modal(&state.controller, &query).await?;
    Ok(Html(state.controller.render_document(&modal).await))
}

/// GET /api/page
pub async fn snapshot(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ViewQuery>,
) -> ServerResult<Json<PageResponse>> {
    let modal = viewer_modal(&state.controller, &query).await?;
    Ok(Json(PageResponse {
        page: state.controller.snapshot().await,
        modal,
    }))
}

/// GET /reviews/:id
///
/// Rejects ids the dashboard never listed, then sends the browser to the
/// page with that review open.
pub async fn select_review(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> ServerResult<Redirect> {
    state.controller.check_selectable(id).await?;
    Ok(Redirect::to(&format!("/?review={}", id)))
}
