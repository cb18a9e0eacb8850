//! Modal Routes
//!
//! - GET /modal/close - Close control
//! - GET /modal/click?target=backdrop|content[&review=:id] - Pointer-down on
//!   the modal
//!
//! The open review travels in the URL, so both routes only pick where the
//! browser goes next.

use axum::{
    extract::{Query, State},
    response::Redirect,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::controller::{PointerTarget, ReviewModal};
use crate::page::ModalState;
use crate::server::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ClickQuery {
    pub target: PointerTarget,
    pub review: Option<u64>,
}

fn location(modal: &ModalState) -> String {
    match modal.review_id {
        Some(id) if modal.visible => format!("/?review={}", id),
        _ => "/".to_string(),
    }
}

/// GET /modal/close
pub async fn close() -> Redirect {
    Redirect::to("/")
}

/// GET /modal/click
pub async fn click(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ClickQuery>,
) -> Redirect {
    let modal = ReviewModal::reopened(query.review);
    state.controller.pointer_down(&modal, query.target).await;
    Redirect::to(&location(&modal.state().await))
}
