//! Per-Viewer Review Modal
//!
//! The modal is owned by whoever is looking at the page, never by the shared
//! dashboard. A detail load writes into the `ReviewModal` it was started
//! with, so two viewers never see each other's modal.

use tokio::sync::Mutex;

use crate::page::ModalState;

/// One viewer's modal, shared between a pending detail load and the
/// handlers that close it
#[derive(Debug, Default)]
pub struct ReviewModal {
    state: Mutex<ModalState>,
}

impl ReviewModal {
    pub fn new() -> Self {
        Self::default()
    }

    /// A modal the viewer already has open on `review_id`, before any
    /// content is loaded into it
    pub fn reopened(review_id: Option<u64>) -> Self {
        Self {
            state: Mutex::new(ModalState {
                visible: review_id.is_some(),
                review_id,
                content: String::new(),
            }),
        }
    }

    pub async fn state(&self) -> ModalState {
        self.state.lock().await.clone()
    }

    pub async fn is_visible(&self) -> bool {
        self.state.lock().await.visible
    }

    pub(super) async fn open(&self, id: u64, placeholder: String) {
        let mut state = self.state.lock().await;
        state.visible = true;
        state.review_id = Some(id);
        state.content = placeholder;
    }

    /// Replace the content without touching visibility
    pub(super) async fn set_content(&self, html: String) {
        self.state.lock().await.content = html;
    }

    pub(super) async fn hide(&self) {
        self.state.lock().await.visible = false;
    }
}
