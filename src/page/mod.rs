//! Host Document
//!
//! The page the dashboard populates. It exposes a fixed set of named
//! elements, three chart canvases and a modal overlay; renderers only ever
//! fill these in, they never create structure.

mod document;
mod element;
mod template;

pub use document::{Content, LiveChart, ModalState, Page, PageSnapshot, PageSurface};
pub use element::ElementId;
pub use template::DocumentOptions;
