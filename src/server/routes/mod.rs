//! Route handlers organized by functionality.

pub mod health;
pub mod modal;
pub mod page;
