//! Dashboard use-case services.
//!
//! # Responsibility
//! - Compose filtering, classification and summaries into renderable views.
//! - Keep front-ends decoupled from store and engine details.

pub mod dashboard_service;
pub mod link;
pub mod selection;
pub mod summary;
