//! Askama template integration for the server-rendered page.
//!
//! Templates live in the crate's `templates/` directory and are compiled into
//! the binary. A page is rendered once as a full document; afterwards htmx
//! swaps in fragments rendered from the same partials.
//!
//! # HTMX-Aware Handlers
//!
//! ```rust,ignore
//! use axum_htmx::HxRequest;
//! use user_manager::templates::HtmlTemplate;
//!
//! async fn index(HxRequest(is_htmx): HxRequest) -> impl IntoResponse {
//!     if is_htmx {
//!         HtmlTemplate::new(AppTemplate { app }).into_response()
//!     } else {
//!         HtmlTemplate::new(IndexTemplate { ctx, app }).into_response()
//!     }
//! }
//! ```

mod context;
mod helpers;
mod response;

pub use context::TemplateContext;
pub use helpers::{classes, pluralize};
pub use response::HtmlTemplate;

// Re-export askama Template derive for convenience
pub use askama::Template;
