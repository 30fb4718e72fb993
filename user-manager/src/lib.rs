//! # user-manager
//!
//! A form-and-list manager for user records kept behind a REST API.
//!
//! The page is rendered on the server and driven by htmx: adding, editing and
//! deleting a record swaps fragments in place, the page never reloads.
//!
//! ## Features
//!
//! - **CRUD**: list, create, update and delete against `GET/POST/PATCH/DELETE /usuario`
//! - **Validation**: required name, required and well-formed email
//! - **Phone mask**: Brazilian `(DD) NNNNN-NNNN` formatting while typing
//! - **Notices**: transient success and error messages after each operation
//! - **Graceful shutdown**: Proper signal handling (SIGTERM, SIGINT)
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use user_manager::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = Config::load()?;
//!     init_tracing(&config)?;
//!
//!     let api = Arc::new(HttpUserApi::new(&config.api)?);
//!     let manager = Arc::new(UserManager::new(api));
//!     manager.load().await?;
//!
//!     let app = router(WebState::new(manager, config.ui.clone()));
//!     Server::new(config).serve(app).await
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod manager;
pub mod model;
pub mod notice;
pub mod observability;
pub mod phone;
pub mod server;
pub mod store;
pub mod templates;
pub mod validation;
pub mod web;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::client::{ClientError, HttpUserApi, UserApi};
    pub use crate::config::{ApiConfig, Config, UiConfig};
    pub use crate::error::{Error, Result};
    pub use crate::manager::{Outcome, SharedManager, UserManager};
    pub use crate::model::{Draft, Field, UserId, UserRecord};
    pub use crate::notice::{Notice, NoticeKind};
    pub use crate::observability::init_tracing;
    pub use crate::server::Server;
    pub use crate::store::{Action, UserStore};
    pub use crate::validation::{validate, FieldErrors};
    pub use crate::web::{router, WebState};
}
