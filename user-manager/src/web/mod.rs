//! The browser-facing surface: one page, driven by htmx.
//!
//! | Method | Path                | Effect                                   |
//! |--------|---------------------|------------------------------------------|
//! | GET    | `/`                 | page (or `#app` for htmx)                |
//! | GET    | `/users`            | reload the list from the API             |
//! | POST   | `/users`            | submit the form                          |
//! | GET    | `/users/{id}/edit`  | load a record into the form              |
//! | DELETE | `/users/{id}`       | delete a record                          |
//! | POST   | `/draft/{field}`    | one field changed while typing           |
//! | POST   | `/draft/clear`      | back to add mode                         |
//! | DELETE | `/notice`           | hide the notice                          |
//! | GET    | `/health`           | liveness                                 |

mod handlers;
pub mod views;

use std::sync::Arc;

use axum::{
    routing::{delete, get, post},
    Router,
};
use axum_htmx::AutoVaryLayer;

use crate::config::UiConfig;
use crate::manager::SharedManager;

/// State shared by all handlers.
#[derive(Debug, Clone)]
pub struct WebState {
    pub manager: SharedManager,
    pub ui: Arc<UiConfig>,
}

impl WebState {
    pub fn new(manager: SharedManager, ui: UiConfig) -> Self {
        Self {
            manager,
            ui: Arc::new(ui),
        }
    }
}

/// Build the application router.
pub fn router(state: WebState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/users", get(handlers::reload).post(handlers::submit))
        .route("/users/{id}", delete(handlers::delete))
        .route("/users/{id}/edit", get(handlers::edit))
        .route("/draft/clear", post(handlers::clear))
        .route("/draft/{field}", post(handlers::input))
        .route("/notice", delete(handlers::dismiss))
        .route("/health", get(handlers::health))
        .with_state(state)
        .layer(AutoVaryLayer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manager::testing::{Call, FakeApi};
    use crate::manager::UserManager;
    use crate::model::{Field, UserRecord};
    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
    };
    use tower::ServiceExt;

    fn user(id: u64, name: &str) -> UserRecord {
        UserRecord {
            id,
            name: name.to_string(),
            email: format!("{}@x.io", name.to_lowercase()),
            phone: String::new(),
            address: String::new(),
        }
    }

    async fn setup(api: FakeApi) -> (Arc<FakeApi>, SharedManager, Router) {
        let api = Arc::new(api);
        let manager = Arc::new(UserManager::new(api.clone()));
        manager.load().await.unwrap();
        let app = router(WebState::new(manager.clone(), UiConfig::default()));
        (api, manager, app)
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, String) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    fn form(method: Method, uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .header("hx-request", "true")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn htmx(method: Method, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("hx-request", "true")
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_index_full_page() {
        let (_, _, app) = setup(FakeApi::with_users(vec![user(1, "Ana")])).await;
        let request = Request::get("/").body(Body::empty()).unwrap();

        let (status, body) = send(app, request).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.starts_with("<!DOCTYPE html>"));
        assert!(body.contains("<title>User Manager</title>"));
        assert!(body.contains("Ana - ana@x.io"));
    }

    #[tokio::test]
    async fn test_index_fragment_for_htmx() {
        let (_, _, app) = setup(FakeApi::with_users(vec![user(1, "Ana")])).await;

        let (status, body) = send(app, htmx(Method::GET, "/")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(!body.contains("<!DOCTYPE html>"));
        assert!(body.contains("Ana - ana@x.io"));
    }

    #[tokio::test]
    async fn test_submit_creates_and_renders() {
        let (api, _, app) = setup(FakeApi::default()).await;
        let request = form(
            Method::POST,
            "/users",
            "nome=Bo&email=bo%40x.io&telefone=11987654321&endereco=Rua+B",
        );

        let (status, body) = send(app, request).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("User added successfully!"));
        assert!(body.contains("Bo - bo@x.io"));
        assert!(body.contains("Phone: (11) 98765-4321, Address: Rua B"));
        assert!(matches!(api.calls().last(), Some(Call::Create(_))));
    }

    #[tokio::test]
    async fn test_submit_with_id_updates() {
        let (api, _, app) = setup(FakeApi::with_users(vec![user(3, "Ana")])).await;
        let request = form(Method::POST, "/users", "id=3&nome=Ana+Maria&email=ana%40x.io");

        let (_, body) = send(app, request).await;
        assert!(body.contains("User updated successfully!"));
        assert!(body.contains("Ana Maria - ana@x.io"));
        assert!(matches!(api.calls().last(), Some(Call::Update(3, _))));
    }

    #[tokio::test]
    async fn test_submit_invalid_shows_field_errors() {
        let (api, _, app) = setup(FakeApi::default()).await;
        let request = form(Method::POST, "/users", "nome=&email=nope");

        let (status, body) = send(app, request).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Name is required."));
        assert!(body.contains("Invalid email."));
        assert_eq!(api.calls(), vec![Call::List]);
    }

    #[tokio::test]
    async fn test_failed_create_shows_error_notice() {
        let (api, _, app) = setup(FakeApi::with_users(vec![user(1, "Ana")])).await;
        api.fail.store(true, std::sync::atomic::Ordering::SeqCst);

        let (_, body) = send(app, form(Method::POST, "/users", "nome=Bo&email=bo%40x.io")).await;
        assert!(body.contains("Error saving user."));
        assert!(body.contains("role=\"alert\""));
        assert!(!body.contains("Bo - bo@x.io"));
    }

    #[tokio::test]
    async fn test_delete_drops_row() {
        let (_, _, app) =
            setup(FakeApi::with_users(vec![user(4, "Ana"), user(5, "Bo")])).await;

        let (status, body) = send(app, htmx(Method::DELETE, "/users/5")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("User deleted successfully!"));
        assert!(body.contains("id=\"user-4\""));
        assert!(!body.contains("id=\"user-5\""));
    }

    #[tokio::test]
    async fn test_edit_loads_form() {
        let (_, _, app) = setup(FakeApi::with_users(vec![user(5, "Bo")])).await;

        let (status, body) = send(app, htmx(Method::GET, "/users/5/edit")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Edit User"));
        assert!(body.contains("name=\"id\" value=\"5\""));
        assert!(body.contains("value=\"Bo\""));
    }

    #[tokio::test]
    async fn test_edit_unknown_id() {
        let (_, _, app) = setup(FakeApi::default()).await;
        let (status, _) = send(app, htmx(Method::GET, "/users/99/edit")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_phone_input_is_masked() {
        let (_, manager, app) = setup(FakeApi::default()).await;

        let (status, body) =
            send(app, form(Method::POST, "/draft/telefone", "nome=&telefone=11987654321")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("id=\"phone-field\""));
        assert!(body.contains("value=\"(11) 98765-4321\""));
        assert_eq!(manager.snapshot().await.draft().phone, "(11) 98765-4321");
    }

    #[tokio::test]
    async fn test_phone_input_rejects_letters() {
        let (_, _, app) = setup(FakeApi::default()).await;
        let (_, body) = send(app, form(Method::POST, "/draft/telefone", "telefone=11a")).await;
        assert!(body.contains("Only numbers are allowed."));
    }

    #[tokio::test]
    async fn test_text_input_updates_draft() {
        let (_, manager, app) = setup(FakeApi::default()).await;

        let (status, body) =
            send(app, form(Method::POST, "/draft/nome", "nome=Ana&email=")).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(body.is_empty());
        assert_eq!(manager.snapshot().await.draft().get(Field::Name), "Ana");
    }

    #[tokio::test]
    async fn test_unknown_field_is_bad_request() {
        let (_, _, app) = setup(FakeApi::default()).await;
        let (status, _) = send(app, form(Method::POST, "/draft/idade", "idade=3")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_clear_returns_to_add_mode() {
        let (_, manager, app) = setup(FakeApi::with_users(vec![user(5, "Bo")])).await;
        manager.select(5).await.unwrap();

        let (_, body) = send(app, htmx(Method::POST, "/draft/clear")).await;
        assert!(body.contains("Add User"));
        assert!(!manager.snapshot().await.draft().is_edit());
    }

    #[tokio::test]
    async fn test_dismiss_notice() {
        let (_, manager, app) = setup(FakeApi::with_users(vec![user(5, "Bo")])).await;
        manager.delete(5).await;
        assert!(manager.snapshot().await.notice().is_some());

        let (status, body) = send(app, htmx(Method::DELETE, "/notice")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.is_empty());
        assert!(manager.snapshot().await.notice().is_none());
    }

    #[tokio::test]
    async fn test_reload_picks_up_server_changes() {
        let (api, _, app) = setup(FakeApi::default()).await;
        api.users.lock().unwrap().push(user(9, "Cy"));

        let (_, body) = send(app, htmx(Method::GET, "/users")).await;
        assert!(body.contains("Cy - cy@x.io"));
        assert!(body.contains("1 user"));
    }

    #[tokio::test]
    async fn test_health() {
        let (_, _, app) = setup(FakeApi::default()).await;
        let (status, body) = send(app, htmx(Method::GET, "/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, r#"{"status":"ok"}"#);
    }
}
