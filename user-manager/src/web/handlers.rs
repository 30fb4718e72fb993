//! Request handlers.
//!
//! Every handler that changes state answers with the re-rendered contents of
//! `#app`, so the browser never reloads the page. Failures of the remote API
//! are shown as a notice inside that fragment, not as an error status, since
//! htmx does not swap 4xx/5xx responses.

use std::collections::HashMap;

use axum::{
    extract::{Form, Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use axum_htmx::HxRequest;
use serde_json::json;

use super::views::{AppTemplate, AppView, IndexTemplate, PhoneFieldTemplate};
use super::WebState;
use crate::error::Result;
use crate::manager::Outcome;
use crate::model::{Draft, Field, UserId};
use crate::templates::{HtmlTemplate, TemplateContext};

async fn render_app(state: &WebState) -> HtmlTemplate<AppTemplate> {
    let store = state.manager.snapshot().await;
    HtmlTemplate::new(AppTemplate {
        app: AppView::new(&store, &state.ui),
    })
}

/// The page, or just `#app` when htmx asks.
pub async fn index(State(state): State<WebState>, HxRequest(is_htmx): HxRequest) -> Response {
    if is_htmx {
        return render_app(&state).await.into_response();
    }

    let store = state.manager.snapshot().await;
    let ctx = TemplateContext::from_ui(&state.ui);
    HtmlTemplate::new(IndexTemplate {
        ctx,
        app: AppView::new(&store, &state.ui),
    })
    .into_response()
}

/// Fetch the list again from the API.
pub async fn reload(State(state): State<WebState>) -> Response {
    // A failed load leaves the previous list and sets an error notice.
    if state.manager.load().await.is_err() {
        tracing::debug!("Reload failed, rendering previous list");
    }
    render_app(&state).await.into_response()
}

/// Save the submitted form: create without an id, update with one.
pub async fn submit(State(state): State<WebState>, Form(draft): Form<Draft>) -> Response {
    let outcome = state.manager.submit_draft(draft).await;
    let fragment = render_app(&state).await;
    match outcome {
        Outcome::Created(_) | Outcome::Updated(_) => {
            fragment.with_hx_trigger("userSaved").into_response()
        }
        _ => fragment.into_response(),
    }
}

/// Load a listed record into the form.
pub async fn edit(State(state): State<WebState>, Path(id): Path<UserId>) -> Result<Response> {
    state.manager.select(id).await?;
    Ok(render_app(&state).await.into_response())
}

pub async fn delete(State(state): State<WebState>, Path(id): Path<UserId>) -> Response {
    let outcome = state.manager.delete(id).await;
    let fragment = render_app(&state).await;
    match outcome {
        Outcome::Removed(_) => fragment.with_hx_trigger("userDeleted").into_response(),
        _ => fragment.into_response(),
    }
}

/// One field changed while typing.
///
/// htmx posts the whole enclosing form; only the named field is taken.
/// Phone input answers with its re-rendered field so the mask becomes
/// visible; other fields need no swap.
pub async fn input(
    State(state): State<WebState>,
    Path(field): Path<String>,
    Form(values): Form<HashMap<String, String>>,
) -> Result<Response> {
    let field: Field = field.parse()?;
    let value = values.get(field.form_name()).cloned().unwrap_or_default();
    state.manager.input(field, value).await;

    if field == Field::Phone {
        let store = state.manager.snapshot().await;
        return Ok(HtmlTemplate::new(PhoneFieldTemplate::new(&store)).into_response());
    }
    Ok(StatusCode::NO_CONTENT.into_response())
}

/// Abandon the draft and return to add mode.
pub async fn clear(State(state): State<WebState>) -> Response {
    state.manager.clear().await;
    render_app(&state).await.into_response()
}

/// Hide the notice; the element is swapped for nothing.
pub async fn dismiss(State(state): State<WebState>) -> Html<&'static str> {
    state.manager.dismiss().await;
    Html("")
}

pub async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}
