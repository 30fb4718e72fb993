//! Template response helper for full pages and HTMX fragments.

use askama::Template;
use axum::{
    http::{HeaderName, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Response},
};

/// Wrapper for rendering templates as HTML responses.
///
/// Rendering failures are logged and answered with a 500 carrying an HTML
/// comment, so htmx swaps in nothing visible.
pub struct HtmlTemplate<T: Template> {
    template: T,
    headers: Vec<(HeaderName, String)>,
}

impl<T: Template> HtmlTemplate<T> {
    #[must_use]
    pub fn new(template: T) -> Self {
        Self {
            template,
            headers: Vec::new(),
        }
    }

    /// Add a custom header.
    #[must_use]
    pub fn with_header(mut self, name: HeaderName, value: impl Into<String>) -> Self {
        self.headers.push((name, value.into()));
        self
    }

    /// Add HX-Trigger header for HTMX events.
    #[must_use]
    pub fn with_hx_trigger(self, event: impl Into<String>) -> Self {
        self.with_header(HeaderName::from_static("hx-trigger"), event)
    }
}

impl<T: Template> IntoResponse for HtmlTemplate<T> {
    fn into_response(self) -> Response {
        match self.template.render() {
            Ok(html) => {
                let mut response = Html(html).into_response();

                for (name, value) in self.headers {
                    if let Ok(value) = HeaderValue::from_str(&value) {
                        response.headers_mut().insert(name, value);
                    }
                }

                response
            }
            Err(err) => {
                tracing::error!("Template rendering error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Html("<!-- template error -->".to_string()),
                )
                    .into_response()
            }
        }
    }
}
