//! Template context for data every full page needs.

use crate::config::UiConfig;

/// Common context data available to full-page templates.
///
/// Fragments do not carry a context; they only render the parts htmx swaps.
#[derive(Debug, Clone, Default)]
pub struct TemplateContext {
    /// Title shown in the header and the browser tab.
    pub title: String,
}

impl TemplateContext {
    /// Create a new empty template context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Context seeded from the page configuration.
    #[must_use]
    pub fn from_ui(ui: &UiConfig) -> Self {
        Self::new().with_title(ui.title.clone())
    }

    /// Set the page title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_context_builder() {
        let ctx = TemplateContext::from_ui(&UiConfig::default());
        assert_eq!(ctx.title, "User Manager");
        assert_eq!(ctx.with_title("Users").title, "Users");
    }
}
