//! View models and askama templates for the page.
//!
//! Views are flattened copies of the store: templates only read plain fields
//! so they stay free of logic.

use crate::config::UiConfig;
use crate::model::{Field, UserId, UserRecord};
use crate::notice::Notice;
use crate::store::UserStore;
use crate::templates::{classes, pluralize, Template, TemplateContext};

/// One line of the user list.
#[derive(Debug, Clone, PartialEq)]
pub struct UserRow {
    pub id: UserId,
    /// `"<name> - <email>"`
    pub primary: String,
    /// `"Phone: <phone>, Address: <address>"`
    pub secondary: String,
    /// Whether this row is the record being edited.
    pub selected: bool,
}

impl UserRow {
    fn new(user: &UserRecord, selected: bool) -> Self {
        Self {
            id: user.id,
            primary: format!("{} - {}", user.name, user.email),
            secondary: format!("Phone: {}, Address: {}", user.phone, user.address),
            selected,
        }
    }
}

/// A single labelled input of the form.
#[derive(Debug, Clone, PartialEq)]
pub struct InputView {
    /// Form name, also used as the element id.
    pub name: &'static str,
    pub label: &'static str,
    pub input_type: &'static str,
    pub value: String,
    pub error: Option<String>,
    pub css_class: &'static str,
    pub required: bool,
}

impl InputView {
    fn new(store: &UserStore, field: Field) -> Self {
        let error = store.errors().get(field).map(str::to_string);
        Self {
            name: field.form_name(),
            label: field.label(),
            input_type: match field {
                Field::Email => "email",
                Field::Phone => "tel",
                Field::Name | Field::Address => "text",
            },
            value: store.draft().get(field).to_string(),
            css_class: classes(error.is_some(), "input invalid", "input"),
            required: matches!(field, Field::Name | Field::Email),
            error,
        }
    }
}

/// The add/edit form.
#[derive(Debug, Clone, PartialEq)]
pub struct FormView {
    pub id: Option<UserId>,
    pub heading: &'static str,
    pub submit_label: &'static str,
    pub name: InputView,
    pub email: InputView,
    pub phone: InputView,
    pub address: InputView,
    pub busy: bool,
}

impl FormView {
    fn new(store: &UserStore) -> Self {
        let editing = store.draft().is_edit();
        Self {
            id: store.draft().id,
            heading: if editing { "Edit User" } else { "Add User" },
            submit_label: if editing { "Update" } else { "Add" },
            name: InputView::new(store, Field::Name),
            email: InputView::new(store, Field::Email),
            phone: InputView::new(store, Field::Phone),
            address: InputView::new(store, Field::Address),
            busy: store.in_flight(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NoticeView {
    pub css_class: &'static str,
    pub role: &'static str,
    pub message: String,
}

impl From<&Notice> for NoticeView {
    fn from(notice: &Notice) -> Self {
        Self {
            css_class: notice.kind.css_class(),
            role: notice.kind.role(),
            message: notice.message.clone(),
        }
    }
}

/// Everything inside `#app`: notice, list and form.
#[derive(Debug, Clone, PartialEq)]
pub struct AppView {
    pub users: Vec<UserRow>,
    pub count_label: String,
    pub form: FormView,
    pub notice: Option<NoticeView>,
    pub notice_timeout_ms: u64,
}

impl AppView {
    pub fn new(store: &UserStore, ui: &UiConfig) -> Self {
        let editing = store.draft().id;
        let count = store.users().len();
        Self {
            users: store
                .users()
                .iter()
                .map(|u| UserRow::new(u, editing == Some(u.id)))
                .collect(),
            count_label: format!("{} {}", count, pluralize(count, "user", "users")),
            form: FormView::new(store),
            notice: store.notice().map(NoticeView::from),
            notice_timeout_ms: ui.notice_timeout_ms,
        }
    }
}

/// Full document.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub ctx: TemplateContext,
    pub app: AppView,
}

/// Contents of `#app`, swapped after every mutation.
#[derive(Template)]
#[template(path = "app.html")]
pub struct AppTemplate {
    pub app: AppView,
}

/// The phone input alone, swapped while typing so the mask shows up.
#[derive(Template)]
#[template(path = "phone_field.html")]
pub struct PhoneFieldTemplate {
    pub input: InputView,
}

impl PhoneFieldTemplate {
    pub fn new(store: &UserStore) -> Self {
        Self {
            input: InputView::new(store, Field::Phone),
        }
    }
}
