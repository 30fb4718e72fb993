//! Component state and its reducer.
//!
//! [`UserStore`] is a plain value. It changes only through
//! [`UserStore::apply`], so every transition of the page (typing, selecting a
//! row, a server answer) is one [`Action`] and can be tested without I/O.

use crate::model::{Draft, Field, UserId, UserRecord};
use crate::notice::{self, Notice};
use crate::phone;
use crate::validation::FieldErrors;

/// A state transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Fresh list from the server.
    Loaded(Vec<UserRecord>),
    /// One keystroke's worth of input into a draft field.
    Input { field: Field, value: String },
    /// Start editing a listed record.
    Select(UserRecord),
    /// Overwrite the whole draft, e.g. from a submitted form.
    ReplaceDraft(Draft),
    /// Abandon the current draft.
    ClearDraft,
    ValidationFailed(FieldErrors),
    /// The current draft has been sent as a create or update.
    SubmitStarted,
    /// A delete request has been issued.
    RequestStarted,
    Created(UserRecord),
    Updated(UserRecord),
    Removed(UserId),
    /// A mutation failed; nothing but the notice changes.
    Failed(Notice),
    /// Listing failed. Unlike [`Action::Failed`] this does not end a
    /// mutation that may still be in flight.
    LoadFailed(Notice),
    DismissNotice,
}

/// The list, the draft and what the page shows around them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserStore {
    users: Vec<UserRecord>,
    draft: Draft,
    errors: FieldErrors,
    notice: Option<Notice>,
    in_flight: bool,
    /// Draft as it was sent, until the server answers.
    submitted: Option<Draft>,
}

impl UserStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn users(&self) -> &[UserRecord] {
        &self.users
    }

    #[must_use]
    pub fn user(&self, id: UserId) -> Option<&UserRecord> {
        self.users.iter().find(|u| u.id == id)
    }

    #[must_use]
    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    #[must_use]
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    #[must_use]
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Whether a mutation request is awaiting its answer.
    #[must_use]
    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn apply(&mut self, action: Action) {
        match action {
            Action::Loaded(records) => {
                self.users.clear();
                for record in records {
                    self.upsert(record);
                }
            }
            Action::Input { field, value } => self.input(field, value),
            Action::Select(record) => {
                self.draft = Draft::from(record);
                self.errors = FieldErrors::new();
            }
            Action::ReplaceDraft(mut draft) => {
                draft.phone = phone::format(&draft.phone);
                self.draft = draft;
            }
            Action::ClearDraft => self.reset_draft(),
            Action::ValidationFailed(errors) => self.errors = errors,
            Action::SubmitStarted => {
                self.submitted = Some(self.draft.clone());
                self.in_flight = true;
            }
            Action::RequestStarted => self.in_flight = true,
            Action::Created(record) => {
                self.upsert(record);
                self.reset_submitted_draft();
                self.finish(Notice::success(notice::USER_ADDED));
            }
            Action::Updated(record) => {
                self.upsert(record);
                self.reset_submitted_draft();
                self.finish(Notice::success(notice::USER_UPDATED));
            }
            Action::Removed(id) => {
                self.users.retain(|u| u.id != id);
                if self.draft.id == Some(id) {
                    self.reset_draft();
                }
                self.finish(Notice::success(notice::USER_DELETED));
            }
            Action::Failed(notice) => self.finish(notice),
            Action::LoadFailed(notice) => self.notice = Some(notice),
            Action::DismissNotice => self.notice = None,
        }
    }

    fn input(&mut self, field: Field, value: String) {
        if field == Field::Phone {
            let parsed = phone::parse(&value);
            self.draft.phone = parsed.formatted;
            match parsed.error {
                Some(msg) => self.errors.insert(Field::Phone, msg),
                None => self.errors.clear(Field::Phone),
            }
        } else {
            self.draft.set(field, value);
            self.errors.clear(field);
        }
    }

    // Replace in place when the id is known, otherwise append.
    fn upsert(&mut self, record: UserRecord) {
        match self.users.iter_mut().find(|u| u.id == record.id) {
            Some(existing) => *existing = record,
            None => self.users.push(record),
        }
    }

    fn reset_draft(&mut self) {
        self.draft = Draft::default();
        self.errors = FieldErrors::new();
    }

    // Edits made while the request was in flight survive its success.
    fn reset_submitted_draft(&mut self) {
        if self.submitted.as_ref() == Some(&self.draft) {
            self.reset_draft();
        }
    }

    fn finish(&mut self, notice: Notice) {
        self.in_flight = false;
        self.submitted = None;
        self.notice = Some(notice);
    }
}
