//! The user manager component.
//!
//! Ties the store, the validator and the sync client together. The store sits
//! behind an async lock that is never held across a request to the API, so
//! the page stays responsive while a call is in flight.

use std::sync::Arc;
use tokio::sync::RwLock;

use crate::client::UserApi;
use crate::error::{Error, Result};
use crate::model::{Draft, Field, UserId, UserRecord};
use crate::notice::{self, Notice};
use crate::store::{Action, UserStore};
use crate::validation::{validate, FieldErrors};

/// What a submit or delete ended in.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Created(UserRecord),
    Updated(UserRecord),
    Removed(UserId),
    /// The draft failed validation; nothing was sent.
    Invalid(FieldErrors),
    /// The request failed; an error notice is showing.
    Failed,
    /// Another mutation is still in flight; nothing was sent.
    Busy,
}

/// Shared handle to the component.
pub type SharedManager = Arc<UserManager>;

pub struct UserManager {
    api: Arc<dyn UserApi>,
    store: RwLock<UserStore>,
}

impl std::fmt::Debug for UserManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserManager").finish_non_exhaustive()
    }
}

impl UserManager {
    pub fn new(api: Arc<dyn UserApi>) -> Self {
        Self::with_store(api, UserStore::new())
    }

    /// Start from an existing state, e.g. a pre-populated list.
    pub fn with_store(api: Arc<dyn UserApi>, store: UserStore) -> Self {
        Self {
            api,
            store: RwLock::new(store),
        }
    }

    /// Copy of the current state for rendering.
    pub async fn snapshot(&self) -> UserStore {
        self.store.read().await.clone()
    }

    async fn dispatch(&self, action: Action) {
        self.store.write().await.apply(action);
    }

    /// Replace the list with the server's.
    pub async fn load(&self) -> Result<usize> {
        match self.api.list().await {
            Ok(users) => {
                let count = users.len();
                self.dispatch(Action::Loaded(users)).await;
                tracing::info!(count, "Loaded users");
                Ok(count)
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to load users");
                self.dispatch(Action::LoadFailed(Notice::error(notice::LOAD_FAILED)))
                    .await;
                Err(e.into())
            }
        }
    }

    /// One keystroke into a draft field.
    pub async fn input(&self, field: Field, value: impl Into<String>) {
        self.dispatch(Action::Input {
            field,
            value: value.into(),
        })
        .await;
    }

    /// Overwrite the draft from a submitted form.
    pub async fn replace_draft(&self, draft: Draft) {
        self.dispatch(Action::ReplaceDraft(draft)).await;
    }

    /// Start editing the listed record with `id`.
    pub async fn select(&self, id: UserId) -> Result<()> {
        let mut store = self.store.write().await;
        let record = store
            .user(id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("user {}", id)))?;
        store.apply(Action::Select(record));
        Ok(())
    }

    /// Abandon the current draft.
    pub async fn clear(&self) {
        self.dispatch(Action::ClearDraft).await;
    }

    pub async fn dismiss(&self) {
        self.dispatch(Action::DismissNotice).await;
    }

    /// Validate the draft and send it: create without an id, update with one.
    pub async fn submit(&self) -> Outcome {
        self.send_draft(None).await
    }

    /// Replace the draft with a submitted form and send it.
    ///
    /// While another mutation is in flight the draft is left untouched and
    /// `Busy` is returned.
    pub async fn submit_draft(&self, draft: Draft) -> Outcome {
        self.send_draft(Some(draft)).await
    }

    async fn send_draft(&self, replacement: Option<Draft>) -> Outcome {
        let draft = {
            let mut store = self.store.write().await;
            if store.in_flight() {
                tracing::warn!("Submit ignored: a request is already in flight");
                return Outcome::Busy;
            }
            if let Some(draft) = replacement {
                store.apply(Action::ReplaceDraft(draft));
            }

            let errors = validate(store.draft());
            if !errors.is_empty() {
                tracing::debug!(fields = errors.len(), "Draft failed validation");
                store.apply(Action::ValidationFailed(errors.clone()));
                return Outcome::Invalid(errors);
            }

            store.apply(Action::SubmitStarted);
            store.draft().clone()
        };

        let result = match draft.id {
            None => self.api.create(&draft).await.map(Outcome::Created),
            Some(id) => self.api.update(id, &draft).await.map(Outcome::Updated),
        };

        match result {
            Ok(outcome) => {
                match &outcome {
                    Outcome::Created(record) => {
                        tracing::info!(id = record.id, "User created");
                        self.dispatch(Action::Created(record.clone())).await;
                    }
                    Outcome::Updated(record) => {
                        tracing::info!(id = record.id, "User updated");
                        self.dispatch(Action::Updated(record.clone())).await;
                    }
                    _ => {}
                }
                outcome
            }
            Err(e) => {
                tracing::error!(id = ?draft.id, error = %e, "Failed to save user");
                self.dispatch(Action::Failed(Notice::error(notice::SAVE_FAILED)))
                    .await;
                Outcome::Failed
            }
        }
    }

    /// Delete a record on the server, then drop it from the list.
    pub async fn delete(&self, id: UserId) -> Outcome {
        {
            let mut store = self.store.write().await;
            if store.in_flight() {
                tracing::warn!(id, "Delete ignored: a request is already in flight");
                return Outcome::Busy;
            }
            store.apply(Action::RequestStarted);
        }

        match self.api.remove(id).await {
            Ok(()) => {
                tracing::info!(id, "User deleted");
                self.dispatch(Action::Removed(id)).await;
                Outcome::Removed(id)
            }
            Err(e) => {
                tracing::error!(id, error = %e, "Failed to delete user");
                self.dispatch(Action::Failed(Notice::error(notice::DELETE_FAILED)))
                    .await;
                Outcome::Failed
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use async_trait::async_trait;
    use reqwest::{Method, StatusCode};
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Mutex;
    use tokio::sync::Notify;

    use crate::client::{ClientError, UserApi};
    use crate::model::{Draft, UserId, UserRecord};

    /// A call the fake API received.
    #[derive(Debug, Clone, PartialEq)]
    pub enum Call {
        List,
        Create(Draft),
        Update(UserId, Draft),
        Remove(UserId),
    }

    /// In-memory stand-in for the remote API.
    #[derive(Default)]
    pub struct FakeApi {
        pub users: Mutex<Vec<UserRecord>>,
        pub calls: Mutex<Vec<Call>>,
        pub fail: std::sync::atomic::AtomicBool,
        pub gate: Option<Notify>,
        next_id: AtomicU64,
    }

    impl FakeApi {
        pub fn with_users(users: Vec<UserRecord>) -> Self {
            let next = users.iter().map(|u| u.id).max().unwrap_or(0);
            Self {
                users: Mutex::new(users),
                next_id: AtomicU64::new(next),
                ..Self::default()
            }
        }

        /// Mutations block until `gate.notify_one()` is called; listing does not.
        pub fn gated(mut self) -> Self {
            self.gate = Some(Notify::new());
            self
        }

        pub fn failing(self) -> Self {
            self.fail.store(true, Ordering::SeqCst);
            self
        }

        pub fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        /// Wait until a create, update or delete has reached the API.
        pub async fn mutation_started(&self) {
            while !self.calls().iter().any(|c| *c != Call::List) {
                tokio::task::yield_now().await;
            }
        }

        async fn enter(&self, call: Call, method: Method) -> Result<(), ClientError> {
            let mutation = call != Call::List;
            self.calls.lock().unwrap().push(call);
            if let (true, Some(gate)) = (mutation, &self.gate) {
                gate.notified().await;
            }
            if self.fail.load(Ordering::SeqCst) {
                return Err(ClientError::Status {
                    method,
                    url: "http://fake/usuario".to_string(),
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                });
            }
            Ok(())
        }
    }

    pub fn record(id: UserId, draft: &Draft) -> UserRecord {
        UserRecord {
            id,
            name: draft.name.clone(),
            email: draft.email.clone(),
            phone: draft.phone.clone(),
            address: draft.address.clone(),
        }
    }

    #[async_trait]
    impl UserApi for FakeApi {
        async fn list(&self) -> Result<Vec<UserRecord>, ClientError> {
            self.enter(Call::List, Method::GET).await?;
            Ok(self.users.lock().unwrap().clone())
        }

        async fn create(&self, draft: &Draft) -> Result<UserRecord, ClientError> {
            self.enter(Call::Create(draft.clone()), Method::POST).await?;
            let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
            let created = record(id, draft);
            self.users.lock().unwrap().push(created.clone());
            Ok(created)
        }

        async fn update(&self, id: UserId, draft: &Draft) -> Result<UserRecord, ClientError> {
            self.enter(Call::Update(id, draft.clone()), Method::PATCH).await?;
            Ok(record(id, draft))
        }

        async fn remove(&self, id: UserId) -> Result<(), ClientError> {
            self.enter(Call::Remove(id), Method::DELETE).await?;
            self.users.lock().unwrap().retain(|u| u.id != id);
            Ok(())
        }
    }
}
