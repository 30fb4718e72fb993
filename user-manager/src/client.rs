//! REST client for the remote user API.
//!
//! [`UserApi`] is the seam the component talks through; [`HttpUserApi`] is
//! the reqwest implementation. Every call issues exactly one request, with no
//! retry and no backoff. Callers decide how to surface failures.

use async_trait::async_trait;
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;

use crate::config::ApiConfig;
use crate::model::{Draft, UserId, UserRecord};

/// Failure of a single API call.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never got an answer (connection refused, timeout, ...).
    #[error("{method} {url} failed: {source}")]
    Transport {
        method: Method,
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("{method} {url} returned {status}")]
    Status {
        method: Method,
        url: String,
        status: StatusCode,
    },

    /// The answer could not be decoded.
    #[error("{method} {url} sent an invalid body: {source}")]
    Decode {
        method: Method,
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The HTTP client could not be constructed.
    #[error("cannot build HTTP client: {0}")]
    Build(#[source] reqwest::Error),
}

impl ClientError {
    /// HTTP status returned by the server, if it answered.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Operations the component needs from the user API.
#[async_trait]
pub trait UserApi: Send + Sync {
    /// `GET /{resource}`
    async fn list(&self) -> Result<Vec<UserRecord>, ClientError>;

    /// `POST /{resource}` with the draft as body.
    async fn create(&self, draft: &Draft) -> Result<UserRecord, ClientError>;

    /// `PATCH /{resource}/{id}` with the draft as body.
    async fn update(&self, id: UserId, draft: &Draft) -> Result<UserRecord, ClientError>;

    /// `DELETE /{resource}/{id}`
    async fn remove(&self, id: UserId) -> Result<(), ClientError>;
}

/// [`UserApi`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpUserApi {
    client: Client,
    collection_url: String,
}

impl HttpUserApi {
    /// Build a client for the configured endpoint.
    pub fn new(config: &ApiConfig) -> Result<Self, ClientError> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().map_err(ClientError::Build)?;

        let collection_url = format!(
            "{}/{}",
            config.base_url.trim_end_matches('/'),
            config.resource.trim_matches('/')
        );

        tracing::info!(url = %collection_url, "User API client configured");

        Ok(Self {
            client,
            collection_url,
        })
    }

    /// URL of the user collection.
    #[must_use]
    pub fn collection_url(&self) -> &str {
        &self.collection_url
    }

    /// URL of a single user.
    #[must_use]
    pub fn item_url(&self, id: UserId) -> String {
        format!("{}/{}", self.collection_url, id)
    }

    async fn send(
        &self,
        method: Method,
        url: String,
        body: Option<&Draft>,
    ) -> Result<reqwest::Response, ClientError> {
        tracing::debug!(%method, %url, "Sending user API request");

        let mut request = self.client.request(method.clone(), &url);
        if let Some(draft) = body {
            request = request.json(draft);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(source) => {
                tracing::warn!(%method, %url, error = %source, "User API unreachable");
                return Err(ClientError::Transport {
                    method,
                    url,
                    source,
                })
            }
        };

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%method, %url, %status, "User API rejected request");
            return Err(ClientError::Status {
                method,
                url,
                status,
            });
        }

        Ok(response)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        method: Method,
        url: String,
        body: Option<&Draft>,
    ) -> Result<T, ClientError> {
        let response = self.send(method.clone(), url.clone(), body).await?;
        response
            .json::<T>()
            .await
            .map_err(|source| ClientError::Decode {
                method,
                url,
                source,
            })
    }
}

#[async_trait]
impl UserApi for HttpUserApi {
    async fn list(&self) -> Result<Vec<UserRecord>, ClientError> {
        let users: Vec<UserRecord> = self
            .send_json(Method::GET, self.collection_url.clone(), None)
            .await?;
        tracing::debug!(count = users.len(), "Fetched users");
        Ok(users)
    }

    async fn create(&self, draft: &Draft) -> Result<UserRecord, ClientError> {
        self.send_json(Method::POST, self.collection_url.clone(), Some(draft))
            .await
    }

    async fn update(&self, id: UserId, draft: &Draft) -> Result<UserRecord, ClientError> {
        self.send_json(Method::PATCH, self.item_url(id), Some(draft))
            .await
    }

    async fn remove(&self, id: UserId) -> Result<(), ClientError> {
        self.send(Method::DELETE, self.item_url(id), None).await?;
        Ok(())
    }
}
