//! Reqwest-backed Gmail client and the collaborator traits the pipeline
//! consumes. The extraction core never talks to the network directly — it
//! only sees [`MessageStore`] and [`AttachmentFetcher`].

use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;

use crate::auth::TokenProvider;
use crate::error::ApiError;
use crate::gmail::types::{AttachmentBody, Message, MessageList};

/// Base URL of the Gmail REST API for the authenticated user.
const API_BASE: &str = "https://gmail.googleapis.com/gmail/v1/users/me";

/// Read access to the remote message store.
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// List up to `max_results` message ids, newest first.
    async fn list_messages(&self, max_results: u32) -> Result<Vec<String>, ApiError>;

    /// Fetch a message in full format (headers + part tree + snippet).
    async fn get_message(&self, id: &str) -> Result<Message, ApiError>;
}

/// Fetches a part's binary payload by attachment id.
///
/// Returns the base64url-encoded data, or `None` when the API carries no
/// data for the attachment.
#[async_trait]
pub trait AttachmentFetcher: Send + Sync {
    async fn fetch_attachment(
        &self,
        message_id: &str,
        attachment_id: &str,
    ) -> Result<Option<String>, ApiError>;
}

/// Gmail REST client with bearer authentication.
pub struct GmailClient {
    http: reqwest::Client,
    auth: TokenProvider,
    base_url: String,
}

impl GmailClient {
    pub fn new(auth: TokenProvider) -> Self {
        Self {
            http: reqwest::Client::new(),
            auth,
            base_url: API_BASE.to_string(),
        }
    }

    /// Override the API base URL (test servers).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let token = self.auth.access_token().await?;
        let url = format!("{}/{path}", self.base_url);

        let response = self
            .http
            .get(&url)
            .bearer_auth(token.expose_secret())
            .query(query)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status { status, body });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl MessageStore for GmailClient {
    async fn list_messages(&self, max_results: u32) -> Result<Vec<String>, ApiError> {
        let list: MessageList = self
            .get_json("messages", &[("maxResults", max_results.to_string())])
            .await?;
        Ok(list.messages.into_iter().map(|m| m.id).collect())
    }

    async fn get_message(&self, id: &str) -> Result<Message, ApiError> {
        self.get_json(
            &format!("messages/{id}"),
            &[("format", "full".to_string())],
        )
        .await
    }
}

#[async_trait]
impl AttachmentFetcher for GmailClient {
    async fn fetch_attachment(
        &self,
        message_id: &str,
        attachment_id: &str,
    ) -> Result<Option<String>, ApiError> {
        let body: AttachmentBody = self
            .get_json(
                &format!("messages/{message_id}/attachments/{attachment_id}"),
                &[],
            )
            .await?;
        Ok(body.data)
    }
}
