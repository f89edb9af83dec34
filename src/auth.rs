//! Bearer-credential provider for the Gmail API.
//!
//! Loads a cached authorized-user token (`token.json`), refreshes it against
//! the OAuth token endpoint when expired, and persists the rotated token back
//! to disk. The interactive consent flow that first creates the token is out
//! of scope; a missing token surfaces as an error with a hint.

use std::path::PathBuf;

use chrono::{DateTime, Duration, Utc};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::info;

use crate::error::AuthError;

/// Default OAuth token endpoint when the token file does not carry one.
const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// Tokens within this many seconds of expiry are refreshed eagerly.
const EXPIRY_SKEW_SECS: i64 = 60;

/// An authorized-user token as persisted by the OAuth consent flow.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StoredToken {
    pub token: String,
    pub refresh_token: Option<String>,
    pub token_uri: Option<String>,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub expiry: Option<DateTime<Utc>>,
}

impl StoredToken {
    /// Whether the access token must be refreshed before use.
    ///
    /// An absent expiry counts as expired; an empty token always does.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        if self.token.is_empty() {
            return true;
        }
        match self.expiry {
            Some(expiry) => expiry - Duration::seconds(EXPIRY_SKEW_SECS) <= now,
            None => true,
        }
    }
}

/// OAuth client secrets in Google's "installed application" layout.
#[derive(Debug, Clone, Deserialize)]
struct ClientSecretFile {
    installed: ClientSecret,
}

#[derive(Debug, Clone, Deserialize)]
struct ClientSecret {
    client_id: String,
    client_secret: String,
    #[serde(default)]
    token_uri: Option<String>,
}

/// Shape of the token endpoint's refresh response.
#[derive(Debug, Deserialize)]
struct RefreshResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
}

/// Supplies a valid bearer token, refreshing and persisting as needed.
pub struct TokenProvider {
    token_path: PathBuf,
    credentials_path: PathBuf,
    http: reqwest::Client,
}

impl TokenProvider {
    pub fn new(token_path: PathBuf, credentials_path: PathBuf) -> Self {
        Self {
            token_path,
            credentials_path,
            http: reqwest::Client::new(),
        }
    }

    /// Return a valid access token, refreshing it first when expired.
    pub async fn access_token(&self) -> Result<SecretString, AuthError> {
        let mut stored = self.load_token().await?;

        if !stored.is_expired(Utc::now()) {
            return Ok(SecretString::from(stored.token));
        }

        self.refresh(&mut stored).await?;
        Ok(SecretString::from(stored.token))
    }

    async fn load_token(&self) -> Result<StoredToken, AuthError> {
        let raw = match fs::read_to_string(&self.token_path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(AuthError::MissingToken {
                    path: self.token_path.clone(),
                    hint: "Run the OAuth consent flow once to create it.".to_string(),
                });
            }
            Err(e) => return Err(e.into()),
        };

        serde_json::from_str(&raw).map_err(|source| AuthError::MalformedToken {
            path: self.token_path.clone(),
            source,
        })
    }

    /// Exchange the refresh token for a new access token and persist it.
    async fn refresh(&self, stored: &mut StoredToken) -> Result<(), AuthError> {
        let refresh_token = stored
            .refresh_token
            .clone()
            .ok_or(AuthError::NoRefreshToken)?;

        let (client_id, client_secret, file_token_uri) =
            match (stored.client_id.clone(), stored.client_secret.clone()) {
                (Some(id), Some(secret)) => (id, secret, None),
                _ => {
                    let secret = self.load_client_secret().await?;
                    (secret.client_id, secret.client_secret, secret.token_uri)
                }
            };

        let token_uri = stored
            .token_uri
            .clone()
            .or(file_token_uri)
            .unwrap_or_else(|| DEFAULT_TOKEN_URI.to_string());

        let params = [
            ("client_id", client_id.as_str()),
            ("client_secret", client_secret.as_str()),
            ("refresh_token", refresh_token.as_str()),
            ("grant_type", "refresh_token"),
        ];

        let response = self.http.post(&token_uri).form(&params).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::RefreshRejected { status, body });
        }

        let refreshed: RefreshResponse = response.json().await?;

        stored.token = refreshed.access_token;
        stored.expiry = refreshed
            .expires_in
            .map(|secs| Utc::now() + Duration::seconds(secs));

        let serialized = serde_json::to_string_pretty(&stored)
            .map_err(|source| AuthError::MalformedToken {
                path: self.token_path.clone(),
                source,
            })?;
        fs::write(&self.token_path, serialized).await?;

        info!(path = %self.token_path.display(), "Access token refreshed");
        Ok(())
    }

    async fn load_client_secret(&self) -> Result<ClientSecret, AuthError> {
        let raw = match fs::read_to_string(&self.credentials_path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(AuthError::MissingCredentials {
                    path: self.credentials_path.clone(),
                    hint: "Download the OAuth client secrets for this app.".to_string(),
                });
            }
            Err(e) => return Err(e.into()),
        };

        let file: ClientSecretFile =
            serde_json::from_str(&raw).map_err(|source| AuthError::MalformedCredentials {
                path: self.credentials_path.clone(),
                source,
            })?;
        Ok(file.installed)
    }
}
