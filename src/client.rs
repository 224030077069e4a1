//! Backend REST API Client
//!
//! HTTP client for the admin backend: login and user listing. The bearer
//! token comes from an injected [`TokenStore`].

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::model::User;
use crate::session::{SessionError, TokenStore};

/// Shown when the listing endpoint answers 401
pub const SESSION_EXPIRED_MESSAGE: &str = "Session expired. Please log in again!";
/// Shown for any other failed listing response
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch user data.";
/// Shown when the login endpoint rejects the credentials
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid email or password!";
/// Shown when the backend cannot be reached
pub const UNREACHABLE_MESSAGE: &str = "Unable to connect to the server!";

/// Backend API client
pub struct ApiClient {
    client: Client,
    config: ClientConfig,
    tokens: Arc<dyn TokenStore>,
}

/// Configuration for the API client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the backend API (e.g., "https://localhost:7166/api")
    pub base_url: String,
    /// Request timeout in seconds
    pub request_timeout_secs: u64,
    /// Accept self-signed certificates (local development backends)
    pub accept_invalid_certs: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://localhost:7166/api".to_string(),
            request_timeout_secs: 30,
            accept_invalid_certs: false,
        }
    }
}

/// Result of a successful login
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// The backend issued a token and it was stored
    TokenStored,
    /// The backend accepted the credentials but sent no token
    NoToken,
}

impl ApiClient {
    /// Create a new client with the given configuration and token store
    pub fn new(config: ClientConfig, tokens: Arc<dyn TokenStore>) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .user_agent(concat!("finadmin/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ApiError::Request)?;

        Ok(Self {
            client,
            config,
            tokens,
        })
    }

    /// Get the current configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// Exchange credentials for a bearer token and store it
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginOutcome, ApiError> {
        let url = self.endpoint("Auth/login");
        tracing::debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .json(&LoginRequest { email, password })
            .send()
            .await
            .map_err(classify)?;

        let status = response.status();
        if !status.is_success() {
            tracing::info!("Login rejected with status {}", status);
            return Err(ApiError::InvalidCredentials {
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(classify)?;
        let token = if body.trim().is_empty() {
            None
        } else {
            serde_json::from_str::<LoginResponse>(&body)
                .map_err(|e| ApiError::MalformedLogin(e.to_string()))?
                .token
                .filter(|t| !t.is_empty())
        };

        match token {
            Some(token) => {
                self.tokens.save(&token)?;
                tracing::info!("Logged in as {}", email);
                Ok(LoginOutcome::TokenStored)
            }
            None => {
                tracing::warn!("Login succeeded but the backend returned no token");
                Ok(LoginOutcome::NoToken)
            }
        }
    }

    /// Fetch every account from the backend
    ///
    /// Attaches the stored token as a bearer credential when one exists.
    pub async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        let url = self.endpoint("Auth/users");
        tracing::debug!("GET {}", url);

        let mut request = self.client.get(&url);
        if let Some(token) = self.tokens.load()? {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(classify)?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            return Err(ApiError::SessionExpired);
        }

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: text,
            });
        }

        let body = response.bytes().await.map_err(classify)?;
        let users: Vec<User> =
            serde_json::from_slice(&body).map_err(|e| ApiError::Decode(e.to_string()))?;

        tracing::info!("Fetched {} accounts", users.len());
        Ok(users)
    }

    /// Forget the stored token
    pub fn logout(&self) -> Result<(), ApiError> {
        self.tokens.clear()?;
        tracing::info!("Logged out");
        Ok(())
    }

    /// Whether a token is currently stored
    pub fn has_session(&self) -> Result<bool, ApiError> {
        Ok(self.tokens.load()?.is_some())
    }
}

fn classify(e: reqwest::Error) -> ApiError {
    if e.is_timeout() {
        ApiError::Timeout
    } else if e.is_connect() {
        ApiError::Unavailable
    } else {
        ApiError::Request(e)
    }
}

// ============================================
// Request/Response DTOs
// ============================================

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    #[serde(default)]
    token: Option<String>,
}

// ============================================
// Errors
// ============================================

/// Errors that can occur when talking to the backend
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Backend unavailable")]
    Unavailable,

    #[error("Request timeout")]
    Timeout,

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Session expired")]
    SessionExpired,

    #[error("Login rejected with status {status}")]
    InvalidCredentials { status: u16 },

    #[error("API error {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Invalid response body: {0}")]
    Decode(String),

    #[error("Invalid login response: {0}")]
    MalformedLogin(String),

    #[error("Session storage error: {0}")]
    Session(#[from] SessionError),
}

impl ApiError {
    /// The single message a view shows for this failure
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Unavailable
            | ApiError::Timeout
            | ApiError::Request(_)
            | ApiError::MalformedLogin(_) => {
                UNREACHABLE_MESSAGE.to_string()
            }
            ApiError::SessionExpired => SESSION_EXPIRED_MESSAGE.to_string(),
            ApiError::InvalidCredentials { .. } => INVALID_CREDENTIALS_MESSAGE.to_string(),
            ApiError::Status { .. } | ApiError::Decode(_) => FETCH_FAILED_MESSAGE.to_string(),
            ApiError::Session(e) => format!("Could not access the saved session: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MemoryTokenStore;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "https://localhost:7166/api");
        assert_eq!(config.request_timeout_secs, 30);
        assert!(!config.accept_invalid_certs);
    }

    #[test]
    fn test_endpoint_joins_paths() {
        let config = ClientConfig {
            base_url: "http://backend.local/api/".to_string(),
            ..Default::default()
        };
        let client = ApiClient::new(config, Arc::new(MemoryTokenStore::new())).unwrap();
        assert_eq!(client.endpoint("Auth/users"), "http://backend.local/api/Auth/users");
    }

    #[test]
    fn test_user_messages() {
        assert_eq!(ApiError::SessionExpired.user_message(), SESSION_EXPIRED_MESSAGE);
        assert_eq!(
            ApiError::Status {
                status: 500,
                message: "boom".to_string()
            }
            .user_message(),
            FETCH_FAILED_MESSAGE
        );
        assert_eq!(ApiError::Unavailable.user_message(), UNREACHABLE_MESSAGE);
        assert_eq!(
            ApiError::MalformedLogin("expected value".to_string()).user_message(),
            UNREACHABLE_MESSAGE
        );
        assert_eq!(
            ApiError::InvalidCredentials { status: 400 }.user_message(),
            INVALID_CREDENTIALS_MESSAGE
        );
    }

    #[test]
    fn test_logout_clears_store() {
        let store = Arc::new(MemoryTokenStore::with_token("t"));
        let client = ApiClient::new(ClientConfig::default(), store.clone()).unwrap();
        assert!(client.has_session().unwrap());

        client.logout().unwrap();
        assert!(!client.has_session().unwrap());
        assert_eq!(store.load().unwrap(), None);
    }
}
