//! Identity: bearer tokens issued by the external identity provider, verified
//! against the backend's verify endpoint.

use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::community::models::Author;
use crate::errors::AppError;
use crate::state::AppState;

const REQUEST_TIMEOUT_SECS: u64 = 10;
/// Display name used when the provider has none.
pub const ANONYMOUS_NAME: &str = "익명";

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("missing bearer token")]
    MissingToken,

    #[error("token rejected")]
    Rejected,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("verify endpoint returned status {status}")]
    Status { status: u16 },
}

/// A signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    #[serde(alias = "user_id", alias = "userId")]
    pub uid: String,
    #[serde(default, alias = "displayName", alias = "display_name")]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl Identity {
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(ANONYMOUS_NAME)
    }

    pub fn as_author(&self) -> Author {
        Author {
            id: self.uid.clone(),
            name: self.display_name().to_string(),
            email: self.email.clone().unwrap_or_default(),
        }
    }
}

#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> Result<Identity, AuthError>;
}

/// Verifies tokens with `POST {base}/auth/verify-token`.
pub struct HttpIdentityVerifier {
    client: Client,
    base_url: String,
}

impl HttpIdentityVerifier {
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .expect("Failed to build HTTP client"),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl IdentityVerifier for HttpIdentityVerifier {
    async fn verify(&self, token: &str) -> Result<Identity, AuthError> {
        let response = self
            .client
            .post(format!("{}/auth/verify-token", self.base_url))
            .bearer_auth(token)
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => {
                let identity: Identity = response.json().await?;
                debug!("Verified token for user {}", identity.uid);
                Ok(identity)
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(AuthError::Rejected),
            status => Err(AuthError::Status {
                status: status.as_u16(),
            }),
        }
    }
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Extractor for handlers that require a signed-in user.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Identity);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or(AuthError::MissingToken)?;
        let identity = state.identity.verify(token).await?;
        Ok(AuthUser(identity))
    }
}

/// Accepts `user:<uid>` tokens without calling out. Test-only.
#[cfg(test)]
pub struct StaticIdentityVerifier;

#[cfg(test)]
#[async_trait]
impl IdentityVerifier for StaticIdentityVerifier {
    async fn verify(&self, token: &str) -> Result<Identity, AuthError> {
        let uid = token.strip_prefix("user:").ok_or(AuthError::Rejected)?;
        Ok(Identity {
            uid: uid.to_string(),
            name: Some(format!("{uid} name")),
            email: Some(format!("{uid}@example.com")),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_verify_accepts_provider_field_names() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/verify-token"))
            .and(header("authorization", "Bearer good-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "uid": "u-1",
                "displayName": "Mina",
                "email": "mina@example.com"
            })))
            .mount(&server)
            .await;

        let verifier = HttpIdentityVerifier::new(server.uri());
        let identity = verifier.verify("good-token").await.unwrap();
        assert_eq!(identity.uid, "u-1");
        assert_eq!(identity.display_name(), "Mina");
    }

    #[tokio::test]
    async fn test_verify_rejected_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/verify-token"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let verifier = HttpIdentityVerifier::new(server.uri());
        assert!(matches!(
            verifier.verify("expired").await,
            Err(AuthError::Rejected)
        ));
    }

    #[test]
    fn test_author_falls_back_to_anonymous() {
        let identity = Identity {
            uid: "u-2".to_string(),
            name: Some("  ".to_string()),
            email: None,
        };
        let author = identity.as_author();
        assert_eq!(author.name, ANONYMOUS_NAME);
        assert_eq!(author.email, "");
    }
}
