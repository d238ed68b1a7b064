//! Service account authentication for Google Drive.
//!
//! The action authenticates with a service-account key document. A short-lived
//! RS256 JWT is signed with the account's private key and exchanged at the
//! token endpoint for a bearer token limited to the `drive.file` scope.
//!
//! # Example
//!
//! ```no_run
//! use google_drive_upload::auth::{scopes, AuthProvider, ServiceAccountKey, ServiceAccountProvider};
//!
//! # async fn example(encoded: &str) -> Result<(), Box<dyn std::error::Error>> {
//! let key = ServiceAccountKey::from_base64(encoded)?;
//! let provider = ServiceAccountProvider::from_key(key, vec![scopes::DRIVE_FILE.to_string()]);
//!
//! let token = provider.get_access_token().await?;
//! # Ok(())
//! # }
//! ```

mod key;

pub use key::{decode_credentials, ServiceAccountKey};

use crate::errors::AuthenticationError;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// Default Google OAuth2 token URL.
pub const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

/// Token expiry buffer (5 minutes) - refresh tokens proactively before expiry.
pub const TOKEN_EXPIRY_BUFFER_SECONDS: i64 = 300;

/// JWT lifetime for service account tokens (1 hour).
pub const JWT_LIFETIME_SECONDS: i64 = 3600;

/// OAuth 2.0 scopes for Google Drive.
pub mod scopes {
    /// Access to files created or opened by the app.
    pub const DRIVE_FILE: &str = "https://www.googleapis.com/auth/drive.file";
}

/// Authentication provider abstraction.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Get an access token for API requests.
    async fn get_access_token(&self) -> Result<AccessToken, AuthenticationError>;

    /// Force refresh the access token.
    async fn refresh_token(&self) -> Result<AccessToken, AuthenticationError>;
}

/// Access token with metadata.
#[derive(Debug, Clone)]
pub struct AccessToken {
    /// The token string.
    pub token: SecretString,

    /// Token type (usually "Bearer").
    pub token_type: String,

    /// Expiration time.
    pub expires_at: DateTime<Utc>,

    /// Scopes granted.
    pub scopes: Vec<String>,
}

impl AccessToken {
    /// Creates a new access token.
    pub fn new(
        token: impl Into<String>,
        token_type: impl Into<String>,
        expires_at: DateTime<Utc>,
        scopes: Vec<String>,
    ) -> Self {
        Self {
            token: SecretString::new(token.into()),
            token_type: token_type.into(),
            expires_at,
            scopes,
        }
    }

    /// Checks if the token needs proactive refresh (within 5 minutes of expiry).
    pub fn needs_refresh(&self) -> bool {
        let threshold = self.expires_at - Duration::seconds(TOKEN_EXPIRY_BUFFER_SECONDS);
        Utc::now() >= threshold
    }

    /// Returns the authorization header value.
    pub fn authorization_header(&self) -> String {
        format!("{} {}", self.token_type, self.token.expose_secret())
    }
}

/// Service account authentication provider.
///
/// Tokens are cached and refreshed once they come within five minutes of
/// expiry. The cache sits behind an `RwLock`, so one provider can be shared
/// by every request the client makes.
pub struct ServiceAccountProvider {
    service_account_email: String,
    private_key: SecretString,
    private_key_id: Option<String>,
    scopes: Vec<String>,
    token_url: String,
    cached_token: Arc<RwLock<Option<AccessToken>>>,
    http_client: Client,
}

impl ServiceAccountProvider {
    /// Creates a new service account provider.
    pub fn new(
        service_account_email: impl Into<String>,
        private_key: SecretString,
        scopes: Vec<String>,
    ) -> Self {
        Self {
            service_account_email: service_account_email.into(),
            private_key,
            private_key_id: None,
            scopes,
            token_url: TOKEN_URL.to_string(),
            cached_token: Arc::new(RwLock::new(None)),
            http_client: Client::new(),
        }
    }

    /// Creates a provider from a parsed service-account key document.
    pub fn from_key(key: ServiceAccountKey, scopes: Vec<String>) -> Self {
        let ServiceAccountKey {
            client_email,
            private_key,
            private_key_id,
            token_uri,
        } = key;

        let mut provider = Self::new(client_email, private_key, scopes);
        provider.private_key_id = private_key_id;
        if let Some(uri) = token_uri {
            provider.token_url = uri;
        }
        provider
    }

    fn create_jwt(&self) -> Result<String, AuthenticationError> {
        #[derive(Serialize)]
        struct Claims {
            iss: String,
            scope: String,
            aud: String,
            exp: i64,
            iat: i64,
        }

        let now = Utc::now().timestamp();

        let claims = Claims {
            iss: self.service_account_email.clone(),
            scope: self.scopes.join(" "),
            aud: self.token_url.clone(),
            exp: now + JWT_LIFETIME_SECONDS,
            iat: now,
        };

        let mut header = Header::new(Algorithm::RS256);
        header.kid = self.private_key_id.clone();

        let key = EncodingKey::from_rsa_pem(self.private_key.expose_secret().as_bytes())
            .map_err(|e| {
                AuthenticationError::JwtEncodingError(format!("Invalid private key: {}", e))
            })?;

        encode(&header, &claims, &key).map_err(|e| {
            AuthenticationError::JwtEncodingError(format!("JWT encoding failed: {}", e))
        })
    }

    async fn exchange_jwt_for_token(&self) -> Result<AccessToken, AuthenticationError> {
        let jwt = self.create_jwt()?;

        #[derive(Serialize)]
        struct TokenRequest<'a> {
            grant_type: &'a str,
            assertion: &'a str,
        }

        #[derive(Deserialize)]
        struct TokenResponse {
            access_token: String,
            token_type: String,
            expires_in: i64,
        }

        let request = TokenRequest {
            grant_type: "urn:ietf:params:oauth:grant-type:jwt-bearer",
            assertion: &jwt,
        };

        debug!(token_url = %self.token_url, "Exchanging service account JWT");

        let response = self
            .http_client
            .post(&self.token_url)
            .form(&request)
            .send()
            .await
            .map_err(|e| {
                AuthenticationError::RefreshFailed(format!("HTTP request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(AuthenticationError::RefreshFailed(format!(
                "Token exchange failed with status {}: {}",
                status, text
            )));
        }

        let token_response: TokenResponse = response.json().await.map_err(|e| {
            AuthenticationError::RefreshFailed(format!("Failed to parse response: {}", e))
        })?;

        let expires_at = Utc::now() + Duration::seconds(token_response.expires_in);

        Ok(AccessToken::new(
            token_response.access_token,
            token_response.token_type,
            expires_at,
            self.scopes.clone(),
        ))
    }
}

impl std::fmt::Debug for ServiceAccountProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceAccountProvider")
            .field("service_account_email", &self.service_account_email)
            .field("private_key", &"[REDACTED]")
            .field("scopes", &self.scopes)
            .field("token_url", &self.token_url)
            .finish()
    }
}

#[async_trait]
impl AuthProvider for ServiceAccountProvider {
    async fn get_access_token(&self) -> Result<AccessToken, AuthenticationError> {
        let cached = self.cached_token.read().await;
        if let Some(token) = cached.as_ref() {
            if !token.needs_refresh() {
                return Ok(token.clone());
            }
        }
        drop(cached);

        self.refresh_token().await
    }

    async fn refresh_token(&self) -> Result<AccessToken, AuthenticationError> {
        let token = self.exchange_jwt_for_token().await?;

        let mut cached = self.cached_token.write().await;
        *cached = Some(token.clone());

        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_token_needs_refresh() {
        let expires_at = Utc::now() + Duration::hours(1);
        let token = AccessToken::new("test_token", "Bearer", expires_at, vec![]);
        assert!(!token.needs_refresh());

        // Inside the 5 minute buffer
        let expires_soon = Utc::now() + Duration::minutes(4);
        let token = AccessToken::new("test_token", "Bearer", expires_soon, vec![]);
        assert!(token.needs_refresh());
    }

    #[test]
    fn test_authorization_header() {
        let expires_at = Utc::now() + Duration::hours(1);
        let token = AccessToken::new("test_token", "Bearer", expires_at, vec![]);
        assert_eq!(token.authorization_header(), "Bearer test_token");
    }

    #[test]
    fn test_from_key_uses_key_token_uri() {
        let key = ServiceAccountKey {
            client_email: "ci@project.iam.gserviceaccount.com".to_string(),
            private_key: SecretString::new("pem".to_string()),
            private_key_id: Some("kid-1".to_string()),
            token_uri: Some("https://token.example.com/token".to_string()),
        };

        let provider = ServiceAccountProvider::from_key(key, vec![scopes::DRIVE_FILE.to_string()]);

        assert_eq!(provider.service_account_email, "ci@project.iam.gserviceaccount.com");
        assert_eq!(provider.private_key_id, Some("kid-1".to_string()));
        assert_eq!(provider.token_url, "https://token.example.com/token");
        assert_eq!(provider.scopes, vec![scopes::DRIVE_FILE.to_string()]);
    }

    #[test]
    fn test_debug_redacts_private_key() {
        let provider = ServiceAccountProvider::new(
            "ci@project.iam.gserviceaccount.com",
            SecretString::new("super-secret-pem".to_string()),
            vec![scopes::DRIVE_FILE.to_string()],
        );

        let rendered = format!("{:?}", provider);
        assert!(!rendered.contains("super-secret-pem"));
        assert!(rendered.contains("[REDACTED]"));
    }

    #[test]
    fn test_invalid_private_key_fails_jwt() {
        let provider = ServiceAccountProvider::new(
            "ci@project.iam.gserviceaccount.com",
            SecretString::new("not a pem".to_string()),
            vec![scopes::DRIVE_FILE.to_string()],
        );

        match provider.create_jwt() {
            Err(AuthenticationError::JwtEncodingError(msg)) => {
                assert!(msg.contains("Invalid private key"))
            }
            other => panic!("expected JwtEncodingError, got {:?}", other),
        }
    }

    #[test]
    fn test_jwt_signed_with_rsa_key() {
        let pem = include_str!("../../tests/fixtures/test_key.pem");
        let key = ServiceAccountKey {
            client_email: "ci@project.iam.gserviceaccount.com".to_string(),
            private_key: SecretString::new(pem.to_string()),
            private_key_id: Some("kid-1".to_string()),
            token_uri: None,
        };
        let provider = ServiceAccountProvider::from_key(key, vec![scopes::DRIVE_FILE.to_string()]);

        let jwt = provider.create_jwt().unwrap();
        let header = jsonwebtoken::decode_header(&jwt).unwrap();

        assert_eq!(header.alg, Algorithm::RS256);
        assert_eq!(header.kid, Some("kid-1".to_string()));
        assert_eq!(jwt.split('.').count(), 3);
    }
}
