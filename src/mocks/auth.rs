//! Mock authentication provider for testing.

use crate::auth::{AccessToken, AuthProvider};
use crate::errors::AuthenticationError;
use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Auth provider that hands out a fixed token or a fixed failure.
#[derive(Debug, Default)]
pub struct MockAuthProvider {
    failure: Option<String>,
    call_count: AtomicUsize,
}

impl MockAuthProvider {
    /// Provider returning `mock-access-token`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Provider whose every call fails with `RefreshFailed(message)`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            call_count: AtomicUsize::new(0),
        }
    }

    /// Number of token requests served.
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl AuthProvider for MockAuthProvider {
    async fn get_access_token(&self) -> Result<AccessToken, AuthenticationError> {
        self.call_count.fetch_add(1, Ordering::Relaxed);

        match &self.failure {
            Some(message) => Err(AuthenticationError::RefreshFailed(message.clone())),
            None => Ok(AccessToken::new(
                "mock-access-token",
                "Bearer",
                Utc::now() + Duration::hours(1),
                Vec::new(),
            )),
        }
    }

    async fn refresh_token(&self) -> Result<AccessToken, AuthenticationError> {
        self.get_access_token().await
    }
}
