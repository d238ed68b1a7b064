//! Configuration for the Drive client and the upload run.

mod upload;

pub use upload::UploadConfig;

use crate::auth::AuthProvider;
use crate::errors::{ConfigurationError, GoogleDriveError, GoogleDriveResult};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Default Drive API base URL.
pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/drive/v3/";

/// Default Drive upload base URL.
pub const DEFAULT_UPLOAD_URL: &str = "https://www.googleapis.com/upload/drive/v3/";

/// Configuration for the Google Drive client.
#[derive(Clone)]
pub struct GoogleDriveConfig {
    /// Authentication provider.
    pub auth_provider: Arc<dyn AuthProvider>,

    /// Base URL for the API.
    pub base_url: Url,

    /// Upload URL for the API.
    pub upload_url: Url,

    /// Per-request timeout. `None` leaves the transport default in place,
    /// which for uploads means no limit on how long the body may take.
    pub timeout: Option<Duration>,

    /// User agent string.
    pub user_agent: String,
}

impl GoogleDriveConfig {
    /// Creates a new configuration builder.
    pub fn builder() -> GoogleDriveConfigBuilder {
        GoogleDriveConfigBuilder::new()
    }

    /// Validates the configuration.
    pub fn validate(&self) -> GoogleDriveResult<()> {
        if self.timeout.is_some_and(|t| t.is_zero()) {
            return Err(GoogleDriveError::Configuration(
                ConfigurationError::InvalidConfiguration("Timeout must be non-zero".to_string()),
            ));
        }

        for (label, url) in [("Base URL", &self.base_url), ("Upload URL", &self.upload_url)] {
            if url.cannot_be_a_base() {
                return Err(GoogleDriveError::Configuration(
                    ConfigurationError::InvalidConfiguration(format!(
                        "{} cannot be used as a base: {}",
                        label, url
                    )),
                ));
            }
        }

        Ok(())
    }
}

impl std::fmt::Debug for GoogleDriveConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleDriveConfig")
            .field("base_url", &self.base_url.as_str())
            .field("upload_url", &self.upload_url.as_str())
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

/// Builder for GoogleDriveConfig.
pub struct GoogleDriveConfigBuilder {
    auth_provider: Option<Arc<dyn AuthProvider>>,
    base_url: Option<String>,
    upload_url: Option<String>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl GoogleDriveConfigBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self {
            auth_provider: None,
            base_url: None,
            upload_url: None,
            timeout: None,
            user_agent: None,
        }
    }

    /// Sets the authentication provider.
    pub fn auth_provider<A: AuthProvider + 'static>(mut self, provider: A) -> Self {
        self.auth_provider = Some(Arc::new(provider));
        self
    }

    /// Sets the authentication provider from an Arc.
    pub fn auth_provider_arc(mut self, provider: Arc<dyn AuthProvider>) -> Self {
        self.auth_provider = Some(provider);
        self
    }

    /// Sets the base URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Sets the upload URL.
    pub fn upload_url(mut self, url: impl Into<String>) -> Self {
        self.upload_url = Some(url.into());
        self
    }

    /// Sets a per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the user agent string.
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Builds the configuration.
    pub fn build(self) -> GoogleDriveResult<GoogleDriveConfig> {
        let auth_provider = self.auth_provider.ok_or_else(|| {
            GoogleDriveError::Configuration(ConfigurationError::InvalidCredentials(
                "Authentication provider is required".to_string(),
            ))
        })?;

        let base_url = parse_base(self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL))?;
        let upload_url = parse_base(self.upload_url.as_deref().unwrap_or(DEFAULT_UPLOAD_URL))?;

        let user_agent = self
            .user_agent
            .unwrap_or_else(|| format!("google-drive-upload/{}", env!("CARGO_PKG_VERSION")));

        let config = GoogleDriveConfig {
            auth_provider,
            base_url,
            upload_url,
            timeout: self.timeout,
            user_agent,
        };

        config.validate()?;

        Ok(config)
    }
}

impl Default for GoogleDriveConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Parses a base URL, forcing a trailing slash so relative joins keep the path.
fn parse_base(raw: &str) -> GoogleDriveResult<Url> {
    let normalized = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{}/", raw)
    };

    Url::parse(&normalized).map_err(|e| {
        GoogleDriveError::Configuration(ConfigurationError::InvalidConfiguration(format!(
            "Invalid URL '{}': {}",
            raw, e
        )))
    })
}
