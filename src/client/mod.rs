//! Google Drive API client implementation.

use crate::auth::AuthProvider;
use crate::config::GoogleDriveConfig;
use crate::errors::{GoogleDriveError, GoogleDriveResult};
use crate::services::FilesService;
use crate::transport::{HttpTransport, ReqwestTransport};
use std::sync::Arc;

mod executor;
pub use executor::RequestExecutor;

/// Google Drive API client.
///
/// Owns the transport and auth provider and hands out service handles that
/// share one [`RequestExecutor`].
pub struct GoogleDriveClient {
    config: GoogleDriveConfig,
    executor: Arc<RequestExecutor>,
}

impl std::fmt::Debug for GoogleDriveClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleDriveClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl GoogleDriveClient {
    /// Creates a client that talks HTTP through reqwest.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use google_drive_upload::auth::{scopes, ServiceAccountKey, ServiceAccountProvider};
    /// use google_drive_upload::{GoogleDriveClient, GoogleDriveConfig};
    ///
    /// # fn example(encoded: &str) -> Result<(), Box<dyn std::error::Error>> {
    /// let key = ServiceAccountKey::from_base64(encoded)?;
    /// let auth = ServiceAccountProvider::from_key(key, vec![scopes::DRIVE_FILE.to_string()]);
    ///
    /// let config = GoogleDriveConfig::builder()
    ///     .auth_provider(auth)
    ///     .build()?;
    ///
    /// let client = GoogleDriveClient::new(config)?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(config: GoogleDriveConfig) -> GoogleDriveResult<Self> {
        let transport = ReqwestTransport::with_defaults().map_err(|e| {
            GoogleDriveError::configuration(format!("Failed to create transport: {}", e))
        })?;

        Self::with_transport(config, Arc::new(transport))
    }

    /// Creates a client over a caller-supplied transport.
    pub fn with_transport(
        config: GoogleDriveConfig,
        transport: Arc<dyn HttpTransport>,
    ) -> GoogleDriveResult<Self> {
        config.validate()?;

        let auth: Arc<dyn AuthProvider> = config.auth_provider.clone();
        let executor = Arc::new(RequestExecutor::new(config.clone(), transport, auth));

        Ok(Self { config, executor })
    }

    /// Access the files service for file and folder operations.
    pub fn files(&self) -> FilesService {
        FilesService::new(self.executor.clone())
    }

    /// Gets the configuration.
    pub fn config(&self) -> &GoogleDriveConfig {
        &self.config
    }
}
