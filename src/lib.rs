//! Google Drive upload action
//!
//! Uploads local files selected by a glob pattern into a Google Drive folder,
//! authenticating with a base64 encoded service-account key. Built to run as
//! a GitHub Actions step, reading its inputs from `INPUT_*` variables.
//!
//! # Features
//!
//! - **Naming**: fixed name, source base name, full matched path, optional prefix
//! - **Directory mirroring**: recreate local directories as Drive folders
//! - **Overwrite**: update a same-named file in the target folder in place
//! - **Shared drives**: every lookup and write spans all drives
//!
//! # Example
//!
//! ```no_run
//! use google_drive_upload::auth::{scopes, ServiceAccountKey, ServiceAccountProvider};
//! use google_drive_upload::{run_upload, GoogleDriveClient, GoogleDriveConfig, UploadConfig};
//! use secrecy::SecretString;
//!
//! # async fn example(encoded: String) -> Result<(), Box<dyn std::error::Error>> {
//! let key = ServiceAccountKey::from_base64(&encoded)?;
//! let auth = ServiceAccountProvider::from_key(key, vec![scopes::DRIVE_FILE.to_string()]);
//!
//! let client = GoogleDriveClient::new(GoogleDriveConfig::builder().auth_provider(auth).build()?)?;
//!
//! let config = UploadConfig::new("dist/*.zip", "folder-id", SecretString::new(encoded))
//!     .with_overwrite(true);
//!
//! let summary = run_upload(&client, &config).await?;
//! println!("created {} updated {}", summary.created, summary.updated);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod auth;
pub mod cli;
pub mod client;
pub mod config;
pub mod errors;
pub mod mocks;
pub mod services;
pub mod transport;
pub mod types;
pub mod upload;

pub use auth::{AccessToken, AuthProvider, ServiceAccountKey, ServiceAccountProvider};
pub use client::GoogleDriveClient;
pub use config::{GoogleDriveConfig, GoogleDriveConfigBuilder, UploadConfig};
pub use errors::{GoogleDriveError, GoogleDriveResult};
pub use types::{DriveFile, FileList};
pub use upload::{
    run_upload, upload_files, RemoteFile, RemoteFolder, UploadOutcome, UploadRequest,
    UploadSummary,
};
