//! Command line and GitHub Actions input handling.
//!
//! Every option doubles as the `INPUT_*` variable the Actions runner sets for
//! the matching `with:` key, so the binary runs unchanged as an action step
//! or by hand.

pub mod actions;

use crate::auth::{decode_credentials, scopes, ServiceAccountKey, ServiceAccountProvider};
use crate::client::GoogleDriveClient;
use crate::config::{GoogleDriveConfig, UploadConfig};
use crate::errors::{ConfigurationError, GoogleDriveResult};
use crate::upload::{expand_pattern, upload_files, UploadSummary};
use clap::Parser;
use secrecy::{ExposeSecret, SecretString};
use std::path::PathBuf;
use tracing::info;

/// Shortest document line masked when the key cannot be parsed.
const MIN_MASKED_LINE_LEN: usize = 16;

/// Upload files to a Google Drive folder.
#[derive(Parser)]
#[command(name = "google-drive-upload", version, about)]
pub struct Cli {
    /// Glob pattern of the local files to upload
    #[arg(long, env = "INPUT_FILENAME")]
    pub filename: Option<String>,

    /// Remote name, used only when the pattern matches a single file
    #[arg(long, env = "INPUT_NAME")]
    pub name: Option<String>,

    /// ID of the destination folder
    #[arg(long = "folder-id", env = "INPUT_FOLDERID")]
    pub folder_id: Option<String>,

    /// Base64 encoded service-account key
    #[arg(long, env = "INPUT_CREDENTIALS", hide_env_values = true)]
    pub credentials: Option<String>,

    /// Update a same-named file in the destination folder
    #[arg(long, env = "INPUT_OVERWRITE")]
    pub overwrite: Option<String>,

    /// Content type to record for uploaded files
    #[arg(long = "mime-type", env = "INPUT_MIMETYPE")]
    pub mime_type: Option<String>,

    /// Use the matched path, directories included, as the remote name
    #[arg(
        long = "use-complete-source-filename-as-name",
        env = "INPUT_USECOMPLETESOURCEFILENAMEASNAME"
    )]
    pub use_complete_source_filename_as_name: Option<String>,

    /// Recreate local directories as Drive folders
    #[arg(long = "mirror-directory-structure", env = "INPUT_MIRRORDIRECTORYSTRUCTURE")]
    pub mirror_directory_structure: Option<String>,

    /// Prefix prepended to every remote name
    #[arg(long = "name-prefix", env = "INPUT_NAMEPREFIX")]
    pub name_prefix: Option<String>,
}

impl std::fmt::Debug for Cli {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cli")
            .field("filename", &self.filename)
            .field("name", &self.name)
            .field("folder_id", &self.folder_id)
            .field("credentials", &self.credentials.as_ref().map(|_| "[REDACTED]"))
            .field("overwrite", &self.overwrite)
            .field("mime_type", &self.mime_type)
            .field(
                "use_complete_source_filename_as_name",
                &self.use_complete_source_filename_as_name,
            )
            .field("mirror_directory_structure", &self.mirror_directory_structure)
            .field("name_prefix", &self.name_prefix)
            .finish()
    }
}

impl Cli {
    /// Validates the inputs, expands the pattern and builds the run
    /// configuration.
    ///
    /// Checks run in the order filename, pattern (malformed or matching
    /// nothing), folderId, credentials. Empty values count as absent.
    pub fn into_config(self) -> Result<(UploadConfig, Vec<PathBuf>), ConfigurationError> {
        let pattern = required(self.filename, "filename")?;
        let paths = expand_pattern(&pattern)?;
        let folder_id = required(self.folder_id, "folderId")?;
        let credentials = required(self.credentials, "credentials")?;

        let overwrite = parse_flag("overwrite", self.overwrite.as_deref())?;
        if is_unset(self.overwrite.as_deref()) {
            actions::warning("Overwrite is disabled.");
        }

        let use_complete_source_name = parse_flag(
            "useCompleteSourceFilenameAsName",
            self.use_complete_source_filename_as_name.as_deref(),
        )?;
        if is_unset(self.use_complete_source_filename_as_name.as_deref()) {
            info!("useCompleteSourceFilenameAsName is disabled.");
        }

        let mirror_directory_structure = parse_flag(
            "mirrorDirectoryStructure",
            self.mirror_directory_structure.as_deref(),
        )?;
        if is_unset(self.mirror_directory_structure.as_deref()) {
            info!("mirrorDirectoryStructure is disabled.");
        }

        let mut config = UploadConfig::new(pattern, folder_id, SecretString::new(credentials))
            .with_overwrite(overwrite)
            .with_complete_source_name(use_complete_source_name)
            .with_mirror_directory_structure(mirror_directory_structure);

        if let Some(name) = self.name {
            config = config.with_name(name);
        }
        if let Some(mime_type) = self.mime_type {
            config = config.with_mime_type(mime_type);
        }
        if let Some(prefix) = self.name_prefix {
            config = config.with_name_prefix(prefix);
        }

        Ok((config, paths))
    }
}

/// True when a flag input was not given, so its default applies.
fn is_unset(value: Option<&str>) -> bool {
    value.map_or(true, str::is_empty)
}

fn required(value: Option<String>, input: &'static str) -> Result<String, ConfigurationError> {
    value
        .filter(|v| !v.is_empty())
        .ok_or(ConfigurationError::MissingInput(input))
}

/// Parses a boolean input. Absent or empty means false.
///
/// Accepts `1 t T TRUE true True` and `0 f F FALSE false False`.
pub fn parse_flag(input: &'static str, value: Option<&str>) -> Result<bool, ConfigurationError> {
    match value.unwrap_or_default() {
        "" => Ok(false),
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        other => Err(ConfigurationError::InvalidInput {
            input,
            message: format!("'{}' is not a boolean", other),
        }),
    }
}

/// Values from a decoded key document that must never reach the log.
///
/// A single-line document is masked whole. Otherwise the private key body
/// lines and the key id are masked; when the document does not parse, every
/// line long enough to carry a secret is masked instead.
fn secret_values(document: &str, key: Option<&ServiceAccountKey>) -> Vec<String> {
    let document = document.trim();
    let mut values = Vec::new();

    if !document.contains('\n') {
        values.push(document.to_string());
    }

    match key {
        Some(key) => {
            values.extend(
                key.private_key
                    .expose_secret()
                    .lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty() && !line.starts_with("-----"))
                    .map(String::from),
            );
            values.extend(key.private_key_id.iter().cloned());
        }
        None if document.contains('\n') => values.extend(
            document
                .lines()
                .map(str::trim)
                .filter(|line| line.len() >= MIN_MASKED_LINE_LEN)
                .map(String::from),
        ),
        None => {}
    }

    values
}

/// Masks the credentials, decodes the key and builds a Drive client.
pub fn connect(config: &UploadConfig) -> GoogleDriveResult<GoogleDriveClient> {
    let encoded = config.credentials.expose_secret();
    actions::add_mask(encoded);

    let document = decode_credentials(encoded)?;
    let parsed = ServiceAccountKey::from_json(document.expose_secret());
    for value in secret_values(document.expose_secret(), parsed.as_ref().ok()) {
        actions::add_mask(&value);
    }

    let key = parsed?;
    info!(client_email = %key.client_email, "Loaded service account key");

    let auth = ServiceAccountProvider::from_key(key, vec![scopes::DRIVE_FILE.to_string()]);
    let drive_config = GoogleDriveConfig::builder().auth_provider(auth).build()?;

    GoogleDriveClient::new(drive_config)
}

/// Runs one upload from parsed command line inputs.
pub async fn run(cli: Cli) -> GoogleDriveResult<UploadSummary> {
    let (config, paths) = cli.into_config()?;
    let client = connect(&config)?;

    upload_files(&client, &config, paths).await
}
