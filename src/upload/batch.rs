//! The per-run driver.

use super::{
    directory_segments, resolve_target_name, DirectoryMirror, OverwriteResolver, UploadOutcome,
    UploadRequest, Uploader,
};
use crate::client::GoogleDriveClient;
use crate::config::UploadConfig;
use crate::errors::{ConfigurationError, GoogleDriveResult};
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Counts reported at the end of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UploadSummary {
    /// Files created.
    pub created: usize,
    /// Files updated in place.
    pub updated: usize,
    /// Matches skipped because they were directories.
    pub skipped: usize,
}

impl UploadSummary {
    fn record(&mut self, outcome: &UploadOutcome) {
        match outcome {
            UploadOutcome::Created(_) => self.created += 1,
            UploadOutcome::Updated(_) => self.updated += 1,
            UploadOutcome::Skipped => self.skipped += 1,
        }
    }
}

/// Expands `pattern` into matched paths in glob order.
///
/// Entries that cannot be read are logged and skipped. A malformed pattern
/// or an empty result is an error.
pub fn expand_pattern(pattern: &str) -> Result<Vec<PathBuf>, ConfigurationError> {
    let entries = glob::glob(pattern)
        .map_err(|e| ConfigurationError::InvalidPattern(format!("{}: {}", pattern, e)))?;

    let mut paths = Vec::new();
    for entry in entries {
        match entry {
            Ok(path) => paths.push(path),
            Err(e) => warn!(
                path = %e.path().display(),
                error = %e.error(),
                "Skipping unreadable path"
            ),
        }
    }

    if paths.is_empty() {
        return Err(ConfigurationError::NoMatches(pattern.to_string()));
    }

    debug!(pattern, count = paths.len(), "Expanded pattern");
    Ok(paths)
}

/// Uploads every file matched by `config.pattern`, one at a time.
pub async fn run_upload(
    client: &GoogleDriveClient,
    config: &UploadConfig,
) -> GoogleDriveResult<UploadSummary> {
    let paths = expand_pattern(&config.pattern)?;
    upload_files(client, config, paths).await
}

/// Uploads already expanded `paths` in order.
///
/// Each file starts from the configured root folder. The first error stops
/// the run; folders and files already written are left in place.
pub async fn upload_files(
    client: &GoogleDriveClient,
    config: &UploadConfig,
    paths: Vec<PathBuf>,
) -> GoogleDriveResult<UploadSummary> {
    let multiple_matches = paths.len() > 1;

    let files = client.files();
    let mirror = DirectoryMirror::new(&files);
    let resolver = OverwriteResolver::new(&files);
    let uploader = Uploader::new(&files);

    let mut summary = UploadSummary::default();

    for path in paths {
        let folder_id = if config.mirror_directory_structure {
            mirror
                .ensure_path(&config.folder_id, &directory_segments(&path))
                .await?
        } else {
            config.folder_id.clone()
        };

        let target_name = resolve_target_name(&path, multiple_matches, config)?;
        let existing = resolver
            .resolve(&target_name, &folder_id, config.overwrite)
            .await?;

        let request = UploadRequest {
            source_path: path,
            target_folder_id: folder_id,
            target_name,
            mime_type: config.mime_type.clone(),
            overwrite: config.overwrite,
        };

        let outcome = uploader.upload(&request, existing.as_ref()).await?;
        summary.record(&outcome);
    }

    info!(
        created = summary.created,
        updated = summary.updated,
        skipped = summary.skipped,
        "Upload finished"
    );

    Ok(summary)
}
