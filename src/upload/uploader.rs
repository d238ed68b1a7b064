//! Content transfer for one matched file.

use super::{RemoteFile, UploadRequest};
use crate::errors::{GoogleDriveResult, LocalFileError};
use crate::services::FilesService;
use crate::types::{CreateFileRequest, UpdateFileRequest};
use bytes::Bytes;
use std::path::Path;
use tracing::{info, warn};

/// What happened to one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    /// A new file was created.
    Created(RemoteFile),
    /// An existing file received new content.
    Updated(RemoteFile),
    /// The source was a directory and nothing was sent.
    Skipped,
}

/// Sends file content to Drive.
pub struct Uploader<'a> {
    files: &'a FilesService,
}

impl<'a> Uploader<'a> {
    /// Creates an uploader over the files service.
    pub fn new(files: &'a FilesService) -> Self {
        Self { files }
    }

    /// Uploads `request.source_path`, updating `existing` when given and
    /// creating a new file otherwise.
    ///
    /// Directories are skipped with a warning. Stat, read and API failures
    /// are returned as errors.
    pub async fn upload(
        &self,
        request: &UploadRequest,
        existing: Option<&RemoteFile>,
    ) -> GoogleDriveResult<UploadOutcome> {
        let path = request.source_path.as_path();

        let metadata = tokio::fs::metadata(path)
            .await
            .map_err(|source| LocalFileError::Stat {
                path: path.to_path_buf(),
                source,
            })?;

        if metadata.is_dir() {
            warn!(path = %path.display(), "Skipping directory");
            return Ok(UploadOutcome::Skipped);
        }

        let content = tokio::fs::read(path)
            .await
            .map_err(|source| LocalFileError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        let content_type = media_content_type(path, request.mime_type.as_deref());

        match existing {
            Some(file) => {
                info!(
                    path = %path.display(),
                    name = %request.target_name,
                    id = %file.id,
                    "Updating file"
                );

                let metadata = UpdateFileRequest {
                    name: Some(request.target_name.clone()),
                    mime_type: request.mime_type.clone(),
                };
                let updated = self
                    .files
                    .update_with_content(
                        &file.id,
                        metadata,
                        &request.target_folder_id,
                        Bytes::from(content),
                        &content_type,
                    )
                    .await?;

                Ok(UploadOutcome::Updated(RemoteFile {
                    id: updated.id,
                    name: request.target_name.clone(),
                    parent_ids: merged_parents(&file.parent_ids, &request.target_folder_id),
                }))
            }
            None => {
                info!(
                    path = %path.display(),
                    name = %request.target_name,
                    folder = %request.target_folder_id,
                    "Creating file"
                );

                let metadata = CreateFileRequest {
                    name: request.target_name.clone(),
                    mime_type: request.mime_type.clone(),
                    parents: Some(vec![request.target_folder_id.clone()]),
                };
                let created = self
                    .files
                    .create_with_content(metadata, Bytes::from(content), &content_type)
                    .await?;

                Ok(UploadOutcome::Created(RemoteFile {
                    id: created.id,
                    name: request.target_name.clone(),
                    parent_ids: vec![request.target_folder_id.clone()],
                }))
            }
        }
    }
}

/// The configured type, else a guess from the extension, else octet-stream.
fn media_content_type(path: &Path, configured: Option<&str>) -> String {
    match configured {
        Some(mime_type) => mime_type.to_string(),
        None => mime_guess::from_path(path)
            .first()
            .unwrap_or(mime::APPLICATION_OCTET_STREAM)
            .to_string(),
    }
}

fn merged_parents(parents: &[String], added: &str) -> Vec<String> {
    let mut merged = parents.to_vec();
    if !merged.iter().any(|p| p == added) {
        merged.push(added.to_string());
    }
    merged
}
