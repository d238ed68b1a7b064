//! Mirroring local directories as Drive folders.

use super::RemoteFolder;
use crate::errors::GoogleDriveResult;
use crate::services::FilesService;
use crate::types::{escape_query_value, DriveFile, ListFilesParams, FOLDER_MIME_TYPE};
use std::path::{Component, Path};
use tracing::info;

/// Splits the directory part of `source` into folder names, outermost first.
///
/// Only normal components count: `.`, `..`, roots and drive prefixes are
/// dropped, so a file at the working directory has no segments.
pub fn directory_segments(source: &Path) -> Vec<String> {
    source
        .parent()
        .map(|dir| {
            dir.components()
                .filter_map(|c| match c {
                    Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
                    _ => None,
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Ensures a chain of folders exists below a root folder.
pub struct DirectoryMirror<'a> {
    files: &'a FilesService,
}

impl<'a> DirectoryMirror<'a> {
    /// Creates a mirror over the files service.
    pub fn new(files: &'a FilesService) -> Self {
        Self { files }
    }

    /// Walks `segments` from `root_id`, reusing or creating one folder per
    /// segment, and returns the id of the innermost folder.
    ///
    /// With no segments the root id comes back unchanged.
    pub async fn ensure_path(
        &self,
        root_id: &str,
        segments: &[String],
    ) -> GoogleDriveResult<String> {
        let mut current = root_id.to_string();

        for segment in segments {
            current = self.ensure_folder(&current, segment).await?.id;
        }

        Ok(current)
    }

    /// Finds the folder `name` directly under `parent_id`, creating it if absent.
    pub async fn ensure_folder(
        &self,
        parent_id: &str,
        name: &str,
    ) -> GoogleDriveResult<RemoteFolder> {
        info!(folder = name, parent = parent_id, "Checking for existing folder");

        let query = format!(
            "name='{}' and mimeType='{}'",
            escape_query_value(name),
            FOLDER_MIME_TYPE
        );
        let candidates = self.files.list_all(ListFilesParams::all_drives(query)).await?;

        if let Some(folder) = select_folder(&candidates, name, parent_id) {
            info!(folder = name, id = %folder.id, "Found existing folder");
            return Ok(folder);
        }

        info!(folder = name, parent = parent_id, "Creating folder");
        let created = self.files.create_folder(name, parent_id).await?;

        Ok(RemoteFolder {
            id: created.id,
            name: name.to_string(),
            parent_id: parent_id.to_string(),
        })
    }
}

/// Picks the first folder named exactly `name` whose parents include `parent_id`.
/// Candidates that are not folders are ignored.
///
/// Duplicate folders under the same parent are not disambiguated; the first
/// one the service returned wins.
fn select_folder(candidates: &[DriveFile], name: &str, parent_id: &str) -> Option<RemoteFolder> {
    candidates
        .iter()
        .find(|f| f.is_folder() && f.name == name && f.has_parent(parent_id))
        .map(|f| RemoteFolder {
            id: f.id.clone(),
            name: f.name.clone(),
            parent_id: parent_id.to_string(),
        })
}
