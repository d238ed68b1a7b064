//! The upload decision flow.
//!
//! For every file matched by the glob pattern the batch driver optionally
//! mirrors the local directory chain as Drive folders, resolves the target
//! name, looks for a file to overwrite and finally transfers the content.

mod batch;
mod mirror;
mod naming;
mod overwrite;
mod uploader;

pub use batch::{expand_pattern, run_upload, upload_files, UploadSummary};
pub use mirror::{directory_segments, DirectoryMirror};
pub use naming::resolve_target_name;
pub use overwrite::{select_existing, OverwriteResolver};
pub use uploader::{UploadOutcome, Uploader};

use crate::types::DriveFile;
use std::path::PathBuf;

/// One file transfer, built per matched file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    /// Local path as matched by the glob.
    pub source_path: PathBuf,
    /// Folder the file lands in.
    pub target_folder_id: String,
    /// Remote name.
    pub target_name: String,
    /// Explicit content type, if configured.
    pub mime_type: Option<String>,
    /// Whether an existing same-named file may be updated.
    pub overwrite: bool,
}

/// A Drive folder found or created while mirroring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteFolder {
    /// Folder id.
    pub id: String,
    /// Folder name.
    pub name: String,
    /// Folder it was looked up or created under.
    pub parent_id: String,
}

/// An existing Drive file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteFile {
    /// File id.
    pub id: String,
    /// File name.
    pub name: String,
    /// Parent folder ids.
    pub parent_ids: Vec<String>,
}

impl From<DriveFile> for RemoteFile {
    fn from(file: DriveFile) -> Self {
        Self {
            id: file.id,
            name: file.name,
            parent_ids: file.parents,
        }
    }
}
