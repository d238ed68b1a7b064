//! Files service for Google Drive API.
//!
//! Covers the calls an upload run needs: searching by query, creating
//! folders, and multipart create/update of file content.

use crate::client::RequestExecutor;
use crate::errors::{GoogleDriveError, GoogleDriveResult, RequestError};
use crate::transport::{HttpMethod, MultipartBody, RequestBody};
use crate::types::*;
use bytes::Bytes;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

/// Service for file operations.
pub struct FilesService {
    executor: Arc<RequestExecutor>,
}

impl FilesService {
    /// Creates a new files service.
    pub(crate) fn new(executor: Arc<RequestExecutor>) -> Self {
        Self { executor }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Lists one page of files.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use google_drive_upload::*;
    /// # use google_drive_upload::types::ListFilesParams;
    /// # async fn example(client: GoogleDriveClient) -> GoogleDriveResult<()> {
    /// let params = ListFilesParams::all_drives("name='report.pdf'");
    ///
    /// let file_list = client.files().list(params).await?;
    /// for file in file_list.files {
    ///     println!("{}: {}", file.name, file.id);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn list(&self, params: ListFilesParams) -> GoogleDriveResult<FileList> {
        if let Some(page_size) = params.page_size {
            if !(1..=1000).contains(&page_size) {
                return Err(GoogleDriveError::Request(RequestError::InvalidParameter(
                    "pageSize must be between 1 and 1000".to_string(),
                )));
            }
        }

        let query = encode_query(&params)?;
        let url = self.executor.build_url("files", Some(&query))?;

        self.executor
            .execute_request(HttpMethod::Get, url, None)
            .await
    }

    /// Lists every file matching the parameters, following page tokens.
    pub async fn list_all(&self, params: ListFilesParams) -> GoogleDriveResult<Vec<DriveFile>> {
        let mut files = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut current = params.clone();
            current.page_token = page_token.take();

            let page = self.list(current).await?;
            files.extend(page.files);

            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        debug!(count = files.len(), query = ?params.q, "Listed files");
        Ok(files)
    }

    // ========================================================================
    // Folder Operations
    // ========================================================================

    /// Creates a folder under `parent_id`.
    pub async fn create_folder(&self, name: &str, parent_id: &str) -> GoogleDriveResult<DriveFile> {
        if name.is_empty() {
            return Err(GoogleDriveError::Request(RequestError::MissingParameter(
                "name is required".to_string(),
            )));
        }

        let request = CreateFileRequest {
            name: name.to_string(),
            mime_type: Some(FOLDER_MIME_TYPE.to_string()),
            parents: Some(vec![parent_id.to_string()]),
        };

        let body = serde_json::to_vec(&request)
            .map_err(|e| GoogleDriveError::request(format!("Failed to serialize request: {}", e)))?;

        let url = self
            .executor
            .build_url("files", Some("fields=id&supportsAllDrives=true"))?;

        self.executor
            .execute_request(HttpMethod::Post, url, Some(RequestBody::Json(Bytes::from(body))))
            .await
    }

    // ========================================================================
    // Upload Operations
    // ========================================================================

    /// Creates a file with content using a multipart upload.
    ///
    /// `content_type` labels the media part; `metadata.mime_type` is what
    /// Drive records for the file.
    pub async fn create_with_content(
        &self,
        metadata: CreateFileRequest,
        content: Bytes,
        content_type: &str,
    ) -> GoogleDriveResult<DriveFile> {
        if metadata.name.is_empty() {
            return Err(GoogleDriveError::Request(RequestError::MissingParameter(
                "name is required".to_string(),
            )));
        }

        let body = multipart(&metadata, content, content_type)?;
        let url = self.executor.build_upload_url(
            "files",
            Some("uploadType=multipart&supportsAllDrives=true"),
        )?;

        self.executor
            .execute_request(HttpMethod::Post, url, Some(body))
            .await
    }

    /// Replaces a file's content and metadata, adding `add_parent` to its parents.
    pub async fn update_with_content(
        &self,
        file_id: &str,
        metadata: UpdateFileRequest,
        add_parent: &str,
        content: Bytes,
        content_type: &str,
    ) -> GoogleDriveResult<DriveFile> {
        if file_id.is_empty() {
            return Err(GoogleDriveError::Request(RequestError::MissingParameter(
                "file_id is required".to_string(),
            )));
        }

        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct UpdateQuery<'a> {
            upload_type: &'a str,
            add_parents: &'a str,
            supports_all_drives: bool,
        }

        let query = encode_query(&UpdateQuery {
            upload_type: "multipart",
            add_parents: add_parent,
            supports_all_drives: true,
        })?;

        let body = multipart(&metadata, content, content_type)?;
        let path = format!("files/{}", file_id);
        let url = self.executor.build_upload_url(&path, Some(&query))?;

        self.executor
            .execute_request(HttpMethod::Patch, url, Some(body))
            .await
    }
}

fn encode_query<T: Serialize>(params: &T) -> GoogleDriveResult<String> {
    serde_urlencoded::to_string(params)
        .map_err(|e| GoogleDriveError::request(format!("Failed to encode query: {}", e)))
}

fn multipart<T: Serialize>(
    metadata: &T,
    content: Bytes,
    content_type: &str,
) -> GoogleDriveResult<RequestBody> {
    let metadata = serde_json::to_vec(metadata)
        .map_err(|e| GoogleDriveError::request(format!("Failed to serialize metadata: {}", e)))?;

    Ok(RequestBody::Multipart(MultipartBody::new(
        Bytes::from(metadata),
        content,
        content_type,
    )))
}
