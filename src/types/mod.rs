//! Type definitions for the Google Drive API.

use serde::{Deserialize, Serialize};

/// MIME type Drive uses for folders.
pub const FOLDER_MIME_TYPE: &str = "application/vnd.google-apps.folder";

/// Google Drive file representation.
///
/// Only the fields requested through `fields=` are populated, so everything
/// beyond the id defaults when absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveFile {
    /// File ID.
    pub id: String,

    /// File name.
    #[serde(default)]
    pub name: String,

    /// MIME type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,

    /// Parent folder IDs.
    #[serde(default)]
    pub parents: Vec<String>,
}

impl DriveFile {
    /// Returns true if the file sits directly under `folder_id`.
    pub fn has_parent(&self, folder_id: &str) -> bool {
        self.parents.iter().any(|p| p == folder_id)
    }

    /// Returns true if the file is a folder.
    pub fn is_folder(&self) -> bool {
        self.mime_type.as_deref() == Some(FOLDER_MIME_TYPE)
    }
}

/// File list response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileList {
    /// Next page token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,

    /// List of files.
    #[serde(default)]
    pub files: Vec<DriveFile>,
}

// ============================================================================
// Request Types
// ============================================================================

/// Metadata for creating a file or folder.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFileRequest {
    /// File name.
    pub name: String,

    /// MIME type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,

    /// Parent folder IDs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parents: Option<Vec<String>>,
}

/// Metadata changes for updating a file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFileRequest {
    /// New name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// New MIME type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

/// Query parameters for listing files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListFilesParams {
    /// Query string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,

    /// Fields to return.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<String>,

    /// Corpora to search.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corpora: Option<String>,

    /// Include items from all drives.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_items_from_all_drives: Option<bool>,

    /// Support all drives.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supports_all_drives: Option<bool>,

    /// Page size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<i32>,

    /// Page token.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_token: Option<String>,
}

impl ListFilesParams {
    /// Parameters for a query across every drive the credential can reach.
    pub fn all_drives(q: impl Into<String>) -> Self {
        Self {
            q: Some(q.into()),
            fields: Some("nextPageToken, files(id, name, mimeType, parents)".to_string()),
            corpora: Some("allDrives".to_string()),
            include_items_from_all_drives: Some(true),
            supports_all_drives: Some(true),
            ..Default::default()
        }
    }
}

/// Escapes a value for use inside a single-quoted Drive query literal.
pub fn escape_query_value(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drive_file_partial_fields() {
        let file: DriveFile = serde_json::from_str(
            r#"{"id":"1","name":"a.txt","mimeType":"text/plain","parents":["root"]}"#,
        )
        .unwrap();

        assert_eq!(file.id, "1");
        assert!(file.has_parent("root"));
        assert!(!file.has_parent("other"));
        assert!(!file.is_folder());

        let folder: DriveFile = serde_json::from_str(
            r#"{"id":"2","mimeType":"application/vnd.google-apps.folder"}"#,
        )
        .unwrap();
        assert!(folder.is_folder());
        assert!(folder.parents.is_empty());
    }

    #[test]
    fn test_create_request_omits_unset_fields() {
        let request = CreateFileRequest {
            name: "report.pdf".to_string(),
            ..Default::default()
        };

        assert_eq!(serde_json::to_string(&request).unwrap(), r#"{"name":"report.pdf"}"#);
    }

    #[test]
    fn test_list_params_query_string() {
        let params = ListFilesParams::all_drives("name='a'");
        let query = serde_urlencoded::to_string(&params).unwrap();

        assert!(query.contains("corpora=allDrives"));
        assert!(query.contains("includeItemsFromAllDrives=true"));
        assert!(query.contains("supportsAllDrives=true"));
        assert!(query.contains("q=name%3D%27a%27"));
        assert!(!query.contains("pageToken"));
    }

    #[test]
    fn test_escape_query_value() {
        assert_eq!(escape_query_value("plain"), "plain");
        assert_eq!(escape_query_value("it's"), "it\\'s");
        assert_eq!(escape_query_value("a\\b"), "a\\\\b");
    }
}
