//! Mock implementations for testing.
//!
//! `MockTransport` replays queued responses and records every request so tests
//! can assert on the exact Drive calls a run makes.

mod auth;
mod transport;

pub use auth::MockAuthProvider;
pub use transport::{MockResponse, MockTransport};

use crate::auth::AuthProvider;
use crate::client::GoogleDriveClient;
use crate::config::GoogleDriveConfig;
use crate::transport::{HttpRequest, RequestBody};
use std::sync::Arc;

/// Builds a client wired to the given mock transport and a mock token.
pub fn mock_client(transport: Arc<MockTransport>) -> GoogleDriveClient {
    let auth: Arc<dyn AuthProvider> = Arc::new(MockAuthProvider::new());
    let config = GoogleDriveConfig::builder()
        .auth_provider_arc(auth)
        .build()
        .expect("default mock config is valid");
    GoogleDriveClient::with_transport(config, transport).expect("mock client builds")
}

/// Parses the JSON body of a metadata-only request.
pub fn json_body(request: &HttpRequest) -> Option<serde_json::Value> {
    match request.body.as_ref()? {
        RequestBody::Json(bytes) => serde_json::from_slice(bytes).ok(),
        RequestBody::Multipart(_) => None,
    }
}

/// Parses the metadata part of an upload request.
pub fn upload_metadata(request: &HttpRequest) -> Option<serde_json::Value> {
    match request.body.as_ref()? {
        RequestBody::Multipart(body) => serde_json::from_slice(&body.metadata).ok(),
        RequestBody::Json(_) => None,
    }
}

/// Returns the media part of an upload request as text.
pub fn upload_content(request: &HttpRequest) -> Option<String> {
    match request.body.as_ref()? {
        RequestBody::Multipart(body) => Some(String::from_utf8_lossy(&body.content).into_owned()),
        RequestBody::Json(_) => None,
    }
}

/// Returns the media content type of an upload request.
pub fn upload_content_type(request: &HttpRequest) -> Option<String> {
    match request.body.as_ref()? {
        RequestBody::Multipart(body) => Some(body.content_type.clone()),
        RequestBody::Json(_) => None,
    }
}

/// Canned Drive API payloads.
pub struct TestFixtures;

impl TestFixtures {
    /// A `files.list` response with the given `(id, name, parents)` entries.
    pub fn file_list(files: &[(&str, &str, &[&str])]) -> String {
        let files: Vec<serde_json::Value> = files
            .iter()
            .map(|(id, name, parents)| {
                serde_json::json!({
                    "id": id,
                    "name": name,
                    "mimeType": "text/plain",
                    "parents": parents,
                })
            })
            .collect();
        serde_json::json!({ "files": files }).to_string()
    }

    /// A `files.list` response holding folders.
    pub fn folder_list(folders: &[(&str, &str, &[&str])]) -> String {
        let files: Vec<serde_json::Value> = folders
            .iter()
            .map(|(id, name, parents)| {
                serde_json::json!({
                    "id": id,
                    "name": name,
                    "mimeType": crate::types::FOLDER_MIME_TYPE,
                    "parents": parents,
                })
            })
            .collect();
        serde_json::json!({ "files": files }).to_string()
    }

    /// An empty `files.list` response.
    pub fn empty_list() -> String {
        r#"{"files":[]}"#.to_string()
    }

    /// A created or updated file.
    pub fn file(id: &str, name: &str) -> String {
        serde_json::json!({ "id": id, "name": name }).to_string()
    }
}
