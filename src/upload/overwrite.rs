//! Finding an existing file to update in place.

use super::RemoteFile;
use crate::errors::GoogleDriveResult;
use crate::services::FilesService;
use crate::types::{escape_query_value, DriveFile, ListFilesParams};
use tracing::{debug, info};

/// Picks the first file named exactly `name` that sits directly in `folder_id`.
///
/// Same-named files in other folders are never selected.
pub fn select_existing(candidates: &[DriveFile], name: &str, folder_id: &str) -> Option<RemoteFile> {
    candidates
        .iter()
        .find(|f| f.name == name && f.has_parent(folder_id))
        .cloned()
        .map(RemoteFile::from)
}

/// Decides between create and update for one target.
pub struct OverwriteResolver<'a> {
    files: &'a FilesService,
}

impl<'a> OverwriteResolver<'a> {
    /// Creates a resolver over the files service.
    pub fn new(files: &'a FilesService) -> Self {
        Self { files }
    }

    /// Returns the file to update, or `None` to create a new one.
    ///
    /// No lookup is made when `overwrite` is false. The search itself is
    /// service-wide by name; folder membership is checked on the results.
    pub async fn resolve(
        &self,
        name: &str,
        folder_id: &str,
        overwrite: bool,
    ) -> GoogleDriveResult<Option<RemoteFile>> {
        if !overwrite {
            return Ok(None);
        }

        let query = format!("name='{}'", escape_query_value(name));
        let candidates = self.files.list_all(ListFilesParams::all_drives(query)).await?;
        debug!(name, candidates = candidates.len(), "Searched for existing file");

        let existing = select_existing(&candidates, name, folder_id);
        match &existing {
            Some(file) => info!(name, id = %file.id, "Found existing file to overwrite"),
            None => info!(name, folder = folder_id, "No existing file in target folder"),
        }

        Ok(existing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::{mock_client, MockResponse, MockTransport, TestFixtures};
    use std::sync::Arc;

    fn file(id: &str, name: &str, parents: &[&str]) -> DriveFile {
        DriveFile {
            id: id.to_string(),
            name: name.to_string(),
            mime_type: None,
            parents: parents.iter().map(|p| p.to_string()).collect(),
        }
    }

    #[test]
    fn test_select_existing_ignores_other_folders() {
        let candidates = vec![file("other", "x.txt", &["folder-2"])];
        assert!(select_existing(&candidates, "x.txt", "folder-1").is_none());
    }

    #[test]
    fn test_select_existing_first_match_wins() {
        let candidates = vec![
            file("other", "x.txt", &["folder-2"]),
            file("first", "x.txt", &["folder-3", "folder-1"]),
            file("second", "x.txt", &["folder-1"]),
        ];

        let found = select_existing(&candidates, "x.txt", "folder-1").unwrap();
        assert_eq!(found.id, "first");
        assert_eq!(found.parent_ids, vec!["folder-3", "folder-1"]);
    }

    #[test]
    fn test_select_existing_requires_exact_name() {
        let candidates = vec![file("1", "X.txt", &["folder-1"])];
        assert!(select_existing(&candidates, "x.txt", "folder-1").is_none());
    }

    #[tokio::test]
    async fn test_resolve_without_overwrite_skips_lookup() {
        let transport = Arc::new(MockTransport::new());
        let client = mock_client(transport.clone());
        let files = client.files();

        let existing = OverwriteResolver::new(&files)
            .resolve("x.txt", "folder-1", false)
            .await
            .unwrap();

        assert!(existing.is_none());
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn test_resolve_queries_by_escaped_name() {
        let transport = Arc::new(MockTransport::with_responses(vec![MockResponse::json(
            TestFixtures::file_list(&[("id-1", "it's.txt", &["folder-1"])]),
        )]));
        let client = mock_client(transport.clone());
        let files = client.files();

        let existing = OverwriteResolver::new(&files)
            .resolve("it's.txt", "folder-1", true)
            .await
            .unwrap();

        assert_eq!(existing.unwrap().id, "id-1");
        let request = transport.last_request().unwrap();
        assert_eq!(request.query_param("q").as_deref(), Some("name='it\\'s.txt'"));
    }

    #[tokio::test]
    async fn test_resolve_name_collision_elsewhere_creates() {
        let transport = Arc::new(MockTransport::with_responses(vec![MockResponse::json(
            TestFixtures::file_list(&[("id-1", "x.txt", &["somewhere-else"])]),
        )]));
        let client = mock_client(transport);
        let files = client.files();

        let existing = OverwriteResolver::new(&files)
            .resolve("x.txt", "folder-1", true)
            .await
            .unwrap();

        assert!(existing.is_none());
    }
}
