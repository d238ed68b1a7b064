//! Run configuration for an upload.

use secrecy::SecretString;

/// Immutable settings for one run of the action.
///
/// Built once at startup and passed by reference to every component.
#[derive(Debug, Clone)]
pub struct UploadConfig {
    /// Glob pattern selecting the local files.
    pub pattern: String,

    /// Fixed target name, honored only when exactly one file matched.
    pub name: Option<String>,

    /// Destination root folder id.
    pub folder_id: String,

    /// Base64 encoded service-account key document.
    pub credentials: SecretString,

    /// Update a same-named file in the target folder instead of creating a new one.
    pub overwrite: bool,

    /// Explicit content type; `None` lets Drive infer it.
    pub mime_type: Option<String>,

    /// Use the matched path, directories included, as the remote name.
    pub use_complete_source_name: bool,

    /// Recreate the local directory hierarchy as Drive folders.
    pub mirror_directory_structure: bool,

    /// Prefix prepended to every resolved name.
    pub name_prefix: Option<String>,
}

impl UploadConfig {
    /// Creates a configuration with the required inputs and every flag off.
    pub fn new(
        pattern: impl Into<String>,
        folder_id: impl Into<String>,
        credentials: SecretString,
    ) -> Self {
        Self {
            pattern: pattern.into(),
            name: None,
            folder_id: folder_id.into(),
            credentials,
            overwrite: false,
            mime_type: None,
            use_complete_source_name: false,
            mirror_directory_structure: false,
            name_prefix: None,
        }
    }

    /// Sets the fixed target name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = non_empty(name.into());
        self
    }

    /// Enables or disables overwrite.
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Sets the content type.
    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = non_empty(mime_type.into());
        self
    }

    /// Uses the full matched path as the remote name.
    pub fn with_complete_source_name(mut self, enabled: bool) -> Self {
        self.use_complete_source_name = enabled;
        self
    }

    /// Mirrors local directories as remote folders.
    pub fn with_mirror_directory_structure(mut self, enabled: bool) -> Self {
        self.mirror_directory_structure = enabled;
        self
    }

    /// Sets the name prefix.
    pub fn with_name_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.name_prefix = non_empty(prefix.into());
        self
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = UploadConfig::new("dist/*", "root", SecretString::new("c3Ry".to_string()));

        assert_eq!(config.pattern, "dist/*");
        assert_eq!(config.folder_id, "root");
        assert!(!config.overwrite);
        assert!(!config.use_complete_source_name);
        assert!(!config.mirror_directory_structure);
        assert_eq!(config.name, None);
        assert_eq!(config.mime_type, None);
        assert_eq!(config.name_prefix, None);
    }

    #[test]
    fn test_empty_strings_are_absent() {
        let config = UploadConfig::new("*", "root", SecretString::new(String::new()))
            .with_name("")
            .with_mime_type("")
            .with_name_prefix("");

        assert_eq!(config.name, None);
        assert_eq!(config.mime_type, None);
        assert_eq!(config.name_prefix, None);
    }

    #[test]
    fn test_debug_hides_credentials() {
        let config = UploadConfig::new("*", "root", SecretString::new("c2VjcmV0".to_string()));
        assert!(!format!("{:?}", config).contains("c2VjcmV0"));
    }
}
