//! Target name resolution.

use crate::config::UploadConfig;
use crate::errors::ConfigurationError;
use std::path::Path;

/// Derives the remote name for one matched file.
///
/// Priority: the complete matched path when requested, else the base name
/// when several files matched or no name was configured, else the configured
/// name. The prefix is applied last. An empty result is a configuration error.
pub fn resolve_target_name(
    source: &Path,
    multiple_matches: bool,
    config: &UploadConfig,
) -> Result<String, ConfigurationError> {
    let name = if config.use_complete_source_name {
        source.to_string_lossy().into_owned()
    } else {
        match config.name.as_deref() {
            Some(name) if !multiple_matches => name.to_string(),
            _ => base_name(source),
        }
    };

    if name.is_empty() {
        return Err(ConfigurationError::EmptyTargetName(
            source.display().to_string(),
        ));
    }

    Ok(match config.name_prefix.as_deref() {
        Some(prefix) => format!("{}{}", prefix, name),
        None => name,
    })
}

fn base_name(source: &Path) -> String {
    source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;

    fn config() -> UploadConfig {
        UploadConfig::new("*", "root", SecretString::new(String::new()))
    }

    #[test]
    fn test_complete_source_name_wins() {
        let config = config().with_complete_source_name(true).with_name("Ignored");
        let path = Path::new("build/out/app.zip");

        assert_eq!(resolve_target_name(path, false, &config).unwrap(), "build/out/app.zip");
        assert_eq!(resolve_target_name(path, true, &config).unwrap(), "build/out/app.zip");
    }

    #[test]
    fn test_complete_source_name_with_prefix() {
        let config = config()
            .with_complete_source_name(true)
            .with_name_prefix("nightly-");

        assert_eq!(
            resolve_target_name(Path::new("build/app.zip"), false, &config).unwrap(),
            "nightly-build/app.zip"
        );
    }

    #[test]
    fn test_single_match_uses_configured_name() {
        let config = config().with_name("Report");

        assert_eq!(
            resolve_target_name(Path::new("docs/report.pdf"), false, &config).unwrap(),
            "Report"
        );
    }

    #[test]
    fn test_multiple_matches_use_base_name() {
        let config = config().with_name("Report");

        assert_eq!(resolve_target_name(Path::new("out/a.txt"), true, &config).unwrap(), "a.txt");
        assert_eq!(resolve_target_name(Path::new("out/b.txt"), true, &config).unwrap(), "b.txt");
    }

    #[test]
    fn test_no_name_uses_base_name() {
        assert_eq!(
            resolve_target_name(Path::new("out/a.txt"), false, &config()).unwrap(),
            "a.txt"
        );
    }

    #[test]
    fn test_prefix_applies_to_base_name() {
        let config = config().with_name_prefix("v1.2-");

        assert_eq!(
            resolve_target_name(Path::new("out/a.txt"), true, &config).unwrap(),
            "v1.2-a.txt"
        );
    }

    #[test]
    fn test_empty_name_is_fatal() {
        let config = config().with_name_prefix("prefix-");

        assert!(matches!(
            resolve_target_name(Path::new(".."), false, &config),
            Err(ConfigurationError::EmptyTargetName(_))
        ));
    }
}
