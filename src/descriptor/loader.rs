use std::fs;
use std::path::Path;

use tracing::{debug, trace};

use super::BuildDescriptor;
use crate::build::MavenBuild;
use crate::error::{DescriptorError, Result};

/// Reads a descriptor, picking the parser from the file extension.
pub fn load<P: AsRef<Path>>(path: P) -> std::result::Result<BuildDescriptor, DescriptorError> {
    let path = path.as_ref();
    trace!(path = %path.display(), "loading descriptor");

    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    if !matches!(extension, "json" | "yaml" | "yml") {
        return Err(DescriptorError::unsupported_format(extension));
    }

    let content =
        fs::read_to_string(path).map_err(|e| DescriptorError::read_error(path, e))?;

    let descriptor: BuildDescriptor = match extension {
        "json" => serde_json::from_str(&content)
            .map_err(|e| DescriptorError::parse_error(path, e.to_string()))?,
        _ => serde_yaml::from_str(&content)
            .map_err(|e| DescriptorError::parse_error(path, e.to_string()))?,
    };

    debug!(
        path = %path.display(),
        plugins = descriptor.plugins.len(),
        resources = descriptor.resources.len(),
        test_resources = descriptor.test_resources.len(),
        "loaded descriptor"
    );
    Ok(descriptor)
}

/// Loads every descriptor in order and merges them into a single build.
pub fn load_all<P: AsRef<Path>>(paths: &[P]) -> Result<MavenBuild> {
    let mut build = MavenBuild::new();
    for path in paths {
        let path = path.as_ref();
        let descriptor = load(path)?;
        descriptor
            .apply(&mut build)
            .map_err(|e| DescriptorError::rejected(path, e))?;
    }
    debug!(
        descriptors = paths.len(),
        plugins = build.plugins().len(),
        "merged descriptors"
    );
    Ok(build)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use tempfile::TempDir;

    #[test]
    fn test_load_yaml() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("build.yaml");
        fs::write(
            &path,
            "plugins:\n  - group_id: com.example\n    artifact_id: test-plugin\n",
        )
        .unwrap();

        let descriptor = load(&path).unwrap();
        assert_eq!(descriptor.plugins.len(), 1);
        assert_eq!(descriptor.plugins[0].artifact_id, "test-plugin");
    }

    #[test]
    fn test_load_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("build.json");
        fs::write(
            &path,
            r#"{"resources": [{"directory": "src/main/resources", "filtering": true}]}"#,
        )
        .unwrap();

        let descriptor = load(&path).unwrap();
        assert_eq!(descriptor.resources[0].filtering, Some(true));
    }

    #[test]
    fn test_load_unsupported_extension() {
        let err = load("pom.xml").unwrap_err();
        assert!(matches!(err, DescriptorError::UnsupportedFormat { .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let err = load(temp_dir.path().join("missing.yaml")).unwrap_err();
        assert!(matches!(err, DescriptorError::ReadError { .. }));
    }

    #[test]
    fn test_load_malformed_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("build.json");
        fs::write(&path, "{\"plugins\": [").unwrap();

        let err = load(&path).unwrap_err();
        assert!(err.to_string().contains("failed to parse descriptor"));
    }

    #[test]
    fn test_load_all_rejects_invalid_key() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("build.yaml");
        fs::write(&path, "plugins:\n  - {group_id: '', artifact_id: a}\n").unwrap();

        let err = load_all(&[&path]).unwrap_err();
        assert!(matches!(
            err,
            Error::Descriptor(DescriptorError::Rejected { .. })
        ));
    }
}
