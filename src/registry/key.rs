use std::fmt;

use crate::error::RegistryError;

/// Validates a Maven identifier such as a group id, artifact id or execution id.
pub fn validate_identifier(field: &'static str, value: &str) -> Result<(), RegistryError> {
    check_blank(field, value)?;
    if let Some(c) = value
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-')))
    {
        return Err(RegistryError::invalid_key(
            field,
            value,
            format!("contains invalid character {c:?}"),
        ));
    }
    Ok(())
}

/// Validates a resource directory. Paths are free-form apart from control characters.
pub fn validate_directory(value: &str) -> Result<(), RegistryError> {
    check_blank("resource directory", value)?;
    if value.chars().any(char::is_control) {
        return Err(RegistryError::invalid_key(
            "resource directory",
            value,
            "contains a control character",
        ));
    }
    Ok(())
}

fn check_blank(field: &'static str, value: &str) -> Result<(), RegistryError> {
    if value.trim().is_empty() {
        return Err(RegistryError::invalid_key(field, value, "must not be empty"));
    }
    if value.trim() != value {
        return Err(RegistryError::invalid_key(
            field,
            value,
            "must not have surrounding whitespace",
        ));
    }
    Ok(())
}

/// Group and artifact identifier pair naming a plugin or a plugin dependency.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PluginKey {
    group_id: String,
    artifact_id: String,
}

impl PluginKey {
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
    ) -> Result<Self, RegistryError> {
        let group_id = group_id.into();
        let artifact_id = artifact_id.into();
        validate_identifier("group id", &group_id)?;
        validate_identifier("artifact id", &artifact_id)?;
        Ok(Self {
            group_id,
            artifact_id,
        })
    }

    pub fn group_id(&self) -> &str {
        &self.group_id
    }

    pub fn artifact_id(&self) -> &str {
        &self.artifact_id
    }
}

impl fmt::Display for PluginKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group_id, self.artifact_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceKey {
    directory: String,
}

impl ResourceKey {
    pub fn new(directory: impl Into<String>) -> Result<Self, RegistryError> {
        let directory = directory.into();
        validate_directory(&directory)?;
        Ok(Self { directory })
    }

    pub fn directory(&self) -> &str {
        &self.directory
    }
}

impl fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.directory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plugin_key_valid() {
        let key = PluginKey::new("org.apache.maven.plugins", "maven-compiler-plugin").unwrap();
        assert_eq!(key.group_id(), "org.apache.maven.plugins");
        assert_eq!(key.artifact_id(), "maven-compiler-plugin");
        assert_eq!(key.to_string(), "org.apache.maven.plugins:maven-compiler-plugin");
    }

    #[test]
    fn test_plugin_key_empty_group() {
        let err = PluginKey::new("", "test-plugin").unwrap_err();
        assert_eq!(err.field(), "group id");
    }

    #[test]
    fn test_plugin_key_blank_artifact() {
        let err = PluginKey::new("com.example", "   ").unwrap_err();
        assert_eq!(err.field(), "artifact id");
        assert!(err.to_string().contains("must not be empty"));
    }

    #[test]
    fn test_plugin_key_surrounding_whitespace() {
        let err = PluginKey::new(" com.example", "test-plugin").unwrap_err();
        assert!(err.to_string().contains("surrounding whitespace"));
    }

    #[test]
    fn test_plugin_key_invalid_character() {
        let err = PluginKey::new("com.example", "test<plugin>").unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid artifact id 'test<plugin>': contains invalid character '<'"
        );
    }

    #[test]
    fn test_resource_key_accepts_spaces() {
        let key = ResourceKey::new("src/main/my resources").unwrap();
        assert_eq!(key.directory(), "src/main/my resources");
    }

    #[test]
    fn test_resource_key_rejects_control_characters() {
        assert!(ResourceKey::new("src/main\nresources").is_err());
        assert!(ResourceKey::new("").is_err());
    }

    #[test]
    fn test_validate_identifier_execution_id() {
        assert!(validate_identifier("execution id", "default-compile").is_ok());
        assert!(validate_identifier("execution id", "first run").is_err());
    }
}
