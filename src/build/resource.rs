use serde::Serialize;

use crate::error::RegistryError;
use crate::registry::{Entity, KeyedRegistry, ResourceKey};

/// A resource directory copied into the build output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MavenResource {
    directory: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    target_path: Option<String>,
    filtering: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    includes: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    excludes: Vec<String>,
}

impl MavenResource {
    pub fn directory(&self) -> &str {
        &self.directory
    }

    pub fn target_path(&self) -> Option<&str> {
        self.target_path.as_deref()
    }

    pub fn set_target_path(&mut self, target_path: impl Into<String>) -> &mut Self {
        self.target_path = Some(target_path.into());
        self
    }

    pub fn clear_target_path(&mut self) -> &mut Self {
        self.target_path = None;
        self
    }

    pub fn filtering(&self) -> bool {
        self.filtering
    }

    pub fn set_filtering(&mut self, filtering: bool) -> &mut Self {
        self.filtering = filtering;
        self
    }

    pub fn include(&mut self, pattern: impl Into<String>) -> &mut Self {
        self.includes.push(pattern.into());
        self
    }

    pub fn include_all<I, S>(&mut self, patterns: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.includes.extend(patterns.into_iter().map(Into::into));
        self
    }

    pub fn includes(&self) -> &[String] {
        &self.includes
    }

    pub fn clear_includes(&mut self) -> &mut Self {
        self.includes.clear();
        self
    }

    pub fn exclude(&mut self, pattern: impl Into<String>) -> &mut Self {
        self.excludes.push(pattern.into());
        self
    }

    pub fn exclude_all<I, S>(&mut self, patterns: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excludes.extend(patterns.into_iter().map(Into::into));
        self
    }

    pub fn excludes(&self) -> &[String] {
        &self.excludes
    }

    pub fn clear_excludes(&mut self) -> &mut Self {
        self.excludes.clear();
        self
    }
}

impl Entity for MavenResource {
    type Key = ResourceKey;

    fn create(key: &ResourceKey) -> Self {
        Self {
            directory: key.directory().to_string(),
            target_path: None,
            filtering: false,
            includes: Vec::new(),
            excludes: Vec::new(),
        }
    }
}

/// Resources of a build, unique per directory.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct ResourceContainer {
    resources: KeyedRegistry<MavenResource>,
}

impl ResourceContainer {
    pub fn add(&mut self, directory: impl Into<String>) -> Result<(), RegistryError> {
        self.resources.upsert(ResourceKey::new(directory)?);
        Ok(())
    }

    pub fn add_with<F>(
        &mut self,
        directory: impl Into<String>,
        customizer: F,
    ) -> Result<(), RegistryError>
    where
        F: FnOnce(&mut MavenResource),
    {
        self.resources
            .upsert_with(ResourceKey::new(directory)?, customizer)
    }

    pub fn has(&self, directory: &str) -> bool {
        self.get(directory).is_some()
    }

    pub fn get(&self, directory: &str) -> Option<&MavenResource> {
        let key = ResourceKey::new(directory).ok()?;
        self.resources.get(&key)
    }

    pub fn remove(&mut self, directory: &str) -> bool {
        match ResourceKey::new(directory) {
            Ok(key) => self.resources.remove(&key),
            Err(_) => false,
        }
    }

    pub fn values(&self) -> indexmap::map::Values<'_, ResourceKey, MavenResource> {
        self.resources.values()
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_defaults() {
        let mut resources = ResourceContainer::default();
        resources.add("src/main/resources").unwrap();
        let resource = resources.get("src/main/resources").unwrap();
        assert!(!resource.filtering());
        assert_eq!(resource.target_path(), None);
        assert!(resource.includes().is_empty());
        assert!(resource.excludes().is_empty());
    }

    #[test]
    fn test_patterns_accumulate_across_adds() {
        let mut resources = ResourceContainer::default();
        resources
            .add_with("src/main/resources", |r| {
                r.include("**/*.yml");
            })
            .unwrap();
        resources
            .add_with("src/main/resources", |r| {
                r.include_all(["**/*.yaml", "**/*.json"]).exclude("**/*.properties");
            })
            .unwrap();
        let resource = resources.get("src/main/resources").unwrap();
        assert_eq!(resource.includes(), ["**/*.yml", "**/*.yaml", "**/*.json"]);
        assert_eq!(resource.excludes(), ["**/*.properties"]);
        assert_eq!(resources.len(), 1);
    }

    #[test]
    fn test_explicit_clear_resets_patterns() {
        let mut resources = ResourceContainer::default();
        resources
            .add_with("src/main/resources", |r| {
                r.include("a").exclude("b");
            })
            .unwrap();
        resources
            .add_with("src/main/resources", |r| {
                r.clear_includes().clear_excludes().include("c");
            })
            .unwrap();
        let resource = resources.get("src/main/resources").unwrap();
        assert_eq!(resource.includes(), ["c"]);
        assert!(resource.excludes().is_empty());
    }

    #[test]
    fn test_target_path_last_write_wins() {
        let mut resources = ResourceContainer::default();
        resources
            .add_with("src/main/resources", |r| {
                r.set_target_path("first");
            })
            .unwrap();
        resources
            .add_with("src/main/resources", |r| {
                r.set_target_path("second");
            })
            .unwrap();
        resources.add("src/main/resources").unwrap();
        assert_eq!(
            resources.get("src/main/resources").unwrap().target_path(),
            Some("second")
        );
    }

    #[test]
    fn test_invalid_directory() {
        let mut resources = ResourceContainer::default();
        let err = resources.add("").unwrap_err();
        assert_eq!(err.field(), "resource directory");
        assert!(resources.is_empty());
        assert!(!resources.has(""));
        assert!(!resources.remove(""));
    }
}
