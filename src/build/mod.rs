//! In-memory model of a Maven build.
//!
//! Plugins and resources are held in keyed registries: adding an entry that
//! already exists customizes it in place instead of replacing it, so several
//! contributors can amend the same plugin without losing each other's changes.

pub mod configuration;
pub mod plugin;
pub mod resource;
pub mod settings;

pub use configuration::{Configuration, Setting, SettingValue};
pub use plugin::{Execution, MavenPlugin, PluginContainer, PluginDependency};
pub use resource::{MavenResource, ResourceContainer};
pub use settings::BuildSettings;

use indexmap::IndexMap;
use serde::Serialize;

use crate::error::RegistryError;

#[derive(Debug, Clone, Default, Serialize)]
pub struct MavenBuild {
    settings: BuildSettings,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    properties: IndexMap<String, String>,
    plugins: PluginContainer,
    #[serde(skip_serializing_if = "ResourceContainer::is_empty")]
    resources: ResourceContainer,
    #[serde(skip_serializing_if = "ResourceContainer::is_empty")]
    test_resources: ResourceContainer,
}

impl MavenBuild {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn settings(&self) -> &BuildSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut BuildSettings {
        &mut self.settings
    }

    /// Sets a build property. Re-setting a name replaces its value in place.
    pub fn property(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    pub fn properties(&self) -> &IndexMap<String, String> {
        &self.properties
    }

    pub fn plugins(&self) -> &PluginContainer {
        &self.plugins
    }

    pub fn plugins_mut(&mut self) -> &mut PluginContainer {
        &mut self.plugins
    }

    /// Shortcut for registering a plugin without customizing it.
    pub fn plugin(
        &mut self,
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
    ) -> Result<(), RegistryError> {
        self.plugins.add(group_id, artifact_id)
    }

    pub fn resource<F>(
        &mut self,
        directory: impl Into<String>,
        customizer: F,
    ) -> Result<(), RegistryError>
    where
        F: FnOnce(&mut MavenResource),
    {
        self.resources.add_with(directory, customizer)
    }

    pub fn resources(&self) -> &ResourceContainer {
        &self.resources
    }

    pub fn resources_mut(&mut self) -> &mut ResourceContainer {
        &mut self.resources
    }

    pub fn test_resource<F>(
        &mut self,
        directory: impl Into<String>,
        customizer: F,
    ) -> Result<(), RegistryError>
    where
        F: FnOnce(&mut MavenResource),
    {
        self.test_resources.add_with(directory, customizer)
    }

    pub fn test_resources(&self) -> &ResourceContainer {
        &self.test_resources
    }

    pub fn test_resources_mut(&mut self) -> &mut ResourceContainer {
        &mut self.test_resources
    }
}
