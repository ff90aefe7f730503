use serde::Serialize;
use tracing::trace;

use super::Configuration;
use crate::error::RegistryError;
use crate::registry::key::validate_identifier;
use crate::registry::{Entity, KeyedRegistry, PluginKey};

/// A build plugin, identified by its group and artifact id.
#[derive(Debug, Clone, Serialize)]
pub struct MavenPlugin {
    group_id: String,
    artifact_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<String>,
    extensions: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    inherited: Option<bool>,
    #[serde(skip_serializing_if = "KeyedRegistry::is_empty")]
    executions: KeyedRegistry<Execution>,
    #[serde(skip_serializing_if = "KeyedRegistry::is_empty")]
    dependencies: KeyedRegistry<PluginDependency>,
    #[serde(skip_serializing_if = "Configuration::is_empty")]
    configuration: Configuration,
    #[serde(skip)]
    rejection: Option<RegistryError>,
}

impl MavenPlugin {
    pub fn group_id(&self) -> &str {
        &self.group_id
    }

    pub fn artifact_id(&self) -> &str {
        &self.artifact_id
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn set_version(&mut self, version: impl Into<String>) -> &mut Self {
        self.version = Some(version.into());
        self
    }

    pub fn clear_version(&mut self) -> &mut Self {
        self.version = None;
        self
    }

    pub fn extensions(&self) -> bool {
        self.extensions
    }

    pub fn enable_extensions(&mut self) -> &mut Self {
        self.set_extensions(true)
    }

    pub fn set_extensions(&mut self, extensions: bool) -> &mut Self {
        self.extensions = extensions;
        self
    }

    /// `None` until explicitly set, so the POM default applies.
    pub fn inherited(&self) -> Option<bool> {
        self.inherited
    }

    pub fn set_inherited(&mut self, inherited: bool) -> &mut Self {
        self.inherited = Some(inherited);
        self
    }

    /// Adds the execution `id`, or merges into it when it already exists.
    pub fn execution<F>(&mut self, id: impl Into<String>, customizer: F) -> &mut Self
    where
        F: FnOnce(&mut Execution),
    {
        let id = id.into();
        if let Err(err) = validate_identifier("execution id", &id) {
            self.reject(err);
            return self;
        }
        trace!(plugin = %self.key_string(), execution = %id, "customizing execution");
        if let Err(err) = self.executions.upsert_with(id, customizer) {
            self.reject(err);
        }
        self
    }

    pub fn executions(&self) -> indexmap::map::Values<'_, String, Execution> {
        self.executions.values()
    }

    pub fn find_execution(&self, id: &str) -> Option<&Execution> {
        self.executions.get(&id.to_string())
    }

    /// Adds a dependency to the plugin's own classpath, or merges into it.
    pub fn dependency<F>(
        &mut self,
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        customizer: F,
    ) -> &mut Self
    where
        F: FnOnce(&mut PluginDependency),
    {
        match PluginKey::new(group_id, artifact_id) {
            Ok(key) => {
                if let Err(err) = self.dependencies.upsert_with(key, customizer) {
                    self.reject(err);
                }
            }
            Err(err) => self.reject(err),
        }
        self
    }

    pub fn dependencies(&self) -> indexmap::map::Values<'_, PluginKey, PluginDependency> {
        self.dependencies.values()
    }

    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    pub fn configure<F>(&mut self, customizer: F) -> &mut Self
    where
        F: FnOnce(&mut Configuration),
    {
        customizer(&mut self.configuration);
        self
    }

    fn reject(&mut self, err: RegistryError) {
        if self.rejection.is_none() {
            self.rejection = Some(err);
        }
    }

    fn key_string(&self) -> String {
        format!("{}:{}", self.group_id, self.artifact_id)
    }
}

impl Entity for MavenPlugin {
    type Key = PluginKey;

    fn create(key: &PluginKey) -> Self {
        Self {
            group_id: key.group_id().to_string(),
            artifact_id: key.artifact_id().to_string(),
            version: None,
            extensions: false,
            inherited: None,
            executions: KeyedRegistry::new(),
            dependencies: KeyedRegistry::new(),
            configuration: Configuration::default(),
            rejection: None,
        }
    }

    fn take_rejection(&mut self) -> Option<RegistryError> {
        self.rejection.take()
    }
}

/// A named execution of a plugin, binding goals to a lifecycle phase.
#[derive(Debug, Clone, Serialize)]
pub struct Execution {
    id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    phase: Option<String>,
    goals: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    inherited: Option<bool>,
    #[serde(skip_serializing_if = "Configuration::is_empty")]
    configuration: Configuration,
}

impl Execution {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn phase(&self) -> Option<&str> {
        self.phase.as_deref()
    }

    pub fn set_phase(&mut self, phase: impl Into<String>) -> &mut Self {
        self.phase = Some(phase.into());
        self
    }

    pub fn clear_phase(&mut self) -> &mut Self {
        self.phase = None;
        self
    }

    /// Appends a goal. Duplicates are kept.
    pub fn goal(&mut self, goal: impl Into<String>) -> &mut Self {
        self.goals.push(goal.into());
        self
    }

    pub fn goals(&self) -> &[String] {
        &self.goals
    }

    pub fn clear_goals(&mut self) -> &mut Self {
        self.goals.clear();
        self
    }

    pub fn inherited(&self) -> Option<bool> {
        self.inherited
    }

    pub fn set_inherited(&mut self, inherited: bool) -> &mut Self {
        self.inherited = Some(inherited);
        self
    }

    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    pub fn configure<F>(&mut self, customizer: F) -> &mut Self
    where
        F: FnOnce(&mut Configuration),
    {
        customizer(&mut self.configuration);
        self
    }
}

impl Entity for Execution {
    type Key = String;

    fn create(id: &String) -> Self {
        Self {
            id: id.clone(),
            phase: None,
            goals: Vec::new(),
            inherited: None,
            configuration: Configuration::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PluginDependency {
    group_id: String,
    artifact_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<String>,
}

impl PluginDependency {
    pub fn group_id(&self) -> &str {
        &self.group_id
    }

    pub fn artifact_id(&self) -> &str {
        &self.artifact_id
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn set_version(&mut self, version: impl Into<String>) -> &mut Self {
        self.version = Some(version.into());
        self
    }

    pub fn clear_version(&mut self) -> &mut Self {
        self.version = None;
        self
    }
}

impl Entity for PluginDependency {
    type Key = PluginKey;

    fn create(key: &PluginKey) -> Self {
        Self {
            group_id: key.group_id().to_string(),
            artifact_id: key.artifact_id().to_string(),
            version: None,
        }
    }
}

/// The plugins of a build, unique per group and artifact id.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct PluginContainer {
    plugins: KeyedRegistry<MavenPlugin>,
}

impl PluginContainer {
    /// Registers the plugin unless it is already present. Existing state is kept.
    pub fn add(
        &mut self,
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
    ) -> Result<(), RegistryError> {
        self.plugins.upsert(PluginKey::new(group_id, artifact_id)?);
        Ok(())
    }

    /// Registers the plugin if needed and applies `customizer` to it.
    pub fn add_with<F>(
        &mut self,
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        customizer: F,
    ) -> Result<(), RegistryError>
    where
        F: FnOnce(&mut MavenPlugin),
    {
        self.plugins
            .upsert_with(PluginKey::new(group_id, artifact_id)?, customizer)
    }

    pub fn has(&self, group_id: &str, artifact_id: &str) -> bool {
        self.get(group_id, artifact_id).is_some()
    }

    pub fn get(&self, group_id: &str, artifact_id: &str) -> Option<&MavenPlugin> {
        let key = PluginKey::new(group_id, artifact_id).ok()?;
        self.plugins.get(&key)
    }

    pub fn remove(&mut self, group_id: &str, artifact_id: &str) -> bool {
        match PluginKey::new(group_id, artifact_id) {
            Ok(key) => self.plugins.remove(&key),
            Err(_) => false,
        }
    }

    pub fn values(&self) -> indexmap::map::Values<'_, PluginKey, MavenPlugin> {
        self.plugins.values()
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}
