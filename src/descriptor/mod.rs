//! Build fragments described in JSON or YAML files.
//!
//! A descriptor is applied through the same add-or-merge operations as the
//! programmatic API, so several descriptors can amend one build. Optional
//! scalars distinguish "absent" (keep) from an explicit `null` (clear).

pub mod loader;

pub use loader::{load, load_all};

use std::fmt;

use indexmap::IndexMap;
use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer};
use tracing::trace;

use crate::build::{BuildSettings, Configuration, Execution, MavenBuild, MavenPlugin, MavenResource};
use crate::error::RegistryError;

/// Text positions (properties, versions, goals, settings) are plain `String`s.
/// serde_yaml hands a plain scalar to a string visitor as written, so
/// `java.version: 1.10` stays `1.10`. JSON descriptors must quote such values.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildDescriptor {
    #[serde(default)]
    pub settings: Option<SettingsDescriptor>,
    #[serde(default)]
    pub properties: IndexMap<String, String>,
    #[serde(default)]
    pub plugins: Vec<PluginDescriptor>,
    #[serde(default)]
    pub resources: Vec<ResourceDescriptor>,
    #[serde(default)]
    pub test_resources: Vec<ResourceDescriptor>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SettingsDescriptor {
    #[serde(default, deserialize_with = "explicit_null")]
    pub group_id: Option<Option<String>>,
    #[serde(default, deserialize_with = "explicit_null")]
    pub artifact_id: Option<Option<String>>,
    #[serde(default, deserialize_with = "explicit_null")]
    pub version: Option<Option<String>>,
    #[serde(default, deserialize_with = "explicit_null")]
    pub packaging: Option<Option<String>>,
    #[serde(default, deserialize_with = "explicit_null")]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "explicit_null")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "explicit_null")]
    pub final_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "explicit_null")]
    pub source_directory: Option<Option<String>>,
    #[serde(default, deserialize_with = "explicit_null")]
    pub test_source_directory: Option<Option<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PluginDescriptor {
    pub group_id: String,
    pub artifact_id: String,
    #[serde(default, deserialize_with = "explicit_null")]
    pub version: Option<Option<String>>,
    #[serde(default)]
    pub extensions: Option<bool>,
    #[serde(default)]
    pub inherited: Option<bool>,
    #[serde(default)]
    pub configuration: IndexMap<String, ConfigValue>,
    #[serde(default)]
    pub dependencies: Vec<DependencyDescriptor>,
    #[serde(default)]
    pub executions: Vec<ExecutionDescriptor>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExecutionDescriptor {
    pub id: String,
    #[serde(default, deserialize_with = "explicit_null")]
    pub phase: Option<Option<String>>,
    #[serde(default)]
    pub goals: Vec<String>,
    #[serde(default)]
    pub inherited: Option<bool>,
    #[serde(default)]
    pub configuration: IndexMap<String, ConfigValue>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DependencyDescriptor {
    pub group_id: String,
    pub artifact_id: String,
    #[serde(default, deserialize_with = "explicit_null")]
    pub version: Option<Option<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResourceDescriptor {
    pub directory: String,
    #[serde(default, deserialize_with = "explicit_null")]
    pub target_path: Option<Option<String>>,
    #[serde(default)]
    pub filtering: Option<bool>,
    #[serde(default)]
    pub includes: Vec<String>,
    #[serde(default)]
    pub excludes: Vec<String>,
}

/// A configuration value: text, a repeated element, or a nested block.
///
/// A list repeats its element name, and a list of maps becomes repeated
/// nested blocks. The shape is only known after peeking, so unquoted YAML
/// numbers arrive already parsed: integers are kept, decimals are refused
/// rather than silently reformatted (`11.0` would otherwise read back as `11`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValue {
    Text(String),
    List(Vec<ConfigValue>),
    Nested(IndexMap<String, ConfigValue>),
}

impl<'de> Deserialize<'de> for ConfigValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ConfigValueVisitor)
    }
}

struct ConfigValueVisitor;

impl<'de> Visitor<'de> for ConfigValueVisitor {
    type Value = ConfigValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string, boolean, integer, list or map")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<ConfigValue, E> {
        Ok(ConfigValue::Text(v.to_string()))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<ConfigValue, E> {
        Ok(ConfigValue::Text(v.to_string()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<ConfigValue, E> {
        Ok(ConfigValue::Text(v.to_string()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<ConfigValue, E> {
        Err(E::custom(format!(
            "decimal configuration value {v} must be quoted to keep its exact text"
        )))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<ConfigValue, E> {
        Ok(ConfigValue::Text(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<ConfigValue, E> {
        Ok(ConfigValue::Text(v))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<ConfigValue, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(ConfigValue::List(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<ConfigValue, A::Error> {
        let mut entries = IndexMap::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((name, value)) = map.next_entry::<String, ConfigValue>()? {
            entries.insert(name, value);
        }
        Ok(ConfigValue::Nested(entries))
    }
}

/// Maps a present field to `Some`, so an explicit `null` becomes `Some(None)`.
fn explicit_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Absent keeps `slot`, `null` clears it, a value replaces it.
fn assign(slot: &mut Option<String>, value: &Option<Option<String>>) {
    if let Some(value) = value {
        slot.clone_from(value);
    }
}

impl BuildDescriptor {
    /// Merges this descriptor into `build`. Either every entry applies or none does.
    pub fn apply(&self, build: &mut MavenBuild) -> Result<(), RegistryError> {
        let mut staged = build.clone();

        if let Some(settings) = &self.settings {
            settings.customize(staged.settings_mut());
        }
        for (name, value) in &self.properties {
            staged.property(name, value);
        }
        for plugin in &self.plugins {
            trace!(group_id = %plugin.group_id, artifact_id = %plugin.artifact_id, "applying plugin");
            staged
                .plugins_mut()
                .add_with(&plugin.group_id, &plugin.artifact_id, |p| plugin.customize(p))?;
        }
        for resource in &self.resources {
            staged.resource(&resource.directory, |r| resource.customize(r))?;
        }
        for resource in &self.test_resources {
            staged.test_resource(&resource.directory, |r| resource.customize(r))?;
        }

        *build = staged;
        Ok(())
    }
}

impl SettingsDescriptor {
    fn customize(&self, settings: &mut BuildSettings) {
        assign(&mut settings.group_id, &self.group_id);
        assign(&mut settings.artifact_id, &self.artifact_id);
        assign(&mut settings.version, &self.version);
        assign(&mut settings.packaging, &self.packaging);
        assign(&mut settings.name, &self.name);
        assign(&mut settings.description, &self.description);
        assign(&mut settings.final_name, &self.final_name);
        assign(&mut settings.source_directory, &self.source_directory);
        assign(&mut settings.test_source_directory, &self.test_source_directory);
    }
}

impl PluginDescriptor {
    fn customize(&self, plugin: &mut MavenPlugin) {
        match &self.version {
            Some(Some(version)) => {
                plugin.set_version(version);
            }
            Some(None) => {
                plugin.clear_version();
            }
            None => {}
        }
        if let Some(extensions) = self.extensions {
            plugin.set_extensions(extensions);
        }
        if let Some(inherited) = self.inherited {
            plugin.set_inherited(inherited);
        }
        if !self.configuration.is_empty() {
            plugin.configure(|c| apply_configuration(c, &self.configuration));
        }
        for dependency in &self.dependencies {
            plugin.dependency(&dependency.group_id, &dependency.artifact_id, |d| {
                match &dependency.version {
                    Some(Some(version)) => {
                        d.set_version(version);
                    }
                    Some(None) => {
                        d.clear_version();
                    }
                    None => {}
                }
            });
        }
        for execution in &self.executions {
            plugin.execution(&execution.id, |e| execution.customize(e));
        }
    }
}

impl ExecutionDescriptor {
    fn customize(&self, execution: &mut Execution) {
        match &self.phase {
            Some(Some(phase)) => {
                execution.set_phase(phase);
            }
            Some(None) => {
                execution.clear_phase();
            }
            None => {}
        }
        for goal in &self.goals {
            execution.goal(goal);
        }
        if let Some(inherited) = self.inherited {
            execution.set_inherited(inherited);
        }
        if !self.configuration.is_empty() {
            execution.configure(|c| apply_configuration(c, &self.configuration));
        }
    }
}

impl ResourceDescriptor {
    fn customize(&self, resource: &mut MavenResource) {
        match &self.target_path {
            Some(Some(target_path)) => {
                resource.set_target_path(target_path);
            }
            Some(None) => {
                resource.clear_target_path();
            }
            None => {}
        }
        if let Some(filtering) = self.filtering {
            resource.set_filtering(filtering);
        }
        resource.include_all(&self.includes).exclude_all(&self.excludes);
    }
}

fn apply_configuration(config: &mut Configuration, values: &IndexMap<String, ConfigValue>) {
    for (name, value) in values {
        match value {
            ConfigValue::Text(text) => {
                config.add(name, text);
            }
            ConfigValue::List(items) => apply_repeated(config, name, items),
            ConfigValue::Nested(nested) => {
                config.configure(name, |c| apply_configuration(c, nested));
            }
        }
    }
}

/// Each list item becomes its own element, so nested blocks are appended, not merged.
fn apply_repeated(config: &mut Configuration, name: &str, items: &[ConfigValue]) {
    for item in items {
        match item {
            ConfigValue::Text(text) => {
                config.add(name, text);
            }
            ConfigValue::List(inner) => apply_repeated(config, name, inner),
            ConfigValue::Nested(nested) => {
                config.add_nested(name, |c| apply_configuration(c, nested));
            }
        }
    }
}
