//! Ordered, identity-keyed collections with add-or-merge semantics.
//!
//! A [`KeyedRegistry`] never replaces an entity once it exists: every add for a
//! known key fetches the stored entity and lets the caller mutate it through a
//! customizer closure. Enumeration follows first-add order, however many merges
//! happen afterwards.

pub mod key;

pub use key::{PluginKey, ResourceKey};

use std::fmt;
use std::hash::Hash;

use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use tracing::{debug, trace};

use crate::error::RegistryError;

/// An entity that can live in a [`KeyedRegistry`].
pub trait Entity: Clone + fmt::Debug {
    type Key: Clone + Eq + Hash + fmt::Debug + fmt::Display;

    /// Builds the entity with its default state for a freshly seen key.
    fn create(key: &Self::Key) -> Self;

    /// Returns the first nested key rejected while a customizer ran, if any.
    ///
    /// Nested keyed adds (executions, plugin dependencies) cannot return an
    /// error from inside a customizer, so entities record the rejection and
    /// the registry collects it here before committing.
    fn take_rejection(&mut self) -> Option<RegistryError> {
        None
    }
}

#[derive(Debug, Clone)]
pub struct KeyedRegistry<E: Entity> {
    entries: IndexMap<E::Key, E>,
}

impl<E: Entity> Default for KeyedRegistry<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Entity> KeyedRegistry<E> {
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Registers `key` with default state unless it is already present.
    pub fn upsert(&mut self, key: E::Key) {
        if !self.entries.contains_key(&key) {
            debug!(key = %key, "registering entity");
            let entity = E::create(&key);
            self.entries.insert(key, entity);
        }
    }

    /// Registers `key` if needed, then applies `customizer` to its entity.
    ///
    /// The customizer works on a staged copy. If it touched an invalid nested
    /// key the copy is dropped and the registry is left as it was.
    pub fn upsert_with<F>(&mut self, key: E::Key, customizer: F) -> Result<(), RegistryError>
    where
        F: FnOnce(&mut E),
    {
        let mut staged = match self.entries.get(&key) {
            Some(existing) => {
                trace!(key = %key, "merging into existing entity");
                existing.clone()
            }
            None => {
                debug!(key = %key, "registering entity");
                E::create(&key)
            }
        };

        customizer(&mut staged);

        if let Some(rejection) = staged.take_rejection() {
            debug!(key = %key, error = %rejection, "customization rejected");
            return Err(rejection);
        }

        // Re-inserting an existing key keeps its original position.
        self.entries.insert(key, staged);
        Ok(())
    }

    pub fn get(&self, key: &E::Key) -> Option<&E> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &E::Key) -> bool {
        self.entries.contains_key(key)
    }

    /// Removes the entity for `key`, keeping the relative order of the others.
    pub fn remove(&mut self, key: &E::Key) -> bool {
        let removed = self.entries.shift_remove(key).is_some();
        if removed {
            debug!(key = %key, "removed entity");
        }
        removed
    }

    /// Entities in first-add order. The iterator is `Clone`, so it can be restarted.
    pub fn values(&self) -> indexmap::map::Values<'_, E::Key, E> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<E: Entity + Serialize> Serialize for KeyedRegistry<E> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.values())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Tag {
        name: String,
        notes: Vec<String>,
        rejection: Option<RegistryError>,
    }

    impl Tag {
        fn note(&mut self, note: &str) {
            if note.is_empty() {
                if self.rejection.is_none() {
                    self.rejection =
                        Some(RegistryError::invalid_key("note", note, "must not be empty"));
                }
                return;
            }
            self.notes.push(note.to_string());
        }
    }

    impl Entity for Tag {
        type Key = String;

        fn create(key: &String) -> Self {
            Self {
                name: key.clone(),
                notes: Vec::new(),
                rejection: None,
            }
        }

        fn take_rejection(&mut self) -> Option<RegistryError> {
            self.rejection.take()
        }
    }

    fn names(registry: &KeyedRegistry<Tag>) -> Vec<&str> {
        registry.values().map(|t| t.name.as_str()).collect()
    }

    #[test]
    fn test_upsert_is_unique_per_key() {
        let mut registry = KeyedRegistry::<Tag>::new();
        registry.upsert("a".to_string());
        registry.upsert("a".to_string());
        registry.upsert_with("a".to_string(), |t| t.note("x")).unwrap();
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_insertion_order_survives_merges() {
        let mut registry = KeyedRegistry::<Tag>::new();
        registry.upsert("b".to_string());
        registry.upsert("a".to_string());
        registry.upsert("c".to_string());
        registry.upsert_with("b".to_string(), |t| t.note("late")).unwrap();
        assert_eq!(names(&registry), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_merge_accumulates() {
        let mut registry = KeyedRegistry::<Tag>::new();
        registry.upsert_with("a".to_string(), |t| t.note("one")).unwrap();
        registry.upsert_with("a".to_string(), |t| t.note("two")).unwrap();
        let tag = registry.get(&"a".to_string()).unwrap();
        assert_eq!(tag.notes, vec!["one", "two"]);
    }

    #[test]
    fn test_rejected_customizer_leaves_existing_entity_untouched() {
        let mut registry = KeyedRegistry::<Tag>::new();
        registry.upsert_with("a".to_string(), |t| t.note("one")).unwrap();
        let err = registry
            .upsert_with("a".to_string(), |t| {
                t.note("two");
                t.note("");
            })
            .unwrap_err();
        assert_eq!(err.field(), "note");
        assert_eq!(registry.get(&"a".to_string()).unwrap().notes, vec!["one"]);
    }

    #[test]
    fn test_rejected_customizer_does_not_insert() {
        let mut registry = KeyedRegistry::<Tag>::new();
        assert!(registry.upsert_with("a".to_string(), |t| t.note("")).is_err());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_remove_keeps_order_of_the_rest() {
        let mut registry = KeyedRegistry::<Tag>::new();
        for name in ["a", "b", "c"] {
            registry.upsert(name.to_string());
        }
        assert!(registry.remove(&"b".to_string()));
        assert!(!registry.remove(&"b".to_string()));
        registry.upsert("b".to_string());
        assert_eq!(names(&registry), vec!["a", "c", "b"]);
    }

    #[test]
    fn test_values_is_restartable() {
        let mut registry = KeyedRegistry::<Tag>::new();
        registry.upsert("a".to_string());
        registry.upsert("b".to_string());
        let values = registry.values();
        let first: Vec<_> = values.clone().collect();
        let second: Vec<_> = values.collect();
        assert_eq!(first, second);
        assert_eq!(names(&registry), names(&registry));
    }
}
