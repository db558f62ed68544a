//! Registry of blueprint entities.
//!
//! A template is an ordinary entity spawned with the `Disabled` marker so no
//! system sees it. Pools clone templates to create their members, and
//! configuration names templates by the key they were registered under.
use bevy_ecs::prelude::*;
use rustc_hash::FxHashMap;

#[derive(Resource, Debug, Default)]
pub struct TemplateStore {
    map: FxHashMap<String, Entity>,
}

impl TemplateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `entity` under `key`, replacing any previous registration.
    pub fn insert(&mut self, key: impl Into<String>, entity: Entity) {
        self.map.insert(key.into(), entity);
    }

    pub fn get(&self, key: impl AsRef<str>) -> Option<Entity> {
        self.map.get(key.as_ref()).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_replaces_previous_template() {
        let mut world = World::new();
        let first = world.spawn_empty().id();
        let second = world.spawn_empty().id();
        let mut store = TemplateStore::new();
        store.insert("bullet", first);
        assert_eq!(store.get("bullet"), Some(first));
        store.insert("bullet", second);
        assert_eq!(store.get("bullet"), Some(second));
        assert_eq!(store.get("rocket"), None);
    }
}
