use bevy_ecs::prelude::Component;

/// Marks an entity as a member of an [`ObjectPool`] collection.
///
/// Whether the member is lent out is tracked by the pool; an inactive member
/// additionally carries the ECS `Disabled` marker.
///
/// [`ObjectPool`]: crate::resources::objectpool::ObjectPool
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct Pooled {
    pub tag: String,
}

impl Pooled {
    pub fn new(tag: impl Into<String>) -> Self {
        Self { tag: tag.into() }
    }
}
