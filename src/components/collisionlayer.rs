//! Bit-flag collision layers.
//!
//! Every collidable entity carries a [`CollisionLayer`] naming the layers it
//! belongs to. Swept queries pass a mask and only consider entities whose
//! layer bits intersect it.

use bevy_ecs::prelude::Component;

/// Standard layer bits.
pub struct Layers;

impl Layers {
    pub const NONE: u32 = 0;
    pub const ALL: u32 = 0xFFFF_FFFF;
    pub const PLAYER: u32 = 1 << 0;
    pub const ENEMY: u32 = 1 << 1;
    pub const PROJECTILE: u32 = 1 << 2;
    pub const ENVIRONMENT: u32 = 1 << 3;
    pub const TRIGGER: u32 = 1 << 4;
    pub const DEBRIS: u32 = 1 << 5;

    /// Look up a layer by its configuration name.
    pub fn by_name(name: &str) -> Option<u32> {
        match name.trim().to_ascii_lowercase().as_str() {
            "none" => Some(Self::NONE),
            "all" => Some(Self::ALL),
            "player" => Some(Self::PLAYER),
            "enemy" => Some(Self::ENEMY),
            "projectile" => Some(Self::PROJECTILE),
            "environment" => Some(Self::ENVIRONMENT),
            "trigger" => Some(Self::TRIGGER),
            "debris" => Some(Self::DEBRIS),
            _ => None,
        }
    }
}

/// Layers an entity belongs to.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionLayer {
    pub bits: u32,
}

impl CollisionLayer {
    pub fn new(bits: u32) -> Self {
        Self { bits }
    }

    /// True if this layer is selected by `mask`.
    pub fn matches(&self, mask: u32) -> bool {
        self.bits & mask != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_intersecting_bits() {
        let enemy = CollisionLayer::new(Layers::ENEMY);
        assert!(enemy.matches(Layers::ENEMY | Layers::ENVIRONMENT));
        assert!(!enemy.matches(Layers::ENVIRONMENT));
        assert!(!enemy.matches(Layers::NONE));
    }

    #[test]
    fn names_are_case_insensitive() {
        assert_eq!(Layers::by_name(" Enemy "), Some(Layers::ENEMY));
        assert_eq!(Layers::by_name("all"), Some(Layers::ALL));
        assert_eq!(Layers::by_name("walls"), None);
    }
}
