use bevy_ecs::prelude::Component;
use nalgebra::Vector3;

/// World-space position of an entity.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct MapPosition {
    pub pos: Vector3<f32>,
}

impl MapPosition {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            pos: Vector3::new(x, y, z),
        }
    }

    pub fn from_vec(pos: Vector3<f32>) -> Self {
        Self { pos }
    }
}

impl Default for MapPosition {
    fn default() -> Self {
        Self {
            pos: Vector3::zeros(),
        }
    }
}
