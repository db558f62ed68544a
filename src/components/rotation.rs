use bevy_ecs::prelude::Component;
use nalgebra::{UnitQuaternion, Vector3};

/// World-space orientation of an entity.
///
/// Local forward is `+Z`, local up is `+Y`.
#[derive(Component, Clone, Debug, Copy, PartialEq)]
pub struct Rotation {
    pub quat: UnitQuaternion<f32>,
}

impl Default for Rotation {
    fn default() -> Self {
        Self {
            quat: UnitQuaternion::identity(),
        }
    }
}

impl Rotation {
    pub fn new(quat: UnitQuaternion<f32>) -> Self {
        Self { quat }
    }

    /// Unit vector this entity faces.
    pub fn forward(&self) -> Vector3<f32> {
        self.quat * Vector3::z()
    }
}

/// Compose a yaw/pitch rotation given in degrees.
pub fn yaw_pitch(yaw_degrees: f32, pitch_degrees: f32) -> UnitQuaternion<f32> {
    let yaw = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), yaw_degrees.to_radians());
    let pitch = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), pitch_degrees.to_radians());
    yaw * pitch
}
