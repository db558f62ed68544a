//! Per-tick trigger input resource.
//!
//! Device polling happens outside the simulation; the driver feeds the raw
//! trigger level once per tick through [`InputState::set_trigger`], which
//! derives the press/release edges weapons gate on.
use bevy_ecs::prelude::*;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Boolean button state with edge flags.
pub struct BoolState {
    /// Whether the button is currently down this tick.
    pub active: bool,
    /// Whether the button went down this tick.
    pub just_pressed: bool,
    /// Whether the button went up this tick.
    pub just_released: bool,
}

impl BoolState {
    /// Feed this tick's level and recompute the edges.
    pub fn update(&mut self, down: bool) {
        self.just_pressed = down && !self.active;
        self.just_released = !down && self.active;
        self.active = down;
    }
}

/// Resource capturing the per-tick trigger state.
#[derive(Resource, Debug, Clone, Default)]
pub struct InputState {
    pub trigger: BoolState,
}

impl InputState {
    pub fn set_trigger(&mut self, down: bool) {
        self.trigger.update(down);
    }

    pub fn trigger_pressed(&self) -> bool {
        self.trigger.just_pressed
    }
}
