//! ECS components for entities.
//!
//! This module groups all component types that can be attached to entities in
//! the simulation. Components define data such as position, collision,
//! pooling, projectile flight, and weapon state.
//!
//! Submodules overview:
//! - [`boxcollider`] – axis-aligned 3D box collider with a swept segment test
//! - [`collisionlayer`] – layer bits and the named layer table
//! - [`easing`] – easing curves used to shape recoil
//! - [`health`] – hit points for damageable targets
//! - [`mapposition`] – world-space position of an entity
//! - [`pooled`] – pool membership tag
//! - [`projectile`] – projectile flight state and lifecycle
//! - [`recoil`] – recoil curve, tasks, and restart policy
//! - [`rotation`] – world-space orientation
//! - [`weapon`] – weapon settings, fire gating, and spread

pub mod boxcollider;
pub mod collisionlayer;
pub mod easing;
pub mod health;
pub mod mapposition;
pub mod pooled;
pub mod projectile;
pub mod recoil;
pub mod rotation;
pub mod weapon;
