//! Simulation systems.
//!
//! Submodules overview
//! - [`pool`] – create configured pools, world-level spawn/release helpers
//! - [`projectile`] – move, expire, and collide projectiles; rearm on spawn
//! - [`recoil`] – step recoil tasks
//! - [`time`] – update simulation time and delta
//! - [`weapon`] – fire gating, spread recovery, recoil recovery

pub mod pool;
pub mod projectile;
pub mod recoil;
pub mod time;
pub mod weapon;
