//! Event types and observers.
//!
//! Events decouple the pool, projectiles, and weapons from the code that
//! reacts to them.
//!
//! Submodules overview:
//! - [`pool`] – spawn hook triggered when a pool lends out a member
//! - [`projectile`] – projectile hit event and the stock damage observer
//! - [`weapon`] – hold/release signal and the per-shot effects message

pub mod pool;
pub mod projectile;
pub mod weapon;
