//! ECS resources shared across systems.
//!
//! Submodules overview:
//! - [`combatconfig`] – INI-backed weapon and pool configuration
//! - [`combatrng`] – seedable random source for spread
//! - [`input`] – per-tick trigger state with press/release edges
//! - [`objectpool`] – tagged pools of reusable entities
//! - [`templatestore`] – blueprint entities by key
//! - [`worldtime`] – simulation clock

pub mod combatconfig;
pub mod combatrng;
pub mod input;
pub mod objectpool;
pub mod templatestore;
pub mod worldtime;
