//! ECS Components для акторов
//!
//! - actor: Actor (required components), Biomass, Facing
//!
//! Health и Locomotion живут в своих доменах (`health`, `locomotion`).

pub mod actor;

pub use actor::*;
