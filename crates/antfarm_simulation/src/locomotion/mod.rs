//! Locomotion domain: velocity, jump, run, gravity, facing intents
//!
//! Содержит:
//! - integrator: Locomotion + KinematicBody (host interface) + physics_tick
//! - host: headless host (GravityField, Floor, HeadlessBody)
//! - events: LocomotionRequest (вход), FacingChanged (выход)
//! - systems: применение запросов и тик интегратора

pub mod events;
pub mod host;
pub mod integrator;
pub mod systems;


pub use events::*;
pub use host::*;
pub use integrator::*;
pub use systems::*;

use bevy::prelude::*;

use crate::events::RequestRejected;
use crate::ActorSet;

/// Locomotion Plugin
///
/// Порядок в ActorSet::Locomotion:
/// 1. apply_locomotion_requests: intents (move/jump/impulse/stop/face)
/// 2. integrate_locomotion: jump → gravity → run → motion resolution
pub struct LocomotionPlugin;

impl Plugin for LocomotionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GravityField>()
            .init_resource::<Floor>()
            .add_event::<LocomotionRequest>()
            .add_event::<FacingChanged>()
            .add_event::<RequestRejected>();

        app.add_systems(
            FixedUpdate,
            (apply_locomotion_requests, integrate_locomotion)
                .chain()
                .in_set(ActorSet::Locomotion),
        );
    }
}
