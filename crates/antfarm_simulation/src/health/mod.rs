//! Health domain: hitpoints, damage/heal/death, сигналы died/damaged
//!
//! Содержит:
//! - state: чистая state machine (Health, Death, DamageOutcome)
//! - events: HealthRequest (вход), ActorDamaged/ActorDied (выход), маркер Dead
//! - systems: применение запросов и despawn мёртвых

pub mod events;
pub mod state;
pub mod systems;


pub use events::*;
pub use state::*;
pub use systems::*;

use bevy::prelude::*;

use crate::events::{ActorSignalled, RequestRejected};
use crate::ActorSet;

/// Health Plugin
///
/// Регистрирует события и системы в FixedUpdate:
/// - ActorSet::Health: apply_health_requests
/// - ActorSet::Cleanup: despawn_dead_actors (destroy_actor)
pub struct HealthPlugin;

impl Plugin for HealthPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<HealthRequest>()
            .add_event::<ActorDamaged>()
            .add_event::<ActorDied>()
            .add_event::<ActorSignalled>()
            .add_event::<RequestRejected>();

        app.add_systems(
            FixedUpdate,
            (
                apply_health_requests.in_set(ActorSet::Health),
                despawn_dead_actors.in_set(ActorSet::Cleanup),
            ),
        );
    }
}
