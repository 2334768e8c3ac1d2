//! Antfarm Simulation Core
//!
//! Per-actor gameplay controller для 2D платформера:
//! - health: hitpoints, damage/heal/death, сигналы died/damaged
//! - locomotion: gravity, jump, run, facing → velocity → host motion step
//!
//! HYBRID ARCHITECTURE:
//! - Core = чистые state machines (`Health`, `Locomotion`), без движка
//! - ECS = Bevy plugins поверх core (headless симуляция, тесты)
//! - Godot = host (CharacterBody2D: коллизии, is_on_floor, gravity), см. antfarm_godot

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Duration;

// Публичные модули
pub mod components;
pub mod config;
pub mod demo;
pub mod error;
pub mod events;
pub mod health;
pub mod locomotion;
pub mod logger;

// Re-export для удобства (Godot crate и тесты)
pub use components::{Actor, Biomass, Facing};
pub use config::{ActorConfig, SimulationConfig};
pub use error::{ActorError, ConfigError, SpeedKind};
pub use events::{ActorEvent, ActorSignal, ActorSignalled, RequestRejected};
pub use health::{
    ActorDamaged, ActorDied, DamageOutcome, Dead, Death, Health, HealthPlugin, HealthRequest,
    LifeState, MAX_HITPOINTS,
};
pub use locomotion::{
    FacingChanged, Floor, GravityField, GravityZone, KinematicBody, KinematicController,
    Locomotion, LocomotionPlugin, LocomotionRequest, RunDirection, TickReport, FLOOR_NORMAL,
};
pub use logger::{
    init_logger, log, log_error, log_info, log_warning, set_log_level, set_logger,
    set_logger_if_needed, LogLevel, LogPrinter,
};

/// Фазы actor-тика в FixedUpdate (строго по порядку)
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActorSet {
    /// damage/heal/die/configure
    Health,
    /// intents + integrator (мёртвые пропускаются)
    Locomotion,
    /// destroy_actor для мёртвых
    Cleanup,
}

/// Главный plugin симуляции (объединяет все подсистемы)
///
/// Берёт `SimulationConfig` из World, если он уже вставлен, иначе default.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        let config = app
            .world()
            .get_resource::<SimulationConfig>()
            .copied()
            .unwrap_or_default();

        app.insert_resource(config)
            .insert_resource(Time::<Fixed>::from_hz(config.tick_rate))
            .insert_resource(GravityField::uniform(Vec2::from(config.gravity)))
            .insert_resource(Floor {
                height: config.floor_height,
            })
            .configure_sets(
                FixedUpdate,
                (ActorSet::Health, ActorSet::Locomotion, ActorSet::Cleanup).chain(),
            )
            .add_plugins((HealthPlugin, LocomotionPlugin));
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции (SimulationPlugin уже добавлен)
pub fn create_headless_app(seed: u64) -> App {
    create_headless_app_with(SimulationConfig {
        seed,
        ..SimulationConfig::default()
    })
}

pub fn create_headless_app_with(config: SimulationConfig) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(config)
        .insert_resource(DeterministicRng::new(config.seed))
        .add_plugins(SimulationPlugin);

    app
}

/// Один детерминированный fixed tick, независимо от wall clock
///
/// Сдвигает Time<Fixed> ровно на timestep и прогоняет FixedUpdate.
pub fn advance_fixed_tick(app: &mut App) {
    let world = app.world_mut();
    let timestep: Duration = world.resource::<Time<Fixed>>().timestep();
    world.resource_mut::<Time<Fixed>>().advance_by(timestep);
    world.run_schedule(FixedUpdate);
}

/// Spawn helper: актор из конфигурации в точке `position`
pub fn spawn_actor(
    commands: &mut Commands,
    position: Vec2,
    config: &ActorConfig,
) -> Result<Entity, ActorError> {
    let components = config.components()?;

    Ok(commands
        .spawn((components, Transform::from_translation(position.extend(0.0))))
        .id())
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    // Сериализуем в байты через Debug (простейший способ)
    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
