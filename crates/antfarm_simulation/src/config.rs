//! Конфигурация: ActorConfig (per-actor) и SimulationConfig (мир)

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::components::{Actor, Biomass};
use crate::error::{ActorError, ConfigError};
use crate::health::Health;
use crate::locomotion::Locomotion;

/// Настраиваемые свойства актора (spawn-time или runtime)
///
/// Диапазоны: max_hitpoints 1..=100000, biomass >= 0, скорости >= 0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ActorConfig {
    pub max_hitpoints: i32,
    pub biomass: i32,
    pub jump_speed: f32,
    pub run_speed: f32,
    pub falling: bool,
}

impl Default for ActorConfig {
    fn default() -> Self {
        Self {
            max_hitpoints: 1,
            biomass: 0,
            jump_speed: 300.0,
            run_speed: 75.0,
            falling: true,
        }
    }
}

impl ActorConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ActorError> {
        self.components().map(|_| ())
    }

    /// Компоненты актора, собранные из конфигурации
    pub fn components(&self) -> Result<(Actor, Health, Biomass, Locomotion), ActorError> {
        Ok((
            Actor,
            Health::new(self.max_hitpoints)?,
            Biomass::new(self.biomass)?,
            Locomotion::new(self.jump_speed, self.run_speed, self.falling)?,
        ))
    }
}

/// Настройки headless симуляции
#[derive(Resource, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Частота FixedUpdate (Hz)
    pub tick_rate: f64,
    pub seed: u64,
    pub floor_height: f32,
    /// Гравитация по умолчанию (x, y), +Y вниз
    pub gravity: [f32; 2],
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_rate: 60.0,
            seed: 42,
            floor_height: 0.0,
            gravity: [0.0, 980.0],
        }
    }
}
