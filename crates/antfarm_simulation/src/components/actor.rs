//! Базовые компоненты акторов: Actor, Biomass, Facing

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::ActorError;
use crate::health::Health;
use crate::locomotion::{KinematicController, Locomotion};

/// Актор (муравей, враг, игрок): базовый компонент для живых существ
///
/// Автоматически добавляет Health, Locomotion, Facing, Biomass и host-side
/// KinematicController через Required Components.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
#[require(Health, Locomotion, Facing, Biomass, KinematicController, Transform)]
pub struct Actor;

/// Ресурс актора. На health и движение не влияет (pure data).
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct Biomass(u32);

impl Biomass {
    pub fn new(value: i32) -> Result<Self, ActorError> {
        u32::try_from(value)
            .map(Self)
            .map_err(|_| ActorError::NegativeBiomass(value))
    }

    pub fn get(&self) -> u32 {
        self.0
    }

    pub fn set(&mut self, value: i32) -> Result<(), ActorError> {
        *self = Self::new(value)?;
        Ok(())
    }
}

/// Направление взгляда
///
/// Меняется только через face_left/face_right. Оба идемпотентны: `true` только
/// при реальной смене, и только тогда caller зеркалит спрайт.
#[derive(
    Component, Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize,
)]
#[reflect(Component)]
pub enum Facing {
    #[default]
    Left,
    Right,
}

impl Facing {
    pub fn face_left(&mut self) -> bool {
        self.turn(Facing::Left)
    }

    pub fn face_right(&mut self) -> bool {
        self.turn(Facing::Right)
    }

    fn turn(&mut self, facing: Facing) -> bool {
        if *self == facing {
            return false;
        }
        *self = facing;
        true
    }

    pub fn is_right(&self) -> bool {
        *self == Facing::Right
    }
}
