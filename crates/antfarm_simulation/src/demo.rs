//! Demo driver: seeded случайные intents для headless прогонов
//!
//! Используется бинарником и тестами детерминизма. Это не AI: walker только
//! пишет LocomotionRequest, вся логика движения остаётся в интеграторе.

use bevy::prelude::*;
use rand::Rng;

use crate::health::Dead;
use crate::locomotion::LocomotionRequest;
use crate::{ActorSet, DeterministicRng};

/// Актор, которым управляет RNG
#[derive(Component, Debug, Clone, Copy)]
pub struct RandomWalker {
    /// Тиков до следующей смены направления
    pub ticks_left: u32,
    /// Вероятность прыжка при смене направления
    pub jump_chance: f64,
}

impl Default for RandomWalker {
    fn default() -> Self {
        Self {
            ticks_left: 0,
            jump_chance: 0.25,
        }
    }
}

/// Система: смена направления / прыжок по таймеру
pub fn drive_random_walkers(
    mut rng: ResMut<DeterministicRng>,
    mut walkers: Query<(Entity, &mut RandomWalker), Without<Dead>>,
    mut requests: EventWriter<LocomotionRequest>,
) {
    for (entity, mut walker) in walkers.iter_mut() {
        if walker.ticks_left > 0 {
            walker.ticks_left -= 1;
            continue;
        }

        let direction: i32 = rng.rng.gen_range(-1..=1);
        requests.write(LocomotionRequest::SetMovement { entity, direction });

        match direction {
            -1 => {
                requests.write(LocomotionRequest::FaceLeft { entity });
            }
            1 => {
                requests.write(LocomotionRequest::FaceRight { entity });
            }
            _ => {}
        }

        if rng.rng.gen_bool(walker.jump_chance) {
            requests.write(LocomotionRequest::Jump { entity });
        }

        walker.ticks_left = rng.rng.gen_range(10..60);
    }
}

/// Demo Plugin: требует DeterministicRng (create_headless_app вставляет его)
pub struct DemoPlugin;

impl Plugin for DemoPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            drive_random_walkers
                .after(ActorSet::Health)
                .before(ActorSet::Locomotion),
        );
    }
}
