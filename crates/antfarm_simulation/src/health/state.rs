//! Health state machine: Alive → Dead (terminal)
//!
//! Чистая логика без ECS: её вызывают и Bevy система (`apply_health_requests`),
//! и Godot node (`antfarm_godot::Actor`). Событий не шлёт сама, а возвращает
//! результат перехода; caller обязан опубликовать события в порядке `events()`.

use bevy::prelude::*;

use crate::events::ActorEvent;
use crate::error::ActorError;

/// Верхняя граница capacity (range hint редактора: 1..100000)
pub const MAX_HITPOINTS: u32 = 100_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum LifeState {
    Alive,
    Dead,
}

/// Здоровье актора
///
/// Инвариант: 0 ≤ current ≤ max, `died` выставляется ровно один раз.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct Health {
    max: u32,
    current: u32,
    /// Latch: died уже опубликован (terminal state)
    died: bool,
}

impl Default for Health {
    fn default() -> Self {
        Self {
            max: 1,
            current: 1,
            died: false,
        }
    }
}

/// Маркер перехода Alive → Dead
///
/// Получатель должен опубликовать `died` и уничтожить актора (destroy_actor).
#[must_use = "death must be published and the actor destroyed"]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Death;

/// Результат `Health::damage`
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageOutcome {
    pub points: u32,
    pub position: Vec2,
    pub remaining: u32,
    pub death: Option<Death>,
}

impl DamageOutcome {
    /// События в порядке публикации: damaged всегда, затем died (если был переход)
    pub fn events(&self) -> impl Iterator<Item = ActorEvent> {
        let damaged = ActorEvent::Damaged {
            points: self.points,
            position: self.position,
        };
        std::iter::once(damaged).chain(self.death.map(|_| ActorEvent::Died))
    }
}

fn non_negative(operation: &'static str, points: i32) -> Result<u32, ActorError> {
    u32::try_from(points).map_err(|_| ActorError::NegativePoints { operation, points })
}

/// Проверка capacity: 1..=MAX_HITPOINTS
pub fn validate_capacity(hitpoints: i32) -> Result<u32, ActorError> {
    match u32::try_from(hitpoints) {
        Ok(value) if (1..=MAX_HITPOINTS).contains(&value) => Ok(value),
        _ => Err(ActorError::InvalidCapacity {
            hitpoints,
            max: MAX_HITPOINTS,
        }),
    }
}

impl Health {
    pub fn new(max: i32) -> Result<Self, ActorError> {
        let max = validate_capacity(max)?;
        Ok(Self {
            max,
            current: max,
            died: false,
        })
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn state(&self) -> LifeState {
        if self.died {
            LifeState::Dead
        } else {
            LifeState::Alive
        }
    }

    pub fn is_alive(&self) -> bool {
        self.state() == LifeState::Alive
    }

    /// Задать capacity и полностью вылечить (initialize + full heal)
    ///
    /// Dead актор остаётся мёртвым: вызов не воскрешает и ничего не меняет.
    /// Возвращает `true`, если capacity применена.
    pub fn configure_capacity(&mut self, hitpoints: i32) -> Result<bool, ActorError> {
        let hitpoints = validate_capacity(hitpoints)?;

        if self.died {
            return Ok(false);
        }

        self.max = hitpoints;
        self.current = hitpoints;
        Ok(true)
    }

    /// Урон: `current = max(0, current - points)`
    ///
    /// damaged публикуется безусловно (даже для points == 0 и для мёртвого),
    /// death только на переходе current > 0 → 0.
    pub fn damage(&mut self, points: i32, position: Vec2) -> Result<DamageOutcome, ActorError> {
        let points = non_negative("damage", points)?;

        let before = self.current;
        self.current = self.current.saturating_sub(points);

        let death = if before > 0 && self.current == 0 {
            self.die()
        } else {
            None
        };

        Ok(DamageOutcome {
            points,
            position,
            remaining: self.current,
            death,
        })
    }

    /// Лечение с clamp до max. Мёртвого не воскрешает: меняется только число.
    pub fn heal(&mut self, points: i32) -> Result<u32, ActorError> {
        let points = non_negative("heal", points)?;
        self.current = self.current.saturating_add(points).min(self.max);
        Ok(self.current)
    }

    /// Вход в Dead. `Some(Death)` только при первом вызове за жизнь актора.
    pub fn die(&mut self) -> Option<Death> {
        self.current = 0;

        if self.died {
            return None;
        }

        self.died = true;
        Some(Death)
    }
}
