//! Health events (ECS)

use bevy::prelude::*;

/// Запрос к health state machine
///
/// Один enum, а не четыре event типа: порядок запросов внутри тика сохраняется,
/// и все операции одного актора выполняются последовательно одной системой.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum HealthRequest {
    Configure { target: Entity, hitpoints: i32 },
    Damage { target: Entity, points: i32, position: Vec2 },
    Heal { target: Entity, points: i32 },
    Kill { target: Entity },
}

impl HealthRequest {
    pub fn target(&self) -> Entity {
        match *self {
            HealthRequest::Configure { target, .. }
            | HealthRequest::Damage { target, .. }
            | HealthRequest::Heal { target, .. }
            | HealthRequest::Kill { target } => target,
        }
    }
}

/// Сигнал `damaged`: публикуется на каждый Damage запрос
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ActorDamaged {
    pub entity: Entity,
    pub points: u32,
    pub position: Vec2,
}

/// Сигнал `died`: ровно один раз за жизнь актора
///
/// Порядок относительно `ActorDamaged` из этой очереди не восстановить,
/// для него есть `ActorSignalled`.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActorDied {
    pub entity: Entity,
}

/// Компонент-маркер: актор мёртв и будет удалён (gameplay больше не обрабатывается)
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Dead;
