//! Сигналы актора для внешних наблюдателей (UI, audio, loot, AI)
//!
//! Имена сигналов статические: `ActorSignal::name()` используется и в Godot
//! (`#[signal]` + `emit_signal`), и в логах ECS.

use bevy::prelude::*;

use crate::error::ActorError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActorSignal {
    Died,
    Damaged,
}

impl ActorSignal {
    pub const ALL: [ActorSignal; 2] = [ActorSignal::Died, ActorSignal::Damaged];

    pub const fn name(self) -> &'static str {
        match self {
            ActorSignal::Died => "died",
            ActorSignal::Damaged => "damaged",
        }
    }
}

/// Payload сигнала (fire-and-forget, на состояние актора не влияет)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActorEvent {
    Died,
    Damaged { points: u32, position: Vec2 },
}

impl ActorEvent {
    pub fn signal(&self) -> ActorSignal {
        match self {
            ActorEvent::Died => ActorSignal::Died,
            ActorEvent::Damaged { .. } => ActorSignal::Damaged,
        }
    }
}

/// Event: единый упорядоченный поток сигналов актора
///
/// `ActorDamaged` и `ActorDied` живут в разных очередях, и порядок между ними
/// не виден. Здесь damaged всегда раньше died того же запроса.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ActorSignalled {
    pub entity: Entity,
    pub event: ActorEvent,
}

/// Event: запрос отклонён (invalid argument), актор не изменён
#[derive(Event, Debug, Clone, PartialEq)]
pub struct RequestRejected {
    pub entity: Entity,
    pub error: ActorError,
}
