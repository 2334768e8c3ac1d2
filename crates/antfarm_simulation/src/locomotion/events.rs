//! Locomotion events

use bevy::prelude::*;

use crate::components::Facing;

/// Intent от gameplay/input/AI для интегратора
///
/// Применяются в начале тика, в порядке поступления.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum LocomotionRequest {
    SetMovement { entity: Entity, direction: i32 },
    Jump { entity: Entity },
    ApplyImpulse { entity: Entity, impulse: Vec2 },
    Stop { entity: Entity },
    FaceLeft { entity: Entity },
    FaceRight { entity: Entity },
}

impl LocomotionRequest {
    pub fn entity(&self) -> Entity {
        match *self {
            LocomotionRequest::SetMovement { entity, .. }
            | LocomotionRequest::Jump { entity }
            | LocomotionRequest::ApplyImpulse { entity, .. }
            | LocomotionRequest::Stop { entity }
            | LocomotionRequest::FaceLeft { entity }
            | LocomotionRequest::FaceRight { entity } => entity,
        }
    }
}

/// Event: актор развернулся (visual mirroring на стороне рендера)
///
/// Только при реальной смене направления.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct FacingChanged {
    pub entity: Entity,
    pub facing: Facing,
}
