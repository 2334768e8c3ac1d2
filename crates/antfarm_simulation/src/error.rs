//! Ошибки контракта (caller errors)
//!
//! Clamp'ы hitpoints/velocity: это policy, не ошибки. Сюда попадают только
//! входные данные, которые нарушают контракт операции: их отклоняем ДО мутации.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ActorError {
    #[error("{operation}: points must be >= 0, got {points}")]
    NegativePoints { operation: &'static str, points: i32 },

    #[error("hitpoint capacity must be in 1..={max}, got {hitpoints}")]
    InvalidCapacity { hitpoints: i32, max: u32 },

    #[error("horizontal movement must be -1, 0 or 1, got {0}")]
    InvalidDirection(i32),

    #[error("{kind} speed must be finite and >= 0, got {value}")]
    InvalidSpeed { kind: SpeedKind, value: f32 },

    #[error("impulse must be finite, got ({x}, {y})")]
    NonFiniteImpulse { x: f32, y: f32 },

    #[error("biomass must be >= 0, got {0}")]
    NegativeBiomass(i32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeedKind {
    Jump,
    Run,
}

impl std::fmt::Display for SpeedKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpeedKind::Jump => write!(f, "jump"),
            SpeedKind::Run => write!(f, "run"),
        }
    }
}

/// Ошибки загрузки `ActorConfig`
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse actor config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid actor config: {0}")]
    Invalid(#[from] ActorError),
}
