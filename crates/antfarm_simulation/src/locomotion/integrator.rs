//! Locomotion integrator: jump → gravity → run → motion resolution
//!
//! Архитектура:
//! - Velocity интегрируем сами, коллизии целиком у host (`KinematicBody`)
//! - Host: Godot CharacterBody2D (GDExtension) или `HeadlessBody` (тесты, headless)
//! - Координаты экранные: +Y вниз, прыжок = (0, -jump_speed)

use bevy::prelude::*;

use crate::error::{ActorError, SpeedKind};

/// Floor normal hint для motion resolution (вверх в inverted-Y)
pub const FLOOR_NORMAL: Vec2 = Vec2::new(0.0, -1.0);

/// Возможности host physics body, нужные интегратору
///
/// Композиция вместо наследования: актор не знает, чей это body.
pub trait KinematicBody {
    /// Контакт с полом по результату последнего motion step
    fn is_grounded(&self) -> bool;

    /// Гравитация в текущей точке (может меняться по зонам и по тикам)
    fn current_gravity(&self) -> Vec2;

    /// Collision-aware движение, возвращает реально достигнутую velocity
    fn resolve_motion(&mut self, velocity: Vec2, floor_normal: Vec2) -> Vec2;

    fn tick_delta_seconds(&self) -> f32;
}

/// Направление бега: -1 / 0 / 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect)]
pub enum RunDirection {
    Left,
    #[default]
    Idle,
    Right,
}

impl RunDirection {
    pub fn as_i32(self) -> i32 {
        match self {
            RunDirection::Left => -1,
            RunDirection::Idle => 0,
            RunDirection::Right => 1,
        }
    }

    pub fn sign(self) -> f32 {
        self.as_i32() as f32
    }
}

impl TryFrom<i32> for RunDirection {
    type Error = ActorError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(RunDirection::Left),
            0 => Ok(RunDirection::Idle),
            1 => Ok(RunDirection::Right),
            other => Err(ActorError::InvalidDirection(other)),
        }
    }
}

pub(crate) fn validate_speed(kind: SpeedKind, value: f32) -> Result<f32, ActorError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(ActorError::InvalidSpeed { kind, value })
    }
}

/// Что произошло за тик (для логов и тестов)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TickReport {
    pub grounded: bool,
    pub jumped: bool,
    /// Был ли вызван host motion step
    pub moved: bool,
}

/// Движение актора
///
/// Velocity принадлежит только интегратору: impulses, gravity, jump, run,
/// и каждый тик перезаписывается результатом host motion step.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Locomotion {
    velocity: Vec2,
    falling: bool,
    /// One-shot trigger, сбрасывается каждый тик
    jump_requested: bool,
    horizontal_move: RunDirection,
    jump_speed: f32,
    run_speed: f32,
}

impl Default for Locomotion {
    fn default() -> Self {
        Self {
            velocity: Vec2::ZERO,
            falling: true,
            jump_requested: false,
            horizontal_move: RunDirection::Idle,
            jump_speed: 300.0,
            run_speed: 75.0,
        }
    }
}

impl Locomotion {
    pub fn new(jump_speed: f32, run_speed: f32, falling: bool) -> Result<Self, ActorError> {
        Ok(Self {
            falling,
            jump_speed: validate_speed(SpeedKind::Jump, jump_speed)?,
            run_speed: validate_speed(SpeedKind::Run, run_speed)?,
            ..Self::default()
        })
    }

    pub fn linear_velocity(&self) -> Vec2 {
        self.velocity
    }

    /// NaN/inf отклоняем: иначе velocity залипает и motion step больше не вызывается
    pub fn apply_impulse(&mut self, impulse: Vec2) -> Result<(), ActorError> {
        if !impulse.is_finite() {
            return Err(ActorError::NonFiniteImpulse {
                x: impulse.x,
                y: impulse.y,
            });
        }
        self.velocity += impulse;
        Ok(())
    }

    pub fn stop(&mut self) {
        self.velocity = Vec2::ZERO;
    }

    /// Повторные вызовы до тика схлопываются в одну попытку
    pub fn jump(&mut self) {
        self.jump_requested = true;
    }

    pub fn is_jump_requested(&self) -> bool {
        self.jump_requested
    }

    pub fn set_movement(&mut self, direction: i32) -> Result<(), ActorError> {
        self.horizontal_move = RunDirection::try_from(direction)?;
        Ok(())
    }

    pub fn movement(&self) -> RunDirection {
        self.horizontal_move
    }

    pub fn set_falling(&mut self, falling: bool) {
        self.falling = falling;
    }

    pub fn is_falling(&self) -> bool {
        self.falling
    }

    pub fn jump_speed(&self) -> f32 {
        self.jump_speed
    }

    pub fn set_jump_speed(&mut self, speed: f32) -> Result<(), ActorError> {
        self.jump_speed = validate_speed(SpeedKind::Jump, speed)?;
        Ok(())
    }

    pub fn run_speed(&self) -> f32 {
        self.run_speed
    }

    pub fn set_run_speed(&mut self, speed: f32) -> Result<(), ActorError> {
        self.run_speed = validate_speed(SpeedKind::Run, speed)?;
        Ok(())
    }

    /// Один physics tick. Порядок шагов фиксирован:
    ///
    /// 1. Jump: только на полу; запрос сбрасывается в любом случае (не буферизуется)
    /// 2. Gravity: `gravity * dt`, gravity запрашивается у host каждый тик
    /// 3. Run: на полу горизонталь абсолютная, в воздухе сохраняется
    /// 4. Motion: ненулевая velocity уходит в host, результат сохраняем
    ///
    /// Floor query делаем один раз: между шагами 1 и 3 body не двигается.
    pub fn physics_tick<B: KinematicBody + ?Sized>(&mut self, body: &mut B) -> TickReport {
        let grounded = body.is_grounded();
        let mut report = TickReport {
            grounded,
            ..TickReport::default()
        };

        if std::mem::take(&mut self.jump_requested) && grounded {
            self.velocity += Vec2::new(0.0, -self.jump_speed);
            report.jumped = true;
        }

        if self.falling {
            self.velocity += body.current_gravity() * body.tick_delta_seconds();
        }

        if grounded {
            self.velocity.x = self.run_speed * self.horizontal_move.sign();
        }

        if self.velocity.length_squared() > 0.0 {
            self.velocity = body.resolve_motion(self.velocity, FLOOR_NORMAL);
            report.moved = true;
        }

        report
    }
}
