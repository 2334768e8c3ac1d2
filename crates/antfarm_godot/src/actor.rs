//! Actor: Godot node поверх core state machines
//!
//! Architecture:
//! - Actor = child Node внутри CharacterBody2D (composition, не наследование)
//! - Health / Locomotion / Facing / Biomass из antfarm_simulation
//! - body (parent) владеет коллизиями и transform, см. `CharacterBodyHost`
//! - сигналы died / damaged для GDScript
//!
//! Scene:
//! ```text
//! CharacterBody2D
//!   ├── CollisionShape2D
//!   ├── Sprite2D
//!   └── Actor
//! ```

use antfarm_simulation::{
    log_error, log_info, log_warning, set_logger_if_needed, ActorConfig, ActorError, ActorEvent,
    Biomass, DamageOutcome, Facing, Health, Locomotion, MAX_HITPOINTS,
};
use godot::classes::{CharacterBody2D, INode, Node};
use godot::prelude::*;

use crate::body::{to_vec2, to_vector2, CharacterBodyHost};
use crate::logger::GodotLogger;

/// Горизонтальное отражение body при смене facing
const MIRROR_X: Vector2 = Vector2::new(-1.0, 1.0);

/// Scene собрана лицом влево (Facing::default), отражение нужно только для Right
fn initial_mirror(facing: Facing) -> Option<Vector2> {
    facing.is_right().then_some(MIRROR_X)
}

#[derive(GodotClass)]
#[class(base=Node, rename=Actor)]
pub struct GodotActor {
    base: Base<Node>,

    /// Spawn-значения из инспектора (применяются в ready)
    #[export(range = (1.0, 100000.0))]
    spawn_hitpoints: i32,
    #[export]
    spawn_biomass: i32,
    #[export]
    spawn_jump_speed: f32,
    #[export]
    spawn_run_speed: f32,
    #[export]
    spawn_falling: bool,

    health: Health,
    locomotion: Locomotion,
    facing: Facing,
    biomass: Biomass,

    /// Parent CharacterBody2D (None если сцена собрана неправильно)
    body: Option<Gd<CharacterBody2D>>,
}

#[godot_api]
impl INode for GodotActor {
    fn init(base: Base<Node>) -> Self {
        let defaults = ActorConfig::default();
        Self {
            base,
            spawn_hitpoints: defaults.max_hitpoints,
            spawn_biomass: defaults.biomass,
            spawn_jump_speed: defaults.jump_speed,
            spawn_run_speed: defaults.run_speed,
            spawn_falling: defaults.falling,
            health: Health::default(),
            locomotion: Locomotion::default(),
            facing: Facing::default(),
            biomass: Biomass::default(),
            body: None,
        }
    }

    fn ready(&mut self) {
        set_logger_if_needed(Box::new(GodotLogger));

        let config = self.spawn_config();
        match config.components() {
            Ok((_, health, biomass, locomotion)) => {
                self.health = health;
                self.biomass = biomass;
                self.locomotion = locomotion;
            }
            Err(e) => log_error(&format!("Actor: invalid exported config {:?}: {}", config, e)),
        }

        let Some(parent) = self.base().get_parent() else {
            log_error("Actor: no parent node (expected CharacterBody2D)");
            return;
        };

        match parent.try_cast::<CharacterBody2D>() {
            Ok(mut body) => {
                // face_right() до ready() поменял только флаг: догоняем scale
                if let Some(scale) = initial_mirror(self.facing) {
                    body.apply_scale(scale);
                }
                self.body = Some(body);
            }
            Err(parent) => log_error(&format!(
                "Actor: parent {} is not a CharacterBody2D, physics disabled",
                parent.get_name()
            )),
        }
    }

    fn physics_process(&mut self, delta: f64) {
        if !self.health.is_alive() {
            return;
        }
        let Some(mut body) = self.body.clone() else {
            return;
        };

        let mut host = CharacterBodyHost::new(&mut body, delta as f32);
        let report = self.locomotion.physics_tick(&mut host);

        if report.jumped {
            log_info(&format!(
                "Actor {}: jump (velocity {:?})",
                self.base().get_name(),
                self.locomotion.linear_velocity()
            ));
        }
    }
}

#[godot_api]
impl GodotActor {
    /// Актор погиб (ровно один раз за lifetime)
    #[signal]
    fn died();

    /// Актор получил урон (после уменьшения hitpoints)
    #[signal]
    fn damaged(points: i64, position: Vector2);

    // ===== Health =====

    #[func]
    fn get_hitpoints(&self) -> i32 {
        self.health.max() as i32
    }

    /// Новая ёмкость + полное лечение (мёртвый актор не воскресает)
    #[func]
    fn set_hitpoints(&mut self, hitpoints: i32) {
        match self.health.configure_capacity(hitpoints) {
            Ok(true) => self.spawn_hitpoints = hitpoints,
            Ok(false) => log_warning(&format!(
                "Actor {}: set_hitpoints({}) ignored, actor is dead",
                self.base().get_name(),
                hitpoints
            )),
            Err(e) => self.reject("set_hitpoints", e),
        }
    }

    #[func]
    fn get_current_hitpoints(&self) -> i32 {
        self.health.current() as i32
    }

    #[func]
    fn get_max_hitpoints_limit(&self) -> i32 {
        MAX_HITPOINTS as i32
    }

    #[func]
    fn is_alive(&self) -> bool {
        self.health.is_alive()
    }

    #[func]
    fn damage(&mut self, points: i32, position: Vector2) {
        match self.health.damage(points, to_vec2(position)) {
            Ok(outcome) => self.publish_damage(outcome),
            Err(e) => self.reject("damage", e),
        }
    }

    #[func]
    fn heal(&mut self, points: i32) {
        if let Err(e) = self.health.heal(points) {
            self.reject("heal", e);
        }
    }

    #[func]
    fn die(&mut self) {
        if self.health.die().is_some() {
            self.publish(ActorEvent::Died);
            self.destroy_actor();
        }
    }

    // ===== Facing =====

    #[func]
    fn face_left(&mut self) {
        if self.facing.face_left() {
            self.mirror_body();
        }
    }

    #[func]
    fn face_right(&mut self) {
        if self.facing.face_right() {
            self.mirror_body();
        }
    }

    #[func]
    fn is_facing_right(&self) -> bool {
        self.facing.is_right()
    }

    // ===== Locomotion =====

    #[func]
    fn stop(&mut self) {
        self.locomotion.stop();
    }

    #[func]
    fn linear_velocity(&self) -> Vector2 {
        to_vector2(self.locomotion.linear_velocity())
    }

    #[func]
    fn apply_impulse(&mut self, impulse: Vector2) {
        if let Err(e) = self.locomotion.apply_impulse(to_vec2(impulse)) {
            self.reject("apply_impulse", e);
        }
    }

    #[func]
    fn set_falling(&mut self, falling: bool) {
        self.locomotion.set_falling(falling);
        self.spawn_falling = falling;
    }

    #[func]
    fn is_falling(&self) -> bool {
        self.locomotion.is_falling()
    }

    #[func]
    fn jump(&mut self) {
        self.locomotion.jump();
    }

    /// -1 влево, 0 стоп, 1 вправо
    #[func]
    fn set_movement(&mut self, direction: i32) {
        if let Err(e) = self.locomotion.set_movement(direction) {
            self.reject("set_movement", e);
        }
    }

    #[func]
    fn get_movement(&self) -> i32 {
        self.locomotion.movement().as_i32()
    }

    #[func]
    fn get_jump_speed(&self) -> f32 {
        self.locomotion.jump_speed()
    }

    #[func]
    fn set_jump_speed(&mut self, speed: f32) {
        match self.locomotion.set_jump_speed(speed) {
            Ok(()) => self.spawn_jump_speed = speed,
            Err(e) => self.reject("set_jump_speed", e),
        }
    }

    #[func]
    fn get_run_speed(&self) -> f32 {
        self.locomotion.run_speed()
    }

    #[func]
    fn set_run_speed(&mut self, speed: f32) {
        match self.locomotion.set_run_speed(speed) {
            Ok(()) => self.spawn_run_speed = speed,
            Err(e) => self.reject("set_run_speed", e),
        }
    }

    // ===== Biomass =====

    #[func]
    fn get_biomass(&self) -> i32 {
        self.biomass.get() as i32
    }

    #[func]
    fn set_biomass(&mut self, biomass: i32) {
        match self.biomass.set(biomass) {
            Ok(()) => self.spawn_biomass = biomass,
            Err(e) => self.reject("set_biomass", e),
        }
    }
}

impl GodotActor {
    /// Exported-поля как ActorConfig. Runtime-сеттеры держат их в sync,
    /// чтобы ready() не откатил значения, выставленные до add_child.
    fn spawn_config(&self) -> ActorConfig {
        ActorConfig {
            max_hitpoints: self.spawn_hitpoints,
            biomass: self.spawn_biomass,
            jump_speed: self.spawn_jump_speed,
            run_speed: self.spawn_run_speed,
            falling: self.spawn_falling,
        }
    }

    fn publish_damage(&mut self, outcome: DamageOutcome) {
        for event in outcome.events() {
            self.publish(event);
        }
        if outcome.death.is_some() {
            self.destroy_actor();
        }
    }

    fn publish(&mut self, event: ActorEvent) {
        let signal = event.signal().name();
        match event {
            ActorEvent::Damaged { points, position } => {
                let args = [
                    i64::from(points).to_variant(),
                    to_vector2(position).to_variant(),
                ];
                self.base_mut().emit_signal(signal, &args);
            }
            ActorEvent::Died => {
                self.base_mut().emit_signal(signal, &[]);
            }
        }
    }

    /// Удаляет body целиком (Actor уходит вместе с ним)
    fn destroy_actor(&mut self) {
        log_info(&format!("Actor {}: destroyed", self.base().get_name()));

        match self.body.take() {
            Some(mut body) => body.queue_free(),
            None => self.base_mut().queue_free(),
        }
    }

    /// До ready() body ещё нет, отражение применит ready()
    fn mirror_body(&mut self) {
        if let Some(body) = self.body.as_mut() {
            body.apply_scale(MIRROR_X);
        }
    }

    fn reject(&self, operation: &str, error: ActorError) {
        log_error(&format!(
            "Actor {}: {} rejected: {}",
            self.base().get_name(),
            operation,
            error
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_mirror_follows_facing() {
        assert_eq!(initial_mirror(Facing::default()), None);

        let mut facing = Facing::default();
        assert!(facing.face_right());
        assert_eq!(initial_mirror(facing), Some(MIRROR_X));

        // Right → Left до ready: итог совпадает со сценой
        assert!(facing.face_left());
        assert_eq!(initial_mirror(facing), None);
    }
}
