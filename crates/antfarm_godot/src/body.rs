//! CharacterBody2D → `KinematicBody` adapter
//!
//! Godot владеет коллизиями: is_on_floor(), get_gravity(), move_and_slide().
//! Интегратор видит только trait, без наследования от body.

use antfarm_simulation::KinematicBody;
use bevy::math::Vec2;
use godot::classes::CharacterBody2D;
use godot::prelude::*;

pub fn to_vec2(v: Vector2) -> Vec2 {
    Vec2::new(v.x, v.y)
}

pub fn to_vector2(v: Vec2) -> Vector2 {
    Vector2::new(v.x, v.y)
}

/// Host на один physics tick (delta из _physics_process)
pub struct CharacterBodyHost<'a> {
    body: &'a mut Gd<CharacterBody2D>,
    delta: f32,
}

impl<'a> CharacterBodyHost<'a> {
    pub fn new(body: &'a mut Gd<CharacterBody2D>, delta: f32) -> Self {
        Self { body, delta }
    }
}

impl KinematicBody for CharacterBodyHost<'_> {
    fn is_grounded(&self) -> bool {
        self.body.is_on_floor()
    }

    /// Гравитация с учётом Area2D override (gravity zones)
    fn current_gravity(&self) -> Vec2 {
        to_vec2(self.body.get_gravity())
    }

    fn resolve_motion(&mut self, velocity: Vec2, floor_normal: Vec2) -> Vec2 {
        self.body.set_velocity(to_vector2(velocity));
        self.body.set_up_direction(to_vector2(floor_normal));
        self.body.move_and_slide();
        to_vec2(self.body.get_velocity())
    }

    fn tick_delta_seconds(&self) -> f32 {
        self.delta
    }
}
