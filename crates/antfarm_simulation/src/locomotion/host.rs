//! Headless host для интегратора (без Godot)
//!
//! Stub физики: плоский пол на `Floor::height` + зоны гравитации.
//! Настоящие коллизии (стены, склоны, потолки) даёт Godot CharacterBody2D.

use bevy::prelude::*;

use super::integrator::KinematicBody;

/// Host-side состояние body: контакт с полом на текущий тик
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct KinematicController {
    pub grounded: bool,
}

/// Прямоугольная зона с собственной гравитацией
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GravityZone {
    pub area: Rect,
    pub gravity: Vec2,
}

/// Гравитация мира (px/s², +Y вниз)
///
/// Зоны проверяются по порядку, первая содержащая точку выигрывает.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct GravityField {
    pub default: Vec2,
    pub zones: Vec<GravityZone>,
}

impl Default for GravityField {
    fn default() -> Self {
        Self::uniform(Vec2::new(0.0, 980.0))
    }
}

impl GravityField {
    pub fn uniform(gravity: Vec2) -> Self {
        Self {
            default: gravity,
            zones: Vec::new(),
        }
    }

    pub fn with_zone(mut self, area: Rect, gravity: Vec2) -> Self {
        self.zones.push(GravityZone { area, gravity });
        self
    }

    pub fn gravity_at(&self, point: Vec2) -> Vec2 {
        self.zones
            .iter()
            .find(|zone| zone.area.contains(point))
            .map_or(self.default, |zone| zone.gravity)
    }
}

/// Плоский пол: всё с y >= height стоит на полу
#[derive(Resource, Debug, Clone, Copy, PartialEq, Default)]
pub struct Floor {
    pub height: f32,
}

/// Допуск контакта с полом (numerical errors)
const FLOOR_CONTACT_EPSILON: f32 = 1e-3;

fn on_floor(y: f32, floor: f32) -> bool {
    y >= floor - FLOOR_CONTACT_EPSILON
}

/// Адаптер: Transform + KinematicController → `KinematicBody`
pub struct HeadlessBody<'a> {
    transform: &'a mut Transform,
    controller: &'a mut KinematicController,
    gravity: Vec2,
    floor: f32,
    delta: f32,
}

impl<'a> HeadlessBody<'a> {
    pub fn new(
        transform: &'a mut Transform,
        controller: &'a mut KinematicController,
        gravity: &GravityField,
        floor: Floor,
        delta: f32,
    ) -> Self {
        let gravity = gravity.gravity_at(transform.translation.truncate());
        // Контакт берём из Transform: флаг прошлого тика устаревает, если body стоял
        controller.grounded = on_floor(transform.translation.y, floor.height);
        Self {
            transform,
            controller,
            gravity,
            floor: floor.height,
            delta,
        }
    }
}

impl KinematicBody for HeadlessBody<'_> {
    fn is_grounded(&self) -> bool {
        self.controller.grounded
    }

    fn current_gravity(&self) -> Vec2 {
        self.gravity
    }

    /// position += velocity * dt, затем выталкивание из пола
    ///
    /// Составляющая velocity против floor normal гасится только при контакте.
    fn resolve_motion(&mut self, velocity: Vec2, floor_normal: Vec2) -> Vec2 {
        let mut position = self.transform.translation.truncate() + velocity * self.delta;
        let mut resolved = velocity;

        let grounded = on_floor(position.y, self.floor);
        if grounded {
            position.y = position.y.min(self.floor);

            let into_floor = resolved.dot(floor_normal);
            if into_floor < 0.0 {
                resolved -= floor_normal * into_floor;
            }
        }

        self.controller.grounded = grounded;
        self.transform.translation = position.extend(self.transform.translation.z);
        resolved
    }

    fn tick_delta_seconds(&self) -> f32 {
        self.delta
    }
}
