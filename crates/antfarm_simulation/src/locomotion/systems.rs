//! Locomotion systems (FixedUpdate)

use bevy::prelude::*;

use super::events::{FacingChanged, LocomotionRequest};
use super::host::{Floor, GravityField, HeadlessBody, KinematicController};
use super::integrator::Locomotion;
use crate::components::{Actor, Facing};
use crate::events::RequestRejected;
use crate::health::Dead;
use crate::logger;

/// Система: применение LocomotionRequest до тика
///
/// Мёртвые акторы запросы не получают (gameplay после смерти не обрабатывается).
pub fn apply_locomotion_requests(
    mut requests: EventReader<LocomotionRequest>,
    mut facing_events: EventWriter<FacingChanged>,
    mut rejected_events: EventWriter<RequestRejected>,
    mut actors: Query<(&mut Locomotion, &mut Facing), Without<Dead>>,
) {
    for request in requests.read() {
        let entity = request.entity();

        let Ok((mut locomotion, mut facing)) = actors.get_mut(entity) else {
            logger::log_warning(&format!(
                "LocomotionRequest: {:?} is not a live actor, skipping {:?}",
                entity, request
            ));
            continue;
        };

        let result = match *request {
            LocomotionRequest::SetMovement { direction, .. } => locomotion.set_movement(direction),
            LocomotionRequest::Jump { .. } => {
                locomotion.jump();
                Ok(())
            }
            LocomotionRequest::ApplyImpulse { impulse, .. } => locomotion.apply_impulse(impulse),
            LocomotionRequest::Stop { .. } => {
                locomotion.stop();
                Ok(())
            }
            LocomotionRequest::FaceLeft { .. } | LocomotionRequest::FaceRight { .. } => {
                let changed = if matches!(request, LocomotionRequest::FaceLeft { .. }) {
                    facing.face_left()
                } else {
                    facing.face_right()
                };

                if changed {
                    logger::log(&format!("{:?}: facing {:?}", entity, *facing));
                    facing_events.write(FacingChanged {
                        entity,
                        facing: *facing,
                    });
                }
                Ok(())
            }
        };

        if let Err(error) = result {
            logger::log_error(&format!("{:?}: rejected {:?}: {}", entity, request, error));
            rejected_events.write(RequestRejected { entity, error });
        }
    }
}

/// Система: physics tick интегратора для всех живых акторов
///
/// Host = HeadlessBody (Transform + плоский пол + GravityField).
pub fn integrate_locomotion(
    time: Res<Time<Fixed>>,
    gravity: Res<GravityField>,
    floor: Res<Floor>,
    mut actors: Query<
        (Entity, &mut Locomotion, &mut Transform, &mut KinematicController),
        (With<Actor>, Without<Dead>),
    >,
) {
    let delta = time.delta_secs();

    for (entity, mut locomotion, mut transform, mut controller) in actors.iter_mut() {
        let mut body = HeadlessBody::new(&mut transform, &mut controller, &gravity, *floor, delta);
        let report = locomotion.physics_tick(&mut body);

        if report.jumped {
            logger::log(&format!(
                "{:?}: jump! velocity.y = {:.1}",
                entity,
                locomotion.linear_velocity().y
            ));
        }
    }
}
