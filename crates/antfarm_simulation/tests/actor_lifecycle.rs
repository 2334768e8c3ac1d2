//! Actor lifecycle integration test
//!
//! Прогоняем SimulationPlugin тик за тиком (advance_fixed_tick) и проверяем:
//! - контракт сигналов damaged/died (порядок, ровно один died)
//! - despawn мёртвых
//! - run/jump/gravity через headless host
//! - идемпотентность facing

use antfarm_simulation::health::despawn_dead_actors;
use antfarm_simulation::*;
use bevy::ecs::event::Events;
use bevy::prelude::*;

fn create_test_app() -> App {
    create_headless_app(7)
}

/// Helper: spawn актора напрямую в World (без Commands)
fn spawn_test_actor(app: &mut App, position: Vec2, config: ActorConfig) -> Entity {
    let components = config.components().expect("valid test config");
    app.world_mut()
        .spawn((components, Transform::from_translation(position.extend(0.0))))
        .id()
}

fn drain<E: Event>(app: &mut App) -> Vec<E> {
    app.world_mut().resource_mut::<Events<E>>().drain().collect()
}

fn health(app: &App, entity: Entity) -> Health {
    *app.world().get::<Health>(entity).expect("actor has Health")
}

fn locomotion(app: &App, entity: Entity) -> Locomotion {
    *app.world().get::<Locomotion>(entity).expect("actor has Locomotion")
}

fn with_hitpoints(max_hitpoints: i32) -> ActorConfig {
    ActorConfig {
        max_hitpoints,
        falling: false,
        ..ActorConfig::default()
    }
}

#[test]
fn test_non_lethal_damage() {
    let mut app = create_test_app();
    let actor = spawn_test_actor(&mut app, Vec2::ZERO, with_hitpoints(10));

    app.world_mut().send_event(HealthRequest::Damage {
        target: actor,
        points: 4,
        position: Vec2::ZERO,
    });
    advance_fixed_tick(&mut app);

    assert_eq!(health(&app, actor).current(), 6);
    assert_eq!(
        drain::<ActorDamaged>(&mut app),
        vec![ActorDamaged {
            entity: actor,
            points: 4,
            position: Vec2::ZERO
        }]
    );
    assert!(drain::<ActorDied>(&mut app).is_empty());
    assert!(app.world().get::<Dead>(actor).is_none());
}

#[test]
fn test_lethal_damage_fires_died_once_and_despawns() {
    let mut app = create_test_app();
    let actor = spawn_test_actor(&mut app, Vec2::ZERO, with_hitpoints(5));
    let position = Vec2::new(3.0, 4.0);

    // Два запроса в одном тике: второй приходит уже мёртвому
    app.world_mut().send_event(HealthRequest::Damage {
        target: actor,
        points: 5,
        position,
    });
    app.world_mut().send_event(HealthRequest::Damage {
        target: actor,
        points: 3,
        position,
    });
    app.world_mut().send_event(HealthRequest::Kill { target: actor });
    advance_fixed_tick(&mut app);

    let damaged = drain::<ActorDamaged>(&mut app);
    assert_eq!(damaged.len(), 2);
    assert_eq!(damaged[0].points, 5);
    assert_eq!(damaged[1].points, 3);

    assert_eq!(drain::<ActorDied>(&mut app), vec![ActorDied { entity: actor }]);

    // destroy_actor: entity удалён в ActorSet::Cleanup
    assert!(app.world().get_entity(actor).is_err());
}

#[test]
fn test_signal_stream_orders_damaged_before_died() {
    let mut app = create_test_app();
    let actor = spawn_test_actor(&mut app, Vec2::ZERO, with_hitpoints(4));
    let position = Vec2::new(1.0, 2.0);

    app.world_mut().send_event(HealthRequest::Damage {
        target: actor,
        points: 9,
        position,
    });
    app.world_mut().send_event(HealthRequest::Kill { target: actor });
    advance_fixed_tick(&mut app);

    assert_eq!(
        drain::<ActorSignalled>(&mut app),
        vec![
            ActorSignalled {
                entity: actor,
                event: ActorEvent::Damaged { points: 9, position },
            },
            ActorSignalled {
                entity: actor,
                event: ActorEvent::Died,
            },
        ]
    );
}

/// Состояние мёртвых акторов перед despawn (Cleanup)
#[derive(Resource, Default)]
struct DeadBeforeDespawn(Vec<(Entity, Locomotion, Transform)>);

fn record_dead_actors(
    query: Query<(Entity, &Locomotion, &Transform), With<Dead>>,
    mut recorded: ResMut<DeadBeforeDespawn>,
) {
    for (entity, locomotion, transform) in query.iter() {
        recorded.0.push((entity, *locomotion, *transform));
    }
}

#[test]
fn test_dead_actor_skips_locomotion_in_same_tick() {
    let mut app = create_test_app();
    app.init_resource::<DeadBeforeDespawn>().add_systems(
        FixedUpdate,
        record_dead_actors
            .in_set(ActorSet::Cleanup)
            .before(despawn_dead_actors),
    );

    let start = Vec2::new(0.0, -100.0);
    let actor = spawn_test_actor(&mut app, start, with_hitpoints(2));

    app.world_mut().send_event(HealthRequest::Damage {
        target: actor,
        points: 2,
        position: Vec2::ZERO,
    });
    app.world_mut().send_event(LocomotionRequest::ApplyImpulse {
        entity: actor,
        impulse: Vec2::new(50.0, -50.0),
    });
    app.world_mut()
        .send_event(LocomotionRequest::Jump { entity: actor });
    app.world_mut().send_event(LocomotionRequest::FaceRight { entity: actor });
    advance_fixed_tick(&mut app);

    let recorded = &app.world().resource::<DeadBeforeDespawn>().0;
    assert_eq!(recorded.len(), 1);

    let (entity, locomotion, transform) = recorded[0];
    assert_eq!(entity, actor);
    assert_eq!(locomotion.linear_velocity(), Vec2::ZERO);
    assert!(!locomotion.is_jump_requested());
    assert_eq!(transform.translation.truncate(), start);

    assert!(drain::<FacingChanged>(&mut app).is_empty());
    assert!(app.world().get_entity(actor).is_err());
}

#[test]
fn test_kill_request_is_idempotent() {
    let mut app = create_test_app();
    let actor = spawn_test_actor(&mut app, Vec2::ZERO, with_hitpoints(3));

    app.world_mut().send_event(HealthRequest::Kill { target: actor });
    app.world_mut().send_event(HealthRequest::Kill { target: actor });
    advance_fixed_tick(&mut app);

    assert_eq!(drain::<ActorDied>(&mut app).len(), 1);
    assert!(drain::<ActorDamaged>(&mut app).is_empty());
}

#[test]
fn test_invalid_requests_rejected_without_mutation() {
    let mut app = create_test_app();
    let actor = spawn_test_actor(&mut app, Vec2::ZERO, with_hitpoints(10));

    app.world_mut().send_event(HealthRequest::Damage {
        target: actor,
        points: -2,
        position: Vec2::ZERO,
    });
    app.world_mut().send_event(HealthRequest::Configure {
        target: actor,
        hitpoints: 0,
    });
    app.world_mut().send_event(LocomotionRequest::SetMovement {
        entity: actor,
        direction: 5,
    });
    advance_fixed_tick(&mut app);

    let rejected = drain::<RequestRejected>(&mut app);
    assert_eq!(rejected.len(), 3);
    assert!(matches!(
        rejected[0].error,
        ActorError::NegativePoints { points: -2, .. }
    ));
    assert!(matches!(
        rejected[1].error,
        ActorError::InvalidCapacity { hitpoints: 0, .. }
    ));
    assert_eq!(rejected[2].error, ActorError::InvalidDirection(5));

    assert_eq!(health(&app, actor).current(), 10);
    assert!(drain::<ActorDamaged>(&mut app).is_empty());
    assert_eq!(locomotion(&app, actor).movement(), RunDirection::Idle);
}

#[test]
fn test_heal_and_configure_capacity() {
    let mut app = create_test_app();
    let actor = spawn_test_actor(&mut app, Vec2::ZERO, with_hitpoints(10));

    app.world_mut().send_event(HealthRequest::Damage {
        target: actor,
        points: 8,
        position: Vec2::ZERO,
    });
    app.world_mut().send_event(HealthRequest::Heal {
        target: actor,
        points: 50,
    });
    advance_fixed_tick(&mut app);
    assert_eq!(health(&app, actor).current(), 10);

    app.world_mut().send_event(HealthRequest::Damage {
        target: actor,
        points: 4,
        position: Vec2::ZERO,
    });
    app.world_mut().send_event(HealthRequest::Configure {
        target: actor,
        hitpoints: 40,
    });
    advance_fixed_tick(&mut app);

    let health = health(&app, actor);
    assert_eq!(health.max(), 40);
    assert_eq!(health.current(), 40);
}

#[test]
fn test_grounded_run_speed() {
    let mut app = create_test_app();
    // Стоит на полу с рождения, grounded руками не выставляем
    let actor = spawn_test_actor(&mut app, Vec2::ZERO, with_hitpoints(1));

    app.world_mut().send_event(LocomotionRequest::SetMovement {
        entity: actor,
        direction: 1,
    });
    advance_fixed_tick(&mut app);

    assert_eq!(locomotion(&app, actor).linear_velocity().x, 75.0);

    let transform = app.world().get::<Transform>(actor).expect("actor has Transform");
    assert!(transform.translation.x > 0.0);
    assert_eq!(transform.translation.y, 0.0);
}

#[test]
fn test_spawned_on_floor_starts_running() {
    let mut app = create_test_app();
    let config = with_hitpoints(1);

    let actor = {
        let mut commands = app.world_mut().commands();
        spawn_actor(&mut commands, Vec2::ZERO, &config).expect("valid config")
    };
    app.world_mut().flush();

    app.world_mut().send_event(LocomotionRequest::SetMovement {
        entity: actor,
        direction: -1,
    });
    for _ in 0..5 {
        advance_fixed_tick(&mut app);
    }

    assert_eq!(locomotion(&app, actor).linear_velocity(), Vec2::new(-75.0, 0.0));
    let transform = app.world().get::<Transform>(actor).expect("actor has Transform");
    assert!(transform.translation.x < 0.0);
    assert_eq!(transform.translation.y, 0.0);
}

#[test]
fn test_non_finite_impulse_rejected() {
    let mut app = create_test_app();
    let actor = spawn_test_actor(&mut app, Vec2::new(0.0, -100.0), with_hitpoints(1));

    app.world_mut().send_event(LocomotionRequest::ApplyImpulse {
        entity: actor,
        impulse: Vec2::new(f32::NAN, 0.0),
    });
    advance_fixed_tick(&mut app);

    let rejected = drain::<RequestRejected>(&mut app);
    assert_eq!(rejected.len(), 1);
    assert!(matches!(
        rejected[0].error,
        ActorError::NonFiniteImpulse { .. }
    ));
    assert_eq!(locomotion(&app, actor).linear_velocity(), Vec2::ZERO);
}

#[test]
fn test_airborne_jump_dropped() {
    let mut app = create_test_app();
    let actor = spawn_test_actor(&mut app, Vec2::new(0.0, -100.0), with_hitpoints(1));

    app.world_mut()
        .send_event(LocomotionRequest::Jump { entity: actor });
    advance_fixed_tick(&mut app);

    let locomotion = locomotion(&app, actor);
    assert_eq!(locomotion.linear_velocity(), Vec2::ZERO);
    assert!(!locomotion.is_jump_requested());
}

#[test]
fn test_falling_actor_lands_on_floor() {
    let mut app = create_test_app();
    let config = ActorConfig {
        falling: true,
        ..ActorConfig::default()
    };
    let actor = spawn_test_actor(&mut app, Vec2::new(0.0, -10.0), config);

    let mut landed = false;
    for _ in 0..120 {
        advance_fixed_tick(&mut app);
        let controller = app
            .world()
            .get::<KinematicController>(actor)
            .expect("actor has KinematicController");
        if controller.grounded {
            landed = true;
            break;
        }
    }
    assert!(landed, "actor never reached the floor");

    // Ещё тик на полу: гравитация гасится контактом
    advance_fixed_tick(&mut app);
    let transform = app.world().get::<Transform>(actor).expect("actor has Transform");
    assert_eq!(transform.translation.y, 0.0);
    assert_eq!(locomotion(&app, actor).linear_velocity().y, 0.0);
}

#[test]
fn test_grounded_jump_leaves_floor() {
    let mut app = create_test_app();
    let actor = spawn_test_actor(&mut app, Vec2::ZERO, ActorConfig::default());

    app.world_mut()
        .send_event(LocomotionRequest::Jump { entity: actor });
    advance_fixed_tick(&mut app);

    assert!(locomotion(&app, actor).linear_velocity().y < 0.0);
    let controller = app
        .world()
        .get::<KinematicController>(actor)
        .expect("actor has KinematicController");
    assert!(!controller.grounded);
}

#[test]
fn test_facing_change_emitted_once() {
    let mut app = create_test_app();
    let actor = spawn_test_actor(&mut app, Vec2::ZERO, with_hitpoints(1));

    // Default facing = Left: первый FaceLeft ничего не меняет
    app.world_mut()
        .send_event(LocomotionRequest::FaceLeft { entity: actor });
    app.world_mut()
        .send_event(LocomotionRequest::FaceRight { entity: actor });
    app.world_mut()
        .send_event(LocomotionRequest::FaceRight { entity: actor });
    advance_fixed_tick(&mut app);

    assert_eq!(
        drain::<FacingChanged>(&mut app),
        vec![FacingChanged {
            entity: actor,
            facing: Facing::Right
        }]
    );
}

#[test]
fn test_impulse_then_stop() {
    let mut app = create_test_app();
    let actor = spawn_test_actor(&mut app, Vec2::new(0.0, -500.0), with_hitpoints(1));

    app.world_mut().send_event(LocomotionRequest::ApplyImpulse {
        entity: actor,
        impulse: Vec2::new(120.0, -30.0),
    });
    advance_fixed_tick(&mut app);

    // В воздухе без гравитации импульс сохраняется целиком
    assert_eq!(
        locomotion(&app, actor).linear_velocity(),
        Vec2::new(120.0, -30.0)
    );

    app.world_mut()
        .send_event(LocomotionRequest::Stop { entity: actor });
    advance_fixed_tick(&mut app);

    assert_eq!(locomotion(&app, actor).linear_velocity(), Vec2::ZERO);
}
