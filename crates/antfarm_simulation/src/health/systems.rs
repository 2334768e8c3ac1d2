//! Health systems: запросы → state machine → сигналы → despawn

use bevy::prelude::*;

use super::events::{ActorDamaged, ActorDied, Dead, HealthRequest};
use super::state::{Death, Health};
use crate::events::{ActorEvent, ActorSignal, ActorSignalled, RequestRejected};
use crate::logger;

/// Система: применение HealthRequest событий по порядку
///
/// 1. Находим Health цели (нет Health → warning, пропуск)
/// 2. Применяем операцию (invalid argument → RequestRejected, без мутации)
/// 3. Публикуем ActorDamaged / ActorDied (+ общий ActorSignalled) в порядке `DamageOutcome::events()`
/// 4. На переходе в Dead вешаем маркер Dead (despawn в `despawn_dead_actors`)
pub fn apply_health_requests(
    mut commands: Commands,
    mut requests: EventReader<HealthRequest>,
    mut damaged_events: EventWriter<ActorDamaged>,
    mut died_events: EventWriter<ActorDied>,
    mut signalled_events: EventWriter<ActorSignalled>,
    mut rejected_events: EventWriter<RequestRejected>,
    mut targets: Query<&mut Health>,
) {
    for request in requests.read() {
        let entity = request.target();

        let Ok(mut health) = targets.get_mut(entity) else {
            logger::log_warning(&format!("HealthRequest: target {:?} has no Health", entity));
            continue;
        };

        let result = match *request {
            HealthRequest::Configure { hitpoints, .. } => {
                health.configure_capacity(hitpoints).map(|applied| {
                    if applied {
                        logger::log(&format!("{:?}: capacity set to {}", entity, hitpoints));
                    } else {
                        logger::log_warning(&format!(
                            "{:?}: capacity change ignored, actor is dead",
                            entity
                        ));
                    }
                    None
                })
            }
            HealthRequest::Damage { points, position, .. } => {
                health.damage(points, position).map(|outcome| {
                    for event in outcome.events() {
                        signalled_events.write(ActorSignalled { entity, event });
                        match event {
                            ActorEvent::Damaged { points, position } => {
                                damaged_events.write(ActorDamaged {
                                    entity,
                                    points,
                                    position,
                                });
                            }
                            ActorEvent::Died => {
                                died_events.write(ActorDied { entity });
                            }
                        }
                    }
                    outcome.death
                })
            }
            HealthRequest::Heal { points, .. } => health.heal(points).map(|_| None),
            HealthRequest::Kill { .. } => {
                let death = health.die();
                if death.is_some() {
                    signalled_events.write(ActorSignalled {
                        entity,
                        event: ActorEvent::Died,
                    });
                    died_events.write(ActorDied { entity });
                }
                Ok(death)
            }
        };

        match result {
            Ok(Some(Death)) => mark_dead(&mut commands, entity, health.max()),
            Ok(None) => {}
            Err(error) => {
                logger::log_error(&format!("{:?}: rejected {:?}: {}", entity, request, error));
                rejected_events.write(RequestRejected { entity, error });
            }
        }
    }
}

fn mark_dead(commands: &mut Commands, entity: Entity, max: u32) {
    logger::log_info(&format!(
        "{:?}: {} (max hitpoints {})",
        entity,
        ActorSignal::Died.name(),
        max
    ));

    if let Ok(mut entity_commands) = commands.get_entity(entity) {
        entity_commands.insert(Dead);
    }
}

/// Система: destroy_actor для всех мёртвых
///
/// Запускается последней в цепочке FixedUpdate: сигналы этого тика уже опубликованы.
pub fn despawn_dead_actors(mut commands: Commands, query: Query<Entity, With<Dead>>) {
    for entity in query.iter() {
        logger::log(&format!("Despawning dead actor {:?}", entity));
        commands.entity(entity).despawn();
    }
}
