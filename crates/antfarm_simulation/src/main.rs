//! Headless симуляция Antfarm
//!
//! Спавнит несколько walker'ов, периодически наносит им урон и печатает
//! сигналы died/damaged. Godot не нужен.

use antfarm_simulation::demo::{DemoPlugin, RandomWalker};
use antfarm_simulation::{
    advance_fixed_tick, create_headless_app, init_logger, log_error, log_info, spawn_actor,
    ActorConfig, ActorDamaged, ActorDied, ActorSignal, Health, HealthRequest,
};
use bevy::ecs::event::Events;
use bevy::prelude::*;

const WALKERS: usize = 4;
const TICKS: usize = 600;
const DAMAGE_EVERY: usize = 45;

fn main() {
    let seed = 42;
    init_logger();
    log_info(&format!("Starting Antfarm headless simulation (seed: {})", seed));

    let mut app = create_headless_app(seed);
    app.add_plugins(DemoPlugin);

    let config = ActorConfig {
        max_hitpoints: 10,
        ..ActorConfig::default()
    };

    let mut walkers = Vec::with_capacity(WALKERS);
    {
        let mut commands = app.world_mut().commands();
        for i in 0..WALKERS {
            let position = Vec2::new(i as f32 * 64.0, 0.0);
            match spawn_actor(&mut commands, position, &config) {
                Ok(entity) => {
                    commands.entity(entity).insert(RandomWalker::default());
                    walkers.push(entity);
                }
                Err(error) => log_error(&format!("spawn failed: {}", error)),
            }
        }
    }
    app.world_mut().flush();

    for tick in 0..TICKS {
        if tick % DAMAGE_EVERY == 0 && !walkers.is_empty() {
            let target = walkers[(tick / DAMAGE_EVERY) % walkers.len()];
            app.world_mut().send_event(HealthRequest::Damage {
                target,
                points: 3,
                position: Vec2::new(tick as f32, 0.0),
            });
        }

        advance_fixed_tick(&mut app);
        report_signals(app.world_mut());

        if tick % 100 == 0 {
            let mut query = app.world_mut().query::<&Health>();
            let alive = query.iter(app.world()).count();
            println!("Tick {}: {} actors alive", tick, alive);
        }
    }

    println!("Simulation complete!");
}

fn report_signals(world: &mut World) {
    for event in world.resource_mut::<Events<ActorDamaged>>().drain() {
        println!(
            "{:?}: {} ({} @ {:?})",
            event.entity,
            ActorSignal::Damaged.name(),
            event.points,
            event.position
        );
    }

    for event in world.resource_mut::<Events<ActorDied>>().drain() {
        println!("{:?}: {}", event.entity, ActorSignal::Died.name());
    }
}
