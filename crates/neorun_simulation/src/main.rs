//! Headless симуляция NEORUN
//!
//! Запускает Bevy App без рендера: демо уровень + scripted input.
//!
//! Usage: neorun_simulation [character.ron]

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use neorun_simulation::level::spawn_demo_level;
use neorun_simulation::{
    create_headless_app, init_logger, load_character_config_or_default, CharacterState, EntityDied,
    EntityRespawned, Health, Player, ScriptedInputPlugin, SimulationPlugin,
};

const SEED: u64 = 42;
const TICKS: usize = 1000;

#[derive(Resource, Debug, Default)]
struct RunStats {
    deaths: usize,
    respawns: usize,
}

fn count_lifecycle_events(
    mut stats: ResMut<RunStats>,
    mut died: EventReader<EntityDied>,
    mut respawned: EventReader<EntityRespawned>,
) {
    stats.deaths += died.read().count();
    stats.respawns += respawned.read().count();
}

fn main() {
    println!("Starting NEORUN headless simulation (seed: {})", SEED);

    // Logger до загрузки config: fallback пишет warning
    init_logger();
    let config_path = std::env::args().nth(1);
    let config = load_character_config_or_default(config_path.as_deref());

    let mut app = create_headless_app(SEED);
    app.add_plugins((SimulationPlugin::default(), ScriptedInputPlugin))
        // Ровно один fixed step на update
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(1.0 / 60.0)))
        .init_resource::<RunStats>()
        .add_systems(Last, count_lifecycle_events);

    spawn_demo_level(&mut app.world_mut().commands(), config);
    app.world_mut().flush();

    for tick in 0..TICKS {
        app.update();

        if tick % 100 == 0 {
            let world = app.world_mut();
            let mut query = world.query_filtered::<(&Transform, &Health, &CharacterState), With<Player>>();
            for (transform, health, state) in query.iter(world) {
                println!(
                    "Tick {}: pos=({:.2}, {:.2}) hp={}/{} state={}",
                    tick,
                    transform.translation.x,
                    transform.translation.y,
                    health.current,
                    health.max,
                    state.label()
                );
            }
        }
    }

    let stats = app.world().resource::<RunStats>();
    println!(
        "Simulation complete! deaths={} respawns={}",
        stats.deaths, stats.respawns
    );
}
