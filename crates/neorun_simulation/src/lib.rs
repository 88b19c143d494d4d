//! NEORUN Simulation Core
//!
//! ECS-симуляция 2D платформера на Bevy 0.16 (headless, без рендера)
//!
//! Архитектура:
//! - Update: input → sensing → таймеры последовательностей → FSM персонажа →
//!   триггеры → урон → смерть
//! - FixedUpdate (60Hz): movement intent → physics backend
//! - Physics backend подключаемый: headless AABB (`StaticLevel`) или rapier2d

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod combat;
pub mod components;
pub mod config;
pub mod controller;
pub mod input;
pub mod level;
pub mod logger;
pub mod physics;
pub mod sequence;
pub mod triggers;

// Re-export базовых типов для удобства
pub use combat::{
    CombatPlugin, DamageRequest, DeathCause, DeathRequest, EntityDied, EntityRespawned,
};
pub use components::*;
pub use config::{
    load_character_config, load_character_config_or_default, parse_character_config, CharacterConfig,
    ConfigError,
};
pub use controller::{ControllerPlugin, LegacyController};
pub use input::{InputScript, InputSignal, PlayerInput, PlayerInputEvent, ScriptedInputPlugin};
pub use logger::{init_logger, log, log_error, log_info, log_warning};
pub use physics::{HeadlessPhysicsPlugin, LayerMask, RapierBackendPlugin, StaticLevel};
pub use sequence::{SequenceStep, SequenceStepDue, Sequences};
pub use triggers::{CheckpointActivated, TriggerEntered, TriggersPlugin};

/// Порядок систем симуляции
///
/// Update: Input → Sense → Timers → Steps → Control → Triggers → Damage → Death
/// FixedUpdate: Intent → Physics
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    /// PlayerInputEvent → PlayerInput
    Input,
    /// Ground/climb sensing, trigger события от rapier
    Sense,
    /// Тик sequence таймеров
    Timers,
    /// Исполнение созревших шагов (EndDash, RestoreDash, Respawn)
    Steps,
    /// FSM персонажа
    Control,
    /// Checkpoint/Hazard dispatch
    Triggers,
    Damage,
    Death,
    /// Velocity intent из состояния (FixedUpdate)
    Intent,
    /// Integration + trigger overlaps (FixedUpdate)
    Physics,
}

/// Какой physics backend подключать
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PhysicsBackend {
    #[default]
    Headless,
    Rapier,
}

/// Главный plugin симуляции (объединяет все подсистемы)
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulationPlugin {
    pub backend: PhysicsBackend,
}

impl SimulationPlugin {
    pub fn rapier() -> Self {
        Self {
            backend: PhysicsBackend::Rapier,
        }
    }
}

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            Update,
            (
                SimulationSet::Input,
                SimulationSet::Sense,
                SimulationSet::Timers,
                SimulationSet::Steps,
                SimulationSet::Control,
                SimulationSet::Triggers,
                SimulationSet::Damage,
                SimulationSet::Death,
            )
                .chain(),
        )
        .configure_sets(
            FixedUpdate,
            (SimulationSet::Intent, SimulationSet::Physics).chain(),
        );

        if !app.world().contains_resource::<Time<Fixed>>() {
            app.insert_resource(Time::<Fixed>::from_hz(60.0));
        }
        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(42));
        }

        app.add_event::<PlayerInputEvent>()
            .add_event::<SequenceStepDue>()
            .add_systems(Update, input::apply_input_events.in_set(SimulationSet::Input))
            .add_systems(Update, sequence::advance_sequences.in_set(SimulationSet::Timers))
            .add_plugins((CombatPlugin, ControllerPlugin, TriggersPlugin));

        match self.backend {
            PhysicsBackend::Headless => {
                app.add_plugins(HeadlessPhysicsPlugin);
            }
            PhysicsBackend::Rapier => {
                app.add_plugins(RapierBackendPlugin);
            }
        }
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(Time::<Fixed>::from_hz(60.0)); // 60Hz FixedUpdate

    app
}

/// Snapshot компонентов `T` для сравнения детерминизма (Debug формат, сортировка по Entity)
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();
    entities.sort_by_key(|(entity, _)| entity.index());

    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
