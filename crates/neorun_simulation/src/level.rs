//! Level spawn helpers
//!
//! Используются headless bin'ом и integration тестами. Все функции работают
//! через `Commands` (как spawn из систем), entity появляются после apply.

use bevy::prelude::*;

use crate::components::{
    CharacterBody, Checkpoint, GroundCheck, Hazard, Health, LevelSurface, Player,
    RespawnPoint, TriggerZone,
};
use crate::config::CharacterConfig;
use crate::controller::LegacyController;
use crate::physics::LayerMask;

/// Spawn игрока в `position` с заданным tuning'ом
///
/// Health = max_health, respawn point = стартовая позиция, GroundCheck у ног.
pub fn spawn_player(commands: &mut Commands, position: Vec2, config: CharacterConfig) -> Entity {
    commands
        .spawn((
            Player,
            Name::new("Player"),
            Transform::from_translation(position.extend(0.0)),
            Health::new(config.max_health),
            CharacterBody {
                gravity_scale: config.gravity_scale,
                ..Default::default()
            },
            RespawnPoint::at_spawn(position),
            GroundCheck::default(),
            config,
        ))
        .id()
}

/// Spawn legacy персонажа (без FSM, grounded через триггеры)
pub fn spawn_legacy_player(commands: &mut Commands, position: Vec2, controller: LegacyController) -> Entity {
    commands
        .spawn((
            controller,
            Name::new("LegacyPlayer"),
            Transform::from_translation(position.extend(0.0)),
            CharacterBody {
                gravity_scale: 1.0,
                ..Default::default()
            },
        ))
        .id()
}

pub fn spawn_checkpoint(commands: &mut Commands, position: Vec2, visible: bool) -> Entity {
    commands
        .spawn((
            Checkpoint { visible },
            Name::new("Checkpoint"),
            Transform::from_translation(position.extend(0.0)),
        ))
        .id()
}

pub fn spawn_hazard(commands: &mut Commands, position: Vec2, half_size: Vec2) -> Entity {
    commands
        .spawn((
            Hazard,
            TriggerZone { half_size },
            Name::new("Hazard"),
            Transform::from_translation(position.extend(0.0)),
        ))
        .id()
}

/// Статичная поверхность (GROUND, CLIMBABLE или обе)
pub fn spawn_surface(commands: &mut Commands, center: Vec2, half_size: Vec2, layers: LayerMask) -> Entity {
    commands
        .spawn((
            LevelSurface::new(half_size, layers),
            Transform::from_translation(center.extend(0.0)),
        ))
        .id()
}

/// Демо уровень для headless прогона: пол, лестница, checkpoint, шипы
pub fn spawn_demo_level(commands: &mut Commands, config: CharacterConfig) -> Entity {
    spawn_surface(commands, Vec2::new(0.0, -0.5), Vec2::new(30.0, 0.5), LayerMask::GROUND);
    spawn_surface(commands, Vec2::new(8.0, 3.0), Vec2::new(0.5, 3.0), LayerMask::CLIMBABLE);
    spawn_checkpoint(commands, Vec2::new(12.0, 0.9), true);
    spawn_hazard(commands, Vec2::new(-12.0, 0.25), Vec2::new(1.0, 0.25));

    spawn_player(commands, Vec2::new(0.0, 0.9), config)
}
