//! Combat domain: health, damage, death, respawn
//!
//! Events:
//! - DamageRequest (хост/ловушки) → apply_damage_requests
//! - DeathRequest (урон до 0, hazard, падение) → process_death_requests
//! - EntityDied / EntityRespawned (наружу: UI, звук, статистика)

use bevy::prelude::*;

use crate::SimulationSet;

pub mod damage;
pub mod death;

#[cfg(test)]
mod damage_tests;

pub use damage::{apply_damage_requests, apply_damage_to, DamageOutcome};
pub use death::{complete_respawn, enter_death, process_death_requests, respawn_characters};

/// Причина смерти
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum DeathCause {
    Damage,
    Hazard,
    Fall,
}

/// Event: нанести урон (amount берётся по модулю)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DamageRequest {
    pub target: Entity,
    pub amount: i32,
}

/// Event: убить entity (no-op если уже Dead)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeathRequest {
    pub entity: Entity,
    pub cause: DeathCause,
}

/// Event: entity перешёл в Dead (ровно один раз на смерть)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityDied {
    pub entity: Entity,
    pub cause: DeathCause,
}

/// Event: entity воскрес
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct EntityRespawned {
    pub entity: Entity,
    pub position: Vec2,
}

/// Combat Plugin
///
/// Update:
/// 1. respawn_characters (Steps): шаг Respawn из sequence таймеров
/// 2. apply_damage_requests (Damage)
/// 3. process_death_requests (Death): последним, собирает все источники смерти
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<DamageRequest>()
            .add_event::<DeathRequest>()
            .add_event::<EntityDied>()
            .add_event::<EntityRespawned>();

        app.add_systems(Update, respawn_characters.in_set(SimulationSet::Steps))
            .add_systems(Update, apply_damage_requests.in_set(SimulationSet::Damage))
            .add_systems(Update, process_death_requests.in_set(SimulationSet::Death));
    }
}
