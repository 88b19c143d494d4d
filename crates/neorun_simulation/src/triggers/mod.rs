//! Trigger dispatch: персонаж вошёл в зону → handler зоны
//!
//! Backend (headless overlap или rapier CollisionEvent) пишет `TriggerEntered`.
//! Каждый тип зоны реализует `TriggerHandler` и получает свою систему
//! `dispatch_trigger::<H>`, которая применяет `TriggerResponse`.

use bevy::prelude::*;

use crate::combat::{DeathCause, DeathRequest};
use crate::components::{Appearance, Checkpoint, Hazard, RespawnAnchor, RespawnPoint};
use crate::SimulationSet;

#[cfg(test)]
mod triggers_tests;

/// Event: персонаж вошёл в trigger зону (edge, не каждый frame)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerEntered {
    pub character: Entity,
    pub zone: Entity,
}

/// Event: respawn point персонажа сменился на checkpoint
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckpointActivated {
    pub character: Entity,
    pub checkpoint: Entity,
}

/// Зоны, в которых персонаж находится сейчас (для enter edge в headless backend)
#[derive(Component, Debug, Clone, Default)]
pub struct TriggerContacts {
    pub zones: Vec<Entity>,
}

impl TriggerContacts {
    /// Обновить набор зон, вернуть только новые (enter)
    pub fn update(&mut self, overlapping: Vec<Entity>) -> Vec<Entity> {
        let entered = overlapping
            .iter()
            .copied()
            .filter(|zone| !self.zones.contains(zone))
            .collect();
        self.zones = overlapping;
        entered
    }
}

/// Реакция зоны на вход персонажа
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TriggerResponse {
    SetRespawn(RespawnAnchor),
    Kill(DeathCause),
    Ignore,
}

/// Handler per тип зоны
pub trait TriggerHandler: Component {
    fn on_character_enter(&self, zone: Entity) -> TriggerResponse;
}

impl TriggerHandler for Checkpoint {
    fn on_character_enter(&self, zone: Entity) -> TriggerResponse {
        TriggerResponse::SetRespawn(RespawnAnchor::Checkpoint(zone))
    }
}

impl TriggerHandler for Hazard {
    fn on_character_enter(&self, _zone: Entity) -> TriggerResponse {
        TriggerResponse::Kill(DeathCause::Hazard)
    }
}

/// Система: TriggerEntered → handler зоны типа H
pub fn dispatch_trigger<H: TriggerHandler>(
    mut events: EventReader<TriggerEntered>,
    handlers: Query<(&H, Option<&Name>)>,
    mut respawn_points: Query<&mut RespawnPoint>,
    mut deaths: EventWriter<DeathRequest>,
    mut activations: EventWriter<CheckpointActivated>,
) {
    for event in events.read() {
        let Ok((handler, name)) = handlers.get(event.zone) else {
            continue;
        };
        let zone_name = name.map(|n| n.as_str().to_string()).unwrap_or_else(|| format!("{:?}", event.zone));

        match handler.on_character_enter(event.zone) {
            TriggerResponse::SetRespawn(anchor) => {
                let Ok(mut respawn_point) = respawn_points.get_mut(event.character) else {
                    continue;
                };
                if respawn_point.set(anchor) {
                    crate::log_info(&format!("🚩 Checkpoint activated: {}", zone_name));
                    activations.write(CheckpointActivated {
                        character: event.character,
                        checkpoint: event.zone,
                    });
                }
            }
            TriggerResponse::Kill(cause) => {
                crate::log(&format!("Hazard hit: {} → {:?}", zone_name, event.character));
                deaths.write(DeathRequest {
                    entity: event.character,
                    cause,
                });
            }
            TriggerResponse::Ignore => {}
        }
    }
}

/// Система: невидимые checkpoint'ы прячут визуал при появлении
pub fn apply_checkpoint_visibility(
    mut query: Query<(&Checkpoint, &mut Appearance), Added<Checkpoint>>,
) {
    for (checkpoint, mut appearance) in query.iter_mut() {
        if !checkpoint.visible {
            appearance.visible = false;
        }
    }
}

/// Triggers Plugin
///
/// Update (Triggers set): dispatch для Checkpoint и Hazard.
pub struct TriggersPlugin;

impl Plugin for TriggersPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<TriggerEntered>()
            .add_event::<CheckpointActivated>();

        app.add_systems(Update, apply_checkpoint_visibility.in_set(SimulationSet::Sense))
            .add_systems(
                Update,
                (dispatch_trigger::<Checkpoint>, dispatch_trigger::<Hazard>)
                    .chain()
                    .in_set(SimulationSet::Triggers),
            );
    }
}
