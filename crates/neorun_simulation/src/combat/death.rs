//! Death and respawn sequence.
//!
//! Смерть (урон / hazard / падение):
//! - state = Dead, velocity = 0, тело не симулируется, input выключен
//! - через `respawn_delay` (шаг `SequenceStep::Respawn`):
//!   Health = max, позиция = respawn point, тело и input обратно, state = Normal

use bevy::prelude::*;

use super::{DeathRequest, EntityDied, EntityRespawned};
use crate::components::{Checkpoint, CharacterBody, CharacterState, Health, RespawnPoint, RespawnState};
use crate::config::CharacterConfig;
use crate::input::PlayerInput;
use crate::sequence::{SequenceStep, SequenceStepDue, Sequences};

/// Переход в Dead. false если уже мёртв (idempotent guard).
pub fn enter_death(
    state: &mut CharacterState,
    body: &mut CharacterBody,
    input: &mut PlayerInput,
    sequences: &mut Sequences,
    respawn_delay: f32,
) -> bool {
    if state.is_dead() {
        return false;
    }

    *state = CharacterState::Dead(RespawnState::default());
    body.freeze();
    input.disable();
    sequences.schedule_after(respawn_delay, SequenceStep::Respawn);
    true
}

/// Возврат к жизни на уже резолвнутой позиции. false если не был мёртв.
pub fn complete_respawn(
    state: &mut CharacterState,
    body: &mut CharacterBody,
    input: &mut PlayerInput,
    health: &mut Health,
    transform: &mut Transform,
    position: Vec2,
) -> bool {
    if !state.is_dead() {
        return false;
    }

    health.restore_full();
    transform.translation.x = position.x;
    transform.translation.y = position.y;
    body.velocity = Vec2::ZERO;
    body.unfreeze();
    input.enable();
    *state = CharacterState::Normal;
    true
}

/// Система: DeathRequest → Dead
pub fn process_death_requests(
    mut requests: EventReader<DeathRequest>,
    mut characters: Query<(
        &mut CharacterState,
        &mut CharacterBody,
        &mut PlayerInput,
        &mut Sequences,
        &CharacterConfig,
    )>,
    mut died: EventWriter<EntityDied>,
) {
    for request in requests.read() {
        let Ok((mut state, mut body, mut input, mut sequences, config)) =
            characters.get_mut(request.entity)
        else {
            continue;
        };

        if enter_death(
            &mut state,
            &mut body,
            &mut input,
            &mut sequences,
            config.respawn_delay,
        ) {
            crate::log_info(&format!(
                "☠️ {:?} died ({:?}), respawn in {}s",
                request.entity, request.cause, config.respawn_delay
            ));
            died.write(EntityDied {
                entity: request.entity,
                cause: request.cause,
            });
        }
    }
}

/// Система: шаг Respawn → воскрешение на respawn point
///
/// Checkpoint позиция читается в момент respawn (weak reference).
pub fn respawn_characters(
    mut steps: EventReader<SequenceStepDue>,
    mut characters: Query<
        (
            &mut CharacterState,
            &mut CharacterBody,
            &mut PlayerInput,
            &mut Health,
            &mut Transform,
            &RespawnPoint,
        ),
        Without<Checkpoint>,
    >,
    checkpoints: Query<&Transform, With<Checkpoint>>,
    mut respawned: EventWriter<EntityRespawned>,
) {
    for due in steps.read() {
        if due.step != SequenceStep::Respawn {
            continue;
        }

        let Ok((mut state, mut body, mut input, mut health, mut transform, respawn_point)) =
            characters.get_mut(due.entity)
        else {
            continue;
        };

        let position = respawn_point.resolve(|checkpoint| {
            checkpoints
                .get(checkpoint)
                .ok()
                .map(|transform| transform.translation.truncate())
        });

        if complete_respawn(
            &mut state,
            &mut body,
            &mut input,
            &mut health,
            &mut transform,
            position,
        ) {
            crate::log_info(&format!("✨ {:?} respawned at {:?}", due.entity, position));
            respawned.write(EntityRespawned {
                entity: due.entity,
                position,
            });
        }
    }
}
