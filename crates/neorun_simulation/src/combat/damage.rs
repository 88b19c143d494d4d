//! Damage bookkeeping.

use bevy::prelude::*;

use super::{DamageRequest, DeathCause, DeathRequest};
use crate::components::{CharacterState, Health};

/// Результат применения урона
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Уже мёртв: урон игнорируется
    Ignored,
    Wounded { remaining: u32 },
    /// Health дошёл до 0 → нужна смерть
    Lethal,
}

/// applyDamage: no-op при Dead, иначе health -= |amount|
pub fn apply_damage_to(health: &mut Health, state: &CharacterState, amount: i32) -> DamageOutcome {
    if state.is_dead() {
        return DamageOutcome::Ignored;
    }

    health.take_damage(amount);

    if health.is_alive() {
        DamageOutcome::Wounded {
            remaining: health.current,
        }
    } else {
        DamageOutcome::Lethal
    }
}

/// Система: DamageRequest → Health, летальный урон → DeathRequest
pub fn apply_damage_requests(
    mut requests: EventReader<DamageRequest>,
    mut targets: Query<(&mut Health, &CharacterState)>,
    mut deaths: EventWriter<DeathRequest>,
) {
    for request in requests.read() {
        let Ok((mut health, state)) = targets.get_mut(request.target) else {
            continue;
        };

        match apply_damage_to(&mut health, state, request.amount) {
            DamageOutcome::Ignored => {}
            DamageOutcome::Wounded { remaining } => {
                crate::log(&format!(
                    "{:?} takes {} damage. HP: {}/{}",
                    request.target, request.amount, remaining, health.max
                ));
            }
            DamageOutcome::Lethal => {
                crate::log(&format!(
                    "{:?} takes {} damage. HP: 0/{}",
                    request.target, request.amount, health.max
                ));
                deaths.write(DeathRequest {
                    entity: request.target,
                    cause: DeathCause::Damage,
                });
            }
        }
    }
}
