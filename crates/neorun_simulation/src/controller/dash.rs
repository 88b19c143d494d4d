//! Dash sequence
//!
//! Двухступенчатый таймер:
//! 1. `dash_duration`: velocity locked, gravity 0, state = Dashing
//! 2. `dash_cooldown` (от КОНЦА dash): state = Normal, но can_dash = false
//!
//! Итого повторный dash возможен через dash_duration + dash_cooldown.

use bevy::prelude::*;

use crate::components::{CharacterBody, CharacterState, DashAbility, DashState};
use crate::config::CharacterConfig;
use crate::sequence::{SequenceStep, SequenceStepDue, Sequences};

/// Направление dash: горизонтальный input, иначе вправо
pub fn dash_direction(move_x: f32, threshold: f32) -> Vec2 {
    if move_x.abs() > threshold {
        Vec2::new(move_x, 0.0).normalize_or(Vec2::X)
    } else {
        Vec2::X
    }
}

/// Старт dash. false если can_dash == false или состояние не позволяет.
pub fn start_dash(
    state: &mut CharacterState,
    ability: &mut DashAbility,
    body: &mut CharacterBody,
    sequences: &mut Sequences,
    config: &CharacterConfig,
    move_x: f32,
) -> bool {
    if !ability.can_dash || !state.accepts_control() {
        return false;
    }

    let direction = dash_direction(move_x, config.dash_input_threshold);

    ability.can_dash = false;
    *state = CharacterState::Dashing(DashState {
        direction,
        elapsed: 0.0,
    });

    // Velocity выставляется один раз и держится всё окно
    body.velocity = direction * config.dash_force;
    body.gravity_scale = 0.0;

    sequences.schedule_after(config.dash_duration, SequenceStep::EndDash);
    true
}

/// Система: EndDash / RestoreDash шаги
///
/// EndDash при Dead не возвращает Normal (смерть важнее), но cooldown
/// всё равно стартует: таймеры доходят до конца.
pub fn handle_dash_steps(
    mut steps: EventReader<SequenceStepDue>,
    mut query: Query<(
        &mut CharacterState,
        &mut DashAbility,
        &mut Sequences,
        &CharacterConfig,
    )>,
) {
    for due in steps.read() {
        let Ok((mut state, mut ability, mut sequences, config)) = query.get_mut(due.entity) else {
            continue;
        };

        match due.step {
            SequenceStep::EndDash => {
                if state.is_dashing() {
                    *state = CharacterState::Normal;
                }
                sequences.schedule_after(config.dash_cooldown, SequenceStep::RestoreDash);
            }
            SequenceStep::RestoreDash => {
                ability.can_dash = true;
                crate::log(&format!("{:?}: dash ready", due.entity));
            }
            SequenceStep::Respawn => {}
        }
    }
}
