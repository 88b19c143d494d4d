//! Per-frame state machine: climb, jump, facing, fall death, dash trigger.

use bevy::prelude::*;

use super::dash::start_dash;
use crate::combat::{DeathCause, DeathRequest};
use crate::components::{CharacterBody, CharacterState, DashAbility, Facing, Senses};
use crate::config::CharacterConfig;
use crate::input::PlayerInput;
use crate::sequence::Sequences;

/// Порог |input.x| для flip (мгновенный, без интерполяции)
pub const FACING_THRESHOLD: f32 = 0.01;

/// Normal ⇄ Climbing. Другие состояния не трогает.
pub fn climb_transition(
    state: CharacterState,
    climbable_ahead: bool,
    move_y: f32,
    threshold: f32,
) -> CharacterState {
    let wants_climb = climbable_ahead && move_y.abs() > threshold;

    match state {
        CharacterState::Normal if wants_climb => CharacterState::Climbing,
        CharacterState::Climbing if !wants_climb => CharacterState::Normal,
        other => other,
    }
}

pub fn facing_for_input(current: Facing, move_x: f32) -> Facing {
    if move_x > FACING_THRESHOLD {
        Facing::Right
    } else if move_x < -FACING_THRESHOLD {
        Facing::Left
    } else {
        current
    }
}

/// Jump impulse: vy = jump_force (не аддитивно). Только grounded и не climbing.
pub fn try_jump(state: CharacterState, grounded: bool, body: &mut CharacterBody, jump_force: f32) -> bool {
    if state != CharacterState::Normal || !grounded {
        return false;
    }
    body.velocity.y = jump_force;
    true
}

pub fn is_below_death_level(position: Vec3, death_y_level: f32) -> bool {
    position.y <= death_y_level
}

/// Система: per-frame update персонажа (Update)
///
/// Dead → пропуск целиком. Dashing → только facing и fall check
/// (velocity locked, edges выбрасываются).
pub fn update_character_state(
    mut query: Query<(
        Entity,
        &Transform,
        &Senses,
        &CharacterConfig,
        &mut CharacterState,
        &mut CharacterBody,
        &mut PlayerInput,
        &mut Facing,
        &mut DashAbility,
        &mut Sequences,
    )>,
    mut deaths: EventWriter<DeathRequest>,
) {
    for (
        entity,
        transform,
        senses,
        config,
        mut state,
        mut body,
        mut input,
        mut facing,
        mut dash,
        mut sequences,
    ) in query.iter_mut()
    {
        if state.is_dead() {
            continue;
        }

        let new_facing = facing_for_input(*facing, input.move_axis.x);
        if *facing != new_facing {
            *facing = new_facing;
        }

        // Pitfall: независимо от Health
        if is_below_death_level(transform.translation, config.death_y_level) {
            crate::log(&format!("Pitfall: {:?} fell below y = {}", entity, config.death_y_level));
            deaths.write(DeathRequest {
                entity,
                cause: DeathCause::Fall,
            });
            continue;
        }

        let jump_pressed = input.take_jump();
        let dash_pressed = input.take_dash();

        if !state.accepts_control() {
            continue;
        }

        let next = climb_transition(
            *state,
            senses.climbable_ahead,
            input.move_axis.y,
            config.climb_input_threshold,
        );
        if next != *state {
            crate::log(&format!("{:?}: {} → {}", entity, state.label(), next.label()));
            *state = next;
        }

        if jump_pressed {
            try_jump(*state, senses.grounded, &mut body, config.jump_force);
        }

        if dash_pressed
            && start_dash(
                &mut state,
                &mut dash,
                &mut body,
                &mut sequences,
                config,
                input.move_axis.x,
            )
        {
            crate::log(&format!("💨 {:?} dash → {:?}", entity, body.velocity));
        }
    }
}

/// Система: movement intent → CharacterBody (FixedUpdate)
///
/// Normal: gravity on, vx из input, vy не трогаем (гравитация).
/// Climbing: gravity 0, vx и vy из input.
/// Dashing/Dead: ничего не делаем.
pub fn apply_movement_intent(
    mut query: Query<(&CharacterState, &PlayerInput, &CharacterConfig, &mut CharacterBody)>,
) {
    for (state, input, config, mut body) in query.iter_mut() {
        let speed = config.current_speed(input.run_held);

        match state {
            CharacterState::Normal => {
                body.gravity_scale = config.gravity_scale;
                body.velocity.x = input.move_axis.x * speed;
            }
            CharacterState::Climbing => {
                body.gravity_scale = 0.0;
                body.velocity = Vec2::new(
                    input.move_axis.x * speed,
                    input.move_axis.y * config.climb_speed,
                );
            }
            CharacterState::Dashing(_) | CharacterState::Dead(_) => {}
        }
    }
}
