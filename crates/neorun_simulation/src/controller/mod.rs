//! Character controller domain
//!
//! - locomotion: per-frame FSM (climb, jump, facing, fall death, dash trigger)
//!   + movement intent в FixedUpdate
//! - dash: dash sequence (start + EndDash/RestoreDash шаги)
//! - legacy: старый left/right/jump контроллер

use bevy::prelude::*;

use crate::SimulationSet;

pub mod dash;
pub mod legacy;
pub mod locomotion;

#[cfg(test)]
mod dash_tests;

pub use dash::{dash_direction, handle_dash_steps, start_dash};
pub use legacy::{ground_legacy_on_trigger, legacy_horizontal_velocity, update_legacy_controller, LegacyController};
pub use locomotion::{
    apply_movement_intent, climb_transition, facing_for_input, try_jump, update_character_state,
};

/// Controller Plugin
///
/// Update:
/// 1. handle_dash_steps (Steps): EndDash/RestoreDash
/// 2. update_character_state + update_legacy_controller (Control)
/// 3. ground_legacy_on_trigger (Triggers)
///
/// FixedUpdate:
/// - apply_movement_intent (Intent): до physics integration
pub struct ControllerPlugin;

impl Plugin for ControllerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, handle_dash_steps.in_set(SimulationSet::Steps))
            .add_systems(
                Update,
                (update_character_state, update_legacy_controller).in_set(SimulationSet::Control),
            )
            .add_systems(Update, ground_legacy_on_trigger.in_set(SimulationSet::Triggers))
            .add_systems(FixedUpdate, apply_movement_intent.in_set(SimulationSet::Intent));
    }
}
