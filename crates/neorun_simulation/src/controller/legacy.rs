//! Legacy controller (первая версия движения, до FSM)
//!
//! Left/Right + jump, без бега/лазания/dash/здоровья.
//! Grounded выставляется любым trigger enter и сбрасывается прыжком.

use bevy::prelude::*;

use crate::components::{BodyShape, CharacterBody};
use crate::input::PlayerInput;
use crate::triggers::{TriggerContacts, TriggerEntered};

#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
#[require(Transform, CharacterBody, BodyShape, PlayerInput, TriggerContacts)]
pub struct LegacyController {
    pub speed: f32,
    pub jump: f32,
    pub grounded: bool,
}

impl Default for LegacyController {
    fn default() -> Self {
        Self {
            speed: 5.0,
            jump: 10.0,
            grounded: true,
        }
    }
}

/// Горизонтальная скорость: right перекрывает left, иначе стоим
pub fn legacy_horizontal_velocity(speed: f32, move_x: f32) -> f32 {
    let mut velocity = 0.0;
    if move_x < 0.0 {
        velocity = -speed;
    }
    if move_x > 0.0 {
        velocity = speed;
    }
    velocity
}

/// Система: legacy движение (Update, пишет velocity напрямую)
pub fn update_legacy_controller(
    mut query: Query<(&mut LegacyController, &mut PlayerInput, &mut CharacterBody)>,
) {
    for (mut controller, mut input, mut body) in query.iter_mut() {
        if input.take_jump() && controller.grounded {
            body.velocity.y = controller.jump;
            controller.grounded = false;
        }
        // Dash у legacy нет: просто выбрасываем edge
        input.take_dash();

        body.velocity.x = legacy_horizontal_velocity(controller.speed, input.move_axis.x);
    }
}

/// Система: любой trigger enter → grounded
pub fn ground_legacy_on_trigger(
    mut events: EventReader<TriggerEntered>,
    mut query: Query<&mut LegacyController>,
) {
    for event in events.read() {
        if let Ok(mut controller) = query.get_mut(event.character) {
            controller.grounded = true;
        }
    }
}
