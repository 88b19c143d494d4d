//! Input domain: сигналы игрока
//!
//! Хост (окно, тест, scripted driver) шлёт `PlayerInputEvent`,
//! `apply_input_events` сворачивает их в `PlayerInput` компонент персонажа.
//!
//! - Level-triggered: move axis, run hold
//! - Edge-triggered: jump press, dash press (consume через `take_*`)

use bevy::prelude::*;

pub mod scripted;

pub use scripted::{drive_scripted_input, InputScript, ScriptedInputPlugin};

/// Сигнал от input source (callback shape исходной схемы биндингов)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputSignal {
    MovePerformed(Vec2),
    MoveCanceled,
    JumpPressed,
    RunHeld(bool),
    DashPressed,
}

/// Event: input для конкретного персонажа
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct PlayerInputEvent {
    pub entity: Entity,
    pub signal: InputSignal,
}

impl PlayerInputEvent {
    pub fn new(entity: Entity, signal: InputSignal) -> Self {
        Self { entity, signal }
    }
}

/// Состояние input персонажа
///
/// Disabled (смерть) → все сигналы игнорируются, held-состояние сброшено
/// (как canceled callback при выключении action map).
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct PlayerInput {
    pub move_axis: Vec2,
    pub run_held: bool,
    enabled: bool,
    jump_pressed: bool,
    dash_pressed: bool,
}

impl Default for PlayerInput {
    fn default() -> Self {
        Self {
            move_axis: Vec2::ZERO,
            run_held: false,
            enabled: true,
            jump_pressed: false,
            dash_pressed: false,
        }
    }
}

impl PlayerInput {
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn apply(&mut self, signal: InputSignal) {
        if !self.enabled {
            return;
        }

        match signal {
            InputSignal::MovePerformed(axis) => self.move_axis = axis,
            InputSignal::MoveCanceled => self.move_axis = Vec2::ZERO,
            InputSignal::JumpPressed => self.jump_pressed = true,
            InputSignal::RunHeld(held) => self.run_held = held,
            InputSignal::DashPressed => self.dash_pressed = true,
        }
    }

    /// Consume jump edge (true максимум один раз на нажатие)
    pub fn take_jump(&mut self) -> bool {
        std::mem::take(&mut self.jump_pressed)
    }

    pub fn take_dash(&mut self) -> bool {
        std::mem::take(&mut self.dash_pressed)
    }

    pub fn disable(&mut self) {
        *self = Self {
            enabled: false,
            ..Self::default()
        };
    }

    pub fn enable(&mut self) {
        self.enabled = true;
    }
}

/// Система: PlayerInputEvent → PlayerInput
pub fn apply_input_events(
    mut events: EventReader<PlayerInputEvent>,
    mut inputs: Query<&mut PlayerInput>,
) {
    for event in events.read() {
        if let Ok(mut input) = inputs.get_mut(event.entity) {
            input.apply(event.signal);
        }
    }
}
