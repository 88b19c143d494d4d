//! Player control marker component
//!
//! Отмечает entity которым управляет игрок через `PlayerInputEvent`.

use bevy::prelude::*;

use super::{BodyShape, CharacterBody, CharacterState, DashAbility, Facing, Health, RespawnPoint, Senses};
use crate::config::CharacterConfig;
use crate::input::PlayerInput;
use crate::sequence::Sequences;
use crate::triggers::TriggerContacts;

/// Marker component для player-controlled персонажа
///
/// Через Required Components тянет весь набор controller'а.
/// `GroundCheck` НЕ обязателен: без него персонаж никогда не grounded.
///
/// # Single-player
/// Один экземпляр на игровую сессию.
#[derive(Component, Debug, Clone, Copy, Default)]
#[require(
    Transform,
    Health,
    CharacterState,
    DashAbility,
    CharacterBody,
    BodyShape,
    Facing,
    Senses,
    RespawnPoint,
    CharacterConfig,
    PlayerInput,
    Sequences,
    TriggerContacts
)]
pub struct Player;
