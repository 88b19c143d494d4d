//! Movement компоненты: тело, facing, ground check, senses

use bevy::prelude::*;

/// Физическое тело персонажа (backend-agnostic)
///
/// Архитектура:
/// - Controller системы пишут velocity/gravity_scale (intent)
/// - Physics backend (headless `StaticLevel` или rapier adapter) применяет их
/// - `simulated == false` → тело заморожено (Dead), backend его не двигает
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct CharacterBody {
    pub velocity: Vec2,
    pub gravity_scale: f32,
    pub simulated: bool,
}

impl Default for CharacterBody {
    fn default() -> Self {
        Self {
            velocity: Vec2::ZERO,
            gravity_scale: 3.0,
            simulated: true,
        }
    }
}

impl CharacterBody {
    /// Полная остановка (смерть)
    pub fn freeze(&mut self) {
        self.velocity = Vec2::ZERO;
        self.simulated = false;
    }

    pub fn unfreeze(&mut self) {
        self.simulated = true;
    }
}

/// Коллайдер персонажа (AABB half extents) для headless backend
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct BodyShape {
    pub half_size: Vec2,
}

impl Default for BodyShape {
    fn default() -> Self {
        Self {
            half_size: Vec2::new(0.4, 0.9),
        }
    }
}

/// Куда смотрит персонаж (мгновенный flip по знаку input.x)
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
#[reflect(Component)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    pub fn sign(&self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }
}

/// Точка проверки земли (offset от центра персонажа)
///
/// Опциональный компонент: без него персонаж никогда не grounded.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct GroundCheck {
    pub offset: Vec2,
}

impl Default for GroundCheck {
    fn default() -> Self {
        Self {
            offset: Vec2::new(0.0, -0.9), // У ног при BodyShape по умолчанию
        }
    }
}

/// Результаты physics queries за текущий frame
///
/// Пишется sensing системой backend'а, читается controller'ом.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
#[reflect(Component)]
pub struct Senses {
    pub grounded: bool,
    pub climbable_ahead: bool,
}
