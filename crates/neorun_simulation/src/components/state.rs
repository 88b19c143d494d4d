//! Character FSM: Normal / Climbing / Dashing / Dead

use bevy::prelude::*;

/// Состояние персонажа (ровно одно активно в любой момент)
///
/// Переходы:
/// - Normal ⇄ Climbing (climbable поверхность + вертикальный input)
/// - Normal/Climbing → Dashing (dash press при `DashAbility::can_dash`)
/// - Dashing → Normal (через `dash_duration`, шаг `SequenceStep::EndDash`)
/// - любое живое → Dead (урон до 0, hazard, падение ниже `death_y_level`)
/// - Dead → Normal (только через `SequenceStep::Respawn`)
#[derive(Component, Debug, Clone, Copy, PartialEq, Default, Reflect)]
#[reflect(Component)]
pub enum CharacterState {
    #[default]
    Normal,
    Climbing,
    Dashing(DashState),
    Dead(RespawnState),
}

impl CharacterState {
    pub fn is_dead(&self) -> bool {
        matches!(self, Self::Dead(_))
    }

    pub fn is_dashing(&self) -> bool {
        matches!(self, Self::Dashing(_))
    }

    pub fn is_climbing(&self) -> bool {
        matches!(self, Self::Climbing)
    }

    /// Normal/Climbing: per-frame управление (jump, move, climb) активно
    pub fn accepts_control(&self) -> bool {
        matches!(self, Self::Normal | Self::Climbing)
    }

    /// Для логов и snapshot'ов
    pub fn label(&self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Climbing => "Climbing",
            Self::Dashing(_) => "Dashing",
            Self::Dead(_) => "Dead",
        }
    }
}

/// Transient данные dash (живут только внутри `CharacterState::Dashing`)
#[derive(Debug, Clone, Copy, PartialEq, Default, Reflect)]
pub struct DashState {
    /// Unit vector, захвачен в момент старта dash
    pub direction: Vec2,
    pub elapsed: f32,
}

/// Transient данные смерти (живут только внутри `CharacterState::Dead`)
#[derive(Debug, Clone, Copy, PartialEq, Default, Reflect)]
pub struct RespawnState {
    pub elapsed: f32,
}

/// Разрешение на dash
///
/// false на время dash + cooldown (двухступенчатый таймер).
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct DashAbility {
    pub can_dash: bool,
}

impl Default for DashAbility {
    fn default() -> Self {
        Self { can_dash: true }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_default_is_normal() {
        let state = CharacterState::default();
        assert_eq!(state, CharacterState::Normal);
        assert!(state.accepts_control());
    }

    #[test]
    fn test_state_predicates() {
        let dashing = CharacterState::Dashing(DashState {
            direction: Vec2::X,
            elapsed: 0.0,
        });
        assert!(dashing.is_dashing());
        assert!(!dashing.accepts_control());

        let dead = CharacterState::Dead(RespawnState::default());
        assert!(dead.is_dead());
        assert!(!dead.accepts_control());
        assert_eq!(dead.label(), "Dead");

        assert!(CharacterState::Climbing.accepts_control());
    }
}
