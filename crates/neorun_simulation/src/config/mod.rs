//! Character tuning (RON)
//!
//! Значения по умолчанию:
//! walk 5 / run 8, jump 10, dash 20 × 0.2s + 1s cooldown, 100 HP, pit на y = -10.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Параметры персонажа (per-entity, как публичные поля компонента в редакторе)
#[derive(Component, Debug, Clone, PartialEq, Serialize, Deserialize, Reflect)]
#[reflect(Component)]
#[serde(default)]
pub struct CharacterConfig {
    // Movement
    pub walk_speed: f32,
    pub run_speed: f32,

    // Jump
    pub jump_force: f32,
    pub ground_check_radius: f32,

    // Climb
    pub climb_speed: f32,
    /// Длина луча вверх для поиска climbable поверхности
    pub climb_probe_distance: f32,
    /// |move.y| должен быть строго больше этого порога
    pub climb_input_threshold: f32,

    // Dash
    pub dash_force: f32,
    pub dash_duration: f32,
    pub dash_cooldown: f32,
    /// |move.x| ниже порога → dash вправо по умолчанию
    pub dash_input_threshold: f32,

    // Health / death
    pub max_health: u32,
    pub death_y_level: f32,
    pub respawn_delay: f32,

    /// Gravity scale в Normal состоянии (Climbing/Dashing → 0)
    pub gravity_scale: f32,
}

impl Default for CharacterConfig {
    fn default() -> Self {
        Self {
            walk_speed: 5.0,
            run_speed: 8.0,
            jump_force: 10.0,
            ground_check_radius: 0.2,
            climb_speed: 3.0,
            climb_probe_distance: 1.0,
            climb_input_threshold: 0.1,
            dash_force: 20.0,
            dash_duration: 0.2,
            dash_cooldown: 1.0,
            dash_input_threshold: 0.01,
            max_health: 100,
            death_y_level: -10.0,
            respawn_delay: 2.0,
            gravity_scale: 3.0,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse character config: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("invalid character config: {0}")]
    Invalid(String),
}

impl CharacterConfig {
    /// Скорость по горизонтали с учётом зажатого run
    pub fn current_speed(&self, run_held: bool) -> f32 {
        if run_held {
            self.run_speed
        } else {
            self.walk_speed
        }
    }

    /// Полная блокировка повторного dash: duration + cooldown
    pub fn dash_lockout(&self) -> f32 {
        self.dash_duration + self.dash_cooldown
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let non_negative = [
            ("walk_speed", self.walk_speed),
            ("run_speed", self.run_speed),
            ("jump_force", self.jump_force),
            ("climb_speed", self.climb_speed),
            ("climb_probe_distance", self.climb_probe_distance),
            ("climb_input_threshold", self.climb_input_threshold),
            ("dash_force", self.dash_force),
            ("dash_duration", self.dash_duration),
            ("dash_cooldown", self.dash_cooldown),
            ("dash_input_threshold", self.dash_input_threshold),
            ("respawn_delay", self.respawn_delay),
            ("gravity_scale", self.gravity_scale),
        ];

        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{} must be a finite non-negative number (got {})",
                    name, value
                )));
            }
        }

        if self.max_health == 0 {
            return Err(ConfigError::Invalid("max_health must be positive".to_string()));
        }

        if self.ground_check_radius <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "ground_check_radius must be positive (got {})",
                self.ground_check_radius
            )));
        }

        if !self.death_y_level.is_finite() {
            return Err(ConfigError::Invalid("death_y_level must be finite".to_string()));
        }

        Ok(())
    }
}

/// Парсит и валидирует config из RON строки (отсутствующие поля → defaults)
pub fn parse_character_config(source: &str) -> Result<CharacterConfig, ConfigError> {
    let config: CharacterConfig = ron::from_str(source)?;
    config.validate()?;
    Ok(config)
}

pub fn load_character_config(path: impl AsRef<Path>) -> Result<CharacterConfig, ConfigError> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;

    parse_character_config(&source)
}

/// Config для headless запуска: файл если задан и валиден, иначе defaults.
/// Результат пишется в лог, поэтому logger должен быть поставлен заранее.
pub fn load_character_config_or_default(path: Option<&str>) -> CharacterConfig {
    let Some(path) = path else {
        return CharacterConfig::default();
    };

    match load_character_config(path) {
        Ok(config) => {
            crate::log_info(&format!("Loaded character config from {}", path));
            config
        }
        Err(err) => {
            crate::log_warning(&format!("Config error ({}), using defaults", err));
            CharacterConfig::default()
        }
    }
}

#[cfg(test)]
mod config_tests;
