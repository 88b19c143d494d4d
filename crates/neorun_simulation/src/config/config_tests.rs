//! Tests for character config loading.

#[cfg(test)]
mod tests {
    use crate::config::{
        load_character_config, parse_character_config, CharacterConfig, ConfigError,
    };

    #[test]
    fn test_defaults_are_valid() {
        let config = CharacterConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_health, 100);
        assert_eq!(config.respawn_delay, 2.0);
        assert!((config.dash_lockout() - 1.2).abs() < 1e-6);
    }

    #[test]
    fn test_current_speed_toggles_with_run() {
        let config = CharacterConfig::default();
        assert_eq!(config.current_speed(false), 5.0);
        assert_eq!(config.current_speed(true), 8.0);
    }

    #[test]
    fn test_partial_ron_keeps_defaults() {
        let config = parse_character_config("(walk_speed: 6.5, dash_cooldown: 0.5)").unwrap();

        assert_eq!(config.walk_speed, 6.5);
        assert_eq!(config.dash_cooldown, 0.5);
        // Остальное из Default
        assert_eq!(config.run_speed, 8.0);
        assert_eq!(config.death_y_level, -10.0);
    }

    #[test]
    fn test_named_struct_ron() {
        let config = parse_character_config("CharacterConfig(max_health: 3, death_y_level: -50.0)").unwrap();
        assert_eq!(config.max_health, 3);
        assert_eq!(config.death_y_level, -50.0);
    }

    #[test]
    fn test_malformed_ron_is_parse_error() {
        let err = parse_character_config("(walk_speed: )").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)), "err = {}", err);
    }

    #[test]
    fn test_negative_duration_rejected() {
        let err = parse_character_config("(dash_duration: -0.1)").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)), "err = {}", err);
    }

    #[test]
    fn test_zero_max_health_rejected() {
        let config = CharacterConfig {
            max_health: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_character_config("/definitely/not/here/neo.ron").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }), "err = {}", err);
    }
}
