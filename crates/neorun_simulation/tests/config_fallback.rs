//! Загрузка config для headless запуска
//!
//! Битый/отсутствующий файл → defaults + warning в установленном logger.

use std::sync::{Arc, Mutex, OnceLock};

use neorun_simulation::logger::{set_log_level, set_logger, LogLevel, LogPrinter};
use neorun_simulation::{load_character_config_or_default, CharacterConfig};

#[derive(Clone, Default)]
struct CaptureLogger {
    lines: Arc<Mutex<Vec<(LogLevel, String)>>>,
}

impl LogPrinter for CaptureLogger {
    fn log(&self, level: LogLevel, message: &str) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push((level, message.to_string()));
        }
    }
}

impl CaptureLogger {
    fn contains(&self, level: LogLevel, needle: &str) -> bool {
        self.lines
            .lock()
            .expect("lines")
            .iter()
            .any(|(line_level, line)| *line_level == level && line.contains(needle))
    }
}

/// Logger глобальный на процесс: один общий capture на все тесты файла
fn install_capture() -> CaptureLogger {
    static CAPTURE: OnceLock<CaptureLogger> = OnceLock::new();

    CAPTURE
        .get_or_init(|| {
            let capture = CaptureLogger::default();
            set_log_level(LogLevel::Debug);
            set_logger(Box::new(capture.clone()));
            capture
        })
        .clone()
}

#[test]
fn test_fallback_warning_reaches_logger() {
    let capture = install_capture();

    let path = std::env::temp_dir().join("neorun_invalid_character.ron");
    std::fs::write(&path, "(walk_speed: -1.0)").expect("write temp config");

    let config = load_character_config_or_default(path.to_str());

    assert_eq!(config, CharacterConfig::default());
    assert!(
        capture.contains(LogLevel::Warning, "walk_speed"),
        "invalid config must be reported as a warning"
    );

    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_missing_file_falls_back_with_warning() {
    let capture = install_capture();

    let config = load_character_config_or_default(Some("/nonexistent/neorun/character.ron"));

    assert_eq!(config, CharacterConfig::default());
    assert!(capture.contains(LogLevel::Warning, "/nonexistent/neorun/character.ron"));
}

#[test]
fn test_valid_file_is_loaded_and_logged() {
    let capture = install_capture();

    let path = std::env::temp_dir().join("neorun_valid_character.ron");
    std::fs::write(&path, "(walk_speed: 6.5, max_health: 3)").expect("write temp config");

    let config = load_character_config_or_default(path.to_str());

    assert_eq!(config.walk_speed, 6.5);
    assert_eq!(config.max_health, 3);
    assert!(capture.contains(LogLevel::Info, "neorun_valid_character.ron"));

    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_no_path_uses_defaults() {
    assert_eq!(load_character_config_or_default(None), CharacterConfig::default());
}
