use std::path::{Path, PathBuf};

use crossterm::event::KeyCode;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub colors: ColorsConfig,
    pub keybinds: KeybindsConfig,
    pub kill: KillConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub default_sort: String,
    /// JSON span log, written only when built with `perf-tracing`.
    pub trace_file: Option<PathBuf>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        GeneralConfig {
            default_sort: "cpu".to_string(),
            trace_file: None,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ColorsConfig {
    pub theme: String,
}

impl Default for ColorsConfig {
    fn default() -> Self {
        ColorsConfig {
            theme: "dark".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct KeybindsConfig {
    pub quit: String,
    pub sort_cpu: String,
    pub sort_memory: String,
    pub sort_pid: String,
    pub kill: String,
}

impl Default for KeybindsConfig {
    fn default() -> Self {
        KeybindsConfig {
            quit: "q".to_string(),
            sort_cpu: "c".to_string(),
            sort_memory: "m".to_string(),
            sort_pid: "p".to_string(),
            kill: "k".to_string(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct KillConfig {
    /// Show the outcome of a terminate request in the message line instead of
    /// dropping it.
    pub report_result: bool,
}

pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("sysmon").join("config.toml"))
}

pub fn load_config() -> Config {
    match config_path() {
        Some(path) if path.exists() => load_config_from_path(&path),
        _ => Config::default(),
    }
}

pub fn load_config_from_path(path: &Path) -> Config {
    match std::fs::read_to_string(path) {
        Ok(contents) => toml::from_str(&contents).unwrap_or_default(),
        Err(_) => Config::default(),
    }
}

pub fn parse_key(s: &str) -> Option<KeyCode> {
    match s {
        "Enter" => Some(KeyCode::Enter),
        "Esc" | "Escape" => Some(KeyCode::Esc),
        "Tab" => Some(KeyCode::Tab),
        "Backspace" => Some(KeyCode::Backspace),
        "Space" => Some(KeyCode::Char(' ')),
        _ => {
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Some(KeyCode::Char(c)),
                _ => None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let config = Config::default();
        assert_eq!(config.general.default_sort, "cpu");
        assert!(config.general.trace_file.is_none());
        assert_eq!(config.colors.theme, "dark");
        assert_eq!(config.keybinds.quit, "q");
        assert_eq!(config.keybinds.kill, "k");
        assert!(!config.kill.report_result);
    }

    #[test]
    fn parse_partial_toml() {
        let toml_str = r#"
[general]
default_sort = "memory"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.default_sort, "memory");
        // Other fields should be defaults
        assert_eq!(config.colors.theme, "dark");
        assert_eq!(config.keybinds.sort_pid, "p");
    }

    #[test]
    fn parse_full_toml() {
        let toml_str = r#"
[general]
default_sort = "pid"
trace_file = "/tmp/sysmon-trace.jsonl"

[colors]
theme = "light"

[keybinds]
quit = "x"
kill = "K"

[kill]
report_result = true
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.default_sort, "pid");
        assert_eq!(
            config.general.trace_file.as_deref(),
            Some(Path::new("/tmp/sysmon-trace.jsonl"))
        );
        assert_eq!(config.colors.theme, "light");
        assert_eq!(config.keybinds.quit, "x");
        assert_eq!(config.keybinds.kill, "K");
        assert!(config.kill.report_result);
    }

    #[test]
    fn missing_file_returns_default() {
        let config = load_config_from_path(Path::new("/nonexistent/path/config.toml"));
        assert_eq!(config.general.default_sort, "cpu");
    }

    #[test]
    fn invalid_toml_returns_default() {
        let temp = std::env::temp_dir().join("sysmon_test_invalid.toml");
        std::fs::write(&temp, "this is not valid toml {{{{").unwrap();
        let config = load_config_from_path(&temp);
        assert_eq!(config.general.default_sort, "cpu");
        let _ = std::fs::remove_file(&temp);
    }

    #[test]
    fn parse_key_names_and_chars() {
        assert_eq!(parse_key("q"), Some(KeyCode::Char('q')));
        assert_eq!(parse_key("Escape"), Some(KeyCode::Esc));
        assert_eq!(parse_key("Space"), Some(KeyCode::Char(' ')));
        assert_eq!(parse_key("nope"), None);
        assert_eq!(parse_key(""), None);
    }
}
