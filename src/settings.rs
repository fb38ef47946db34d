//! Persisted application settings.
//!
//! Load-at-start, write-on-change: callers read an [`AppSettings`] value
//! once, mutate it, and call [`save_settings`]. The file lives under the
//! platform config directory and is written 0o600 because it can hold the
//! user's API token. Loading is resilient: a direct parse first, then a
//! field-by-field salvage of whatever survives in a damaged file, then
//! defaults.

use crate::theme::{SyntaxTheme, ThemeMode};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Current settings schema version - increment when making breaking changes
pub const SETTINGS_VERSION: u32 = 1;

fn default_settings_version() -> u32 {
    SETTINGS_VERSION
}

/// App settings persisted as JSON.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AppSettings {
    /// Settings schema version for migration support
    #[serde(default = "default_settings_version")]
    pub version: u32,
    #[serde(default)]
    pub theme_mode: ThemeMode,
    #[serde(default)]
    pub syntax_theme: SyntaxTheme,
    /// Personal access token for the hosting provider, if configured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_token: Option<String>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            version: SETTINGS_VERSION,
            theme_mode: ThemeMode::default(),
            syntax_theme: SyntaxTheme::default(),
            github_token: None,
        }
    }
}

/// Get the config directory path
pub fn get_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("repolens")
}

/// Get the settings file path
pub fn get_settings_path() -> PathBuf {
    get_config_dir().join("settings.json")
}

/// Load app settings from disk with recovery and migration support.
pub fn load_settings() -> AppSettings {
    load_settings_from(&get_settings_path())
}

pub(crate) fn load_settings_from(path: &Path) -> AppSettings {
    if !path.exists() {
        log::info!("Settings file not found at {}, using defaults", path.display());
        return AppSettings::default();
    }

    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            log::error!("Failed to read settings file {}: {}", path.display(), e);
            return AppSettings::default();
        }
    };

    // Fast path for a valid file.
    match serde_json::from_str::<AppSettings>(&content) {
        Ok(settings) => return migrate_settings(settings),
        Err(e) => {
            log::warn!("Failed to parse settings directly: {}, attempting partial recovery", e);
        }
    }

    match recover_settings_from_json(&content) {
        Ok(settings) => migrate_settings(settings),
        Err(e) => {
            log::error!("Settings recovery failed: {}, using defaults", e);
            AppSettings::default()
        }
    }
}

/// Salvage individual fields from a file that no longer parses as a whole.
fn recover_settings_from_json(content: &str) -> Result<AppSettings> {
    let value: serde_json::Value = serde_json::from_str(content)?;
    let mut settings = AppSettings::default();

    if let Some(version) = value.get("version").and_then(|v| v.as_u64()) {
        settings.version = version as u32;
    }
    if let Some(mode) = value
        .get("theme_mode")
        .and_then(|v| serde_json::from_value(v.clone()).ok())
    {
        settings.theme_mode = mode;
    }
    if let Some(theme) = value
        .get("syntax_theme")
        .and_then(|v| serde_json::from_value(v.clone()).ok())
    {
        settings.syntax_theme = theme;
    }
    if let Some(token) = value.get("github_token").and_then(|v| v.as_str()) {
        settings.github_token = Some(token.to_string());
    }

    Ok(settings)
}

/// Bring an older settings file up to the current schema.
fn migrate_settings(mut settings: AppSettings) -> AppSettings {
    if settings.version < SETTINGS_VERSION {
        log::info!(
            "Migrating settings from version {} to {}",
            settings.version,
            SETTINGS_VERSION
        );
        settings.version = SETTINGS_VERSION;
    }
    settings
}

/// Save app settings to disk.
pub fn save_settings(settings: &AppSettings) -> Result<()> {
    save_settings_to(&get_settings_path(), settings)
}

pub(crate) fn save_settings_to(path: &Path, settings: &AppSettings) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let content = serde_json::to_string_pretty(settings)?;
    std::fs::write(path, content)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let _ = std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::{SyntaxTheme, ThemeMode};

    #[test]
    fn round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let settings = AppSettings {
            version: SETTINGS_VERSION,
            theme_mode: ThemeMode::Dark,
            syntax_theme: SyntaxTheme::Nord,
            github_token: Some("ghp_test".into()),
        };
        save_settings_to(&path, &settings).unwrap();

        let loaded = load_settings_from(&path);
        assert_eq!(loaded.theme_mode, ThemeMode::Dark);
        assert_eq!(loaded.syntax_theme, SyntaxTheme::Nord);
        assert_eq!(loaded.github_token.as_deref(), Some("ghp_test"));
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load_settings_from(&dir.path().join("nope.json"));
        assert_eq!(loaded.theme_mode, ThemeMode::Auto);
        assert!(loaded.github_token.is_none());
    }

    #[test]
    fn salvages_valid_fields_from_damaged_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        // theme_mode holds garbage; the rest should survive.
        std::fs::write(
            &path,
            r#"{"version":1,"theme_mode":123,"syntax_theme":"zenburn","github_token":"tok"}"#,
        )
        .unwrap();

        let loaded = load_settings_from(&path);
        assert_eq!(loaded.theme_mode, ThemeMode::Auto);
        assert_eq!(loaded.syntax_theme, SyntaxTheme::Zenburn);
        assert_eq!(loaded.github_token.as_deref(), Some("tok"));
    }

    #[test]
    fn unparseable_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "not json at all").unwrap();
        let loaded = load_settings_from(&path);
        assert_eq!(loaded.syntax_theme, SyntaxTheme::Dracula);
    }

    #[test]
    fn token_is_omitted_from_json_when_unset() {
        let json = serde_json::to_string(&AppSettings::default()).unwrap();
        assert!(!json.contains("github_token"));
    }

    #[cfg(unix)]
    #[test]
    fn settings_file_is_private() {
        use std::os::unix::fs::PermissionsExt;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        save_settings_to(&path, &AppSettings::default()).unwrap();
        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
