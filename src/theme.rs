//! Theme configuration types.
//!
//! Both enums are persisted in settings and passed explicitly to the code
//! that needs them; nothing here is process-global state.

use serde::{Deserialize, Serialize};
use two_face::theme::EmbeddedThemeName;

/// UI theme preference.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
    #[default]
    Auto,
}

impl ThemeMode {
    pub fn display_name(self) -> &'static str {
        match self {
            ThemeMode::Light => "Light",
            ThemeMode::Dark => "Dark",
            ThemeMode::Auto => "System",
        }
    }

    pub fn all() -> &'static [ThemeMode] {
        &[ThemeMode::Light, ThemeMode::Dark, ThemeMode::Auto]
    }
}

/// Syntax highlighting theme, mapped onto the embedded two-face themes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SyntaxTheme {
    #[default]
    Dracula,
    Github,
    Nord,
    OneHalfDark,
    OneHalfLight,
    SolarizedDark,
    SolarizedLight,
    MonokaiExtended,
    GruvboxDark,
    Zenburn,
}

impl SyntaxTheme {
    pub fn display_name(self) -> &'static str {
        match self {
            SyntaxTheme::Dracula => "Dracula",
            SyntaxTheme::Github => "GitHub",
            SyntaxTheme::Nord => "Nord",
            SyntaxTheme::OneHalfDark => "One Half Dark",
            SyntaxTheme::OneHalfLight => "One Half Light",
            SyntaxTheme::SolarizedDark => "Solarized Dark",
            SyntaxTheme::SolarizedLight => "Solarized Light",
            SyntaxTheme::MonokaiExtended => "Monokai",
            SyntaxTheme::GruvboxDark => "Gruvbox Dark",
            SyntaxTheme::Zenburn => "Zenburn",
        }
    }

    /// The embedded theme this setting selects.
    pub fn embedded_name(self) -> EmbeddedThemeName {
        match self {
            SyntaxTheme::Dracula => EmbeddedThemeName::Dracula,
            SyntaxTheme::Github => EmbeddedThemeName::Github,
            SyntaxTheme::Nord => EmbeddedThemeName::Nord,
            SyntaxTheme::OneHalfDark => EmbeddedThemeName::OneHalfDark,
            SyntaxTheme::OneHalfLight => EmbeddedThemeName::OneHalfLight,
            SyntaxTheme::SolarizedDark => EmbeddedThemeName::SolarizedDark,
            SyntaxTheme::SolarizedLight => EmbeddedThemeName::SolarizedLight,
            SyntaxTheme::MonokaiExtended => EmbeddedThemeName::MonokaiExtended,
            SyntaxTheme::GruvboxDark => EmbeddedThemeName::GruvboxDark,
            SyntaxTheme::Zenburn => EmbeddedThemeName::Zenburn,
        }
    }

    pub fn all() -> &'static [SyntaxTheme] {
        &[
            SyntaxTheme::Dracula,
            SyntaxTheme::Github,
            SyntaxTheme::Nord,
            SyntaxTheme::OneHalfDark,
            SyntaxTheme::OneHalfLight,
            SyntaxTheme::SolarizedDark,
            SyntaxTheme::SolarizedLight,
            SyntaxTheme::MonokaiExtended,
            SyntaxTheme::GruvboxDark,
            SyntaxTheme::Zenburn,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_mode_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&ThemeMode::Dark).unwrap(), "\"dark\"");
        let parsed: ThemeMode = serde_json::from_str("\"auto\"").unwrap();
        assert_eq!(parsed, ThemeMode::Auto);
    }

    #[test]
    fn syntax_theme_serializes_kebab_case() {
        assert_eq!(
            serde_json::to_string(&SyntaxTheme::OneHalfDark).unwrap(),
            "\"one-half-dark\""
        );
        let parsed: SyntaxTheme = serde_json::from_str("\"solarized-light\"").unwrap();
        assert_eq!(parsed, SyntaxTheme::SolarizedLight);
    }
}
