//! Theming system for Dojo
//!
//! One palette ships built in (Tokyo Night). A custom theme can be supplied
//! through `custom_theme` in the config file.

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// A color theme for the application
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,

    // Background colors
    pub bg_primary: Color,
    pub bg_secondary: Color,
    pub bg_tertiary: Color,

    // Foreground colors
    pub fg_primary: Color,
    pub fg_secondary: Color,
    pub fg_muted: Color,

    // Accent colors
    pub accent_primary: Color,
    pub accent_secondary: Color,

    // Answer feedback
    pub correct: Color,
    pub incorrect: Color,
    /// Countdown color once the time limit is nearly used up
    pub timer_warning: Color,
    pub error: Color,

    // UI elements
    pub border: Color,
    pub border_focused: Color,
    pub selection: Color,
    pub cursor: Color,
}

impl Theme {
    /// Built-in theme by display name, ignoring case
    pub fn by_name(name: &str) -> Option<Self> {
        let theme = Theme::tokyo_night();
        theme.name.eq_ignore_ascii_case(name.trim()).then_some(theme)
    }

    /// Tokyo Night palette
    pub fn tokyo_night() -> Self {
        Self {
            name: "Tokyo Night".to_string(),

            bg_primary: Color::Rgb(26, 27, 38),   // #1a1b26
            bg_secondary: Color::Rgb(36, 40, 59), // #24283b
            bg_tertiary: Color::Rgb(65, 72, 104), // #414868

            fg_primary: Color::Rgb(169, 177, 214),   // #a9b1d6
            fg_secondary: Color::Rgb(192, 202, 245), // #c0caf5
            fg_muted: Color::Rgb(86, 95, 137),       // #565f89

            accent_primary: Color::Rgb(122, 162, 247),   // #7aa2f7
            accent_secondary: Color::Rgb(187, 154, 247), // #bb9af7

            correct: Color::Rgb(158, 206, 106),       // #9ece6a
            incorrect: Color::Rgb(247, 118, 142),     // #f7768e
            timer_warning: Color::Rgb(224, 175, 104), // #e0af68
            error: Color::Rgb(247, 118, 142),         // #f7768e

            border: Color::Rgb(65, 72, 104),           // #414868
            border_focused: Color::Rgb(122, 162, 247), // #7aa2f7
            selection: Color::Rgb(40, 52, 87),         // #283457
            cursor: Color::Rgb(192, 202, 245),         // #c0caf5
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::tokyo_night()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_theme_is_tokyo_night() {
        let theme = Theme::default();
        assert_eq!(theme.name, "Tokyo Night");
    }

    #[test]
    fn tokyo_night_colors_are_rgb() {
        let theme = Theme::tokyo_night();
        assert!(matches!(theme.bg_primary, Color::Rgb(_, _, _)));
        assert!(matches!(theme.correct, Color::Rgb(_, _, _)));
    }

    #[test]
    fn custom_theme_deserializes() {
        let mut json = serde_json::to_value(Theme::default()).unwrap();
        json["name"] = serde_json::json!("Paper");
        let theme: Theme = serde_json::from_value(json).unwrap();
        assert_eq!(theme.name, "Paper");
    }

    #[test]
    fn built_in_lookup_by_name() {
        assert!(Theme::by_name("Tokyo Night").is_some());
        assert!(Theme::by_name(" TOKYO NIGHT ").is_some());
        assert!(Theme::by_name("Solarized").is_none());
    }
}
