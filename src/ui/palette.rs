use ratatui::{
    style::{Color, Modifier, Style},
    widgets::BorderType,
};

use crate::config::{Preferences, Theme, UiStyle};
use crate::metrics::SpeedTier;

/// Colours and decorations derived from the display preferences
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub background: Color,
    pub text: Color,
    pub muted: Color,
    pub correct: Color,
    pub incorrect: Color,
    pub incorrect_bg: Color,
    pub accent: Color,
    pub border_type: BorderType,
    pub particle_symbol: &'static str,
}

impl Palette {
    pub fn from_preferences(prefs: Preferences) -> Self {
        let mut palette = match prefs.theme {
            Theme::Dark => Self {
                background: Color::Rgb(10, 12, 16),
                text: Color::White,
                muted: Color::DarkGray,
                correct: Color::Rgb(52, 211, 153),
                incorrect: Color::Rgb(239, 68, 68),
                incorrect_bg: Color::Rgb(69, 10, 10),
                accent: Color::Rgb(168, 85, 247),
                border_type: BorderType::Plain,
                particle_symbol: "*",
            },
            Theme::Light => Self {
                background: Color::Rgb(248, 250, 252),
                text: Color::Rgb(15, 23, 42),
                muted: Color::Gray,
                correct: Color::Rgb(5, 150, 105),
                incorrect: Color::Rgb(220, 38, 38),
                incorrect_bg: Color::Rgb(254, 226, 226),
                accent: Color::Rgb(124, 58, 237),
                border_type: BorderType::Plain,
                particle_symbol: "*",
            },
        };

        if prefs.ui_style == UiStyle::Modern {
            palette.border_type = BorderType::Rounded;
            palette.particle_symbol = "✦";
        } else {
            // paper keeps to ink colours
            palette.accent = palette.text;
        }

        palette
    }

    pub fn base(&self) -> Style {
        Style::default().fg(self.text).bg(self.background)
    }

    pub fn correct(&self) -> Style {
        Style::default().fg(self.correct)
    }

    pub fn incorrect(&self) -> Style {
        Style::default()
            .fg(self.incorrect)
            .bg(self.incorrect_bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn pending(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn cursor(&self) -> Style {
        Style::default()
            .fg(self.text)
            .add_modifier(Modifier::UNDERLINED | Modifier::BOLD)
    }

    pub fn speed(&self, tier: SpeedTier) -> Color {
        match tier {
            SpeedTier::Warming => self.correct,
            SpeedTier::Steady => Color::Rgb(59, 130, 246),
            SpeedTier::Fast => Color::Rgb(139, 92, 246),
            SpeedTier::Blazing => Color::Rgb(236, 72, 153),
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::from_preferences(Preferences::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modern_uses_rounded_borders() {
        let palette = Palette::from_preferences(Preferences {
            theme: Theme::Dark,
            ui_style: UiStyle::Modern,
        });
        assert_eq!(palette.border_type, BorderType::Rounded);
        assert_ne!(palette.accent, palette.text);
    }

    #[test]
    fn test_paper_accent_is_ink() {
        let palette = Palette::from_preferences(Preferences {
            theme: Theme::Light,
            ui_style: UiStyle::Paper,
        });
        assert_eq!(palette.border_type, BorderType::Plain);
        assert_eq!(palette.accent, palette.text);
    }

    #[test]
    fn test_themes_differ() {
        let dark = Palette::from_preferences(Preferences {
            theme: Theme::Dark,
            ui_style: UiStyle::Paper,
        });
        let light = Palette::from_preferences(Preferences {
            theme: Theme::Light,
            ui_style: UiStyle::Paper,
        });
        assert_ne!(dark.background, light.background);
        assert_ne!(dark.text, light.text);
    }
}
