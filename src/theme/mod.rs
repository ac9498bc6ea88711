pub mod color;

use ratatui::style::{Modifier, Style};
use serde::{Deserialize, Serialize};

pub use color::{ColorPalette, TableColors, ThemeColors};

/// Main theme management structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub description: String,
    pub colors: ThemeColors,
}

impl Theme {
    /// Create a new professional dark theme
    pub fn professional_dark() -> Self {
        Self {
            name: "Professional Dark".to_string(),
            description: "Clean, minimalistic dark theme for professional use".to_string(),
            colors: ThemeColors::professional_dark(),
        }
    }

    /// Create a high contrast theme for accessibility
    pub fn high_contrast() -> Self {
        Self {
            name: "High Contrast".to_string(),
            description: "High contrast theme for better accessibility".to_string(),
            colors: ThemeColors::high_contrast(),
        }
    }

    /// Create a Gruvbox dark theme
    pub fn gruvbox_dark() -> Self {
        Self {
            name: "Gruvbox Dark".to_string(),
            description: "Retro groove dark theme with warm, earthy colors".to_string(),
            colors: ThemeColors::gruvbox_dark(),
        }
    }

    /// Look a theme up by its config name, falling back to Gruvbox Dark
    pub fn by_name(name: &str) -> Self {
        match name.to_lowercase().replace(['-', ' '], "_").as_str() {
            "professional_dark" => Self::professional_dark(),
            "high_contrast" => Self::high_contrast(),
            "gruvbox_dark" => Self::gruvbox_dark(),
            other => {
                tracing::warn!("Unknown theme '{}', using Gruvbox Dark", other);
                Self::gruvbox_dark()
            }
        }
    }

    /// Border style, highlighted when focused
    pub fn border_style(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.colors.palette.border_focused)
        } else {
            Style::default().fg(self.colors.palette.border)
        }
    }

    /// Style for the selected table row
    pub fn selection_style(&self) -> Style {
        Style::default()
            .bg(self.colors.palette.selection)
            .fg(self.colors.palette.selection_text)
            .add_modifier(Modifier::BOLD)
    }

    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.colors.palette.text_muted)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::gruvbox_dark()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_lookup() {
        assert_eq!(Theme::by_name("high-contrast").name, "High Contrast");
        assert_eq!(Theme::by_name("Professional Dark").name, "Professional Dark");
        assert_eq!(Theme::by_name("nope").name, "Gruvbox Dark");
    }
}
