use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Color palette shared by every widget
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColorPalette {
    // Base colors
    pub background: Color,
    pub foreground: Color,
    pub surface: Color,

    // Text colors
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_muted: Color,

    // UI element colors
    pub border: Color,
    pub border_focused: Color,
    pub selection: Color,
    pub selection_text: Color,

    // Status colors
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub info: Color,

    // Special purpose colors
    pub accent: Color,
    pub highlight: Color,
}

/// Colors specific to the product table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableColors {
    pub header: Color,
    pub id: Color,
    pub title: Color,
    pub price: Color,
    pub category: Color,
    pub sort_indicator: Color,
}

/// Complete theme color scheme
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeColors {
    pub palette: ColorPalette,
    pub table: TableColors,
}

impl ThemeColors {
    pub fn professional_dark() -> Self {
        let palette = ColorPalette {
            background: Color::Rgb(16, 16, 20),
            foreground: Color::Rgb(224, 224, 230),
            surface: Color::Rgb(24, 24, 28),

            text_primary: Color::Rgb(224, 224, 230),
            text_secondary: Color::Rgb(160, 160, 168),
            text_muted: Color::Rgb(112, 112, 120),

            border: Color::Rgb(64, 64, 72),
            border_focused: Color::Rgb(88, 166, 255),
            selection: Color::Rgb(88, 166, 255),
            selection_text: Color::Rgb(16, 16, 20),

            success: Color::Rgb(76, 175, 80),
            warning: Color::Rgb(255, 193, 7),
            error: Color::Rgb(244, 67, 54),
            info: Color::Rgb(33, 150, 243),

            accent: Color::Rgb(88, 166, 255),
            highlight: Color::Rgb(255, 235, 59),
        };

        let table = TableColors {
            header: palette.accent,
            id: palette.text_muted,
            title: palette.text_primary,
            price: palette.success,
            category: palette.info,
            sort_indicator: palette.highlight,
        };

        Self { palette, table }
    }

    pub fn high_contrast() -> Self {
        let palette = ColorPalette {
            background: Color::Black,
            foreground: Color::White,
            surface: Color::Rgb(32, 32, 32),

            text_primary: Color::White,
            text_secondary: Color::Rgb(200, 200, 200),
            text_muted: Color::Rgb(160, 160, 160),

            border: Color::Rgb(128, 128, 128),
            border_focused: Color::Yellow,
            selection: Color::Yellow,
            selection_text: Color::Black,

            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
            info: Color::Cyan,

            accent: Color::Yellow,
            highlight: Color::Magenta,
        };

        let table = TableColors {
            header: Color::Yellow,
            id: Color::White,
            title: Color::White,
            price: Color::Green,
            category: Color::Cyan,
            sort_indicator: Color::Magenta,
        };

        Self { palette, table }
    }

    pub fn gruvbox_dark() -> Self {
        let palette = ColorPalette {
            background: Color::Rgb(40, 40, 40), // #282828 - dark0
            foreground: Color::Rgb(235, 219, 178), // #ebdbb2 - light1
            surface: Color::Rgb(60, 56, 54),    // #3c3836 - dark1

            text_primary: Color::Rgb(235, 219, 178), // #ebdbb2 - light1
            text_secondary: Color::Rgb(213, 196, 161), // #d5c4a1 - light2
            text_muted: Color::Rgb(189, 174, 147),   // #bdae93 - light3

            border: Color::Rgb(102, 92, 84), // #665c54 - dark4
            border_focused: Color::Rgb(131, 165, 152), // #83a598 - bright_blue
            selection: Color::Rgb(131, 165, 152), // #83a598 - bright_blue
            selection_text: Color::Rgb(40, 40, 40), // #282828 - dark0

            success: Color::Rgb(152, 151, 26), // #98971a - bright_green
            warning: Color::Rgb(215, 153, 33), // #d79921 - bright_yellow
            error: Color::Rgb(204, 36, 29),    // #cc241d - bright_red
            info: Color::Rgb(131, 165, 152),   // #83a598 - bright_blue

            accent: Color::Rgb(254, 128, 25),   // #fe8019 - bright_orange
            highlight: Color::Rgb(250, 189, 47), // #fabd2f - yellow
        };

        let table = TableColors {
            header: palette.accent,
            id: palette.text_muted,
            title: palette.text_primary,
            price: Color::Rgb(184, 187, 38), // #b8bb26 - green
            category: Color::Rgb(211, 134, 155), // #d3869b - purple
            sort_indicator: palette.highlight,
        };

        Self { palette, table }
    }
}
