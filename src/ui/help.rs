//! Key binding overlay
//!
//! Lists every binding grouped by what it acts on. Opened and closed with '?'.

use crate::theme::Theme;
use crate::ui::product_form::centered_rect;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Keyboard shortcut binding with description
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBinding {
    pub keys: &'static str,
    pub description: &'static str,
}

/// Help section with related keyboard shortcuts
#[derive(Debug, Clone, Copy)]
pub struct HelpSection {
    pub title: &'static str,
    pub shortcuts: &'static [KeyBinding],
}

const fn bind(keys: &'static str, description: &'static str) -> KeyBinding {
    KeyBinding { keys, description }
}

pub const HELP_SECTIONS: &[HelpSection] = &[
    HelpSection {
        title: "Browse",
        shortcuts: &[
            bind("↑/↓ j/k", "Move selection"),
            bind("←/→ h/l", "Previous / next page"),
            bind("g / G", "First / last page"),
            bind("1-9", "Jump to page"),
            bind("Enter", "Product details"),
        ],
    },
    HelpSection {
        title: "View",
        shortcuts: &[
            bind("/", "Search titles"),
            bind("Ctrl-U", "Clear search"),
            bind("t", "Sort by title (again to reverse)"),
            bind("p", "Sort by price (again to reverse)"),
            bind("+ / -", "Page size"),
        ],
    },
    HelpSection {
        title: "Products",
        shortcuts: &[
            bind("n", "New product"),
            bind("e", "Edit product"),
            bind("x", "Export to CSV"),
        ],
    },
    HelpSection {
        title: "System",
        shortcuts: &[
            bind("r", "Refresh now"),
            bind("a", "Pause / resume auto-refresh"),
            bind("d", "Dismiss error"),
            bind("?", "Toggle help"),
            bind("q", "Quit"),
        ],
    },
];

/// Help overlay component
pub struct HelpOverlay;

impl HelpOverlay {
    pub fn render(frame: &mut Frame, area: Rect, theme: &Theme) {
        let line_count: usize = HELP_SECTIONS.iter().map(|s| s.shortcuts.len() + 2).sum();
        let popup = centered_rect(60, line_count as u16 + 2, area);
        frame.render_widget(Clear, popup);

        let heading = Style::default()
            .fg(theme.colors.palette.accent)
            .add_modifier(Modifier::BOLD);
        let key_style = Style::default().fg(theme.colors.palette.highlight);
        let text_style = Style::default().fg(theme.colors.palette.text_primary);

        let mut lines = Vec::new();
        for section in HELP_SECTIONS {
            lines.push(Line::from(Span::styled(section.title, heading)));
            for binding in section.shortcuts {
                lines.push(Line::from(vec![
                    Span::styled(format!("  {:<12}", binding.keys), key_style),
                    Span::styled(binding.description, text_style),
                ]));
            }
            lines.push(Line::from(""));
        }

        let help = Paragraph::new(lines).block(
            Block::default()
                .title(" Help ")
                .borders(Borders::ALL)
                .border_style(theme.border_style(true))
                .style(Style::default().bg(theme.colors.palette.surface)),
        );
        frame.render_widget(help, popup);
    }
}
