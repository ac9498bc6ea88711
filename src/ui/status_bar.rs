use crate::tea::model::ViewMode;
use crate::theme::Theme;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Trait for status bar segments that can be rendered
pub trait StatusSegment {
    /// Get the content to display in this segment
    fn content(&self) -> String;

    /// Get the priority of this segment (higher = more important)
    fn priority(&self) -> u8;

    /// Whether this segment should be visible
    fn is_visible(&self) -> bool {
        true
    }

    /// Get custom styling for this segment (optional)
    fn custom_style(&self, _theme: &Theme) -> Option<Style> {
        None
    }
}

/// Refresh timer state and last update time
#[derive(Debug, Clone)]
pub struct RefreshSegment {
    pub label: String,
    pub failing: bool,
}

/// Active sort column and direction
#[derive(Debug, Clone)]
pub struct SortSegment {
    pub description: Option<String>,
}

/// Key hints for the current mode
#[derive(Debug, Clone)]
pub struct KeyHintsSegment {
    pub mode: ViewMode,
}

impl StatusSegment for RefreshSegment {
    fn content(&self) -> String {
        let indicator = if self.failing { "⚠" } else { "⟳" };
        format!("{} {}", indicator, self.label)
    }

    fn priority(&self) -> u8 {
        90
    }

    fn custom_style(&self, theme: &Theme) -> Option<Style> {
        self.failing.then(|| {
            Style::default()
                .fg(theme.colors.palette.warning)
                .add_modifier(Modifier::BOLD)
        })
    }
}

impl StatusSegment for SortSegment {
    fn content(&self) -> String {
        match &self.description {
            Some(description) => format!("Sort: {}", description),
            None => String::new(),
        }
    }

    fn priority(&self) -> u8 {
        50
    }

    fn is_visible(&self) -> bool {
        self.description.is_some()
    }
}

impl KeyHintsSegment {
    fn hints(&self) -> &'static [(&'static str, &'static str)] {
        match self.mode {
            ViewMode::Browse => &[
                ("/", "search"),
                ("t/p", "sort"),
                ("←→", "page"),
                ("Enter", "details"),
                ("n", "new"),
                ("x", "export"),
                ("?", "help"),
                ("q", "quit"),
            ],
            ViewMode::Search => &[("Enter/Esc", "done"), ("Ctrl-U", "clear")],
            ViewMode::Detail => &[("e", "edit"), ("Esc", "close")],
            ViewMode::Form => &[("Tab", "next field"), ("Enter", "save"), ("Esc", "cancel")],
            ViewMode::Help => &[("?/Esc", "close")],
        }
    }
}

impl StatusSegment for KeyHintsSegment {
    fn content(&self) -> String {
        self.hints()
            .iter()
            .map(|(key, action)| format!("{} {}", key, action))
            .collect::<Vec<_>>()
            .join("  ")
    }

    fn priority(&self) -> u8 {
        70
    }
}

/// Single-line status bar built from prioritized segments
#[derive(Default)]
pub struct StatusBar {
    segments: Vec<Box<dyn StatusSegment>>,
}

impl StatusBar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a segment, keeping segments ordered by priority
    pub fn add_segment<T: StatusSegment + 'static>(&mut self, segment: T) {
        let priority = segment.priority();
        let position = self
            .segments
            .iter()
            .position(|existing| existing.priority() < priority)
            .unwrap_or(self.segments.len());
        self.segments.insert(position, Box::new(segment));
    }

    /// Visible segment texts in display order
    pub fn contents(&self) -> Vec<String> {
        self.segments
            .iter()
            .filter(|segment| segment.is_visible())
            .map(|segment| segment.content())
            .collect()
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        if area.height == 0 {
            return;
        }

        let default_style = Style::default()
            .fg(theme.colors.palette.text_secondary)
            .bg(theme.colors.palette.surface);
        let separator = Span::styled(" | ", Style::default().fg(theme.colors.palette.border));

        let mut spans = Vec::new();
        let mut remaining = area.width as usize;
        for segment in self.segments.iter().filter(|segment| segment.is_visible()) {
            if !spans.is_empty() {
                if remaining <= 3 {
                    break;
                }
                spans.push(separator.clone());
                remaining -= 3;
            }

            let content = segment.content();
            let width = content.chars().count();
            let display = if width > remaining {
                let keep = remaining.saturating_sub(3);
                format!("{}...", content.chars().take(keep).collect::<String>())
            } else {
                content
            };
            remaining = remaining.saturating_sub(display.chars().count());

            let style = segment.custom_style(theme).unwrap_or(default_style);
            spans.push(Span::styled(display, style));

            if remaining == 0 {
                break;
            }
        }

        frame.render_widget(Paragraph::new(Line::from(spans)).style(default_style), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segments_sorted_by_priority() {
        let mut bar = StatusBar::new();
        bar.add_segment(SortSegment {
            description: Some("price ▲".to_string()),
        });
        bar.add_segment(KeyHintsSegment {
            mode: ViewMode::Detail,
        });
        bar.add_segment(RefreshSegment {
            label: "Auto-refresh on".to_string(),
            failing: false,
        });

        assert_eq!(
            bar.contents(),
            vec![
                "⟳ Auto-refresh on".to_string(),
                "e edit  Esc close".to_string(),
                "Sort: price ▲".to_string(),
            ]
        );
    }

    #[test]
    fn test_hidden_sort_segment() {
        let mut bar = StatusBar::new();
        bar.add_segment(SortSegment { description: None });
        assert!(bar.contents().is_empty());
    }
}
