//! Transient toast notifications
//!
//! Success feedback for saves, exports and recovered refreshes shows up in
//! the top-right corner and disappears on its own.

use crate::tea::message::ToastLevel;
use crate::theme::Theme;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use std::collections::VecDeque;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Maximum number of toasts to display simultaneously
const MAX_VISIBLE_TOASTS: usize = 5;

const TOAST_HEIGHT: u16 = 3;

/// Toast notification item
#[derive(Debug, Clone)]
pub struct Toast {
    pub id: String,
    pub message: String,
    pub level: ToastLevel,
    pub created_at: Instant,
    pub duration: Duration,
}

impl Toast {
    /// Create a toast whose lifetime depends on its level
    pub fn new(message: impl Into<String>, level: ToastLevel) -> Self {
        let duration = match level {
            ToastLevel::Info => Duration::from_secs(3),
            ToastLevel::Success => Duration::from_secs(2),
            ToastLevel::Error => Duration::from_secs(5),
        };

        Self {
            id: Uuid::new_v4().to_string(),
            message: message.into(),
            level,
            created_at: Instant::now(),
            duration,
        }
    }

    pub fn is_expired_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.created_at) >= self.duration
    }

    pub fn icon(&self) -> &'static str {
        match self.level {
            ToastLevel::Info => "ℹ",
            ToastLevel::Success => "✓",
            ToastLevel::Error => "✗",
        }
    }

    pub fn accent(&self, theme: &Theme) -> Color {
        match self.level {
            ToastLevel::Info => theme.colors.palette.info,
            ToastLevel::Success => theme.colors.palette.success,
            ToastLevel::Error => theme.colors.palette.error,
        }
    }
}

/// Queue of visible toasts, oldest first
#[derive(Debug, Clone)]
pub struct ToastManager {
    toasts: VecDeque<Toast>,
    max_visible: usize,
}

impl Default for ToastManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ToastManager {
    pub fn new() -> Self {
        Self {
            toasts: VecDeque::new(),
            max_visible: MAX_VISIBLE_TOASTS,
        }
    }

    /// Add a toast, dropping the oldest one when full
    pub fn show(&mut self, message: impl Into<String>, level: ToastLevel) {
        if self.toasts.len() >= self.max_visible {
            self.toasts.pop_front();
        }
        self.toasts.push_back(Toast::new(message, level));
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.show(message, ToastLevel::Info);
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.show(message, ToastLevel::Success);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.show(message, ToastLevel::Error);
    }

    /// Remove expired toasts
    pub fn prune(&mut self, now: Instant) {
        self.toasts.retain(|toast| !toast.is_expired_at(now));
    }

    pub fn toasts(&self) -> &VecDeque<Toast> {
        &self.toasts
    }

    pub fn has_toasts(&self) -> bool {
        !self.toasts.is_empty()
    }

    pub fn clear(&mut self) {
        self.toasts.clear();
    }
}

/// Draws toasts stacked down from the top-right corner, newest first
pub struct ToastRenderer;

impl ToastRenderer {
    pub fn render(frame: &mut Frame, area: Rect, toasts: &VecDeque<Toast>, theme: &Theme) {
        let width = area.width.min(50);
        let mut y = area.y + 1;

        for toast in toasts.iter().rev() {
            if y + TOAST_HEIGHT > area.y + area.height {
                break;
            }
            let toast_area = Rect {
                x: area.x + area.width.saturating_sub(width).saturating_sub(2),
                y,
                width,
                height: TOAST_HEIGHT,
            };
            Self::render_toast(frame, toast_area, toast, theme);
            y += TOAST_HEIGHT;
        }
    }

    fn render_toast(frame: &mut Frame, area: Rect, toast: &Toast, theme: &Theme) {
        frame.render_widget(Clear, area);

        let accent = toast.accent(theme);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(accent))
            .style(Style::default().bg(theme.colors.palette.surface));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(inner);

        let icon = Paragraph::new(toast.icon())
            .style(Style::default().fg(accent).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center);
        frame.render_widget(icon, chunks[0]);

        let message = Paragraph::new(Line::from(Span::styled(
            toast.message.as_str(),
            Style::default().fg(theme.colors.palette.text_primary),
        )))
        .wrap(Wrap { trim: true });
        frame.render_widget(message, chunks[1]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toast_lifetimes() {
        let toast = Toast::new("Saved", ToastLevel::Success);
        assert_eq!(toast.duration, Duration::from_secs(2));
        assert!(!toast.is_expired_at(toast.created_at));
        assert!(toast.is_expired_at(toast.created_at + Duration::from_secs(2)));
    }

    #[test]
    fn test_manager_drops_oldest_when_full() {
        let mut manager = ToastManager::new();
        for i in 0..7 {
            manager.info(format!("Toast {}", i));
        }
        assert_eq!(manager.toasts().len(), MAX_VISIBLE_TOASTS);
        assert_eq!(manager.toasts()[0].message, "Toast 2");
    }

    #[test]
    fn test_prune_removes_expired() {
        let mut manager = ToastManager::new();
        manager.success("Product updated");
        manager.error("Export failed");
        let later = manager.toasts()[0].created_at + Duration::from_secs(3);
        manager.prune(later);
        assert_eq!(manager.toasts().len(), 1);
        assert_eq!(manager.toasts()[0].level, ToastLevel::Error);

        manager.clear();
        assert!(!manager.has_toasts());
    }
}
