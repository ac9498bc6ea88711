use crate::theme::Theme;
use crate::ui::display::DetailDisplay;
use crate::ui::product_form::centered_rect;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Read-only product overlay, opened with Enter on a row
pub struct ProductDetail;

impl ProductDetail {
    pub fn render(frame: &mut Frame, area: Rect, detail: Option<&DetailDisplay>, theme: &Theme) {
        let popup = centered_rect(70, 16, area);
        frame.render_widget(Clear, popup);

        let block = Block::default()
            .title(" Product details ")
            .borders(Borders::ALL)
            .border_style(theme.border_style(true))
            .style(Style::default().bg(theme.colors.palette.surface));

        let Some(detail) = detail else {
            let gone = Paragraph::new("This product is no longer in the catalog.")
                .style(theme.muted_style())
                .block(block);
            frame.render_widget(gone, popup);
            return;
        };

        let label = Style::default()
            .fg(theme.colors.palette.text_secondary)
            .add_modifier(Modifier::BOLD);
        let value = Style::default().fg(theme.colors.palette.text_primary);
        let field = |name: &'static str, text: &str| {
            Line::from(vec![
                Span::styled(format!("{:<12}", name), label),
                Span::styled(text.to_string(), value),
            ])
        };

        let lines = vec![
            field("ID", &detail.id),
            field("Title", &detail.title),
            field("Price", &detail.price),
            field("Category", &detail.category),
            field("Image", &detail.image),
            Line::from(""),
            Line::from(Span::styled("Description", label)),
            Line::from(Span::styled(detail.description.clone(), value)),
            Line::from(""),
            Line::from(Span::styled("e edit  Esc close", theme.muted_style())),
        ];

        let paragraph = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, popup);
    }
}
