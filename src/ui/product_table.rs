use crate::catalog::PageItem;
use crate::theme::Theme;
use crate::ui::display::{CatalogDisplay, PaginationDisplay};
use ratatui::{
    layout::{Alignment, Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

/// Product table with its header stats and pager
pub struct ProductTable;

impl ProductTable {
    pub fn render(frame: &mut Frame, area: Rect, display: &CatalogDisplay, theme: &Theme, focused: bool) {
        let block = Block::default()
            .title(" Products ")
            .borders(Borders::ALL)
            .border_style(theme.border_style(focused));

        if let Some(message) = &display.empty_message {
            let empty = Paragraph::new(message.as_str())
                .style(theme.muted_style())
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let table_colors = &theme.colors.table;
        let header_style = Style::default()
            .fg(table_colors.header)
            .add_modifier(Modifier::BOLD);
        let header = Row::new(vec![
            Cell::from("ID"),
            Cell::from(display.title_header.as_str()),
            Cell::from(display.price_header.as_str()),
            Cell::from("Category"),
            Cell::from("Description"),
        ])
        .style(header_style)
        .bottom_margin(1);

        let rows = display.rows.iter().map(|row| {
            let cells = vec![
                Cell::from(Span::styled(row.id.as_str(), Style::default().fg(table_colors.id))),
                Cell::from(Span::styled(row.title.as_str(), Style::default().fg(table_colors.title))),
                Cell::from(Span::styled(row.price.as_str(), Style::default().fg(table_colors.price))),
                Cell::from(Span::styled(
                    row.category.as_str(),
                    Style::default().fg(table_colors.category),
                )),
                Cell::from(Span::styled(row.description.as_str(), theme.muted_style())),
            ];
            let row_widget = Row::new(cells);
            if row.selected {
                row_widget.style(theme.selection_style())
            } else {
                row_widget
            }
        });

        let widths = [
            Constraint::Length(6),
            Constraint::Percentage(35),
            Constraint::Length(12),
            Constraint::Length(16),
            Constraint::Min(10),
        ];
        let table = Table::new(rows, widths)
            .header(header)
            .block(block)
            .column_spacing(2);

        frame.render_widget(table, area);
    }

    /// Pager line: `‹ 1 … 3 4 [5] 6 7 … 10 ›  41-50 of 95`
    pub fn render_pagination(
        frame: &mut Frame,
        area: Rect,
        pagination: &PaginationDisplay,
        page_size: &str,
        theme: &Theme,
    ) {
        let palette = &theme.colors.palette;
        let enabled = Style::default().fg(palette.text_primary);
        let disabled = Style::default().fg(palette.text_muted);

        let mut spans = vec![Span::styled(
            "‹ ",
            if pagination.has_previous { enabled } else { disabled },
        )];
        for item in &pagination.items {
            match item {
                PageItem::Page(page) if *page == pagination.current => spans.push(Span::styled(
                    format!("[{}] ", page),
                    Style::default()
                        .fg(palette.accent)
                        .add_modifier(Modifier::BOLD),
                )),
                PageItem::Page(page) => spans.push(Span::styled(format!("{} ", page), enabled)),
                PageItem::Ellipsis => spans.push(Span::styled("… ", disabled)),
            }
        }
        spans.push(Span::styled(
            "›",
            if pagination.has_next { enabled } else { disabled },
        ));
        spans.push(Span::styled(
            format!("   {}   {}", pagination.range, page_size),
            Style::default().fg(palette.text_secondary),
        ));

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}
