pub mod display;
pub mod help;
pub mod product_detail;
pub mod product_form;
pub mod product_table;
pub mod status_bar;
pub mod toast;

use crate::catalog::SortKey;
use crate::tea::model::{Model, ViewMode};
use crate::theme::Theme;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{block::Title, Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use self::{
    display::{refresh_label, CatalogDisplay, DetailDisplay, StatsDisplay},
    help::HelpOverlay,
    product_detail::ProductDetail,
    product_form::{centered_rect, ProductFormRenderer},
    product_table::ProductTable,
    status_bar::{KeyHintsSegment, RefreshSegment, SortSegment, StatusBar},
    toast::ToastRenderer,
};

/// Draw the whole panel from the model
pub fn render(frame: &mut Frame, model: &Model) {
    let area = frame.size();
    let theme = &model.theme;
    let display = CatalogDisplay::project(&model.catalog, model.selected_row);

    frame.render_widget(
        Block::default().style(Style::default().bg(theme.colors.palette.background)),
        area,
    );

    let banner_height = if model.banner.is_some() { 1 } else { 0 };
    let pager_height = if display.pagination.is_some() { 1 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),             // title + stats
            Constraint::Length(3),             // search
            Constraint::Length(banner_height), // error banner
            Constraint::Min(5),                // table
            Constraint::Length(pager_height),  // pager
            Constraint::Length(1),             // status bar
        ])
        .split(area);

    render_header(frame, chunks[0], &display.stats, theme);
    render_search(frame, chunks[1], model, display.result_count.as_deref(), theme);
    if let Some(banner) = &model.banner {
        render_banner(frame, chunks[2], banner, theme);
    }
    ProductTable::render(frame, chunks[3], &display, theme, model.mode == ViewMode::Browse);
    if let Some(pagination) = &display.pagination {
        ProductTable::render_pagination(frame, chunks[4], pagination, &display.page_size, theme);
    }
    render_status_bar(frame, chunks[5], model);

    match model.mode {
        ViewMode::Detail => {
            let detail = model.detail_product().map(DetailDisplay::from_product);
            ProductDetail::render(frame, area, detail.as_ref(), theme);
        }
        ViewMode::Form => {
            if let Some(form) = &model.form {
                ProductFormRenderer::render(frame, area, form, theme);
            }
        }
        ViewMode::Help => HelpOverlay::render(frame, area, theme),
        ViewMode::Browse | ViewMode::Search => {}
    }

    if let Some(notice) = &model.notice {
        render_notice(frame, area, notice, theme);
    }

    ToastRenderer::render(frame, area, model.toasts.toasts(), theme);
}

fn render_header(frame: &mut Frame, area: Rect, stats: &StatsDisplay, theme: &Theme) {
    let palette = &theme.colors.palette;
    let label = Style::default().fg(palette.text_secondary);
    let value = Style::default()
        .fg(palette.text_primary)
        .add_modifier(Modifier::BOLD);

    let line = Line::from(vec![
        Span::styled(
            " shopdesk ",
            Style::default()
                .fg(palette.background)
                .bg(palette.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("  Products ", label),
        Span::styled(stats.total_products.as_str(), value),
        Span::styled("  Categories ", label),
        Span::styled(stats.total_categories.as_str(), value),
        Span::styled("  Avg price ", label),
        Span::styled(stats.average_price.as_str(), value),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_search(
    frame: &mut Frame,
    area: Rect,
    model: &Model,
    result_count: Option<&str>,
    theme: &Theme,
) {
    let focused = model.mode == ViewMode::Search;
    let mut spans = vec![Span::styled(
        model.search_input.as_str(),
        Style::default().fg(theme.colors.palette.text_primary),
    )];
    if focused {
        spans.push(Span::styled("▏", Style::default().fg(theme.colors.palette.accent)));
    } else if model.search_input.is_empty() {
        spans.push(Span::styled("press / to search by title", theme.muted_style()));
    }

    let mut block = Block::default()
        .title(" Search ")
        .borders(Borders::ALL)
        .border_style(theme.border_style(focused));
    if let Some(count) = result_count {
        block = block.title(Title::from(format!(" {} ", count)).alignment(Alignment::Right));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn render_banner(frame: &mut Frame, area: Rect, banner: &str, theme: &Theme) {
    let style = Style::default()
        .fg(theme.colors.palette.background)
        .bg(theme.colors.palette.error)
        .add_modifier(Modifier::BOLD);
    let line = Line::from(vec![
        Span::styled(format!(" ⚠ {} ", banner), style),
        Span::styled(" d to dismiss", theme.muted_style()),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_notice(frame: &mut Frame, area: Rect, notice: &str, theme: &Theme) {
    let popup = centered_rect(40, 5, area);
    frame.render_widget(Clear, popup);
    let paragraph = Paragraph::new(vec![
        Line::from(Span::styled(
            notice,
            Style::default()
                .fg(theme.colors.palette.warning)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled("Press Enter to continue", theme.muted_style())),
    ])
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .title(" Notice ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.colors.palette.warning))
            .style(Style::default().bg(theme.colors.palette.surface)),
    );
    frame.render_widget(paragraph, popup);
}

fn render_status_bar(frame: &mut Frame, area: Rect, model: &Model) {
    let state = model.catalog.state();
    let mut status_bar = StatusBar::new();
    status_bar.add_segment(RefreshSegment {
        label: refresh_label(&model.refresh),
        failing: model.refresh.last_failed,
    });
    status_bar.add_segment(KeyHintsSegment { mode: model.mode });
    status_bar.add_segment(SortSegment {
        description: match state.sort_key {
            SortKey::None => None,
            key => Some(format!("{} {}", key, state.sort_order.arrow())),
        },
    });
    status_bar.render(frame, area, &model.theme);
}
