//! Display model: everything the widgets print, computed from the model
//!
//! Widgets only lay out and color these strings, so the wording and the
//! pagination rules can be tested without a terminal.

use crate::catalog::view::{page_window, record_range};
use crate::catalog::{PageItem, Product, ProductListViewModel, SortKey, PLACEHOLDER_IMAGE_URL};
use crate::tea::model::RefreshState;

/// Shown when a product has no description
pub const NO_DESCRIPTION: &str = "No description";

/// One table row
#[derive(Debug, Clone, PartialEq)]
pub struct RowDisplay {
    pub id: String,
    pub title: String,
    pub price: String,
    pub category: String,
    pub description: String,
    pub selected: bool,
}

impl RowDisplay {
    pub fn from_product(product: &Product, selected: bool) -> Self {
        Self {
            id: product.id.to_string(),
            title: product.title.clone(),
            price: product.display_price(),
            category: product.category_name().unwrap_or("N/A").to_string(),
            description: product.description_text().unwrap_or(NO_DESCRIPTION).to_string(),
            selected,
        }
    }
}

/// Detail overlay contents
#[derive(Debug, Clone, PartialEq)]
pub struct DetailDisplay {
    pub id: String,
    pub title: String,
    pub price: String,
    pub category: String,
    pub description: String,
    pub image: String,
}

impl DetailDisplay {
    pub fn from_product(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            title: product.title.clone(),
            price: product.display_price(),
            category: product.category_name().unwrap_or("N/A").to_string(),
            description: product.description_text().unwrap_or(NO_DESCRIPTION).to_string(),
            image: product.first_image().unwrap_or(PLACEHOLDER_IMAGE_URL).to_string(),
        }
    }
}

/// Page navigation bar; absent when everything fits on one page
#[derive(Debug, Clone, PartialEq)]
pub struct PaginationDisplay {
    pub items: Vec<PageItem>,
    pub current: usize,
    pub total_pages: usize,
    pub has_previous: bool,
    pub has_next: bool,
    /// `11-20 of 45`
    pub range: String,
}

/// Aggregate numbers above the table
#[derive(Debug, Clone, PartialEq)]
pub struct StatsDisplay {
    pub total_products: String,
    pub total_categories: String,
    pub average_price: String,
}

/// Everything printed for the product list screen
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogDisplay {
    pub rows: Vec<RowDisplay>,
    pub title_header: String,
    pub price_header: String,
    pub pagination: Option<PaginationDisplay>,
    /// `3 results`, only while a query is active
    pub result_count: Option<String>,
    pub page_size: String,
    pub stats: StatsDisplay,
    /// Shown instead of rows when nothing matches
    pub empty_message: Option<String>,
}

impl CatalogDisplay {
    pub fn project(catalog: &ProductListViewModel, selected_row: usize) -> Self {
        let state = catalog.state();
        let view = catalog.view();

        let rows = view
            .page
            .iter()
            .enumerate()
            .map(|(index, product)| RowDisplay::from_product(product, index == selected_row))
            .collect();

        let header = |label: &str, key: SortKey| {
            if state.sort_key == key {
                format!("{} {}", label, state.sort_order.arrow())
            } else {
                label.to_string()
            }
        };

        let pagination = (view.total_pages > 1).then(|| {
            let (start, end) = record_range(state.page_index, state.page_size, view.total_count);
            PaginationDisplay {
                items: page_window(state.page_index, view.total_pages),
                current: state.page_index,
                total_pages: view.total_pages,
                has_previous: state.page_index > 1,
                has_next: state.page_index < view.total_pages,
                range: format!("{}-{} of {}", start, end, view.total_count),
            }
        });

        let result_count = (!state.query.is_empty()).then(|| match view.total_count {
            1 => "1 result".to_string(),
            n => format!("{} results", n),
        });

        let empty_message = view.page.is_empty().then(|| {
            if catalog.products().is_empty() {
                "No products loaded".to_string()
            } else {
                format!("No products match \"{}\"", state.query)
            }
        });

        let stats = catalog.stats();

        Self {
            rows,
            title_header: header("Title", SortKey::Title),
            price_header: header("Price", SortKey::Price),
            pagination,
            result_count,
            page_size: format!("{} / page", state.page_size),
            stats: StatsDisplay {
                total_products: stats.total_products.to_string(),
                total_categories: stats.total_categories.to_string(),
                average_price: stats.average_price_label(),
            },
            empty_message,
        }
    }
}

/// Status line text for the refresh timer
pub fn refresh_label(refresh: &RefreshState) -> String {
    let state = if refresh.is_loading() {
        "Refreshing..."
    } else if !refresh.active || refresh.paused {
        "Auto-refresh paused"
    } else {
        "Auto-refresh on"
    };

    match refresh.last_updated {
        Some(at) => format!("{} · updated {}", state, at.format("%H:%M:%S")),
        None => state.to_string(),
    }
}
