//! Filter, sort and paginate pipeline over the in-memory product set
//!
//! Everything here is a pure function of its inputs. Callers own the view
//! state and write the clamped page index back after each computation.

use crate::catalog::product::Product;
use icu_collator::{Collator, CollatorOptions};
use std::cmp::Ordering;

/// Column the product list is sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Keep the order the API returned
    #[default]
    None,
    Title,
    Price,
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortKey::None => write!(f, "none"),
            SortKey::Title => write!(f, "title"),
            SortKey::Price => write!(f, "price"),
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            SortOrder::Ascending => "▲",
            SortOrder::Descending => "▼",
        }
    }
}

/// One computed page of the product list
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProductView {
    pub page: Vec<Product>,
    /// Number of products that passed the filter
    pub total_count: usize,
    /// Always at least 1
    pub total_pages: usize,
    pub clamped_page_index: usize,
}

/// Keep the products whose title contains `query`, preserving order
pub fn filter_products<'a>(all: &'a [Product], query: &str) -> Vec<&'a Product> {
    let needle = query.to_lowercase();
    all.iter()
        .filter(|p| needle.is_empty() || p.title.to_lowercase().contains(&needle))
        .collect()
}

/// Root-locale collator for titles. Falls back to code point order when the
/// collation data cannot be loaded.
fn title_collator() -> Option<Collator> {
    match Collator::try_new(&Default::default(), CollatorOptions::new()) {
        Ok(collator) => Some(collator),
        Err(e) => {
            tracing::warn!("Title collation unavailable, using code point order: {}", e);
            None
        }
    }
}

/// Compare two titles ignoring case. Lowercased titles are collated, so
/// accented letters sort next to their base letter.
fn compare_titles(collator: Option<&Collator>, a: &str, b: &str) -> Ordering {
    let (a, b) = (a.to_lowercase(), b.to_lowercase());
    match collator {
        Some(collator) => collator.compare(&a, &b),
        None => a.cmp(&b),
    }
}

/// Stable sort in place. `SortKey::None` leaves the order untouched.
pub fn sort_products(products: &mut [&Product], key: SortKey, order: SortOrder) {
    let collator = match key {
        SortKey::None => return,
        SortKey::Title => title_collator(),
        SortKey::Price => None,
    };
    let compare = |a: &Product, b: &Product| match key {
        SortKey::Title => compare_titles(collator.as_ref(), &a.title, &b.title),
        _ => a.price.total_cmp(&b.price),
    };

    products.sort_by(|a, b| match order {
        SortOrder::Ascending => compare(a, b),
        SortOrder::Descending => compare(b, a),
    });
}

/// Filtered and sorted list, unpaginated. This is what export writes out.
pub fn displayed_products(
    all: &[Product],
    query: &str,
    key: SortKey,
    order: SortOrder,
) -> Vec<Product> {
    let mut filtered = filter_products(all, query);
    sort_products(&mut filtered, key, order);
    filtered.into_iter().cloned().collect()
}

/// `ceil(total / page_size)`, never less than 1
pub fn total_pages(total_count: usize, page_size: usize) -> usize {
    let page_size = page_size.max(1);
    total_count.div_ceil(page_size).max(1)
}

/// Clamp a 1-based page index into `1..=total_pages`
pub fn clamp_page(page_index: usize, total_pages: usize) -> usize {
    page_index.max(1).min(total_pages.max(1))
}

/// Run the whole pipeline: filter, sort, then slice out one page.
/// A zero `page_size` is treated as 1.
pub fn compute_view(
    all: &[Product],
    query: &str,
    key: SortKey,
    order: SortOrder,
    page_index: usize,
    page_size: usize,
) -> ProductView {
    let page_size = page_size.max(1);
    let mut filtered = filter_products(all, query);
    sort_products(&mut filtered, key, order);

    let total_count = filtered.len();
    let total_pages = total_pages(total_count, page_size);
    let clamped_page_index = clamp_page(page_index, total_pages);

    let page = filtered
        .into_iter()
        .skip((clamped_page_index - 1) * page_size)
        .take(page_size)
        .cloned()
        .collect();

    ProductView {
        page,
        total_count,
        total_pages,
        clamped_page_index,
    }
}

/// Entry in the page navigation bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page(usize),
    Ellipsis,
}

/// Pages to show in the navigation bar: the current page ±2, plus the
/// first and last pages, with an ellipsis over gaps wider than one page.
pub fn page_window(current: usize, total_pages: usize) -> Vec<PageItem> {
    let total_pages = total_pages.max(1);
    let current = clamp_page(current, total_pages);
    let start = current.saturating_sub(2).max(1);
    let end = (current + 2).min(total_pages);

    let mut items = Vec::new();
    if start > 1 {
        items.push(PageItem::Page(1));
        if start > 2 {
            items.push(PageItem::Ellipsis);
        }
    }
    items.extend((start..=end).map(PageItem::Page));
    if end < total_pages {
        if end < total_pages - 1 {
            items.push(PageItem::Ellipsis);
        }
        items.push(PageItem::Page(total_pages));
    }
    items
}

/// 1-based inclusive record range shown on a page, `(0, 0)` when empty
pub fn record_range(page_index: usize, page_size: usize, total_count: usize) -> (usize, usize) {
    if total_count == 0 {
        return (0, 0);
    }
    let page_size = page_size.max(1);
    let start = (page_index.max(1) - 1) * page_size + 1;
    let end = (page_index.max(1) * page_size).min(total_count);
    (start.min(total_count), end)
}
