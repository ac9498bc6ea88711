//! Product list view-model: the product store plus search, sort and page state

use crate::catalog::product::{Product, ProductId};
use crate::catalog::stats::CatalogStats;
use crate::catalog::store::{FetchOutcome, FetchTicket, ProductStore};
use crate::catalog::view::{compute_view, displayed_products, ProductView, SortKey, SortOrder};

/// Default number of rows per page
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Current search, sort and page configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    /// Trimmed search text
    pub query: String,
    pub sort_key: SortKey,
    pub sort_order: SortOrder,
    /// 1-based, always within range after a recompute
    pub page_index: usize,
    pub page_size: usize,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            query: String::new(),
            sort_key: SortKey::None,
            sort_order: SortOrder::Ascending,
            page_index: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Owns the product set and the view state; every mutation recomputes the page
#[derive(Debug, Clone)]
pub struct ProductListViewModel {
    store: ProductStore,
    state: ViewState,
    view: ProductView,
}

impl Default for ProductListViewModel {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl ProductListViewModel {
    pub fn new(page_size: usize) -> Self {
        Self::with_store(ProductStore::new(), page_size)
    }

    pub fn with_products(products: Vec<Product>, page_size: usize) -> Self {
        Self::with_store(ProductStore::with_products(products), page_size)
    }

    fn with_store(store: ProductStore, page_size: usize) -> Self {
        let mut model = Self {
            store,
            state: ViewState {
                page_size: page_size.max(1),
                ..ViewState::default()
            },
            view: ProductView::default(),
        };
        model.recompute();
        model
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn view(&self) -> &ProductView {
        &self.view
    }

    pub fn store(&self) -> &ProductStore {
        &self.store
    }

    pub fn products(&self) -> &[Product] {
        self.store.products()
    }

    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.store.get(id)
    }

    /// Product on the current page at `row`
    pub fn product_on_page(&self, row: usize) -> Option<&Product> {
        self.view.page.get(row)
    }

    fn recompute(&mut self) {
        self.view = compute_view(
            self.store.products(),
            &self.state.query,
            self.state.sort_key,
            self.state.sort_order,
            self.state.page_index,
            self.state.page_size,
        );
        self.state.page_index = self.view.clamped_page_index;
    }

    fn reset_page(&mut self) {
        self.state.page_index = 1;
        self.recompute();
    }

    /// Set the search text. Returns whether the effective query changed.
    pub fn set_query(&mut self, query: &str) -> bool {
        let query = query.trim();
        if query == self.state.query {
            return false;
        }
        self.state.query = query.to_string();
        self.reset_page();
        true
    }

    /// Sort by `key`; selecting the active key again flips the direction
    pub fn toggle_sort(&mut self, key: SortKey) {
        if self.state.sort_key == key {
            self.state.sort_order = self.state.sort_order.toggled();
        } else {
            self.state.sort_key = key;
            self.state.sort_order = SortOrder::Ascending;
        }
        self.reset_page();
    }

    pub fn set_sort(&mut self, key: SortKey, order: SortOrder) {
        if self.state.sort_key == key && self.state.sort_order == order {
            return;
        }
        self.state.sort_key = key;
        self.state.sort_order = order;
        self.reset_page();
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        let page_size = page_size.max(1);
        if page_size == self.state.page_size {
            return;
        }
        self.state.page_size = page_size;
        self.reset_page();
    }

    /// Jump to a page; out-of-range requests are clamped
    pub fn go_to_page(&mut self, page_index: usize) {
        self.state.page_index = page_index;
        self.recompute();
    }

    pub fn next_page(&mut self) {
        self.go_to_page(self.state.page_index + 1);
    }

    pub fn previous_page(&mut self) {
        self.go_to_page(self.state.page_index.saturating_sub(1));
    }

    pub fn last_page(&mut self) {
        self.go_to_page(self.view.total_pages);
    }

    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.store.begin_fetch()
    }

    /// Replace the product set with a fetch response
    pub fn apply_fetch(&mut self, ticket: FetchTicket, products: Vec<Product>) -> FetchOutcome {
        let outcome = self.store.apply_fetch(ticket, products);
        if outcome != FetchOutcome::Stale {
            self.recompute();
        }
        outcome
    }

    pub fn apply_created(&mut self, product: Product) {
        self.store.apply_created(product);
        self.recompute();
    }

    pub fn apply_updated(&mut self, product: Product) -> Option<Product> {
        let merged = self.store.apply_updated(product);
        self.recompute();
        merged
    }

    /// Filtered and sorted list across all pages
    pub fn displayed_products(&self) -> Vec<Product> {
        displayed_products(
            self.store.products(),
            &self.state.query,
            self.state.sort_key,
            self.state.sort_order,
        )
    }

    /// Statistics over the unfiltered set
    pub fn stats(&self) -> CatalogStats {
        CatalogStats::compute(self.store.products())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog(n: i64) -> Vec<Product> {
        (1..=n)
            .map(|i| Product::new(i, format!("Item {i:02}"), (n - i) as f64))
            .collect()
    }

    fn page_ids(vm: &ProductListViewModel) -> Vec<i64> {
        vm.view().page.iter().map(|p| p.id).collect()
    }

    #[test]
    fn test_changes_reset_page_to_one() {
        let mut vm = ProductListViewModel::with_products(catalog(30), 5);
        vm.go_to_page(4);
        assert_eq!(vm.state().page_index, 4);

        vm.set_query("item");
        assert_eq!(vm.state().page_index, 1);

        vm.go_to_page(3);
        vm.toggle_sort(SortKey::Price);
        assert_eq!(vm.state().page_index, 1);

        vm.go_to_page(3);
        vm.toggle_sort(SortKey::Price);
        assert_eq!(vm.state().sort_order, SortOrder::Descending);
        assert_eq!(vm.state().page_index, 1);

        vm.go_to_page(3);
        vm.set_page_size(10);
        assert_eq!(vm.state().page_index, 1);
    }

    #[test]
    fn test_unchanged_query_keeps_page() {
        let mut vm = ProductListViewModel::with_products(catalog(30), 5);
        vm.set_query("item");
        vm.go_to_page(2);
        assert!(!vm.set_query("  item "));
        assert_eq!(vm.state().page_index, 2);
    }

    #[test]
    fn test_sort_toggle_and_switch() {
        let mut vm = ProductListViewModel::with_products(catalog(3), 10);
        vm.toggle_sort(SortKey::Price);
        assert_eq!(page_ids(&vm), vec![3, 2, 1]);
        vm.toggle_sort(SortKey::Price);
        assert_eq!(page_ids(&vm), vec![1, 2, 3]);
        vm.toggle_sort(SortKey::Title);
        assert_eq!(vm.state().sort_order, SortOrder::Ascending);
        assert_eq!(page_ids(&vm), vec![1, 2, 3]);
    }

    #[test]
    fn test_refresh_that_shrinks_set_clamps_page() {
        let mut vm = ProductListViewModel::with_products(catalog(30), 5);
        vm.go_to_page(6);
        assert_eq!(page_ids(&vm), vec![26, 27, 28, 29, 30]);

        let ticket = vm.begin_fetch();
        vm.apply_fetch(ticket, catalog(12));
        assert_eq!(vm.state().page_index, 3);
        assert_eq!(page_ids(&vm), vec![11, 12]);
    }

    #[test]
    fn test_navigation_is_clamped() {
        let mut vm = ProductListViewModel::with_products(catalog(12), 5);
        vm.previous_page();
        assert_eq!(vm.state().page_index, 1);
        vm.last_page();
        assert_eq!(vm.state().page_index, 3);
        vm.next_page();
        assert_eq!(vm.state().page_index, 3);
        vm.go_to_page(42);
        assert_eq!(vm.state().page_index, 3);
    }

    #[test]
    fn test_created_product_appears_first() {
        let mut vm = ProductListViewModel::with_products(catalog(3), 10);
        vm.apply_created(Product::new(99, "Fresh", 1.0));
        assert_eq!(page_ids(&vm), vec![99, 1, 2, 3]);
        assert_eq!(vm.stats().total_products, 4);
    }

    #[test]
    fn test_displayed_products_spans_pages() {
        let mut vm = ProductListViewModel::with_products(catalog(12), 5);
        vm.set_query("item 1");
        let ids: Vec<i64> = vm.displayed_products().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![10, 11, 12]);
    }
}
