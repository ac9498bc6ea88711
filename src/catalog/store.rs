//! Owned product set with fetch sequencing
//!
//! Fetches are stamped with a sequence number when issued. A response older
//! than the newest applied one is dropped. Acknowledged creates and updates
//! are remembered together with the newest sequence issued at the moment the
//! acknowledgement arrived, and are replayed over any fetch issued no later
//! than that, so a refresh that was already in flight cannot roll back a
//! confirmed change.

use crate::catalog::product::{Product, ProductChanges, ProductId};

/// Sequence number handed out for each issued fetch
pub type FetchTicket = u64;

/// What happened to a fetch response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The set was replaced; `replayed` confirmed changes were laid over it
    Applied { replayed: usize },
    /// A newer fetch was already applied
    Stale,
}

#[derive(Debug, Clone)]
enum Acknowledgement {
    Created {
        product: Product,
        issued_at_ack: FetchTicket,
    },
    Updated {
        product: Product,
        issued_at_ack: FetchTicket,
    },
}

impl Acknowledgement {
    fn issued_at_ack(&self) -> FetchTicket {
        match self {
            Acknowledgement::Created { issued_at_ack, .. } => *issued_at_ack,
            Acknowledgement::Updated { issued_at_ack, .. } => *issued_at_ack,
        }
    }
}

/// The full product set, replaced wholesale by fetches
#[derive(Debug, Clone, Default)]
pub struct ProductStore {
    products: Vec<Product>,
    issued: FetchTicket,
    applied: Option<FetchTicket>,
    acknowledged: Vec<Acknowledgement>,
}

impl ProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-filled with products, as if a fetch had been applied
    pub fn with_products(products: Vec<Product>) -> Self {
        Self {
            products,
            ..Self::default()
        }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Whether any fetch has been applied yet
    pub fn has_loaded(&self) -> bool {
        self.applied.is_some()
    }

    /// Number of confirmed changes still waiting to be seen in a fetch
    pub fn pending_acknowledgements(&self) -> usize {
        self.acknowledged.len()
    }

    /// Stamp a new fetch
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.issued += 1;
        self.issued
    }

    /// Apply a fetch response
    pub fn apply_fetch(&mut self, ticket: FetchTicket, products: Vec<Product>) -> FetchOutcome {
        if self.applied.is_some_and(|applied| ticket < applied) {
            tracing::debug!(
                "Dropping stale product list (ticket {}, applied {:?})",
                ticket,
                self.applied
            );
            return FetchOutcome::Stale;
        }

        self.products = products;
        self.applied = Some(ticket);

        // A fetch issued after the acknowledgement already reflects it.
        self.acknowledged.retain(|ack| ack.issued_at_ack() >= ticket);

        let replayed = self.acknowledged.len();
        let acknowledged = std::mem::take(&mut self.acknowledged);
        for ack in &acknowledged {
            match ack {
                Acknowledgement::Created { product, .. } => self.upsert_front(product.clone()),
                Acknowledgement::Updated { product, .. } => {
                    self.replace_changes(product);
                }
            }
        }
        self.acknowledged = acknowledged;

        FetchOutcome::Applied { replayed }
    }

    /// Prepend a product the server confirmed as created
    pub fn apply_created(&mut self, product: Product) {
        self.upsert_front(product.clone());
        self.acknowledged.push(Acknowledgement::Created {
            product,
            issued_at_ack: self.issued,
        });
    }

    /// Merge a confirmed update into the product with the same id.
    /// Returns the merged product, or `None` when no such product is loaded.
    pub fn apply_updated(&mut self, updated: Product) -> Option<Product> {
        let merged = self.replace_changes(&updated);
        self.acknowledged.push(Acknowledgement::Updated {
            product: updated,
            issued_at_ack: self.issued,
        });
        merged
    }

    fn upsert_front(&mut self, product: Product) {
        if let Some(existing) = self.products.iter_mut().find(|p| p.id == product.id) {
            *existing = product;
        } else {
            self.products.insert(0, product);
        }
    }

    fn replace_changes(&mut self, updated: &Product) -> Option<Product> {
        let existing = self.products.iter_mut().find(|p| p.id == updated.id)?;
        *existing = ProductChanges::merge_into(updated, existing);
        Some(existing.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(store: &ProductStore) -> Vec<i64> {
        store.products().iter().map(|p| p.id).collect()
    }

    #[test]
    fn test_fetch_replaces_wholesale() {
        let mut store = ProductStore::new();
        let t1 = store.begin_fetch();
        assert_eq!(
            store.apply_fetch(t1, vec![Product::new(1, "a", 1.0), Product::new(2, "b", 2.0)]),
            FetchOutcome::Applied { replayed: 0 }
        );
        let t2 = store.begin_fetch();
        store.apply_fetch(t2, vec![Product::new(3, "c", 3.0)]);
        assert_eq!(ids(&store), vec![3]);
        assert!(store.has_loaded());
    }

    #[test]
    fn test_older_fetch_is_dropped() {
        let mut store = ProductStore::new();
        let slow = store.begin_fetch();
        let fast = store.begin_fetch();

        store.apply_fetch(fast, vec![Product::new(2, "new", 1.0)]);
        assert_eq!(
            store.apply_fetch(slow, vec![Product::new(1, "old", 1.0)]),
            FetchOutcome::Stale
        );
        assert_eq!(ids(&store), vec![2]);
    }

    #[test]
    fn test_update_survives_refresh_issued_before_ack() {
        let mut store = ProductStore::with_products(vec![Product::new(1, "Chair", 50.0)]);

        let in_flight = store.begin_fetch();
        let merged = store.apply_updated(Product::new(1, "Armchair", 55.0));
        assert_eq!(merged.unwrap().title, "Armchair");

        // Response was produced before the PUT landed.
        let outcome = store.apply_fetch(in_flight, vec![Product::new(1, "Chair", 50.0)]);
        assert_eq!(outcome, FetchOutcome::Applied { replayed: 1 });
        assert_eq!(store.get(1).unwrap().title, "Armchair");
        assert_eq!(store.get(1).unwrap().price, 55.0);

        // A fetch issued after the ack is trusted and clears the record.
        let later = store.begin_fetch();
        store.apply_fetch(later, vec![Product::new(1, "Server title", 50.0)]);
        assert_eq!(store.get(1).unwrap().title, "Server title");
        assert_eq!(store.pending_acknowledgements(), 0);
    }

    #[test]
    fn test_created_product_survives_stale_refresh() {
        let mut store = ProductStore::with_products(vec![Product::new(1, "a", 1.0)]);
        let in_flight = store.begin_fetch();

        store.apply_created(Product::new(10, "first", 1.0));
        store.apply_created(Product::new(11, "second", 1.0));
        assert_eq!(ids(&store), vec![11, 10, 1]);

        store.apply_fetch(in_flight, vec![Product::new(1, "a", 1.0), Product::new(2, "b", 1.0)]);
        assert_eq!(ids(&store), vec![11, 10, 1, 2]);
    }

    #[test]
    fn test_update_for_missing_product_is_not_inserted() {
        let mut store = ProductStore::with_products(vec![Product::new(1, "a", 1.0)]);
        assert!(store.apply_updated(Product::new(9, "ghost", 1.0)).is_none());
        assert_eq!(ids(&store), vec![1]);
    }
}
