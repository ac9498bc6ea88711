//! Aggregate statistics over the full product set

use crate::catalog::product::Product;
use std::collections::HashSet;

/// Summary numbers shown above the product table
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CatalogStats {
    pub total_products: usize,
    /// Distinct category names; products without a category are ignored
    pub total_categories: usize,
    /// Mean price rounded to two decimals, `None` for an empty set
    pub average_price: Option<f64>,
}

impl CatalogStats {
    pub fn compute(products: &[Product]) -> Self {
        let categories: HashSet<&str> = products.iter().filter_map(Product::category_name).collect();

        let average_price = if products.is_empty() {
            None
        } else {
            let total: f64 = products.iter().map(|p| p.price).sum();
            Some(round_cents(total / products.len() as f64))
        };

        Self {
            total_products: products.len(),
            total_categories: categories.len(),
            average_price,
        }
    }

    /// `$12.34`, or `N/A` when there is nothing to average
    pub fn average_price_label(&self) -> String {
        match self.average_price {
            Some(avg) => format!("${:.2}", avg),
            None => "N/A".to_string(),
        }
    }
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::product::Category;

    #[test]
    fn test_stats_over_products() {
        let products = vec![
            Product::new(1, "Chair", 50.0).with_category(Category::new(2, "Furniture")),
            Product::new(2, "Desk", 20.0).with_category(Category::new(2, "Furniture")),
            Product::new(3, "Phone", 10.01).with_category(Category::new(1, "Electronics")),
            Product::new(4, "Mystery", 0.0),
        ];

        let stats = CatalogStats::compute(&products);
        assert_eq!(stats.total_products, 4);
        assert_eq!(stats.total_categories, 2);
        assert_eq!(stats.average_price, Some(20.0));
        assert_eq!(stats.average_price_label(), "$20.00");
    }

    #[test]
    fn test_average_is_rounded_to_cents() {
        let products = vec![Product::new(1, "a", 1.0), Product::new(2, "b", 2.0), Product::new(3, "c", 2.0)];
        let stats = CatalogStats::compute(&products);
        assert_eq!(stats.average_price, Some(1.67));
    }

    #[test]
    fn test_empty_set_reports_not_available() {
        let stats = CatalogStats::compute(&[]);
        assert_eq!(stats.total_products, 0);
        assert_eq!(stats.total_categories, 0);
        assert_eq!(stats.average_price, None);
        assert_eq!(stats.average_price_label(), "N/A");
    }
}
