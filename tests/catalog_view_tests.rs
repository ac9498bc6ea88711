use shopdesk::catalog::{export_csv, Category, Product, ProductListViewModel, SortKey, SortOrder};
use shopdesk::ui::display::CatalogDisplay;

fn inventory() -> Vec<Product> {
    (1..=25)
        .map(|i| {
            let title = if i % 2 == 0 {
                format!("Chair {:02}", i)
            } else {
                format!("Table {:02}", i)
            };
            Product::new(i, title, i as f64 * 10.0)
                .with_category(Category::new(2, "Furniture"))
        })
        .collect()
}

#[test]
fn test_chair_example() {
    let mut catalog = ProductListViewModel::with_products(
        vec![
            Product::new(1, "Chair", 50.0),
            Product::new(2, "Chairman desk", 20.0),
        ],
        10,
    );

    catalog.set_query("chair");
    catalog.toggle_sort(SortKey::Price);
    let ids: Vec<i64> = catalog.view().page.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![2, 1]);

    catalog.toggle_sort(SortKey::Price);
    let ids: Vec<i64> = catalog.view().page.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![1, 2]);
    assert_eq!(catalog.state().sort_order, SortOrder::Descending);
}

#[test]
fn test_search_sort_and_page_together() {
    let mut catalog = ProductListViewModel::with_products(inventory(), 5);
    assert_eq!(catalog.view().total_pages, 5);

    catalog.go_to_page(4);
    catalog.set_query("  CHAIR ");
    // New query starts from the first page
    assert_eq!(catalog.state().page_index, 1);
    assert_eq!(catalog.view().total_count, 12);
    assert_eq!(catalog.view().total_pages, 3);

    catalog.set_sort(SortKey::Price, SortOrder::Descending);
    catalog.go_to_page(3);
    let ids: Vec<i64> = catalog.view().page.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![4, 2]);

    // Beyond the last page clamps to it
    catalog.go_to_page(99);
    assert_eq!(catalog.state().page_index, 3);

    let display = CatalogDisplay::project(&catalog, 0);
    assert_eq!(display.rows.len(), 2);
    assert_eq!(display.result_count.as_deref(), Some("12 results"));
    let pagination = display.pagination.unwrap();
    assert_eq!(pagination.range, "11-12 of 12");
    assert!(pagination.has_previous);
    assert!(!pagination.has_next);
}

#[test]
fn test_stats_ignore_search() {
    let mut catalog = ProductListViewModel::with_products(inventory(), 10);
    catalog.set_query("no such product");

    let stats = catalog.stats();
    assert_eq!(stats.total_products, 25);
    assert_eq!(stats.total_categories, 1);
    assert_eq!(stats.average_price_label(), "$130.00");

    let display = CatalogDisplay::project(&catalog, 0);
    assert!(display.rows.is_empty());
    assert_eq!(
        display.empty_message.as_deref(),
        Some("No products match \"no such product\"")
    );
}

#[test]
fn test_export_covers_every_page_of_the_filtered_list() {
    let mut catalog = ProductListViewModel::with_products(inventory(), 5);
    catalog.set_query("table");
    catalog.set_sort(SortKey::Title, SortOrder::Descending);

    let csv = export_csv(&catalog.displayed_products()).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 14);
    assert_eq!(lines[1], "25,\"Table 25\",250.00,\"Furniture\",\"\",\"\"");
    assert_eq!(lines[13], "1,\"Table 01\",10.00,\"Furniture\",\"\",\"\"");
}

#[test]
fn test_quotes_in_titles_are_doubled() {
    let products = vec![Product::new(7, "The \"Best\" Lamp", 12.5).with_description("Bright")];
    let csv = export_csv(&products).unwrap();
    assert!(csv.ends_with("7,\"The \"\"Best\"\" Lamp\",12.50,\"N/A\",\"\",\"Bright\"\n"));
}
