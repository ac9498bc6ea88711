//! CSV export of the displayed product list

use crate::catalog::error::{CatalogError, CatalogResult};
use crate::catalog::product::Product;
use chrono::NaiveDateTime;
use csv::{QuoteStyle, Terminator, WriterBuilder};
use std::path::{Path, PathBuf};

/// Fixed header row
pub const CSV_HEADERS: [&str; 6] = ["ID", "Title", "Price", "Category", "Image", "Description"];

/// Serialize products to CSV text.
///
/// Text columns are always quoted with embedded quotes doubled; id and price
/// are written bare. Rows end with `\n`. Fails with [`CatalogError::EmptyExport`]
/// when there is nothing to write.
pub fn export_csv(products: &[Product]) -> CatalogResult<String> {
    if products.is_empty() {
        return Err(CatalogError::EmptyExport);
    }

    let mut header = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    header.write_record(CSV_HEADERS)?;
    let buffer = header
        .into_inner()
        .map_err(|e| CatalogError::csv(e.to_string()))?;

    // Text columns arrive already quoted, so the writer must not quote again
    let mut rows = WriterBuilder::new()
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(buffer);

    for product in products {
        rows.write_record([
            product.id.to_string(),
            quoted(&product.title),
            format!("{:.2}", product.price),
            quoted(product.category_name().unwrap_or("N/A")),
            quoted(product.first_image().unwrap_or_default()),
            quoted(product.description.as_deref().unwrap_or_default()),
        ])?;
    }

    let bytes = rows
        .into_inner()
        .map_err(|e| CatalogError::csv(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| CatalogError::csv(e.to_string()))
}

/// Wrap a text column in double quotes, doubling embedded quotes
fn quoted(text: &str) -> String {
    format!("\"{}\"", text.replace('"', "\"\""))
}

/// `products_<YYYY-MM-DD>_<HH-MM>.csv` for the given local time
pub fn export_file_name(at: NaiveDateTime) -> String {
    format!("products_{}.csv", at.format("%Y-%m-%d_%H-%M"))
}

/// Write an export file into `directory`, returning its path
pub fn write_export(products: &[Product], directory: &Path, at: NaiveDateTime) -> CatalogResult<PathBuf> {
    let content = export_csv(products)?;
    let path = directory.join(export_file_name(at));

    std::fs::write(&path, content)
        .map_err(|e| CatalogError::export_write(path.display().to_string(), e.to_string()))?;

    tracing::info!("Exported {} products to {}", products.len(), path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::product::Category;
    use chrono::NaiveDate;

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 7)
            .unwrap()
            .and_hms_opt(9, 5, 42)
            .unwrap()
    }

    #[test]
    fn test_export_rows() {
        let products = vec![
            Product::new(1, "Chair", 50.0)
                .with_category(Category::new(2, "Furniture"))
                .with_image("https://img.example/chair.png")
                .with_image("https://img.example/chair-2.png")
                .with_description("Sturdy, oak"),
            Product::new(2, "Mystery box", 9.5),
        ];

        let csv = export_csv(&products).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "ID,Title,Price,Category,Image,Description");
        assert_eq!(
            lines[1],
            r#"1,"Chair",50.00,"Furniture","https://img.example/chair.png","Sturdy, oak""#
        );
        assert_eq!(lines[2], r#"2,"Mystery box",9.50,"N/A","","""#);
    }

    #[test]
    fn test_export_escapes_quotes() {
        let products = vec![Product::new(5, "Hero\"Phone", 199.0).with_description("says \"hi\"")];
        let csv = export_csv(&products).unwrap();
        assert!(csv.contains(r#""Hero""Phone""#));
        assert!(csv.contains(r#""says ""hi""""#));
    }

    #[test]
    fn test_numeric_looking_text_is_still_quoted() {
        let products = vec![
            Product::new(1, "123", 5.0).with_description("42"),
            Product::new(2, "NaN", 0.5).with_description("inf"),
        ];
        let csv = export_csv(&products).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[1], r#"1,"123",5.00,"N/A","","42""#);
        assert_eq!(lines[2], r#"2,"NaN",0.50,"N/A","","inf""#);
    }

    #[test]
    fn test_multiline_description_stays_in_one_field() {
        let products = vec![Product::new(3, "Lamp", 1.0).with_description("line one\nline \"two\"")];
        let csv = export_csv(&products).unwrap();
        assert!(csv.ends_with("3,\"Lamp\",1.00,\"N/A\",\"\",\"line one\nline \"\"two\"\"\"\n"));
    }

    #[test]
    fn test_export_of_nothing_is_an_error() {
        assert!(matches!(export_csv(&[]), Err(CatalogError::EmptyExport)));
    }

    #[test]
    fn test_export_file_name() {
        assert_eq!(export_file_name(at()), "products_2024-03-07_09-05.csv");
    }

    #[test]
    fn test_write_export() {
        let dir = tempfile::tempdir().unwrap();
        let products = vec![Product::new(1, "Chair", 50.0)];

        let path = write_export(&products, dir.path(), at()).unwrap();
        assert_eq!(path, dir.path().join("products_2024-03-07_09-05.csv"));

        let written = std::fs::read_to_string(path).unwrap();
        assert!(written.starts_with("ID,Title,Price"));
        assert!(written.contains(r#"1,"Chair",50.00"#));
    }
}
