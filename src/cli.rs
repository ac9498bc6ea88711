use anyhow::{anyhow, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use crate::api::{CatalogClient, CreateProductRequest, UpdateProductRequest};
use crate::catalog::{
    write_export, CategoryChoice, Product, ProductChanges, ProductDraft, ProductId,
    ProductListViewModel, SortKey, SortOrder,
};
use crate::config::AppConfig;
use crate::ui::display::CatalogDisplay;

/// shopdesk - terminal admin panel for a product catalog API
#[derive(Parser)]
#[command(name = "shopdesk")]
#[command(about = "Browse, edit and export a product catalog from the terminal")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Configuration directory path
    #[arg(long, global = true)]
    pub config_dir: Option<PathBuf>,

    /// Catalog API base URL, overriding the configuration
    #[arg(long, global = true)]
    pub api_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print one page of the product list
    List(ListArgs),

    /// Print catalog statistics
    Stats,

    /// Export the filtered and sorted product list to CSV
    Export(ExportArgs),

    /// Create a product
    Create(CreateArgs),

    /// Update a product's title, price or description
    Update(UpdateArgs),
}

/// Sortable columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortField {
    Title,
    Price,
}

impl From<SortField> for SortKey {
    fn from(field: SortField) -> Self {
        match field {
            SortField::Title => SortKey::Title,
            SortField::Price => SortKey::Price,
        }
    }
}

/// Search and sort options shared by `list` and `export`
#[derive(Args, Debug, Clone, Default)]
pub struct ViewArgs {
    /// Case-insensitive title filter
    #[arg(long, short)]
    pub query: Option<String>,

    /// Column to sort by
    #[arg(long, value_enum)]
    pub sort: Option<SortField>,

    /// Sort descending
    #[arg(long)]
    pub desc: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    #[command(flatten)]
    pub view: ViewArgs,

    /// 1-based page number
    #[arg(long, default_value_t = 1)]
    pub page: usize,

    /// Rows per page; the configured size when omitted
    #[arg(long)]
    pub page_size: Option<usize>,
}

#[derive(Args, Debug, Clone)]
pub struct ExportArgs {
    #[command(flatten)]
    pub view: ViewArgs,

    /// Directory for the CSV file; the configured export directory when omitted
    #[arg(long)]
    pub output_dir: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct CreateArgs {
    #[arg(long)]
    pub title: String,

    #[arg(long)]
    pub price: String,

    /// Category id: 1 Electronics, 2 Furniture, 3 Shoes, 4 Miscellaneous, 5 Clothes
    #[arg(long)]
    pub category: i64,

    #[arg(long, default_value = "")]
    pub description: String,
}

#[derive(Args, Debug, Clone)]
pub struct UpdateArgs {
    /// Product id
    pub id: ProductId,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub price: Option<String>,

    #[arg(long)]
    pub description: Option<String>,
}

/// Runs headless subcommands against the catalog API
pub struct CliHandler {
    config: AppConfig,
    client: Arc<dyn CatalogClient>,
}

impl CliHandler {
    pub fn new(config: AppConfig, client: Arc<dyn CatalogClient>) -> Self {
        Self { config, client }
    }

    /// Handle CLI commands, writing human-readable output to `out`
    pub async fn handle_command<W: Write>(&self, command: Commands, out: &mut W) -> Result<()> {
        match command {
            Commands::List(args) => self.handle_list(args, out).await,
            Commands::Stats => self.handle_stats(out).await,
            Commands::Export(args) => self.handle_export(args, out).await,
            Commands::Create(args) => self.handle_create(args, out).await,
            Commands::Update(args) => self.handle_update(args, out).await,
        }
    }

    async fn load_view(&self, view: &ViewArgs, page_size: usize) -> Result<ProductListViewModel> {
        let products = self.client.fetch_products().await?;
        tracing::debug!("Fetched {} products", products.len());

        let mut catalog = ProductListViewModel::with_products(products, page_size);
        if let Some(query) = &view.query {
            catalog.set_query(query);
        }
        if let Some(field) = view.sort {
            let order = if view.desc {
                SortOrder::Descending
            } else {
                SortOrder::Ascending
            };
            catalog.set_sort(field.into(), order);
        }
        Ok(catalog)
    }

    async fn handle_list<W: Write>(&self, args: ListArgs, out: &mut W) -> Result<()> {
        let page_size = args.page_size.unwrap_or(self.config.page_size);
        if page_size == 0 {
            return Err(anyhow!("--page-size must be positive"));
        }

        let mut catalog = self.load_view(&args.view, page_size).await?;
        catalog.go_to_page(args.page);

        let display = CatalogDisplay::project(&catalog, usize::MAX);
        for line in format_table(&display) {
            writeln!(out, "{}", line)?;
        }
        Ok(())
    }

    async fn handle_stats<W: Write>(&self, out: &mut W) -> Result<()> {
        let products = self.client.fetch_products().await?;
        let catalog = ProductListViewModel::with_products(products, self.config.page_size);
        let stats = catalog.stats();

        writeln!(out, "Products:      {}", stats.total_products)?;
        writeln!(out, "Categories:    {}", stats.total_categories)?;
        writeln!(out, "Average price: {}", stats.average_price_label())?;
        Ok(())
    }

    async fn handle_export<W: Write>(&self, args: ExportArgs, out: &mut W) -> Result<()> {
        let catalog = self.load_view(&args.view, self.config.page_size).await?;
        let products = catalog.displayed_products();
        let directory = args
            .output_dir
            .unwrap_or_else(|| self.config.export_directory());

        let path = write_export(&products, &directory, chrono::Local::now().naive_local())?;
        writeln!(out, "✅ Exported {} products to {}", products.len(), path.display())?;
        Ok(())
    }

    async fn handle_create<W: Write>(&self, args: CreateArgs, out: &mut W) -> Result<()> {
        let draft = ProductDraft::from_input(
            &args.title,
            &args.price,
            &args.description,
            CategoryChoice::from_id(args.category),
        )?;

        let request = CreateProductRequest::from(&draft);
        let created = draft.complete(self.client.create_product(&request).await?);
        tracing::info!("Created product {}", created.id);

        writeln!(out, "✅ Created product #{}", created.id)?;
        write_product(out, &created)?;
        Ok(())
    }

    async fn handle_update<W: Write>(&self, args: UpdateArgs, out: &mut W) -> Result<()> {
        let products = self.client.fetch_products().await?;
        let current = products
            .into_iter()
            .find(|p| p.id == args.id)
            .ok_or_else(|| anyhow!("Product #{} not found", args.id))?;

        let title = args.title.unwrap_or_else(|| current.title.clone());
        let price = args.price.unwrap_or_else(|| current.price.to_string());
        let description = args
            .description
            .unwrap_or_else(|| current.description.clone().unwrap_or_default());
        let changes = ProductChanges::from_input(&title, &price, &description)?;

        let request = UpdateProductRequest::new(&changes, &current);
        let updated = self.client.update_product(args.id, &request).await?;
        let merged = ProductChanges::merge_into(&updated, &current);
        tracing::info!("Updated product {}", merged.id);

        writeln!(out, "✅ Updated product #{}", merged.id)?;
        write_product(out, &merged)?;
        Ok(())
    }
}

fn write_product<W: Write>(out: &mut W, product: &Product) -> std::io::Result<()> {
    writeln!(out, "   Title:       {}", product.title)?;
    writeln!(out, "   Price:       {}", product.display_price())?;
    writeln!(out, "   Category:    {}", product.category_name().unwrap_or("N/A"))?;
    writeln!(out, "   Description: {}", product.description_text().unwrap_or(""))
}

/// Plain-text table for the `list` command
pub fn format_table(display: &CatalogDisplay) -> Vec<String> {
    let mut lines = Vec::new();

    if let Some(message) = &display.empty_message {
        lines.push(message.clone());
        return lines;
    }

    let title_width = display
        .rows
        .iter()
        .map(|row| row.title.chars().count())
        .chain(std::iter::once(display.title_header.chars().count()))
        .max()
        .unwrap_or(5)
        .min(40);

    lines.push(format!(
        "{:>5}  {:<title_width$}  {:>10}  {}",
        "ID", display.title_header, display.price_header, "Category"
    ));
    for row in &display.rows {
        let title: String = row.title.chars().take(title_width).collect();
        lines.push(format!(
            "{:>5}  {:<title_width$}  {:>10}  {}",
            row.id, title, row.price, row.category
        ));
    }

    let mut footer = Vec::new();
    if let Some(pagination) = &display.pagination {
        footer.push(format!(
            "Page {}/{}",
            pagination.current, pagination.total_pages
        ));
        footer.push(pagination.range.clone());
    }
    if let Some(count) = &display.result_count {
        footer.push(count.clone());
    }
    if !footer.is_empty() {
        lines.push(String::new());
        lines.push(footer.join(" · "));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::{MockCall, MockCatalogClient};
    use crate::catalog::Category;

    fn sample() -> Vec<Product> {
        vec![
            Product::new(1, "Chair", 50.0).with_category(Category::new(2, "Furniture")),
            Product::new(2, "Chairman Desk", 120.0).with_category(Category::new(2, "Furniture")),
            Product::new(3, "Sofa", 300.0),
        ]
    }

    fn handler(client: &MockCatalogClient) -> CliHandler {
        CliHandler::new(AppConfig::default(), Arc::new(client.clone()))
    }

    async fn run(handler: &CliHandler, command: Commands) -> Result<String> {
        let mut out = Vec::new();
        handler.handle_command(command, &mut out).await?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_cli_parses_list_flags() {
        let cli = Cli::parse_from([
            "shopdesk", "--debug", "list", "--query", "chair", "--sort", "price", "--desc",
            "--page", "2",
        ]);
        assert!(cli.debug);
        match cli.command {
            Some(Commands::List(args)) => {
                assert_eq!(args.view.query.as_deref(), Some("chair"));
                assert_eq!(args.view.sort, Some(SortField::Price));
                assert!(args.view.desc);
                assert_eq!(args.page, 2);
            }
            _ => panic!("expected list"),
        }
    }

    #[tokio::test]
    async fn test_list_filters_and_sorts() {
        let client = MockCatalogClient::new(sample());
        let command = Commands::List(ListArgs {
            view: ViewArgs {
                query: Some("chair".to_string()),
                sort: Some(SortField::Price),
                desc: true,
            },
            page: 1,
            page_size: None,
        });
        let output = run(&handler(&client), command).await.unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert!(lines[0].contains("Price ▼"));
        assert!(lines[1].contains("Chairman Desk"));
        assert!(lines[2].contains("Chair"));
        assert!(output.contains("2 results"));
        assert!(!output.contains("Sofa"));
    }

    #[tokio::test]
    async fn test_stats_output() {
        let client = MockCatalogClient::new(sample());
        let output = run(&handler(&client), Commands::Stats).await.unwrap();
        assert!(output.contains("Products:      3"));
        assert!(output.contains("Categories:    1"));
        assert!(output.contains("Average price: $156.67"));
    }

    #[tokio::test]
    async fn test_invalid_create_is_not_sent() {
        let client = MockCatalogClient::new(sample());
        let command = Commands::Create(CreateArgs {
            title: "Lamp".to_string(),
            price: "-4".to_string(),
            category: 1,
            description: String::new(),
        });
        let err = run(&handler(&client), command).await.unwrap_err();
        assert!(err.to_string().contains("Price"));
        assert!(client.calls().await.is_empty());
    }

    #[tokio::test]
    async fn test_update_keeps_omitted_fields() {
        let client = MockCatalogClient::new(sample());
        let command = Commands::Update(UpdateArgs {
            id: 2,
            title: None,
            price: Some("99.5".to_string()),
            description: None,
        });
        let output = run(&handler(&client), command).await.unwrap();
        assert!(output.contains("Updated product #2"));
        assert!(output.contains("$99.50"));

        let calls = client.calls().await;
        match &calls[1] {
            MockCall::Update(id, request) => {
                assert_eq!(*id, 2);
                assert_eq!(request.title, "Chairman Desk");
                assert_eq!(request.category_id, 2);
            }
            other => panic!("unexpected call {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_update_unknown_product() {
        let client = MockCatalogClient::new(sample());
        let command = Commands::Update(UpdateArgs {
            id: 42,
            title: None,
            price: None,
            description: None,
        });
        let err = run(&handler(&client), command).await.unwrap_err();
        assert_eq!(err.to_string(), "Product #42 not found");
    }

    #[tokio::test]
    async fn test_export_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let client = MockCatalogClient::new(sample());
        let command = Commands::Export(ExportArgs {
            view: ViewArgs::default(),
            output_dir: Some(dir.path().to_path_buf()),
        });
        let output = run(&handler(&client), command).await.unwrap();
        assert!(output.contains("Exported 3 products"));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[tokio::test]
    async fn test_export_of_nothing_fails() {
        let dir = tempfile::tempdir().unwrap();
        let client = MockCatalogClient::new(sample());
        let command = Commands::Export(ExportArgs {
            view: ViewArgs {
                query: Some("nothing".to_string()),
                ..ViewArgs::default()
            },
            output_dir: Some(dir.path().to_path_buf()),
        });
        let err = run(&handler(&client), command).await.unwrap_err();
        assert_eq!(err.to_string(), "No data to export");
    }
}
