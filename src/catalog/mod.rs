//! Product catalog domain: products, the view pipeline, statistics and export

pub mod error;
pub mod export;
pub mod product;
pub mod stats;
pub mod store;
pub mod view;
pub mod view_model;

pub use error::{CatalogError, CatalogResult, FormField, ValidationError};
pub use export::{export_csv, export_file_name, write_export, CSV_HEADERS};
pub use product::{
    category_name_for_id, Category, CategoryChoice, Product, ProductChanges, ProductDraft,
    ProductId, PLACEHOLDER_IMAGE_URL,
};
pub use stats::CatalogStats;
pub use store::{FetchOutcome, FetchTicket, ProductStore};
pub use view::{compute_view, PageItem, ProductView, SortKey, SortOrder};
pub use view_model::{ProductListViewModel, ViewState, DEFAULT_PAGE_SIZE};
