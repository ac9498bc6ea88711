//! Catalog-level error types

use thiserror::Error;

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Form fields that can carry a validation error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Price,
    Description,
    Category,
}

impl std::fmt::Display for FormField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormField::Title => write!(f, "Title"),
            FormField::Price => write!(f, "Price"),
            FormField::Description => write!(f, "Description"),
            FormField::Category => write!(f, "Category"),
        }
    }
}

/// Field-level input errors, raised before any network call is made
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Title must not be empty")]
    EmptyTitle,

    #[error("Price must be a non-negative number (got '{input}')")]
    InvalidPrice { input: String },

    #[error("Please select a category")]
    MissingCategory,
}

impl ValidationError {
    /// Create an invalid price error
    pub fn invalid_price(input: impl Into<String>) -> Self {
        ValidationError::InvalidPrice {
            input: input.into(),
        }
    }

    /// The form field this error belongs to
    pub fn field(&self) -> FormField {
        match self {
            ValidationError::EmptyTitle => FormField::Title,
            ValidationError::InvalidPrice { .. } => FormField::Price,
            ValidationError::MissingCategory => FormField::Category,
        }
    }
}

/// Errors surfaced by catalog operations
#[derive(Error, Debug, Clone)]
pub enum CatalogError {
    #[error("No data to export")]
    EmptyExport,

    #[error("CSV encoding failed: {message}")]
    Csv { message: String },

    #[error("Failed to write export file {path}: {message}")]
    ExportWrite { path: String, message: String },
}

impl CatalogError {
    /// Create a CSV encoding error
    pub fn csv(message: impl Into<String>) -> Self {
        CatalogError::Csv {
            message: message.into(),
        }
    }

    /// Create an export write error
    pub fn export_write(path: impl Into<String>, message: impl Into<String>) -> Self {
        CatalogError::ExportWrite {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl From<csv::Error> for CatalogError {
    fn from(error: csv::Error) -> Self {
        CatalogError::csv(error.to_string())
    }
}
