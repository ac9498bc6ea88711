//! Product domain types and input validation

use crate::catalog::error::ValidationError;

/// Server-assigned product identifier
pub type ProductId = i64;

/// Placeholder shown when a product has no image
pub const PLACEHOLDER_IMAGE_URL: &str = "https://via.placeholder.com/400?text=No+Image";

/// Category reference attached to a product
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

impl Category {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Catalog product as returned by the API
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub price: f64,
    pub description: Option<String>,
    pub category: Option<Category>,
    pub images: Vec<String>,
}

impl Product {
    /// Create a product with no description, category or images
    pub fn new(id: ProductId, title: impl Into<String>, price: f64) -> Self {
        Self {
            id,
            title: title.into(),
            price,
            description: None,
            category: None,
            images: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.images.push(url.into());
        self
    }

    /// Category name, if the product has one with a non-empty name
    pub fn category_name(&self) -> Option<&str> {
        self.category
            .as_ref()
            .map(|c| c.name.as_str())
            .filter(|name| !name.is_empty())
    }

    /// First image URL, if any
    pub fn first_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// Description, treating an empty string as absent
    pub fn description_text(&self) -> Option<&str> {
        self.description.as_deref().filter(|d| !d.is_empty())
    }

    /// Price formatted for display, e.g. `$49.90`
    pub fn display_price(&self) -> String {
        format!("${:.2}", self.price)
    }
}

/// Fixed set of categories offered when creating a product
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoryChoice {
    Electronics,
    Furniture,
    Shoes,
    Miscellaneous,
    Clothes,
}

impl CategoryChoice {
    pub const ALL: [CategoryChoice; 5] = [
        CategoryChoice::Electronics,
        CategoryChoice::Furniture,
        CategoryChoice::Shoes,
        CategoryChoice::Miscellaneous,
        CategoryChoice::Clothes,
    ];

    /// API category id
    pub fn id(self) -> i64 {
        match self {
            CategoryChoice::Electronics => 1,
            CategoryChoice::Furniture => 2,
            CategoryChoice::Shoes => 3,
            CategoryChoice::Miscellaneous => 4,
            CategoryChoice::Clothes => 5,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            CategoryChoice::Electronics => "Electronics",
            CategoryChoice::Furniture => "Furniture",
            CategoryChoice::Shoes => "Shoes",
            CategoryChoice::Miscellaneous => "Miscellaneous",
            CategoryChoice::Clothes => "Clothes",
        }
    }

    pub fn from_id(id: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|choice| choice.id() == id)
    }

    /// Next choice in display order, wrapping around
    pub fn next(self) -> Self {
        let index = Self::ALL.iter().position(|c| *c == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }

    /// Previous choice in display order, wrapping around
    pub fn previous(self) -> Self {
        let index = Self::ALL.iter().position(|c| *c == self).unwrap_or(0);
        Self::ALL[(index + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    pub fn to_category(self) -> Category {
        Category::new(self.id(), self.name())
    }
}

/// Category name for an API id, `Unknown` when outside the fixed set
pub fn category_name_for_id(id: i64) -> &'static str {
    CategoryChoice::from_id(id)
        .map(CategoryChoice::name)
        .unwrap_or("Unknown")
}

/// Placeholder image URL carrying the product title
pub fn placeholder_image_for(title: &str) -> String {
    format!(
        "https://via.placeholder.com/400?text={}",
        urlencoding::encode(title)
    )
}

/// Validate a title: must be non-empty after trimming
pub fn validate_title(input: &str) -> Result<String, ValidationError> {
    let title = input.trim();
    if title.is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    Ok(title.to_string())
}

/// Validate a price: must parse as a finite number that is not negative
pub fn validate_price(input: &str) -> Result<f64, ValidationError> {
    let trimmed = input.trim();
    match trimmed.parse::<f64>() {
        Ok(price) if price.is_finite() && price >= 0.0 => Ok(price),
        _ => Err(ValidationError::invalid_price(trimmed)),
    }
}

/// A validated new product, ready to be sent to the API
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub title: String,
    pub price: f64,
    pub description: String,
    pub category: CategoryChoice,
}

impl ProductDraft {
    /// Validate raw form input. Checks run in field order: title, price, category.
    pub fn from_input(
        title: &str,
        price: &str,
        description: &str,
        category: Option<CategoryChoice>,
    ) -> Result<Self, ValidationError> {
        let title = validate_title(title)?;
        let price = validate_price(price)?;
        let category = category.ok_or(ValidationError::MissingCategory)?;

        Ok(Self {
            title,
            price,
            description: description.trim().to_string(),
            category,
        })
    }

    /// Image sent along with the create request
    pub fn placeholder_image(&self) -> String {
        placeholder_image_for(&self.title)
    }

    /// Fill in what the server left out of a created product
    pub fn complete(&self, mut created: Product) -> Product {
        if created.category.is_none() {
            created.category = Some(self.category.to_category());
        }
        if created.images.is_empty() {
            created.images = vec![self.placeholder_image()];
        }
        created
    }
}

/// Validated edits to an existing product
#[derive(Debug, Clone, PartialEq)]
pub struct ProductChanges {
    pub title: String,
    pub price: f64,
    pub description: String,
}

impl ProductChanges {
    pub fn from_input(title: &str, price: &str, description: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            title: validate_title(title)?,
            price: validate_price(price)?,
            description: description.trim().to_string(),
        })
    }

    /// Apply the server's answer to an update onto the local product.
    /// Only title, price and description change; id, category and images stay.
    pub fn merge_into(updated: &Product, local: &Product) -> Product {
        Product {
            title: updated.title.clone(),
            price: updated.price,
            description: updated.description.clone(),
            ..local.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_title_trims() {
        assert_eq!(validate_title("  Chair  ").unwrap(), "Chair");
        assert_eq!(validate_title("   "), Err(ValidationError::EmptyTitle));
        assert_eq!(validate_title(""), Err(ValidationError::EmptyTitle));
    }

    #[test]
    fn test_validate_price() {
        assert_eq!(validate_price("12.5").unwrap(), 12.5);
        assert_eq!(validate_price(" 0 ").unwrap(), 0.0);
        assert!(validate_price("-1").is_err());
        assert!(validate_price("abc").is_err());
        assert!(validate_price("").is_err());
        assert!(validate_price("inf").is_err());
        assert!(validate_price("NaN").is_err());
    }

    #[test]
    fn test_draft_reports_first_failing_field() {
        let err = ProductDraft::from_input(" ", "-3", "", None).unwrap_err();
        assert_eq!(err.field(), crate::catalog::FormField::Title);

        let err = ProductDraft::from_input("Lamp", "-3", "", None).unwrap_err();
        assert_eq!(err.field(), crate::catalog::FormField::Price);

        let err = ProductDraft::from_input("Lamp", "3", "", None).unwrap_err();
        assert_eq!(err, ValidationError::MissingCategory);
    }

    #[test]
    fn test_draft_complete_synthesizes_missing_fields() {
        let draft =
            ProductDraft::from_input("Desk Lamp", "19.99", " bright ", Some(CategoryChoice::Furniture))
                .unwrap();
        assert_eq!(draft.description, "bright");

        let created = draft.complete(Product::new(300, "Desk Lamp", 19.99));
        assert_eq!(created.category, Some(Category::new(2, "Furniture")));
        assert_eq!(
            created.images,
            vec!["https://via.placeholder.com/400?text=Desk%20Lamp".to_string()]
        );

        let from_server = Product::new(301, "Desk Lamp", 19.99)
            .with_category(Category::new(9, "Lighting"))
            .with_image("https://cdn.example/lamp.png");
        let kept = draft.complete(from_server.clone());
        assert_eq!(kept, from_server);
    }

    #[test]
    fn test_merge_keeps_local_category_and_images() {
        let local = Product::new(7, "Old", 5.0)
            .with_category(Category::new(3, "Shoes"))
            .with_image("a.png");
        let server = Product::new(7, "New", 6.5).with_description("");

        let merged = ProductChanges::merge_into(&server, &local);
        assert_eq!(merged.title, "New");
        assert_eq!(merged.price, 6.5);
        assert_eq!(merged.description.as_deref(), Some(""));
        assert_eq!(merged.category, local.category);
        assert_eq!(merged.images, local.images);
    }

    #[test]
    fn test_category_choice_cycle() {
        assert_eq!(CategoryChoice::Clothes.next(), CategoryChoice::Electronics);
        assert_eq!(CategoryChoice::Electronics.previous(), CategoryChoice::Clothes);
        assert_eq!(category_name_for_id(4), "Miscellaneous");
        assert_eq!(category_name_for_id(42), "Unknown");
    }

    #[test]
    fn test_display_helpers() {
        let product = Product::new(1, "Chair", 50.0).with_description("");
        assert_eq!(product.display_price(), "$50.00");
        assert_eq!(product.description_text(), None);
        assert_eq!(product.category_name(), None);
        assert_eq!(product.first_image(), None);
    }
}
