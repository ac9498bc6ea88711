//! Wire formats for the catalog REST API

use crate::catalog::{Category, Product, ProductChanges, ProductDraft};
use serde::{Deserialize, Serialize};

/// Product as it arrives over the wire. Unknown fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductPayload {
    pub id: i64,
    pub title: String,
    pub price: f64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<CategoryPayload>,
    #[serde(default)]
    pub images: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CategoryPayload {
    pub id: i64,
    #[serde(default)]
    pub name: String,
}

impl From<ProductPayload> for Product {
    fn from(payload: ProductPayload) -> Self {
        Product {
            id: payload.id,
            title: payload.title,
            price: payload.price,
            description: payload.description,
            category: payload.category.map(|c| Category::new(c.id, c.name)),
            images: payload.images.unwrap_or_default(),
        }
    }
}

/// Body of `PUT /products/{id}`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    pub title: String,
    pub price: f64,
    pub description: String,
    pub category_id: i64,
}

impl UpdateProductRequest {
    /// Build from validated changes; keeps the product's category, or 1 when it has none
    pub fn new(changes: &ProductChanges, product: &Product) -> Self {
        Self {
            title: changes.title.clone(),
            price: changes.price,
            description: changes.description.clone(),
            category_id: product.category.as_ref().map(|c| c.id).unwrap_or(1),
        }
    }
}

/// Body of `POST /products`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub title: String,
    pub price: f64,
    pub description: String,
    pub category_id: i64,
    pub images: Vec<String>,
}

impl From<&ProductDraft> for CreateProductRequest {
    fn from(draft: &ProductDraft) -> Self {
        Self {
            title: draft.title.clone(),
            price: draft.price,
            description: draft.description.clone(),
            category_id: draft.category.id(),
            images: vec![draft.placeholder_image()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CategoryChoice;
    use serde_json::json;

    #[test]
    fn test_decode_full_product() {
        let body = json!({
            "id": 4,
            "title": "Handmade Fresh Table",
            "slug": "handmade-fresh-table",
            "price": 687,
            "description": "Andy shoes are designed to keeping in...",
            "category": {
                "id": 5,
                "name": "Others",
                "image": "https://placehold.co/600x400",
                "creationAt": "2023-01-03T15:58:58.000Z"
            },
            "images": ["https://placehold.co/600x400", "https://placehold.co/600x401"],
            "creationAt": "2023-01-03T15:58:58.000Z",
            "updatedAt": "2023-01-03T15:58:58.000Z"
        });

        let product: Product = serde_json::from_value::<ProductPayload>(body).unwrap().into();
        assert_eq!(product.id, 4);
        assert_eq!(product.price, 687.0);
        assert_eq!(product.category, Some(Category::new(5, "Others")));
        assert_eq!(product.images.len(), 2);
    }

    #[test]
    fn test_decode_sparse_product() {
        let body = json!({ "id": 9, "title": "Bare", "price": 1.5, "images": null });
        let product: Product = serde_json::from_value::<ProductPayload>(body).unwrap().into();
        assert_eq!(product.description, None);
        assert_eq!(product.category, None);
        assert!(product.images.is_empty());
    }

    #[test]
    fn test_update_body() {
        let changes = ProductChanges::from_input(" Desk ", "20", "").unwrap();
        let uncategorized = Product::new(2, "Old", 1.0);
        let request = UpdateProductRequest::new(&changes, &uncategorized);

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({ "title": "Desk", "price": 20.0, "description": "", "categoryId": 1 })
        );

        let categorized = uncategorized.with_category(Category::new(3, "Shoes"));
        assert_eq!(UpdateProductRequest::new(&changes, &categorized).category_id, 3);
    }

    #[test]
    fn test_create_body() {
        let draft =
            ProductDraft::from_input("Hero Phone", "199", "", Some(CategoryChoice::Electronics)).unwrap();
        let request = CreateProductRequest::from(&draft);

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "title": "Hero Phone",
                "price": 199.0,
                "description": "",
                "categoryId": 1,
                "images": ["https://via.placeholder.com/400?text=Hero%20Phone"]
            })
        );
    }
}
