use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{AppError, Result};
use crate::modules::categories::models::{Category, CategoryDto};

/// Product entity with its resolved category references
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub image_url: String,
    pub date: DateTime<Utc>,
    pub categories: Vec<Category>,
}

/// Wire-level representation of a product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDto {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub image_url: String,
    pub date: DateTime<Utc>,
    pub categories: Vec<CategoryDto>,
}

impl From<Product> for ProductDto {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            description: product.description,
            price: product.price,
            image_url: product.image_url,
            date: product.date,
            categories: product
                .categories
                .into_iter()
                .map(CategoryDto::from)
                .collect(),
        }
    }
}

/// Create/update payload for a product
///
/// `category_ids` is the complete target association set; on update the
/// stored set is replaced wholesale, not merged.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Decimal,
    #[serde(default)]
    pub image_url: String,
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub category_ids: Vec<i64>,
}

impl ProductRequest {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::validation("Product name cannot be blank"));
        }
        if self.price <= Decimal::ZERO {
            return Err(AppError::validation("Product price must be positive"));
        }
        Ok(())
    }
}
