use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::Utc;

use crate::core::{AppError, Page, PageRequest, Result};
use crate::modules::categories::models::Category;
use crate::modules::categories::repositories::CategoryRepository;
use crate::modules::products::models::{Product, ProductDto, ProductRequest};
use crate::modules::products::repositories::ProductRepository;

/// CRUD orchestration for products, including Product-Category reconciliation
pub struct ProductService {
    products: Arc<dyn ProductRepository>,
    categories: Arc<dyn CategoryRepository>,
}

impl ProductService {
    pub fn new(products: Arc<dyn ProductRepository>, categories: Arc<dyn CategoryRepository>) -> Self {
        Self {
            products,
            categories,
        }
    }

    pub async fn find_all_paged(&self, page: &PageRequest) -> Result<Page<ProductDto>> {
        let products = self.products.find_all_paged(page).await?;
        Ok(products.map(ProductDto::from))
    }

    pub async fn find_by_id(&self, id: i64) -> Result<ProductDto> {
        let product = self
            .products
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Product with id '{}' not found", id)))?;

        Ok(product.into())
    }

    pub async fn insert(&self, request: ProductRequest) -> Result<ProductDto> {
        request.validate()?;

        let categories = self.resolve_categories(&request.category_ids).await?;
        let mut product = build_product(0, request, categories);

        product.id = self.products.insert(&product).await?;

        Ok(product.into())
    }

    pub async fn update(&self, id: i64, request: ProductRequest) -> Result<ProductDto> {
        request.validate()?;

        self.products
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Product with id '{}' not found", id)))?;

        // Every referenced id must resolve before anything is written
        let categories = self.resolve_categories(&request.category_ids).await?;
        let product = build_product(id, request, categories);

        self.products.update(&product).await?;

        Ok(product.into())
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.products.delete_by_id(id).await
    }

    /// Resolve a caller-supplied category id list against the store.
    ///
    /// Unknown ids are a caller error; they are neither created implicitly
    /// nor dropped silently.
    async fn resolve_categories(&self, ids: &[i64]) -> Result<Vec<Category>> {
        let requested: BTreeSet<i64> = ids.iter().copied().collect();
        let unique: Vec<i64> = requested.iter().copied().collect();

        let found = self.categories.find_by_ids(&unique).await?;

        if found.len() != unique.len() {
            let found_ids: BTreeSet<i64> = found.iter().map(|c| c.id).collect();
            let missing: Vec<String> = requested
                .difference(&found_ids)
                .map(|id| id.to_string())
                .collect();

            return Err(AppError::validation(format!(
                "Unknown category id(s): {}",
                missing.join(", ")
            )));
        }

        Ok(found)
    }
}

fn build_product(id: i64, request: ProductRequest, categories: Vec<Category>) -> Product {
    Product {
        id,
        name: request.name.trim().to_string(),
        description: request.description,
        price: request.price,
        image_url: request.image_url,
        date: request.date.unwrap_or_else(Utc::now),
        categories,
    }
}
