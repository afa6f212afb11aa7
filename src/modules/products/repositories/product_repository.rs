// MySQL CRUD operations for products and the product_category join table.
//
// Mutations that touch the association set run the row write and the edge
// rewrite inside one transaction, so the caller sees either the whole new
// set or the unchanged old one.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, MySql, MySqlPool, QueryBuilder, Transaction};

use crate::core::{AppError, Page, PageRequest, Result};
use crate::modules::categories::models::Category;
use crate::modules::products::models::Product;

/// Sort fields accepted by the paged product listing
pub const SORTABLE_COLUMNS: &[(&str, &'static str)] = &[
    ("id", "id"),
    ("name", "name"),
    ("price", "price"),
    ("date", "date"),
];

/// Store operations for products
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn find_all_paged(&self, page: &PageRequest) -> Result<Page<Product>>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Product>>;
    /// Persist a new product and its category edges; returns the assigned id
    async fn insert(&self, product: &Product) -> Result<i64>;
    /// Overwrite scalar fields and replace the category edge set
    async fn update(&self, product: &Product) -> Result<()>;
    async fn delete_by_id(&self, id: i64) -> Result<()>;
}

/// MySQL-backed product repository
pub struct MySqlProductRepository {
    pool: MySqlPool,
}

impl MySqlProductRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Fetch category references for a batch of products, grouped by product id
    async fn load_categories(&self, product_ids: &[i64]) -> Result<HashMap<i64, Vec<Category>>> {
        if product_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let mut builder = QueryBuilder::new(
            "SELECT pc.product_id, c.id, c.name \
             FROM product_category pc \
             JOIN categories c ON c.id = pc.category_id \
             WHERE pc.product_id IN (",
        );
        let mut separated = builder.separated(", ");
        for id in product_ids {
            separated.push_bind(id);
        }
        separated.push_unseparated(") ORDER BY c.id");

        let rows = builder
            .build_query_as::<ProductCategoryRow>()
            .fetch_all(&self.pool)
            .await?;

        let mut grouped: HashMap<i64, Vec<Category>> = HashMap::new();
        for row in rows {
            grouped.entry(row.product_id).or_default().push(Category {
                id: row.id,
                name: row.name,
            });
        }

        Ok(grouped)
    }

    async fn replace_edges(
        tx: &mut Transaction<'_, MySql>,
        product_id: i64,
        categories: &[Category],
    ) -> Result<()> {
        sqlx::query("DELETE FROM product_category WHERE product_id = ?")
            .bind(product_id)
            .execute(&mut **tx)
            .await?;

        for category in categories {
            sqlx::query("INSERT INTO product_category (product_id, category_id) VALUES (?, ?)")
                .bind(product_id)
                .bind(category.id)
                .execute(&mut **tx)
                .await?;
        }

        Ok(())
    }
}

#[async_trait]
impl ProductRepository for MySqlProductRepository {
    async fn find_all_paged(&self, page: &PageRequest) -> Result<Page<Product>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        let query = format!(
            "SELECT id, name, description, price, image_url, date \
             FROM products ORDER BY {} {} LIMIT ? OFFSET ?",
            page.sort_column,
            page.direction.as_sql()
        );

        let rows: Vec<ProductRow> = sqlx::query_as(&query)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await?;

        let ids: Vec<i64> = rows.iter().map(|row| row.id).collect();
        let mut categories = self.load_categories(&ids).await?;

        let products = rows
            .into_iter()
            .map(|row| {
                let refs = categories.remove(&row.id).unwrap_or_default();
                row.into_product(refs)
            })
            .collect();

        Ok(Page::new(products, page, total))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Product>> {
        let row = sqlx::query_as::<_, ProductRow>(
            "SELECT id, name, description, price, image_url, date FROM products WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let mut categories = self.load_categories(&[id]).await?;
        let refs = categories.remove(&id).unwrap_or_default();

        Ok(Some(row.into_product(refs)))
    }

    async fn insert(&self, product: &Product) -> Result<i64> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            "INSERT INTO products (name, description, price, image_url, date) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(&product.image_url)
        .bind(product.date)
        .execute(&mut *tx)
        .await?;

        let id = result.last_insert_id() as i64;
        Self::replace_edges(&mut tx, id, &product.categories).await?;

        tx.commit().await?;

        Ok(id)
    }

    async fn update(&self, product: &Product) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "UPDATE products SET name = ?, description = ?, price = ?, image_url = ?, date = ? \
             WHERE id = ?",
        )
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(&product.image_url)
        .bind(product.date)
        .bind(product.id)
        .execute(&mut *tx)
        .await?;

        Self::replace_edges(&mut tx, product.id, &product.categories).await?;

        tx.commit().await?;

        Ok(())
    }

    async fn delete_by_id(&self, id: i64) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        // Join rows are owned by the product; remove them with it
        sqlx::query("DELETE FROM product_category WHERE product_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM products WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Err(AppError::not_found(format!(
                "Product with id '{}' not found",
                id
            )));
        }

        tx.commit().await?;

        Ok(())
    }
}

// Helper structs for database mapping

#[derive(Debug, FromRow)]
struct ProductRow {
    id: i64,
    name: String,
    description: String,
    price: Decimal,
    image_url: String,
    date: DateTime<Utc>,
}

impl ProductRow {
    fn into_product(self, categories: Vec<Category>) -> Product {
        Product {
            id: self.id,
            name: self.name,
            description: self.description,
            price: self.price,
            image_url: self.image_url,
            date: self.date,
            categories,
        }
    }
}

#[derive(Debug, FromRow)]
struct ProductCategoryRow {
    product_id: i64,
    id: i64,
    name: String,
}
