// MySQL CRUD operations for categories.
//
// Delete distinguishes the two store signals the service cares about:
// zero rows affected (not found) and a foreign-key violation from a product
// still referencing the category (conflict).

use async_trait::async_trait;
use sqlx::{MySqlPool, QueryBuilder};

use crate::core::{AppError, Page, PageRequest, Result};
use crate::modules::categories::models::Category;

/// Sort fields accepted by the paged category listing
pub const SORTABLE_COLUMNS: &[(&str, &'static str)] = &[("id", "id"), ("name", "name")];

/// Store operations for categories
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn find_all_paged(&self, page: &PageRequest) -> Result<Page<Category>>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Category>>;
    /// Resolve a batch of referenced ids; absent ids are simply not returned
    async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<Category>>;
    async fn insert(&self, name: &str) -> Result<Category>;
    async fn update(&self, category: &Category) -> Result<Category>;
    async fn delete_by_id(&self, id: i64) -> Result<()>;
}

/// MySQL-backed category repository
pub struct MySqlCategoryRepository {
    pool: MySqlPool,
}

impl MySqlCategoryRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryRepository for MySqlCategoryRepository {
    async fn find_all_paged(&self, page: &PageRequest) -> Result<Page<Category>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categories")
            .fetch_one(&self.pool)
            .await?;

        // Sort column and direction come from a whitelist, never the caller
        let query = format!(
            "SELECT id, name FROM categories ORDER BY {} {} LIMIT ? OFFSET ?",
            page.sort_column,
            page.direction.as_sql()
        );

        let categories: Vec<Category> = sqlx::query_as(&query)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await?;

        Ok(Page::new(categories, page, total))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Category>> {
        let category = sqlx::query_as::<_, Category>("SELECT id, name FROM categories WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(category)
    }

    async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<Category>> {
        if ids.is_empty() {
            return Ok(vec![]);
        }

        let mut builder = QueryBuilder::new("SELECT id, name FROM categories WHERE id IN (");
        let mut separated = builder.separated(", ");
        for id in ids {
            separated.push_bind(id);
        }
        separated.push_unseparated(")");

        let categories = builder
            .build_query_as::<Category>()
            .fetch_all(&self.pool)
            .await?;

        Ok(categories)
    }

    async fn insert(&self, name: &str) -> Result<Category> {
        let result = sqlx::query("INSERT INTO categories (name) VALUES (?)")
            .bind(name)
            .execute(&self.pool)
            .await?;

        Ok(Category {
            id: result.last_insert_id() as i64,
            name: name.to_string(),
        })
    }

    async fn update(&self, category: &Category) -> Result<Category> {
        sqlx::query("UPDATE categories SET name = ? WHERE id = ?")
            .bind(&category.name)
            .bind(category.id)
            .execute(&self.pool)
            .await?;

        Ok(category.clone())
    }

    async fn delete_by_id(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM categories WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(db_err) = &e {
                    if db_err.is_foreign_key_violation() {
                        return AppError::conflict(format!(
                            "Category with id '{}' is still referenced by a product",
                            id
                        ));
                    }
                }
                AppError::Database(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!(
                "Category with id '{}' not found",
                id
            )));
        }

        Ok(())
    }
}
