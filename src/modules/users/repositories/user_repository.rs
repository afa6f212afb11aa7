// MySQL CRUD operations for users and the user_role join table.
//
// The user row write and the role edge rewrite share one transaction.
// A duplicate email surfaces as a unique-key violation and is translated
// to a conflict, not a server fault.

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::{FromRow, MySql, MySqlPool, QueryBuilder, Transaction};

use crate::core::{AppError, Page, PageRequest, Result};
use crate::modules::users::models::{Role, User};

/// Sort fields accepted by the paged user listing
pub const SORTABLE_COLUMNS: &[(&str, &'static str)] = &[
    ("id", "id"),
    ("firstName", "first_name"),
    ("lastName", "last_name"),
    ("email", "email"),
];

/// Store operations for users
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_all_paged(&self, page: &PageRequest) -> Result<Page<User>>;
    async fn find_by_id(&self, id: i64) -> Result<Option<User>>;
    /// Persist a new user and its role edges; returns the assigned id
    async fn insert(&self, user: &User) -> Result<i64>;
    /// Overwrite scalar fields (password hash excluded) and replace role edges
    async fn update(&self, user: &User) -> Result<()>;
    async fn delete_by_id(&self, id: i64) -> Result<()>;
}

/// MySQL-backed user repository
pub struct MySqlUserRepository {
    pool: MySqlPool,
}

impl MySqlUserRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    async fn load_roles(&self, user_ids: &[i64]) -> Result<HashMap<i64, Vec<Role>>> {
        if user_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let mut builder = QueryBuilder::new(
            "SELECT ur.user_id, r.id, r.authority \
             FROM user_role ur \
             JOIN roles r ON r.id = ur.role_id \
             WHERE ur.user_id IN (",
        );
        let mut separated = builder.separated(", ");
        for id in user_ids {
            separated.push_bind(id);
        }
        separated.push_unseparated(") ORDER BY r.id");

        let rows = builder
            .build_query_as::<UserRoleRow>()
            .fetch_all(&self.pool)
            .await?;

        let mut grouped: HashMap<i64, Vec<Role>> = HashMap::new();
        for row in rows {
            grouped.entry(row.user_id).or_default().push(Role {
                id: row.id,
                authority: row.authority,
            });
        }

        Ok(grouped)
    }

    async fn replace_edges(
        tx: &mut Transaction<'_, MySql>,
        user_id: i64,
        roles: &[Role],
    ) -> Result<()> {
        sqlx::query("DELETE FROM user_role WHERE user_id = ?")
            .bind(user_id)
            .execute(&mut **tx)
            .await?;

        for role in roles {
            sqlx::query("INSERT INTO user_role (user_id, role_id) VALUES (?, ?)")
                .bind(user_id)
                .bind(role.id)
                .execute(&mut **tx)
                .await?;
        }

        Ok(())
    }

    fn map_unique_email(e: sqlx::Error, email: &str) -> AppError {
        if let sqlx::Error::Database(db_err) = &e {
            if db_err.is_unique_violation() {
                return AppError::conflict(format!("Email '{}' is already in use", email));
            }
        }
        AppError::Database(e)
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_all_paged(&self, page: &PageRequest) -> Result<Page<User>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        let query = format!(
            "SELECT id, first_name, last_name, email, password_hash \
             FROM users ORDER BY {} {} LIMIT ? OFFSET ?",
            page.sort_column,
            page.direction.as_sql()
        );

        let rows: Vec<UserRow> = sqlx::query_as(&query)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await?;

        let ids: Vec<i64> = rows.iter().map(|row| row.id).collect();
        let mut roles = self.load_roles(&ids).await?;

        let users = rows
            .into_iter()
            .map(|row| {
                let refs = roles.remove(&row.id).unwrap_or_default();
                row.into_user(refs)
            })
            .collect();

        Ok(Page::new(users, page, total))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, first_name, last_name, email, password_hash FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let mut roles = self.load_roles(&[id]).await?;
        let refs = roles.remove(&id).unwrap_or_default();

        Ok(Some(row.into_user(refs)))
    }

    async fn insert(&self, user: &User) -> Result<i64> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            "INSERT INTO users (first_name, last_name, email, password_hash) \
             VALUES (?, ?, ?, ?)",
        )
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .execute(&mut *tx)
        .await
        .map_err(|e| Self::map_unique_email(e, &user.email))?;

        let id = result.last_insert_id() as i64;
        Self::replace_edges(&mut tx, id, &user.roles).await?;

        tx.commit().await?;

        Ok(id)
    }

    async fn update(&self, user: &User) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "UPDATE users SET first_name = ?, last_name = ?, email = ? WHERE id = ?",
        )
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(user.id)
        .execute(&mut *tx)
        .await
        .map_err(|e| Self::map_unique_email(e, &user.email))?;

        Self::replace_edges(&mut tx, user.id, &user.roles).await?;

        tx.commit().await?;

        Ok(())
    }

    async fn delete_by_id(&self, id: i64) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM user_role WHERE user_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Err(AppError::not_found(format!(
                "User with id '{}' not found",
                id
            )));
        }

        tx.commit().await?;

        Ok(())
    }
}

// Helper structs for database mapping

#[derive(Debug, FromRow)]
struct UserRow {
    id: i64,
    first_name: String,
    last_name: String,
    email: String,
    password_hash: String,
}

impl UserRow {
    fn into_user(self, roles: Vec<Role>) -> User {
        User {
            id: self.id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            password_hash: self.password_hash,
            roles,
        }
    }
}

#[derive(Debug, FromRow)]
struct UserRoleRow {
    user_id: i64,
    id: i64,
    authority: String,
}
