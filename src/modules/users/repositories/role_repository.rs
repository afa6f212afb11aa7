use async_trait::async_trait;
use sqlx::{MySqlPool, QueryBuilder};

use crate::core::Result;
use crate::modules::users::models::Role;

/// Store operations for roles. Roles are seeded by migration and only ever
/// resolved by reference, so the surface is read-only.
#[async_trait]
pub trait RoleRepository: Send + Sync {
    /// Resolve a batch of referenced ids; absent ids are simply not returned
    async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<Role>>;
}

/// MySQL-backed role repository
pub struct MySqlRoleRepository {
    pool: MySqlPool,
}

impl MySqlRoleRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoleRepository for MySqlRoleRepository {
    async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<Role>> {
        if ids.is_empty() {
            return Ok(vec![]);
        }

        let mut builder = QueryBuilder::new("SELECT id, authority FROM roles WHERE id IN (");
        let mut separated = builder.separated(", ");
        for id in ids {
            separated.push_bind(id);
        }
        separated.push_unseparated(")");

        let roles = builder
            .build_query_as::<Role>()
            .fetch_all(&self.pool)
            .await?;

        Ok(roles)
    }
}
