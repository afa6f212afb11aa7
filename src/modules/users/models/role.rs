use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Role entity, referenced by users many-to-many
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Role {
    pub id: i64,
    pub authority: String,
}

/// Wire-level representation of a role
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleDto {
    pub id: i64,
    pub authority: String,
}

impl From<Role> for RoleDto {
    fn from(role: Role) -> Self {
        Self {
            id: role.id,
            authority: role.authority,
        }
    }
}
