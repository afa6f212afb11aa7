use serde::{Deserialize, Serialize};

use crate::core::{AppError, Result};

use super::role::{Role, RoleDto};

/// User entity as stored; `password_hash` never leaves this layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub roles: Vec<Role>,
}

/// Wire-level representation of a user. The password hash is internal-only
/// and has no field here at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDto {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub roles: Vec<RoleDto>,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            roles: user.roles.into_iter().map(RoleDto::from).collect(),
        }
    }
}

/// Create payload for a user; the only place a plaintext password enters
#[derive(Debug, Clone, Deserialize)]
pub struct UserCreateRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub role_ids: Vec<i64>,
}

impl UserCreateRequest {
    pub fn validate(&self) -> Result<()> {
        validate_profile(&self.first_name, &self.email)?;
        if self.password.trim().is_empty() {
            return Err(AppError::validation("Password cannot be blank"));
        }
        Ok(())
    }
}

/// Update payload for a user; the password is not touched by update
#[derive(Debug, Clone, Deserialize)]
pub struct UserUpdateRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub role_ids: Vec<i64>,
}

impl UserUpdateRequest {
    pub fn validate(&self) -> Result<()> {
        validate_profile(&self.first_name, &self.email)
    }
}

fn validate_profile(first_name: &str, email: &str) -> Result<()> {
    if first_name.trim().is_empty() {
        return Err(AppError::validation("First name cannot be blank"));
    }
    if email.trim().is_empty() || !email.contains('@') {
        return Err(AppError::validation("A valid email is required"));
    }
    Ok(())
}
