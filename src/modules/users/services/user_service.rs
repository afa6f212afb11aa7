use std::collections::BTreeSet;
use std::sync::Arc;

use crate::core::{AppError, Page, PageRequest, PasswordEncoder, Result};
use crate::modules::users::models::{Role, User, UserCreateRequest, UserDto, UserUpdateRequest};
use crate::modules::users::repositories::{RoleRepository, UserRepository};

/// CRUD orchestration for users, including User-Role reconciliation and
/// insert-time password hashing
pub struct UserService {
    users: Arc<dyn UserRepository>,
    roles: Arc<dyn RoleRepository>,
    encoder: PasswordEncoder,
}

impl UserService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        roles: Arc<dyn RoleRepository>,
        encoder: PasswordEncoder,
    ) -> Self {
        Self {
            users,
            roles,
            encoder,
        }
    }

    pub async fn find_all_paged(&self, page: &PageRequest) -> Result<Page<UserDto>> {
        let users = self.users.find_all_paged(page).await?;
        Ok(users.map(UserDto::from))
    }

    pub async fn find_by_id(&self, id: i64) -> Result<UserDto> {
        let user = self
            .users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User with id '{}' not found", id)))?;

        Ok(user.into())
    }

    pub async fn insert(&self, request: UserCreateRequest) -> Result<UserDto> {
        request.validate()?;

        let roles = self.resolve_roles(&request.role_ids).await?;

        // The plaintext stops here
        let password_hash = self.encoder.hash(&request.password)?;

        let mut user = User {
            id: 0,
            first_name: request.first_name.trim().to_string(),
            last_name: request.last_name.trim().to_string(),
            email: request.email.trim().to_string(),
            password_hash,
            roles,
        };

        user.id = self.users.insert(&user).await?;

        Ok(user.into())
    }

    pub async fn update(&self, id: i64, request: UserUpdateRequest) -> Result<UserDto> {
        request.validate()?;

        let existing = self
            .users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User with id '{}' not found", id)))?;

        let roles = self.resolve_roles(&request.role_ids).await?;

        // Scalars overwritten, hash carried over untouched
        let user = User {
            id,
            first_name: request.first_name.trim().to_string(),
            last_name: request.last_name.trim().to_string(),
            email: request.email.trim().to_string(),
            password_hash: existing.password_hash,
            roles,
        };

        self.users.update(&user).await?;

        Ok(user.into())
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.users.delete_by_id(id).await
    }

    async fn resolve_roles(&self, ids: &[i64]) -> Result<Vec<Role>> {
        let requested: BTreeSet<i64> = ids.iter().copied().collect();
        let unique: Vec<i64> = requested.iter().copied().collect();

        let found = self.roles.find_by_ids(&unique).await?;

        if found.len() != unique.len() {
            let found_ids: BTreeSet<i64> = found.iter().map(|r| r.id).collect();
            let missing: Vec<String> = requested
                .difference(&found_ids)
                .map(|id| id.to_string())
                .collect();

            return Err(AppError::validation(format!(
                "Unknown role id(s): {}",
                missing.join(", ")
            )));
        }

        Ok(found)
    }
}
