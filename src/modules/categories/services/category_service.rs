use std::sync::Arc;

use crate::core::{AppError, Page, PageRequest, Result};
use crate::modules::categories::models::{Category, CategoryDto, CategoryRequest};
use crate::modules::categories::repositories::CategoryRepository;

/// CRUD orchestration for categories
pub struct CategoryService {
    repository: Arc<dyn CategoryRepository>,
}

impl CategoryService {
    pub fn new(repository: Arc<dyn CategoryRepository>) -> Self {
        Self { repository }
    }

    pub async fn find_all_paged(&self, page: &PageRequest) -> Result<Page<CategoryDto>> {
        let categories = self.repository.find_all_paged(page).await?;
        Ok(categories.map(CategoryDto::from))
    }

    pub async fn find_by_id(&self, id: i64) -> Result<CategoryDto> {
        let category = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Category with id '{}' not found", id)))?;

        Ok(category.into())
    }

    pub async fn insert(&self, request: CategoryRequest) -> Result<CategoryDto> {
        request.validate()?;

        let category = self.repository.insert(request.name.trim()).await?;
        Ok(category.into())
    }

    pub async fn update(&self, id: i64, request: CategoryRequest) -> Result<CategoryDto> {
        request.validate()?;

        let existing = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Category with id '{}' not found", id)))?;

        let updated = self
            .repository
            .update(&Category {
                id: existing.id,
                name: request.name.trim().to_string(),
            })
            .await?;

        Ok(updated.into())
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.repository.delete_by_id(id).await
    }
}
