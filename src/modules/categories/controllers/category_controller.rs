use std::sync::Arc;

use actix_web::{web, HttpRequest, HttpResponse};

use crate::core::error::AppError;
use crate::core::pagination::{PageQuery, PageRequest};
use crate::modules::categories::models::CategoryRequest;
use crate::modules::categories::repositories::category_repository::SORTABLE_COLUMNS;
use crate::modules::categories::services::CategoryService;

/// List categories with paging
/// GET /categories
pub async fn list_categories(
    service: web::Data<Arc<CategoryService>>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, AppError> {
    let page = PageRequest::from_query(&query, SORTABLE_COLUMNS)?;
    let categories = service.find_all_paged(&page).await?;

    Ok(HttpResponse::Ok().json(categories))
}

/// Get category by ID
/// GET /categories/{id}
pub async fn get_category(
    service: web::Data<Arc<CategoryService>>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let category = service.find_by_id(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(category))
}

/// Create a new category
/// POST /categories
pub async fn create_category(
    service: web::Data<Arc<CategoryService>>,
    request: web::Json<CategoryRequest>,
    http_request: HttpRequest,
) -> Result<HttpResponse, AppError> {
    let category = service.insert(request.into_inner()).await?;

    let location = format!("{}/{}", http_request.path(), category.id);
    Ok(HttpResponse::Created()
        .insert_header(("Location", location))
        .json(category))
}

/// Update an existing category
/// PUT /categories/{id}
pub async fn update_category(
    service: web::Data<Arc<CategoryService>>,
    path: web::Path<i64>,
    request: web::Json<CategoryRequest>,
) -> Result<HttpResponse, AppError> {
    let category = service
        .update(path.into_inner(), request.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(category))
}

/// Delete a category
/// DELETE /categories/{id}
pub async fn delete_category(
    service: web::Data<Arc<CategoryService>>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    service.delete(path.into_inner()).await?;

    Ok(HttpResponse::NoContent().finish())
}

/// Configure category routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/categories")
            .route("", web::get().to(list_categories))
            .route("", web::post().to(create_category))
            .route("/{id}", web::get().to(get_category))
            .route("/{id}", web::put().to(update_category))
            .route("/{id}", web::delete().to(delete_category)),
    );
}
