use std::sync::Arc;

use actix_web::{web, HttpRequest, HttpResponse};

use crate::core::error::AppError;
use crate::core::pagination::{PageQuery, PageRequest};
use crate::modules::users::models::{UserCreateRequest, UserUpdateRequest};
use crate::modules::users::repositories::user_repository::SORTABLE_COLUMNS;
use crate::modules::users::services::UserService;

/// List users with paging
/// GET /users
pub async fn list_users(
    service: web::Data<Arc<UserService>>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, AppError> {
    let page = PageRequest::from_query(&query, SORTABLE_COLUMNS)?;
    let users = service.find_all_paged(&page).await?;

    Ok(HttpResponse::Ok().json(users))
}

/// Get user by ID
/// GET /users/{id}
pub async fn get_user(
    service: web::Data<Arc<UserService>>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let user = service.find_by_id(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(user))
}

/// Create a new user
/// POST /users
pub async fn create_user(
    service: web::Data<Arc<UserService>>,
    request: web::Json<UserCreateRequest>,
    http_request: HttpRequest,
) -> Result<HttpResponse, AppError> {
    let user = service.insert(request.into_inner()).await?;

    let location = format!("{}/{}", http_request.path(), user.id);
    Ok(HttpResponse::Created()
        .insert_header(("Location", location))
        .json(user))
}

/// Update an existing user; the password is not part of the update payload
/// PUT /users/{id}
pub async fn update_user(
    service: web::Data<Arc<UserService>>,
    path: web::Path<i64>,
    request: web::Json<UserUpdateRequest>,
) -> Result<HttpResponse, AppError> {
    let user = service
        .update(path.into_inner(), request.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(user))
}

/// Delete a user
/// DELETE /users/{id}
pub async fn delete_user(
    service: web::Data<Arc<UserService>>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    service.delete(path.into_inner()).await?;

    Ok(HttpResponse::NoContent().finish())
}

/// Configure user routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/users")
            .route("", web::get().to(list_users))
            .route("", web::post().to(create_user))
            .route("/{id}", web::get().to(get_user))
            .route("/{id}", web::put().to(update_user))
            .route("/{id}", web::delete().to(delete_user)),
    );
}
