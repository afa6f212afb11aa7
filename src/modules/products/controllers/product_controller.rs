use std::sync::Arc;

use actix_web::{web, HttpRequest, HttpResponse};

use crate::core::error::AppError;
use crate::core::pagination::{PageQuery, PageRequest};
use crate::modules::products::models::ProductRequest;
use crate::modules::products::repositories::product_repository::SORTABLE_COLUMNS;
use crate::modules::products::services::ProductService;

/// List products with paging
/// GET /products
pub async fn list_products(
    service: web::Data<Arc<ProductService>>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, AppError> {
    let page = PageRequest::from_query(&query, SORTABLE_COLUMNS)?;
    let products = service.find_all_paged(&page).await?;

    Ok(HttpResponse::Ok().json(products))
}

/// Get product by ID
/// GET /products/{id}
pub async fn get_product(
    service: web::Data<Arc<ProductService>>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let product = service.find_by_id(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(product))
}

/// Create a new product
/// POST /products
pub async fn create_product(
    service: web::Data<Arc<ProductService>>,
    request: web::Json<ProductRequest>,
    http_request: HttpRequest,
) -> Result<HttpResponse, AppError> {
    let product = service.insert(request.into_inner()).await?;

    let location = format!("{}/{}", http_request.path(), product.id);
    Ok(HttpResponse::Created()
        .insert_header(("Location", location))
        .json(product))
}

/// Update an existing product
/// PUT /products/{id}
pub async fn update_product(
    service: web::Data<Arc<ProductService>>,
    path: web::Path<i64>,
    request: web::Json<ProductRequest>,
) -> Result<HttpResponse, AppError> {
    let product = service
        .update(path.into_inner(), request.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(product))
}

/// Delete a product
/// DELETE /products/{id}
pub async fn delete_product(
    service: web::Data<Arc<ProductService>>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    service.delete(path.into_inner()).await?;

    Ok(HttpResponse::NoContent().finish())
}

/// Configure product routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/products")
            .route("", web::get().to(list_products))
            .route("", web::post().to(create_product))
            .route("/{id}", web::get().to(get_product))
            .route("/{id}", web::put().to(update_product))
            .route("/{id}", web::delete().to(delete_product)),
    );
}
