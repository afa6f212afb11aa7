// HTTP contract for /categories: status codes, Location header, error shape.

#[path = "../helpers/mod.rs"]
mod helpers;

use actix_web::{test, web, App};
use serde_json::{json, Value};

use catalogd::modules::categories::controllers::category_controller;

use helpers::factory;
use helpers::memory::{new_store, seed_category, SharedStore};

macro_rules! category_app {
    ($store:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(factory::category_service($store)))
                .configure(category_controller::configure),
        )
        .await
    };
}

fn seed_referencing_product(store: &SharedStore, category: &catalogd::categories::Category) {
    use catalogd::products::Product;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    let mut guard = store.lock().unwrap();
    guard.products.insert(
        999,
        Product {
            id: 999,
            name: "Phone".to_string(),
            description: String::new(),
            price: dec!(800.00),
            image_url: String::new(),
            date: Utc::now(),
            categories: vec![category.clone()],
        },
    );
}

#[actix_web::test]
async fn test_list_returns_page_envelope() {
    let store = new_store();
    seed_category(&store, "Livros");
    seed_category(&store, "Eletrônicos");
    let app = category_app!(&store);

    let req = test::TestRequest::get()
        .uri("/categories?page=0&size=12&sort=name&direction=asc")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["total_elements"], 2);
    assert_eq!(body["page"], 0);
    assert_eq!(body["content"][0]["name"], "Eletrônicos");
    assert_eq!(body["content"][1]["name"], "Livros");
}

#[actix_web::test]
async fn test_get_missing_returns_404() {
    let store = new_store();
    let app = category_app!(&store);

    let req = test::TestRequest::get().uri("/categories/42").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["code"], 404);
}

#[actix_web::test]
async fn test_create_returns_201_with_location() {
    let store = new_store();
    let app = category_app!(&store);

    let req = test::TestRequest::post()
        .uri("/categories")
        .set_json(json!({"name": "Livros"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);

    let location = resp
        .headers()
        .get("Location")
        .and_then(|h| h.to_str().ok())
        .unwrap()
        .to_string();

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["name"], "Livros");
    assert_eq!(location, format!("/categories/{}", body["id"]));
}

#[actix_web::test]
async fn test_create_blank_name_returns_400() {
    let store = new_store();
    let app = category_app!(&store);

    let req = test::TestRequest::post()
        .uri("/categories")
        .set_json(json!({"name": "  "}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}

#[actix_web::test]
async fn test_update_missing_returns_404() {
    let store = new_store();
    let app = category_app!(&store);

    let req = test::TestRequest::put()
        .uri("/categories/42")
        .set_json(json!({"name": "Livros"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
}

#[actix_web::test]
async fn test_delete_returns_204() {
    let store = new_store();
    let category = seed_category(&store, "Livros");
    let app = category_app!(&store);

    let req = test::TestRequest::delete()
        .uri(&format!("/categories/{}", category.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 204);
}

#[actix_web::test]
async fn test_delete_missing_returns_404() {
    let store = new_store();
    let app = category_app!(&store);

    let req = test::TestRequest::delete().uri("/categories/42").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
}

#[actix_web::test]
async fn test_delete_referenced_returns_409() {
    let store = new_store();
    let category = seed_category(&store, "Eletrônicos");
    seed_referencing_product(&store, &category);
    let app = category_app!(&store);

    let req = test::TestRequest::delete()
        .uri(&format!("/categories/{}", category.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 409);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["code"], 409);
}

#[actix_web::test]
async fn test_unknown_sort_field_returns_400() {
    let store = new_store();
    let app = category_app!(&store);

    let req = test::TestRequest::get()
        .uri("/categories?sort=secret")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}
