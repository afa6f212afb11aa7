// User service behavior: insert-time password hashing, role reconciliation,
// and the password staying untouched across updates.

#[path = "../helpers/mod.rs"]
mod helpers;

use catalogd::core::{AppError, PasswordEncoder};

use helpers::factory;
use helpers::memory::{new_store, seed_role};

#[tokio::test]
async fn test_insert_hashes_password() {
    let store = new_store();
    let role = seed_role(&store, "ROLE_OPERATOR");
    let service = factory::user_service(&store);

    let created = service
        .insert(factory::user_create_request(
            "maria@example.com",
            vec![role.id],
        ))
        .await
        .unwrap();

    let stored = store.lock().unwrap().users[&created.id].clone();
    assert_ne!(stored.password_hash, "s3cret");
    assert!(PasswordEncoder::new()
        .verify("s3cret", &stored.password_hash)
        .unwrap());
}

#[tokio::test]
async fn test_insert_resolves_roles() {
    let store = new_store();
    let operator = seed_role(&store, "ROLE_OPERATOR");
    let admin = seed_role(&store, "ROLE_ADMIN");
    let service = factory::user_service(&store);

    let created = service
        .insert(factory::user_create_request(
            "maria@example.com",
            vec![operator.id, admin.id],
        ))
        .await
        .unwrap();

    let authorities: Vec<&str> = created
        .roles
        .iter()
        .map(|r| r.authority.as_str())
        .collect();
    assert_eq!(authorities, vec!["ROLE_OPERATOR", "ROLE_ADMIN"]);
}

#[tokio::test]
async fn test_insert_with_unknown_role_is_validation_error() {
    let store = new_store();
    let service = factory::user_service(&store);

    let err = service
        .insert(factory::user_create_request("maria@example.com", vec![9]))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Validation(_)));
    assert!(store.lock().unwrap().users.is_empty());
}

#[tokio::test]
async fn test_update_does_not_touch_password() {
    let store = new_store();
    let role = seed_role(&store, "ROLE_OPERATOR");
    let service = factory::user_service(&store);

    let created = service
        .insert(factory::user_create_request(
            "maria@example.com",
            vec![role.id],
        ))
        .await
        .unwrap();

    let hash_before = store.lock().unwrap().users[&created.id].password_hash.clone();

    service
        .update(
            created.id,
            factory::user_update_request("maria.souza@example.com", vec![role.id]),
        )
        .await
        .unwrap();

    let stored = store.lock().unwrap().users[&created.id].clone();
    assert_eq!(stored.password_hash, hash_before);
    assert_eq!(stored.email, "maria.souza@example.com");
    assert_eq!(stored.last_name, "Souza");
}

#[tokio::test]
async fn test_update_replaces_role_set() {
    let store = new_store();
    let operator = seed_role(&store, "ROLE_OPERATOR");
    let admin = seed_role(&store, "ROLE_ADMIN");
    let service = factory::user_service(&store);

    let created = service
        .insert(factory::user_create_request(
            "maria@example.com",
            vec![operator.id],
        ))
        .await
        .unwrap();

    let updated = service
        .update(
            created.id,
            factory::user_update_request("maria@example.com", vec![admin.id]),
        )
        .await
        .unwrap();

    let ids: Vec<i64> = updated.roles.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![admin.id]);
}

#[tokio::test]
async fn test_update_with_unknown_role_keeps_original_set() {
    let store = new_store();
    let operator = seed_role(&store, "ROLE_OPERATOR");
    let service = factory::user_service(&store);

    let created = service
        .insert(factory::user_create_request(
            "maria@example.com",
            vec![operator.id],
        ))
        .await
        .unwrap();

    let err = service
        .update(
            created.id,
            factory::user_update_request("maria@example.com", vec![operator.id, 555]),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let fetched = service.find_by_id(created.id).await.unwrap();
    let ids: Vec<i64> = fetched.roles.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![operator.id]);
}

#[tokio::test]
async fn test_duplicate_email_is_conflict() {
    let store = new_store();
    let service = factory::user_service(&store);

    service
        .insert(factory::user_create_request("maria@example.com", vec![]))
        .await
        .unwrap();

    let err = service
        .insert(factory::user_create_request("maria@example.com", vec![]))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn test_find_by_id_missing_is_not_found() {
    let store = new_store();
    let service = factory::user_service(&store);

    let err = service.find_by_id(7).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_delete_missing_is_not_found() {
    let store = new_store();
    let service = factory::user_service(&store);

    let err = service.delete(7).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_dto_never_carries_password() {
    let store = new_store();
    let service = factory::user_service(&store);

    let created = service
        .insert(factory::user_create_request("maria@example.com", vec![]))
        .await
        .unwrap();

    let json = serde_json::to_value(&created).unwrap();
    assert!(json.get("password").is_none());
    assert!(json.get("password_hash").is_none());
}
