//! User store integration tests against a real SQLite database.

mod support;

use common::AppError;
use domain::CreateUser;
use sea_orm::TransactionTrait;
use user_service_lib::repository::{UserRepository, UserStore};

use support::{insert_user_at, seed_three_users, test_db, test_store};

// =============================================================================
// Listing
// =============================================================================

#[tokio::test]
async fn test_list_all_empty() {
    let (_db, store) = test_store().await;

    let users = store.list_all().await.unwrap();
    assert!(users.is_empty());
}

#[tokio::test]
async fn test_list_all_newest_first() {
    let (db, store) = test_store().await;
    let [t1, t2, t3] = seed_three_users(&db).await;

    let ids: Vec<_> = store.list_all().await.unwrap().iter().map(|u| u.id).collect();
    assert_eq!(ids, vec![t3, t2, t1]);
}

#[tokio::test]
async fn test_list_all_same_second_newest_id_first() {
    let (db, store) = test_store().await;
    let a = insert_user_at(&db, "a", "tok-a", "2024-01-01 10:00:00").await;
    let b = insert_user_at(&db, "b", "tok-b", "2024-01-01 10:00:00").await;

    let ids: Vec<_> = store.list_all().await.unwrap().iter().map(|u| u.id).collect();
    assert_eq!(ids, vec![b, a]);
}

#[tokio::test]
async fn test_list_all_returns_complete_records() {
    let (db, store) = test_store().await;
    insert_user_at(&db, "Alice", "tok-1", "2024-03-04 05:06:07").await;

    let users = store.list_all().await.unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].name, "Alice");
    assert_eq!(users[0].auth_token, "tok-1");
    assert_eq!(users[0].created_at.to_rfc3339(), "2024-03-04T05:06:07+00:00");
}

// =============================================================================
// Pagination
// =============================================================================

#[tokio::test]
async fn test_paginate_first_page() {
    let (db, store) = test_store().await;
    let [_t1, t2, t3] = seed_three_users(&db).await;

    let page = store.paginate(2, 1).await.unwrap();

    let ids: Vec<_> = page.users.iter().map(|u| u.id).collect();
    assert_eq!(ids, vec![t3, t2]);
    assert_eq!(page.current_page, 1);
    assert_eq!(page.per_page, 2);
    assert_eq!(page.next_page, Some(2));
    assert_eq!(page.previous_page, None);
}

#[tokio::test]
async fn test_paginate_second_page() {
    let (db, store) = test_store().await;
    let [t1, _t2, _t3] = seed_three_users(&db).await;

    let page = store.paginate(2, 2).await.unwrap();

    let ids: Vec<_> = page.users.iter().map(|u| u.id).collect();
    assert_eq!(ids, vec![t1]);
    assert_eq!(page.current_page, 2);
    assert_eq!(page.next_page, None);
    assert_eq!(page.previous_page, Some(1));
}

#[tokio::test]
async fn test_paginate_page_zero_matches_page_one() {
    let (db, store) = test_store().await;
    seed_three_users(&db).await;

    let zero = store.paginate(2, 0).await.unwrap();
    let one = store.paginate(2, 1).await.unwrap();

    assert_eq!(zero.users, one.users);
    assert_eq!(zero.current_page, 0);
    assert_eq!(zero.next_page, Some(1));
    assert_eq!(zero.previous_page, None);
}

#[tokio::test]
async fn test_paginate_past_the_end_keeps_previous_page() {
    let (db, store) = test_store().await;
    seed_three_users(&db).await;

    let page = store.paginate(2, 5).await.unwrap();

    assert!(page.users.is_empty());
    assert_eq!(page.next_page, None);
    assert_eq!(page.previous_page, Some(4));
}

#[tokio::test]
async fn test_paginate_middle_page_of_many() {
    let (db, store) = test_store().await;
    for hour in 10..15 {
        let created_at = format!("2024-01-01 {}:00:00", hour);
        insert_user_at(&db, "user", &format!("tok-{}", hour), &created_at).await;
    }

    let page = store.paginate(2, 2).await.unwrap();

    let tokens: Vec<_> = page.users.iter().map(|u| u.auth_token.as_str()).collect();
    assert_eq!(tokens, vec!["tok-12", "tok-11"]);
    assert_eq!(page.next_page, Some(3));
    assert_eq!(page.previous_page, Some(1));
}

#[tokio::test]
async fn test_paginate_exact_fit_has_no_next_page() {
    let (db, store) = test_store().await;
    seed_three_users(&db).await;

    let page = store.paginate(3, 1).await.unwrap();

    assert_eq!(page.users.len(), 3);
    assert_eq!(page.next_page, None);
}

#[tokio::test]
async fn test_paginate_empty_relation() {
    let (_db, store) = test_store().await;

    let page = store.paginate(10, 1).await.unwrap();

    assert!(page.users.is_empty());
    assert_eq!(page.next_page, None);
    assert_eq!(page.previous_page, None);
}

// =============================================================================
// Lookups
// =============================================================================

#[tokio::test]
async fn test_find_by_id_missing_is_none() {
    let (_db, store) = test_store().await;

    assert!(store.find_by_id(404).await.unwrap().is_none());
}

#[tokio::test]
async fn test_find_by_token_missing_is_none() {
    let (db, store) = test_store().await;
    seed_three_users(&db).await;

    assert!(store.find_by_token("tok-404").await.unwrap().is_none());
}

#[tokio::test]
async fn test_find_by_token_is_exact() {
    let (_db, store) = test_store().await;
    store.create(CreateUser::new("Alice", "Tok-1")).await.unwrap();

    assert!(store.find_by_token("tok-1").await.unwrap().is_none());
    assert!(store.find_by_token("Tok-1 ").await.unwrap().is_none());
    assert!(store.find_by_token("Tok-1").await.unwrap().is_some());
}

#[tokio::test]
async fn test_find_by_token_duplicates_return_earliest() {
    let (db, store) = test_store().await;
    let first = insert_user_at(&db, "first", "shared", "2024-01-01 10:00:00").await;
    insert_user_at(&db, "second", "shared", "2024-01-01 11:00:00").await;

    let user = store.find_by_token("shared").await.unwrap().unwrap();
    assert_eq!(user.id, first);
}

// =============================================================================
// Creation
// =============================================================================

#[tokio::test]
async fn test_create_then_find_by_id_matches() {
    let (_db, store) = test_store().await;

    let created = store.create(CreateUser::new("Alice", "tok-1")).await.unwrap();
    let found = store.find_by_id(created.id).await.unwrap().unwrap();

    assert_eq!(found, created);
    assert_eq!(created.name, "Alice");
    assert_eq!(created.auth_token, "tok-1");
}

#[tokio::test]
async fn test_create_stamps_creation_time() {
    let (_db, store) = test_store().await;
    let before = chrono::Utc::now() - chrono::Duration::seconds(2);

    let created = store.create(CreateUser::new("Alice", "tok-1")).await.unwrap();

    let after = chrono::Utc::now() + chrono::Duration::seconds(2);
    assert!(created.created_at >= before && created.created_at <= after);
}

#[tokio::test]
async fn test_create_accepts_empty_values() {
    let (_db, store) = test_store().await;

    let created = store.create(CreateUser::new("", "")).await.unwrap();

    assert_eq!(created.name, "");
    assert_eq!(created.auth_token, "");
}

#[tokio::test]
async fn test_sql_like_values_are_stored_verbatim() {
    let (_db, store) = test_store().await;
    let name = r#"SELECT "a:b" /* :id */ FROM users"#;
    let token = "it's :token -- ?";

    let created = store.create(CreateUser::new(name, token)).await.unwrap();
    let found = store.find_by_token(token).await.unwrap().unwrap();

    assert_eq!(created.name, name);
    assert_eq!(found, created);
    assert!(store.find_by_token(":token").await.unwrap().is_none());
}

#[tokio::test]
async fn test_create_assigns_increasing_ids() {
    let (_db, store) = test_store().await;

    let a = store.create(CreateUser::new("a", "tok-a")).await.unwrap();
    let b = store.create(CreateUser::new("b", "tok-b")).await.unwrap();

    assert!(b.id > a.id);
}

#[tokio::test]
async fn test_concurrent_creates_read_back_their_own_rows() {
    let (_db, store) = test_store().await;

    let (a, b) = tokio::join!(
        store.create(CreateUser::new("a", "tok-a")),
        store.create(CreateUser::new("b", "tok-b")),
    );
    let (a, b) = (a.unwrap(), b.unwrap());

    assert_ne!(a.id, b.id);
    assert_eq!((a.name.as_str(), a.auth_token.as_str()), ("a", "tok-a"));
    assert_eq!((b.name.as_str(), b.auth_token.as_str()), ("b", "tok-b"));
}

#[tokio::test]
async fn test_create_inside_rolled_back_transaction() {
    let (db, store) = test_store().await;

    let txn = db.connection().begin().await.unwrap();
    let tx_store = UserStore::new(txn);
    let created = tx_store.create(CreateUser::new("Alice", "tok-1")).await.unwrap();
    assert_eq!(created.name, "Alice");
    tx_store.into_inner().rollback().await.unwrap();

    assert!(store.list_all().await.unwrap().is_empty());
}

// =============================================================================
// Deletion
// =============================================================================

#[tokio::test]
async fn test_delete_removes_user() {
    let (_db, store) = test_store().await;
    let created = store.create(CreateUser::new("Alice", "tok-1")).await.unwrap();

    let rows = store.delete(created.id).await.unwrap();

    assert_eq!(rows, 1);
    assert!(store.find_by_id(created.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_delete_missing_id_is_not_an_error() {
    let (_db, store) = test_store().await;

    let rows = store.delete(12345).await.unwrap();
    assert_eq!(rows, 0);
}

// =============================================================================
// Failure propagation
// =============================================================================

#[tokio::test]
async fn test_missing_table_surfaces_database_error() {
    let db = test_db().await;
    db.rollback_migration().await.unwrap();
    let store = UserStore::new(db.get_connection());

    let result = store.list_all().await;
    assert!(matches!(result, Err(AppError::Database(_))));

    let result = store.create(CreateUser::new("Alice", "tok-1")).await;
    assert!(matches!(result, Err(AppError::Database(_))));
}
