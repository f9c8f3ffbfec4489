mod common;

use chrono::DateTime;
use chrono::Utc;
use common::db::TestDb;
use identity_service::domain::user::models::EmailAddress;
use identity_service::domain::user::models::User;
use identity_service::domain::user::models::UserId;
use identity_service::domain::user::ports::UserRepository;
use identity_service::outbound::repositories::PostgresUserRepository;
use identity_service::user::errors::UserError;

fn created_at() -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000, 0).unwrap()
}

fn user(email: &str) -> User {
    User {
        id: UserId::new(),
        firstname: "Ann".to_string(),
        lastname: "Lee".to_string(),
        email: EmailAddress::new(email.to_string()).unwrap(),
        password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string(),
        created_at: created_at(),
    }
}

/// Insert a row bypassing normalization, as older data might hold.
async fn insert_raw(db: &TestDb, email: &str) {
    sqlx::query(
        r#"
        INSERT INTO users (id, firstname, lastname, email, password_hash, created_at)
        VALUES ($1, 'Old', 'Row', $2, 'hash', NOW())
        "#,
    )
    .bind(uuid::Uuid::new_v4())
    .bind(email)
    .execute(&db.pool)
    .await
    .expect("Failed to insert row");
}

#[tokio::test]
async fn test_create_and_find_by_email() {
    let Some(db) = TestDb::from_env().await else {
        return;
    };
    let repository = PostgresUserRepository::new(db.pool.clone());

    let ann = user("ann@x.com");
    repository.create(ann.clone()).await.unwrap();

    let found = repository
        .find_by_email(&ann.email)
        .await
        .unwrap()
        .expect("user should exist");
    assert_eq!(found, ann);

    assert!(repository.exists_by_email(&ann.email).await.unwrap());

    let missing = EmailAddress::new("nobody@x.com".to_string()).unwrap();
    assert!(repository.find_by_email(&missing).await.unwrap().is_none());
    assert!(!repository.exists_by_email(&missing).await.unwrap());
}

#[tokio::test]
async fn test_lookup_ignores_stored_case() {
    let Some(db) = TestDb::from_env().await else {
        return;
    };
    let repository = PostgresUserRepository::new(db.pool.clone());
    insert_raw(&db, "Mixed.Case@X.com").await;

    let email = EmailAddress::new("mixed.case@x.com".to_string()).unwrap();
    let found = repository
        .find_by_email(&email)
        .await
        .unwrap()
        .expect("user should exist");

    assert_eq!(found.email.as_str(), "mixed.case@x.com");
    assert!(repository.exists_by_email(&email).await.unwrap());
}

#[tokio::test]
async fn test_duplicate_email_is_email_taken() {
    let Some(db) = TestDb::from_env().await else {
        return;
    };
    let repository = PostgresUserRepository::new(db.pool.clone());

    repository.create(user("ann@x.com")).await.unwrap();

    let result = repository.create(user("ann@x.com")).await;
    assert_eq!(result, Err(UserError::EmailTaken("ann@x.com".to_string())));
}

#[tokio::test]
async fn test_case_variant_of_stored_email_is_email_taken() {
    let Some(db) = TestDb::from_env().await else {
        return;
    };
    let repository = PostgresUserRepository::new(db.pool.clone());
    insert_raw(&db, "Bob@X.com").await;

    let result = repository.create(user("bob@x.com")).await;
    assert_eq!(result, Err(UserError::EmailTaken("bob@x.com".to_string())));
}

#[tokio::test]
async fn test_update_only_touches_names() {
    let Some(db) = TestDb::from_env().await else {
        return;
    };
    let repository = PostgresUserRepository::new(db.pool.clone());

    let ann = user("ann@x.com");
    repository.create(ann.clone()).await.unwrap();

    let mut changed = ann.clone();
    changed.firstname = "Anna".to_string();
    changed.lastname = String::new();
    changed.password_hash = "tampered".to_string();
    repository.update(changed).await.unwrap();

    let stored = repository.find_by_email(&ann.email).await.unwrap().unwrap();
    assert_eq!(stored.firstname, "Anna");
    assert_eq!(stored.lastname, "");
    assert_eq!(stored.password_hash, ann.password_hash);
}

#[tokio::test]
async fn test_update_missing_user() {
    let Some(db) = TestDb::from_env().await else {
        return;
    };
    let repository = PostgresUserRepository::new(db.pool.clone());

    let ghost = user("ghost@x.com");
    let result = repository.update(ghost.clone()).await;

    assert_eq!(result, Err(UserError::UserNotFound(ghost.id.to_string())));
}
