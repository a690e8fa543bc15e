//! Directory service integration tests.

use std::collections::HashSet;
use std::sync::Arc;

use tempfile::TempDir;

use common::AppError;
use domain::{
    ConflictField, Credentials, LoginFailure, RegisterUser, UserDocument, UserRecord, Violation,
};
use directory_service_lib::service::{Directory, DirectoryService};
use directory_service_lib::store::{InMemoryStore, JsonFileStore, UserDocumentStore};

fn registration(first: &str, email: &str, phone: &str) -> RegisterUser {
    RegisterUser {
        first_name: Some(first.to_string()),
        last_name: Some("Doe".to_string()),
        email: Some(email.to_string()),
        phone: Some(phone.to_string()),
        password: Some("secret1".to_string()),
    }
}

fn email_login(email: &str, password: &str) -> Credentials {
    Credentials {
        email: Some(email.to_string()),
        phone: None,
        password: Some(password.to_string()),
    }
}

fn memory_directory() -> (Arc<InMemoryStore>, Directory) {
    let store = Arc::new(InMemoryStore::new());
    let directory = Directory::new(store.clone());
    (store, directory)
}

// =============================================================================
// Registration
// =============================================================================

#[tokio::test]
async fn test_register_returns_normalized_public_user() {
    let (store, directory) = memory_directory();

    let user = directory
        .register(registration("John", "John@Example.com", "(29) 45-67-89"))
        .await
        .unwrap();

    assert_eq!(user.email, "john@example.com");
    assert_eq!(user.phone, "29456789");
    assert_eq!(user.first_name, "John");

    let stored = store.load().await;
    assert_eq!(stored.users.len(), 1);
    assert_eq!(stored.users[0].id, user.id);
    assert_eq!(stored.users[0].password, "secret1");
}

#[tokio::test]
async fn test_register_fails_cleanly_when_ids_are_exhausted() {
    let existing = UserRecord {
        id: u64::MAX.to_string(),
        first_name: "Ann".to_string(),
        last_name: "Lee".to_string(),
        email: "ann@example.com".to_string(),
        phone: "41234567".to_string(),
        password: "pw".to_string(),
        created_at: chrono::Utc::now(),
    };
    let store = Arc::new(InMemoryStore::with_document(UserDocument {
        users: vec![existing],
    }));
    let directory = Directory::new(store.clone());

    let result = directory
        .register(registration("John", "john@example.com", "29456789"))
        .await;

    assert!(matches!(result, Err(AppError::Internal(_))));
    assert_eq!(store.load().await.users.len(), 1);

    // The write section was released on the error path
    directory.clear_all().await.unwrap();
}

#[tokio::test]
async fn test_register_rejects_digits_in_first_name() {
    let (store, directory) = memory_directory();

    let err = directory
        .register(registration("John12", "john@example.com", "29456789"))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Validation(v) if v == vec![Violation::FirstName]));
    assert!(store.load().await.users.is_empty());
}

#[tokio::test]
async fn test_register_rejects_bad_phones() {
    let (_, directory) = memory_directory();

    for phone in ["1234567", "612345678"] {
        let err = directory
            .register(registration("John", "john@example.com", phone))
            .await
            .unwrap_err();
        assert!(
            matches!(&err, AppError::Validation(v) if v == &vec![Violation::Phone]),
            "phone {} should be rejected, got {:?}",
            phone,
            err
        );
    }
}

#[tokio::test]
async fn test_register_reports_all_violations() {
    let (_, directory) = memory_directory();

    let err = directory.register(RegisterUser::default()).await.unwrap_err();

    match err {
        AppError::Validation(violations) => assert_eq!(violations.len(), 5),
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_duplicate_email_is_case_insensitive() {
    let (store, directory) = memory_directory();

    directory
        .register(registration("Ann", "A@B.com", "29456789"))
        .await
        .unwrap();
    let err = directory
        .register(registration("Bob", "a@b.com", "41234567"))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Conflict(ConflictField::Email)));
    assert_eq!(store.load().await.users.len(), 1);
}

#[tokio::test]
async fn test_duplicate_phone_is_compared_normalized() {
    let (_, directory) = memory_directory();

    directory
        .register(registration("Ann", "ann@example.com", "29456789"))
        .await
        .unwrap();
    let err = directory
        .register(registration("Bob", "bob@example.com", "29-45-67-89"))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Conflict(ConflictField::Phone)));
}

#[tokio::test]
async fn test_ids_are_unique_and_increasing() {
    let (_, directory) = memory_directory();

    let mut ids = Vec::new();
    for i in 0..5 {
        let user = directory
            .register(registration(
                "Ann",
                &format!("ann{}@example.com", i),
                &format!("2{:07}", i),
            ))
            .await
            .unwrap();
        ids.push(user.id.parse::<u64>().unwrap());
    }

    assert!(ids.windows(2).all(|w| w[0] < w[1]));
}

// =============================================================================
// Clear and list
// =============================================================================

#[tokio::test]
async fn test_clear_allows_re_registration() {
    let (_, directory) = memory_directory();

    directory
        .register(registration("Ann", "ann@example.com", "29456789"))
        .await
        .unwrap();
    directory.clear_all().await.unwrap();

    assert!(directory.list_users().await.unwrap().is_empty());
    directory
        .register(registration("Ann", "ann@example.com", "29456789"))
        .await
        .unwrap();
    assert_eq!(directory.list_users().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_list_preserves_order_and_hides_passwords() {
    let (_, directory) = memory_directory();

    for (name, email, phone) in [
        ("Ann", "ann@example.com", "29456789"),
        ("Bob", "bob@example.com", "41234567"),
        ("Cat", "cat@example.com", "51234567"),
    ] {
        directory.register(registration(name, email, phone)).await.unwrap();
    }

    let users = directory.list_users().await.unwrap();
    let names: Vec<_> = users.iter().map(|u| u.first_name.as_str()).collect();
    assert_eq!(names, ["Ann", "Bob", "Cat"]);

    let json = serde_json::to_value(&users).unwrap();
    for user in json.as_array().unwrap() {
        assert!(user.get("password").is_none());
    }
}

// =============================================================================
// Login
// =============================================================================

#[tokio::test]
async fn test_login_with_email_and_phone() {
    let (_, directory) = memory_directory();
    let registered = directory
        .register(registration("Ann", "Ann@Example.com", "29456789"))
        .await
        .unwrap();

    let by_email = directory
        .login(email_login("ANN@example.com", "secret1"))
        .await
        .unwrap();
    assert_eq!(by_email, registered);

    let by_phone = directory
        .login(Credentials {
            email: None,
            phone: Some("29 45 67 89".to_string()),
            password: Some("secret1".to_string()),
        })
        .await
        .unwrap();
    assert_eq!(by_phone.id, registered.id);
}

#[tokio::test]
async fn test_login_distinguishes_failures() {
    let (_, directory) = memory_directory();
    directory
        .register(registration("Ann", "ann@example.com", "29456789"))
        .await
        .unwrap();

    let wrong_password = directory
        .login(email_login("ann@example.com", "nope"))
        .await
        .unwrap_err();
    assert!(matches!(
        wrong_password,
        AppError::InvalidCredentials(LoginFailure::PasswordMismatch)
    ));

    let unknown = directory
        .login(email_login("nobody@example.com", "secret1"))
        .await
        .unwrap_err();
    assert!(matches!(
        unknown,
        AppError::InvalidCredentials(LoginFailure::UnknownIdentifier)
    ));

    let missing = directory.login(Credentials::default()).await.unwrap_err();
    assert!(matches!(
        missing,
        AppError::InvalidCredentials(LoginFailure::MissingCredentials)
    ));
}

// =============================================================================
// Concurrency
// =============================================================================

async fn file_directory(dir: &TempDir) -> (Arc<JsonFileStore>, Arc<Directory>) {
    let store = Arc::new(JsonFileStore::open(dir.path().join("users.json")).await.unwrap());
    let directory = Arc::new(Directory::new(store.clone()));
    (store, directory)
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_distinct_registrations_are_all_kept() {
    const N: usize = 32;
    let dir = TempDir::new().unwrap();
    let (store, directory) = file_directory(&dir).await;

    let handles: Vec<_> = (0..N)
        .map(|i| {
            let directory = directory.clone();
            tokio::spawn(async move {
                directory
                    .register(registration(
                        "Ann",
                        &format!("user{}@example.com", i),
                        &format!("9{:07}", i),
                    ))
                    .await
            })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let users = store.load().await.users;
    assert_eq!(users.len(), N);

    let emails: HashSet<_> = users.iter().map(|u| u.email.clone()).collect();
    let phones: HashSet<_> = users.iter().map(|u| u.phone.clone()).collect();
    let ids: HashSet<_> = users.iter().map(|u| u.id.clone()).collect();
    assert_eq!(emails.len(), N);
    assert_eq!(phones.len(), N);
    assert_eq!(ids.len(), N);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_same_email_has_single_winner() {
    const N: usize = 16;
    let dir = TempDir::new().unwrap();
    let (store, directory) = file_directory(&dir).await;

    let handles: Vec<_> = (0..N)
        .map(|i| {
            let directory = directory.clone();
            tokio::spawn(async move {
                directory
                    .register(registration("Ann", "same@example.com", &format!("4{:07}", i)))
                    .await
            })
        })
        .collect();

    let mut successes = 0;
    let mut conflicts = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => successes += 1,
            Err(AppError::Conflict(ConflictField::Email)) => conflicts += 1,
            Err(other) => panic!("unexpected error: {:?}", other),
        }
    }

    assert_eq!(successes, 1);
    assert_eq!(conflicts, N - 1);
    assert_eq!(store.load().await.users.len(), 1);
}
