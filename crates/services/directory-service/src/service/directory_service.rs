//! Directory service - registration, login and listing of users.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{SubsecRound, Utc};

use common::{AppError, AppResult};
use domain::{ConflictField, Credentials, DomainError, LoginFailure, PublicUser, RegisterUser, UserDocument};

use crate::store::UserDocumentStore;

/// Directory service trait for dependency injection.
#[async_trait]
pub trait DirectoryService: Send + Sync {
    /// Validate and store a new user. Email and phone must be unused.
    async fn register(&self, fields: RegisterUser) -> AppResult<PublicUser>;

    /// Look up a user by email or phone and check the password.
    async fn login(&self, credentials: Credentials) -> AppResult<PublicUser>;

    /// All users in registration order
    async fn list_users(&self) -> AppResult<Vec<PublicUser>>;

    /// Remove every user
    async fn clear_all(&self) -> AppResult<()>;
}

/// Concrete implementation of DirectoryService over a document store.
pub struct Directory {
    store: Arc<dyn UserDocumentStore>,
}

impl Directory {
    /// Create new directory service instance with store
    pub fn new(store: Arc<dyn UserDocumentStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl DirectoryService for Directory {
    async fn register(&self, fields: RegisterUser) -> AppResult<PublicUser> {
        let new_user = fields.validate().map_err(DomainError::Validation)?;

        // Uniqueness is only meaningful against the document we write back
        let section = self.store.begin_write().await;
        let mut document = self.store.load().await;

        if document.email_taken(&new_user.email) {
            tracing::warn!("Registration rejected: email already registered");
            return Err(DomainError::Conflict(ConflictField::Email).into());
        }
        if document.phone_taken(&new_user.phone) {
            tracing::warn!("Registration rejected: phone already registered");
            return Err(DomainError::Conflict(ConflictField::Phone).into());
        }

        let created_at = Utc::now().trunc_subsecs(3);
        let id = document
            .next_id(created_at)
            .ok_or_else(|| AppError::internal("User id space exhausted"))?;
        let record = new_user.into_record(id, created_at);
        let user = PublicUser::from(&record);

        document.users.push(record);
        self.store.save(&section, &document).await?;
        drop(section);

        tracing::info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    async fn login(&self, credentials: Credentials) -> AppResult<PublicUser> {
        let (identifier, password) = credentials
            .resolve()
            .map_err(DomainError::InvalidCredentials)?;

        let document = self.store.load().await;
        let mut known = document
            .users
            .iter()
            .filter(|u| identifier.matches(u))
            .peekable();

        if known.peek().is_none() {
            return Err(DomainError::InvalidCredentials(LoginFailure::UnknownIdentifier).into());
        }

        known
            .find(|u| u.password == password)
            .map(PublicUser::from)
            .ok_or_else(|| DomainError::InvalidCredentials(LoginFailure::PasswordMismatch).into())
    }

    async fn list_users(&self) -> AppResult<Vec<PublicUser>> {
        let document = self.store.load().await;
        Ok(document.users.iter().map(PublicUser::from).collect())
    }

    async fn clear_all(&self) -> AppResult<()> {
        let section = self.store.begin_write().await;
        self.store.save(&section, &UserDocument::default()).await?;
        tracing::info!("All users cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error as IoError, ErrorKind};

    use chrono::Utc;
    use common::StorageError;
    use domain::UserRecord;

    use crate::store::{ExclusiveLock, MockUserDocumentStore};

    fn registration(email: &str, phone: &str) -> RegisterUser {
        RegisterUser {
            first_name: Some("John".to_string()),
            last_name: Some("Doe".to_string()),
            email: Some(email.to_string()),
            phone: Some(phone.to_string()),
            password: Some("secret1".to_string()),
        }
    }

    fn existing_user() -> UserRecord {
        UserRecord {
            id: "1".to_string(),
            first_name: "Ann".to_string(),
            last_name: "Lee".to_string(),
            email: "ann@example.com".to_string(),
            phone: "29456789".to_string(),
            password: "pw".to_string(),
            created_at: Utc::now(),
        }
    }

    fn mock_with_lock() -> MockUserDocumentStore {
        let lock = ExclusiveLock::new();
        let mut store = MockUserDocumentStore::new();
        store
            .expect_begin_write()
            .returning(move || lock.try_acquire().expect("lock is uncontended"));
        store
    }

    #[tokio::test]
    async fn test_register_surfaces_write_failure() {
        let mut store = mock_with_lock();
        store.expect_load().returning(UserDocument::default);
        store.expect_save().times(1).returning(|_, _| {
            Err(StorageError::io(
                "write",
                "users.json",
                IoError::new(ErrorKind::Other, "disk full"),
            ))
        });

        let directory = Directory::new(Arc::new(store));
        let result = directory
            .register(registration("john@example.com", "29456789"))
            .await;

        assert!(matches!(result, Err(AppError::Storage(_))));
    }

    #[tokio::test]
    async fn test_conflict_aborts_before_write() {
        let mut store = mock_with_lock();
        store.expect_load().returning(|| UserDocument {
            users: vec![existing_user()],
        });
        store.expect_save().never();

        let directory = Directory::new(Arc::new(store));
        let result = directory
            .register(registration("ANN@example.com", "41234567"))
            .await;

        assert!(matches!(result, Err(AppError::Conflict(ConflictField::Email))));
    }

    #[tokio::test]
    async fn test_validation_runs_before_storage() {
        let mut store = MockUserDocumentStore::new();
        store.expect_begin_write().never();
        store.expect_load().never();
        store.expect_save().never();

        let directory = Directory::new(Arc::new(store));
        let result = directory.register(registration("not-an-email", "1")).await;

        assert!(matches!(result, Err(AppError::Validation(v)) if v.len() == 2));
    }

    #[tokio::test]
    async fn test_login_does_not_lock() {
        let mut store = MockUserDocumentStore::new();
        store.expect_begin_write().never();
        store.expect_load().returning(|| UserDocument {
            users: vec![existing_user()],
        });

        let directory = Directory::new(Arc::new(store));
        let user = directory
            .login(Credentials {
                email: Some("ann@example.com".to_string()),
                phone: None,
                password: Some("pw".to_string()),
            })
            .await
            .unwrap();

        assert_eq!(user.id, "1");
    }

    #[tokio::test]
    async fn test_clear_surfaces_write_failure() {
        let mut store = mock_with_lock();
        store.expect_save().returning(|_, _| {
            Err(StorageError::io(
                "replace",
                "users.json",
                IoError::new(ErrorKind::PermissionDenied, "read-only"),
            ))
        });

        let directory = Directory::new(Arc::new(store));
        assert!(matches!(directory.clear_all().await, Err(AppError::Storage(_))));
    }
}
