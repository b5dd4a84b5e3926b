//! User repository: trait and in-memory implementation.
//!
//! The in-memory store stands in for the real user database. It is seeded
//! with the one account the store ships with (the admin), the same way
//! the mock backend seeds its user list.

use std::sync::RwLock;

use chrono::Utc;

use cubed_core::auth::User;
use cubed_core::{Email, Role, UserId};

use super::RepositoryError;

/// Storage seam for user accounts.
///
/// Synchronous by design: the only implementation is in-memory, and the
/// auth service is the sole consumer.
pub trait UserStore: Send + Sync {
    /// Look up a user by email.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::DataCorruption` if stored data is invalid.
    fn find_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError>;

    /// Look up a user by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::DataCorruption` if stored data is invalid.
    fn find_by_id(&self, id: &UserId) -> Result<Option<User>, RepositoryError>;

    /// Fetch a user together with their password hash, for credential
    /// verification.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::DataCorruption` if stored data is invalid.
    fn find_with_password_hash(
        &self,
        email: &Email,
    ) -> Result<Option<(User, String)>, RepositoryError>;

    /// Create a new user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email is already taken.
    fn create(&self, user: User, password_hash: String) -> Result<User, RepositoryError>;

    /// Replace the stored profile for an existing user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user does not exist.
    fn update(&self, user: &User) -> Result<User, RepositoryError>;
}

struct UserRecord {
    user: User,
    password_hash: String,
}

/// In-memory user repository.
#[derive(Default)]
pub struct InMemoryUserRepository {
    records: RwLock<Vec<UserRecord>>,
}

impl InMemoryUserRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository seeded with the store's admin account.
    ///
    /// The seed credentials are for local development only.
    #[must_use]
    pub fn seeded() -> Self {
        let repo = Self::new();
        let admin = User {
            id: UserId::new("1"),
            name: "Admin Cubed".to_owned(),
            email: Email::parse("admin@cubed3d.com.br").unwrap_or_else(|_| {
                unreachable!("seed email is valid")
            }),
            role: Role::Admin,
            phone: None,
            address: None,
            created_at: Utc::now(),
        };
        let hash = crate::services::auth::hash_password("password")
            .unwrap_or_else(|_| unreachable!("seed password hashes"));
        // Seeding an empty repository cannot conflict.
        let _ = repo.create(admin, hash);
        repo
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Vec<UserRecord>> {
        self.records.read().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Vec<UserRecord>> {
        self.records.write().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl UserStore for InMemoryUserRepository {
    fn find_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError> {
        Ok(self
            .read()
            .iter()
            .find(|record| &record.user.email == email)
            .map(|record| record.user.clone()))
    }

    fn find_by_id(&self, id: &UserId) -> Result<Option<User>, RepositoryError> {
        Ok(self
            .read()
            .iter()
            .find(|record| &record.user.id == id)
            .map(|record| record.user.clone()))
    }

    fn find_with_password_hash(
        &self,
        email: &Email,
    ) -> Result<Option<(User, String)>, RepositoryError> {
        Ok(self
            .read()
            .iter()
            .find(|record| &record.user.email == email)
            .map(|record| (record.user.clone(), record.password_hash.clone())))
    }

    fn create(&self, user: User, password_hash: String) -> Result<User, RepositoryError> {
        let mut records = self.write();
        if records.iter().any(|record| record.user.email == user.email) {
            return Err(RepositoryError::Conflict(format!(
                "email already registered: {}",
                user.email
            )));
        }
        let created = user.clone();
        records.push(UserRecord {
            user,
            password_hash,
        });
        Ok(created)
    }

    fn update(&self, user: &User) -> Result<User, RepositoryError> {
        let mut records = self.write();
        let record = records
            .iter_mut()
            .find(|record| record.user.id == user.id)
            .ok_or(RepositoryError::NotFound)?;
        record.user = user.clone();
        Ok(record.user.clone())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn user(id: &str, email: &str) -> User {
        User {
            id: UserId::new(id),
            name: "Test User".to_owned(),
            email: Email::parse(email).unwrap(),
            role: Role::User,
            phone: None,
            address: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_create_and_find() {
        let repo = InMemoryUserRepository::new();
        repo.create(user("u-1", "a@b.com"), "hash".to_owned()).unwrap();

        let by_email = repo.find_by_email(&Email::parse("a@b.com").unwrap()).unwrap();
        assert!(by_email.is_some());

        let by_id = repo.find_by_id(&UserId::new("u-1")).unwrap();
        assert_eq!(by_id.unwrap().email.as_str(), "a@b.com");
    }

    #[test]
    fn test_create_duplicate_email_conflicts() {
        let repo = InMemoryUserRepository::new();
        repo.create(user("u-1", "a@b.com"), "hash".to_owned()).unwrap();
        let err = repo.create(user("u-2", "a@b.com"), "hash".to_owned()).unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));
    }

    #[test]
    fn test_find_missing_is_none() {
        let repo = InMemoryUserRepository::new();
        assert!(repo.find_by_id(&UserId::new("nope")).unwrap().is_none());
        assert!(
            repo.find_by_email(&Email::parse("nobody@nowhere.com").unwrap())
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn test_update_replaces_profile() {
        let repo = InMemoryUserRepository::new();
        let mut created = repo.create(user("u-1", "a@b.com"), "hash".to_owned()).unwrap();
        created.phone = Some("+55 11 90000-0000".to_owned());

        let updated = repo.update(&created).unwrap();
        assert_eq!(updated.phone.as_deref(), Some("+55 11 90000-0000"));

        let err = repo.update(&user("ghost", "g@b.com")).unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound));
    }

    #[test]
    fn test_seeded_contains_admin() {
        let repo = InMemoryUserRepository::seeded();
        let admin = repo
            .find_by_email(&Email::parse("admin@cubed3d.com.br").unwrap())
            .unwrap()
            .unwrap();
        assert_eq!(admin.role, Role::Admin);
    }
}
