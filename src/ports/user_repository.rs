//! UserRepository port - persistence interface for accounts.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::foundation::DomainError;
use crate::domain::user::User;

/// Fields for a new account. The password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub full_name: Option<String>,
    pub password_hash: String,
}

/// Port for account persistence.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Inserts a new account. Fails with `AlreadyExists` when the
    /// username or email is taken.
    async fn insert(&self, user: NewUser) -> Result<User, DomainError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;
}
