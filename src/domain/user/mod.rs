//! User account entity.

use uuid::Uuid;

/// A registered account.
///
/// The password hash is a PHC string produced by the `PasswordHasher`
/// port and never leaves the persistence/auth adapters in responses.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub full_name: Option<String>,
    pub password_hash: String,
}
