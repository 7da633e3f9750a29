//! PasswordHasher port - credential hashing and verification.

use crate::domain::foundation::DomainError;

/// Port for password hashing.
///
/// `verify` deliberately returns a plain `bool`: a malformed stored hash
/// and a wrong password both read as "no match", so login failures never
/// leak which of the two occurred.
pub trait PasswordHasher: Send + Sync {
    /// Hashes a plaintext password into a self-describing PHC string.
    fn hash(&self, password: &str) -> Result<String, DomainError>;

    /// Verifies a plaintext password against a stored hash.
    fn verify(&self, password: &str, password_hash: &str) -> bool;
}
