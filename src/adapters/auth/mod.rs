//! Auth adapters - JWT issue/validate and password hashing.

mod hasher;
mod jwt;

pub use hasher::Argon2Hasher;
pub use jwt::JwtAuth;
