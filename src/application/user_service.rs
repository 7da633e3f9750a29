//! User service - registration and credential login.

use std::sync::Arc;

use crate::domain::foundation::DomainError;
use crate::domain::user::User;
use crate::ports::{IssuedToken, NewUser, PasswordHasher, TokenIssuer, UserRepository};

/// Registration input with the plaintext password still attached.
#[derive(Debug, Clone)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub full_name: Option<String>,
    pub password: String,
}

/// Application service for accounts.
pub struct UserService {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenIssuer>,
}

impl UserService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }

    /// Creates an account. The plaintext password is hashed before it
    /// crosses the repository boundary.
    pub async fn register(&self, registration: Registration) -> Result<User, DomainError> {
        if registration.username.trim().is_empty() {
            return Err(DomainError::validation("Username must not be empty"));
        }
        if registration.password.len() < 8 {
            return Err(DomainError::validation(
                "Password must be at least 8 characters",
            ));
        }

        let password_hash = self.hasher.hash(&registration.password)?;
        self.users
            .insert(NewUser {
                username: registration.username,
                email: registration.email,
                full_name: registration.full_name,
                password_hash,
            })
            .await
    }

    /// Verifies credentials and mints an access token.
    ///
    /// Unknown usernames and wrong passwords produce the same error, so
    /// the response does not reveal which usernames exist.
    pub async fn login(&self, username: &str, password: &str) -> Result<IssuedToken, DomainError> {
        let user = self.users.find_by_username(username).await?;
        let verified = user
            .as_ref()
            .map(|u| self.hasher.verify(password, &u.password_hash))
            .unwrap_or(false);
        if !verified {
            return Err(DomainError::unauthorized("Incorrect username or password"));
        }
        self.tokens.issue(username)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use uuid::Uuid;

    use crate::domain::foundation::ErrorCode;

    struct InMemoryUsers {
        users: Mutex<Vec<User>>,
    }

    impl InMemoryUsers {
        fn new() -> Self {
            Self {
                users: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl UserRepository for InMemoryUsers {
        async fn insert(&self, user: NewUser) -> Result<User, DomainError> {
            let mut users = self.users.lock().unwrap();
            if users.iter().any(|u| u.username == user.username) {
                return Err(DomainError::already_exists(
                    "Username or email already registered",
                ));
            }
            let row = User {
                id: Uuid::new_v4(),
                username: user.username,
                email: user.email,
                full_name: user.full_name,
                password_hash: user.password_hash,
            };
            users.push(row.clone());
            Ok(row)
        }

        async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
            Ok(self
                .users
                .lock()
                .unwrap()
                .iter()
                .find(|u| u.username == username)
                .cloned())
        }

        async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
            Ok(self
                .users
                .lock()
                .unwrap()
                .iter()
                .find(|u| u.id == id)
                .cloned())
        }
    }

    /// Reversible stand-in so tests can assert the repository never
    /// sees the plaintext.
    struct FakeHasher;

    impl PasswordHasher for FakeHasher {
        fn hash(&self, password: &str) -> Result<String, DomainError> {
            Ok(format!("hashed:{}", password))
        }

        fn verify(&self, password: &str, hash: &str) -> bool {
            hash == format!("hashed:{}", password)
        }
    }

    struct FakeIssuer;

    impl TokenIssuer for FakeIssuer {
        fn issue(&self, username: &str) -> Result<IssuedToken, DomainError> {
            Ok(IssuedToken {
                access_token: format!("token-for-{}", username),
                expires_in: 1800,
            })
        }
    }

    fn service() -> UserService {
        UserService::new(
            Arc::new(InMemoryUsers::new()),
            Arc::new(FakeHasher),
            Arc::new(FakeIssuer),
        )
    }

    fn registration() -> Registration {
        Registration {
            username: "alice".to_string(),
            email: "a@example.com".to_string(),
            full_name: Some("Alice".to_string()),
            password: "correct horse".to_string(),
        }
    }

    #[tokio::test]
    async fn register_stores_a_hash_not_the_password() {
        let service = service();
        let user = service.register(registration()).await.unwrap();
        assert_eq!(user.password_hash, "hashed:correct horse");
    }

    #[tokio::test]
    async fn register_rejects_short_passwords() {
        let service = service();
        let result = service
            .register(Registration {
                password: "short".to_string(),
                ..registration()
            })
            .await;
        assert_eq!(result.unwrap_err().code(), ErrorCode::ValidationFailed);
    }

    #[tokio::test]
    async fn duplicate_username_conflicts() {
        let service = service();
        service.register(registration()).await.unwrap();
        let result = service.register(registration()).await;
        assert_eq!(result.unwrap_err().code(), ErrorCode::AlreadyExists);
    }

    #[tokio::test]
    async fn login_with_good_credentials_issues_a_token() {
        let service = service();
        service.register(registration()).await.unwrap();

        let token = service.login("alice", "correct horse").await.unwrap();
        assert_eq!(token.access_token, "token-for-alice");
        assert_eq!(token.expires_in, 1800);
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_user_look_the_same() {
        let service = service();
        service.register(registration()).await.unwrap();

        let wrong = service.login("alice", "nope12345").await.unwrap_err();
        let unknown = service.login("mallory", "nope12345").await.unwrap_err();
        assert_eq!(wrong.code(), ErrorCode::Unauthorized);
        assert_eq!(wrong.message(), unknown.message());
    }
}
