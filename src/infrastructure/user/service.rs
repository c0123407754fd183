//! User service for registration and sign-in

use std::sync::Arc;

use crate::domain::user::{
    normalize_email, validate_email, validate_name, validate_password, User, UserId,
    UserRepository,
};
use crate::domain::DomainError;

use super::password::PasswordHasher;

/// Fields of a registration request
#[derive(Debug, Clone)]
pub struct SignUpRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// User service for registration and authentication
#[derive(Debug, Clone)]
pub struct UserService {
    repository: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { repository, hasher }
    }

    /// Register a new account
    pub async fn register(&self, request: SignUpRequest) -> Result<User, DomainError> {
        let email = normalize_email(&request.email);

        validate_name(&request.name)?;
        validate_email(&email)?;
        validate_password(&request.password)?;

        if self.repository.email_exists(&email).await? {
            return Err(DomainError::conflict(format!(
                "Email '{}' already registered",
                email
            )));
        }

        let password_hash = self.hasher.hash(&request.password)?;
        let user = User::new(UserId::generate(), request.name.trim(), email, password_hash);

        let user = self.repository.create(user).await?;
        tracing::info!(user_id = %user.id(), "User registered");

        Ok(user)
    }

    /// Check credentials; `None` when the email is unknown or the password is wrong
    pub async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<User>, DomainError> {
        let email = normalize_email(email);

        let Some(user) = self.repository.get_by_email(&email).await? else {
            return Ok(None);
        };

        if !self.hasher.verify(password, user.password_hash()) {
            return Ok(None);
        }

        self.repository.record_login(user.id()).await?;

        // Re-fetch to pick up last_login_at
        self.repository.get(user.id()).await
    }

    pub async fn count(&self) -> Result<usize, DomainError> {
        self.repository.count().await
    }
}
