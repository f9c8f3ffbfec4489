use async_trait::async_trait;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::Session;
use crate::domain::user::models::UpdateProfileCommand;
use crate::domain::user::models::User;
use crate::user::errors::UserError;

/// Port for authentication engine operations.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new user and issue their first token.
    ///
    /// # Arguments
    /// * `command` - Validated names, email, and password
    ///
    /// # Returns
    /// Created user with a fresh token
    ///
    /// # Errors
    /// * `EmailTaken` - Email already registered (case-insensitive)
    /// * `StorageFailure` - User store write failed; no token issued
    async fn register(&self, command: RegisterCommand) -> Result<Session, UserError>;

    /// Exchange credentials for a fresh token.
    ///
    /// # Arguments
    /// * `identifier` - Email address as typed by the user
    /// * `password` - Plaintext password
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password, indistinguishably
    /// * `StorageFailure` - User store read failed
    async fn authenticate(&self, identifier: &str, password: &str) -> Result<Session, UserError>;

    /// Whether a token is currently accepted. Fails closed.
    async fn validate(&self, token: &str) -> bool;

    /// Typed form of `validate`.
    ///
    /// # Returns
    /// Token subject (normalized email)
    ///
    /// # Errors
    /// * `TokenRevoked` - Token was logged out
    /// * `TokenExpired` - Token is past its expiry
    /// * `TokenInvalid` - Token is malformed or its signature does not match
    async fn verify_token(&self, token: &str) -> Result<String, UserError>;

    /// Resolve the user a token was issued to.
    ///
    /// # Errors
    /// * `TokenRevoked` / `TokenExpired` / `TokenInvalid` - See `verify_token`
    /// * `UserNotFound` - Subject no longer resolves to a stored user
    /// * `StorageFailure` - User store read failed
    async fn resolve_identity(&self, token: &str) -> Result<User, UserError>;

    /// Revoke a token, whatever its current state. Idempotent.
    async fn logout(&self, token: &str);

    /// Apply profile changes to `user` and persist them.
    ///
    /// # Errors
    /// * `UserNotFound` - User disappeared from the store
    /// * `StorageFailure` - User store write failed
    async fn update_profile(
        &self,
        user: User,
        command: UpdateProfileCommand,
    ) -> Result<User, UserError>;

    /// Purge revocation entries for tokens that have expired.
    ///
    /// # Returns
    /// Number of entries removed
    async fn sweep_revocations(&self) -> usize;
}

/// Persistence operations for user aggregate.
///
/// Email lookups are case-insensitive. Implementations must reject a second
/// user with an existing email even when two `create` calls race.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist new user to storage.
    ///
    /// # Errors
    /// * `EmailTaken` - Email is already registered
    /// * `StorageFailure` - Database operation failed
    async fn create(&self, user: User) -> Result<User, UserError>;

    /// Retrieve user by email address.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `StorageFailure` - Database operation failed
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError>;

    /// Whether a user with this email exists.
    ///
    /// # Errors
    /// * `StorageFailure` - Database operation failed
    async fn exists_by_email(&self, email: &EmailAddress) -> Result<bool, UserError>;

    /// Persist changes to an existing user.
    ///
    /// # Errors
    /// * `UserNotFound` - User does not exist
    /// * `StorageFailure` - Database operation failed
    async fn update(&self, user: User) -> Result<User, UserError>;
}
