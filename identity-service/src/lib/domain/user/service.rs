use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use auth::Clock;
use auth::RevocationRegistry;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::PersonName;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::Session;
use crate::domain::user::models::UpdateProfileCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::AuthServicePort;
use crate::user::ports::UserRepository;

/// Authentication engine.
///
/// Orchestrates the user store, password hashing, token issuance, and the
/// revocation registry. Holds no per-user state of its own.
pub struct AuthService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
    revocations: RevocationRegistry,
    clock: Arc<dyn Clock>,
}

impl<UR> AuthService<UR>
where
    UR: UserRepository,
{
    /// Create a new engine with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `authenticator` - Password hashing and token codec
    /// * `revocations` - Registry of logged-out tokens, owned by this engine
    /// * `clock` - Time source for issuing and checking tokens
    pub fn new(
        repository: Arc<UR>,
        authenticator: Arc<Authenticator>,
        revocations: RevocationRegistry,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            authenticator,
            revocations,
            clock,
        }
    }

    /// Spend roughly one password verification worth of time.
    ///
    /// Keeps the unknown-email path of `authenticate` as slow as the
    /// wrong-password path.
    fn burn_verification(&self) {
        let _ = self.authenticator.hash_password("unknown-account-placeholder");
    }
}

#[async_trait]
impl<UR> AuthServicePort for AuthService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, command: RegisterCommand) -> Result<Session, UserError> {
        if self.repository.exists_by_email(&command.email).await? {
            tracing::info!(email = %command.email, "Registration rejected: email taken");
            return Err(UserError::EmailTaken(command.email.to_string()));
        }

        let password_hash = self
            .authenticator
            .hash_password(command.password.expose())
            .map_err(|e| UserError::Internal(format!("Password hashing failed: {}", e)))?;

        let user = User {
            id: UserId::new(),
            firstname: command.firstname.into_inner(),
            lastname: command.lastname.into_inner(),
            email: command.email,
            password_hash,
            created_at: self.clock.now(),
        };

        // The store's unique constraint is authoritative; a racing duplicate
        // surfaces here as EmailTaken.
        let created_user = self.repository.create(user).await?;

        let token = self
            .authenticator
            .generate_token(created_user.email.as_str(), self.clock.now())?;

        tracing::info!(user_id = %created_user.id, "User registered");

        Ok(Session {
            user: created_user,
            token,
        })
    }

    async fn authenticate(&self, identifier: &str, password: &str) -> Result<Session, UserError> {
        let Ok(email) = EmailAddress::new(identifier.to_string()) else {
            self.burn_verification();
            tracing::info!("Login failed");
            return Err(UserError::InvalidCredentials);
        };

        let Some(user) = self.repository.find_by_email(&email).await? else {
            self.burn_verification();
            tracing::info!("Login failed");
            return Err(UserError::InvalidCredentials);
        };

        let result = self.authenticator.authenticate(
            password,
            &user.password_hash,
            user.email.as_str(),
            self.clock.now(),
        );

        match result {
            Ok(result) => {
                tracing::info!(user_id = %user.id, "Login succeeded");
                Ok(Session {
                    user,
                    token: result.access_token,
                })
            }
            Err(AuthenticationError::InvalidCredentials) => {
                tracing::info!("Login failed");
                Err(UserError::InvalidCredentials)
            }
            Err(AuthenticationError::PasswordError(e)) => {
                tracing::error!(user_id = %user.id, error = %e, "Stored password hash is unreadable");
                Err(UserError::InvalidCredentials)
            }
            Err(AuthenticationError::JwtError(e)) => Err(e.into()),
        }
    }

    async fn validate(&self, token: &str) -> bool {
        match self.verify_token(token).await {
            Ok(_) => true,
            Err(e) => {
                tracing::debug!(reason = %e, "Token rejected");
                false
            }
        }
    }

    async fn verify_token(&self, token: &str) -> Result<String, UserError> {
        if self.revocations.is_revoked(token).await {
            return Err(UserError::TokenRevoked);
        }

        Ok(self.authenticator.validate_token(token, self.clock.now())?)
    }

    async fn resolve_identity(&self, token: &str) -> Result<User, UserError> {
        let subject = self.verify_token(token).await?;

        // A correctly signed subject is always a normalized email.
        let email = EmailAddress::new(subject.clone()).map_err(|_| UserError::TokenInvalid)?;

        self.repository
            .find_by_email(&email)
            .await?
            .ok_or(UserError::UserNotFound(subject))
    }

    async fn logout(&self, token: &str) {
        self.revocations.revoke(token).await;
        tracing::info!("Logout");
    }

    async fn update_profile(
        &self,
        mut user: User,
        command: UpdateProfileCommand,
    ) -> Result<User, UserError> {
        if let Some(firstname) = command.firstname {
            let firstname = firstname.trim();
            if !firstname.is_empty() {
                PersonName::check_max_length(firstname)?;
                user.firstname = firstname.to_string();
            }
        }

        // Whitespace-only clears the last name.
        if let Some(lastname) = command.lastname {
            let lastname = lastname.trim();
            PersonName::check_max_length(lastname)?;
            user.lastname = lastname.to_string();
        }

        let updated_user = self.repository.update(user).await?;
        tracing::info!(user_id = %updated_user.id, "Profile updated");

        Ok(updated_user)
    }

    async fn sweep_revocations(&self) -> usize {
        self.revocations
            .sweep(self.authenticator.token_codec(), self.clock.now())
            .await
    }
}
