use thiserror::Error;

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Error for PersonName validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NameError {
    #[error("Name too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("Name too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },

    #[error("Name should only contain letters, spaces, and common name characters")]
    InvalidCharacters,
}

/// Error for Password policy failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordPolicyError {
    #[error("Password must be at least {min} characters")]
    TooShort { min: usize },

    #[error("Password must be at most {max} bytes")]
    TooLong { max: usize },

    #[error("Password must contain at least one number")]
    MissingDigit,
}

/// Top-level error for all authentication and account operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserError {
    // Value object validation errors (automatically converted via #[from])
    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Invalid name: {0}")]
    InvalidName(#[from] NameError),

    #[error("Invalid password: {0}")]
    InvalidPassword(#[from] PasswordPolicyError),

    // Domain-level errors
    #[error("Email is already registered: {0}")]
    EmailTaken(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token has expired")]
    TokenExpired,

    #[error("Token is invalid")]
    TokenInvalid,

    #[error("Token has been revoked")]
    TokenRevoked,

    #[error("User not found: {0}")]
    UserNotFound(String),

    // Infrastructure errors
    #[error("Storage failure: {0}")]
    StorageFailure(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl UserError {
    /// Whether the caller may retry the same request later.
    pub fn is_retryable(&self) -> bool {
        matches!(self, UserError::StorageFailure(_))
    }
}

impl From<auth::JwtError> for UserError {
    fn from(err: auth::JwtError) -> Self {
        match err {
            auth::JwtError::Expired => UserError::TokenExpired,
            auth::JwtError::Malformed(_) | auth::JwtError::InvalidSignature => {
                UserError::TokenInvalid
            }
            auth::JwtError::EncodingFailed(e) => {
                UserError::Internal(format!("Token generation failed: {}", e))
            }
        }
    }
}

impl From<anyhow::Error> for UserError {
    fn from(err: anyhow::Error) -> Self {
        UserError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_errors_map_to_kinds() {
        assert_eq!(UserError::from(auth::JwtError::Expired), UserError::TokenExpired);
        assert_eq!(
            UserError::from(auth::JwtError::InvalidSignature),
            UserError::TokenInvalid
        );
        assert_eq!(
            UserError::from(auth::JwtError::Malformed("bad".to_string())),
            UserError::TokenInvalid
        );
        assert!(matches!(
            UserError::from(auth::JwtError::EncodingFailed("key".to_string())),
            UserError::Internal(_)
        ));
    }

    #[test]
    fn test_only_storage_failure_is_retryable() {
        assert!(UserError::StorageFailure("down".to_string()).is_retryable());
        assert!(!UserError::InvalidCredentials.is_retryable());
        assert!(!UserError::EmailTaken("a@x.com".to_string()).is_retryable());
        assert!(!UserError::TokenRevoked.is_retryable());
    }
}
