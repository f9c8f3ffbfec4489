use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::user::errors::EmailError;
use crate::user::errors::NameError;
use crate::user::errors::PasswordPolicyError;

/// User aggregate entity.
///
/// Email is the authentication subject and is immutable once registered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub firstname: String,
    pub lastname: String,
    pub email: EmailAddress,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validated with an RFC 5322 parser, trimmed and lowercased so that
/// comparisons are case-insensitive everywhere downstream.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated, normalized email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        let normalized = email.trim().to_lowercase();

        email_address::EmailAddress::from_str(&normalized)
            .map(|_| EmailAddress(normalized))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// First or last name supplied at registration.
///
/// 2-50 characters; ASCII letters, spaces, and `.` `'` `-`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonName(String);

impl PersonName {
    const MIN_LENGTH: usize = 2;
    const MAX_LENGTH: usize = 50;

    /// # Errors
    /// * `TooShort` - Fewer than 2 characters
    /// * `TooLong` - More than 50 characters
    /// * `InvalidCharacters` - Anything other than letters, spaces, `.`, `'`, `-`
    pub fn new(name: String) -> Result<Self, NameError> {
        let length = name.chars().count();
        if length < Self::MIN_LENGTH {
            return Err(NameError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            });
        }
        Self::check_max_length(&name)?;
        if !name
            .chars()
            .all(|c| c.is_ascii_alphabetic() || c.is_whitespace() || matches!(c, '.' | '\'' | '-'))
        {
            return Err(NameError::InvalidCharacters);
        }
        Ok(Self(name))
    }

    /// Upper length bound alone; profile updates apply only this rule.
    pub fn check_max_length(name: &str) -> Result<(), NameError> {
        let length = name.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(NameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }
        Ok(())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Plaintext password that satisfies the registration policy.
///
/// Never printed; `Debug` is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    const MIN_LENGTH: usize = 8;

    /// # Errors
    /// * `TooShort` - Fewer than 8 characters
    /// * `TooLong` - Longer than the hasher accepts
    /// * `MissingDigit` - No ASCII digit
    pub fn new(password: String) -> Result<Self, PasswordPolicyError> {
        if password.chars().count() < Self::MIN_LENGTH {
            return Err(PasswordPolicyError::TooShort {
                min: Self::MIN_LENGTH,
            });
        }
        if password.len() > auth::password::MAX_PASSWORD_BYTES {
            return Err(PasswordPolicyError::TooLong {
                max: auth::password::MAX_PASSWORD_BYTES,
            });
        }
        if !password.chars().any(|c| c.is_ascii_digit()) {
            return Err(PasswordPolicyError::MissingDigit);
        }
        Ok(Self(password))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

/// Command to register a new user with domain types
#[derive(Debug)]
pub struct RegisterCommand {
    pub firstname: PersonName,
    pub lastname: PersonName,
    pub email: EmailAddress,
    pub password: Password,
}

impl RegisterCommand {
    pub fn new(
        firstname: PersonName,
        lastname: PersonName,
        email: EmailAddress,
        password: Password,
    ) -> Self {
        Self {
            firstname,
            lastname,
            email,
            password,
        }
    }
}

/// Profile fields to change. `None` leaves a field untouched.
///
/// Values are raw; trimming and blank handling happen in the service.
#[derive(Debug, Default)]
pub struct UpdateProfileCommand {
    pub firstname: Option<String>,
    pub lastname: Option<String>,
}

/// An authenticated user together with the token that proves it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user: User,
    pub token: String,
}
