//! Authentication primitives for the identity service
//!
//! - Password hashing (Argon2id)
//! - Signed, expiring access tokens (HS256 JWT) with caller-supplied time
//! - Revocation tracking for logged-out tokens
//! - Injectable clocks
//!
//! Services define their own ports and orchestrate these pieces.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password1").unwrap();
//! assert!(hasher.verify("my_password1", &hash).unwrap());
//! ```
//!
//! ## Tokens
//! ```
//! use auth::TokenCodec;
//! use chrono::{Duration, Utc};
//!
//! let codec = TokenCodec::new(b"secret_key_at_least_32_bytes_long!", Duration::hours(24));
//! let now = Utc::now();
//! let token = codec.issue("ann@x.com", now).unwrap();
//! assert_eq!(codec.parse(&token, now).unwrap(), "ann@x.com");
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::Authenticator;
//! use chrono::{Duration, Utc};
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!", Duration::hours(24));
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue token
//! let result = auth.authenticate("password123", &hash, "ann@x.com", Utc::now()).unwrap();
//!
//! // Validate token
//! let subject = auth.validate_token(&result.access_token, Utc::now()).unwrap();
//! assert_eq!(subject, "ann@x.com");
//! ```

pub mod authenticator;
pub mod clock;
pub mod jwt;
pub mod password;
pub mod revocation;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use clock::Clock;
pub use clock::ManualClock;
pub use clock::SystemClock;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::TokenCodec;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use revocation::RevocationRegistry;
