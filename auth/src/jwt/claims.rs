use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// Claims carried by an access token.
///
/// All fields are required; a token missing any of them does not decode.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (the user's normalized email)
    pub sub: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Unique token identifier, distinguishes tokens issued in the same second
    pub jti: String,
}

impl Claims {
    /// Build claims for `subject` issued at `now`, expiring `ttl` later.
    pub fn issue(subject: impl ToString, now: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// Expired strictly after `exp`; a token is still valid at its expiry second.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp < current_timestamp
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_sets_window() {
        let now = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let claims = Claims::issue("ann@x.com", now, Duration::hours(24));

        assert_eq!(claims.sub, "ann@x.com");
        assert_eq!(claims.iat, 1_700_000_000);
        assert_eq!(claims.exp - claims.iat, 24 * 60 * 60);
        assert_eq!(claims.expires_at(), Some(now + Duration::hours(24)));
    }

    #[test]
    fn test_issue_generates_distinct_ids() {
        let now = Utc::now();
        let first = Claims::issue("ann@x.com", now, Duration::hours(1));
        let second = Claims::issue("ann@x.com", now, Duration::hours(1));

        assert_ne!(first.jti, second.jti);
    }

    #[test]
    fn test_is_expired() {
        let now = DateTime::from_timestamp(0, 0).unwrap();
        let claims = Claims::issue("ann@x.com", now, Duration::seconds(1000));

        assert!(!claims.is_expired(999)); // Not expired
        assert!(!claims.is_expired(1000)); // Exactly at expiration
        assert!(claims.is_expired(1001)); // Expired
    }
}
