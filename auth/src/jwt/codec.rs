use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::JwtError;

/// Issues and parses signed, expiring access tokens (HS256).
///
/// The secret and TTL are fixed for the lifetime of the codec. Expiry is
/// evaluated against the `now` passed by the caller rather than the wall
/// clock, so callers control time.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    ttl: Duration,
}

impl TokenCodec {
    /// Create a codec signing with `secret`.
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a token for `subject`, valid from `now` until `now + ttl`.
    ///
    /// # Errors
    /// * `EncodingFailed` - Claims could not be serialized or signed
    pub fn issue(&self, subject: &str, now: DateTime<Utc>) -> Result<String, JwtError> {
        let claims = Claims::issue(subject, now, self.ttl);

        encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Verify a token and return its subject.
    ///
    /// The signature is checked before expiry.
    ///
    /// # Errors
    /// * `Malformed` - Token structure, encoding or claims cannot be decoded
    /// * `InvalidSignature` - Signature does not match or algorithm is unexpected
    /// * `Expired` - `now` is past the token's expiry
    pub fn parse(&self, token: &str, now: DateTime<Utc>) -> Result<String, JwtError> {
        let claims = self.decode(token)?;

        if claims.is_expired(now.timestamp()) {
            return Err(JwtError::Expired);
        }

        Ok(claims.sub)
    }

    /// Signature-verified expiry of a token, without checking it against a clock.
    pub fn expiry(&self, token: &str) -> Result<DateTime<Utc>, JwtError> {
        let claims = self.decode(token)?;

        claims
            .expires_at()
            .ok_or_else(|| JwtError::Malformed(format!("exp out of range: {}", claims.exp)))
    }

    fn decode(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        // Expiry is checked against the caller's clock, not here.
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                    JwtError::InvalidSignature
                }
                _ => JwtError::Malformed(e.to_string()),
            })
    }
}
