use std::collections::HashSet;
use std::sync::Arc;

use chrono::DateTime;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::jwt::TokenCodec;

/// Set of tokens rejected before their natural expiry (logged out).
///
/// Cloning shares the underlying set. Every `is_revoked` observes all
/// `revoke` calls that completed before it.
#[derive(Debug, Clone, Default)]
pub struct RevocationRegistry {
    tokens: Arc<RwLock<HashSet<String>>>,
}

impl RevocationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a token as revoked. Revoking twice is a no-op.
    pub async fn revoke(&self, token: &str) {
        let inserted = self.tokens.write().await.insert(token.to_string());

        if inserted {
            tracing::debug!("Token revoked");
        }
    }

    pub async fn is_revoked(&self, token: &str) -> bool {
        self.tokens.read().await.contains(token)
    }

    pub async fn len(&self) -> usize {
        self.tokens.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.tokens.read().await.is_empty()
    }

    /// Drop entries that can no longer validate anyway.
    ///
    /// An entry goes when its expiry, re-derived through `codec`, is before
    /// `now`, or when it does not decode under `codec` at all.
    ///
    /// # Returns
    /// Number of entries removed
    ///
    /// Signatures are checked under the read lock; the write lock is only
    /// held to remove the entries found stale.
    pub async fn sweep(&self, codec: &TokenCodec, now: DateTime<Utc>) -> usize {
        let stale: Vec<String> = self
            .tokens
            .read()
            .await
            .iter()
            .filter(|token| !matches!(codec.expiry(token), Ok(expiry) if expiry >= now))
            .cloned()
            .collect();

        if stale.is_empty() {
            return 0;
        }

        let mut tokens = self.tokens.write().await;
        let removed = stale.iter().filter(|token| tokens.remove(*token)).count();

        if removed > 0 {
            tracing::debug!(removed, remaining = tokens.len(), "Revocation sweep");
        }
        removed
    }
}
