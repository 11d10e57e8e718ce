//! Pluggable token store capability.
//!
//! The client never manages TTLs through the store: expiry lives inside
//! the token itself and is recomputed on every read by decoding. Backends
//! only need to persist an opaque string per key.

use async_trait::async_trait;

use crate::error::Result;

/// Prefix for every cache key this crate writes.
pub const TOKEN_CACHE_KEY_PREFIX: &str = "veridian_access_token";

/// Key-value persistence for bearer tokens.
///
/// Implementations are expected to be shared and thread-safe (memcached,
/// redis-style servers, or the in-process [`InMemoryTokenStore`]). A `get`
/// failure is treated as a miss by the token manager and a `set` failure
/// is logged and ignored, so backends may fail without breaking calls.
///
/// [`InMemoryTokenStore`]: crate::cache::memory::InMemoryTokenStore
#[async_trait]
pub trait TokenStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;
    async fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// Deterministic cache key for a credential set.
///
/// Dashes in the client ID are folded to underscores so that UUID-style
/// IDs produce backend-friendly keys; two clients configured with the same
/// ID and a shared store converge on one key, one token.
pub fn cache_key(client_id: &str) -> String {
    format!("{}{}", TOKEN_CACHE_KEY_PREFIX, client_id.replace('-', "_"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_key_folds_dashes() {
        assert_eq!(
            cache_key("f7f94820-a709"),
            "veridian_access_tokenf7f94820_a709"
        );
    }

    #[test]
    fn cache_key_is_deterministic_per_client_id() {
        assert_eq!(cache_key("cid"), cache_key("cid"));
        assert_ne!(cache_key("cid"), cache_key("other"));
    }
}
