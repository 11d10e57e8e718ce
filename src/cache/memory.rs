use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::cache::store::TokenStore;
use crate::error::Result;

/// In-process token store.
///
/// Shares one map across clones, so several clients in the same process
/// can multiplex a single token per credential set. Useful as-is for
/// single-process hosts and as the store double in tests; distributed
/// deployments plug in their own [`TokenStore`] backend instead.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTokenStore {
    inner: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TokenStore for InMemoryTokenStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let map = self.inner.read().await;
        Ok(map.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut map = self.inner.write().await;
        map.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}
