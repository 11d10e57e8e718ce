//! Token lifecycle manager.
//!
//! Orchestrates cache lookup, expiry inspection and conditional refresh
//! through the request executor. One valid bearer token per credential
//! set; the cache is best-effort and its absence only costs an extra
//! round-trip per call.

use std::collections::HashMap;
use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use http::header::AUTHORIZATION;
use http::{HeaderMap, HeaderValue};
use reqwest::StatusCode;
use serde_json::Value;
use tracing::{debug, warn};

use crate::cache::store::{cache_key, TokenStore};
use crate::config::settings::ClientConfig;
use crate::endpoints::ApiEndpoint;
use crate::error::{Error, Result};
use crate::helpers::time::now_u64;
use crate::request::executor::{RequestExecutor, RequestOptions};
use crate::token::codec;

#[derive(Clone, Default)]
pub struct TokenManager {
    store: Option<Arc<dyn TokenStore>>,
}

impl std::fmt::Debug for TokenManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenManager")
            .field("store", &self.store.is_some())
            .finish()
    }
}

impl TokenManager {
    pub fn new(store: Option<Arc<dyn TokenStore>>) -> Self {
        Self { store }
    }

    /// Basic authentication header for the token endpoint.
    pub fn basic_auth_header(config: &ClientConfig) -> String {
        format!(
            "Basic {}",
            STANDARD.encode(format!("{}:{}", config.client_id, config.client_secret))
        )
    }

    /// `Authorization` header value for API calls, refreshing on demand.
    pub async fn bearer_auth_header(
        &self,
        config: &ClientConfig,
        executor: &RequestExecutor,
    ) -> Result<String> {
        Ok(format!("Bearer {}", self.bearer_token(config, executor).await?))
    }

    /// Return a valid bearer token: cached while its `exp` claim is in
    /// the future, freshly fetched otherwise.
    pub async fn bearer_token(
        &self,
        config: &ClientConfig,
        executor: &RequestExecutor,
    ) -> Result<String> {
        let key = cache_key(&config.client_id);

        if let Some(token) = self.cached_token(&key).await {
            return Ok(token);
        }

        self.refresh_token(config, executor, &key)
            .await
            .map_err(|e| match e {
                wrapped @ Error::Token { .. } => wrapped,
                cause => Error::token(cause),
            })
    }

    /// Cached token, if present and not expired. Every failure on this
    /// path degrades to a miss: no store, store read error, undecodable
    /// value, stale `exp`.
    async fn cached_token(&self, key: &str) -> Option<String> {
        let store = self.store.as_ref()?;

        match store.get(key).await {
            Ok(Some(token)) if !token.is_empty() => match codec::decode(&token) {
                Ok(claims) if !claims.is_expired(now_u64()) => {
                    debug!(expires_at = claims.exp, "using cached token");
                    Some(token)
                }
                Ok(claims) => {
                    debug!(expired_at = claims.exp, "cached token expired");
                    None
                }
                Err(e) => {
                    debug!("cached token is not decodable, treating as miss: {e}");
                    None
                }
            },
            Ok(_) => None,
            Err(e) => {
                warn!("token store read failed, treating as miss: {e}");
                None
            }
        }
    }

    /// Fetch a fresh token with the client-credentials grant and write it
    /// back to the store.
    async fn refresh_token(
        &self,
        config: &ClientConfig,
        executor: &RequestExecutor,
        key: &str,
    ) -> Result<String> {
        debug!("requesting fresh token via client-credentials grant");

        let mut body = HashMap::new();
        body.insert("grant_type".to_owned(), "client_credentials".to_owned());

        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&Self::basic_auth_header(config))
                .map_err(|e| Error::Config(format!("invalid basic auth header: {e}")))?,
        );

        let options = RequestOptions {
            is_json_request: false,
            response_code: StatusCode::OK.as_u16(),
            ..Default::default()
        };

        let response = executor
            .call(config, ApiEndpoint::Token, &body, headers, options)
            .await?;

        let token = response
            .get("access_token")
            .and_then(Value::as_str)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                Error::token_message(format!("empty token in SSO response: {response}"))
            })?
            .to_owned();

        if let Some(store) = &self.store {
            // best effort: a failed write must not abort the call
            if let Err(e) = store.set(key, &token).await {
                warn!("token store write failed: {e}");
            }
        }

        Ok(token)
    }
}
