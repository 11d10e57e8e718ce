//! Public client facade: construction, fluent configuration and the four
//! verification API operations.

use std::collections::HashMap;
use std::sync::Arc;

use http::header::AUTHORIZATION;
use http::{HeaderMap, HeaderValue};
use reqwest::StatusCode;
use serde_json::Value;

use crate::cache::store::TokenStore;
use crate::config::settings::ClientConfig;
use crate::endpoints::ApiEndpoint;
use crate::error::{Error, Result};
use crate::request::executor::{RequestExecutor, RequestOptions};
use crate::token::manager::TokenManager;

/// Client for the Veridian identity verification API.
///
/// Construct with the credential triple, optionally adjust URLs, timeout
/// and caching through the fluent setters, then call the operations. All
/// configuration must happen before the first request.
#[derive(Debug)]
pub struct Client {
    config: ClientConfig,
    executor: RequestExecutor,
    token_manager: TokenManager,
}

impl Client {
    pub fn new(
        tenant: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Result<Self> {
        let config = ClientConfig::new(tenant, client_id, client_secret)?;
        let executor = RequestExecutor::new(&config)?;
        Ok(Self {
            config,
            executor,
            token_manager: TokenManager::new(None),
        })
    }

    /// Attach a token store. Optional; without one every call fetches a
    /// fresh token.
    pub fn with_cache(mut self, store: Arc<dyn TokenStore>) -> Self {
        self.token_manager = TokenManager::new(Some(store));
        self
    }

    /// Override the default total request timeout, in seconds.
    pub fn with_timeout(mut self, seconds: u64) -> Result<Self> {
        self.config.request_timeout = std::time::Duration::from_secs(seconds);
        self.rebuild_executor()
    }

    /// Point the client at a different API base URL, commonly used for
    /// development environments.
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Result<Self> {
        self.config.set_api_url(api_url)?;
        Ok(self)
    }

    /// Point the client at a different SSO base URL.
    pub fn with_sso_url(mut self, sso_url: impl Into<String>) -> Result<Self> {
        self.config.set_sso_url(sso_url)?;
        Ok(self)
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Result<Self> {
        self.config.set_user_agent(user_agent)?;
        self.rebuild_executor()
    }

    /// Accept invalid TLS certificates. Development-only escape hatch;
    /// verification stays on unless this is called with `true`.
    pub fn with_accept_invalid_certs(mut self, accept: bool) -> Result<Self> {
        self.config.accept_invalid_certs = accept;
        self.rebuild_executor()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Register a user profile.
    ///
    /// `POST {api}/profiles` with `{jwt, alias}`, expects 201.
    pub async fn register(&self, sdk_jwt: &str, alias: &str) -> Result<Value> {
        self.try_register(sdk_jwt, alias)
            .await
            .map_err(|e| Error::operation("registration", e))
    }

    /// Verify a registered user.
    ///
    /// `POST {api}/verify` with `{jwt, c_uuid}`, expects 201.
    pub async fn verify(&self, sdk_jwt: &str, c_uuid: &str) -> Result<Value> {
        self.try_verify(sdk_jwt, c_uuid)
            .await
            .map_err(|e| Error::operation("verification", e))
    }

    /// Log a verified user in and create a session.
    ///
    /// `POST {api}/login` with `{jwt, c_uuid}`, expects 200.
    pub async fn login(&self, sdk_jwt: &str, c_uuid: &str) -> Result<Value> {
        self.try_login(sdk_jwt, c_uuid)
            .await
            .map_err(|e| Error::operation("login", e))
    }

    /// Log a user out of a session.
    ///
    /// `POST {api}/logout` with `{jwt, c_uuid, session_id}`, expects 200.
    pub async fn logout(&self, sdk_jwt: &str, session_id: &str, c_uuid: &str) -> Result<Value> {
        self.try_logout(sdk_jwt, session_id, c_uuid)
            .await
            .map_err(|e| Error::operation("logout", e))
    }

    async fn try_register(&self, sdk_jwt: &str, alias: &str) -> Result<Value> {
        require("SDK JWT", sdk_jwt)?;
        require("alias (email)", alias)?;

        let body = body_map([("jwt", sdk_jwt), ("alias", alias)]);
        self.authorized_call(ApiEndpoint::Register, body, StatusCode::CREATED)
            .await
    }

    async fn try_verify(&self, sdk_jwt: &str, c_uuid: &str) -> Result<Value> {
        require("SDK JWT", sdk_jwt)?;
        require("c_uuid", c_uuid)?;

        let body = body_map([("jwt", sdk_jwt), ("c_uuid", c_uuid)]);
        self.authorized_call(ApiEndpoint::Verify, body, StatusCode::CREATED)
            .await
    }

    async fn try_login(&self, sdk_jwt: &str, c_uuid: &str) -> Result<Value> {
        require("SDK JWT", sdk_jwt)?;
        require("c_uuid", c_uuid)?;

        let body = body_map([("jwt", sdk_jwt), ("c_uuid", c_uuid)]);
        self.authorized_call(ApiEndpoint::Login, body, StatusCode::OK)
            .await
    }

    async fn try_logout(&self, sdk_jwt: &str, session_id: &str, c_uuid: &str) -> Result<Value> {
        require("SDK JWT", sdk_jwt)?;
        require("c_uuid", c_uuid)?;
        require("session_id", session_id)?;

        let body = body_map([
            ("jwt", sdk_jwt),
            ("c_uuid", c_uuid),
            ("session_id", session_id),
        ]);
        self.authorized_call(ApiEndpoint::Logout, body, StatusCode::OK)
            .await
    }

    /// One bearer-authorized call: token first, then the operation.
    async fn authorized_call(
        &self,
        endpoint: ApiEndpoint,
        body: HashMap<String, String>,
        expected: StatusCode,
    ) -> Result<Value> {
        let bearer = self
            .token_manager
            .bearer_auth_header(&self.config, &self.executor)
            .await?;

        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&bearer)
                .map_err(|e| Error::Config(format!("invalid bearer header: {e}")))?,
        );

        let options = RequestOptions {
            response_code: expected.as_u16(),
            ..Default::default()
        };
        self.executor
            .call(&self.config, endpoint, &body, headers, options)
            .await
    }

    fn rebuild_executor(mut self) -> Result<Self> {
        self.executor = RequestExecutor::new(&self.config)?;
        Ok(self)
    }
}

fn require(field: &'static str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(Error::Validation(field));
    }
    Ok(())
}

fn body_map<const N: usize>(fields: [(&str, &str); N]) -> HashMap<String, String> {
    fields
        .into_iter()
        .map(|(k, v)| (k.to_owned(), v.to_owned()))
        .collect()
}
