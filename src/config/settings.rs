use std::time::Duration;

use crate::error::{Error, Result};

pub const DEFAULT_SSO_URL: &str = "https://sso.veridian.io/";
pub const DEFAULT_API_URL: &str = "https://api.veridian.io/";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Immutable client configuration.
///
/// Built once per client with the credential triple; URLs, timeout and TLS
/// mode may be overridden through the client's fluent setters before the
/// first request goes out.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Cloud instance name, templated into the token endpoint URL.
    pub tenant: String,
    pub client_id: String,
    pub client_secret: String,
    /// Single sign-on endpoint base URL.
    pub sso_url: String,
    /// Verification API endpoint base URL.
    pub api_url: String,
    /// Total per-request timeout, connect included.
    pub request_timeout: Duration,
    pub user_agent: String,
    /// Disables TLS certificate verification when true. Off by default;
    /// only for development against self-signed endpoints.
    pub accept_invalid_certs: bool,
}

impl ClientConfig {
    pub fn new(
        tenant: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Result<Self> {
        let tenant = tenant.into();
        let client_id = client_id.into();
        let client_secret = client_secret.into();

        if tenant.is_empty() {
            return Err(Error::Config("tenant is required".into()));
        }
        if client_id.is_empty() {
            return Err(Error::Config("client ID is required".into()));
        }
        if client_secret.is_empty() {
            return Err(Error::Config("client secret is required".into()));
        }

        Ok(Self {
            tenant,
            client_id,
            client_secret,
            sso_url: DEFAULT_SSO_URL.to_owned(),
            api_url: DEFAULT_API_URL.to_owned(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            user_agent: format!("veridian-client v{}", env!("CARGO_PKG_VERSION")),
            accept_invalid_certs: false,
        })
    }

    pub(crate) fn set_api_url(&mut self, api_url: impl Into<String>) -> Result<()> {
        let api_url = api_url.into();
        if api_url.is_empty() {
            return Err(Error::Config("API URL is required".into()));
        }
        self.api_url = api_url;
        Ok(())
    }

    pub(crate) fn set_sso_url(&mut self, sso_url: impl Into<String>) -> Result<()> {
        let sso_url = sso_url.into();
        if sso_url.is_empty() {
            return Err(Error::Config("SSO URL is required".into()));
        }
        self.sso_url = sso_url;
        Ok(())
    }

    pub(crate) fn set_user_agent(&mut self, user_agent: impl Into<String>) -> Result<()> {
        let user_agent = user_agent.into();
        if user_agent.is_empty() {
            return Err(Error::Config("user agent is required".into()));
        }
        self.user_agent = user_agent;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_credentials() {
        assert!(matches!(
            ClientConfig::new("", "cid", "csecret"),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            ClientConfig::new("acme", "", "csecret"),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            ClientConfig::new("acme", "cid", ""),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn defaults_point_at_production() {
        let cfg = ClientConfig::new("acme", "cid", "csecret").unwrap();
        assert_eq!(cfg.sso_url, DEFAULT_SSO_URL);
        assert_eq!(cfg.api_url, DEFAULT_API_URL);
        assert_eq!(cfg.request_timeout, Duration::from_secs(10));
        assert!(!cfg.accept_invalid_certs);
    }
}
