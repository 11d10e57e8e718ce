//! Logical API endpoints and their URL resolution.

use crate::config::settings::ClientConfig;

/// Logical name of every remote endpoint the client can call.
///
/// Being an enum, resolution is total: there is no "unsupported API"
/// failure path left at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiEndpoint {
    Register,
    Verify,
    Login,
    Logout,
    Token,
}

impl ApiEndpoint {
    /// Absolute URL for this endpoint under the given configuration.
    ///
    /// The token endpoint lives on the SSO host and carries the tenant in
    /// its realm path; the four business operations live on the API host.
    pub fn resolve(&self, config: &ClientConfig) -> String {
        match self {
            ApiEndpoint::Register => join(&config.api_url, "profiles"),
            ApiEndpoint::Verify => join(&config.api_url, "verify"),
            ApiEndpoint::Login => join(&config.api_url, "login"),
            ApiEndpoint::Logout => join(&config.api_url, "logout"),
            ApiEndpoint::Token => join(
                &config.sso_url,
                &format!(
                    "auth/realms/{}/protocol/openid-connect/token",
                    config.tenant
                ),
            ),
        }
    }
}

fn join(base: &str, path: &str) -> String {
    if base.ends_with('/') {
        format!("{base}{path}")
    } else {
        format!("{base}/{path}")
    }
}
