// tests/common/mod.rs
use base64::engine::general_purpose::STANDARD_NO_PAD;
use base64::Engine;
use httpmock::MockServer;

use crate::client::Client;
use crate::config::settings::ClientConfig;
use crate::request::executor::RequestExecutor;

/// Token endpoint path for the `acme` test tenant.
pub const TOKEN_PATH: &str = "/auth/realms/acme/protocol/openid-connect/token";

/// base64("cid:csecret")
pub const BASIC_CID_CSECRET: &str = "Basic Y2lkOmNzZWNyZXQ=";

/// Minimal unsigned JWT for tests: `{"exp": exp}`.
pub fn sample_jwt(exp: u64) -> String {
    let header = STANDARD_NO_PAD.encode(r#"{"alg":"none"}"#);
    let payload = STANDARD_NO_PAD.encode(format!(r#"{{"exp":{}}}"#, exp));
    format!("{}.{}.", header, payload)
}

/// Client with tenant `acme`, id `cid`, secret `csecret`, pointed at the
/// mock server for both SSO and API. No cache configured.
pub fn build_client(server: &MockServer) -> Client {
    Client::new("acme", "cid", "csecret")
        .expect("client config")
        .with_api_url(server.base_url())
        .expect("api url")
        .with_sso_url(server.base_url())
        .expect("sso url")
        .with_timeout(5)
        .expect("timeout")
}

/// Bare configuration for tests that drive the token manager or the
/// executor directly.
pub fn build_config(server: &MockServer) -> ClientConfig {
    let mut config = ClientConfig::new("acme", "cid", "csecret").expect("client config");
    config.set_api_url(server.base_url()).expect("api url");
    config.set_sso_url(server.base_url()).expect("sso url");
    config
}

pub fn build_executor(config: &ClientConfig) -> RequestExecutor {
    RequestExecutor::new(config).expect("request executor")
}
