//! Generic request executor.
//!
//! Every remote call in the crate goes through [`RequestExecutor::call`]:
//! endpoint resolution, header and body assembly, status validation and
//! error normalization live here so the operations stay thin.

use std::collections::HashMap;

use http::header::{ACCEPT, CONTENT_TYPE};
use http::{HeaderMap, HeaderValue};
use reqwest::{Client, Method, StatusCode};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::settings::ClientConfig;
use crate::endpoints::ApiEndpoint;
use crate::error::{Error, Result};

/// Per-call request options; callers supply only the overrides.
#[derive(Debug, Clone, Copy)]
pub struct RequestOptions {
    pub is_post: bool,
    /// JSON body and content type when true, form-encoded otherwise.
    pub is_json_request: bool,
    /// Attempt to parse the response body as JSON when true.
    pub is_json_response: bool,
    /// The single status code considered success for this call.
    pub response_code: u16,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            is_post: true,
            is_json_request: true,
            is_json_response: true,
            response_code: StatusCode::OK.as_u16(),
        }
    }
}

/// One `reqwest` client per executor; connection pooling and cleanup are
/// its job, on every exit path.
#[derive(Debug, Clone)]
pub struct RequestExecutor {
    client: Client,
}

impl RequestExecutor {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let mut builder = Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.request_timeout)
            .user_agent(config.user_agent.clone());

        if config.accept_invalid_certs {
            // carried-over weakness of the reference deployment, opt-in only
            warn!("TLS certificate verification is disabled");
            builder = builder.danger_accept_invalid_certs(true);
        }

        let client = builder
            .build()
            .map_err(|e| Error::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }

    /// Issue one HTTP call and return the parsed (or raw) response body.
    ///
    /// Caller-supplied headers override the defaults. The body is omitted
    /// entirely when empty. A JSON parse failure of the response is
    /// tolerated; the raw body is kept instead.
    pub async fn call(
        &self,
        config: &ClientConfig,
        endpoint: ApiEndpoint,
        body: &HashMap<String, String>,
        extra_headers: HeaderMap,
        options: RequestOptions,
    ) -> Result<Value> {
        let url = endpoint.resolve(config);
        let method = if options.is_post { Method::POST } else { Method::GET };
        debug!(%url, %method, "issuing request");

        let mut request = self.client.request(method, &url);

        if !body.is_empty() {
            request = if options.is_json_request {
                request.json(body)
            } else {
                request.form(body)
            };
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let content_type = if options.is_json_request {
            "application/json; charset=utf-8"
        } else {
            "application/x-www-form-urlencoded; charset=utf-8"
        };
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
        headers.extend(extra_headers);
        request = request.headers(headers);

        let response = request.send().await?;
        let status = response.status().as_u16();
        let raw = response.text().await?;

        // JSON parsing is best-effort enrichment, not a contract
        let parsed: Option<Value> = if options.is_json_response && !raw.is_empty() {
            match serde_json::from_str(&raw) {
                Ok(v) => Some(v),
                Err(e) => {
                    warn!("response body is not valid JSON: {e}");
                    None
                }
            }
        } else {
            None
        };

        if status != options.response_code {
            debug!(status, expected = options.response_code, "unexpected status code");
            return Err(Error::Api {
                message: error_message(parsed.as_ref(), &raw, status),
                status,
            });
        }

        Ok(parsed.unwrap_or(Value::String(raw)))
    }
}

/// Extract a human-readable failure message from an error response:
/// `error_description`, then `error`, then the raw body, then a generic
/// fallback carrying the status code.
fn error_message(parsed: Option<&Value>, raw: &str, status: u16) -> String {
    parsed
        .and_then(|v| v.get("error_description"))
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .or_else(|| {
            parsed
                .and_then(|v| v.get("error"))
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
        })
        .map(ToOwned::to_owned)
        .unwrap_or_else(|| {
            if raw.is_empty() {
                format!("unknown error occurred: {status}")
            } else {
                raw.to_owned()
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn message_prefers_error_description() {
        let body = json!({"error_description": "bad grant", "error": "invalid_grant"});
        assert_eq!(
            error_message(Some(&body), "raw", 400),
            "bad grant"
        );
    }

    #[test]
    fn message_falls_back_to_error_then_raw() {
        let body = json!({"error": "invalid_grant"});
        assert_eq!(error_message(Some(&body), "raw", 400), "invalid_grant");

        let body = json!({"unrelated": true});
        assert_eq!(error_message(Some(&body), r#"{"unrelated":true}"#, 400), r#"{"unrelated":true}"#);

        assert_eq!(error_message(None, "plain failure text", 502), "plain failure text");
    }

    #[test]
    fn message_generic_fallback_carries_status() {
        assert_eq!(error_message(None, "", 418), "unknown error occurred: 418");
    }
}
