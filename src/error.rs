//! Error taxonomy for the client SDK.
//!
//! One enum covers every failure a caller can see, so callers branch on
//! kind instead of matching message strings. Wrapper variants (`Token`,
//! `Operation`) keep the underlying cause reachable through
//! `std::error::Error::source`.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Invalid construction or setter input. Fatal, never retried.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A required call argument was empty. Names the missing field.
    #[error("{0} should be provided")]
    Validation(&'static str),

    /// A token string could not be decoded. Recovered internally by the
    /// token manager (treated as a cache miss); surfaced only when the
    /// codec is used directly.
    #[error("malformed token: {0}")]
    MalformedToken(String),

    /// A token store backend failed. The token manager swallows these
    /// (read failure acts as a miss, write failure is logged), so this
    /// kind only reaches callers who drive a store themselves.
    #[error("token store error: {0}")]
    Cache(String),

    /// Connection, DNS or timeout failure below the HTTP layer.
    #[error("error during request: {source}")]
    Transport {
        #[from]
        source: reqwest::Error,
    },

    /// The remote service answered with an unexpected status code.
    #[error("api error ({status}): {message}")]
    Api { message: String, status: u16 },

    /// Token retrieval failed for any reason.
    #[error("retrieve token error: {message}")]
    Token {
        message: String,
        #[source]
        source: Option<Box<Error>>,
    },

    /// A public operation failed; wraps the cause with the operation name.
    #[error("{operation} error: {source}")]
    Operation {
        operation: &'static str,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Wrap a downstream failure of the token retrieval path.
    pub(crate) fn token(source: Error) -> Self {
        Error::Token {
            message: source.to_string(),
            source: Some(Box::new(source)),
        }
    }

    /// Token retrieval failed without a downstream cause, e.g. the SSO
    /// response carried no usable `access_token`.
    pub(crate) fn token_message(message: impl Into<String>) -> Self {
        Error::Token {
            message: message.into(),
            source: None,
        }
    }

    /// Wrap any failure escaping a public operation with its name.
    pub(crate) fn operation(operation: &'static str, source: Error) -> Self {
        Error::Operation {
            operation,
            source: Box::new(source),
        }
    }

    /// HTTP status carried by this error or its cause chain, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => Some(*status),
            Error::Token {
                source: Some(inner), ..
            } => inner.status(),
            Error::Operation { source, .. } => source.status(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operation_wrapping_preserves_cause_and_status() {
        let api = Error::Api {
            message: "invalid_grant".into(),
            status: 400,
        };
        let wrapped = Error::operation("login", Error::token(api));

        assert_eq!(wrapped.status(), Some(400));
        assert_eq!(
            wrapped.to_string(),
            "login error: retrieve token error: api error (400): invalid_grant"
        );
    }

    #[test]
    fn validation_message_names_the_field() {
        let err = Error::operation("registration", Error::Validation("SDK JWT"));
        assert_eq!(err.to_string(), "registration error: SDK JWT should be provided");
    }
}
