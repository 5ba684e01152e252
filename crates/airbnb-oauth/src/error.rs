//! Error types for Airbnb API calls
//!
//! One taxonomy, no translation: a failed call is either a transport-level
//! failure (the request never produced an HTTP response) or an upstream
//! error response, carried back with its original status code and body so
//! the caller can inspect the remote API's own error payload (invalid code,
//! expired token, revoked token). Every `Display` text names the Airbnb API
//! adapter as the origin.

/// Errors from Airbnb OAuth API operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The request failed before an HTTP response arrived (connect, TLS,
    /// timeout).
    #[error("Airbnb API request failed: {0}")]
    Transport(String),

    /// The API answered with a non-success status. Status code and raw
    /// response body are preserved verbatim.
    #[error("Airbnb API returned {status}: {body}")]
    Api { status: u16, body: String },

    /// The response was declared JSON but could not be parsed as JSON.
    #[error("Airbnb API sent an invalid response: {0}")]
    Decode(String),
}

impl Error {
    /// Status code of the upstream error response, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result alias for adapter operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_identifies_the_adapter() {
        let transport = Error::Transport("connection refused".into());
        assert!(transport.to_string().starts_with("Airbnb API"));

        let api = Error::Api {
            status: 401,
            body: r#"{"error":"invalid_client"}"#.into(),
        };
        let text = api.to_string();
        assert!(text.starts_with("Airbnb API"), "got: {text}");
        assert!(text.contains("401"));
        assert!(text.contains("invalid_client"));
    }

    #[test]
    fn status_accessor_only_matches_api_errors() {
        let api = Error::Api {
            status: 404,
            body: String::new(),
        };
        assert_eq!(api.status(), Some(404));
        assert_eq!(Error::Transport("timed out".into()).status(), None);
    }
}
