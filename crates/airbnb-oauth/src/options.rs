//! Request configuration and the default/per-call merge
//!
//! The client keeps one `DefaultOptions` value (holding at minimum the
//! derived Authorization header) and merges it into every outgoing request.
//! Merge rules are explicit and per-field; see [`merge`].

use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::Method;
use serde_json::Value;

/// Options applied to every request issued by a client instance.
///
/// Installed at construction with the derived Authorization header and
/// replaceable wholesale via `AirbnbOAuth::set_default_options`. Expected to
/// be configured once at startup, not rewritten during steady-state use.
#[derive(Debug, Clone, Default)]
pub struct DefaultOptions {
    /// Headers added to every request unless a per-call header of the same
    /// name overrides them
    pub headers: BTreeMap<String, String>,
    /// Request timeout used when the per-call options set none. `None`
    /// leaves the transport default in place.
    pub timeout: Option<Duration>,
}

/// Per-call request description, constructed fresh for every dispatch.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    /// Absolute URL without a query string; query pairs go in `query`
    pub url: String,
    /// Query parameters, appended in order
    pub query: Vec<(String, String)>,
    /// Per-call headers, merged over the defaults
    pub headers: BTreeMap<String, String>,
    /// JSON request body, sent when present
    pub body: Option<Value>,
    pub timeout: Option<Duration>,
    /// Parse the response body as JSON when set; otherwise the raw body is
    /// returned as a string value
    pub json: bool,
}

impl RequestOptions {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            query: Vec::new(),
            headers: BTreeMap::new(),
            body: None,
            timeout: None,
            json: false,
        }
    }
}

/// Merge stored defaults into per-call options.
///
/// Field rules:
/// - `headers`: start from the defaults, then insert every per-call entry
///   over them. The per-call value wins on a name conflict, so the derived
///   Authorization header survives unless the caller supplies its own.
/// - `timeout`: the per-call value if set, else the default.
/// - `method`, `url`, `query`, `body`, `json`: taken from the per-call
///   options untouched; defaults carry no values for them.
pub fn merge(defaults: &DefaultOptions, call: RequestOptions) -> RequestOptions {
    let mut headers = defaults.headers.clone();
    headers.extend(call.headers);

    RequestOptions {
        method: call.method,
        url: call.url,
        query: call.query,
        headers,
        body: call.body,
        timeout: call.timeout.or(defaults.timeout),
        json: call.json,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults_with_auth() -> DefaultOptions {
        let mut headers = BTreeMap::new();
        headers.insert("Authorization".to_string(), "Basic abc".to_string());
        DefaultOptions {
            headers,
            timeout: None,
        }
    }

    #[test]
    fn default_headers_survive_alongside_call_headers() {
        let mut call = RequestOptions::new(Method::GET, "https://api.airbnb.com/v2/ping");
        call.headers
            .insert("X-Request-Id".to_string(), "req-1".to_string());

        let merged = merge(&defaults_with_auth(), call);
        assert_eq!(
            merged.headers.get("Authorization").map(String::as_str),
            Some("Basic abc")
        );
        assert_eq!(
            merged.headers.get("X-Request-Id").map(String::as_str),
            Some("req-1")
        );
    }

    #[test]
    fn call_header_wins_on_conflict() {
        let mut call = RequestOptions::new(Method::GET, "https://api.airbnb.com/v2/ping");
        call.headers
            .insert("Authorization".to_string(), "Bearer override".to_string());

        let merged = merge(&defaults_with_auth(), call);
        assert_eq!(
            merged.headers.get("Authorization").map(String::as_str),
            Some("Bearer override")
        );
    }

    #[test]
    fn call_timeout_wins_over_default() {
        let defaults = DefaultOptions {
            headers: BTreeMap::new(),
            timeout: Some(Duration::from_secs(60)),
        };

        let mut call = RequestOptions::new(Method::GET, "https://api.airbnb.com/v2/ping");
        call.timeout = Some(Duration::from_secs(5));
        let merged = merge(&defaults, call);
        assert_eq!(merged.timeout, Some(Duration::from_secs(5)));

        let merged = merge(
            &defaults,
            RequestOptions::new(Method::GET, "https://api.airbnb.com/v2/ping"),
        );
        assert_eq!(merged.timeout, Some(Duration::from_secs(60)));
    }

    #[test]
    fn per_call_fields_pass_through() {
        let mut call = RequestOptions::new(Method::POST, "https://api.airbnb.com/v2/thing");
        call.query.push(("_unwrapped".to_string(), "true".to_string()));
        call.body = Some(serde_json::json!({"code": "c1"}));
        call.json = true;

        let merged = merge(&DefaultOptions::default(), call);
        assert_eq!(merged.method, Method::POST);
        assert_eq!(merged.url, "https://api.airbnb.com/v2/thing");
        assert_eq!(merged.query.len(), 1);
        assert!(merged.json);
        assert_eq!(merged.body, Some(serde_json::json!({"code": "c1"})));
    }
}
