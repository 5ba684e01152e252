//! The Airbnb OAuth client
//!
//! One struct exposing six API operations behind a single dispatch path.
//! Construction derives the Basic Authorization header from the client
//! id/secret pair and installs it into the default options; every operation
//! then funnels
//! through [`AirbnbOAuth::request`], which merges per-call options over the
//! defaults and issues exactly one HTTP request. Responses are opaque JSON
//! passed back unmodified; this crate defines no schema for them.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::Method;
use serde_json::Value;
use tracing::debug;
use url::form_urlencoded;

use crate::constants::{
    API_HOST, AUTHORIZATIONS_PATH, AUTHORIZE_ENDPOINT, CLIENTS_PATH, DEFAULT_SCOPE, UNWRAPPED_FLAG,
};
use crate::error::{Error, Result};
use crate::options::{DefaultOptions, RequestOptions, merge};
use crate::secret::Secret;

/// Client adapter for Airbnb's OAuth2 authorization API.
///
/// Holds the client credential pair and the derived Authorization header.
/// Instances are cheap to construct and hold no per-operation state: the
/// six API operations are independent and may run concurrently on a shared
/// reference.
#[derive(Debug)]
pub struct AirbnbOAuth {
    client_id: String,
    /// Owned alongside the client id as the credential pair; read only at
    /// construction, where the Authorization header is derived from it.
    #[allow(dead_code)]
    client_secret: Secret,
    api_host: String,
    defaults: DefaultOptions,
    http: reqwest::Client,
}

impl AirbnbOAuth {
    /// Create a client from an application's credential pair.
    ///
    /// The Authorization header is derived here, once:
    /// `Basic base64("{client_id}:{client_secret}")`. It is never recomputed;
    /// credentials are immutable after construction.
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<Secret>) -> Self {
        let client_id = client_id.into();
        let client_secret = client_secret.into();

        let encoded =
            STANDARD.encode(format!("{}:{}", client_id, client_secret.expose()).as_bytes());
        let mut defaults = DefaultOptions::default();
        defaults
            .headers
            .insert("Authorization".to_string(), format!("Basic {encoded}"));

        Self {
            client_id,
            client_secret,
            api_host: API_HOST.to_string(),
            defaults,
            http: reqwest::Client::new(),
        }
    }

    /// Point API calls at a different host (mock servers in tests, API
    /// gateways). The authorization-page URL is unaffected.
    pub fn with_api_host(mut self, host: impl Into<String>) -> Self {
        self.api_host = host.into().trim_end_matches('/').to_string();
        self
    }

    /// Replace the stored default options wholesale.
    ///
    /// No shape validation; whatever is set here is merged into every
    /// subsequent request. Intended to be called once at configuration
    /// time. Taking `&mut self` means defaults cannot change under an
    /// in-flight request on a shared reference. The derived Authorization
    /// header lives in the defaults, so a replacement that drops it leaves
    /// requests unauthenticated.
    pub fn set_default_options(&mut self, options: DefaultOptions) {
        self.defaults = options;
    }

    /// Issue a single API request described by `options`, merged over the
    /// stored defaults (see [`merge`] for the field rules).
    ///
    /// No retries, no recovery: a transport failure or non-2xx status is
    /// returned as-is in the adapter's error type, with upstream status and
    /// body preserved. With `json` set the body is parsed and returned as a
    /// JSON value; otherwise the raw body text is returned as a JSON string.
    pub async fn request(&self, options: RequestOptions) -> Result<Value> {
        let options = merge(&self.defaults, options);
        let url = compose_url(&options.url, &options.query);

        debug!(method = %options.method, url = %url, "dispatching API request");

        let mut builder = self.http.request(options.method, url.as_str());
        for (name, value) in &options.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &options.body {
            builder = builder.json(body);
        }
        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::Transport(format!("reading response body: {e}")))?;

        if !status.is_success() {
            return Err(Error::Api {
                status: status.as_u16(),
                body,
            });
        }

        if options.json {
            serde_json::from_str(&body).map_err(|e| Error::Decode(e.to_string()))
        } else {
            Ok(Value::String(body))
        }
    }

    /// Build the authorization-page URL the user is redirected to.
    ///
    /// Pure and deterministic, no I/O. `scope` falls back to `vr` when
    /// omitted or empty; `state` falls back to the empty string.
    pub fn authorize_url(
        &self,
        redirect: &str,
        state: Option<&str>,
        scope: Option<&str>,
    ) -> String {
        let scope = scope.filter(|s| !s.is_empty()).unwrap_or(DEFAULT_SCOPE);
        let state = state.unwrap_or("");

        let mut query = form_urlencoded::Serializer::new(String::new());
        query
            .append_pair("client_id", &self.client_id)
            .append_pair("redirect_uri", redirect)
            .append_pair("scope", scope)
            .append_pair("state", state);

        format!("{AUTHORIZE_ENDPOINT}?{}", query.finish())
    }

    /// Exchange an authorization code for an access/refresh token pair.
    pub async fn get_access_token(&self, code: &str) -> Result<Value> {
        self.request_token(Some(code), None, false).await
    }

    /// Mint a new access token from a refresh token. With `reset` the API
    /// also rotates the refresh token itself.
    pub async fn refresh_token(&self, token: &str, reset: bool) -> Result<Value> {
        self.request_token(None, Some(token), reset).await
    }

    /// Ask the API whether a token is still valid. Returns the token
    /// metadata payload as provided by the remote side.
    pub async fn check_token_status(&self, token: &str) -> Result<Value> {
        self.handle_token(Method::GET, token).await
    }

    /// Revoke a token. Returns the API's confirmation payload.
    pub async fn revoke_token(&self, token: &str) -> Result<Value> {
        self.handle_token(Method::DELETE, token).await
    }

    /// List hosts authorized under this client application.
    ///
    /// `_limit` and `_offset` query parameters are sent only when supplied.
    pub async fn retrieve_all_hosts(
        &self,
        limit: Option<u64>,
        offset: Option<u64>,
    ) -> Result<Value> {
        let mut options = RequestOptions::new(
            Method::GET,
            format!("{}{}/{}", self.api_host, CLIENTS_PATH, self.client_id),
        );
        if let Some(limit) = limit {
            options.query.push(("_limit".to_string(), limit.to_string()));
        }
        if let Some(offset) = offset {
            options
                .query
                .push(("_offset".to_string(), offset.to_string()));
        }
        options.json = true;

        self.request(options).await
    }

    /// POST to the authorizations endpoint with a conditionally-assembled
    /// body. Exactly one of code-only, token-only, or token-plus-reset is
    /// the expected pattern, but mutual exclusivity is not enforced here;
    /// when both fields are supplied the remote API arbitrates.
    async fn request_token(
        &self,
        code: Option<&str>,
        refresh: Option<&str>,
        reset: bool,
    ) -> Result<Value> {
        let mut options = RequestOptions::new(
            Method::POST,
            format!("{}{}", self.api_host, AUTHORIZATIONS_PATH),
        );
        options
            .query
            .push((UNWRAPPED_FLAG.0.to_string(), UNWRAPPED_FLAG.1.to_string()));
        options.body = Some(token_request_body(code, refresh, reset));
        options.json = true;

        self.request(options).await
    }

    /// GET or DELETE the per-token authorization resource.
    async fn handle_token(&self, method: Method, token: &str) -> Result<Value> {
        let mut options = RequestOptions::new(
            method,
            format!("{}{}/{}", self.api_host, AUTHORIZATIONS_PATH, token),
        );
        options
            .query
            .push((UNWRAPPED_FLAG.0.to_string(), UNWRAPPED_FLAG.1.to_string()));
        options.json = true;

        self.request(options).await
    }
}

/// Append query pairs to a base URL, percent-encoded.
fn compose_url(url: &str, query: &[(String, String)]) -> String {
    if query.is_empty() {
        return url.to_string();
    }
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    serializer.extend_pairs(query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
    format!("{url}?{}", serializer.finish())
}

/// Token-exchange request body. Fields are present only when supplied;
/// `reset_refresh_token` is the literal `1` the API expects, not a boolean.
fn token_request_body(code: Option<&str>, refresh: Option<&str>, reset: bool) -> Value {
    let mut body = serde_json::Map::new();
    if let Some(code) = code {
        body.insert("code".to_string(), Value::from(code));
    }
    if let Some(refresh) = refresh {
        body.insert("refresh_token".to_string(), Value::from(refresh));
    }
    if reset {
        body.insert("reset_refresh_token".to_string(), Value::from(1));
    }
    Value::Object(body)
}
