//! Airbnb OAuth endpoint constants
//!
//! Fixed locations of the Airbnb authorization API. The authorization page
//! lives on www.airbnb.com (browser redirect target), while every
//! server-to-server call goes to api.airbnb.com. None of these values are
//! secrets; the client id/secret pair is supplied by the caller.

/// Base host for all server-to-server API calls
pub const API_HOST: &str = "https://api.airbnb.com";

/// Authorization page the user is redirected to (browser flow, not API)
pub const AUTHORIZE_ENDPOINT: &str = "https://www.airbnb.com/oauth2/auth";

/// Resource path for token exchange, status, refresh and revocation
pub const AUTHORIZATIONS_PATH: &str = "/v2/oauth2/authorizations";

/// Resource path for listing hosts authorized under a client application
pub const CLIENTS_PATH: &str = "/v2/oauth2/clients";

/// Scope granted when the caller does not ask for one.
/// Known scopes: `vr` (vacation rentals), `messages_write`.
pub const DEFAULT_SCOPE: &str = "vr";

/// Query flag telling the API to return the bare resource instead of the
/// envelope-wrapped form
pub const UNWRAPPED_FLAG: (&str, &str) = ("_unwrapped", "true");
