//! Airbnb OAuth2 client adapter
//!
//! Thin client for Airbnb's OAuth2-style authorization API: authorize-URL
//! building, code-for-token exchange, token status/refresh/revocation, and
//! listing the hosts authorized under a client application. Every operation
//! is a single outbound HTTP request; responses are opaque JSON handed back
//! to the caller unmodified. Token storage, refresh scheduling, retries and
//! the redirect endpoint itself are the consumer's responsibility.
//!
//! Typical flow:
//! 1. Construct [`AirbnbOAuth`] with the application's client id/secret
//! 2. Send the user to [`AirbnbOAuth::authorize_url`] (state via
//!    [`generate_state`])
//! 3. Receive the authorization code on your redirect endpoint
//! 4. Call [`AirbnbOAuth::get_access_token`] to obtain the token pair
//! 5. Later: `check_token_status` / `refresh_token` / `revoke_token`

pub mod client;
pub mod constants;
pub mod error;
pub mod options;
pub mod secret;
pub mod state;

pub use client::AirbnbOAuth;
pub use error::{Error, Result};
pub use options::{DefaultOptions, RequestOptions};
pub use secret::Secret;
pub use state::generate_state;
