//! CSRF state generation for the authorization flow
//!
//! The `state` parameter round-trips through the authorization page: the
//! consumer puts it in the authorize URL and checks that the callback
//! carries the same value. Any opaque string works; this helper produces a
//! cryptographically random one for consumers that don't bring their own.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::RngExt;

/// Generate a random `state` value.
///
/// 32 random bytes as URL-safe base64 (no padding), so the value needs no
/// further encoding when placed in the authorize URL.
pub fn generate_state() -> String {
    let mut bytes = [0u8; 32];
    rand::rng().fill(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_is_url_safe_base64() {
        let state = generate_state();
        // 32 bytes → 43 base64url chars, no padding
        assert_eq!(state.len(), 43);
        assert!(
            state
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'),
            "state must be URL-safe base64 (no padding): {state}"
        );
    }

    #[test]
    fn states_are_unique() {
        let a = generate_state();
        let b = generate_state();
        assert_ne!(a, b, "two states must not collide");
    }
}
