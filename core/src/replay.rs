//! Anti-replay token generation.

use chrono::Utc;
use rand::RngCore;

/// Timestamp and nonce bound to one signed request.
///
/// A verifier uses the timestamp for its acceptance-window check and the
/// nonce as the key of its replay store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct ReplayToken {
    pub timestamp: String,
    pub nonce: String,
}

impl ReplayToken {
    /// Generate a token, honoring each fixed override independently.
    ///
    /// A nonce override never routes into the timestamp field and vice
    /// versa.
    pub fn generate(fixed_timestamp: Option<&str>, fixed_nonce: Option<&str>) -> Self {
        let timestamp = match fixed_timestamp {
            Some(ts) => ts.to_string(),
            None => Utc::now().timestamp_millis().to_string(),
        };
        let nonce = match fixed_nonce {
            Some(n) => n.to_string(),
            None => generate_nonce(),
        };

        ReplayToken { timestamp, nonce }
    }
}

/// Random token of 32 hex characters with no separators.
///
/// `ThreadRng` is a CSPRNG and safe to call from concurrent signers.
pub(crate) fn generate_nonce() -> String {
    let mut buf = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut buf);
    hex::encode(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_nonce_shape() {
        let nonce = generate_nonce();
        assert_eq!(nonce.len(), 32);
        assert!(nonce.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(nonce, generate_nonce());
    }

    #[test]
    fn test_both_overrides() {
        let token = ReplayToken::generate(Some("12454654745"), Some("abc123"));
        assert_eq!(token.timestamp, "12454654745");
        assert_eq!(token.nonce, "abc123");
    }

    // A fixed nonce alone must land in the nonce field, not the
    // timestamp field.
    #[test]
    fn test_nonce_override_without_timestamp_override() {
        let token = ReplayToken::generate(None, Some("abc123"));
        assert_eq!(token.nonce, "abc123");
        assert!(token.timestamp.parse::<i64>().is_ok());
        assert_ne!(token.timestamp, "abc123");
    }

    #[test]
    fn test_timestamp_override_without_nonce_override() {
        let token = ReplayToken::generate(Some("12454654745"), None);
        assert_eq!(token.timestamp, "12454654745");
        assert_eq!(token.nonce.len(), 32);
    }

    #[test]
    fn test_generated_timestamp_is_epoch_millis() {
        let token = ReplayToken::generate(None, None);
        let millis: i64 = token.timestamp.parse().unwrap();
        // Sometime after 2020-01-01 and parseable back.
        assert!(millis > 1_577_836_800_000);
    }
}
