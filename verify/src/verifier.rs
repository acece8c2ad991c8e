use crate::store::NonceStore;
use crate::VerifyError;
use apisign_core::{Config, RequestSigner, SignatureAlgorithm};
use chrono::{DateTime, Utc};
use log::debug;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;
use std::time::Duration;
use subtle::ConstantTimeEq;

/// Default acceptance window for clock skew between signer and verifier.
pub const DEFAULT_WINDOW: Duration = Duration::from_secs(15 * 60);

/// A request that passed every check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedRequest {
    /// The caller's parameters, decoded, in received order, with the
    /// `timestamp`, `nonce`, `sign` and `accessKey` fields removed.
    pub params: Vec<(String, String)>,
}

/// Server-side counterpart of the request signer.
///
/// For each received query string the verifier recomputes the signature
/// with the shared secret, enforces the timestamp acceptance window, and
/// rejects nonces it has already seen inside that window.
pub struct Verifier {
    access_key: String,
    secret_key: String,
    algorithm: SignatureAlgorithm,
    window: Duration,
    store: Arc<dyn NonceStore>,
    time: Option<DateTime<Utc>>,
}

impl Debug for Verifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Verifier")
    }
}

impl Verifier {
    /// Create a verifier for one credential pair.
    ///
    /// The store is shared so concurrent verifiers agree on seen nonces.
    pub fn new(
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
        store: Arc<dyn NonceStore>,
    ) -> Self {
        Self {
            access_key: access_key.into(),
            secret_key: secret_key.into(),
            algorithm: SignatureAlgorithm::default(),
            window: DEFAULT_WINDOW,
            store,
            time: None,
        }
    }

    /// Replace the default ±15 minute acceptance window.
    ///
    /// The window doubles as the nonce TTL: a nonce only needs to be
    /// remembered for as long as its timestamp would be accepted.
    pub fn with_window(mut self, window: Duration) -> Self {
        self.window = window;
        self
    }

    /// Expect signatures produced with the given digest.
    pub fn with_algorithm(mut self, algorithm: SignatureAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Specify the verification time.
    ///
    /// # Note
    ///
    /// We should always verify against current time.
    /// Only use this function for testing.
    #[cfg(test)]
    fn with_time(mut self, time: DateTime<Utc>) -> Self {
        self.time = Some(time);
        self
    }

    /// Verify a received query string.
    ///
    /// Checks run in a fixed order and the first failure wins: field
    /// extraction, access key, timestamp window, signature, replay. The
    /// nonce is only recorded after the signature matched, so forged
    /// requests cannot burn nonces for legitimate clients.
    pub fn verify(&self, query: &str) -> Result<VerifiedRequest, VerifyError> {
        let mut payload = Vec::new();
        let mut timestamp = None;
        let mut nonce = None;
        let mut sign = None;
        let mut access_key = None;

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            let slot = match key.as_ref() {
                "timestamp" => Some((&mut timestamp, "timestamp")),
                "nonce" => Some((&mut nonce, "nonce")),
                "sign" => Some((&mut sign, "sign")),
                "accessKey" => Some((&mut access_key, "accessKey")),
                _ => None,
            };
            match slot {
                Some((slot, name)) => {
                    if slot.is_some() {
                        return Err(VerifyError::DuplicateField(name));
                    }
                    *slot = Some(value.into_owned());
                }
                None => payload.push((key.into_owned(), value.into_owned())),
            }
        }

        let timestamp = required(timestamp, "timestamp")?;
        let nonce = required(nonce, "nonce")?;
        let sign = required(sign, "sign")?;
        let access_key = required(access_key, "accessKey")?;

        if access_key != self.access_key {
            debug!("rejected request for unknown access key {access_key}");
            return Err(VerifyError::UnknownAccessKey);
        }

        let millis: i64 = timestamp
            .parse()
            .map_err(|_| VerifyError::InvalidTimestamp)?;
        let now = self.time.unwrap_or_else(Utc::now);
        // Widened before subtracting: `millis` is attacker-controlled and
        // may be i64::MIN, which would overflow an i64 difference.
        let skew = (now.timestamp_millis() as i128 - millis as i128).unsigned_abs();
        if skew > self.window.as_millis() {
            debug!("rejected request with timestamp {timestamp}, skew {skew}ms");
            return Err(VerifyError::TimestampOutOfWindow);
        }

        let config = Config::builder()
            .access_key(self.access_key.as_str())
            .secret_key(self.secret_key.as_str())
            .algorithm(self.algorithm)
            .fixed_timestamp(timestamp.as_str())
            .fixed_nonce(nonce.as_str())
            .build()?;
        let signer = RequestSigner::new(config, payload.clone())?;
        let expected = signer.signature();

        let received = sign.to_ascii_uppercase();
        if !bool::from(received.as_bytes().ct_eq(expected.as_bytes())) {
            debug!("signature mismatch for access key {access_key}");
            return Err(VerifyError::SignatureMismatch);
        }

        // Last check: forged requests never reach the store.
        if !self.store.insert_if_absent(&nonce, self.window) {
            debug!("replayed nonce {nonce}");
            return Err(VerifyError::NonceReplayed);
        }

        Ok(VerifiedRequest { params: payload })
    }
}

fn required(value: Option<String>, name: &'static str) -> Result<String, VerifyError> {
    value
        .filter(|v| !v.is_empty())
        .ok_or(VerifyError::MissingField(name))
}
