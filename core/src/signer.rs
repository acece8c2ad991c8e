use crate::canonical;
use crate::config::{Config, SignatureAlgorithm};
use crate::constants::*;
use crate::encoding::encode_value;
use crate::hash;
use crate::replay::ReplayToken;
use crate::Result;
use log::debug;
use once_cell::unsync::OnceCell;

/// Signs one parameter set against one configuration.
///
/// A `RequestSigner` is created per outgoing request. Its timestamp,
/// nonce and signature are computed on first access and cached, so
/// repeated calls on the same instance return identical values. Create a
/// fresh signer for the next request instead of reusing one.
#[derive(Debug)]
pub struct RequestSigner {
    config: Config,
    params: Vec<(String, String)>,
    token: OnceCell<ReplayToken>,
    signature: OnceCell<String>,
}

impl RequestSigner {
    /// Bind a configuration to a caller-supplied parameter list.
    ///
    /// Parameter insertion order does not affect the signature but is
    /// preserved in [`signed_query`](Self::signed_query). Fails with
    /// `ReservedParameter` if the caller pre-populated any key the
    /// signer injects itself (`timestamp`, `nonce`, `sign`,
    /// `accessKey`, `AccessKey`).
    pub fn new(config: Config, params: Vec<(String, String)>) -> Result<Self> {
        canonical::check_reserved(&params)?;

        Ok(RequestSigner {
            config,
            params,
            token: OnceCell::new(),
            signature: OnceCell::new(),
        })
    }

    /// Epoch-millisecond timestamp this request is signed with.
    ///
    /// Assigned on first access from the configured override or
    /// wall-clock time.
    pub fn timestamp(&self) -> &str {
        &self.replay_token().timestamp
    }

    /// Nonce this request is signed with.
    ///
    /// Assigned on first access from the configured override or a fresh
    /// random token.
    pub fn nonce(&self) -> &str {
        &self.replay_token().nonce
    }

    /// The computed signature, as uppercase hex.
    pub fn signature(&self) -> &str {
        self.signature
            .get_or_init(|| self.compute_signature(self.replay_token()))
    }

    /// The final client-sendable query string.
    ///
    /// Emits the original parameters in their insertion order, empty
    /// values included, followed by `timestamp`, `nonce`, `sign` and
    /// `accessKey` in that fixed order. Values are percent-encoded with
    /// the same set used for signing; the secret key never appears.
    pub fn signed_query(&self) -> String {
        let sign = self.signature();
        let token = self.replay_token();

        let mut s = String::with_capacity(64);
        for (key, value) in &self.params {
            s.push_str(key);
            s.push('=');
            s.push_str(&encode_value(value));
            s.push('&');
        }
        s.push_str(TIMESTAMP);
        s.push('=');
        s.push_str(&token.timestamp);
        s.push('&');
        s.push_str(NONCE);
        s.push('=');
        s.push_str(&token.nonce);
        s.push('&');
        s.push_str(SIGN);
        s.push('=');
        s.push_str(sign);
        s.push('&');
        s.push_str(ACCESS_KEY);
        s.push('=');
        s.push_str(&encode_value(self.config.access_key()));

        s
    }

    fn replay_token(&self) -> &ReplayToken {
        self.token.get_or_init(|| {
            ReplayToken::generate(self.config.fixed_timestamp(), self.config.fixed_nonce())
        })
    }

    fn compute_signature(&self, token: &ReplayToken) -> String {
        let base = canonical::string_to_sign(
            self.config.access_key(),
            &self.params,
            &token.timestamp,
            &token.nonce,
        );

        let signature = match self.config.algorithm() {
            SignatureAlgorithm::HmacSha256 => {
                hash::hex_hmac_sha256(self.config.secret_key().as_bytes(), base.as_bytes())
            }
            SignatureAlgorithm::LegacyMd5 => {
                // The legacy digest appends the secret to the hashed
                // string instead of keying a MAC with it.
                let mut input = base;
                input.push('&');
                input.push_str(SECRET_KEY_CANONICAL);
                input.push('=');
                input.push_str(self.config.secret_key());
                hash::hex_md5(input.as_bytes())
            }
        };
        debug!("computed signature: {signature}");

        signature
    }
}
