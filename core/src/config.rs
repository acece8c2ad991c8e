use crate::encoding::Charset;
use crate::{Error, Result};
use std::fmt::{Debug, Formatter};

/// Digest used for the request signature.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SignatureAlgorithm {
    /// HMAC-SHA256 keyed by the secret key, rendered as 64 uppercase hex
    /// characters. The default.
    #[default]
    HmacSha256,
    /// MD5 over the canonical string with `&SecretKey=<secret>` appended,
    /// rendered as 32 uppercase hex characters.
    ///
    /// Byte-compatible with legacy deployments. MD5 is cryptographically
    /// weak; enable this only to talk to peers that cannot be upgraded.
    LegacyMd5,
}

/// Immutable signing configuration shared by a client and a server.
///
/// Built via [`Config::builder`]; once constructed it is read-only and
/// safe to share across concurrent [`RequestSigner`](crate::RequestSigner)
/// instantiations.
#[derive(Clone)]
pub struct Config {
    access_key: String,
    secret_key: String,
    charset: Charset,
    algorithm: SignatureAlgorithm,
    fixed_timestamp: Option<String>,
    fixed_nonce: Option<String>,
}

impl Config {
    /// Create a builder with no fields set.
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Public identifier, included in the canonical string and the final
    /// query string.
    pub fn access_key(&self) -> &str {
        &self.access_key
    }

    /// Shared secret. Participates in the digest only, never transmitted.
    pub fn secret_key(&self) -> &str {
        &self.secret_key
    }

    /// Charset used for value encoding and digest input.
    pub fn charset(&self) -> Charset {
        self.charset
    }

    /// Digest algorithm for signatures produced with this configuration.
    pub fn algorithm(&self) -> SignatureAlgorithm {
        self.algorithm
    }

    /// Timestamp override, if any.
    pub fn fixed_timestamp(&self) -> Option<&str> {
        self.fixed_timestamp.as_deref()
    }

    /// Nonce override, if any.
    pub fn fixed_nonce(&self) -> Option<&str> {
        self.fixed_nonce.as_deref()
    }
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("access_key", &self.access_key)
            .field("secret_key", &"<redacted>")
            .field("charset", &self.charset.label())
            .field("algorithm", &self.algorithm)
            .field("fixed_timestamp", &self.fixed_timestamp)
            .field("fixed_nonce", &self.fixed_nonce)
            .finish()
    }
}

/// Fluent builder for [`Config`].
///
/// Individual setters never fail; the combination is validated once at
/// [`build`](ConfigBuilder::build).
#[derive(Default)]
pub struct ConfigBuilder {
    access_key: Option<String>,
    secret_key: Option<String>,
    charset: Option<String>,
    algorithm: SignatureAlgorithm,
    fixed_timestamp: Option<String>,
    fixed_nonce: Option<String>,
}

impl ConfigBuilder {
    /// Set the access key.
    pub fn access_key(mut self, access_key: impl Into<String>) -> Self {
        self.access_key = Some(access_key.into());
        self
    }

    /// Set the secret key.
    pub fn secret_key(mut self, secret_key: impl Into<String>) -> Self {
        self.secret_key = Some(secret_key.into());
        self
    }

    /// Set the charset by label, e.g. `UTF-8`.
    pub fn charset(mut self, label: impl Into<String>) -> Self {
        self.charset = Some(label.into());
        self
    }

    /// Select the signature digest.
    pub fn algorithm(mut self, algorithm: SignatureAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Pin the timestamp instead of taking wall-clock time.
    ///
    /// # Note
    ///
    /// Live clients should always sign with the current time. This hook
    /// exists for deterministic tests and for verifiers recomputing a
    /// received request.
    pub fn fixed_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.fixed_timestamp = Some(timestamp.into());
        self
    }

    /// Pin the nonce instead of generating a random one.
    ///
    /// # Note
    ///
    /// Live clients should always sign with a fresh nonce. This hook
    /// exists for deterministic tests and for verifiers recomputing a
    /// received request.
    pub fn fixed_nonce(mut self, nonce: impl Into<String>) -> Self {
        self.fixed_nonce = Some(nonce.into());
        self
    }

    /// Validate the combination and freeze it into a [`Config`].
    ///
    /// Fails with `MissingCredential` if either key is absent or empty,
    /// and with `UnsupportedEncoding` if the charset label is unknown.
    pub fn build(self) -> Result<Config> {
        let access_key = self
            .access_key
            .filter(|k| !k.is_empty())
            .ok_or_else(|| Error::missing_credential("access key is required"))?;
        let secret_key = self
            .secret_key
            .filter(|k| !k.is_empty())
            .ok_or_else(|| Error::missing_credential("secret key is required"))?;
        let charset = match &self.charset {
            Some(label) => Charset::from_label(label)?,
            None => Charset::default(),
        };

        Ok(Config {
            access_key,
            secret_key,
            charset,
            algorithm: self.algorithm,
            fixed_timestamp: self.fixed_timestamp,
            fixed_nonce: self.fixed_nonce,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_build() {
        let config = Config::builder()
            .access_key("access")
            .secret_key("secret")
            .build()
            .unwrap();

        assert_eq!(config.access_key(), "access");
        assert_eq!(config.secret_key(), "secret");
        assert_eq!(config.charset(), Charset::Utf8);
        assert_eq!(config.algorithm(), SignatureAlgorithm::HmacSha256);
        assert_eq!(config.fixed_timestamp(), None);
        assert_eq!(config.fixed_nonce(), None);
    }

    #[test]
    fn test_build_requires_credentials() {
        let err = Config::builder().secret_key("secret").build().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingCredential);

        let err = Config::builder()
            .access_key("access")
            .secret_key("")
            .build()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingCredential);
    }

    #[test]
    fn test_build_rejects_unknown_charset() {
        let err = Config::builder()
            .access_key("access")
            .secret_key("secret")
            .charset("EBCDIC")
            .build()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedEncoding);
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = Config::builder()
            .access_key("access")
            .secret_key("super-secret")
            .build()
            .unwrap();

        let repr = format!("{config:?}");
        assert!(repr.contains("access"));
        assert!(!repr.contains("super-secret"));
    }
}
