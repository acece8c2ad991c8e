//! Core components for signing API requests with a shared credential pair.
//!
//! This crate implements the client half of a canonical-request signing
//! scheme: a client and a server share a long-lived access key and secret
//! key, the client signs each request's parameters together with a
//! timestamp and a single-use nonce, and the server independently
//! recomputes the digest to check integrity and origin.
//!
//! ## Overview
//!
//! Signing is pure computation built from three pieces:
//!
//! - **Config**: an immutable, validated bundle of credentials, charset and
//!   digest algorithm, produced by a fluent builder
//! - **Canonicalization**: a deterministic transform of the parameter set
//!   (filter empty values, inject the access key, byte-wise sort,
//!   percent-encode, join) that both sides must reproduce exactly
//! - **RequestSigner**: binds one config to one parameter set, generates
//!   the anti-replay fields once, and memoizes the computed signature
//!
//! The default digest is HMAC-SHA256 keyed by the secret key.
//! [`SignatureAlgorithm::LegacyMd5`] reproduces the legacy MD5
//! construction byte for byte for peers that cannot be upgraded.
//!
//! ## Example
//!
//! ```
//! use apisign_core::{Config, RequestSigner};
//!
//! # fn main() -> apisign_core::Result<()> {
//! let config = Config::builder()
//!     .access_key("my-access-key")
//!     .secret_key("my-secret-key")
//!     .build()?;
//!
//! let params = vec![
//!     ("name".to_string(), "hello".to_string()),
//!     ("home".to_string(), "world".to_string()),
//! ];
//! let signer = RequestSigner::new(config, params)?;
//!
//! // Append to the target URL as-is.
//! let query = signer.signed_query();
//! assert!(query.ends_with("&accessKey=my-access-key"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Verification
//!
//! The server-side counterpart lives in the `apisign-verify` crate: it
//! recomputes the signature from the received parameters, enforces a
//! timestamp acceptance window, and rejects replayed nonces through a
//! pluggable store.

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;

mod canonical;
mod constants;
mod replay;

mod config;
pub use config::{Config, ConfigBuilder, SignatureAlgorithm};
mod encoding;
pub use encoding::Charset;
mod error;
pub use error::{Error, ErrorKind, Result};
mod signer;
pub use signer::RequestSigner;
