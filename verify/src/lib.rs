//! Server-side verification for apisign signed requests.
//!
//! This crate implements the verifier half of the scheme `apisign-core`
//! signs for: given a received query string and the shared credential
//! pair, it recomputes the signature, enforces a timestamp acceptance
//! window, and rejects replayed nonces.
//!
//! # Overview
//!
//! A request is accepted only when all of the following hold:
//!
//! 1. `timestamp`, `nonce`, `sign` and `accessKey` are present exactly
//!    once
//! 2. the access key is the one this verifier serves
//! 3. the timestamp is inside `now ± window` (default 15 minutes)
//! 4. the signature recomputed over the remaining parameters matches the
//!    received one (constant-time comparison)
//! 5. the nonce has not been seen inside the window
//!
//! The nonce bookkeeping goes through the [`NonceStore`] trait.
//! [`MemoryNonceStore`] covers tests and single-process servers;
//! multi-node deployments implement the trait over a shared cache with
//! native expiry.
//!
//! # Usage
//!
//! ```
//! use apisign_verify::{MemoryNonceStore, Verifier};
//! use std::sync::Arc;
//!
//! let verifier = Verifier::new(
//!     "my-access-key",
//!     "my-secret-key",
//!     Arc::new(MemoryNonceStore::new()),
//! );
//!
//! // For each incoming request:
//! // let verified = verifier.verify(request_query)?;
//! ```

#![warn(missing_docs)]

mod error;
pub use error::VerifyError;
mod store;
pub use store::{MemoryNonceStore, NonceStore};
mod verifier;
pub use verifier::{VerifiedRequest, Verifier, DEFAULT_WINDOW};
