use thiserror::Error;

/// Reasons a signed request is rejected.
///
/// Variants are ordered the way checks run: field extraction, access key
/// lookup, timestamp window, signature comparison, replay detection.
#[derive(Debug, Error)]
pub enum VerifyError {
    /// A field the signer always appends is absent or empty.
    #[error("required field `{0}` is missing from the request")]
    MissingField(&'static str),

    /// A field the signer appends exactly once appears more than once.
    #[error("field `{0}` appears more than once")]
    DuplicateField(&'static str),

    /// The request's access key is not the one this verifier serves.
    #[error("access key is not recognized")]
    UnknownAccessKey,

    /// The timestamp is not a decimal epoch-millisecond value.
    #[error("timestamp is not a decimal epoch-millisecond value")]
    InvalidTimestamp,

    /// The timestamp is stale or too far in the future.
    #[error("timestamp is outside the acceptance window")]
    TimestampOutOfWindow,

    /// The recomputed signature does not match the received one.
    #[error("signature does not match")]
    SignatureMismatch,

    /// The nonce was already used inside the acceptance window.
    #[error("nonce has already been used inside the acceptance window")]
    NonceReplayed,

    /// Recomputing the signature failed.
    #[error(transparent)]
    Signing(#[from] apisign_core::Error),
}
