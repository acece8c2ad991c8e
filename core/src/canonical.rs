//! Canonical form of a parameter set.
//!
//! Client and server must produce byte-identical canonical strings for
//! the same logical parameters or signatures will never match. Every
//! rule here (empty-value filtering, byte-wise key order, the encode
//! set) is load-bearing for that equality.

use crate::constants::*;
use crate::encoding::encode_value;
use crate::{Error, Result};
use log::debug;

/// Reject caller parameters that collide with keys the signer injects.
///
/// A collision would corrupt the canonical string silently and produce a
/// signature no verifier can match, so it fails before any digest runs.
pub(crate) fn check_reserved(params: &[(String, String)]) -> Result<()> {
    for (key, _) in params {
        if RESERVED_KEYS.contains(&key.as_str()) {
            return Err(Error::reserved_parameter(format!(
                "parameter key {key:?} is injected by the signer and must not be supplied"
            )));
        }
    }
    Ok(())
}

/// Sorted `key=value&...` string over the non-empty parameters with the
/// access key included.
///
/// Entries with empty values are never signed. Keys are ordered by plain
/// byte-wise comparison, so `AccessKey` sorts among the caller's keys by
/// its leading capital. Values are percent-encoded, keys are not.
pub(crate) fn sorted_param_string(access_key: &str, params: &[(String, String)]) -> String {
    let mut entries = params
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(key, value)| (key.as_str(), encode_value(value)))
        .collect::<Vec<_>>();
    entries.push((ACCESS_KEY_CANONICAL, encode_value(access_key)));
    entries.sort();

    let mut s = String::with_capacity(16);
    for (idx, (key, value)) in entries.iter().enumerate() {
        if idx != 0 {
            s.push('&');
        }
        s.push_str(key);
        s.push('=');
        s.push_str(value);
    }

    s
}

/// The full string covered by the digest, minus any secret material.
///
/// Timestamp and nonce are appended after the sorted parameters, in that
/// fixed order, un-encoded.
pub(crate) fn string_to_sign(
    access_key: &str,
    params: &[(String, String)],
    timestamp: &str,
    nonce: &str,
) -> String {
    let mut s = sorted_param_string(access_key, params);
    s.push_str("&timestamp=");
    s.push_str(timestamp);
    s.push_str("&nonce=");
    s.push_str(nonce);
    debug!("string to sign: {s}");

    s
}
