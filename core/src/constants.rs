// Parameter keys owned by the signing algorithm.

/// Epoch-millisecond timestamp appended to every signed request.
pub const TIMESTAMP: &str = "timestamp";
/// Single-use random token appended to every signed request.
pub const NONCE: &str = "nonce";
/// The computed signature in the final query string.
pub const SIGN: &str = "sign";
/// The access key as it appears in the final query string.
pub const ACCESS_KEY: &str = "accessKey";
/// The access key as it participates in the canonical string.
pub const ACCESS_KEY_CANONICAL: &str = "AccessKey";
/// The secret key segment of the legacy digest input. Never emitted.
pub const SECRET_KEY_CANONICAL: &str = "SecretKey";

/// Keys the signer injects itself. Callers must not supply these.
pub const RESERVED_KEYS: [&str; 5] = [TIMESTAMP, NONCE, SIGN, ACCESS_KEY, ACCESS_KEY_CANONICAL];
