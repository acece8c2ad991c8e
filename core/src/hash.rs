//! Digest related utils.

use hmac::Hmac;
use hmac::Mac;
use md5::Md5;
use sha2::Digest;
use sha2::Sha256;

/// Uppercase hex encoded MD5 hash.
///
/// Only used by the legacy compatibility digest. New deployments should
/// stay on the keyed HMAC construction.
pub fn hex_md5(content: &[u8]) -> String {
    hex::encode_upper(Md5::digest(content).as_slice())
}

/// Uppercase hex encoded HMAC with SHA256 hash.
pub fn hex_hmac_sha256(key: &[u8], content: &[u8]) -> String {
    // SAFETY: HMAC's new_from_slice always returns Ok - it handles any key length
    let mut h = Hmac::<Sha256>::new_from_slice(key).unwrap();
    h.update(content);

    hex::encode_upper(h.finalize().into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_md5() {
        // RFC 1321 test suite value, uppercased.
        assert_eq!(hex_md5(b"abc"), "900150983CD24FB0D6963F7D28E17F72");
    }

    #[test]
    fn test_hex_hmac_sha256() {
        // RFC 4231 test case 2, uppercased.
        assert_eq!(
            hex_hmac_sha256(b"Jefe", b"what do ya want for nothing?"),
            "5BDCC146BF60754E6A042426089575C75A003F089D2739839DEC58B964EC3843"
        );
    }
}
