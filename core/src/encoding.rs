//! Character set handling and query value encoding.

use crate::{Error, Result};
use percent_encoding::utf8_percent_encode;
use percent_encoding::AsciiSet;
use percent_encoding::NON_ALPHANUMERIC;

/// AsciiSet for query value encoding.
///
/// Everything outside the RFC 3986 unreserved set escapes as `%XX`,
/// space included. Client and server must share this set or signatures
/// will never match.
pub static QUERY_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Character set used to turn parameter values and the signing string
/// into bytes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Charset {
    /// UTF-8, the default and currently the only supported charset.
    #[default]
    Utf8,
}

impl Charset {
    /// Resolve a charset label like `UTF-8`.
    ///
    /// Labels are matched case-insensitively. Unknown labels fail with
    /// [`ErrorKind::UnsupportedEncoding`](crate::ErrorKind::UnsupportedEncoding)
    /// instead of silently falling back to un-encoded values.
    pub fn from_label(label: &str) -> Result<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "utf-8" | "utf8" => Ok(Charset::Utf8),
            _ => Err(Error::unsupported_encoding(format!(
                "charset {label:?} is not supported"
            ))),
        }
    }

    /// The canonical label of this charset.
    pub fn label(&self) -> &'static str {
        match self {
            Charset::Utf8 => "UTF-8",
        }
    }
}

/// Percent-encode a parameter value for the canonical string and the
/// signed query string.
pub fn encode_value(value: &str) -> String {
    utf8_percent_encode(value, &QUERY_ENCODE_SET).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_charset_labels() {
        assert_eq!(Charset::from_label("UTF-8").unwrap(), Charset::Utf8);
        assert_eq!(Charset::from_label("utf8").unwrap(), Charset::Utf8);
        assert_eq!(Charset::from_label(" Utf-8 ").unwrap(), Charset::Utf8);

        let err = Charset::from_label("GBK").unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::UnsupportedEncoding);
    }

    #[test]
    fn test_encode_value() {
        let cases = vec![
            ("hello", "hello"),
            ("hello world/中", "hello%20world%2F%E4%B8%AD"),
            ("a-b.c_d~e", "a-b.c_d~e"),
            ("k=v&x", "k%3Dv%26x"),
            ("", ""),
        ];

        for (input, expected) in cases {
            assert_eq!(encode_value(input), expected, "failed on input: {input}");
        }
    }
}
