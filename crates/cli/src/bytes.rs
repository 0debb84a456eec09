//! Converting command-line text to key/value bytes and back.

use anyhow::{Context, Result};

/// Decodes a command-line argument as hex, or as raw text when `utf8` is set.
pub fn decode(arg: &str, utf8: bool) -> Result<Vec<u8>> {
    if utf8 {
        return Ok(arg.as_bytes().to_vec());
    }

    let digits = arg.strip_prefix("0x").unwrap_or(arg);
    hex::decode(digits).with_context(|| format!("invalid hex input: {arg}"))
}

/// Renders bytes as lowercase hex, or as text when `utf8` is set.
pub fn encode(bytes: &[u8], utf8: bool) -> String {
    if utf8 {
        return String::from_utf8_lossy(bytes).into_owned();
    }
    hex::encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_hex() {
        assert_eq!(decode("74657374", false).unwrap(), b"test");
        assert_eq!(decode("0xDEADbeef", false).unwrap(), vec![0xDE, 0xAD, 0xBE, 0xEF]);
        assert!(decode("", false).unwrap().is_empty());
    }

    #[test]
    fn decode_rejects_bad_hex() {
        assert!(decode("abc", false).is_err());
        assert!(decode("zz", false).is_err());
        assert!(decode("0x0", false).is_err());
    }

    #[test]
    fn decode_utf8_passes_through() {
        assert_eq!(decode("zz", true).unwrap(), b"zz");
    }

    #[test]
    fn encode_both_modes() {
        assert_eq!(encode(b"test", false), "74657374");
        assert_eq!(encode(&[0xDE, 0xAD], false), "dead");
        assert_eq!(encode(b"test", true), "test");
    }
}
