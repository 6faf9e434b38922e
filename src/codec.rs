//! base64 conversion for images crossing the JSON boundary.

use crate::error::{BedrockError, Result};
use base64::{engine::general_purpose::STANDARD, Engine};

pub fn encode_image(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

pub fn decode_image(encoded: &str) -> Result<Vec<u8>> {
    STANDARD
        .decode(encoded.trim())
        .map_err(|e| BedrockError::DecodeError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_is_byte_identical() {
        let png_header = [0x89u8, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, 0x00, 0xff];
        let encoded = encode_image(&png_header);
        assert_eq!(decode_image(&encoded).unwrap(), png_header);
    }

    #[test]
    fn test_decode_tolerates_trailing_newline() {
        assert_eq!(decode_image("aGVsbG8=\n").unwrap(), b"hello");
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let err = decode_image("not base64!!").unwrap_err();
        assert!(matches!(err, BedrockError::DecodeError(_)));
    }
}
