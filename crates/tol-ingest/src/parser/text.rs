//! Decoding of delimited-text payloads.

use std::borrow::Cow;

use crate::error::{IngestError, Result};

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Decodes a text payload.
///
/// UTF-8 is expected; a leading BOM is dropped. UTF-16 payloads are rejected.
/// Bytes that are not valid UTF-8 are decoded as Windows-1252, which is what
/// spreadsheet tools on Windows export by default.
pub fn decode_text(bytes: &[u8]) -> Result<Cow<'_, str>> {
    if bytes.len() >= 2 {
        if bytes[0..2] == [0xFF, 0xFE] {
            return Err(IngestError::UnsupportedEncoding {
                encoding: "UTF-16 LE",
            });
        }
        if bytes[0..2] == [0xFE, 0xFF] {
            return Err(IngestError::UnsupportedEncoding {
                encoding: "UTF-16 BE",
            });
        }
    }

    let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    match std::str::from_utf8(body) {
        Ok(text) => Ok(Cow::Borrowed(text)),
        Err(_) => {
            let (text, had_errors) = encoding_rs::WINDOWS_1252.decode_without_bom_handling(body);
            tracing::warn!(
                had_errors,
                "text payload is not valid UTF-8, decoded as Windows-1252"
            );
            Ok(text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_utf8() {
        assert_eq!(decode_text(b"a,b\n1,2\n").unwrap(), "a,b\n1,2\n");
    }

    #[test]
    fn test_strips_utf8_bom() {
        let bytes = b"\xEF\xBB\xBFSales Level 6,SDR\n";
        assert_eq!(decode_text(bytes).unwrap(), "Sales Level 6,SDR\n");
    }

    #[test]
    fn test_rejects_utf16() {
        let result = decode_text(&[0xFF, 0xFE, b'a', 0x00]);
        assert!(matches!(
            result,
            Err(IngestError::UnsupportedEncoding {
                encoding: "UTF-16 LE"
            })
        ));
        let result = decode_text(&[0xFE, 0xFF, 0x00, b'a']);
        assert!(matches!(
            result,
            Err(IngestError::UnsupportedEncoding {
                encoding: "UTF-16 BE"
            })
        ));
    }

    #[test]
    fn test_windows_1252_fallback() {
        // "Jos\xE9" is "José" in Windows-1252
        let decoded = decode_text(b"SDR\nJos\xE9\n").unwrap();
        assert_eq!(decoded, "SDR\nJosé\n");
    }
}
