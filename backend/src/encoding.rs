// Byte-order-mark detection for layout XML files exported by different
// transcription platforms (UTF-8 with or without BOM, occasionally UTF-16).

use encoding_rs::{Encoding, UTF_16BE, UTF_16LE, UTF_8};
use std::fs;
use std::path::Path;

use crate::error::{HumgError, Result};
use crate::logger;

/// Reads a layout file and returns its content as UTF-8 with Unix line endings.
pub fn read_xml_file(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|source| HumgError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    decode_xml_bytes(path, &bytes)
}

/// Decodes raw file bytes. Invalid sequences in a UTF-8 file make the file
/// malformed rather than being silently replaced.
pub fn decode_xml_bytes(path: &Path, bytes: &[u8]) -> Result<String> {
    let (encoding, bom_len) = detect_encoding(bytes);

    logger::debug(&format!(
        "File: {:?}, Encoding: {}, BOM: {}",
        path.file_name().unwrap_or_default(),
        encoding.name(),
        bom_len > 0
    ));

    let body = &bytes[bom_len..];

    let decoded = if encoding == UTF_8 {
        std::str::from_utf8(body)
            .map_err(|e| HumgError::malformed(path, format!("invalid UTF-8: {}", e)))?
            .to_string()
    } else {
        let (text, had_errors) = encoding.decode_without_bom_handling(body);
        if had_errors {
            return Err(HumgError::malformed(
                path,
                format!("invalid {} byte sequence", encoding.name()),
            ));
        }
        text.into_owned()
    };

    Ok(decoded.replace("\r\n", "\n"))
}

/// Returns the encoding named by the BOM (UTF-8 when absent) and the BOM length.
fn detect_encoding(bytes: &[u8]) -> (&'static Encoding, usize) {
    if bytes.starts_with(&[0xFF, 0xFE]) {
        return (UTF_16LE, 2);
    }
    if bytes.starts_with(&[0xFE, 0xFF]) {
        return (UTF_16BE, 2);
    }
    if bytes.starts_with(&[0xEF, 0xBB, 0xBF]) {
        return (UTF_8, 3);
    }
    (UTF_8, 0)
}
