//! Byte decoder: raw export bytes to an untyped JSON document.
//!
//! The single entry point for turning raw bytes into a document. Detects
//! gzip framing (filename/content-encoding hint or magic-number sniff),
//! decompresses with size ceilings enforced on both sides, rejects HTML
//! content with a distinct error, and parses the remaining text as JSON.
//!
//! `decode` is a pure function over its inputs; callers importing very
//! large files may run it on a worker thread and the contract is identical.

use crate::error::{ImportError, Result};
use flate2::read::GzDecoder;
use serde_json::Value;
use std::io::Read;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// How much of the decoded text is echoed back in a JSON parse error.
const ERROR_PREFIX_LEN: usize = 80;

/// How far into the text the HTML sniff looks for an `<html` tag.
const HTML_SNIFF_WINDOW: usize = 512;

/// Size ceilings checked before and after decompression. Decompression can
/// inflate size dramatically, so both checks are required.
#[derive(Debug, Clone)]
pub struct SizeLimits {
    pub max_input_bytes: usize,
    pub max_decoded_bytes: usize,
}

impl Default for SizeLimits {
    fn default() -> Self {
        Self {
            max_input_bytes: 128 * 1024 * 1024,
            max_decoded_bytes: 512 * 1024 * 1024,
        }
    }
}

/// Decode raw export bytes into an untyped JSON document.
///
/// `hint` may be a filename, a filename suffix, or a content-encoding flag
/// from the fetch layer ("gzip"); the decoder behaves identically whether
/// the hint is present or compression is detected purely from the gzip
/// magic number. Either signal alone triggers decompression.
pub fn decode(bytes: &[u8], hint: Option<&str>, limits: &SizeLimits) -> Result<Value> {
    if bytes.len() > limits.max_input_bytes {
        return Err(ImportError::TooLarge { size: bytes.len(), limit: limits.max_input_bytes });
    }

    let text = if looks_compressed(bytes, hint) {
        let decoded = decompress(bytes, limits)?;
        log::debug!("decompressed {} bytes to {}", bytes.len(), decoded.len());
        String::from_utf8(decoded)
            .map_err(|_| ImportError::Format("decompressed data is not valid UTF-8 text".into()))?
    } else {
        std::str::from_utf8(bytes)
            .map_err(|_| ImportError::Format("input is not valid UTF-8 text".into()))?
            .to_owned()
    };

    if looks_like_html(&text) {
        return Err(ImportError::WebPage);
    }

    serde_json::from_str(&text).map_err(|err| {
        ImportError::Format(format!("invalid JSON ({}): {:?}", err, text_prefix(&text)))
    })
}

fn looks_compressed(bytes: &[u8], hint: Option<&str>) -> bool {
    if let Some(hint) = hint {
        let hint = hint.to_ascii_lowercase();
        if hint == "gzip" || hint.ends_with(".gz") || hint.ends_with(".gzip") {
            return true;
        }
    }
    bytes.len() >= 2 && bytes[..2] == GZIP_MAGIC
}

/// A decompression failure is always a `Format` error; corrupt gzip is
/// never silently passed through as plain text.
fn decompress(bytes: &[u8], limits: &SizeLimits) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    let read = GzDecoder::new(bytes)
        .take(limits.max_decoded_bytes as u64 + 1)
        .read_to_end(&mut out)
        .map_err(|err| ImportError::Format(format!("gzip decompression failed: {}", err)))?;
    if read > limits.max_decoded_bytes {
        return Err(ImportError::TooLarge { size: read, limit: limits.max_decoded_bytes });
    }
    Ok(out)
}

/// True when the text is an HTML document rather than a data file: the
/// first non-whitespace character is `<`, or an `<html` tag appears in the
/// leading window.
fn looks_like_html(text: &str) -> bool {
    if text.trim_start().starts_with('<') {
        return true;
    }
    let window_end = text
        .char_indices()
        .nth(HTML_SNIFF_WINDOW)
        .map_or(text.len(), |(idx, _)| idx);
    text[..window_end].to_ascii_lowercase().contains("<html")
}

fn text_prefix(text: &str) -> &str {
    let end = text
        .char_indices()
        .nth(ERROR_PREFIX_LEN)
        .map_or(text.len(), |(idx, _)| idx);
    &text[..end]
}
