//! Byte-to-text decoding for delimited exports.

use std::path::Path;

use encoding_rs::{Encoding, UTF_8};

use crate::error::{IngestError, Result};

/// Decodes file bytes to UTF-8 text.
///
/// A byte-order mark selects the encoding (UTF-8, UTF-16 LE/BE) and is
/// stripped; without one the bytes must be valid UTF-8.
pub fn decode_text(bytes: &[u8], path: &Path) -> Result<String> {
    let encoding = Encoding::for_bom(bytes).map_or(UTF_8, |(encoding, _)| encoding);
    let (text, used, had_errors) = encoding.decode(bytes);
    if had_errors {
        return Err(IngestError::UnsupportedEncoding {
            path: path.to_path_buf(),
            encoding: used.name(),
        });
    }
    tracing::trace!(path = %path.display(), encoding = used.name(), "decoded text");
    Ok(text.into_owned())
}
