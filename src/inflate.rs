/*
    src/inflate.rs
 */

//! The one external collaborator this crate leans on: a zlib-wrapped
//! DEFLATE decompressor. Any conforming implementation would do; this
//! wraps `flate2::read::ZlibDecoder`.

use std::io::Read;

use flate2::read::ZlibDecoder;
use tracing::debug;

use crate::error::DecodeError;

/// Decompresses a zlib-wrapped DEFLATE stream (the concatenated IDAT
/// payload) in full. Trailing bytes past the logical end of the zlib
/// stream are tolerated, not rejected.
pub fn inflate(compressed: &[u8]) -> Result<Vec<u8>, DecodeError> {
    let mut decoder = ZlibDecoder::new(compressed);
    let mut out = Vec::with_capacity(compressed.len() * 4);
    decoder
        .read_to_end(&mut out)
        .map_err(|e| DecodeError::Inflate(e.to_string()))?;
    debug!(compressed = compressed.len(), inflated = out.len(), "inflated IDAT stream");
    Ok(out)
}
