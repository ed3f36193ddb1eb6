/*
    src/error.rs
 */

//! Error type returned by [`crate::load_png`].
//!
//! All decode failures collapse to a single `Result::Err` at the public
//! boundary; the variants exist for diagnostics (and for anyone who wants to
//! `match` on the failure class) rather than as a stable error-code contract.

/// Everything that can go wrong while decoding a PNG.
#[derive(thiserror::Error, Debug)]
pub enum DecodeError {
    /// The file could not be opened or read.
    #[error("failed to read png file: {0}")]
    Io(#[from] std::io::Error),

    /// The 8-byte PNG magic did not match.
    #[error("not a png file (bad signature)")]
    Signature,

    /// A chunk failed CRC verification, was truncated, or had a malformed
    /// length for its type.
    #[error("malformed chunk: {0}")]
    Chunk(&'static str),

    /// A structural or semantic violation of the decoded subset of the PNG
    /// format (bad IHDR field, missing palette, unknown filter selector,
    /// oversized dimensions, short inflated stream, ...).
    #[error("invalid png: {0}")]
    Format(&'static str),

    /// The zlib/DEFLATE inflater rejected the IDAT stream.
    #[error("inflate failed: {0}")]
    Inflate(String),
}

impl DecodeError {
    pub(crate) fn chunk(reason: &'static str) -> Self {
        DecodeError::Chunk(reason)
    }

    pub(crate) fn format(reason: &'static str) -> Self {
        DecodeError::Format(reason)
    }
}
