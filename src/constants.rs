/*
    src/constants.rs
 */
#![allow(dead_code)]

/// Length in bytes of the fixed PNG magic at the start of every file.
pub const LENGTH_OF_SIGNATURE: usize = 8;
/// The fixed PNG magic itself: `\x89PNG\r\n\x1a\n`.
pub const PNG_SIGNATURE: [u8; LENGTH_OF_SIGNATURE] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

/// Byte length of a chunk's big-endian length field.
pub const LENGTH_OF_LENGTH_FIELD: usize = 4;
/// Byte length of a chunk's ASCII type field.
pub const LENGTH_OF_TYPE_FIELD: usize = 4;
/// Byte length of a chunk's trailing CRC-32 field.
pub const LENGTH_OF_CRC_FIELD: usize = 4;

/// IHDR's data payload is always exactly this many bytes.
pub const LENGTH_OF_IHDR_DATA: usize = 13;

pub const CHUNK_IHDR: [u8; 4] = *b"IHDR";
pub const CHUNK_PLTE: [u8; 4] = *b"PLTE";
pub const CHUNK_IDAT: [u8; 4] = *b"IDAT";
pub const CHUNK_IEND: [u8; 4] = *b"IEND";
pub const CHUNK_GAMA: [u8; 4] = *b"gAMA";

/// PNG color type identifiers (IHDR byte 9), as defined by the format.
pub const COLOR_GRAY: u8 = 0;
pub const COLOR_RGB: u8 = 2;
pub const COLOR_INDEXED: u8 = 3;
pub const COLOR_GRAY_ALPHA: u8 = 4;
pub const COLOR_RGBA: u8 = 6;

/// PNG per-scanline filter selector values.
pub const FILTER_NONE: u8 = 0;
pub const FILTER_SUB: u8 = 1;
pub const FILTER_UP: u8 = 2;
pub const FILTER_AVERAGE: u8 = 3;
pub const FILTER_PAETH: u8 = 4;

/// Interlace methods recognized by this decoder.
pub const INTERLACE_NONE: u8 = 0;
pub const INTERLACE_ADAM7: u8 = 1;

/// `gAMA` chunk values are a 32-bit integer scaled by this factor.
pub const GAMMA_SCALE: f64 = 100_000.0;

/// Sanity cap on `width * height` to keep a hostile IHDR from triggering an
/// allocation bomb before any chunk data has even been validated. Not part
/// of the PNG format; see the "Sanity cap on dimensions" design note.
pub const MAX_PIXELS: u64 = 64_000 * 64_000;

/// Adam7 pass geometry: (x0, y0, dx, dy) per pass, in encounter order.
pub const ADAM7_PASSES: [(u32, u32, u32, u32); 7] = [
    (0, 0, 8, 8),
    (4, 0, 8, 8),
    (0, 4, 4, 8),
    (2, 0, 4, 4),
    (0, 2, 2, 4),
    (1, 0, 2, 2),
    (0, 1, 1, 2),
];
