/*
    src/chunk.rs
 */

//! Chunk framing, CRC verification, and the top-level dispatch loop that
//! walks a PNG file chunk by chunk, routing recognized types to their
//! handlers and discarding (but still CRC-checking) everything else.

use tracing::{debug, trace};

use crate::constants::*;
use crate::crc::crc32;
use crate::error::DecodeError;
use crate::reader::Reader;

/// Parsed and validated IHDR fields.
#[derive(Debug, Clone, Copy)]
pub struct Ihdr {
    pub width: u32,
    pub height: u32,
    pub bit_depth: u8,
    pub color_type: u8,
    pub compression_method: u8,
    pub filter_method: u8,
    pub interlace_method: u8,
}

impl Ihdr {
    /// Bytes per pixel of the *filtered* source at bit depth 8, keyed by
    /// color type. Panics never occur here: `color_type` is validated by
    /// [`Ihdr::parse`] before this is ever called.
    pub fn bytes_per_pixel(&self) -> usize {
        match self.color_type {
            COLOR_GRAY => 1,
            COLOR_GRAY_ALPHA => 2,
            COLOR_RGB => 3,
            COLOR_INDEXED => 1,
            COLOR_RGBA => 4,
            _ => unreachable!("color_type validated at parse time"),
        }
    }

    fn parse(data: &[u8]) -> Result<Self, DecodeError> {
        if data.len() != LENGTH_OF_IHDR_DATA {
            return Err(DecodeError::chunk("IHDR has wrong length"));
        }

        let width = u32::from_be_bytes([data[0], data[1], data[2], data[3]]);
        let height = u32::from_be_bytes([data[4], data[5], data[6], data[7]]);
        let bit_depth = data[8];
        let color_type = data[9];
        let compression_method = data[10];
        let filter_method = data[11];
        let interlace_method = data[12];

        if bit_depth != 8 {
            return Err(DecodeError::format("only 8-bit depth is supported"));
        }
        if !matches!(
            color_type,
            COLOR_GRAY | COLOR_RGB | COLOR_INDEXED | COLOR_GRAY_ALPHA | COLOR_RGBA
        ) {
            return Err(DecodeError::format("unknown color type"));
        }
        if compression_method != 0 {
            return Err(DecodeError::format("unknown compression method"));
        }
        if filter_method != 0 {
            return Err(DecodeError::format("unknown filter method"));
        }
        if !matches!(interlace_method, INTERLACE_NONE | INTERLACE_ADAM7) {
            return Err(DecodeError::format("unknown interlace method"));
        }
        let pixels = width as u64 * height as u64;
        if pixels > MAX_PIXELS {
            return Err(DecodeError::format("image dimensions exceed sanity cap"));
        }
        // The RGBA output buffer is `pixels * 4` bytes; on a 32-bit `usize`
        // target that can overflow well below MAX_PIXELS, so check it
        // explicitly rather than relying on the pixel cap alone.
        if pixels.checked_mul(4).and_then(|n| usize::try_from(n).ok()).is_none() {
            return Err(DecodeError::format("image dimensions overflow pointer-sized arithmetic"));
        }

        Ok(Ihdr {
            width,
            height,
            bit_depth,
            color_type,
            compression_method,
            filter_method,
            interlace_method,
        })
    }
}

/// A PLTE palette: up to 256 RGBA entries, alpha defaulted to 255.
#[derive(Debug, Clone)]
pub struct Palette {
    entries: Vec<[u8; 4]>,
}

impl Palette {
    pub(crate) fn parse(data: &[u8]) -> Result<Self, DecodeError> {
        if data.len() % 3 != 0 {
            return Err(DecodeError::chunk("PLTE length not a multiple of 3"));
        }
        let n = data.len() / 3;
        if n > 256 {
            return Err(DecodeError::chunk("PLTE has more than 256 entries"));
        }
        let entries = data
            .chunks_exact(3)
            .map(|rgb| [rgb[0], rgb[1], rgb[2], 255])
            .collect();
        Ok(Palette { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Looks up palette entry `index`, substituting entry 0 when out of
    /// range rather than failing (§4.9). A PLTE chunk with zero entries is
    /// accepted (matches the source, which never errors on `n == 0`); every
    /// index then substitutes to an all-zero, fully-transparent entry.
    pub fn lookup(&self, index: u8) -> [u8; 4] {
        self.entries
            .get(index as usize)
            .copied()
            .or_else(|| self.entries.first().copied())
            .unwrap_or([0, 0, 0, 0])
    }
}

/// Everything the chunk-dispatch loop collected from the file, ready to be
/// handed to the inflate/filter/normalize stages.
pub struct ParsedPng {
    pub ihdr: Ihdr,
    pub palette: Option<Palette>,
    pub idat: Vec<u8>,
    pub gamma: Option<f64>,
}

/// Reads the signature and every chunk up to and including `IEND`,
/// validating CRCs and routing recognized types to their handlers.
pub fn parse(data: &[u8]) -> Result<ParsedPng, DecodeError> {
    let mut reader = Reader::new(data);
    reader.read_signature()?;

    let header = reader
        .read_chunk_header()?
        .ok_or_else(|| DecodeError::chunk("file ends before IHDR"))?;
    if header.type_name != CHUNK_IHDR {
        return Err(DecodeError::chunk("IHDR must be the first chunk"));
    }
    let ihdr = read_and_verify(&mut reader, &header, Ihdr::parse)?;
    debug!(width = ihdr.width, height = ihdr.height, color_type = ihdr.color_type, "IHDR");

    let mut palette = None;
    let mut idat = Vec::new();
    let mut gamma = None;

    loop {
        let header = match reader.read_chunk_header()? {
            Some(h) => h,
            None => return Err(DecodeError::chunk("file ends before IEND")),
        };
        trace!(type_name = %String::from_utf8_lossy(&header.type_name), length = header.length, "chunk");

        match &header.type_name {
            t if t == &CHUNK_PLTE => {
                palette = Some(read_and_verify(&mut reader, &header, Palette::parse)?);
            }
            t if t == &CHUNK_IDAT => {
                let payload = read_and_verify(&mut reader, &header, |d| Ok::<_, DecodeError>(d.to_vec()))?;
                idat.extend_from_slice(&payload);
            }
            t if t == &CHUNK_GAMA => {
                gamma = read_and_verify(&mut reader, &header, parse_gama)?;
            }
            t if t == &CHUNK_IEND => {
                // IEND carries no payload; still CRC it like any other chunk.
                read_and_verify(&mut reader, &header, |d| {
                    if !d.is_empty() {
                        return Err(DecodeError::chunk("IEND must be empty"));
                    }
                    Ok(())
                })?;
                break;
            }
            _ => {
                // Unknown chunk: read, verify, discard.
                read_and_verify(&mut reader, &header, |_| Ok::<_, DecodeError>(()))?;
            }
        }
    }

    if idat.is_empty() {
        return Err(DecodeError::format("no IDAT data present"));
    }

    Ok(ParsedPng {
        ihdr,
        palette,
        idat,
        gamma,
    })
}

fn parse_gama(data: &[u8]) -> Result<Option<f64>, DecodeError> {
    if data.len() != 4 {
        return Err(DecodeError::chunk("gAMA has wrong length"));
    }
    let raw = u32::from_be_bytes([data[0], data[1], data[2], data[3]]);
    let gamma = raw as f64 / GAMMA_SCALE;
    Ok(if gamma > 0.0 { Some(gamma) } else { None })
}

/// Reads a chunk's data payload, verifies its CRC against the trailing
/// 4-byte field, then hands the payload to `handle`.
fn read_and_verify<T>(
    reader: &mut Reader,
    header: &crate::reader::ChunkHeader,
    handle: impl FnOnce(&[u8]) -> Result<T, DecodeError>,
) -> Result<T, DecodeError> {
    let data = reader.read_bytes(header.length as usize)?;
    let crc_read = reader.read_be_u32()?;

    let mut crc = crc32(0, &header.type_name);
    crc = crc32(crc, data);
    if crc != crc_read {
        return Err(DecodeError::chunk("CRC mismatch"));
    }

    handle(data)
}
