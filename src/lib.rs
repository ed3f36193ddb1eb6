/*
    src/lib.rs
 */

//! A standalone PNG decoder producing a tightly-packed 8-bit RGBA pixel
//! buffer from a file on disk. Built for embedding in software rasterizers
//! and lightweight engines where a full-featured image library is
//! undesired: 8-bit depth only, IHDR/PLTE/IDAT/IEND/gAMA chunks, optional
//! Adam7 interlacing, optional single-value gamma correction.
//!
//! ```no_run
//! let image = pngdec::load_png("example.png").unwrap();
//! assert_eq!(image.pixels.len(), (image.width * image.height * 4) as usize);
//! ```

pub mod adam7;
pub mod channel;
pub mod chunk;
pub mod constants;
pub mod crc;
pub mod error;
pub mod filter;
pub mod gamma;
pub mod reader;

mod inflate;

use std::fs;
use std::path::Path;

use tracing::{debug, info, instrument};

pub use crate::chunk::{Ihdr, Palette};
pub use crate::error::DecodeError;

/// Source PNG color type, carried through to the caller for information
/// only — the output buffer is always normalized to RGBA regardless.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorType {
    Gray,
    Rgb,
    Indexed,
    GrayAlpha,
    Rgba,
}

impl ColorType {
    fn from_raw(color_type: u8) -> Self {
        match color_type {
            constants::COLOR_GRAY => ColorType::Gray,
            constants::COLOR_RGB => ColorType::Rgb,
            constants::COLOR_INDEXED => ColorType::Indexed,
            constants::COLOR_GRAY_ALPHA => ColorType::GrayAlpha,
            constants::COLOR_RGBA => ColorType::Rgba,
            _ => unreachable!("color_type validated at parse time"),
        }
    }
}

/// A fully decoded image: a contiguous row-major RGBA buffer plus the
/// metadata a caller needs to interpret it.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    /// `width * height * 4` bytes, row-major, RGBA.
    pub pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub color_type: ColorType,
}

/// Decodes the PNG file at `path` into a tightly-packed RGBA buffer.
///
/// Reads the whole file into memory, walks its chunks (verifying every
/// CRC), inflates the accumulated `IDAT` payload, reverses PNG scanline
/// filtering (de-interlacing first via Adam7 if declared), expands
/// whatever source color type was declared into RGBA, and finally applies
/// gamma correction if a valid `gAMA` chunk was present.
///
/// Every failure mode collapses to a single `Err(DecodeError)`: a
/// malformed signature, a CRC mismatch, an unsupported IHDR field, a short
/// inflated stream, an unknown filter selector, or an indexed image with
/// no palette. No partial image is ever returned.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn load_png(path: impl AsRef<Path>) -> Result<DecodedImage, DecodeError> {
    let path = path.as_ref();
    let data = fs::read(path)?;
    decode(&data)
}

/// Same pipeline as [`load_png`], operating on an already-loaded file.
/// Exposed for callers that already have the bytes (and by the test
/// suite, which builds small PNGs in memory).
pub fn decode(data: &[u8]) -> Result<DecodedImage, DecodeError> {
    let parsed = chunk::parse(data)?;
    let ihdr = parsed.ihdr;
    let bpp = ihdr.bytes_per_pixel();
    let pixel_count = ihdr.width as usize * ihdr.height as usize;

    let inflated = inflate::inflate(&parsed.idat)?;

    let filtered = if ihdr.interlace_method == constants::INTERLACE_NONE {
        let row_bytes = ihdr.width as usize * bpp;
        filter::reconstruct(&inflated, ihdr.height as usize, row_bytes, bpp)?
    } else {
        adam7::deinterlace(&inflated, ihdr.width, ihdr.height, bpp)?
    };

    let mut pixels = channel::to_rgba(&filtered, ihdr.color_type, pixel_count, parsed.palette.as_ref())?;

    if let Some(gamma) = parsed.gamma {
        gamma::apply(&mut pixels, gamma);
    }

    debug!(bytes = pixels.len(), "decode complete");
    info!(width = ihdr.width, height = ihdr.height, "decoded png");

    Ok(DecodedImage {
        pixels,
        width: ihdr.width,
        height: ihdr.height,
        color_type: ColorType::from_raw(ihdr.color_type),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::*;
    use crate::crc::crc32;

    fn be32(n: u32) -> [u8; 4] {
        n.to_be_bytes()
    }

    fn build_chunk(type_name: &[u8; 4], data: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(&be32(data.len() as u32));
        out.extend_from_slice(type_name);
        out.extend_from_slice(data);
        let mut crc = crc32(0, type_name);
        crc = crc32(crc, data);
        out.extend_from_slice(&be32(crc));
        out
    }

    fn ihdr_chunk(width: u32, height: u32, color_type: u8, interlace: u8) -> Vec<u8> {
        let mut data = Vec::new();
        data.extend_from_slice(&be32(width));
        data.extend_from_slice(&be32(height));
        data.push(8);
        data.push(color_type);
        data.push(0);
        data.push(0);
        data.push(interlace);
        build_chunk(&CHUNK_IHDR, &data)
    }

    fn zlib_compress(raw: &[u8]) -> Vec<u8> {
        use flate2::write::ZlibEncoder;
        use flate2::Compression;
        use std::io::Write;

        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(raw).unwrap();
        encoder.finish().unwrap()
    }

    fn build_png(width: u32, height: u32, color_type: u8, raw_scanlines: &[u8], gamma: Option<u32>) -> Vec<u8> {
        let mut file = PNG_SIGNATURE.to_vec();
        file.extend(ihdr_chunk(width, height, color_type, INTERLACE_NONE));
        if let Some(g) = gamma {
            file.extend(build_chunk(&CHUNK_GAMA, &be32(g)));
        }
        let compressed = zlib_compress(raw_scanlines);
        file.extend(build_chunk(&CHUNK_IDAT, &compressed));
        file.extend(build_chunk(&CHUNK_IEND, &[]));
        file
    }

    #[test]
    fn one_by_one_red_rgba_round_trips() {
        // filter byte (None) + R=255 G=0 B=0 A=255
        let raw = [0u8, 255, 0, 0, 255];
        let png = build_png(1, 1, COLOR_RGBA, &raw, None);

        let image = decode(&png).unwrap();
        assert_eq!(image.width, 1);
        assert_eq!(image.height, 1);
        assert_eq!(image.pixels, vec![255, 0, 0, 255]);
        assert_eq!(image.color_type, ColorType::Rgba);
    }

    #[test]
    fn two_by_two_indexed_expands_through_palette() {
        let mut file = PNG_SIGNATURE.to_vec();
        file.extend(ihdr_chunk(2, 2, COLOR_INDEXED, INTERLACE_NONE));
        file.extend(build_chunk(
            &CHUNK_PLTE,
            &[255, 0, 0, 0, 255, 0, 0, 0, 255, 255, 255, 0],
        ));
        // Two rows, each (filter=None, index, index).
        let raw = [0u8, 0, 1, 0u8, 2, 3];
        let compressed = zlib_compress(&raw);
        file.extend(build_chunk(&CHUNK_IDAT, &compressed));
        file.extend(build_chunk(&CHUNK_IEND, &[]));

        let image = decode(&file).unwrap();
        assert_eq!(
            image.pixels,
            vec![
                255, 0, 0, 255, 0, 255, 0, 255, //
                0, 0, 255, 255, 255, 255, 0, 255,
            ]
        );
    }

    #[test]
    fn two_by_one_grayscale_sub_filter_wraps() {
        let raw = [1u8, 100, 100]; // Sub filter, samples [100, (100+100)%256]
        let png = build_png(2, 1, COLOR_GRAY, &raw, None);

        let image = decode(&png).unwrap();
        assert_eq!(image.pixels, vec![100, 100, 100, 255, 44, 44, 44, 255]);
    }

    #[test]
    fn tampered_idat_byte_is_rejected() {
        let raw = [0u8, 255, 0, 0, 255];
        let mut png = build_png(1, 1, COLOR_RGBA, &raw, None);
        let len = png.len();
        png[len - 6] ^= 0xFF; // corrupt a byte inside the IDAT payload
        assert!(decode(&png).is_err());
    }

    #[test]
    fn missing_palette_on_indexed_image_is_rejected() {
        let raw = [0u8, 0];
        let png = build_png(1, 1, COLOR_INDEXED, &raw, None);
        assert!(matches!(decode(&png), Err(DecodeError::Format(_))));
    }

    #[test]
    fn output_buffer_length_always_matches_dimensions() {
        let raw = [0u8, 1, 2, 3, 0, 4, 5, 6];
        let png = build_png(2, 2, COLOR_RGB, &raw, None);
        let image = decode(&png).unwrap();
        assert_eq!(image.pixels.len(), 2 * 2 * 4);
    }

    #[test]
    fn adam7_single_pixel_image_decodes() {
        let mut file = PNG_SIGNATURE.to_vec();
        file.extend(ihdr_chunk(1, 1, COLOR_RGBA, INTERLACE_ADAM7));
        // Only pass 1 contributes for a 1x1 image: one filter byte (None)
        // plus one RGBA pixel. Passes 2-7 contribute nothing.
        let raw = [0u8, 10, 20, 30, 255];
        let compressed = zlib_compress(&raw);
        file.extend(build_chunk(&CHUNK_IDAT, &compressed));
        file.extend(build_chunk(&CHUNK_IEND, &[]));

        let image = decode(&file).unwrap();
        assert_eq!(image.pixels, vec![10, 20, 30, 255]);
    }
}
