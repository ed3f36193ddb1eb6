/*
    src/channel.rs
 */

//! Normalizes reconstructed filtered-pixel data (gray / gray+alpha / RGB /
//! indexed / RGBA) into a uniform 8-bit RGBA buffer.

use crate::chunk::Palette;
use crate::constants::{COLOR_GRAY, COLOR_GRAY_ALPHA, COLOR_INDEXED, COLOR_RGB, COLOR_RGBA};
use crate::error::DecodeError;

/// Expands `filtered` (one sample/pixel-group per the source color type,
/// `pixel_count` pixels total) into `pixel_count * 4` bytes of RGBA.
pub fn to_rgba(
    filtered: &[u8],
    color_type: u8,
    pixel_count: usize,
    palette: Option<&Palette>,
) -> Result<Vec<u8>, DecodeError> {
    let mut out = vec![0u8; pixel_count * 4];

    match color_type {
        COLOR_GRAY => {
            for i in 0..pixel_count {
                let v = filtered[i];
                out[i * 4..i * 4 + 4].copy_from_slice(&[v, v, v, 255]);
            }
        }
        COLOR_GRAY_ALPHA => {
            for i in 0..pixel_count {
                let v = filtered[i * 2];
                let a = filtered[i * 2 + 1];
                out[i * 4..i * 4 + 4].copy_from_slice(&[v, v, v, a]);
            }
        }
        COLOR_RGB => {
            for i in 0..pixel_count {
                let px = &filtered[i * 3..i * 3 + 3];
                out[i * 4..i * 4 + 4].copy_from_slice(&[px[0], px[1], px[2], 255]);
            }
        }
        COLOR_RGBA => {
            out.copy_from_slice(&filtered[..pixel_count * 4]);
        }
        COLOR_INDEXED => {
            let palette = palette.ok_or_else(|| DecodeError::format("indexed image without a PLTE chunk"))?;
            for i in 0..pixel_count {
                out[i * 4..i * 4 + 4].copy_from_slice(&palette.lookup(filtered[i]));
            }
        }
        _ => unreachable!("color_type validated at parse time"),
    }

    Ok(out)
}
