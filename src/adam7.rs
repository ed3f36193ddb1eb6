/*
    src/adam7.rs
 */

//! Adam7 de-interlacing: seven filtered sub-images, concatenated in the
//! file, each reconstructed independently and then scattered into their
//! final positions in the full-resolution canvas.

use tracing::trace;

use crate::constants::ADAM7_PASSES;
use crate::error::DecodeError;
use crate::filter;

/// Number of sample positions a pass contributes along one axis: how many
/// `x` (or `y`) values satisfying `start + k * stride < bound` exist.
fn pass_extent(start: u32, bound: u32, stride: u32) -> u32 {
    if start >= bound {
        0
    } else {
        (bound - start + stride - 1) / stride
    }
}

/// Reverses Adam7 interlacing over `data` (the seven concatenated,
/// filtered sub-images) and returns the fully reconstructed, un-interlaced
/// filtered-pixel buffer (`width * height * bpp` bytes, one byte order
/// matching the non-interlaced path so channel normalization is shared).
pub fn deinterlace(data: &[u8], width: u32, height: u32, bpp: usize) -> Result<Vec<u8>, DecodeError> {
    let mut out = vec![0u8; width as usize * height as usize * bpp];
    let mut offset = 0usize;

    for (pass_index, &(x0, y0, dx, dy)) in ADAM7_PASSES.iter().enumerate() {
        let pw = pass_extent(x0, width, dx);
        let ph = pass_extent(y0, height, dy);
        trace!(pass = pass_index + 1, pw, ph, "adam7 pass");
        if pw == 0 || ph == 0 {
            continue;
        }

        let row_bytes = pw as usize * bpp;
        let stride = 1 + row_bytes;
        let pass_len = ph as usize * stride;
        if data.len() < offset + pass_len {
            return Err(DecodeError::format("inflated stream shorter than required"));
        }

        let pass_data = &data[offset..offset + pass_len];
        let reconstructed = filter::reconstruct(pass_data, ph as usize, row_bytes, bpp)?;
        offset += pass_len;

        for j in 0..ph {
            let y = y0 + j * dy;
            for i in 0..pw {
                let x = x0 + i * dx;
                let src = (j as usize * pw as usize + i as usize) * bpp;
                let dst = (y as usize * width as usize + x as usize) * bpp;
                out[dst..dst + bpp].copy_from_slice(&reconstructed[src..src + bpp]);
            }
        }
    }

    Ok(out)
}
