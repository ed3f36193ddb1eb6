/*
    src/filter.rs
 */

//! Per-scanline PNG filter reversal (None/Sub/Up/Average/Paeth) and the
//! Paeth predictor itself. Used both for the non-interlaced path and, once
//! per sub-image, by [`crate::adam7`].

use crate::constants::{FILTER_AVERAGE, FILTER_NONE, FILTER_PAETH, FILTER_SUB, FILTER_UP};
use crate::error::DecodeError;

/// The PNG filter type 4 prediction function: picks whichever of `a`
/// (left), `b` (up), `c` (up-left) is closest to `a + b - c`, breaking ties
/// toward `a` then `b`.
pub fn paeth_predictor(a: u8, b: u8, c: u8) -> u8 {
    let (a, b, c) = (a as i32, b as i32, c as i32);
    let p = a + b - c;
    let pa = (p - a).abs();
    let pb = (p - b).abs();
    let pc = (p - c).abs();

    if pa <= pb && pa <= pc {
        a as u8
    } else if pb <= pc {
        b as u8
    } else {
        c as u8
    }
}

/// Reverses PNG scanline filtering over `rows` scanlines, each a leading
/// filter-selector byte followed by `row_bytes` filtered data bytes,
/// concatenated in `filtered`. Returns the unfiltered `rows * row_bytes`
/// bytes, with `prev`/`up_left` predecessors scoped only to rows within
/// this call (the caller is responsible for not spanning sub-image
/// boundaries when reconstructing an Adam7 pass).
pub fn reconstruct(filtered: &[u8], rows: usize, row_bytes: usize, bpp: usize) -> Result<Vec<u8>, DecodeError> {
    let stride = 1 + row_bytes;
    if filtered.len() < rows * stride {
        return Err(DecodeError::format("inflated stream shorter than required"));
    }

    let mut out = vec![0u8; rows * row_bytes];
    for y in 0..rows {
        let filter = filtered[y * stride];
        let raw = &filtered[y * stride + 1..y * stride + 1 + row_bytes];
        let (done, pending) = out.split_at_mut(y * row_bytes);
        let prev_row: Option<&[u8]> = if y > 0 {
            Some(&done[(y - 1) * row_bytes..y * row_bytes])
        } else {
            None
        };
        let out_row = &mut pending[..row_bytes];

        match filter {
            FILTER_NONE => out_row.copy_from_slice(raw),
            FILTER_SUB => {
                for i in 0..row_bytes {
                    let left = if i >= bpp { out_row[i - bpp] } else { 0 };
                    out_row[i] = raw[i].wrapping_add(left);
                }
            }
            FILTER_UP => {
                for i in 0..row_bytes {
                    let up = prev_row.map_or(0, |p| p[i]);
                    out_row[i] = raw[i].wrapping_add(up);
                }
            }
            FILTER_AVERAGE => {
                for i in 0..row_bytes {
                    let left = if i >= bpp { out_row[i - bpp] as u16 } else { 0 };
                    let up = prev_row.map_or(0, |p| p[i] as u16);
                    out_row[i] = raw[i].wrapping_add(((left + up) / 2) as u8);
                }
            }
            FILTER_PAETH => {
                for i in 0..row_bytes {
                    let left = if i >= bpp { out_row[i - bpp] } else { 0 };
                    let up = prev_row.map_or(0, |p| p[i]);
                    let up_left = if i >= bpp {
                        prev_row.map_or(0, |p| p[i - bpp])
                    } else {
                        0
                    };
                    out_row[i] = raw[i].wrapping_add(paeth_predictor(left, up, up_left));
                }
            }
            _ => return Err(DecodeError::format("unknown filter selector")),
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paeth_flat_neighbors_returns_the_shared_value() {
        assert_eq!(paeth_predictor(7, 7, 7), 7);
        assert_eq!(paeth_predictor(0, 0, 0), 0);
    }

    #[test]
    fn none_filter_is_identity() {
        let filtered = [0u8, 10, 20, 30];
        let out = reconstruct(&filtered, 1, 3, 1).unwrap();
        assert_eq!(out, vec![10, 20, 30]);
    }

    #[test]
    fn sub_filter_wraps_around_256() {
        // Two grayscale samples [100, 200], Sub filter applied to raw bytes
        // [100, 100] (200 encoded as the delta from 100).
        let filtered = [1u8, 100, 100];
        let out = reconstruct(&filtered, 1, 2, 1).unwrap();
        assert_eq!(out, vec![100, 44]); // (100 + 100) mod 256 == 44
    }

    #[test]
    fn unknown_selector_is_fatal() {
        let filtered = [9u8, 1, 2, 3];
        assert!(reconstruct(&filtered, 1, 3, 1).is_err());
    }

    #[test]
    fn short_input_is_fatal() {
        let filtered = [0u8, 1, 2];
        assert!(reconstruct(&filtered, 2, 3, 1).is_err());
    }

    #[test]
    fn filter_then_reverse_round_trips_random_bytes() {
        // Apply every filter type to arbitrary raw bytes, then reverse it,
        // and check we recover the original raw row.
        let bpp = 3;
        let row_bytes = 9;
        let raw: Vec<u8> = (0..row_bytes as u32).map(|i| (i * 37 + 11) as u8).collect();
        let prev: Vec<u8> = (0..row_bytes as u32).map(|i| (i * 53 + 5) as u8).collect();

        for filter in 0u8..=4 {
            let mut filtered_row = vec![filter];
            for i in 0..row_bytes {
                let left = if i >= bpp { raw[i - bpp] } else { 0 };
                let up = prev[i];
                let up_left = if i >= bpp { prev[i - bpp] } else { 0 };
                let predictor = match filter {
                    0 => 0u8,
                    1 => left,
                    2 => up,
                    3 => ((left as u16 + up as u16) / 2) as u8,
                    4 => paeth_predictor(left, up, up_left),
                    _ => unreachable!(),
                };
                filtered_row.push(raw[i].wrapping_sub(predictor));
            }

            // Reconstruct two rows: a synthetic "previous" row (filter
            // None, so it decodes to exactly `prev`) followed by the row
            // under test.
            let mut buf = vec![0u8];
            buf.extend_from_slice(&prev);
            buf.extend_from_slice(&filtered_row);

            let out = reconstruct(&buf, 2, row_bytes, bpp).unwrap();
            assert_eq!(&out[row_bytes..], raw.as_slice(), "filter type {filter} failed to round-trip");
        }
    }
}
