/*
    src/crc.rs
 */

//! CRC-32 (PNG/Ethernet variant: polynomial 0xEDB88320, initial/final value
//! all-ones) over a byte sequence. Every chunk's `type || data` is CRC'd
//! against the 4-byte trailer on disk.

use lazy_static::lazy_static;

lazy_static! {
    /// 256-entry CRC-32 lookup table, built once on first use. `lazy_static`
    /// guards the race between threads that might call into this module
    /// concurrently before any decode has happened.
    static ref CRC_TABLE: [u32; 256] = build_table();
}

fn build_table() -> [u32; 256] {
    let mut table = [0u32; 256];
    for (i, slot) in table.iter_mut().enumerate() {
        let mut rem = i as u32;
        for _ in 0..8 {
            rem = if rem & 1 != 0 {
                (rem >> 1) ^ 0xEDB8_8320
            } else {
                rem >> 1
            };
        }
        *slot = rem;
    }
    table
}

/// Computes the CRC-32 of `buf`, continuing from `crc` (pass `0` to start a
/// new checksum). Matches zlib's `crc32()` convention so multiple calls can
/// be chained over non-contiguous slices.
pub fn crc32(crc: u32, buf: &[u8]) -> u32 {
    let table = &*CRC_TABLE;
    let mut c = !crc;
    for &byte in buf {
        c = (c >> 8) ^ table[((c ^ byte as u32) & 0xFF) as usize];
    }
    !c
}
