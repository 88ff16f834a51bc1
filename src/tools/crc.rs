//! CRC32 checksums as used by BZIP2.
//!
//! Bzip2 uses the unreflected CRC-32 (polynomial 0x04c11db7, MSB first), not the reflected
//! variant used by zip and gzip.

const POLY: u32 = 0x04c1_1db7;

const fn make_table() -> [u32; 256] {
    let mut table = [0_u32; 256];
    let mut i = 0;
    while i < 256 {
        let mut crc = (i as u32) << 24;
        let mut bit = 0;
        while bit < 8 {
            crc = if crc & 0x8000_0000 != 0 {
                (crc << 1) ^ POLY
            } else {
                crc << 1
            };
            bit += 1;
        }
        table[i] = crc;
        i += 1;
    }
    table
}

static CRC_TABLE: [u32; 256] = make_table();

/// Continue a block crc over data. Start a new block with a crc of 0.
pub fn do_crc(crc: u32, data: &[u8]) -> u32 {
    let mut crc = !crc;
    for &byte in data {
        crc = (crc << 8) ^ CRC_TABLE[((crc >> 24) as u8 ^ byte) as usize];
    }
    !crc
}

/// Fold a block crc into the running stream crc.
pub fn do_stream_crc(stream_crc: u32, block_crc: u32) -> u32 {
    stream_crc.rotate_left(1) ^ block_crc
}
