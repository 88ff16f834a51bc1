use log::{info, trace, warn};

use crate::bitstream::bitreader::BitReader;
use crate::error::{DecodeError, Result};
use crate::huffman_coding::huffman_decode::{read_tables, HuffmanTable};
use crate::tools::symbol_map::read_sym_map;

/// Largest selector count the format can use (900k / 50, plus slack). Extra selectors are read and dropped.
const MAX_SELECTORS: usize = 18002;

/// Everything in a block between the block magic and the huffman coded data.
#[derive(Debug)]
pub struct BlockHeader {
    /// CRC of the block's decoded bytes
    pub block_crc: u32,
    /// BWT origin pointer
    pub origin: u32,
    /// Sorted bytes present in the block, which seed the MTF list
    pub symbols: Vec<u8>,
    /// Table used by each 50 symbol chunk (already MTF decoded)
    pub selectors: Vec<u8>,
    pub tables: Vec<HuffmanTable>,
}

impl BlockHeader {
    /// Symbols in the huffman alphabet: RUNA, RUNB, the MTF indices 1..n-1, and EOB.
    pub fn alpha_size(&self) -> usize {
        self.symbols.len() + 2
    }

    /// The end of block symbol.
    pub fn eob(&self) -> u16 {
        (self.symbols.len() + 1) as u16
    }
}

/// Read a block header. The block magic must already have been consumed.
/// block_max is the largest block the stream header allows.
pub fn read_block_header(
    br: &mut BitReader<'_>,
    block_max: usize,
    block_counter: usize,
) -> Result<BlockHeader> {
    // Get crc
    let block_crc = br.bint(32)?;
    trace!("Block {} CRC is {:#010x}.", block_counter, block_crc);

    // Get randomize flag - no encoder written this century sets it
    if br.bool_bit()? {
        return Err(DecodeError::UnsupportedFeature(
            "randomised blocks (written by bzip2 0.9.0 and older)",
        ));
    }

    // Get key (origin pointer)
    let origin = br.bint(24)?;
    if origin as usize > block_max + 10 {
        return Err(DecodeError::corrupt(format!(
            "origin pointer {} is larger than the block size {}",
            origin, block_max
        )));
    }

    // Get the symbol info.
    let symbol_loc = br.loc();
    let symbols = read_sym_map(br)?;
    trace!(
        "Found {} symbols for block {} at {}.",
        symbols.len(),
        block_counter,
        symbol_loc
    );

    // Read NumTrees
    let table_count = br.bint(3)? as usize;
    if !(2..=6).contains(&table_count) {
        return Err(DecodeError::corrupt(format!(
            "invalid huffman table count {}",
            table_count
        )));
    }

    // Read the selector count and then the selectors
    let selector_count = br.bint(15)? as usize;
    if selector_count == 0 {
        return Err(DecodeError::corrupt("block has no selectors"));
    }
    let selectors = read_selectors(br, selector_count, table_count)?;
    info!(
        "Decoded {} selectors for the {} tables in block {}.",
        selectors.len(),
        table_count,
        block_counter
    );

    // Read the Huffman symbol lengths and create the decode tables. (RUNA, RUNB and EOB join the symbols.)
    let tables = read_tables(br, table_count, symbols.len() + 2)?;

    Ok(BlockHeader {
        block_crc,
        origin,
        symbols,
        selectors,
        tables,
    })
}

/// Read selector_count unary coded selectors and reverse the MTF applied to them.
fn read_selectors(
    br: &mut BitReader<'_>,
    selector_count: usize,
    table_count: usize,
) -> Result<Vec<u8>> {
    // First read the "raw" selector map (only saving the ones we can use)
    let mut raw_selector_map = Vec::with_capacity(selector_count.min(MAX_SELECTORS));
    for _ in 0..selector_count {
        let mut group = 0_usize;
        while br.bool_bit()? {
            group += 1;
            if group >= table_count {
                return Err(DecodeError::corrupt(format!(
                    "selector refers to table {} of {}",
                    group, table_count
                )));
            }
        }
        if raw_selector_map.len() < MAX_SELECTORS {
            raw_selector_map.push(group as u8);
        }
    }
    if selector_count > MAX_SELECTORS {
        warn!(
            "Found {} selectors, but the maximum is {}. Ignoring the excess.",
            selector_count, MAX_SELECTORS
        );
    }

    // Time to reverse the MTF on the selectors that we received
    // Create an index vec for the number of tables we need
    let mut table_idx: Vec<u8> = (0..table_count as u8).collect();
    let selectors = raw_selector_map
        .iter()
        .map(|&mtf| {
            let idx = mtf as usize;
            let table = table_idx[idx];
            // Shift each entry in front of this one back, and put this one at the front
            table_idx.copy_within(0..idx, 1);
            table_idx[0] = table;
            table
        })
        .collect();
    Ok(selectors)
}

#[cfg(test)]
mod test {
    use super::*;

    /// Pack a string of '0'/'1' characters into bytes, MSB first.
    fn pack(bits: &str) -> Vec<u8> {
        let bits: Vec<u8> = bits.bytes().filter(|b| *b != b' ').collect();
        bits.chunks(8)
            .map(|chunk| {
                chunk
                    .iter()
                    .enumerate()
                    .fold(0_u8, |acc, (i, &b)| acc | ((b - b'0') << (7 - i)))
            })
            .collect()
    }

    #[test]
    fn selectors_are_mtf_decoded() {
        // Unary selectors 0, 1, 1, 2, 0 over 3 tables
        let data = pack("0 10 10 110 0 000");
        let mut br = BitReader::new(&data);
        let selectors = read_selectors(&mut br, 5, 3).unwrap();
        assert_eq!(selectors, vec![0, 1, 0, 2, 2]);
    }

    #[test]
    fn selector_past_table_count() {
        let data = pack("1110 0000");
        let mut br = BitReader::new(&data);
        assert!(matches!(
            read_selectors(&mut br, 1, 3),
            Err(DecodeError::CorruptStream(_))
        ));
    }

    #[test]
    fn full_header() {
        let bits = concat!(
            "11011110101011011011111011101111", // crc 0xdeadbeef
            "0",                                // not randomised
            "000000000000000000000010",         // origin 2
            "0000100000000000",                 // symbol group 4
            "0101000000000000",                 // 'A' and 'C'
            "010",                              // 2 tables
            "000000000000001",                  // 1 selector
            "10",                               // selector 1
            "00010 0 0 0 0",                    // table 0: all length 2
            "00010 0 0 0 0",                    // table 1: all length 2
            "0000000",
        );
        let data = pack(bits);
        let mut br = BitReader::new(&data);
        let header = read_block_header(&mut br, 100_000, 1).unwrap();
        assert_eq!(header.block_crc, 0xdead_beef);
        assert_eq!(header.origin, 2);
        assert_eq!(header.symbols, b"AC".to_vec());
        assert_eq!(header.selectors, vec![1]);
        assert_eq!(header.tables.len(), 2);
        assert_eq!(header.alpha_size(), 4);
        assert_eq!(header.eob(), 3);
    }

    #[test]
    fn randomised_block_is_unsupported() {
        let mut bits = "0".repeat(32);
        bits.push('1');
        bits.push_str(&"0".repeat(31));
        let data = pack(&bits);
        let mut br = BitReader::new(&data);
        assert!(matches!(
            read_block_header(&mut br, 900_000, 1),
            Err(DecodeError::UnsupportedFeature(_))
        ));
    }
}
