use log::trace;

use crate::bitstream::bitreader::BitReader;
use crate::error::{DecodeError, Result};

const BIT_MASK: u16 = 0x8000;

/// Read the two-level symbol map from the stream and return the sorted vec of
/// all u8s used in the block.
pub fn read_sym_map(br: &mut BitReader<'_>) -> Result<Vec<u8>> {
    // First the map "index"
    let mut sym_map: Vec<u16> = vec![br.bint(16)? as u16];

    // Now get as many 16-symbol maps as indicated by the set bits in the "index"
    for _ in 0..sym_map[0].count_ones() {
        sym_map.push(br.bint(16)? as u16);
    }
    for map in &sym_map {
        trace!("\rSymbol map word {:0>16b}", map);
    }

    let symbols = decode_sym_map(&sym_map);
    if symbols.is_empty() {
        return Err(DecodeError::corrupt("block symbol map is empty"));
    }
    Ok(symbols)
}

/// Takes the unique bzip2 symbol map and returns a sorted vec of all
/// u8s used in the input.
pub fn decode_sym_map(symbol_map: &[u16]) -> Vec<u8> {
    /*
    Symbol_map[0] is a map of the presence/absence of blocks of u8s in the input data.
    For example, if the first bit of maps[0] is a zero, then none of the u8s from 0-15 were
    present in the input file, AND there would be no u16 needed to mark any of those.
    If the second bit of maps[0] is a one, then at least one u8 from the range of 16-31 was present
    in the input. That means the next u16 would be a bit map for this block of u8s with 1s and 0s
    indicating the presence / absence of those u8s. Etc.
    */
    let mut symbols: Vec<u8> = Vec::with_capacity(256);
    // Set a counter for the number of maps
    let mut map_idx = 0;

    for block in 0..16_u8 {
        // Check the index to see if the next bit has a block of bytes
        if (symbol_map[0] & (BIT_MASK >> block)) > 0 {
            // Found one, so increment the index to the correct symbol map offset
            map_idx += 1;
            // Within that u16, iterate to find which bytes were present
            for byte_idx in 0..16_u8 {
                if (symbol_map[map_idx] & (BIT_MASK >> byte_idx)) > 0 {
                    // block * 16 + byte_idx = u8 value we found
                    symbols.push((block << 4) + byte_idx);
                };
            }
        }
    }
    symbols
}

#[test]
fn decode_symbol_map_test() {
    let maps = vec![11008, 32770, 4, 17754, 6208];
    let mut compare = "Making a silly test.".as_bytes().to_vec();
    compare.sort_unstable();
    compare.dedup();
    assert_eq!(compare, decode_sym_map(&maps));
}

#[test]
fn decode_symbol_map_full_test() {
    let maps = vec![0xffff; 17];
    let compare = (0..=255).collect::<Vec<u8>>();
    assert_eq!(compare, decode_sym_map(&maps));
}

#[test]
fn read_symbol_map_test() {
    // Index selects group 4 (0x40..0x4f), whose map selects 'A' (0x41) and 'C' (0x43).
    let data = [0b0000_1000, 0b0000_0000, 0b0101_0000, 0b0000_0000];
    let mut br = BitReader::new(&data);
    assert_eq!(read_sym_map(&mut br).unwrap(), b"AC".to_vec());
    assert_eq!(br.position(), 32);
}

#[test]
fn read_empty_symbol_map_test() {
    let data = [0, 0];
    let mut br = BitReader::new(&data);
    assert!(matches!(
        read_sym_map(&mut br),
        Err(DecodeError::CorruptStream(_))
    ));
}
