use log::{debug, trace};

use crate::bitstream::bitreader::BitReader;
use crate::error::{DecodeError, Result};

/// Bzip2 chunk size: every 50 symbols the active table may change
pub const CHUNK_SIZE: usize = 50;
/// Longest code length the format allows
pub const MAX_CODE_LEN: u8 = 20;

/// One code length's worth of the canonical code. Codes at this length run from
/// start_code up to (but not including) end_code, and map to symbols starting at offset.
#[derive(Debug, Clone)]
struct Level {
    /// Bits to add to the code we are holding to reach this length
    bits: u32,
    offset: u32,
    start_code: u32,
    end_code: u32,
}

/// A canonical huffman decoding table for one group.
#[derive(Debug, Clone)]
pub struct HuffmanTable {
    levels: Vec<Level>,
    /// Symbols ordered by code length, then symbol value
    symbols: Vec<u16>,
}

impl HuffmanTable {
    /// Build the decode table from the code length of each symbol (index = symbol).
    pub fn from_lengths(lengths: &[u8]) -> Result<Self> {
        if lengths.is_empty() {
            return Err(DecodeError::corrupt("huffman table has no symbols"));
        }
        if let Some(bad) = lengths.iter().find(|&&l| l == 0 || l > MAX_CODE_LEN) {
            return Err(DecodeError::corrupt(format!(
                "huffman code length {} is outside 1..={}",
                bad, MAX_CODE_LEN
            )));
        }

        // Maps must be sorted by length for the next step. (Stable sort keeps ties in symbol order.)
        let mut map: Vec<(u16, u8)> = lengths
            .iter()
            .enumerate()
            .map(|(sym, &len)| (sym as u16, len))
            .collect();
        map.sort_by_key(|&(_, len)| len);

        let mut levels = Vec::new();
        let mut code = 0_u32;
        let mut previous_len = 0_u8;
        let mut idx = 0;
        while idx < map.len() {
            let len = map[idx].1;
            let count = map[idx..].iter().take_while(|&&(_, l)| l == len).count();

            // Move the code we are building down to this length
            code <<= len - previous_len;
            levels.push(Level {
                bits: (len - previous_len) as u32,
                offset: idx as u32,
                start_code: code,
                end_code: code + count as u32,
            });
            code += count as u32;
            previous_len = len;
            idx += count;
        }

        Ok(Self {
            levels,
            symbols: map.iter().map(|&(s, _)| s).collect(),
        })
    }

    /// Read bits until they form a complete code, and return its symbol.
    pub fn decode_symbol(&self, br: &mut BitReader<'_>) -> Result<u16> {
        let mut code = 0_u32;
        for level in &self.levels {
            // Left shift any code bits we are currently holding so we can add in the next level of bits
            code = code << level.bits | br.bint(level.bits)?;

            // If the code is below the end code at this level, we found it
            if code < level.end_code {
                return Ok(self.symbols[(level.offset + code - level.start_code) as usize]);
            }
        }
        Err(DecodeError::corrupt("bit pattern matches no huffman code"))
    }
}

/// Read the code length arrays for table_count tables over an alphabet of alpha_size symbols.
/// Each array starts with a 5 bit length, then per symbol a string of "10" (+1) / "11" (-1)
/// adjustments ended by a "0".
pub fn read_tables(
    br: &mut BitReader<'_>,
    table_count: usize,
    alpha_size: usize,
) -> Result<Vec<HuffmanTable>> {
    let mut tables = Vec::with_capacity(table_count);
    for table in 0..table_count {
        let mark_loc = br.loc();
        let mut lengths = Vec::with_capacity(alpha_size);
        // Read the origin length - five bits long
        let mut len = br.bint(5)? as i32;
        for symbol in 0..alpha_size {
            loop {
                if len < 1 || len > MAX_CODE_LEN as i32 {
                    return Err(DecodeError::corrupt(format!(
                        "code length {} for symbol {} in table {} is outside 1..={}",
                        len, symbol, table, MAX_CODE_LEN
                    )));
                }
                if !br.bool_bit()? {
                    break;
                }
                // Get the second bit. If it is a 1, subtract 1. Otherwise add one.
                if br.bool_bit()? {
                    len -= 1
                } else {
                    len += 1
                }
            }
            lengths.push(len as u8);
        }
        trace!("\rFound huffman lengths for table {} at {}.", table, mark_loc);
        tables.push(HuffmanTable::from_lengths(&lengths)?);
    }
    Ok(tables)
}

/// Decode the symbol stream of one block, switching tables every CHUNK_SIZE symbols as the
/// selectors say. Returns the symbols before the EOB symbol.
pub fn huf_decode(
    br: &mut BitReader<'_>,
    tables: &[HuffmanTable],
    selectors: &[u8],
    eob: u16,
    max_symbols: usize,
) -> Result<Vec<u16>> {
    let mut out = Vec::with_capacity(max_symbols.min(selectors.len() * CHUNK_SIZE));

    for (chunk, &selector) in selectors.iter().enumerate() {
        let table = &tables[selector as usize];
        for _ in 0..CHUNK_SIZE {
            let sym = table.decode_symbol(br)?;
            if sym == eob {
                debug!(
                    "Found EOB after {} symbols in chunk {} of {}.",
                    out.len(),
                    chunk,
                    selectors.len()
                );
                return Ok(out);
            }
            if out.len() >= max_symbols {
                return Err(DecodeError::corrupt("block holds more symbols than its size allows"));
            }
            out.push(sym);
        }
    }
    Err(DecodeError::corrupt(format!(
        "ran out of selectors after {} symbols without finding the end of block",
        out.len()
    )))
}
