use log::error;

use crate::error::{DecodeError, Result};

const RUNA: u16 = 0;
const RUNB: u16 = 1;

/// Does run-length-decoding and MTF decoding.
/// Takes huffman decoder data (without the EOB symbol), the symbol set, and the max block size.
/// Returns the bytes for the bwt transform, plus a frequency count of those bytes.
pub fn rle2_mtf_decode(
    data_in: &[u16],
    mtf_index: &mut Vec<u8>,
    size: usize,
) -> Result<(Vec<u8>, [u32; 256])> {
    // Initialize output buffer
    let mut out = Vec::with_capacity(size.min(data_in.len() * 2));
    let mut freq = [0_u32; 256];

    // Initialize counters
    let mut zeros = 0_usize;
    let mut bit_multiplier = 1_usize;

    // iterate through the input, doing the conversion as we find RUNA/RUNB sequences
    for &rle2_code in data_in {
        match rle2_code {
            // RUNA adds one times the current digit weight
            RUNA => {
                zeros += bit_multiplier;
                bit_multiplier <<= 1;
                zero_bomb(zeros, out.len(), size)?;
            }
            // RUNB adds two times the current digit weight
            RUNB => {
                zeros += bit_multiplier << 1;
                bit_multiplier <<= 1;
                zero_bomb(zeros, out.len(), size)?;
            }

            // Found a "normal" rle2_code
            n => {
                // Output repeats from RUNA/RUNB sequences, if any
                if zeros > 0 {
                    let sym = mtf_index[0];
                    out.resize(out.len() + zeros, sym);
                    freq[sym as usize] += zeros as u32;
                    bit_multiplier = 1;
                    zeros = 0;
                }

                // Convert the RLE2_code into an MTF_code
                let mut mtf_code = n as usize - 1;
                if mtf_code >= mtf_index.len() {
                    return Err(DecodeError::corrupt(format!(
                        "MTF index {} is outside the {} symbols in use",
                        mtf_code,
                        mtf_index.len()
                    )));
                }
                if out.len() >= size {
                    return Err(DecodeError::corrupt("block data exceeds the block size"));
                }

                // And output a byte from the MTF index
                let sym = mtf_index[mtf_code];
                out.push(sym);
                freq[sym as usize] += 1;

                // If this index is less than 16 elements into the vec,
                if mtf_code < 16 {
                    // Shift each index at the front of mtfa "forward" one. Do this first in blocks of 4 for speed.
                    while mtf_code > 3 {
                        mtf_index[mtf_code] = mtf_index[mtf_code - 1];
                        mtf_index[mtf_code - 1] = mtf_index[mtf_code - 2];
                        mtf_index[mtf_code - 2] = mtf_index[mtf_code - 3];
                        mtf_index[mtf_code - 3] = mtf_index[mtf_code - 4];
                        mtf_code -= 4;
                    }
                    // ...then clean up any odd ones
                    while mtf_code > 0 {
                        mtf_index[mtf_code] = mtf_index[mtf_code - 1];
                        mtf_code -= 1;
                    }
                    // ...and finally move this symbol to the front.
                    mtf_index[0] = sym;
                } else {
                    /* general case */
                    mtf_index.remove(mtf_code);
                    mtf_index.insert(0, sym)
                }
            }
        }
    }
    // Output trailing repeats from RUNA/RUNB sequences, if any
    if zeros > 0 {
        let sym = mtf_index[0];
        out.resize(out.len() + zeros, sym);
        freq[sym as usize] += zeros as u32;
    }

    Ok((out, freq))
}

/// Watch for malicious input: a run may never push the block past its maximum size.
fn zero_bomb(zeros: usize, used: usize, size: usize) -> Result<()> {
    if zeros > size.saturating_sub(used) {
        error!("Run of {} repeats overflows a block of {} bytes.", zeros, size);
        return Err(DecodeError::corrupt("RUNA/RUNB run exceeds the block size"));
    }
    Ok(())
}
