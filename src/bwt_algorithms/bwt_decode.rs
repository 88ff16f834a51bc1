use crate::error::{DecodeError, Result};

/// Decode a Burrows-Wheeler-Transform. Takes the origin pointer (key), the transformed
/// block, and the frequency count of each byte in that block.
pub fn bwt_decode(key: u32, bwt_in: &[u8], freq_in: &[u32; 256]) -> Result<Vec<u8>> {
    // Calculate end once.
    let end = bwt_in.len();
    if key as usize >= end {
        return Err(DecodeError::corrupt(format!(
            "origin pointer {} is outside a block of {} bytes",
            key, end
        )));
    }

    // Convert frequency count to a cumulative sum of frequencies
    let mut freq = [0_u32; 256];
    for i in 0..255 {
        freq[i + 1] = freq[i] + freq_in[i];
    }
    if freq[255] + freq_in[255] != end as u32 {
        return Err(DecodeError::corrupt("frequency table does not match the block"));
    }

    // Build the transformation vector to find the next character in the original data
    let mut t_vec = vec![0_u32; end];
    for (i, &s) in bwt_in.iter().enumerate() {
        t_vec[freq[s as usize] as usize] = i as u32;
        freq[s as usize] += 1
    }

    // Walk the permutation from the origin. This is the slowest portion of this function,
    // the jumps through t_vec are all cache misses on big blocks.
    let mut orig = Vec::with_capacity(end);
    let mut next = t_vec[key as usize];
    for _ in 0..end {
        orig.push(bwt_in[next as usize]);
        next = t_vec[next as usize];
    }

    Ok(orig)
}
