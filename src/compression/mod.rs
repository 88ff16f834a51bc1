//! The compression module manages bzip2 decompression for bzview.
//!
//! A bzip2 stream is a four byte signature (`BZh` plus the block size digit), a run of blocks, and a
//! footer holding the combined crc of all blocks. Each block is undone in the reverse of the order the
//! compressor applied its stages:
//! - Huffman decoding: Rebuild the canonical tables from their code lengths and decode 50 symbol chunks.
//! - RLE 2: Expand all runs of the zero MTF index (RUNA/RUNB).
//! - MTF transform: Convert from the Move-To-Front indices to the bytes represented by the indices.
//! - BWT reversal: Restore the original data from the BWT transform.
//! - RLE 1: Expand all runs of 4+ identical bytes.
//!
//! Decompression of a stream is single threaded. Blocks must come out in order, and the decoder hands
//! them back one at a time so large files never need the whole output in memory.
//!

pub mod block_header;
pub mod decompress;
