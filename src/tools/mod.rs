//! The tools module provides several helper functions for bzview.
//!
//! BZIP2 is a block-oriented approach to compress data.
//!
//! The tools are:
//! - cli: Command line interface for bzview.
//! - crc: CRC32 checksum for BZIP2, both block and stream versions.
//! - rle1: Run-Length-Encoding phase 1 decoding for BZIP2.
//! - rle2_mtf_decode: Run-Length-Encoding phase 2 and Move-To-Front reversal (integrated for speed) for BZIP2.
//! - symbol_map: Decode the symbol map used in BZIP2.
//!
pub mod cli;
pub mod crc;
pub mod rle1;
pub mod rle2_mtf_decode;
pub mod symbol_map;
