//! Read-only viewer for bzip2 and XZ compressed files.
//!
//! Version 0.1.0
//!
//! The bzip2 decoder is implemented here in full: bitstream reading, block header parsing,
//! Huffman decoding, MTF/RLE2 reversal, the inverse Burrows-Wheeler transform, and RLE1
//! expansion, with block and stream CRC verification. XZ data is delegated to lzma-rs, and
//! `.tar.*` archives are shown as the concatenated text of their entries.
//!
//! Basic usage to look at a compressed log is as follows:
//!
//! `$> bzview app.log.bz2`
//!
//! Use `-d` to write the decompressed file next to the input, or `-t` to only check it.
//!
pub mod bitstream;
pub mod bwt_algorithms;
pub mod compression;
pub mod error;
pub mod huffman_coding;
pub mod providers;
pub mod tools;
pub mod viewer;

pub use compression::decompress::{decompress, decompress_with, Bzip2StreamDecoder, DecodeOptions};
pub use error::{DecodeError, ViewError};
