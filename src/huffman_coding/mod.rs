//! The huffman module decodes the entropy coded part of each BZIP2 block.
//!
//! Huffman encoding is used in lieu of arithmetic encoding because of an historical problem with licensing restrictions.
//! While that has been resolved in more recent years, the BZIP2 standard was set based on the huffman standard.
//!
//! The huffman coding algorithm as used by BZIP2 is both block and chunk oriented. Within each block, chunks of 50
//! symbols are encoded using one of two to six huffman tables. Which table applies to each chunk is recorded in the
//! block's selector list.
//!
//! Only code lengths are stored in the stream. The codes themselves are rebuilt canonically: shorter codes first,
//! and codes of equal length in symbol order.
//!
//! The process of decoding each block is inherently sequential and does not benefit from multithreading.
//!

pub mod huffman_decode;
