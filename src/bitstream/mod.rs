//! The bitstream module forms the I/O subsystem for the bzview bzip2 decoder.
//!
//! BZIP2 is a block-oriented approach to compress data. Blocks are not byte aligned, so every
//! field after the four byte stream signature has to be pulled out of the stream bit by bit.
//!
//! The compressed file is read into memory once by the caller. The reader only borrows it.
//!
pub mod bitreader;
