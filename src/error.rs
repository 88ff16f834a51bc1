//! Error types for bzview.
//!
//! `DecodeError` covers everything that can go wrong inside the bzip2 decoder. Every variant is
//! terminal for the stream being decoded: no partial output is ever handed back.
//!
//! `ViewError` is what the provider layer and the command line deal with. It wraps decoder errors
//! together with I/O, XZ and tar failures.

use std::fmt::{Display, Formatter};
use std::path::PathBuf;

use thiserror::Error;

/// Which checksum failed to match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChecksumScope {
    /// The CRC stored in a block header, for the 1-based block number.
    Block(usize),
    /// The combined CRC stored after the end-of-stream marker.
    Stream,
}
impl Display for ChecksumScope {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ChecksumScope::Block(n) => write!(f, "block {}", n),
            ChecksumScope::Stream => write!(f, "stream"),
        }
    }
}

/// Errors raised while decoding a bzip2 stream.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The bit reader was asked for bits past the end of the buffer.
    #[error("truncated stream: needed {needed} bits at bit {position}, only {available} left")]
    TruncatedStream {
        position: u64,
        needed: u64,
        available: u64,
    },

    /// Bad magic, an impossible Huffman code, inconsistent selector or table counts, etc.
    #[error("corrupt stream: {0}")]
    CorruptStream(String),

    /// A legal but unsupported construct, such as a randomised block.
    #[error("unsupported feature: {0}")]
    UnsupportedFeature(&'static str),

    /// A computed CRC differs from the one stored in the stream.
    #[error("{scope} checksum mismatch: stored {expected:#010x}, computed {actual:#010x}")]
    ChecksumMismatch {
        scope: ChecksumScope,
        expected: u32,
        actual: u32,
    },
}

impl DecodeError {
    /// Convenience constructor for `CorruptStream`.
    pub fn corrupt<S: Into<String>>(msg: S) -> Self {
        DecodeError::CorruptStream(msg.into())
    }
}

/// Errors raised by the provider layer and the command line.
#[derive(Debug, Error)]
pub enum ViewError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("bzip2 decode failed: {0}")]
    Bzip2(#[from] DecodeError),

    #[error("xz decode failed: {0}")]
    Xz(String),

    #[error("tar archive error: {0}")]
    Archive(String),

    #[error("no provider found for file: {0}")]
    NoProvider(String),

    #[error("output file {} already exists (use --force to overwrite)", .0.display())]
    OutputExists(PathBuf),
}

/// Result alias used throughout the decoder.
pub type Result<T> = std::result::Result<T, DecodeError>;
