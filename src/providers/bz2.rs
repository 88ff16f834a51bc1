use std::io::Write;

use log::debug;

use super::{CompressionFormat, CompressionProvider};
use crate::compression::decompress::{decompress_with, Bzip2StreamDecoder, DecodeOptions};
use crate::error::ViewError;

static BZIP2_FORMAT: CompressionFormat = CompressionFormat {
    name: "bzip2",
    extensions: &[".bz2", ".tar.bz2"],
    scheme: "bz2-view",
};

/// bzip2 provider supporting .bz2 and .tar.bz2 files
#[derive(Debug, Clone, Default)]
pub struct Bz2Provider {
    opts: DecodeOptions,
}

impl Bz2Provider {
    pub fn new(opts: DecodeOptions) -> Self {
        Self { opts }
    }
}

impl CompressionProvider for Bz2Provider {
    fn format(&self) -> &CompressionFormat {
        &BZIP2_FORMAT
    }

    fn decompress(&self, compressed: &[u8]) -> Result<Vec<u8>, ViewError> {
        Ok(decompress_with(compressed, self.opts)?)
    }

    /// Write each block as soon as it is decoded.
    fn decompress_to(&self, compressed: &[u8], out: &mut dyn Write) -> Result<u64, ViewError> {
        let mut written = 0_u64;
        for block in Bzip2StreamDecoder::with_options(compressed, self.opts) {
            let block = block?;
            out.write_all(&block)?;
            written += block.len() as u64;
            debug!("Wrote a block of data with {} bytes.", block.len());
        }
        Ok(written)
    }
}
