use std::io::Cursor;

use super::{CompressionFormat, CompressionProvider};
use crate::error::ViewError;

static XZ_FORMAT: CompressionFormat = CompressionFormat {
    name: "XZ",
    extensions: &[".xz", ".tar.xz"],
    scheme: "xz-view",
};

/// XZ provider supporting .xz and .tar.xz files. The LZMA work is done by lzma-rs.
#[derive(Debug, Clone, Copy, Default)]
pub struct XzProvider;

impl CompressionProvider for XzProvider {
    fn format(&self) -> &CompressionFormat {
        &XZ_FORMAT
    }

    fn decompress(&self, compressed: &[u8]) -> Result<Vec<u8>, ViewError> {
        let mut input = Cursor::new(compressed);
        let mut output = Vec::new();
        lzma_rs::xz_decompress(&mut input, &mut output).map_err(|e| ViewError::Xz(e.to_string()))?;
        Ok(output)
    }
}
