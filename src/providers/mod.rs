//! The providers module maps compressed files to the code that can open them.
//!
//! Each supported format is one `CompressionProvider`. A provider knows its file extensions, how to
//! turn compressed bytes into plain bytes, and how to present the result as text (tar archives
//! become the concatenated text of their entries). The `ProviderRegistry` picks the provider for a
//! path by its longest matching extension.
//!
pub mod archive;
pub mod bz2;
pub mod registry;
pub mod xz;

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::ViewError;

pub use bz2::Bz2Provider;
pub use registry::ProviderRegistry;
pub use xz::XzProvider;

/// Static description of a compression format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressionFormat {
    /// Format name for display (e.g. "XZ", "bzip2")
    pub name: &'static str,
    /// File extensions supported, in order of preference (e.g. [".xz", ".tar.xz"])
    pub extensions: &'static [&'static str],
    /// Scheme used to name the text view of a file (e.g. "xz-view")
    pub scheme: &'static str,
}

/// One compression format that bzview can open.
pub trait CompressionProvider: Send + Sync {
    /// Format configuration.
    fn format(&self) -> &CompressionFormat;

    /// Decompress a complete buffer.
    fn decompress(&self, compressed: &[u8]) -> Result<Vec<u8>, ViewError>;

    /// Decompress a complete buffer into a writer. Returns the number of bytes written.
    fn decompress_to(&self, compressed: &[u8], out: &mut dyn Write) -> Result<u64, ViewError> {
        let data = self.decompress(compressed)?;
        out.write_all(&data)?;
        Ok(data.len() as u64)
    }

    /// Read a file fully into memory and decompress it.
    fn decompress_file(&self, path: &Path) -> Result<Vec<u8>, ViewError> {
        let compressed = fs::read(path)?;
        self.decompress(&compressed)
    }

    /// Check if this provider handles the given path (case insensitive).
    fn supports_file(&self, path: &Path) -> bool {
        let lower = path.to_string_lossy().to_lowercase();
        self.format().extensions.iter().any(|ext| lower.ends_with(ext))
    }

    /// True if the path names a tar archive of this format.
    fn is_archive(&self, path: &Path) -> bool {
        let lower = path.to_string_lossy().to_lowercase();
        self.format()
            .extensions
            .iter()
            .any(|ext| ext.starts_with(".tar.") && lower.ends_with(ext))
    }

    /// Convert decompressed bytes to text. Archives become the concatenated text of their entries,
    /// anything else is read as UTF-8 (invalid sequences are replaced).
    fn buffer_to_text(&self, buffer: &[u8], path: &Path) -> Result<String, ViewError> {
        if self.is_archive(path) {
            return archive::extract_tar_content(buffer);
        }
        Ok(String::from_utf8_lossy(buffer).into_owned())
    }

    /// Where the decompressed file should be written: the path with the first matching
    /// extension removed, or with ".decompressed" added if none match.
    fn decompressed_path(&self, path: &Path) -> PathBuf {
        let name = path.to_string_lossy();
        for ext in self.format().extensions {
            if name.ends_with(ext) {
                return PathBuf::from(&name[..name.len() - ext.len()]);
            }
        }
        PathBuf::from(format!("{}.decompressed", name))
    }
}
