//! Per-file work for the command line: pick a provider, decode, and either hand back text or
//! write the decompressed payload to disk.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::error::ViewError;
use crate::providers::ProviderRegistry;
use crate::tools::cli::{Mode, ViewOpts};

/// What happened to one input file.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Text to show the user
    Text(String),
    /// Payload written to disk (path, bytes written)
    Written(PathBuf, u64),
    /// Integrity test passed (decompressed size)
    Tested(u64),
}

/// Decode one file according to the operational mode in `opts`.
pub fn view_file(
    file: &Path,
    registry: &ProviderRegistry,
    opts: &ViewOpts,
) -> Result<Outcome, ViewError> {
    let provider = registry
        .get_provider(file)
        .ok_or_else(|| ViewError::NoProvider(file.display().to_string()))?;
    let compressed = fs::read(file)?;
    info!(
        "Read {} bytes of {} data from {}.",
        compressed.len(),
        provider.format().name,
        file.display()
    );

    match opts.op_mode {
        Mode::Decompress => {
            let out_path = provider.decompressed_path(file);
            let written = write_payload(&out_path, opts.force_overwrite, |out| {
                provider.decompress_to(&compressed, out)
            })?;
            Ok(Outcome::Written(out_path, written))
        }
        Mode::Test => {
            let data = provider.decompress(&compressed)?;
            info!("{}: ok, {} bytes.", file.display(), data.len());
            Ok(Outcome::Tested(data.len() as u64))
        }
        Mode::View => {
            let data = provider.decompress(&compressed)?;
            if data.len() > opts.max_preview {
                let out_path = provider.decompressed_path(file);
                warn!(
                    "{} is too large to preview ({}MB). Writing it to {}.",
                    file.display(),
                    data.len() / 1024 / 1024,
                    out_path.display()
                );
                let written = write_payload(&out_path, opts.force_overwrite, |out| {
                    out.write_all(&data)?;
                    Ok(data.len() as u64)
                })?;
                return Ok(Outcome::Written(out_path, written));
            }
            Ok(Outcome::Text(provider.buffer_to_text(&data, file)?))
        }
    }
}

/// Create `path` and fill it with `fill`. An existing file is an error unless `force` is set.
/// A failed write leaves no output file behind.
fn write_payload<F>(path: &Path, force: bool, fill: F) -> Result<u64, ViewError>
where
    F: FnOnce(&mut dyn Write) -> Result<u64, ViewError>,
{
    if path.exists() && !force {
        return Err(ViewError::OutputExists(path.to_path_buf()));
    }
    let mut f_out = BufWriter::new(File::create(path)?);
    let result = fill(&mut f_out).and_then(|n| {
        f_out.flush()?;
        Ok(n)
    });
    if result.is_err() {
        drop(f_out);
        if let Err(e) = fs::remove_file(path) {
            warn!("Unable to remove partial output {}: {}", path.display(), e);
        }
    }
    result
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::compression::decompress::DecodeOptions;
    use tempfile::TempDir;

    // Header followed directly by the end of stream marker
    const EMPTY_STREAM: [u8; 14] = [
        0x42, 0x5a, 0x68, 0x39, 0x17, 0x72, 0x45, 0x38, 0x50, 0x90, 0x00, 0x00, 0x00, 0x00,
    ];

    fn registry() -> ProviderRegistry {
        ProviderRegistry::with_defaults(DecodeOptions::default())
    }

    fn opts(mode: Mode) -> ViewOpts {
        let mut opts = ViewOpts::new();
        opts.op_mode = mode;
        opts
    }

    #[test]
    fn unknown_extension() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("notes.gz");
        fs::write(&file, b"whatever").unwrap();
        assert!(matches!(
            view_file(&file, &registry(), &opts(Mode::View)),
            Err(ViewError::NoProvider(_))
        ));
    }

    #[test]
    fn missing_file_is_io() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("gone.bz2");
        assert!(matches!(
            view_file(&file, &registry(), &opts(Mode::View)),
            Err(ViewError::Io(_))
        ));
    }

    #[test]
    fn empty_stream_views_as_empty_text() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("empty.log.bz2");
        fs::write(&file, EMPTY_STREAM).unwrap();
        assert_eq!(
            view_file(&file, &registry(), &opts(Mode::View)).unwrap(),
            Outcome::Text(String::new())
        );
        assert_eq!(
            view_file(&file, &registry(), &opts(Mode::Test)).unwrap(),
            Outcome::Tested(0)
        );
    }

    #[test]
    fn decompress_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("empty.log.bz2");
        let target = dir.path().join("empty.log");
        fs::write(&file, EMPTY_STREAM).unwrap();
        fs::write(&target, b"keep me").unwrap();

        let mut o = opts(Mode::Decompress);
        assert!(matches!(
            view_file(&file, &registry(), &o),
            Err(ViewError::OutputExists(p)) if p == target
        ));
        assert_eq!(fs::read(&target).unwrap(), b"keep me");

        o.force_overwrite = true;
        assert_eq!(
            view_file(&file, &registry(), &o).unwrap(),
            Outcome::Written(target.clone(), 0)
        );
        assert_eq!(fs::read(&target).unwrap(), b"");
    }

    #[test]
    fn failed_decompress_leaves_no_output() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("broken.log.bz2");
        fs::write(&file, &EMPTY_STREAM[..8]).unwrap();
        assert!(view_file(&file, &registry(), &opts(Mode::Decompress)).is_err());
        assert!(!dir.path().join("broken.log").exists());
    }

    #[test]
    fn large_payload_goes_to_disk() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("big.txt.xz");
        let payload = vec![b'x'; 4096];
        let mut compressed = Vec::new();
        lzma_rs::xz_compress(&mut std::io::Cursor::new(&payload), &mut compressed).unwrap();
        fs::write(&file, compressed).unwrap();

        let mut o = opts(Mode::View);
        o.max_preview = 1024;
        let target = dir.path().join("big.txt");
        assert_eq!(
            view_file(&file, &registry(), &o).unwrap(),
            Outcome::Written(target.clone(), 4096)
        );
        assert_eq!(fs::read(&target).unwrap(), payload);
    }
}
