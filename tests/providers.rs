mod common;

use std::path::Path;

use bzview::providers::{CompressionProvider, ProviderRegistry};
use bzview::{DecodeOptions, ViewError};
use common::*;

fn registry() -> ProviderRegistry {
    ProviderRegistry::with_defaults(DecodeOptions::default())
}

#[test]
fn tar_bz2_as_text() {
    let log = generate_log_content(25);
    let archive = tar_of(&[("logs/app.log", log.as_bytes())]);
    let compressed = bz2(&archive, 9);

    let path = Path::new("bundle.tar.bz2");
    let registry = registry();
    let provider = registry.get_provider(path).unwrap();
    assert_eq!(provider.format().name, "bzip2");
    let data = provider.decompress(&compressed).unwrap();
    assert_eq!(provider.buffer_to_text(&data, path).unwrap(), log);
}

#[test]
fn tar_xz_as_text() {
    let archive = tar_of(&[("a.txt", &b"alpha\n"[..]), ("b.txt", &b"beta\n"[..])]);
    let path = Path::new("bundle.tar.xz");
    let registry = registry();
    let provider = registry.get_provider(path).unwrap();
    assert_eq!(provider.format().name, "XZ");
    let data = provider.decompress(&xz(&archive)).unwrap();
    assert_eq!(provider.buffer_to_text(&data, path).unwrap(), "alpha\nbeta\n");
}

#[test]
fn plain_bz2_as_text() {
    let text = generate_random_text_content(10_000, 42);
    let path = Path::new("notes.txt.bz2");
    let registry = registry();
    let provider = registry.get_provider(path).unwrap();
    let data = provider.decompress(&bz2(text.as_bytes(), 9)).unwrap();
    assert!(!provider.is_archive(path));
    assert_eq!(provider.buffer_to_text(&data, path).unwrap(), text);
}

#[test]
fn streaming_decompress_to_writer() {
    let text = generate_random_text_content(300_000, 1);
    let compressed = bz2(text.as_bytes(), 1);
    let registry = registry();
    let provider = registry.get_provider(Path::new("big.log.bz2")).unwrap();
    let mut out = Vec::new();
    let written = provider.decompress_to(&compressed, &mut out).unwrap();
    assert_eq!(written, text.len() as u64);
    assert!(out == text.as_bytes());
}

#[test]
fn errors_surface_as_view_errors() {
    let registry = registry();
    let bz = registry.get_provider(Path::new("x.bz2")).unwrap();
    assert!(matches!(bz.decompress(b"BZh9garbage"), Err(ViewError::Bzip2(_))));
    let xz = registry.get_provider(Path::new("x.xz")).unwrap();
    assert!(matches!(xz.decompress(b"not xz"), Err(ViewError::Xz(_))));
}

#[test]
fn output_paths() {
    let registry = registry();
    let provider = registry.get_provider(Path::new("a.tar.bz2")).unwrap();
    assert_eq!(
        provider.decompressed_path(Path::new("/var/log/app.log.bz2")),
        Path::new("/var/log/app.log")
    );
    assert_eq!(
        provider.decompressed_path(Path::new("/var/log/bundle.tar.bz2")),
        Path::new("/var/log/bundle.tar")
    );
}
