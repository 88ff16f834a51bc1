//! Fixture generators shared by the integration tests.
#![allow(dead_code)]

use std::io::{Cursor, Write};
use std::process::{Command, Stdio};

use bzip2::write::BzEncoder;
use bzip2::Compression;

const LEVELS: [&str; 4] = ["INFO", "DEBUG", "WARN", "ERROR"];
const TEXT_CHARS: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789 \n\t.,;:!?-_=+[]{}()";

/// Log lines with ISO timestamps one second apart, starting at epoch-ms 1 700 000 000 000.
pub fn generate_log_content(lines: usize) -> String {
    let mut out = Vec::with_capacity(lines);
    for i in 0..lines {
        let ts = chrono::DateTime::from_timestamp_millis(1_700_000_000_000 + i as i64 * 1000)
            .unwrap()
            .format("%Y-%m-%dT%H:%M:%S%.3fZ");
        out.push(format!(
            "{} [{}] Line {}: Sample log message value={}",
            ts,
            LEVELS[i % LEVELS.len()],
            i,
            i * 42
        ));
    }
    let mut text = out.join("\n");
    text.push('\n');
    text
}

/// Deterministic pseudo random text from a linear congruential generator.
pub fn generate_random_text_content(size: usize, seed: u64) -> String {
    let mut state = seed;
    let mut out = String::with_capacity(size);
    for _ in 0..size {
        state = (state * 1_103_515_245 + 12_345) & 0x7fff_ffff;
        out.push(TEXT_CHARS[state as usize % TEXT_CHARS.len()] as char);
    }
    out
}

/// Deterministic pseudo random bytes, same generator as the text.
pub fn generate_random_binary(size: usize, seed: u64) -> Vec<u8> {
    let mut state = seed;
    (0..size)
        .map(|_| {
            state = (state * 1_103_515_245 + 12_345) & 0x7fff_ffff;
            (state >> 16) as u8
        })
        .collect()
}

/// Every byte value, repeated up to `size` bytes.
pub fn generate_all_byte_values(size: usize) -> Vec<u8> {
    (0..=255_u8).cycle().take(size).collect()
}

/// Compress with libbzip2 at the given block size level (1-9).
pub fn bz2(data: &[u8], level: u32) -> Vec<u8> {
    let mut encoder = BzEncoder::new(Vec::new(), Compression::new(level));
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

pub fn xz(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    lzma_rs::xz_compress(&mut Cursor::new(data), &mut out).unwrap();
    out
}

/// A tar archive holding the given (name, content) entries.
pub fn tar_of(files: &[(&str, &[u8])]) -> Vec<u8> {
    let mut builder = tar::Builder::new(Vec::new());
    for (name, data) in files {
        let mut header = tar::Header::new_gnu();
        header.set_size(data.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        builder.append_data(&mut header, name, *data).unwrap();
    }
    builder.into_inner().unwrap()
}

/// Compress with the system `bzip2` binary. None if it is not installed.
pub fn system_bzip2(data: &[u8]) -> Option<Vec<u8>> {
    let mut child = Command::new("bzip2")
        .args(["-c", "-9"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .ok()?;
    // Feed stdin from another thread so a full stdout pipe cannot stall us
    let mut stdin = child.stdin.take()?;
    let input = data.to_vec();
    let feeder = std::thread::spawn(move || stdin.write_all(&input));
    let output = child.wait_with_output().ok()?;
    feeder.join().ok()?.ok()?;
    if output.status.success() {
        Some(output.stdout)
    } else {
        None
    }
}
