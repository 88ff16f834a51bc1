//! Tar archive text extraction.

use std::io::{Cursor, Read};

use log::debug;

use crate::error::ViewError;

/// Extract text content from a tar archive buffer by concatenating the content of all
/// entries in archive order. Each entry is read as UTF-8 (invalid sequences are replaced).
pub fn extract_tar_content(buffer: &[u8]) -> Result<String, ViewError> {
    let mut archive = tar::Archive::new(Cursor::new(buffer));
    let mut content = String::new();

    let entries = archive
        .entries()
        .map_err(|e| ViewError::Archive(e.to_string()))?;
    for entry in entries {
        let mut entry = entry.map_err(|e| ViewError::Archive(e.to_string()))?;
        let mut chunk = Vec::with_capacity(entry.size() as usize);
        entry
            .read_to_end(&mut chunk)
            .map_err(|e| ViewError::Archive(e.to_string()))?;
        debug!(
            "Tar entry {:?} holds {} bytes.",
            entry.path().map(|p| p.into_owned()).ok(),
            chunk.len()
        );
        content.push_str(&String::from_utf8_lossy(&chunk));
    }
    Ok(content)
}

#[cfg(test)]
mod test {
    use super::*;

    fn tar_of(files: &[(&str, &[u8])]) -> Vec<u8> {
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

    #[test]
    fn single_entry() {
        let archive = tar_of(&[("app.log", &b"line one\nline two\n"[..])]);
        assert_eq!(extract_tar_content(&archive).unwrap(), "line one\nline two\n");
    }

    #[test]
    fn entries_concatenate_in_order() {
        let archive = tar_of(&[
            ("b.log", &b"second "[..]),
            ("a.log", &b"first "[..]),
            ("empty", &b""[..]),
        ]);
        assert_eq!(extract_tar_content(&archive).unwrap(), "second first ");
    }

    #[test]
    fn empty_archive() {
        let archive = tar_of(&[]);
        assert_eq!(extract_tar_content(&archive).unwrap(), "");
    }
}
