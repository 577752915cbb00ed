/*!
 * Text/binary detection from a file's leading bytes
 */

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use tracing::{debug, trace};

use crate::types::FileType;

/// Number of leading bytes inspected
pub const SNIFF_LEN: usize = 1024;

/// Classify a file as text or binary by its first `SNIFF_LEN` bytes
///
/// Any I/O error yields `BinaryFile` so unreadable content is never inlined.
/// Bytes past the prefix are not inspected, so a file that only turns binary
/// later is classified as text.
pub fn classify(path: &Path) -> FileType {
    match read_prefix(path) {
        Ok((prefix, truncated)) => {
            let kind = classify_prefix(&prefix, truncated);
            trace!("Classified {} as {:?}", path.display(), kind);
            kind
        }
        Err(e) => {
            debug!("Treating {} as binary: {}", path.display(), e);
            FileType::BinaryFile
        }
    }
}

/// Classify a complete in-memory content
pub fn classify_bytes(content: &[u8]) -> FileType {
    classify_prefix(content, false)
}

/// Classify a prefix; `truncated` is set when the file continues past it
///
/// A multi-byte character cut off by the end of a truncated prefix is not
/// a decode failure. The same incomplete sequence at the end of a whole
/// file is.
pub fn classify_prefix(prefix: &[u8], truncated: bool) -> FileType {
    if prefix.contains(&0) {
        return FileType::BinaryFile;
    }

    match std::str::from_utf8(prefix) {
        Ok(_) => FileType::TextFile,
        Err(e) if truncated && e.error_len().is_none() => FileType::TextFile,
        Err(_) => FileType::BinaryFile,
    }
}

/// Read up to `SNIFF_LEN` bytes and report whether the file goes on
fn read_prefix(path: &Path) -> io::Result<(Vec<u8>, bool)> {
    let file = File::open(path)?;
    let mut buffer = Vec::with_capacity(SNIFF_LEN + 1);
    file.take(SNIFF_LEN as u64 + 1).read_to_end(&mut buffer)?;
    let truncated = buffer.len() > SNIFF_LEN;
    buffer.truncate(SNIFF_LEN);
    Ok((buffer, truncated))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_nul_byte_is_binary() {
        assert_eq!(classify_bytes(b"\x00\x01"), FileType::BinaryFile);
        assert_eq!(classify_bytes(b"hello\x00world"), FileType::BinaryFile);
    }

    #[test]
    fn test_nul_anywhere_in_prefix_is_binary() {
        for pos in [0, 1, 511, SNIFF_LEN - 1] {
            let mut bytes = vec![b'a'; SNIFF_LEN];
            bytes[pos] = 0;
            assert_eq!(classify_bytes(&bytes), FileType::BinaryFile, "NUL at {}", pos);
        }
    }

    #[test]
    fn test_utf8_is_text() {
        assert_eq!(classify_bytes(b"print(1)"), FileType::TextFile);
        assert_eq!(classify_bytes("héllo wörld ✓".as_bytes()), FileType::TextFile);
        assert_eq!(classify_bytes(b""), FileType::TextFile);
    }

    #[test]
    fn test_invalid_utf8_is_binary() {
        assert_eq!(classify_bytes(&[0xff, 0xfe, b'a']), FileType::BinaryFile);
        assert_eq!(classify_bytes(&[b'a', 0xc3, b'(']), FileType::BinaryFile);
    }

    #[test]
    fn test_incomplete_multibyte_at_end() {
        // first two bytes of a three-byte sequence
        let bytes = [b'a', 0xe2, 0x9c];
        assert_eq!(classify_bytes(&bytes), FileType::BinaryFile);
        assert_eq!(classify_prefix(&bytes, false), FileType::BinaryFile);
        assert_eq!(classify_prefix(&bytes, true), FileType::TextFile);
    }

    #[test]
    fn test_short_file_ending_mid_character_is_binary() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("x.dat");
        fs::write(&path, [b'a', 0xe2, 0x9c]).unwrap();

        assert_eq!(classify(&path), FileType::BinaryFile);
    }

    #[test]
    fn test_full_length_file_ending_mid_character_is_binary() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("exact.dat");
        let mut bytes = vec![b'a'; SNIFF_LEN - 2];
        bytes.extend_from_slice(&[0xe2, 0x9c]);
        fs::write(&path, bytes).unwrap();

        assert_eq!(classify(&path), FileType::BinaryFile);
    }

    #[test]
    fn test_classify_file() {
        let dir = tempdir().unwrap();
        let text = dir.path().join("a.py");
        let bin = dir.path().join("b.bin");
        fs::write(&text, "print(1)").unwrap();
        fs::write(&bin, [0u8, 1, 2, 3]).unwrap();

        assert_eq!(classify(&text), FileType::TextFile);
        assert_eq!(classify(&bin), FileType::BinaryFile);
    }

    #[test]
    fn test_multibyte_split_at_prefix_boundary() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("unicode.txt");
        let mut content = "a".repeat(SNIFF_LEN - 1);
        content.push('✓');
        fs::write(&path, content).unwrap();

        assert_eq!(classify(&path), FileType::TextFile);
    }

    #[test]
    fn test_binary_after_prefix_is_not_detected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("late.bin");
        let mut bytes = vec![b'a'; SNIFF_LEN];
        bytes.extend_from_slice(&[0, 0xff]);
        fs::write(&path, bytes).unwrap();

        assert_eq!(classify(&path), FileType::TextFile);
    }

    #[test]
    fn test_missing_file_is_binary() {
        let dir = tempdir().unwrap();
        assert_eq!(classify(&dir.path().join("gone")), FileType::BinaryFile);
    }
}
