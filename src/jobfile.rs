//! Local job-description files

use std::fs;
use std::io;
use std::path::Path;

use crate::extractors::collapse_whitespace;

/// Read a UTF-8 text file and merge all of its lines and paragraphs into one line
pub fn read_single_line(path: impl AsRef<Path>) -> io::Result<String> {
    let text = fs::read_to_string(path)?;
    Ok(collapse_whitespace(&text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_single_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("posting.txt");
        fs::write(&path, "PhD Position\n\n  Embedded inference\tfor robots.\r\n").unwrap();

        assert_eq!(
            read_single_line(&path).unwrap(),
            "PhD Position Embedded inference for robots."
        );
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_single_line(dir.path().join("missing.txt")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
