//! Reading the converted text dump.

use crate::error::{ProcessError, ProcessResult};
use std::path::Path;
use tracing::debug;

/// Read a text file into an ordered sequence of lines.
///
/// Line terminators are dropped; everything else, including leading
/// whitespace and form feeds, is kept for the classifiers.
pub fn read_lines(path: &Path) -> ProcessResult<Vec<String>> {
    if !path.exists() {
        return Err(ProcessError::FileNotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    let lines: Vec<String> = content.lines().map(str::to_string).collect();

    debug!("Read {} lines from {:?}", lines.len(), path);
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_lines_keeps_indentation() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "1 Quizzes\n   A. indented\r\n\n\x0c12\n").unwrap();

        let lines = read_lines(file.path()).unwrap();
        assert_eq!(lines, vec!["1 Quizzes", "   A. indented", "", "\x0c12"]);
    }

    #[test]
    fn test_read_lines_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_lines(&dir.path().join("missing.txt"));
        assert!(matches!(result, Err(ProcessError::FileNotFound(_))));
    }
}
