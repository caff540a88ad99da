use std::fs::{File, OpenOptions};
use std::io::ErrorKind;
use std::path::Path;

use crate::error::SignatureError;

/// Opens the input file for sequential reading.
///
/// Validation runs before this, but the file can disappear between the
/// two calls, so a missing path still maps to the same error kind.
pub fn open_input(path: &Path) -> Result<File, SignatureError> {
    File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => SignatureError::InputNotFound { path: path.display().to_string() },
        _ => SignatureError::io(format!("failed to open input file {}", path.display()), e),
    })
}

/// Creates or truncates the output signature file.
#[must_use = "the returned File should be used to write the signature"]
pub fn create_output(path: &Path) -> Result<File, SignatureError> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .map_err(|e| SignatureError::OutputUnavailable { path: path.display().to_string(), source: e })
}

/// Free space in bytes on the filesystem holding `path`.
pub fn available_space(path: &Path) -> Result<u64, SignatureError> {
    fs2::available_space(path).map_err(|e| SignatureError::io(format!("failed to query free space for {}", path.display()), e))
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::io::Write;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_open_input_missing_maps_to_not_found() {
        let err = open_input(Path::new("/nonexistent/input.bin")).unwrap_err();
        assert!(matches!(err, SignatureError::InputNotFound { .. }));
    }

    #[test]
    fn test_create_output_truncates_existing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sig.out");
        fs::write(&path, b"stale contents").unwrap();

        let mut file = create_output(&path).unwrap();
        file.write_all(b"xy").unwrap();
        drop(file);

        assert_eq!(fs::read(&path).unwrap(), b"xy");
    }

    #[test]
    fn test_create_output_rejects_bad_path() {
        let err = create_output(Path::new("/nonexistent/dir/sig.out")).unwrap_err();
        assert!(matches!(err, SignatureError::OutputUnavailable { .. }));
    }

    #[test]
    fn test_available_space_reports_nonzero() {
        let dir = tempdir().unwrap();
        assert!(available_space(dir.path()).unwrap() > 0);
    }
}
