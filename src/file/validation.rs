use std::fs;
use std::path::Path;

use crate::error::SignatureError;

/// Rejects a zero block size before anything else happens.
pub fn validate_block_size(block_size: u64) -> Result<(), SignatureError> {
    if block_size == 0 {
        return Err(SignatureError::InvalidParameter { reason: "block size must be greater than zero".into() });
    }
    Ok(())
}

/// Checks that the input path is a non-empty regular file.
///
/// Returns the file size so the caller can derive the block count
/// without a second stat.
pub fn validate_input(path: &Path) -> Result<u64, SignatureError> {
    let meta = match fs::metadata(path) {
        Ok(meta) => meta,
        Err(_) => return Err(SignatureError::InputNotFound { path: path.display().to_string() }),
    };

    if !meta.is_file() {
        return Err(SignatureError::InputNotFound { path: path.display().to_string() });
    }

    if meta.len() == 0 {
        return Err(SignatureError::EmptyInput { path: path.display().to_string() });
    }

    Ok(meta.len())
}
