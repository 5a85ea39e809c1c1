//! Plain-text memory-image loader.
//!
//! Input images carry one byte per line as eight binary digits; four
//! consecutive lines form one big-endian 32-bit word. Blank lines are
//! skipped; anything else that is not eight binary digits is a fatal
//! image error naming the line.

use std::fs;
use std::path::Path;

use crate::common::error::SimError;

/// Loads a memory image into a byte vector.
///
/// # Errors
///
/// Returns [`SimError::Io`] when the file cannot be read and
/// [`SimError::MalformedImage`] on any line that is not eight binary digits.
pub fn load_image(path: &Path) -> Result<Vec<u8>, SimError> {
    let text = fs::read_to_string(path)?;
    let mut bytes = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        let token = line.trim();
        if token.is_empty() {
            continue;
        }
        let malformed = || SimError::MalformedImage {
            line: idx + 1,
            token: token.to_owned(),
        };
        if token.len() != 8 || !token.bytes().all(|b| b == b'0' || b == b'1') {
            return Err(malformed());
        }
        bytes.push(u8::from_str_radix(token, 2).map_err(|_| malformed())?);
    }

    Ok(bytes)
}
