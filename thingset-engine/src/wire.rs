//! Shared response-buffer helpers (§7): every handler writes into a
//! caller-owned slice and never allocates a response larger than it.

use thingset_core::EngineError;
use thingset_types::StatusCode;

/// Writes a bare binary status byte at offset 0 and returns the consumed
/// length. Used both as the first step of a successful binary reply and,
/// by itself, as a status-only reply (e.g. a successful write).
pub fn write_status_byte(out: &mut [u8], status: StatusCode) -> Result<usize, EngineError> {
    let byte = out.get_mut(0).ok_or(EngineError::ResponseTooLong)?;
    *byte = status.binary_byte();
    Ok(1)
}

/// Copies a complete text reply into `out`, failing if it doesn't fit.
pub fn write_text_response(out: &mut [u8], text: &str) -> Result<usize, EngineError> {
    let bytes = text.as_bytes();
    if bytes.len() > out.len() {
        return Err(EngineError::ResponseTooLong);
    }
    out[..bytes.len()].copy_from_slice(bytes);
    Ok(bytes.len())
}

/// Overwrites `out` from offset 0 with a short binary error reply (§7: no
/// partial successful payload survives an error). Returns 0 if `out` is
/// empty — there is nowhere to put even a single status byte.
pub fn write_binary_error(out: &mut [u8], status: StatusCode) -> usize {
    match out.get_mut(0) {
        Some(byte) => {
            *byte = status.binary_byte();
            1
        }
        None => 0,
    }
}

/// Overwrites `out` from offset 0 with the text error line, truncated if
/// the buffer is smaller than the line itself.
pub fn write_text_error(out: &mut [u8], status: StatusCode) -> usize {
    let line = status.text_line();
    let bytes = line.as_bytes();
    let n = bytes.len().min(out.len());
    out[..n].copy_from_slice(&bytes[..n]);
    n
}
