//! Safe-return adapter.
//!
//! The signaling form of every operation is the single source of truth. The
//! helpers here turn its `Result` into a `(Status, value)` pair or into a
//! bounded write, so nothing is thrown and a failed call leaves the caller's
//! buffer exactly as it was.

use crate::error::{Error, Result};
use crate::status::Status;
use tracing::debug;

/// Bytes reserved after the text for the NUL terminator.
pub const TERMINATOR_LEN: usize = 1;

/// Minimum capacity that holds `text_len` bytes of text plus the terminator.
pub const fn required_capacity(text_len: usize) -> usize {
    text_len.saturating_add(TERMINATOR_LEN)
}

/// Caller-owned output storage with a declared capacity.
///
/// The declared capacity is clamped to the backing slice, so writes can never
/// leave the slice even if the caller overstates it.
#[derive(Debug)]
pub struct TextBuffer<'a> {
    bytes: &'a mut [u8],
    capacity: usize,
}

impl<'a> TextBuffer<'a> {
    pub fn new(bytes: &'a mut [u8]) -> Self {
        let capacity = bytes.len();
        Self { bytes, capacity }
    }

    pub fn with_capacity(bytes: &'a mut [u8], capacity: usize) -> Self {
        let capacity = capacity.min(bytes.len());
        Self { bytes, capacity }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn fits(&self, text_len: usize) -> bool {
        self.capacity >= required_capacity(text_len)
    }

    /// Contents up to the first NUL, bounded by the declared capacity.
    pub fn as_bytes(&self) -> &[u8] {
        let region = &self.bytes[..self.capacity];
        let end = region.iter().position(|b| *b == 0).unwrap_or(region.len());
        &region[..end]
    }

    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(self.as_bytes()).ok()
    }

    fn write_terminated(&mut self, parts: &[&str]) {
        let mut at = 0;
        for part in parts {
            self.bytes[at..at + part.len()].copy_from_slice(part.as_bytes());
            at += part.len();
        }
        self.bytes[at] = 0;
    }
}

/// Writes the concatenation of `parts` and a terminator, or nothing at all.
pub fn write_bounded_parts(parts: &[&str], buf: &mut TextBuffer<'_>) -> Result<()> {
    let text_len = parts
        .iter()
        .fold(0usize, |acc, part| acc.saturating_add(part.len()));
    if !buf.fits(text_len) {
        return Err(Error::BufferTooSmall {
            required: required_capacity(text_len),
            capacity: buf.capacity(),
        });
    }
    buf.write_terminated(parts);
    Ok(())
}

pub fn write_bounded(text: &str, buf: &mut TextBuffer<'_>) -> Result<()> {
    write_bounded_parts(&[text], buf)
}

/// Collapses a signaling result into a status and a value (default on failure).
pub fn settle<T: Default>(result: Result<T>) -> (Status, T) {
    match result {
        Ok(value) => (Status::Ok, value),
        Err(err) => {
            let status = err.status();
            debug!(code = status.code(), error = %err, "safe call rejected");
            (status, T::default())
        }
    }
}

/// Status-only form of [`write_bounded_parts`].
pub fn write_status(parts: &[&str], buf: &mut TextBuffer<'_>) -> Status {
    settle(write_bounded_parts(parts, buf)).0
}
