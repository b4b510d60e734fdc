use crate::safe::{TextBuffer, required_capacity, write_status};
use crate::status::Status;
use std::ffi::CStr;

/// Library version, fixed at build time.
pub const ADDER_VERSION: &str = "v1.0";

/// [`ADDER_VERSION`] with a trailing NUL, for handing out across the C ABI.
pub const ADDER_VERSION_CSTR: &CStr = c"v1.0";

pub fn get_version() -> &'static str {
    ADDER_VERSION
}

/// Smallest buffer capacity that [`get_version_safe`] accepts.
pub fn version_capacity() -> usize {
    required_capacity(ADDER_VERSION.len())
}

/// Copies the version into `buf`, or returns `BufferTooSmall` and writes nothing.
pub fn get_version_safe(buf: &mut TextBuffer<'_>) -> Status {
    write_status(&[ADDER_VERSION], buf)
}
