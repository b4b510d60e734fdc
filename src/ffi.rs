//! C ABI.
//!
//! Only the safe-return convention crosses this boundary. Every function
//! reports failure through its `c_int` status, never by unwinding, and the
//! status codes are the ones defined by [`Status`].
//!
//! Pointer arguments are validated before use: a null pointer where data is
//! required, or a name that is not valid UTF-8, yields `TypeDomain`.

use crate::arith::{self, Operand, Pair};
use crate::greeting;
use crate::safe::TextBuffer;
use crate::status::Status;
use crate::version;
use std::ffi::{CStr, c_char, c_int};
use tracing::warn;

/// Adds two operands, reporting overflow as a status. `*sum` is 0 on failure.
///
/// # Safety
///
/// `sum` must be null or valid for a write of one `i32`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn adder_add(a: Operand, b: Operand, sum: *mut Operand) -> c_int {
    unsafe { store(sum, arith::add_checked(a, b), "adder_add") }
}

/// Adds two non-negative operands. `*sum` is 0 on failure.
///
/// # Safety
///
/// `sum` must be null or valid for a write of one `i32`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn adder_add_safe(a: Operand, b: Operand, sum: *mut Operand) -> c_int {
    unsafe { store(sum, arith::add_safe(a, b), "adder_add_safe") }
}

/// Adds the two fields of `pair`. `*sum` is 0 on failure.
///
/// # Safety
///
/// `pair` must be null or point to a valid `Pair`; `sum` must be null or
/// valid for a write of one `i32`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn adder_pair_add(pair: *const Pair, sum: *mut Operand) -> c_int {
    let Some(pair) = (unsafe { pair.as_ref() }) else {
        warn!(func = "adder_pair_add", "null pair pointer");
        return Status::TypeDomain.code();
    };
    unsafe { store(sum, arith::pair_add_checked(pair), "adder_pair_add") }
}

/// Returns the version as a static NUL-terminated string. Never free it.
#[unsafe(no_mangle)]
pub extern "C" fn adder_get_version() -> *const c_char {
    version::ADDER_VERSION_CSTR.as_ptr()
}

#[unsafe(no_mangle)]
pub extern "C" fn adder_version_capacity() -> usize {
    version::version_capacity()
}

/// Copies the version into `output`.
///
/// # Safety
///
/// `output` must be null or valid for reads and writes of `capacity` bytes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn adder_get_version_safe(output: *mut c_char, capacity: usize) -> c_int {
    unsafe {
        with_buffer(output, capacity, "adder_get_version_safe", |buf| {
            version::get_version_safe(buf)
        })
    }
}

/// Writes `"Hello, " + name` into `output`.
///
/// Passing a null `output` with `capacity` 0 is a size query: the call returns
/// `BufferTooSmall` and [`adder_greeting_capacity`] gives the size to allocate.
///
/// # Safety
///
/// `name` must be null or a NUL-terminated string. `output` must be null or
/// valid for reads and writes of `capacity` bytes. `name` and `output` must
/// not overlap.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn adder_greeting_safe(
    name: *const c_char,
    output: *mut c_char,
    capacity: usize,
) -> c_int {
    let Some(name) = (unsafe { name_arg(name, "adder_greeting_safe") }) else {
        return Status::TypeDomain.code();
    };
    unsafe {
        with_buffer(output, capacity, "adder_greeting_safe", |buf| {
            greeting::greeting_safe(name, buf)
        })
    }
}

/// Capacity [`adder_greeting_safe`] needs for `name`, or 0 if `name` is invalid.
///
/// # Safety
///
/// `name` must be null or a NUL-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn adder_greeting_capacity(name: *const c_char) -> usize {
    let name = unsafe { name_arg(name, "adder_greeting_capacity") };
    name.map(greeting::greeting_capacity).unwrap_or(0)
}

/// Static description of a status code.
#[unsafe(no_mangle)]
pub extern "C" fn adder_status_message(code: c_int) -> *const c_char {
    status_cstr(code).as_ptr()
}

fn status_cstr(code: c_int) -> &'static CStr {
    Status::try_from(code)
        .map(Status::message_cstr)
        .unwrap_or(c"unknown status")
}

unsafe fn store(out: *mut Operand, (status, value): (Status, Operand), func: &str) -> c_int {
    if out.is_null() {
        warn!(func, "null result pointer");
        return Status::TypeDomain.code();
    }
    unsafe { out.write(value) };
    status.code()
}

unsafe fn name_arg<'a>(name: *const c_char, func: &str) -> Option<&'a str> {
    if name.is_null() {
        warn!(func, "null name pointer");
        return None;
    }
    let name = unsafe { CStr::from_ptr(name) };
    match name.to_str() {
        Ok(name) => Some(name),
        Err(e) => {
            warn!(func, error = %e, "name is not valid UTF-8");
            None
        }
    }
}

unsafe fn with_buffer<F>(output: *mut c_char, capacity: usize, func: &str, write: F) -> c_int
where
    F: FnOnce(&mut TextBuffer<'_>) -> Status,
{
    if output.is_null() {
        if capacity == 0 {
            return Status::BufferTooSmall.code();
        }
        warn!(func, capacity, "null output buffer");
        return Status::TypeDomain.code();
    }
    let bytes = unsafe { std::slice::from_raw_parts_mut(output.cast::<u8>(), capacity) };
    write(&mut TextBuffer::new(bytes)).code()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_agree_with_status() {
        for status in Status::ALL {
            assert_eq!(status_cstr(status.code()).to_str(), Ok(status.message()));
        }
        assert_eq!(status_cstr(42), c"unknown status");
    }
}
