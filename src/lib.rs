//! Checked addition, version query and greeting formatting, each offered in two
//! calling conventions.
//!
//! The signaling form returns [`Result`] and fails with an [`Error`]. The
//! safe-return form never fails out of band: it returns a [`Status`] next to
//! its value, or writes text into a caller-owned [`TextBuffer`] and touches the
//! buffer only on success. The [`ffi`] module exposes the safe-return form over
//! the C ABI, and [`boundary`] adds arity and type checks for dynamically typed
//! callers.

pub mod arith;
pub mod boundary;
pub mod config;
pub mod error;
pub mod ffi;
pub mod greeting;
pub mod safe;
pub mod status;
pub mod version;

pub use arith::{Operand, Pair, add, add_safe, pair_add};
pub use error::{Error, Result};
pub use greeting::{greeting, greeting_capacity, greeting_safe};
pub use safe::TextBuffer;
pub use status::Status;
pub use version::{ADDER_VERSION, get_version, get_version_safe, version_capacity};
