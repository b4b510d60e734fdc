use serde::{Serialize, Serializer};
use std::ffi::CStr;
use std::fmt;

/// Status code returned by every safe-return operation.
///
/// `Ok` is the only success value. Each failure kind has exactly one code and
/// that code means the same thing for every operation that can produce it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum Status {
    Ok = 0,
    Overflow = 1,
    InvalidOperand = 2,
    BufferTooSmall = 3,
    TypeDomain = 4,
}

impl Status {
    pub const ALL: [Status; 5] = [
        Self::Ok,
        Self::Overflow,
        Self::InvalidOperand,
        Self::BufferTooSmall,
        Self::TypeDomain,
    ];

    pub const fn code(self) -> i32 {
        self as i32
    }

    pub const fn is_ok(self) -> bool {
        matches!(self, Self::Ok)
    }

    /// Static NUL-terminated description, shared with the C ABI.
    pub const fn message_cstr(self) -> &'static CStr {
        match self {
            Self::Ok => c"success",
            Self::Overflow => c"arithmetic overflow",
            Self::InvalidOperand => c"invalid operand",
            Self::BufferTooSmall => c"buffer too small",
            Self::TypeDomain => c"argument type or arity mismatch",
        }
    }

    pub fn message(self) -> &'static str {
        // The literals above are ASCII.
        self.message_cstr().to_str().unwrap_or_default()
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message(), self.code())
    }
}

impl TryFrom<i32> for Status {
    type Error = i32;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|s| s.code() == code)
            .ok_or(code)
    }
}

impl From<Status> for i32 {
    fn from(status: Status) -> Self {
        status.code()
    }
}

impl Serialize for Status {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i32(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_distinct_and_only_ok_is_zero() {
        let codes: Vec<i32> = Status::ALL.iter().map(|s| s.code()).collect();
        for (i, a) in codes.iter().enumerate() {
            for b in &codes[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert_eq!(Status::Ok.code(), 0);
        assert!(Status::ALL[1..].iter().all(|s| s.code() > 0 && !s.is_ok()));
    }

    #[test]
    fn try_from_round_trips_known_codes() {
        for status in Status::ALL {
            assert_eq!(Status::try_from(status.code()), Ok(status));
        }
        assert_eq!(Status::try_from(99), Err(99));
        assert_eq!(Status::try_from(-1), Err(-1));
    }

    #[test]
    fn messages_are_nonempty_and_match_their_cstr() {
        for status in Status::ALL {
            assert!(!status.message().is_empty());
            assert_eq!(status.message().as_bytes(), status.message_cstr().to_bytes());
        }
        assert_eq!(Status::BufferTooSmall.message(), "buffer too small");
    }

    #[test]
    fn serializes_as_numeric_code() {
        let json = serde_json::to_string(&Status::BufferTooSmall).unwrap();
        assert_eq!(json, "3");
    }
}
