use crate::status::Status;
use thiserror::Error;

/// Failures raised by the signaling form of each operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("Overflow: {a} + {b} is outside the 32-bit signed range")]
    Overflow { a: i128, b: i128 },

    #[error("Overflow: {value} does not fit in a 32-bit signed operand")]
    OutOfRange { value: String },

    #[error("Invalid operand: {operand} is negative")]
    InvalidOperand { operand: i32 },

    #[error("Buffer too small: need {required} bytes, capacity is {capacity}")]
    BufferTooSmall { required: usize, capacity: usize },

    #[error("Type error: {0}")]
    TypeDomain(String),
}

impl Error {
    pub fn overflow(a: impl Into<i128>, b: impl Into<i128>) -> Self {
        Self::Overflow {
            a: a.into(),
            b: b.into(),
        }
    }

    pub fn out_of_range(value: impl ToString) -> Self {
        Self::OutOfRange {
            value: value.to_string(),
        }
    }

    pub fn type_domain(msg: impl Into<String>) -> Self {
        Self::TypeDomain(msg.into())
    }

    /// The status code the safe-return convention reports for this failure.
    pub fn status(&self) -> Status {
        match self {
            Self::Overflow { .. } | Self::OutOfRange { .. } => Status::Overflow,
            Self::InvalidOperand { .. } => Status::InvalidOperand,
            Self::BufferTooSmall { .. } => Status::BufferTooSmall,
            Self::TypeDomain(_) => Status::TypeDomain,
        }
    }
}

impl From<&Error> for Status {
    fn from(err: &Error) -> Self {
        err.status()
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_variant_maps_to_a_failure_status() {
        let errors = [
            Error::overflow(i32::MAX, 1),
            Error::out_of_range(1_i128 << 40),
            Error::InvalidOperand { operand: -2 },
            Error::BufferTooSmall {
                required: 5,
                capacity: 2,
            },
            Error::type_domain("expected an integer"),
        ];
        let statuses: Vec<Status> = errors.iter().map(Status::from).collect();
        assert_eq!(
            statuses,
            vec![
                Status::Overflow,
                Status::Overflow,
                Status::InvalidOperand,
                Status::BufferTooSmall,
                Status::TypeDomain
            ]
        );
    }

    #[test]
    fn display_names_the_operands() {
        let msg = Error::overflow(i32::MAX, 1).to_string();
        assert!(msg.contains("2147483647"), "{msg}");
    }
}
