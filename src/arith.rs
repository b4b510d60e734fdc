//! Checked 32-bit addition in both calling conventions.

use crate::error::{Error, Result};
use crate::safe::settle;
use crate::status::Status;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Fixed-width signed input to every arithmetic operation.
pub type Operand = i32;

/// Two operands passed as a single value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[repr(C)]
pub struct Pair {
    pub a: Operand,
    pub b: Operand,
}

impl Pair {
    pub const fn new(a: Operand, b: Operand) -> Self {
        Self { a, b }
    }
}

impl From<(Operand, Operand)> for Pair {
    fn from((a, b): (Operand, Operand)) -> Self {
        Self { a, b }
    }
}

pub fn add(a: Operand, b: Operand) -> Result<Operand> {
    a.checked_add(b).ok_or_else(|| Error::overflow(a, b))
}

pub fn pair_add(pair: &Pair) -> Result<Operand> {
    add(pair.a, pair.b)
}

/// Restricted addition: both operands must be non-negative.
///
/// The negative-operand check runs before the sum is computed, so a negative
/// operand is reported as `InvalidOperand` even when the sum would overflow.
/// Overflow of two non-negative operands is reported as `Overflow`.
pub fn add_non_negative(a: Operand, b: Operand) -> Result<Operand> {
    if let Some(operand) = [a, b].into_iter().find(|v| *v < 0) {
        debug!(a, b, operand, "rejected negative operand");
        return Err(Error::InvalidOperand { operand });
    }
    add(a, b)
}

/// Safe-return form of [`add_non_negative`]. The sum is 0 on any failure.
pub fn add_safe(a: Operand, b: Operand) -> (Status, Operand) {
    settle(add_non_negative(a, b))
}

/// Safe-return form of [`add`]: no sign restriction, overflow reported as a status.
pub fn add_checked(a: Operand, b: Operand) -> (Status, Operand) {
    settle(add(a, b))
}

pub fn pair_add_checked(pair: &Pair) -> (Status, Operand) {
    settle(pair_add(pair))
}
