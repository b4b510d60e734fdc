//! Dynamically typed entry point.
//!
//! Hosts that hand over untyped values (command-line arguments, scripting
//! bindings) come through [`invoke`]. Arity and argument types are checked
//! here, before any operation runs, and mismatches become `TypeDomain`.

use crate::arith::{self, Operand, Pair};
use crate::error::{Error, Result};
use crate::greeting;
use crate::safe::TextBuffer;
use crate::status::Status;
use crate::version;
use serde::Serialize;
use std::fmt;
use std::num::IntErrorKind;
use tracing::debug;

/// An argument as received from the host, before any type check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Int(i128),
    /// Integer literal too wide for `i128`, kept as its digits.
    BigInt(String),
    Text(String),
}

impl Value {
    /// Optionally signed runs of ASCII digits become `Int` (or `BigInt` when
    /// they overflow `i128`); everything else is `Text`.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        let digits = trimmed.strip_prefix(['+', '-']).unwrap_or(trimmed);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Self::Text(raw.to_string());
        }
        match trimmed.parse::<i128>() {
            Ok(n) => Self::Int(n),
            Err(e) if matches!(e.kind(), IntErrorKind::PosOverflow | IntErrorKind::NegOverflow) => {
                Self::BigInt(trimmed.to_string())
            }
            Err(_) => Self::Text(raw.to_string()),
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::Int(_) | Self::BigInt(_) => "int",
            Self::Text(_) => "str",
        }
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(v.into())
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Operation {
    Add,
    #[value(alias = "add_safe")]
    AddSafe,
    #[value(alias = "pair_add")]
    PairAdd,
    #[value(alias = "get_version", alias = "version")]
    GetVersion,
    #[value(alias = "get_version_safe", alias = "version-safe")]
    GetVersionSafe,
    Greeting,
    #[value(alias = "greeting_safe")]
    GreetingSafe,
}

impl Operation {
    pub fn name(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::AddSafe => "add_safe",
            Self::PairAdd => "pair_add",
            Self::GetVersion => "get_version",
            Self::GetVersionSafe => "get_version_safe",
            Self::Greeting => "greeting",
            Self::GreetingSafe => "greeting_safe",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Output {
    Int(Operand),
    Text(String),
}

/// Result of a successful boundary call.
///
/// Signaling operations yield `Value`. Safe operations always yield `Safe`,
/// which serializes as a `[status, value]` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Reply {
    Value(Output),
    Safe(Status, Output),
}

impl Reply {
    pub fn status(&self) -> Status {
        match self {
            Self::Value(_) => Status::Ok,
            Self::Safe(status, _) => *status,
        }
    }

    /// Plain text prints bare; everything else as JSON, so safe replies read
    /// as a `[status, value]` array.
    pub fn render(&self) -> serde_json::Result<String> {
        match self {
            Self::Value(Output::Text(text)) => Ok(text.clone()),
            other => serde_json::to_string(other),
        }
    }
}

/// Runs `op` on host-supplied `args`.
///
/// `default_capacity` sizes the output buffer of the safe string operations
/// when the caller does not pass one as a trailing argument.
pub fn invoke(op: Operation, args: &[Value], default_capacity: usize) -> Result<Reply> {
    debug!(op = op.name(), argc = args.len(), "boundary call");
    match op {
        Operation::Add => {
            let [a, b] = operands(op, args)?;
            Ok(Reply::Value(Output::Int(arith::add(a, b)?)))
        }
        Operation::AddSafe => {
            let [a, b] = operands(op, args)?;
            let (status, sum) = arith::add_safe(a, b);
            Ok(Reply::Safe(status, Output::Int(sum)))
        }
        Operation::PairAdd => {
            let [a, b] = operands(op, args)?;
            Ok(Reply::Value(Output::Int(arith::pair_add(&Pair::new(a, b))?)))
        }
        Operation::GetVersion => {
            expect_arity(op, args, 0..=0)?;
            Ok(Reply::Value(Output::Text(version::get_version().to_string())))
        }
        Operation::GetVersionSafe => {
            expect_arity(op, args, 0..=1)?;
            let capacity = capacity_arg(op, args.first(), default_capacity)?;
            let needed = version::version_capacity();
            Ok(bounded_reply(capacity, needed, |buf| {
                version::get_version_safe(buf)
            }))
        }
        Operation::Greeting => {
            expect_arity(op, args, 1..=1)?;
            let name = text(op, &args[0])?;
            Ok(Reply::Value(Output::Text(greeting::greeting(name))))
        }
        Operation::GreetingSafe => {
            expect_arity(op, args, 1..=2)?;
            let name = text(op, &args[0])?;
            let capacity = capacity_arg(op, args.get(1), default_capacity)?;
            let needed = greeting::greeting_capacity(name);
            Ok(bounded_reply(capacity, needed, |buf| {
                greeting::greeting_safe(name, buf)
            }))
        }
    }
}

// The scratch buffer never needs to exceed what a successful write uses, so a
// huge requested capacity does not turn into a huge allocation.
fn bounded_reply<F>(capacity: usize, needed: usize, write: F) -> Reply
where
    F: FnOnce(&mut TextBuffer<'_>) -> Status,
{
    let mut storage = vec![0u8; capacity.min(needed)];
    let mut buf = TextBuffer::with_capacity(&mut storage, capacity);
    let status = write(&mut buf);
    let text = buf.as_str().unwrap_or_default().to_string();
    Reply::Safe(status, Output::Text(text))
}

fn expect_arity(
    op: Operation,
    args: &[Value],
    range: std::ops::RangeInclusive<usize>,
) -> Result<()> {
    if range.contains(&args.len()) {
        return Ok(());
    }
    let expected = if range.start() == range.end() {
        range.start().to_string()
    } else {
        format!("{} to {}", range.start(), range.end())
    };
    Err(Error::type_domain(format!(
        "{op}() takes {expected} arguments ({} given)",
        args.len()
    )))
}

fn operands(op: Operation, args: &[Value]) -> Result<[Operand; 2]> {
    expect_arity(op, args, 2..=2)?;
    Ok([operand(op, &args[0])?, operand(op, &args[1])?])
}

fn operand(op: Operation, value: &Value) -> Result<Operand> {
    match value {
        Value::Int(n) => Operand::try_from(*n).map_err(|_| Error::out_of_range(n)),
        Value::BigInt(digits) => Err(Error::out_of_range(digits)),
        other => Err(Error::type_domain(format!(
            "{op}() expected an int operand, got {}",
            other.kind()
        ))),
    }
}

fn text<'v>(op: Operation, value: &'v Value) -> Result<&'v str> {
    match value {
        Value::Text(s) => Ok(s.as_str()),
        other => Err(Error::type_domain(format!(
            "{op}() expected a str, got {}",
            other.kind()
        ))),
    }
}

fn capacity_arg(op: Operation, value: Option<&Value>, default: usize) -> Result<usize> {
    match value {
        None => Ok(default),
        Some(Value::Int(n)) if *n < 0 => Err(Error::type_domain(format!(
            "{op}() capacity must be non-negative, got {n}"
        ))),
        Some(Value::Int(n)) => usize::try_from(*n).map_err(|_| capacity_too_large(op, n)),
        Some(Value::BigInt(digits)) if digits.starts_with('-') => Err(Error::type_domain(
            format!("{op}() capacity must be non-negative, got {digits}"),
        )),
        Some(Value::BigInt(digits)) => Err(capacity_too_large(op, digits)),
        Some(other) => Err(Error::type_domain(format!(
            "{op}() expected an int capacity, got {}",
            other.kind()
        ))),
    }
}

fn capacity_too_large(op: Operation, value: impl fmt::Display) -> Error {
    Error::type_domain(format!(
        "{op}() capacity {value} exceeds the largest buffer size {}",
        usize::MAX
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_splits_ints_from_text() {
        assert_eq!(Value::parse("-2"), Value::Int(-2));
        assert_eq!(Value::parse("Python"), Value::Text("Python".into()));
        assert_eq!(Value::parse("1.5"), Value::Text("1.5".into()));
        assert_eq!(Value::parse("+7"), Value::Int(7));
        assert_eq!(Value::parse("-"), Value::Text("-".into()));
        assert_eq!(Value::parse("12a"), Value::Text("12a".into()));
    }

    #[test]
    fn parse_keeps_integers_wider_than_i128() {
        let wide = format!("1{}", "0".repeat(40));
        assert_eq!(Value::parse(&wide), Value::BigInt(wide.clone()));
        let negative = format!("-{wide}");
        assert_eq!(Value::parse(&negative), Value::BigInt(negative.clone()));
    }

    #[test]
    fn safe_reply_serializes_as_pair() {
        let reply = Reply::Safe(Status::Ok, Output::Int(5));
        assert_eq!(serde_json::to_string(&reply).unwrap(), "[0,5]");
        let reply = Reply::Safe(Status::BufferTooSmall, Output::Text(String::new()));
        assert_eq!(serde_json::to_string(&reply).unwrap(), r#"[3,""]"#);
    }

    #[test]
    fn huge_capacity_is_not_allocated() {
        let reply = invoke(Operation::GetVersionSafe, &[Value::Int(1 << 40)], 0).unwrap();
        assert_eq!(
            reply,
            Reply::Safe(Status::Ok, Output::Text(version::ADDER_VERSION.into()))
        );
    }

    #[test]
    fn negative_capacity_is_a_type_error() {
        let err = invoke(Operation::GetVersionSafe, &[Value::Int(-1)], 64).unwrap_err();
        assert_eq!(err.status(), Status::TypeDomain);
        assert!(err.to_string().contains("non-negative"), "{err}");
    }

    #[test]
    fn oversized_capacity_is_reported_as_too_large() {
        let err = invoke(Operation::GetVersionSafe, &[Value::Int(1 << 100)], 64).unwrap_err();
        assert_eq!(err.status(), Status::TypeDomain);
        let msg = err.to_string();
        assert!(msg.contains("exceeds the largest buffer size"), "{msg}");
        assert!(!msg.contains("non-negative"), "{msg}");

        let wide = Value::parse(&"9".repeat(50));
        let err = invoke(Operation::GreetingSafe, &["Python".into(), wide], 64).unwrap_err();
        assert!(err.to_string().contains("exceeds the largest buffer size"), "{err}");
    }

    #[test]
    fn plain_text_renders_bare_and_the_rest_as_json() {
        let reply = Reply::Value(Output::Text("Hello, Python".into()));
        assert_eq!(reply.render().unwrap(), "Hello, Python");
        assert_eq!(Reply::Value(Output::Int(7)).render().unwrap(), "7");
        let reply = Reply::Safe(Status::Ok, Output::Text("v1.0".into()));
        assert_eq!(reply.render().unwrap(), r#"[0,"v1.0"]"#);
        let reply = Reply::Safe(Status::InvalidOperand, Output::Int(0));
        assert_eq!(reply.render().unwrap(), "[2,0]");
    }
}
