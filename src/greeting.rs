use crate::safe::{TextBuffer, required_capacity, write_status};
use crate::status::Status;

pub const GREETING_PREFIX: &str = "Hello, ";

pub fn greeting(name: &str) -> String {
    let mut out = String::with_capacity(GREETING_PREFIX.len() + name.len());
    out.push_str(GREETING_PREFIX);
    out.push_str(name);
    out
}

/// Capacity needed to hold the greeting for `name`, terminator included.
pub fn greeting_capacity(name: &str) -> usize {
    required_capacity(GREETING_PREFIX.len().saturating_add(name.len()))
}

/// Writes the greeting straight into `buf` without building it on the heap.
pub fn greeting_safe(name: &str, buf: &mut TextBuffer<'_>) -> Status {
    write_status(&[GREETING_PREFIX, name], buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_fixed_template() {
        assert_eq!(greeting("Python"), "Hello, Python");
        assert_eq!(greeting(""), "Hello, ");
    }

    #[test]
    fn capacity_counts_prefix_and_terminator() {
        assert_eq!(greeting_capacity("Python"), 14);
    }

    #[test]
    fn name_fits_but_greeting_does_not() {
        let mut storage = [b'x'; 10];
        let mut buf = TextBuffer::new(&mut storage);
        assert_eq!(greeting_safe("abcde", &mut buf), Status::BufferTooSmall);
        assert_eq!(storage, [b'x'; 10]);
    }

    #[test]
    fn exact_capacity_round_trips() {
        let mut storage = [0u8; 64];
        let mut buf = TextBuffer::with_capacity(&mut storage, greeting_capacity("Python"));
        assert_eq!(greeting_safe("Python", &mut buf), Status::Ok);
        assert_eq!(buf.as_str(), Some("Hello, Python"));
    }
}
