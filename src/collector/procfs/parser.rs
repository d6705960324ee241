//! Parsers for `/proc/interrupts`.
//!
//! These are pure functions over string input. They are designed to be
//! easily testable without a filesystem.

use tracing::warn;

/// One data row of `/proc/interrupts`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterruptRecord<'a> {
    /// Interrupt name with the trailing colon removed (`"0"`, `"NMI"`).
    pub name: &'a str,
    /// Remaining whitespace-separated fields: per-CPU counts, then the
    /// optional controller/device description.
    pub fields: Vec<&'a str>,
}

/// Parses one line of `/proc/interrupts`.
///
/// Returns `None` for anything that is not a record: blank lines, lines with
/// fewer than two fields, and lines whose first field does not end in `:`
/// (the `CPU0 CPU1 ...` header).
pub fn parse_interrupt_line(line: &str) -> Option<InterruptRecord<'_>> {
    let mut parts = line.split_whitespace();
    let first = parts.next()?;
    let fields: Vec<&str> = parts.collect();
    if fields.is_empty() {
        return None;
    }

    let name = first.strip_suffix(':')?;
    if name.is_empty() {
        return None;
    }

    Some(InterruptRecord { name, fields })
}

/// Truncates `name` to at most `limit` bytes on a char boundary.
pub fn truncate_name(name: &str, limit: usize) -> &str {
    if name.len() <= limit {
        return name;
    }
    let mut end = limit;
    while !name.is_char_boundary(end) {
        end -= 1;
    }
    &name[..end]
}

/// Result of a C-style integer parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedInt {
    pub value: i64,
    /// Bytes of the input consumed by the number, including leading
    /// whitespace, sign and radix prefix.
    pub consumed: usize,
}

impl ParsedInt {
    /// Returns true when the whole token was numeric.
    pub fn is_complete(&self, token: &str) -> bool {
        self.consumed == token.len()
    }
}

/// Parses a leading integer with base auto-detection.
///
/// Accepts optional leading whitespace, an optional sign, then `0x`/`0X`
/// hexadecimal, a leading `0` for octal, or decimal. The longest valid
/// prefix is used; magnitudes outside `i64` saturate. Returns `None` when no
/// digit was consumed.
pub fn parse_c_integer(token: &str) -> Option<ParsedInt> {
    let bytes = token.as_bytes();
    let mut pos = 0;

    while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
        pos += 1;
    }

    let mut negative = false;
    if pos < bytes.len() && (bytes[pos] == b'+' || bytes[pos] == b'-') {
        negative = bytes[pos] == b'-';
        pos += 1;
    }

    let radix = if bytes.get(pos) == Some(&b'0')
        && matches!(bytes.get(pos + 1), Some(b'x') | Some(b'X'))
        && bytes.get(pos + 2).is_some_and(|b| b.is_ascii_hexdigit())
    {
        pos += 2;
        16
    } else if bytes.get(pos) == Some(&b'0') {
        8
    } else {
        10
    };

    let digits_start = pos;
    let mut magnitude: u64 = 0;
    let mut overflow = false;
    while let Some(digit) = bytes.get(pos).and_then(|b| (*b as char).to_digit(radix)) {
        match magnitude
            .checked_mul(radix as u64)
            .and_then(|m| m.checked_add(digit as u64))
        {
            Some(m) => magnitude = m,
            None => overflow = true,
        }
        pos += 1;
    }

    if pos == digits_start {
        return None;
    }

    let value = if negative {
        if overflow || magnitude > i64::MIN.unsigned_abs() {
            i64::MIN
        } else {
            0i64.wrapping_sub_unsigned(magnitude)
        }
    } else if overflow || magnitude > i64::MAX as u64 {
        i64::MAX
    } else {
        magnitude as i64
    };

    Some(ParsedInt {
        value,
        consumed: pos,
    })
}

/// Sums the per-CPU fields of a record into one counter.
///
/// Stops at the first field without a leading number; everything from that
/// field on (typically the controller and device names) is ignored. A field
/// with trailing characters after its number still counts, with a warning.
/// The sum wraps on overflow.
pub fn aggregate(fields: &[&str]) -> i64 {
    let mut total: i64 = 0;

    for field in fields {
        let Some(parsed) = parse_c_integer(field) else {
            break;
        };
        if !parsed.is_complete(field) {
            warn!(
                "Ignoring trailing garbage after number: {}",
                &field[parsed.consumed..]
            );
        }
        total = total.wrapping_add(parsed.value);
    }

    total
}
