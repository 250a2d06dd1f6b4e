//! Strict numeric parsing
//!
//! These helpers turn text into numbers for [`Value::to_double`] and
//! [`Value::to_int32`], and are shared with text codecs that need the same
//! coercion rules.
//!
//! # Rules
//!
//! Both parsers follow the classic C library conventions:
//!
//! - Empty input parses as zero
//! - Leading whitespace is skipped
//! - A valid numeric prefix may be followed by whitespace only; anything
//!   else after it invalidates the whole parse
//! - An invalid parse yields `NaN` for doubles and `0` for integers
//!
//! "Whitespace" here is the C `isspace` set: space, `\t`, `\n`, `\v`, `\f`
//! and `\r`.
//!
//! # Examples
//!
//! ```rust
//! use leanrpc_core::number::{parse_double, parse_int32};
//!
//! assert_eq!(parse_double("3.14  "), 3.14);
//! assert!(parse_double("3.14x").is_nan());
//! assert_eq!(parse_double(""), 0.0);
//! assert_eq!(parse_int32("0x1F"), 31);
//! assert_eq!(parse_int32("  "), 0);
//! ```
//!
//! [`Value::to_double`]: crate::Value::to_double
//! [`Value::to_int32`]: crate::Value::to_int32

/// C `isspace` in the "C" locale
const fn is_c_space(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | 0x0B | 0x0C | b'\r')
}

fn skip_space(bytes: &[u8], mut pos: usize) -> usize {
    while pos < bytes.len() && is_c_space(bytes[pos]) {
        pos += 1;
    }
    pos
}

fn count_digits(bytes: &[u8], pos: usize, radix: u32) -> usize {
    bytes
        .get(pos..)
        .unwrap_or_default()
        .iter()
        .take_while(|b| char::from(**b).is_digit(radix))
        .count()
}

fn starts_with_ignore_case(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.len() >= needle.len() && haystack[..needle.len()].eq_ignore_ascii_case(needle)
}

fn has_hex_prefix(bytes: &[u8], pos: usize) -> bool {
    matches!(bytes.get(pos..pos + 2), Some([b'0', b'x' | b'X']))
        && bytes.get(pos + 2).is_some_and(u8::is_ascii_hexdigit)
}

/// Parse a string as a double, strictly
///
/// Accepts an optional sign followed by a decimal mantissa (with optional
/// fraction and exponent), a `0x` hexadecimal integer mantissa, or one of
/// `inf`, `infinity`, `nan` in any letter case.
///
/// Returns `0.0` for empty input and `NaN` when the text has no numeric
/// prefix or carries non-whitespace content after it.
pub fn parse_double(text: &str) -> f64 {
    if text.is_empty() {
        return 0.0;
    }
    let bytes = text.as_bytes();
    let start = skip_space(bytes, 0);
    match scan_double(text, start) {
        Some((value, end)) if skip_space(bytes, end) == bytes.len() => value,
        _ => f64::NAN,
    }
}

/// Scan the longest double at `start`, returning it and the end offset.
fn scan_double(text: &str, start: usize) -> Option<(f64, usize)> {
    let bytes = text.as_bytes();
    let mut pos = start;
    let negative = match bytes.get(pos) {
        Some(b'-') => {
            pos += 1;
            true
        }
        Some(b'+') => {
            pos += 1;
            false
        }
        _ => false,
    };
    let signed = |magnitude: f64| if negative { -magnitude } else { magnitude };

    let rest = &bytes[pos..];
    if starts_with_ignore_case(rest, b"infinity") {
        return Some((signed(f64::INFINITY), pos + 8));
    }
    if starts_with_ignore_case(rest, b"inf") {
        return Some((signed(f64::INFINITY), pos + 3));
    }
    if starts_with_ignore_case(rest, b"nan") {
        return Some((f64::NAN, pos + 3));
    }

    if has_hex_prefix(bytes, pos) {
        let digits_start = pos + 2;
        let digits = count_digits(bytes, digits_start, 16);
        let magnitude = text[digits_start..digits_start + digits]
            .chars()
            .filter_map(|c| c.to_digit(16))
            .fold(0.0_f64, |acc, d| acc * 16.0 + f64::from(d));
        return Some((signed(magnitude), digits_start + digits));
    }

    let mantissa_start = pos;
    let int_digits = count_digits(bytes, pos, 10);
    pos += int_digits;
    let mut frac_digits = 0;
    if bytes.get(pos) == Some(&b'.') {
        let digits = count_digits(bytes, pos + 1, 10);
        if int_digits > 0 || digits > 0 {
            pos += 1 + digits;
            frac_digits = digits;
        }
    }
    if int_digits + frac_digits == 0 {
        return None;
    }
    if matches!(bytes.get(pos), Some(b'e' | b'E')) {
        let mut exp = pos + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let digits = count_digits(bytes, exp, 10);
        if digits > 0 {
            pos = exp + digits;
        }
    }

    let magnitude: f64 = text[mantissa_start..pos].parse().ok()?;
    Some((signed(magnitude), pos))
}

/// Parse a string as a 32-bit integer, strictly
///
/// The base is detected from the prefix: `0x`/`0X` selects hexadecimal, a
/// leading `0` selects octal, anything else is decimal. Magnitudes beyond
/// the 64-bit range clamp to it and the result is then narrowed to 32 bits
/// by truncation.
///
/// Returns `0` for empty input, text with no digits, or text carrying
/// non-whitespace content after the number.
pub fn parse_int32(text: &str) -> i32 {
    let bytes = text.as_bytes();
    let start = skip_space(bytes, 0);
    match scan_integer(bytes, start) {
        // Narrowing wraps, like the C long -> int conversion.
        Some((value, end)) if skip_space(bytes, end) == bytes.len() => value as i32,
        _ => 0,
    }
}

fn scan_integer(bytes: &[u8], start: usize) -> Option<(i64, usize)> {
    let mut pos = start;
    let negative = match bytes.get(pos) {
        Some(b'-') => {
            pos += 1;
            true
        }
        Some(b'+') => {
            pos += 1;
            false
        }
        _ => false,
    };

    let (radix, digits_start) = if has_hex_prefix(bytes, pos) {
        (16, pos + 2)
    } else if bytes.get(pos) == Some(&b'0') {
        (8, pos)
    } else {
        (10, pos)
    };

    let limit = i128::from(i64::MAX) + 1;
    let mut magnitude: i128 = 0;
    let mut end = digits_start;
    while let Some(digit) = bytes.get(end).and_then(|b| char::from(*b).to_digit(radix)) {
        magnitude = (magnitude * i128::from(radix) + i128::from(digit)).min(limit);
        end += 1;
    }
    if end == digits_start {
        return None;
    }

    let value = if negative { -magnitude } else { magnitude };
    let clamped = value.clamp(i128::from(i64::MIN), i128::from(i64::MAX));
    Some((clamped as i64, end))
}
