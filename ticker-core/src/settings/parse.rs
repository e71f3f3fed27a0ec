//! Textual value conversion
//!
//! Settings files and form submissions carry every value as text. Parsing
//! never fails: malformed input degrades to a default instead.

/// Texts accepted as `true` (compared case-insensitively)
const TRUE_WORDS: [&str; 4] = ["true", "1", "yes", "on"];

/// Parse an integer the lenient way
///
/// Skips leading whitespace, accepts one optional sign and then as many
/// decimal digits as follow. Anything after the digits is ignored. No
/// digits at all gives 0. Values outside `i32` saturate.
pub fn parse_int(text: &str) -> i32 {
    let text = text.trim_start();
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    // One past i32::MAX so that i32::MIN is still reachable
    const LIMIT: i64 = i32::MAX as i64 + 1;
    let mut value: i64 = 0;
    for digit in digits.bytes().take_while(u8::is_ascii_digit) {
        value = (value * 10 + i64::from(digit - b'0')).min(LIMIT);
    }

    let value = if negative { -value } else { value };
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// Parse a boolean: `true`, `1`, `yes` or `on` in any case, else false
pub fn parse_bool(text: &str) -> bool {
    let text = text.trim();
    TRUE_WORDS.iter().any(|word| text.eq_ignore_ascii_case(word))
}

/// Textual form of a boolean in settings files
pub fn format_bool(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

/// Byte length of the first `max_chars` characters of `text`
///
/// Returns `None` if `text` is not longer than that.
pub fn char_boundary(text: &str, max_chars: usize) -> Option<usize> {
    text.char_indices().nth(max_chars).map(|(index, _)| index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::string::ToString;

    #[test]
    fn test_parse_int_plain() {
        assert_eq!(parse_int("42"), 42);
        assert_eq!(parse_int("-17"), -17);
        assert_eq!(parse_int("+8"), 8);
        assert_eq!(parse_int("0"), 0);
    }

    #[test]
    fn test_parse_int_lenient() {
        assert_eq!(parse_int("  15 minutes"), 15);
        assert_eq!(parse_int("4.5"), 4);
        assert_eq!(parse_int("abc"), 0);
        assert_eq!(parse_int(""), 0);
        assert_eq!(parse_int("-"), 0);
        assert_eq!(parse_int("--3"), 0);
    }

    #[test]
    fn test_parse_int_saturates() {
        assert_eq!(parse_int("99999999999999999999"), i32::MAX);
        assert_eq!(parse_int("-99999999999999999999"), i32::MIN);
        assert_eq!(parse_int("-2147483648"), i32::MIN);
        assert_eq!(parse_int("2147483648"), i32::MAX);
    }

    #[test]
    fn test_parse_bool() {
        for yes in ["true", "TRUE", "1", "yes", "Yes", "on", "On", " on "] {
            assert!(parse_bool(yes), "{yes}");
        }
        for no in ["false", "0", "no", "off", "", "2", "enabled"] {
            assert!(!parse_bool(no), "{no}");
        }
    }

    #[test]
    fn test_char_boundary() {
        assert_eq!(char_boundary("hello", 10), None);
        assert_eq!(char_boundary("hello", 5), None);
        assert_eq!(char_boundary("hello", 3), Some(3));
        assert_eq!(char_boundary("héllo", 2), Some(3));
    }

    proptest! {
        #[test]
        fn prop_parse_int_matches_std(n in any::<i32>()) {
            prop_assert_eq!(parse_int(&n.to_string()), n);
        }

        #[test]
        fn prop_parse_int_never_panics(text in ".*") {
            let _ = parse_int(&text);
        }
    }
}
