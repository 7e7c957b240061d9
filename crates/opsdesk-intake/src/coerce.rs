// SPDX-FileCopyrightText: 2026 Opsdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Lenient integer coercion for user-supplied ids.
//!
//! Mirrors leading-integer truncation: the longest numeric prefix of the
//! trimmed input (with an optional sign) is taken, anything after it is
//! ignored, and input with no numeric prefix coerces to 0. Task id 0 never
//! exists, and assignee id 0 means unassigned, so 0 doubles as the "not a
//! number" sentinel.

/// Coerce free text to an integer by leading-prefix truncation.
pub fn coerce_id(text: &str) -> i64 {
    let trimmed = text.trim();
    let (sign, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return 0;
    }
    // Saturate instead of wrapping when the prefix exceeds i64.
    digits.parse::<i64>().map(|n| sign * n).unwrap_or(if sign < 0 {
        i64::MIN
    } else {
        i64::MAX
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_integers() {
        assert_eq!(coerce_id("42"), 42);
        assert_eq!(coerce_id("0"), 0);
        assert_eq!(coerce_id("-7"), -7);
        assert_eq!(coerce_id("+7"), 7);
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        assert_eq!(coerce_id("  42  "), 42);
        assert_eq!(coerce_id("\t3\n"), 3);
    }

    #[test]
    fn trailing_text_is_truncated() {
        assert_eq!(coerce_id("12abc"), 12);
        assert_eq!(coerce_id("42 please"), 42);
        assert_eq!(coerce_id("-3x"), -3);
    }

    #[test]
    fn non_numeric_coerces_to_zero() {
        assert_eq!(coerce_id("abc"), 0);
        assert_eq!(coerce_id(""), 0);
        assert_eq!(coerce_id("   "), 0);
        assert_eq!(coerce_id("x12"), 0);
        assert_eq!(coerce_id("-"), 0);
    }

    #[test]
    fn overlong_prefix_saturates() {
        assert_eq!(coerce_id("99999999999999999999"), i64::MAX);
        assert_eq!(coerce_id("-99999999999999999999"), i64::MIN);
    }
}
