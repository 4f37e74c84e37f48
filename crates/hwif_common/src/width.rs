//! Bit-width arithmetic for derived signal widths.

/// Returns the number of bits needed to represent `value` as an unsigned number.
///
/// The width of 0 is 0.
pub fn bits_for_value(value: u64) -> u32 {
    u64::BITS - value.leading_zeros()
}

/// Returns `ceil(log2(count))`, the number of bits needed to index `count`
/// distinct values.
///
/// Counts of 0 and 1 need no bits.
pub fn bits_for_count(count: u64) -> u32 {
    if count <= 1 {
        0
    } else {
        bits_for_value(count - 1)
    }
}

/// Returns `true` if `s` is non-empty and consists only of ASCII decimal digits.
pub fn is_digit_string(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_widths() {
        assert_eq!(bits_for_value(0), 0);
        assert_eq!(bits_for_value(1), 1);
        assert_eq!(bits_for_value(2), 2);
        assert_eq!(bits_for_value(3), 2);
        assert_eq!(bits_for_value(4), 3);
        assert_eq!(bits_for_value(255), 8);
        assert_eq!(bits_for_value(256), 9);
        assert_eq!(bits_for_value(u64::MAX), 64);
    }

    #[test]
    fn count_widths() {
        assert_eq!(bits_for_count(0), 0);
        assert_eq!(bits_for_count(1), 0);
        assert_eq!(bits_for_count(2), 1);
        assert_eq!(bits_for_count(3), 2);
        assert_eq!(bits_for_count(4), 2);
        assert_eq!(bits_for_count(5), 3);
        assert_eq!(bits_for_count(1024), 10);
    }

    #[test]
    fn digit_strings() {
        assert!(is_digit_string("0"));
        assert!(is_digit_string("32"));
        assert!(!is_digit_string(""));
        assert!(!is_digit_string("12a"));
        assert!(!is_digit_string("-3"));
        assert!(!is_digit_string("WIDTH_D"));
    }
}
