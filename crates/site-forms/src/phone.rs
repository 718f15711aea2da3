//! Phone number formatting.

/// Keep only ASCII digits.
pub fn digits_only(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

/// Format a phone input as the user types.
///
/// - fewer than 4 digits: the digits as-is
/// - 4 to 6 digits: `(AAA) BBB`
/// - 7 or more: `(AAA) BBB-CCCC`, dropping digits past the tenth
///
/// Formatting an already formatted value returns it unchanged.
pub fn format_phone(raw: &str) -> String {
    let digits = digits_only(raw);
    match digits.len() {
        0..4 => digits,
        4..7 => format!("({}) {}", &digits[..3], &digits[3..]),
        _ => {
            let end = digits.len().min(10);
            format!("({}) {}-{}", &digits[..3], &digits[3..6], &digits[6..end])
        }
    }
}
