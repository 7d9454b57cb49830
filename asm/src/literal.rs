/// Parses `0b`/`0o`/`0x` prefixed or signed decimal integer literals.
///
/// Range is not checked here: each instruction field has its own width.
/// Values wider than `i64` are rejected.
pub fn parse_literal(s: &str) -> Option<i64> {
    let (radix, digits) = match s.get(..2) {
        Some("0b") => (2, &s[2..]),
        Some("0o") => (8, &s[2..]),
        Some("0x") => (16, &s[2..]),
        _ => (10, s),
    };
    // from_str_radix accepts a sign; only bare decimal may carry a `-`
    if digits.starts_with('+') || (radix != 10 && digits.starts_with('-')) {
        return None;
    }
    i64::from_str_radix(digits, radix).ok()
}

/// Tokens that were meant as a number, for choosing between literal and label errors.
pub fn looks_numeric(s: &str) -> bool {
    s.starts_with(|c: char| c.is_ascii_digit() || c == '-')
}
