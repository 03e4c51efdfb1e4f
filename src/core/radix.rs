//! Purpose: Parse integer literals in an explicit radix with arbitrary precision.
//! Exports: `RadixParser`, `parse_int`, `ParseIntError`, `ParseIntErrorKind`, `DEFAULT_MAX_STR_DIGITS`.
//! Role: The only integer grammar in the crate; the converter and base coercion share it.
//! Invariants: Accepted radixes are 0 (infer from prefix) and 2..=36; anything else is rejected.
//! Invariants: Surrounding whitespace, one sign, an optional matching prefix and single
//! Invariants: underscores between digits are tolerated; nothing else is.
//! Invariants: Parsing never panics and never truncates; results are `BigInt`.

use std::error::Error as StdError;
use std::fmt;

use num_bigint::BigInt;
use num_traits::Num;

/// Digit-count ceiling for radixes that are not powers of two.
pub const DEFAULT_MAX_STR_DIGITS: usize = 4300;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ParseIntErrorKind {
    InvalidBase,
    Empty,
    InvalidDigit,
    InvalidUnderscore,
    LeadingZero,
    TooManyDigits,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseIntError {
    kind: ParseIntErrorKind,
}

impl ParseIntError {
    fn new(kind: ParseIntErrorKind) -> Self {
        Self { kind }
    }

    pub fn kind(&self) -> ParseIntErrorKind {
        self.kind
    }
}

impl fmt::Display for ParseIntError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self.kind {
            ParseIntErrorKind::InvalidBase => "base must be 0 or between 2 and 36",
            ParseIntErrorKind::Empty => "no digits to parse",
            ParseIntErrorKind::InvalidDigit => "invalid digit for radix",
            ParseIntErrorKind::InvalidUnderscore => "underscore must separate two digits",
            ParseIntErrorKind::LeadingZero => "leading zeros need an explicit radix prefix",
            ParseIntErrorKind::TooManyDigits => "digit count exceeds the configured limit",
        };
        f.write_str(text)
    }
}

impl StdError for ParseIntError {}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RadixParser {
    max_str_digits: usize,
}

impl Default for RadixParser {
    fn default() -> Self {
        Self::new()
    }
}

impl RadixParser {
    pub fn new() -> Self {
        Self {
            max_str_digits: DEFAULT_MAX_STR_DIGITS,
        }
    }

    /// `0` disables the digit-count guard.
    pub fn with_max_str_digits(mut self, max_str_digits: usize) -> Self {
        self.max_str_digits = max_str_digits;
        self
    }

    pub fn max_str_digits(&self) -> usize {
        self.max_str_digits
    }

    pub fn parse(&self, text: &str, base: i64) -> Result<BigInt, ParseIntError> {
        let requested = match base {
            0 => None,
            2..=36 => Some(base as u32),
            _ => return Err(ParseIntError::new(ParseIntErrorKind::InvalidBase)),
        };

        let body = text.trim_matches(char::is_whitespace);
        let (negative, body) = split_sign(body);
        let literal = split_prefix(body, requested);
        let digits = collect_digits(literal.digits, literal.radix, literal.prefixed)?;

        if requested.is_none() && !literal.prefixed && has_leading_zero(&digits) {
            return Err(ParseIntError::new(ParseIntErrorKind::LeadingZero));
        }
        if self.max_str_digits > 0
            && !literal.radix.is_power_of_two()
            && digits.len() > self.max_str_digits
        {
            return Err(ParseIntError::new(ParseIntErrorKind::TooManyDigits));
        }

        let magnitude = BigInt::from_str_radix(&digits, literal.radix)
            .map_err(|_| ParseIntError::new(ParseIntErrorKind::InvalidDigit))?;
        Ok(if negative { -magnitude } else { magnitude })
    }
}

/// Parses with the default digit-count guard.
pub fn parse_int(text: &str, base: i64) -> Result<BigInt, ParseIntError> {
    RadixParser::new().parse(text, base)
}

struct Literal<'a> {
    radix: u32,
    digits: &'a str,
    prefixed: bool,
}

fn split_sign(body: &str) -> (bool, &str) {
    if let Some(rest) = body.strip_prefix('-') {
        (true, rest)
    } else if let Some(rest) = body.strip_prefix('+') {
        (false, rest)
    } else {
        (false, body)
    }
}

fn split_prefix(body: &str, requested: Option<u32>) -> Literal<'_> {
    let bytes = body.as_bytes();
    let prefix_radix = match bytes {
        [b'0', marker, ..] => match marker.to_ascii_lowercase() {
            b'x' => Some(16),
            b'o' => Some(8),
            b'b' => Some(2),
            _ => None,
        },
        _ => None,
    };

    match (prefix_radix, requested) {
        (Some(radix), None) => Literal {
            radix,
            digits: &body[2..],
            prefixed: true,
        },
        (Some(radix), Some(requested)) if radix == requested => Literal {
            radix,
            digits: &body[2..],
            prefixed: true,
        },
        (_, requested) => Literal {
            radix: requested.unwrap_or(10),
            digits: body,
            prefixed: false,
        },
    }
}

fn collect_digits(raw: &str, radix: u32, prefixed: bool) -> Result<String, ParseIntError> {
    let mut digits = String::with_capacity(raw.len());
    let mut underscore_allowed = prefixed;
    let mut trailing_underscore = false;

    for c in raw.chars() {
        if c == '_' {
            if !underscore_allowed {
                return Err(ParseIntError::new(ParseIntErrorKind::InvalidUnderscore));
            }
            underscore_allowed = false;
            trailing_underscore = true;
            continue;
        }
        match c.to_digit(36) {
            Some(value) if value < radix => digits.push(c),
            _ => return Err(ParseIntError::new(ParseIntErrorKind::InvalidDigit)),
        }
        underscore_allowed = true;
        trailing_underscore = false;
    }

    if trailing_underscore {
        return Err(ParseIntError::new(ParseIntErrorKind::InvalidUnderscore));
    }
    if digits.is_empty() {
        return Err(ParseIntError::new(ParseIntErrorKind::Empty));
    }
    Ok(digits)
}

fn has_leading_zero(digits: &str) -> bool {
    digits.starts_with('0') && digits.bytes().any(|b| b != b'0')
}

#[cfg(test)]
mod tests {
    use super::{ParseIntErrorKind, RadixParser, parse_int};
    use num_bigint::BigInt;

    fn value(text: &str, base: i64) -> String {
        parse_int(text, base).expect("parse").to_string()
    }

    fn failure(text: &str, base: i64) -> ParseIntErrorKind {
        parse_int(text, base).unwrap_err().kind()
    }

    #[test]
    fn decimal_tolerates_whitespace_and_sign() {
        assert_eq!(value(" 42 ", 10), "42");
        assert_eq!(value("-7", 10), "-7");
        assert_eq!(value("+7", 10), "7");
        assert_eq!(value("\t\n 0009\r", 10), "9");
        assert_eq!(value("\u{a0}5\u{2003}", 10), "5");
        assert_eq!(failure("\u{1c}5", 10), ParseIntErrorKind::InvalidDigit);
        assert_eq!(failure("7\u{1f}", 10), ParseIntErrorKind::InvalidDigit);
    }

    #[test]
    fn digits_above_nine_use_letters_in_either_case() {
        assert_eq!(value("ff", 16), "255");
        assert_eq!(value("FF", 16), "255");
        assert_eq!(value("101", 2), "5");
        assert_eq!(value("z", 36), "35");
        assert_eq!(value("Zz", 36), "1295");
        assert_eq!(value("-10", 2), "-2");
    }

    #[test]
    fn digits_outside_radix_are_rejected() {
        assert_eq!(failure("12", 2), ParseIntErrorKind::InvalidDigit);
        assert_eq!(failure("xyz", 10), ParseIntErrorKind::InvalidDigit);
        assert_eq!(failure("g", 16), ParseIntErrorKind::InvalidDigit);
        assert_eq!(failure("1.5", 10), ParseIntErrorKind::InvalidDigit);
        assert_eq!(failure("- 5", 10), ParseIntErrorKind::InvalidDigit);
        assert_eq!(failure("+-5", 10), ParseIntErrorKind::InvalidDigit);
        assert_eq!(failure("1 2", 10), ParseIntErrorKind::InvalidDigit);
    }

    #[test]
    fn non_ascii_decimal_digits_are_rejected_in_every_radix() {
        for base in [0, 2, 10, 16, 36] {
            assert_eq!(failure("\u{0663}", base), ParseIntErrorKind::InvalidDigit);
            assert_eq!(failure("1\u{0661}", base), ParseIntErrorKind::InvalidDigit);
            assert_eq!(failure("\u{ff11}", base), ParseIntErrorKind::InvalidDigit);
        }
    }

    #[test]
    fn empty_bodies_are_rejected() {
        assert_eq!(failure("", 10), ParseIntErrorKind::Empty);
        assert_eq!(failure("   ", 10), ParseIntErrorKind::Empty);
        assert_eq!(failure("-", 10), ParseIntErrorKind::Empty);
        assert_eq!(failure("0x", 16), ParseIntErrorKind::Empty);
        assert_eq!(failure("0b", 0), ParseIntErrorKind::Empty);
    }

    #[test]
    fn base_outside_supported_range_is_rejected() {
        for base in [1, 37, -5, i64::MAX, i64::MIN] {
            assert_eq!(failure("1", base), ParseIntErrorKind::InvalidBase);
        }
    }

    #[test]
    fn base_zero_infers_radix_from_prefix() {
        assert_eq!(value("0x1f", 0), "31");
        assert_eq!(value("0X1F", 0), "31");
        assert_eq!(value("0o17", 0), "15");
        assert_eq!(value("0b101", 0), "5");
        assert_eq!(value("-0b101", 0), "-5");
        assert_eq!(value("123", 0), "123");
        assert_eq!(value("0", 0), "0");
        assert_eq!(value("000", 0), "0");
        assert_eq!(value("0_0", 0), "0");
    }

    #[test]
    fn base_zero_rejects_ambiguous_leading_zero() {
        assert_eq!(failure("010", 0), ParseIntErrorKind::LeadingZero);
        assert_eq!(failure("0_7", 0), ParseIntErrorKind::LeadingZero);
        assert_eq!(value("010", 10), "10");
    }

    #[test]
    fn matching_prefix_is_optional_for_explicit_radix() {
        assert_eq!(value("0x1f", 16), "31");
        assert_eq!(value("0o17", 8), "15");
        assert_eq!(value("0b11", 2), "3");
        // `b` is an ordinary hex digit, not a prefix, in radix 16.
        assert_eq!(value("0b1", 16), "177");
        assert_eq!(failure("0x1f", 10), ParseIntErrorKind::InvalidDigit);
        assert_eq!(value("0x10", 36), "42804");
    }

    #[test]
    fn underscores_must_sit_between_digits() {
        assert_eq!(value("1_000", 10), "1000");
        assert_eq!(value("f_f", 16), "255");
        assert_eq!(value("0x_ff", 16), "255");
        assert_eq!(value("0x_f_f", 0), "255");
        assert_eq!(failure("_1", 10), ParseIntErrorKind::InvalidUnderscore);
        assert_eq!(failure("1_", 10), ParseIntErrorKind::InvalidUnderscore);
        assert_eq!(failure("1__0", 10), ParseIntErrorKind::InvalidUnderscore);
        assert_eq!(failure("0x__f", 16), ParseIntErrorKind::InvalidUnderscore);
        assert_eq!(failure("0x_", 16), ParseIntErrorKind::InvalidUnderscore);
        assert_eq!(failure("_", 10), ParseIntErrorKind::InvalidUnderscore);
    }

    #[test]
    fn long_numerals_keep_full_precision() {
        let fifty = "12345678901234567890123456789012345678901234567890";
        assert_eq!(value(fifty, 10), fifty);
        assert_eq!(value(&format!("-{fifty}"), 10), format!("-{fifty}"));

        let ones = "1".repeat(128);
        let expected = (BigInt::from(1u8) << 128usize) - BigInt::from(1u8);
        assert_eq!(parse_int(&ones, 2).unwrap(), expected);
    }

    #[test]
    fn digit_guard_applies_only_to_non_power_of_two_radixes() {
        let parser = RadixParser::new().with_max_str_digits(8);
        assert!(parser.parse("12345678", 10).is_ok());
        assert_eq!(
            parser.parse("123456789", 10).unwrap_err().kind(),
            ParseIntErrorKind::TooManyDigits
        );
        assert_eq!(
            parser.parse("1_2345_6789", 10).unwrap_err().kind(),
            ParseIntErrorKind::TooManyDigits
        );
        assert!(parser.parse("ffffffffff", 16).is_ok());
        assert!(parser.parse("1111111111", 2).is_ok());

        let unlimited = RadixParser::new().with_max_str_digits(0);
        assert!(unlimited.parse(&"9".repeat(5000), 10).is_ok());
        assert_eq!(
            parse_int(&"9".repeat(5000), 10).unwrap_err().kind(),
            ParseIntErrorKind::TooManyDigits
        );
    }
}
