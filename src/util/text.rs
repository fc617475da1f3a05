use std::str::FromStr;

use anyhow::{anyhow, Result};
use rust_decimal::Decimal;

/// Characters stripped from quoted values before numeric conversion.
/// The source page groups thousands with commas and prefixes prices
/// with a currency sign.
const NUMBER_ESCAPE_CHAR: &[char] = &['₹', '%', ',', ' ', '"', '\n'];

/// Parses a decimal value from a given string.
///
/// Accepts a string representation of a decimal number, potentially
/// containing commas as thousand separators and other escape characters,
/// and attempts to convert it into a `Decimal`.
///
/// # Arguments
///
/// * `s`: The string to parse.
/// * `escape_chars`: Optional characters to strip before parsing; defaults
///   to `NUMBER_ESCAPE_CHAR` when `None`.
pub fn parse_decimal(s: &str, escape_chars: Option<Vec<char>>) -> Result<Decimal> {
    let cleaned = clean_escape_chars(s, escape_chars);
    Decimal::from_str(&cleaned)
        .map_err(|why| anyhow!("Failed to parse '{}' as Decimal because {:?}", cleaned, why))
}

fn clean_escape_chars(s: &str, escape_chars: Option<Vec<char>>) -> String {
    match escape_chars {
        Some(chars) => s.replace(&chars[..], ""),
        None => s.replace(NUMBER_ESCAPE_CHAR, ""),
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse_decimal("1,234.56", None).unwrap(), dec!(1234.56));
        assert_eq!(parse_decimal("712.45", None).unwrap(), dec!(712.45));
        assert_eq!(parse_decimal("₹3,021.00", None).unwrap(), dec!(3021.00));
    }

    #[test]
    fn test_parse_decimal_with_escape_chars() {
        assert_eq!(
            parse_decimal("1_234.5", Some(vec!['_'])).unwrap(),
            dec!(1234.5)
        );
    }

    #[test]
    fn test_parse_decimal_failure() {
        assert!(parse_decimal("N/A", None).is_err());
        assert!(parse_decimal("", None).is_err());
    }
}
