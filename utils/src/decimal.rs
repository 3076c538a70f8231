//! Unsigned decimal strings scaled to and from integers with an implied precision.
//!
//! `decimal_imply("1.5", 4)` yields the whole-number string `"15000"` and
//! `decimal_unimply("15000", 4)` yields `"1.5000"`.

use thiserror::Error;

/// Errors that can occur when scaling decimal strings.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("invalid decimal '{0}'")]
    InvalidDecimal(String),
    #[error("decimal '{0}' exceeds precision {1}")]
    ExceedsPrecision(String, u8),
    #[error("invalid whole number '{0}'")]
    InvalidWholeNumber(String),
}

fn is_digits(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}

/// Normalizes an unsigned decimal string: strips leading zeros of the whole part, trailing zeros
/// of the fraction, and thousands separators.
pub fn decimal_string(value: &str) -> Result<String, Error> {
    let invalid = || Error::InvalidDecimal(value.to_string());
    let mut parts = value.split('.');
    let whole = parts.next().unwrap_or_default();
    let fraction = parts.next();
    if parts.next().is_some() {
        return Err(invalid());
    }

    // A leading separator or a doubled one is malformed ("1,,000", ",1").
    if whole.starts_with(',') || whole.ends_with(',') || whole.contains(",,") {
        return Err(invalid());
    }
    let whole: String = whole.chars().filter(|&c| c != ',').collect();
    if !is_digits(&whole) || (whole.is_empty() && fraction.is_none()) {
        return Err(invalid());
    }
    let whole = whole.trim_start_matches('0');
    let whole = if whole.is_empty() { "0" } else { whole };

    match fraction {
        Some(fraction) => {
            if !is_digits(fraction) {
                return Err(invalid());
            }
            let fraction = fraction.trim_end_matches('0');
            if fraction.is_empty() {
                Ok(whole.to_string())
            } else {
                Ok(format!("{whole}.{fraction}"))
            }
        }
        None => Ok(whole.to_string()),
    }
}

/// Pads the fraction of an unsigned decimal string to exactly `precision` digits.
pub fn decimal_pad(value: &str, precision: u8) -> Result<String, Error> {
    let normalized = decimal_string(value)?;
    let (whole, fraction) = match normalized.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (normalized.as_str(), ""),
    };
    let precision_len = precision as usize;
    if fraction.len() > precision_len {
        return Err(Error::ExceedsPrecision(value.to_string(), precision));
    }
    if precision == 0 {
        return Ok(whole.to_string());
    }
    Ok(format!(
        "{whole}.{fraction}{}",
        "0".repeat(precision_len - fraction.len())
    ))
}

/// Scales an unsigned decimal string into its whole-number form with `precision` implied digits.
pub fn decimal_imply(value: &str, precision: u8) -> Result<String, Error> {
    Ok(decimal_pad(value, precision)?.replace('.', ""))
}

/// Scales a whole-number string back into a decimal string with `precision` digits.
pub fn decimal_unimply(value: &str, precision: u8) -> Result<String, Error> {
    if value.is_empty() || !is_digits(value) {
        return Err(Error::InvalidWholeNumber(value.to_string()));
    }
    let precision_len = precision as usize;
    let padded = if value.len() < precision_len {
        format!("{}{value}", "0".repeat(precision_len - value.len()))
    } else {
        value.to_string()
    };
    let dot = padded.len() - precision_len;
    decimal_pad(&format!("{}.{}", &padded[..dot], &padded[dot..]), precision)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decimal_string() {
        assert_eq!(decimal_string("1").unwrap(), "1");
        assert_eq!(decimal_string("001.2300").unwrap(), "1.23");
        assert_eq!(decimal_string(".5").unwrap(), "0.5");
        assert_eq!(decimal_string("1,000.0").unwrap(), "1000");
        assert_eq!(decimal_string("0").unwrap(), "0");
        assert!(decimal_string("1.2.3").is_err());
        assert!(decimal_string("abc").is_err());
        assert!(decimal_string("").is_err());
        assert!(decimal_string("-1").is_err());
        assert!(decimal_string("1,,0").is_err());
    }

    #[test]
    fn test_decimal_pad() {
        assert_eq!(decimal_pad("1", 4).unwrap(), "1.0000");
        assert_eq!(decimal_pad("1.5", 4).unwrap(), "1.5000");
        assert_eq!(decimal_pad("1.5", 1).unwrap(), "1.5");
        assert_eq!(decimal_pad("7", 0).unwrap(), "7");
        assert_eq!(
            decimal_pad("1.23456", 4),
            Err(Error::ExceedsPrecision("1.23456".into(), 4))
        );
    }

    #[test]
    fn test_decimal_imply() {
        assert_eq!(decimal_imply("1", 4).unwrap(), "10000");
        assert_eq!(decimal_imply("0.0001", 4).unwrap(), "00001");
        assert_eq!(decimal_imply("12.5", 2).unwrap(), "1250");
    }

    #[test]
    fn test_decimal_unimply() {
        assert_eq!(decimal_unimply("10000", 4).unwrap(), "1.0000");
        assert_eq!(decimal_unimply("1", 4).unwrap(), "0.0001");
        assert_eq!(decimal_unimply("0", 4).unwrap(), "0.0000");
        assert_eq!(decimal_unimply("5", 0).unwrap(), "5");
        assert!(decimal_unimply("1.5", 4).is_err());
        assert!(decimal_unimply("", 4).is_err());
    }
}
