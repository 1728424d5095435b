//! String to value conversions for captured parameters.
//!
//! Every captured parameter is a raw string. These helpers are what callers
//! use to turn them into typed values, either directly or through
//! [`ResultTable::cast_column`](crate::ResultTable::cast_column).

use crate::error::{ManagerError, Result};

/// Parse a boolean.
///
/// Accepts `1`, `0`, `true` and `false`, case-insensitive, surrounding
/// whitespace ignored. `True`/`False` as written in directory names are
/// therefore accepted.
pub fn parse_bool(s: &str) -> Result<bool> {
    let x = s.trim();
    if x == "1" || x.eq_ignore_ascii_case("true") {
        return Ok(true);
    }
    if x == "0" || x.eq_ignore_ascii_case("false") {
        return Ok(false);
    }
    Err(ManagerError::conversion(s, "not a boolean"))
}

pub fn parse_int(s: &str) -> Result<i64> {
    s.trim()
        .parse()
        .map_err(|e: std::num::ParseIntError| ManagerError::conversion(s, e.to_string()))
}

pub fn parse_float(s: &str) -> Result<f64> {
    s.trim()
        .parse()
        .map_err(|e: std::num::ParseFloatError| ManagerError::conversion(s, e.to_string()))
}

/// Parse `none` (case-insensitive) as `None`, anything else with `parse`.
///
/// ```rust
/// use experiment_manager::convert::{none_or, parse_int};
///
/// assert_eq!(none_or("None", parse_int)?, None);
/// assert_eq!(none_or(" 42 ", parse_int)?, Some(42));
/// # Ok::<(), experiment_manager::ManagerError>(())
/// ```
pub fn none_or<T, F>(s: &str, parse: F) -> Result<Option<T>>
where
    F: FnOnce(&str) -> Result<T>,
{
    let x = s.trim();
    if x.eq_ignore_ascii_case("none") {
        return Ok(None);
    }
    parse(x).map(Some)
}

/// Either a fraction in `(0, 1)` or an absolute count.
///
/// Many experiment parameters (sample sizes, split sizes) accept both forms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UnitOrCount {
    Fraction(f64),
    Count(u64),
}

/// Parse a fraction within `(0, 1)` or a non-negative integer count.
///
/// Integral values, including `1` and `1.0`, become [`UnitOrCount::Count`].
/// Zero is only accepted when `valid_zero` is set.
pub fn unit_float_or_count(s: &str, valid_zero: bool) -> Result<UnitOrCount> {
    let x = parse_float(s)?;

    if x.is_nan() {
        return Err(ManagerError::conversion(s, "not a number"));
    }
    if x < 0.0 {
        return Err(ManagerError::conversion(s, "negative values are not accepted"));
    }
    if x == 0.0 && !valid_zero {
        return Err(ManagerError::conversion(s, "zero is not accepted"));
    }

    let integral = x.is_finite() && x.fract() == 0.0;
    if x > 1.0 && !integral {
        return Err(ManagerError::conversion(
            s,
            "only fractions in the range (0, 1) or integers are accepted",
        ));
    }

    // u64::MAX rounds up to 2^64 as f64, which is already out of range
    if integral && x >= u64::MAX as f64 {
        return Err(ManagerError::conversion(s, "count does not fit in 64 bits"));
    }

    if integral {
        Ok(UnitOrCount::Count(x as u64))
    } else {
        Ok(UnitOrCount::Fraction(x))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bool() {
        for s in ["1", "true", "True", " TRUE "] {
            assert!(parse_bool(s).unwrap(), "{s}");
        }
        for s in ["0", "false", "False", "fAlSe\n"] {
            assert!(!parse_bool(s).unwrap(), "{s}");
        }
        assert!(matches!(
            parse_bool("yes"),
            Err(ManagerError::Conversion { .. })
        ));
    }

    #[test]
    fn test_parse_numbers() {
        assert_eq!(parse_int(" 111 ").unwrap(), 111);
        assert!(parse_int("1.5").is_err());
        assert_eq!(parse_float("0.5").unwrap(), 0.5);
        assert_eq!(parse_float("1e-05").unwrap(), 1e-5);
        assert!(parse_float("abc").is_err());
    }

    #[test]
    fn test_none_or() {
        assert_eq!(none_or("none", parse_float).unwrap(), None);
        assert_eq!(none_or("NONE", parse_bool).unwrap(), None);
        assert_eq!(none_or("0.25", parse_float).unwrap(), Some(0.25));
        assert!(none_or("nah", parse_bool).is_err());
    }

    #[test]
    fn test_unit_float_or_count() {
        assert_eq!(
            unit_float_or_count("0.3", true).unwrap(),
            UnitOrCount::Fraction(0.3)
        );
        assert_eq!(unit_float_or_count("1", true).unwrap(), UnitOrCount::Count(1));
        assert_eq!(
            unit_float_or_count("250.0", true).unwrap(),
            UnitOrCount::Count(250)
        );
        assert_eq!(unit_float_or_count("0", true).unwrap(), UnitOrCount::Count(0));
    }

    #[test]
    fn test_unit_float_or_count_rejections() {
        assert!(unit_float_or_count("-1", true).is_err());
        assert!(unit_float_or_count("0", false).is_err());
        assert!(unit_float_or_count("2.5", true).is_err());
        assert!(unit_float_or_count("nan", true).is_err());
        assert!(unit_float_or_count("ten", true).is_err());
        assert!(unit_float_or_count("inf", true).is_err());
    }

    #[test]
    fn test_unit_float_or_count_out_of_range() {
        assert!(matches!(
            unit_float_or_count("1e30", true),
            Err(ManagerError::Conversion { .. })
        ));
        assert!(unit_float_or_count("18446744073709551616", true).is_err());
        assert_eq!(
            unit_float_or_count("1e15", true).unwrap(),
            UnitOrCount::Count(1_000_000_000_000_000)
        );
    }
}
