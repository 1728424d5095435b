//! Commonly occurring sub-patterns for parameter values.
//!
//! These are meant to be used as the sub-pattern side of a
//! [`LevelSpec::Parametrized`](crate::compiler::LevelSpec) entry.

/// Signed decimal number without exponent, e.g. `0.5`, `-3`, `.25`.
pub const FLOAT_PATTERN: &str = r"[-+]?(?:\d*\.\d+|\d+)";

/// Unsigned integer.
pub const INT_PATTERN: &str = r"\d+";

/// Boolean as rendered in directory names.
pub const BOOL_PATTERN: &str = "True|False";

/// Boolean, also accepting `0` and `1`.
pub const BOOL_WITH_NUMERIC_PATTERN: &str = "True|False|0|1";

/// One or more ASCII letters.
pub const LITERAL_PATTERN: &str = "[a-zA-Z]+";

/// Numeric format including exponential notation, e.g. `1e-05`, `3.`, `-2.5E+3`.
pub const NUMERIC_PATTERN: &str =
    r"(?x: [-+]? (?: (?: \d* \. \d+ ) | (?: \d+ \.? ) ) (?: [Ee] [+-]? \d+ )? )";

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    fn full(pattern: &str) -> Regex {
        Regex::new(&format!("^(?:{pattern})$")).unwrap()
    }

    #[test]
    fn test_float_pattern() {
        let re = full(FLOAT_PATTERN);
        for ok in ["0.5", "-3", "+2.25", ".75", "10"] {
            assert!(re.is_match(ok), "{ok} should match");
        }
        for bad in ["abc", "1e5", "--1", ""] {
            assert!(!re.is_match(bad), "{bad} should not match");
        }
    }

    #[test]
    fn test_bool_patterns() {
        let re = full(BOOL_PATTERN);
        assert!(re.is_match("True"));
        assert!(re.is_match("False"));
        assert!(!re.is_match("true"));
        assert!(!re.is_match("1"));

        let re = full(BOOL_WITH_NUMERIC_PATTERN);
        assert!(re.is_match("0"));
        assert!(re.is_match("1"));
        assert!(re.is_match("True"));
    }

    #[test]
    fn test_numeric_pattern_accepts_exponents() {
        let re = full(NUMERIC_PATTERN);
        for ok in ["1e-05", "3.", "-2.5E+3", "42", ".5"] {
            assert!(re.is_match(ok), "{ok} should match");
        }
        assert!(!re.is_match("e10"));
        assert!(!re.is_match("1 e 5"));
    }

    #[test]
    fn test_int_and_literal_patterns() {
        assert!(full(INT_PATTERN).is_match("111"));
        assert!(!full(INT_PATTERN).is_match("-1"));
        assert!(full(LITERAL_PATTERN).is_match("adam"));
        assert!(!full(LITERAL_PATTERN).is_match("adam2"));
    }
}
