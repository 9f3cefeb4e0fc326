//! Flat array parsing
//!
//! Accepts either a bare comma list (`1,2,null,4`) or a bracketed JSON
//! array (`[1,2,null,4]`). Entries are integers or `null`.

use thiserror::Error;

/// One slot of the level-order encoding: a value, or no node at this position.
pub type FlatSlot = Option<i64>;

/// Errors produced while reading an array from text
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Text is not an array of integers and nulls
    #[error("Invalid array format: {0}")]
    InvalidFormat(String),
}

/// Wrap bare comma lists in brackets.
///
/// Only text that neither opens with `[` nor closes with `]` is wrapped, so a
/// half-bracketed input like `[1,2` stays malformed and fails to parse.
pub fn normalize(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return "[]".to_string();
    }
    if !trimmed.starts_with('[') && !trimmed.ends_with(']') {
        format!("[{}]", trimmed)
    } else {
        trimmed.to_string()
    }
}

/// Parse user text into flat slots.
///
/// `0` is a present value; only `null` marks an absent slot.
pub fn parse_array(raw: &str) -> Result<Vec<FlatSlot>, ParseError> {
    let normalized = normalize(raw);
    serde_json::from_str::<Vec<FlatSlot>>(&normalized)
        .map_err(|err| ParseError::InvalidFormat(err.to_string()))
}

/// Validation flag for an input field.
pub fn is_valid(raw: &str) -> bool {
    parse_array(raw).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("1,2,3" => "[1,2,3]" ; "bare list")]
    #[test_case("[1,2,3]" => "[1,2,3]" ; "already bracketed")]
    #[test_case("  4, 5 " => "[4, 5]" ; "surrounding whitespace")]
    #[test_case("" => "[]" ; "empty")]
    #[test_case("[1,2" => "[1,2" ; "half open left alone")]
    fn test_normalize(raw: &str) -> String {
        normalize(raw)
    }

    #[test]
    fn test_zero_is_present() {
        let slots = parse_array("0,null,0").unwrap();
        assert_eq!(slots, vec![Some(0), None, Some(0)]);
    }

    #[test_case("1,two,3" ; "word token")]
    #[test_case("[1,2" ; "unbalanced")]
    #[test_case("1.5,2" ; "float")]
    #[test_case("[[1],2]" ; "nested")]
    #[test_case("1,,2" ; "empty token")]
    fn test_rejects(raw: &str) {
        assert!(matches!(parse_array(raw), Err(ParseError::InvalidFormat(_))));
        assert!(!is_valid(raw));
    }

    #[test]
    fn test_empty_inputs_parse_to_nothing() {
        assert!(parse_array("").unwrap().is_empty());
        assert!(parse_array("[]").unwrap().is_empty());
        assert!(parse_array("   ").unwrap().is_empty());
    }

    #[test]
    fn test_negative_values() {
        assert_eq!(parse_array("-3,null,7").unwrap(), vec![Some(-3), None, Some(7)]);
    }
}
