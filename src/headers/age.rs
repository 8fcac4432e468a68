//! `Age` (RFC 9111 §5.1): the sender's estimate of time since a response was
//! generated, a non-negative integer number of seconds.

use crate::error::HttpError;
use crate::primitives::parse_decimal_u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Age(pub u64);

impl Age {
    pub fn parse(value: &str) -> Result<Self, HttpError> {
        parse_decimal_u64(value.trim().as_bytes()).map(Self).ok_or_else(|| HttpError::invalid_data(format!("invalid Age value {value:?}")))
    }

    #[must_use]
    pub fn to_header_value(&self) -> String {
        self.0.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_seconds() {
        assert_eq!(Age::parse("120").unwrap(), Age(120));
    }

    #[test]
    fn rejects_negative_or_non_numeric() {
        assert!(Age::parse("-1").is_err());
        assert!(Age::parse("abc").is_err());
    }
}
