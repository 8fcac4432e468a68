//! `Range` (RFC 9110 §14.2) and `Content-Range` (RFC 9110 §14.4), `bytes`-unit only.

use crate::error::HttpError;
use crate::primitives::parse_decimal_u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteRangeSpec {
    /// `first-last`, both inclusive.
    Bounded { first: u64, last: u64 },
    /// `first-`: from `first` to the end of the representation.
    From { first: u64 },
    /// `-suffix-length`: the last `suffix_length` bytes.
    Suffix { suffix_length: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ByteRanges {
    pub ranges: Vec<ByteRangeSpec>,
}

impl ByteRanges {
    /// Parses `bytes=0-499` / `bytes=500-` / `bytes=-500` / `bytes=0-0,500-999`.
    pub fn parse(value: &str) -> Result<Self, HttpError> {
        let spec = value
            .trim()
            .strip_prefix("bytes=")
            .ok_or_else(|| HttpError::invalid_data(format!("Range {value:?} is not a bytes-range-spec")))?;

        let ranges = spec.split(',').map(|r| parse_one_range(r.trim())).collect::<Result<Vec<_>, _>>()?;
        if ranges.is_empty() {
            return Err(HttpError::invalid_data("Range header has no ranges"));
        }
        Ok(Self { ranges })
    }

    #[must_use] 
    pub fn to_header_value(&self) -> String {
        let parts: Vec<String> = self
            .ranges
            .iter()
            .map(|r| match r {
                ByteRangeSpec::Bounded { first, last } => format!("{first}-{last}"),
                ByteRangeSpec::From { first } => format!("{first}-"),
                ByteRangeSpec::Suffix { suffix_length } => format!("-{suffix_length}"),
            })
            .collect();
        format!("bytes={}", parts.join(","))
    }
}

fn parse_one_range(r: &str) -> Result<ByteRangeSpec, HttpError> {
    let (first_str, last_str) = r.split_once('-').ok_or_else(|| HttpError::invalid_data(format!("malformed range {r:?}")))?;
    if first_str.is_empty() {
        let suffix_length =
            parse_decimal_u64(last_str.as_bytes()).ok_or_else(|| HttpError::invalid_data(format!("malformed suffix-range {r:?}")))?;
        return Ok(ByteRangeSpec::Suffix { suffix_length });
    }
    let first = parse_decimal_u64(first_str.as_bytes()).ok_or_else(|| HttpError::invalid_data(format!("malformed range {r:?}")))?;
    if last_str.is_empty() {
        return Ok(ByteRangeSpec::From { first });
    }
    let last = parse_decimal_u64(last_str.as_bytes()).ok_or_else(|| HttpError::invalid_data(format!("malformed range {r:?}")))?;
    if last < first {
        return Err(HttpError::invalid_data(format!("range {r:?} has last < first")));
    }
    Ok(ByteRangeSpec::Bounded { first, last })
}

/// `Content-Range` (RFC 9110 §14.4): either a satisfied range —
/// `bytes first-last/complete-length` or `bytes first-last/*` when the complete
/// length is unknown — or the unsatisfied-range form `bytes */complete-length`
/// sent on a `416 Range Not Satisfiable` response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentRange {
    Range { first: u64, last: u64, complete_length: Option<u64> },
    Unsatisfied { complete_length: u64 },
}

impl ContentRange {
    pub fn parse(value: &str) -> Result<Self, HttpError> {
        let spec = value
            .trim()
            .strip_prefix("bytes ")
            .ok_or_else(|| HttpError::invalid_data(format!("Content-Range {value:?} is not a bytes-content-range")))?;
        let (range_part, length_part) = spec.split_once('/').ok_or_else(|| HttpError::invalid_data("Content-Range missing '/'"))?;

        if range_part == "*" {
            let complete_length =
                parse_decimal_u64(length_part.as_bytes()).ok_or_else(|| HttpError::invalid_data("invalid Content-Range length"))?;
            return Ok(Self::Unsatisfied { complete_length });
        }

        let (first_str, last_str) = range_part.split_once('-').ok_or_else(|| HttpError::invalid_data("Content-Range missing '-'"))?;
        let first = parse_decimal_u64(first_str.as_bytes()).ok_or_else(|| HttpError::invalid_data("invalid Content-Range first"))?;
        let last = parse_decimal_u64(last_str.as_bytes()).ok_or_else(|| HttpError::invalid_data("invalid Content-Range last"))?;
        let complete_length = if length_part == "*" { None } else { Some(parse_decimal_u64(length_part.as_bytes()).ok_or_else(|| HttpError::invalid_data("invalid Content-Range length"))?) };
        Ok(Self::Range { first, last, complete_length })
    }

    #[must_use]
    pub fn to_header_value(&self) -> String {
        match self {
            Self::Range { first, last, complete_length: Some(len) } => format!("bytes {first}-{last}/{len}"),
            Self::Range { first, last, complete_length: None } => format!("bytes {first}-{last}/*"),
            Self::Unsatisfied { complete_length } => format!("bytes */{complete_length}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bounded_and_suffix_ranges() {
        let ranges = ByteRanges::parse("bytes=0-499,-500").unwrap();
        assert_eq!(ranges.ranges[0], ByteRangeSpec::Bounded { first: 0, last: 499 });
        assert_eq!(ranges.ranges[1], ByteRangeSpec::Suffix { suffix_length: 500 });
    }

    #[test]
    fn rejects_last_before_first() {
        assert!(ByteRanges::parse("bytes=500-100").is_err());
    }

    #[test]
    fn content_range_roundtrip() {
        let cr = ContentRange::parse("bytes 0-499/1234").unwrap();
        assert_eq!(cr.to_header_value(), "bytes 0-499/1234");
    }

    #[test]
    fn content_range_unsatisfied_form() {
        let cr = ContentRange::parse("bytes */1234").unwrap();
        assert_eq!(cr, ContentRange::Unsatisfied { complete_length: 1234 });
        assert_eq!(cr.to_header_value(), "bytes */1234");
    }
}
