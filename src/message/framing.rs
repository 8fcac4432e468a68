//! Shared framing computations over a [`HeaderList`], used by both `Request` and
//! `Response` and by the decoder's body-framing decision (§4.5).

use super::headers::HeaderList;
use crate::error::HttpError;
use crate::primitives::parse_decimal_u64;
use http::Version;

const TRANSFER_ENCODING: &str = "transfer-encoding";
const CONTENT_LENGTH: &str = "content-length";
const CONNECTION: &str = "connection";

/// `true` iff the last comma-separated token of `Transfer-Encoding` is `chunked`.
pub fn is_chunked(headers: &HeaderList) -> bool {
    let Some(value) = headers.get_all(TRANSFER_ENCODING).last() else {
        return false;
    };
    value.rsplit(',').next().is_some_and(|tok| tok.trim().eq_ignore_ascii_case("chunked"))
}

/// Computes the effective `Content-Length`.
///
/// Multiple identical values collapse to one; differing values are rejected as
/// `InvalidData` per the conservative reading recorded in DESIGN.md. Returns `Ok(None)`
/// when the header is absent.
pub fn content_length(headers: &HeaderList) -> Result<Option<u64>, HttpError> {
    let mut values = headers.get_all(CONTENT_LENGTH);
    let Some(first) = values.next() else {
        return Ok(None);
    };
    let first_value = parse_decimal_u64(first.trim().as_bytes())
        .ok_or_else(|| HttpError::invalid_data(format!("content-length {first:?} is not numeric")))?;
    for other in values {
        let other_value = parse_decimal_u64(other.trim().as_bytes())
            .ok_or_else(|| HttpError::invalid_data(format!("content-length {other:?} is not numeric")))?;
        if other_value != first_value {
            return Err(HttpError::invalid_data("conflicting content-length values"));
        }
    }
    Ok(Some(first_value))
}

/// Applies RFC 9112 §9.3 keep-alive defaults, honoring an explicit `Connection` override.
pub fn is_keep_alive(version: Version, headers: &HeaderList) -> bool {
    let connection_tokens = || headers.get_all(CONNECTION).flat_map(|v| v.split(',').map(str::trim));

    if version == Version::HTTP_10 {
        connection_tokens().any(|tok| tok.eq_ignore_ascii_case("keep-alive"))
    } else {
        !connection_tokens().any(|tok| tok.eq_ignore_ascii_case("close"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(pairs: &[(&str, &str)]) -> HeaderList {
        let mut h = HeaderList::new();
        for (n, v) in pairs {
            h.push(n, v).unwrap();
        }
        h
    }

    #[test]
    fn chunked_is_last_token() {
        assert!(is_chunked(&headers(&[("Transfer-Encoding", "gzip, chunked")])));
        assert!(!is_chunked(&headers(&[("Transfer-Encoding", "chunked, gzip")])));
        assert!(!is_chunked(&headers(&[])));
    }

    #[test]
    fn content_length_conflict_detection() {
        assert_eq!(content_length(&headers(&[("Content-Length", "5")])).unwrap(), Some(5));
        assert_eq!(content_length(&headers(&[("Content-Length", "5"), ("Content-Length", "5")])).unwrap(), Some(5));
        assert!(content_length(&headers(&[("Content-Length", "5"), ("Content-Length", "6")])).is_err());
        assert!(content_length(&headers(&[("Content-Length", "abc")])).is_err());
    }

    #[test]
    fn keep_alive_defaults() {
        assert!(is_keep_alive(Version::HTTP_11, &headers(&[])));
        assert!(!is_keep_alive(Version::HTTP_11, &headers(&[("Connection", "close")])));
        assert!(!is_keep_alive(Version::HTTP_10, &headers(&[])));
        assert!(is_keep_alive(Version::HTTP_10, &headers(&[("Connection", "keep-alive")])));
    }
}
