//! Start-line and header-field line parsing, shared by request/response decoding
//! and by chunked trailer parsing (§4.5).
//!
//! Parsing is hand-rolled byte scanning rather than delegated to `httparse`: the
//! specification requires per-line length limits and a level of state-machine
//! granularity (`StartLine`, then Headers one field at a time) that a one-shot
//! block parser does not expose. See DESIGN.md for the rationale.

use crate::error::HttpError;
use crate::primitives::{is_field_vchar, is_token, is_valid_field_value, trim_ows};
use http::{HeaderName, HeaderValue, Version};

/// The three SP-separated fields of an HTTP/1.x request-line.
#[derive(Debug)]
pub struct RequestLine {
    pub method: String,
    pub target: String,
    pub version: Version,
}

/// Parses `method SP request-target SP HTTP-version` (RFC 9112 §3).
///
/// `request-target` never contains an unencoded SP, so splitting on the first two
/// spaces is unambiguous.
pub fn parse_request_line(line: &[u8]) -> Result<RequestLine, HttpError> {
    let first_sp = line.iter().position(|&b| b == b' ').ok_or_else(|| HttpError::invalid_data("malformed request-line"))?;
    let rest = &line[first_sp + 1..];
    let second_sp = rest.iter().position(|&b| b == b' ').ok_or_else(|| HttpError::invalid_data("malformed request-line"))?;

    let method = &line[..first_sp];
    let target = &rest[..second_sp];
    let version_bytes = &rest[second_sp + 1..];

    if !is_token(method) {
        return Err(HttpError::invalid_data("request method is not a token"));
    }
    if target.is_empty() || !target.iter().copied().all(crate::primitives::is_vchar) {
        return Err(HttpError::invalid_data("request-target contains non-VCHAR bytes"));
    }
    let version = parse_http_version(version_bytes)?;

    Ok(RequestLine {
        method: String::from_utf8_lossy(method).into_owned(),
        target: String::from_utf8_lossy(target).into_owned(),
        version,
    })
}

/// The three fields of an HTTP/1.x status-line.
#[derive(Debug)]
pub struct StatusLine {
    pub version: Version,
    pub status_code: u16,
    pub reason_phrase: String,
}

/// Parses `HTTP-version SP 3DIGIT SP reason-phrase` (RFC 9112 §4).
///
/// Unlike the request-line, `reason-phrase` may itself contain spaces, so only the
/// first two spaces are significant; everything after the second is the reason.
pub fn parse_status_line(line: &[u8]) -> Result<StatusLine, HttpError> {
    let first_sp = line.iter().position(|&b| b == b' ').ok_or_else(|| HttpError::invalid_data("malformed status-line"))?;
    let rest = &line[first_sp + 1..];
    let second_sp = rest.iter().position(|&b| b == b' ');

    let version = parse_http_version(&line[..first_sp])?;

    let (status_bytes, reason_bytes): (&[u8], &[u8]) = match second_sp {
        Some(pos) => (&rest[..pos], &rest[pos + 1..]),
        None => (rest, b""),
    };

    if status_bytes.len() != 3 || !status_bytes.iter().all(u8::is_ascii_digit) {
        return Err(HttpError::InvalidStatusCode(None));
    }
    let status_code: u16 = std::str::from_utf8(status_bytes).unwrap().parse().unwrap();
    if !(100..=599).contains(&status_code) {
        return Err(HttpError::InvalidStatusCode(Some(status_code)));
    }
    if !reason_bytes.iter().copied().all(is_field_vchar) {
        return Err(HttpError::invalid_data("reason-phrase contains invalid bytes"));
    }

    Ok(StatusLine { version, status_code, reason_phrase: String::from_utf8_lossy(reason_bytes).into_owned() })
}

fn parse_http_version(bytes: &[u8]) -> Result<Version, HttpError> {
    match bytes {
        b"HTTP/1.1" => Ok(Version::HTTP_11),
        b"HTTP/1.0" => Ok(Version::HTTP_10),
        _ => Err(HttpError::invalid_data(format!("unsupported http-version {:?}", String::from_utf8_lossy(bytes)))),
    }
}

/// A single parsed `name: value` header field line.
pub struct HeaderField {
    pub name: HeaderName,
    pub value: HeaderValue,
}

/// Parses one header-field line: `field-name ":" OWS field-value OWS` (RFC 9112 §5).
///
/// A line beginning with SP/HTAB is obsolete line-folding and is always rejected —
/// this codec never joins continuation lines (§4.4, §8 attack scenarios).
pub fn parse_header_line(line: &[u8]) -> Result<HeaderField, HttpError> {
    if let [first, ..] = line
        && (*first == b' ' || *first == b'\t') {
            return Err(HttpError::invalid_header_value("obsolete line folding (obs-fold) is not supported"));
        }

    let colon = line.iter().position(|&b| b == b':').ok_or_else(|| HttpError::invalid_data("header field missing ':'"))?;
    let name_bytes = &line[..colon];
    let value_bytes = trim_ows(&line[colon + 1..]);

    if !is_token(name_bytes) {
        return Err(HttpError::InvalidHeaderName(format!("{:?} is not a token", String::from_utf8_lossy(name_bytes))));
    }
    if !is_valid_field_value(value_bytes) {
        return Err(HttpError::invalid_header_value("field-value contains an invalid byte"));
    }

    let name = HeaderName::from_bytes(name_bytes).map_err(|e| HttpError::InvalidHeaderName(e.to_string()))?;
    let value = HeaderValue::from_bytes(value_bytes).map_err(|e| HttpError::invalid_header_value(e.to_string()))?;
    Ok(HeaderField { name, value })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_line_basic() {
        let rl = parse_request_line(b"GET /x HTTP/1.1").unwrap();
        assert_eq!(rl.method, "GET");
        assert_eq!(rl.target, "/x");
        assert_eq!(rl.version, Version::HTTP_11);
    }

    #[test]
    fn status_line_with_spaced_reason() {
        let sl = parse_status_line(b"HTTP/1.1 404 Not Found").unwrap();
        assert_eq!(sl.status_code, 404);
        assert_eq!(sl.reason_phrase, "Not Found");
    }

    #[test]
    fn status_line_empty_reason() {
        let sl = parse_status_line(b"HTTP/1.1 200 ").unwrap();
        assert_eq!(sl.reason_phrase, "");
    }

    #[test]
    fn rejects_out_of_range_status() {
        assert!(matches!(parse_status_line(b"HTTP/1.1 999 x"), Err(HttpError::InvalidStatusCode(Some(999)))));
    }

    #[test]
    fn obs_fold_rejected() {
        assert!(parse_header_line(b" continuation").is_err());
    }

    #[test]
    fn header_line_trims_ows() {
        let field = parse_header_line(b"Host:  example.com  ").unwrap();
        assert_eq!(field.name.as_str(), "host");
        assert_eq!(field.value.to_str().unwrap(), "example.com");
    }
}
