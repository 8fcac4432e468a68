//! `Content-Type` (RFC 9110 §8.3): `type "/" subtype *( ";" parameter )`.

use crate::error::HttpError;
use crate::primitives::is_token;
use std::fmt::Write as _;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentType {
    pub media_type: String,
    pub media_subtype: String,
    /// Parameters in the order they were sent (names case-insensitive, lower-cased).
    pub params: Vec<(String, String)>,
}

impl ContentType {
    pub fn parse(value: &str) -> Result<Self, HttpError> {
        let mut parts = value.split(';');
        let full_type = parts.next().unwrap_or("").trim();
        let (media_type, media_subtype) = full_type
            .split_once('/')
            .ok_or_else(|| HttpError::invalid_data(format!("content-type {value:?} missing '/'")))?;
        if !is_token(media_type.as_bytes()) || !is_token(media_subtype.as_bytes()) {
            return Err(HttpError::invalid_data(format!("content-type {value:?} has a non-token type/subtype")));
        }

        let mut params = Vec::new();
        for param in parts {
            let param = param.trim();
            if param.is_empty() {
                continue;
            }
            let (name, raw_value) = param
                .split_once('=')
                .ok_or_else(|| HttpError::invalid_data(format!("content-type parameter {param:?} missing '='")))?;
            let name = name.trim().to_ascii_lowercase();
            let unquoted = raw_value.trim().trim_matches('"');
            params.push((name, unquoted.to_string()));
        }

        Ok(Self { media_type: media_type.to_ascii_lowercase(), media_subtype: media_subtype.to_ascii_lowercase(), params })
    }

    #[must_use]
    pub fn charset(&self) -> Option<&str> {
        self.params.iter().find(|(n, _)| n == "charset").map(|(_, v)| v.as_str())
    }

    /// True for `application/json` or any subtype ending in the `+json` structured
    /// syntax suffix (RFC 6839 §3.1), e.g. `application/vnd.api+json`.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.media_type == "application" && (self.media_subtype == "json" || self.media_subtype.ends_with("+json"))
    }

    #[must_use]
    pub fn to_header_value(&self) -> String {
        let mut s = format!("{}/{}", self.media_type, self.media_subtype);
        for (name, value) in &self.params {
            let _ = write!(s, "; {name}={value}");
        }
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_type_and_charset() {
        let ct = ContentType::parse("text/html; charset=UTF-8").unwrap();
        assert_eq!(ct.media_type, "text");
        assert_eq!(ct.media_subtype, "html");
        assert_eq!(ct.charset(), Some("UTF-8"));
    }

    #[test]
    fn parses_quoted_param() {
        let ct = ContentType::parse(r#"multipart/form-data; boundary="abc123""#).unwrap();
        assert_eq!(ct.params.iter().find(|(n, _)| n == "boundary").map(|(_, v)| v.as_str()), Some("abc123"));
    }

    #[test]
    fn preserves_param_order() {
        let ct = ContentType::parse("text/html; charset=utf-8; boundary=xyz").unwrap();
        let names: Vec<_> = ct.params.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["charset", "boundary"]);
    }

    #[test]
    fn detects_json_and_json_suffix() {
        assert!(ContentType::parse("application/json").unwrap().is_json());
        assert!(ContentType::parse("application/vnd.api+json").unwrap().is_json());
        assert!(!ContentType::parse("text/plain").unwrap().is_json());
    }

    #[test]
    fn rejects_missing_slash() {
        assert!(ContentType::parse("textplain").is_err());
    }
}
