//! The `Response` message type.

use super::headers::HeaderList;
use crate::error::HttpError;
use bytes::Bytes;
use http::{StatusCode, Version};

/// A fully-assembled HTTP response: version, status, reason phrase, headers and body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    version: Version,
    status_code: u16,
    reason_phrase: String,
    headers: HeaderList,
    body: Bytes,
}

impl Response {
    /// Builds a response with `HTTP/1.1` and the standard reason phrase for `status_code`.
    ///
    /// Fails with [`HttpError::InvalidStatusCode`] unless `status_code` is a three-digit
    /// value in `100..=599`.
    pub fn new(status_code: u16) -> Result<Self, HttpError> {
        Self::with_version(Version::HTTP_11, status_code)
    }

    pub fn with_version(version: Version, status_code: u16) -> Result<Self, HttpError> {
        if !(100..=599).contains(&status_code) {
            return Err(HttpError::InvalidStatusCode(Some(status_code)));
        }
        let reason_phrase = StatusCode::from_u16(status_code).ok().and_then(|s| s.canonical_reason()).unwrap_or("").to_string();
        Ok(Self { version, status_code, reason_phrase, headers: HeaderList::new(), body: Bytes::new() })
    }

    /// Overrides the reason phrase; must contain only `HTAB`/`SP`/`VCHAR`/obs-text bytes.
    pub fn reason(mut self, reason: impl Into<String>) -> Result<Self, HttpError> {
        let reason = reason.into();
        if !reason.bytes().all(crate::primitives::is_field_vchar) {
            return Err(HttpError::invalid_data(format!("reason phrase {reason:?} contains invalid bytes")));
        }
        self.reason_phrase = reason;
        Ok(self)
    }

    pub fn header(mut self, name: &str, value: &str) -> Result<Self, HttpError> {
        self.headers.push(name, value)?;
        Ok(self)
    }

    pub fn body(mut self, bytes: impl Into<Bytes>) -> Self {
        self.body = bytes.into();
        self
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn reason_phrase(&self) -> &str {
        &self.reason_phrase
    }

    pub fn headers(&self) -> &HeaderList {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut HeaderList {
        &mut self.headers
    }

    pub fn body_bytes(&self) -> &Bytes {
        &self.body
    }

    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }

    pub fn has_header(&self, name: &str) -> bool {
        self.headers.contains(name)
    }

    pub fn is_chunked(&self) -> bool {
        super::framing::is_chunked(&self.headers)
    }

    pub fn content_length(&self) -> Option<u64> {
        super::framing::content_length(&self.headers).ok().flatten()
    }

    pub fn is_keep_alive(&self) -> bool {
        super::framing::is_keep_alive(self.version, &self.headers)
    }

    pub fn is_informational(&self) -> bool {
        (100..200).contains(&self.status_code)
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    pub fn is_redirect(&self) -> bool {
        (300..400).contains(&self.status_code)
    }

    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code)
    }

    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status_code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_classifiers() {
        assert!(Response::new(101).unwrap().is_informational());
        assert!(Response::new(204).unwrap().is_success());
        assert!(Response::new(301).unwrap().is_redirect());
        assert!(Response::new(404).unwrap().is_client_error());
        assert!(Response::new(503).unwrap().is_server_error());
    }

    #[test]
    fn rejects_out_of_range_status() {
        assert!(Response::new(99).is_err());
        assert!(Response::new(600).is_err());
    }

    #[test]
    fn default_reason_phrase() {
        assert_eq!(Response::new(404).unwrap().reason_phrase(), "Not Found");
    }
}
