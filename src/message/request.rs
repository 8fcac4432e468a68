//! The `Request` message type.

use super::headers::HeaderList;
use crate::error::HttpError;
use crate::primitives::is_token;
use bytes::Bytes;
use http::Version;

/// A fully-assembled HTTP request: method, request-target, version, headers and body.
///
/// Constructed either by the caller (for encoding) or by [`RequestDecoder`](crate::decoder::RequestDecoder)
/// (from the wire). `target` is kept verbatim as received/specified; use
/// [`crate::headers::Uri`] to parse its structure when needed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    method: String,
    target: String,
    version: Version,
    headers: HeaderList,
    body: Bytes,
}

impl Request {
    /// Builds a request with `HTTP/1.1` and no headers or body.
    pub fn new(method: impl Into<String>, target: impl Into<String>) -> Result<Self, HttpError> {
        Self::with_version(method, target, Version::HTTP_11)
    }

    /// Builds a request with an explicit HTTP version.
    pub fn with_version(method: impl Into<String>, target: impl Into<String>, version: Version) -> Result<Self, HttpError> {
        let method = method.into();
        if !is_token(method.as_bytes()) {
            return Err(HttpError::invalid_data(format!("method {method:?} is not a token")));
        }
        let target = target.into();
        if target.is_empty() || !target.bytes().all(crate::primitives::is_vchar) {
            return Err(HttpError::invalid_data(format!("request-target {target:?} is not a valid VCHAR sequence")));
        }
        Ok(Self { method, target, version, headers: HeaderList::new(), body: Bytes::new() })
    }

    /// Appends a header, validating name/value grammar (see [`HeaderList::push`]).
    pub fn header(mut self, name: &str, value: &str) -> Result<Self, HttpError> {
        self.headers.push(name, value)?;
        Ok(self)
    }

    /// Replaces the body with `bytes`.
    pub fn body(mut self, bytes: impl Into<Bytes>) -> Self {
        self.body = bytes.into();
        self
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn version(&self) -> Version {
        self.version
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

    /// `true` when the last `Transfer-Encoding` token is `chunked` (case-insensitive).
    pub fn is_chunked(&self) -> bool {
        super::framing::is_chunked(&self.headers)
    }

    /// Returns the single numeric `Content-Length`, if present and unambiguous.
    pub fn content_length(&self) -> Option<u64> {
        super::framing::content_length(&self.headers).ok().flatten()
    }

    /// Per RFC 9112 §9.3: HTTP/1.1 defaults to keep-alive unless `Connection: close`;
    /// HTTP/1.0 defaults to close unless `Connection: keep-alive`.
    pub fn is_keep_alive(&self) -> bool {
        super::framing::is_keep_alive(self.version, &self.headers)
    }

    /// `true` for methods that conventionally carry no request body (GET/HEAD/DELETE/
    /// OPTIONS/CONNECT), mirroring the teacher's `RequestHeader::need_body`.
    pub fn needs_body(&self) -> bool {
        !matches!(self.method.to_ascii_uppercase().as_str(), "GET" | "HEAD" | "DELETE" | "OPTIONS" | "CONNECT")
    }
}
