//! Ordered, case-insensitive header field list shared by [`Request`](super::Request)
//! and [`Response`](super::Response).

use crate::error::HttpError;
use crate::primitives::{is_valid_field_value, trim_ows};
use http::{HeaderName, HeaderValue};

/// An insertion-ordered sequence of `(name, value)` pairs.
///
/// Name comparison is always ASCII case-insensitive; duplicate names are kept as
/// separate entries rather than merged, since only a handful of headers define a
/// combination rule (and those live in the header-value parser family, not here).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderList {
    entries: Vec<(HeaderName, HeaderValue)>,
}

impl HeaderList {
    #[must_use] 
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a `(name, value)` pair, validating both per RFC 9110 §5.6.2 / §5.5.
    ///
    /// `value` is trimmed of leading/trailing OWS before storage and validated for
    /// obs-fold (bare CR or LF) and stray control bytes.
    pub fn push(&mut self, name: &str, value: &str) -> Result<(), HttpError> {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| HttpError::InvalidHeaderName(e.to_string()))?;

        let trimmed = trim_ows(value.as_bytes());
        if !is_valid_field_value(trimmed) {
            return Err(HttpError::invalid_header_value(format!("header {name} has invalid field-value")));
        }
        // HeaderValue::from_bytes additionally rejects bare CR/LF (obs-fold) for us.
        let header_value = HeaderValue::from_bytes(trimmed)
            .map_err(|e| HttpError::invalid_header_value(e.to_string()))?;

        self.entries.push((header_name, header_value));
        Ok(())
    }

    /// Appends an already-validated pair without re-checking the grammar.
    ///
    /// Used internally by the decoder, which has already validated bytes taken
    /// straight off the wire.
    pub(crate) fn push_raw(&mut self, name: HeaderName, value: HeaderValue) {
        self.entries.push((name, value));
    }

    #[must_use] 
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use] 
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the first value for `name`, case-insensitively.
    #[must_use] 
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.iter().find(|(n, _)| n.as_str().eq_ignore_ascii_case(name)).and_then(|(_, v)| v.to_str().ok())
    }

    /// Returns an iterator over every value for `name`, in insertion order.
    pub fn get_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.entries
            .iter()
            .filter(move |(n, _)| n.as_str().eq_ignore_ascii_case(name))
            .filter_map(|(_, v)| v.to_str().ok())
    }

    #[must_use] 
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n.as_str().eq_ignore_ascii_case(name))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&HeaderName, &HeaderValue)> {
        self.entries.iter().map(|(n, v)| (n, v))
    }
}

impl<'a> IntoIterator for &'a HeaderList {
    type Item = (&'a HeaderName, &'a HeaderValue);
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter().map(|(n, v)| (n, v)).collect::<Vec<_>>().into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_insertion_order_and_duplicates() {
        let mut headers = HeaderList::new();
        headers.push("X-A", "1").unwrap();
        headers.push("x-b", "2").unwrap();
        headers.push("X-A", "3").unwrap();

        let names: Vec<_> = headers.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["x-a", "x-b", "x-a"]);
        assert_eq!(headers.get("x-a"), Some("1"));
        assert_eq!(headers.get_all("x-a").collect::<Vec<_>>(), vec!["1", "3"]);
    }

    #[test]
    fn trims_ows_and_rejects_obs_fold() {
        let mut headers = HeaderList::new();
        headers.push("Host", "  example.com  ").unwrap();
        assert_eq!(headers.get("host"), Some("example.com"));

        let err = headers.push("X-Bad", "line1\r\n line2").unwrap_err();
        assert!(matches!(err, HttpError::InvalidHeaderValue(_) | HttpError::InvalidHeaderName(_)));
    }

    #[test]
    fn case_insensitive_presence() {
        let mut headers = HeaderList::new();
        headers.push("Content-Length", "5").unwrap();
        assert!(headers.contains("content-length"));
        assert!(headers.contains("CONTENT-LENGTH"));
    }
}
