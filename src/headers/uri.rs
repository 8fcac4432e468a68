//! Structural parsing of a request-target (RFC 9112 §3.2) and of absolute URIs
//! (RFC 3986 §3) wherever one appears as a header value (e.g. `Location`).
//!
//! All four request-target forms are handled: origin-form (`path [ "?" query ]`),
//! absolute-form (`scheme "://" authority path-abempty [ "?" query ]`),
//! authority-form (`host ":" port`, used only by `CONNECT`) and asterisk-form
//! (the literal `*`, used only by `OPTIONS`).

use crate::error::HttpError;
use crate::headers::host::Host;
use crate::primitives::percent_decode_strict;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Uri {
    pub scheme: Option<String>,
    pub userinfo: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub path: String,
    pub query: Option<String>,
    pub fragment: Option<String>,
}

impl Uri {
    /// Parses any of the four request-target forms, or an absolute/relative URI
    /// reference as it would appear in a header value such as `Location`.
    pub fn parse(target: &str) -> Result<Self, HttpError> {
        if target == "*" {
            return Ok(Self::empty_with_path("*"));
        }
        if let Some((scheme, rest)) = split_scheme(target) {
            return Self::parse_absolute_form(scheme, rest);
        }
        if is_authority_form(target) {
            return Self::parse_authority_form(target);
        }
        Self::parse_origin_form(target)
    }

    fn empty_with_path(path: &str) -> Self {
        Self { scheme: None, userinfo: None, host: None, port: None, path: path.to_string(), query: None, fragment: None }
    }

    fn parse_absolute_form(scheme: &str, rest: &str) -> Result<Self, HttpError> {
        let authority_end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
        let (authority, rest) = rest.split_at(authority_end);
        let (userinfo, host, port) = parse_authority(authority)?;
        let mut uri = Self::parse_origin_form(if rest.is_empty() { "/" } else { rest })?;
        uri.scheme = Some(scheme.to_ascii_lowercase());
        uri.userinfo = userinfo;
        uri.host = host;
        uri.port = port;
        Ok(uri)
    }

    fn parse_authority_form(target: &str) -> Result<Self, HttpError> {
        let (userinfo, host, port) = parse_authority(target)?;
        Ok(Self { scheme: None, userinfo, host, port, path: String::new(), query: None, fragment: None })
    }

    fn parse_origin_form(target: &str) -> Result<Self, HttpError> {
        let (target, fragment) = match target.split_once('#') {
            Some((t, f)) => (t, Some(f.to_string())),
            None => (target, None),
        };
        let (path, query) = match target.split_once('?') {
            Some((p, q)) => (p, Some(q.to_string())),
            None => (target, None),
        };
        let decoded = percent_decode_strict(path.as_bytes()).ok_or_else(|| HttpError::invalid_data(format!("invalid percent-encoding in path {path:?}")))?;
        let path = String::from_utf8(decoded).map_err(|e| HttpError::invalid_data(format!("path is not UTF-8 after decoding: {e}")))?;
        Ok(Self { scheme: None, userinfo: None, host: None, port: None, path, query, fragment })
    }

    /// The origin-form rendering of this target: `path [ "?" query ]`, as sent
    /// on the request-line.
    #[must_use]
    pub fn origin_form(&self) -> String {
        match &self.query {
            Some(query) => format!("{}?{query}", self.path),
            None => self.path.clone(),
        }
    }

    /// Parses the query string as `application/x-www-form-urlencoded` `&`-separated pairs.
    pub fn query_pairs(&self) -> Result<Vec<(String, String)>, HttpError> {
        let Some(query) = &self.query else {
            return Ok(Vec::new());
        };
        query
            .split('&')
            .filter(|s| !s.is_empty())
            .map(|pair| {
                let (name, value) = pair.split_once('=').unwrap_or((pair, ""));
                let name = percent_decode_strict(name.replace('+', " ").as_bytes())
                    .ok_or_else(|| HttpError::invalid_data(format!("invalid percent-encoding in query key {name:?}")))?;
                let value = percent_decode_strict(value.replace('+', " ").as_bytes())
                    .ok_or_else(|| HttpError::invalid_data(format!("invalid percent-encoding in query value {value:?}")))?;
                Ok((String::from_utf8_lossy(&name).into_owned(), String::from_utf8_lossy(&value).into_owned()))
            })
            .collect()
    }
}

/// Splits off a leading `scheme ":"` when `target` contains `"://"` and the
/// candidate scheme is a valid `ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )` token.
fn split_scheme(target: &str) -> Option<(&str, &str)> {
    let idx = target.find("://")?;
    let candidate = &target[..idx];
    let mut chars = candidate.chars();
    let first_ok = chars.next().is_some_and(|c| c.is_ascii_alphabetic());
    let rest_ok = chars.all(|c| c.is_ascii_alphanumeric() || c == '+' || c == '-' || c == '.');
    if first_ok && rest_ok {
        Some((candidate, &target[idx + 3..]))
    } else {
        None
    }
}

/// Authority-form (RFC 9112 §3.2.3) is used only by `CONNECT`: a bare `host:port`
/// with no scheme, no path, and no unescaped `/`.
fn is_authority_form(target: &str) -> bool {
    !target.is_empty() && !target.starts_with('/') && !target.contains('/') && !target.contains('?') && target.contains(':')
}

fn parse_authority(authority: &str) -> Result<(Option<String>, Option<String>, Option<u16>), HttpError> {
    let (userinfo, host_port) = match authority.split_once('@') {
        Some((u, h)) => (Some(u.to_string()), h),
        None => (None, authority),
    };
    if host_port.is_empty() {
        return Ok((userinfo, None, None));
    }
    let host = Host::parse(host_port)?;
    Ok((userinfo, Some(host.host), host.port))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_path_and_query() {
        let uri = Uri::parse("/search?q=rust").unwrap();
        assert_eq!(uri.path, "/search");
        assert_eq!(uri.query.as_deref(), Some("q=rust"));
    }

    #[test]
    fn decodes_percent_escapes_in_path() {
        let uri = Uri::parse("/a%20b").unwrap();
        assert_eq!(uri.path, "/a b");
    }

    #[test]
    fn parses_query_pairs_with_plus_as_space() {
        let uri = Uri::parse("/search?q=hello+world&page=2").unwrap();
        assert_eq!(uri.query_pairs().unwrap(), vec![("q".to_string(), "hello world".to_string()), ("page".to_string(), "2".to_string())]);
    }

    #[test]
    fn parses_absolute_form() {
        let uri = Uri::parse("http://example.com:8080/path?q=1").unwrap();
        assert_eq!(uri.scheme.as_deref(), Some("http"));
        assert_eq!(uri.host.as_deref(), Some("example.com"));
        assert_eq!(uri.port, Some(8080));
        assert_eq!(uri.path, "/path");
        assert_eq!(uri.query.as_deref(), Some("q=1"));
    }

    #[test]
    fn parses_authority_form_for_connect() {
        let uri = Uri::parse("example.com:443").unwrap();
        assert_eq!(uri.host.as_deref(), Some("example.com"));
        assert_eq!(uri.port, Some(443));
        assert_eq!(uri.path, "");
    }

    #[test]
    fn parses_asterisk_form() {
        let uri = Uri::parse("*").unwrap();
        assert_eq!(uri.path, "*");
        assert!(uri.host.is_none());
    }

    #[test]
    fn origin_form_roundtrip() {
        let uri = Uri::parse("/x?y=1").unwrap();
        assert_eq!(uri.origin_form(), "/x?y=1");
    }
}
