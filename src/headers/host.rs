//! The `Host` header (RFC 9112 §3.2): `uri-host [ ":" port ]`.

use crate::error::HttpError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Host {
    pub host: String,
    pub port: Option<u16>,
}

impl Host {
    /// Parses `example.com`, `example.com:8080`, or a bracketed IPv6 literal
    /// (`[::1]:8080`).
    pub fn parse(value: &str) -> Result<Self, HttpError> {
        let value = value.trim();
        if value.is_empty() {
            return Err(HttpError::invalid_data("Host header is empty"));
        }

        if let Some(rest) = value.strip_prefix('[') {
            let end = rest.find(']').ok_or_else(|| HttpError::invalid_data("unterminated IPv6 literal in Host header"))?;
            let host = format!("[{}]", &rest[..end]);
            let after = &rest[end + 1..];
            let port = parse_optional_port(after)?;
            return Ok(Self { host, port });
        }

        match value.rsplit_once(':') {
            Some((host, port_str)) if !port_str.is_empty() && port_str.bytes().all(|b| b.is_ascii_digit()) => {
                let port = port_str.parse().map_err(|_| HttpError::invalid_data(format!("invalid port {port_str:?}")))?;
                Ok(Self { host: host.to_string(), port: Some(port) })
            }
            _ => Ok(Self { host: value.to_string(), port: None }),
        }
    }

    #[must_use] 
    pub fn to_header_value(&self) -> String {
        match self.port {
            Some(port) => format!("{}:{port}", self.host),
            None => self.host.clone(),
        }
    }
}

fn parse_optional_port(s: &str) -> Result<Option<u16>, HttpError> {
    match s.strip_prefix(':') {
        Some(port_str) => port_str.parse().map(Some).map_err(|_| HttpError::invalid_data(format!("invalid port {port_str:?}"))),
        None if s.is_empty() => Ok(None),
        None => Err(HttpError::invalid_data(format!("unexpected trailer {s:?} after Host"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_host() {
        let host = Host::parse("example.com").unwrap();
        assert_eq!(host.host, "example.com");
        assert_eq!(host.port, None);
    }

    #[test]
    fn host_with_port() {
        let host = Host::parse("example.com:8080").unwrap();
        assert_eq!(host.port, Some(8080));
        assert_eq!(host.to_header_value(), "example.com:8080");
    }

    #[test]
    fn bracketed_ipv6() {
        let host = Host::parse("[::1]:9000").unwrap();
        assert_eq!(host.host, "[::1]");
        assert_eq!(host.port, Some(9000));
    }
}
