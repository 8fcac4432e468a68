//! `Cookie` (RFC 6265 §4.2) and `Set-Cookie` (RFC 6265 §4.1).

use crate::error::HttpError;
use crate::headers::date::HttpDate;
use std::fmt::Write as _;

/// A request's `Cookie` header: a `name=value` list, semicolon-separated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieList {
    pub pairs: Vec<(String, String)>,
}

impl CookieList {
    pub fn parse(value: &str) -> Result<Self, HttpError> {
        let pairs = value
            .split(';')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|pair| {
                pair.split_once('=')
                    .map(|(n, v)| (n.trim().to_string(), v.trim().to_string()))
                    .ok_or_else(|| HttpError::invalid_data(format!("cookie-pair {pair:?} missing '='")))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { pairs })
    }

    #[must_use] 
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs.iter().find(|(n, _)| n == name).map(|(_, v)| v.as_str())
    }

    #[must_use] 
    pub fn to_header_value(&self) -> String {
        self.pairs.iter().map(|(n, v)| format!("{n}={v}")).collect::<Vec<_>>().join("; ")
    }
}

/// `SameSite` cookie attribute (RFC 6265bis).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SameSite {
    Strict,
    Lax,
    None,
}

impl SameSite {
    fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "strict" => Some(Self::Strict),
            "lax" => Some(Self::Lax),
            "none" => Some(Self::None),
            _ => None,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Strict => "Strict",
            Self::Lax => "Lax",
            Self::None => "None",
        }
    }
}

/// A response's `Set-Cookie` header: one `name=value` plus attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetCookie {
    pub name: String,
    pub value: String,
    pub path: Option<String>,
    pub domain: Option<String>,
    pub expires: Option<HttpDate>,
    pub max_age: Option<i64>,
    pub secure: bool,
    pub http_only: bool,
    pub same_site: Option<SameSite>,
}

impl SetCookie {
    pub fn parse(value: &str) -> Result<Self, HttpError> {
        let mut parts = value.split(';');
        let first = parts.next().unwrap_or("").trim();
        let (name, cookie_value) = first.split_once('=').ok_or_else(|| HttpError::invalid_data("Set-Cookie missing name=value"))?;

        let mut cookie = SetCookie { name: name.trim().to_string(), value: cookie_value.trim().to_string(), ..Default::default() };
        for attr in parts {
            let attr = attr.trim();
            match attr.split_once('=') {
                Some((attr_name, attr_value)) => match attr_name.trim().to_ascii_lowercase().as_str() {
                    "path" => cookie.path = Some(attr_value.trim().to_string()),
                    "domain" => cookie.domain = Some(attr_value.trim().to_string()),
                    "expires" => cookie.expires = Some(HttpDate::parse(attr_value.trim())?),
                    "max-age" => {
                        cookie.max_age = Some(
                            attr_value.trim().parse().map_err(|_| HttpError::invalid_data(format!("invalid Max-Age {attr_value:?}")))?,
                        );
                    }
                    "samesite" => {
                        cookie.same_site = Some(
                            SameSite::parse(attr_value.trim()).ok_or_else(|| HttpError::invalid_data(format!("invalid SameSite {attr_value:?}")))?,
                        );
                    }
                    _ => {}
                },
                None => match attr.to_ascii_lowercase().as_str() {
                    "secure" => cookie.secure = true,
                    "httponly" => cookie.http_only = true,
                    _ => {}
                },
            }
        }
        Ok(cookie)
    }

    #[must_use] 
    pub fn to_header_value(&self) -> String {
        let mut s = format!("{}={}", self.name, self.value);
        if let Some(path) = &self.path {
            let _ = write!(s, "; Path={path}");
        }
        if let Some(domain) = &self.domain {
            let _ = write!(s, "; Domain={domain}");
        }
        if let Some(expires) = &self.expires {
            let _ = write!(s, "; Expires={}", expires.to_header_value());
        }
        if let Some(max_age) = self.max_age {
            let _ = write!(s, "; Max-Age={max_age}");
        }
        if self.secure {
            s.push_str("; Secure");
        }
        if self.http_only {
            s.push_str("; HttpOnly");
        }
        if let Some(same_site) = self.same_site {
            let _ = write!(s, "; SameSite={}", same_site.as_str());
        }
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_cookie_list() {
        let cookies = CookieList::parse("session=abc123; theme=dark").unwrap();
        assert_eq!(cookies.get("session"), Some("abc123"));
        assert_eq!(cookies.get("theme"), Some("dark"));
    }

    #[test]
    fn parses_set_cookie_attributes() {
        let cookie = SetCookie::parse("session=abc123; Path=/; Secure; HttpOnly; Max-Age=3600").unwrap();
        assert_eq!(cookie.name, "session");
        assert_eq!(cookie.path.as_deref(), Some("/"));
        assert!(cookie.secure);
        assert!(cookie.http_only);
        assert_eq!(cookie.max_age, Some(3600));
    }

    #[test]
    fn parses_expires_and_same_site() {
        let cookie = SetCookie::parse("session=abc; Expires=Sun, 06 Nov 1994 08:49:37 GMT; SameSite=Lax").unwrap();
        assert!(cookie.expires.is_some());
        assert_eq!(cookie.same_site, Some(SameSite::Lax));
        assert!(cookie.to_header_value().contains("SameSite=Lax"));
    }
}
