//! Small token-list headers: `Expect` (RFC 9110 §10.1.1), `Trailer` (§6.6), `Upgrade`
//! (§7.8), `Vary` (§12.5.5), `Accept-Ranges` (§14.3) (ADDED, `SPEC_FULL.md` §4.4),
//! `Content-Encoding` (§8.4) and `Content-Language` (§8.5), both plain ordered
//! token lists with no q-values (`Accept-Language`'s q-weighted list is the same
//! shape as `Accept`/`Accept-Encoding`/`Accept-Charset` and is covered by
//! [`AcceptList`](super::AcceptList) rather than duplicated here).

use crate::error::HttpError;
use crate::primitives::is_token;

fn parse_token_list(value: &str) -> Result<Vec<String>, HttpError> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|tok| {
            if !is_token(tok.as_bytes()) {
                return Err(HttpError::invalid_data(format!("{tok:?} is not a token")));
            }
            Ok(tok.to_string())
        })
        .collect()
}

/// `Expect: 100-continue` — the only production RFC 9110 defines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Expect100Continue;

impl Expect100Continue {
    pub fn parse(value: &str) -> Result<Self, HttpError> {
        if value.trim().eq_ignore_ascii_case("100-continue") {
            Ok(Self)
        } else {
            Err(HttpError::invalid_data(format!("unsupported Expect value {value:?}")))
        }
    }

    #[must_use] 
    pub fn to_header_value(&self) -> &'static str {
        "100-continue"
    }
}

/// `Trailer`: field names the sender will append after the chunked body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trailer {
    pub field_names: Vec<String>,
}

impl Trailer {
    pub fn parse(value: &str) -> Result<Self, HttpError> {
        Ok(Self { field_names: parse_token_list(value)? })
    }

    #[must_use] 
    pub fn to_header_value(&self) -> String {
        self.field_names.join(", ")
    }
}

/// `Upgrade`: an ordered list of protocol tokens, e.g. `websocket`, `h2c`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upgrade {
    pub protocols: Vec<String>,
}

impl Upgrade {
    pub fn parse(value: &str) -> Result<Self, HttpError> {
        Ok(Self { protocols: parse_token_list(value)? })
    }

    #[must_use] 
    pub fn to_header_value(&self) -> String {
        self.protocols.join(", ")
    }
}

/// `Vary`: request headers that affected the response representation, or `*`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Vary {
    Any,
    Fields(Vec<String>),
}

impl Vary {
    pub fn parse(value: &str) -> Result<Self, HttpError> {
        if value.trim() == "*" {
            return Ok(Self::Any);
        }
        Ok(Self::Fields(parse_token_list(value)?))
    }

    #[must_use] 
    pub fn to_header_value(&self) -> String {
        match self {
            Self::Any => "*".to_string(),
            Self::Fields(fields) => fields.join(", "),
        }
    }
}

/// `Accept-Ranges`: `bytes`, `none`, or a custom range-unit list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptRanges {
    pub units: Vec<String>,
}

impl AcceptRanges {
    pub fn parse(value: &str) -> Result<Self, HttpError> {
        Ok(Self { units: parse_token_list(value)? })
    }

    #[must_use] 
    pub fn supports_bytes(&self) -> bool {
        self.units.iter().any(|u| u.eq_ignore_ascii_case("bytes"))
    }

    #[must_use] 
    pub fn to_header_value(&self) -> String {
        self.units.join(", ")
    }
}

/// `Content-Encoding`: an ordered list of codings applied to the representation,
/// innermost first, e.g. `gzip` or `br, gzip`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentEncoding {
    pub codings: Vec<String>,
}

impl ContentEncoding {
    pub fn parse(value: &str) -> Result<Self, HttpError> {
        Ok(Self { codings: parse_token_list(value)? })
    }

    #[must_use]
    pub fn to_header_value(&self) -> String {
        self.codings.join(", ")
    }
}

/// `Content-Language`: an ordered list of language tags describing the
/// representation's intended audience. Unlike `Accept-Language`, this header
/// never carries q-values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentLanguage {
    pub tags: Vec<String>,
}

impl ContentLanguage {
    pub fn parse(value: &str) -> Result<Self, HttpError> {
        Ok(Self { tags: parse_token_list(value)? })
    }

    #[must_use]
    pub fn to_header_value(&self) -> String {
        self.tags.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expect_100_continue() {
        assert_eq!(Expect100Continue::parse("100-continue").unwrap(), Expect100Continue);
        assert!(Expect100Continue::parse("nope").is_err());
    }

    #[test]
    fn trailer_and_upgrade_lists() {
        assert_eq!(Trailer::parse("X-Checksum, X-Signature").unwrap().field_names, vec!["X-Checksum", "X-Signature"]);
        assert_eq!(Upgrade::parse("websocket, h2c").unwrap().protocols, vec!["websocket", "h2c"]);
    }

    #[test]
    fn vary_wildcard_and_fields() {
        assert_eq!(Vary::parse("*").unwrap(), Vary::Any);
        assert_eq!(Vary::parse("Accept-Encoding").unwrap(), Vary::Fields(vec!["Accept-Encoding".into()]));
    }

    #[test]
    fn accept_ranges_bytes() {
        assert!(AcceptRanges::parse("bytes").unwrap().supports_bytes());
        assert!(!AcceptRanges::parse("none").unwrap().supports_bytes());
    }

    #[test]
    fn content_encoding_preserves_order() {
        assert_eq!(ContentEncoding::parse("br, gzip").unwrap().codings, vec!["br", "gzip"]);
    }

    #[test]
    fn content_language_list() {
        assert_eq!(ContentLanguage::parse("en-US, de").unwrap().tags, vec!["en-US", "de"]);
    }
}
