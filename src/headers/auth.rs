//! `Authorization`/`WWW-Authenticate` credential schemes (RFC 9110 §11): `Basic`
//! (RFC 7617), `Bearer` (RFC 6750) and `Digest` (RFC 7616, RFC 9530 digest fields).
//! Auth-scheme tokens are matched case-insensitively per RFC 9110 §11.4.

use crate::error::HttpError;
use base64::Engine;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicAuth {
    pub user_id: String,
    pub password: String,
}

impl BasicAuth {
    /// Parses `Basic <base64(user-id ":" password)>`.
    pub fn parse(value: &str) -> Result<Self, HttpError> {
        let encoded = strip_scheme(value, "Basic")
            .ok_or_else(|| HttpError::invalid_data(format!("Authorization {value:?} is not a Basic credential")))?;
        let decoded = base64::engine::general_purpose::STANDARD
            .decode(encoded.trim())
            .map_err(|e| HttpError::invalid_data(format!("invalid base64 in Basic credential: {e}")))?;
        let decoded = String::from_utf8(decoded).map_err(|e| HttpError::invalid_data(format!("Basic credential is not UTF-8: {e}")))?;
        let (user_id, password) = decoded.split_once(':').ok_or_else(|| HttpError::invalid_data("Basic credential missing ':'"))?;
        Ok(Self { user_id: user_id.to_string(), password: password.to_string() })
    }

    #[must_use]
    pub fn to_header_value(&self) -> String {
        let raw = format!("{}:{}", self.user_id, self.password);
        format!("Basic {}", base64::engine::general_purpose::STANDARD.encode(raw))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BearerToken {
    pub token: String,
}

impl BearerToken {
    /// Parses `Bearer <token>` (RFC 6750 §2.1).
    pub fn parse(value: &str) -> Result<Self, HttpError> {
        let token =
            strip_scheme(value, "Bearer").ok_or_else(|| HttpError::invalid_data(format!("Authorization {value:?} is not a Bearer credential")))?;
        Ok(Self { token: token.trim().to_string() })
    }

    #[must_use]
    pub fn to_header_value(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

/// `Digest` challenge/credential (RFC 7616, RFC 9530): an unordered
/// comma-separated parameter list, values either tokens or quoted-strings.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DigestAuth {
    pub params: BTreeMap<String, String>,
}

impl DigestAuth {
    pub fn parse(value: &str) -> Result<Self, HttpError> {
        let rest = strip_scheme(value, "Digest").ok_or_else(|| HttpError::invalid_data(format!("Authorization {value:?} is not a Digest credential")))?;
        let mut params = BTreeMap::new();
        for param in split_params(rest) {
            let (name, raw_value) = param.split_once('=').ok_or_else(|| HttpError::invalid_data(format!("Digest parameter {param:?} missing '='")))?;
            let value = unquote(raw_value.trim());
            params.insert(name.trim().to_ascii_lowercase(), value);
        }
        Ok(Self { params })
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    #[must_use]
    pub fn to_header_value(&self) -> String {
        let body = self
            .params
            .iter()
            .map(|(name, value)| format!(r#"{name}="{value}""#))
            .collect::<Vec<_>>()
            .join(", ");
        format!("Digest {body}")
    }
}

/// Splits a `Digest` parameter list on commas that are not inside a quoted-string.
fn split_params(s: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut in_quotes = false;
    let mut start = 0;
    for (i, c) in s.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                out.push(s[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    let tail = s[start..].trim();
    if !tail.is_empty() {
        out.push(tail);
    }
    out
}

fn unquote(s: &str) -> String {
    let Some(inner) = s.strip_prefix('"').and_then(|s| s.strip_suffix('"')) else {
        return s.to_string();
    };
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(escaped) = chars.next() {
                out.push(escaped);
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Strips a case-insensitive `scheme SP` prefix (RFC 9110 §11.4: auth-scheme is a token
/// and token comparison is case-insensitive).
fn strip_scheme<'a>(value: &'a str, scheme: &str) -> Option<&'a str> {
    let value = value.trim();
    let prefix_len = scheme.len();
    if value.len() > prefix_len && value.as_bytes()[prefix_len] == b' ' && value[..prefix_len].eq_ignore_ascii_case(scheme) {
        Some(value[prefix_len + 1..].trim())
    } else {
        None
    }
}
