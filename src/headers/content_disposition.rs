//! `Content-Disposition` (RFC 6266): `disposition-type *( ";" disposition-parm )`,
//! including the `filename*` extended-value form (RFC 5987 §3.2) used to carry
//! non-ASCII filenames.

use crate::error::HttpError;
use crate::primitives::percent_decode_strict;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentDisposition {
    pub disposition_type: String,
    /// Parameters in send order; `filename*` values are decoded already.
    pub params: Vec<(String, String)>,
}

impl ContentDisposition {
    pub fn parse(value: &str) -> Result<Self, HttpError> {
        let mut parts = value.split(';');
        let disposition_type = parts.next().unwrap_or("").trim().to_ascii_lowercase();
        if disposition_type.is_empty() {
            return Err(HttpError::invalid_data("Content-Disposition missing disposition-type"));
        }

        let mut params = Vec::new();
        for param in parts {
            let param = param.trim();
            if param.is_empty() {
                continue;
            }
            let (name, raw_value) =
                param.split_once('=').ok_or_else(|| HttpError::invalid_data(format!("Content-Disposition parameter {param:?} missing '='")))?;
            let name = name.trim();
            if let Some(base) = name.strip_suffix('*') {
                let decoded = decode_ext_value(raw_value.trim())?;
                params.push((format!("{}*", base.to_ascii_lowercase()), decoded));
            } else {
                params.push((name.to_ascii_lowercase(), raw_value.trim().trim_matches('"').to_string()));
            }
        }
        Ok(Self { disposition_type, params })
    }

    fn get(&self, name: &str) -> Option<&str> {
        self.params.iter().find(|(n, _)| n == name).map(|(_, v)| v.as_str())
    }

    /// The plain `filename` parameter, if present.
    #[must_use]
    pub fn filename(&self) -> Option<&str> {
        self.get("filename")
    }

    /// The decoded `filename*` extended-value parameter, if present.
    #[must_use]
    pub fn filename_extended(&self) -> Option<&str> {
        self.get("filename*")
    }

    /// `filename*` if present (it is the more precise, RFC-5987-decoded form),
    /// otherwise the plain `filename`.
    #[must_use]
    pub fn preferred_filename(&self) -> Option<&str> {
        self.filename_extended().or_else(|| self.filename())
    }

    #[must_use]
    pub fn to_header_value(&self) -> String {
        let mut s = self.disposition_type.clone();
        for (name, value) in &self.params {
            if let Some(base) = name.strip_suffix('*') {
                s.push_str(&format!("; {base}*=UTF-8''{}", percent_encode(value)));
            } else {
                s.push_str(&format!("; {name}=\"{value}\""));
            }
        }
        s
    }
}

/// Decodes RFC 5987 `ext-value`: `charset "'" [ language ] "'" value-chars`.
/// Only UTF-8 payloads are supported; other charsets are decoded byte-for-byte
/// as UTF-8 lossily since this crate carries no other text-decoding tables.
fn decode_ext_value(value: &str) -> Result<String, HttpError> {
    let mut parts = value.splitn(3, '\'');
    let _charset = parts.next().ok_or_else(|| HttpError::invalid_data(format!("malformed ext-value {value:?}")))?;
    let _language = parts.next().ok_or_else(|| HttpError::invalid_data(format!("malformed ext-value {value:?}")))?;
    let value_chars = parts.next().ok_or_else(|| HttpError::invalid_data(format!("malformed ext-value {value:?}")))?;
    let decoded = percent_decode_strict(value_chars.as_bytes()).ok_or_else(|| HttpError::invalid_data(format!("invalid percent-encoding in {value:?}")))?;
    Ok(String::from_utf8_lossy(&decoded).into_owned())
}

fn percent_encode(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for b in s.bytes() {
        if b.is_ascii_alphanumeric() || matches!(b, b'-' | b'.' | b'_' | b'~') {
            out.push(b as char);
        } else {
            out.push_str(&format!("%{b:02X}"));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_attachment_with_plain_filename() {
        let cd = ContentDisposition::parse(r#"attachment; filename="report.pdf""#).unwrap();
        assert_eq!(cd.disposition_type, "attachment");
        assert_eq!(cd.filename(), Some("report.pdf"));
    }

    #[test]
    fn decodes_extended_filename() {
        let cd = ContentDisposition::parse("attachment; filename*=UTF-8''%e2%82%ac%20rates.pdf").unwrap();
        assert_eq!(cd.filename_extended(), Some("\u{20ac} rates.pdf"));
        assert_eq!(cd.preferred_filename(), Some("\u{20ac} rates.pdf"));
    }

    #[test]
    fn prefers_extended_over_plain_filename() {
        let cd = ContentDisposition::parse(r#"attachment; filename="fallback.txt"; filename*=UTF-8''preferred.txt"#).unwrap();
        assert_eq!(cd.preferred_filename(), Some("preferred.txt"));
    }
}
