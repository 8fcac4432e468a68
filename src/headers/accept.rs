//! Quality-weighted header lists: `Accept`, `Accept-Encoding`, `Accept-Language`,
//! `Accept-Charset` (RFC 9110 §12.4-12.5.5) — all share the `token *( ";" "q=" qvalue )`
//! shape. Entries keep the order they were sent in; preference is resolved on
//! demand via [`AcceptList::most_preferred`] rather than by reordering the list.

use crate::error::HttpError;

#[derive(Debug, Clone, PartialEq)]
pub struct QualifiedValue {
    pub value: String,
    pub q: f32,
}

/// A parsed, preference-sorted `Accept*` header.
#[derive(Debug, Clone, PartialEq)]
pub struct AcceptList {
    pub entries: Vec<QualifiedValue>,
}

impl AcceptList {
    pub fn parse(value: &str) -> Result<Self, HttpError> {
        let mut entries = Vec::new();
        for item in value.split(',') {
            let item = item.trim();
            if item.is_empty() {
                continue;
            }
            let mut parts = item.split(';');
            let token = parts.next().unwrap_or("").trim().to_string();
            let mut q = 1.0f32;
            for param in parts {
                let param = param.trim();
                if let Some(raw) = param.strip_prefix("q=").or_else(|| param.strip_prefix("Q=")) {
                    q = raw.trim().parse().map_err(|_| HttpError::invalid_data(format!("invalid q-value {raw:?}")))?;
                    if !(0.0..=1.0).contains(&q) {
                        return Err(HttpError::invalid_data(format!("q-value {q} out of range")));
                    }
                }
            }
            entries.push(QualifiedValue { value: token, q });
        }
        Ok(Self { entries })
    }

    /// The highest-preference token, if any were listed and not explicitly `q=0`.
    #[must_use]
    pub fn most_preferred(&self) -> Option<&str> {
        self.entries
            .iter()
            .filter(|e| e.q > 0.0)
            .max_by(|a, b| a.q.partial_cmp(&b.q).unwrap_or(std::cmp::Ordering::Equal))
            .map(|e| e.value.as_str())
    }

    #[must_use] 
    pub fn to_header_value(&self) -> String {
        self.entries
            .iter()
            .map(|e| if (e.q - 1.0).abs() < f32::EPSILON { e.value.clone() } else { format!("{};q={}", e.value, e.q) })
            .collect::<Vec<_>>()
            .join(", ")
    }
}
