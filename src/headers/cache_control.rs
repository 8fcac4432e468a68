//! `Cache-Control` (RFC 9111 §5.2): a comma-separated list of directives, some
//! carrying a `=value` argument.

use crate::error::HttpError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheControl {
    /// Directive name (lower-cased) paired with its argument, or `None` for
    /// valueless directives like `no-cache`/`must-revalidate`. Kept in the
    /// order the directives were sent.
    pub directives: Vec<(String, Option<String>)>,
}

impl CacheControl {
    pub fn parse(value: &str) -> Result<Self, HttpError> {
        let mut directives = Vec::new();
        for item in value.split(',') {
            let item = item.trim();
            if item.is_empty() {
                continue;
            }
            match item.split_once('=') {
                Some((name, arg)) => {
                    directives.push((name.trim().to_ascii_lowercase(), Some(arg.trim().trim_matches('"').to_string())));
                }
                None => {
                    directives.push((item.to_ascii_lowercase(), None));
                }
            }
        }
        Ok(Self { directives })
    }

    fn get(&self, name: &str) -> Option<&Option<String>> {
        self.directives.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    #[must_use]
    pub fn max_age(&self) -> Option<u64> {
        self.get("max-age").and_then(Option::as_ref).and_then(|v| v.parse().ok())
    }

    #[must_use]
    pub fn no_cache(&self) -> bool {
        self.has("no-cache")
    }

    #[must_use]
    pub fn no_store(&self) -> bool {
        self.has("no-store")
    }

    #[must_use]
    pub fn to_header_value(&self) -> String {
        self.directives
            .iter()
            .map(|(name, arg)| match arg {
                Some(v) => format!("{name}={v}"),
                None => name.clone(),
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_directives_with_and_without_args() {
        let cc = CacheControl::parse("no-cache, max-age=3600, must-revalidate").unwrap();
        assert!(cc.no_cache());
        assert_eq!(cc.max_age(), Some(3600));
        assert!(cc.has("must-revalidate"));
    }

    #[test]
    fn preserves_directive_order() {
        let cc = CacheControl::parse("max-age=10, no-store, public").unwrap();
        let names: Vec<_> = cc.directives.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["max-age", "no-store", "public"]);
    }

    #[test]
    fn no_store_directive() {
        assert!(CacheControl::parse("no-store").unwrap().no_store());
    }
}
