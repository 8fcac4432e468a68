//! `Date`/`Last-Modified`/`If-Modified-Since`-style HTTP-date values (RFC 9110 §5.6.7).
//!
//! Accepts all three historical formats on parse (IMF-fixdate, RFC 850, asctime) but
//! always formats as IMF-fixdate, matching the recommended behavior of RFC 9110.

use crate::error::HttpError;
use std::time::SystemTime;

/// A parsed HTTP-date, stored as a [`SystemTime`] for calendar-free comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct HttpDate(SystemTime);

impl HttpDate {
    #[must_use] 
    pub fn from_system_time(time: SystemTime) -> Self {
        Self(time)
    }

    #[must_use] 
    pub fn system_time(&self) -> SystemTime {
        self.0
    }

    /// Parses any of IMF-fixdate, RFC 850 or asctime.
    pub fn parse(value: &str) -> Result<Self, HttpError> {
        httpdate::parse_http_date(value.trim())
            .map(Self)
            .map_err(|e| HttpError::invalid_data(format!("invalid HTTP-date {value:?}: {e}")))
    }

    /// Formats as IMF-fixdate, e.g. `Sun, 06 Nov 1994 08:49:37 GMT`.
    #[must_use] 
    pub fn to_header_value(&self) -> String {
        httpdate::fmt_http_date(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_imf_fixdate() {
        let date = HttpDate::parse("Sun, 06 Nov 1994 08:49:37 GMT").unwrap();
        assert_eq!(date.to_header_value(), "Sun, 06 Nov 1994 08:49:37 GMT");
    }

    #[test]
    fn parses_rfc850_and_asctime_to_same_instant() {
        let fixdate = HttpDate::parse("Sun, 06 Nov 1994 08:49:37 GMT").unwrap();
        let rfc850 = HttpDate::parse("Sunday, 06-Nov-94 08:49:37 GMT").unwrap();
        let asctime = HttpDate::parse("Sun Nov  6 08:49:37 1994").unwrap();
        assert_eq!(fixdate, rfc850);
        assert_eq!(fixdate, asctime);
    }

    #[test]
    fn rejects_garbage() {
        assert!(HttpDate::parse("not a date").is_err());
    }
}
