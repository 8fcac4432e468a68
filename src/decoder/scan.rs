//! CRLF line scanning shared by start-line and header-block parsing.

use crate::error::HttpError;

/// Result of attempting to pull one `CRLF`-terminated line out of a buffer.
pub enum Line<'a> {
    /// A complete line was found; `line` excludes the terminating CRLF, `consumed`
    /// is the number of bytes (including CRLF) to advance the cursor by.
    Complete { line: &'a [u8], consumed: usize },
    /// No terminator yet; caller should wait for more bytes.
    Incomplete,
}

/// Scans `buf[start..]` for a `CRLF`-terminated line, enforcing `max_line_size` on
/// the unterminated prefix per §4.5 ("any line whose unterminated prefix already
/// exceeds `max_header_line_size` fails before waiting for more data").
pub fn scan_line(buf: &[u8], start: usize, max_line_size: usize) -> Result<Line<'_>, HttpError> {
    let window = &buf[start..];
    if let Some(pos) = window.windows(2).position(|w| w == b"\r\n") { Ok(Line::Complete { line: &window[..pos], consumed: pos + 2 }) } else {
        if window.len() > max_line_size {
            return Err(HttpError::HeaderLineTooLong { size: window.len(), limit: max_line_size });
        }
        Ok(Line::Incomplete)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_terminated_line() {
        let buf = b"GET / HTTP/1.1\r\nHost: a\r\n\r\n";
        match scan_line(buf, 0, 100).unwrap() {
            Line::Complete { line, consumed } => {
                assert_eq!(line, b"GET / HTTP/1.1");
                assert_eq!(consumed, 16);
            }
            Line::Incomplete => panic!("expected complete line"),
        }
    }

    #[test]
    fn incomplete_within_limit() {
        let buf = b"GET / HTTP";
        assert!(matches!(scan_line(buf, 0, 100).unwrap(), Line::Incomplete));
    }

    #[test]
    fn rejects_oversized_unterminated_prefix() {
        let buf = vec![b'a'; 50];
        assert!(scan_line(&buf, 0, 10).is_err());
    }
}
