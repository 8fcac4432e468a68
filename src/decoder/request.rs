//! Incremental HTTP/1.1 request decoder (§4.5).

use crate::decoder::body::{BodyDecoder, BodyFraming, BodyProgress};
use crate::decoder::head::{parse_header_line, parse_request_line, RequestLine};
use crate::decoder::scan::{scan_line, Line};
use crate::error::{ensure, HttpError};
use crate::limits::DecoderLimits;
use crate::message::framing::{content_length, is_chunked};
use crate::message::{HeaderList, Request};
use bytes::{Bytes, BytesMut};
use tracing::trace;

#[derive(Debug)]
enum State {
    /// Placeholder used only while a state value is being moved out of `self.state`
    /// and a replacement is being computed; never observed by a caller.
    Taken,
    StartLine,
    Headers { line: RequestLine, headers: HeaderList },
    Body { line: RequestLine, headers: HeaderList, body: BodyDecoder },
    Failed(HttpError),
}

/// Parses a byte stream into a sequence of [`Request`] values.
///
/// Sans-I/O: the caller reads bytes from its transport and pushes them in via
/// [`feed`](Self::feed); this type never performs I/O itself. Supports pipelining —
/// after a request completes, the decoder is ready to parse the next one from
/// whatever bytes remain buffered.
#[derive(Debug)]
pub struct RequestDecoder {
    limits: DecoderLimits,
    buffer: BytesMut,
    state: State,
}

impl RequestDecoder {
    #[must_use] 
    pub fn new() -> Self {
        Self::with_limits(DecoderLimits::default())
    }

    #[must_use] 
    pub fn with_limits(limits: DecoderLimits) -> Self {
        Self { limits, buffer: BytesMut::new(), state: State::StartLine }
    }

    /// Appends `bytes` to the internal buffer, enforcing `max_buffer_size`.
    ///
    /// The limit only bounds the pre-body portion of the buffer (request-line and
    /// headers): once the blank line ending the headers is in hand, any bytes past
    /// it belong to the body, which is bounded separately by `max_body_size`
    /// (§4.5, §8 "during pre-body parsing"). Without this distinction, a caller
    /// that hands over an entire request (headers plus a large `Content-Length`
    /// body) in a single `feed()` call would be rejected even though the body is
    /// well within `max_body_size`.
    pub fn feed(&mut self, bytes: &[u8]) -> Result<(), HttpError> {
        if let State::Failed(e) = &self.state {
            return Err(e.clone());
        }
        self.buffer.extend_from_slice(bytes);
        if matches!(self.state, State::StartLine | State::Headers { .. }) {
            let size = header_region_len(&self.buffer);
            if size > self.limits.max_buffer_size {
                let err = HttpError::BufferOverflow { size, limit: self.limits.max_buffer_size };
                self.state = State::Failed(err.clone());
                return Err(err);
            }
        }
        Ok(())
    }

    /// Attempts to decode one complete request from the buffered bytes.
    ///
    /// Returns `Ok(None)` when more bytes are needed. Once an error is returned the
    /// decoder is latched: every subsequent call returns a clone of the same error.
    pub fn decode(&mut self) -> Result<Option<Request>, HttpError> {
        match self.try_decode() {
            Ok(v) => Ok(v),
            Err(e) => {
                self.state = State::Failed(e.clone());
                Err(e)
            }
        }
    }

    /// Signals that the transport has reached EOF.
    ///
    /// Requests are never framed "until close", so this only distinguishes a clean
    /// shutdown (idle, no partial message) from a truncated one.
    pub fn feed_eof(&mut self) -> Result<(), HttpError> {
        match &self.state {
            State::StartLine if self.buffer.is_empty() => Ok(()),
            State::Failed(e) => Err(e.clone()),
            _ => {
                let err = HttpError::UnexpectedEof;
                self.state = State::Failed(err.clone());
                Err(err)
            }
        }
    }

    /// Discards any in-progress message and buffered bytes, returning to the initial state.
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.state = State::StartLine;
    }

    /// Bytes buffered but not yet consumed by the decoder.
    #[must_use] 
    pub fn remaining(&self) -> &[u8] {
        &self.buffer
    }

    fn try_decode(&mut self) -> Result<Option<Request>, HttpError> {
        loop {
            match std::mem::replace(&mut self.state, State::Taken) {
                State::Taken => unreachable!("decoder state left empty across yield points"),
                State::Failed(e) => {
                    self.state = State::Failed(e.clone());
                    return Err(e);
                }
                State::StartLine => match scan_line(&self.buffer, 0, self.limits.max_header_line_size)? {
                    Line::Incomplete => {
                        self.state = State::StartLine;
                        return Ok(None);
                    }
                    Line::Complete { line, consumed } => {
                        let request_line = parse_request_line(line)?;
                        let _ = self.buffer.split_to(consumed);
                        trace!(method = %request_line.method, target = %request_line.target, "parsed request-line");
                        self.state = State::Headers { line: request_line, headers: HeaderList::new() };
                    }
                },
                State::Headers { line, mut headers } => match scan_line(&self.buffer, 0, self.limits.max_header_line_size)? {
                    Line::Incomplete => {
                        self.state = State::Headers { line, headers };
                        return Ok(None);
                    }
                    Line::Complete { line: header_line, consumed } => {
                        if header_line.is_empty() {
                            let _ = self.buffer.split_to(consumed);
                            let framing = determine_body_framing(&headers)?;
                            trace!(headers = headers.len(), "request headers complete");
                            self.state = State::Body { line, headers, body: BodyDecoder::new(framing) };
                        } else {
                            let field = parse_header_line(header_line)?;
                            let _ = self.buffer.split_to(consumed);
                            headers.push_raw(field.name, field.value);
                            ensure!(
                                headers.len() <= self.limits.max_headers_count,
                                HttpError::TooManyHeaders { count: headers.len(), limit: self.limits.max_headers_count }
                            );
                            self.state = State::Headers { line, headers };
                        }
                    }
                },
                State::Body { line, headers, mut body } => match body.advance(&mut self.buffer, &self.limits)? {
                    BodyProgress::NeedMore => {
                        self.state = State::Body { line, headers, body };
                        return Ok(None);
                    }
                    BodyProgress::Complete(bytes) => {
                        let request = build_request(line, headers, bytes)?;
                        self.state = State::StartLine;
                        return Ok(Some(request));
                    }
                },
            }
        }
    }
}

impl Default for RequestDecoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Length of the prefix of `buf` that belongs to the request-line and headers,
/// i.e. up to and including the blank line that ends them. If that blank line
/// hasn't arrived yet, the whole buffer is still "pre-body" and counts in full.
fn header_region_len(buf: &[u8]) -> usize {
    buf.windows(4).position(|w| w == b"\r\n\r\n").map_or(buf.len(), |pos| pos + 4)
}

fn determine_body_framing(headers: &HeaderList) -> Result<BodyFraming, HttpError> {
    ensure!(
        !(headers.contains("transfer-encoding") && headers.contains("content-length")),
        HttpError::invalid_data("message must not contain both content-length and transfer-encoding (request smuggling defense)")
    );
    if is_chunked(headers) {
        Ok(BodyFraming::Chunked)
    } else if let Some(len) = content_length(headers)? {
        Ok(BodyFraming::Length(len))
    } else {
        Ok(BodyFraming::Empty)
    }
}

fn build_request(line: RequestLine, headers: HeaderList, body: Bytes) -> Result<Request, HttpError> {
    let mut request = Request::with_version(line.method, line.target, line.version)?;
    *request.headers_mut() = headers;
    Ok(request.body(body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_a_simple_request() {
        let mut decoder = RequestDecoder::new();
        decoder.feed(b"GET /index.html HTTP/1.1\r\nHost: example.com\r\n\r\n").unwrap();
        let request = decoder.decode().unwrap().unwrap();
        assert_eq!(request.method(), "GET");
        assert_eq!(request.target(), "/index.html");
        assert_eq!(request.get_header("host"), Some("example.com"));
        assert!(request.body_bytes().is_empty());
    }

    #[test]
    fn waits_for_more_bytes_across_multiple_feeds() {
        let mut decoder = RequestDecoder::new();
        decoder.feed(b"POST /submit HTTP/1.1\r\nContent-Length: 5\r\n\r\nhel").unwrap();
        assert!(decoder.decode().unwrap().is_none());
        decoder.feed(b"lo").unwrap();
        let request = decoder.decode().unwrap().unwrap();
        assert_eq!(&request.body_bytes()[..], b"hello");
    }

    #[test]
    fn decodes_chunked_request_body() {
        let mut decoder = RequestDecoder::new();
        decoder
            .feed(b"POST /upload HTTP/1.1\r\nTransfer-Encoding: chunked\r\n\r\n4\r\nWiki\r\n0\r\n\r\n")
            .unwrap();
        let request = decoder.decode().unwrap().unwrap();
        assert_eq!(&request.body_bytes()[..], b"Wiki");
    }

    #[test]
    fn rejects_conflicting_content_length_and_transfer_encoding() {
        let mut decoder = RequestDecoder::new();
        decoder
            .feed(b"POST / HTTP/1.1\r\nContent-Length: 4\r\nTransfer-Encoding: chunked\r\n\r\nabcd")
            .unwrap();
        assert!(decoder.decode().is_err());
    }

    #[test]
    fn sticky_failure_returns_same_error_again() {
        let mut decoder = RequestDecoder::new();
        decoder.feed(b"BAD REQUEST LINE HERE\r\n\r\n").unwrap();
        let first = decoder.decode().unwrap_err();
        let second = decoder.decode().unwrap_err();
        assert_eq!(first.to_string(), second.to_string());
    }

    #[test]
    fn supports_pipelined_requests() {
        let mut decoder = RequestDecoder::new();
        decoder.feed(b"GET /a HTTP/1.1\r\n\r\nGET /b HTTP/1.1\r\n\r\n").unwrap();
        let first = decoder.decode().unwrap().unwrap();
        let second = decoder.decode().unwrap().unwrap();
        assert_eq!(first.target(), "/a");
        assert_eq!(second.target(), "/b");
    }

    #[test]
    fn enforces_max_headers_count() {
        let mut decoder = RequestDecoder::with_limits(DecoderLimits { max_headers_count: 1, ..DecoderLimits::default() });
        decoder.feed(b"GET / HTTP/1.1\r\nA: 1\r\nB: 2\r\n\r\n").unwrap();
        assert!(matches!(decoder.decode(), Err(HttpError::TooManyHeaders { .. })));
    }

    #[test]
    fn large_body_within_a_single_feed_does_not_overflow_the_header_buffer_limit() {
        let limits = DecoderLimits { max_buffer_size: 64 * 1024, ..DecoderLimits::default() };
        let mut decoder = RequestDecoder::with_limits(limits);
        let body = vec![b'x'; 100 * 1024];
        let mut message = format!("POST /upload HTTP/1.1\r\nContent-Length: {}\r\n\r\n", body.len()).into_bytes();
        message.extend_from_slice(&body);
        decoder.feed(&message).unwrap();
        let request = decoder.decode().unwrap().unwrap();
        assert_eq!(request.body_bytes().len(), body.len());
    }

    #[test]
    fn never_ending_headers_still_trip_the_buffer_limit() {
        let limits = DecoderLimits { max_buffer_size: 64, ..DecoderLimits::default() };
        let mut decoder = RequestDecoder::with_limits(limits);
        let err = (0..)
            .map(|_| decoder.feed(b"GET / HTTP/1.1\r\nX-Pad: aaaaaaaaaaaaaaaaaaaaaaaa\r\n"))
            .find(Result::is_err)
            .unwrap()
            .unwrap_err();
        assert!(matches!(err, HttpError::BufferOverflow { .. }));
    }
}
