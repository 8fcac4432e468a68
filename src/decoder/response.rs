//! Incremental HTTP/1.1 response decoder (§4.5).

use crate::decoder::body::{BodyDecoder, BodyFraming, BodyProgress};
use crate::decoder::head::{parse_header_line, parse_status_line, StatusLine};
use crate::decoder::scan::{scan_line, Line};
use crate::error::{ensure, HttpError};
use crate::limits::DecoderLimits;
use crate::message::framing::{content_length, is_chunked};
use crate::message::{HeaderList, Response};
use bytes::{Bytes, BytesMut};
use tracing::trace;

#[derive(Debug)]
enum State {
    Taken,
    StartLine,
    Headers { line: StatusLine, headers: HeaderList },
    Body { line: StatusLine, headers: HeaderList, body: BodyDecoder },
    Failed(HttpError),
}

/// Parses a byte stream into a sequence of [`Response`] values.
///
/// Response body framing depends on context the response itself cannot express —
/// whether the corresponding request used `HEAD` — so the caller must announce that
/// via [`RequestDecoder`](crate::decoder::RequestDecoder)... see
/// [`ResponseDecoder::decode_for_head_request`].
#[derive(Debug)]
pub struct ResponseDecoder {
    limits: DecoderLimits,
    buffer: BytesMut,
    state: State,
    /// Whether `1xx` informational responses are surfaced to the caller or
    /// transparently consumed and skipped (§4.5, resolved in `SPEC_FULL.md` §4.5).
    deliver_interim: bool,
}

impl ResponseDecoder {
    #[must_use] 
    pub fn new() -> Self {
        Self::with_limits(DecoderLimits::default())
    }

    #[must_use] 
    pub fn with_limits(limits: DecoderLimits) -> Self {
        Self { limits, buffer: BytesMut::new(), state: State::StartLine, deliver_interim: true }
    }

    /// Overrides whether `1xx` responses are handed to the caller (default `true`).
    #[must_use] 
    pub fn with_deliver_interim(mut self, deliver_interim: bool) -> Self {
        self.deliver_interim = deliver_interim;
        self
    }

    /// Appends `bytes` to the internal buffer, enforcing `max_buffer_size`.
    ///
    /// The limit only bounds the pre-body portion of the buffer (status-line and
    /// headers): once the blank line ending the headers is in hand, any bytes past
    /// it belong to the body, which is bounded separately by `max_body_size`
    /// (§4.5, §8 "during pre-body parsing").
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

    /// Decodes the next response, assuming it does not correspond to a `HEAD` request.
    pub fn decode(&mut self) -> Result<Option<Response>, HttpError> {
        self.decode_inner(false)
    }

    /// Decodes the next response known to correspond to a `HEAD` request, which per
    /// RFC 9112 §6.3 always carries no body regardless of `Content-Length`.
    pub fn decode_for_head_request(&mut self) -> Result<Option<Response>, HttpError> {
        self.decode_inner(true)
    }

    fn decode_inner(&mut self, is_head_request: bool) -> Result<Option<Response>, HttpError> {
        match self.try_decode(is_head_request) {
            Ok(v) => Ok(v),
            Err(e) => {
                self.state = State::Failed(e.clone());
                Err(e)
            }
        }
    }

    /// Signals EOF. Completes an in-progress `UntilClose`-framed body, if any;
    /// otherwise distinguishes a clean idle shutdown from a truncated message.
    pub fn feed_eof(&mut self) -> Result<Option<Response>, HttpError> {
        match std::mem::replace(&mut self.state, State::Taken) {
            State::Taken => unreachable!("decoder state left empty across yield points"),
            State::Failed(e) => {
                self.state = State::Failed(e.clone());
                Err(e)
            }
            State::StartLine => {
                if self.buffer.is_empty() {
                    self.state = State::StartLine;
                    Ok(None)
                } else {
                    let err = HttpError::UnexpectedEof;
                    self.state = State::Failed(err.clone());
                    Err(err)
                }
            }
            State::Headers { .. } => {
                let err = HttpError::UnexpectedEof;
                self.state = State::Failed(err.clone());
                Err(err)
            }
            State::Body { line, headers, mut body } => match body.finish_until_close() {
                Ok(bytes) => {
                    let response = build_response(line, headers, bytes)?;
                    self.state = State::StartLine;
                    Ok(Some(response))
                }
                Err(e) => {
                    self.state = State::Failed(e.clone());
                    Err(e)
                }
            },
        }
    }

    pub fn reset(&mut self) {
        self.buffer.clear();
        self.state = State::StartLine;
    }

    #[must_use] 
    pub fn remaining(&self) -> &[u8] {
        &self.buffer
    }

    fn try_decode(&mut self, is_head_request: bool) -> Result<Option<Response>, HttpError> {
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
                        let status_line = parse_status_line(line)?;
                        let _ = self.buffer.split_to(consumed);
                        trace!(status = status_line.status_code, "parsed status-line");
                        self.state = State::Headers { line: status_line, headers: HeaderList::new() };
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
                            let framing = determine_body_framing(line.status_code, is_head_request, &headers)?;
                            trace!(status = line.status_code, headers = headers.len(), "response headers complete");
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
                        let is_interim = line.status_code < 200;
                        let response = build_response(line, headers, bytes)?;
                        self.state = State::StartLine;
                        if is_interim && !self.deliver_interim {
                            continue;
                        }
                        return Ok(Some(response));
                    }
                },
            }
        }
    }
}

impl Default for ResponseDecoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Length of the prefix of `buf` that belongs to the status-line and headers,
/// i.e. up to and including the blank line that ends them. If that blank line
/// hasn't arrived yet, the whole buffer is still "pre-body" and counts in full.
fn header_region_len(buf: &[u8]) -> usize {
    buf.windows(4).position(|w| w == b"\r\n\r\n").map_or(buf.len(), |pos| pos + 4)
}

fn determine_body_framing(status_code: u16, is_head_request: bool, headers: &HeaderList) -> Result<BodyFraming, HttpError> {
    ensure!(
        !(headers.contains("transfer-encoding") && headers.contains("content-length")),
        HttpError::invalid_data("message must not contain both content-length and transfer-encoding (request smuggling defense)")
    );
    if is_head_request || status_code == 204 || status_code == 304 || (100..200).contains(&status_code) {
        return Ok(BodyFraming::Empty);
    }
    if is_chunked(headers) {
        Ok(BodyFraming::Chunked)
    } else if let Some(len) = content_length(headers)? {
        Ok(BodyFraming::Length(len))
    } else {
        Ok(BodyFraming::UntilClose)
    }
}

fn build_response(line: StatusLine, headers: HeaderList, body: Bytes) -> Result<Response, HttpError> {
    let mut response = Response::with_version(line.version, line.status_code)?;
    if !line.reason_phrase.is_empty() {
        response = response.reason(line.reason_phrase)?;
    }
    *response.headers_mut() = headers;
    Ok(response.body(body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_a_simple_response() {
        let mut decoder = ResponseDecoder::new();
        decoder.feed(b"HTTP/1.1 200 OK\r\nContent-Length: 5\r\n\r\nhello").unwrap();
        let response = decoder.decode().unwrap().unwrap();
        assert_eq!(response.status_code(), 200);
        assert_eq!(response.reason_phrase(), "OK");
        assert_eq!(&response.body_bytes()[..], b"hello");
    }

    #[test]
    fn head_response_has_no_body_despite_content_length() {
        let mut decoder = ResponseDecoder::new();
        decoder.feed(b"HTTP/1.1 200 OK\r\nContent-Length: 5\r\n\r\n").unwrap();
        let response = decoder.decode_for_head_request().unwrap().unwrap();
        assert!(response.body_bytes().is_empty());
    }

    #[test]
    fn no_content_length_or_chunked_runs_until_close() {
        let mut decoder = ResponseDecoder::new();
        decoder.feed(b"HTTP/1.1 200 OK\r\n\r\npartial bo").unwrap();
        assert!(decoder.decode().unwrap().is_none());
        decoder.feed(b"dy").unwrap();
        assert!(decoder.decode().unwrap().is_none());
        let response = decoder.feed_eof().unwrap().unwrap();
        assert_eq!(&response.body_bytes()[..], b"partial body");
    }

    #[test]
    fn informational_responses_are_delivered_by_default() {
        let mut decoder = ResponseDecoder::new();
        decoder.feed(b"HTTP/1.1 100 Continue\r\n\r\nHTTP/1.1 200 OK\r\nContent-Length: 0\r\n\r\n").unwrap();
        let first = decoder.decode().unwrap().unwrap();
        assert!(first.is_informational());
        let second = decoder.decode().unwrap().unwrap();
        assert_eq!(second.status_code(), 200);
    }

    #[test]
    fn informational_responses_can_be_hidden() {
        let mut decoder = ResponseDecoder::new().with_deliver_interim(false);
        decoder.feed(b"HTTP/1.1 100 Continue\r\n\r\nHTTP/1.1 200 OK\r\nContent-Length: 0\r\n\r\n").unwrap();
        let response = decoder.decode().unwrap().unwrap();
        assert_eq!(response.status_code(), 200);
    }

    #[test]
    fn status_304_has_no_body() {
        let mut decoder = ResponseDecoder::new();
        decoder.feed(b"HTTP/1.1 304 Not Modified\r\nContent-Length: 5\r\n\r\n").unwrap();
        let response = decoder.decode().unwrap().unwrap();
        assert!(response.body_bytes().is_empty());
    }

    #[test]
    fn large_body_within_a_single_feed_does_not_overflow_the_header_buffer_limit() {
        let limits = DecoderLimits { max_buffer_size: 64 * 1024, ..DecoderLimits::default() };
        let mut decoder = ResponseDecoder::with_limits(limits);
        let body = vec![b'x'; 100 * 1024];
        let mut message = format!("HTTP/1.1 200 OK\r\nContent-Length: {}\r\n\r\n", body.len()).into_bytes();
        message.extend_from_slice(&body);
        decoder.feed(&message).unwrap();
        let response = decoder.decode().unwrap().unwrap();
        assert_eq!(response.body_bytes().len(), body.len());
    }
}
