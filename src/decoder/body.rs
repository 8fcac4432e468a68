//! Body-framing state machine shared by [`RequestDecoder`](super::RequestDecoder) and
//! [`ResponseDecoder`](super::ResponseDecoder) (§4.5).
//!
//! Grounded on the teacher's `ChunkedDecoder`/`LengthDecoder` pair, but redesigned to
//! accumulate a complete body internally rather than yielding per-chunk `PayloadItem`s:
//! this codec's `decode()` hands the caller one fully-assembled message at a time.

use crate::decoder::head::parse_header_line;
use crate::decoder::scan::{scan_line, Line};
use crate::error::HttpError;
use crate::limits::DecoderLimits;
use crate::primitives::parse_hex_u64;
use bytes::{Bytes, BytesMut};

/// How the body of the message currently being decoded is framed.
pub(crate) enum BodyFraming {
    /// No body at all (e.g. a `GET` request, or a `204`/`304` response).
    Empty,
    /// Exactly `n` raw bytes, per `Content-Length`.
    Length(u64),
    /// `Transfer-Encoding: chunked` (RFC 9112 §7.1).
    Chunked,
    /// No framing header present; body runs until the connection closes.
    UntilClose,
}

#[derive(Debug)]
enum ChunkedState {
    Size,
    Data(u64),
    DataCrlf,
    Trailer,
}

#[derive(Debug)]
enum State {
    Empty,
    Length(u64),
    Chunked(ChunkedState),
    UntilClose,
}

/// Result of feeding more bytes into a [`BodyDecoder`].
pub(crate) enum BodyProgress {
    NeedMore,
    Complete(Bytes),
}

/// Accumulates one message body across repeated `advance()` calls.
#[derive(Debug)]
pub(crate) struct BodyDecoder {
    state: State,
    body: BytesMut,
}

impl BodyDecoder {
    pub fn new(framing: BodyFraming) -> Self {
        let state = match framing {
            BodyFraming::Empty => State::Empty,
            BodyFraming::Length(n) => State::Length(n),
            BodyFraming::Chunked => State::Chunked(ChunkedState::Size),
            BodyFraming::UntilClose => State::UntilClose,
        };
        Self { state, body: BytesMut::new() }
    }

    /// Drains as much of `buf` as the current framing allows, returning
    /// [`BodyProgress::Complete`] once the whole body has been assembled.
    ///
    /// `UntilClose` framing never completes here — the caller must call
    /// [`BodyDecoder::finish_until_close`] on EOF.
    pub fn advance(&mut self, buf: &mut BytesMut, limits: &DecoderLimits) -> Result<BodyProgress, HttpError> {
        loop {
            let Self { state, body } = self;
            match state {
                State::Empty => return Ok(BodyProgress::Complete(Bytes::new())),
                State::UntilClose => {
                    let all = buf.split();
                    push_body_bytes(body, &all, limits)?;
                    return Ok(BodyProgress::NeedMore);
                }
                State::Length(remaining) => {
                    if *remaining == 0 {
                        return Ok(BodyProgress::Complete(take_body(body)));
                    }
                    if buf.is_empty() {
                        return Ok(BodyProgress::NeedMore);
                    }
                    let take = std::cmp::min(*remaining, buf.len() as u64) as usize;
                    let chunk = buf.split_to(take);
                    push_body_bytes(body, &chunk, limits)?;
                    *remaining -= take as u64;
                    if *remaining == 0 {
                        return Ok(BodyProgress::Complete(take_body(body)));
                    }
                    return Ok(BodyProgress::NeedMore);
                }
                State::Chunked(chunked) => match chunked {
                    ChunkedState::Size => match scan_line(buf, 0, limits.max_header_line_size)? {
                        Line::Incomplete => return Ok(BodyProgress::NeedMore),
                        Line::Complete { line, consumed } => {
                            let size_token = line.split(|&b| b == b';').next().unwrap_or(line);
                            let size = parse_hex_u64(size_token)
                                .ok_or_else(|| HttpError::invalid_chunk_size(format!("{:?}", String::from_utf8_lossy(size_token))))?;
                            buf.advance_cursor(consumed);
                            *chunked = if size == 0 { ChunkedState::Trailer } else { ChunkedState::Data(size) };
                        }
                    },
                    ChunkedState::Data(remaining) => {
                        if *remaining == 0 {
                            *chunked = ChunkedState::DataCrlf;
                            continue;
                        }
                        if buf.is_empty() {
                            return Ok(BodyProgress::NeedMore);
                        }
                        let take = std::cmp::min(*remaining, buf.len() as u64) as usize;
                        let chunk = buf.split_to(take);
                        push_body_bytes(body, &chunk, limits)?;
                        *remaining -= take as u64;
                    }
                    ChunkedState::DataCrlf => {
                        if buf.len() < 2 {
                            return Ok(BodyProgress::NeedMore);
                        }
                        if &buf[..2] != b"\r\n" {
                            return Err(HttpError::invalid_chunk_size("missing chunk-data terminator"));
                        }
                        buf.advance_cursor(2);
                        *chunked = ChunkedState::Size;
                    }
                    ChunkedState::Trailer => match scan_line(buf, 0, limits.max_header_line_size)? {
                        Line::Incomplete => return Ok(BodyProgress::NeedMore),
                        Line::Complete { line, consumed } => {
                            if line.is_empty() {
                                buf.advance_cursor(consumed);
                                return Ok(BodyProgress::Complete(take_body(body)));
                            }
                            // Trailer fields are parsed and validated but not attached
                            // to the assembled message (§4.5: announced via `Trailer`).
                            let _ = parse_header_line(line)?;
                            buf.advance_cursor(consumed);
                        }
                    },
                },
            }
        }
    }

    /// Called when the caller observes EOF; only valid for `UntilClose` framing.
    pub fn finish_until_close(&mut self) -> Result<Bytes, HttpError> {
        match self.state {
            State::UntilClose => Ok(take_body(&mut self.body)),
            State::Empty => Ok(Bytes::new()),
            _ => Err(HttpError::UnexpectedEof),
        }
    }
}

fn push_body_bytes(body: &mut BytesMut, bytes: &[u8], limits: &DecoderLimits) -> Result<(), HttpError> {
    let new_size = body.len() + bytes.len();
    if new_size > limits.max_body_size {
        return Err(HttpError::BodyTooLarge { size: new_size, limit: limits.max_body_size });
    }
    body.extend_from_slice(bytes);
    Ok(())
}

fn take_body(body: &mut BytesMut) -> Bytes {
    body.split().freeze()
}

/// Small helper trait so call sites read `buf.advance_cursor(n)` rather than the
/// more easily-confused `bytes::Buf::advance`.
trait AdvanceCursor {
    fn advance_cursor(&mut self, n: usize);
}

impl AdvanceCursor for BytesMut {
    fn advance_cursor(&mut self, n: usize) {
        let _ = self.split_to(n);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_framing_accumulates_exactly_n_bytes() {
        let mut decoder = BodyDecoder::new(BodyFraming::Length(5));
        let mut buf = BytesMut::from(&b"hel"[..]);
        assert!(matches!(decoder.advance(&mut buf, &DecoderLimits::unlimited()).unwrap(), BodyProgress::NeedMore));
        buf.extend_from_slice(b"lo");
        match decoder.advance(&mut buf, &DecoderLimits::unlimited()).unwrap() {
            BodyProgress::Complete(body) => assert_eq!(&body[..], b"hello"),
            BodyProgress::NeedMore => panic!("expected complete"),
        }
    }

    #[test]
    fn chunked_framing_assembles_chunks_and_drops_trailers() {
        let mut decoder = BodyDecoder::new(BodyFraming::Chunked);
        let mut buf = BytesMut::from(&b"4\r\nWiki\r\n5\r\npedia\r\n0\r\nX-Checksum: abc\r\n\r\n"[..]);
        match decoder.advance(&mut buf, &DecoderLimits::unlimited()).unwrap() {
            BodyProgress::Complete(body) => assert_eq!(&body[..], b"Wikipedia"),
            BodyProgress::NeedMore => panic!("expected complete"),
        }
        assert!(buf.is_empty());
    }

    #[test]
    fn chunked_rejects_malformed_size() {
        let mut decoder = BodyDecoder::new(BodyFraming::Chunked);
        let mut buf = BytesMut::from(&b"zz\r\n"[..]);
        assert!(decoder.advance(&mut buf, &DecoderLimits::unlimited()).is_err());
    }

    #[test]
    fn until_close_completes_only_on_eof() {
        let mut decoder = BodyDecoder::new(BodyFraming::UntilClose);
        let mut buf = BytesMut::from(&b"partial"[..]);
        assert!(matches!(decoder.advance(&mut buf, &DecoderLimits::unlimited()).unwrap(), BodyProgress::NeedMore));
        let body = decoder.finish_until_close().unwrap();
        assert_eq!(&body[..], b"partial");
    }

    #[test]
    fn body_too_large_is_rejected() {
        let limits = DecoderLimits { max_body_size: 3, ..DecoderLimits::unlimited() };
        let mut decoder = BodyDecoder::new(BodyFraming::Length(10));
        let mut buf = BytesMut::from(&b"abcd"[..]);
        assert!(matches!(decoder.advance(&mut buf, &limits), Err(HttpError::BodyTooLarge { .. })));
    }
}
