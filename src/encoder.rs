//! Stateless encoding of [`Request`]/[`Response`] values to bytes (§4.3).
//!
//! Unlike the decoder, the encoder carries no state across calls: every function
//! here takes a complete message (or chunk) and returns bytes immediately. It does
//! not inject `Content-Length`, `Host`, or date headers — the caller owns framing.

use crate::message::{Request, Response};
use bytes::{BufMut, Bytes, BytesMut};
use std::io::Write;

/// Initial buffer capacity reserved before writing a start-line and headers.
const INIT_HEADER_SIZE: usize = 1024;

/// Encodes `req` as `method SP target SP version CRLF`, headers, blank line, body.
pub fn encode_request(req: &Request) -> Bytes {
    let mut dst = BytesMut::with_capacity(INIT_HEADER_SIZE + req.body_bytes().len());

    let _ = write!(FastWrite(&mut dst), "{} {} {:?}\r\n", req.method(), req.target(), req.version());

    write_headers(req.headers(), &mut dst);
    dst.extend_from_slice(req.body_bytes());
    dst.freeze()
}

/// Encodes `resp` as `version SP status SP reason CRLF`, headers, blank line, body.
pub fn encode_response(resp: &Response) -> Bytes {
    let mut dst = BytesMut::with_capacity(INIT_HEADER_SIZE + resp.body_bytes().len());

    let _ = write!(FastWrite(&mut dst), "{:?} {} {}\r\n", resp.version(), resp.status_code(), resp.reason_phrase());

    write_headers(resp.headers(), &mut dst);
    dst.extend_from_slice(resp.body_bytes());
    dst.freeze()
}

fn write_headers(headers: &crate::message::HeaderList, dst: &mut BytesMut) {
    for (name, value) in headers.iter() {
        dst.put_slice(name.as_ref());
        dst.put_slice(b": ");
        dst.put_slice(value.as_ref());
        dst.put_slice(b"\r\n");
    }
    dst.put_slice(b"\r\n");
}

/// Encodes one chunk as `hex(len) CRLF bytes CRLF` (RFC 9112 §7.1).
#[must_use] 
pub fn encode_chunk(bytes: &[u8]) -> Bytes {
    let mut dst = BytesMut::with_capacity(bytes.len() + 16);
    let _ = write!(FastWrite(&mut dst), "{:X}\r\n", bytes.len());
    dst.extend_from_slice(bytes);
    dst.extend_from_slice(b"\r\n");
    dst.freeze()
}

/// Encodes a sequence of chunks followed by the terminating zero-length chunk.
///
/// Emits no trailers (§4.3) — trailer support on encode is an open feature gap,
/// tracked in DESIGN.md, mirroring the teacher's `ChunkedEncoder` which is likewise
/// trailer-less.
pub fn encode_chunks<I, B>(chunks: I) -> Bytes
where
    I: IntoIterator<Item = B>,
    B: AsRef<[u8]>,
{
    let mut dst = BytesMut::new();
    for chunk in chunks {
        dst.extend_from_slice(&encode_chunk(chunk.as_ref()));
    }
    dst.extend_from_slice(b"0\r\n\r\n");
    dst.freeze()
}

/// Thin `io::Write` adapter over `BytesMut`, avoiding an extra allocation per `write!`.
struct FastWrite<'a>(&'a mut BytesMut);

impl Write for FastWrite<'_> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.put_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_request_line_and_headers() {
        let req = Request::new("GET", "/x").unwrap().header("Host", "a").unwrap();
        let bytes = encode_request(&req);
        assert_eq!(&bytes[..], b"GET /x HTTP/1.1\r\nhost: a\r\n\r\n");
    }

    #[test]
    fn encodes_response_with_body() {
        let resp = Response::new(200).unwrap().header("Content-Length", "5").unwrap().body(Bytes::from_static(b"hello"));
        let bytes = encode_response(&resp);
        assert_eq!(&bytes[..], b"HTTP/1.1 200 OK\r\ncontent-length: 5\r\n\r\nhello");
    }

    #[test]
    fn chunk_roundtrip_bytes() {
        let chunks = encode_chunks(["Hello, ".as_bytes(), "world!".as_bytes()]);
        assert_eq!(&chunks[..], b"7\r\nHello, \r\n6\r\nworld!\r\n0\r\n\r\n");
    }
}
