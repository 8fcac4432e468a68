//! A sans-I/O HTTP/1.1 message codec.
//!
//! This crate performs no I/O of its own: callers own the socket, feed received
//! bytes into a [`decoder::RequestDecoder`]/[`decoder::ResponseDecoder`], and hand
//! the bytes produced by [`encoder::encode_request`]/[`encoder::encode_response`] to
//! their transport. Parsing is incremental and restartable — partial input simply
//! yields `Ok(None)` until more bytes arrive.

mod error;
mod limits;
mod primitives;

pub mod decoder;
pub mod encoder;
pub mod headers;
pub mod message;

pub use decoder::{RequestDecoder, ResponseDecoder};
pub use error::HttpError;
pub use limits::DecoderLimits;
pub use message::{HeaderList, Request, Response};
