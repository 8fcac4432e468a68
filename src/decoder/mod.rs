//! Incremental, restartable HTTP/1.1 decoding (§4.5).
//!
//! Both [`RequestDecoder`] and [`ResponseDecoder`] follow the same shape: feed bytes
//! in as they arrive, call `decode()` to pull out whatever complete messages the
//! buffered bytes now contain, and treat any `Err` as sticky — once a decoder fails
//! it keeps failing until [`RequestDecoder::reset`]/[`ResponseDecoder::reset`] is called.

mod body;
mod head;
mod request;
mod response;
mod scan;

pub use request::RequestDecoder;
pub use response::ResponseDecoder;
