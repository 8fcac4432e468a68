//! Typed parsers for individual header field values (§4.4).
//!
//! [`crate::message::HeaderList`] stores raw `(HeaderName, HeaderValue)` pairs; the
//! types in this module turn a specific header's string value into a structured
//! Rust type, and back. Each exposes `parse(value: &str) -> Result<Self, HttpError>`
//! and `to_header_value(&self) -> String` (or `&'static str` where constant).

mod accept;
mod age;
mod auth;
mod cache_control;
mod content_disposition;
mod content_type;
mod cookie;
mod date;
mod etag;
mod host;
mod range;
mod tokens;
mod uri;

pub use accept::{AcceptList, QualifiedValue};
pub use age::Age;
pub use auth::{BasicAuth, BearerToken, DigestAuth};
pub use cache_control::CacheControl;
pub use content_disposition::ContentDisposition;
pub use content_type::ContentType;
pub use cookie::{CookieList, SameSite, SetCookie};
pub use date::HttpDate;
pub use etag::{EntityTag, EntityTagList};
pub use host::Host;
pub use range::{ByteRangeSpec, ByteRanges, ContentRange};
pub use tokens::{AcceptRanges, ContentEncoding, ContentLanguage, Expect100Continue, Trailer, Upgrade, Vary};
pub use uri::Uri;
