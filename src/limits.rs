//! Resource limits enforced by the incremental decoder.

/// Configurable thresholds the decoder enforces at every growth point.
///
/// Captured by value at decoder construction; a [`DecoderLimits`] instance carries
/// no behavior, only the four thresholds described in the governing specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecoderLimits {
    /// Maximum number of bytes the decode buffer may hold before the body is split off.
    pub max_buffer_size: usize,
    /// Maximum number of header fields (including trailers) a single message may carry.
    pub max_headers_count: usize,
    /// Maximum length, in bytes, of any single unterminated header or start line.
    pub max_header_line_size: usize,
    /// Maximum cumulative body size, whether framed by Content-Length or chunked coding.
    pub max_body_size: usize,
}

impl DecoderLimits {
    pub const DEFAULT_MAX_BUFFER_SIZE: usize = 65_536;
    pub const DEFAULT_MAX_HEADERS_COUNT: usize = 100;
    pub const DEFAULT_MAX_HEADER_LINE_SIZE: usize = 8_192;
    pub const DEFAULT_MAX_BODY_SIZE: usize = 10_485_760;

    /// Returns a [`DecoderLimits`] with every threshold set to `usize::MAX`.
    ///
    /// Intended for tests that want to exercise parsing logic without tripping
    /// limit checks; production callers should use [`DecoderLimits::default`].
    #[must_use] 
    pub fn unlimited() -> Self {
        Self {
            max_buffer_size: usize::MAX,
            max_headers_count: usize::MAX,
            max_header_line_size: usize::MAX,
            max_body_size: usize::MAX,
        }
    }
}

impl Default for DecoderLimits {
    fn default() -> Self {
        Self {
            max_buffer_size: Self::DEFAULT_MAX_BUFFER_SIZE,
            max_headers_count: Self::DEFAULT_MAX_HEADERS_COUNT,
            max_header_line_size: Self::DEFAULT_MAX_HEADER_LINE_SIZE,
            max_body_size: Self::DEFAULT_MAX_BODY_SIZE,
        }
    }
}
