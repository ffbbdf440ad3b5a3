//! Percent-encoding for values interpolated into API paths.
//!
//! Job ids are opaque strings chosen by the service. They are encoded before
//! being placed in a path so that a `/`, `?` or `#` in an id can never change
//! which resource a request addresses.
//!
//! # Example
//!
//! ```
//! use sumo_client::endpoints::url_encoding::encode_path_segment;
//!
//! assert_eq!(encode_path_segment("A1B2/../x"), "A1B2%2F..%2Fx");
//! ```

use percent_encoding::{AsciiSet, CONTROLS, percent_encode};

/// Characters that must be percent-encoded in a single path segment.
///
/// RFC 3986 section 3.3 delimiters plus characters that are unsafe in URLs.
pub const PATH_SEGMENT_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'|')
    .add(b'\\')
    .add(b'^')
    .add(b'%')
    .add(b'/')
    .add(b'?')
    .add(b'#')
    .add(b'+')
    .add(b';')
    .add(b'[')
    .add(b']');

/// Percent-encode a string for use as one URL path segment.
pub fn encode_path_segment(segment: &str) -> String {
    percent_encode(segment.as_bytes(), PATH_SEGMENT_ENCODE_SET).to_string()
}
