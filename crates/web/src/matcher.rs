//! Segment based path matching.
//!
//! A pattern is split on `/` into segments. A segment is either a literal, which has to
//! equal the request segment verbatim, or a capture starting with `:`, which binds the
//! request segment to the name following the marker:
//!
//! ```
//! use pico_web::matcher::match_path;
//!
//! let params = match_path("/api/posts/:id", "/api/posts/231").unwrap();
//! assert_eq!(params.get("id"), Some("231"));
//!
//! assert!(match_path("/api/posts/:id", "/api/comments/231").is_none());
//! ```
//!
//! Matching is a single left to right pass. Patterns and paths with a different number
//! of segments never match, so `/a` and `/a/` are different routes.
//!
//! The matcher compares strings as they are: callers pass the percent-decoded path,
//! as [`DispatchHandler`](crate::router::DispatchHandler) does.

use crate::Params;

/// Marks a capture segment in a pattern.
pub const CAPTURE_MARKER: char = ':';

/// Matches `path` against `pattern`.
///
/// Returns the captured parameters when the path matches, `None` otherwise. An exact
/// string match returns immediately with no parameters.
pub fn match_path(pattern: &str, path: &str) -> Option<Params> {
    if pattern == path {
        return Some(Params::new());
    }

    let pattern_segments = pattern.split('/');
    let path_segments = path.split('/');

    if pattern_segments.clone().count() != path_segments.clone().count() {
        return None;
    }

    let mut params = Params::new();
    for (pattern_segment, path_segment) in pattern_segments.zip(path_segments) {
        if pattern_segment == path_segment {
            continue;
        }

        match pattern_segment.strip_prefix(CAPTURE_MARKER) {
            Some(name) => params.insert(name, path_segment),
            None => return None,
        }
    }

    Some(params)
}
