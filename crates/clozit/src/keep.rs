//! Keep-spans: back-tick quoted text inside a deletion that is never blanked.
//!
//! ```
//! use clozit::keep::{has_keep_span, strip_delimiters};
//!
//! assert!(has_keep_span("`Paris` is a city"));
//! assert_eq!(strip_delimiters("`Paris` is a city"), "Paris is a city");
//! assert_eq!(strip_delimiters("no spans"), "no spans");
//! ```

use std::sync::LazyLock;

use regex::Regex;

/// A back-tick, then the shortest non-empty run (newlines included), then a back-tick.
static KEEP_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`([\s\S]+?)`").expect("keep-span pattern is valid"));

/// One piece of a deletion's content, split around keep-spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Text outside any keep-span. May be empty between adjacent spans.
    Outside(&'a str),
    /// The inner text of a keep-span, delimiters removed.
    Kept(&'a str),
}

/// Split `content` into alternating outside and kept segments.
///
/// The result always starts and ends with an `Outside` segment, so content
/// without keep-spans yields a single `Outside` holding all of it.
pub fn split(content: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut last = 0;
    for caps in KEEP_SPAN.captures_iter(content) {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        segments.push(Segment::Outside(&content[last..whole.start()]));
        segments.push(Segment::Kept(inner.as_str()));
        last = whole.end();
    }
    segments.push(Segment::Outside(&content[last..]));
    segments
}

/// Whether `content` contains at least one keep-span.
pub fn has_keep_span(content: &str) -> bool {
    KEEP_SPAN.is_match(content)
}

/// Remove the back-ticks around every keep-span, leaving the inner text in place.
pub fn strip_delimiters(content: &str) -> String {
    KEEP_SPAN.replace_all(content, "$1").into_owned()
}
