//! Splitting source text into literal runs and cloze markers.
//!
//! A marker looks like `((c1::content))` or `((c1::content::hint))`. The
//! content may contain stray `)` characters; the earliest `))` that can
//! close the marker wins.
//!
//! ```
//! use clozit::scan::{scan, Token};
//!
//! let tokens = scan("The capital is ((c1::Paris::city)).");
//! assert_eq!(tokens.len(), 3);
//! match &tokens[1] {
//!     Token::Marker(marker) => {
//!         assert_eq!(marker.index, 1);
//!         assert_eq!(marker.content, "Paris");
//!         assert_eq!(marker.hint, Some("city"));
//!     }
//!     Token::Text(_) => unreachable!(),
//! }
//! ```

use std::sync::LazyLock;

use regex::Regex;

static MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\(\(c([0-9]+)::([\s\S]+?\)*)\)\)").expect("marker pattern is valid")
});

/// Separator between a deletion's content and its hint.
pub const HINT_SEPARATOR: &str = "::";

/// One cloze deletion found in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Marker<'a> {
    /// Cloze number. Well-formed notes start at 1, but `c0` is still a marker.
    pub index: u32,
    /// Content to reveal or blank. Keep-span delimiters are still present.
    pub content: &'a str,
    /// Hint, present only when the inner text splits on `::` into exactly two parts.
    pub hint: Option<&'a str>,
    /// The whole matched marker, parentheses included.
    pub raw: &'a str,
}

impl<'a> Marker<'a> {
    /// Build a marker from its index and the text between `cN::` and `))`.
    pub fn new(index: u32, inner: &'a str, raw: &'a str) -> Self {
        let (content, hint) = split_hint(inner);
        Self {
            index,
            content,
            hint,
            raw,
        }
    }
}

/// Split inner marker text into content and hint.
///
/// Three or more parts mean no hint at all and the whole text is content.
pub fn split_hint(inner: &str) -> (&str, Option<&str>) {
    let mut parts = inner.split(HINT_SEPARATOR);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(content), Some(hint), None) => (content, Some(hint)),
        _ => (inner, None),
    }
}

/// Parse a run of ASCII digits, saturating at `u32::MAX`.
pub(crate) fn parse_number(digits: &str) -> u32 {
    digits.parse().unwrap_or(u32::MAX)
}

/// A piece of scanned source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// Text outside any marker, passed through untouched.
    Text(&'a str),
    /// A cloze marker.
    Marker(Marker<'a>),
}

impl<'a> Token<'a> {
    /// The exact source text this token came from.
    pub fn raw(&self) -> &'a str {
        match self {
            Token::Text(text) => text,
            Token::Marker(marker) => marker.raw,
        }
    }
}

/// Scan `source` into text and marker tokens in source order.
///
/// Joining the [`raw`](Token::raw) text of every token gives back `source`.
/// Adjacent text runs are not merged, and empty runs are omitted.
pub fn scan(source: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut last = 0;
    for caps in MARKER.captures_iter(source) {
        let (Some(whole), Some(number), Some(inner)) = (caps.get(0), caps.get(1), caps.get(2))
        else {
            continue;
        };
        let index = parse_number(number.as_str());
        if index == 0 || index == u32::MAX {
            tracing::debug!(marker = whole.as_str(), index, "unusual cloze number");
        }

        if whole.start() > last {
            tokens.push(Token::Text(&source[last..whole.start()]));
        }
        tokens.push(Token::Marker(Marker::new(index, inner.as_str(), whole.as_str())));
        last = whole.end();
    }
    if last < source.len() {
        tokens.push(Token::Text(&source[last..]));
    }
    tokens
}

/// Iterate over only the markers in `source`.
pub fn markers(source: &str) -> impl Iterator<Item = Marker<'_>> {
    scan(source).into_iter().filter_map(|token| match token {
        Token::Marker(marker) => Some(marker),
        Token::Text(_) => None,
    })
}
