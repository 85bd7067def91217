//! Plain-text extraction from HTML fragments.
//!
//! Same-length blanks count visible characters only, so markup inside a
//! deletion has to be reduced to its text first. The [`PlainText`] trait
//! keeps that capability swappable.

use scraper::Html;
use scraper::node::Node;

/// Extracts the visible text of an HTML fragment.
pub trait PlainText {
    /// Return the concatenated text content of `html`, entities decoded.
    fn plain_text(&self, html: &str) -> String;
}

/// [`PlainText`] backed by an HTML5 fragment parser.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlText;

impl PlainText for HtmlText {
    fn plain_text(&self, html: &str) -> String {
        let fragment = Html::parse_fragment(html);
        let mut result = String::new();
        for node in fragment.root_element().descendants() {
            if let Node::Text(text) = node.value() {
                result.push_str(text);
            }
        }
        result
    }
}

impl<F> PlainText for F
where
    F: Fn(&str) -> String,
{
    fn plain_text(&self, html: &str) -> String {
        self(html)
    }
}
