//! Driving a render against a card host.
//!
//! A host is whatever holds the card markup: a web view, a template engine,
//! or the in-memory [`MemoryCard`]. [`render_card`] reads the settings and
//! card identifier from it, rewrites the main cloze field, reveals markers
//! in any auxiliary regions, and finally tells the host to show the field.
//!
//! ```
//! use clozit::card::{render_card, MemoryCard};
//!
//! let mut card = MemoryCard::new("Cloze 2", "((c1::Paris)) is in ((c2::France)).")
//!     .attribute("data-cloze-show-before", "none");
//!
//! let report = render_card(&mut card).unwrap();
//! assert_eq!(report.current, Some(2));
//! assert_eq!(
//!     card.cloze(),
//!     r#"<span class="other-cloze">[...]</span> is in <span class="cloze">[...]</span>."#
//! );
//! assert!(card.is_shown());
//! ```

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::config::ClozeConfig;
use crate::error::{Error, Result};
use crate::render::{RenderContext, Renderer, Side};
use crate::scan;
use crate::text::{HtmlText, PlainText};

static CARD_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9]+([0-9]+)$").expect("card number pattern is valid"));

/// Parse the cloze number from the end of a card identifier.
///
/// The identifier must end in digits preceded by at least one non-digit,
/// such as `Cloze 3` or `c3`. A number too large for `u32` saturates.
///
/// ```
/// use clozit::card::parse_card_index;
///
/// assert_eq!(parse_card_index("Cloze 3"), Some(3));
/// assert_eq!(parse_card_index("c12"), Some(12));
/// assert_eq!(parse_card_index("Card"), None);
/// assert_eq!(parse_card_index("7"), None);
/// ```
pub fn parse_card_index(card: &str) -> Option<u32> {
    let caps = CARD_NUMBER.captures(card)?;
    caps.get(1).map(|m| scan::parse_number(m.as_str()))
}

/// The element tree a card is rendered into.
pub trait CardHost {
    /// Attributes of the main cloze element, as `(name, value)` pairs.
    fn attributes(&self) -> Vec<(String, String)>;

    /// Identifier of the card being shown, e.g. `Cloze 2`.
    fn card_id(&self) -> Option<String>;

    /// Whether the answer side is being shown.
    fn is_back(&self) -> bool;

    /// Markup of the main cloze element.
    fn cloze_html(&self) -> String;

    /// Replace the markup of the main cloze element.
    fn set_cloze_html(&mut self, html: String);

    /// Markup of each auxiliary region, in document order.
    fn uncloze_regions(&self) -> Result<Vec<String>>;

    /// Replace the markup of the auxiliary region at `index`.
    fn set_uncloze_html(&mut self, index: usize, html: String) -> Result<()>;

    /// Make the main cloze element visible.
    fn show(&mut self);
}

/// What a [`render_card`] pass did.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RenderReport {
    /// Cloze number parsed from the card identifier, if any.
    pub current: Option<u32>,
    /// Which side was rendered.
    pub back: bool,
    /// Whether the main field was rewritten.
    pub rewritten: bool,
    /// Number of auxiliary regions revealed.
    pub regions: usize,
    /// Error from the auxiliary pass, if it failed.
    pub uncloze_error: Option<String>,
}

/// Render `host` with the default HTML text extractor.
///
/// See [`render_card_with`].
pub fn render_card<H: CardHost + ?Sized>(host: &mut H) -> Result<RenderReport> {
    render_card_with(host, &HtmlText)
}

/// Render the card held by `host`, reading settings from its attributes.
///
/// An invalid setting is returned as an error before anything is changed.
/// Otherwise this behaves like [`render_with_config`].
pub fn render_card_with<H: CardHost + ?Sized>(
    host: &mut H,
    text: &dyn PlainText,
) -> Result<RenderReport> {
    let config = ClozeConfig::from_attributes(host.attributes())?;
    render_with_config(host, &config, text)
}

/// Render the card held by `host` with an explicit configuration.
///
/// 1. If the card identifier has no trailing number, the main field is
///    left untouched.
/// 2. Every auxiliary region has its markers revealed. A failure here is
///    logged and reported but does not undo the main rewrite.
/// 3. The host is told to show the card.
pub fn render_with_config<H: CardHost + ?Sized>(
    host: &mut H,
    config: &ClozeConfig,
    text: &dyn PlainText,
) -> Result<RenderReport> {
    let renderer = Renderer::with_text(config, text);
    let back = host.is_back();
    let card_id = host.card_id().unwrap_or_default();

    let mut report = RenderReport {
        current: parse_card_index(&card_id),
        back,
        ..RenderReport::default()
    };

    match report.current {
        Some(current) => {
            let side = if back { Side::Back } else { Side::Front };
            let ctx = RenderContext { current, side };
            let html = renderer.render(ctx, &host.cloze_html())?;
            host.set_cloze_html(html);
            report.rewritten = true;
        }
        None => {
            tracing::warn!(card = %card_id, "card identifier has no cloze number, skipping render");
        }
    }

    match reveal_regions(host, &renderer) {
        Ok(count) => report.regions = count,
        Err(e) => {
            tracing::error!(error = %e, "failed to reveal auxiliary regions");
            report.uncloze_error = Some(e.to_string());
        }
    }

    host.show();
    Ok(report)
}

fn reveal_regions<H: CardHost + ?Sized>(host: &mut H, renderer: &Renderer<'_>) -> Result<usize> {
    let regions = host.uncloze_regions()?;
    let count = regions.len();
    for (index, html) in regions.into_iter().enumerate() {
        host.set_uncloze_html(index, renderer.reveal_all(&html))?;
    }
    Ok(count)
}

/// A card held entirely in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryCard {
    card: Option<String>,
    back: bool,
    attributes: Vec<(String, String)>,
    cloze: String,
    uncloze: Vec<String>,
    shown: bool,
}

impl MemoryCard {
    /// Front side of `card` with the given main field markup.
    pub fn new(card: impl Into<String>, cloze: impl Into<String>) -> Self {
        Self {
            card: Some(card.into()),
            cloze: cloze.into(),
            ..Self::default()
        }
    }

    /// Render the answer side instead.
    pub fn back(mut self, back: bool) -> Self {
        self.back = back;
        self
    }

    /// Add an attribute to the main cloze element.
    pub fn attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// Add an auxiliary region.
    pub fn region(mut self, html: impl Into<String>) -> Self {
        self.uncloze.push(html.into());
        self
    }

    /// Current markup of the main field.
    pub fn cloze(&self) -> &str {
        &self.cloze
    }

    /// Current markup of the auxiliary regions.
    pub fn regions(&self) -> &[String] {
        &self.uncloze
    }

    /// Whether [`CardHost::show`] has been called.
    pub fn is_shown(&self) -> bool {
        self.shown
    }
}

impl CardHost for MemoryCard {
    fn attributes(&self) -> Vec<(String, String)> {
        self.attributes.clone()
    }

    fn card_id(&self) -> Option<String> {
        self.card.clone()
    }

    fn is_back(&self) -> bool {
        self.back
    }

    fn cloze_html(&self) -> String {
        self.cloze.clone()
    }

    fn set_cloze_html(&mut self, html: String) {
        self.cloze = html;
    }

    fn uncloze_regions(&self) -> Result<Vec<String>> {
        Ok(self.uncloze.clone())
    }

    fn set_uncloze_html(&mut self, index: usize, html: String) -> Result<()> {
        let slot = self
            .uncloze
            .get_mut(index)
            .ok_or_else(|| Error::Host(format!("no auxiliary region at index {}", index)))?;
        *slot = html;
        Ok(())
    }

    fn show(&mut self) {
        self.shown = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_card_index() {
        assert_eq!(parse_card_index("Cloze 1"), Some(1));
        assert_eq!(parse_card_index("Cloze 10"), Some(10));
        assert_eq!(parse_card_index("c3"), Some(3));
        assert_eq!(parse_card_index("Card 2b"), None);
        assert_eq!(parse_card_index(""), None);
        assert_eq!(parse_card_index("42"), None);
    }

    #[test]
    fn test_parse_card_index_overflow() {
        assert_eq!(parse_card_index("Cloze 99999999999"), Some(u32::MAX));
    }

    #[test]
    fn test_render_front() {
        let mut card = MemoryCard::new("Cloze 1", "((c1::Paris::capital)) of ((c2::France))");
        let report = render_card(&mut card).unwrap();

        assert_eq!(report.current, Some(1));
        assert!(report.rewritten);
        assert!(!report.back);
        assert_eq!(
            card.cloze(),
            r#"<span class="cloze">[capital]</span> of France"#
        );
        assert!(card.is_shown());
    }

    #[test]
    fn test_render_back() {
        let mut card = MemoryCard::new("Cloze 1", "((c1::Paris::capital))").back(true);
        let report = render_card(&mut card).unwrap();

        assert!(report.back);
        assert_eq!(card.cloze(), r#"<span class="cloze">Paris</span>"#);
    }

    #[test]
    fn test_malformed_card_id_is_a_no_op() {
        let source = "((c1::Paris))";
        let mut card = MemoryCard::new("Cloze", source).region("((c1::x::y))");
        let report = render_card(&mut card).unwrap();

        assert_eq!(report.current, None);
        assert!(!report.rewritten);
        assert_eq!(card.cloze(), source);
        // The auxiliary pass still runs, and the card is still shown.
        assert_eq!(card.regions(), ["x"]);
        assert!(card.is_shown());
    }

    #[test]
    fn test_missing_card_id_is_a_no_op() {
        let mut card = MemoryCard {
            cloze: "((c1::a))".to_string(),
            ..MemoryCard::default()
        };
        let report = render_card(&mut card).unwrap();
        assert!(!report.rewritten);
        assert_eq!(card.cloze(), "((c1::a))");
    }

    #[test]
    fn test_uncloze_regions_revealed() {
        let mut card = MemoryCard::new("Cloze 1", "((c1::a))")
            .attribute("data-cloze-show-after", "none")
            .region("Preview: ((c1::a::hint)) ((c2::`b`))")
            .region("no markers");
        let report = render_card(&mut card).unwrap();

        assert_eq!(report.regions, 2);
        assert_eq!(card.regions(), ["Preview: a b", "no markers"]);
    }

    #[test]
    fn test_render_with_explicit_config() {
        let config = ClozeConfig::builder().replace_char("#").build().unwrap();
        let mut card = MemoryCard::new("Cloze 1", "((c1::a))")
            .attribute("data-cloze-replace-char", "ignored");
        render_with_config(&mut card, &config, &HtmlText).unwrap();
        assert_eq!(card.cloze(), r#"<span class="cloze">[###]</span>"#);
    }

    #[test]
    fn test_invalid_config_leaves_card_untouched() {
        let mut card = MemoryCard::new("Cloze 1", "((c1::a))")
            .attribute("data-cloze-keep-regex", "(");
        let result = render_card(&mut card);

        assert!(matches!(result, Err(Error::InvalidKeepPattern(_))));
        assert_eq!(card.cloze(), "((c1::a))");
        assert!(!card.is_shown());
    }
}
