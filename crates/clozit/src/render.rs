//! Rewriting cloze markup for one card face.
//!
//! # Example
//!
//! ```
//! use clozit::{ClozeConfig, RenderContext, Renderer};
//!
//! let config = ClozeConfig::default();
//! let renderer = Renderer::new(&config);
//! let source = "((c1::Paris::city)) is in ((c2::France)).";
//!
//! let front = renderer.render(RenderContext::front(1), source).unwrap();
//! assert_eq!(front, r#"<span class="cloze">[city]</span> is in France."#);
//!
//! let back = renderer.render(RenderContext::back(1), source).unwrap();
//! assert_eq!(back, r#"<span class="cloze">Paris</span> is in France."#);
//! ```

use crate::blanks::BlankFormatter;
use crate::config::ClozeConfig;
use crate::error::Result;
use crate::keep;
use crate::scan::{self, Marker, Token};
use crate::text::{HtmlText, PlainText};
use crate::visibility::{self, Position, Visibility};

/// Class of the span around the current deletion.
pub const CURRENT_CLASS: &str = "cloze";

/// Class of the span around other obscured deletions.
pub const OTHER_CLASS: &str = "other-cloze";

/// Which face of the card is being rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Question side: the current deletion is hidden.
    Front,
    /// Answer side: every deletion is revealed.
    Back,
}

/// The card being rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderContext {
    /// Cloze number under test.
    pub current: u32,
    /// Face being rendered.
    pub side: Side,
}

impl RenderContext {
    /// Question side of card `current`.
    pub fn front(current: u32) -> Self {
        Self {
            current,
            side: Side::Front,
        }
    }

    /// Answer side of card `current`.
    pub fn back(current: u32) -> Self {
        Self {
            current,
            side: Side::Back,
        }
    }
}

/// Rewrites markers according to a [`ClozeConfig`].
pub struct Renderer<'a> {
    config: &'a ClozeConfig,
    text: &'a dyn PlainText,
}

impl<'a> Renderer<'a> {
    /// Create a renderer using the HTML fragment parser for plain text.
    pub fn new(config: &'a ClozeConfig) -> Self {
        Self {
            config,
            text: &HtmlText,
        }
    }

    /// Create a renderer with a custom plain-text extractor.
    pub fn with_text(config: &'a ClozeConfig, text: &'a dyn PlainText) -> Self {
        Self { config, text }
    }

    /// Rewrite every marker in `source` for the card in `ctx`.
    ///
    /// Text outside markers is copied unchanged, and replacement text is
    /// never scanned again.
    ///
    /// # Errors
    ///
    /// Returns an error if a template cannot be filled in. Configurations
    /// built through [`ClozeConfig`] are validated up front, so this does
    /// not happen in practice.
    pub fn render(&self, ctx: RenderContext, source: &str) -> Result<String> {
        let tokens = scan::scan(source);
        let mut out = String::with_capacity(source.len());
        let mut count = 0usize;
        for token in tokens {
            match token {
                Token::Text(text) => out.push_str(text),
                Token::Marker(marker) => {
                    count += 1;
                    out.push_str(&self.render_marker(ctx, &marker)?);
                }
            }
        }
        tracing::debug!(
            current = ctx.current,
            side = ?ctx.side,
            markers = count,
            "rendered cloze content"
        );
        Ok(out)
    }

    /// Replacement text for a single marker.
    pub fn render_marker(&self, ctx: RenderContext, marker: &Marker<'_>) -> Result<String> {
        let is_current = marker.index == ctx.current;
        let rendered = match ctx.side {
            Side::Back if is_current => {
                wrap_span(&keep::strip_delimiters(marker.content), CURRENT_CLASS)
            }
            Side::Back => keep::strip_delimiters(marker.content),
            Side::Front if is_current => self.obscure(marker.content, marker.hint, CURRENT_CLASS)?,
            Side::Front => match self.visibility(marker.index, ctx.current) {
                Visibility::Reveal => keep::strip_delimiters(marker.content),
                Visibility::Obscure => self.obscure(marker.content, marker.hint, OTHER_CLASS)?,
            },
        };
        tracing::trace!(
            index = marker.index,
            current = ctx.current,
            side = ?ctx.side,
            output = %rendered,
            "rendered marker"
        );
        Ok(rendered)
    }

    /// Reveal every marker in `source`, dropping hints.
    ///
    /// Used for auxiliary regions outside the main cloze field, where
    /// markers are always shown regardless of side or index.
    ///
    /// ```
    /// use clozit::{ClozeConfig, Renderer};
    ///
    /// let config = ClozeConfig::default();
    /// let renderer = Renderer::new(&config);
    /// assert_eq!(renderer.reveal_all("((c3::`H`ydrogen::element))"), "Hydrogen");
    /// ```
    pub fn reveal_all(&self, source: &str) -> String {
        scan::scan(source)
            .into_iter()
            .map(|token| match token {
                Token::Text(text) => text.to_string(),
                Token::Marker(marker) => keep::strip_delimiters(marker.content),
            })
            .collect()
    }

    fn visibility(&self, index: u32, current: u32) -> Visibility {
        match visibility::locate(index, current) {
            Some((position @ Position::Before, distance)) => {
                visibility::decide(position, distance, self.config.show_before())
            }
            Some((position @ Position::After, distance)) => {
                visibility::decide(position, distance, self.config.show_after())
            }
            None => Visibility::Reveal,
        }
    }

    /// Blanks and/or hint for hidden content, wrapped in a span of `class`.
    ///
    /// Blanks are left out when there is a hint, no keep-span, and
    /// `always_show_blanks` is off. An empty hint counts as no hint.
    fn obscure(&self, content: &str, hint: Option<&str>, class: &str) -> Result<String> {
        let templates = self.config.templates();
        let blanks = BlankFormatter::new(self.config, self.text);
        let show_blanks = self.config.always_show_blanks() || keep::has_keep_span(content);
        let replacement = match hint.filter(|h| !h.is_empty()) {
            Some(hint) if show_blanks => {
                templates.render_blanks_and_hint(&blanks.format_blanks(content), hint)?
            }
            Some(hint) => templates.render_hint(hint)?,
            None => templates.render_blanks(&blanks.format_blanks(content))?,
        };
        Ok(wrap_span(&replacement, class))
    }
}

fn wrap_span(content: &str, class: &str) -> String {
    format!("<span class=\"{}\">{}</span>", class, content)
}
