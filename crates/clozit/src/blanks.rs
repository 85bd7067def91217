//! Placeholder text for hidden deletion content.
//!
//! Depending on configuration a deletion is replaced by:
//! 1. a fixed run of three blank characters, hiding the true length
//! 2. one blank character per visible character, keeping whitespace and
//!    keep-pattern characters in place
//! 3. a mix of blanks and the literal text of its keep-spans

use unicode_normalization::UnicodeNormalization;

use crate::config::ClozeConfig;
use crate::keep::{self, Segment};
use crate::text::PlainText;

/// Produces blanks for deletion content under one configuration.
pub struct BlankFormatter<'a> {
    config: &'a ClozeConfig,
    text: &'a dyn PlainText,
}

impl<'a> BlankFormatter<'a> {
    /// Create a formatter that extracts plain text from markup with `text`.
    pub fn new(config: &'a ClozeConfig, text: &'a dyn PlainText) -> Self {
        Self { config, text }
    }

    /// Placeholder for `content`, keep-spans included.
    ///
    /// ```
    /// use clozit::{BlankFormatter, ClozeConfig, HtmlText};
    ///
    /// let config = ClozeConfig::default();
    /// let blanks = BlankFormatter::new(&config, &HtmlText);
    ///
    /// assert_eq!(blanks.format_blanks("a long answer"), "...");
    /// assert_eq!(blanks.format_blanks("`Paris` is a city"), "Paris..");
    /// ```
    pub fn format_blanks(&self, content: &str) -> String {
        let segments = keep::split(content);
        if segments.len() == 1 {
            return if self.config.replace_same_length() {
                self.same_length_blanks(content)
            } else {
                self.config.replace_char().repeat(3)
            };
        }

        let mut out = String::new();
        for segment in segments {
            match segment {
                Segment::Outside("") => {}
                Segment::Outside(text) if self.config.replace_same_length() => {
                    out.push_str(&self.same_length_blanks(text));
                }
                Segment::Outside(_) => out.push_str(&self.config.replace_char().repeat(2)),
                Segment::Kept(text) => out.push_str(text),
            }
        }
        out
    }

    /// One blank per visible character of `text`.
    ///
    /// Markup is reduced to its text, combining diacritics are dropped so
    /// `é` counts once, and whitespace and keep-pattern matches are copied
    /// through unchanged.
    pub fn same_length_blanks(&self, text: &str) -> String {
        let plain = if text.contains('<') {
            self.text.plain_text(text)
        } else {
            text.to_string()
        };
        let plain = strip_diacritics(&plain);

        let replace = self.config.replace_char();
        let mut out = String::with_capacity(plain.len());
        let mut last = 0;
        for kept in self.config.blank_split().find_iter(&plain) {
            push_blanks(&mut out, replace, &plain[last..kept.start()]);
            out.push_str(kept.as_str());
            last = kept.end();
        }
        push_blanks(&mut out, replace, &plain[last..]);
        out
    }
}

fn push_blanks(out: &mut String, replace: &str, run: &str) {
    for _ in run.chars() {
        out.push_str(replace);
    }
}

/// NFD-decompose and drop U+0300..=U+036F.
pub fn strip_diacritics(text: &str) -> String {
    text.nfd()
        .filter(|c| !('\u{0300}'..='\u{036f}').contains(c))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::HtmlText;

    fn same_length(replace: &str) -> ClozeConfig {
        ClozeConfig::builder()
            .replace_char(replace)
            .replace_same_length(true)
            .build()
            .unwrap()
    }

    #[test]
    fn test_fixed_blanks_ignore_length() {
        let config = ClozeConfig::default();
        let blanks = BlankFormatter::new(&config, &HtmlText);
        assert_eq!(blanks.format_blanks("x"), "...");
        assert_eq!(blanks.format_blanks("a much longer answer here"), "...");
    }

    #[test]
    fn test_fixed_blanks_use_replace_char() {
        let config = ClozeConfig::builder().replace_char("_").build().unwrap();
        let blanks = BlankFormatter::new(&config, &HtmlText);
        assert_eq!(blanks.format_blanks("Paris"), "___");
    }

    #[test]
    fn test_same_length_preserves_spaces() {
        let config = same_length(".");
        let blanks = BlankFormatter::new(&config, &HtmlText);
        assert_eq!(blanks.format_blanks("café test"), ".... ....");
    }

    #[test]
    fn test_same_length_keeps_punctuation() {
        let config = same_length("_");
        let blanks = BlankFormatter::new(&config, &HtmlText);
        assert_eq!(blanks.same_length_blanks("Yes, sir!"), "___, ___!");
        assert_eq!(blanks.same_length_blanks("wait…"), "____…");
    }

    #[test]
    fn test_same_length_collapses_nothing_in_whitespace() {
        let config = same_length("_");
        let blanks = BlankFormatter::new(&config, &HtmlText);
        assert_eq!(blanks.same_length_blanks("a  b\tc"), "_  _\t_");
    }

    #[test]
    fn test_same_length_strips_markup() {
        let config = same_length("_");
        let blanks = BlankFormatter::new(&config, &HtmlText);
        assert_eq!(blanks.same_length_blanks("<b>big</b> cat"), "___ ___");
    }

    #[test]
    fn test_same_length_uses_injected_text_extractor() {
        let config = same_length("_");
        let stub = |_: &str| "xy".to_string();
        let blanks = BlankFormatter::new(&config, &stub);
        assert_eq!(blanks.same_length_blanks("<img src=a.png>"), "__");
        // No '<', so the extractor is not consulted.
        assert_eq!(blanks.same_length_blanks("abc"), "___");
    }

    #[test]
    fn test_same_length_counts_chars_not_utf16_units() {
        let config = same_length("_");
        let blanks = BlankFormatter::new(&config, &HtmlText);
        // U+1F600 is two UTF-16 units but a single char.
        assert_eq!(blanks.same_length_blanks("a\u{1F600}b"), "___");
        assert_eq!(blanks.same_length_blanks("\u{1D11E} x"), "_ _");
    }

    #[test]
    fn test_same_length_multi_char_replacement() {
        let config = same_length("_ ");
        let blanks = BlankFormatter::new(&config, &HtmlText);
        assert_eq!(blanks.same_length_blanks("ab"), "_ _ ");
    }

    #[test]
    fn test_custom_keep_regex() {
        let config = ClozeConfig::builder()
            .replace_same_length(true)
            .keep_regex("[0-9]")
            .build()
            .unwrap();
        let blanks = BlankFormatter::new(&config, &HtmlText);
        // Only digits are kept now, so the comma is blanked.
        assert_eq!(blanks.same_length_blanks("H2O, ok"), ".2.. ..");
    }

    #[test]
    fn test_keep_spans_with_fixed_blanks() {
        let config = ClozeConfig::default();
        let blanks = BlankFormatter::new(&config, &HtmlText);
        assert_eq!(blanks.format_blanks("`Paris` is a city"), "Paris..");
        assert_eq!(blanks.format_blanks("the `E` in `MC`"), "..E..MC");
        assert_eq!(blanks.format_blanks("`a``b`"), "ab");
    }

    #[test]
    fn test_keep_spans_with_same_length() {
        let config = same_length("_");
        let blanks = BlankFormatter::new(&config, &HtmlText);
        assert_eq!(blanks.format_blanks("`Paris` is a city"), "Paris __ _ ____");
    }

    #[test]
    fn test_strip_diacritics() {
        assert_eq!(strip_diacritics("café"), "cafe");
        assert_eq!(strip_diacritics("Ångström"), "Angstrom");
        assert_eq!(strip_diacritics("plain"), "plain");
    }
}
