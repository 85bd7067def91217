//! Render configuration.
//!
//! A [`ClozeConfig`] is built once and then shared by every render. It can
//! come from host element attributes, a TOML file, or the fluent
//! [`ConfigBuilder`].
//!
//! # Example TOML
//!
//! ```toml
//! show-before = 1
//! show-after = "none"
//! replace-char = "_"
//! replace-same-length = true
//! always-show-blanks = false
//! blanks-format = "[{blanks}]"
//! hint-format = "[{hint}]"
//! blanks-and-hint-format = "[{blanks}|{hint}]"
//! keep-regex = "[!,.:;?—–…]"
//! ```
//!
//! # Attributes
//!
//! The same settings are read from element attributes named
//! `cloze-show-before`, `cloze-replace-char` and so on. A `data-` prefix is
//! accepted and ignored.
//!
//! ```
//! use clozit::{ClozeConfig, ShowSetting};
//!
//! let config = ClozeConfig::from_attributes([
//!     ("data-cloze-show-before", "2"),
//!     ("data-cloze-replace-same-length", "true"),
//! ])
//! .unwrap();
//!
//! assert_eq!(config.show_before(), ShowSetting::Within(2));
//! assert!(config.replace_same_length());
//! ```

use std::path::Path;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::template::Templates;
use crate::visibility::ShowSetting;

/// Characters that are never blanked by default, even outside keep-spans.
pub const DEFAULT_KEEP_REGEX: &str = "[!,.:;?—–…]";

/// Default replacement character.
pub const DEFAULT_REPLACE_CHAR: &str = ".";

/// Immutable settings for one or more render passes.
#[derive(Debug, Clone)]
pub struct ClozeConfig {
    show_before: ShowSetting,
    show_after: ShowSetting,
    replace_char: String,
    replace_same_length: bool,
    always_show_blanks: bool,
    templates: Templates,
    keep_pattern: Regex,
    /// `\s+` or a keep-pattern match; everything between is blanked.
    blank_split: Regex,
}

impl Default for ClozeConfig {
    fn default() -> Self {
        let keep_pattern = Regex::new(DEFAULT_KEEP_REGEX).expect("default keep regex is valid");
        let blank_split = blank_split(&keep_pattern).expect("default split regex is valid");
        Self {
            show_before: ShowSetting::All,
            show_after: ShowSetting::All,
            replace_char: DEFAULT_REPLACE_CHAR.to_string(),
            replace_same_length: false,
            always_show_blanks: false,
            templates: Templates::default(),
            keep_pattern,
            blank_split,
        }
    }
}

impl ClozeConfig {
    /// Start a [`ConfigBuilder`] with every setting at its default.
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Build a configuration from host attributes.
    ///
    /// Empty values fall back to the default, except `cloze-keep-regex`,
    /// which is taken as written whenever it is present.
    ///
    /// # Errors
    ///
    /// Returns an error if the keep regex does not compile or a template
    /// references an unknown token.
    pub fn from_attributes<I, K, V>(attributes: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut builder = ConfigBuilder::default();
        for (name, value) in attributes {
            builder.apply_attribute(name.as_ref(), value.as_ref());
        }
        builder.build()
    }

    /// Load a configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse a configuration from a TOML string.
    pub fn parse(content: &str) -> Result<Self> {
        ConfigBuilder::parse(content)?.build()
    }

    /// Visibility window for deletions before the current one.
    pub fn show_before(&self) -> ShowSetting {
        self.show_before
    }

    /// Visibility window for deletions after the current one.
    pub fn show_after(&self) -> ShowSetting {
        self.show_after
    }

    /// Text repeated to build blanks.
    pub fn replace_char(&self) -> &str {
        &self.replace_char
    }

    /// Whether blanks match the length of the hidden text.
    pub fn replace_same_length(&self) -> bool {
        self.replace_same_length
    }

    /// Whether blanks are shown next to a hint even without keep-spans.
    pub fn always_show_blanks(&self) -> bool {
        self.always_show_blanks
    }

    /// The three obscured-deletion templates.
    pub fn templates(&self) -> &Templates {
        &self.templates
    }

    /// Characters exempt from same-length blanking.
    ///
    /// Rendering uses a split pattern derived from this one; the getter is
    /// here for inspecting the resolved settings, e.g. after loading TOML.
    pub fn keep_pattern(&self) -> &Regex {
        &self.keep_pattern
    }

    pub(crate) fn blank_split(&self) -> &Regex {
        &self.blank_split
    }
}

fn blank_split(keep: &Regex) -> std::result::Result<Regex, regex::Error> {
    Regex::new(&format!(r"\s+|(?:{})", keep.as_str()))
}

/// Unresolved settings. Deserializes from TOML and resolves into a
/// [`ClozeConfig`] with [`build`](Self::build).
///
/// ```
/// use clozit::ClozeConfig;
///
/// let config = ClozeConfig::builder()
///     .replace_char("_")
///     .hint_format("({hint})")
///     .build()
///     .unwrap();
/// assert_eq!(config.replace_char(), "_");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ConfigBuilder {
    /// See [`ClozeConfig::show_before`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_before: Option<ShowSetting>,

    /// See [`ClozeConfig::show_after`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_after: Option<ShowSetting>,

    /// See [`ClozeConfig::replace_char`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replace_char: Option<String>,

    /// See [`ClozeConfig::replace_same_length`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replace_same_length: Option<bool>,

    /// See [`ClozeConfig::always_show_blanks`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub always_show_blanks: Option<bool>,

    /// Blanks-only template.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blanks_format: Option<String>,

    /// Hint-only template.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint_format: Option<String>,

    /// Blanks-and-hint template.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blanks_and_hint_format: Option<String>,

    /// Keep regex source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keep_regex: Option<String>,
}

impl ConfigBuilder {
    /// Load unresolved settings from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse unresolved settings from a TOML string.
    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Set the before-window.
    pub fn show_before(mut self, setting: ShowSetting) -> Self {
        self.show_before = Some(setting);
        self
    }

    /// Set the after-window.
    pub fn show_after(mut self, setting: ShowSetting) -> Self {
        self.show_after = Some(setting);
        self
    }

    /// Set the blank character.
    pub fn replace_char(mut self, replace: impl Into<String>) -> Self {
        self.replace_char = Some(replace.into());
        self
    }

    /// Toggle same-length blanks.
    pub fn replace_same_length(mut self, enabled: bool) -> Self {
        self.replace_same_length = Some(enabled);
        self
    }

    /// Toggle blanks alongside hints.
    pub fn always_show_blanks(mut self, enabled: bool) -> Self {
        self.always_show_blanks = Some(enabled);
        self
    }

    /// Set the blanks-only template.
    pub fn blanks_format(mut self, format: impl Into<String>) -> Self {
        self.blanks_format = Some(format.into());
        self
    }

    /// Set the hint-only template.
    pub fn hint_format(mut self, format: impl Into<String>) -> Self {
        self.hint_format = Some(format.into());
        self
    }

    /// Set the blanks-and-hint template.
    pub fn blanks_and_hint_format(mut self, format: impl Into<String>) -> Self {
        self.blanks_and_hint_format = Some(format.into());
        self
    }

    /// Set the keep regex source.
    pub fn keep_regex(mut self, pattern: impl Into<String>) -> Self {
        self.keep_regex = Some(pattern.into());
        self
    }

    /// Apply one host attribute. Returns `false` if the name is not a
    /// cloze setting.
    pub fn apply_attribute(&mut self, name: &str, value: &str) -> bool {
        let key = name.strip_prefix("data-").unwrap_or(name);
        let Some(key) = key.strip_prefix("cloze-") else {
            tracing::debug!(attribute = name, "ignoring non-cloze attribute");
            return false;
        };

        // Attribute values are plain strings; booleans are only true when spelled "true".
        let present = (!value.is_empty()).then_some(value);
        match key {
            "keep-regex" => self.keep_regex = Some(value.to_string()),
            "show-before" => {
                if let Some(v) = present {
                    self.show_before = v.parse().ok();
                }
            }
            "show-after" => {
                if let Some(v) = present {
                    self.show_after = v.parse().ok();
                }
            }
            "replace-char" => {
                if let Some(v) = present {
                    self.replace_char = Some(v.to_string());
                }
            }
            "replace-same-length" => {
                if let Some(v) = present {
                    self.replace_same_length = Some(v == "true");
                }
            }
            "always-show-blanks" => {
                if let Some(v) = present {
                    self.always_show_blanks = Some(v == "true");
                }
            }
            "blanks-format" => {
                if let Some(v) = present {
                    self.blanks_format = Some(v.to_string());
                }
            }
            "hint-format" => {
                if let Some(v) = present {
                    self.hint_format = Some(v.to_string());
                }
            }
            "blanks-and-hint-format" => {
                if let Some(v) = present {
                    self.blanks_and_hint_format = Some(v.to_string());
                }
            }
            _ => {
                tracing::debug!(attribute = name, "ignoring unknown cloze attribute");
                return false;
            }
        }
        true
    }

    /// Overlay every setting present in `other` onto `self`.
    pub fn merge(mut self, other: ConfigBuilder) -> Self {
        macro_rules! take {
            ($($field:ident),*) => {
                $(if other.$field.is_some() { self.$field = other.$field; })*
            };
        }
        take!(
            show_before,
            show_after,
            replace_char,
            replace_same_length,
            always_show_blanks,
            blanks_format,
            hint_format,
            blanks_and_hint_format,
            keep_regex
        );
        self
    }

    /// Resolve defaults, compile the keep regex and check the templates.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyReplaceChar`] if the replace character is empty
    /// - [`Error::InvalidKeepPattern`] if the keep regex does not compile
    /// - [`Error::UnknownToken`] if a template uses a token it is never given
    pub fn build(self) -> Result<ClozeConfig> {
        let defaults = Templates::default();
        let templates = Templates {
            blanks: self.blanks_format.unwrap_or(defaults.blanks),
            hint: self.hint_format.unwrap_or(defaults.hint),
            blanks_and_hint: self.blanks_and_hint_format.unwrap_or(defaults.blanks_and_hint),
        };
        templates.validate()?;

        let replace_char = self
            .replace_char
            .unwrap_or_else(|| DEFAULT_REPLACE_CHAR.to_string());
        if replace_char.is_empty() {
            return Err(Error::EmptyReplaceChar);
        }

        let keep_pattern =
            Regex::new(self.keep_regex.as_deref().unwrap_or(DEFAULT_KEEP_REGEX))?;
        let blank_split = blank_split(&keep_pattern)?;

        Ok(ClozeConfig {
            show_before: self.show_before.unwrap_or_default(),
            show_after: self.show_after.unwrap_or_default(),
            replace_char,
            replace_same_length: self.replace_same_length.unwrap_or(false),
            always_show_blanks: self.always_show_blanks.unwrap_or(false),
            templates,
            keep_pattern,
            blank_split,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClozeConfig::default();
        assert_eq!(config.show_before(), ShowSetting::All);
        assert_eq!(config.show_after(), ShowSetting::All);
        assert_eq!(config.replace_char(), ".");
        assert!(!config.replace_same_length());
        assert!(!config.always_show_blanks());
        assert_eq!(config.templates(), &Templates::default());
        assert_eq!(config.keep_pattern().as_str(), DEFAULT_KEEP_REGEX);
    }

    #[test]
    fn test_builder_defaults_match_default() {
        let built = ClozeConfig::builder().build().unwrap();
        let default = ClozeConfig::default();
        assert_eq!(built.replace_char(), default.replace_char());
        assert_eq!(built.keep_pattern().as_str(), default.keep_pattern().as_str());
        assert_eq!(built.blank_split().as_str(), default.blank_split().as_str());
    }

    #[test]
    fn test_from_attributes() {
        let config = ClozeConfig::from_attributes([
            ("data-cloze-show-before", "1"),
            ("cloze-show-after", "none"),
            ("data-cloze-replace-char", "_"),
            ("data-cloze-always-show-blanks", "true"),
            ("data-cloze-hint-format", "({hint})"),
            ("id", "cloze"),
            ("data-card", "Cloze 1"),
        ])
        .unwrap();

        assert_eq!(config.show_before(), ShowSetting::Within(1));
        assert_eq!(config.show_after(), ShowSetting::None);
        assert_eq!(config.replace_char(), "_");
        assert!(config.always_show_blanks());
        assert_eq!(config.templates().hint, "({hint})");
    }

    #[test]
    fn test_empty_attribute_uses_default() {
        let config = ClozeConfig::from_attributes([
            ("data-cloze-replace-char", ""),
            ("data-cloze-show-before", ""),
        ])
        .unwrap();
        assert_eq!(config.replace_char(), ".");
        assert_eq!(config.show_before(), ShowSetting::All);
    }

    #[test]
    fn test_boolean_attribute_must_be_exactly_true() {
        let config =
            ClozeConfig::from_attributes([("cloze-replace-same-length", "TRUE")]).unwrap();
        assert!(!config.replace_same_length());
    }

    #[test]
    fn test_keep_regex_attribute() {
        let config = ClozeConfig::from_attributes([("cloze-keep-regex", "[0-9]")]).unwrap();
        assert!(config.keep_pattern().is_match("7"));
        assert!(!config.keep_pattern().is_match("."));
    }

    #[test]
    fn test_invalid_keep_regex() {
        let result = ClozeConfig::from_attributes([("cloze-keep-regex", "[unclosed")]);
        assert!(matches!(result, Err(Error::InvalidKeepPattern(_))));
    }

    #[test]
    fn test_apply_attribute_reports_unknown() {
        let mut builder = ConfigBuilder::default();
        assert!(!builder.apply_attribute("data-cloze-colour", "red"));
        assert!(!builder.apply_attribute("class", "x"));
        assert!(builder.apply_attribute("data-cloze-show-after", "3"));
        assert_eq!(builder.show_after, Some(ShowSetting::Within(3)));
    }

    #[test]
    fn test_parse_toml() {
        let config = ClozeConfig::parse(
            r#"
show-before = 1
show-after = "all"
replace-char = "_"
replace-same-length = true
blanks-and-hint-format = "{blanks} ({hint})"
"#,
        )
        .unwrap();

        assert_eq!(config.show_before(), ShowSetting::Within(1));
        assert_eq!(config.show_after(), ShowSetting::All);
        assert_eq!(config.replace_char(), "_");
        assert!(config.replace_same_length());
        assert_eq!(config.templates().blanks_and_hint, "{blanks} ({hint})");
    }

    #[test]
    fn test_parse_toml_rejects_unknown_keys() {
        let result = ClozeConfig::parse("colour = \"red\"");
        assert!(matches!(result, Err(Error::TomlParse(_))));
    }

    #[test]
    fn test_bad_template_rejected_at_build() {
        let result = ClozeConfig::builder().blanks_format("[{hint}]").build();
        assert!(matches!(result, Err(Error::UnknownToken { .. })));
    }

    #[test]
    fn test_empty_replace_char_rejected() {
        let result = ClozeConfig::builder().replace_char("").build();
        assert!(matches!(result, Err(Error::EmptyReplaceChar)));
    }

    #[test]
    fn test_merge_overrides() {
        let base = ConfigBuilder::default()
            .replace_char("_")
            .show_before(ShowSetting::None);
        let overlay = ConfigBuilder::default().show_before(ShowSetting::Within(2));
        let merged = base.merge(overlay);
        assert_eq!(merged.replace_char.as_deref(), Some("_"));
        assert_eq!(merged.show_before, Some(ShowSetting::Within(2)));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cloze.toml");
        std::fs::write(&path, "show-after = 0\n").unwrap();

        let config = ClozeConfig::from_file(&path).unwrap();
        assert_eq!(config.show_after(), ShowSetting::Within(0));
    }

    #[test]
    fn test_from_missing_file() {
        let result = ClozeConfig::from_file("/nonexistent/cloze.toml");
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
