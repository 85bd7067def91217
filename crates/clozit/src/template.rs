//! `{token}` substitution for the blanks and hint templates.
//!
//! ```
//! use clozit::template::apply_template;
//!
//! let out = apply_template("[{blanks}|{hint}]", &[("blanks", "..."), ("hint", "city")]).unwrap();
//! assert_eq!(out, "[...|city]");
//! ```

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::error::{Error, Result};

static TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([a-z]+)\}").expect("token pattern is valid"));

/// Token holding the blanked-out content.
pub const BLANKS: &str = "blanks";

/// Token holding the deletion's hint.
pub const HINT: &str = "hint";

/// Replace every `{name}` in `format` with its value from `tokens`.
///
/// Braces around anything other than lowercase ASCII letters are left as-is.
///
/// # Errors
///
/// Returns [`Error::UnknownToken`] when `format` names a token that
/// `tokens` does not provide.
pub fn apply_template(format: &str, tokens: &[(&str, &str)]) -> Result<String> {
    check_tokens(format, &names(tokens))?;
    let out = TOKEN.replace_all(format, |caps: &Captures<'_>| {
        let key = &caps[1];
        tokens
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, value)| *value)
            .unwrap_or_default()
            .to_string()
    });
    Ok(out.into_owned())
}

/// Check that `format` only references tokens in `allowed`.
///
/// # Errors
///
/// Returns [`Error::UnknownToken`] for the first token outside `allowed`.
pub fn check_tokens(format: &str, allowed: &[&str]) -> Result<()> {
    for caps in TOKEN.captures_iter(format) {
        let key = &caps[1];
        if !allowed.contains(&key) {
            return Err(Error::UnknownToken {
                token: key.to_string(),
                template: format.to_string(),
            });
        }
    }
    Ok(())
}

fn names<'a>(tokens: &[(&'a str, &str)]) -> Vec<&'a str> {
    tokens.iter().map(|(name, _)| *name).collect()
}

/// The three templates used to render an obscured deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Templates {
    /// Used when only blanks are shown. Default `[{blanks}]`.
    pub blanks: String,
    /// Used when only the hint is shown. Default `[{hint}]`.
    pub hint: String,
    /// Used when both are shown. Default `[{blanks}|{hint}]`.
    pub blanks_and_hint: String,
}

impl Default for Templates {
    fn default() -> Self {
        Self {
            blanks: "[{blanks}]".to_string(),
            hint: "[{hint}]".to_string(),
            blanks_and_hint: "[{blanks}|{hint}]".to_string(),
        }
    }
}

impl Templates {
    /// Check that each template only uses the tokens it will be given.
    pub fn validate(&self) -> Result<()> {
        check_tokens(&self.blanks, &[BLANKS])?;
        check_tokens(&self.hint, &[HINT])?;
        check_tokens(&self.blanks_and_hint, &[BLANKS, HINT])
    }

    /// Render the blanks-only template.
    pub fn render_blanks(&self, blanks: &str) -> Result<String> {
        apply_template(&self.blanks, &[(BLANKS, blanks)])
    }

    /// Render the hint-only template.
    pub fn render_hint(&self, hint: &str) -> Result<String> {
        apply_template(&self.hint, &[(HINT, hint)])
    }

    /// Render the blanks-and-hint template.
    pub fn render_blanks_and_hint(&self, blanks: &str, hint: &str) -> Result<String> {
        apply_template(&self.blanks_and_hint, &[(BLANKS, blanks), (HINT, hint)])
    }
}
