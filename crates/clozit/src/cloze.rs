//! Helpers for writing cloze markup.
//!
//! # Cloze Syntax
//!
//! Deletions use the format `((c1::text))` where:
//! - `c1` is the cloze number (c1, c2, c3, etc.)
//! - `text` is the content that will be hidden
//!
//! Optionally, you can add a hint: `((c1::text::hint))`. Parts of the text
//! wrapped in back-ticks are kept visible when the rest is blanked.
//!
//! # Example
//!
//! ```
//! use clozit::cloze::{cloze, cloze_hint, keep};
//!
//! assert_eq!(cloze(1, "Paris"), "((c1::Paris))");
//! assert_eq!(cloze_hint(1, "Paris", "capital city"), "((c1::Paris::capital city))");
//!
//! let text = format!("{} is a city", keep("Paris"));
//! assert_eq!(cloze(2, &text), "((c2::`Paris` is a city))");
//! ```

use std::collections::BTreeSet;

use crate::scan;

/// Create a cloze deletion with the given number.
///
/// ```
/// use clozit::cloze::cloze;
///
/// let sentence = format!(
///     "The {} is the powerhouse of the {}.",
///     cloze(1, "mitochondria"),
///     cloze(2, "cell")
/// );
/// assert_eq!(sentence, "The ((c1::mitochondria)) is the powerhouse of the ((c2::cell)).");
/// ```
pub fn cloze(number: u32, text: &str) -> String {
    format!("((c{}::{}))", number, text)
}

/// Create a cloze deletion with a hint.
pub fn cloze_hint(number: u32, text: &str, hint: &str) -> String {
    format!("((c{}::{}::{}))", number, text, hint)
}

/// Wrap `text` in back-ticks so it survives blanking.
pub fn keep(text: &str) -> String {
    format!("`{}`", text)
}

/// Distinct cloze numbers in `source`, ascending.
///
/// Each number corresponds to one card generated from the note.
///
/// ```
/// use clozit::cloze::cloze_indices;
///
/// let indices = cloze_indices("((c3::a)) ((c1::b)) ((c3::c))");
/// assert_eq!(indices.into_iter().collect::<Vec<_>>(), vec![1, 3]);
/// ```
pub fn cloze_indices(source: &str) -> BTreeSet<u32> {
    scan::markers(source).map(|marker| marker.index).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::split_hint;

    #[test]
    fn test_cloze() {
        assert_eq!(cloze(1, "test"), "((c1::test))");
        assert_eq!(cloze(10, "big number"), "((c10::big number))");
    }

    #[test]
    fn test_cloze_hint_parses_back() {
        let text = cloze_hint(3, "H2O", "formula");
        assert_eq!(text, "((c3::H2O::formula))");

        let marker = scan::markers(&text).next().unwrap();
        assert_eq!(marker.index, 3);
        assert_eq!(split_hint("H2O::formula"), (marker.content, marker.hint));
    }

    #[test]
    fn test_keep() {
        assert_eq!(keep("E"), "`E`");
    }

    #[test]
    fn test_cloze_indices() {
        assert!(cloze_indices("no markers").is_empty());
        let indices = cloze_indices("((c2::a)) ((c2::b)) ((c10::c)) ((c0::d))");
        assert_eq!(indices.into_iter().collect::<Vec<_>>(), vec![0, 2, 10]);
    }
}
