//! Whether a non-current deletion is revealed or obscured on the front side.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// How many deletions on one side of the current one stay visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShowSetting {
    /// Reveal every deletion on this side.
    #[default]
    All,
    /// Obscure every deletion on this side.
    None,
    /// Reveal deletions at most this many indices away.
    Within(u32),
}

impl FromStr for ShowSetting {
    type Err = std::convert::Infallible;

    /// `all`, a run of digits, or anything else (treated as `none`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            return Ok(ShowSetting::All);
        }
        if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) {
            // Too many digits to fit is still "further than anything".
            return Ok(ShowSetting::Within(s.parse().unwrap_or(u32::MAX)));
        }
        Ok(ShowSetting::None)
    }
}

impl fmt::Display for ShowSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShowSetting::All => write!(f, "all"),
            ShowSetting::None => write!(f, "none"),
            ShowSetting::Within(n) => write!(f, "{}", n),
        }
    }
}

impl Serialize for ShowSetting {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ShowSetting::Within(n) => serializer.serialize_u32(*n),
            other => serializer.serialize_str(&other.to_string()),
        }
    }
}

impl<'de> Deserialize<'de> for ShowSetting {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u32),
            Text(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Number(n) => ShowSetting::Within(n),
            Raw::Text(s) => s.parse().unwrap_or_default(),
        })
    }
}

/// Where a deletion sits relative to the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    /// Lower index than the current deletion.
    Before,
    /// Higher index than the current deletion.
    After,
}

/// Outcome of the visibility policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Show the content.
    Reveal,
    /// Replace the content with blanks and/or hint.
    Obscure,
}

/// Decide whether a deletion `distance` indices away is revealed.
///
/// The position only selects which setting the caller passes in; the
/// distance rule is the same on both sides.
///
/// ```
/// use clozit::visibility::{decide, Position, ShowSetting, Visibility};
///
/// assert_eq!(decide(Position::Before, 2, ShowSetting::Within(2)), Visibility::Reveal);
/// assert_eq!(decide(Position::Before, 3, ShowSetting::Within(2)), Visibility::Obscure);
/// ```
pub fn decide(_position: Position, distance: u32, setting: ShowSetting) -> Visibility {
    match setting {
        ShowSetting::All => Visibility::Reveal,
        ShowSetting::Within(n) if distance <= n => Visibility::Reveal,
        ShowSetting::Within(_) | ShowSetting::None => Visibility::Obscure,
    }
}

/// Classify `index` against `current`, returning `None` when they are equal.
pub fn locate(index: u32, current: u32) -> Option<(Position, u32)> {
    if index < current {
        Some((Position::Before, current - index))
    } else if index > current {
        Some((Position::After, index - current))
    } else {
        None
    }
}
