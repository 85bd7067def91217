//! Cloze deletion rendering for `((cN::content::hint))` markup.
//!
//! Given HTML containing numbered deletions, this crate produces the markup
//! for one card: the current deletion is hidden behind blanks or a hint,
//! other deletions are shown or hidden according to visibility windows, and
//! back-tick quoted keep-spans survive blanking.
//!
//! # Quick Start
//!
//! ```
//! use clozit::{ClozeConfig, RenderContext, Renderer, ShowSetting};
//!
//! # fn main() -> clozit::Result<()> {
//! let config = ClozeConfig::builder()
//!     .show_before(ShowSetting::None)
//!     .replace_char("_")
//!     .build()?;
//! let renderer = Renderer::new(&config);
//!
//! let source = "((c1::Paris)) is the capital of ((c2::`F`rance::country)).";
//!
//! let front = renderer.render(RenderContext::front(2), source)?;
//! assert_eq!(
//!     front,
//!     r#"<span class="other-cloze">[___]</span> is the capital of <span class="cloze">[F__|country]</span>."#
//! );
//!
//! let back = renderer.render(RenderContext::back(2), source)?;
//! assert_eq!(back, r#"Paris is the capital of <span class="cloze">France</span>."#);
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`scan`] - Split source text into literal runs and markers
//! - [`render`] - Rewrite markers for a card face
//! - [`blanks`] - Placeholder text for hidden content
//! - [`keep`] - Back-tick keep-spans
//! - [`template`] - `{blanks}` / `{hint}` templates
//! - [`visibility`] - Show-before / show-after windows
//! - [`config`] - Settings from attributes, TOML, or a builder
//! - [`card`] - Rendering against a card host
//! - [`cloze`] - Helpers for writing markup

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod blanks;
pub mod card;
pub mod cloze;
pub mod config;
pub mod error;
pub mod keep;
pub mod render;
pub mod scan;
pub mod template;
pub mod text;
pub mod visibility;

pub use blanks::BlankFormatter;
pub use card::{
    CardHost, MemoryCard, RenderReport, parse_card_index, render_card, render_with_config,
};
pub use config::{ClozeConfig, ConfigBuilder};
pub use error::{Error, Result};
pub use render::{RenderContext, Renderer, Side};
pub use scan::{Marker, Token};
pub use template::Templates;
pub use text::{HtmlText, PlainText};
pub use visibility::{Position, ShowSetting, Visibility};
