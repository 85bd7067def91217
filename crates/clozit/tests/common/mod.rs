//! Common test utilities for clozit integration tests.

use clozit::{ClozeConfig, RenderContext, Renderer};

/// Build a configuration from `(attribute, value)` pairs.
#[allow(dead_code)]
pub fn config(attributes: &[(&str, &str)]) -> ClozeConfig {
    ClozeConfig::from_attributes(attributes.iter().copied()).unwrap()
}

/// Render the front of card `current`.
#[allow(dead_code)]
pub fn front(config: &ClozeConfig, current: u32, source: &str) -> String {
    Renderer::new(config)
        .render(RenderContext::front(current), source)
        .unwrap()
}

/// Render the back of card `current`.
#[allow(dead_code)]
pub fn back(config: &ClozeConfig, current: u32, source: &str) -> String {
    Renderer::new(config)
        .render(RenderContext::back(current), source)
        .unwrap()
}

/// Wrap `content` the way the current deletion is wrapped.
pub fn current(content: &str) -> String {
    format!(r#"<span class="cloze">{}</span>"#, content)
}

/// Wrap `content` the way other obscured deletions are wrapped.
#[allow(dead_code)]
pub fn other(content: &str) -> String {
    format!(r#"<span class="other-cloze">{}</span>"#, content)
}
