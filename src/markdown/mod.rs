//! Markdown to HTML fragment rendering for chat bubbles.
//!
//! The dialect is small: fenced and inline code, bold, italic, `#`–`###`
//! headings, links, `-` and `1.` list items, `>` quotes, paragraphs and line
//! breaks. Input is untrusted, so it is escaped before any tag is produced
//! and the only markup in the output is markup the renderer wrote itself.

mod blocks;
pub mod escape;
mod inline;
mod slots;

use serde::{Deserialize, Serialize};
use tracing::trace;

use slots::Slots;

/// Switches for the two places where the dialect is deliberately lopsided.
///
/// The defaults keep the established output: numbered items are bare
/// `<li>` elements and every quoted line is its own `<blockquote>`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Wrap runs of numbered items in `<ol>`, like bullets are wrapped in `<ul>`.
    pub ordered_list_container: bool,
    /// Merge consecutive quoted lines into one `<blockquote>`.
    pub merge_blockquotes: bool,
}

#[derive(Debug, Clone, Default)]
pub struct Renderer {
    options: RenderOptions,
}

impl Renderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Render `text` into an HTML fragment. Never fails; syntax that does
    /// not match is left as escaped text.
    pub fn render(&self, text: &str) -> String {
        let text = normalize_line_endings(text);
        let escaped = escape::escape_html(&text);

        let mut slots = Slots::default();
        let html = inline::fenced_code(&escaped, &mut slots);
        let html = inline::inline_code(&html, &mut slots);
        let html = inline::bold(&html);
        let html = inline::italic(&html);
        let html = inline::headings(&html);
        let html = inline::links(&html);
        let html = blocks::rewrite(&html, &self.options);
        let html = line_breaks(&html);
        let html = wrap_paragraph(html);
        let html = slots.restore(&html);

        trace!(
            input_len = text.len(),
            output_len = html.len(),
            code_slots = slots.len(),
            "rendered markdown"
        );
        html
    }
}

/// Render with the default options.
pub fn render(text: &str) -> String {
    Renderer::default().render(text)
}

fn normalize_line_endings(text: &str) -> String {
    if text.contains('\r') {
        text.replace("\r\n", "\n").replace('\r', "\n")
    } else {
        text.to_string()
    }
}

/// Blank lines split paragraphs; the remaining newlines become `<br>`.
fn line_breaks(text: &str) -> String {
    text.replace("\n\n", "</p><p>").replace('\n', "<br>")
}

fn wrap_paragraph(html: String) -> String {
    if html.starts_with('<') {
        html
    } else {
        format!("<p>{html}</p>")
    }
}
