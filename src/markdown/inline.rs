//! Pattern-driven rewrite stages.
//!
//! Every stage works on text that has already been HTML-escaped. All
//! patterns run on the `regex` crate, which matches in linear time, so
//! unbalanced or deeply repeated markers cannot blow up.

use regex::{Captures, Regex};
use std::sync::OnceLock;

use super::escape::escape_attr;
use super::slots::Slots;

static FENCE_REGEX: OnceLock<Regex> = OnceLock::new();
static INLINE_CODE_REGEX: OnceLock<Regex> = OnceLock::new();
static BOLD_REGEX: OnceLock<Regex> = OnceLock::new();
static ITALIC_REGEX: OnceLock<Regex> = OnceLock::new();
static HEADING_REGEXES: OnceLock<[(Regex, &'static str); 3]> = OnceLock::new();
static LINK_REGEX: OnceLock<Regex> = OnceLock::new();

/// Schemes that execute in the page when followed.
const SCRIPT_SCHEMES: [&str; 3] = ["javascript:", "vbscript:", "data:"];

fn fence_regex() -> &'static Regex {
    FENCE_REGEX.get_or_init(|| {
        // The language tag only counts when the opening line ends right
        // after it; otherwise everything up to the closing fence is code.
        Regex::new(r"(?s)```(?:([\w+#-]*)[ \t]*\n)?(.*?)```").expect("fence regex")
    })
}

fn inline_code_regex() -> &'static Regex {
    INLINE_CODE_REGEX.get_or_init(|| Regex::new(r"`([^`]+)`").expect("inline code regex"))
}

fn bold_regex() -> &'static Regex {
    BOLD_REGEX.get_or_init(|| Regex::new(r"\*\*(.+?)\*\*").expect("bold regex"))
}

fn italic_regex() -> &'static Regex {
    ITALIC_REGEX.get_or_init(|| Regex::new(r"\*(.+?)\*").expect("italic regex"))
}

fn heading_regexes() -> &'static [(Regex, &'static str); 3] {
    HEADING_REGEXES.get_or_init(|| {
        [
            (Regex::new(r"(?m)^### (.+)$").expect("h3 regex"), "h3"),
            (Regex::new(r"(?m)^## (.+)$").expect("h2 regex"), "h2"),
            (Regex::new(r"(?m)^# (.+)$").expect("h1 regex"), "h1"),
        ]
    })
}

fn link_regex() -> &'static Regex {
    LINK_REGEX.get_or_init(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("link regex"))
}

/// Replace fenced code blocks with placeholders for
/// `<pre><code class="language-…">…</code></pre>`.
///
/// An opening fence without a closing one does not match and stays literal.
pub fn fenced_code(text: &str, slots: &mut Slots) -> String {
    fence_regex()
        .replace_all(text, |caps: &Captures| {
            let lang = caps.get(1).map_or("", |m| m.as_str());
            let code = caps.get(2).map_or("", |m| m.as_str()).trim();
            slots.hold(format!(
                r#"<pre><code class="language-{lang}">{code}</code></pre>"#
            ))
        })
        .into_owned()
}

/// Replace `` `span` `` with placeholders for `<code>span</code>`.
pub fn inline_code(text: &str, slots: &mut Slots) -> String {
    inline_code_regex()
        .replace_all(text, |caps: &Captures| {
            slots.hold(format!("<code>{}</code>", &caps[1]))
        })
        .into_owned()
}

pub fn bold(text: &str) -> String {
    bold_regex()
        .replace_all(text, "<strong>${1}</strong>")
        .into_owned()
}

/// Must run after [`bold`], otherwise `**x**` would be read as `*<em>x</em>*`.
pub fn italic(text: &str) -> String {
    italic_regex().replace_all(text, "<em>${1}</em>").into_owned()
}

/// `#`, `##` and `###` headings, longest marker first.
pub fn headings(text: &str) -> String {
    let mut out = text.to_string();
    for (regex, tag) in heading_regexes() {
        out = regex
            .replace_all(&out, format!("<{tag}>${{1}}</{tag}>").as_str())
            .into_owned();
    }
    out
}

/// `[label](url)` links that open in a new tab without opener or referrer.
pub fn links(text: &str) -> String {
    link_regex()
        .replace_all(text, |caps: &Captures| {
            let label = &caps[1];
            let Some(url) = literal_url(&caps[2]) else {
                return caps[0].to_string();
            };
            if is_script_url(&url) {
                return caps[0].to_string();
            }
            format!(
                r#"<a href="{}" target="_blank" rel="noopener noreferrer">{label}</a>"#,
                escape_attr(&url)
            )
        })
        .into_owned()
}

/// Recover the URL as written, before emphasis rewrote its `*` markers.
///
/// Input `<` is escaped before this stage, so any `<` left after undoing
/// emphasis belongs to other renderer markup (a code placeholder or a
/// heading) and the URL is not usable.
fn literal_url(url: &str) -> Option<String> {
    let url = url
        .replace("<strong>", "**")
        .replace("</strong>", "**")
        .replace("<em>", "*")
        .replace("</em>", "*");
    (!url.contains('<')).then_some(url)
}

/// Browsers drop whitespace and control characters inside a scheme, so
/// `java\tscript:` is still `javascript:`.
fn is_script_url(url: &str) -> bool {
    let compact: String = url
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .collect::<String>()
        .to_ascii_lowercase();
    SCRIPT_SCHEMES
        .iter()
        .any(|scheme| compact.starts_with(scheme))
}
