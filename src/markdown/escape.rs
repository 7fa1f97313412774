/// Escape the three characters that could open markup.
///
/// `&` goes first so the entities produced for `<` and `>` are not escaped
/// a second time.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Make already-escaped text safe inside a double-quoted attribute value.
pub fn escape_attr(value: &str) -> String {
    value.replace('"', "&quot;")
}
