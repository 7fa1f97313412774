use regex::{Captures, Regex};
use std::sync::OnceLock;

static SLOT_REGEX: OnceLock<Regex> = OnceLock::new();

fn slot_regex() -> &'static Regex {
    SLOT_REGEX.get_or_init(|| Regex::new(r"<@(\d+)@>").expect("slot regex"))
}

/// Finished HTML set aside while the remaining stages run.
///
/// Code blocks and inline code are replaced by `<@N@>` placeholders so no
/// later stage can reinterpret their content. The placeholder cannot come
/// from the input: every `<` in the input has been escaped by then.
#[derive(Debug, Default)]
pub struct Slots {
    held: Vec<String>,
}

impl Slots {
    /// Store `html` and return the placeholder that stands in for it.
    pub fn hold(&mut self, html: String) -> String {
        let index = self.held.len();
        self.held.push(html);
        format!("<@{index}@>")
    }

    pub fn len(&self) -> usize {
        self.held.len()
    }

    pub fn is_empty(&self) -> bool {
        self.held.is_empty()
    }

    /// Replace every placeholder in `text` with the HTML it stands for.
    ///
    /// A held fragment may itself contain placeholders of earlier slots
    /// (inline code wrapping a fence), so restoration recurses. Indices only
    /// ever point backwards, which bounds the recursion.
    pub fn restore(&self, text: &str) -> String {
        if self.held.is_empty() {
            return text.to_string();
        }
        slot_regex()
            .replace_all(text, |caps: &Captures| {
                caps[1]
                    .parse::<usize>()
                    .ok()
                    .and_then(|index| self.held.get(index))
                    .map(|html| self.restore(html))
                    .unwrap_or_else(|| caps[0].to_string())
            })
            .into_owned()
    }
}
