//! Line-oriented stages: bullet lists, numbered lists and blockquotes.

use super::RenderOptions;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Block {
    Bullet,
    Numbered,
    Quote,
}

impl Block {
    /// Classify a line, returning the block kind and the line's content.
    fn classify(line: &str) -> Option<(Self, &str)> {
        if let Some(rest) = line.strip_prefix("- ") {
            return (!rest.is_empty()).then_some((Self::Bullet, rest));
        }
        // `>` was escaped before this stage runs.
        if let Some(rest) = line.strip_prefix("&gt; ") {
            return (!rest.is_empty()).then_some((Self::Quote, rest));
        }
        let (number, rest) = line.split_once(". ")?;
        let is_number = !number.is_empty() && number.bytes().all(|b| b.is_ascii_digit());
        (is_number && !rest.is_empty()).then_some((Self::Numbered, rest))
    }

    /// Whether consecutive lines of this kind share one container element.
    fn merges(self, options: &RenderOptions) -> bool {
        match self {
            Self::Bullet => true,
            Self::Numbered => options.ordered_list_container,
            Self::Quote => options.merge_blockquotes,
        }
    }

    fn write_single(self, out: &mut String, content: &str) {
        match self {
            Self::Bullet | Self::Numbered => {
                out.push_str("<li>");
                out.push_str(content);
                out.push_str("</li>");
            }
            Self::Quote => {
                out.push_str("<blockquote>");
                out.push_str(content);
                out.push_str("</blockquote>");
            }
        }
    }

    fn write_run(self, out: &mut String, contents: &[&str]) {
        match self {
            Self::Bullet | Self::Numbered => {
                let tag = if self == Self::Bullet { "ul" } else { "ol" };
                out.push_str(&format!("<{tag}>"));
                for content in contents {
                    self.write_single(out, content);
                }
                out.push_str(&format!("</{tag}>"));
            }
            Self::Quote => {
                out.push_str("<blockquote>");
                out.push_str(&contents.join("<br>"));
                out.push_str("</blockquote>");
            }
        }
    }
}

/// Rewrite list and quote lines.
///
/// Runs of merging kinds become one container, and the newline that ends
/// the run is absorbed by it. Non-merging kinds are rewritten line by line
/// and keep their newlines.
pub fn rewrite(text: &str, options: &RenderOptions) -> String {
    let lines: Vec<&str> = text.split('\n').collect();
    let mut out = String::with_capacity(text.len() + 32);
    let mut i = 0;

    while i < lines.len() {
        let Some((kind, content)) = Block::classify(lines[i]) else {
            out.push_str(lines[i]);
            if i + 1 < lines.len() {
                out.push('\n');
            }
            i += 1;
            continue;
        };

        if kind.merges(options) {
            let mut run = vec![content];
            i += 1;
            while let Some(&line) = lines.get(i) {
                match Block::classify(line) {
                    Some((next, content)) if next == kind => {
                        run.push(content);
                        i += 1;
                    }
                    _ => break,
                }
            }
            kind.write_run(&mut out, &run);
        } else {
            kind.write_single(&mut out, content);
            if i + 1 < lines.len() {
                out.push('\n');
            }
            i += 1;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults(text: &str) -> String {
        rewrite(text, &RenderOptions::default())
    }

    #[test]
    fn bullet_run_becomes_one_list() {
        assert_eq!(
            defaults("- a\n- b\n- c"),
            "<ul><li>a</li><li>b</li><li>c</li></ul>"
        );
    }

    #[test]
    fn separate_runs_become_separate_lists() {
        assert_eq!(
            defaults("- a\ntext\n- b"),
            "<ul><li>a</li></ul>text\n<ul><li>b</li></ul>"
        );
    }

    #[test]
    fn bare_dash_is_not_an_item() {
        assert_eq!(defaults("- \n-x"), "- \n-x");
    }

    #[test]
    fn numbered_items_have_no_container_by_default() {
        assert_eq!(defaults("1. a\n2. b"), "<li>a</li>\n<li>b</li>");
    }

    #[test]
    fn numbered_items_can_be_wrapped() {
        let options = RenderOptions {
            ordered_list_container: true,
            ..RenderOptions::default()
        };
        assert_eq!(
            rewrite("1. a\n2. b\nend", &options),
            "<ol><li>a</li><li>b</li></ol>end"
        );
    }

    #[test]
    fn non_numeric_prefix_is_plain() {
        assert_eq!(defaults("1.5. x\nv. y"), "1.5. x\nv. y");
    }

    #[test]
    fn quotes_are_one_per_line_by_default() {
        assert_eq!(
            defaults("&gt; a\n&gt; b"),
            "<blockquote>a</blockquote>\n<blockquote>b</blockquote>"
        );
    }

    #[test]
    fn quotes_can_be_merged() {
        let options = RenderOptions {
            merge_blockquotes: true,
            ..RenderOptions::default()
        };
        assert_eq!(
            rewrite("&gt; a\n&gt; b", &options),
            "<blockquote>a<br>b</blockquote>"
        );
    }

    #[test]
    fn bullet_followed_by_numbered_line() {
        assert_eq!(defaults("- a\n1. b"), "<ul><li>a</li></ul><li>b</li>");
    }
}
