//! Plain text renderer - strips Markdown markup from a section body.

use regex::{Captures, Regex};
use std::sync::OnceLock;

/// Indent prepended to ordinary paragraphs.
pub const PARAGRAPH_INDENT: &str = "  ";

/// Glyph that replaces unordered list markers.
pub const BULLET: &str = "•";

struct Patterns {
    heading: Regex,
    emphasis: Vec<Regex>,
    strike: Regex,
    code: Regex,
    image: Regex,
    link: Regex,
    list_marker: Regex,
    quote: Regex,
    rule: Regex,
    paragraph_break: Regex,
    ordered: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        let re = |pattern: &str| Regex::new(pattern).expect("static regex must compile");
        Patterns {
            heading: re(r"(?m)^#{3,6}[ \t]+(.+)$"),
            // Longest markers first so `***x***` is not eaten by `**x**`.
            emphasis: vec![
                re(r"\*\*\*(.+?)\*\*\*"),
                re(r"___(.+?)___"),
                re(r"\*\*(.+?)\*\*"),
                re(r"__(.+?)__"),
                // Single markers must hug their text, so a `* ` list marker
                // never opens an emphasis span.
                re(r"\*([^\s*](?:[^*\n]*[^\s*])?)\*"),
                // `_` is a word character, so `\b` here means "not inside a word".
                re(r"\b_([^\s_](?:[^_\n]*[^\s_])?)_\b"),
            ],
            strike: re(r"~~(.+?)~~"),
            code: re(r"`(.+?)`"),
            image: re(r"!\[([^\]]*)\]\([^)]+\)"),
            link: re(r"\[([^\]]+)\]\([^)]+\)"),
            list_marker: re(r"(?m)^[ \t]*[-*+][ \t]+"),
            quote: re(r"(?m)^>[ \t]*"),
            rule: re(r"(?m)^[ \t]*[-*_]{3,}[ \t]*$"),
            paragraph_break: re(r"\n[ \t]*\n"),
            ordered: re(r"^\d+\."),
        }
    })
}

/// Converts Markdown text into indented plain paragraphs.
#[derive(Debug, Clone, Copy)]
pub struct PlainTextRenderer {
    image_label: &'static str,
}

impl Default for PlainTextRenderer {
    fn default() -> Self {
        Self::new("이미지")
    }
}

impl PlainTextRenderer {
    pub fn new(image_label: &'static str) -> Self {
        Self { image_label }
    }

    /// Renders `markdown` to plain text. Never fails; may return an empty string.
    pub fn render(&self, markdown: &str) -> String {
        let p = patterns();
        let mut text = markdown.replace("\r\n", "\n");

        text = p.heading.replace_all(&text, "${1}").into_owned();

        for pattern in &p.emphasis {
            text = pattern.replace_all(&text, "${1}").into_owned();
        }

        text = p.strike.replace_all(&text, "${1}").into_owned();
        text = p.code.replace_all(&text, "${1}").into_owned();

        text = p
            .image
            .replace_all(&text, |caps: &Captures| {
                format!("[{}: {}]", self.image_label, &caps[1])
            })
            .into_owned();
        text = p.link.replace_all(&text, "${1}").into_owned();

        text = p
            .list_marker
            .replace_all(&text, format!("{BULLET} ").as_str())
            .into_owned();
        text = p.quote.replace_all(&text, "").into_owned();
        text = p.rule.replace_all(&text, "").into_owned();

        p.paragraph_break
            .split(&text)
            .map(str::trim)
            .filter(|para| !para.is_empty())
            .map(|para| {
                if p.ordered.is_match(para) || para.starts_with(BULLET) {
                    para.to_string()
                } else {
                    format!("{PARAGRAPH_INDENT}{para}")
                }
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}
