//! Two-pass placeholder substitution over one XML entry.

use super::markup::{expand_blocks, expand_text, ParagraphContext};
use super::placeholder::{PlaceholderKey, PlaceholderValue, ReportContent};
use regex::Regex;
use std::sync::OnceLock;

/// First id handed to generated tables; keeps clear of ids in typical templates.
const FIRST_TABLE_ID: u32 = 1_900_000_000;

/// One `{{NAME}}` found in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occurrence {
    pub start: usize,
    pub end: usize,
    pub key: PlaceholderKey,
}

/// Finds every known placeholder token in `xml`, in order.
///
/// Unknown `{{...}}` markers are left alone.
pub fn scan_placeholders(xml: &str) -> Vec<Occurrence> {
    let mut found = Vec::new();
    let mut cursor = 0;
    while let Some(rel) = xml[cursor..].find("{{") {
        let start = cursor + rel;
        let name_start = start + 2;
        let key = xml[name_start..].find("}}").and_then(|len| {
            let name = &xml[name_start..name_start + len];
            PlaceholderKey::from_name(name).map(|key| (key, name_start + len + 2))
        });
        match key {
            Some((key, end)) => {
                found.push(Occurrence { start, end, key });
                cursor = end;
            }
            // `{{{TITLE}}` must still find the token one byte later.
            None => cursor = start + 1,
        }
    }
    found
}

fn line_segments() -> &'static Regex {
    static LINE_SEGMENTS: OnceLock<Regex> = OnceLock::new();
    LINE_SEGMENTS.get_or_init(|| {
        Regex::new(r"(?s)<hp:linesegarray\s*/>|<hp:linesegarray>.*?</hp:linesegarray>")
            .expect("static regex must compile")
    })
}

/// Removes cached line layout so the viewer recomputes it for the new text.
pub fn clean_line_segments(xml: &str) -> String {
    line_segments().replace_all(xml, "").into_owned()
}

/// Rewrites template XML with the values of a [`ReportContent`].
#[derive(Debug)]
pub struct PlaceholderEngine<'a> {
    content: &'a ReportContent,
    clean_line_segments: bool,
    next_table_id: u32,
}

impl<'a> PlaceholderEngine<'a> {
    pub fn new(content: &'a ReportContent) -> Self {
        Self {
            content,
            clean_line_segments: true,
            next_table_id: FIRST_TABLE_ID,
        }
    }

    pub fn clean_line_segments(mut self, enabled: bool) -> Self {
        self.clean_line_segments = enabled;
        self
    }

    /// Substitutes all placeholders in `xml`.
    ///
    /// Returns `None` when the entry has no placeholder, so the caller can keep
    /// the original bytes. Values are inserted once and never rescanned, so a
    /// value that itself contains `{{TITLE}}` is written literally.
    pub fn substitute(&mut self, xml: &str) -> Option<String> {
        let occurrences = scan_placeholders(xml);
        if occurrences.is_empty() {
            return None;
        }

        let mut out = String::with_capacity(xml.len());
        let mut cursor = 0;
        for occurrence in &occurrences {
            out.push_str(&xml[cursor..occurrence.start]);
            let context = ParagraphContext::enclosing(xml, occurrence.start);
            let rendered = match self.content.value(occurrence.key) {
                PlaceholderValue::Text(text) => expand_text(text, context.as_ref()),
                PlaceholderValue::Blocks(blocks) => {
                    expand_blocks(blocks, context.as_ref(), &mut self.next_table_id)
                }
            };
            out.push_str(&rendered);
            cursor = occurrence.end;
        }
        out.push_str(&xml[cursor..]);

        log::debug!("substituted {} placeholder(s)", occurrences.len());

        if self.clean_line_segments {
            out = clean_line_segments(&out);
        }
        Some(out)
    }
}
