//! Markdown parsing into the report document model.

mod classifier;
mod plain_text;
mod table;

pub use self::classifier::SectionClassifier;
pub use self::plain_text::{PlainTextRenderer, BULLET, PARAGRAPH_INDENT};
pub use self::table::TableBlockParser;

use crate::core::ast::{BodyBlock, ParsedDocument, Section, SectionRole};
use crate::localization::LocalizationStrategy;
use crate::{error::Error, Result};
use regex::Regex;
use std::sync::OnceLock;

fn blank_line() -> &'static Regex {
    static BLANK_LINE: OnceLock<Regex> = OnceLock::new();
    BLANK_LINE.get_or_init(|| Regex::new(r"\n[ \t]*\n").expect("static regex must compile"))
}

/// Splits Markdown into a title and classified `##` sections.
#[derive(Debug, Default, Clone, Copy)]
pub struct MarkdownParser {
    classifier: SectionClassifier,
    renderer: PlainTextRenderer,
    tables: TableBlockParser,
}

impl MarkdownParser {
    pub fn new(localization: &dyn LocalizationStrategy) -> Self {
        Self {
            classifier: SectionClassifier,
            renderer: PlainTextRenderer::new(localization.image_label()),
            tables: TableBlockParser,
        }
    }

    /// Parses `text` into a [`ParsedDocument`].
    ///
    /// Fails with [`Error::InvalidMarkdown`] only when every section body
    /// renders to nothing.
    pub fn parse(&self, text: &str) -> Result<ParsedDocument> {
        let normalized = text.replace("\r\n", "\n");
        let title = find_title(&normalized);

        let rest = match &title {
            Some((_, end)) => &normalized[*end..],
            None => normalized.as_str(),
        };

        let mut raw_sections = split_h2_sections(&normalized);
        if raw_sections.is_empty() {
            log::debug!("no `##` headings, using the whole body as main content");
            raw_sections.push((None, rest.trim().to_string()));
        }

        let mut sections: Vec<Section> = raw_sections
            .into_iter()
            .map(|(heading, raw_body)| {
                let role = match &heading {
                    Some(heading) => self.classifier.classify(heading),
                    None => SectionRole::MainContent,
                };
                self.section(role, heading.unwrap_or_default(), raw_body)
            })
            .collect();

        if sections.iter().all(|s| s.plain_body.trim().is_empty()) {
            return Err(Error::InvalidMarkdown(
                "no section has any content; check the markdown structure".to_string(),
            ));
        }

        // Nothing landed in a report role: keep the text as main content.
        let has_role_content = sections
            .iter()
            .any(|s| s.role != SectionRole::Unknown && !s.plain_body.trim().is_empty());
        if !has_role_content {
            log::debug!("no section matched a report role, using the whole body as main content");
            sections.push(self.section(
                SectionRole::MainContent,
                String::new(),
                rest.trim().to_string(),
            ));
        }

        for section in &sections {
            log::debug!(
                "section {:?} classified as {}",
                section.heading_text,
                section.role.as_str()
            );
        }

        Ok(ParsedDocument {
            title: title.map(|(t, _)| t).unwrap_or_default(),
            sections,
            raw_text: text.to_string(),
        })
    }

    fn section(&self, role: SectionRole, heading_text: String, raw_body: String) -> Section {
        // `##` lines only survive here in the fallback body; keep their text.
        let body = raw_body
            .lines()
            .map(heading_text_or_line)
            .collect::<Vec<_>>()
            .join("\n");
        Section {
            role,
            heading_text,
            plain_body: self.renderer.render(&body),
            blocks: self.body_blocks(&body),
            raw_body,
        }
    }

    /// Splits a raw section body into rendered paragraphs and tables.
    pub fn body_blocks(&self, raw_body: &str) -> Vec<BodyBlock> {
        let mut blocks = Vec::new();
        for chunk in blank_line().split(raw_body) {
            if chunk.trim().is_empty() {
                continue;
            }
            match self.tables.split(chunk) {
                Some((preamble, table)) => {
                    self.push_paragraphs(&mut blocks, &preamble.join("\n"));
                    blocks.push(BodyBlock::Table(table));
                }
                None => self.push_paragraphs(&mut blocks, chunk),
            }
        }
        blocks
    }

    fn push_paragraphs(&self, blocks: &mut Vec<BodyBlock>, text: &str) {
        let rendered = self.renderer.render(text);
        blocks.extend(
            rendered
                .split("\n\n")
                .filter(|para| !para.is_empty())
                .map(|para| BodyBlock::Paragraph(para.to_string())),
        );
    }
}

/// Returns the `#` title, or the localized default title.
pub fn extract_title(text: &str, localization: &dyn LocalizationStrategy) -> String {
    find_title(text)
        .map(|(title, _)| title)
        .unwrap_or_else(|| localization.default_title().to_string())
}

/// First `# title` line and the byte offset just past it.
fn find_title(text: &str) -> Option<(String, usize)> {
    let mut offset = 0;
    for line in text.split_inclusive('\n') {
        offset += line.len();
        if let Some(title) = heading_text(line, 1) {
            return Some((title, offset));
        }
    }
    None
}

/// Heading text if `line` is exactly a level-`level` ATX heading.
fn heading_text(line: &str, level: usize) -> Option<String> {
    let line = line.trim_end_matches(['\n', '\r']);
    let rest = line.strip_prefix(&"#".repeat(level)[..])?;
    if !rest.starts_with([' ', '\t']) {
        return None;
    }
    let text = rest.trim();
    (!text.is_empty()).then(|| text.to_string())
}

fn heading_text_or_line(line: &str) -> String {
    heading_text(line, 2).unwrap_or_else(|| line.to_string())
}

fn split_h2_sections(text: &str) -> Vec<(Option<String>, String)> {
    let mut sections: Vec<(Option<String>, String)> = Vec::new();
    let mut current: Option<(String, Vec<&str>)> = None;

    for line in text.lines() {
        if let Some(heading) = heading_text(line, 2) {
            if let Some((heading, body)) = current.take() {
                sections.push((Some(heading), body.join("\n").trim().to_string()));
            }
            current = Some((heading, Vec::new()));
        } else if let Some((_, body)) = current.as_mut() {
            body.push(line);
        }
    }
    if let Some((heading, body)) = current {
        sections.push((Some(heading), body.join("\n").trim().to_string()));
    }
    sections
}
