//! HWPX paragraph and table markup for substituted values.
//!
//! A placeholder normally sits inside `<hp:p><hp:run><hp:t>{{TOKEN}}</hp:t>`.
//! Multi-paragraph values close that text/run/paragraph and reopen copies of
//! the enclosing tags, so each source paragraph becomes a real `hp:p`.

use super::escape::escape_xml;
use crate::core::ast::{BodyBlock, TableBlock};

/// Marker for a line break inside one paragraph.
pub const LINE_BREAK: &str = "<hp:lineBreak/>";

const TEXT_CLOSE: &str = "</hp:t>";
const RUN_CLOSE: &str = "</hp:run>";
const PARAGRAPH_CLOSE: &str = "</hp:p>";

/// Text width of an A4 page with default margins, in HWPUNIT.
const TABLE_WIDTH: u32 = 42520;
const CELL_HEIGHT: u32 = 1000;
/// `borderFillIDRef` every HWPX header defines.
const BORDER_FILL_ID: &str = "1";

/// Opening tags of the paragraph a placeholder lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParagraphContext<'a> {
    pub paragraph_open: &'a str,
    pub run_open: &'a str,
    pub text_open: &'a str,
}

impl<'a> ParagraphContext<'a> {
    /// Finds the `hp:p`/`hp:run`/`hp:t` that are still open at byte `pos`.
    ///
    /// Returns `None` when the position is not inside text of a paragraph run,
    /// in which case the value is written as escaped text only.
    pub fn enclosing(xml: &'a str, pos: usize) -> Option<Self> {
        let before = &xml[..pos];

        let text_start = rfind_tag(before, "hp:t")?;
        let text_open = tag_at(xml, text_start)?;
        if before[text_start..].contains(TEXT_CLOSE) || text_open.ends_with("/>") {
            return None;
        }

        let run_start = rfind_tag(&before[..text_start], "hp:run")?;
        if before[run_start..].contains(RUN_CLOSE) {
            return None;
        }

        let paragraph_start = rfind_tag(&before[..run_start], "hp:p")?;
        if before[paragraph_start..].contains(PARAGRAPH_CLOSE) {
            return None;
        }

        Some(Self {
            paragraph_open: tag_at(xml, paragraph_start)?,
            run_open: tag_at(xml, run_start)?,
            text_open,
        })
    }

    fn paragraph_break(&self) -> String {
        format!(
            "{TEXT_CLOSE}{RUN_CLOSE}{PARAGRAPH_CLOSE}{}{}{}",
            self.paragraph_open, self.run_open, self.text_open
        )
    }
}

/// Start of the last `<name>` or `<name ...>` tag in `haystack`.
fn rfind_tag(haystack: &str, name: &str) -> Option<usize> {
    let needle = format!("<{name}");
    let mut end = haystack.len();
    while let Some(idx) = haystack[..end].rfind(&needle) {
        let next = haystack[idx + needle.len()..].chars().next();
        if matches!(next, Some('>' | ' ' | '\t' | '\n' | '\r' | '/')) {
            return Some(idx);
        }
        end = idx;
    }
    None
}

/// The complete tag starting at `start`.
fn tag_at(xml: &str, start: usize) -> Option<&str> {
    let len = xml[start..].find('>')?;
    Some(&xml[start..=start + len])
}

/// Expands a single-line value such as a title.
pub fn expand_text(text: &str, context: Option<&ParagraphContext<'_>>) -> String {
    if text.is_empty() {
        return String::new();
    }
    expand_blocks(&[BodyBlock::Paragraph(text.to_string())], context, &mut 0)
}

/// Expands body blocks into markup that replaces a placeholder.
///
/// `next_table_id` is advanced for every emitted table.
pub fn expand_blocks(
    blocks: &[BodyBlock],
    context: Option<&ParagraphContext<'_>>,
    next_table_id: &mut u32,
) -> String {
    let Some(context) = context else {
        return flatten_blocks(blocks);
    };

    let separator = context.paragraph_break();
    let mut units = Vec::with_capacity(blocks.len());
    for block in blocks {
        match block {
            BodyBlock::Paragraph(text) => units.push(
                text.lines()
                    .map(escape_xml)
                    .collect::<Vec<_>>()
                    .join(LINE_BREAK),
            ),
            BodyBlock::Table(table) => {
                let markup = table_markup(table, context, *next_table_id);
                *next_table_id += 1;
                // The table shares the run with empty text elements on both sides.
                units.push(format!("{TEXT_CLOSE}{markup}{}", context.text_open));
            }
        }
    }
    units.join(&separator)
}

/// Escaped text without structure, for placeholders outside paragraph text.
fn flatten_blocks(blocks: &[BodyBlock]) -> String {
    blocks
        .iter()
        .map(|block| match block {
            BodyBlock::Paragraph(text) => escape_xml(text),
            BodyBlock::Table(table) => table
                .all_rows()
                .map(|row| escape_xml(&row.join(" | ")))
                .collect::<Vec<_>>()
                .join("\n"),
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn table_markup(table: &TableBlock, context: &ParagraphContext<'_>, id: u32) -> String {
    let rows = table.row_count();
    let cols = table.column_count().max(1);
    let cell_width = TABLE_WIDTH / cols as u32;
    let height = CELL_HEIGHT * rows as u32;

    let mut xml = String::new();
    xml.push_str(&format!(
        "<hp:tbl id=\"{id}\" zOrder=\"0\" numberingType=\"TABLE\" textWrap=\"TOP_AND_BOTTOM\" \
         textFlow=\"BOTH_SIDES\" lock=\"0\" dropcapstyle=\"None\" pageBreak=\"CELL\" \
         repeatHeader=\"1\" rowCnt=\"{rows}\" colCnt=\"{cols}\" cellSpacing=\"0\" \
         borderFillIDRef=\"{BORDER_FILL_ID}\" noAdjust=\"0\">"
    ));
    xml.push_str(&format!(
        "<hp:sz width=\"{TABLE_WIDTH}\" widthRelTo=\"ABSOLUTE\" height=\"{height}\" \
         heightRelTo=\"ABSOLUTE\" protect=\"0\"/>"
    ));
    xml.push_str(
        "<hp:pos treatAsChar=\"1\" affectLSpacing=\"0\" flowWithText=\"1\" allowOverlap=\"0\" \
         holdAnchorAndSO=\"0\" vertRelTo=\"PARA\" horzRelTo=\"COLUMN\" vertAlign=\"TOP\" \
         horzAlign=\"LEFT\" vertOffset=\"0\" horzOffset=\"0\"/>",
    );
    xml.push_str("<hp:outMargin left=\"283\" right=\"283\" top=\"283\" bottom=\"283\"/>");
    xml.push_str("<hp:inMargin left=\"510\" right=\"510\" top=\"141\" bottom=\"141\"/>");

    for (row_idx, row) in table.all_rows().enumerate() {
        let is_header = table.header.is_some() && row_idx == 0;
        xml.push_str("<hp:tr>");
        for (col_idx, cell) in row.iter().enumerate() {
            xml.push_str(&format!(
                "<hp:tc name=\"\" header=\"{}\" hasMargin=\"0\" protect=\"0\" editable=\"0\" \
                 dirty=\"0\" borderFillIDRef=\"{BORDER_FILL_ID}\">",
                u8::from(is_header)
            ));
            xml.push_str(
                "<hp:subList id=\"\" textDirection=\"HORIZONTAL\" lineWrap=\"BREAK\" \
                 vertAlign=\"CENTER\" linkListIDRef=\"0\" linkListNextIDRef=\"0\" \
                 textWidth=\"0\" textHeight=\"0\" hasTextRef=\"0\" hasNumRef=\"0\">",
            );
            xml.push_str(&format!(
                "{}{}{}{}{TEXT_CLOSE}{RUN_CLOSE}{PARAGRAPH_CLOSE}",
                context.paragraph_open,
                context.run_open,
                context.text_open,
                escape_xml(cell)
            ));
            xml.push_str("</hp:subList>");
            xml.push_str(&format!(
                "<hp:cellAddr colAddr=\"{col_idx}\" rowAddr=\"{row_idx}\"/>\
                 <hp:cellSpan colSpan=\"1\" rowSpan=\"1\"/>\
                 <hp:cellSz width=\"{cell_width}\" height=\"{CELL_HEIGHT}\"/>\
                 <hp:cellMargin left=\"510\" right=\"510\" top=\"141\" bottom=\"141\"/>"
            ));
            xml.push_str("</hp:tc>");
        }
        xml.push_str("</hp:tr>");
    }
    xml.push_str("</hp:tbl>");
    xml
}
