//! Document model shared by the parser and the HWPX renderer.

/// Semantic category of a `##` block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionRole {
    Summary,
    Background,
    MainContent,
    Conclusion,
    Unknown,
}

impl SectionRole {
    pub fn as_str(self) -> &'static str {
        match self {
            SectionRole::Summary => "summary",
            SectionRole::Background => "background",
            SectionRole::MainContent => "main_content",
            SectionRole::Conclusion => "conclusion",
            SectionRole::Unknown => "unknown",
        }
    }
}

/// One heading-delimited block of the source document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub role: SectionRole,
    /// Heading text without the `##` marker. Empty for the implicit body section.
    pub heading_text: String,
    /// Body with Markdown markup stripped.
    pub plain_body: String,
    /// Body exactly as written, trimmed.
    pub raw_body: String,
    /// Body split into rendered paragraphs and detected tables.
    pub blocks: Vec<BodyBlock>,
}

/// Result of parsing one Markdown document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedDocument {
    pub title: String,
    pub sections: Vec<Section>,
    pub raw_text: String,
}

impl ParsedDocument {
    /// First section holding `role`. Later duplicates are ignored.
    pub fn section(&self, role: SectionRole) -> Option<&Section> {
        self.sections.iter().find(|section| section.role == role)
    }
}

/// A GFM pipe table.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TableBlock {
    pub header: Option<Vec<String>>,
    pub rows: Vec<Vec<String>>,
}

impl TableBlock {
    /// Builds a table, padding every row (header included) to the widest one.
    pub fn new(header: Option<Vec<String>>, rows: Vec<Vec<String>>) -> Self {
        let column_count = header
            .iter()
            .chain(rows.iter())
            .map(Vec::len)
            .max()
            .unwrap_or(0);

        let pad = |mut row: Vec<String>| {
            row.resize(column_count, String::new());
            row
        };

        Self {
            header: header.map(pad),
            rows: rows.into_iter().map(pad).collect(),
        }
    }

    pub fn column_count(&self) -> usize {
        self.header
            .iter()
            .chain(self.rows.iter())
            .map(Vec::len)
            .max()
            .unwrap_or(0)
    }

    /// Header (if any) followed by the body rows.
    pub fn all_rows(&self) -> impl Iterator<Item = &Vec<String>> {
        self.header.iter().chain(self.rows.iter())
    }

    pub fn row_count(&self) -> usize {
        self.rows.len() + usize::from(self.header.is_some())
    }
}

/// A unit of section body as it is laid out in the output document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyBlock {
    /// Rendered plain text. Single `\n` separates lines inside the paragraph.
    Paragraph(String),
    Table(TableBlock),
}
