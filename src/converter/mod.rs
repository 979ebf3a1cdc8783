//! Orchestration of the Markdown to HWPX pipeline.

use crate::container::ContainerAssembler;
use crate::core::ast::ParsedDocument;
use crate::markdown::MarkdownParser;
use crate::render::{PlaceholderEngine, ReportContent};
use crate::{ConvertOptions, Result};
use std::path::{Path, PathBuf};

/// Main converter struct that wires parsing, substitution and packaging.
#[derive(Debug, Clone, Default)]
pub struct MarkdownToHwpx {
    options: ConvertOptions,
}

impl MarkdownToHwpx {
    /// Creates a new converter with the given options.
    pub fn new(options: ConvertOptions) -> Self {
        Self { options }
    }

    /// Creates a new converter with default options.
    pub fn with_defaults() -> Self {
        Self::new(ConvertOptions::default())
    }

    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Parses `markdown` with the configured localization.
    pub fn parse(&self, markdown: &str) -> Result<ParsedDocument> {
        let localization = self.options.language.strategy();
        MarkdownParser::new(localization).parse(markdown)
    }

    /// Builds the placeholder values for `markdown` without touching the
    /// filesystem.
    pub fn prepare(&self, markdown: &str, date: &str) -> Result<ReportContent> {
        let document = self.parse(markdown)?;
        Ok(ReportContent::from_document(
            &document,
            date,
            self.options.missing_sections,
            self.options.language.strategy(),
        ))
    }

    /// Converts `markdown` into a new HWPX file at `output`, using `template`
    /// for layout and styles.
    ///
    /// # Arguments
    /// * `markdown` - Report source text
    /// * `template` - HWPX file containing `{{NAME}}` placeholders; never modified
    /// * `output` - Destination path; replaced only when conversion succeeds
    /// * `date` - Text written into `{{DATE}}`
    ///
    /// # Returns
    /// The path of the written file.
    pub fn convert(
        &self,
        markdown: &str,
        template: &Path,
        output: &Path,
        date: &str,
    ) -> Result<PathBuf> {
        // Parsing comes first so invalid input never touches the filesystem.
        let content = self.prepare(markdown, date)?;
        log::debug!(
            "converting {:?} with template {}",
            content.title,
            template.display()
        );

        let mut engine = PlaceholderEngine::new(&content)
            .clean_line_segments(self.options.clean_line_segments);

        ContainerAssembler::with_scratch_root(self.options.scratch_dir.clone())
            .assemble(template, output, |_, xml| engine.substitute(xml))
    }
}
