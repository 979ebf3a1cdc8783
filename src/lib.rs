//! # md2hwpx
//!
//! Markdown to HWPX report converter. A Markdown report is split into
//! classified sections and poured into the `{{NAME}}` placeholders of an
//! HWPX template made in Hangul.
//!
//! ## Example
//!
//! ```no_run
//! use md2hwpx::{ConvertOptions, MarkdownToHwpx, MissingSectionPolicy};
//! use std::path::Path;
//!
//! let options = ConvertOptions {
//!     missing_sections: MissingSectionPolicy::Omit,
//!     ..Default::default()
//! };
//!
//! let markdown = std::fs::read_to_string("report.md").unwrap();
//! let converter = MarkdownToHwpx::new(options);
//! let path = converter
//!     .convert(&markdown, Path::new("template.hwpx"), Path::new("report.hwpx"), "2025년 01월 01일")
//!     .unwrap();
//! println!("{}", path.display());
//! ```

pub mod container;
pub mod converter;
pub mod core;
pub mod error;
pub mod localization;
pub mod markdown;
pub mod render;

pub use container::{write_sample_template, ContainerAssembler};
pub use converter::MarkdownToHwpx;
pub use error::{Error, Result};
pub use localization::{DefaultLocalization, KoreanLocalization, Language, LocalizationStrategy};
pub use markdown::{extract_title, MarkdownParser};
pub use render::{MissingSectionPolicy, PlaceholderKey, ReportContent};

use std::path::{Path, PathBuf};

/// Options for Markdown to HWPX conversion.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// What to write for report sections the Markdown does not provide.
    pub missing_sections: MissingSectionPolicy,
    /// Language of default headings, the image label and dates.
    pub language: Language,
    /// Parent directory for scratch extraction (system temp dir if not set).
    pub scratch_dir: Option<PathBuf>,
    /// Whether to drop cached line layout from rewritten section XML.
    pub clean_line_segments: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            missing_sections: MissingSectionPolicy::DefaultLabel,
            language: Language::Korean,
            scratch_dir: None,
            clean_line_segments: true,
        }
    }
}

/// Converts `markdown` into a new HWPX file at `output` with default options.
pub fn convert(markdown: &str, template: &Path, output: &Path, date: &str) -> Result<PathBuf> {
    MarkdownToHwpx::with_defaults().convert(markdown, template, output, date)
}

// Python bindings (only when 'python' feature is enabled)
#[cfg(feature = "python")]
mod python_bindings {
    use super::*;
    use pyo3::prelude::*;

    /// Converts Markdown text into an HWPX file and returns its path.
    #[pyfunction]
    #[pyo3(signature = (markdown, template, output, date=None))]
    fn convert_markdown(
        markdown: String,
        template: String,
        output: String,
        date: Option<String>,
    ) -> PyResult<String> {
        let converter = MarkdownToHwpx::with_defaults();
        let date = date.unwrap_or_else(|| {
            converter
                .options()
                .language
                .strategy()
                .format_date(chrono::Local::now().date_naive())
        });
        converter
            .convert(&markdown, Path::new(&template), Path::new(&output), &date)
            .map(|path| path.display().to_string())
            .map_err(|e| PyErr::new::<pyo3::exceptions::PyRuntimeError, _>(e.to_string()))
    }

    /// A Python module implemented in Rust.
    #[pymodule]
    pub fn md2hwpx(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(convert_markdown, m)?)?;
        Ok(())
    }
}
