//! Rendering of report content into HWPX section XML.

mod escape;
mod markup;
mod placeholder;
mod substitute;

pub use escape::escape_xml;
pub use markup::{expand_blocks, expand_text, ParagraphContext, LINE_BREAK};
pub use placeholder::{
    MissingSectionPolicy, PlaceholderKey, PlaceholderValue, ReportContent, SectionContent,
};
pub use substitute::{clean_line_segments, scan_placeholders, Occurrence, PlaceholderEngine};
