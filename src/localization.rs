//! Localization strategy for language-specific labels.

use crate::core::ast::SectionRole;
use chrono::NaiveDate;

/// Strategy for handling language-specific labels and formats.
pub trait LocalizationStrategy: Send + Sync {
    /// Heading used when a report section has no heading of its own.
    fn default_heading(&self, role: SectionRole) -> &'static str;

    /// Title used when the Markdown has no `#` line.
    fn default_title(&self) -> &'static str;

    /// Prefix of the `[label: alt]` text that replaces images.
    fn image_label(&self) -> &'static str;

    /// Formats the generation date written into `{{DATE}}`.
    fn format_date(&self, date: NaiveDate) -> String;
}

/// English labels.
pub struct DefaultLocalization;

impl LocalizationStrategy for DefaultLocalization {
    fn default_heading(&self, role: SectionRole) -> &'static str {
        match role {
            SectionRole::Summary => "Summary",
            SectionRole::Background => "Background",
            SectionRole::MainContent => "Main Content",
            SectionRole::Conclusion => "Conclusion",
            SectionRole::Unknown => "",
        }
    }

    fn default_title(&self) -> &'static str {
        "Report"
    }

    fn image_label(&self) -> &'static str {
        "Image"
    }

    fn format_date(&self, date: NaiveDate) -> String {
        date.format("%Y-%m-%d").to_string()
    }
}

/// Korean report labels ("요약", "배경 및 목적", ...).
pub struct KoreanLocalization;

impl LocalizationStrategy for KoreanLocalization {
    fn default_heading(&self, role: SectionRole) -> &'static str {
        match role {
            SectionRole::Summary => "요약",
            SectionRole::Background => "배경 및 목적",
            SectionRole::MainContent => "주요 내용",
            SectionRole::Conclusion => "결론 및 제언",
            SectionRole::Unknown => "",
        }
    }

    fn default_title(&self) -> &'static str {
        "보고서"
    }

    fn image_label(&self) -> &'static str {
        "이미지"
    }

    fn format_date(&self, date: NaiveDate) -> String {
        date.format("%Y년 %m월 %d일").to_string()
    }
}

/// Language selector carried by [`crate::ConvertOptions`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    Korean,
    English,
}

impl Language {
    /// Parses a language code such as `ko` or `en`.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "ko" | "kr" | "korean" => Some(Language::Korean),
            "en" | "english" => Some(Language::English),
            _ => None,
        }
    }

    pub fn strategy(self) -> &'static dyn LocalizationStrategy {
        match self {
            Language::Korean => &KoreanLocalization,
            Language::English => &DefaultLocalization,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_korean_date_format() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 7).expect("valid date");
        assert_eq!(KoreanLocalization.format_date(date), "2025년 03월 07일");
        assert_eq!(DefaultLocalization.format_date(date), "2025-03-07");
    }

    #[test]
    fn test_language_codes() {
        assert_eq!(Language::from_code("KO"), Some(Language::Korean));
        assert_eq!(Language::from_code("en"), Some(Language::English));
        assert_eq!(Language::from_code("fr"), None);
        assert_eq!(
            Language::default().strategy().default_heading(SectionRole::Conclusion),
            "결론 및 제언"
        );
    }
}
