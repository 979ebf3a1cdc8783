//! Placeholder vocabulary and the content bound to each token.

use crate::core::ast::{BodyBlock, ParsedDocument, SectionRole};
use crate::localization::LocalizationStrategy;

/// The closed set of `{{NAME}}` tokens a template may contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaceholderKey {
    Title,
    Date,
    TitleSummary,
    Summary,
    TitleBackground,
    Background,
    TitleMainContent,
    MainContent,
    TitleConclusion,
    Conclusion,
    /// Historical misspelling of `TITLE_SUMMARY`.
    LegacyTitleSummary,
    /// Historical misspelling of `SUMMARY`.
    LegacySummary,
}

impl PlaceholderKey {
    pub const ALL: [PlaceholderKey; 12] = [
        PlaceholderKey::Title,
        PlaceholderKey::Date,
        PlaceholderKey::TitleSummary,
        PlaceholderKey::Summary,
        PlaceholderKey::TitleBackground,
        PlaceholderKey::Background,
        PlaceholderKey::TitleMainContent,
        PlaceholderKey::MainContent,
        PlaceholderKey::TitleConclusion,
        PlaceholderKey::Conclusion,
        PlaceholderKey::LegacyTitleSummary,
        PlaceholderKey::LegacySummary,
    ];

    /// Name between the braces, e.g. `MAIN_CONTENT`.
    pub fn name(self) -> &'static str {
        match self {
            PlaceholderKey::Title => "TITLE",
            PlaceholderKey::Date => "DATE",
            PlaceholderKey::TitleSummary => "TITLE_SUMMARY",
            PlaceholderKey::Summary => "SUMMARY",
            PlaceholderKey::TitleBackground => "TITLE_BACKGROUND",
            PlaceholderKey::Background => "BACKGROUND",
            PlaceholderKey::TitleMainContent => "TITLE_MAIN_CONTENT",
            PlaceholderKey::MainContent => "MAIN_CONTENT",
            PlaceholderKey::TitleConclusion => "TITLE_CONCLUSION",
            PlaceholderKey::Conclusion => "CONCLUSION",
            PlaceholderKey::LegacyTitleSummary => "TITLE_SUMARY",
            PlaceholderKey::LegacySummary => "SUMARY",
        }
    }

    /// Full token, e.g. `{{MAIN_CONTENT}}`.
    pub fn token(self) -> String {
        format!("{{{{{}}}}}", self.name())
    }

    /// Case-sensitive lookup by name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.name() == name)
    }

    /// Resolves legacy aliases to the key they stand for.
    pub fn canonical(self) -> Self {
        match self {
            PlaceholderKey::LegacyTitleSummary => PlaceholderKey::TitleSummary,
            PlaceholderKey::LegacySummary => PlaceholderKey::Summary,
            other => other,
        }
    }

    /// Section role and whether the key is the heading (`true`) or the body.
    fn section_slot(self) -> Option<(SectionRole, bool)> {
        match self.canonical() {
            PlaceholderKey::TitleSummary => Some((SectionRole::Summary, true)),
            PlaceholderKey::Summary => Some((SectionRole::Summary, false)),
            PlaceholderKey::TitleBackground => Some((SectionRole::Background, true)),
            PlaceholderKey::Background => Some((SectionRole::Background, false)),
            PlaceholderKey::TitleMainContent => Some((SectionRole::MainContent, true)),
            PlaceholderKey::MainContent => Some((SectionRole::MainContent, false)),
            PlaceholderKey::TitleConclusion => Some((SectionRole::Conclusion, true)),
            PlaceholderKey::Conclusion => Some((SectionRole::Conclusion, false)),
            _ => None,
        }
    }
}

/// How a report role without a usable `##` section is filled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingSectionPolicy {
    /// Localized default heading and an empty body.
    #[default]
    DefaultLabel,
    /// Empty heading and body when the role is absent or its body is empty.
    Omit,
}

/// Heading and body bound to one report role.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionContent {
    pub heading: String,
    pub body: Vec<BodyBlock>,
}

/// Value bound to a placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderValue<'a> {
    Text(&'a str),
    Blocks(&'a [BodyBlock]),
}

/// Everything a template can receive, keyed by role instead of by string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportContent {
    pub title: String,
    pub date: String,
    pub summary: SectionContent,
    pub background: SectionContent,
    pub main_content: SectionContent,
    pub conclusion: SectionContent,
}

impl ReportContent {
    /// Maps a parsed document onto the report slots. The first section of a
    /// role wins; later duplicates and `Unknown` sections are not mapped.
    pub fn from_document(
        document: &ParsedDocument,
        date: &str,
        policy: MissingSectionPolicy,
        localization: &dyn LocalizationStrategy,
    ) -> Self {
        let slot = |role: SectionRole| -> SectionContent {
            let default_heading = localization.default_heading(role).to_string();
            match (document.section(role), policy) {
                (Some(section), MissingSectionPolicy::Omit)
                    if section.plain_body.trim().is_empty() =>
                {
                    SectionContent::default()
                }
                (Some(section), _) => SectionContent {
                    heading: if section.heading_text.trim().is_empty() {
                        default_heading
                    } else {
                        section.heading_text.clone()
                    },
                    body: section.blocks.clone(),
                },
                (None, MissingSectionPolicy::DefaultLabel) => SectionContent {
                    heading: default_heading,
                    body: Vec::new(),
                },
                (None, MissingSectionPolicy::Omit) => SectionContent::default(),
            }
        };

        Self {
            title: document.title.clone(),
            date: date.to_string(),
            summary: slot(SectionRole::Summary),
            background: slot(SectionRole::Background),
            main_content: slot(SectionRole::MainContent),
            conclusion: slot(SectionRole::Conclusion),
        }
    }

    pub fn section(&self, role: SectionRole) -> Option<&SectionContent> {
        match role {
            SectionRole::Summary => Some(&self.summary),
            SectionRole::Background => Some(&self.background),
            SectionRole::MainContent => Some(&self.main_content),
            SectionRole::Conclusion => Some(&self.conclusion),
            SectionRole::Unknown => None,
        }
    }

    /// Value for `key`. Aliases return the same value as their canonical key.
    pub fn value(&self, key: PlaceholderKey) -> PlaceholderValue<'_> {
        match key.canonical() {
            PlaceholderKey::Title => PlaceholderValue::Text(&self.title),
            PlaceholderKey::Date => PlaceholderValue::Text(&self.date),
            other => match other.section_slot().and_then(|(role, is_heading)| {
                self.section(role).map(|content| (content, is_heading))
            }) {
                Some((content, true)) => PlaceholderValue::Text(&content.heading),
                Some((content, false)) => PlaceholderValue::Blocks(&content.body),
                None => PlaceholderValue::Text(""),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::localization::KoreanLocalization;
    use crate::markdown::MarkdownParser;
    use pretty_assertions::assert_eq;

    fn content(md: &str, policy: MissingSectionPolicy) -> ReportContent {
        let doc = MarkdownParser::default().parse(md).expect("parse");
        ReportContent::from_document(&doc, "2025년 01월 02일", policy, &KoreanLocalization)
    }

    #[test]
    fn test_token_and_name_roundtrip() {
        for key in PlaceholderKey::ALL {
            assert_eq!(PlaceholderKey::from_name(key.name()), Some(key));
        }
        assert_eq!(PlaceholderKey::MainContent.token(), "{{MAIN_CONTENT}}");
        assert_eq!(PlaceholderKey::from_name("summary"), None);
    }

    #[test]
    fn test_legacy_alias_resolves_like_canonical() {
        let report = content("# T\n\n## 요약\n\n내용", MissingSectionPolicy::default());
        assert_eq!(
            report.value(PlaceholderKey::LegacySummary),
            report.value(PlaceholderKey::Summary)
        );
        assert_eq!(
            report.value(PlaceholderKey::LegacyTitleSummary),
            PlaceholderValue::Text("요약")
        );
    }

    #[test]
    fn test_missing_roles_get_default_labels() {
        let report = content("# T\n\n## Summary\n\nbody", MissingSectionPolicy::DefaultLabel);
        assert_eq!(report.title, "T");
        assert_eq!(report.summary.heading, "Summary");
        assert_eq!(report.conclusion.heading, "결론 및 제언");
        assert!(report.conclusion.body.is_empty());
        assert_eq!(
            report.value(PlaceholderKey::Date),
            PlaceholderValue::Text("2025년 01월 02일")
        );
    }

    #[test]
    fn test_omit_policy_blanks_missing_and_empty_roles() {
        let report = content(
            "## Summary\n\nbody\n\n## Background\n\n---",
            MissingSectionPolicy::Omit,
        );
        assert_eq!(report.summary.heading, "Summary");
        assert_eq!(report.background, SectionContent::default());
        assert_eq!(report.conclusion, SectionContent::default());
    }

    #[test]
    fn test_implicit_main_content_uses_default_heading() {
        let report = content("# T\n\nplain body", MissingSectionPolicy::Omit);
        assert_eq!(report.main_content.heading, "주요 내용");
        assert_eq!(
            report.main_content.body,
            vec![BodyBlock::Paragraph("  plain body".to_string())]
        );
    }

    #[test]
    fn test_first_duplicate_role_wins() {
        let report = content(
            "## 요약\n\nfirst\n\n## Executive summary\n\nsecond",
            MissingSectionPolicy::default(),
        );
        assert_eq!(report.summary.heading, "요약");
        assert_eq!(
            report.summary.body,
            vec![BodyBlock::Paragraph("  first".to_string())]
        );
    }
}
