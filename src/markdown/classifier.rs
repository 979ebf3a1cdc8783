//! Section classifier - infers a report role from a `##` heading.

use crate::core::ast::SectionRole;

/// Keyword groups in priority order. The first group with a keyword contained
/// in the lowercased heading decides the role.
///
/// Conclusion sits before Background: "향후 추진 계획" mentions both and must
/// be a conclusion.
const RULES: &[(SectionRole, &[&str])] = &[
    (
        SectionRole::Summary,
        &["요약", "summary", "핵심", "개요", "executive", "overview"],
    ),
    (
        SectionRole::Conclusion,
        &[
            "결론",
            "제언",
            "conclusion",
            "향후",
            "계획",
            "시사점",
            "recommendation",
        ],
    ),
    (
        SectionRole::Background,
        &["배경", "목적", "background", "추진", "사업", "필요성", "경위"],
    ),
    (
        SectionRole::MainContent,
        &[
            "주요", "내용", "분석", "결과", "세부", "상세", "내역", "현황", "main", "detail",
            "analysis",
        ],
    ),
];

/// Maps heading text to a [`SectionRole`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SectionClassifier;

impl SectionClassifier {
    pub fn classify(&self, heading: &str) -> SectionRole {
        let lowered = heading.to_lowercase();
        RULES
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| lowered.contains(k)))
            .map(|(role, _)| *role)
            .unwrap_or(SectionRole::Unknown)
    }
}
