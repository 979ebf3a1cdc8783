//! Table block parser - detects GFM pipe tables inside a section body.

use crate::core::ast::TableBlock;

/// Parser for `| a | b |` style tables.
#[derive(Debug, Default, Clone, Copy)]
pub struct TableBlockParser;

impl TableBlockParser {
    /// Returns true when `fragment` is a pipe table with a header delimiter.
    pub fn is_table(&self, fragment: &str) -> bool {
        Self::delimiter_index(&Self::non_blank_lines(fragment)).is_some()
    }

    /// Parses `fragment` as a table, or `None` if it is ordinary text.
    pub fn parse(&self, fragment: &str) -> Option<TableBlock> {
        self.split(fragment).map(|(_, table)| table)
    }

    /// Like [`parse`](Self::parse), but also returns the lines above the
    /// header row, which are not part of the table.
    pub fn split<'a>(&self, fragment: &'a str) -> Option<(Vec<&'a str>, TableBlock)> {
        let lines = Self::non_blank_lines(fragment);
        let delimiter = Self::delimiter_index(&lines)?;

        let header = Self::split_row(lines[delimiter - 1]);
        let rows = lines[delimiter + 1..]
            .iter()
            .map(|line| Self::split_row(line))
            .collect();

        let preamble = lines[..delimiter - 1].to_vec();
        Some((preamble, TableBlock::new(Some(header), rows)))
    }

    fn non_blank_lines(fragment: &str) -> Vec<&str> {
        fragment
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect()
    }

    /// Index of the `|---|:--:|` line, which must come before any pipe-less line.
    fn delimiter_index(lines: &[&str]) -> Option<usize> {
        if lines.len() < 2 || !lines[0].contains('|') {
            return None;
        }

        for (idx, line) in lines.iter().enumerate().skip(1) {
            if Self::is_delimiter(line) {
                return Some(idx);
            }
            if !line.contains('|') {
                return None;
            }
        }
        None
    }

    fn is_delimiter(line: &str) -> bool {
        let mut chars = line.chars().filter(|c| *c != ' ').peekable();
        chars.peek().is_some() && chars.all(|c| matches!(c, '|' | '-' | ':'))
    }

    fn split_row(line: &str) -> Vec<String> {
        let line = line.trim();
        let line = line.strip_prefix('|').unwrap_or(line);
        let line = line.strip_suffix('|').unwrap_or(line);
        line.split('|').map(|cell| cell.trim().to_string()).collect()
    }
}
