// Output formatting for analysis results.

use serde::Serialize;

use crate::corpus::WordEntry;
use crate::types::*;

/// Render the segmentation as `root + form[CAT] + form[CAT]`.
///
/// A word with no affixes renders as the root alone.
pub fn gloss(result: &AnalysisResult) -> String {
    let mut out = result.root().to_string();
    for affix in result.affixes() {
        out.push_str(" + ");
        out.push_str(&affix.to_string());
    }
    out
}

/// The method note, plus the loanword hint when a segmented root also looks
/// borrowed.
pub fn notes(result: &AnalysisResult) -> String {
    let mut out = result.note.to_string();
    if result.is_segmented() {
        if let Some(m) = result.most_specific_loanword() {
            out.push_str("; ");
            out.push_str(&Note::Loanword(m.label.clone()).to_string());
        }
    }
    out
}

/// Render line numbers as `[1, 5, 12]`.
pub fn format_lines(lines: &[u32]) -> String {
    let inner = lines
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    format!("[{inner}]")
}

/// One record of the analysis table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Row {
    pub word: String,
    #[serde(rename = "root + affixes")]
    pub gloss: String,
    pub occurrences: u32,
    pub lines: String,
    pub notes: String,
}

impl Row {
    pub fn new(entry: &WordEntry, result: &AnalysisResult) -> Self {
        Self {
            word: entry.word.clone(),
            gloss: gloss(result),
            occurrences: entry.occurrences,
            lines: format_lines(&entry.lines),
            notes: notes(result),
        }
    }
}
