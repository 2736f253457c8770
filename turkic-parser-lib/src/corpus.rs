// Word frequency tables built from manuscript transcriptions.

use std::collections::HashMap;

/// One distinct word with its occurrence count and the lines it appears on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordEntry {
    pub word: String,
    pub occurrences: u32,
    /// Distinct 1-based line numbers, in first-seen order.
    pub lines: Vec<u32>,
}

/// Order of rows when a table is listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowOrder {
    #[default]
    FirstOccurrence,
    Alphabetical,
}

/// Distinct words of a text in first-occurrence order.
#[derive(Debug, Clone, Default)]
pub struct FrequencyTable {
    entries: Vec<WordEntry>,
    index: HashMap<String, usize>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tokenize a transcription.
    ///
    /// Tokens are whitespace separated. A token `(N)` is a line marker and
    /// sets the line number for the tokens after it; before the first marker
    /// the physical line number is used.
    pub fn from_transcription(text: &str) -> Self {
        let mut table = Self::new();
        let mut marker: Option<u32> = None;

        for (i, physical) in text.lines().enumerate() {
            for token in physical.split_whitespace() {
                if let Some(n) = line_marker(token) {
                    marker = Some(n);
                    continue;
                }
                let Some(word) = normalize_token(token) else {
                    continue;
                };
                let line = marker.unwrap_or(i as u32 + 1);
                table.record(&word, line);
            }
        }
        table
    }

    /// Count one occurrence of `word` on `line`.
    pub fn record(&mut self, word: &str, line: u32) {
        self.insert(WordEntry {
            word: word.to_string(),
            occurrences: 1,
            lines: vec![line],
        });
    }

    /// Add an entry, merging counts and lines if the word is already present.
    pub fn insert(&mut self, entry: WordEntry) {
        match self.index.get(&entry.word) {
            Some(&i) => {
                let existing = &mut self.entries[i];
                existing.occurrences += entry.occurrences;
                for line in entry.lines {
                    if !existing.lines.contains(&line) {
                        existing.lines.push(line);
                    }
                }
            }
            None => {
                self.index.insert(entry.word.clone(), self.entries.len());
                self.entries.push(entry);
            }
        }
    }

    pub fn get(&self, word: &str) -> Option<&WordEntry> {
        self.index.get(word).map(|&i| &self.entries[i])
    }

    /// Entries in first-occurrence order.
    pub fn entries(&self) -> &[WordEntry] {
        &self.entries
    }

    pub fn sorted(&self, order: RowOrder) -> Vec<&WordEntry> {
        let mut rows: Vec<_> = self.entries.iter().collect();
        if order == RowOrder::Alphabetical {
            rows.sort_by(|a, b| a.word.cmp(&b.word));
        }
        rows
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn line_marker(token: &str) -> Option<u32> {
    token.strip_prefix('(')?.strip_suffix(')')?.parse().ok()
}

const STRIPPED: &[char] = &[
    '\u{201C}', '\u{201D}', '"', '«', '»', '.', ',', ':', ';', '!', '?',
];

/// Clean a raw token into the word form the analyser sees.
///
/// Returns `None` for tokens that are not words: bare numbers, ellipses and
/// tokens that are empty once punctuation is removed.
pub fn normalize_token(token: &str) -> Option<String> {
    if token.chars().all(|c| c.is_ascii_digit()) || token == "…" || token == "..." {
        return None;
    }
    let cleaned: String = token.chars().filter(|c| !STRIPPED.contains(c)).collect();
    // A hyphen marks a word broken across lines; keep the base form.
    let cleaned = cleaned.strip_suffix('-').unwrap_or(&cleaned);
    if cleaned.is_empty() {
        return None;
    }
    Some(cleaned.to_lowercase())
}
