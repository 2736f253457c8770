// Right-to-left morphological segmentation.
//
// Starting from the end of the word, every affix form that is a suffix of the
// remaining text and whose category may precede the affix already peeled to
// its right is tried, not only the longest one. A branch ends when nothing
// more can be peeled; it survives only if its innermost affix may attach to
// the root. Among surviving branches the winner is chosen by
// `confidence::compare_peeled`.
//
// The best completion below a search state depends only on (remaining text,
// category to the right, depth), so the winner search memoizes on that key.
// Candidate enumeration walks the full tree under a visit budget.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::config::Config;
use crate::confidence;
use crate::error::InvalidInputError;
use crate::types::{most_specific, Affix, AffixCategory, AnalysisResult, Candidate, Note, Slot};

// Upper bound on search states visited while enumerating all candidates.
const ENUMERATION_BUDGET: usize = 100_000;

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Analyse a single normalized word.
///
/// Never fails for a non-empty word without whitespace: when no legal
/// segmentation exists the whole word is returned as the root.
pub fn analyze_word(word: &str, config: &Config) -> Result<AnalysisResult, InvalidInputError> {
    validate(word)?;

    let mut search = Search::new(word, config);
    let segmentation = match search.best(word.len(), None, 0) {
        Some(path) => path.into_candidate(word),
        None => Candidate::bare(word),
    };
    log::debug!(
        "{word}: {} search states, {} affixes",
        search.memo.len(),
        segmentation.affixes.len()
    );

    Ok(annotate(word, segmentation, config))
}

/// Every legal segmentation of `word`, best first. Empty when the word has
/// none.
pub fn enumerate_candidates(
    word: &str,
    config: &Config,
) -> Result<Vec<Candidate>, InvalidInputError> {
    validate(word)?;

    let mut search = Search::new(word, config);
    let mut out = Vec::new();
    search.collect(word.len(), None, 0, &mut Vec::new(), &mut out);
    if search.visited >= ENUMERATION_BUDGET {
        log::warn!(
            "{word}: enumeration stopped after {ENUMERATION_BUDGET} states; \
             candidate list is incomplete"
        );
    }

    out.sort_by(confidence::compare);
    Ok(out)
}

fn validate(word: &str) -> Result<(), InvalidInputError> {
    if word.is_empty() {
        return Err(InvalidInputError::Empty);
    }
    if word.chars().any(char::is_whitespace) {
        return Err(InvalidInputError::Whitespace(word.to_string()));
    }
    Ok(())
}

/// Attach loanword annotation and the method note to a finished split.
fn annotate(word: &str, segmentation: Candidate, config: &Config) -> AnalysisResult {
    // With an empty chain the root is the whole word.
    let loanwords = config.loanwords().matches(&segmentation.root);
    let note = if !segmentation.affixes.is_empty() {
        Note::PatternMatch
    } else if config.is_lexical(word) {
        Note::Lexical
    } else if let Some(m) = most_specific(&loanwords) {
        Note::Loanword(m.label.clone())
    } else {
        Note::Unanalyzed
    };

    AnalysisResult {
        word: word.to_string(),
        segmentation,
        loanwords,
        note,
    }
}

// ---------------------------------------------------------------------------
// Search state
// ---------------------------------------------------------------------------

/// A finished branch below some search state.
#[derive(Debug, Clone)]
struct Path<'c> {
    /// Byte offset where the root ends.
    root_end: usize,
    root_chars: usize,
    /// Affixes in peel order: word-final first.
    peeled: Vec<&'c Affix>,
}

impl<'c> Path<'c> {
    fn beats(&self, other: &Path<'_>) -> bool {
        confidence::compare_peeled(
            self.root_chars,
            self.peeled.iter().copied(),
            other.root_chars,
            other.peeled.iter().copied(),
        ) == Ordering::Less
    }

    fn into_candidate(self, word: &str) -> Candidate {
        Candidate {
            root: word[..self.root_end].to_string(),
            affixes: self.peeled.into_iter().rev().cloned().collect(),
        }
    }
}

type StateKey = (usize, Option<AffixCategory>, usize);

struct Search<'c, 'w> {
    word: &'w str,
    config: &'c Config,
    memo: HashMap<StateKey, Option<Path<'c>>>,
    visited: usize,
}

impl<'c, 'w> Search<'c, 'w> {
    fn new(word: &'w str, config: &'c Config) -> Self {
        Self {
            word,
            config,
            memo: HashMap::new(),
            visited: 0,
        }
    }

    /// Affixes that can be peeled from `word[..end]` when `right` is the
    /// category already peeled immediately after it (`None` at the word end).
    fn expansions(&self, end: usize, right: Option<AffixCategory>, depth: usize) -> Vec<&'c Affix> {
        if depth >= self.config.max_affixes() {
            return vec![];
        }
        let prefix = &self.word[..end];
        let prefix_chars = prefix.chars().count();
        let min_root = self.config.min_root_len();
        let grammar = self.config.grammar();

        self.config
            .inventory()
            .suffixes_of(prefix)
            .into_iter()
            .filter(|a| prefix_chars >= a.char_len() + min_root)
            .filter(|a| match right {
                None => grammar.may_end_word(a.category),
                Some(r) => grammar.is_legal(Slot::Affix(a.category), r),
            })
            .collect()
    }

    /// A state with no viable continuation: it is a candidate only if the
    /// innermost peeled affix may follow the root directly.
    fn terminal(&self, end: usize, right: Option<AffixCategory>) -> Option<Path<'c>> {
        let innermost = right?;
        if !self.config.grammar().is_legal(Slot::Root, innermost) {
            return None;
        }
        Some(Path {
            root_end: end,
            root_chars: self.word[..end].chars().count(),
            peeled: vec![],
        })
    }

    /// Best finished branch below this state, or `None` if every branch is
    /// discarded.
    fn best(&mut self, end: usize, right: Option<AffixCategory>, depth: usize) -> Option<Path<'c>> {
        let key = (end, right, depth);
        if let Some(hit) = self.memo.get(&key) {
            return hit.clone();
        }

        let mut best: Option<Path<'c>> = None;
        for affix in self.expansions(end, right, depth) {
            let child_end = end - affix.form.len();
            let Some(child) = self.best(child_end, Some(affix.category), depth + 1) else {
                continue;
            };
            let mut peeled = Vec::with_capacity(child.peeled.len() + 1);
            peeled.push(affix);
            peeled.extend(child.peeled);
            let path = Path {
                root_end: child.root_end,
                root_chars: child.root_chars,
                peeled,
            };
            best = match best {
                Some(b) if !path.beats(&b) => Some(b),
                _ => Some(path),
            };
        }

        let result = best.or_else(|| self.terminal(end, right));
        self.memo.insert(key, result.clone());
        result
    }

    /// Push every finished branch below this state onto `out`. Returns
    /// whether any branch below survived.
    fn collect(
        &mut self,
        end: usize,
        right: Option<AffixCategory>,
        depth: usize,
        peeled: &mut Vec<&'c Affix>,
        out: &mut Vec<Candidate>,
    ) -> bool {
        if self.visited >= ENUMERATION_BUDGET {
            // Unexplored: do not let the parent mistake this for a dead end.
            return true;
        }
        self.visited += 1;

        let mut found = false;
        for affix in self.expansions(end, right, depth) {
            peeled.push(affix);
            found |= self.collect(end - affix.form.len(), Some(affix.category), depth + 1, peeled, out);
            peeled.pop();
        }
        if found {
            return true;
        }

        match self.terminal(end, right) {
            Some(leaf) => {
                let path = Path {
                    peeled: peeled.clone(),
                    ..leaf
                };
                out.push(path.into_candidate(self.word));
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AffixCategory::*;

    // {-sin} 3POSS, {-de} LOC, {-gi} ADJ chained ROOT -> 3POSS -> LOC -> ADJ.
    const MAHKAME: &str = r#"{
        "affixes": { "3POSS": ["sin"], "LOC": ["de"], "ADJ": ["gi"] },
        "grammar": { "ROOT": ["3POSS"], "3POSS": ["LOC"], "LOC": ["ADJ"] },
        "loanwords": [ { "label": "arabic", "chars": "ḥ", "substrings": ["kitab"] } ]
    }"#;

    // The longest word-final match {-nde} leads to a dead end.
    const EVINDE: &str = r#"{
        "affixes": { "3POSS": ["in"], "LOC": ["de", "nde"] },
        "grammar": { "ROOT": ["3POSS"], "3POSS": ["LOC"] }
    }"#;

    // Two equally long splits of {evinde}.
    const EVINDE_AMBIGUOUS: &str = r#"{
        "affixes": { "3POSS": ["i", "in"], "LOC": ["de", "nde"] },
        "grammar": { "ROOT": ["3POSS"], "3POSS": ["LOC"] }
    }"#;

    const ATLARI: &str = r#"{
        "affixes": { "PL": ["lar"], "3POSS": ["ï"] },
        "grammar": { "ROOT": ["PL", "3POSS"], "PL": ["3POSS"] }
    }"#;

    fn config(json: &str) -> Config {
        Config::from_json(json).unwrap()
    }

    fn split(r: &AnalysisResult) -> Vec<(&str, AffixCategory)> {
        r.affixes()
            .iter()
            .map(|a| (a.form.as_str(), a.category))
            .collect()
    }

    #[test]
    fn test_mahkamesindegi() {
        let c = config(MAHKAME);
        let r = analyze_word("maḥkamesindegi", &c).unwrap();
        assert_eq!(r.root(), "maḥkame");
        assert_eq!(split(&r), [("sin", Poss3), ("de", Loc), ("gi", Adj)]);
        assert_eq!(r.note, Note::PatternMatch);
        assert_eq!(r.note.to_string(), "Turkic morpheme pattern matching");
        // The root carries an Arabic letter; the note still reports the split.
        assert_eq!(r.loanwords[0].label, "arabic");
    }

    #[test]
    fn test_kitab_loanword() {
        let r = analyze_word("kitab", &config(MAHKAME)).unwrap();
        assert_eq!(r.root(), "kitab");
        assert!(r.affixes().is_empty());
        assert_eq!(r.note.to_string(), "possible arabic loanword");
    }

    #[test]
    fn test_kitab_without_signatures() {
        let r = analyze_word("kitab", &config(EVINDE)).unwrap();
        assert_eq!(r.root(), "kitab");
        assert!(r.loanwords.is_empty());
        assert_eq!(r.note, Note::Unanalyzed);
        assert_eq!(r.note.to_string(), "no match — treated as unanalyzed root");
    }

    #[test]
    fn test_empty_word_rejected() {
        assert_eq!(
            analyze_word("", &config(MAHKAME)),
            Err(InvalidInputError::Empty)
        );
    }

    #[test]
    fn test_whitespace_rejected() {
        assert!(matches!(
            analyze_word("ev de", &config(MAHKAME)),
            Err(InvalidInputError::Whitespace(_))
        ));
    }

    #[test]
    fn test_illegal_attachment_discarded() {
        // {-de} is a legal final affix, but LOC may not follow the root.
        let r = analyze_word("evde", &config(MAHKAME)).unwrap();
        assert_eq!(r.root(), "evde");
        assert!(r.affixes().is_empty());
        assert_eq!(r.note, Note::Unanalyzed);
    }

    #[test]
    fn test_min_root_length() {
        let c = config(MAHKAME);
        let r = analyze_word("absin", &c).unwrap();
        assert_eq!(r.root(), "ab");
        assert_eq!(split(&r), [("sin", Poss3)]);

        let r = analyze_word("xsin", &c).unwrap();
        assert_eq!(r.root(), "xsin");
        assert!(r.affixes().is_empty());
    }

    #[test]
    fn test_backtracks_past_longest_match() {
        let r = analyze_word("evinde", &config(EVINDE)).unwrap();
        assert_eq!(r.root(), "ev");
        assert_eq!(split(&r), [("in", Poss3), ("de", Loc)]);
    }

    #[test]
    fn test_prefers_longer_final_affix_on_tie() {
        let r = analyze_word("evinde", &config(EVINDE_AMBIGUOUS)).unwrap();
        assert_eq!(r.root(), "ev");
        assert_eq!(split(&r), [("i", Poss3), ("nde", Loc)]);
    }

    #[test]
    fn test_keeps_peeling_while_legal() {
        let r = analyze_word("atlarï", &config(ATLARI)).unwrap();
        assert_eq!(r.root(), "at");
        assert_eq!(split(&r), [("lar", Pl), ("ï", Poss3)]);
    }

    #[test]
    fn test_max_affixes_bounds_chain() {
        let json = ATLARI.replacen('{', r#"{ "max_affixes": 1,"#, 1);
        let r = analyze_word("atlarï", &config(&json)).unwrap();
        assert_eq!(r.root(), "atlar");
        assert_eq!(split(&r), [("ï", Poss3)]);
    }

    #[test]
    fn test_repeated_calls_agree() {
        let c = config(EVINDE_AMBIGUOUS);
        let first = analyze_word("evinde", &c).unwrap();
        for _ in 0..10 {
            assert_eq!(analyze_word("evinde", &c).unwrap(), first);
        }
    }

    #[test]
    fn test_enumerate_lists_all_splits() {
        let c = config(EVINDE_AMBIGUOUS);
        let all = enumerate_candidates("evinde", &c).unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0], analyze_word("evinde", &c).unwrap().segmentation);
        assert_eq!(all[1].affixes[0].form, "in");
    }

    #[test]
    fn test_enumerate_empty_without_split() {
        let all = enumerate_candidates("kitab", &config(MAHKAME)).unwrap();
        assert!(all.is_empty());
    }

    #[test]
    fn test_lexicon_word_kept_whole() {
        let c = Config::embedded().unwrap();
        let r = analyze_word("birlä", &c).unwrap();
        assert_eq!(r.root(), "birlä");
        assert!(r.affixes().is_empty());
        assert_eq!(r.note, Note::Lexical);
    }

    #[test]
    fn test_lexicon_does_not_block_split() {
        let json = ATLARI.replacen('{', r#"{ "lexicon": ["atlarï", "at"],"#, 1);
        let c = config(&json);

        let r = analyze_word("atlarï", &c).unwrap();
        assert_eq!(split(&r), [("lar", Pl), ("ï", Poss3)]);
        assert_eq!(r.note, Note::PatternMatch);

        let r = analyze_word("at", &c).unwrap();
        assert!(r.affixes().is_empty());
        assert_eq!(r.note, Note::Lexical);
    }

    #[test]
    fn test_embedded_kitab() {
        let c = Config::embedded().unwrap();
        let r = analyze_word("kitab", &c).unwrap();
        assert_eq!(r.root(), "kitab");
        assert_eq!(r.note.to_string(), "possible arabic loanword");
    }
}
