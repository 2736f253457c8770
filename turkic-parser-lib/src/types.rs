use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize, Serializer};

use crate::error::UnknownCategory;

macro_rules! affix_categories {
    ($($(#[$doc:meta])* $variant:ident => $label:literal,)*) => {
        /// Grammatical category of an affix.
        ///
        /// The set is closed: configuration may only refer to these labels, and
        /// declaration order is the tie-break order used when ranking
        /// otherwise identical segmentations.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
        #[serde(try_from = "String")]
        pub enum AffixCategory {
            $($(#[$doc])* $variant,)*
        }

        impl AffixCategory {
            /// Every category, in declaration order.
            pub const ALL: &'static [AffixCategory] = &[$(AffixCategory::$variant,)*];

            /// Gloss label, e.g. `LOC` or `3POSS`.
            pub fn label(self) -> &'static str {
                match self {
                    $(AffixCategory::$variant => $label,)*
                }
            }
        }
    };
}

affix_categories! {
    /// Plural.
    Pl => "PL",
    Poss1Sg => "POSS.1SG",
    Poss2Sg => "POSS.2SG",
    Poss1Pl => "POSS.1PL",
    Poss2SgPol => "POSS.2SG.POL",
    /// Third person possessive.
    Poss3 => "3POSS",
    Gen => "GEN",
    Acc => "ACC",
    Dat => "DAT",
    Loc => "LOC",
    Abl => "ABL",
    /// Equative.
    Eqv => "EQV",
    /// Privative ("without").
    Prv => "PRV",
    /// Adjectivizer, including the relational {-gi}.
    Adj => "ADJ",
    /// Nominalizer.
    Nm => "NM",
    /// Ordinal numeral.
    Ordinal => "ORD",
    /// Interrogative particle.
    Q => "Q",
    /// Denominal verbalizer.
    Vb => "VB",
    Pass => "PASS",
    Rfl => "RFL",
    Rcp => "RCP",
    /// Causative.
    Cs => "CS",
    Neg => "NEG",
    Pst => "PST",
    Ptcp => "PTCP",
    Aor => "AOR",
    NegAor => "NEG.AOR",
    /// Converb.
    Cv => "CV",
    /// Verbal noun.
    Vn => "VN",
    /// Conditional.
    Cnd => "CND",
    Opt => "OPT",
    /// Voluntative.
    Vol => "VOL",
    /// Evidential past.
    Ev => "EV",
    Sg1 => "1SG",
    Pl1 => "1PL",
    Sg2Pol => "2SG.POL",
    Pl3 => "3PL",
    /// Copula.
    Cop => "COP",
}

impl fmt::Display for AffixCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AffixCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AffixCategory::ALL
            .iter()
            .copied()
            .find(|c| c.label() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

impl TryFrom<String> for AffixCategory {
    type Error = UnknownCategory;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl Serialize for AffixCategory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// A node of the morphotactic graph: the bare root, or an affix category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum Slot {
    Root,
    Affix(AffixCategory),
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Root => f.write_str("ROOT"),
            Slot::Affix(c) => fmt::Display::fmt(c, f),
        }
    }
}

impl FromStr for Slot {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "ROOT" {
            Ok(Slot::Root)
        } else {
            s.parse().map(Slot::Affix)
        }
    }
}

impl TryFrom<String> for Slot {
    type Error = UnknownCategory;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// One surface form of an affix together with its category.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Affix {
    pub form: String,
    pub category: AffixCategory,
}

impl Affix {
    pub fn new(form: impl Into<String>, category: AffixCategory) -> Self {
        Self {
            form: form.into(),
            category,
        }
    }

    /// Length of the surface form in characters.
    pub fn char_len(&self) -> usize {
        self.form.chars().count()
    }
}

impl fmt::Display for Affix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.form, self.category)
    }
}

/// A root plus the affixes peeled from it, affixes in word order
/// (the one adjacent to the root first).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Candidate {
    pub root: String,
    pub affixes: Vec<Affix>,
}

impl Candidate {
    /// The unsegmented reading of a word.
    pub fn bare(word: &str) -> Self {
        Self {
            root: word.to_string(),
            affixes: vec![],
        }
    }

    /// Root length in characters.
    pub fn root_len(&self) -> usize {
        self.root.chars().count()
    }

    /// Reassemble the surface word: root followed by every affix form.
    pub fn surface(&self) -> String {
        let mut s = self.root.clone();
        for a in &self.affixes {
            s.push_str(&a.form);
        }
        s
    }
}

/// A loanword signature that matched a root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoanwordMatch {
    /// Source-language label, e.g. `arabic`.
    pub label: String,
    /// The characters or substring that triggered the match.
    pub evidence: String,
}

/// How an analysis was reached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Note {
    /// At least one affix was peeled.
    PatternMatch,
    /// No affixes; the word matched a loanword signature.
    Loanword(String),
    /// No affixes; the word is a listed short word or postposition.
    Lexical,
    /// No affixes and no loanword signature.
    Unanalyzed,
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Note::PatternMatch => f.write_str("Turkic morpheme pattern matching"),
            Note::Loanword(label) => write!(f, "possible {label} loanword"),
            Note::Lexical => f.write_str("identified as short word/postposition"),
            Note::Unanalyzed => f.write_str("no match — treated as unanalyzed root"),
        }
    }
}

impl Serialize for Note {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// The engine's answer for one word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisResult {
    pub word: String,
    #[serde(flatten)]
    pub segmentation: Candidate,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub loanwords: Vec<LoanwordMatch>,
    pub note: Note,
}

impl AnalysisResult {
    pub fn root(&self) -> &str {
        &self.segmentation.root
    }

    pub fn affixes(&self) -> &[Affix] {
        &self.segmentation.affixes
    }

    /// True when at least one affix was identified.
    pub fn is_segmented(&self) -> bool {
        !self.segmentation.affixes.is_empty()
    }

    /// The loanword match with the longest evidence; earlier signatures win
    /// ties.
    pub fn most_specific_loanword(&self) -> Option<&LoanwordMatch> {
        most_specific(&self.loanwords)
    }
}

pub(crate) fn most_specific(matches: &[LoanwordMatch]) -> Option<&LoanwordMatch> {
    // max_by_key keeps the last maximum, so scan in reverse.
    matches
        .iter()
        .rev()
        .max_by_key(|m| m.evidence.chars().count())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_labels_round_trip() {
        for &c in AffixCategory::ALL {
            assert_eq!(c.label().parse::<AffixCategory>().unwrap(), c);
        }
    }

    #[test]
    fn test_unknown_category() {
        assert!("LOCATIVE".parse::<AffixCategory>().is_err());
    }

    #[test]
    fn test_slot_parse() {
        assert_eq!("ROOT".parse::<Slot>().unwrap(), Slot::Root);
        assert_eq!(
            "3POSS".parse::<Slot>().unwrap(),
            Slot::Affix(AffixCategory::Poss3)
        );
    }

    #[test]
    fn test_candidate_surface() {
        let c = Candidate {
            root: "maḥkame".to_string(),
            affixes: vec![
                Affix::new("sin", AffixCategory::Poss3),
                Affix::new("de", AffixCategory::Loc),
            ],
        };
        assert_eq!(c.surface(), "maḥkamesinde");
        assert_eq!(c.root_len(), 7);
    }

    #[test]
    fn test_note_text() {
        assert_eq!(
            Note::Loanword("arabic".to_string()).to_string(),
            "possible arabic loanword"
        );
        assert_eq!(
            Note::Unanalyzed.to_string(),
            "no match — treated as unanalyzed root"
        );
    }

    #[test]
    fn test_most_specific_prefers_longest_then_first() {
        let matches = vec![
            LoanwordMatch {
                label: "persian".to_string(),
                evidence: "ā".to_string(),
            },
            LoanwordMatch {
                label: "arabic".to_string(),
                evidence: "ḥ".to_string(),
            },
        ];
        assert_eq!(most_specific(&matches).unwrap().label, "persian");

        let mut longer = matches.clone();
        longer.push(LoanwordMatch {
            label: "ottoman".to_string(),
            evidence: "efendi".to_string(),
        });
        assert_eq!(most_specific(&longer).unwrap().label, "ottoman");
    }
}
