// Analyser configuration: the affix inventory, morphotactic grammar, loanword
// signatures and lexicon, loaded once and shared read-only.

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::grammar::Morphotactics;
use crate::inventory::AffixInventory;
use crate::loanword::{LoanwordMatcher, LoanwordSignature};
use crate::types::{AffixCategory, Slot};

const EMBEDDED_JSON: &str = include_str!("../data/chagatai.json");

fn default_min_root_len() -> usize {
    2
}

fn default_max_affixes() -> usize {
    8
}

/// Configuration as written on disk, before validation.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfig {
    #[serde(default)]
    pub version: String,
    /// Shortest root, in characters, that peeling may leave behind.
    #[serde(default = "default_min_root_len")]
    pub min_root_len: usize,
    /// Longest affix chain the search will build.
    #[serde(default = "default_max_affixes")]
    pub max_affixes: usize,
    pub affixes: BTreeMap<AffixCategory, Vec<String>>,
    pub grammar: BTreeMap<Slot, Vec<AffixCategory>>,
    #[serde(default)]
    pub non_final: Vec<AffixCategory>,
    #[serde(default)]
    pub loanwords: Vec<LoanwordSignature>,
    /// Short words (postpositions, particles, pronouns) noted as such when
    /// nothing can be peeled from them.
    #[serde(default)]
    pub lexicon: Vec<String>,
}

/// Validated, immutable analyser configuration.
#[derive(Debug, Clone)]
pub struct Config {
    version: String,
    min_root_len: usize,
    max_affixes: usize,
    inventory: AffixInventory,
    grammar: Morphotactics,
    loanwords: LoanwordMatcher,
    lexicon: HashSet<String>,
}

impl Config {
    /// The built-in Chagatai/Qazaq resource.
    pub fn embedded() -> Result<Self, ConfigError> {
        Self::from_json(EMBEDDED_JSON)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = serde_json::from_str(text)?;
        Self::from_raw(raw)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    pub fn from_raw(raw: RawConfig) -> Result<Self, ConfigError> {
        if raw.min_root_len == 0 {
            return Err(ConfigError::InvalidSetting {
                name: "min_root_len",
                reason: "must be at least 1",
            });
        }
        if raw.max_affixes == 0 {
            return Err(ConfigError::InvalidSetting {
                name: "max_affixes",
                reason: "must be at least 1",
            });
        }

        let inventory = AffixInventory::new(raw.affixes)?;
        let grammar = Morphotactics::new(&raw.grammar, &raw.non_final, &inventory)?;
        let loanwords = LoanwordMatcher::new(raw.loanwords)?;
        let lexicon = raw.lexicon.into_iter().collect();

        log::info!(
            "loaded configuration {:?}: {} affix forms, {} grammar rules, {} loanword signatures",
            raw.version,
            inventory.len(),
            grammar.rule_count(),
            loanwords.len()
        );

        Ok(Self {
            version: raw.version,
            min_root_len: raw.min_root_len,
            max_affixes: raw.max_affixes,
            inventory,
            grammar,
            loanwords,
            lexicon,
        })
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn min_root_len(&self) -> usize {
        self.min_root_len
    }

    pub fn max_affixes(&self) -> usize {
        self.max_affixes
    }

    pub fn inventory(&self) -> &AffixInventory {
        &self.inventory
    }

    pub fn grammar(&self) -> &Morphotactics {
        &self.grammar
    }

    pub fn loanwords(&self) -> &LoanwordMatcher {
        &self.loanwords
    }

    /// Whether `word` is a listed short word or postposition.
    pub fn is_lexical(&self, word: &str) -> bool {
        self.lexicon.contains(word)
    }
}
