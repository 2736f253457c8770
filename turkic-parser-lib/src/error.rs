// Error types for configuration loading, word analysis and table I/O.

use std::path::PathBuf;

use thiserror::Error;

use crate::types::{AffixCategory, Slot};

/// A label that names no known affix category.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown affix category {0:?}")]
pub struct UnknownCategory(pub String);

/// Malformed inventory, grammar or signature data. The engine cannot start
/// with any of these.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("category {0} declares no affix forms")]
    EmptyCategory(AffixCategory),

    #[error("category {0} contains an empty affix form")]
    EmptyForm(AffixCategory),

    #[error("category {category} lists the form {form:?} more than once")]
    DuplicateForm {
        category: AffixCategory,
        form: String,
    },

    #[error("grammar rule {predecessor} -> {successor} names a category with no affix forms")]
    UndeclaredCategory {
        predecessor: Slot,
        successor: AffixCategory,
    },

    #[error("category {0} has no legal predecessor path from ROOT")]
    Unreachable(AffixCategory),

    #[error("category {0} may not end a word, but no category may follow it")]
    DeadEnd(AffixCategory),

    #[error("loanword signature at position {0} has an empty label")]
    EmptySignatureLabel(usize),

    #[error("loanword signature {0:?} has no characters or substrings")]
    EmptySignature(String),

    #[error("invalid setting {name}: {reason}")]
    InvalidSetting {
        name: &'static str,
        reason: &'static str,
    },
}

/// A word the engine refuses to analyse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidInputError {
    #[error("cannot analyse an empty word")]
    Empty,

    #[error("{0:?} contains whitespace; pass one word at a time")]
    Whitespace(String),
}

/// Problems reading or writing tabular files.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("frequency table has no 'word' column")]
    MissingWordColumn,

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
