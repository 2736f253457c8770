pub mod types;
pub mod error;
pub mod inventory;
pub mod grammar;
pub mod loanword;
pub mod config;
pub mod morphology;
pub mod confidence;
pub mod output;
pub mod corpus;
pub mod table;
pub mod batch;

pub use batch::analyze_batch;
pub use config::Config;
pub use corpus::{FrequencyTable, RowOrder, WordEntry};
pub use error::{ConfigError, InvalidInputError, TableError};
pub use morphology::{analyze_word, enumerate_candidates};
pub use types::{Affix, AffixCategory, AnalysisResult, Candidate, LoanwordMatch, Note, Slot};
