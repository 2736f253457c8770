// Loanword signatures: letters and letter sequences typical of borrowings.

use serde::Deserialize;

use crate::error::ConfigError;
use crate::types::LoanwordMatch;

/// Patterns associated with one source language.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoanwordSignature {
    pub label: String,
    /// Character class: any of these characters in a root is a match.
    #[serde(default)]
    pub chars: String,
    /// Substrings that mark a root as borrowed.
    #[serde(default)]
    pub substrings: Vec<String>,
}

/// Matches residual roots against every configured signature.
///
/// Matching is advisory only and never influences segmentation.
#[derive(Debug, Clone, Default)]
pub struct LoanwordMatcher {
    signatures: Vec<LoanwordSignature>,
}

impl LoanwordMatcher {
    pub fn new(signatures: Vec<LoanwordSignature>) -> Result<Self, ConfigError> {
        for (i, sig) in signatures.iter().enumerate() {
            if sig.label.trim().is_empty() {
                return Err(ConfigError::EmptySignatureLabel(i));
            }
            let no_patterns = sig.chars.is_empty() && sig.substrings.is_empty();
            if no_patterns || sig.substrings.iter().any(String::is_empty) {
                return Err(ConfigError::EmptySignature(sig.label.clone()));
            }
        }
        Ok(Self { signatures })
    }

    /// Every signature matching `root`, in configuration order.
    ///
    /// The evidence of a match is the longest matching substring if there is
    /// one, otherwise the distinct class characters found in the root.
    pub fn matches(&self, root: &str) -> Vec<LoanwordMatch> {
        let mut out = Vec::new();
        for sig in &self.signatures {
            let substring = sig
                .substrings
                .iter()
                .filter(|s| root.contains(s.as_str()))
                .fold(None::<&String>, |best, s| match best {
                    Some(b) if b.chars().count() >= s.chars().count() => Some(b),
                    _ => Some(s),
                });

            let evidence = match substring {
                Some(s) => s.clone(),
                None => {
                    let mut found = String::new();
                    for c in root.chars() {
                        if sig.chars.contains(c) && !found.contains(c) {
                            found.push(c);
                        }
                    }
                    found
                }
            };

            if !evidence.is_empty() {
                out.push(LoanwordMatch {
                    label: sig.label.clone(),
                    evidence,
                });
            }
        }
        out
    }

    pub fn len(&self) -> usize {
        self.signatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }
}
