// Affix inventory: surface forms grouped by category, indexed for suffix lookup.

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::error::ConfigError;
use crate::types::{Affix, AffixCategory};

/// Catalogue of known affix surface forms.
#[derive(Debug, Clone)]
pub struct AffixInventory {
    forms: BTreeMap<AffixCategory, Vec<String>>,
    /// Every affix keyed by the last character of its form. Buckets are
    /// ordered longest form first, then by category and form.
    by_last_char: HashMap<char, Vec<Affix>>,
}

impl AffixInventory {
    /// Build the inventory, rejecting empty categories, empty forms and forms
    /// listed twice within one category.
    pub fn new(forms: BTreeMap<AffixCategory, Vec<String>>) -> Result<Self, ConfigError> {
        let mut by_last_char: HashMap<char, Vec<Affix>> = HashMap::new();

        for (&category, list) in &forms {
            if list.is_empty() {
                return Err(ConfigError::EmptyCategory(category));
            }
            let mut seen = HashSet::new();
            for form in list {
                let Some(last) = form.chars().last() else {
                    return Err(ConfigError::EmptyForm(category));
                };
                if !seen.insert(form.as_str()) {
                    return Err(ConfigError::DuplicateForm {
                        category,
                        form: form.clone(),
                    });
                }
                by_last_char
                    .entry(last)
                    .or_default()
                    .push(Affix::new(form.clone(), category));
            }
        }

        for bucket in by_last_char.values_mut() {
            bucket.sort_by(|a, b| {
                b.char_len()
                    .cmp(&a.char_len())
                    .then(a.category.cmp(&b.category))
                    .then_with(|| a.form.cmp(&b.form))
            });
        }

        Ok(Self {
            forms,
            by_last_char,
        })
    }

    /// Surface forms of a category, in declaration order. Empty if the
    /// category is not part of this inventory.
    pub fn forms(&self, category: AffixCategory) -> &[String] {
        self.forms.get(&category).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Whether the category has any forms.
    pub fn contains(&self, category: AffixCategory) -> bool {
        self.forms.contains_key(&category)
    }

    /// Declared categories in enum order.
    pub fn categories(&self) -> impl Iterator<Item = AffixCategory> + '_ {
        self.forms.keys().copied()
    }

    /// Total number of (form, category) pairs.
    pub fn len(&self) -> usize {
        self.forms.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }

    /// All affixes whose form is a suffix of `text`, longest first. Shorter
    /// matches are always included alongside longer ones.
    pub fn suffixes_of(&self, text: &str) -> Vec<&Affix> {
        let Some(last) = text.chars().last() else {
            return vec![];
        };
        self.by_last_char
            .get(&last)
            .map(|bucket| {
                bucket
                    .iter()
                    .filter(|a| text.ends_with(a.form.as_str()))
                    .collect()
            })
            .unwrap_or_default()
    }
}
