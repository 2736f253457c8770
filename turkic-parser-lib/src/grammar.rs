// Morphotactic grammar: which affix category may directly follow which.

use std::collections::{BTreeMap, HashSet, VecDeque};

use crate::error::ConfigError;
use crate::inventory::AffixInventory;
use crate::types::{Affix, AffixCategory, Slot};

/// Legal adjacencies between the root and affix categories.
///
/// A legal word is a walk `ROOT -> c1 -> c2 -> ... -> cn` over these edges
/// whose last category may end a word.
#[derive(Debug, Clone)]
pub struct Morphotactics {
    edges: HashSet<(Slot, AffixCategory)>,
    non_final: HashSet<AffixCategory>,
}

impl Morphotactics {
    /// Build the grammar and check it against the inventory: every rule must
    /// name declared categories, every declared category must be reachable
    /// from ROOT, and a category that may not end a word must have some
    /// successor.
    pub fn new(
        rules: &BTreeMap<Slot, Vec<AffixCategory>>,
        non_final: &[AffixCategory],
        inventory: &AffixInventory,
    ) -> Result<Self, ConfigError> {
        let mut edges = HashSet::new();
        for (&predecessor, successors) in rules {
            for &successor in successors {
                let declared = match predecessor {
                    Slot::Root => true,
                    Slot::Affix(p) => inventory.contains(p),
                } && inventory.contains(successor);
                if !declared {
                    return Err(ConfigError::UndeclaredCategory {
                        predecessor,
                        successor,
                    });
                }
                edges.insert((predecessor, successor));
            }
        }

        let grammar = Self {
            edges,
            non_final: non_final.iter().copied().collect(),
        };

        let reachable = grammar.reachable_from_root();
        if let Some(c) = inventory.categories().find(|c| !reachable.contains(c)) {
            return Err(ConfigError::Unreachable(c));
        }

        for &c in non_final {
            let has_successor = grammar
                .edges
                .iter()
                .any(|&(p, _)| p == Slot::Affix(c));
            if !has_successor {
                return Err(ConfigError::DeadEnd(c));
            }
        }

        Ok(grammar)
    }

    /// O(1) adjacency test.
    pub fn is_legal(&self, predecessor: Slot, successor: AffixCategory) -> bool {
        self.edges.contains(&(predecessor, successor))
    }

    /// Whether `category` may be the last affix of a word.
    pub fn may_end_word(&self, category: AffixCategory) -> bool {
        !self.non_final.contains(&category)
    }

    /// Check a whole chain given in word order, including its attachment to
    /// ROOT and its final category.
    pub fn accepts(&self, chain: &[Affix]) -> bool {
        let mut prev = Slot::Root;
        for a in chain {
            if !self.is_legal(prev, a.category) {
                return false;
            }
            prev = Slot::Affix(a.category);
        }
        match prev {
            Slot::Root => true,
            Slot::Affix(last) => self.may_end_word(last),
        }
    }

    pub fn rule_count(&self) -> usize {
        self.edges.len()
    }

    fn reachable_from_root(&self) -> HashSet<AffixCategory> {
        let mut seen = HashSet::new();
        let mut queue = VecDeque::from([Slot::Root]);
        while let Some(slot) = queue.pop_front() {
            for &(p, s) in &self.edges {
                if p == slot && seen.insert(s) {
                    queue.push_back(Slot::Affix(s));
                }
            }
        }
        seen
    }
}
