// Ranking of competing segmentations.
//
// The order is total and fixed so that every word always gets the same winner:
//   1. longer root first (avoid over-segmenting the stem),
//   2. shorter affix chain first,
//   3. reading the chain from the end of the word inward, the first position
//      with a longer affix form wins,
//   4. then category declaration order, then form text, same reading order.

use std::cmp::Ordering;

use crate::types::{Affix, Candidate};

/// Compare two candidates, best first (sorting with this puts the winner at
/// index 0).
pub fn compare(a: &Candidate, b: &Candidate) -> Ordering {
    compare_peeled(
        a.root_len(),
        a.affixes.iter().rev(),
        b.root_len(),
        b.affixes.iter().rev(),
    )
}

/// Same order as [`compare`], with chains given in peel order (word-final
/// affix first).
pub(crate) fn compare_peeled<'a, 'b, A, B>(a_root: usize, a: A, b_root: usize, b: B) -> Ordering
where
    A: ExactSizeIterator<Item = &'a Affix> + Clone,
    B: ExactSizeIterator<Item = &'b Affix> + Clone,
{
    b_root
        .cmp(&a_root)
        .then_with(|| a.len().cmp(&b.len()))
        .then_with(|| {
            a.clone()
                .zip(b.clone())
                .map(|(x, y)| y.char_len().cmp(&x.char_len()))
                .find(|o| o.is_ne())
                .unwrap_or(Ordering::Equal)
        })
        .then_with(|| a.clone().map(|x| x.category).cmp(b.clone().map(|y| y.category)))
        .then_with(|| a.map(|x| x.form.as_str()).cmp(b.map(|y| y.form.as_str())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AffixCategory::*;

    fn cand(root: &str, affixes: &[(&str, crate::types::AffixCategory)]) -> Candidate {
        Candidate {
            root: root.to_string(),
            affixes: affixes.iter().map(|&(f, c)| Affix::new(f, c)).collect(),
        }
    }

    #[test]
    fn test_longer_root_wins() {
        let a = cand("atlar", &[("ï", Poss3)]);
        let b = cand("at", &[("lar", Pl), ("ï", Poss3)]);
        assert_eq!(compare(&a, &b), Ordering::Less);
        assert_eq!(compare(&b, &a), Ordering::Greater);
    }

    #[test]
    fn test_root_length_counts_characters() {
        // "maḥ" is 3 characters but 4 bytes.
        let a = cand("maḥ", &[("da", Loc)]);
        let b = cand("kita", &[("da", Loc)]);
        assert_eq!(compare(&b, &a), Ordering::Less);
    }

    #[test]
    fn test_shorter_chain_wins_on_equal_root() {
        let a = cand("ev", &[("inde", Loc)]);
        let b = cand("ev", &[("in", Poss3), ("de", Loc)]);
        assert_eq!(compare(&a, &b), Ordering::Less);
    }

    #[test]
    fn test_longest_final_affix_wins() {
        // Same root and chain length; the word-final affix decides first.
        let a = cand("ev", &[("i", Poss3), ("nde", Loc)]);
        let b = cand("ev", &[("in", Poss3), ("de", Loc)]);
        assert_eq!(compare(&a, &b), Ordering::Less);
    }

    #[test]
    fn test_category_order_breaks_remaining_ties() {
        let a = cand("at", &[("lar", Pl)]);
        let b = cand("at", &[("lar", Pl3)]);
        assert_eq!(compare(&a, &b), Ordering::Less);
    }

    #[test]
    fn test_identical_candidates_are_equal() {
        let a = cand("at", &[("lar", Pl)]);
        assert_eq!(compare(&a, &a.clone()), Ordering::Equal);
    }

    #[test]
    fn test_sort_is_deterministic() {
        let mut v = vec![
            cand("ev", &[("in", Poss3), ("de", Loc)]),
            cand("evin", &[("de", Loc)]),
            cand("ev", &[("i", Poss3), ("nde", Loc)]),
        ];
        v.sort_by(compare);
        assert_eq!(v[0].root, "evin");
        assert_eq!(v[1].affixes[1].form, "nde");
        assert_eq!(v[2].affixes[1].form, "de");
    }
}
