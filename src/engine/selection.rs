use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;

use crate::model::word::{Word, WordList};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("at least {needed} registered words are needed, only {available} available")]
    NotEnoughWords { needed: usize, available: usize },

    #[error("pick at least one word")]
    EmptySelection,
}

/// `k` distinct positions of `words`, drawn uniformly without replacement.
pub fn select_random<R: Rng + ?Sized>(
    words: &[Word],
    k: usize,
    rng: &mut R,
) -> Result<WordList, SelectionError> {
    if k == 0 {
        return Err(SelectionError::EmptySelection);
    }
    if words.len() < k {
        return Err(SelectionError::NotEnoughWords {
            needed: k,
            available: words.len(),
        });
    }

    Ok(words.choose_multiple(rng, k).cloned().collect())
}

/// The caller's picks, unchanged.
pub fn select_manual(picks: &[Word]) -> Result<WordList, SelectionError> {
    if picks.is_empty() {
        return Err(SelectionError::EmptySelection);
    }
    Ok(picks.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn words(items: &[&str]) -> WordList {
        items.iter().filter_map(|s| Word::parse(s)).collect()
    }

    #[test]
    fn triples_from_four_are_always_subsets() {
        let pool = words(&["a", "b", "c", "d"]);
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..1000 {
            let picked = select_random(&pool, 3, &mut rng).unwrap();
            assert_eq!(picked.len(), 3);

            let distinct: HashSet<_> = picked.iter().collect();
            assert_eq!(distinct.len(), 3);
            assert!(picked.iter().all(|w| pool.contains(w)));
        }
    }

    #[test]
    fn every_word_eventually_gets_picked() {
        let pool = words(&["a", "b", "c", "d"]);
        let mut rng = StdRng::seed_from_u64(11);
        let mut seen = HashSet::new();

        for _ in 0..200 {
            seen.extend(select_random(&pool, 3, &mut rng).unwrap());
        }
        assert_eq!(seen.len(), 4);
    }

    #[test]
    fn too_few_words_is_refused() {
        let pool = words(&["a", "b"]);
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            select_random(&pool, 3, &mut rng),
            Err(SelectionError::NotEnoughWords {
                needed: 3,
                available: 2
            })
        );
    }

    #[test]
    fn manual_selection_is_verbatim() {
        let picks = words(&["pear", "apple"]);
        assert_eq!(select_manual(&picks).unwrap(), picks);
        assert_eq!(select_manual(&[]), Err(SelectionError::EmptySelection));
    }

    proptest! {
        #[test]
        fn random_selection_is_k_distinct_members(
            pool in proptest::collection::btree_set("[a-z]{1,8}", 1..30),
            k in 1usize..10,
            seed in any::<u64>(),
        ) {
            let pool: WordList = pool.iter().filter_map(|s| Word::parse(s)).collect();
            let mut rng = StdRng::seed_from_u64(seed);

            match select_random(&pool, k, &mut rng) {
                Ok(picked) => {
                    prop_assert!(pool.len() >= k);
                    prop_assert_eq!(picked.len(), k);
                    let distinct: HashSet<_> = picked.iter().collect();
                    prop_assert_eq!(distinct.len(), k);
                    prop_assert!(picked.iter().all(|w| pool.contains(w)));
                }
                Err(e) => {
                    prop_assert!(pool.len() < k);
                    prop_assert_eq!(e, SelectionError::NotEnoughWords { needed: k, available: pool.len() });
                }
            }
        }
    }
}
