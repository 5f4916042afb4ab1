//! Winner ordering for the supported allocation policies.
//!
//! Orderings are composed from explicit sequence operations (partition,
//! shuffle, split, concatenate) rather than index juggling on one buffer.

use rand::Rng;
use rand::seq::SliceRandom;

/// Number of shuffled regular candidates promoted into the preferred tier.
pub const PROMOTED_REGULAR_COUNT: usize = 3;

/// Split candidates into `(preferred, regular)`.
///
/// Both halves keep the input order.
#[must_use]
pub fn partition_preferred<T, F>(candidates: Vec<T>, is_preferred: F) -> (Vec<T>, Vec<T>)
where
    F: Fn(&T) -> bool,
{
    candidates
        .into_iter()
        .partition(|candidate| is_preferred(candidate))
}

/// Split off the last `count` items, returning `(head, tail)`.
///
/// Asking for more items than exist yields every item in the tail.
///
/// # Examples
///
/// ```
/// use prize_allocation::split_tail;
///
/// assert_eq!(split_tail(vec![1, 2, 3, 4], 3), (vec![1], vec![2, 3, 4]));
/// assert_eq!(split_tail(vec![1, 2], 3), (vec![], vec![1, 2]));
/// ```
#[must_use]
pub fn split_tail<T>(mut items: Vec<T>, count: usize) -> (Vec<T>, Vec<T>) {
    let tail = items.split_off(items.len().saturating_sub(count));
    (items, tail)
}

/// Order winners for the linear-decay policy.
///
/// Regular candidates are shuffled and the last
/// [`PROMOTED_REGULAR_COUNT`] of them join the preferred tier. That tier is
/// shuffled and placed after the remaining regular candidates, so preferred
/// candidates always end up among the final places.
#[must_use]
pub fn linear_decay_order<T, F, R>(candidates: Vec<T>, is_preferred: F, rng: &mut R) -> Vec<T>
where
    F: Fn(&T) -> bool,
    R: Rng + ?Sized,
{
    let (mut preferred, mut regular) = partition_preferred(candidates, is_preferred);
    regular.shuffle(rng);

    let (mut winners, promoted) = split_tail(regular, PROMOTED_REGULAR_COUNT);
    preferred.extend(promoted);
    preferred.shuffle(rng);

    winners.extend(preferred);
    winners
}

/// Order winners for the lottery policy.
///
/// Regular candidates are shuffled; preferred candidates follow in their
/// input order.
#[must_use]
pub fn lottery_order<T, F, R>(candidates: Vec<T>, is_preferred: F, rng: &mut R) -> Vec<T>
where
    F: Fn(&T) -> bool,
    R: Rng + ?Sized,
{
    let (preferred, mut winners) = partition_preferred(candidates, is_preferred);
    winners.shuffle(rng);
    winners.extend(preferred);
    winners
}

#[cfg(test)]
mod tests {
    //! Unit coverage for winner ordering.

    use std::collections::{BTreeMap, BTreeSet};

    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(42)
    }

    fn names(raw: &[&'static str]) -> Vec<&'static str> {
        raw.to_vec()
    }

    fn sorted(items: &[&'static str]) -> Vec<&'static str> {
        let mut copy = items.to_vec();
        copy.sort_unstable();
        copy
    }

    #[rstest]
    fn partition_keeps_input_order_in_both_halves() {
        let (preferred, regular) =
            partition_preferred(names(&["a", "B", "c", "D", "e"]), |name| {
                name.chars().all(char::is_uppercase)
            });
        assert_eq!(preferred, vec!["B", "D"]);
        assert_eq!(regular, vec!["a", "c", "e"]);
    }

    #[rstest]
    #[case::more_than_requested(vec![1, 2, 3, 4, 5], vec![1, 2], vec![3, 4, 5])]
    #[case::exactly_requested(vec![1, 2, 3], vec![], vec![1, 2, 3])]
    #[case::fewer_than_requested(vec![1, 2], vec![], vec![1, 2])]
    #[case::empty(vec![], vec![], vec![])]
    fn split_tail_moves_what_is_available(
        #[case] items: Vec<u8>,
        #[case] head: Vec<u8>,
        #[case] tail: Vec<u8>,
    ) {
        assert_eq!(split_tail(items, PROMOTED_REGULAR_COUNT), (head, tail));
    }

    #[rstest]
    fn linear_decay_order_is_a_permutation(mut rng: ChaCha8Rng) {
        let candidates = names(&["a", "b", "c", "d", "e", "f", "g"]);
        let ordered = linear_decay_order(candidates.clone(), |name| *name == "c", &mut rng);
        assert_eq!(sorted(&ordered), sorted(&candidates));
    }

    #[rstest]
    #[case::no_regular(&["p", "q"], &["p", "q"])]
    #[case::two_regular(&["a", "p", "b"], &["p"])]
    #[case::many_regular(&["a", "b", "p", "c", "d", "e", "q", "f"], &["p", "q"])]
    fn linear_decay_order_places_preferred_in_final_tier(
        mut rng: ChaCha8Rng,
        #[case] candidates: &[&'static str],
        #[case] preferred: &[&'static str],
    ) {
        let preferred_set: BTreeSet<_> = preferred.iter().copied().collect();
        let regular_count = candidates.len() - preferred.len();
        let tier_len = preferred.len() + regular_count.min(PROMOTED_REGULAR_COUNT);

        let ordered = linear_decay_order(
            candidates.to_vec(),
            |name| preferred_set.contains(name),
            &mut rng,
        );

        let tier: BTreeSet<_> = ordered[ordered.len() - tier_len..]
            .iter()
            .copied()
            .collect();
        assert!(
            preferred_set.is_subset(&tier),
            "preferred candidates must sit in the final tier: {ordered:?}"
        );
    }

    #[rstest]
    fn linear_decay_order_handles_empty_input(mut rng: ChaCha8Rng) {
        let ordered = linear_decay_order(Vec::<&str>::new(), |_| true, &mut rng);
        assert!(ordered.is_empty());
    }

    #[rstest]
    fn lottery_order_demotes_preferred_in_input_order(mut rng: ChaCha8Rng) {
        let candidates = names(&["q", "a", "p", "b", "c"]);
        let ordered = lottery_order(candidates, |name| matches!(*name, "p" | "q"), &mut rng);

        assert_eq!(&ordered[3..], &["q", "p"]);
        assert_eq!(sorted(&ordered[..3]), vec!["a", "b", "c"]);
    }

    #[rstest]
    fn shuffling_reaches_every_permutation(mut rng: ChaCha8Rng) {
        let mut seen = BTreeMap::new();
        for _ in 0..600 {
            let ordered = lottery_order(names(&["a", "b", "c"]), |_| false, &mut rng);
            *seen.entry(ordered).or_insert(0_u32) += 1;
        }
        assert_eq!(seen.len(), 6, "all permutations should occur: {seen:?}");
    }
}
