//! Question order shuffling over an injected random source

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Return `items` in a uniformly random order drawn from `rng`
pub fn shuffle<T, R: Rng + ?Sized>(mut items: Vec<T>, rng: &mut R) -> Vec<T> {
    items.shuffle(rng);
    items
}

/// Build the generator a run draws its shuffles from
///
/// A fixed seed makes every shuffle of the run reproducible.
pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shuffle_is_a_permutation() {
        let mut rng = rng_from_seed(Some(7));
        let mut shuffled = shuffle((0..50).collect::<Vec<_>>(), &mut rng);
        shuffled.sort_unstable();
        assert_eq!(shuffled, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn same_seed_same_order() {
        let a = shuffle((0..20).collect::<Vec<_>>(), &mut rng_from_seed(Some(42)));
        let b = shuffle((0..20).collect::<Vec<_>>(), &mut rng_from_seed(Some(42)));
        assert_eq!(a, b);
    }

    #[test]
    fn empty_and_single_are_unchanged() {
        let mut rng = rng_from_seed(Some(1));
        assert!(shuffle(Vec::<u8>::new(), &mut rng).is_empty());
        assert_eq!(shuffle(vec!['x'], &mut rng), vec!['x']);
    }
}
