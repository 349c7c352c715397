//! Random permutations.

use rand::seq::SliceRandom;
use rand::Rng;

/// Return a uniformly shuffled copy of `items`.
pub fn shuffled<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut out = items.to_vec();
    out.shuffle(rng);
    out
}
