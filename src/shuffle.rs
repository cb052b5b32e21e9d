use rand::seq::SliceRandom;
use rand::Rng;

/// Return a shuffled copy of `items`, leaving the input untouched.
///
/// `SliceRandom::shuffle` is the Fisher-Yates walk from the last index down,
/// swapping each slot with a uniform pick from `[0, i]`.
pub fn shuffled<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut out = items.to_vec();
    out.shuffle(rng);
    out
}
