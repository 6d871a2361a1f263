//! Fisher-Yates shuffling.

use rand::Rng;
use rand::rngs::StdRng;

/// Return a uniformly shuffled copy of `list`. The input is left untouched.
///
/// Walks `i` from the last index down to 1, swapping element `i` with a
/// uniformly chosen `j` in `0..=i`.
pub fn shuffle<T: Clone>(list: &[T], rng: &mut StdRng) -> Vec<T> {
    let mut out = list.to_vec();
    for i in (1..out.len()).rev() {
        let j = rng.random_range(0..=i);
        out.swap(i, j);
    }
    out
}
