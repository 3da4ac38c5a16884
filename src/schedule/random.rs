use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Source of randomness for the random fill tier.
///
/// The engine hands over the eligible worker indices and takes the first one
/// after shuffling, so an implementation fully controls who gets picked.
pub trait RandomSource {
    fn shuffle(&mut self, candidates: &mut [usize]);
}

impl RandomSource for StdRng {
    fn shuffle(&mut self, candidates: &mut [usize]) {
        candidates.shuffle(self);
    }
}

/// Seeded generator when `seed` is given, entropy otherwise
pub fn create_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_order() {
        let mut a = create_rng(Some(42));
        let mut b = create_rng(Some(42));
        let mut left: Vec<usize> = (0..20).collect();
        let mut right = left.clone();
        RandomSource::shuffle(&mut a, &mut left);
        RandomSource::shuffle(&mut b, &mut right);
        assert_eq!(left, right);

        let mut sorted = left.clone();
        sorted.sort();
        assert_eq!(sorted, (0..20).collect::<Vec<_>>());
    }
}
