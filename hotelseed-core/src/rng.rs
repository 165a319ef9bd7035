use rand::{rngs::StdRng, seq::SliceRandom, Rng, RngCore, SeedableRng};

/// The source of randomness for generating and linking records.
///
/// Every random decision in the pipeline goes through this type, so a run can
/// be reproduced by seeding it.
pub struct Randomizer {
    rng: Box<dyn RngCore + Send>,
}

impl Randomizer {
    /// Wraps any random number generator.
    pub fn new<R>(rng: R) -> Self
    where
        R: RngCore + Send + 'static,
    {
        Self { rng: Box::new(rng) }
    }

    /// A reproducible randomizer. The same seed always yields the same sequence.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// A randomizer seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    /// Returns a uniformly distributed integer in `[min, max]`.
    /// If `max` is not greater than `min`, `min` is returned.
    pub fn bounded_int(&mut self, min: i64, max: i64) -> i64 {
        if max <= min {
            return min;
        }

        self.rng.gen_range(min..=max)
    }

    /// Same as [Randomizer::bounded_int], for counts and indexes.
    pub fn bounded_usize(&mut self, min: usize, max: usize) -> usize {
        if max <= min {
            return min;
        }

        self.rng.gen_range(min..=max)
    }

    /// Permutes the slice in place using the Fisher-Yates algorithm,
    /// so every permutation is equally likely.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }

    /// Shuffles a copy of `items` and returns its first `len` entries.
    /// The result never contains more entries than `items` has.
    pub fn sample_prefix<T: Clone>(&mut self, items: &[T], len: usize) -> Vec<T> {
        let mut shuffled = items.to_vec();
        self.shuffle(&mut shuffled);
        shuffled.truncate(len);

        shuffled
    }

    /// Returns true with probability `p`.
    pub fn weighted_bool(&mut self, p: f64) -> bool {
        self.rng.gen_bool(p.clamp(0., 1.))
    }
}

impl Default for Randomizer {
    fn default() -> Self {
        Self::from_entropy()
    }
}
