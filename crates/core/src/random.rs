use rand::rngs::StdRng;
use rand::SeedableRng;

/// Injectable pseudo-random source for price jitter and synthesized data.
///
/// A seeded source hands out identical `StdRng` streams on every call, which
/// lets tests assert exact prices instead of ranges. An entropy source hands
/// out a fresh stream per call. Searches never share a live RNG, so there is
/// no mutable state between them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RandomSource {
    seed: Option<u64>,
}

impl RandomSource {
    pub fn from_entropy() -> Self {
        Self { seed: None }
    }

    pub fn seeded(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }

    pub fn from_seed_option(seed: Option<u64>) -> Self {
        Self { seed }
    }

    pub fn is_seeded(&self) -> bool {
        self.seed.is_some()
    }

    /// Derive a source with a distinct but still deterministic stream. Used
    /// so sibling adapter calls under one seed do not replay each other's
    /// sequences.
    pub fn fork(&self, salt: u64) -> Self {
        Self { seed: self.seed.map(|seed| seed.rotate_left(17) ^ salt) }
    }

    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::Rng;

    use super::RandomSource;

    #[test]
    fn seeded_sources_replay_the_same_stream() {
        let source = RandomSource::seeded(42);
        let first: Vec<u32> = source.rng().sample_iter(rand::distributions::Standard).take(4).collect();
        let second: Vec<u32> = source.rng().sample_iter(rand::distributions::Standard).take(4).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn forked_sources_diverge_but_stay_deterministic() {
        let source = RandomSource::seeded(42);
        let left = source.fork(1);
        let right = source.fork(2);
        assert_ne!(left, right);
        assert_eq!(left, source.fork(1));
        assert!(left.is_seeded());
    }

    #[test]
    fn entropy_source_reports_unseeded() {
        assert!(!RandomSource::from_entropy().is_seeded());
        assert_eq!(RandomSource::from_seed_option(None), RandomSource::from_entropy());
    }
}
