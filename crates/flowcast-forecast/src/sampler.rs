use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of indices for drawing samples.
///
/// `next_index(k)` must return a value in `[0, k)`; callers never pass `k == 0`.
pub trait RandomSampler {
    fn next_index(&mut self, upper: usize) -> usize;
}

impl<F> RandomSampler for F
where
    F: FnMut(usize) -> usize,
{
    fn next_index(&mut self, upper: usize) -> usize {
        self(upper)
    }
}

/// Uniform draws from any `rand` generator.
#[derive(Debug, Clone)]
pub struct UniformSampler<R = StdRng> {
    rng: R,
}

impl UniformSampler<StdRng> {
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    /// Reproducible stream for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> UniformSampler<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> RandomSampler for UniformSampler<R> {
    fn next_index(&mut self, upper: usize) -> usize {
        self.rng.gen_range(0..upper)
    }
}

/// Replays a fixed list of indices, cycling when it runs out.
///
/// Indices are reduced modulo the requested bound so the contract holds for
/// any sample set size.
#[derive(Debug, Clone)]
pub struct SequenceSampler {
    indices: Vec<usize>,
    cursor: usize,
}

impl SequenceSampler {
    pub fn new(indices: impl Into<Vec<usize>>) -> Self {
        Self {
            indices: indices.into(),
            cursor: 0,
        }
    }

    /// Number of indices handed out so far.
    pub fn drawn(&self) -> usize {
        self.cursor
    }
}

impl RandomSampler for SequenceSampler {
    fn next_index(&mut self, upper: usize) -> usize {
        if self.indices.is_empty() {
            return 0;
        }
        let index = self.indices[self.cursor % self.indices.len()];
        self.cursor += 1;
        index % upper
    }
}
