//! Injectable standard-normal noise.
//!
//! RULE: The integrator never touches a platform RNG. Every random draw
//! comes from a NoiseSource owned by the run, so a run is reproducible
//! from its seed alone.
//!
//! Independent replicas get their own stream, seeded deterministically
//! from (master_seed XOR replica_index * golden-ratio constant). Adding a
//! replica never changes the streams of the existing ones.

use crate::types::Real;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use rand_pcg::Pcg64Mcg;

/// A source of i.i.d. Normal(0, 1) draws.
pub trait NoiseSource {
    fn standard_normal(&mut self) -> Real;
}

impl<N: NoiseSource + ?Sized> NoiseSource for &mut N {
    fn standard_normal(&mut self) -> Real {
        (**self).standard_normal()
    }
}

impl<N: NoiseSource + ?Sized> NoiseSource for Box<N> {
    fn standard_normal(&mut self) -> Real {
        (**self).standard_normal()
    }
}

/// PCG-backed Gaussian noise with an explicit seed.
pub struct SeededNoise {
    seed:  u64,
    inner: Pcg64Mcg,
}

impl SeededNoise {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            inner: Pcg64Mcg::seed_from_u64(seed),
        }
    }

    /// Stream for one replica of a multi-run batch. The index must stay
    /// stable for a replica to be reproducible.
    pub fn for_replica(master_seed: u64, replica: u64) -> Self {
        Self::new(derive_seed(master_seed, replica))
    }

    /// Non-reproducible default: seed from the wall clock. The seed is
    /// logged so the run can be repeated.
    pub fn from_entropy_seed() -> Self {
        use std::time::{SystemTime, UNIX_EPOCH};
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0);
        log::info!("no seed given; using seed {seed}");
        Self::new(seed)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl NoiseSource for SeededNoise {
    fn standard_normal(&mut self) -> Real {
        self.inner.sample(StandardNormal)
    }
}

pub fn derive_seed(master_seed: u64, replica: u64) -> u64 {
    master_seed ^ replica.wrapping_mul(0x9e37_79b9_7f4a_7c15)
}

/// Always draws 0. Turns a run into its deterministic drift.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroNoise;

impl NoiseSource for ZeroNoise {
    fn standard_normal(&mut self) -> Real {
        0.0
    }
}

/// Replays a fixed list of draws, wrapping around at the end.
#[derive(Debug, Clone)]
pub struct SequenceNoise {
    draws: Vec<Real>,
    next:  usize,
}

impl SequenceNoise {
    /// An empty list behaves like [`ZeroNoise`].
    pub fn new(draws: Vec<Real>) -> Self {
        Self { draws, next: 0 }
    }
}

impl NoiseSource for SequenceNoise {
    fn standard_normal(&mut self) -> Real {
        if self.draws.is_empty() {
            return 0.0;
        }
        let draw = self.draws[self.next];
        self.next = (self.next + 1) % self.draws.len();
        draw
    }
}
