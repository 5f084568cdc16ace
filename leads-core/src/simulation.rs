//! Monthly lead volume simulation.
//!
//! Stands in for a lead-forecasting service: each keyword submission draws a
//! monthly lead count uniformly from [`MIN_MONTHLY_LEADS`]`..=`[`MAX_MONTHLY_LEADS`].
//! The random source is injectable so runs can be made reproducible.

use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};
use tracing::debug;

pub const MIN_MONTHLY_LEADS: u32 = 100;
pub const MAX_MONTHLY_LEADS: u32 = 3000;

/// Source of simulated monthly lead volumes.
pub trait LeadVolumeSource {
    /// Returns the lead volume for one keyword submission.
    fn simulate(&mut self) -> u32;
}

impl<S: LeadVolumeSource + ?Sized> LeadVolumeSource for Box<S> {
    fn simulate(&mut self) -> u32 {
        (**self).simulate()
    }
}

/// Uniform random lead volume backed by any [`Rng`].
///
/// # Example
///
/// ```
/// use leads_core::{LeadVolumeSource, RandomLeadVolume};
///
/// let mut first = RandomLeadVolume::seeded(7);
/// let mut second = RandomLeadVolume::seeded(7);
///
/// let volume = first.simulate();
/// assert!((100..=3000).contains(&volume));
/// assert_eq!(volume, second.simulate());
/// ```
#[derive(Debug)]
pub struct RandomLeadVolume<R = ThreadRng> {
    rng: R,
}

impl RandomLeadVolume<ThreadRng> {
    /// Unseeded source; every draw is independent across runs.
    pub fn new() -> Self {
        Self { rng: rand::rng() }
    }
}

impl Default for RandomLeadVolume<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomLeadVolume<StdRng> {
    /// Deterministic source for reproducible sessions.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> LeadVolumeSource for RandomLeadVolume<R> {
    fn simulate(&mut self) -> u32 {
        let volume = self
            .rng
            .random_range(MIN_MONTHLY_LEADS..=MAX_MONTHLY_LEADS);
        debug!(volume, "simulated monthly lead volume");
        volume
    }
}

/// Returns the same lead volume on every draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedLeadVolume(pub u32);

impl LeadVolumeSource for FixedLeadVolume {
    fn simulate(&mut self) -> u32 {
        self.0
    }
}
