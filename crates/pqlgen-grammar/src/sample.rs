//! Weighted and uniform sampling primitives.
//!
//! Every grammar decision goes through these helpers so that a single
//! caller-owned RNG drives the whole run.

use rand::distributions::{Distribution, WeightedIndex};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{GenError, Result};

/// Pick one option by weight. Options with weight 0 are never chosen.
///
/// Weights are summed as `u64`, so any mix of `u32` weights is accepted.
pub fn pick_weighted<T: Copy, R: Rng + ?Sized>(
    rng: &mut R,
    group: &'static str,
    options: &[(T, u32)],
) -> Result<T> {
    let dist = WeightedIndex::new(options.iter().map(|(_, weight)| u64::from(*weight)))
        .map_err(|_| GenError::ZeroWeights { group })?;
    Ok(options[dist.sample(rng)].0)
}

/// Pick one element uniformly.
pub fn pick_uniform<'a, T, R: Rng + ?Sized>(
    rng: &mut R,
    what: &'static str,
    items: &'a [T],
) -> Result<&'a T> {
    items.choose(rng).ok_or(GenError::EmptyCandidates { what })
}

/// Zero the weight of every option whose `available` flag is false.
pub fn mask<T: Copy>(options: &[(T, u32)], available: impl Fn(T) -> bool) -> Vec<(T, u32)> {
    options
        .iter()
        .map(|&(option, weight)| (option, if available(option) { weight } else { 0 }))
        .collect()
}
