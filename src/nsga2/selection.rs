//! Parent selection for NSGA-II.
//!
//! # References
//!
//! - Deb et al. (2002), crowded-comparison operator `≺n`

use super::types::Solution;
use rand::Rng;
use std::cmp::Ordering;

/// Selection strategy for choosing parents.
///
/// Requires `rank` and `crowding` to be assigned on the population.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Selection {
    /// Pick `k` individuals at random, keep the best under the crowded
    /// comparison (lower rank, then larger crowding distance).
    ///
    /// `k = 2` is the classic NSGA-II binary tournament.
    CrowdedTournament(usize),

    /// Uniform random choice, no selection pressure.
    Random,
}

impl Default for Selection {
    fn default() -> Self {
        Selection::CrowdedTournament(2)
    }
}

impl Selection {
    /// Select a parent index from the population.
    ///
    /// # Panics
    /// Panics if `population` is empty.
    pub fn select<R: Rng>(&self, population: &[Solution], rng: &mut R) -> usize {
        assert!(
            !population.is_empty(),
            "cannot select from empty population"
        );

        match self {
            Selection::CrowdedTournament(k) => tournament(population, *k, rng),
            Selection::Random => rng.random_range(0..population.len()),
        }
    }
}

/// Crowded comparison: `Less` means `a` is preferred over `b`.
pub(crate) fn crowded_cmp(a: &Solution, b: &Solution) -> Ordering {
    a.rank
        .cmp(&b.rank)
        .then_with(|| b.crowding.total_cmp(&a.crowding))
}

fn tournament<R: Rng>(population: &[Solution], k: usize, rng: &mut R) -> usize {
    let k = k.max(1);
    let n = population.len();

    let mut best_idx = rng.random_range(0..n);
    for _ in 1..k {
        let idx = rng.random_range(0..n);
        if crowded_cmp(&population[idx], &population[best_idx]) == Ordering::Less {
            best_idx = idx;
        }
    }
    best_idx
}
