//! Variation operators for bounded real-valued chromosomes.
//!
//! # Crossover
//!
//! - [`sbx_crossover`]: Simulated Binary Crossover with bound-aware spread
//!
//! # Mutation
//!
//! - [`polynomial_mutation`]: bounded polynomial mutation
//!
//! Both keep every gene inside its [`Bounds`], so problems never see
//! out-of-range decision variables.
//!
//! # References
//!
//! - Deb & Agrawal (1995), "Simulated Binary Crossover for Continuous Search Space"
//! - Deb & Goyal (1996), "A Combined Genetic Adaptive Search (GeneAS) for
//!   Engineering Design"

use super::types::Bounds;
use rand::Rng;

/// Genes closer than this are treated as identical by SBX.
const SBX_EPSILON: f64 = 1e-14;

/// Simulated Binary Crossover (SBX) for bounded real genes.
///
/// Each gene pair is recombined with probability 0.5; the two resulting
/// values are assigned to the children in random order. Larger `eta`
/// produces children closer to their parents.
///
/// # Panics
/// Panics if the parents and bounds have different lengths.
pub fn sbx_crossover<R: Rng>(
    parent1: &[f64],
    parent2: &[f64],
    bounds: &[Bounds],
    eta: f64,
    rng: &mut R,
) -> (Vec<f64>, Vec<f64>) {
    assert_eq!(parent1.len(), parent2.len(), "parents must have equal length");
    assert_eq!(parent1.len(), bounds.len(), "one bound per gene");

    let mut child1 = parent1.to_vec();
    let mut child2 = parent2.to_vec();

    for (i, b) in bounds.iter().enumerate() {
        if rng.random_range(0.0..1.0) >= 0.5 {
            continue;
        }
        let (x1, x2) = (parent1[i], parent2[i]);
        if (x1 - x2).abs() < SBX_EPSILON || b.width() <= 0.0 {
            continue;
        }

        let (y1, y2) = sbx_pair(x1.min(x2), x1.max(x2), b, eta, rng);
        if rng.random_range(0.0..1.0) < 0.5 {
            child1[i] = y2;
            child2[i] = y1;
        } else {
            child1[i] = y1;
            child2[i] = y2;
        }
    }

    (child1, child2)
}

/// Recombines one ordered gene pair `y1 < y2` within `b`.
fn sbx_pair<R: Rng>(y1: f64, y2: f64, b: &Bounds, eta: f64, rng: &mut R) -> (f64, f64) {
    let dy = y2 - y1;
    let exponent = 1.0 / (eta + 1.0);
    let u: f64 = rng.random_range(0.0..1.0);

    let spread = |beta: f64| {
        let alpha = 2.0 - beta.powf(-(eta + 1.0));
        if u <= 1.0 / alpha {
            (u * alpha).powf(exponent)
        } else {
            (1.0 / (2.0 - u * alpha)).powf(exponent)
        }
    };

    let beta_low = 1.0 + 2.0 * (y1 - b.lower) / dy;
    let c1 = 0.5 * ((y1 + y2) - spread(beta_low) * dy);

    let beta_high = 1.0 + 2.0 * (b.upper - y2) / dy;
    let c2 = 0.5 * ((y1 + y2) + spread(beta_high) * dy);

    (b.clamp(c1), b.clamp(c2))
}

/// Bounded polynomial mutation.
///
/// Each gene mutates independently with probability `rate`. The
/// perturbation is scaled by the bound width and shaped by `eta`
/// (larger = smaller steps).
///
/// # Panics
/// Panics if `genes` and `bounds` have different lengths.
pub fn polynomial_mutation<R: Rng>(
    genes: &mut [f64],
    bounds: &[Bounds],
    eta: f64,
    rate: f64,
    rng: &mut R,
) {
    assert_eq!(genes.len(), bounds.len(), "one bound per gene");
    let exponent = 1.0 / (eta + 1.0);

    for (x, b) in genes.iter_mut().zip(bounds) {
        if rng.random_range(0.0..1.0) >= rate {
            continue;
        }
        let width = b.width();
        if width <= 0.0 {
            continue;
        }

        let delta1 = (*x - b.lower) / width;
        let delta2 = (b.upper - *x) / width;
        let u: f64 = rng.random_range(0.0..1.0);

        let deltaq = if u < 0.5 {
            let xy = 1.0 - delta1;
            let val = 2.0 * u + (1.0 - 2.0 * u) * xy.powf(eta + 1.0);
            val.powf(exponent) - 1.0
        } else {
            let xy = 1.0 - delta2;
            let val = 2.0 * (1.0 - u) + 2.0 * (u - 0.5) * xy.powf(eta + 1.0);
            1.0 - val.powf(exponent)
        };

        *x = b.clamp(*x + deltaq * width);
    }
}
