//! The shared evaluation of a property configuration.

use super::config::{ObjectiveKind, ProblemConfig};
use super::features::FeatureVector;
use super::predict::{predict, Prediction, PriceModel};
use crate::error::Result;

/// Outcome of evaluating one configuration under one [`ProblemConfig`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Evaluation {
    /// The evaluated configuration, unrounded.
    pub features: FeatureVector,
    /// The single rent/sale prediction all objectives derive from.
    pub prediction: Prediction,
    /// Reported objective values, in `config.objectives` order.
    pub objectives: Vec<f64>,
    /// `[bed_bath_ratio, space_constraint]`; feasible iff both are `>= 0`.
    pub constraints: [f64; ProblemConfig::NUM_CONSTRAINTS],
    /// Set when the ratio is an objective but rent is not positive.
    pub ratio_undefined: bool,
    /// Set when either model returned a non-finite value.
    pub prediction_undefined: bool,
}

impl Evaluation {
    /// `3·round(baths) − round(beds)`.
    pub fn bed_bath_ratio(&self) -> f64 {
        self.constraints[0]
    }

    /// Floor area left after the per-room requirement.
    pub fn space_constraint(&self) -> f64 {
        self.constraints[1]
    }

    /// Returns `true` if some objective had to take a sentinel value.
    pub fn is_undefined(&self) -> bool {
        self.ratio_undefined || self.prediction_undefined
    }

    /// Both residuals non-negative and every objective defined.
    pub fn is_feasible(&self) -> bool {
        !self.is_undefined() && self.constraints.iter().all(|&c| c >= 0.0)
    }

    /// Objective values in the minimized form the solver consumes.
    pub fn minimized(&self, config: &ProblemConfig) -> Vec<f64> {
        config
            .objectives
            .iter()
            .zip(&self.objectives)
            .map(|(kind, &v)| kind.to_minimized(v))
            .collect()
    }
}

/// `3·round(baths) − round(beds)`.
pub fn bed_bath_ratio(features: &FeatureVector) -> f64 {
    3.0 * features.rounded_baths() - features.rounded_beds()
}

/// `size − (area_per_bed·round(beds) + area_per_bath·round(baths) + base_offset)`.
pub fn space_constraint(config: &ProblemConfig, features: &FeatureVector) -> f64 {
    features.size - config.space.required_area(features)
}

/// Evaluates one configuration.
///
/// Calls each model exactly once, regardless of how many objectives the
/// configuration reports. Bounds are not re-checked. Objective values are
/// always finite; non-finite predictions are replaced by sentinels and
/// flagged.
///
/// # Example
///
/// ```
/// use u_realty::problem::{evaluate, FeatureVector, ProblemConfig};
///
/// let rent = |b: &[[f64; 5]]| -> Vec<f64> { vec![1500.0; b.len()] };
/// let sale = |b: &[[f64; 5]]| -> Vec<f64> { vec![300000.0; b.len()] };
/// let fv = FeatureVector::new(1200.0, 3.0, 2.0, 50000.0, 2000.0);
///
/// let e = evaluate(&ProblemConfig::rent_sale(), &fv, &rent, &sale).unwrap();
/// assert_eq!(e.objectives, vec![-1500.0, 300000.0]);
/// assert_eq!(e.constraints, [3.0, 350.0]);
/// assert!(e.is_feasible());
/// ```
pub fn evaluate<R, S>(
    config: &ProblemConfig,
    features: &FeatureVector,
    rent_model: &R,
    sale_model: &S,
) -> Result<Evaluation>
where
    R: PriceModel + ?Sized,
    S: PriceModel + ?Sized,
{
    let prediction = predict(features, rent_model, sale_model)?;

    let objectives = config
        .objectives
        .iter()
        .map(|kind| kind.value(&prediction))
        .collect();
    let ratio_undefined =
        config.objectives.contains(&ObjectiveKind::SaleToRent) && prediction.ratio().is_none();
    let prediction_undefined = !prediction.is_finite();

    Ok(Evaluation {
        features: *features,
        prediction,
        objectives,
        constraints: [bed_bath_ratio(features), space_constraint(config, features)],
        ratio_undefined,
        prediction_undefined,
    })
}
