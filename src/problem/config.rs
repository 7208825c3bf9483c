//! Problem variant configuration.
//!
//! The three problem variants differ only in which objectives they report and
//! in the floor-area constants of the space constraint. [`ProblemConfig`]
//! captures exactly that; the evaluation itself is shared.

use super::features::FeatureVector;
use super::predict::Prediction;
use crate::error::{Error, Result};

/// Ratio objective value reported when the sale-to-rent ratio is undefined
/// (rent `<= 0` or a non-finite quotient). Such evaluations are infeasible.
pub const UNDEFINED_RATIO: f64 = 0.0;

/// Rent or sale objective value reported when the model returned a
/// non-finite prediction. Such evaluations are infeasible.
pub const UNDEFINED_PREDICTION: f64 = 0.0;

fn finite_or_undefined(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        UNDEFINED_PREDICTION
    }
}

/// Optimization direction of a reported objective value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    /// Smaller is better.
    Minimize,
    /// Larger is better.
    Maximize,
}

/// One entry of a variant's objective vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ObjectiveKind {
    /// Negated rent. Minimizing it maximizes rent.
    NegRent,
    /// Sale price, maximized.
    Sale,
    /// Sale price divided by rent, maximized.
    SaleToRent,
}

impl ObjectiveKind {
    /// Reported value for a prediction. Always finite.
    pub fn value(self, prediction: &Prediction) -> f64 {
        match self {
            ObjectiveKind::NegRent => -finite_or_undefined(prediction.rent),
            ObjectiveKind::Sale => finite_or_undefined(prediction.sale),
            ObjectiveKind::SaleToRent => prediction.ratio().unwrap_or(UNDEFINED_RATIO),
        }
    }

    /// Direction in which the reported value improves.
    pub fn direction(self) -> Direction {
        match self {
            ObjectiveKind::NegRent => Direction::Minimize,
            ObjectiveKind::Sale | ObjectiveKind::SaleToRent => Direction::Maximize,
        }
    }

    /// Converts a reported value into the minimized form the solver uses.
    pub fn to_minimized(self, value: f64) -> f64 {
        match self.direction() {
            Direction::Minimize => value,
            Direction::Maximize => -value,
        }
    }

    /// Frontier column backing this objective.
    pub fn column(self) -> &'static str {
        match self {
            ObjectiveKind::NegRent => "rental",
            ObjectiveKind::Sale => "sale",
            ObjectiveKind::SaleToRent => "ratio",
        }
    }
}

/// Floor area demanded per room, used by the space constraint.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpaceCoefficients {
    /// Square feet required per (rounded) bedroom.
    pub area_per_bed: f64,
    /// Square feet required per (rounded) bathroom.
    pub area_per_bath: f64,
    /// Fixed square feet added on top.
    pub base_offset: f64,
}

impl SpaceCoefficients {
    /// Creates a coefficient set.
    pub const fn new(area_per_bed: f64, area_per_bath: f64, base_offset: f64) -> Self {
        Self {
            area_per_bed,
            area_per_bath,
            base_offset,
        }
    }

    /// Floor area required by the rounded room counts of `features`.
    pub fn required_area(&self, features: &FeatureVector) -> f64 {
        self.area_per_bed * features.rounded_beds()
            + self.area_per_bath * features.rounded_baths()
            + self.base_offset
    }
}

/// The three problem variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Variant {
    /// Maximize rent and sale price.
    RentSale,
    /// Maximize the sale-to-rent ratio alone.
    SaleToRent,
    /// Maximize rent, sale price and their ratio.
    Combined,
}

impl Variant {
    /// All variants.
    pub const ALL: [Variant; 3] = [Variant::RentSale, Variant::SaleToRent, Variant::Combined];

    /// Configuration of this variant.
    pub fn config(self) -> ProblemConfig {
        match self {
            Variant::RentSale => ProblemConfig::rent_sale(),
            Variant::SaleToRent => ProblemConfig::sale_to_rent(),
            Variant::Combined => ProblemConfig::combined(),
        }
    }
}

/// Objectives and space-constraint constants of one problem.
///
/// # Example
///
/// ```
/// use u_realty::problem::{ObjectiveKind, ProblemConfig};
///
/// let config = ProblemConfig::rent_sale();
/// assert_eq!(config.objectives, vec![ObjectiveKind::NegRent, ObjectiveKind::Sale]);
/// assert_eq!(config.space.base_offset, 200.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProblemConfig {
    /// Human-readable name, used in logs.
    pub name: String,
    /// Reported objectives, in order.
    pub objectives: Vec<ObjectiveKind>,
    /// Space-constraint constants.
    pub space: SpaceCoefficients,
}

impl ProblemConfig {
    /// Maximum number of objectives a configuration may report.
    pub const MAX_OBJECTIVES: usize = 3;

    /// Number of constraint residuals every configuration reports.
    pub const NUM_CONSTRAINTS: usize = 2;

    /// Rent vs. sale price: `[-rent, sale]`, coefficients `(150, 50, 200)`.
    pub fn rent_sale() -> Self {
        Self {
            name: "rent-sale".into(),
            objectives: vec![ObjectiveKind::NegRent, ObjectiveKind::Sale],
            space: SpaceCoefficients::new(150.0, 50.0, 200.0),
        }
    }

    /// Sale-to-rent ratio: `[sale / rent]`, coefficients `(100, 50, 0)`.
    pub fn sale_to_rent() -> Self {
        Self {
            name: "sale-to-rent".into(),
            objectives: vec![ObjectiveKind::SaleToRent],
            space: SpaceCoefficients::new(100.0, 50.0, 0.0),
        }
    }

    /// All three: `[-rent, sale, sale / rent]`, coefficients `(100, 50, 0)`.
    pub fn combined() -> Self {
        Self {
            name: "combined".into(),
            objectives: vec![
                ObjectiveKind::NegRent,
                ObjectiveKind::Sale,
                ObjectiveKind::SaleToRent,
            ],
            space: SpaceCoefficients::new(100.0, 50.0, 0.0),
        }
    }

    /// Sets the space-constraint constants.
    pub fn with_space(mut self, space: SpaceCoefficients) -> Self {
        self.space = space;
        self
    }

    /// Sets the objective list.
    pub fn with_objectives(mut self, objectives: Vec<ObjectiveKind>) -> Self {
        self.objectives = objectives;
        self
    }

    /// Returns `true` if the sale-to-rent ratio is one of the objectives.
    pub fn uses_ratio(&self) -> bool {
        self.objectives.contains(&ObjectiveKind::SaleToRent)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.objectives.is_empty() || self.objectives.len() > Self::MAX_OBJECTIVES {
            return Err(Error::InvalidConfig(format!(
                "{}: expected 1 to {} objectives, got {}",
                self.name,
                Self::MAX_OBJECTIVES,
                self.objectives.len()
            )));
        }
        for (i, kind) in self.objectives.iter().enumerate() {
            if self.objectives[..i].contains(kind) {
                return Err(Error::InvalidConfig(format!(
                    "{}: objective {kind:?} listed twice",
                    self.name
                )));
            }
        }
        let s = &self.space;
        if ![s.area_per_bed, s.area_per_bath, s.base_offset]
            .iter()
            .all(|c| c.is_finite())
        {
            return Err(Error::InvalidConfig(format!(
                "{}: space coefficients must be finite",
                self.name
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        let rs = ProblemConfig::rent_sale();
        assert_eq!(rs.space, SpaceCoefficients::new(150.0, 50.0, 200.0));
        assert!(!rs.uses_ratio());

        let tbe = ProblemConfig::sale_to_rent();
        assert_eq!(tbe.objectives, vec![ObjectiveKind::SaleToRent]);
        assert_eq!(tbe.space, SpaceCoefficients::new(100.0, 50.0, 0.0));

        let all = ProblemConfig::combined();
        assert_eq!(all.objectives.len(), 3);
        assert_eq!(all.space, tbe.space);

        for v in Variant::ALL {
            assert!(v.config().validate().is_ok());
        }
    }

    #[test]
    fn test_objective_values_and_directions() {
        let p = Prediction {
            rent: 1500.0,
            sale: 300000.0,
        };
        assert_eq!(ObjectiveKind::NegRent.value(&p), -1500.0);
        assert_eq!(ObjectiveKind::Sale.value(&p), 300000.0);
        assert_eq!(ObjectiveKind::SaleToRent.value(&p), 200.0);

        // The solver minimizes: all three quantities end up maximized.
        assert_eq!(ObjectiveKind::NegRent.to_minimized(-1500.0), -1500.0);
        assert_eq!(ObjectiveKind::Sale.to_minimized(300000.0), -300000.0);
        assert_eq!(ObjectiveKind::SaleToRent.to_minimized(200.0), -200.0);
    }

    #[test]
    fn test_undefined_ratio_value() {
        let p = Prediction {
            rent: 0.0,
            sale: 300000.0,
        };
        assert_eq!(ObjectiveKind::SaleToRent.value(&p), UNDEFINED_RATIO);
    }

    #[test]
    fn test_non_finite_prediction_values() {
        let nan_rent = Prediction {
            rent: f64::NAN,
            sale: 300000.0,
        };
        assert_eq!(ObjectiveKind::NegRent.value(&nan_rent), -UNDEFINED_PREDICTION);
        assert_eq!(ObjectiveKind::Sale.value(&nan_rent), 300000.0);
        assert_eq!(ObjectiveKind::SaleToRent.value(&nan_rent), UNDEFINED_RATIO);

        let inf_sale = Prediction {
            rent: 1500.0,
            sale: f64::INFINITY,
        };
        assert_eq!(ObjectiveKind::Sale.value(&inf_sale), UNDEFINED_PREDICTION);
        assert_eq!(ObjectiveKind::SaleToRent.value(&inf_sale), UNDEFINED_RATIO);
    }

    #[test]
    fn test_required_area_uses_rounded_counts() {
        let space = SpaceCoefficients::new(150.0, 50.0, 200.0);
        let fv = FeatureVector::new(1200.0, 2.6, 2.4, 50000.0, 2000.0);
        assert_eq!(space.required_area(&fv), 150.0 * 3.0 + 50.0 * 2.0 + 200.0);
    }

    #[test]
    fn test_validate_rejects() {
        let empty = ProblemConfig::rent_sale().with_objectives(vec![]);
        assert!(matches!(empty.validate(), Err(Error::InvalidConfig(_))));

        let dup = ProblemConfig::rent_sale()
            .with_objectives(vec![ObjectiveKind::Sale, ObjectiveKind::Sale]);
        assert!(dup.validate().is_err());

        let too_many = ProblemConfig::combined().with_objectives(vec![
            ObjectiveKind::NegRent,
            ObjectiveKind::Sale,
            ObjectiveKind::SaleToRent,
            ObjectiveKind::NegRent,
        ]);
        assert!(too_many.validate().is_err());

        let nan = ProblemConfig::combined()
            .with_space(SpaceCoefficients::new(f64::NAN, 50.0, 0.0));
        assert!(nan.validate().is_err());
    }
}
