//! The property-configuration problem.
//!
//! # Core Types
//!
//! - [`FeatureVector`]: five decision variables; bedroom and bathroom counts
//!   are rounded before use
//! - [`PriceModel`]: contract of the two external regressors
//! - [`ProblemConfig`]: objective selection and space-constraint constants;
//!   [`Variant`] names the three presets
//! - [`Evaluation`]: objectives and residuals of one configuration
//! - [`RealtyProblem`]: a configuration bound to two models, ready for
//!   [`Nsga2Runner`](crate::nsga2::Nsga2Runner)

mod config;
mod evaluate;
mod features;
mod predict;

pub use config::{
    Direction, ObjectiveKind, ProblemConfig, SpaceCoefficients, Variant, UNDEFINED_PREDICTION,
    UNDEFINED_RATIO,
};
pub use evaluate::{bed_bath_ratio, evaluate, space_constraint, Evaluation};
pub use features::{
    round_count, FeatureVector, ModelRow, DECISION_BOUNDS, FEATURE_COLUMNS, NUM_FEATURES,
};
pub use predict::{predict, Prediction, PriceModel};

use crate::error::Result;
use crate::nsga2::{Bounds, ConstraintMode, Evaluated, MultiObjectiveProblem};

/// Position of the predicted rent in [`Solution::aux`](crate::nsga2::Solution::aux).
pub const AUX_RENT: usize = 0;
/// Position of the predicted sale price in [`Solution::aux`](crate::nsga2::Solution::aux).
pub const AUX_SALE: usize = 1;

/// A [`ProblemConfig`] bound to a rent model and a sale model.
///
/// The models are owned by the problem and shared read-only across
/// evaluations; they must be `Send + Sync` so a generation can be evaluated
/// in parallel.
///
/// Objectives handed to the solver are in minimized form (rent, sale price
/// and ratio are all maximized). Residuals are read as `>= 0`. Evaluations
/// with a non-finite prediction or an undefined sale-to-rent ratio are
/// reported infeasible.
#[derive(Debug)]
pub struct RealtyProblem<R, S> {
    config: ProblemConfig,
    rent_model: R,
    sale_model: S,
}

impl<R: PriceModel, S: PriceModel> RealtyProblem<R, S> {
    /// Binds `config` to two models.
    pub fn new(config: ProblemConfig, rent_model: R, sale_model: S) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            rent_model,
            sale_model,
        })
    }

    /// The bound configuration.
    pub fn config(&self) -> &ProblemConfig {
        &self.config
    }

    /// Evaluates a feature vector with the bound models.
    pub fn evaluate_features(&self, features: &FeatureVector) -> Result<Evaluation> {
        evaluate(&self.config, features, &self.rent_model, &self.sale_model)
    }
}

impl<R: PriceModel, S: PriceModel> MultiObjectiveProblem for RealtyProblem<R, S> {
    fn bounds(&self) -> &[Bounds] {
        &DECISION_BOUNDS
    }

    fn num_objectives(&self) -> usize {
        self.config.objectives.len()
    }

    fn num_constraints(&self) -> usize {
        ProblemConfig::NUM_CONSTRAINTS
    }

    fn constraint_mode(&self) -> ConstraintMode {
        ConstraintMode::NonNegative
    }

    fn evaluate(&self, genes: &[f64]) -> Result<Evaluated> {
        let features = FeatureVector::from_genes(genes)?;
        let evaluation = self.evaluate_features(&features)?;

        let mut aux = vec![0.0; 2];
        aux[AUX_RENT] = evaluation.prediction.rent;
        aux[AUX_SALE] = evaluation.prediction.sale;

        let evaluated = Evaluated::new(
            evaluation.minimized(&self.config),
            evaluation.constraints.to_vec(),
        )
        .with_aux(aux);

        if evaluation.is_undefined() {
            trace_debug!(
                problem = %self.config.name,
                rent = evaluation.prediction.rent,
                sale = evaluation.prediction.sale,
                "undefined prediction or ratio; candidate marked infeasible"
            );
            return Ok(evaluated.infeasible());
        }
        Ok(evaluated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn fixed(value: f64) -> impl Fn(&[ModelRow]) -> Vec<f64> + Send + Sync {
        move |b: &[ModelRow]| vec![value; b.len()]
    }

    #[test]
    fn test_solver_view_rent_sale() {
        let problem =
            RealtyProblem::new(ProblemConfig::rent_sale(), fixed(1500.0), fixed(300000.0)).unwrap();

        assert_eq!(problem.bounds().len(), NUM_FEATURES);
        assert_eq!(problem.num_objectives(), 2);
        assert_eq!(problem.num_constraints(), 2);
        assert_eq!(problem.constraint_mode(), ConstraintMode::NonNegative);

        let e = problem.evaluate(&[1200.0, 3.0, 2.0, 50000.0, 2000.0]).unwrap();
        assert_eq!(e.objectives, vec![-1500.0, -300000.0]);
        assert_eq!(e.constraints, vec![3.0, 350.0]);
        assert_eq!(e.aux, vec![1500.0, 300000.0]);
        assert!(!e.forced_infeasible);
    }

    #[test]
    fn test_solver_view_sale_to_rent() {
        let problem =
            RealtyProblem::new(ProblemConfig::sale_to_rent(), fixed(1500.0), fixed(300000.0))
                .unwrap();
        assert_eq!(problem.num_objectives(), 1);
        let e = problem.evaluate(&[1200.0, 3.0, 2.0, 50000.0, 2000.0]).unwrap();
        assert_eq!(e.objectives, vec![-200.0]);
        assert_eq!(e.constraints, vec![3.0, 800.0]);
    }

    #[test]
    fn test_undefined_ratio_forced_infeasible() {
        let problem =
            RealtyProblem::new(ProblemConfig::combined(), fixed(0.0), fixed(300000.0)).unwrap();
        let e = problem.evaluate(&[1200.0, 3.0, 2.0, 50000.0, 2000.0]).unwrap();
        assert!(e.forced_infeasible);
        assert!(e.objectives.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_non_finite_prediction_forced_infeasible() {
        let problem =
            RealtyProblem::new(ProblemConfig::rent_sale(), fixed(f64::NAN), fixed(300000.0))
                .unwrap();
        let e = problem.evaluate(&[1200.0, 3.0, 2.0, 50000.0, 2000.0]).unwrap();
        assert!(e.forced_infeasible);
        assert!(e.objectives.iter().all(|v| v.is_finite()));

        let problem =
            RealtyProblem::new(ProblemConfig::rent_sale(), fixed(1500.0), fixed(f64::INFINITY))
                .unwrap();
        let e = problem.evaluate(&[1200.0, 3.0, 2.0, 50000.0, 2000.0]).unwrap();
        assert!(e.forced_infeasible);
        assert!(e.objectives.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_wrong_gene_length() {
        let problem =
            RealtyProblem::new(ProblemConfig::rent_sale(), fixed(1.0), fixed(1.0)).unwrap();
        let err = problem.evaluate(&[1.0, 2.0, 3.0]).unwrap_err();
        assert!(matches!(err, Error::GeneLength { expected: 5, got: 3 }));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = ProblemConfig::rent_sale().with_objectives(vec![]);
        assert!(RealtyProblem::new(config, fixed(1.0), fixed(1.0)).is_err());
    }
}
