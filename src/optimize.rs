//! One-call entry point: variant + models + solver settings → frontier.

use crate::error::Result;
use crate::frontier::FrontierTable;
use crate::nsga2::{Nsga2Config, Nsga2Runner};
use crate::problem::{PriceModel, ProblemConfig, RealtyProblem};

/// Searches for the non-dominated configurations of one problem variant.
///
/// Binds `config` to the two models, runs NSGA-II with `solver` and returns
/// the first front of the final population as a table. When any feasible
/// configuration was found, every row is feasible.
///
/// # Errors
///
/// - [`Error::InvalidConfig`](crate::Error::InvalidConfig) if either
///   configuration is invalid
/// - any model failure, unchanged; the run is aborted
pub fn optimize<R, S>(
    config: &ProblemConfig,
    rent_model: R,
    sale_model: S,
    solver: &Nsga2Config,
) -> Result<FrontierTable>
where
    R: PriceModel,
    S: PriceModel,
{
    solver.validate()?;
    let problem = RealtyProblem::new(config.clone(), rent_model, sale_model)?;

    trace_info!(problem = %config.name, seed = ?solver.seed, "optimizing");

    let result = Nsga2Runner::run(&problem, solver)?;
    let table = FrontierTable::from_solutions(&result.front)?;

    trace_info!(
        problem = %config.name,
        generations = result.generations,
        evaluations = result.evaluations,
        rows = table.len(),
        feasible = table.feasible_only().len(),
        "frontier ready"
    );

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::problem::{ModelRow, Variant, DECISION_BOUNDS};

    fn rent(batch: &[ModelRow]) -> Vec<f64> {
        batch.iter().map(|x| 0.9 * x[0] + 0.01 * x[3] - 0.001 * x[4]).collect()
    }

    fn sale(batch: &[ModelRow]) -> Vec<f64> {
        batch.iter().map(|x| 120.0 * x[0] + 1.5 * x[3] + 5000.0 * x[2]).collect()
    }

    fn solver() -> Nsga2Config {
        Nsga2Config::fast()
            .with_population_size(30)
            .with_max_generations(25)
            .with_seed(17)
    }

    #[test]
    fn test_every_variant_yields_feasible_front() {
        for variant in Variant::ALL {
            let table = optimize(&variant.config(), rent, sale, &solver()).unwrap();
            assert!(!table.is_empty(), "{variant:?}");
            for row in &table.rows {
                assert!(row.feasible, "{variant:?}: {row:?}");
                assert!(row.beds <= 3.0 * row.baths);
                assert!(DECISION_BOUNDS[0].contains(row.sqfeet));
                assert!(DECISION_BOUNDS[3].contains(row.income));
                assert!(DECISION_BOUNDS[4].contains(row.density));
            }
        }
    }

    #[test]
    fn test_rows_are_model_consistent() {
        let table = optimize(&ProblemConfig::combined(), rent, sale, &solver()).unwrap();
        for row in &table.rows {
            let input = [row.sqfeet, row.beds, row.baths, row.income, row.density];
            assert_eq!(row.rental, rent(&[input])[0]);
            assert_eq!(row.sale, sale(&[input])[0]);
            assert_eq!(row.ratio, Some(row.sale / row.rental));
        }
    }

    #[test]
    fn test_deterministic_with_seed() {
        let a = optimize(&ProblemConfig::rent_sale(), rent, sale, &solver()).unwrap();
        let b = optimize(&ProblemConfig::rent_sale(), rent, sale, &solver()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_model_failure_aborts() {
        struct Broken;
        impl PriceModel for Broken {
            fn predict(
                &self,
                _batch: &[ModelRow],
            ) -> std::result::Result<Vec<f64>, crate::ModelError> {
                Err("model file missing".into())
            }
        }

        let err = optimize(&ProblemConfig::rent_sale(), Broken, sale, &solver()).unwrap_err();
        assert!(matches!(err, Error::Model { model: "rent", .. }));
    }

    #[test]
    fn test_invalid_solver_rejected() {
        let bad = solver().with_population_size(1);
        let err = optimize(&ProblemConfig::rent_sale(), rent, sale, &bad).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }
}
