//! NSGA-II configuration.
//!
//! [`Nsga2Config`] holds all parameters that control the evolutionary loop.

use super::selection::Selection;
use crate::error::{Error, Result};

/// Configuration for the NSGA-II runner.
///
/// # Defaults
///
/// ```
/// use u_realty::nsga2::Nsga2Config;
///
/// let config = Nsga2Config::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.max_generations, 100);
/// assert_eq!(config.max_evaluations, Some(10_000));
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_realty::nsga2::{Nsga2Config, Selection};
///
/// let config = Nsga2Config::default()
///     .with_population_size(200)
///     .with_selection(Selection::CrowdedTournament(3))
///     .with_mutation_eta(30.0)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Nsga2Config {
    /// Number of individuals kept between generations.
    pub population_size: usize,

    /// Maximum number of generations after the initial population.
    pub max_generations: usize,

    /// Optional budget on total evaluations, initial population included.
    ///
    /// The run stops as soon as the budget is spent; the last generation
    /// may produce fewer offspring than `population_size`.
    pub max_evaluations: Option<usize>,

    /// Parent selection strategy.
    pub selection: Selection,

    /// Probability of applying SBX to a pair of parents (0.0–1.0).
    pub crossover_rate: f64,

    /// SBX distribution index. Larger values keep children near parents.
    pub crossover_eta: f64,

    /// Per-gene mutation probability. `None` means `1 / n_variables`.
    pub mutation_rate: Option<f64>,

    /// Polynomial mutation distribution index.
    pub mutation_eta: f64,

    /// Whether to evaluate offspring in parallel using rayon.
    ///
    /// Has no effect without the `parallel` cargo feature.
    pub parallel: bool,

    /// Random seed for reproducibility. `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for Nsga2Config {
    fn default() -> Self {
        Self {
            population_size: 100,
            max_generations: 100,
            max_evaluations: Some(10_000),
            selection: Selection::default(),
            crossover_rate: 1.0,
            crossover_eta: 15.0,
            mutation_rate: None,
            mutation_eta: 20.0,
            parallel: false,
            seed: None,
        }
    }
}

impl Nsga2Config {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the maximum number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the evaluation budget.
    pub fn with_max_evaluations(mut self, n: usize) -> Self {
        self.max_evaluations = Some(n);
        self
    }

    /// Removes the evaluation budget; only `max_generations` stops the run.
    pub fn without_evaluation_budget(mut self) -> Self {
        self.max_evaluations = None;
        self
    }

    /// Sets the selection strategy.
    pub fn with_selection(mut self, sel: Selection) -> Self {
        self.selection = sel;
        self
    }

    /// Sets the crossover rate.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the SBX distribution index.
    pub fn with_crossover_eta(mut self, eta: f64) -> Self {
        self.crossover_eta = eta;
        self
    }

    /// Sets a fixed per-gene mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = Some(rate.clamp(0.0, 1.0));
        self
    }

    /// Sets the polynomial mutation distribution index.
    pub fn with_mutation_eta(mut self, eta: f64) -> Self {
        self.mutation_eta = eta;
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Per-gene mutation rate for a problem with `n_variables` genes.
    pub fn effective_mutation_rate(&self, n_variables: usize) -> f64 {
        self.mutation_rate
            .unwrap_or_else(|| 1.0 / n_variables.max(1) as f64)
    }

    /// Preset for quick exploration: 50 individuals, 40 generations.
    pub fn fast() -> Self {
        Self {
            population_size: 50,
            max_generations: 40,
            max_evaluations: Some(2_000),
            ..Self::default()
        }
    }

    /// Preset matching a 10 000-evaluation budget with 100 individuals.
    pub fn balanced() -> Self {
        Self::default()
    }

    /// Preset for a dense frontier: 200 individuals, 250 generations.
    pub fn quality() -> Self {
        Self {
            population_size: 200,
            max_generations: 250,
            max_evaluations: Some(50_000),
            ..Self::default()
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.population_size < 2 {
            return Err(invalid("population_size must be at least 2"));
        }
        if self.max_generations == 0 {
            return Err(invalid("max_generations must be at least 1"));
        }
        if let Some(budget) = self.max_evaluations {
            if budget < self.population_size {
                return Err(invalid(
                    "max_evaluations must cover at least the initial population",
                ));
            }
        }
        if let Selection::CrowdedTournament(0) = self.selection {
            return Err(invalid("tournament size must be at least 1"));
        }
        if !(self.crossover_eta.is_finite() && self.crossover_eta >= 0.0) {
            return Err(invalid("crossover_eta must be finite and non-negative"));
        }
        if !(self.mutation_eta.is_finite() && self.mutation_eta >= 0.0) {
            return Err(invalid("mutation_eta must be finite and non-negative"));
        }
        Ok(())
    }
}

fn invalid(msg: &str) -> Error {
    Error::InvalidConfig(msg.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Nsga2Config::default();
        assert_eq!(config.population_size, 100);
        assert_eq!(config.max_generations, 100);
        assert_eq!(config.max_evaluations, Some(10_000));
        assert_eq!(config.selection, Selection::CrowdedTournament(2));
        assert!((config.crossover_rate - 1.0).abs() < 1e-10);
        assert!((config.crossover_eta - 15.0).abs() < 1e-10);
        assert!(config.mutation_rate.is_none());
        assert!((config.mutation_eta - 20.0).abs() < 1e-10);
        assert!(!config.parallel);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_builder_pattern() {
        let config = Nsga2Config::default()
            .with_population_size(40)
            .with_max_generations(20)
            .with_max_evaluations(500)
            .with_selection(Selection::Random)
            .with_crossover_rate(0.8)
            .with_crossover_eta(10.0)
            .with_mutation_rate(0.3)
            .with_mutation_eta(5.0)
            .with_parallel(true)
            .with_seed(42);

        assert_eq!(config.population_size, 40);
        assert_eq!(config.max_generations, 20);
        assert_eq!(config.max_evaluations, Some(500));
        assert_eq!(config.selection, Selection::Random);
        assert!((config.crossover_rate - 0.8).abs() < 1e-10);
        assert_eq!(config.mutation_rate, Some(0.3));
        assert!(config.parallel);
        assert_eq!(config.seed, Some(42));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_effective_mutation_rate() {
        let config = Nsga2Config::default();
        assert!((config.effective_mutation_rate(5) - 0.2).abs() < 1e-12);
        let fixed = config.with_mutation_rate(0.5);
        assert!((fixed.effective_mutation_rate(5) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_clamp_rates() {
        let config = Nsga2Config::default()
            .with_crossover_rate(1.5)
            .with_mutation_rate(-0.5);
        assert!((config.crossover_rate - 1.0).abs() < 1e-10);
        assert_eq!(config.mutation_rate, Some(0.0));
    }

    #[test]
    fn test_validate_rejects() {
        assert!(Nsga2Config::default().with_population_size(1).validate().is_err());
        assert!(Nsga2Config::default().with_max_generations(0).validate().is_err());
        assert!(Nsga2Config::default()
            .with_population_size(100)
            .with_max_evaluations(99)
            .validate()
            .is_err());
        assert!(Nsga2Config::default()
            .with_selection(Selection::CrowdedTournament(0))
            .validate()
            .is_err());
        assert!(Nsga2Config::default()
            .with_mutation_eta(f64::NAN)
            .validate()
            .is_err());
    }

    #[test]
    fn test_without_budget() {
        let config = Nsga2Config::default().without_evaluation_budget();
        assert!(config.max_evaluations.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_presets_validate() {
        for config in [Nsga2Config::fast(), Nsga2Config::balanced(), Nsga2Config::quality()] {
            assert!(config.validate().is_ok(), "{config:?}");
        }
        assert_eq!(Nsga2Config::fast().population_size, 50);
        assert_eq!(Nsga2Config::quality().population_size, 200);
    }
}
