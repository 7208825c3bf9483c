//! Core types shared by the NSGA-II engine and problem implementations.
//!
//! [`MultiObjectiveProblem`] is the contract between the generic engine and a
//! domain problem: bounded real decision variables, a fixed number of
//! objectives (all **minimized**), a fixed number of constraint residuals and
//! an `evaluate` method.

use super::runner::GenerationStats;
use crate::error::Result;
use rand::Rng;

/// Closed interval bounding one real decision variable.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    /// Inclusive lower bound.
    pub lower: f64,
    /// Inclusive upper bound.
    pub upper: f64,
}

impl Bounds {
    /// Creates a new interval. `lower` must not exceed `upper`.
    pub const fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    /// Width of the interval.
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    /// Returns `true` if `value` lies inside the interval.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }

    /// Clamps `value` into the interval.
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.lower, self.upper)
    }

    /// Draws a uniform sample from the interval.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> f64 {
        if self.width() <= 0.0 {
            return self.lower;
        }
        rng.random_range(self.lower..=self.upper)
    }
}

/// How constraint residuals are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConstraintMode {
    /// Feasible iff every residual is `>= 0`.
    #[default]
    NonNegative,
    /// Feasible iff every residual is `<= 0`.
    NonPositive,
}

impl ConstraintMode {
    /// Amount by which a single residual violates its constraint.
    ///
    /// Zero when satisfied. NaN residuals count as infinitely violated.
    pub fn violation(self, residual: f64) -> f64 {
        if residual.is_nan() {
            return f64::INFINITY;
        }
        match self {
            ConstraintMode::NonNegative => (-residual).max(0.0),
            ConstraintMode::NonPositive => residual.max(0.0),
        }
    }

    /// Total violation across all residuals.
    pub fn total_violation(self, residuals: &[f64]) -> f64 {
        residuals.iter().map(|&r| self.violation(r)).sum()
    }
}

/// Objective and constraint values produced by one evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluated {
    /// Objective values, all minimized.
    pub objectives: Vec<f64>,
    /// Constraint residuals, read through the problem's [`ConstraintMode`].
    pub constraints: Vec<f64>,
    /// Set when the problem itself rules the candidate out, independently
    /// of the residuals.
    pub forced_infeasible: bool,
    /// Problem-defined values carried along for reporting. Ignored by the
    /// engine.
    pub aux: Vec<f64>,
}

impl Evaluated {
    /// Creates an evaluation result.
    pub fn new(objectives: Vec<f64>, constraints: Vec<f64>) -> Self {
        Self {
            objectives,
            constraints,
            forced_infeasible: false,
            aux: Vec::new(),
        }
    }

    /// Attaches reporting values.
    pub fn with_aux(mut self, aux: Vec<f64>) -> Self {
        self.aux = aux;
        self
    }

    /// Marks the candidate infeasible regardless of its residuals.
    pub fn infeasible(mut self) -> Self {
        self.forced_infeasible = true;
        self
    }
}

/// An evaluated member of the population.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Solution {
    /// Decision variable values, within the problem bounds.
    pub genes: Vec<f64>,
    /// Objective values (minimized).
    pub objectives: Vec<f64>,
    /// Raw constraint residuals.
    pub constraints: Vec<f64>,
    /// Total constraint violation (0 when every residual is satisfied).
    pub violation: f64,
    /// Whether the solution satisfies every constraint and was not ruled out
    /// by the problem.
    pub feasible: bool,
    /// Reporting values attached by the problem.
    pub aux: Vec<f64>,
    /// Pareto rank under constrained domination (0 = first front).
    pub rank: usize,
    /// Crowding distance within its front.
    pub crowding: f64,
}

impl Solution {
    /// Builds a solution from its genes and evaluation result.
    pub fn new(genes: Vec<f64>, evaluated: Evaluated, mode: ConstraintMode) -> Self {
        let violation = mode.total_violation(&evaluated.constraints);
        let feasible = !evaluated.forced_infeasible && violation == 0.0;
        Self {
            genes,
            objectives: evaluated.objectives,
            constraints: evaluated.constraints,
            violation,
            feasible,
            aux: evaluated.aux,
            rank: usize::MAX,
            crowding: 0.0,
        }
    }
}

/// Defines a bounded real-valued multi-objective problem.
///
/// All objectives are **minimized**; negate any value that should be
/// maximized.
///
/// # Thread Safety
///
/// `MultiObjectiveProblem` must be `Send + Sync` because the runner may
/// evaluate a generation in parallel using rayon. Each call to
/// [`evaluate`](Self::evaluate) must be a pure function of its genes.
pub trait MultiObjectiveProblem: Send + Sync {
    /// Bounds of each decision variable, in gene order.
    fn bounds(&self) -> &[Bounds];

    /// Number of objectives returned by [`evaluate`](Self::evaluate).
    fn num_objectives(&self) -> usize;

    /// Number of constraint residuals returned by [`evaluate`](Self::evaluate).
    fn num_constraints(&self) -> usize {
        0
    }

    /// How constraint residuals are read.
    fn constraint_mode(&self) -> ConstraintMode {
        ConstraintMode::NonNegative
    }

    /// Evaluates one gene vector.
    ///
    /// An `Err` aborts the whole run.
    fn evaluate(&self, genes: &[f64]) -> Result<Evaluated>;

    /// Called at the end of each generation. The default is a no-op.
    fn on_generation(&self, _stats: &GenerationStats) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    #[test]
    fn test_bounds_sample_within() {
        let b = Bounds::new(100.0, 5000.0);
        let mut rng = create_rng(1);
        for _ in 0..1000 {
            assert!(b.contains(b.sample(&mut rng)));
        }
    }

    #[test]
    fn test_degenerate_bounds_sample() {
        let b = Bounds::new(3.0, 3.0);
        let mut rng = create_rng(1);
        assert_eq!(b.sample(&mut rng), 3.0);
    }

    #[test]
    fn test_clamp() {
        let b = Bounds::new(1.0, 8.0);
        assert_eq!(b.clamp(0.2), 1.0);
        assert_eq!(b.clamp(9.5), 8.0);
        assert_eq!(b.clamp(4.4), 4.4);
    }

    #[test]
    fn test_violation_non_negative() {
        let mode = ConstraintMode::NonNegative;
        assert_eq!(mode.violation(3.0), 0.0);
        assert_eq!(mode.violation(0.0), 0.0);
        assert_eq!(mode.violation(-5.0), 5.0);
        assert!(mode.violation(f64::NAN).is_infinite());
        assert_eq!(mode.total_violation(&[-5.0, -2.0, 1.0]), 7.0);
    }

    #[test]
    fn test_violation_non_positive() {
        let mode = ConstraintMode::NonPositive;
        assert_eq!(mode.violation(-3.0), 0.0);
        assert_eq!(mode.violation(2.5), 2.5);
    }

    #[test]
    fn test_solution_feasibility() {
        let mode = ConstraintMode::NonNegative;
        let ok = Solution::new(vec![0.0], Evaluated::new(vec![1.0], vec![3.0, 350.0]), mode);
        assert!(ok.feasible);
        assert_eq!(ok.violation, 0.0);

        let bad = Solution::new(vec![0.0], Evaluated::new(vec![1.0], vec![-5.0, 350.0]), mode);
        assert!(!bad.feasible);
        assert_eq!(bad.violation, 5.0);

        let forced = Solution::new(
            vec![0.0],
            Evaluated::new(vec![1.0], vec![3.0, 350.0]).infeasible(),
            mode,
        );
        assert!(!forced.feasible);
        assert_eq!(forced.violation, 0.0);
    }
}
