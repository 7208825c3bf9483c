//! NSGA-II evolutionary loop execution.
//!
//! [`Nsga2Runner`] orchestrates the generational process:
//! initialization → evaluation → ranking → (selection → SBX → mutation →
//! evaluation → elitist truncation) repeated until the generation or
//! evaluation budget is spent.

use super::config::Nsga2Config;
use super::multi_objective::{constrained_non_dominated_sort, crowding_distance};
use super::operators::{polynomial_mutation, sbx_crossover};
use super::selection::crowded_cmp;
use super::types::{Bounds, ConstraintMode, MultiObjectiveProblem, Solution};
use crate::error::{Error, Result};
use crate::random::rng_from;
use rand::Rng;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Summary of the population at the end of one generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GenerationStats {
    /// Generation index; 0 is the initial population.
    pub generation: usize,
    /// Evaluations performed so far.
    pub evaluations: usize,
    /// Feasible members of the population.
    pub feasible: usize,
    /// Size of the first front.
    pub front_size: usize,
}

/// Result of an NSGA-II run.
#[derive(Debug, Clone)]
pub struct Nsga2Result {
    /// Final population with rank and crowding assigned.
    pub population: Vec<Solution>,

    /// Rank-0 members of the final population.
    ///
    /// Under constrained domination this holds only feasible solutions
    /// whenever any member of the population is feasible.
    pub front: Vec<Solution>,

    /// Generations executed after the initial population.
    pub generations: usize,

    /// Total number of evaluations.
    pub evaluations: usize,

    /// Per-generation statistics, initial population included.
    pub history: Vec<GenerationStats>,
}

/// Executes the NSGA-II loop.
///
/// # Usage
///
/// ```ignore
/// let config = Nsga2Config::default().with_seed(42);
/// let result = Nsga2Runner::run(&problem, &config)?;
/// for s in &result.front {
///     println!("{:?} -> {:?}", s.genes, s.objectives);
/// }
/// ```
pub struct Nsga2Runner;

impl Nsga2Runner {
    /// Runs the optimization.
    ///
    /// Returns the first evaluation error unchanged; a failed evaluation
    /// aborts the whole run.
    pub fn run<P: MultiObjectiveProblem>(problem: &P, config: &Nsga2Config) -> Result<Nsga2Result> {
        config.validate()?;
        let bounds = problem.bounds();
        if bounds.is_empty() {
            return Err(Error::InvalidConfig(
                "problem must declare at least one decision variable".into(),
            ));
        }
        if problem.num_objectives() == 0 {
            return Err(Error::InvalidConfig(
                "problem must declare at least one objective".into(),
            ));
        }

        let mut rng = rng_from(config.seed);
        let pop_size = config.population_size;
        let mutation_rate = config.effective_mutation_rate(bounds.len());

        trace_info!(
            population = pop_size,
            generations = config.max_generations,
            objectives = problem.num_objectives(),
            "starting NSGA-II run"
        );

        // 1. Initialize and evaluate
        let initial: Vec<Vec<f64>> = (0..pop_size)
            .map(|_| bounds.iter().map(|b| b.sample(&mut rng)).collect())
            .collect();
        let mut population = evaluate_all(problem, initial, config.parallel)?;
        let mut evaluations = population.len();
        rank_and_crowd(&mut population);

        let mut history = Vec::with_capacity(config.max_generations + 1);
        history.push(stats(0, evaluations, &population));
        let mut generations = 0;

        // 2. Generational loop
        for gen in 1..=config.max_generations {
            let remaining = config
                .max_evaluations
                .map_or(pop_size, |budget| budget.saturating_sub(evaluations));
            let offspring_count = remaining.min(pop_size);
            if offspring_count == 0 {
                break;
            }

            let children = breed(
                &population,
                bounds,
                config,
                mutation_rate,
                offspring_count,
                &mut rng,
            );
            let offspring = evaluate_all(problem, children, config.parallel)?;
            evaluations += offspring.len();

            population.extend(offspring);
            population = survive(population, pop_size);
            generations = gen;

            let gen_stats = stats(gen, evaluations, &population);
            trace_debug!(
                generation = gen_stats.generation,
                evaluations = gen_stats.evaluations,
                feasible = gen_stats.feasible,
                front = gen_stats.front_size,
                "generation complete"
            );
            problem.on_generation(&gen_stats);
            history.push(gen_stats);
        }

        let front: Vec<Solution> = population.iter().filter(|s| s.rank == 0).cloned().collect();

        trace_info!(
            generations,
            evaluations,
            front = front.len(),
            "NSGA-II run finished"
        );

        Ok(Nsga2Result {
            population,
            front,
            generations,
            evaluations,
            history,
        })
    }
}

/// Produces `count` children by tournament selection, SBX and mutation.
fn breed<R: Rng>(
    population: &[Solution],
    bounds: &[Bounds],
    config: &Nsga2Config,
    mutation_rate: f64,
    count: usize,
    rng: &mut R,
) -> Vec<Vec<f64>> {
    let mut children = Vec::with_capacity(count);

    while children.len() < count {
        let p1 = &population[config.selection.select(population, rng)];
        let p2 = &population[config.selection.select(population, rng)];

        let (c1, c2) = if rng.random_range(0.0..1.0) < config.crossover_rate {
            sbx_crossover(&p1.genes, &p2.genes, bounds, config.crossover_eta, rng)
        } else {
            (p1.genes.clone(), p2.genes.clone())
        };

        for mut child in [c1, c2] {
            if children.len() >= count {
                break;
            }
            polynomial_mutation(&mut child, bounds, config.mutation_eta, mutation_rate, rng);
            children.push(child);
        }
    }

    children
}

/// Elitist (μ + λ) truncation: whole fronts first, then the least crowded
/// members of the front that does not fit.
fn survive(mut combined: Vec<Solution>, pop_size: usize) -> Vec<Solution> {
    rank_and_crowd(&mut combined);
    combined.sort_by(crowded_cmp);
    combined.truncate(pop_size);
    combined
}

/// Assigns constrained Pareto rank and per-front crowding distance.
fn rank_and_crowd(population: &mut [Solution]) {
    let sorted = constrained_non_dominated_sort(population);

    for front in &sorted.fronts {
        let objectives: Vec<Vec<f64>> = front
            .iter()
            .map(|&i| population[i].objectives.clone())
            .collect();
        let distances = crowding_distance(&objectives);
        for (&i, d) in front.iter().zip(distances) {
            population[i].crowding = d;
        }
    }

    for (s, rank) in population.iter_mut().zip(sorted.ranks) {
        s.rank = rank;
    }
}

fn stats(generation: usize, evaluations: usize, population: &[Solution]) -> GenerationStats {
    GenerationStats {
        generation,
        evaluations,
        feasible: population.iter().filter(|s| s.feasible).count(),
        front_size: population.iter().filter(|s| s.rank == 0).count(),
    }
}

fn evaluate_one<P: MultiObjectiveProblem>(
    problem: &P,
    genes: Vec<f64>,
    mode: ConstraintMode,
) -> Result<Solution> {
    let evaluated = problem.evaluate(&genes).inspect_err(|_e| {
        trace_warn!(error = %_e, "evaluation failed; aborting run");
    })?;

    if evaluated.objectives.len() != problem.num_objectives() {
        return Err(Error::ObjectiveMismatch {
            expected: problem.num_objectives(),
            got: evaluated.objectives.len(),
        });
    }
    if evaluated.constraints.len() != problem.num_constraints() {
        return Err(Error::ConstraintMismatch {
            expected: problem.num_constraints(),
            got: evaluated.constraints.len(),
        });
    }

    Ok(Solution::new(genes, evaluated, mode))
}

/// Evaluate a batch of gene vectors, preserving order.
#[cfg(feature = "parallel")]
fn evaluate_all<P: MultiObjectiveProblem>(
    problem: &P,
    genes: Vec<Vec<f64>>,
    parallel: bool,
) -> Result<Vec<Solution>> {
    let mode = problem.constraint_mode();
    if parallel {
        genes
            .into_par_iter()
            .map(|g| evaluate_one(problem, g, mode))
            .collect()
    } else {
        genes
            .into_iter()
            .map(|g| evaluate_one(problem, g, mode))
            .collect()
    }
}

/// Evaluate a batch of gene vectors, preserving order.
#[cfg(not(feature = "parallel"))]
fn evaluate_all<P: MultiObjectiveProblem>(
    problem: &P,
    genes: Vec<Vec<f64>>,
    _parallel: bool,
) -> Result<Vec<Solution>> {
    let mode = problem.constraint_mode();
    genes
        .into_iter()
        .map(|g| evaluate_one(problem, g, mode))
        .collect()
}

// ============================================================================
// Tests
// ============================================================================
