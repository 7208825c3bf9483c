//! NSGA-II over bounded real-valued decision variables.
//!
//! A generic, domain-agnostic engine. Problems implement
//! [`MultiObjectiveProblem`], which declares bounds, objective and constraint
//! counts, and evaluates one gene vector at a time.
//!
//! # Key Types
//!
//! - [`Nsga2Config`]: population size, stopping rule, operator parameters
//! - [`Nsga2Runner`]: executes the evolutionary loop
//! - [`Nsga2Result`]: final population, its first front and run statistics
//!
//! # Submodules
//!
//! - [`operators`]: SBX crossover and polynomial mutation
//! - [`multi_objective`]: (constrained) non-dominated sorting and crowding distance
//!
//! # References
//!
//! - Deb et al. (2002), *A Fast and Elitist Multiobjective GA: NSGA-II*
//! - Deb (2000), *An efficient constraint handling method for genetic algorithms*

mod config;
pub mod multi_objective;
pub mod operators;
mod runner;
mod selection;
mod types;

pub use config::Nsga2Config;
pub use runner::{GenerationStats, Nsga2Result, Nsga2Runner};
pub use selection::Selection;
pub use types::{Bounds, ConstraintMode, Evaluated, MultiObjectiveProblem, Solution};
