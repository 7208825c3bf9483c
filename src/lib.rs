//! Residential property configuration search as a constrained
//! multi-objective problem.
//!
//! A candidate property is described by five bounded decision variables
//! (floor area, bedrooms, bathrooms, local median income, population
//! density). Two externally supplied regressors predict its monthly rent and
//! its sale price; the search looks for Pareto-optimal trade-offs between
//! rent, sale price and the sale-to-rent ratio, subject to structural
//! feasibility constraints.
//!
//! - [`problem`]: decision variables, the prediction adapter, the three
//!   problem variants and the single parameterized evaluation.
//! - [`nsga2`]: a generic NSGA-II engine over bounded real genes with
//!   constrained domination. It knows nothing about real estate.
//! - [`frontier`]: the non-dominated set in tabular form for presentation.
//! - [`optimize()`]: glue that binds a variant to two models, runs the engine
//!   and collects the frontier.
//!
//! # Example
//!
//! ```
//! use u_realty::nsga2::Nsga2Config;
//! use u_realty::problem::Variant;
//! use u_realty::optimize;
//!
//! // Stand-in regressors: any `Fn(&[[f64; 5]]) -> Vec<f64>` is a model.
//! let rent = |batch: &[[f64; 5]]| -> Vec<f64> {
//!     batch.iter().map(|x| 0.8 * x[0] + 0.01 * x[3]).collect()
//! };
//! let sale = |batch: &[[f64; 5]]| -> Vec<f64> {
//!     batch.iter().map(|x| 150.0 * x[0] + 2.0 * x[3]).collect()
//! };
//!
//! let config = Nsga2Config::fast()
//!     .with_population_size(24)
//!     .with_max_generations(10)
//!     .with_seed(7);
//! let frontier = optimize(&Variant::RentSale.config(), rent, sale, &config).unwrap();
//! assert!(!frontier.is_empty());
//! assert_eq!(frontier.rental().len(), frontier.sale().len());
//! ```
//!
//! # Cargo features
//!
//! | feature | effect | default |
//! |---|---|---|
//! | `parallel` | evaluate offspring with rayon when [`nsga2::Nsga2Config::parallel`] is set | off |
//! | `serde` | `Serialize`/`Deserialize` on configs, `Serialize` on frontier rows | off |
//! | `tracing` | structured log events via [`tracing`](https://docs.rs/tracing) | off |

/// Emit a `tracing::info!` event when the `tracing` feature is enabled.
/// No-op otherwise.
#[cfg(feature = "tracing")]
macro_rules! trace_info {
    ($($arg:tt)*) => { tracing::info!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_info {
    ($($arg:tt)*) => {};
}

/// Emit a `tracing::debug!` event when the `tracing` feature is enabled.
/// No-op otherwise.
#[cfg(feature = "tracing")]
macro_rules! trace_debug {
    ($($arg:tt)*) => { tracing::debug!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_debug {
    ($($arg:tt)*) => {};
}

/// Emit a `tracing::warn!` event when the `tracing` feature is enabled.
/// No-op otherwise.
#[cfg(feature = "tracing")]
macro_rules! trace_warn {
    ($($arg:tt)*) => { tracing::warn!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_warn {
    ($($arg:tt)*) => {};
}

mod error;
pub mod frontier;
pub mod nsga2;
mod optimize;
pub mod problem;
mod random;

pub use error::{Error, ModelError, Result};
pub use frontier::{FrontierRow, FrontierTable};
pub use optimize::optimize;
