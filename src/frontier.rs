//! Tabular view of a non-dominated set, for plotting and export.
//!
//! Column names match what presentation code expects: the five inputs
//! (`sqfeet`, `beds`, `baths`, `income`, `density`) for pairwise
//! distribution plots, and `rental` / `sale` for the rent-vs-sale scatter.

use crate::error::{Error, Result};
use crate::nsga2::Solution;
use crate::problem::{FeatureVector, Prediction, AUX_RENT, AUX_SALE, FEATURE_COLUMNS};

/// Objective columns, after the feature columns.
pub const OBJECTIVE_COLUMNS: [&str; 3] = ["rental", "sale", "ratio"];

/// One solution of the frontier.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FrontierRow {
    /// Floor area.
    pub sqfeet: f64,
    /// Bedroom count as seen by the models (rounded).
    pub beds: f64,
    /// Bathroom count as seen by the models (rounded).
    pub baths: f64,
    /// Local median income.
    pub income: f64,
    /// Population density.
    pub density: f64,
    /// Predicted rent.
    pub rental: f64,
    /// Predicted sale price.
    pub sale: f64,
    /// Sale-to-rent ratio, when rent is positive.
    pub ratio: Option<f64>,
    /// Whether the configuration satisfies every constraint.
    pub feasible: bool,
}

impl FrontierRow {
    /// Builds a row from a solution produced by a
    /// [`RealtyProblem`](crate::problem::RealtyProblem) run.
    pub fn from_solution(solution: &Solution) -> Result<Self> {
        let features = FeatureVector::from_genes(&solution.genes)?;
        let (rent, sale) = match (solution.aux.get(AUX_RENT), solution.aux.get(AUX_SALE)) {
            (Some(&rent), Some(&sale)) => (rent, sale),
            _ => {
                return Err(Error::MissingPrediction {
                    expected: AUX_SALE + 1,
                    got: solution.aux.len(),
                })
            }
        };
        let input = features.model_input();
        Ok(Self {
            sqfeet: input[0],
            beds: input[1],
            baths: input[2],
            income: input[3],
            density: input[4],
            rental: rent,
            sale,
            ratio: Prediction { rent, sale }.ratio(),
            feasible: solution.feasible,
        })
    }

    /// Value of a named column. An undefined ratio reads as `NaN`.
    pub fn get(&self, column: &str) -> Option<f64> {
        let value = match column {
            "sqfeet" => self.sqfeet,
            "beds" => self.beds,
            "baths" => self.baths,
            "income" => self.income,
            "density" => self.density,
            "rental" => self.rental,
            "sale" => self.sale,
            "ratio" => self.ratio.unwrap_or(f64::NAN),
            _ => return None,
        };
        Some(value)
    }
}

/// The non-dominated solutions of one run, one row per solution.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FrontierTable {
    /// Rows in front order.
    pub rows: Vec<FrontierRow>,
}

impl FrontierTable {
    /// Builds a table from solver output.
    pub fn from_solutions(solutions: &[Solution]) -> Result<Self> {
        let rows = solutions
            .iter()
            .map(FrontierRow::from_solution)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { rows })
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if there are no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All column names, features first.
    pub fn columns() -> impl Iterator<Item = &'static str> {
        FEATURE_COLUMNS.into_iter().chain(OBJECTIVE_COLUMNS)
    }

    /// One column by name, or `None` for an unknown name.
    pub fn column(&self, name: &str) -> Option<Vec<f64>> {
        self.rows.iter().map(|r| r.get(name)).collect()
    }

    /// The `rental` column.
    pub fn rental(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.rental).collect()
    }

    /// The `sale` column.
    pub fn sale(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.sale).collect()
    }

    /// Only the rows that satisfy every constraint.
    pub fn feasible_only(&self) -> Self {
        Self {
            rows: self.rows.iter().filter(|r| r.feasible).copied().collect(),
        }
    }
}

/// Every unordered pair of feature columns, in column order.
///
/// Ten pairs for five features; the grid used for pairwise input
/// distribution plots.
pub fn feature_pairs() -> Vec<(&'static str, &'static str)> {
    FEATURE_COLUMNS
        .iter()
        .enumerate()
        .flat_map(|(i, &a)| FEATURE_COLUMNS[i + 1..].iter().map(move |&b| (a, b)))
        .collect()
}
