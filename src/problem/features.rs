//! Decision variables of a residential property configuration.
//!
//! Five real-valued genes, in this order: floor area, bedrooms, bathrooms,
//! local median income, population density. Bedrooms and bathrooms are
//! searched as continuous values and rounded with [`round_count`] before
//! they reach a model or a constraint.

use crate::error::{Error, Result};
use crate::nsga2::Bounds;

/// Number of decision variables (and model input columns).
pub const NUM_FEATURES: usize = 5;

/// One row of model input, in [`FEATURE_COLUMNS`] order.
pub type ModelRow = [f64; NUM_FEATURES];

/// Column names of the decision variables, in gene order.
pub const FEATURE_COLUMNS: [&str; NUM_FEATURES] = ["sqfeet", "beds", "baths", "income", "density"];

/// Fixed search bounds, in gene order.
pub const DECISION_BOUNDS: [Bounds; NUM_FEATURES] = [
    Bounds::new(100.0, 5000.0),
    Bounds::new(1.0, 8.0),
    Bounds::new(1.0, 8.0),
    Bounds::new(11368.0, 230952.0),
    Bounds::new(1.0, 143683.0),
];

/// Rounds a relaxed bedroom/bathroom count to a whole number.
///
/// Ties go to the even neighbour (`2.5 -> 2`, `3.5 -> 4`). Every consumer
/// of a rounded count goes through this function.
#[inline]
pub fn round_count(value: f64) -> f64 {
    value.round_ties_even()
}

/// A candidate property configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FeatureVector {
    /// Floor area in square feet.
    pub size: f64,
    /// Bedroom count, possibly fractional.
    pub beds: f64,
    /// Bathroom count, possibly fractional.
    pub baths: f64,
    /// Local median income.
    pub income: f64,
    /// Population density.
    pub density: f64,
}

impl FeatureVector {
    /// Creates a feature vector.
    pub fn new(size: f64, beds: f64, baths: f64, income: f64, density: f64) -> Self {
        Self {
            size,
            beds,
            baths,
            income,
            density,
        }
    }

    /// Reads a solver gene vector.
    pub fn from_genes(genes: &[f64]) -> Result<Self> {
        match *genes {
            [size, beds, baths, income, density] => Ok(Self::new(size, beds, baths, income, density)),
            _ => Err(Error::GeneLength {
                expected: NUM_FEATURES,
                got: genes.len(),
            }),
        }
    }

    /// The raw gene vector, without rounding.
    pub fn to_genes(&self) -> Vec<f64> {
        vec![self.size, self.beds, self.baths, self.income, self.density]
    }

    /// Bedroom count as seen by the models and constraints.
    pub fn rounded_beds(&self) -> f64 {
        round_count(self.beds)
    }

    /// Bathroom count as seen by the models and constraints.
    pub fn rounded_baths(&self) -> f64 {
        round_count(self.baths)
    }

    /// Model input row: `[size, round(beds), round(baths), income, density]`.
    pub fn model_input(&self) -> ModelRow {
        [
            self.size,
            self.rounded_beds(),
            self.rounded_baths(),
            self.income,
            self.density,
        ]
    }

    /// Returns `true` if every variable lies within [`DECISION_BOUNDS`].
    pub fn in_bounds(&self) -> bool {
        self.to_genes()
            .iter()
            .zip(DECISION_BOUNDS.iter())
            .all(|(&x, b)| b.contains(x))
    }
}
