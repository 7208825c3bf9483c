//! Adapter between a feature vector and the two external price models.

use super::features::{FeatureVector, ModelRow};
use crate::error::{Error, ModelError, Result};

/// A pre-trained, batch-oriented regressor.
///
/// Accepts a batch of model rows and returns one scalar per row. Training,
/// loading and serialization are the caller's business.
///
/// Any `Fn(&[ModelRow]) -> Vec<f64> + Send + Sync` closure is a model.
/// Fallible models implement the trait directly.
pub trait PriceModel: Send + Sync {
    /// Predicts one value per row of `batch`.
    fn predict(&self, batch: &[ModelRow]) -> std::result::Result<Vec<f64>, ModelError>;
}

impl<F> PriceModel for F
where
    F: Fn(&[ModelRow]) -> Vec<f64> + Send + Sync,
{
    fn predict(&self, batch: &[ModelRow]) -> std::result::Result<Vec<f64>, ModelError> {
        Ok(self(batch))
    }
}

/// Rent and sale price predicted for one configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Prediction {
    /// Predicted rent.
    pub rent: f64,
    /// Predicted sale price.
    pub sale: f64,
}

impl Prediction {
    /// Returns `true` if both predicted values are finite.
    pub fn is_finite(&self) -> bool {
        self.rent.is_finite() && self.sale.is_finite()
    }

    /// Sale-to-rent ratio, or `None` when rent is not positive or the
    /// quotient is not finite.
    pub fn ratio(&self) -> Option<f64> {
        if self.rent.is_nan() || self.rent <= 0.0 {
            return None;
        }
        let ratio = self.sale / self.rent;
        ratio.is_finite().then_some(ratio)
    }
}

/// Predicts rent and sale price for one configuration.
///
/// Wraps the rounded model input in a batch of one, calls each model exactly
/// once (rent first) and takes the first element of each output. Model
/// failures are returned unchanged; nothing is retried.
pub fn predict<R, S>(features: &FeatureVector, rent_model: &R, sale_model: &S) -> Result<Prediction>
where
    R: PriceModel + ?Sized,
    S: PriceModel + ?Sized,
{
    let batch = [features.model_input()];
    let rent = first("rent", rent_model.predict(&batch))?;
    let sale = first("sale", sale_model.predict(&batch))?;
    Ok(Prediction { rent, sale })
}

fn first(model: &'static str, output: std::result::Result<Vec<f64>, ModelError>) -> Result<f64> {
    let values = output.map_err(|source| Error::Model { model, source })?;
    values
        .first()
        .copied()
        .ok_or(Error::EmptyPrediction { model })
}
