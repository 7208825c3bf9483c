//! Crate-wide error type.

/// Boxed error raised by an external prediction model.
pub type ModelError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors surfaced to the caller of an evaluation or an optimization run.
///
/// Nothing here is retried: a failed evaluation aborts the run that
/// triggered it.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An external prediction model returned an error.
    #[error("{model} model failed: {source}")]
    Model {
        /// Which model failed (`"rent"` or `"sale"`).
        model: &'static str,
        /// The error reported by the model.
        #[source]
        source: ModelError,
    },

    /// A prediction model returned an empty batch for a batch of one row.
    #[error("{model} model returned no prediction for a batch of one")]
    EmptyPrediction {
        /// Which model returned nothing.
        model: &'static str,
    },

    /// A gene vector did not have one entry per decision variable.
    #[error("gene length mismatch: expected {expected} genes, got {got}")]
    GeneLength {
        /// Number of decision variables.
        expected: usize,
        /// Length of the offending vector.
        got: usize,
    },

    /// An evaluation produced a different number of objectives than declared.
    #[error("objective dimension mismatch: expected {expected} values, got {got}")]
    ObjectiveMismatch {
        /// Declared objective count.
        expected: usize,
        /// Returned objective count.
        got: usize,
    },

    /// An evaluation produced a different number of constraint residuals than declared.
    #[error("constraint dimension mismatch: expected {expected} values, got {got}")]
    ConstraintMismatch {
        /// Declared constraint count.
        expected: usize,
        /// Returned constraint count.
        got: usize,
    },

    /// A solution reached the frontier without the rent/sale values its
    /// problem attaches.
    #[error("missing prediction: expected {expected} attached values, got {got}")]
    MissingPrediction {
        /// Number of values a frontier row needs.
        expected: usize,
        /// Number of values the solution carried.
        got: usize,
    },

    /// A problem or solver configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Shorthand for `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
