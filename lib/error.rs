//! Error type shared by all fallible operations in the crate.

use thiserror::Error;

pub type Cos2PhiResult<T> = Result<T, Cos2PhiError>;

#[derive(Debug, Error)]
pub enum Cos2PhiError {
    /// A noise calculation was requested for a channel that the system does
    /// not list in its supported channels.
    #[error("noise channel '{0}' is not supported in this system")]
    UnsupportedNoiseChannel(String),

    /// Failure inside the eigensolver (non-convergence or a LAPACK error).
    #[error("eigensolver error: {0}")]
    Solver(#[from] ndarray_linalg::error::LinalgError),

    /// A parameter lies outside the range where the model is defined.
    #[error("invalid parameter {name} = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// More eigenvalues were requested than the Hilbert space can supply.
    #[error("requested {requested} eigenvalues from a space of dimension {dim}")]
    EigenCount { requested: usize, dim: usize },

    /// An eigenstate index is not covered by the eigensystem at hand.
    #[error("eigenstate index {index} out of range for {count} eigenstates")]
    EigenIndex { index: usize, count: usize },

    /// An operator does not match the dimension of the space it is used in.
    #[error("operator of dimension {found} used where {expected} is required")]
    OperatorDim { expected: usize, found: usize },

    #[error("shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),

    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("npz write error: {0}")]
    Npz(#[from] ndarray_npy::WriteNpzError),
}
