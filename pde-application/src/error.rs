use pde_core::{repositories::Error as RepoError, usecases::Error as ParameterError};
use thiserror::Error;

pub use pde_core::repositories;

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> AppError {
        AppError::Business(BError::Repo(err))
    }
}

impl From<ParameterError> for AppError {
    fn from(err: ParameterError) -> AppError {
        AppError::Business(err.into())
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Business(#[from] BError),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Failures of the storage or the search index that might
    /// disappear when trying again.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Business(BError::Repo(RepoError::Other(_))) | Self::Other(_) => true,
            Self::Business(_) => false,
        }
    }
}

#[derive(Debug, Error)]
pub enum BError {
    #[error(transparent)]
    Parameter(ParameterError),
    #[error(transparent)]
    Repo(#[from] repositories::Error),
}

// Repository errors that are wrapped by the use cases
// are unwrapped to keep them distinguishable from
// invalid parameters.
impl From<ParameterError> for BError {
    fn from(err: ParameterError) -> Self {
        match err {
            ParameterError::Repo(err) => Self::Repo(err),
            err => Self::Parameter(err),
        }
    }
}
