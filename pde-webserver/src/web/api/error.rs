use super::json_error_response;
use anyhow::anyhow;
use pde_application::error::{AppError, BError};
pub use pde_core::{repositories::Error as RepoError, usecases::Error as ParameterError};
use rocket::{
    self,
    http::Status,
    response::{self, Responder},
    serde::json::Error as JsonError,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    App(#[from] AppError),
    #[error("{0}")]
    OtherWithStatus(#[source] anyhow::Error, Status),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<JsonError<'_>> for Error {
    fn from(err: JsonError) -> Self {
        match err {
            JsonError::Io(err) => Self::OtherWithStatus(anyhow!(err), Status::UnprocessableEntity),
            JsonError::Parse(_str, err) => {
                Self::OtherWithStatus(anyhow!(err), Status::UnprocessableEntity)
            }
        }
    }
}

/// `None` for failures that are not caused by the client.
fn client_error_status(err: &AppError) -> Option<Status> {
    match err {
        AppError::Business(BError::Parameter(_)) => Some(Status::BadRequest),
        AppError::Business(BError::Repo(RepoError::NotFound)) => Some(Status::NotFound),
        AppError::Business(BError::Repo(RepoError::AlreadyExists)) => Some(Status::Conflict),
        AppError::Business(BError::Repo(RepoError::Other(_))) | AppError::Other(_) => None,
    }
}

const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

impl<'r, 'o: 'r> Responder<'r, 'o> for Error {
    fn respond_to(self, req: &rocket::Request) -> response::Result<'o> {
        match self {
            Error::App(err) => {
                if let Some(status) = client_error_status(&err) {
                    return json_error_response(req, &err, status);
                }
                error!("Error: {err}");
                json_error_response(req, &INTERNAL_ERROR_MESSAGE, Status::InternalServerError)
            }
            Error::OtherWithStatus(err, status) => json_error_response(req, &err, status),
            Error::Other(err) => {
                error!("Error: {err}");
                json_error_response(req, &INTERNAL_ERROR_MESSAGE, Status::InternalServerError)
            }
        }
    }
}

impl From<RepoError> for Error {
    fn from(err: RepoError) -> Self {
        AppError::from(err).into()
    }
}

impl From<BError> for Error {
    fn from(err: BError) -> Self {
        AppError::from(err).into()
    }
}

impl From<ParameterError> for Error {
    fn from(err: ParameterError) -> Self {
        Self::App(err.into())
    }
}
