use crate::{
    entities::{GeoPointError, TimestampParseError},
    repositories,
    util::validate::{BboxInvalidation, CommunityInvalidation, TipInvalidation},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid position: {0}")]
    InvalidPosition(#[from] GeoPointError),
    #[error("Invalid number for '{0}': {1}")]
    InvalidNumber(&'static str, String),
    #[error("Missing parameter '{0}'")]
    MissingParameter(&'static str),
    #[error("Longitude and latitude must be given together")]
    IncompletePosition,
    #[error("Invalid radius: {0}")]
    InvalidRadius(f64),
    #[error("Bounding box is invalid: {0}")]
    Bbox(#[from] BboxInvalidation),
    #[error("Both south-west and north-east corners are required")]
    IncompleteBbox,
    #[error("Invalid tip type '{0}', must be 'pin' or 'text'")]
    TipKind(String),
    #[error("A pin requires a location")]
    MissingLocation,
    #[error("The field '{0}' is only allowed for pins")]
    PinOnlyField(&'static str),
    #[error("Invalid duration: {0}")]
    Duration(i64),
    #[error("Invalid timestamp: {0}")]
    Timestamp(#[from] TimestampParseError),
    #[error("Missing user id")]
    UserId,
    #[error("Empty comment")]
    EmptyComment,
    #[error("Invalid community: {0}")]
    Community(#[from] CommunityInvalidation),
    #[error("Invalid tip: {0}")]
    Tip(#[from] TipInvalidation),
    #[error(transparent)]
    Repo(#[from] repositories::Error),
}
