// NOTE:
// All timestamps with the `_at` postfix are stored
// as unix timestamp in **milli**seconds.

use anyhow::anyhow;
use diesel::{
    self,
    prelude::*,
    result::{DatabaseErrorKind, Error as DieselError},
};

use pde_core::{
    entities::*,
    repositories::{self as repo, *},
};

use super::*;

mod community;
mod tip;

type Result<T> = std::result::Result<T, repo::Error>;

pub fn from_diesel_err(err: DieselError) -> repo::Error {
    match err {
        DieselError::NotFound => repo::Error::NotFound,
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            repo::Error::AlreadyExists
        }
        _ => repo::Error::Other(err.into()),
    }
}

fn read_only_violation() -> repo::Error {
    repo::Error::Other(anyhow!("Writing is not permitted on a read-only connection"))
}

fn load_geo_point(lng: f64, lat: f64) -> Result<GeoPoint> {
    GeoPoint::try_from_lng_lat_deg(lng, lat).map_err(|err| {
        // This should never happen if positions have been validated properly on insert
        log::error!("Failed to load invalid position: {err}");
        repo::Error::Other(err.into())
    })
}

fn load_circle(lng: f64, lat: f64, radius: f64) -> Result<Circle> {
    Ok(Circle::new(
        load_geo_point(lng, lat)?,
        Distance::from_meters(radius),
    ))
}

fn count_to_usize(count: i64) -> usize {
    usize::try_from(count).unwrap_or_default()
}
