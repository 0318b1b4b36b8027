mod comment_tip;
mod create_community;
mod create_tip;
mod delete;
mod error;
mod find_communities;
mod indexing;
mod membership;
mod pins_in_bbox;
mod rate_tip;
mod search;
mod update_community;
mod update_tip;

#[cfg(test)]
pub mod tests;

pub use self::{
    comment_tip::*, create_community::*, create_tip::*, delete::*, error::Error,
    find_communities::*, indexing::*, membership::*, pins_in_bbox::*, rate_tip::*, search::*,
    update_community::*, update_tip::*,
};

mod prelude {
    pub use super::error::Error;
    pub type Result<T> = std::result::Result<T, Error>;
    pub use crate::{db::*, entities::*, repositories::*, RepoError};
}
use self::prelude::*;

pub fn get_community<R: CommunityRepo>(repo: &R, id: &str) -> Result<Community> {
    Ok(repo.get_community(id)?)
}

pub fn get_tip<R: TipRepo>(repo: &R, id: &str) -> Result<Tip> {
    Ok(repo.get_tip(id)?)
}

/// Blank values are treated as absent.
pub fn parse_number(name: &'static str, s: Option<&str>) -> Result<Option<f64>> {
    crate::text::non_blank(s)
        .map(|s| {
            s.parse::<f64>()
                .map_err(|_| Error::InvalidNumber(name, s.to_owned()))
        })
        .transpose()
}

/// Longitude and latitude are either both present or both absent.
pub fn parse_position(longitude: Option<f64>, latitude: Option<f64>) -> Result<Option<GeoPoint>> {
    match (longitude, latitude) {
        (None, None) => Ok(None),
        (Some(lng), Some(lat)) => Ok(Some(GeoPoint::try_from_lng_lat_deg(lng, lat)?)),
        _ => Err(Error::IncompletePosition),
    }
}

/// A circular region around a position with a radius in meters.
pub fn parse_circle(longitude: f64, latitude: f64, radius: f64) -> Result<Circle> {
    let center = GeoPoint::try_from_lng_lat_deg(longitude, latitude)?;
    let radius = Distance::from_meters(radius);
    if !radius.is_valid() {
        return Err(Error::InvalidRadius(radius.to_meters()));
    }
    Ok(Circle::new(center, radius))
}

pub fn parse_timestamp(s: Option<&str>) -> Result<Option<Timestamp>> {
    Ok(crate::text::non_blank(s)
        .map(Timestamp::parse_rfc3339)
        .transpose()?)
}
