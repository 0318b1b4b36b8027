use super::{parse_circle, prelude::*};
use crate::util::{dedup::Dedup, stamp::Stamp, validate::Validate};

/// Fields that are left unchanged if absent.
#[rustfmt::skip]
#[derive(Debug, Clone, Default)]
pub struct CommunityPatch {
    pub name        : Option<String>,
    pub description : Option<String>,
    pub longitude   : Option<f64>,
    pub latitude    : Option<f64>,
    pub radius      : Option<f64>,
    pub tags        : Option<Vec<String>>,
    pub colour      : Option<String>,
}

pub fn apply_community_patch(
    community: Community,
    patch: CommunityPatch,
    now: Timestamp,
) -> Result<Community> {
    let CommunityPatch {
        name,
        description,
        longitude,
        latitude,
        radius,
        tags,
        colour,
    } = patch;
    let center = match (longitude, latitude) {
        (None, None) => community.region.center,
        (Some(lng), Some(lat)) => GeoPoint::try_from_lng_lat_deg(lng, lat)?,
        _ => return Err(Error::IncompletePosition),
    };
    let radius = radius.unwrap_or_else(|| community.region.radius.to_meters());
    let region = parse_circle(center.lng(), center.lat(), radius)?;
    let community = Community {
        name: name.map(|n| n.trim().to_owned()).unwrap_or(community.name),
        description: description
            .map(|d| d.trim().to_owned())
            .unwrap_or(community.description),
        region,
        tags: tags.unwrap_or(community.tags),
        colour: colour.or(community.colour),
        ..community
    }
    .dedup_sets()
    .stamp_updated(now);
    community.validate()?;
    Ok(community)
}

pub fn update_community<R: CommunityRepo>(
    repo: &R,
    id: &str,
    patch: CommunityPatch,
) -> Result<Community> {
    let old = repo.get_community(id)?;
    let community = apply_community_patch(old, patch, Timestamp::now())?;
    repo.update_community(&community)?;
    Ok(community)
}
