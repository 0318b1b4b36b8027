use super::{parse_circle, prelude::*};
use crate::util::{dedup::Dedup, validate::Validate};

#[rustfmt::skip]
#[derive(Debug, Clone, Default)]
pub struct NewCommunity {
    pub name        : String,
    pub description : Option<String>,
    pub longitude   : f64,
    pub latitude    : f64,
    pub radius      : f64,
    pub tags        : Vec<String>,
    pub colour      : Option<String>,
}

pub fn prepare_new_community(new_community: NewCommunity, now: Timestamp) -> Result<Community> {
    let NewCommunity {
        name,
        description,
        longitude,
        latitude,
        radius,
        tags,
        colour,
    } = new_community;
    let region = parse_circle(longitude, latitude, radius)?;
    let community = Community {
        id: Id::new(),
        name: name.trim().to_owned(),
        description: description.unwrap_or_default().trim().to_owned(),
        region,
        tags,
        members: vec![],
        colour,
        created_at: now,
        updated_at: now,
    }
    .dedup_sets();
    community.validate()?;
    Ok(community)
}

pub fn create_community<R: CommunityRepo>(repo: &R, new_community: NewCommunity) -> Result<Community> {
    let community = prepare_new_community(new_community, Timestamp::now())?;
    repo.create_community(&community)?;
    Ok(community)
}
