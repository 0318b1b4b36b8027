use super::prelude::*;

// Tolerance for rounding errors at the edges of the coarse bounding box.
const COARSE_SEARCH_MARGIN: Distance = Distance::from_meters(1.0);

// No community whose center lies outside of the returned candidates
// can reach the given area, because its radius is bounded by the
// largest radius of all stored communities.
fn candidate_communities<R: CommunityRepo>(repo: &R, area: &Circle) -> Result<Vec<Community>> {
    let max_radius = match repo.max_community_radius()? {
        Some(max_radius) => max_radius,
        None => return Ok(vec![]),
    };
    let reach = area.radius + max_radius + COARSE_SEARCH_MARGIN;
    let bbox = MapBbox::centered_around(area.center, reach);
    Ok(repo.communities_in_bbox(&bbox)?)
}

fn sorted_by_id(mut communities: Vec<Community>) -> Vec<Community> {
    communities.sort_by(|a, b| a.id.cmp(&b.id));
    communities
}

/// All communities whose region contains the given point.
pub fn find_containing_communities<R: CommunityRepo>(
    repo: &R,
    pos: GeoPoint,
) -> Result<Vec<Community>> {
    let area = Circle::new(pos, Distance::from_meters(0.0));
    let found = candidate_communities(repo, &area)?
        .into_iter()
        .filter(|c| c.contains_point(pos))
        .collect();
    Ok(sorted_by_id(found))
}

/// All communities whose region overlaps with the given area.
pub fn find_intersecting_communities<R: CommunityRepo>(
    repo: &R,
    area: &Circle,
) -> Result<Vec<Community>> {
    if !area.radius.is_valid() {
        return Err(Error::InvalidRadius(area.radius.to_meters()));
    }
    let found = candidate_communities(repo, area)?
        .into_iter()
        .filter(|c| c.intersects(area))
        .collect();
    Ok(sorted_by_id(found))
}

/// All communities or only those around a position.
pub fn query_communities<R: CommunityRepo>(
    repo: &R,
    pos: Option<GeoPoint>,
) -> Result<Vec<Community>> {
    match pos {
        Some(pos) => find_containing_communities(repo, pos),
        None => Ok(sorted_by_id(repo.all_communities()?)),
    }
}

pub fn community_ids(communities: &[Community]) -> Vec<Id> {
    communities.iter().map(|c| c.id.clone()).collect()
}
