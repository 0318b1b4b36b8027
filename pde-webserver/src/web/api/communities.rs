use super::{util::parse_position_params, *};

#[get("/communities?<longitude>&<latitude>")]
pub fn get_communities(
    connections: sqlite::Connections,
    cfg: &State<Cfg>,
    longitude: Option<&str>,
    latitude: Option<&str>,
) -> Result<Vec<json::Community>> {
    let position = parse_position_params(longitude, latitude)?;
    let communities = flows::query_communities(&connections, &cfg.read_retry, position)?;
    Ok(Json(communities.into_iter().map(Into::into).collect()))
}

#[get("/communities/intersecting?<longitude>&<latitude>&<radius>")]
pub fn get_intersecting_communities(
    connections: sqlite::Connections,
    cfg: &State<Cfg>,
    longitude: Option<&str>,
    latitude: Option<&str>,
    radius: Option<&str>,
) -> Result<Vec<json::Community>> {
    let center = parse_position_params(longitude, latitude)?
        .ok_or(ParameterError::MissingParameter("longitude"))?;
    let radius = usecases::parse_number("radius", radius)?
        .ok_or(ParameterError::MissingParameter("radius"))?;
    let area = usecases::parse_circle(center.lng(), center.lat(), radius)?;
    let communities =
        flows::find_intersecting_communities(&connections, &cfg.read_retry, &area)?;
    Ok(Json(communities.into_iter().map(Into::into).collect()))
}

#[get("/communities/<id>")]
pub fn get_community(
    connections: sqlite::Connections,
    cfg: &State<Cfg>,
    id: &str,
) -> Result<json::Community> {
    let community = flows::get_community(&connections, &cfg.read_retry, id)?;
    Ok(Json(community.into()))
}

#[post("/communities", format = "application/json", data = "<new_community>")]
pub fn post_community(
    connections: sqlite::Connections,
    new_community: JsonResult<json::NewCommunity>,
) -> CreatedResult<json::Community> {
    let new_community = from_json::new_community(new_community?.into_inner());
    let community = flows::create_community(&connections, new_community)?;
    Ok(created(
        format!("/api/communities/{}", community.id),
        community.into(),
    ))
}

#[put("/communities/<id>", format = "application/json", data = "<patch>")]
pub fn put_community(
    connections: sqlite::Connections,
    id: &str,
    patch: JsonResult<json::CommunityPatch>,
) -> Result<json::Community> {
    let patch = from_json::community_patch(patch?.into_inner());
    let community = flows::update_community(&connections, id, patch)?;
    Ok(Json(community.into()))
}

#[delete("/communities/<id>")]
pub fn delete_community(connections: sqlite::Connections, id: &str) -> StatusResult {
    flows::delete_community(&connections, id)?;
    Ok(Status::NoContent)
}

#[post("/communities/<id>/join")]
pub fn post_community_membership(
    connections: sqlite::Connections,
    account: Account,
    id: &str,
) -> Result<json::Membership> {
    let membership = flows::join_community(&connections, id, account.user_id())?;
    Ok(Json(to_json::membership(membership)))
}

#[delete("/communities/<id>/join")]
pub fn delete_community_membership(
    connections: sqlite::Connections,
    account: Account,
    id: &str,
) -> Result<json::Membership> {
    let membership = flows::leave_community(&connections, id, account.user_id())?;
    Ok(Json(to_json::membership(membership)))
}
