use super::{util::parse_position_params, *};

#[derive(FromForm)]
pub struct SearchParams {
    search: Option<String>,
    longitude: Option<String>,
    latitude: Option<String>,
    #[field(name = "updatedAt")]
    updated_at: Option<String>,
}

#[get("/tips?<params..>")]
pub fn get_tips(
    connections: sqlite::Connections,
    search_engine: tantivy::SearchEngine,
    cfg: &State<Cfg>,
    params: SearchParams,
) -> Result<json::SearchResponse> {
    let SearchParams {
        search,
        longitude,
        latitude,
        updated_at,
    } = params;
    let position = parse_position_params(longitude.as_deref(), latitude.as_deref())?;
    let updated_since = usecases::parse_timestamp(updated_at.as_deref())?;
    let req = usecases::SearchRequest {
        text: search.as_deref(),
        updated_since,
        position,
    };
    let res = flows::search_tips(&connections, &*search_engine, &cfg.read_retry, req)?;
    Ok(Json(to_json::search_response(res)))
}

#[get("/tips/<id>")]
pub fn get_tip(connections: sqlite::Connections, cfg: &State<Cfg>, id: &str) -> Result<json::Tip> {
    let tip = flows::get_tip(&connections, &cfg.read_retry, id)?;
    Ok(Json(tip.into()))
}

#[post("/tips", format = "application/json", data = "<new_tip>")]
pub fn post_tip(
    connections: sqlite::Connections,
    mut search_engine: tantivy::SearchEngine,
    account: Account,
    new_tip: JsonResult<json::NewTip>,
) -> CreatedResult<json::Tip> {
    let new_tip = from_json::new_tip(new_tip?.into_inner());
    let tip = flows::create_tip(
        &connections,
        &mut *search_engine,
        new_tip,
        account.user_id().clone(),
    )?;
    Ok(created(format!("/api/tips/{}", tip.id), tip.into()))
}

#[put("/tips/<id>", format = "application/json", data = "<patch>")]
pub fn put_tip(
    connections: sqlite::Connections,
    mut search_engine: tantivy::SearchEngine,
    id: &str,
    patch: JsonResult<json::TipPatch>,
) -> Result<json::Tip> {
    let patch = from_json::tip_patch(patch?.into_inner());
    let tip = flows::update_tip(&connections, &mut *search_engine, id, patch)?;
    Ok(Json(tip.into()))
}

#[delete("/tips/<id>")]
pub fn delete_tip(
    connections: sqlite::Connections,
    mut search_engine: tantivy::SearchEngine,
    id: &str,
) -> StatusResult {
    flows::delete_tip(&connections, &mut *search_engine, id)?;
    Ok(Status::NoContent)
}

fn rate_tip(
    connections: &sqlite::Connections,
    account: &Account,
    id: &str,
    direction: RatingDirection,
) -> Result<json::Tip> {
    let tip = flows::rate_tip(connections, id, account.user_id(), direction)?;
    Ok(Json(tip.into()))
}

#[post("/tips/<id>/like")]
pub fn post_tip_like(
    connections: sqlite::Connections,
    account: Account,
    id: &str,
) -> Result<json::Tip> {
    rate_tip(&connections, &account, id, RatingDirection::Like)
}

#[post("/tips/<id>/dislike")]
pub fn post_tip_dislike(
    connections: sqlite::Connections,
    account: Account,
    id: &str,
) -> Result<json::Tip> {
    rate_tip(&connections, &account, id, RatingDirection::Dislike)
}

#[post("/tips/<id>/comments", format = "application/json", data = "<comment>")]
pub fn post_tip_comment(
    connections: sqlite::Connections,
    id: &str,
    comment: JsonResult<json::NewComment>,
) -> Result<json::Tip> {
    let json::NewComment { message_id } = comment?.into_inner();
    let tip = flows::add_tip_comment(&connections, id, &message_id.into())?;
    Ok(Json(tip.into()))
}
