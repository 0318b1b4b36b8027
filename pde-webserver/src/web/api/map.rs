use super::*;

#[get("/map?<southwest>&<northeast>")]
pub fn get_pins_in_bbox(
    connections: sqlite::Connections,
    cfg: &State<Cfg>,
    southwest: Option<&str>,
    northeast: Option<&str>,
) -> Result<Vec<json::Tip>> {
    let bbox = usecases::parse_bbox(southwest, northeast)?;
    let pins = flows::pins_in_bbox(&connections, &cfg.read_retry, bbox.as_ref())?;
    Ok(Json(pins.into_iter().map(Into::into).collect()))
}
