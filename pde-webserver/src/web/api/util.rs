use super::*;

#[get("/server/version")]
pub fn get_version(version: &State<Version>) -> &'static str {
    version.0
}

/// Longitude and latitude are both optional query parameters.
pub(super) fn parse_position_params(
    longitude: Option<&str>,
    latitude: Option<&str>,
) -> result::Result<Option<GeoPoint>, ParameterError> {
    let longitude = usecases::parse_number("longitude", longitude)?;
    let latitude = usecases::parse_number("latitude", latitude)?;
    usecases::parse_position(longitude, latitude)
}
