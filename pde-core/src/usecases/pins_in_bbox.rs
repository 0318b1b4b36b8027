use super::{partition_tips, prelude::*};
use crate::{text::non_blank, util::validate::strict_bbox};

/// The corners are given as `"lng,lat"` and are either
/// both present or both absent.
pub fn parse_bbox(sw: Option<&str>, ne: Option<&str>) -> Result<Option<MapBbox>> {
    match (non_blank(sw), non_blank(ne)) {
        (None, None) => Ok(None),
        (Some(sw), Some(ne)) => {
            let sw = sw.parse::<GeoPoint>()?;
            let ne = ne.parse::<GeoPoint>()?;
            Ok(Some(strict_bbox(sw, ne)?))
        }
        _ => Err(Error::IncompleteBbox),
    }
}

/// All pins or only those inside of the bounding box.
pub fn pins_in_bbox<R: TipRepo>(repo: &R, bbox: Option<&MapBbox>) -> Result<Vec<Tip>> {
    let pins = match bbox {
        Some(bbox) => repo.pins_in_bbox(bbox)?,
        None => repo.query_tips(&TipQuery {
            kind: Some(TipKind::Pin),
            ..Default::default()
        })?,
    };
    Ok(partition_tips(pins).pins)
}
