use super::{
    create_tip::{parse_duration_ms, NewLocation, PinFields},
    parse_circle, parse_timestamp,
    prelude::*,
};
use crate::util::{dedup::Dedup, stamp::Stamp, validate::Validate};

/// Fields that are left unchanged if absent.
///
/// The kind, the author and the community of a tip
/// cannot be changed.
#[rustfmt::skip]
#[derive(Debug, Clone, Default)]
pub struct TipPatch {
    pub title            : Option<String>,
    pub description      : Option<String>,
    pub tags             : Option<Vec<String>>,
    pub background_image : Option<String>,
    pub location         : Option<NewLocation>,
    pub address          : Option<String>,
    pub subtype          : Option<String>,
    pub picture          : Option<String>,
    pub colour           : Option<String>,
    pub start_date       : Option<String>,
    pub duration_ms      : Option<i64>,
}

fn patch_pin_details(pin: PinDetails, fields: PinFields) -> Result<PinDetails> {
    let PinFields {
        location,
        address,
        subtype,
        picture,
        colour,
        start_date,
        duration_ms,
    } = fields;
    let location = match location {
        Some(NewLocation {
            longitude,
            latitude,
            radius,
        }) => parse_circle(longitude, latitude, radius)?,
        None => pin.location,
    };
    Ok(PinDetails {
        location,
        address: address.map(|a| a.trim().to_owned()).unwrap_or(pin.address),
        subtype: subtype.or(pin.subtype),
        picture: picture.or(pin.picture),
        colour: colour.or(pin.colour),
        start_date: parse_timestamp(start_date.as_deref())?.or(pin.start_date),
        duration_ms: parse_duration_ms(duration_ms)?.or(pin.duration_ms),
    })
}

pub fn apply_tip_patch(tip: Tip, patch: TipPatch, now: Timestamp) -> Result<Tip> {
    let TipPatch {
        title,
        description,
        tags,
        background_image,
        location,
        address,
        subtype,
        picture,
        colour,
        start_date,
        duration_ms,
    } = patch;
    let pin_fields = PinFields {
        location,
        address,
        subtype,
        picture,
        colour,
        start_date,
        duration_ms,
    };
    let content = match tip.content {
        TipContent::Pin(pin) => TipContent::Pin(patch_pin_details(pin, pin_fields)?),
        TipContent::Text => {
            if let Some(field) = pin_fields.first_present() {
                return Err(Error::PinOnlyField(field));
            }
            TipContent::Text
        }
    };
    let tip = Tip {
        title: title.map(|t| t.trim().to_owned()).unwrap_or(tip.title),
        description: description
            .map(|d| d.trim().to_owned())
            .unwrap_or(tip.description),
        tags: tags.unwrap_or(tip.tags),
        background_image: background_image.or(tip.background_image),
        content,
        ..tip
    }
    .dedup_sets()
    .stamp_updated(now);
    tip.validate()?;
    Ok(tip)
}

/// Needs to be executed exclusively to avoid lost updates.
pub fn update_tip<R: TipRepo>(repo: &R, id: &str, patch: TipPatch) -> Result<Tip> {
    let old = repo.get_tip(id)?;
    let tip = apply_tip_patch(old, patch, Timestamp::now())?;
    repo.update_tip(&tip)?;
    Ok(tip)
}
