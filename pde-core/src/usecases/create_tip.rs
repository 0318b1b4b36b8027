use super::{parse_circle, parse_timestamp, prelude::*};
use crate::{
    text::non_blank,
    util::{
        dedup::Dedup,
        validate::{is_valid_duration_ms, TipInvalidation, Validate},
    },
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewLocation {
    pub longitude: f64,
    pub latitude: f64,
    /// Meters
    pub radius: f64,
}

#[rustfmt::skip]
#[derive(Debug, Clone, Default)]
pub struct NewTip {
    pub kind             : String,
    pub community_id     : String,
    pub title            : String,
    pub description      : Option<String>,
    pub tags             : Vec<String>,
    pub background_image : Option<String>,
    pub location         : Option<NewLocation>,
    pub address          : Option<String>,
    pub subtype          : Option<String>,
    pub picture          : Option<String>,
    pub colour           : Option<String>,
    pub start_date       : Option<String>,
    pub duration_ms      : Option<i64>,
}

#[rustfmt::skip]
#[derive(Debug, Clone, Default)]
pub(crate) struct PinFields {
    pub location    : Option<NewLocation>,
    pub address     : Option<String>,
    pub subtype     : Option<String>,
    pub picture     : Option<String>,
    pub colour      : Option<String>,
    pub start_date  : Option<String>,
    pub duration_ms : Option<i64>,
}

impl PinFields {
    /// Name of the first field that is present.
    pub(crate) fn first_present(&self) -> Option<&'static str> {
        let Self {
            location,
            address,
            subtype,
            picture,
            colour,
            start_date,
            duration_ms,
        } = self;
        if location.is_some() {
            Some("location")
        } else if address.is_some() {
            Some("address")
        } else if subtype.is_some() {
            Some("subtype")
        } else if picture.is_some() {
            Some("picture")
        } else if colour.is_some() {
            Some("colour")
        } else if start_date.is_some() {
            Some("startDate")
        } else if duration_ms.is_some() {
            Some("duration")
        } else {
            None
        }
    }
}

pub(crate) fn parse_duration_ms(duration_ms: Option<i64>) -> Result<Option<u64>> {
    match duration_ms {
        None => Ok(None),
        Some(d) if is_valid_duration_ms(d) => Ok(Some(d.unsigned_abs())),
        Some(d) => Err(Error::Duration(d)),
    }
}

fn new_pin_details(fields: PinFields) -> Result<PinDetails> {
    let PinFields {
        location,
        address,
        subtype,
        picture,
        colour,
        start_date,
        duration_ms,
    } = fields;
    let NewLocation {
        longitude,
        latitude,
        radius,
    } = location.ok_or(Error::MissingLocation)?;
    let location = parse_circle(longitude, latitude, radius)?;
    let address = non_blank(address.as_deref())
        .ok_or(TipInvalidation::MissingAddress)?
        .to_owned();
    Ok(PinDetails {
        location,
        address,
        subtype,
        picture,
        colour,
        start_date: parse_timestamp(start_date.as_deref())?,
        duration_ms: parse_duration_ms(duration_ms)?,
    })
}

pub fn prepare_new_tip(new_tip: NewTip, author_id: UserId, now: Timestamp) -> Result<Tip> {
    let NewTip {
        kind,
        community_id,
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
    } = new_tip;
    let kind = kind
        .trim()
        .parse::<TipKind>()
        .map_err(|_| Error::TipKind(kind))?;
    let pin_fields = PinFields {
        location,
        address,
        subtype,
        picture,
        colour,
        start_date,
        duration_ms,
    };
    let content = match kind {
        TipKind::Pin => TipContent::Pin(new_pin_details(pin_fields)?),
        TipKind::Text => {
            if let Some(field) = pin_fields.first_present() {
                return Err(Error::PinOnlyField(field));
            }
            TipContent::Text
        }
    };
    let tip = Tip {
        id: Id::new(),
        author_id,
        community_id: community_id.trim().into(),
        title: title.trim().to_owned(),
        description: description.unwrap_or_default().trim().to_owned(),
        tags,
        background_image,
        comments: vec![],
        liked_by: vec![],
        disliked_by: vec![],
        created_at: now,
        updated_at: now,
        content,
    }
    .dedup_sets();
    tip.validate()?;
    Ok(tip)
}

pub fn create_tip<R>(repo: &R, new_tip: NewTip, author_id: UserId) -> Result<Tip>
where
    R: CommunityRepo + TipRepo,
{
    let tip = prepare_new_tip(new_tip, author_id, Timestamp::now())?;
    // Tips can only be posted into existing communities
    repo.get_community(tip.community_id.as_str())?;
    repo.create_tip(&tip)?;
    Ok(tip)
}
