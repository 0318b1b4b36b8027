use crate::entities::*;
use thiserror::Error;

pub const MAX_TITLE_LEN: usize = 200;
pub const MAX_NAME_LEN: usize = 200;
pub const MAX_TIP_DESCRIPTION_LEN: usize = 5_000;
pub const MAX_COMMUNITY_DESCRIPTION_LEN: usize = 2_000;
pub const MAX_ADDRESS_LEN: usize = 500;

pub trait Validate {
    type Error;
    fn validate(&self) -> Result<(), Self::Error>;
}

fn exceeds(s: &str, max_len: usize) -> bool {
    s.chars().count() > max_len
}

pub fn is_valid_radius(radius: Distance) -> bool {
    radius.is_valid()
}

pub fn is_valid_duration_ms(duration_ms: i64) -> bool {
    duration_ms >= 0
}

#[derive(Debug, Error, PartialEq)]
pub enum BboxInvalidation {
    #[error("south-west longitude {0} must be less than north-east longitude {1}")]
    Longitude(f64, f64),
    #[error("south-west latitude {0} must be less than north-east latitude {1}")]
    Latitude(f64, f64),
}

/// Bounding boxes of a map viewport must not be
/// empty nor wrap around the antimeridian.
pub fn strict_bbox(sw: GeoPoint, ne: GeoPoint) -> Result<MapBbox, BboxInvalidation> {
    if sw.lng() >= ne.lng() {
        return Err(BboxInvalidation::Longitude(sw.lng(), ne.lng()));
    }
    if sw.lat() >= ne.lat() {
        return Err(BboxInvalidation::Latitude(sw.lat(), ne.lat()));
    }
    Ok(MapBbox::new(sw, ne))
}

#[derive(Debug, Error, PartialEq)]
pub enum CommunityInvalidation {
    #[error("The name must not be empty or longer than 200 characters")]
    Name,
    #[error("The description must not be longer than 2000 characters")]
    Description,
    #[error("The radius must be a non-negative number of meters")]
    Radius,
}

impl Validate for Community {
    type Error = CommunityInvalidation;
    fn validate(&self) -> Result<(), Self::Error> {
        if self.name.trim().is_empty() || exceeds(&self.name, MAX_NAME_LEN) {
            return Err(Self::Error::Name);
        }
        if exceeds(&self.description, MAX_COMMUNITY_DESCRIPTION_LEN) {
            return Err(Self::Error::Description);
        }
        if !is_valid_radius(self.region.radius) {
            return Err(Self::Error::Radius);
        }
        Ok(())
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum TipInvalidation {
    #[error("The title must not be empty or longer than 200 characters")]
    Title,
    #[error("The description must not be longer than 5000 characters")]
    Description,
    #[error("Missing author")]
    Author,
    #[error("Missing community")]
    Community,
    #[error("A pin requires an address")]
    MissingAddress,
    #[error("The address must not be longer than 500 characters")]
    Address,
    #[error("The radius must be a non-negative number of meters")]
    Radius,
}

impl Validate for Tip {
    type Error = TipInvalidation;
    fn validate(&self) -> Result<(), Self::Error> {
        if self.title.trim().is_empty() || exceeds(&self.title, MAX_TITLE_LEN) {
            return Err(Self::Error::Title);
        }
        if exceeds(&self.description, MAX_TIP_DESCRIPTION_LEN) {
            return Err(Self::Error::Description);
        }
        if !self.author_id.is_valid() {
            return Err(Self::Error::Author);
        }
        if !self.community_id.is_valid() {
            return Err(Self::Error::Community);
        }
        match &self.content {
            TipContent::Pin(pin) => {
                if pin.address.trim().is_empty() {
                    return Err(Self::Error::MissingAddress);
                }
                if exceeds(&pin.address, MAX_ADDRESS_LEN) {
                    return Err(Self::Error::Address);
                }
                if !is_valid_radius(pin.location.radius) {
                    return Err(Self::Error::Radius);
                }
            }
            TipContent::Text => {}
        }
        Ok(())
    }
}
