use serde::{Deserialize, Serialize};

#[cfg(feature = "entity-conversions")]
mod conv;

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, thiserror::Error))]
#[cfg_attr(feature = "extra-derive", error("{message}"))]
pub struct Error {
    pub http_status: u16,
    pub message: String,
}

/// GeoJSON point with `[longitude, latitude]` coordinates.
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct GeoJsonPoint {
    #[serde(rename = "type")]
    pub kind: String,
    pub coordinates: [f64; 2],
}

impl GeoJsonPoint {
    pub const TYPE: &'static str = "Point";

    pub fn new(lng: f64, lat: f64) -> Self {
        Self {
            kind: Self::TYPE.to_owned(),
            coordinates: [lng, lat],
        }
    }

    pub const fn lng(&self) -> f64 {
        self.coordinates[0]
    }

    pub const fn lat(&self) -> f64 {
        self.coordinates[1]
    }
}

/// Circular area, the radius is given in meters.
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct Location {
    pub point: GeoJsonPoint,
    #[serde(default)]
    pub radius: f64,
}

#[rustfmt::skip]
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone))]
#[serde(rename_all = "camelCase")]
pub struct Community {
    pub id           : String,
    pub name         : String,
    pub description  : String,
    pub location     : Location,
    pub tags         : Vec<String>,
    pub members      : Vec<String>,
    pub member_count : usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colour       : Option<String>,
    pub created_at   : String,
    pub updated_at   : String,
}

#[rustfmt::skip]
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone))]
#[serde(rename_all = "camelCase")]
pub struct NewCommunity {
    pub name        : String,
    pub description : Option<String>,
    pub location    : Location,
    #[serde(default)]
    pub tags        : Vec<String>,
    pub colour      : Option<String>,
}

#[rustfmt::skip]
#[derive(Serialize, Deserialize, Default)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone))]
#[serde(rename_all = "camelCase")]
pub struct CommunityPatch {
    pub name        : Option<String>,
    pub description : Option<String>,
    pub location    : Option<Location>,
    pub tags        : Option<Vec<String>>,
    pub colour      : Option<String>,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq, Eq))]
#[serde(rename_all = "camelCase")]
pub struct Membership {
    pub id: String,
    pub member_count: usize,
}

#[rustfmt::skip]
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone))]
#[serde(rename_all = "camelCase")]
pub struct PinDetails {
    pub location   : Location,
    pub address    : String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtype    : Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub picture    : Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colour     : Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date : Option<String>,
    /// Milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration   : Option<u64>,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone))]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TipContent {
    Pin(PinDetails),
    Text,
}

#[rustfmt::skip]
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone))]
#[serde(rename_all = "camelCase")]
pub struct Tip {
    pub id               : String,
    pub author_id        : String,
    pub community_id     : String,
    pub title            : String,
    pub description      : String,
    pub tags             : Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_image : Option<String>,
    pub comments         : Vec<String>,
    pub liked_by         : Vec<String>,
    pub disliked_by      : Vec<String>,
    pub created_at       : String,
    pub updated_at       : String,
    #[serde(flatten)]
    pub content          : TipContent,
}

#[rustfmt::skip]
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone))]
#[serde(rename_all = "camelCase")]
pub struct NewTip {
    #[serde(rename = "type")]
    pub kind             : String,
    pub community_id     : String,
    pub title            : String,
    pub description      : Option<String>,
    #[serde(default)]
    pub tags             : Vec<String>,
    pub background_image : Option<String>,
    pub location         : Option<Location>,
    pub address          : Option<String>,
    pub subtype          : Option<String>,
    pub picture          : Option<String>,
    pub colour           : Option<String>,
    pub start_date       : Option<String>,
    /// Milliseconds
    pub duration         : Option<i64>,
}

#[rustfmt::skip]
#[derive(Serialize, Deserialize, Default)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone))]
#[serde(rename_all = "camelCase")]
pub struct TipPatch {
    pub title            : Option<String>,
    pub description      : Option<String>,
    pub tags             : Option<Vec<String>>,
    pub background_image : Option<String>,
    pub location         : Option<Location>,
    pub address          : Option<String>,
    pub subtype          : Option<String>,
    pub picture          : Option<String>,
    pub colour           : Option<String>,
    pub start_date       : Option<String>,
    /// Milliseconds
    pub duration         : Option<i64>,
}

/// Reference to a message that is stored elsewhere.
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone))]
#[serde(rename_all = "camelCase")]
pub struct NewComment {
    pub message_id: String,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone))]
pub struct SearchResponse {
    pub pins: Vec<Tip>,
    pub texts: Vec<Tip>,
}
