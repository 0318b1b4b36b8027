use strum::{AsRefStr, Display, EnumString, IntoStaticStr};

use crate::{
    geo::Circle,
    id::{Id, MessageId, UserId},
    time::Timestamp,
};

/// Discriminator of the [`TipContent`] variants.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, AsRefStr, Display, EnumString, IntoStaticStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum TipKind {
    Pin,
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum RatingDirection {
    Like,
    Dislike,
}

/// Fields that only exist for tips that are placed on the map.
#[derive(Debug, Clone, PartialEq)]
pub struct PinDetails {
    pub location: Circle,
    pub address: String,
    pub subtype: Option<String>,
    pub picture: Option<String>,
    pub colour: Option<String>,
    pub start_date: Option<Timestamp>,
    pub duration_ms: Option<u64>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TipContent {
    Pin(PinDetails),
    Text,
}

impl TipContent {
    pub const fn kind(&self) -> TipKind {
        match self {
            Self::Pin(_) => TipKind::Pin,
            Self::Text => TipKind::Text,
        }
    }

    pub const fn pin(&self) -> Option<&PinDetails> {
        match self {
            Self::Pin(details) => Some(details),
            Self::Text => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tip {
    pub id: Id,
    pub author_id: UserId,
    pub community_id: Id,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub background_image: Option<String>,
    pub comments: Vec<MessageId>,
    pub liked_by: Vec<UserId>,
    pub disliked_by: Vec<UserId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub content: TipContent,
}

impl Tip {
    pub const fn kind(&self) -> TipKind {
        self.content.kind()
    }

    pub fn location(&self) -> Option<&Circle> {
        self.content.pin().map(|pin| &pin.location)
    }

    pub fn address(&self) -> Option<&str> {
        self.content.pin().map(|pin| pin.address.as_str())
    }
}
