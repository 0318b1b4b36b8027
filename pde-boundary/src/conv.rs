use super::*;
use pde_entities as e;

fn strings<T: Into<String>>(from: Vec<T>) -> Vec<String> {
    from.into_iter().map(Into::into).collect()
}

impl From<e::geo::GeoPoint> for GeoJsonPoint {
    fn from(from: e::geo::GeoPoint) -> Self {
        Self::new(from.lng(), from.lat())
    }
}

impl From<e::geo::Circle> for Location {
    fn from(from: e::geo::Circle) -> Self {
        Self {
            point: from.center.into(),
            radius: from.radius.to_meters(),
        }
    }
}

impl From<e::community::Community> for Community {
    fn from(from: e::community::Community) -> Self {
        let member_count = from.member_count();
        let e::community::Community {
            id,
            name,
            description,
            region,
            tags,
            members,
            colour,
            created_at,
            updated_at,
        } = from;
        Self {
            id: id.into(),
            name,
            description,
            location: region.into(),
            tags,
            members: strings(members),
            member_count,
            colour,
            created_at: created_at.to_string(),
            updated_at: updated_at.to_string(),
        }
    }
}

impl From<e::tip::PinDetails> for PinDetails {
    fn from(from: e::tip::PinDetails) -> Self {
        let e::tip::PinDetails {
            location,
            address,
            subtype,
            picture,
            colour,
            start_date,
            duration_ms,
        } = from;
        Self {
            location: location.into(),
            address,
            subtype,
            picture,
            colour,
            start_date: start_date.map(|ts| ts.to_string()),
            duration: duration_ms,
        }
    }
}

impl From<e::tip::TipContent> for TipContent {
    fn from(from: e::tip::TipContent) -> Self {
        match from {
            e::tip::TipContent::Pin(pin) => Self::Pin(pin.into()),
            e::tip::TipContent::Text => Self::Text,
        }
    }
}

impl From<e::tip::Tip> for Tip {
    fn from(from: e::tip::Tip) -> Self {
        let e::tip::Tip {
            id,
            author_id,
            community_id,
            title,
            description,
            tags,
            background_image,
            comments,
            liked_by,
            disliked_by,
            created_at,
            updated_at,
            content,
        } = from;
        Self {
            id: id.into(),
            author_id: author_id.into(),
            community_id: community_id.into(),
            title,
            description,
            tags,
            background_image,
            comments: strings(comments),
            liked_by: strings(liked_by),
            disliked_by: strings(disliked_by),
            created_at: created_at.to_string(),
            updated_at: updated_at.to_string(),
            content: content.into(),
        }
    }
}
