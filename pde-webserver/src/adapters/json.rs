pub use pde_boundary::*;

use crate::core::usecases;

pub mod from_json {
    //! JSON -> Use case parameters

    use super::*;

    // NOTE:
    // We cannot impl From<T> here, because the JSON structs
    // and the use case parameters both are outside this crate.

    pub fn new_location(from: Location) -> usecases::NewLocation {
        let Location { point, radius } = from;
        usecases::NewLocation {
            longitude: point.lng(),
            latitude: point.lat(),
            radius,
        }
    }

    pub fn new_community(from: NewCommunity) -> usecases::NewCommunity {
        let NewCommunity {
            name,
            description,
            location,
            tags,
            colour,
        } = from;
        let usecases::NewLocation {
            longitude,
            latitude,
            radius,
        } = new_location(location);
        usecases::NewCommunity {
            name,
            description,
            longitude,
            latitude,
            radius,
            tags,
            colour,
        }
    }

    pub fn community_patch(from: CommunityPatch) -> usecases::CommunityPatch {
        let CommunityPatch {
            name,
            description,
            location,
            tags,
            colour,
        } = from;
        let location = location.map(new_location);
        usecases::CommunityPatch {
            name,
            description,
            longitude: location.map(|l| l.longitude),
            latitude: location.map(|l| l.latitude),
            radius: location.map(|l| l.radius),
            tags,
            colour,
        }
    }

    pub fn new_tip(from: NewTip) -> usecases::NewTip {
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
            duration,
        } = from;
        usecases::NewTip {
            kind,
            community_id,
            title,
            description,
            tags,
            background_image,
            location: location.map(new_location),
            address,
            subtype,
            picture,
            colour,
            start_date,
            duration_ms: duration,
        }
    }

    pub fn tip_patch(from: TipPatch) -> usecases::TipPatch {
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
            duration,
        } = from;
        usecases::TipPatch {
            title,
            description,
            tags,
            background_image,
            location: location.map(new_location),
            address,
            subtype,
            picture,
            colour,
            start_date,
            duration_ms: duration,
        }
    }
}

pub mod to_json {
    //! Use case results -> JSON

    use super::*;

    pub fn search_response(from: usecases::SearchResult) -> SearchResponse {
        let usecases::SearchResult { pins, texts } = from;
        SearchResponse {
            pins: pins.into_iter().map(Into::into).collect(),
            texts: texts.into_iter().map(Into::into).collect(),
        }
    }

    pub fn membership(from: usecases::Membership) -> Membership {
        let usecases::Membership {
            community_id,
            member_count,
        } = from;
        Membership {
            id: community_id.into(),
            member_count,
        }
    }
}
