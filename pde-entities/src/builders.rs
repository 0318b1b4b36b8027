pub trait Builder {
    type Build;
    fn build() -> Self::Build;
}

pub use self::{community_builder::*, tip_builder::*};

use crate::geo::*;

fn default_region() -> Circle {
    Circle::new(GeoPoint::from_lng_lat_deg(0.0, 0.0), Distance::from_meters(1_000.0))
}

pub mod community_builder {

    use super::*;
    use crate::{community::*, time::Timestamp};

    #[derive(Debug)]
    pub struct CommunityBuild {
        community: Community,
    }

    impl CommunityBuild {
        pub fn id(mut self, id: &str) -> Self {
            self.community.id = id.into();
            self
        }
        pub fn name(mut self, name: &str) -> Self {
            self.community.name = name.into();
            self
        }
        pub fn region(mut self, center: GeoPoint, radius_meters: f64) -> Self {
            self.community.region = Circle::new(center, Distance::from_meters(radius_meters));
            self
        }
        pub fn tags(mut self, tags: Vec<impl Into<String>>) -> Self {
            self.community.tags = tags.into_iter().map(|x| x.into()).collect();
            self
        }
        pub fn members(mut self, members: Vec<&str>) -> Self {
            self.community.members = members.into_iter().map(Into::into).collect();
            self
        }
        pub fn updated_at(mut self, ts: Timestamp) -> Self {
            self.community.updated_at = ts;
            self
        }
        pub fn finish(self) -> Community {
            self.community
        }
    }

    impl Builder for Community {
        type Build = CommunityBuild;
        fn build() -> CommunityBuild {
            CommunityBuild {
                community: Community {
                    id: "".into(),
                    name: "".into(),
                    description: "".into(),
                    region: default_region(),
                    tags: vec![],
                    members: vec![],
                    colour: None,
                    created_at: Timestamp::from_millis(0),
                    updated_at: Timestamp::from_millis(0),
                },
            }
        }
    }
}

pub mod tip_builder {

    use super::*;
    use crate::{time::Timestamp, tip::*};

    #[derive(Debug)]
    pub struct TipBuild {
        tip: Tip,
    }

    impl TipBuild {
        pub fn id(mut self, id: &str) -> Self {
            self.tip.id = id.into();
            self
        }
        pub fn author(mut self, author_id: &str) -> Self {
            self.tip.author_id = author_id.into();
            self
        }
        pub fn community(mut self, community_id: &str) -> Self {
            self.tip.community_id = community_id.into();
            self
        }
        pub fn title(mut self, title: &str) -> Self {
            self.tip.title = title.into();
            self
        }
        pub fn description(mut self, desc: &str) -> Self {
            self.tip.description = desc.into();
            self
        }
        pub fn tags(mut self, tags: Vec<impl Into<String>>) -> Self {
            self.tip.tags = tags.into_iter().map(|x| x.into()).collect();
            self
        }
        pub fn liked_by(mut self, users: Vec<&str>) -> Self {
            self.tip.liked_by = users.into_iter().map(Into::into).collect();
            self
        }
        pub fn pin(mut self, center: GeoPoint, address: &str) -> Self {
            self.tip.content = TipContent::Pin(PinDetails {
                location: Circle::new(center, Distance::default()),
                address: address.into(),
                subtype: None,
                picture: None,
                colour: None,
                start_date: None,
                duration_ms: None,
            });
            self
        }
        pub fn text(mut self) -> Self {
            self.tip.content = TipContent::Text;
            self
        }
        pub fn created_at(mut self, ts: Timestamp) -> Self {
            self.tip.created_at = ts;
            self
        }
        pub fn updated_at(mut self, ts: Timestamp) -> Self {
            self.tip.updated_at = ts;
            self
        }
        pub fn finish(self) -> Tip {
            self.tip
        }
    }

    impl Builder for Tip {
        type Build = TipBuild;
        fn build() -> TipBuild {
            TipBuild {
                tip: Tip {
                    id: "".into(),
                    author_id: "".into(),
                    community_id: "".into(),
                    title: "".into(),
                    description: "".into(),
                    tags: vec![],
                    background_image: None,
                    comments: vec![],
                    liked_by: vec![],
                    disliked_by: vec![],
                    created_at: Timestamp::from_millis(0),
                    updated_at: Timestamp::from_millis(0),
                    content: TipContent::Text,
                },
            }
        }
    }
}
