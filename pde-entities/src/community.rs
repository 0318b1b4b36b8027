use crate::{
    geo::{Circle, GeoPoint},
    id::{Id, UserId},
    time::Timestamp,
};

/// A group of users whose area of relevance is a circular region.
#[derive(Debug, Clone, PartialEq)]
pub struct Community {
    pub id: Id,
    pub name: String,
    pub description: String,
    pub region: Circle,
    pub tags: Vec<String>,
    pub members: Vec<UserId>,
    pub colour: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Community {
    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    pub fn is_member(&self, user_id: &UserId) -> bool {
        self.members.contains(user_id)
    }

    pub fn contains_point(&self, pt: GeoPoint) -> bool {
        self.region.contains_point(pt)
    }

    pub fn intersects(&self, area: &Circle) -> bool {
        self.region.intersects(area)
    }
}
