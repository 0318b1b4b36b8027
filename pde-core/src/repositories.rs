// Low-level database access traits.
// Each repository is responsible for a single entity and
// its relationships. Related entities are only referenced
// by their id and never modified or loaded by another
// repository.

use crate::entities::*;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("The requested object could not be found")]
    NotFound,
    #[error("The object already exists")]
    AlreadyExists,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

type Result<T> = std::result::Result<T, Error>;

pub trait CommunityRepo {
    fn create_community(&self, community: &Community) -> Result<()>;

    // Replaces all fields except the members
    fn update_community(&self, community: &Community) -> Result<()>;

    fn get_community(&self, id: &str) -> Result<Community>;
    fn all_communities(&self) -> Result<Vec<Community>>;

    // Coarse pre-selection by the center of the region
    fn communities_in_bbox(&self, bbox: &MapBbox) -> Result<Vec<Community>>;

    // None if no community exists
    fn max_community_radius(&self) -> Result<Option<Distance>>;

    fn delete_community(&self, id: &str) -> Result<()>;

    // Atomic add-if-absent, returns the resulting number of members
    fn add_community_member(&self, id: &str, user_id: &UserId, at: Timestamp) -> Result<usize>;

    // Atomic remove-if-present, returns the resulting number of members
    fn remove_community_member(&self, id: &str, user_id: &UserId, at: Timestamp)
        -> Result<usize>;
}

#[derive(Debug, Default, Clone)]
pub struct TipQuery {
    // ids = None: Don't filter by id
    // ids = Some(empty vector): Nothing matches
    pub ids: Option<Vec<Id>>,
    // Same semantics as `ids`
    pub community_ids: Option<Vec<Id>>,
    pub updated_since: Option<Timestamp>, // lower bound (inclusive)
    pub kind: Option<TipKind>,
}

pub trait TipRepo {
    fn create_tip(&self, tip: &Tip) -> Result<()>;

    // Replaces all fields except comments, likes and dislikes
    fn update_tip(&self, tip: &Tip) -> Result<()>;

    fn get_tip(&self, id: &str) -> Result<Tip>;
    fn query_tips(&self, query: &TipQuery) -> Result<Vec<Tip>>;
    fn all_tips(&self) -> Result<Vec<Tip>> {
        self.query_tips(&TipQuery::default())
    }

    // Pins whose location center is inside the box
    fn pins_in_bbox(&self, bbox: &MapBbox) -> Result<Vec<Tip>>;

    fn delete_tip(&self, id: &str) -> Result<()>;

    // Atomically moves the user into the set of the given direction
    // and out of the opposite set.
    fn rate_tip(
        &self,
        id: &str,
        user_id: &UserId,
        direction: RatingDirection,
        at: Timestamp,
    ) -> Result<()>;

    // Atomic add-if-absent
    fn add_tip_comment(&self, id: &str, message_id: &MessageId, at: Timestamp) -> Result<()>;
}
