use crate::entities::*;
use anyhow::Result as Fallible;

#[derive(Debug, Default, Clone)]
pub struct TipIndexQuery {
    pub text: String,
    // community_ids = None: Don't restrict the scope
    pub community_ids: Option<Vec<Id>>,
}

pub trait Indexer {
    fn flush_index(&mut self) -> Fallible<()>;
}

pub trait TipIndex {
    /// Fuzzy full-text search over title, description, address
    /// and tags. Returns the ids of all matching tips.
    fn query_tip_ids(&self, query: &TipIndexQuery) -> Fallible<Vec<Id>>;
}

pub trait TipIndexer: Indexer + TipIndex {
    fn add_or_update_tip(&self, tip: &Tip) -> Fallible<()>;
    fn remove_by_id(&self, id: &Id) -> Fallible<()>;
    fn remove_all(&self) -> Fallible<()>;
}
