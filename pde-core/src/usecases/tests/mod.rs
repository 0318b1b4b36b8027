use super::*;

use crate::{
    db::{Indexer, TipIndex, TipIndexQuery, TipIndexer},
    repositories::{CommunityRepo, TipQuery, TipRepo},
    text::search_terms,
};

use anyhow::Result as Fallible;
use std::{cell::RefCell, result};

type RepoResult<T> = result::Result<T, RepoError>;

#[derive(Default)]
pub struct MockDb {
    pub communities: RefCell<Vec<Community>>,
    pub tips: RefCell<Vec<Tip>>,
}

fn add_if_absent<T: PartialEq + Clone>(items: &mut Vec<T>, item: &T) {
    if !items.contains(item) {
        items.push(item.clone());
    }
}

fn matches_ids(ids: Option<&Vec<Id>>, id: &Id) -> bool {
    ids.map(|ids| ids.contains(id)).unwrap_or(true)
}

impl CommunityRepo for MockDb {
    fn create_community(&self, community: &Community) -> RepoResult<()> {
        let mut communities = self.communities.borrow_mut();
        if communities.iter().any(|c| c.id == community.id) {
            return Err(RepoError::AlreadyExists);
        }
        communities.push(community.clone());
        Ok(())
    }

    fn update_community(&self, community: &Community) -> RepoResult<()> {
        let mut communities = self.communities.borrow_mut();
        let c = communities
            .iter_mut()
            .find(|c| c.id == community.id)
            .ok_or(RepoError::NotFound)?;
        let members = std::mem::take(&mut c.members);
        *c = Community {
            members,
            ..community.clone()
        };
        Ok(())
    }

    fn get_community(&self, id: &str) -> RepoResult<Community> {
        self.communities
            .borrow()
            .iter()
            .find(|c| c.id.as_str() == id)
            .cloned()
            .ok_or(RepoError::NotFound)
    }

    fn all_communities(&self) -> RepoResult<Vec<Community>> {
        Ok(self.communities.borrow().clone())
    }

    fn communities_in_bbox(&self, bbox: &MapBbox) -> RepoResult<Vec<Community>> {
        Ok(self
            .communities
            .borrow()
            .iter()
            .filter(|c| bbox.contains_point(c.region.center))
            .cloned()
            .collect())
    }

    fn max_community_radius(&self) -> RepoResult<Option<Distance>> {
        Ok(self
            .communities
            .borrow()
            .iter()
            .map(|c| c.region.radius)
            .reduce(|a, b| if b.to_meters() > a.to_meters() { b } else { a }))
    }

    fn delete_community(&self, id: &str) -> RepoResult<()> {
        let mut communities = self.communities.borrow_mut();
        let len = communities.len();
        communities.retain(|c| c.id.as_str() != id);
        if communities.len() == len {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }

    fn add_community_member(&self, id: &str, user_id: &UserId, at: Timestamp) -> RepoResult<usize> {
        let mut communities = self.communities.borrow_mut();
        let c = communities
            .iter_mut()
            .find(|c| c.id.as_str() == id)
            .ok_or(RepoError::NotFound)?;
        add_if_absent(&mut c.members, user_id);
        c.updated_at = at;
        Ok(c.members.len())
    }

    fn remove_community_member(
        &self,
        id: &str,
        user_id: &UserId,
        at: Timestamp,
    ) -> RepoResult<usize> {
        let mut communities = self.communities.borrow_mut();
        let c = communities
            .iter_mut()
            .find(|c| c.id.as_str() == id)
            .ok_or(RepoError::NotFound)?;
        c.members.retain(|m| m != user_id);
        c.updated_at = at;
        Ok(c.members.len())
    }
}

impl MockDb {
    fn modify_tip<F>(&self, id: &str, at: Timestamp, f: F) -> RepoResult<()>
    where
        F: FnOnce(&mut Tip),
    {
        let mut tips = self.tips.borrow_mut();
        let tip = tips
            .iter_mut()
            .find(|t| t.id.as_str() == id)
            .ok_or(RepoError::NotFound)?;
        f(tip);
        tip.updated_at = at;
        Ok(())
    }
}

impl TipRepo for MockDb {
    fn create_tip(&self, tip: &Tip) -> RepoResult<()> {
        let mut tips = self.tips.borrow_mut();
        if tips.iter().any(|t| t.id == tip.id) {
            return Err(RepoError::AlreadyExists);
        }
        tips.push(tip.clone());
        Ok(())
    }

    fn update_tip(&self, tip: &Tip) -> RepoResult<()> {
        let mut tips = self.tips.borrow_mut();
        let t = tips
            .iter_mut()
            .find(|t| t.id == tip.id)
            .ok_or(RepoError::NotFound)?;
        *t = Tip {
            comments: std::mem::take(&mut t.comments),
            liked_by: std::mem::take(&mut t.liked_by),
            disliked_by: std::mem::take(&mut t.disliked_by),
            ..tip.clone()
        };
        Ok(())
    }

    fn get_tip(&self, id: &str) -> RepoResult<Tip> {
        self.tips
            .borrow()
            .iter()
            .find(|t| t.id.as_str() == id)
            .cloned()
            .ok_or(RepoError::NotFound)
    }

    fn query_tips(&self, query: &TipQuery) -> RepoResult<Vec<Tip>> {
        Ok(self
            .tips
            .borrow()
            .iter()
            .filter(|t| matches_ids(query.ids.as_ref(), &t.id))
            .filter(|t| matches_ids(query.community_ids.as_ref(), &t.community_id))
            .filter(|t| query.updated_since.map(|s| t.updated_at >= s).unwrap_or(true))
            .filter(|t| query.kind.map(|k| t.kind() == k).unwrap_or(true))
            .cloned()
            .collect())
    }

    fn pins_in_bbox(&self, bbox: &MapBbox) -> RepoResult<Vec<Tip>> {
        Ok(self
            .tips
            .borrow()
            .iter()
            .filter(|t| {
                t.location()
                    .map(|l| bbox.contains_point(l.center))
                    .unwrap_or(false)
            })
            .cloned()
            .collect())
    }

    fn delete_tip(&self, id: &str) -> RepoResult<()> {
        let mut tips = self.tips.borrow_mut();
        let len = tips.len();
        tips.retain(|t| t.id.as_str() != id);
        if tips.len() == len {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }

    fn rate_tip(
        &self,
        id: &str,
        user_id: &UserId,
        direction: RatingDirection,
        at: Timestamp,
    ) -> RepoResult<()> {
        self.modify_tip(id, at, |tip| {
            let (add_to, remove_from) = match direction {
                RatingDirection::Like => (&mut tip.liked_by, &mut tip.disliked_by),
                RatingDirection::Dislike => (&mut tip.disliked_by, &mut tip.liked_by),
            };
            add_if_absent(add_to, user_id);
            remove_from.retain(|u| u != user_id);
        })
    }

    fn add_tip_comment(&self, id: &str, message_id: &MessageId, at: Timestamp) -> RepoResult<()> {
        self.modify_tip(id, at, |tip| add_if_absent(&mut tip.comments, message_id))
    }
}

/// Case insensitive prefix matching of words instead of
/// fuzzy full-text search.
#[derive(Default)]
pub struct MockIndex {
    tips: RefCell<Vec<(Id, Id, Vec<String>)>>,
}

impl MockIndex {
    pub fn from_db(db: &MockDb) -> Self {
        let index = Self::default();
        for tip in db.tips.borrow().iter() {
            index.add_or_update_tip(tip).unwrap();
        }
        index
    }
}

impl Indexer for MockIndex {
    fn flush_index(&mut self) -> Fallible<()> {
        Ok(())
    }
}

impl TipIndex for MockIndex {
    fn query_tip_ids(&self, query: &TipIndexQuery) -> Fallible<Vec<Id>> {
        let terms = search_terms(&query.text);
        Ok(self
            .tips
            .borrow()
            .iter()
            .filter(|(_, community_id, _)| {
                matches_ids(query.community_ids.as_ref(), community_id)
            })
            .filter(|(_, _, words)| {
                terms
                    .iter()
                    .any(|term| words.iter().any(|w| w.starts_with(term.as_str())))
            })
            .map(|(id, _, _)| id.clone())
            .collect())
    }
}

impl TipIndexer for MockIndex {
    fn add_or_update_tip(&self, tip: &Tip) -> Fallible<()> {
        self.remove_by_id(&tip.id)?;
        let mut words = search_terms(&tip.title);
        words.extend(search_terms(&tip.description));
        words.extend(search_terms(tip.address().unwrap_or_default()));
        words.extend(tip.tags.iter().map(|t| t.to_lowercase()));
        self.tips
            .borrow_mut()
            .push((tip.id.clone(), tip.community_id.clone(), words));
        Ok(())
    }

    fn remove_by_id(&self, id: &Id) -> Fallible<()> {
        self.tips.borrow_mut().retain(|(tip_id, _, _)| tip_id != id);
        Ok(())
    }

    fn remove_all(&self) -> Fallible<()> {
        self.tips.borrow_mut().clear();
        Ok(())
    }
}
