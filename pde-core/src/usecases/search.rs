use std::cmp::Ordering;

use super::{community_ids, find_containing_communities, prelude::*};
use crate::text::non_blank;

#[derive(Debug, Clone, Default)]
pub struct SearchRequest<'a> {
    pub text: Option<&'a str>,
    pub updated_since: Option<Timestamp>,
    pub position: Option<GeoPoint>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchResult {
    pub pins: Vec<Tip>,
    pub texts: Vec<Tip>,
}

impl SearchResult {
    pub fn is_empty(&self) -> bool {
        self.pins.is_empty() && self.texts.is_empty()
    }
}

// Newest first, ties are broken by id to keep the order stable.
fn cmp_newest_first(a: &Tip, b: &Tip) -> Ordering {
    b.created_at
        .cmp(&a.created_at)
        .then_with(|| a.id.cmp(&b.id))
}

/// Splits tips by their kind into two deterministically
/// ordered buckets.
pub fn partition_tips(mut tips: Vec<Tip>) -> SearchResult {
    tips.sort_by(cmp_newest_first);
    let (pins, texts) = tips.into_iter().partition(|t| t.kind() == TipKind::Pin);
    SearchResult { pins, texts }
}

pub fn search_tips<R, I>(repo: &R, index: &I, req: SearchRequest) -> Result<SearchResult>
where
    R: CommunityRepo + TipRepo,
    I: TipIndex + ?Sized,
{
    let SearchRequest {
        text,
        updated_since,
        position,
    } = req;

    let community_ids = match position {
        Some(pos) => {
            let scope = community_ids(&find_containing_communities(repo, pos)?);
            if scope.is_empty() {
                log::debug!("No community contains {pos}");
                return Ok(SearchResult::default());
            }
            Some(scope)
        }
        None => None,
    };

    let ids = match non_blank(text) {
        Some(text) => {
            let index_query = TipIndexQuery {
                text: text.to_owned(),
                community_ids: community_ids.clone(),
            };
            let ids = index
                .query_tip_ids(&index_query)
                .map_err(RepoError::Other)?;
            if ids.is_empty() {
                return Ok(SearchResult::default());
            }
            Some(ids)
        }
        None => None,
    };

    let query = TipQuery {
        ids,
        community_ids,
        updated_since,
        kind: None,
    };
    let tips = repo.query_tips(&query)?;
    Ok(partition_tips(tips))
}
