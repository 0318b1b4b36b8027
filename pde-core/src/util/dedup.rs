use std::{collections::HashSet, hash::Hash};

use crate::entities::*;

/// Remove duplicate elements, keeping the first occurrence of each.
pub fn dedup<T>(items: Vec<T>) -> Vec<T>
where
    T: Eq + Hash + Clone,
{
    let mut seen = HashSet::with_capacity(items.len());
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}

/// Trim all tags, drop blank tags and remove duplicates.
pub fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    dedup(
        tags.into_iter()
            .map(|t| t.trim().to_owned())
            .filter(|t| !t.is_empty())
            .collect(),
    )
}

/// Restores the set semantics of all collections
/// that must not contain duplicates.
pub trait Dedup {
    fn dedup_sets(self) -> Self;
}

impl Dedup for Community {
    fn dedup_sets(self) -> Self {
        Self {
            tags: normalize_tags(self.tags),
            members: dedup(self.members),
            ..self
        }
    }
}

impl Dedup for Tip {
    fn dedup_sets(self) -> Self {
        let liked_by = dedup(self.liked_by);
        // A user cannot like and dislike the same tip
        let disliked_by = dedup(self.disliked_by)
            .into_iter()
            .filter(|u| !liked_by.contains(u))
            .collect();
        Self {
            tags: normalize_tags(self.tags),
            comments: dedup(self.comments),
            liked_by,
            disliked_by,
            ..self
        }
    }
}
