use super::prelude::*;
use anyhow::Result as Fallible;

pub fn index_tip<I: TipIndexer + ?Sized>(indexer: &I, tip: &Tip) -> Fallible<()> {
    indexer.add_or_update_tip(tip)
}

pub fn unindex_tip<I: TipIndexer + ?Sized>(indexer: &I, id: &Id) -> Fallible<()> {
    indexer.remove_by_id(id)
}

/// Rebuilds the search index from all stored tips
/// and returns the number of indexed tips.
pub fn reindex_all_tips<R, I>(repo: &R, indexer: &mut I) -> Result<usize>
where
    R: TipRepo,
    I: TipIndexer + ?Sized,
{
    let tips = repo.all_tips()?;
    indexer.remove_all().map_err(RepoError::Other)?;
    let mut count = 0;
    for tip in &tips {
        match index_tip(indexer, tip) {
            Ok(()) => count += 1,
            Err(err) => log::warn!("Failed to index tip {}: {}", tip.id, err),
        }
    }
    indexer.flush_index().map_err(RepoError::Other)?;
    Ok(count)
}
