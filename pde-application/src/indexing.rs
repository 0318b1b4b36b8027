use super::*;

/// Replaces the contents of the search index with all stored tips.
pub fn reindex_all_tips(
    connections: &sqlite::Connections,
    indexer: &mut dyn TipIndexer,
) -> Result<usize> {
    let db = connections.shared()?;
    let count = usecases::reindex_all_tips(&db, indexer)?;
    info!("Indexed {} tip(s)", count);
    Ok(count)
}
