use super::*;
use crate::retry::{retry_read, RetryPolicy};

pub fn create_tip(
    connections: &sqlite::Connections,
    indexer: &mut dyn TipIndexer,
    new_tip: usecases::NewTip,
    author_id: UserId,
) -> Result<Tip> {
    let tip = connections.exclusive()?.transaction(|conn| {
        usecases::create_tip(conn, new_tip, author_id).map_err(|err| {
            warn!("Failed to create tip: {}", err);
            err
        })
    })?;

    // The database is authoritative, the index is rebuilt on startup
    if let Err(err) = usecases::index_tip(&*indexer, &tip).and_then(|_| indexer.flush_index()) {
        error!("Failed to index new tip {}: {}", tip.id, err);
    }

    Ok(tip)
}

/// Needs to be executed exclusively to avoid lost updates.
pub fn update_tip(
    connections: &sqlite::Connections,
    indexer: &mut dyn TipIndexer,
    id: &str,
    patch: usecases::TipPatch,
) -> Result<Tip> {
    let tip = connections.exclusive()?.transaction(|conn| {
        usecases::update_tip(conn, id, patch).map_err(|err| {
            warn!("Failed to update tip {}: {}", id, err);
            err
        })
    })?;

    if let Err(err) = usecases::index_tip(&*indexer, &tip).and_then(|_| indexer.flush_index()) {
        error!("Failed to reindex updated tip {}: {}", tip.id, err);
    }

    Ok(tip)
}

pub fn delete_tip(
    connections: &sqlite::Connections,
    indexer: &mut dyn TipIndexer,
    id: &str,
) -> Result<()> {
    connections
        .exclusive()?
        .transaction(|conn| usecases::delete_tip(conn, id))?;

    let id = Id::from(id);
    if let Err(err) = usecases::unindex_tip(&*indexer, &id).and_then(|_| indexer.flush_index()) {
        error!("Failed to remove deleted tip {} from index: {}", id, err);
    }

    Ok(())
}

pub fn rate_tip(
    connections: &sqlite::Connections,
    id: &str,
    user_id: &UserId,
    direction: RatingDirection,
) -> Result<Tip> {
    Ok(connections
        .exclusive()?
        .transaction(|conn| usecases::rate_tip(conn, id, user_id, direction))?)
}

pub fn add_tip_comment(
    connections: &sqlite::Connections,
    id: &str,
    message_id: &MessageId,
) -> Result<Tip> {
    Ok(connections
        .exclusive()?
        .transaction(|conn| usecases::add_tip_comment(conn, id, message_id))?)
}

pub fn get_tip(connections: &sqlite::Connections, retry: &RetryPolicy, id: &str) -> Result<Tip> {
    retry_read(retry, || {
        let db = connections.shared()?;
        Ok(usecases::get_tip(&db, id)?)
    })
}
