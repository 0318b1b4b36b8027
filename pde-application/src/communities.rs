use super::*;
use crate::retry::{retry_read, RetryPolicy};

pub fn create_community(
    connections: &sqlite::Connections,
    new_community: usecases::NewCommunity,
) -> Result<Community> {
    let community = connections.exclusive()?.transaction(|conn| {
        usecases::create_community(conn, new_community).map_err(|err| {
            warn!("Failed to create community: {}", err);
            err
        })
    })?;
    info!("Created community {}", community.id);
    Ok(community)
}

pub fn update_community(
    connections: &sqlite::Connections,
    id: &str,
    patch: usecases::CommunityPatch,
) -> Result<Community> {
    Ok(connections
        .exclusive()?
        .transaction(|conn| usecases::update_community(conn, id, patch))?)
}

pub fn delete_community(connections: &sqlite::Connections, id: &str) -> Result<()> {
    connections
        .exclusive()?
        .transaction(|conn| usecases::delete_community(conn, id))?;
    info!("Deleted community {}", id);
    Ok(())
}

pub fn join_community(
    connections: &sqlite::Connections,
    id: &str,
    user_id: &UserId,
) -> Result<usecases::Membership> {
    Ok(connections
        .exclusive()?
        .transaction(|conn| usecases::join_community(conn, id, user_id))?)
}

pub fn leave_community(
    connections: &sqlite::Connections,
    id: &str,
    user_id: &UserId,
) -> Result<usecases::Membership> {
    Ok(connections
        .exclusive()?
        .transaction(|conn| usecases::leave_community(conn, id, user_id))?)
}

pub fn get_community(
    connections: &sqlite::Connections,
    retry: &RetryPolicy,
    id: &str,
) -> Result<Community> {
    retry_read(retry, || {
        let db = connections.shared()?;
        Ok(usecases::get_community(&db, id)?)
    })
}

pub fn query_communities(
    connections: &sqlite::Connections,
    retry: &RetryPolicy,
    pos: Option<GeoPoint>,
) -> Result<Vec<Community>> {
    retry_read(retry, || {
        let db = connections.shared()?;
        Ok(usecases::query_communities(&db, pos)?)
    })
}

pub fn find_intersecting_communities(
    connections: &sqlite::Connections,
    retry: &RetryPolicy,
    area: &Circle,
) -> Result<Vec<Community>> {
    retry_read(retry, || {
        let db = connections.shared()?;
        Ok(usecases::find_intersecting_communities(&db, area)?)
    })
}
