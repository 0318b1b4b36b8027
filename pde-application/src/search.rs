use super::*;
use crate::retry::{retry_read, RetryPolicy};

pub fn search_tips(
    connections: &sqlite::Connections,
    index: &dyn TipIndex,
    retry: &RetryPolicy,
    req: usecases::SearchRequest,
) -> Result<usecases::SearchResult> {
    retry_read(retry, || {
        let db = connections.shared()?;
        Ok(usecases::search_tips(&db, index, req.clone())?)
    })
}

pub fn pins_in_bbox(
    connections: &sqlite::Connections,
    retry: &RetryPolicy,
    bbox: Option<&MapBbox>,
) -> Result<Vec<Tip>> {
    retry_read(retry, || {
        let db = connections.shared()?;
        Ok(usecases::pins_in_bbox(&db, bbox)?)
    })
}
