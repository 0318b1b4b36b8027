use super::prelude::*;

pub fn delete_tip<R: TipRepo>(repo: &R, id: &str) -> Result<()> {
    Ok(repo.delete_tip(id)?)
}

pub fn delete_community<R: CommunityRepo>(repo: &R, id: &str) -> Result<()> {
    Ok(repo.delete_community(id)?)
}
