use super::prelude::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Membership {
    pub community_id: Id,
    pub member_count: usize,
}

pub fn join_community<R: CommunityRepo>(repo: &R, id: &str, user_id: &UserId) -> Result<Membership> {
    if !user_id.is_valid() {
        return Err(Error::UserId);
    }
    let member_count = repo.add_community_member(id, user_id, Timestamp::now())?;
    Ok(Membership {
        community_id: id.into(),
        member_count,
    })
}

pub fn leave_community<R: CommunityRepo>(
    repo: &R,
    id: &str,
    user_id: &UserId,
) -> Result<Membership> {
    if !user_id.is_valid() {
        return Err(Error::UserId);
    }
    let member_count = repo.remove_community_member(id, user_id, Timestamp::now())?;
    Ok(Membership {
        community_id: id.into(),
        member_count,
    })
}
